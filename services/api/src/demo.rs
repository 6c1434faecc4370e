use crate::infra::{load_classifier, FixedProbabilityClassifier};
use clap::Args;
use creditwise::config::AppConfig;
use creditwise::eligibility::{
    ApplicationSubmission, EducationLevel, EligibilityResult, EligibilityService,
    EmployerCategory, EmploymentStatus, Gender, LoanPurpose, MaritalStatus, PolicyConfig,
    PropertyArea, ScoreResponse,
};
use creditwise::error::AppError;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding one applicant submission
    #[arg(long)]
    pub(crate) applicant: PathBuf,
    /// Classifier artifact to score with (defaults to APP_MODEL_PATH)
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { applicant, model } = args;
    let artifact_path = match model {
        Some(path) => path,
        None => AppConfig::load()?.model.artifact_path,
    };

    let submission: ApplicationSubmission =
        serde_json::from_reader(BufReader::new(File::open(&applicant)?))?;
    let classifier = Arc::new(load_classifier(&artifact_path)?);
    let service = EligibilityService::new(classifier, PolicyConfig::default());
    let result = service.score(submission)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&ScoreResponse::new(result))?
    );
    Ok(())
}

struct Scenario {
    name: &'static str,
    approval_probability: f64,
    submission: ApplicationSubmission,
}

pub(crate) fn run_demo() {
    println!("CreditWise eligibility demo");
    let policy = PolicyConfig::default();
    println!(
        "Policy: credit score >= {} | DTI <= {:.2} | existing loans < {} | approval threshold {:.2}",
        policy.minimum_credit_score,
        policy.maximum_dti_ratio,
        policy.existing_loan_limit,
        policy.approval_threshold
    );

    for scenario in demo_scenarios() {
        let service = EligibilityService::new(
            Arc::new(FixedProbabilityClassifier::new(scenario.approval_probability)),
            policy.clone(),
        );
        println!(
            "\n{} (model approval probability {:.2})",
            scenario.name, scenario.approval_probability
        );
        match service.score(scenario.submission) {
            Ok(result) => render_result(&result),
            Err(err) => println!("  Scoring failed: {err}"),
        }
    }
}

fn render_result(result: &EligibilityResult) {
    println!(
        "- Verdict: {} ({})",
        result.verdict().label(),
        result.decision.summary()
    );
    match result.metrics.loan_to_income {
        Some(ratio) => println!(
            "- Combined income {:.0} | loan-to-income {:.2}",
            result.metrics.total_income, ratio
        ),
        None => println!(
            "- Combined income {:.0} | loan-to-income not computed",
            result.metrics.total_income
        ),
    }
    if result.violations.is_empty() {
        println!("- Rule violations: none");
    } else {
        println!("- Rule violations:");
        for violation in &result.violations {
            println!("    - [{:?}] {}", violation.severity, violation.message);
        }
    }
    println!("- Recommendations:");
    for recommendation in &result.recommendations {
        println!("    - {recommendation}");
    }
}

fn demo_scenarios() -> Vec<Scenario> {
    let mut low_credit = demo_applicant();
    low_credit.credit_score = 600;

    let mut no_income = demo_applicant();
    no_income.applicant_income = 0.0;
    no_income.coapplicant_income = 0.0;
    no_income.loan_amount = 10_000.0;

    vec![
        Scenario {
            name: "Scenario A: low credit score, confident model",
            approval_probability: 0.90,
            submission: low_credit,
        },
        Scenario {
            name: "Scenario B: clean record, confident model",
            approval_probability: 0.80,
            submission: demo_applicant(),
        },
        Scenario {
            name: "Scenario C: clean record, hesitant model",
            approval_probability: 0.60,
            submission: demo_applicant(),
        },
        Scenario {
            name: "Scenario D: no declared income",
            approval_probability: 0.90,
            submission: no_income,
        },
    ]
}

fn demo_applicant() -> ApplicationSubmission {
    ApplicationSubmission {
        applicant_income: 60_000.0,
        coapplicant_income: 20_000.0,
        age: 35,
        dependents: 1,
        existing_loans: 0,
        savings: 15_000.0,
        collateral_value: 40_000.0,
        loan_amount: 100_000.0,
        loan_term_months: 60,
        education_level: EducationLevel::Graduate,
        employment_status: EmploymentStatus::Salaried,
        marital_status: MaritalStatus::Married,
        loan_purpose: LoanPurpose::Home,
        property_area: PropertyArea::Urban,
        gender: Gender::Female,
        employer_category: EmployerCategory::Private,
        dti_ratio: 0.3,
        credit_score: 700,
    }
}
