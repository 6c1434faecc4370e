use serde::{Deserialize, Serialize};

use super::super::domain::ApplicantRecord;
use super::config::PolicyConfig;

/// Business rules checked for every application, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    CreditScore,
    DebtToIncome,
    ExistingLoans,
    LoanToIncome,
    ModelConfidence,
}

impl RuleKind {
    pub const fn label(self) -> &'static str {
        match self {
            RuleKind::CreditScore => "credit_score",
            RuleKind::DebtToIncome => "debt_to_income",
            RuleKind::ExistingLoans => "existing_loans",
            RuleKind::LoanToIncome => "loan_to_income",
            RuleKind::ModelConfidence => "model_confidence",
        }
    }
}

/// Hard violations force rejection; soft ones are warnings only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Hard,
    Soft,
}

/// A failed rule with an audit message embedding the evaluated quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleViolation {
    pub rule: RuleKind,
    pub message: String,
    pub severity: Severity,
}

impl RuleViolation {
    pub fn is_hard(&self) -> bool {
        self.severity == Severity::Hard
    }
}

struct RuleInputs<'a> {
    record: &'a ApplicantRecord,
    approval_probability: f64,
    config: &'a PolicyConfig,
}

struct Rule {
    kind: RuleKind,
    severity: Severity,
    check: fn(&RuleInputs<'_>) -> Option<String>,
}

const RULES: [Rule; 5] = [
    Rule {
        kind: RuleKind::CreditScore,
        severity: Severity::Hard,
        check: credit_score_below_minimum,
    },
    Rule {
        kind: RuleKind::DebtToIncome,
        severity: Severity::Hard,
        check: debt_to_income_above_maximum,
    },
    Rule {
        kind: RuleKind::ExistingLoans,
        severity: Severity::Hard,
        check: existing_loans_at_limit,
    },
    Rule {
        kind: RuleKind::LoanToIncome,
        severity: Severity::Soft,
        check: loan_to_income_above_warning,
    },
    Rule {
        kind: RuleKind::ModelConfidence,
        severity: Severity::Soft,
        check: model_confidence_below_threshold,
    },
];

fn credit_score_below_minimum(inputs: &RuleInputs<'_>) -> Option<String> {
    let score = inputs.record.credit_score;
    let minimum = inputs.config.minimum_credit_score;
    (score < minimum).then(|| format!("Credit Score below {minimum} (Current: {score})"))
}

fn debt_to_income_above_maximum(inputs: &RuleInputs<'_>) -> Option<String> {
    let ratio = inputs.record.dti_ratio;
    let maximum = inputs.config.maximum_dti_ratio;
    (ratio > maximum).then(|| format!("Debt-to-Income ratio above {maximum} (Current: {ratio})"))
}

fn existing_loans_at_limit(inputs: &RuleInputs<'_>) -> Option<String> {
    let count = inputs.record.existing_loans;
    let limit = inputs.config.existing_loan_limit;
    (count >= limit).then(|| format!("Existing loans at or above {limit} (Current: {count})"))
}

// Not applicable without income: the ratio is undefined, not a violation.
fn loan_to_income_above_warning(inputs: &RuleInputs<'_>) -> Option<String> {
    let ratio = inputs.record.loan_to_income()?;
    let warning = inputs.config.loan_to_income_warning;
    (ratio > warning).then(|| format!("Loan-to-income ratio above {warning} (Current: {ratio})"))
}

fn model_confidence_below_threshold(inputs: &RuleInputs<'_>) -> Option<String> {
    let probability = inputs.approval_probability;
    let threshold = inputs.config.approval_threshold;
    (probability < threshold).then(|| {
        format!("Model approval probability below {threshold} (Current: {probability})")
    })
}

/// Run every rule against the record and approval probability, in table order.
pub fn evaluate(
    record: &ApplicantRecord,
    approval_probability: f64,
    config: &PolicyConfig,
) -> Vec<RuleViolation> {
    let inputs = RuleInputs {
        record,
        approval_probability,
        config,
    };

    RULES
        .iter()
        .filter_map(|rule| {
            (rule.check)(&inputs).map(|message| RuleViolation {
                rule: rule.kind,
                message,
                severity: rule.severity,
            })
        })
        .collect()
}
