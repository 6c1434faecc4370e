use super::super::domain::ApplicantRecord;
use super::config::PolicyConfig;
use super::rules::{RuleKind, RuleViolation};

const APPROVED_MESSAGE: &str = "Application meets all eligibility criteria; no action needed";

fn remediation(rule: RuleKind, record: &ApplicantRecord, config: &PolicyConfig) -> Option<String> {
    match rule {
        RuleKind::CreditScore => Some(format!(
            "Raise your credit score to at least {} (currently {}) by paying dues on time and lowering card balances",
            config.minimum_credit_score, record.credit_score
        )),
        RuleKind::DebtToIncome => Some(format!(
            "Reduce outstanding debt to bring the debt-to-income ratio to {} or below (currently {})",
            config.maximum_dti_ratio, record.dti_ratio
        )),
        RuleKind::ExistingLoans => Some(format!(
            "Close or consolidate existing loans to fewer than {} (currently {})",
            config.existing_loan_limit, record.existing_loans
        )),
        RuleKind::LoanToIncome | RuleKind::ModelConfidence => None,
    }
}

fn confidence_suggestions(record: &ApplicantRecord, config: &PolicyConfig) -> Vec<String> {
    let mut suggestions = Vec::new();

    if let Some(ratio) = record.loan_to_income() {
        if ratio > config.loan_to_income_advice {
            suggestions.push(format!(
                "Request a smaller loan amount; the loan is {ratio:.1}x combined income"
            ));
        }
    }

    let savings_target = record.loan_amount * config.savings_to_loan_advice;
    if record.savings < savings_target {
        suggestions.push(format!(
            "Increase savings to at least {:.0} ({:.0}% of the loan amount)",
            savings_target,
            config.savings_to_loan_advice * 100.0
        ));
    }

    let collateral_target = record.loan_amount * config.collateral_to_loan_advice;
    if record.collateral_value < collateral_target {
        suggestions.push(format!(
            "Offer collateral worth at least {:.0} ({:.0}% of the loan amount)",
            collateral_target,
            config.collateral_to_loan_advice * 100.0
        ));
    }

    suggestions.push("Add a co-applicant with a stable income".to_string());
    suggestions.push("Choose a shorter loan term".to_string());

    suggestions
}

/// Remediation advice derived from the violations, in rule order.
pub fn recommend(
    record: &ApplicantRecord,
    violations: &[RuleViolation],
    approval_probability: f64,
    config: &PolicyConfig,
) -> Vec<String> {
    let remediations: Vec<String> = violations
        .iter()
        .filter(|violation| violation.is_hard())
        .filter_map(|violation| remediation(violation.rule, record, config))
        .collect();

    if !remediations.is_empty() {
        return remediations;
    }

    if approval_probability < config.approval_threshold {
        return confidence_suggestions(record, config);
    }

    vec![APPROVED_MESSAGE.to_string()]
}
