use serde::{Deserialize, Serialize};

/// Thresholds backing the hard rules, soft warnings, and remediation advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub minimum_credit_score: u16,
    pub maximum_dti_ratio: f64,
    pub existing_loan_limit: u32,
    pub loan_to_income_warning: f64,
    pub approval_threshold: f64,
    pub loan_to_income_advice: f64,
    pub savings_to_loan_advice: f64,
    pub collateral_to_loan_advice: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            minimum_credit_score: 650,
            maximum_dti_ratio: 0.5,
            existing_loan_limit: 2,
            loan_to_income_warning: 5.0,
            approval_threshold: 0.75,
            loan_to_income_advice: 3.0,
            savings_to_loan_advice: 0.2,
            collateral_to_loan_advice: 0.5,
        }
    }
}
