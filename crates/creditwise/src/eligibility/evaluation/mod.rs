mod config;
mod policy;
mod recommendations;
mod rules;

pub use config::PolicyConfig;
pub use policy::{decide, EligibilityDecision, RejectionReason};
pub use recommendations::recommend;
pub use rules::{evaluate, RuleKind, RuleViolation, Severity};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classifier::ModelAssessment;
use super::domain::{ApplicantRecord, Verdict};

/// Stateless engine applying the rule table and decision policy to a scored record.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    config: PolicyConfig,
}

impl EligibilityEngine {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn assess(&self, record: &ApplicantRecord, model: ModelAssessment) -> EligibilityResult {
        let approval_probability = model.approval_probability;

        let violations = evaluate(record, approval_probability, &self.config);
        debug!(
            violations = violations.len(),
            hard = violations.iter().filter(|violation| violation.is_hard()).count(),
            "rules evaluated"
        );

        let decision = decide(&violations, approval_probability, &self.config);
        let recommendations =
            recommend(record, &violations, approval_probability, &self.config);

        EligibilityResult {
            decision,
            approval_probability,
            model,
            violations,
            recommendations,
            metrics: ApplicationMetrics::from_record(record),
        }
    }
}

/// Key figures echoed back alongside the decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplicationMetrics {
    pub total_income: f64,
    /// Absent when combined income is zero.
    pub loan_to_income: Option<f64>,
}

impl ApplicationMetrics {
    fn from_record(record: &ApplicantRecord) -> Self {
        Self {
            total_income: record.total_income(),
            loan_to_income: record.loan_to_income(),
        }
    }
}

/// Outcome of one scoring request. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub decision: EligibilityDecision,
    pub approval_probability: f64,
    pub model: ModelAssessment,
    pub violations: Vec<RuleViolation>,
    pub recommendations: Vec<String>,
    pub metrics: ApplicationMetrics,
}

impl EligibilityResult {
    pub fn verdict(&self) -> Verdict {
        self.decision.verdict()
    }

    pub fn violation_messages(&self) -> Vec<&str> {
        self.violations
            .iter()
            .map(|violation| violation.message.as_str())
            .collect()
    }
}
