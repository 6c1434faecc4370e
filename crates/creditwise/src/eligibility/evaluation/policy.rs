use serde::{Deserialize, Serialize};

use super::super::domain::Verdict;
use super::config::PolicyConfig;
use super::rules::{RuleKind, RuleViolation};

/// Final adjudication for a scored application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EligibilityDecision {
    Approved,
    Rejected(RejectionReason),
}

impl EligibilityDecision {
    pub fn verdict(&self) -> Verdict {
        match self {
            EligibilityDecision::Approved => Verdict::Approved,
            EligibilityDecision::Rejected(_) => Verdict::Rejected,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            EligibilityDecision::Approved => "loan approved".to_string(),
            EligibilityDecision::Rejected(reason) => reason.summary(),
        }
    }
}

/// Why an application was rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RejectionReason {
    HardRuleViolation {
        rules: Vec<RuleKind>,
    },
    ModelConfidenceBelowThreshold {
        approval_probability: f64,
        threshold: f64,
    },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::HardRuleViolation { rules } => {
                let labels: Vec<&str> = rules.iter().map(|rule| rule.label()).collect();
                format!("rejected by hard rule(s): {}", labels.join(", "))
            }
            RejectionReason::ModelConfidenceBelowThreshold {
                approval_probability,
                threshold,
            } => format!(
                "rejected: model confidence below threshold ({:.2} < {:.2})",
                approval_probability, threshold
            ),
        }
    }
}

/// Hard rules dominate the classifier; only then does the probability gate apply.
pub fn decide(
    violations: &[RuleViolation],
    approval_probability: f64,
    config: &PolicyConfig,
) -> EligibilityDecision {
    let hard_rules: Vec<RuleKind> = violations
        .iter()
        .filter(|violation| violation.is_hard())
        .map(|violation| violation.rule)
        .collect();

    if !hard_rules.is_empty() {
        return EligibilityDecision::Rejected(RejectionReason::HardRuleViolation {
            rules: hard_rules,
        });
    }

    if approval_probability >= config.approval_threshold {
        EligibilityDecision::Approved
    } else {
        EligibilityDecision::Rejected(RejectionReason::ModelConfidenceBelowThreshold {
            approval_probability,
            threshold: config.approval_threshold,
        })
    }
}
