//! Loan eligibility scoring: feature encoding, classifier scoring, rule overlay, and advice.
//!
//! Requests flow `encode -> classifier -> evaluate -> decide -> recommend`. Hard rules always
//! dominate the classifier; the model's probability only gates applications that pass them.

pub mod classifier;
pub mod domain;
pub mod evaluation;
pub mod features;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use classifier::{
    ClassColumns, ClassLabel, Classifier, ClassifierError, ClassifierOutput, ColumnSource,
    ExclusiveClassifier, GaussianNaiveBayes, ModelArtifactError, ModelAssessment, Serialized,
};
pub use domain::{
    ApplicantRecord, ApplicationSubmission, EducationLevel, EmployerCategory, EmploymentStatus,
    Gender, InvalidApplicant, LoanPurpose, MaritalStatus, PropertyArea, Verdict,
};
pub use evaluation::{
    decide, evaluate, recommend, ApplicationMetrics, EligibilityDecision, EligibilityEngine,
    EligibilityResult, PolicyConfig, RejectionReason, RuleKind, RuleViolation, Severity,
};
pub use features::{encode, FeatureVector, FEATURE_COUNT, FEATURE_NAMES, ONE_HOT_GROUPS};
pub use router::{eligibility_router, ScoreResponse};
pub use service::{EligibilityService, ScoringError};
