use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::eligibility::classifier::{
    ClassLabel, Classifier, ClassifierError, ColumnSource, ModelAssessment,
};
use crate::eligibility::domain::{
    ApplicantRecord, ApplicationSubmission, EducationLevel, EmployerCategory, EmploymentStatus,
    Gender, LoanPurpose, MaritalStatus, PropertyArea, Verdict,
};
use crate::eligibility::evaluation::{EligibilityEngine, PolicyConfig};
use crate::eligibility::features::FeatureVector;
use crate::eligibility::service::EligibilityService;

pub(super) fn submission() -> ApplicationSubmission {
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

pub(super) fn record() -> ApplicantRecord {
    ApplicantRecord::try_from(submission()).expect("baseline submission is valid")
}

pub(super) fn record_with(adjust: impl FnOnce(&mut ApplicationSubmission)) -> ApplicantRecord {
    let mut submission = submission();
    adjust(&mut submission);
    ApplicantRecord::try_from(submission).expect("adjusted submission is valid")
}

pub(super) fn policy() -> PolicyConfig {
    PolicyConfig::default()
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(policy())
}

pub(super) fn model(approval_probability: f64) -> ModelAssessment {
    ModelAssessment {
        model_verdict: if approval_probability >= 0.5 {
            Verdict::Approved
        } else {
            Verdict::Rejected
        },
        approval_probability,
        rejection_probability: 1.0 - approval_probability,
        column_source: ColumnSource::Reported,
    }
}

/// Stub returning a fixed approval probability, laid out per its reported labels.
#[derive(Debug, Clone)]
pub(super) struct FixedClassifier {
    pub(super) approval: f64,
    pub(super) labels: Option<Vec<ClassLabel>>,
}

impl FixedClassifier {
    pub(super) fn approving(approval: f64) -> Self {
        Self {
            approval,
            labels: Some(vec![ClassLabel::APPROVED, ClassLabel::REJECTED]),
        }
    }

    pub(super) fn unlabelled(approval: f64) -> Self {
        Self {
            approval,
            labels: None,
        }
    }

    pub(super) fn with_labels(approval: f64, labels: Vec<ClassLabel>) -> Self {
        Self {
            approval,
            labels: Some(labels),
        }
    }
}

impl Classifier for FixedClassifier {
    fn predict(&self, _features: &FeatureVector) -> Result<ClassLabel, ClassifierError> {
        if self.approval >= 0.5 {
            Ok(ClassLabel::APPROVED)
        } else {
            Ok(ClassLabel::REJECTED)
        }
    }

    fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        let approved_first = self
            .labels
            .as_ref()
            .map(|labels| labels.first() != Some(&ClassLabel::REJECTED))
            .unwrap_or(true);
        if approved_first {
            Ok(vec![self.approval, 1.0 - self.approval])
        } else {
            Ok(vec![1.0 - self.approval, self.approval])
        }
    }

    fn class_labels(&self) -> Option<Vec<ClassLabel>> {
        self.labels.clone()
    }
}

/// Stub whose probability output is returned verbatim.
pub(super) struct RawClassifier {
    pub(super) label: ClassLabel,
    pub(super) probabilities: Vec<f64>,
}

impl Classifier for RawClassifier {
    fn predict(&self, _features: &FeatureVector) -> Result<ClassLabel, ClassifierError> {
        Ok(self.label)
    }

    fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        Ok(self.probabilities.clone())
    }
}

pub(super) struct OfflineClassifier;

impl Classifier for OfflineClassifier {
    fn predict(&self, _features: &FeatureVector) -> Result<ClassLabel, ClassifierError> {
        Err(ClassifierError::Unavailable("artifact not loaded".to_string()))
    }

    fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        Err(ClassifierError::Unavailable("artifact not loaded".to_string()))
    }
}

pub(super) fn service_with<C: Classifier + 'static>(classifier: C) -> EligibilityService<C> {
    EligibilityService::new(Arc::new(classifier), policy())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
