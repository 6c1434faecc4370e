use creditwise::eligibility::{
    ClassLabel, Classifier, ClassifierError, FeatureVector, GaussianNaiveBayes,
};
use creditwise::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the persisted classifier once at startup; a missing or malformed artifact is fatal.
pub(crate) fn load_classifier(path: &Path) -> Result<GaussianNaiveBayes, AppError> {
    let model = GaussianNaiveBayes::from_path(path)?;
    info!(artifact = %path.display(), "classifier artifact loaded");
    Ok(model)
}

/// Model stand-in that always reports the same approval probability.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedProbabilityClassifier {
    approval_probability: f64,
}

impl FixedProbabilityClassifier {
    pub(crate) fn new(approval_probability: f64) -> Self {
        Self {
            approval_probability,
        }
    }
}

impl Classifier for FixedProbabilityClassifier {
    fn predict(&self, _features: &FeatureVector) -> Result<ClassLabel, ClassifierError> {
        Ok(if self.approval_probability >= 0.5 {
            ClassLabel::APPROVED
        } else {
            ClassLabel::REJECTED
        })
    }

    fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        Ok(vec![
            self.approval_probability,
            1.0 - self.approval_probability,
        ])
    }

    fn class_labels(&self) -> Option<Vec<ClassLabel>> {
        Some(vec![ClassLabel::APPROVED, ClassLabel::REJECTED])
    }
}
