use std::sync::Arc;

use tracing::{debug, info, warn};

use super::classifier::{self, Classifier, ClassifierError};
use super::domain::{ApplicantRecord, ApplicationSubmission, InvalidApplicant};
use super::evaluation::{EligibilityEngine, EligibilityResult, PolicyConfig};
use super::features::encode;

/// Service composing the feature encoder, injected classifier, and decision engine.
pub struct EligibilityService<C: ?Sized> {
    classifier: Arc<C>,
    engine: Arc<EligibilityEngine>,
}

impl<C> EligibilityService<C>
where
    C: Classifier + ?Sized + 'static,
{
    pub fn new(classifier: Arc<C>, config: PolicyConfig) -> Self {
        Self {
            classifier,
            engine: Arc::new(EligibilityEngine::new(config)),
        }
    }

    pub fn policy(&self) -> &PolicyConfig {
        self.engine.config()
    }

    /// Validate a raw submission and score it.
    pub fn score(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<EligibilityResult, ScoringError> {
        let record = ApplicantRecord::try_from(submission)?;
        self.score_record(&record)
    }

    /// Score an already validated record. Classifier failures abort the request.
    pub fn score_record(
        &self,
        record: &ApplicantRecord,
    ) -> Result<EligibilityResult, ScoringError> {
        let features = encode(record);
        debug!(columns = features.as_slice().len(), "features encoded");

        let model = classifier::assess(self.classifier.as_ref(), &features).map_err(|error| {
            warn!(%error, "classifier scoring failed");
            error
        })?;
        debug!(
            approval_probability = model.approval_probability,
            model_verdict = model.model_verdict.label(),
            "classifier scored application"
        );

        let result = self.engine.assess(record, model);
        info!(
            verdict = result.verdict().label(),
            approval_probability = result.approval_probability,
            violations = result.violations.len(),
            "eligibility decided"
        );

        Ok(result)
    }
}

/// Error raised while scoring a single application.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error(transparent)]
    InvalidApplicant(#[from] InvalidApplicant),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}
