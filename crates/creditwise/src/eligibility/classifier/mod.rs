//! Contract between the decision engine and the trained model.
//!
//! The engine never trusts the position of the "Approved" probability blindly: when the model
//! reports its class identities they decide the column, otherwise the training convention
//! (column 0 = Approved, column 1 = Rejected) applies and the fallback is logged.

mod naive_bayes;

pub use naive_bayes::{GaussianNaiveBayes, ModelArtifactError};

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::Verdict;
use super::features::FeatureVector;

/// Tolerance applied when checking that a distribution sums to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Class identity as fixed at training time: 0 = Approved, 1 = Rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassLabel(pub i64);

impl ClassLabel {
    pub const APPROVED: ClassLabel = ClassLabel(0);
    pub const REJECTED: ClassLabel = ClassLabel(1);

    pub fn verdict(self) -> Option<Verdict> {
        match self {
            ClassLabel::APPROVED => Some(Verdict::Approved),
            ClassLabel::REJECTED => Some(Verdict::Rejected),
            _ => None,
        }
    }
}

/// Failure raised by a classifier or while interpreting its output.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier unavailable: {0}")]
    Unavailable(String),
    #[error("classifier inference failed: {0}")]
    Inference(String),
    #[error("classifier returned a malformed distribution: {detail}")]
    MalformedOutput { detail: String },
    #[error("classifier predicted unknown class label {0}")]
    UnknownLabel(i64),
    #[error("cannot map classifier labels {labels:?} onto Approved/Rejected columns")]
    AmbiguousClassLabels { labels: Vec<i64> },
}

/// Opaque probabilistic model scoring one feature row at a time.
///
/// Implementations are shared across concurrent requests, so inference must be reentrant.
/// Models that need exclusive access implement [`ExclusiveClassifier`] and are wrapped in
/// [`Serialized`].
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<ClassLabel, ClassifierError>;

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError>;

    /// Class identities in the order of the probability columns, when the model knows them.
    fn class_labels(&self) -> Option<Vec<ClassLabel>> {
        None
    }
}

/// Variant of [`Classifier`] for models whose inference mutates internal state.
pub trait ExclusiveClassifier: Send {
    fn predict(&mut self, features: &FeatureVector) -> Result<ClassLabel, ClassifierError>;

    fn predict_proba(&mut self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError>;

    fn class_labels(&self) -> Option<Vec<ClassLabel>> {
        None
    }
}

/// Serializes access to a non-reentrant model. Only the scoring calls hold the lock.
pub struct Serialized<C> {
    inner: Mutex<C>,
}

impl<C: ExclusiveClassifier> Serialized<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            inner: Mutex::new(classifier),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, C>, ClassifierError> {
        self.inner
            .lock()
            .map_err(|_| ClassifierError::Unavailable("classifier mutex poisoned".to_string()))
    }
}

impl<C: ExclusiveClassifier> Classifier for Serialized<C> {
    fn predict(&self, features: &FeatureVector) -> Result<ClassLabel, ClassifierError> {
        self.lock()?.predict(features)
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        self.lock()?.predict_proba(features)
    }

    // Labels are read-only metadata, so a poisoned lock still reports them.
    fn class_labels(&self) -> Option<Vec<ClassLabel>> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .class_labels()
    }
}

/// Where the Approved/Rejected column mapping came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSource {
    Reported,
    FixedConvention,
}

/// Probability column positions for each verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassColumns {
    pub approved: usize,
    pub rejected: usize,
    pub source: ColumnSource,
}

impl ClassColumns {
    pub const FIXED_CONVENTION: ClassColumns = ClassColumns {
        approved: 0,
        rejected: 1,
        source: ColumnSource::FixedConvention,
    };

    pub fn resolve(labels: Option<&[ClassLabel]>) -> Result<Self, ClassifierError> {
        let Some(labels) = labels else {
            return Ok(Self::FIXED_CONVENTION);
        };

        let ambiguous = || ClassifierError::AmbiguousClassLabels {
            labels: labels.iter().map(|label| label.0).collect(),
        };

        if labels.len() != 2 {
            return Err(ambiguous());
        }
        let approved = labels
            .iter()
            .position(|label| *label == ClassLabel::APPROVED)
            .ok_or_else(ambiguous)?;
        let rejected = labels
            .iter()
            .position(|label| *label == ClassLabel::REJECTED)
            .ok_or_else(ambiguous)?;

        Ok(Self {
            approved,
            rejected,
            source: ColumnSource::Reported,
        })
    }
}

/// Validated classifier result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierOutput {
    pub label: ClassLabel,
    pub probabilities: [f64; 2],
}

impl ClassifierOutput {
    pub fn new(label: ClassLabel, probabilities: Vec<f64>) -> Result<Self, ClassifierError> {
        let probabilities: [f64; 2] = probabilities.try_into().map_err(|raw: Vec<f64>| {
            ClassifierError::MalformedOutput {
                detail: format!("expected 2 probabilities, found {}", raw.len()),
            }
        })?;

        if let Some(value) = probabilities
            .iter()
            .find(|value| !value.is_finite() || **value < 0.0 || **value > 1.0)
        {
            return Err(ClassifierError::MalformedOutput {
                detail: format!("probability {value} outside [0, 1]"),
            });
        }

        let sum: f64 = probabilities.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(ClassifierError::MalformedOutput {
                detail: format!("probabilities sum to {sum}"),
            });
        }

        Ok(Self {
            label,
            probabilities,
        })
    }

    pub fn probability_of(&self, verdict: Verdict, columns: ClassColumns) -> f64 {
        match verdict {
            Verdict::Approved => self.probabilities[columns.approved],
            Verdict::Rejected => self.probabilities[columns.rejected],
        }
    }
}

/// Classifier opinion expressed in verdict terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelAssessment {
    pub model_verdict: Verdict,
    pub approval_probability: f64,
    pub rejection_probability: f64,
    pub column_source: ColumnSource,
}

/// Run both scoring calls and map the output onto verdict columns.
pub fn assess<C>(
    classifier: &C,
    features: &FeatureVector,
) -> Result<ModelAssessment, ClassifierError>
where
    C: Classifier + ?Sized,
{
    let label = classifier.predict(features)?;
    let output = ClassifierOutput::new(label, classifier.predict_proba(features)?)?;
    let model_verdict = output
        .label
        .verdict()
        .ok_or(ClassifierError::UnknownLabel(output.label.0))?;

    let labels = classifier.class_labels();
    let columns = ClassColumns::resolve(labels.as_deref())?;
    if columns.source == ColumnSource::FixedConvention {
        warn!("classifier does not report class labels; assuming column 0 = Approved");
    }

    Ok(ModelAssessment {
        model_verdict,
        approval_probability: output.probability_of(Verdict::Approved, columns),
        rejection_probability: output.probability_of(Verdict::Rejected, columns),
        column_source: columns.source,
    })
}
