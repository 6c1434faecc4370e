use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use super::{ClassLabel, Classifier, ClassifierError};
use crate::eligibility::features::{FeatureVector, FEATURE_COUNT};

/// Errors raised while loading a persisted model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelArtifactError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid model artifact JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model artifact has an unexpected shape: {0}")]
    Shape(String),
}

#[derive(Debug, Deserialize)]
struct Artifact {
    classes: Vec<ClassLabel>,
    class_prior: Vec<f64>,
    theta: Vec<Vec<f64>>,
    var: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
struct ClassDensity {
    label: ClassLabel,
    log_prior: f64,
    mean: Vec<f64>,
    variance: Vec<f64>,
}

impl ClassDensity {
    fn joint_log_likelihood(&self, features: &[f64]) -> f64 {
        let log_density: f64 = features
            .iter()
            .zip(self.mean.iter().zip(&self.variance))
            .map(|(x, (mean, variance))| {
                (2.0 * PI * variance).ln() + (x - mean).powi(2) / variance
            })
            .sum();
        self.log_prior - 0.5 * log_density
    }
}

/// Gaussian Naive Bayes model restored from fitted parameters.
///
/// The artifact is plain JSON carrying `classes`, `class_prior`, and per-class `theta`/`var`
/// rows of [`FEATURE_COUNT`] values each. Inference is read-only, so one instance can serve
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct GaussianNaiveBayes {
    densities: Vec<ClassDensity>,
}

impl GaussianNaiveBayes {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelArtifactError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelArtifactError> {
        let artifact: Artifact = serde_json::from_reader(reader)?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(artifact: Artifact) -> Result<Self, ModelArtifactError> {
        let Artifact {
            classes,
            class_prior,
            theta,
            var,
        } = artifact;

        if classes.len() != 2 {
            return Err(ModelArtifactError::Shape(format!(
                "expected 2 classes, found {}",
                classes.len()
            )));
        }
        if class_prior.len() != classes.len()
            || theta.len() != classes.len()
            || var.len() != classes.len()
        {
            return Err(ModelArtifactError::Shape(
                "class_prior, theta and var must have one entry per class".to_string(),
            ));
        }

        let mut densities = Vec::with_capacity(classes.len());
        for (((label, prior), mean), variance) in classes
            .into_iter()
            .zip(class_prior)
            .zip(theta)
            .zip(var)
        {
            if !(prior.is_finite() && prior > 0.0 && prior <= 1.0) {
                return Err(ModelArtifactError::Shape(format!(
                    "prior for class {} must be in (0, 1], found {prior}",
                    label.0
                )));
            }
            if mean.len() != FEATURE_COUNT || variance.len() != FEATURE_COUNT {
                return Err(ModelArtifactError::Shape(format!(
                    "class {} expects {FEATURE_COUNT} features, found theta={} var={}",
                    label.0,
                    mean.len(),
                    variance.len()
                )));
            }
            if mean.iter().any(|value| !value.is_finite()) {
                return Err(ModelArtifactError::Shape(format!(
                    "theta for class {} contains non-finite values",
                    label.0
                )));
            }
            if variance
                .iter()
                .any(|value| !value.is_finite() || *value <= 0.0)
            {
                return Err(ModelArtifactError::Shape(format!(
                    "var for class {} must be finite and positive",
                    label.0
                )));
            }

            densities.push(ClassDensity {
                label,
                log_prior: prior.ln(),
                mean,
                variance,
            });
        }

        Ok(Self { densities })
    }

    fn posterior(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        let joint: Vec<f64> = self
            .densities
            .iter()
            .map(|density| density.joint_log_likelihood(features.as_slice()))
            .collect();

        let max = joint.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return Err(ClassifierError::Inference(
                "joint log-likelihood is not finite".to_string(),
            ));
        }
        let normaliser = max + joint.iter().map(|value| (value - max).exp()).sum::<f64>().ln();

        Ok(joint
            .into_iter()
            .map(|value| (value - normaliser).exp())
            .collect())
    }
}

impl Classifier for GaussianNaiveBayes {
    fn predict(&self, features: &FeatureVector) -> Result<ClassLabel, ClassifierError> {
        let posterior = self.posterior(features)?;
        // Ties go to the earliest column.
        posterior
            .iter()
            .copied()
            .enumerate()
            .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
            .map(|(index, _)| self.densities[index].label)
            .ok_or_else(|| ClassifierError::Inference("model has no classes".to_string()))
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        self.posterior(features)
    }

    fn class_labels(&self) -> Option<Vec<ClassLabel>> {
        Some(self.densities.iter().map(|density| density.label).collect())
    }
}
