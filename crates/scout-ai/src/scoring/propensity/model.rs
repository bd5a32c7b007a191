use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::domain::{round_to, Confidence, ScoreFactor, ScoreResult, ScoringMethod};
use super::super::features::{FeatureKind, FeatureMap};

const CONFIDENT_BELOW: f64 = 0.3;
const CONFIDENT_ABOVE: f64 = 0.7;
const MAX_MODEL_FACTORS: usize = 5;

/// Failures while loading or evaluating a trained propensity model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model artifact unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("model artifact malformed: {0}")]
    Format(#[from] serde_json::Error),
    #[error("model expects {expected} features but artifact lists {found} feature names")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("model artifact lists no features")]
    NoFeatures,
    #[error("model produced an invalid probability: {0}")]
    InvalidProbability(f64),
}

/// A trained predictor mapping an ordered feature row to a probability.
pub trait ProbabilityModel: Send + Sync {
    /// Number of inputs the model was trained on.
    fn input_width(&self) -> usize;

    fn predict_probability(&self, row: &[f64]) -> Result<f64, ModelError>;
}

/// Logistic regression: `sigmoid(intercept + coefficients · row)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl ProbabilityModel for LogisticModel {
    fn input_width(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_probability(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.coefficients.len() {
            return Err(ModelError::ShapeMismatch {
                expected: self.coefficients.len(),
                found: row.len(),
            });
        }

        let logit = self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(weight, value)| weight * value)
                .sum::<f64>();

        Ok(1.0 / (1.0 + (-logit).exp()))
    }
}

/// Serialized model kinds an artifact may carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    Logistic(LogisticModel),
}

/// On-disk artifact: the model plus the ordered feature names it was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub model: ModelSpec,
    pub feature_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ModelArtifact {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn open(path: &Path) -> Result<Self, ModelError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), ModelError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Validate the artifact and turn it into a ready-to-score model.
    pub fn into_loaded(self) -> Result<LoadedModel, ModelError> {
        let model: Box<dyn ProbabilityModel> = match self.model {
            ModelSpec::Logistic(model) => Box::new(model),
        };
        LoadedModel::new(model, self.feature_names)
    }
}

/// A validated model together with the feature ordering it expects.
pub struct LoadedModel {
    model: Box<dyn ProbabilityModel>,
    feature_names: Vec<String>,
}

impl fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedModel")
            .field("feature_names", &self.feature_names)
            .finish_non_exhaustive()
    }
}

impl LoadedModel {
    pub fn new(
        model: Box<dyn ProbabilityModel>,
        feature_names: Vec<String>,
    ) -> Result<Self, ModelError> {
        if feature_names.is_empty() {
            return Err(ModelError::NoFeatures);
        }
        if model.input_width() != feature_names.len() {
            return Err(ModelError::ShapeMismatch {
                expected: model.input_width(),
                found: feature_names.len(),
            });
        }

        Ok(Self {
            model,
            feature_names,
        })
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Score a feature map. Errors are left to the caller, which falls back to the rules.
    pub fn score(&self, features: &FeatureMap) -> Result<ScoreResult, ModelError> {
        let row: Vec<f64> = self
            .feature_names
            .iter()
            .map(|name| features.value_by_name(name))
            .collect();

        let probability = self.model.predict_probability(&row)?;
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(ModelError::InvalidProbability(probability));
        }

        let score = round_to(probability * 100.0, 2);
        Ok(ScoreResult {
            score,
            probability: round_to(score / 100.0, 4),
            method: ScoringMethod::MlModel,
            confidence: Confidence::from_extremes(probability, CONFIDENT_BELOW, CONFIDENT_ABOVE),
            factors: important_factors(features),
        })
    }
}

/// Fixed shortlist of signals surfaced next to model scores.
fn important_factors(features: &FeatureMap) -> Vec<ScoreFactor> {
    let shortlist = [
        (FeatureKind::EduGraduate, "Graduate education", "high impact"),
        (FeatureKind::ChannelReferral, "Referral source", "high impact"),
        (FeatureKind::DocumentsUploaded, "Documents uploaded", "high impact"),
        (FeatureKind::ProfileCompleted, "Profile complete", "medium impact"),
    ];

    shortlist
        .into_iter()
        .filter(|(feature, _, _)| features.flag(*feature))
        .map(|(_, label, impact)| ScoreFactor::new(label, impact))
        .take(MAX_MODEL_FACTORS)
        .collect()
}
