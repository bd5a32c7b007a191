use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{CandidateProfile, EngagementMetrics, RiskResult, ScoreResult};
use super::features::extract_features;
use super::propensity::{LoadedModel, ModelArtifact, Predictor, PropensityWeights};
use super::risk::calculate_dropout_risk;
use crate::config::ScoringConfig;

/// Outcome of the one-time model load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModelAvailability {
    /// No artifact configured; the rule table is the only scorer.
    Disabled,
    Loaded { feature_count: usize },
    Unavailable { reason: String },
}

struct ResolvedPredictor {
    availability: ModelAvailability,
    predictor: Predictor,
}

enum ModelSource {
    Path(PathBuf),
    Preloaded(Arc<LoadedModel>),
    None,
}

/// Scoring context shared by every request.
///
/// The model artifact is read at most once, on first use or through [`ScoringEngine::warm_up`].
/// A failed load is remembered for the life of the process and every call then uses the rule
/// table; nothing is retried.
pub struct ScoringEngine {
    weights: PropensityWeights,
    source: ModelSource,
    resolved: OnceLock<ResolvedPredictor>,
}

impl ScoringEngine {
    pub fn new(config: &ScoringConfig) -> Self {
        let source = match &config.model_path {
            Some(path) => ModelSource::Path(path.clone()),
            None => ModelSource::None,
        };
        Self::with_source(source)
    }

    /// Engine that never consults a model.
    pub fn rule_based() -> Self {
        Self::with_source(ModelSource::None)
    }

    /// Engine backed by an already validated model.
    pub fn with_model(model: LoadedModel) -> Self {
        Self::with_source(ModelSource::Preloaded(Arc::new(model)))
    }

    fn with_source(source: ModelSource) -> Self {
        Self {
            weights: PropensityWeights::default(),
            source,
            resolved: OnceLock::new(),
        }
    }

    /// Resolve the model now instead of on the first scoring call.
    pub fn warm_up(&self) -> &ModelAvailability {
        &self.resolve().availability
    }

    pub fn availability(&self) -> &ModelAvailability {
        self.warm_up()
    }

    pub fn get_propensity_score(&self, profile: &CandidateProfile) -> ScoreResult {
        let features = extract_features(profile);
        self.resolve().predictor.predict(&features)
    }

    /// Rule-only; the model never takes part in dropout risk.
    pub fn get_dropout_risk(&self, metrics: &EngagementMetrics) -> RiskResult {
        calculate_dropout_risk(metrics)
    }

    fn resolve(&self) -> &ResolvedPredictor {
        self.resolved.get_or_init(|| {
            let rule_based = Predictor::RuleBased(self.weights);
            match &self.source {
                ModelSource::None => ResolvedPredictor {
                    availability: ModelAvailability::Disabled,
                    predictor: rule_based,
                },
                ModelSource::Preloaded(model) => self.model_predictor(model.clone()),
                ModelSource::Path(path) => match load_model(path) {
                    Ok(model) => {
                        info!(
                            path = %path.display(),
                            features = model.feature_names().len(),
                            "loaded propensity model"
                        );
                        self.model_predictor(Arc::new(model))
                    }
                    Err(reason) => {
                        warn!(path = %path.display(), %reason, "propensity model unavailable; using rule table");
                        ResolvedPredictor {
                            availability: ModelAvailability::Unavailable { reason },
                            predictor: rule_based,
                        }
                    }
                },
            }
        })
    }

    fn model_predictor(&self, model: Arc<LoadedModel>) -> ResolvedPredictor {
        ResolvedPredictor {
            availability: ModelAvailability::Loaded {
                feature_count: model.feature_names().len(),
            },
            predictor: Predictor::Model {
                model,
                fallback: self.weights,
            },
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::rule_based()
    }
}

fn load_model(path: &Path) -> Result<LoadedModel, String> {
    ModelArtifact::open(path)
        .and_then(ModelArtifact::into_loaded)
        .map_err(|error| error.to_string())
}
