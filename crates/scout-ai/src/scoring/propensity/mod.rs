mod model;
mod rules;
mod weights;

pub use model::{
    LoadedModel, LogisticModel, ModelArtifact, ModelError, ModelSpec, ProbabilityModel,
};
pub use weights::PropensityWeights;

use std::sync::Arc;

use tracing::warn;

use super::domain::{ScoreResult, ScoringMethod};
use super::features::FeatureMap;

/// Propensity scoring strategy, chosen at runtime from model availability.
///
/// Both variants consume the same [`FeatureMap`]; the model variant keeps the rule table as
/// its fallback so a prediction failure still yields a complete result.
#[derive(Debug, Clone)]
pub enum Predictor {
    RuleBased(PropensityWeights),
    Model {
        model: Arc<LoadedModel>,
        fallback: PropensityWeights,
    },
}

impl Predictor {
    pub fn method(&self) -> ScoringMethod {
        match self {
            Predictor::RuleBased(_) => ScoringMethod::RuleBased,
            Predictor::Model { .. } => ScoringMethod::MlModel,
        }
    }

    pub fn predict(&self, features: &FeatureMap) -> ScoreResult {
        match self {
            Predictor::RuleBased(weights) => rules::score_features(features, weights),
            Predictor::Model { model, fallback } => match model.score(features) {
                Ok(result) => result,
                Err(error) => {
                    warn!(%error, "propensity model failed; scoring with rule table");
                    rules::score_features(features, fallback)
                }
            },
        }
    }
}

impl Default for Predictor {
    fn default() -> Self {
        Predictor::RuleBased(PropensityWeights::default())
    }
}
