//! Candidate propensity and dropout-risk scoring.
//!
//! Scoring is a pure function of its input. [`ScoringEngine`] is the only stateful piece: it
//! holds the optional trained model, loaded once and read-only afterwards.

pub mod domain;
mod engine;
pub mod features;
pub mod propensity;
mod risk;

#[cfg(test)]
mod tests;

pub use domain::{
    CandidateProfile, Confidence, EngagementMetrics, RiskLevel, RiskResult, ScoreFactor,
    ScoreResult, ScoringMethod, NEUTRAL_SENTIMENT,
};
pub use engine::{ModelAvailability, ScoringEngine};
pub use features::{extract_features, FeatureKind, FeatureMap};
pub use propensity::{
    LoadedModel, LogisticModel, ModelArtifact, ModelError, ModelSpec, Predictor,
    ProbabilityModel, PropensityWeights,
};
pub use risk::calculate_dropout_risk;
