use crate::scoring::domain::{CandidateProfile, EngagementMetrics};
use crate::scoring::features::FeatureKind;
use crate::scoring::propensity::{LoadedModel, LogisticModel, ModelError, ProbabilityModel};

pub(super) fn bare_profile(age: i32) -> CandidateProfile {
    CandidateProfile {
        age,
        ..CandidateProfile::default()
    }
}

/// Every positive rule fires; the raw total overshoots the clamp.
pub(super) fn strong_profile() -> CandidateProfile {
    CandidateProfile {
        age: 20,
        education_level: "Graduate (B.Com)".to_string(),
        source_channel: "referral".to_string(),
        income_bracket: "low".to_string(),
        skills: vec!["Tally".to_string(), "Excel".to_string()],
        interests: vec!["Retail".to_string()],
        profile_completed: true,
        documents_uploaded: true,
        ..CandidateProfile::default()
    }
}

pub(super) fn metrics(
    attendance_rate: f64,
    assignment_completion: f64,
    sentiment_score: f64,
    total_sessions: f64,
    notification_open_rate: f64,
) -> EngagementMetrics {
    EngagementMetrics {
        attendance_rate,
        assignment_completion,
        sentiment_score,
        total_sessions,
        notification_open_rate,
    }
}

/// Logistic model with a single non-zero coefficient on `edu_graduate`.
pub(super) fn graduate_model(intercept: f64, weight: f64) -> LoadedModel {
    LoadedModel::new(
        Box::new(LogisticModel {
            intercept,
            coefficients: vec![weight, 0.0],
        }),
        vec![
            FeatureKind::EduGraduate.name().to_string(),
            FeatureKind::ChannelReferral.name().to_string(),
        ],
    )
    .expect("valid model")
}

/// Model double that always fails, for exercising the rule fallback.
pub(super) struct BrokenModel;

impl ProbabilityModel for BrokenModel {
    fn input_width(&self) -> usize {
        1
    }

    fn predict_probability(&self, _row: &[f64]) -> Result<f64, ModelError> {
        Err(ModelError::InvalidProbability(f64::NAN))
    }
}

/// Model double returning a fixed value, which may be out of range.
pub(super) struct FixedModel(pub f64);

impl ProbabilityModel for FixedModel {
    fn input_width(&self) -> usize {
        1
    }

    fn predict_probability(&self, _row: &[f64]) -> Result<f64, ModelError> {
        Ok(self.0)
    }
}

pub(super) fn single_feature_model(model: Box<dyn ProbabilityModel>) -> LoadedModel {
    LoadedModel::new(model, vec!["age".to_string()]).expect("valid model")
}
