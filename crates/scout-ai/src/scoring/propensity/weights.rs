use serde::{Deserialize, Serialize};

/// Additive bonuses applied by the rule-based propensity scorer.
///
/// `Default` is the calibrated table used in production; the values are hand-tuned and
/// must not drift, since cached scores on candidate records are compared across runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropensityWeights {
    pub base_score: f64,
    pub age_18_22: f64,
    pub age_22_25: f64,
    pub education_graduate: f64,
    pub education_diploma: f64,
    pub education_iti: f64,
    pub education_12th: f64,
    pub education_10th: f64,
    pub channel_referral: f64,
    pub channel_community_event: f64,
    pub channel_whatsapp: f64,
    pub income_low: f64,
    pub income_middle_low: f64,
    pub has_skills: f64,
    pub profile_complete: f64,
    pub documents_uploaded: f64,
    pub notification_responsive: f64,
    /// Open rate strictly above this earns `notification_responsive`.
    pub notification_responsive_rate: f64,
}

impl Default for PropensityWeights {
    fn default() -> Self {
        Self {
            base_score: 50.0,
            age_18_22: 15.0,
            age_22_25: 10.0,
            education_graduate: 20.0,
            education_diploma: 18.0,
            education_iti: 16.0,
            education_12th: 15.0,
            education_10th: 10.0,
            channel_referral: 15.0,
            channel_community_event: 12.0,
            channel_whatsapp: 10.0,
            income_low: 10.0,
            income_middle_low: 7.0,
            has_skills: 10.0,
            profile_complete: 15.0,
            documents_uploaded: 20.0,
            notification_responsive: 10.0,
            notification_responsive_rate: 0.5,
        }
    }
}
