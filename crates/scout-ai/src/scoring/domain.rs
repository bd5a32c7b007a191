use serde::{Deserialize, Serialize};

/// Sentiment assumed until a reading arrives.
pub const NEUTRAL_SENTIMENT: f64 = 0.5;

/// Candidate attributes supplied by the case-management layer.
///
/// Every field defaults when absent so partially populated records still score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    pub age: i32,
    pub education_level: String,
    pub source_channel: String,
    pub income_bracket: String,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub profile_completed: bool,
    pub documents_uploaded: bool,
    pub total_sessions: f64,
    pub avg_session_duration: f64,
    pub total_notifications: f64,
    pub notifications_opened: f64,
    pub attendance_rate: f64,
    pub assignment_completion: f64,
    pub sentiment_score: f64,
}

impl Default for CandidateProfile {
    /// Sentiment starts neutral, matching [`EngagementMetrics::default`].
    fn default() -> Self {
        Self {
            age: 0,
            education_level: String::new(),
            source_channel: String::new(),
            income_bracket: String::new(),
            skills: Vec::new(),
            interests: Vec::new(),
            profile_completed: false,
            documents_uploaded: false,
            total_sessions: 0.0,
            avg_session_duration: 0.0,
            total_notifications: 0.0,
            notifications_opened: 0.0,
            attendance_rate: 0.0,
            assignment_completion: 0.0,
            sentiment_score: NEUTRAL_SENTIMENT,
        }
    }
}

impl CandidateProfile {
    /// Share of delivered notifications the candidate opened, `0` when none were sent.
    pub fn notification_open_rate(&self) -> f64 {
        if self.total_notifications > 0.0 {
            self.notifications_opened / self.total_notifications
        } else {
            0.0
        }
    }
}

/// Programme engagement signals consumed by the dropout-risk scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementMetrics {
    pub attendance_rate: f64,
    pub assignment_completion: f64,
    pub sentiment_score: f64,
    pub total_sessions: f64,
    pub notification_open_rate: f64,
}

impl Default for EngagementMetrics {
    /// Sentiment is neutral (0.5) until a reading arrives; everything else starts at zero.
    fn default() -> Self {
        Self {
            attendance_rate: 0.0,
            assignment_completion: 0.0,
            sentiment_score: NEUTRAL_SENTIMENT,
            total_sessions: 0.0,
            notification_open_rate: 0.0,
        }
    }
}

impl From<&CandidateProfile> for EngagementMetrics {
    fn from(profile: &CandidateProfile) -> Self {
        Self {
            attendance_rate: profile.attendance_rate,
            assignment_completion: profile.assignment_completion,
            sentiment_score: profile.sentiment_score,
            total_sessions: profile.total_sessions,
            notification_open_rate: profile.notification_open_rate(),
        }
    }
}

/// Which scoring path produced a [`ScoreResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    RuleBased,
    MlModel,
}

impl ScoringMethod {
    pub const fn label(self) -> &'static str {
        match self {
            ScoringMethod::RuleBased => "rule_based",
            ScoringMethod::MlModel => "ml_model",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Extremes of the scale are treated as confident, the middle band is not.
    pub(crate) fn from_extremes(value: f64, low_edge: f64, high_edge: f64) -> Self {
        if value > high_edge || value < low_edge {
            Confidence::High
        } else {
            Confidence::Medium
        }
    }
}

/// A rule or model signal that contributed to a propensity score, kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub label: String,
    pub impact: String,
}

impl ScoreFactor {
    pub fn new(label: impl Into<String>, impact: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            impact: impact.into(),
        }
    }
}

/// Onboarding propensity estimate for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub probability: f64,
    pub method: ScoringMethod,
    pub confidence: Confidence,
    pub factors: Vec<ScoreFactor>,
}

/// Severity band for a dropout-risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const CRITICAL_FLOOR: f64 = 70.0;
    pub const HIGH_FLOOR: f64 = 50.0;
    pub const MEDIUM_FLOOR: f64 = 30.0;

    /// Lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        if score >= Self::CRITICAL_FLOOR {
            RiskLevel::Critical
        } else if score >= Self::HIGH_FLOOR {
            RiskLevel::High
        } else if score >= Self::MEDIUM_FLOOR {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    pub const fn intervention(self) -> &'static str {
        match self {
            RiskLevel::Critical => "Immediate staff call + family engagement",
            RiskLevel::High => "Mentor check-in + peer buddy activation",
            RiskLevel::Medium => "Automated motivational nudge",
            RiskLevel::Low => "Continue regular engagement",
        }
    }
}

/// Dropout-risk assessment with the contributing signals and the suggested action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<String>,
    pub recommended_intervention: String,
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
