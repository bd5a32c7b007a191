use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{CandidateProfile, RiskResult, ScoreResult};

/// Identifier wrapper for registered candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Where a candidate sits in the onboarding pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    Discovered,
    Interested,
    DocumentsPending,
    DocumentsSubmitted,
    Verified,
    Enrolled,
    Dropped,
}

impl OnboardingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            OnboardingStatus::Discovered => "discovered",
            OnboardingStatus::Interested => "interested",
            OnboardingStatus::DocumentsPending => "documents_pending",
            OnboardingStatus::DocumentsSubmitted => "documents_submitted",
            OnboardingStatus::Verified => "verified",
            OnboardingStatus::Enrolled => "enrolled",
            OnboardingStatus::Dropped => "dropped",
        }
    }
}

/// Intake payload for a newly discovered candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCandidate {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub profile: CandidateProfile,
}

/// Stored candidate with the most recently computed scores.
///
/// The cached scores are a convenience for ranking; the scoring engine stays the source of
/// truth and any of them can be recomputed from `profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub name: String,
    pub location: String,
    pub status: OnboardingStatus,
    pub profile: CandidateProfile,
    pub scout: Option<ScoreResult>,
    pub dropout: Option<RiskResult>,
    pub scored_at: Option<DateTime<Utc>>,
}

impl CandidateRecord {
    /// Cached propensity score, `0` until the candidate has been scored.
    pub fn scout_score(&self) -> f64 {
        self.scout.as_ref().map(|result| result.score).unwrap_or(0.0)
    }

    pub fn is_enrolled(&self) -> bool {
        self.status == OnboardingStatus::Enrolled
    }
}

/// Fresh dropout assessment for one candidate next to the previously cached score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRiskReport {
    pub candidate_id: CandidateId,
    pub name: String,
    pub current_risk: Option<f64>,
    #[serde(flatten)]
    pub assessment: RiskResult,
}

/// Partial engagement update recorded by programme staff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementUpdate {
    pub attendance_rate: Option<f64>,
    pub assignment_completion: Option<f64>,
    pub sentiment_score: Option<f64>,
    pub total_sessions: Option<f64>,
}

impl EngagementUpdate {
    pub(crate) fn apply(&self, profile: &mut CandidateProfile) {
        if let Some(rate) = self.attendance_rate {
            profile.attendance_rate = rate;
        }
        if let Some(completion) = self.assignment_completion {
            profile.assignment_completion = completion;
        }
        if let Some(sentiment) = self.sentiment_score {
            profile.sentiment_score = sentiment;
        }
        if let Some(sessions) = self.total_sessions {
            profile.total_sessions = sessions;
        }
    }
}

/// Paging and filtering for the ranked candidate listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankQuery {
    pub min_score: f64,
    pub skip: usize,
    pub limit: usize,
}

impl Default for RankQuery {
    fn default() -> Self {
        Self {
            min_score: 0.0,
            skip: 0,
            limit: 50,
        }
    }
}
