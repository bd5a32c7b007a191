use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::cohort::{self, DropoutAlert, RiskDistribution, SegmentSummary, ZoneSummary};
use super::domain::{
    CandidateId, CandidateRecord, CandidateRiskReport, EngagementUpdate, NewCandidate,
    OnboardingStatus, RankQuery,
};
use super::repository::{CandidateRepository, RepositoryError};
use crate::scoring::{EngagementMetrics, RiskResult, ScoreResult, ScoringEngine};

/// Service composing the candidate repository with the scoring engine.
pub struct CandidateService<R> {
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
}

static CANDIDATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_candidate_id() -> CandidateId {
    let id = CANDIDATE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CandidateId(format!("cand-{id:06}"))
}

impl<R> CandidateService<R>
where
    R: CandidateRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: Arc<ScoringEngine>) -> Self {
        Self { repository, engine }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Register a discovered candidate with a fresh propensity score.
    pub fn register(
        &self,
        candidate: NewCandidate,
    ) -> Result<CandidateRecord, CandidateServiceError> {
        let name = candidate.name.trim().to_string();
        if name.is_empty() {
            return Err(CandidateServiceError::MissingName);
        }

        let scout = self.engine.get_propensity_score(&candidate.profile);
        let record = CandidateRecord {
            id: next_candidate_id(),
            name,
            location: candidate.location.trim().to_string(),
            status: OnboardingStatus::Discovered,
            profile: candidate.profile,
            scout: Some(scout),
            dropout: None,
            scored_at: Some(Utc::now()),
        };

        let stored = self.repository.insert(record)?;
        info!(
            candidate_id = %stored.id.0,
            score = stored.scout_score(),
            "registered candidate"
        );
        Ok(stored)
    }

    pub fn get(&self, id: &CandidateId) -> Result<CandidateRecord, CandidateServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Recompute and cache the propensity score.
    pub fn rescore(&self, id: &CandidateId) -> Result<ScoreResult, CandidateServiceError> {
        let mut record = self.get(id)?;
        let result = self.engine.get_propensity_score(&record.profile);
        debug!(candidate_id = %id.0, score = result.score, method = result.method.label(), "rescored candidate");

        record.scout = Some(result.clone());
        record.scored_at = Some(Utc::now());
        self.repository.update(record)?;
        Ok(result)
    }

    /// Recompute and cache dropout risk from the stored engagement metrics.
    pub fn assess_risk(
        &self,
        id: &CandidateId,
    ) -> Result<CandidateRiskReport, CandidateServiceError> {
        let record = self.get(id)?;
        let current_risk = record.dropout.as_ref().map(|risk| risk.risk_score);
        let candidate_id = record.id.clone();
        let name = record.name.clone();

        let assessment = self.store_risk(record)?;
        Ok(CandidateRiskReport {
            candidate_id,
            name,
            current_risk,
            assessment,
        })
    }

    /// Record new engagement readings, then recompute dropout risk.
    pub fn update_engagement(
        &self,
        id: &CandidateId,
        update: &EngagementUpdate,
    ) -> Result<RiskResult, CandidateServiceError> {
        let mut record = self.get(id)?;
        update.apply(&mut record.profile);
        self.store_risk(record)
    }

    pub fn update_status(
        &self,
        id: &CandidateId,
        status: OnboardingStatus,
    ) -> Result<CandidateRecord, CandidateServiceError> {
        let mut record = self.get(id)?;
        record.status = status;
        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Candidates at or above `min_score`, best first.
    pub fn ranked(&self, query: RankQuery) -> Result<Vec<CandidateRecord>, CandidateServiceError> {
        let mut records: Vec<CandidateRecord> = self
            .repository
            .list()?
            .into_iter()
            .filter(|record| record.scout_score() >= query.min_score)
            .collect();

        records.sort_by(|a, b| {
            b.scout_score()
                .total_cmp(&a.scout_score())
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(records
            .into_iter()
            .skip(query.skip)
            .take(query.limit)
            .collect())
    }

    pub fn segments(&self) -> Result<SegmentSummary, CandidateServiceError> {
        Ok(cohort::segment_summary(&self.repository.list()?))
    }

    pub fn zones(&self) -> Result<Vec<ZoneSummary>, CandidateServiceError> {
        Ok(cohort::zone_summary(&self.repository.list()?))
    }

    pub fn risk_distribution(&self) -> Result<RiskDistribution, CandidateServiceError> {
        Ok(cohort::risk_distribution(&self.repository.list()?))
    }

    pub fn at_risk(&self, min_risk: f64) -> Result<Vec<DropoutAlert>, CandidateServiceError> {
        Ok(cohort::at_risk_alerts(&self.repository.list()?, min_risk))
    }

    fn store_risk(&self, mut record: CandidateRecord) -> Result<RiskResult, CandidateServiceError> {
        let risk = self
            .engine
            .get_dropout_risk(&EngagementMetrics::from(&record.profile));
        debug!(
            candidate_id = %record.id.0,
            risk = risk.risk_score,
            level = risk.risk_level.label(),
            "assessed dropout risk"
        );

        record.dropout = Some(risk.clone());
        self.repository.update(record)?;
        Ok(risk)
    }
}

/// Error raised by the candidate service.
#[derive(Debug, thiserror::Error)]
pub enum CandidateServiceError {
    #[error("candidate name is required")]
    MissingName,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
