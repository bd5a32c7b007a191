use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::candidates::domain::{CandidateId, CandidateRecord, NewCandidate, OnboardingStatus};
use crate::candidates::repository::{CandidateRepository, RepositoryError};
use crate::candidates::{candidate_router, CandidateService};
use crate::scoring::{CandidateProfile, Confidence, ScoreResult, ScoringEngine, ScoringMethod};

pub(super) fn build_service() -> (CandidateService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = CandidateService::new(repository.clone(), Arc::new(ScoringEngine::rule_based()));
    (service, repository)
}

pub(super) fn router_with_service(service: CandidateService<MemoryRepository>) -> axum::Router {
    candidate_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<CandidateId, CandidateRecord>>>,
}

impl MemoryRepository {
    pub(super) fn seed(&self, records: Vec<CandidateRecord>) {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        for record in records {
            guard.insert(record.id.clone(), record);
        }
    }

    pub(super) fn stored(&self, id: &str) -> CandidateRecord {
        let guard = self.records.lock().expect("repository mutex poisoned");
        guard
            .get(&CandidateId(id.to_string()))
            .cloned()
            .expect("record stored")
    }
}

impl CandidateRepository for MemoryRepository {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct ConflictRepository;

impl CandidateRepository for ConflictRepository {
    fn insert(&self, _record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: CandidateRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        Ok(None)
    }

    fn list(&self) -> Result<Vec<CandidateRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl CandidateRepository for UnavailableRepository {
    fn insert(&self, _record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: CandidateRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn new_candidate(name: &str, age: i32) -> NewCandidate {
    NewCandidate {
        name: name.to_string(),
        location: "Pune".to_string(),
        profile: CandidateProfile {
            age,
            ..CandidateProfile::default()
        },
    }
}

/// Risk 0: every engagement signal is healthy.
pub(super) fn engaged_profile() -> CandidateProfile {
    CandidateProfile {
        attendance_rate: 0.9,
        assignment_completion: 0.9,
        sentiment_score: 0.8,
        total_sessions: 10.0,
        total_notifications: 10.0,
        notifications_opened: 5.0,
        ..CandidateProfile::default()
    }
}

/// Risk 35: the three mild penalties fire.
pub(super) fn struggling_profile() -> CandidateProfile {
    CandidateProfile {
        attendance_rate: 0.6,
        assignment_completion: 0.6,
        sentiment_score: 0.4,
        ..engaged_profile()
    }
}

/// Risk 100: every severe penalty fires and the total is capped.
pub(super) fn disengaged_profile() -> CandidateProfile {
    CandidateProfile {
        attendance_rate: 0.4,
        assignment_completion: 0.4,
        sentiment_score: 0.2,
        total_sessions: 2.0,
        total_notifications: 10.0,
        notifications_opened: 1.0,
        ..CandidateProfile::default()
    }
}

pub(super) fn scored(score: f64) -> ScoreResult {
    ScoreResult {
        score,
        probability: score / 100.0,
        method: ScoringMethod::RuleBased,
        confidence: Confidence::Medium,
        factors: Vec::new(),
    }
}

pub(super) fn record(
    id: &str,
    location: &str,
    status: OnboardingStatus,
    score: f64,
    profile: CandidateProfile,
) -> CandidateRecord {
    CandidateRecord {
        id: CandidateId(id.to_string()),
        name: format!("Candidate {id}"),
        location: location.to_string(),
        status,
        profile,
        scout: Some(scored(score)),
        dropout: None,
        scored_at: None,
    }
}
