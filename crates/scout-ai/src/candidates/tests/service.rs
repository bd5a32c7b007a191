use std::sync::Arc;

use super::common::*;
use crate::candidates::domain::{CandidateId, EngagementUpdate, OnboardingStatus, RankQuery};
use crate::candidates::repository::RepositoryError;
use crate::candidates::{CandidateService, CandidateServiceError};
use crate::scoring::{RiskLevel, ScoringEngine, ScoringMethod};

#[test]
fn register_scores_and_stores_discovered_candidate() {
    let (service, repository) = build_service();

    let record = service
        .register(new_candidate("  Asha Patil ", 20))
        .expect("registration succeeds");

    assert!(record.id.0.starts_with("cand-"));
    assert_eq!(record.name, "Asha Patil");
    assert_eq!(record.status, OnboardingStatus::Discovered);
    assert_eq!(record.scout_score(), 65.0);
    assert!(record.scored_at.is_some());
    assert!(record.dropout.is_none());
    assert_eq!(repository.stored(&record.id.0), record);
}

#[test]
fn register_issues_distinct_ids() {
    let (service, _) = build_service();

    let first = service.register(new_candidate("Ravi", 21)).expect("first");
    let second = service.register(new_candidate("Meena", 22)).expect("second");

    assert_ne!(first.id, second.id);
}

#[test]
fn register_rejects_blank_name() {
    let (service, repository) = build_service();

    let error = service
        .register(new_candidate("   ", 20))
        .expect_err("blank name rejected");

    assert!(matches!(error, CandidateServiceError::MissingName));
    assert!(repository.records.lock().expect("mutex").is_empty());
}

#[test]
fn register_surfaces_repository_conflict() {
    let service = CandidateService::new(
        Arc::new(ConflictRepository),
        Arc::new(ScoringEngine::rule_based()),
    );

    let error = service
        .register(new_candidate("Ravi", 21))
        .expect_err("conflict surfaces");

    assert!(matches!(
        error,
        CandidateServiceError::Repository(RepositoryError::Conflict)
    ));
}

#[test]
fn get_reports_missing_candidate() {
    let (service, _) = build_service();

    let error = service
        .get(&CandidateId("cand-missing".to_string()))
        .expect_err("missing candidate");

    assert!(matches!(
        error,
        CandidateServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn rescore_replaces_stale_cached_score() {
    let (service, repository) = build_service();
    let mut profile = engaged_profile();
    profile.age = 24;
    repository.seed(vec![record(
        "cand-stale",
        "Nagpur",
        OnboardingStatus::Interested,
        12.0,
        profile,
    )]);

    let result = service
        .rescore(&CandidateId("cand-stale".to_string()))
        .expect("rescore succeeds");

    assert_eq!(result.score, 60.0);
    assert_eq!(result.method, ScoringMethod::RuleBased);
    let stored = repository.stored("cand-stale");
    assert_eq!(stored.scout_score(), 60.0);
    assert!(stored.scored_at.is_some());
}

#[test]
fn assess_risk_caches_result_on_record() {
    let (service, repository) = build_service();
    repository.seed(vec![record(
        "cand-risk",
        "Nagpur",
        OnboardingStatus::Enrolled,
        70.0,
        disengaged_profile(),
    )]);

    let report = service
        .assess_risk(&CandidateId("cand-risk".to_string()))
        .expect("risk assessed");

    assert_eq!(report.candidate_id.0, "cand-risk");
    assert_eq!(report.current_risk, None);
    assert_eq!(report.assessment.risk_score, 100.0);
    assert_eq!(report.assessment.risk_level, RiskLevel::Critical);
    assert_eq!(
        repository.stored("cand-risk").dropout,
        Some(report.assessment.clone())
    );

    let repeat = service
        .assess_risk(&CandidateId("cand-risk".to_string()))
        .expect("risk reassessed");
    assert_eq!(repeat.current_risk, Some(100.0));
}

#[test]
fn registered_candidate_without_sentiment_reading_is_not_flagged_negative() {
    let (service, _) = build_service();
    let record = service
        .register(new_candidate("Kiran", 20))
        .expect("registered");
    service
        .update_status(&record.id, OnboardingStatus::Enrolled)
        .expect("enrolled");

    let report = service.assess_risk(&record.id).expect("risk assessed");
    // attendance 30 + completion 25 + sessions 15 + notifications 10
    assert_eq!(report.assessment.risk_score, 80.0);
    assert!(!report
        .assessment
        .risk_factors
        .iter()
        .any(|factor| factor == "Negative sentiment detected"));

    let alerts = service.at_risk(30.0).expect("alerts");
    let alert = alerts
        .iter()
        .find(|alert| alert.candidate_id == record.id)
        .expect("candidate alerted");
    assert!(!alert
        .risk_factors
        .iter()
        .any(|factor| factor.contains("sentiment")));
}

#[test]
fn engagement_update_applies_only_supplied_fields() {
    let (service, repository) = build_service();
    repository.seed(vec![record(
        "cand-engaged",
        "Pune",
        OnboardingStatus::Enrolled,
        70.0,
        engaged_profile(),
    )]);

    let risk = service
        .update_engagement(
            &CandidateId("cand-engaged".to_string()),
            &EngagementUpdate {
                attendance_rate: Some(0.6),
                assignment_completion: Some(0.6),
                sentiment_score: Some(0.4),
                total_sessions: None,
            },
        )
        .expect("update succeeds");

    assert_eq!(risk.risk_score, 35.0);
    assert_eq!(risk.risk_level, RiskLevel::Medium);
    assert_eq!(
        risk.risk_factors,
        vec![
            "Below average attendance",
            "Below average completion",
            "Low engagement sentiment",
        ]
    );

    let stored = repository.stored("cand-engaged");
    assert_eq!(stored.profile.attendance_rate, 0.6);
    assert_eq!(stored.profile.total_sessions, 10.0);
    assert_eq!(stored.dropout, Some(risk));
}

#[test]
fn status_update_is_persisted() {
    let (service, repository) = build_service();
    let record = service.register(new_candidate("Sunita", 19)).expect("registered");

    let updated = service
        .update_status(&record.id, OnboardingStatus::Enrolled)
        .expect("status updated");

    assert!(updated.is_enrolled());
    assert_eq!(repository.stored(&record.id.0).status, OnboardingStatus::Enrolled);
}

#[test]
fn ranked_filters_sorts_and_pages() {
    let (service, repository) = build_service();
    repository.seed(vec![
        record("cand-a", "Pune", OnboardingStatus::Discovered, 55.0, engaged_profile()),
        record("cand-b", "Pune", OnboardingStatus::Discovered, 90.0, engaged_profile()),
        record("cand-c", "Pune", OnboardingStatus::Discovered, 40.0, engaged_profile()),
        record("cand-d", "Pune", OnboardingStatus::Discovered, 90.0, engaged_profile()),
    ]);

    let ranked = service
        .ranked(RankQuery {
            min_score: 50.0,
            ..RankQuery::default()
        })
        .expect("ranked");
    let ids: Vec<&str> = ranked.iter().map(|record| record.id.0.as_str()).collect();
    assert_eq!(ids, vec!["cand-b", "cand-d", "cand-a"]);

    let page = service
        .ranked(RankQuery {
            min_score: 0.0,
            skip: 1,
            limit: 2,
        })
        .expect("paged");
    let ids: Vec<&str> = page.iter().map(|record| record.id.0.as_str()).collect();
    assert_eq!(ids, vec!["cand-d", "cand-a"]);
}

#[test]
fn at_risk_only_reports_enrolled_candidates() {
    let (service, repository) = build_service();
    repository.seed(vec![
        record("cand-enrolled", "Pune", OnboardingStatus::Enrolled, 60.0, disengaged_profile()),
        record("cand-verified", "Pune", OnboardingStatus::Verified, 60.0, disengaged_profile()),
    ]);

    let alerts = service.at_risk(30.0).expect("alerts");

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].candidate_id.0, "cand-enrolled");
}

#[test]
fn cohort_views_surface_repository_outage() {
    let service = CandidateService::new(
        Arc::new(UnavailableRepository),
        Arc::new(ScoringEngine::rule_based()),
    );

    assert!(matches!(
        service.segments(),
        Err(CandidateServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
    assert!(service.zones().is_err());
    assert!(service.risk_distribution().is_err());
}
