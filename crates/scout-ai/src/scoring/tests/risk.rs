use super::common::*;
use crate::scoring::domain::{CandidateProfile, EngagementMetrics, RiskLevel};
use crate::scoring::calculate_dropout_risk;

#[test]
fn disengaged_candidate_is_critical_and_clamped() {
    let result = calculate_dropout_risk(&metrics(0.4, 0.4, 0.2, 1.0, 0.1));

    assert_eq!(result.risk_score, 100.0);
    assert_eq!(result.risk_level, RiskLevel::Critical);
    assert_eq!(
        result.recommended_intervention,
        "Immediate staff call + family engagement"
    );
    assert_eq!(
        result.risk_factors,
        vec![
            "Low attendance (<50%)",
            "Low assignment completion",
            "Negative sentiment detected",
            "Low session count",
            "Not responding to notifications",
        ]
    );
}

#[test]
fn slightly_low_attendance_is_low_risk() {
    let result = calculate_dropout_risk(&metrics(0.6, 0.8, 0.6, 5.0, 0.5));

    assert_eq!(result.risk_score, 15.0);
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert_eq!(result.risk_factors, vec!["Below average attendance"]);
    assert_eq!(result.recommended_intervention, "Continue regular engagement");
}

#[test]
fn mild_tiers_accumulate_into_medium() {
    let result = calculate_dropout_risk(&metrics(0.65, 0.6, 0.4, 3.0, 0.2));

    assert_eq!(result.risk_score, 35.0);
    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert_eq!(
        result.risk_factors,
        vec![
            "Below average attendance",
            "Below average completion",
            "Low engagement sentiment",
        ]
    );
    assert_eq!(result.recommended_intervention, "Automated motivational nudge");
}

#[test]
fn level_boundaries_are_inclusive() {
    assert_eq!(RiskLevel::from_score(70.0), RiskLevel::Critical);
    assert_eq!(RiskLevel::from_score(69.99), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(50.0), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(30.0), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(29.99), RiskLevel::Low);

    // 30 + 25 = 55
    let high = calculate_dropout_risk(&metrics(0.1, 0.1, 0.9, 10.0, 0.9));
    assert_eq!(high.risk_level, RiskLevel::High);
    assert_eq!(
        high.recommended_intervention,
        "Mentor check-in + peer buddy activation"
    );
}

#[test]
fn defaults_treat_missing_sentiment_as_neutral() {
    let defaults = EngagementMetrics::default();
    assert_eq!(defaults.sentiment_score, 0.5);

    let result = calculate_dropout_risk(&defaults);

    // attendance 30 + completion 25 + sessions 15 + notifications 10
    assert_eq!(result.risk_score, 80.0);
    assert!(!result
        .risk_factors
        .iter()
        .any(|factor| factor.contains("sentiment")));
}

#[test]
fn metrics_derive_open_rate_from_profile() {
    let profile = CandidateProfile {
        attendance_rate: 0.9,
        assignment_completion: 0.9,
        sentiment_score: 0.8,
        total_sessions: 12.0,
        total_notifications: 10.0,
        notifications_opened: 1.0,
        ..CandidateProfile::default()
    };

    let metrics = EngagementMetrics::from(&profile);
    assert_eq!(metrics.notification_open_rate, 0.1);

    let result = calculate_dropout_risk(&metrics);
    assert_eq!(result.risk_score, 10.0);
    assert_eq!(result.risk_factors, vec!["Not responding to notifications"]);
}

#[test]
fn profile_without_sentiment_reading_matches_metric_defaults() {
    let profile: CandidateProfile =
        serde_json::from_str(r#"{"age": 20}"#).expect("profile parses");
    let metrics: EngagementMetrics = serde_json::from_str("{}").expect("metrics parse");

    assert_eq!(profile.sentiment_score, 0.5);
    assert_eq!(CandidateProfile::default().sentiment_score, 0.5);
    assert_eq!(
        calculate_dropout_risk(&EngagementMetrics::from(&profile)),
        calculate_dropout_risk(&metrics)
    );
}
