use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, CandidateRecord};
use crate::scoring::{calculate_dropout_risk, EngagementMetrics, RiskLevel, RiskResult};

const HIGH_POTENTIAL_FLOOR: f64 = 80.0;
const MEDIUM_POTENTIAL_FLOOR: f64 = 50.0;
pub const DEFAULT_AT_RISK_FLOOR: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentBucket {
    pub count: usize,
    pub percentage: f64,
}

/// Candidates bucketed by cached propensity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummary {
    pub total: usize,
    pub high_potential: SegmentBucket,
    pub medium_potential: SegmentBucket,
    pub needs_support: SegmentBucket,
}

/// One value per risk level, serialized with the level names as keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ByRiskLevel<T> {
    pub critical: T,
    pub high: T,
    pub medium: T,
    pub low: T,
}

impl<T> ByRiskLevel<T> {
    fn slot(&mut self, level: RiskLevel) -> &mut T {
        match level {
            RiskLevel::Critical => &mut self.critical,
            RiskLevel::High => &mut self.high,
            RiskLevel::Medium => &mut self.medium,
            RiskLevel::Low => &mut self.low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub total_enrolled: usize,
    pub distribution: ByRiskLevel<usize>,
    pub percentages: ByRiskLevel<f64>,
}

/// Enrolled candidate whose dropout risk crossed the alert floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropoutAlert {
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    pub risk_factors: Vec<String>,
    pub recommended_intervention: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub location: String,
    pub candidate_count: usize,
    pub avg_scout_score: f64,
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Risk is recomputed from the stored profile so stale cached values never leak into alerts.
fn current_risk(record: &CandidateRecord) -> RiskResult {
    calculate_dropout_risk(&EngagementMetrics::from(&record.profile))
}

pub fn segment_summary(records: &[CandidateRecord]) -> SegmentSummary {
    let total = records.len();
    let (mut high, mut medium, mut low) = (0, 0, 0);
    for record in records {
        let score = record.scout_score();
        if score >= HIGH_POTENTIAL_FLOOR {
            high += 1;
        } else if score >= MEDIUM_POTENTIAL_FLOOR {
            medium += 1;
        } else {
            low += 1;
        }
    }

    let bucket = |count| SegmentBucket {
        count,
        percentage: percentage(count, total),
    };

    SegmentSummary {
        total,
        high_potential: bucket(high),
        medium_potential: bucket(medium),
        needs_support: bucket(low),
    }
}

pub fn risk_distribution(records: &[CandidateRecord]) -> RiskDistribution {
    let mut distribution = ByRiskLevel::<usize>::default();
    let mut total_enrolled = 0;
    for record in records.iter().filter(|record| record.is_enrolled()) {
        total_enrolled += 1;
        *distribution.slot(current_risk(record).risk_level) += 1;
    }

    let percentages = ByRiskLevel {
        critical: percentage(distribution.critical, total_enrolled),
        high: percentage(distribution.high, total_enrolled),
        medium: percentage(distribution.medium, total_enrolled),
        low: percentage(distribution.low, total_enrolled),
    };

    RiskDistribution {
        total_enrolled,
        distribution,
        percentages,
    }
}

/// Alerts for enrolled candidates at or above `min_risk`, highest risk first.
pub fn at_risk_alerts(records: &[CandidateRecord], min_risk: f64) -> Vec<DropoutAlert> {
    let mut alerts: Vec<DropoutAlert> = records
        .iter()
        .filter(|record| record.is_enrolled())
        .filter_map(|record| {
            let risk = current_risk(record);
            (risk.risk_score >= min_risk).then(|| DropoutAlert {
                candidate_id: record.id.clone(),
                candidate_name: record.name.clone(),
                risk_level: risk.risk_level,
                risk_score: risk.risk_score,
                risk_factors: risk.risk_factors,
                recommended_intervention: risk.recommended_intervention,
            })
        })
        .collect();

    alerts.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    alerts
}

/// Candidate counts and average cached score per location, ordered by location.
pub fn zone_summary(records: &[CandidateRecord]) -> Vec<ZoneSummary> {
    let mut zones: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for record in records {
        let entry = zones.entry(record.location.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += record.scout_score();
    }

    zones
        .into_iter()
        .map(|(location, (count, total))| ZoneSummary {
            location: location.to_string(),
            candidate_count: count,
            avg_scout_score: round2(total / count as f64),
        })
        .collect()
}
