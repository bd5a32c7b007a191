use crate::infra::InMemoryCandidateRepository;
use chrono::Local;
use clap::Args;
use scout_ai::candidates::{
    CandidateRecord, CandidateService, RankQuery, RosterImporter, SegmentSummary,
};
use scout_ai::config::AppConfig;
use scout_ai::error::AppError;
use scout_ai::scoring::{
    CandidateProfile, EngagementMetrics, ModelAvailability, RiskResult, ScoreResult,
    ScoringEngine,
};
use scout_ai::telemetry::{self, LogSink};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Candidate profile as a JSON object
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Model artifact to use instead of SCOUT_MODEL_PATH
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RosterArgs {
    /// Roster CSV export with one candidate per row
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Only list candidates scoring at least this much
    #[arg(long, default_value_t = 0.0)]
    pub(crate) min_score: f64,
    /// Model artifact to use instead of SCOUT_MODEL_PATH
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreReport {
    pub(crate) model: ModelAvailability,
    pub(crate) propensity: ScoreResult,
    pub(crate) dropout_risk: RiskResult,
}

/// Logs go to stderr so stdout stays machine-readable.
fn scoring_engine(model: Option<PathBuf>) -> Result<ScoringEngine, AppError> {
    let mut config = AppConfig::load()?;
    if model.is_some() {
        config.scoring.model_path = model;
    }
    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;
    Ok(ScoringEngine::new(&config.scoring))
}

pub(crate) fn score_profile(engine: &ScoringEngine, profile: &CandidateProfile) -> ScoreReport {
    ScoreReport {
        model: engine.warm_up().clone(),
        propensity: engine.get_propensity_score(profile),
        dropout_risk: engine.get_dropout_risk(&EngagementMetrics::from(profile)),
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let profile: CandidateProfile = serde_json::from_str(&raw)?;
    let engine = scoring_engine(args.model)?;

    let report = score_profile(&engine, &profile);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) fn run_roster(args: RosterArgs) -> Result<(), AppError> {
    let candidates = RosterImporter::from_path(&args.input)?;
    let engine = Arc::new(scoring_engine(args.model)?);
    let service = CandidateService::new(Arc::new(InMemoryCandidateRepository::default()), engine);

    for candidate in candidates {
        service.register(candidate)?;
    }

    let ranked = service.ranked(RankQuery {
        min_score: args.min_score,
        skip: 0,
        limit: usize::MAX,
    })?;
    let segments = service.segments()?;

    render_roster(&ranked, &segments, service.engine().availability());
    Ok(())
}

fn render_roster(
    ranked: &[CandidateRecord],
    segments: &SegmentSummary,
    model: &ModelAvailability,
) {
    println!("Candidate roster ranking");
    println!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M"));
    match model {
        ModelAvailability::Loaded { feature_count } => {
            println!("Scoring: trained model ({feature_count} features)")
        }
        ModelAvailability::Disabled => println!("Scoring: rule table"),
        ModelAvailability::Unavailable { reason } => {
            println!("Scoring: rule table (model unavailable: {reason})")
        }
    }

    if ranked.is_empty() {
        println!("\nRanked candidates: none");
    } else {
        println!("\nRanked candidates");
        for (position, record) in ranked.iter().enumerate() {
            let location = if record.location.is_empty() {
                "-"
            } else {
                record.location.as_str()
            };
            println!(
                "  {:>3}. {:<24} {:<16} {:>6.2}",
                position + 1,
                record.name,
                location,
                record.scout_score()
            );
        }
    }

    println!("\nSegments ({} candidates)", segments.total);
    for (label, bucket) in [
        ("High potential (>= 80)", segments.high_potential),
        ("Medium potential (50-80)", segments.medium_potential),
        ("Needs support (< 50)", segments.needs_support),
    ] {
        println!(
            "  - {:<26} {:>4} ({:.2}%)",
            label, bucket.count, bucket.percentage
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_ai::scoring::{RiskLevel, ScoringMethod};

    #[test]
    fn score_report_combines_propensity_and_risk() {
        let engine = ScoringEngine::rule_based();
        let profile = CandidateProfile {
            age: 20,
            attendance_rate: 0.4,
            assignment_completion: 0.4,
            sentiment_score: 0.2,
            total_sessions: 1.0,
            ..CandidateProfile::default()
        };

        let report = score_profile(&engine, &profile);

        assert_eq!(report.model, ModelAvailability::Disabled);
        assert_eq!(report.propensity.score, 65.0);
        assert_eq!(report.propensity.method, ScoringMethod::RuleBased);
        assert_eq!(report.dropout_risk.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn score_report_serializes_model_status() {
        let engine = ScoringEngine::rule_based();
        let report = score_profile(&engine, &CandidateProfile::default());

        let json = serde_json::to_value(&report).expect("serializes");
        assert_eq!(json["model"]["status"], "disabled");
        assert_eq!(json["propensity"]["method"], "rule_based");
    }
}
