use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::cohort::DEFAULT_AT_RISK_FLOOR;
use super::documents::{validate_document, DocumentUpload};
use super::domain::{CandidateId, EngagementUpdate, NewCandidate, OnboardingStatus, RankQuery};
use super::repository::{CandidateRepository, RepositoryError};
use super::service::{CandidateService, CandidateServiceError};
use crate::scoring::{CandidateProfile, EngagementMetrics};

/// Router builder exposing scoring, candidate, and cohort endpoints.
pub fn candidate_router<R>(service: Arc<CandidateService<R>>) -> Router
where
    R: CandidateRepository + 'static,
{
    Router::new()
        .route("/api/v1/scout/propensity", post(propensity_handler::<R>))
        .route("/api/v1/thrive/risk", post(risk_handler::<R>))
        .route(
            "/api/v1/scout/candidates",
            post(register_handler::<R>).get(ranked_handler::<R>),
        )
        .route(
            "/api/v1/scout/candidates/:candidate_id",
            get(candidate_handler::<R>),
        )
        .route(
            "/api/v1/scout/candidates/:candidate_id/rescore",
            post(rescore_handler::<R>),
        )
        .route(
            "/api/v1/scout/candidates/:candidate_id/status",
            put(status_handler::<R>),
        )
        .route(
            "/api/v1/thrive/candidates/:candidate_id/risk",
            get(risk_report_handler::<R>),
        )
        .route(
            "/api/v1/thrive/candidates/:candidate_id/engagement",
            put(engagement_handler::<R>),
        )
        .route("/api/v1/scout/segments", get(segments_handler::<R>))
        .route("/api/v1/scout/zones", get(zones_handler::<R>))
        .route(
            "/api/v1/thrive/risk-distribution",
            get(risk_distribution_handler::<R>),
        )
        .route("/api/v1/thrive/at-risk", get(at_risk_handler::<R>))
        .route("/api/v1/documents/validate", post(document_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusChange {
    pub(crate) status: OnboardingStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AtRiskQuery {
    #[serde(default = "default_min_risk")]
    pub(crate) min_risk: f64,
}

fn default_min_risk() -> f64 {
    DEFAULT_AT_RISK_FLOOR
}

fn error_response(error: CandidateServiceError) -> Response {
    let status = match &error {
        CandidateServiceError::MissingName => StatusCode::UNPROCESSABLE_ENTITY,
        CandidateServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        CandidateServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        CandidateServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}

fn respond<T: serde::Serialize>(
    status: StatusCode,
    result: Result<T, CandidateServiceError>,
) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn propensity_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Json(profile): Json<CandidateProfile>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let result = service.engine().get_propensity_score(&profile);
    (StatusCode::OK, Json(result)).into_response()
}

pub(crate) async fn risk_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Json(metrics): Json<EngagementMetrics>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let result = service.engine().get_dropout_risk(&metrics);
    (StatusCode::OK, Json(result)).into_response()
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Json(candidate): Json<NewCandidate>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    respond(StatusCode::CREATED, service.register(candidate))
}

pub(crate) async fn ranked_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Query(query): Query<RankQuery>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    respond(StatusCode::OK, service.ranked(query))
}

pub(crate) async fn candidate_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    respond(StatusCode::OK, service.get(&CandidateId(candidate_id)))
}

pub(crate) async fn rescore_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    respond(StatusCode::OK, service.rescore(&CandidateId(candidate_id)))
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Path(candidate_id): Path<String>,
    Json(change): Json<StatusChange>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.update_status(&CandidateId(candidate_id), change.status),
    )
}

pub(crate) async fn risk_report_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    respond(StatusCode::OK, service.assess_risk(&CandidateId(candidate_id)))
}

pub(crate) async fn engagement_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Path(candidate_id): Path<String>,
    Json(update): Json<EngagementUpdate>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.update_engagement(&CandidateId(candidate_id), &update),
    )
}

pub(crate) async fn segments_handler<R>(State(service): State<Arc<CandidateService<R>>>) -> Response
where
    R: CandidateRepository + 'static,
{
    respond(StatusCode::OK, service.segments())
}

pub(crate) async fn zones_handler<R>(State(service): State<Arc<CandidateService<R>>>) -> Response
where
    R: CandidateRepository + 'static,
{
    respond(StatusCode::OK, service.zones())
}

pub(crate) async fn risk_distribution_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    respond(StatusCode::OK, service.risk_distribution())
}

pub(crate) async fn at_risk_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Query(query): Query<AtRiskQuery>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    respond(StatusCode::OK, service.at_risk(query.min_risk))
}

pub(crate) async fn document_handler(Json(upload): Json<DocumentUpload>) -> Response {
    (StatusCode::OK, Json(validate_document(&upload))).into_response()
}
