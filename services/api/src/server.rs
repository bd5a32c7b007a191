use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCandidateRepository};
use crate::routes::with_candidate_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use scout_ai::candidates::CandidateService;
use scout_ai::config::AppConfig;
use scout_ai::error::AppError;
use scout_ai::scoring::ScoringEngine;
use scout_ai::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = Arc::new(ScoringEngine::new(&config.scoring));
    let availability = engine.warm_up();
    info!(model = ?availability, "scoring engine initialised");

    let repository = Arc::new(InMemoryCandidateRepository::default());
    let candidate_service = Arc::new(CandidateService::new(repository, engine));

    let app = with_candidate_routes(candidate_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "scout scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
