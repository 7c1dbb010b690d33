use crate::cli::ServeArgs;
use crate::infra::{load_configured_library, AppState, EvaluationState, InMemoryCaseRepository};
use crate::routes::with_session_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use matchmaker::config::AppConfig;
use matchmaker::error::AppError;
use matchmaker::telemetry;
use matchmaker::workflows::session::ReviewSession;
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

    let library = Arc::new(load_configured_library(&config.evaluation)?);
    let evaluation_config = config.evaluation.evaluation_config();
    let evaluation_state = EvaluationState::new(library.clone(), evaluation_config);
    let repository = Arc::new(InMemoryCaseRepository::default());
    let session = Arc::new(ReviewSession::new(library, repository, evaluation_config));

    let app = with_session_routes(session)
        .layer(Extension(evaluation_state))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        mode = %evaluation_config.requirement_mode,
        "matchmaker service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
