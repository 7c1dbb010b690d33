use crate::infra::{AppState, EvaluationState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use matchmaker::error::AppError;
use matchmaker::workflows::evaluation::{evaluate, EvaluationResult, RequirementMode};
use matchmaker::workflows::library::CaseDocument;
use matchmaker::workflows::session::{session_router, CaseRepository, ReviewSession};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluationRequest {
    #[serde(flatten)]
    pub(crate) case: CaseDocument,
    /// Overrides the server's configured requirement mode for this call only.
    #[serde(default)]
    pub(crate) mode: Option<RequirementMode>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluationResponse {
    pub(crate) candidate: String,
    pub(crate) mode: RequirementMode,
    pub(crate) summary: String,
    pub(crate) result: EvaluationResult,
}

pub(crate) fn with_session_routes<R>(service: Arc<ReviewSession<R>>) -> axum::Router
where
    R: CaseRepository + 'static,
{
    session_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/evaluations",
            axum::routing::post(evaluation_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn evaluation_endpoint(
    Extension(state): Extension<EvaluationState>,
    Json(payload): Json<EvaluationRequest>,
) -> Result<Json<EvaluationResponse>, AppError> {
    let EvaluationRequest { case, mode } = payload;
    let mode = mode.unwrap_or_else(|| state.evaluator.mode());

    let bound = state.library.bind_case(&case)?;
    let result = evaluate(&bound.profile, &bound.criteria, mode)?;
    info!(
        candidate = %bound.profile.display_name,
        %mode,
        is_match = result.is_match,
        score = result.score,
        "evaluation served"
    );

    Ok(Json(EvaluationResponse {
        candidate: bound.profile.display_name,
        mode,
        summary: result.failure_summary(),
        result,
    }))
}
