use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{CaseId, Decision, DecisionOutcome};
use super::repository::{CaseRepository, RepositoryError};
use super::service::{ReviewSession, SessionError};
use crate::workflows::evaluation::EvaluationResult;
use crate::workflows::library::CaseDocument;

/// Router builder exposing HTTP endpoints for the review queue.
pub fn session_router<R>(service: Arc<ReviewSession<R>>) -> Router
where
    R: CaseRepository + 'static,
{
    Router::new()
        .route("/api/v1/cases", post(submit_handler::<R>))
        .route("/api/v1/cases/:case_id", get(status_handler::<R>))
        .route(
            "/api/v1/cases/:case_id/evaluation",
            post(evaluate_handler::<R>),
        )
        .route("/api/v1/cases/:case_id/decision", post(decision_handler::<R>))
        .route("/api/v1/session", get(stats_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct DecisionRequest {
    pub(crate) decision: Decision,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DecisionResponse {
    pub(crate) case_id: CaseId,
    pub(crate) decision: Decision,
    pub(crate) outcome: DecisionOutcome,
    pub(crate) correct: bool,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct EvaluationResponse {
    pub(crate) case_id: CaseId,
    pub(crate) summary: String,
    pub(crate) result: EvaluationResult,
}

fn error_response(error: SessionError) -> Response {
    let status = match &error {
        SessionError::Library(_) | SessionError::Evaluation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        SessionError::Repository(RepositoryError::Conflict) | SessionError::AlreadyDecided(_) => {
            StatusCode::CONFLICT
        }
        SessionError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ReviewSession<R>>>,
    axum::Json(document): axum::Json<CaseDocument>,
) -> Response
where
    R: CaseRepository + 'static,
{
    match service.submit(document) {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<ReviewSession<R>>>,
    Path(case_id): Path<String>,
) -> Response
where
    R: CaseRepository + 'static,
{
    match service.get(&CaseId(case_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<ReviewSession<R>>>,
    Path(case_id): Path<String>,
) -> Response
where
    R: CaseRepository + 'static,
{
    let case_id = CaseId(case_id);
    match service.evaluate(&case_id) {
        Ok(result) => {
            let body = EvaluationResponse {
                case_id,
                summary: result.failure_summary(),
                result,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn decision_handler<R>(
    State(service): State<Arc<ReviewSession<R>>>,
    Path(case_id): Path<String>,
    axum::Json(request): axum::Json<DecisionRequest>,
) -> Response
where
    R: CaseRepository + 'static,
{
    let case_id = CaseId(case_id);
    match service.decide(&case_id, request.decision) {
        Ok(outcome) => {
            let body = DecisionResponse {
                case_id,
                decision: request.decision,
                outcome,
                correct: outcome.is_correct(),
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn stats_handler<R>(State(service): State<Arc<ReviewSession<R>>>) -> Response
where
    R: CaseRepository + 'static,
{
    let stats = service.stats();
    let payload = json!({
        "mode": service.mode(),
        "stats": stats,
        "total": stats.total(),
        "accuracy": stats.accuracy(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
