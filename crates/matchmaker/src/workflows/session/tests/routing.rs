use super::common::*;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::session::router::submit_handler;
use crate::workflows::session::ReviewSession;

fn json_request(method: &str, uri: &str, body: &Value) -> Request<axum::body::Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("serialize body"),
        ))
        .expect("request")
}

fn empty_request(method: &str, uri: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .expect("request")
}

#[tokio::test]
async fn submit_handler_returns_conflict_on_duplicate() {
    let session: Arc<ReviewSession<ConflictRepository>> =
        Arc::new(session_with(Arc::new(ConflictRepository)));

    let response = submit_handler::<ConflictRepository>(State(session), axum::Json(matching_case()))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_repository_failure() {
    let session = Arc::new(session_with(Arc::new(UnavailableRepository)));

    let response =
        submit_handler::<UnavailableRepository>(State(session), axum::Json(matching_case()))
            .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn submit_route_rejects_unknown_traits() {
    let (session, _) = build_session();
    let router = session_router_with(session);

    let body = serde_json::to_value(unknown_trait_case()).expect("serialize");
    let response = router
        .oneshot(json_request("POST", "/api/v1/cases", &body))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("Telepathic"));
}

#[tokio::test]
async fn submit_route_accepts_cases() {
    let (session, _) = build_session();
    let router = session_router_with(session);

    let body = serde_json::to_value(matching_case()).expect("serialize");
    let response = router
        .oneshot(json_request("POST", "/api/v1/cases", &body))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["candidate"], "Jordan");
    assert_eq!(payload["status"], "pending");
    assert_eq!(payload["verdict"], "pending evaluation");
    assert!(payload.get("score").is_none());
}

#[tokio::test]
async fn status_route_returns_not_found_for_unknown_case() {
    let (session, _) = build_session();
    let router = session_router_with(session);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/cases/case-missing"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn evaluation_route_returns_result_and_summary() {
    let (session, _) = build_session();
    let record = session.submit(mismatched_case()).expect("submit");
    let router = session_router_with(session);

    let response = router
        .oneshot(empty_request(
            "POST",
            &format!("/api/v1/cases/{}/evaluation", record.case_id),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["case_id"], record.case_id.0.as_str());
    assert_eq!(payload["result"]["is_match"], false);
    assert_eq!(payload["result"]["failure"]["kind"], "gender_mismatch");
    assert!(payload["summary"]
        .as_str()
        .expect("summary")
        .starts_with("Gender mismatch"));
}

#[tokio::test]
async fn decision_route_records_outcome_then_rejects_repeat() {
    let (session, _) = build_session();
    let record = session.submit(matching_case()).expect("submit");
    let router = session_router_with(session);
    let uri = format!("/api/v1/cases/{}/decision", record.case_id);

    let response = router
        .clone()
        .oneshot(json_request("POST", &uri, &json!({ "decision": "accept" })))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["outcome"], "true_positive");
    assert_eq!(payload["correct"], true);

    let repeat = router
        .oneshot(json_request("POST", &uri, &json!({ "decision": "reject" })))
        .await
        .expect("route responds");

    assert_eq!(repeat.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn session_route_reports_stats() {
    let (session, _) = build_session();
    let record = session.submit(mismatched_case()).expect("submit");
    session
        .decide(
            &record.case_id,
            crate::workflows::session::Decision::Accept,
        )
        .expect("decide");
    let router = session_router_with(session);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/session"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["mode"], "explicit_threshold");
    assert_eq!(payload["total"], 1);
    assert_eq!(payload["stats"]["false_positives"], 1);
    assert_eq!(payload["accuracy"], 0.0);
}
