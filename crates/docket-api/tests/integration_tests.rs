//! # Integration Tests for docket-api
//!
//! Exercises the full router against the built-in register on a fixed day
//! (2024-06-01): probes, record CRUD with derived statuses, the unified
//! view, reports, and the session/notification flow.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use tower::ServiceExt;

use docket_api::AppState;
use docket_core::{CalendarDate, FixedClock};
use docket_notify::{InMemoryMarkers, Outbox};
use docket_store::{Fixtures, Registry};

/// Helper: state over the seed register with an in-memory outbox.
fn test_state() -> (AppState, Arc<Outbox>) {
    let clock = Arc::new(FixedClock(CalendarDate::parse("2024-06-01").unwrap()));
    let registry = Registry::in_memory(Fixtures::seed().unwrap(), clock).unwrap();
    let outbox = Arc::new(Outbox::new());
    let state = AppState::new(
        registry,
        Arc::new(InMemoryMarkers::new()),
        outbox.clone(),
        "admin@example.com",
    );
    (state, outbox)
}

/// Helper: build the test app.
fn test_app() -> axum::Router {
    docket_api::app(test_state().0)
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Unified View -------------------------------------------------------------

#[tokio::test]
async fn test_unified_view_lists_every_trackable_record() {
    let response = test_app().oneshot(get("/v1/records")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rows = body_json(response).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 19);
    assert_eq!(rows[0]["category"], "commercialLicense");
    assert_eq!(rows[0]["categoryLabel"], "Commercial license");
    assert!(rows.iter().all(|r| r["category"] != "procedure"));
}

#[tokio::test]
async fn test_unified_view_status_filter() {
    let response = test_app()
        .oneshot(get("/v1/records?status=expired"))
        .await
        .unwrap();
    let rows = body_json(response).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["number"], "CN-2468135");
    assert_eq!(rows[0]["status"], "expired");
}

#[tokio::test]
async fn test_unified_view_sorted_descending_by_expiry() {
    let response = test_app()
        .oneshot(get("/v1/records?sort=expiryDate&dir=desc&q=license"))
        .await
        .unwrap();
    let rows = body_json(response).await;
    let dates: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["expiryDate"].as_str())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert!(!dates.is_empty());
    assert_eq!(dates, sorted);
}

#[tokio::test]
async fn test_unknown_sort_column_is_rejected() {
    let response = test_app()
        .oneshot(get("/v1/records?sort=colour"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

// -- Collections & CRUD -------------------------------------------------------

#[tokio::test]
async fn test_collection_sorted_by_internal_date() {
    let response = test_app()
        .oneshot(get("/v1/records/leaseContract?sort=internalExpiryDate"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rows = body_json(response).await;
    let ids: Vec<u64> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert_eq!(rows[0]["internalStatus"], "soonToExpire");
}

#[tokio::test]
async fn test_collection_status_filter() {
    let response = test_app()
        .oneshot(get("/v1/records/commercialLicense?status=expired"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rows = body_json(response).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["number"], "CN-2468135");
    assert_eq!(rows[0]["status"], "expired");
}

#[tokio::test]
async fn test_unknown_category_is_not_found() {
    let response = test_app().oneshot(get("/v1/records/vehicles")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_record_lifecycle() {
    let app = test_app();

    let created = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/v1/records/commercialLicense",
            json!({ "name": "Branch license", "number": "CN-9", "expiryDate": "2024-07-15", "status": "active" }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    assert_eq!(created["id"], 4);
    assert_eq!(created["status"], "soonToExpire");
    assert_eq!(created["remaining"]["label"], "Expires in 44 days");

    let updated = app
        .clone()
        .oneshot(send_json(
            "PUT",
            "/v1/records/commercialLicense/4",
            json!({ "name": "Branch license", "number": "CN-9", "expiryDate": "2024-05-01" }),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["status"], "expired");

    let fetched = app
        .clone()
        .oneshot(get("/v1/records/commercialLicense/4"))
        .await
        .unwrap();
    assert_eq!(body_json(fetched).await["expiryDate"], "2024-05-01");

    let deleted = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/v1/records/commercialLicense/4")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = app
        .oneshot(get("/v1/records/commercialLicense/4"))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_body_is_rejected() {
    let app = test_app();
    let wrong_type = app
        .clone()
        .oneshot(send_json("POST", "/v1/records/otherTopic", json!({ "name": 42 })))
        .await
        .unwrap();
    assert_eq!(wrong_type.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let blank_name = app
        .oneshot(send_json(
            "POST",
            "/v1/records/otherTopic",
            json!({ "name": "  ", "number": "X-1" }),
        ))
        .await
        .unwrap();
    assert_eq!(blank_name.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let response = test_app()
        .oneshot(send_json(
            "PUT",
            "/v1/records/trademarkCert/99",
            json!({ "name": "Logo", "number": "TM-99" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- Reports ------------------------------------------------------------------

#[tokio::test]
async fn test_dashboard() {
    let response = test_app().oneshot(get("/v1/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_json(response).await;
    assert_eq!(stats["totalRecords"], 21);
    let counted = stats["activeCount"].as_u64().unwrap()
        + stats["soonCount"].as_u64().unwrap()
        + stats["expiredCount"].as_u64().unwrap();
    assert_eq!(counted, 19);
    assert_eq!(stats["expiryTimeline"].as_array().unwrap().len(), 12);
    assert_eq!(stats["expiryTimeline"][0]["label"], "Jun 2024");
}

#[tokio::test]
async fn test_export_rows_are_numbered_in_view_order() {
    let response = test_app()
        .oneshot(get("/v1/export?status=soonToExpire&sort=expiryDate"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rows = body_json(response).await;
    let rows = rows.as_array().unwrap();
    assert!(!rows.is_empty());
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row["serial"], i + 1);
        assert_eq!(row["status"], "Soon to expire");
    }
}

// -- Sessions & Notifications -------------------------------------------------

#[tokio::test]
async fn test_first_session_of_the_day_gets_the_alerts() {
    let app = test_app();

    let first = app.clone().oneshot(post_empty("/v1/sessions")).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let banner = body_json(first).await;
    assert_eq!(banner["visible"], true);
    assert_eq!(banner["count"], 2);
    assert_eq!(banner["alerts"][0]["number"], "OP-123987");
    assert_eq!(banner["alerts"][1]["number"], "SC-CL-003");
    assert_eq!(banner["alerts"][1]["expiryDate"], "2024-08-20");

    let second = app.oneshot(post_empty("/v1/sessions")).await.unwrap();
    let banner = body_json(second).await;
    assert_eq!(banner["visible"], false);
    assert_eq!(banner["count"], 0);
}

#[tokio::test]
async fn test_dismissal_and_sending() {
    let (state, outbox) = test_state();
    let app = docket_api::app(state);

    let banner = body_json(app.clone().oneshot(post_empty("/v1/sessions")).await.unwrap()).await;
    let id = banner["sessionId"].as_str().unwrap().to_string();

    let dismissed = app
        .clone()
        .oneshot(post_empty(&format!("/v1/sessions/{id}/notifications/dismiss")))
        .await
        .unwrap();
    assert_eq!(dismissed.status(), StatusCode::OK);
    assert_eq!(body_json(dismissed).await["visible"], false);

    let current = app
        .clone()
        .oneshot(get(&format!("/v1/sessions/{id}/notifications")))
        .await
        .unwrap();
    let current = body_json(current).await;
    assert_eq!(current["dismissed"], true);
    assert_eq!(current["count"], 2);

    let sent = app
        .oneshot(post_empty(&format!("/v1/sessions/{id}/notifications/send")))
        .await
        .unwrap();
    assert_eq!(sent.status(), StatusCode::OK);
    let report = body_json(sent).await;
    assert_eq!(report["sent"], true);
    assert_eq!(report["recipient"], "admin@example.com");
    assert!(report["mailto"].as_str().unwrap().starts_with("mailto:admin@example.com?"));

    let delivered = outbox.sent();
    assert_eq!(delivered.len(), 1);
    assert!(delivered[0].1.body.contains("OP-123987"));
}

#[tokio::test]
async fn test_send_without_alerts_is_rejected() {
    let app = test_app();
    app.clone().oneshot(post_empty("/v1/sessions")).await.unwrap();
    let banner = body_json(app.clone().oneshot(post_empty("/v1/sessions")).await.unwrap()).await;
    let id = banner["sessionId"].as_str().unwrap();

    let response = app
        .oneshot(post_empty(&format!("/v1/sessions/{id}/notifications/send")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app = test_app();
    for uri in [
        "/v1/sessions/5f0c6a4e-3c1b-4f0e-9d55-1a2b3c4d5e6f/notifications",
        "/v1/sessions/not-a-session/notifications",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

// -- Metrics ------------------------------------------------------------------

#[tokio::test]
async fn test_metrics_endpoint_follows_configuration() {
    let without = test_app().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(without.status(), StatusCode::NOT_FOUND);

    let handle = PrometheusBuilder::new().build_recorder().handle();
    let app = docket_api::app(test_state().0.with_metrics(handle));
    let with = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(with.status(), StatusCode::OK);
}
