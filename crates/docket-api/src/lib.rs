//! # docket-api — Axum API Service
//!
//! HTTP surface of the compliance register, built on Axum/Tower/Tokio.
//!
//! ## Routes
//!
//! - `/v1/records/*` — record CRUD and the unified view
//! - `/v1/dashboard`, `/v1/export` — reports
//! - `/v1/sessions/*` — session start, expiry banner, dismissal, sending
//! - `/health/*` — liveness and readiness probes
//! - `/metrics` — Prometheus exposition, mounted when a handle is configured
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers: they parse input, call
//!   `docket-store`/`docket-notify` and serialize the result.
//! - All errors map to structured HTTP responses via `AppError`.

pub mod config;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use state::AppState;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::records::router())
        .merge(routes::reports::router())
        .merge(routes::sessions::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let mut probes = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    if state.metrics.is_some() {
        probes = probes.route("/metrics", get(prometheus_metrics));
    }

    Router::new().merge(probes.with_state(state)).merge(api)
}

/// Liveness probe.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: the record store answers and the scan marker is readable.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    // Store read lock acquirable.
    let _ = state.registry.trackable_records();

    if let Err(err) = state.scanner.markers().last_scan_date() {
        tracing::warn!(error = %err, "scan marker store unavailable");
        return (StatusCode::SERVICE_UNAVAILABLE, "marker store unavailable").into_response();
    }

    (StatusCode::OK, "ready").into_response()
}

/// GET /metrics — Prometheus text exposition.
async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
