//! # Sessions & Notifications API
//!
//! Routes:
//! - POST /v1/sessions — Start a session; the first one of the day runs the
//!   expiry check and receives its alerts
//! - GET  /v1/sessions/{id}/notifications — Current banner state
//! - POST /v1/sessions/{id}/notifications/dismiss — Hide the banner for this session
//! - POST /v1/sessions/{id}/notifications/send — Send the alert message to the
//!   configured administrator
//!
//! Sending is best-effort: a delivery failure is reported in the response
//! body and logged, and never affects the daily scan marker.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use uuid::Uuid;

use docket_notify::{dispatch, AlertMessage, Banner};

use crate::error::AppError;
use crate::extractors::session_id;
use crate::state::AppState;

/// Outcome of a send request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReport {
    pub session_id: Uuid,
    pub recipient: String,
    /// Whether the sender accepted the message.
    pub sent: bool,
    pub alert_count: usize,
    pub subject: String,
    pub body: String,
    /// Pre-filled `mailto:` link for the same message.
    pub mailto: String,
}

/// Build the sessions router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/sessions", post(start_session))
        .route("/v1/sessions/{id}/notifications", get(notifications))
        .route("/v1/sessions/{id}/notifications/dismiss", post(dismiss))
        .route("/v1/sessions/{id}/notifications/send", post(send))
}

/// POST /v1/sessions
async fn start_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Banner>), AppError> {
    let today = state.registry.today();
    let registry = state.registry.clone();
    let scanner = state.scanner.clone();
    // The marker store may touch the filesystem.
    let session = tokio::task::spawn_blocking(move || {
        scanner.start_session(today, move || registry.trackable_records())
    })
    .await
    .map_err(|e| AppError::Internal(format!("session task failed: {e}")))??;
    let banner = state.sessions.insert(session);
    tracing::debug!(session = %banner.session_id, alerts = banner.count, "session started");
    Ok((StatusCode::CREATED, Json(banner)))
}

/// GET /v1/sessions/{id}/notifications
async fn notifications(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Banner>, AppError> {
    let id = session_id(&raw_id)?;
    Ok(Json(state.sessions.get(id)?.banner()))
}

/// POST /v1/sessions/{id}/notifications/dismiss
async fn dismiss(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Banner>, AppError> {
    let id = session_id(&raw_id)?;
    Ok(Json(state.sessions.dismiss(id)?))
}

/// POST /v1/sessions/{id}/notifications/send
async fn send(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<SendReport>, AppError> {
    let id = session_id(&raw_id)?;
    let session = state.sessions.get(id)?;
    if session.alerts().is_empty() {
        return Err(AppError::Validation(
            "session has no alerts to send".to_string(),
        ));
    }

    let message = AlertMessage::compose(session.alerts());
    let recipient = state.admin_email.to_string();
    let sent = dispatch(state.sender.as_ref(), &recipient, &message);

    Ok(Json(SendReport {
        session_id: id,
        mailto: message.mailto(&recipient),
        recipient,
        sent,
        alert_count: session.alerts().len(),
        subject: message.subject,
        body: message.body,
    }))
}
