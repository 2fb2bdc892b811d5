//! # Reports API
//!
//! Routes:
//! - GET /v1/dashboard — Counts, compliance rate, costs and expiry timeline
//! - GET /v1/export — Flat export rows of the unified view

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use docket_table::{DashboardStats, ExportRow};

use crate::error::AppError;
use crate::extractors::ViewParams;
use crate::state::AppState;

/// Build the reports router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/dashboard", get(dashboard))
        .route("/v1/export", get(export))
}

async fn dashboard(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.registry.dashboard())
}

/// Rows carry already-derived values, numbered in view order.
async fn export(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> Result<Json<Vec<ExportRow>>, AppError> {
    let view = params.into_view()?;
    Ok(Json(state.registry.export(&view)?))
}
