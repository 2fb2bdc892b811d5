//! # Records API
//!
//! Routes:
//! - GET    /v1/records — Unified view of every trackable collection
//! - GET    /v1/records/{category} — One collection with derived fields
//! - POST   /v1/records/{category} — Create a record
//! - GET    /v1/records/{category}/{id} — One record with derived fields
//! - PUT    /v1/records/{category}/{id} — Replace a record's body
//! - DELETE /v1/records/{category}/{id} — Delete a record
//!
//! Bodies are the stored fields of the collection's record shape. Derived
//! fields (statuses, remaining period) are computed after the write and
//! returned with the record; any sent by the client are ignored.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use docket_status::DerivedRecord;
use docket_table::UnifiedRecord;

use crate::error::AppError;
use crate::extractors::{category, extract_json, record_id, ViewParams};
use crate::state::AppState;

/// Build the records router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/records", get(unified_view))
        .route(
            "/v1/records/{category}",
            get(list_records).post(create_record),
        )
        .route(
            "/v1/records/{category}/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
}

/// GET /v1/records — normalized rows, filtered then sorted.
async fn unified_view(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> Result<Json<Vec<UnifiedRecord>>, AppError> {
    let view = params.into_view()?;
    Ok(Json(state.registry.unified(&view)?))
}

/// GET /v1/records/{category}
async fn list_records(
    State(state): State<AppState>,
    Path(raw_category): Path<String>,
    Query(params): Query<ViewParams>,
) -> Result<Json<Vec<DerivedRecord>>, AppError> {
    let category = category(&raw_category)?;
    let view = params.into_view()?;
    Ok(Json(state.registry.list(category, &view)))
}

/// POST /v1/records/{category}
async fn create_record(
    State(state): State<AppState>,
    Path(raw_category): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<DerivedRecord>), AppError> {
    let category = category(&raw_category)?;
    let body = extract_json(body)?;
    let record = state.registry.create(category, body)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /v1/records/{category}/{id}
async fn get_record(
    State(state): State<AppState>,
    Path((raw_category, raw_id)): Path<(String, String)>,
) -> Result<Json<DerivedRecord>, AppError> {
    let category = category(&raw_category)?;
    let id = record_id(&raw_id)?;
    Ok(Json(state.registry.get(category, id)?))
}

/// PUT /v1/records/{category}/{id}
async fn update_record(
    State(state): State<AppState>,
    Path((raw_category, raw_id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DerivedRecord>, AppError> {
    let category = category(&raw_category)?;
    let id = record_id(&raw_id)?;
    let body = extract_json(body)?;
    Ok(Json(state.registry.update(category, id, body)?))
}

/// DELETE /v1/records/{category}/{id}
async fn delete_record(
    State(state): State<AppState>,
    Path((raw_category, raw_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let category = category(&raw_category)?;
    let id = record_id(&raw_id)?;
    state.registry.delete(category, id)?;
    Ok(StatusCode::NO_CONTENT)
}
