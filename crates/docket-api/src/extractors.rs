//! # Request Extraction
//!
//! Helpers that turn raw path segments, query strings and JSON bodies into
//! domain values, mapping every rejection to an [`AppError`].

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use docket_core::{RecordCategory, RecordId};
use docket_table::{Column, SortDirection, SortState, StatusFilter, ViewQuery};

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::Validation`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::Validation(err.body_text()))
}

/// Parse a collection name from the path. Unknown names are not found.
pub fn category(raw: &str) -> Result<RecordCategory, AppError> {
    Ok(raw.parse()?)
}

/// Parse a record identifier from the path. Anything but a non-negative
/// integer cannot name a record.
pub fn record_id(raw: &str) -> Result<RecordId, AppError> {
    raw.parse::<u64>()
        .map(RecordId)
        .map_err(|_| AppError::NotFound(format!("no record with id {raw:?}")))
}

/// Parse a session identifier from the path.
pub fn session_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("no session with id {raw:?}")))
}

/// `?sort=&dir=&q=&status=` parameters of table endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    /// Column key to sort by; unsorted when absent.
    pub sort: Option<String>,
    /// `asc` (default) or `desc`.
    pub dir: Option<String>,
    /// Case-insensitive text query.
    pub q: Option<String>,
    /// Compliance state to keep, or `all`.
    pub status: Option<String>,
}

impl ViewParams {
    /// Validate the parameters into a view.
    pub fn into_view(self) -> Result<ViewQuery, AppError> {
        let direction: SortDirection = match self.dir.as_deref() {
            Some(dir) if !dir.is_empty() => dir.parse()?,
            _ => SortDirection::default(),
        };
        let sort = match self.sort.as_deref() {
            Some(key) if !key.is_empty() => SortState::new(key.parse::<Column>()?, direction),
            _ => SortState::default(),
        };
        let status: StatusFilter = self.status.as_deref().unwrap_or_default().parse()?;
        Ok(ViewQuery {
            query: self.q.unwrap_or_default(),
            status,
            sort,
        })
    }
}
