//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from docket-store, docket-notify and docket-core to
//! HTTP status codes with a JSON body carrying a machine-readable code and
//! a message. Internal error details are never returned to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use docket_core::DocketError;
use docket_notify::NotifyError;
use docket_store::StoreError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request body or parameters rejected (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => {
                tracing::error!(error = %self, "internal server error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<DocketError> for AppError {
    fn from(err: DocketError) -> Self {
        match err {
            DocketError::UnknownCategory(_) => Self::NotFound(err.to_string()),
            DocketError::InvalidDate { .. }
            | DocketError::UnknownColumn(_)
            | DocketError::UnknownState(_)
            | DocketError::Validation(_)
            | DocketError::Serialization(_) => Self::Validation(err.to_string()),
            // A mismatch can only come from a programming error: the body is
            // always parsed as the shape its path's collection holds.
            DocketError::CategoryMismatch { .. } | DocketError::Io(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::Duplicate { .. } | StoreError::Validation(_) => {
                Self::Validation(err.to_string())
            }
            StoreError::Core(inner) => inner.into(),
            StoreError::IdsExhausted { .. }
            | StoreError::FixtureIo { .. }
            | StoreError::FixtureYaml(_)
            | StoreError::FixtureJson(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<NotifyError> for AppError {
    fn from(err: NotifyError) -> Self {
        match err {
            NotifyError::UnknownSession(_) => Self::NotFound(err.to_string()),
            _ => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_core::{RecordCategory, RecordId, RecordKind};
    use http_body_util::BodyExt;

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                AppError::Validation("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
            ),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code));
        }
    }

    #[test]
    fn store_errors_map_by_cause() {
        let missing = StoreError::NotFound {
            category: RecordCategory::LeaseContract,
            id: RecordId(7),
        };
        assert!(matches!(AppError::from(missing), AppError::NotFound(_)));
        assert!(matches!(
            AppError::from(StoreError::Validation("name is required".into())),
            AppError::Validation(_)
        ));
        let mismatch = StoreError::Core(DocketError::mismatch(
            RecordCategory::LeaseContract,
            RecordKind::Single,
        ));
        assert!(matches!(AppError::from(mismatch), AppError::Internal(_)));
        let full = StoreError::IdsExhausted {
            category: RecordCategory::LeaseContract,
        };
        assert!(matches!(AppError::from(full), AppError::Internal(_)));
    }

    #[test]
    fn unknown_category_is_not_found() {
        let err: AppError = "vehicles".parse::<RecordCategory>().unwrap_err().into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn internal_message_is_hidden() {
        let response = AppError::Internal("marker file is corrupt".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error.code, "INTERNAL_ERROR");
        assert!(!body.error.message.contains("corrupt"));
    }

    #[tokio::test]
    async fn client_message_is_returned() {
        let response = AppError::Validation("sort direction must be asc or desc".into()).into_response();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error.code, "VALIDATION_ERROR");
        assert!(body.error.message.contains("sort direction"));
    }
}
