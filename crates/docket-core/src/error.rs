//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error type shared by every Docket crate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Unparsable record dates are NOT errors. They are "unknown" dates and
//!   flow through classification as such. `InvalidDate` is only raised by
//!   the strict parsers used for operator input such as `--today`.
//! - A record whose shape does not match its category is a programming
//!   error and is reported as `CategoryMismatch` with both sides named.

use thiserror::Error;

use crate::category::{RecordCategory, RecordKind};

/// Top-level error type for Docket.
#[derive(Error, Debug)]
pub enum DocketError {
    /// A strict date parser rejected its input.
    #[error("invalid calendar date {input:?}: expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected text.
        input: String,
    },

    /// A category key is not one of the closed set of collections.
    #[error("unknown record category: {0:?}")]
    UnknownCategory(String),

    /// A column key is not one of the sortable columns.
    #[error("unknown column: {0:?}")]
    UnknownColumn(String),

    /// A compliance state key is not recognised.
    #[error("unknown compliance state: {0:?}")]
    UnknownState(String),

    /// A record was routed to a collection of a different kind.
    #[error("record of kind {actual} does not belong to category {category} (expects {expected})")]
    CategoryMismatch {
        /// The collection the record was routed to.
        category: RecordCategory,
        /// The kind that collection holds.
        expected: RecordKind,
        /// The kind of record that arrived.
        actual: RecordKind,
    },

    /// Record content failed basic sanity checks.
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocketError {
    /// Build a mismatch error for a record of `actual` kind under `category`.
    pub fn mismatch(category: RecordCategory, actual: RecordKind) -> Self {
        Self::CategoryMismatch {
            category,
            expected: category.kind(),
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_names_both_kinds() {
        let err = DocketError::mismatch(RecordCategory::LeaseContract, RecordKind::Single);
        let msg = err.to_string();
        assert!(msg.contains("leaseContract"), "got: {msg}");
        assert!(msg.contains("dual"), "got: {msg}");
        assert!(msg.contains("single"), "got: {msg}");
    }

    #[test]
    fn invalid_date_display() {
        let err = DocketError::InvalidDate {
            input: "31/12/2024".to_string(),
        };
        assert!(err.to_string().contains("31/12/2024"));
    }
}
