//! # Store Errors

use std::path::PathBuf;

use thiserror::Error;

use docket_core::{DocketError, RecordCategory, RecordId};

/// Errors raised by record stores and the registry.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record with this identifier in the collection.
    #[error("{category} record {id} not found")]
    NotFound {
        /// Collection searched.
        category: RecordCategory,
        /// Missing identifier.
        id: RecordId,
    },

    /// An identifier is already taken in the collection.
    #[error("{category} record {id} already exists")]
    Duplicate {
        /// Collection.
        category: RecordCategory,
        /// Conflicting identifier.
        id: RecordId,
    },

    /// Every identifier of the collection has been used.
    #[error("no identifiers left in {category}")]
    IdsExhausted {
        /// Full collection.
        category: RecordCategory,
    },

    /// The record body was rejected.
    #[error("validation error: {0}")]
    Validation(String),

    /// A domain error, including category/shape mismatches.
    #[error(transparent)]
    Core(#[from] DocketError),

    /// A fixture file could not be read.
    #[error("cannot read fixtures {path}: {source}")]
    FixtureIo {
        /// Fixture file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A YAML fixture document is malformed.
    #[error("malformed YAML fixtures: {0}")]
    FixtureYaml(#[from] serde_yaml::Error),

    /// A JSON fixture document is malformed.
    #[error("malformed JSON fixtures: {0}")]
    FixtureJson(#[source] serde_json::Error),
}

impl StoreError {
    /// Whether the error is caused by the caller's input rather than the
    /// server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Duplicate { .. }
                | Self::Validation(_)
                | Self::Core(DocketError::Validation(_))
                | Self::Core(DocketError::Serialization(_))
                | Self::Core(DocketError::UnknownCategory(_))
                | Self::Core(DocketError::UnknownColumn(_))
                | Self::Core(DocketError::UnknownState(_))
                | Self::Core(DocketError::InvalidDate { .. })
        )
    }
}
