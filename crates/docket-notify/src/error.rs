//! # Notification Errors

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the notification layer.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The marker file could not be read or written.
    #[error("marker store I/O error at {path}: {source}")]
    MarkerIo {
        /// Marker file location.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The marker file exists but does not hold valid markers.
    #[error("malformed marker file {path}: {source}")]
    MarkerFormat {
        /// Marker file location.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// No session with this identifier has been started.
    #[error("unknown session: {0}")]
    UnknownSession(Uuid),

    /// Sending a notification failed.
    #[error(transparent)]
    Send(#[from] SendError),
}

/// A notification sender failed to deliver a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to send notification to {recipient}: {reason}")]
pub struct SendError {
    /// Intended recipient.
    pub recipient: String,
    /// Transport-specific reason.
    pub reason: String,
}
