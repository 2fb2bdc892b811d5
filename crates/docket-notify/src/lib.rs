//! # docket-notify — Expiry Notifications
//!
//! The once-per-day expiry check and everything around it:
//!
//! - **Markers** (`markers.rs`): the durable `lastScanDate`, claimed with a
//!   single atomic read-modify-write per calendar day. Memory and JSON file
//!   backends.
//! - **Scanner** (`scanner.rs`): the 90-day scan, run by the first session
//!   start of the day.
//! - **Sessions** (`session.rs`): per-session alerts and dismissed flag.
//! - **Messages** (`message.rs`) and **senders** (`sender.rs`): composition
//!   and best-effort delivery.
//!
//! ## Invariants
//!
//! - The scan marker is set as soon as the scan completes. A failed send
//!   never touches it.
//! - Records are read, never written.

pub mod error;
pub mod markers;
pub mod message;
pub mod scanner;
pub mod sender;
pub mod session;

pub use error::{NotifyError, SendError};
pub use markers::{FileMarkers, InMemoryMarkers, MarkerStore};
pub use message::{alert_line, AlertMessage, ALERT_SUBJECT};
pub use scanner::{scan, Alert, Scanner, SCAN_HORIZON_DAYS};
pub use sender::{dispatch, LogSender, NotificationSender, Outbox};
pub use session::{Banner, Session, SessionRegistry};

/// Counter of completed daily scans.
pub const METRIC_SCANS: &str = "docket_scans_total";
/// Counter of alerts raised by daily scans.
pub const METRIC_ALERTS: &str = "docket_alerts_total";
/// Counter of delivered alert notifications.
pub const METRIC_NOTIFICATIONS_SENT: &str = "docket_notifications_sent_total";
