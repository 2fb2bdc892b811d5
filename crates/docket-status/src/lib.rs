//! # docket-status — Read-Time Status Derivation
//!
//! Every status in Docket is a pure function of a record's dates and the
//! current calendar day. Nothing here is stored: callers derive on each
//! read, so a date edit or a new day is reflected immediately.
//!
//! ## Components
//!
//! - **Classifier** (`classify.rs`): expiry date → `ComplianceState` with a
//!   fixed 120-day soon-to-expire window.
//!
//! - **Remaining period** (`remaining.rs`): signed day count, tier and
//!   display label.
//!
//! - **Aggregator** (`aggregate.rs`): per-track and overall states of
//!   dual-track lease contracts.
//!
//! - **Derived views** (`derive.rs`): a stored record plus its read-time
//!   fields, dispatched exhaustively over the record shapes.

pub mod aggregate;
pub mod classify;
pub mod derive;
pub mod remaining;

// ─── Re-exports ─────────────────────────────────────────────────────

pub use aggregate::{aggregate, DualTrackStatus};
pub use classify::{classify, classify_text, SOON_TO_EXPIRE_WINDOW_DAYS};
pub use derive::{applicable_date, derive, status_of, Derived, DerivedRecord};
pub use remaining::{remaining, RemainingPeriod, UNKNOWN_LABEL};
