//! # docket-core — Foundational Types for Docket
//!
//! Docket tracks licenses, contracts and administrative procedures whose
//! expiry dates must be classified into a compliance state and surfaced
//! before they lapse. This crate defines the type-system primitives the
//! rest of the workspace builds on. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Calendar days, not instants.** `CalendarDate` has no time-of-day, so
//!    every comparison is day-granular without per-call truncation.
//!
//! 2. **Raw record dates.** `RecordDate` keeps operator text verbatim. A
//!    blank or malformed date is *unknown*, never an error.
//!
//! 3. **Single `RecordCategory` enum.** One closed definition of every
//!    collection, with exhaustive `match` for labels and kinds.
//!
//! 4. **No stored statuses.** Record shapes carry dates only. Statuses are
//!    derived on read by `docket-status`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `docket-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod category;
pub mod error;
pub mod identity;
pub mod record;
pub mod state;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use category::{RecordCategory, RecordKind, TRACKED_CATEGORIES};
pub use error::DocketError;
pub use identity::{IdGenerator, RecordId};
pub use record::{
    AnyRecord, Attachment, ContractType, DualTrackRecord, Procedure, Record, RecordData,
    RenewalType, TrackedRecord,
};
pub use state::{ComplianceState, Tier};
pub use temporal::{known_date, CalendarDate, Clock, FixedClock, RecordDate, SystemClock};
