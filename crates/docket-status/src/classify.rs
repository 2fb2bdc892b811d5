//! # Status Classifier
//!
//! Maps an expiry date to a [`ComplianceState`] relative to a reference day.
//!
//! ```text
//!            expired             soon to expire               active
//! ──────────────────────┤today ─────────── today+120├─────────────────────▶
//! ```
//!
//! - Unknown expiry (absent, blank or unparsable) → `Active`.
//! - `expiry < today` → `Expired`.
//! - `today <= expiry <= today + 120 days` → `SoonToExpire`.
//! - Otherwise → `Active`.
//!
//! The window is a fixed policy constant, not configurable per record.

use docket_core::{known_date, CalendarDate, ComplianceState, RecordDate};

/// Width of the soon-to-expire window, in days after the reference day.
pub const SOON_TO_EXPIRE_WINDOW_DAYS: u64 = 120;

/// Classify an expiry date against `today`.
pub fn classify(expiry: Option<CalendarDate>, today: CalendarDate) -> ComplianceState {
    let Some(expiry) = expiry else {
        return ComplianceState::Active;
    };
    if expiry < today {
        ComplianceState::Expired
    } else if expiry <= today.plus_days(SOON_TO_EXPIRE_WINDOW_DAYS) {
        ComplianceState::SoonToExpire
    } else {
        ComplianceState::Active
    }
}

/// Classify a record date as entered, treating unparsable text as unknown.
pub fn classify_text(expiry: Option<&RecordDate>, today: CalendarDate) -> ComplianceState {
    classify(known_date(expiry), today)
}
