//! # Remaining Period
//!
//! Human-readable distance to an expiry date, with a severity tier used to
//! colour the label.

use serde::Serialize;

use docket_core::{CalendarDate, Tier};

use crate::classify::SOON_TO_EXPIRE_WINDOW_DAYS;

/// Label shown when the date is unknown.
pub const UNKNOWN_LABEL: &str = "—";

/// Signed day count, tier and label for one expiry date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemainingPeriod {
    /// Days from today to the expiry date; negative once expired.
    pub days: Option<i64>,
    /// Severity tier.
    pub tier: Tier,
    /// Display label.
    pub label: String,
}

impl RemainingPeriod {
    /// The period for an unknown date.
    pub fn unknown() -> Self {
        Self {
            days: None,
            tier: Tier::Unknown,
            label: UNKNOWN_LABEL.to_string(),
        }
    }
}

/// Compute the remaining period from `today` to `expiry`.
pub fn remaining(expiry: Option<CalendarDate>, today: CalendarDate) -> RemainingPeriod {
    let Some(expiry) = expiry else {
        return RemainingPeriod::unknown();
    };
    let days = today.days_until(expiry);
    let tier = if days < 0 {
        Tier::Expired
    } else if days <= SOON_TO_EXPIRE_WINDOW_DAYS as i64 {
        Tier::Soon
    } else {
        Tier::Active
    };
    RemainingPeriod {
        days: Some(days),
        tier,
        label: label_for(days),
    }
}

fn label_for(days: i64) -> String {
    match days {
        0 => "Expires today".to_string(),
        1 => "Expires in 1 day".to_string(),
        -1 => "Expired 1 day ago".to_string(),
        d if d > 1 => format!("Expires in {d} days"),
        d => format!("Expired {} days ago", d.unsigned_abs()),
    }
}
