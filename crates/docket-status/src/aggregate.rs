//! # Dual-Track Aggregation
//!
//! Lease contracts carry a documented and an internal expiry date. Each
//! present track is classified on its own and the contract's overall state
//! is the most severe of them. A contract with no tracks at all is `Active`.
//!
//! A blank track counts as absent. A present but unparsable track is
//! classified like any unknown date (`Active`), so it still appears as a
//! per-track status.

use serde::Serialize;

use docket_core::{CalendarDate, ComplianceState, DualTrackRecord};

use crate::classify::classify_text;

/// Per-track and overall states of a dual-track record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DualTrackStatus {
    /// State of the documented track, if that track is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documented_status: Option<ComplianceState>,
    /// State of the internal track, if that track is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_status: Option<ComplianceState>,
    /// Most severe of the present tracks.
    pub overall_status: ComplianceState,
}

/// Classify both tracks of `record` and combine them.
pub fn aggregate(record: &DualTrackRecord, today: CalendarDate) -> DualTrackStatus {
    let documented_status = record
        .documented_track()
        .map(|d| classify_text(Some(d), today));
    let internal_status = record
        .internal_track()
        .map(|d| classify_text(Some(d), today));
    let overall_status =
        ComplianceState::most_severe(documented_status.into_iter().chain(internal_status))
            .unwrap_or(ComplianceState::Active);
    DualTrackStatus {
        documented_status,
        internal_status,
        overall_status,
    }
}
