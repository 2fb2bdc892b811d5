//! # Derived Views
//!
//! Attaches the read-time fields (status, per-track statuses, remaining
//! period) to a stored record. The stored record itself is never modified.

use serde::Serialize;

use docket_core::{AnyRecord, CalendarDate, ComplianceState, RecordData, RecordDate};

use crate::aggregate::{aggregate, DualTrackStatus};
use crate::classify::classify_text;
use crate::remaining::{remaining, RemainingPeriod};

/// Read-time fields of one record. Empty for procedures.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Derived {
    /// Overall compliance state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ComplianceState>,
    /// Documented track state (dual-track records).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documented_status: Option<ComplianceState>,
    /// Internal track state (dual-track records).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_status: Option<ComplianceState>,
    /// Distance to the applicable expiry date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<RemainingPeriod>,
}

/// A stored record together with its read-time fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedRecord {
    /// The record as stored.
    #[serde(flatten)]
    pub record: AnyRecord,
    /// Fields computed for the current day.
    #[serde(flatten)]
    pub derived: Derived,
}

impl DerivedRecord {
    /// Derive the read-time view of `record` as of `today`.
    pub fn new(record: AnyRecord, today: CalendarDate) -> Self {
        let derived = derive(&record.data, today);
        Self { record, derived }
    }
}

/// The date a record is tracked by: the expiry date of a single-track
/// record, or the display date (documented, else internal) of a
/// dual-track record. Blank text counts as absent.
pub fn applicable_date(data: &RecordData) -> Option<&RecordDate> {
    match data {
        RecordData::Single(r) => r.expiry_date.as_ref().filter(|d| !d.is_blank()),
        RecordData::Dual(r) => r.display_date(),
        RecordData::Procedure(_) => None,
    }
}

/// Overall compliance state of a record, `None` for procedures.
pub fn status_of(data: &RecordData, today: CalendarDate) -> Option<ComplianceState> {
    match data {
        RecordData::Single(r) => Some(classify_text(r.expiry_date.as_ref(), today)),
        RecordData::Dual(r) => Some(aggregate(r, today).overall_status),
        RecordData::Procedure(_) => None,
    }
}

/// Compute every read-time field of a record.
pub fn derive(data: &RecordData, today: CalendarDate) -> Derived {
    let period = || remaining(applicable_date(data).and_then(RecordDate::parsed), today);
    match data {
        RecordData::Single(r) => Derived {
            status: Some(classify_text(r.expiry_date.as_ref(), today)),
            remaining: Some(period()),
            ..Derived::default()
        },
        RecordData::Dual(r) => {
            let DualTrackStatus {
                documented_status,
                internal_status,
                overall_status,
            } = aggregate(r, today);
            Derived {
                status: Some(overall_status),
                documented_status,
                internal_status,
                remaining: Some(period()),
            }
        }
        RecordData::Procedure(_) => Derived::default(),
    }
}
