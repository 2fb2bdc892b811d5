//! # Expiry Scanner
//!
//! On the first session start of each calendar day the scanner collects
//! every trackable record whose applicable date lies strictly after today
//! and no more than [`SCAN_HORIZON_DAYS`] days ahead. The horizon is
//! independent of the 120-day classification window.
//!
//! The scanner never mutates records. Its only side effects are the scan
//! marker and a counter.

use serde::Serialize;

use docket_core::{AnyRecord, CalendarDate, RecordCategory, RecordData, RecordDate, RecordId};
use docket_status::applicable_date;

use crate::error::NotifyError;
use crate::markers::MarkerStore;
use crate::session::Session;

/// How far ahead the scanner looks, in days.
pub const SCAN_HORIZON_DAYS: u64 = 90;

/// A record about to expire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Collection of the record.
    pub category: RecordCategory,
    /// Identifier within that collection.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Reference number.
    pub number: String,
    /// The date that triggered the alert.
    pub expiry_date: CalendarDate,
}

fn number_of(data: &RecordData) -> &str {
    match data {
        RecordData::Single(r) => &r.number,
        RecordData::Dual(r) => &r.number,
        RecordData::Procedure(_) => "",
    }
}

/// Collect the alerts for `today` from `records`.
///
/// Procedures and records without a parsable applicable date never alert.
pub fn scan<I>(records: I, today: CalendarDate) -> Vec<Alert>
where
    I: IntoIterator<Item = (RecordCategory, AnyRecord)>,
{
    let horizon = today.plus_days(SCAN_HORIZON_DAYS);
    records
        .into_iter()
        .filter(|(category, _)| category.is_tracked())
        .filter_map(|(category, record)| {
            let date = applicable_date(&record.data).and_then(RecordDate::parsed)?;
            (today < date && date <= horizon).then(|| Alert {
                category,
                id: record.id,
                name: record.data.name().to_string(),
                number: number_of(&record.data).to_string(),
                expiry_date: date,
            })
        })
        .collect()
}

/// Runs the daily check when sessions start.
#[derive(Debug)]
pub struct Scanner<M> {
    markers: M,
}

impl<M: MarkerStore> Scanner<M> {
    /// A scanner recording its daily check in `markers`.
    pub fn new(markers: M) -> Self {
        Self { markers }
    }

    /// The marker store.
    pub fn markers(&self) -> &M {
        &self.markers
    }

    /// Start a session on `today`.
    ///
    /// If today's scan has not been claimed yet, claim it, scan the records
    /// produced by `records` and hand the alerts to the new session. Later
    /// sessions on the same day start with no alerts and `records` is not
    /// called.
    ///
    /// # Errors
    ///
    /// Returns an error only when the marker store fails.
    pub fn start_session<F, I>(&self, today: CalendarDate, records: F) -> Result<Session, NotifyError>
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = (RecordCategory, AnyRecord)>,
    {
        if !self.markers.claim_scan(today)? {
            tracing::debug!(%today, "daily expiry scan already done");
            return Ok(Session::new(today, Vec::new()));
        }
        let alerts = scan(records(), today);
        metrics::counter!(crate::METRIC_SCANS).increment(1);
        metrics::counter!(crate::METRIC_ALERTS).increment(alerts.len() as u64);
        tracing::info!(%today, alerts = alerts.len(), "daily expiry scan complete");
        Ok(Session::new(today, alerts))
    }
}
