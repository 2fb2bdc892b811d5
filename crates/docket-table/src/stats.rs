//! # Dashboard Statistics
//!
//! Register-wide counts, compliance rate, cost totals and a twelve-month
//! expiry timeline, all computed from derived statuses for a given day.

use serde::Serialize;

use docket_core::{
    AnyRecord, CalendarDate, ComplianceState, RecordCategory, RecordData, RecordDate,
    TRACKED_CATEGORIES,
};
use docket_status::{applicable_date, status_of};

/// Number of monthly buckets in the expiry timeline.
pub const TIMELINE_MONTHS: u32 = 12;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// State counts for one collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    /// The collection.
    pub category: RecordCategory,
    /// Its display label.
    pub label: &'static str,
    /// Records in the collection.
    pub total: usize,
    /// Active records.
    pub active: usize,
    /// Soon-to-expire records.
    pub soon: usize,
    /// Expired records.
    pub expired: usize,
    /// Sum of costs; absent costs count as zero.
    pub cost: f64,
}

impl CategoryStats {
    fn empty(category: RecordCategory) -> Self {
        Self {
            category,
            label: category.label(),
            total: 0,
            active: 0,
            soon: 0,
            expired: 0,
            cost: 0.0,
        }
    }

    fn count(&mut self, state: ComplianceState) {
        self.total += 1;
        match state {
            ComplianceState::Active => self.active += 1,
            ComplianceState::SoonToExpire => self.soon += 1,
            ComplianceState::Expired => self.expired += 1,
        }
    }
}

/// Records expiring in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBucket {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Display label, e.g. `Jun 2024`.
    pub label: String,
    /// Trackable records whose applicable date falls in this month.
    pub count: usize,
}

/// Dashboard figures for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Trackable records plus procedures.
    pub total_records: usize,
    /// Active trackable records.
    pub active_count: usize,
    /// Soon-to-expire trackable records.
    pub soon_count: usize,
    /// Expired trackable records.
    pub expired_count: usize,
    /// Percentage of trackable records that are active, rounded; 0 when
    /// there are none.
    pub compliance_rate: u32,
    /// Sum of every category's cost.
    pub total_cost: f64,
    /// Per-collection figures, in category order.
    pub categories: Vec<CategoryStats>,
    /// Expiry counts for the current month and the eleven after it.
    pub expiry_timeline: Vec<TimelineBucket>,
}

impl DashboardStats {
    /// Compute the dashboard from every collection.
    ///
    /// `collection` is called once per category and returns that
    /// category's records.
    pub fn compute<F>(mut collection: F, today: CalendarDate) -> Self
    where
        F: FnMut(RecordCategory) -> Vec<AnyRecord>,
    {
        let mut categories = Vec::with_capacity(TRACKED_CATEGORIES.len());
        let mut applicable: Vec<CalendarDate> = Vec::new();
        for category in TRACKED_CATEGORIES {
            let mut stats = CategoryStats::empty(category);
            for record in collection(category) {
                if let Some(state) = status_of(&record.data, today) {
                    stats.count(state);
                }
                stats.cost += record_cost(&record.data);
                if let Some(date) = applicable_date(&record.data).and_then(RecordDate::parsed) {
                    applicable.push(date);
                }
            }
            categories.push(stats);
        }
        let procedures = collection(RecordCategory::Procedure).len();

        let trackable: usize = categories.iter().map(|c| c.total).sum();
        let active_count: usize = categories.iter().map(|c| c.active).sum();
        let soon_count: usize = categories.iter().map(|c| c.soon).sum();
        let expired_count: usize = categories.iter().map(|c| c.expired).sum();
        let total_cost = categories.iter().map(|c| c.cost).sum();

        let stats = Self {
            total_records: trackable + procedures,
            active_count,
            soon_count,
            expired_count,
            compliance_rate: compliance_rate(active_count, trackable),
            total_cost,
            categories,
            expiry_timeline: timeline(&applicable, today),
        };
        tracing::debug!(
            total = stats.total_records,
            expired = stats.expired_count,
            "computed dashboard"
        );
        stats
    }
}

fn record_cost(data: &RecordData) -> f64 {
    match data {
        RecordData::Single(r) => r.cost.unwrap_or(0.0),
        RecordData::Dual(r) => r.total_cost(),
        RecordData::Procedure(_) => 0.0,
    }
}

fn compliance_rate(active: usize, trackable: usize) -> u32 {
    if trackable == 0 {
        return 0;
    }
    ((active as f64 / trackable as f64) * 100.0).round() as u32
}

fn timeline(dates: &[CalendarDate], today: CalendarDate) -> Vec<TimelineBucket> {
    (0..TIMELINE_MONTHS)
        .map(|offset| {
            let start = today.month_start_after(offset);
            let (year, month) = (start.year(), start.month());
            let count = dates
                .iter()
                .filter(|d| d.year() == year && d.month() == month)
                .count();
            TimelineBucket {
                year,
                month,
                label: format!("{} {year}", MONTH_NAMES[(month as usize - 1) % 12]),
                count,
            }
        })
        .collect()
}
