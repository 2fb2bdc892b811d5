//! # Sort Engine
//!
//! A total, stable ordering over table rows keyed by a [`Column`].
//!
//! ## Comparison Rules
//!
//! 1. A missing value (absent, blank text, unparsable date) sorts after
//!    every present value, in both directions. This check runs before any
//!    type-specific comparison.
//! 2. Severity columns compare by [`ComplianceState::weight`].
//! 3. Date columns compare by calendar day.
//! 4. Numeric columns compare numerically (`f64::total_cmp`).
//! 5. Text compares case-folded, with the raw text as a tie-break so the
//!    order is total.
//!
//! Only rule 2-5 results are reversed for descending order. Rows whose keys
//! compare equal keep their input order (`slice::sort_by` is stable).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use docket_core::{CalendarDate, ComplianceState, RecordData, RecordDate};
use docket_status::DerivedRecord;

use crate::column::{Column, ColumnClass};
use crate::normalize::UnifiedRecord;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// The other direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = docket_core::DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(docket_core::DocketError::Validation(format!(
                "sort direction must be asc or desc, got {other:?}"
            ))),
        }
    }
}

/// The active sort of a table view.
///
/// With no key the rows keep their stored order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    /// Column being sorted on.
    pub key: Option<Column>,
    /// Current direction.
    pub direction: SortDirection,
}

impl SortState {
    /// A sort on `key` in `direction`.
    pub fn new(key: Column, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Handle a click on a column header.
    ///
    /// Selecting the current key flips the direction; a new key starts
    /// ascending.
    pub fn request(&mut self, column: Column) {
        self.direction = if self.key == Some(column) {
            self.direction.reversed()
        } else {
            SortDirection::Asc
        };
        self.key = Some(column);
    }

    /// Sort `rows` in place according to this state.
    pub fn apply<T: Sortable>(&self, rows: &mut [T]) {
        if let Some(column) = self.key {
            sort_rows(rows, column, self.direction);
        }
    }
}

/// A cell value prepared for comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    /// No usable value.
    Missing,
    /// Compliance severity weight.
    Severity(u8),
    /// Calendar day.
    Date(CalendarDate),
    /// Number.
    Number(f64),
    /// Text as `(case-folded, raw)`.
    Text(String, String),
}

impl SortValue {
    /// Text value; blank text is missing.
    pub fn text(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::Missing
        } else {
            Self::Text(raw.to_lowercase(), raw.to_string())
        }
    }

    /// Optional text value.
    pub fn opt_text(raw: Option<&str>) -> Self {
        raw.map_or(Self::Missing, Self::text)
    }

    /// Date value; absent, blank or unparsable text is missing.
    pub fn date(raw: Option<&RecordDate>) -> Self {
        raw.and_then(RecordDate::parsed)
            .map_or(Self::Missing, Self::Date)
    }

    /// Numeric value.
    pub fn number(n: Option<f64>) -> Self {
        n.map_or(Self::Missing, Self::Number)
    }

    /// Severity value.
    pub fn severity(state: Option<ComplianceState>) -> Self {
        state.map_or(Self::Missing, |s| Self::Severity(s.weight()))
    }

    /// Whether the value is missing.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Severity(_) => 0,
            Self::Date(_) => 1,
            Self::Number(_) => 2,
            Self::Text(..) => 3,
            Self::Missing => 4,
        }
    }

    fn cmp_present(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Severity(a), Self::Severity(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(fa, ra), Self::Text(fb, rb)) => fa.cmp(fb).then_with(|| ra.cmp(rb)),
            // Values of one column share a class; differing classes still
            // need a total order.
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Compare two cell values; missing values sort last in both directions.
pub fn compare_values(a: &SortValue, b: &SortValue, direction: SortDirection) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => direction.apply(a.cmp_present(b)),
    }
}

/// A row that can produce a comparable value for any column.
pub trait Sortable {
    /// The value of `column` for this row. Columns the row does not carry
    /// are [`SortValue::Missing`].
    fn sort_value(&self, column: Column) -> SortValue;
}

/// Stable sort of `rows` by `column`.
pub fn sort_rows<T: Sortable>(rows: &mut [T], column: Column, direction: SortDirection) {
    rows.sort_by(|a, b| compare_values(&a.sort_value(column), &b.sort_value(column), direction));
}

/// Value of a stored (non-derived) field.
fn stored_value(data: &RecordData, column: Column) -> SortValue {
    match (data, column) {
        (_, Column::Name) => SortValue::text(data.name()),

        (RecordData::Single(r), Column::Number) => SortValue::text(&r.number),
        (RecordData::Single(r), Column::Notes) => SortValue::opt_text(r.notes.as_deref()),
        (RecordData::Single(r), Column::ExpiryDate) => SortValue::date(r.expiry_date.as_ref()),
        (RecordData::Single(r), Column::RegistrationDate) => {
            SortValue::date(r.registration_date.as_ref())
        }
        (RecordData::Single(r), Column::Cost | Column::DisplayCost) => SortValue::number(r.cost),
        (RecordData::Single(r), Column::RenewalType) => {
            SortValue::opt_text(r.renewal_type.map(|t| match t {
                docket_core::RenewalType::Manual => "manual",
                docket_core::RenewalType::Automatic => "automatic",
            }))
        }

        (RecordData::Dual(r), Column::Number) => SortValue::text(&r.number),
        (RecordData::Dual(r), Column::Notes) => SortValue::opt_text(r.notes.as_deref()),
        (RecordData::Dual(r), Column::DocumentedExpiryDate) => {
            SortValue::date(r.documented_expiry_date.as_ref())
        }
        (RecordData::Dual(r), Column::InternalExpiryDate) => {
            SortValue::date(r.internal_expiry_date.as_ref())
        }
        (RecordData::Dual(r), Column::DocumentedCost) => SortValue::number(r.documented_cost),
        (RecordData::Dual(r), Column::InternalCost) => SortValue::number(r.internal_cost),
        (RecordData::Dual(r), Column::DisplayCost) => SortValue::number(Some(r.total_cost())),
        (RecordData::Dual(r), Column::ContractType) => {
            SortValue::opt_text(r.contract_type.map(|t| match t {
                docket_core::ContractType::Documented => "documented",
                docket_core::ContractType::Internal => "internal",
                docket_core::ContractType::DocumentedAndInternal => "documentedAndInternal",
            }))
        }

        (RecordData::Procedure(p), column) => match column {
            Column::LicenseName => SortValue::text(&p.license_name),
            Column::Authority => SortValue::text(&p.authority),
            Column::ContactNumbers => SortValue::text(&p.contact_numbers),
            Column::Email => SortValue::text(&p.email),
            Column::WebsiteName => SortValue::text(&p.website_name),
            Column::WebsiteUrl => SortValue::text(&p.website_url),
            Column::Username => SortValue::text(&p.username),
            Column::EmployeeName => SortValue::text(&p.employee_name),
            Column::EmployeeNumber => SortValue::text(&p.employee_number),
            Column::Requirements => SortValue::text(&p.requirements),
            Column::Notes => SortValue::opt_text(p.notes.as_deref()),
            _ => SortValue::Missing,
        },

        _ => SortValue::Missing,
    }
}

impl Sortable for DerivedRecord {
    fn sort_value(&self, column: Column) -> SortValue {
        match column {
            Column::Id => SortValue::Number(self.record.id.get() as f64),
            Column::Status => SortValue::severity(self.derived.status),
            Column::DocumentedStatus => SortValue::severity(self.derived.documented_status),
            Column::InternalStatus => SortValue::severity(self.derived.internal_status),
            Column::Remaining => SortValue::number(
                self.derived
                    .remaining
                    .as_ref()
                    .and_then(|r| r.days)
                    .map(|d| d as f64),
            ),
            other => stored_value(&self.record.data, other),
        }
    }
}

impl Sortable for UnifiedRecord {
    fn sort_value(&self, column: Column) -> SortValue {
        match column {
            Column::Id => SortValue::Number(self.id.get() as f64),
            Column::Category => SortValue::text(self.category_label),
            Column::Name => SortValue::text(&self.name),
            Column::Number => SortValue::text(&self.number),
            Column::Notes => SortValue::opt_text(self.notes.as_deref()),
            Column::ExpiryDate => SortValue::date(self.expiry_date.as_ref()),
            Column::Status => SortValue::severity(Some(self.status)),
            Column::Remaining => SortValue::number(self.remaining.days.map(|d| d as f64)),
            Column::Cost | Column::DisplayCost => SortValue::number(self.display_cost),
            other => stored_value(&self.original.data, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(u32, SortValue);

    impl Sortable for Row {
        fn sort_value(&self, _column: Column) -> SortValue {
            self.1.clone()
        }
    }

    fn ids(rows: &[Row]) -> Vec<u32> {
        rows.iter().map(|r| r.0).collect()
    }

    fn date(s: &str) -> SortValue {
        SortValue::date(Some(&RecordDate::new(s)))
    }

    #[test]
    fn missing_values_sort_last_in_both_directions() {
        let rows = vec![
            Row(1, date("")),
            Row(2, date("2024-05-01")),
            Row(3, date("garbage")),
            Row(4, date("2025-01-01")),
        ];
        let mut asc = rows.clone();
        sort_rows(&mut asc, Column::ExpiryDate, SortDirection::Asc);
        assert_eq!(ids(&asc), vec![2, 4, 1, 3]);

        let mut desc = rows;
        sort_rows(&mut desc, Column::ExpiryDate, SortDirection::Desc);
        assert_eq!(ids(&desc), vec![4, 2, 1, 3]);
    }

    #[test]
    fn severity_orders_by_weight() {
        let mut rows = vec![
            Row(1, SortValue::severity(Some(ComplianceState::Expired))),
            Row(2, SortValue::severity(Some(ComplianceState::Active))),
            Row(3, SortValue::severity(Some(ComplianceState::SoonToExpire))),
        ];
        sort_rows(&mut rows, Column::Status, SortDirection::Asc);
        assert_eq!(ids(&rows), vec![2, 3, 1]);
        sort_rows(&mut rows, Column::Status, SortDirection::Desc);
        assert_eq!(ids(&rows), vec![1, 3, 2]);
    }

    #[test]
    fn text_is_case_folded_with_raw_tie_break() {
        let mut rows = vec![
            Row(1, SortValue::text("beta")),
            Row(2, SortValue::text("Alpha")),
            Row(3, SortValue::text("alpha")),
            Row(4, SortValue::text("  ")),
        ];
        sort_rows(&mut rows, Column::Name, SortDirection::Asc);
        assert_eq!(ids(&rows), vec![2, 3, 1, 4]);
    }

    #[test]
    fn numbers_compare_numerically() {
        let mut rows = vec![
            Row(1, SortValue::Number(100.0)),
            Row(2, SortValue::Number(9.5)),
            Row(3, SortValue::Missing),
            Row(4, SortValue::Number(-3.0)),
        ];
        sort_rows(&mut rows, Column::Cost, SortDirection::Desc);
        assert_eq!(ids(&rows), vec![1, 2, 4, 3]);
    }

    #[test]
    fn sort_state_toggles() {
        let mut state = SortState::default();
        assert_eq!(state.key, None);
        state.request(Column::Name);
        assert_eq!(state, SortState::new(Column::Name, SortDirection::Asc));
        state.request(Column::Name);
        assert_eq!(state.direction, SortDirection::Desc);
        state.request(Column::Name);
        assert_eq!(state.direction, SortDirection::Asc);
        state.request(Column::Name);
        state.request(Column::Cost);
        assert_eq!(state, SortState::new(Column::Cost, SortDirection::Asc));
    }

    #[test]
    fn unsorted_state_keeps_stored_order() {
        let mut rows = vec![Row(3, SortValue::Number(1.0)), Row(1, SortValue::Number(0.0))];
        SortState::default().apply(&mut rows);
        assert_eq!(ids(&rows), vec![3, 1]);
    }

    #[test]
    fn direction_parses() {
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert!("up".parse::<SortDirection>().is_err());
    }
}
