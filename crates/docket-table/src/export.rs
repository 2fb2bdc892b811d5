//! # Export Rows
//!
//! Flat rows of already-derived values for spreadsheet export. Rows are
//! produced from a view that has already been filtered and sorted, and
//! are numbered from 1 in that order.

use serde::Serialize;

use docket_core::RecordDate;

use crate::normalize::UnifiedRecord;

/// One exported row of the unified view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    /// Position in the exported view, from 1.
    pub serial: usize,
    /// Category label.
    pub category: String,
    /// Display name.
    pub name: String,
    /// Reference number.
    pub number: String,
    /// Expiry date text as entered, empty when absent.
    pub expiry_date: String,
    /// Status label.
    pub status: String,
    /// Signed days to expiry, when the date is known.
    pub remaining_days: Option<i64>,
    /// Cost as a number.
    pub cost: Option<f64>,
    /// Cost formatted for display.
    pub cost_display: String,
}

/// Build export rows from a filtered, sorted unified view.
pub fn export_rows(rows: &[UnifiedRecord]) -> Vec<ExportRow> {
    rows.iter()
        .enumerate()
        .map(|(index, r)| ExportRow {
            serial: index + 1,
            category: r.category_label.to_string(),
            name: r.name.clone(),
            number: r.number.clone(),
            expiry_date: r
                .expiry_date
                .as_ref()
                .map(RecordDate::to_string)
                .unwrap_or_default(),
            status: r.status.label().to_string(),
            remaining_days: r.remaining.days,
            cost: r.display_cost,
            cost_display: format_cost(r.display_cost),
        })
        .collect()
}

/// Format a cost with thousands separators and two decimals; `-` when
/// absent.
pub fn format_cost(cost: Option<f64>) -> String {
    let Some(cost) = cost.filter(|c| c.is_finite()) else {
        return "-".to_string();
    };
    let fixed = format!("{:.2}", cost.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if cost < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use docket_core::{AnyRecord, CalendarDate, RecordCategory, RecordData, RecordId, TrackedRecord};

    #[test]
    fn cost_formatting() {
        assert_eq!(format_cost(None), "-");
        assert_eq!(format_cost(Some(0.0)), "0.00");
        assert_eq!(format_cost(Some(999.5)), "999.50");
        assert_eq!(format_cost(Some(1500.0)), "1,500.00");
        assert_eq!(format_cost(Some(1_234_567.891)), "1,234,567.89");
        assert_eq!(format_cost(Some(-2500.0)), "-2,500.00");
        assert_eq!(format_cost(Some(f64::NAN)), "-");
    }

    #[test]
    fn rows_are_numbered_in_view_order() {
        let today = CalendarDate::parse("2024-06-01").unwrap();
        let records = [
            AnyRecord::new(
                RecordId(9),
                RecordData::Single(TrackedRecord::new("Permit", "P-9").with_expiry("2024-05-30").with_cost(1200.0)),
            ),
            AnyRecord::new(RecordId(2), RecordData::Single(TrackedRecord::new("Other", "O-2"))),
        ];
        let unified: Vec<_> = records
            .iter()
            .map(|r| normalize(r, RecordCategory::OtherTopic, today).unwrap())
            .collect();
        let rows = export_rows(&unified);
        assert_eq!(rows[0].serial, 1);
        assert_eq!(rows[0].category, "Other topic");
        assert_eq!(rows[0].status, "Expired");
        assert_eq!(rows[0].remaining_days, Some(-2));
        assert_eq!(rows[0].cost_display, "1,200.00");
        assert_eq!(rows[1].serial, 2);
        assert_eq!(rows[1].expiry_date, "");
        assert_eq!(rows[1].remaining_days, None);
        assert_eq!(rows[1].cost_display, "-");
    }
}
