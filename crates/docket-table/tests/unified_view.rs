//! End-to-end flow through the unified view: normalize every collection,
//! filter, sort and export.

use docket_core::{
    AnyRecord, CalendarDate, ComplianceState, DualTrackRecord, RecordCategory, RecordData,
    RecordId, TrackedRecord,
};
use docket_table::{
    export_rows, normalize_all, Column, SortDirection, SortState, StatusFilter, UnifiedRecord,
    ViewQuery,
};

fn today() -> CalendarDate {
    CalendarDate::parse("2024-06-01").unwrap()
}

fn register(category: RecordCategory) -> Vec<AnyRecord> {
    let single = |id: u64, name: &str, expiry: &str| {
        AnyRecord::new(
            RecordId(id),
            RecordData::Single(TrackedRecord::new(name, format!("N-{id}")).with_expiry(expiry)),
        )
    };
    match category {
        RecordCategory::CommercialLicense => vec![
            single(1, "Trade license", "2025-01-01"),
            single(2, "Branch license", "2024-05-30"),
        ],
        RecordCategory::LeaseContract => vec![AnyRecord::new(
            RecordId(1),
            RecordData::Dual(
                DualTrackRecord::new("Warehouse lease", "LC-1")
                    .with_documented("2024-06-10")
                    .with_internal("2025-01-01")
                    .with_costs(Some(1000.0), Some(250.0)),
            ),
        )],
        RecordCategory::TrademarkCert => vec![single(1, "Logo mark", "")],
        _ => Vec::new(),
    }
}

fn names(rows: &[UnifiedRecord]) -> Vec<&str> {
    rows.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn status_descending_puts_expired_first() {
    let rows = normalize_all(register, today()).unwrap();
    let view = ViewQuery {
        sort: SortState::new(Column::Status, SortDirection::Desc),
        ..ViewQuery::default()
    };
    let out = view.unified(rows);
    assert_eq!(
        names(&out),
        vec!["Branch license", "Warehouse lease", "Trade license", "Logo mark"]
    );
}

#[test]
fn expiry_ascending_leaves_unknown_dates_last() {
    let rows = normalize_all(register, today()).unwrap();
    for direction in [SortDirection::Asc, SortDirection::Desc] {
        let view = ViewQuery {
            sort: SortState::new(Column::ExpiryDate, direction),
            ..ViewQuery::default()
        };
        let out = view.unified(rows.clone());
        assert_eq!(out.last().map(|r| r.name.as_str()), Some("Logo mark"));
    }
}

#[test]
fn status_and_text_filters_combine() {
    let rows = normalize_all(register, today()).unwrap();
    let view = ViewQuery {
        query: "LICENSE".to_string(),
        status: StatusFilter::Only(ComplianceState::Active),
        ..ViewQuery::default()
    };
    assert_eq!(names(&view.unified(rows)), vec!["Trade license"]);
}

#[test]
fn export_carries_derived_values() {
    let rows = normalize_all(register, today()).unwrap();
    let view = ViewQuery {
        sort: SortState::new(Column::DisplayCost, SortDirection::Desc),
        ..ViewQuery::default()
    };
    let exported = export_rows(&view.unified(rows));
    assert_eq!(exported[0].name, "Warehouse lease");
    assert_eq!(exported[0].category, "Lease contract");
    assert_eq!(exported[0].status, "Soon to expire");
    assert_eq!(exported[0].remaining_days, Some(9));
    assert_eq!(exported[0].cost_display, "1,250.00");
    assert_eq!(exported.len(), 4);
}

#[test]
fn unified_rows_route_back_to_their_collection() {
    let rows = normalize_all(register, today()).unwrap();
    let lease = rows.iter().find(|r| r.name == "Warehouse lease").unwrap();
    assert_eq!(lease.source(), (RecordCategory::LeaseContract, RecordId(1)));
    assert!(matches!(lease.original.data, RecordData::Dual(_)));
}
