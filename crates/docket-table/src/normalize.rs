//! # Record Normalizer
//!
//! Flattens single-date and dual-track records into one [`UnifiedRecord`]
//! shape for the cross-category view.
//!
//! A dual-track contract is shown by its display date (documented, else
//! internal), its aggregated overall status and the sum of both costs. Each
//! unified record keeps the stored record and its category, so edits and
//! deletes issued from the unified view are routed back to the right
//! collection.

use serde::Serialize;

use docket_core::{
    AnyRecord, CalendarDate, ComplianceState, DocketError, RecordCategory, RecordData, RecordDate,
    RecordId, RecordKind, TRACKED_CATEGORIES,
};
use docket_status::{aggregate, classify_text, remaining, RemainingPeriod};

/// A trackable record projected into the unified view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedRecord {
    /// Identifier within the source collection.
    pub id: RecordId,
    /// Source collection.
    pub category: RecordCategory,
    /// Display label of the source collection.
    pub category_label: &'static str,
    /// Display name.
    pub name: String,
    /// Reference number.
    pub number: String,
    /// Expiry date shown for the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<RecordDate>,
    /// Overall compliance state.
    pub status: ComplianceState,
    /// Distance to the expiry date.
    pub remaining: RemainingPeriod,
    /// Cost shown for the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_cost: Option<f64>,
    /// Free-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Number of attached documents.
    pub attachment_count: usize,
    /// The stored record this row was projected from.
    pub original: AnyRecord,
}

impl UnifiedRecord {
    /// Collection and identifier to route an edit or delete to.
    pub fn source(&self) -> (RecordCategory, RecordId) {
        (self.category, self.id)
    }
}

/// Project one stored record of `category` into the unified view.
///
/// # Errors
///
/// Returns [`DocketError::CategoryMismatch`] when the record's shape does
/// not match the kind `category` holds, and [`DocketError::Validation`] for
/// procedures, which have no place in the unified view.
pub fn normalize(
    record: &AnyRecord,
    category: RecordCategory,
    today: CalendarDate,
) -> Result<UnifiedRecord, DocketError> {
    let unified = match (category.kind(), &record.data) {
        (RecordKind::Single, RecordData::Single(r)) => UnifiedRecord {
            id: record.id,
            category,
            category_label: category.label(),
            name: r.name.clone(),
            number: r.number.clone(),
            expiry_date: r.expiry_date.clone(),
            status: classify_text(r.expiry_date.as_ref(), today),
            remaining: remaining(r.expiry(), today),
            display_cost: r.cost,
            notes: r.notes.clone(),
            attachment_count: r.attachments.len(),
            original: record.clone(),
        },
        (RecordKind::Dual, RecordData::Dual(r)) => {
            let shown = r.display_date();
            UnifiedRecord {
                id: record.id,
                category,
                category_label: category.label(),
                name: r.name.clone(),
                number: r.number.clone(),
                expiry_date: shown.cloned(),
                status: aggregate(r, today).overall_status,
                remaining: remaining(shown.and_then(RecordDate::parsed), today),
                display_cost: Some(r.total_cost()),
                notes: r.notes.clone(),
                attachment_count: r.attachments.len(),
                original: record.clone(),
            }
        }
        (RecordKind::Reference, RecordData::Procedure(_)) => {
            return Err(DocketError::Validation(format!(
                "{category} records are not part of the unified view"
            )));
        }
        (_, data) => {
            let err = DocketError::mismatch(category, data.kind());
            tracing::error!(
                category = %category,
                id = %record.id,
                error = %err,
                "record shape does not match its collection"
            );
            return Err(err);
        }
    };
    Ok(unified)
}

/// Flatten every trackable collection, in category order.
///
/// `collection` is called once per trackable category and returns that
/// category's records in stored order.
///
/// # Errors
///
/// Propagates the first [`normalize`] failure.
pub fn normalize_all<F>(mut collection: F, today: CalendarDate) -> Result<Vec<UnifiedRecord>, DocketError>
where
    F: FnMut(RecordCategory) -> Vec<AnyRecord>,
{
    let mut out = Vec::new();
    for category in TRACKED_CATEGORIES {
        for record in collection(category) {
            out.push(normalize(&record, category, today)?);
        }
    }
    tracing::debug!(rows = out.len(), "normalized unified view");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_core::{DualTrackRecord, Procedure, Tier, TrackedRecord};

    fn today() -> CalendarDate {
        CalendarDate::parse("2024-06-01").unwrap()
    }

    fn single(id: u64, expiry: &str, cost: Option<f64>) -> AnyRecord {
        let mut r = TrackedRecord::new(format!("License {id}"), format!("CN-{id}")).with_expiry(expiry);
        r.cost = cost;
        AnyRecord::new(RecordId(id), RecordData::Single(r))
    }

    fn lease(id: u64, documented: &str, internal: &str) -> AnyRecord {
        AnyRecord::new(
            RecordId(id),
            RecordData::Dual(
                DualTrackRecord::new(format!("Lease {id}"), format!("LC-{id}"))
                    .with_documented(documented)
                    .with_internal(internal)
                    .with_costs(Some(100_000.0), None),
            ),
        )
    }

    #[test]
    fn single_record_maps_directly() {
        let u = normalize(&single(1, "2024-07-15", Some(1500.0)), RecordCategory::CommercialLicense, today()).unwrap();
        assert_eq!(u.category_label, "Commercial license");
        assert_eq!(u.status, ComplianceState::SoonToExpire);
        assert_eq!(u.display_cost, Some(1500.0));
        assert_eq!(u.remaining.days, Some(44));
        assert_eq!(u.source(), (RecordCategory::CommercialLicense, RecordId(1)));
    }

    #[test]
    fn dual_record_uses_display_date_and_total_cost() {
        let u = normalize(&lease(2, "2024-06-10", "2025-01-01"), RecordCategory::LeaseContract, today()).unwrap();
        assert_eq!(u.expiry_date.as_ref().map(RecordDate::as_str), Some("2024-06-10"));
        assert_eq!(u.status, ComplianceState::SoonToExpire);
        assert_eq!(u.display_cost, Some(100_000.0));

        let internal_only = normalize(&lease(3, "", "2024-05-01"), RecordCategory::LeaseContract, today()).unwrap();
        assert_eq!(internal_only.expiry_date.as_ref().map(RecordDate::as_str), Some("2024-05-01"));
        assert_eq!(internal_only.status, ComplianceState::Expired);
        assert_eq!(internal_only.remaining.tier, Tier::Expired);
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let err = normalize(&single(1, "2024-07-15", None), RecordCategory::LeaseContract, today()).unwrap_err();
        assert!(matches!(
            err,
            DocketError::CategoryMismatch { expected: RecordKind::Dual, actual: RecordKind::Single, .. }
        ));

        let procedure = AnyRecord::new(RecordId(1), RecordData::Procedure(Procedure::default()));
        assert!(matches!(
            normalize(&procedure, RecordCategory::LeaseContract, today()),
            Err(DocketError::CategoryMismatch { .. })
        ));
        assert!(matches!(
            normalize(&procedure, RecordCategory::Procedure, today()),
            Err(DocketError::Validation(_))
        ));
    }

    #[test]
    fn normalize_all_follows_category_order() {
        let rows = normalize_all(
            |category| match category {
                RecordCategory::CommercialLicense => vec![single(1, "2025-01-01", None)],
                RecordCategory::LeaseContract => vec![lease(1, "2024-06-10", "")],
                RecordCategory::OtherTopic => vec![single(7, "", None)],
                _ => Vec::new(),
            },
            today(),
        )
        .unwrap();
        let order: Vec<_> = rows.iter().map(|r| r.category).collect();
        assert_eq!(
            order,
            vec![
                RecordCategory::CommercialLicense,
                RecordCategory::LeaseContract,
                RecordCategory::OtherTopic
            ]
        );
        assert_eq!(rows[2].status, ComplianceState::Active);
    }

    #[test]
    fn serializes_camel_case_with_original() {
        let u = normalize(&single(4, "2023-01-01", None), RecordCategory::TrademarkCert, today()).unwrap();
        let v = serde_json::to_value(&u).unwrap();
        assert_eq!(v["categoryLabel"], "Trademark");
        assert_eq!(v["status"], "expired");
        assert_eq!(v["original"]["kind"], "single");
        assert!(v.get("displayCost").is_none());
    }
}
