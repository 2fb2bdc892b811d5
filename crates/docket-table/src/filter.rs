//! # Filters
//!
//! Text search and status filtering for table views.
//!
//! The text filter is a case-insensitive substring match of one query over
//! a fixed list of fields per view. Standard views search name, reference
//! number and notes. The procedures view searches its contact and portal
//! fields. Derived dates and numbers are never searched. An empty query
//! matches everything.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use docket_core::{ComplianceState, DocketError, Procedure, RecordData};
use docket_status::DerivedRecord;

use crate::normalize::UnifiedRecord;

/// A row exposing its searchable text fields.
pub trait Searchable {
    /// The fields a text query is matched against. Absent fields are
    /// simply left out.
    fn search_fields(&self) -> Vec<&str>;
}

/// Whether `row` matches `query`.
pub fn matches_query<T: Searchable + ?Sized>(row: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    row.search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Keep the rows matching `query`, in their original order.
pub fn filter_rows<T: Searchable>(mut rows: Vec<T>, query: &str) -> Vec<T> {
    if !query.is_empty() {
        rows.retain(|row| matches_query(row, query));
    }
    rows
}

fn procedure_fields(p: &Procedure) -> Vec<&str> {
    let mut fields = vec![
        p.license_name.as_str(),
        p.authority.as_str(),
        p.contact_numbers.as_str(),
        p.email.as_str(),
        p.website_name.as_str(),
        p.website_url.as_str(),
        p.username.as_str(),
    ];
    fields.extend(p.notes.as_deref());
    fields
}

impl Searchable for RecordData {
    fn search_fields(&self) -> Vec<&str> {
        match self {
            RecordData::Single(r) => {
                let mut fields = vec![r.name.as_str(), r.number.as_str()];
                fields.extend(r.notes.as_deref());
                fields
            }
            RecordData::Dual(r) => {
                let mut fields = vec![r.name.as_str(), r.number.as_str()];
                fields.extend(r.notes.as_deref());
                fields
            }
            RecordData::Procedure(p) => procedure_fields(p),
        }
    }
}

impl Searchable for DerivedRecord {
    fn search_fields(&self) -> Vec<&str> {
        self.record.data.search_fields()
    }
}

impl Searchable for UnifiedRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.number.as_str()];
        fields.extend(self.notes.as_deref());
        fields
    }
}

/// Status filter of a table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusFilter {
    /// Every state.
    #[default]
    All,
    /// Only records in this state.
    Only(ComplianceState),
}

impl StatusFilter {
    /// Whether a record in `state` passes.
    pub fn admits(&self, state: ComplianceState) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == state,
        }
    }

    /// Keep the unified rows whose derived status passes.
    pub fn apply(&self, mut rows: Vec<UnifiedRecord>) -> Vec<UnifiedRecord> {
        if let Self::Only(_) = self {
            rows.retain(|r| self.admits(r.status));
        }
        rows
    }
}

impl FromStr for StatusFilter {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}
