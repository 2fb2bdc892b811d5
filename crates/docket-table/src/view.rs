//! # Table Views
//!
//! A [`ViewQuery`] bundles the text query, status filter and sort of one
//! table view and applies them in a fixed order: text filter, status
//! filter, then sort. Procedures carry no status and always pass the
//! status filter.

use docket_status::DerivedRecord;

use crate::filter::{filter_rows, StatusFilter};
use crate::normalize::UnifiedRecord;
use crate::sort::SortState;

/// Filter and sort settings of one table view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    /// Text query; empty matches everything.
    pub query: String,
    /// Status filter.
    pub status: StatusFilter,
    /// Active sort.
    pub sort: SortState,
}

impl ViewQuery {
    /// Apply to the unified view.
    pub fn unified(&self, rows: Vec<UnifiedRecord>) -> Vec<UnifiedRecord> {
        let mut rows = self.status.apply(filter_rows(rows, &self.query));
        self.sort.apply(&mut rows);
        rows
    }

    /// Apply to a single collection.
    pub fn collection(&self, rows: Vec<DerivedRecord>) -> Vec<DerivedRecord> {
        let mut rows = filter_rows(rows, &self.query);
        if self.status != StatusFilter::All {
            rows.retain(|r| r.derived.status.map_or(true, |s| self.status.admits(s)));
        }
        self.sort.apply(&mut rows);
        rows
    }
}
