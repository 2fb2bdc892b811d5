//! # Registry Service
//!
//! The registry sits between callers (HTTP handlers, the CLI) and a
//! [`RecordStore`]. Every record it returns carries statuses derived for
//! the clock's current day, computed after the write has been committed.
//! Nothing derived is ever written to the store.

use std::sync::Arc;

use serde_json::Value;

use docket_core::{
    AnyRecord, CalendarDate, Clock, RecordCategory, RecordData, RecordId, TRACKED_CATEGORIES,
};
use docket_status::DerivedRecord;
use docket_table::{export_rows, normalize_all, DashboardStats, ExportRow, UnifiedRecord, ViewQuery};

use crate::error::StoreError;
use crate::fixtures::Fixtures;
use crate::store::{MemoryStore, RecordStore};

/// Counter of committed record mutations, labelled by `op`.
pub const METRIC_RECORD_MUTATIONS: &str = "docket_record_mutations_total";

/// Record access with read-time derivation.
#[derive(Clone)]
pub struct Registry {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("today", &self.today())
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// A registry over `store`, deriving statuses for `clock`'s day.
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// An in-memory registry loaded with `fixtures`.
    pub fn in_memory(fixtures: Fixtures, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let store = Arc::new(MemoryStore::new());
        let loaded = fixtures.apply(store.as_ref())?;
        tracing::info!(records = loaded, "record store ready");
        Ok(Self::new(store, clock))
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// The current calendar day.
    pub fn today(&self) -> CalendarDate {
        self.clock.today()
    }

    /// One collection, filtered and sorted, with derived fields.
    pub fn list(&self, category: RecordCategory, view: &ViewQuery) -> Vec<DerivedRecord> {
        let today = self.today();
        let rows = self
            .store
            .list(category)
            .into_iter()
            .map(|r| DerivedRecord::new(r, today))
            .collect();
        view.collection(rows)
    }

    /// One record with derived fields.
    pub fn get(&self, category: RecordCategory, id: RecordId) -> Result<DerivedRecord, StoreError> {
        Ok(DerivedRecord::new(self.store.get(category, id)?, self.today()))
    }

    /// Create a record from a JSON body shaped for `category`.
    pub fn create(&self, category: RecordCategory, body: Value) -> Result<DerivedRecord, StoreError> {
        let data = RecordData::from_value(category.kind(), body)?;
        let record = self.store.create(category, data)?;
        self.committed("create", category, record.id);
        Ok(DerivedRecord::new(record, self.today()))
    }

    /// Replace the body of a record. Any `id` in the body is ignored.
    pub fn update(
        &self,
        category: RecordCategory,
        id: RecordId,
        body: Value,
    ) -> Result<DerivedRecord, StoreError> {
        let data = RecordData::from_value(category.kind(), body)?;
        let record = self.store.update(category, id, data)?;
        self.committed("update", category, id);
        Ok(DerivedRecord::new(record, self.today()))
    }

    /// Delete a record.
    pub fn delete(&self, category: RecordCategory, id: RecordId) -> Result<(), StoreError> {
        self.store.delete(category, id)?;
        self.committed("delete", category, id);
        Ok(())
    }

    fn committed(&self, op: &'static str, category: RecordCategory, id: RecordId) {
        metrics::counter!(METRIC_RECORD_MUTATIONS, "op" => op).increment(1);
        tracing::info!(op, %category, %id, "record committed");
    }

    /// Every trackable record with its collection, in category order.
    pub fn trackable_records(&self) -> Vec<(RecordCategory, AnyRecord)> {
        TRACKED_CATEGORIES
            .iter()
            .flat_map(|&category| {
                self.store
                    .list(category)
                    .into_iter()
                    .map(move |r| (category, r))
            })
            .collect()
    }

    /// The unified view of every trackable collection.
    pub fn unified(&self, view: &ViewQuery) -> Result<Vec<UnifiedRecord>, StoreError> {
        let rows = normalize_all(|c| self.store.list(c), self.today())?;
        Ok(view.unified(rows))
    }

    /// Dashboard statistics for today.
    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats::compute(|c| self.store.list(c), self.today())
    }

    /// Export rows of the unified view.
    pub fn export(&self, view: &ViewQuery) -> Result<Vec<ExportRow>, StoreError> {
        Ok(export_rows(&self.unified(view)?))
    }
}
