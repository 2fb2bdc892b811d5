//! # Record Store
//!
//! [`RecordStore`] is the persistence seam: list, get, create, update and
//! delete records by collection and identifier. [`MemoryStore`] keeps every
//! collection in process memory behind one `parking_lot::RwLock`, so a
//! mutation is visible to the next read with no caching in between.
//!
//! Collections keep insertion order. Identifiers are unique within a
//! collection and come from a per-collection [`IdGenerator`], so an
//! identifier freed by a delete is never handed out again.

use std::collections::HashMap;

use parking_lot::RwLock;

use docket_core::{AnyRecord, DocketError, IdGenerator, RecordCategory, RecordData, RecordId};

use crate::error::StoreError;

/// Storage for the record collections.
pub trait RecordStore: Send + Sync {
    /// Records of one collection, in insertion order.
    fn list(&self, category: RecordCategory) -> Vec<AnyRecord>;

    /// One record.
    fn get(&self, category: RecordCategory, id: RecordId) -> Result<AnyRecord, StoreError>;

    /// Store a new record under a freshly generated identifier.
    fn create(&self, category: RecordCategory, data: RecordData) -> Result<AnyRecord, StoreError>;

    /// Store a record under a given identifier (fixture loading, imports).
    fn insert(&self, category: RecordCategory, record: AnyRecord) -> Result<AnyRecord, StoreError>;

    /// Replace the body of an existing record.
    fn update(
        &self,
        category: RecordCategory,
        id: RecordId,
        data: RecordData,
    ) -> Result<AnyRecord, StoreError>;

    /// Remove a record, returning it.
    fn delete(&self, category: RecordCategory, id: RecordId) -> Result<AnyRecord, StoreError>;
}

#[derive(Debug, Default)]
struct Collection {
    records: Vec<AnyRecord>,
    ids: IdGenerator,
}

impl Collection {
    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

/// Collections held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<RecordCategory, Collection>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records across every collection.
    pub fn len(&self) -> usize {
        self.collections.read().values().map(|c| c.records.len()).sum()
    }

    /// Whether every collection is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reject bodies whose shape does not belong in `category`.
fn check_shape(category: RecordCategory, data: &RecordData) -> Result<(), StoreError> {
    if data.kind() != category.kind() {
        let err = DocketError::mismatch(category, data.kind());
        tracing::error!(%category, error = %err, "record shape does not match its collection");
        return Err(err.into());
    }
    data.validate().map_err(|e| match e {
        DocketError::Validation(msg) => StoreError::Validation(msg),
        other => StoreError::Core(other),
    })
}

impl RecordStore for MemoryStore {
    fn list(&self, category: RecordCategory) -> Vec<AnyRecord> {
        self.collections
            .read()
            .get(&category)
            .map(|c| c.records.clone())
            .unwrap_or_default()
    }

    fn get(&self, category: RecordCategory, id: RecordId) -> Result<AnyRecord, StoreError> {
        self.collections
            .read()
            .get(&category)
            .and_then(|c| c.records.iter().find(|r| r.id == id).cloned())
            .ok_or(StoreError::NotFound { category, id })
    }

    fn create(&self, category: RecordCategory, data: RecordData) -> Result<AnyRecord, StoreError> {
        check_shape(category, &data)?;
        let mut collections = self.collections.write();
        let collection = collections.entry(category).or_default();
        let id = collection
            .ids
            .next_id()
            .ok_or(StoreError::IdsExhausted { category })?;
        let record = AnyRecord::new(id, data);
        collection.records.push(record.clone());
        Ok(record)
    }

    fn insert(&self, category: RecordCategory, record: AnyRecord) -> Result<AnyRecord, StoreError> {
        check_shape(category, &record.data)?;
        let mut collections = self.collections.write();
        let collection = collections.entry(category).or_default();
        if collection.position(record.id).is_some() {
            return Err(StoreError::Duplicate {
                category,
                id: record.id,
            });
        }
        collection.ids.observe(record.id);
        collection.records.push(record.clone());
        Ok(record)
    }

    fn update(
        &self,
        category: RecordCategory,
        id: RecordId,
        data: RecordData,
    ) -> Result<AnyRecord, StoreError> {
        check_shape(category, &data)?;
        let mut collections = self.collections.write();
        let slot = collections
            .get_mut(&category)
            .and_then(|c| {
                let idx = c.position(id)?;
                c.records.get_mut(idx)
            })
            .ok_or(StoreError::NotFound { category, id })?;
        slot.data = data;
        Ok(slot.clone())
    }

    fn delete(&self, category: RecordCategory, id: RecordId) -> Result<AnyRecord, StoreError> {
        let mut collections = self.collections.write();
        let collection = collections
            .get_mut(&category)
            .ok_or(StoreError::NotFound { category, id })?;
        let idx = collection
            .position(id)
            .ok_or(StoreError::NotFound { category, id })?;
        Ok(collection.records.remove(idx))
    }
}
