//! # Fixtures
//!
//! Loads a register from a YAML or JSON document keyed by collection name:
//!
//! ```yaml
//! commercialLicense:
//!   - id: 1
//!     name: General trade license
//!     number: CN-1234567
//!     expiryDate: "2025-08-15"
//! leaseContract:
//!   - name: Head office lease        # id assigned when absent
//!     documentedExpiryDate: "2025-12-31"
//! ```
//!
//! Each entry is parsed as the record shape its collection holds. Fields
//! the shape does not know (including a stored `status`) are ignored.
//! A built-in demonstration register is embedded in the binary.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use docket_core::{AnyRecord, RecordCategory, RecordData, RecordId};

use crate::error::StoreError;
use crate::store::RecordStore;

const SEED_YAML: &str = include_str!("../fixtures/seed.yaml");

/// A parsed fixture document: record bodies per collection, ids optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fixtures {
    collections: BTreeMap<RecordCategory, Vec<(Option<RecordId>, RecordData)>>,
}

impl Fixtures {
    /// The built-in demonstration register.
    pub fn seed() -> Result<Self, StoreError> {
        Self::from_yaml(SEED_YAML)
    }

    /// Parse a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self, StoreError> {
        let raw: BTreeMap<RecordCategory, Vec<Value>> = serde_yaml::from_str(text)?;
        Self::from_raw(raw)
    }

    /// Parse a JSON document.
    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        let raw: BTreeMap<RecordCategory, Vec<Value>> =
            serde_json::from_str(text).map_err(StoreError::FixtureJson)?;
        Self::from_raw(raw)
    }

    /// Read a fixture file; `.json` files are parsed as JSON, anything else
    /// as YAML.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path).map_err(|source| StoreError::FixtureIo {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let fixtures = if is_json {
            Self::from_json(&text)?
        } else {
            Self::from_yaml(&text)?
        };
        tracing::info!(path = %path.display(), records = fixtures.len(), "loaded fixtures");
        Ok(fixtures)
    }

    fn from_raw(raw: BTreeMap<RecordCategory, Vec<Value>>) -> Result<Self, StoreError> {
        let mut collections = BTreeMap::new();
        for (category, entries) in raw {
            let mut parsed = Vec::with_capacity(entries.len());
            for mut entry in entries {
                let id = take_id(&mut entry)?;
                parsed.push((id, RecordData::from_value(category.kind(), entry)?));
            }
            collections.insert(category, parsed);
        }
        Ok(Self { collections })
    }

    /// Number of records across every collection.
    pub fn len(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    /// Whether the document holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load every record into `store`, keeping explicit identifiers.
    ///
    /// Entries with an identifier go in first so that generated ones can
    /// never collide with them.
    pub fn apply(self, store: &dyn RecordStore) -> Result<usize, StoreError> {
        let mut loaded = 0;
        for (category, entries) in self.collections {
            let mut unnumbered = Vec::new();
            for (id, data) in entries {
                match id {
                    Some(id) => {
                        store.insert(category, AnyRecord::new(id, data))?;
                        loaded += 1;
                    }
                    None => unnumbered.push(data),
                }
            }
            for data in unnumbered {
                store.create(category, data)?;
                loaded += 1;
            }
        }
        Ok(loaded)
    }
}

fn take_id(entry: &mut Value) -> Result<Option<RecordId>, StoreError> {
    let Some(obj) = entry.as_object_mut() else {
        return Err(StoreError::Validation(
            "fixture entries must be mappings".to_string(),
        ));
    };
    match obj.remove("id") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_u64().map(|v| Some(RecordId(v))).ok_or_else(|| {
            StoreError::Validation(format!("fixture id must be a non-negative integer, got {n}"))
        }),
        Some(other) => Err(StoreError::Validation(format!(
            "fixture id must be a non-negative integer, got {other}"
        ))),
    }
}
