//! # Record Identifiers
//!
//! Records are keyed by a small integer [`RecordId`], unique within a
//! collection. New records receive identifiers from an [`IdGenerator`],
//! which only ever moves forward: an identifier freed by a delete is never
//! handed out again.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Identifier of a record within its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    /// The raw integer.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Monotonic source of fresh record identifiers.
#[derive(Debug)]
pub struct IdGenerator {
    /// Highest identifier handed out or observed so far; 0 when none.
    high_water: AtomicU64,
}

impl IdGenerator {
    /// A generator whose first identifier is 1.
    pub fn new() -> Self {
        Self {
            high_water: AtomicU64::new(0),
        }
    }

    /// Hand out the next identifier, or `None` once `u64::MAX` is taken.
    pub fn next_id(&self) -> Option<RecordId> {
        self.high_water
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
                last.checked_add(1)
            })
            .ok()
            .map(|last| RecordId(last + 1))
    }

    /// Record that `id` is in use so it is never generated.
    pub fn observe(&self, id: RecordId) {
        self.high_water.fetch_max(id.0, Ordering::Relaxed);
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
