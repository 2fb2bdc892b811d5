//! # docket-store — Record Storage and the Registry Service
//!
//! - **Store** (`store.rs`): the `RecordStore` trait and the in-memory
//!   `MemoryStore`.
//! - **Fixtures** (`fixtures.rs`): YAML/JSON register documents and the
//!   built-in demonstration register.
//! - **Registry** (`registry.rs`): store access with statuses derived on
//!   every read and after every write, plus the unified view, dashboard
//!   and export built on `docket-table`.
//!
//! ## Crate Policy
//!
//! - Stores hold record bodies only. Derived fields never reach storage.
//! - Shape/category mismatches are rejected before anything is written.

pub mod error;
pub mod fixtures;
pub mod registry;
pub mod store;

pub use error::StoreError;
pub use fixtures::Fixtures;
pub use registry::{Registry, METRIC_RECORD_MUTATIONS};
pub use store::{MemoryStore, RecordStore};
