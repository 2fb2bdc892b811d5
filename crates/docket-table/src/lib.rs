//! # docket-table — Unified View, Sorting, Filtering and Statistics
//!
//! Everything needed to turn stored records into table views:
//!
//! - **Normalizer** (`normalize.rs`): single-date and dual-track records
//!   into one `UnifiedRecord` shape, with a back-reference to the source.
//! - **Columns** (`column.rs`) and **sort engine** (`sort.rs`): a total,
//!   stable comparator with missing values last in both directions.
//! - **Filters** (`filter.rs`): per-view text search profiles and the
//!   unified status filter.
//! - **Views** (`view.rs`): filter-then-sort pipelines.
//! - **Statistics** (`stats.rs`) and **export** (`export.rs`).
//!
//! All operations are deterministic and side-effect free, apart from
//! `tracing` events.

pub mod column;
pub mod export;
pub mod filter;
pub mod normalize;
pub mod sort;
pub mod stats;
pub mod view;

pub use column::{Column, ColumnClass};
pub use export::{export_rows, format_cost, ExportRow};
pub use filter::{filter_rows, matches_query, Searchable, StatusFilter};
pub use normalize::{normalize, normalize_all, UnifiedRecord};
pub use sort::{compare_values, sort_rows, SortDirection, SortState, SortValue, Sortable};
pub use stats::{CategoryStats, DashboardStats, TimelineBucket, TIMELINE_MONTHS};
pub use view::ViewQuery;
