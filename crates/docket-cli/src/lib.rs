//! # docket-cli — Compliance Register Command-Line Interface
//!
//! A clap-based front end over the same crates the API serves.
//!
//! ## Subcommands
//!
//! - `status` — every trackable record with its derived status
//! - `records` — the unified view, filtered and sorted
//! - `dashboard` — counts, compliance rate, costs and expiry timeline
//! - `scan` — the daily expiry check against a JSON marker file
//!
//! Every subcommand reads the register from `--data` (the built-in register
//! when omitted) and evaluates it for `--today` (the system date when
//! omitted).
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions write to a caller-supplied sink and return an exit
//!   code; they never print directly.

pub mod context;
pub mod dashboard;
pub mod records;
pub mod scan;
pub mod status;
pub mod table;
