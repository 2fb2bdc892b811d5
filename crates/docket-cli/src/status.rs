//! # Status Listing
//!
//! `docket status` prints every trackable collection with the derived
//! status and remaining period of each record. Dual-track records also show
//! the state of each track.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde_json::json;

use docket_core::{ComplianceState, RecordData, TRACKED_CATEGORIES};
use docket_status::{applicable_date, DerivedRecord, UNKNOWN_LABEL};
use docket_store::Registry;
use docket_table::ViewQuery;

use crate::table::render_table;

/// Arguments of `docket status`.
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Print JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

/// Execute `docket status`.
pub fn run_status(args: &StatusArgs, registry: &Registry, out: &mut dyn Write) -> Result<u8> {
    let view = ViewQuery::default();
    let collections: Vec<_> = TRACKED_CATEGORIES
        .iter()
        .map(|&category| (category, registry.list(category, &view)))
        .collect();

    if args.json {
        let doc: Vec<_> = collections
            .iter()
            .map(|(category, records)| {
                json!({ "category": category, "label": category.label(), "records": records })
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        return Ok(0);
    }

    writeln!(out, "Status as of {}", registry.today())?;
    for (category, records) in &collections {
        writeln!(out)?;
        writeln!(out, "{} ({})", category.label(), records.len())?;
        if records.is_empty() {
            continue;
        }
        let rows: Vec<Vec<String>> = records.iter().map(status_row).collect();
        write!(
            out,
            "{}",
            render_table(
                &["Name", "No.", "Expiry", "Status", "Remaining", "Tracks"],
                &rows
            )
        )?;
    }
    Ok(0)
}

fn status_row(record: &DerivedRecord) -> Vec<String> {
    let data = &record.record.data;
    let derived = &record.derived;
    let number = match data {
        RecordData::Single(r) => r.number.clone(),
        RecordData::Dual(r) => r.number.clone(),
        RecordData::Procedure(_) => String::new(),
    };
    let tracks = match (derived.documented_status, derived.internal_status) {
        (None, None) => String::new(),
        (documented, internal) => format!(
            "documented: {} / internal: {}",
            label_or_unknown(documented),
            label_or_unknown(internal)
        ),
    };
    vec![
        data.name().to_string(),
        number,
        applicable_date(data)
            .map(ToString::to_string)
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        label_or_unknown(derived.status).to_string(),
        derived
            .remaining
            .as_ref()
            .map(|r| r.label.clone())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        tracks,
    ]
}

fn label_or_unknown(state: Option<ComplianceState>) -> &'static str {
    state.map_or(UNKNOWN_LABEL, |s| s.label())
}
