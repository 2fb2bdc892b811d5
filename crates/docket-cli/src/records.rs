//! # Unified View
//!
//! `docket records` prints every trackable record as one table, after the
//! text query, the status filter and the sort have been applied in that
//! order. `--export` prints the numbered export rows instead.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use docket_status::UNKNOWN_LABEL;
use docket_store::Registry;
use docket_table::{
    export_rows, format_cost, Column, SortDirection, SortState, StatusFilter, ViewQuery,
};

use crate::table::render_table;

/// Arguments of `docket records`.
#[derive(Args, Debug, Default)]
pub struct RecordsArgs {
    /// Column to sort by (e.g. expiryDate, status, remaining, name).
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort in descending order.
    #[arg(long)]
    pub desc: bool,

    /// Case-insensitive text filter on name, number and notes.
    #[arg(long, short)]
    pub query: Option<String>,

    /// Keep only one state: active, soonToExpire or expired.
    #[arg(long)]
    pub status: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Print export rows (serial, category, name, number, expiry date,
    /// status, remaining days, cost) as JSON.
    #[arg(long, conflicts_with = "json")]
    pub export: bool,
}

impl RecordsArgs {
    /// The view these arguments describe.
    pub fn view(&self) -> Result<ViewQuery> {
        let sort = match &self.sort {
            Some(key) => {
                let column: Column = key.parse().with_context(|| format!("--sort {key:?}"))?;
                let direction = if self.desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                SortState::new(column, direction)
            }
            None => SortState::default(),
        };
        let status: StatusFilter = match &self.status {
            Some(raw) => raw.parse().with_context(|| format!("--status {raw:?}"))?,
            None => StatusFilter::All,
        };
        Ok(ViewQuery {
            query: self.query.clone().unwrap_or_default(),
            status,
            sort,
        })
    }
}

/// Execute `docket records`.
pub fn run_records(args: &RecordsArgs, registry: &Registry, out: &mut dyn Write) -> Result<u8> {
    let view = args.view()?;
    let rows = registry.unified(&view)?;

    if args.export {
        writeln!(out, "{}", serde_json::to_string_pretty(&export_rows(&rows))?)?;
        return Ok(0);
    }
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(0);
    }

    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.category_label.to_string(),
                r.name.clone(),
                r.number.clone(),
                r.expiry_date
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
                r.status.label().to_string(),
                r.remaining.label.clone(),
                format_cost(r.display_cost),
            ]
        })
        .collect();
    write!(
        out,
        "{}",
        render_table(
            &["Category", "Name", "No.", "Expiry", "Status", "Remaining", "Cost"],
            &table
        )
    )?;
    writeln!(out, "{} record(s)", rows.len())?;
    Ok(0)
}
