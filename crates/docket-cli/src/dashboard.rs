//! # Dashboard
//!
//! `docket dashboard` prints the headline counts, the compliance rate,
//! per-category figures and the twelve-month expiry timeline.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use docket_store::Registry;
use docket_table::format_cost;

use crate::table::render_table;

/// Arguments of `docket dashboard`.
#[derive(Args, Debug, Default)]
pub struct DashboardArgs {
    /// Print JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

/// Execute `docket dashboard`.
pub fn run_dashboard(args: &DashboardArgs, registry: &Registry, out: &mut dyn Write) -> Result<u8> {
    let stats = registry.dashboard();
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
        return Ok(0);
    }

    writeln!(out, "Dashboard as of {}", registry.today())?;
    writeln!(out)?;
    writeln!(out, "Total records:    {}", stats.total_records)?;
    writeln!(out, "Active:           {}", stats.active_count)?;
    writeln!(out, "Soon to expire:   {}", stats.soon_count)?;
    writeln!(out, "Expired:          {}", stats.expired_count)?;
    writeln!(out, "Compliance rate:  {}%", stats.compliance_rate)?;
    writeln!(out, "Total cost:       {}", format_cost(Some(stats.total_cost)))?;
    writeln!(out)?;

    let categories: Vec<Vec<String>> = stats
        .categories
        .iter()
        .map(|c| {
            vec![
                c.label.to_string(),
                c.total.to_string(),
                c.active.to_string(),
                c.soon.to_string(),
                c.expired.to_string(),
                format_cost(Some(c.cost)),
            ]
        })
        .collect();
    write!(
        out,
        "{}",
        render_table(
            &["Category", "Total", "Active", "Soon", "Expired", "Cost"],
            &categories
        )
    )?;
    writeln!(out)?;

    let timeline: Vec<Vec<String>> = stats
        .expiry_timeline
        .iter()
        .map(|b| vec![b.label.clone(), b.count.to_string(), "#".repeat(b.count)])
        .collect();
    write!(out, "{}", render_table(&["Month", "Expiring", ""], &timeline))?;
    Ok(0)
}
