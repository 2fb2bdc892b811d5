//! # Daily Expiry Check
//!
//! `docket scan` runs the session-start check against a JSON marker file.
//! Only the first run on a calendar day scans; it prints the records that
//! expire within the next 90 days and the composed alert message. Later
//! runs on the same day print nothing to act on.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use docket_notify::{
    alert_line, dispatch, AlertMessage, FileMarkers, LogSender, MarkerStore, NotificationSender,
    Scanner, SCAN_HORIZON_DAYS,
};
use docket_store::Registry;

/// Arguments of `docket scan`.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// JSON file holding the last scan date; created on first use.
    #[arg(long)]
    pub markers: PathBuf,

    /// Send the alert message to this address.
    #[arg(long)]
    pub recipient: Option<String>,
}

/// Execute `docket scan`, delivering through the logging sender.
pub fn run_scan(args: &ScanArgs, registry: &Registry, out: &mut dyn Write) -> Result<u8> {
    run_scan_with(args, registry, &LogSender, out)
}

/// Execute `docket scan` with an explicit sender.
pub fn run_scan_with(
    args: &ScanArgs,
    registry: &Registry,
    sender: &dyn NotificationSender,
    out: &mut dyn Write,
) -> Result<u8> {
    let today = registry.today();
    let scanner = Scanner::new(FileMarkers::new(&args.markers));
    let marker_path = args.markers.display();

    let already_done = scanner
        .markers()
        .last_scan_date()
        .with_context(|| format!("reading scan marker {marker_path}"))?
        == Some(today);

    let session = scanner
        .start_session(today, || registry.trackable_records())
        .with_context(|| format!("claiming scan marker {marker_path}"))?;

    if session.alerts().is_empty() {
        if already_done {
            writeln!(out, "The daily check for {today} has already run.")?;
        } else {
            writeln!(out, "No records expire within the next {SCAN_HORIZON_DAYS} days.")?;
        }
        return Ok(0);
    }

    writeln!(
        out,
        "{} record(s) expire within the next {SCAN_HORIZON_DAYS} days:",
        session.alerts().len()
    )?;
    for alert in session.alerts() {
        writeln!(out, "{}", alert_line(alert))?;
    }

    let message = AlertMessage::compose(session.alerts());
    writeln!(out)?;
    writeln!(out, "Subject: {}", message.subject)?;
    writeln!(out)?;
    writeln!(out, "{}", message.body)?;

    if let Some(recipient) = &args.recipient {
        writeln!(out)?;
        writeln!(out, "{}", message.mailto(recipient))?;
        if dispatch(sender, recipient, &message) {
            writeln!(out, "Sent to {recipient}.")?;
        } else {
            writeln!(out, "Sending to {recipient} failed; the alerts are listed above.")?;
        }
    }
    Ok(0)
}
