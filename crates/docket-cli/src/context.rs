//! # Register Context
//!
//! Resolves the global `--data` and `--today` options into a [`Registry`].

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use docket_core::{CalendarDate, Clock, FixedClock, SystemClock};
use docket_store::{Fixtures, Registry};

/// Open the register at `data` (the built-in one when `None`), evaluated
/// for `today` (the system date when `None`).
pub fn open_registry(data: Option<&Path>, today: Option<&str>) -> Result<Registry> {
    let clock: Arc<dyn Clock> = match today {
        Some(raw) => Arc::new(FixedClock(
            CalendarDate::parse(raw).with_context(|| format!("invalid --today {raw:?}"))?,
        )),
        None => Arc::new(SystemClock),
    };

    let fixtures = match data {
        Some(path) => Fixtures::load(path)
            .with_context(|| format!("loading register from {}", path.display()))?,
        None => Fixtures::seed().context("loading the built-in register")?,
    };

    let registry = Registry::in_memory(fixtures, clock)?;
    tracing::debug!(today = %registry.today(), "register opened");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_register_on_a_fixed_day() {
        let reg = open_registry(None, Some("2024-06-01")).unwrap();
        assert_eq!(reg.today().to_iso8601(), "2024-06-01");
        assert_eq!(reg.trackable_records().len(), 19);
    }

    #[test]
    fn register_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("register.yaml");
        std::fs::write(&path, "otherTopic:\n  - name: Parking permit\n    number: P-1\n").unwrap();
        let reg = open_registry(Some(&path), Some("2024-06-01")).unwrap();
        assert_eq!(reg.trackable_records().len(), 1);
    }

    #[test]
    fn bad_inputs_are_reported() {
        let err = open_registry(None, Some("01/06/2024")).unwrap_err();
        assert!(format!("{err:#}").contains("--today"));
        let err = open_registry(Some(Path::new("/nonexistent.yaml")), None).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent.yaml"));
    }
}
