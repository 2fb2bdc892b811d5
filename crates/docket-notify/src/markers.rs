//! # Scan Markers
//!
//! The durable, process-wide `lastScanDate` marker. The daily check is a
//! single atomic read-modify-write ([`MarkerStore::claim_scan`]): of any
//! number of concurrent session starts on one calendar day, exactly one
//! claims the scan.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use docket_core::CalendarDate;

use crate::error::NotifyError;

/// Storage for the last scan date.
pub trait MarkerStore: Send + Sync {
    /// The day of the last completed scan, if any.
    fn last_scan_date(&self) -> Result<Option<CalendarDate>, NotifyError>;

    /// Atomically claim today's scan.
    ///
    /// Returns `true` and records `today` when the last scan was on another
    /// day (or never happened); returns `false` when today has already been
    /// claimed.
    fn claim_scan(&self, today: CalendarDate) -> Result<bool, NotifyError>;
}

/// Markers held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryMarkers {
    last_scan: Mutex<Option<CalendarDate>>,
}

impl InMemoryMarkers {
    /// Empty markers: no scan has happened yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers that record a scan on `date`.
    pub fn scanned_on(date: CalendarDate) -> Self {
        Self {
            last_scan: Mutex::new(Some(date)),
        }
    }
}

impl MarkerStore for InMemoryMarkers {
    fn last_scan_date(&self) -> Result<Option<CalendarDate>, NotifyError> {
        Ok(*self.last_scan.lock())
    }

    fn claim_scan(&self, today: CalendarDate) -> Result<bool, NotifyError> {
        let mut last = self.last_scan.lock();
        if *last == Some(today) {
            return Ok(false);
        }
        *last = Some(today);
        Ok(true)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkerFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_scan_date: Option<CalendarDate>,
}

/// Markers persisted as a small JSON document.
///
/// A missing file means no scan has happened. Writes go to a sibling
/// temporary file that is then renamed over the marker file.
#[derive(Debug)]
pub struct FileMarkers {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileMarkers {
    /// Markers stored at `path`. The file is created on the first claim.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Marker file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<MarkerFile, NotifyError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(MarkerFile::default()),
            Err(source) => {
                return Err(NotifyError::MarkerIo {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if text.trim().is_empty() {
            return Ok(MarkerFile::default());
        }
        serde_json::from_str(&text).map_err(|source| NotifyError::MarkerFormat {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, markers: &MarkerFile) -> Result<(), NotifyError> {
        let io_err = |source| NotifyError::MarkerIo {
            path: self.path.clone(),
            source,
        };
        let json = serde_json::to_vec_pretty(markers).map_err(|source| NotifyError::MarkerFormat {
            path: self.path.clone(),
            source,
        })?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl MarkerStore for FileMarkers {
    fn last_scan_date(&self) -> Result<Option<CalendarDate>, NotifyError> {
        let _guard = self.lock.lock();
        Ok(self.read()?.last_scan_date)
    }

    fn claim_scan(&self, today: CalendarDate) -> Result<bool, NotifyError> {
        let _guard = self.lock.lock();
        let mut markers = self.read()?;
        if markers.last_scan_date == Some(today) {
            return Ok(false);
        }
        markers.last_scan_date = Some(today);
        self.write(&markers)?;
        tracing::debug!(path = %self.path.display(), %today, "recorded scan marker");
        Ok(true)
    }
}

impl<T: MarkerStore + ?Sized> MarkerStore for std::sync::Arc<T> {
    fn last_scan_date(&self) -> Result<Option<CalendarDate>, NotifyError> {
        (**self).last_scan_date()
    }

    fn claim_scan(&self, today: CalendarDate) -> Result<bool, NotifyError> {
        (**self).claim_scan(today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn day(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn memory_claim_is_once_per_day() {
        let markers = InMemoryMarkers::new();
        assert_eq!(markers.last_scan_date().unwrap(), None);
        assert!(markers.claim_scan(day("2024-06-01")).unwrap());
        assert!(!markers.claim_scan(day("2024-06-01")).unwrap());
        assert!(markers.claim_scan(day("2024-06-02")).unwrap());
        assert_eq!(markers.last_scan_date().unwrap(), Some(day("2024-06-02")));
    }

    #[test]
    fn concurrent_claims_yield_one_winner() {
        let markers = Arc::new(InMemoryMarkers::new());
        let today = day("2024-06-01");
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let m = Arc::clone(&markers);
                std::thread::spawn(move || m.claim_scan(today).unwrap())
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }

    #[test]
    fn file_markers_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("markers.json");
        let first = FileMarkers::new(&path);
        assert_eq!(first.last_scan_date().unwrap(), None);
        assert!(first.claim_scan(day("2024-06-01")).unwrap());

        let second = FileMarkers::new(&path);
        assert_eq!(second.last_scan_date().unwrap(), Some(day("2024-06-01")));
        assert!(!second.claim_scan(day("2024-06-01")).unwrap());

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"lastScanDate\": \"2024-06-01\""));
    }

    #[test]
    fn malformed_marker_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("markers.json");
        std::fs::write(&path, "{ not json").unwrap();
        let markers = FileMarkers::new(&path);
        assert!(matches!(
            markers.claim_scan(day("2024-06-01")),
            Err(NotifyError::MarkerFormat { .. })
        ));
    }

    #[test]
    fn empty_marker_file_means_never_scanned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("markers.json");
        std::fs::write(&path, "").unwrap();
        assert_eq!(FileMarkers::new(&path).last_scan_date().unwrap(), None);
    }
}
