//! # Application State
//!
//! Shared state handed to every route handler: the record registry, the
//! daily-check scanner and its marker store, live sessions, the
//! notification sender and the optional Prometheus handle.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use docket_core::{Clock, SystemClock};
use docket_notify::{
    FileMarkers, InMemoryMarkers, LogSender, MarkerStore, NotificationSender, Scanner,
    SessionRegistry,
};
use docket_store::{Fixtures, Registry, StoreError};

use crate::config::AppConfig;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Records with read-time derivation.
    pub registry: Registry,
    /// Once-per-day expiry check.
    pub scanner: Arc<Scanner<Arc<dyn MarkerStore>>>,
    /// Live sessions and their banners.
    pub sessions: Arc<SessionRegistry>,
    /// Delivery of alert messages.
    pub sender: Arc<dyn NotificationSender>,
    /// Recipient of alert messages.
    pub admin_email: Arc<str>,
    /// Prometheus render handle, present when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("registry", &self.registry)
            .field("sessions", &self.sessions.len())
            .field("admin_email", &self.admin_email)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Assemble state from its parts. Metrics start disabled.
    pub fn new(
        registry: Registry,
        markers: Arc<dyn MarkerStore>,
        sender: Arc<dyn NotificationSender>,
        admin_email: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            scanner: Arc::new(Scanner::new(markers)),
            sessions: Arc::new(SessionRegistry::new()),
            sender,
            admin_email: Arc::from(admin_email.into()),
            metrics: None,
        }
    }

    /// Build state from configuration, reading the wall clock for today.
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        Self::from_config_with_clock(config, Arc::new(SystemClock))
    }

    /// Build state from configuration with an explicit clock.
    pub fn from_config_with_clock(
        config: &AppConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StoreError> {
        let fixtures = match &config.fixtures {
            Some(path) => Fixtures::load(path)?,
            None => Fixtures::seed()?,
        };
        let registry = Registry::in_memory(fixtures, clock)?;

        let markers: Arc<dyn MarkerStore> = match &config.markers_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "scan markers persisted to file");
                Arc::new(FileMarkers::new(path.clone()))
            }
            None => {
                tracing::warn!("DOCKET_MARKERS_PATH not set, scan markers kept in memory");
                Arc::new(InMemoryMarkers::new())
            }
        };

        Ok(Self::new(
            registry,
            markers,
            Arc::new(LogSender),
            config.admin_email.clone(),
        ))
    }

    /// Attach a Prometheus handle; `/metrics` is served when present.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
