//! # Service Configuration
//!
//! Read from environment variables at startup:
//!
//! | Variable                 | Default             |
//! |--------------------------|---------------------|
//! | `PORT`                   | `8080`              |
//! | `DOCKET_FIXTURES`        | built-in register   |
//! | `DOCKET_MARKERS_PATH`    | in-memory markers   |
//! | `DOCKET_ADMIN_EMAIL`     | `admin@example.com` |
//! | `DOCKET_METRICS_ENABLED` | `true`              |

use std::path::PathBuf;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default recipient of alert messages.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

/// Runtime configuration of the API service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind on all interfaces.
    pub port: u16,
    /// Fixture document to load; the built-in register when `None`.
    pub fixtures: Option<PathBuf>,
    /// JSON file holding the daily scan marker; kept in memory when `None`.
    pub markers_path: Option<PathBuf>,
    /// Recipient of alert messages.
    pub admin_email: String,
    /// Whether `/metrics` is served.
    pub metrics_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            fixtures: None,
            markers_path: None,
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            metrics_enabled: true,
        }
    }
}

impl AppConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "PORT is not a valid port, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let admin_email = match lookup("DOCKET_ADMIN_EMAIL").filter(|v| !v.trim().is_empty()) {
            Some(email) => email.trim().to_string(),
            None => {
                tracing::warn!("DOCKET_ADMIN_EMAIL not set, alerts go to {DEFAULT_ADMIN_EMAIL}");
                defaults.admin_email
            }
        };

        Self {
            port,
            fixtures: path_var(&lookup, "DOCKET_FIXTURES"),
            markers_path: path_var(&lookup, "DOCKET_MARKERS_PATH"),
            admin_email,
            metrics_enabled: lookup("DOCKET_METRICS_ENABLED")
                .map(|v| v.trim().to_lowercase() != "false")
                .unwrap_or(true),
        }
    }
}

fn path_var<F>(lookup: &F, key: &str) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
