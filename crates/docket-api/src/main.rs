//! # docket-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the compliance register.
//! Binds to configurable port (default 8080).

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;

use docket_api::{AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    let mut state = AppState::from_config(&config).map_err(|e| {
        tracing::error!("Register initialization failed: {e}");
        e
    })?;

    if config.metrics_enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("installing the Prometheus recorder")?;
        state = state.with_metrics(handle);
    } else {
        tracing::info!("metrics disabled");
    }

    let app = docket_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("docket API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
