//! Climate Stress Service: Binary Entrypoint
//! Boots the Axum HTTP server, wiring config, shared state, metrics and routes.

use anyhow::Context;
use shuttle_axum::ShuttleAxum;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use climate_stress::api::{self, AppState};
use climate_stress::config::{EngineConfig, DEV_LOG_FILTER};
use climate_stress::metrics::Metrics;

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - CLIMATE_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("CLIMATE_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEV_LOG_FILTER));

    // The runtime may already have installed a subscriber; keep it in that case.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let cfg = EngineConfig::load_default().context("loading engine config")?;
    let metrics = Metrics::init()?;
    let state = AppState::from_config(&cfg).context("building app state")?;

    let router = api::router(state).merge(metrics.router());
    info!(
        history_capacity = cfg.service.history_capacity,
        "climate stress service ready"
    );

    Ok(router.into())
}
