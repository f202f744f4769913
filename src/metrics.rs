use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the process-wide Prometheus recorder and describe our series.
    /// Call once per process.
    pub fn init() -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;

        describe_counter!(
            "stress_assessments_total",
            "Assessments served, labelled by resulting status."
        );
        describe_counter!(
            "weather_fetch_errors_total",
            "Failed weather/geocoding lookups."
        );
        describe_histogram!("weather_fetch_ms", "Weather fetch latency in milliseconds.");

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
