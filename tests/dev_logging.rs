// tests/dev_logging.rs
//
// The default dev filter must let the library's own info events through.
// Kept as a single test: the subscriber is scoped with `with_default`.

use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use climate_stress::api::AppState;
use climate_stress::config::{WeatherConfig, DEV_LOG_FILTER};
use climate_stress::weather::OpenMeteoProvider;
use climate_stress::{compute_stress_score, EnvironmentalReading};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn dev_filter_keeps_library_info_events() {
    let out = Captured::default();
    let writer = out.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(DEV_LOG_FILTER))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let provider = OpenMeteoProvider::new(WeatherConfig::default()).unwrap();
        let _state = AppState::new(
            Arc::new(provider),
            EnvironmentalReading::dashboard_baseline(),
            10,
        );
        // debug-level scoring detail stays below the default level
        compute_stress_score(&EnvironmentalReading::dashboard_baseline());
        tracing::debug!(target: "scoring", "hidden");
        tracing::warn!(target: "some_dependency", "dependency warning");
        tracing::info!(target: "some_dependency", "dependency chatter");
    });

    let text = out.text();
    assert!(
        text.contains("INFO snapshot: initial status snapshot captured"),
        "missing snapshot event:\n{text}"
    );
    assert!(text.contains("dependency warning"), "{text}");
    assert!(!text.contains("dependency chatter"), "{text}");
    assert!(!text.contains("hidden"), "{text}");
}
