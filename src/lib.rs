// src/lib.rs
// Public library surface for the service binary and integration tests.

pub mod factors;
pub mod reading;
pub mod scoring;
pub mod status;

// Live-weather variant and its upstream collaborator
pub mod live;
pub mod weather;

// Locations, synthetic placeholders, day segmentation
pub mod location;
pub mod synth;
pub mod timeline;

// Service plumbing
pub mod api;
pub mod config;
pub mod history;
pub mod metrics;
pub mod snapshot;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::factors::{normalize, FactorKey, FactorWeight, FACTOR_TABLE};
pub use crate::live::{
    assess_live, classify_from_live_factors, compute_live_stress_score, LiveAssessment, LiveScore,
};
pub use crate::reading::{EnvironmentalReading, LiveReading};
pub use crate::scoring::{assess, classify_from_score, compute_stress_score, StressAssessment};
pub use crate::snapshot::StatusSnapshot;
pub use crate::status::Status;
pub use crate::synth::synthesize;
