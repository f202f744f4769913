//! synth.rs: deterministic placeholder metrics for places outside the catalog.
//!
//! Everything is derived from the length of the trimmed name. The status and
//! score are picked from the seed directly and do not go through
//! [`crate::scoring`].

use crate::location::{normalize_query, Location};
use crate::status::Status;

/// Seed-derived status and score for a name.
pub fn synthetic_assessment(seed: u32) -> (Status, u8) {
    match seed % 3 {
        0 => (Status::Critical, (80 + seed % 20) as u8),
        1 => (Status::Strained, (50 + seed % 20) as u8),
        _ => (Status::Safe, (20 + seed % 10) as u8),
    }
}

/// Seed used for `name`: character count after trimming. Case folding can
/// change the count (`İ` lowercases to two chars), so it is not applied here.
pub fn seed_for(name: &str) -> u32 {
    name.trim().chars().count() as u32
}

/// Fabricate a plausible location for `name`. Total and pure.
pub fn synthesize(name: &str) -> Location {
    let normalized = normalize_query(name);
    let seed = seed_for(name);
    let (status, stress_score) = synthetic_assessment(seed);
    let s = f64::from(seed);
    let m = |mul: u32, modulo: u32| f64::from(seed.wrapping_mul(mul) % modulo);

    Location {
        id: format!("custom-{normalized}"),
        name: capitalize(&normalized),
        lat: 30.0 + m(5, 30),
        lng: -100.0 + m(10, 100),
        temperature: 20.0 + m(2, 25),
        humidity: 40.0 + m(5, 50),
        aqi: 30.0 + m(10, 150),
        co2_indoor: 400.0 + m(50, 1000),
        energy_demand: 2.0 + (s % 8.0),
        heat_index: 22.0 + m(2, 20),
        recovery_index: 100.0 - m(5, 80),
        status,
        stress_score,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
