//! location.rs: per-location metrics plus the bundled catalog.
//!
//! Catalog scores are hand-authored display values, not outputs of
//! [`crate::scoring`]; treat them as illustrative only.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::status::Status;
use crate::synth::synthesize;

/// Metrics shown for one place on the map and location cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub aqi: f64,
    pub co2_indoor: f64,
    pub energy_demand: f64,
    pub heat_index: f64,
    pub recovery_index: f64,
    pub status: Status,
    pub stress_score: u8,
}

static CATALOG: Lazy<Vec<Location>> = Lazy::new(|| {
    #[allow(clippy::too_many_arguments)]
    fn loc(
        id: &str,
        name: &str,
        (lat, lng): (f64, f64),
        (temperature, humidity, aqi, co2_indoor, energy_demand): (f64, f64, f64, f64, f64),
        heat_index: f64,
        recovery_index: f64,
        status: Status,
        stress_score: u8,
    ) -> Location {
        Location {
            id: id.to_string(),
            name: name.to_string(),
            lat,
            lng,
            temperature,
            humidity,
            aqi,
            co2_indoor,
            energy_demand,
            heat_index,
            recovery_index,
            status,
            stress_score,
        }
    }

    vec![
        loc(
            "local",
            "New Delhi, India",
            (28.6139, 77.2090),
            (34.2, 78.0, 187.0, 1240.0, 6.8),
            41.0,
            38.0,
            Status::Critical,
            78,
        ),
        loc(
            "nyc",
            "New York, USA",
            (40.7128, -74.0060),
            (24.5, 45.0, 42.0, 450.0, 4.2),
            26.0,
            85.0,
            Status::Safe,
            24,
        ),
        loc(
            "tokyo",
            "Tokyo, Japan",
            (35.6762, 139.6503),
            (29.8, 82.0, 110.0, 900.0, 8.5),
            35.0,
            45.0,
            Status::Strained,
            65,
        ),
        loc(
            "mumbai",
            "Mumbai, India",
            (19.0760, 72.8777),
            (31.5, 88.0, 156.0, 1100.0, 7.2),
            43.0,
            30.0,
            Status::Critical,
            88,
        ),
        loc(
            "london",
            "London, UK",
            (51.5074, -0.1278),
            (18.2, 60.0, 35.0, 500.0, 3.8),
            18.0,
            92.0,
            Status::Safe,
            15,
        ),
    ]
});

/// Bundled fixture locations, in display order.
pub fn catalog() -> &'static [Location] {
    &CATALOG
}

/// Catalog entry by id; unknown ids fall back to the first entry.
pub fn get_location(id: &str) -> Location {
    CATALOG
        .iter()
        .find(|l| l.id == id)
        .unwrap_or(&CATALOG[0])
        .clone()
}

/// Trimmed, lowercased lookup key.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Exact id or case-insensitive name substring; anything else is synthesized.
pub fn search_location(query: &str) -> Location {
    let q = normalize_query(query);
    CATALOG
        .iter()
        .find(|l| l.id == q || l.name.to_lowercase().contains(&q))
        .cloned()
        .unwrap_or_else(|| synthesize(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_falls_back_to_first() {
        assert_eq!(get_location("tokyo").name, "Tokyo, Japan");
        assert_eq!(get_location("atlantis").id, "local");
    }

    #[test]
    fn search_matches_id_and_name_substring() {
        assert_eq!(search_location("NYC").id, "nyc");
        assert_eq!(search_location("  mumbai ").id, "mumbai");
        assert_eq!(search_location("japan").id, "tokyo");
        assert_eq!(search_location("Delhi").id, "local");
    }

    #[test]
    fn search_synthesizes_unknown_places() {
        let l = search_location("Paris");
        assert_eq!(l.id, "custom-paris");
        assert_eq!(l.status, Status::Safe);
        assert_eq!(l.stress_score, 25);
    }
}
