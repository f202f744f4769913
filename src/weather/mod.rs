//! Weather collaborator: provider abstraction, error type and the mapping from
//! fetched conditions onto a live [`Location`].
//!
//! Upstream failures are returned as-is. The only degradation allowed is the
//! display name, which falls back to [`FALLBACK_LOCATION_NAME`] when reverse
//! geocoding fails; a reading is never substituted.

pub mod open_meteo;

use async_trait::async_trait;

use crate::live::assess_live;
use crate::location::Location;
use crate::reading::LiveReading;

pub use open_meteo::OpenMeteoProvider;

pub const FALLBACK_LOCATION_NAME: &str = "Current Location";
pub const LIVE_LOCATION_ID: &str = "gps-location";
/// Indoor CO2 cannot be measured from a weather feed.
pub const LIVE_CO2_PLACEHOLDER: f64 = 450.0;
pub const LIVE_ENERGY_PLACEHOLDER: f64 = 3.5;

/// Weather/geocoding errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Transport-level failure (DNS, TLS, timeout, body read)
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },

    /// Forward geocoding produced no result
    #[error("city not found: {0}")]
    CityNotFound(String),

    /// Upstream body did not have the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("invalid coordinates: lat={lat}, lng={lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },
}

/// Current conditions needed from the forecast endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub humidity: f64,
    pub apparent_temperature: f64,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Conditions + AQI + place name at a coordinate, scored with the live variant.
    async fn fetch_weather(&self, lat: f64, lng: f64) -> Result<Location, WeatherError>;

    /// Forward-geocode `query`, then [`WeatherProvider::fetch_weather`] at the first hit.
    async fn search_city(&self, query: &str) -> Result<Location, WeatherError>;

    /// Short label used in metric labels and logs.
    fn name(&self) -> &'static str;
}

pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), WeatherError> {
    if lat.is_finite() && lng.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
    {
        Ok(())
    } else {
        Err(WeatherError::InvalidCoordinates { lat, lng })
    }
}

/// Build the live location card from fetched values.
pub fn build_live_location(
    lat: f64,
    lng: f64,
    current: CurrentConditions,
    aqi: f64,
    place_name: Option<String>,
) -> Location {
    let assessed = assess_live(&LiveReading::new(aqi, current.apparent_temperature));
    Location {
        id: LIVE_LOCATION_ID.to_string(),
        name: place_name.unwrap_or_else(|| FALLBACK_LOCATION_NAME.to_string()),
        lat,
        lng,
        temperature: current.temperature,
        humidity: current.humidity,
        aqi,
        co2_indoor: LIVE_CO2_PLACEHOLDER,
        energy_demand: LIVE_ENERGY_PLACEHOLDER,
        heat_index: current.apparent_temperature,
        recovery_index: f64::from(assessed.recovery_index),
        status: assessed.status,
        stress_score: assessed.score,
    }
}

/// Id for a searched city: `search-` + lowercased query, whitespace runs → `-`.
pub fn search_id(query: &str) -> String {
    let slug = query
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("search-{slug}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Status;

    fn conditions(apparent: f64) -> CurrentConditions {
        CurrentConditions {
            temperature: 31.0,
            humidity: 70.0,
            apparent_temperature: apparent,
        }
    }

    #[test]
    fn live_location_uses_live_policy_and_placeholders() {
        let loc = build_live_location(48.85, 2.35, conditions(36.0), 90.0, Some("Paris".into()));
        // 90/3 + 36*1.5 - 20 = 64
        assert_eq!(loc.stress_score, 64);
        assert_eq!(loc.recovery_index, 36.0);
        assert_eq!(loc.status, Status::Strained);
        assert_eq!(loc.heat_index, 36.0);
        assert_eq!(loc.co2_indoor, LIVE_CO2_PLACEHOLDER);
        assert_eq!(loc.energy_demand, LIVE_ENERGY_PLACEHOLDER);
        assert_eq!(loc.id, LIVE_LOCATION_ID);
    }

    #[test]
    fn missing_place_name_degrades_to_placeholder() {
        let loc = build_live_location(0.0, 0.0, conditions(20.0), 10.0, None);
        assert_eq!(loc.name, FALLBACK_LOCATION_NAME);
        assert_eq!(loc.status, Status::Safe);
    }

    #[test]
    fn search_ids_are_slugged() {
        assert_eq!(search_id("New  York"), "search-new-york");
        assert_eq!(search_id("Oslo"), "search-oslo");
    }

    #[test]
    fn coordinate_validation() {
        assert!(validate_coordinates(28.6, 77.2).is_ok());
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.5).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }
}
