//! Open-Meteo (forecast + air quality) and Nominatim (geocoding) provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{
    build_live_location, search_id, validate_coordinates, CurrentConditions, WeatherError,
    WeatherProvider,
};
use crate::config::WeatherConfig;
use crate::location::Location;

const FORECAST_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,weather_code,wind_speed_10m";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: ForecastCurrent,
}

#[derive(Debug, Deserialize)]
struct ForecastCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    current: AirQualityCurrent,
}

#[derive(Debug, Deserialize)]
struct AirQualityCurrent {
    us_aqi: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Address>,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    county: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: String,
}

pub(crate) fn parse_forecast(body: &str) -> Result<CurrentConditions, WeatherError> {
    let r: ForecastResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Decode(format!("forecast: {e}")))?;
    Ok(CurrentConditions {
        temperature: r.current.temperature_2m,
        humidity: r.current.relative_humidity_2m,
        apparent_temperature: r.current.apparent_temperature,
    })
}

pub(crate) fn parse_air_quality(body: &str) -> Result<f64, WeatherError> {
    let r: AirQualityResponse = serde_json::from_str(body)
        .map_err(|e| WeatherError::Decode(format!("air quality: {e}")))?;
    r.current
        .us_aqi
        .ok_or_else(|| WeatherError::Decode("air quality: us_aqi is null".to_string()))
}

/// City → town → village → county; `None` when nothing usable is present.
pub(crate) fn parse_reverse_geocode(body: &str) -> Option<String> {
    let r: ReverseResponse = serde_json::from_str(body).ok()?;
    let a = r.address?;
    [a.city, a.town, a.village, a.county]
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

/// First search hit as `(lat, lng, short name)`.
pub(crate) fn parse_search(body: &str, query: &str) -> Result<(f64, f64, String), WeatherError> {
    let hits: Vec<SearchHit> =
        serde_json::from_str(body).map_err(|e| WeatherError::Decode(format!("search: {e}")))?;
    let hit = hits
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::CityNotFound(query.to_string()))?;
    let lat = hit
        .lat
        .trim()
        .parse::<f64>()
        .map_err(|e| WeatherError::Decode(format!("search lat {:?}: {e}", hit.lat)))?;
    let lng = hit
        .lon
        .trim()
        .parse::<f64>()
        .map_err(|e| WeatherError::Decode(format!("search lon {:?}: {e}", hit.lon)))?;
    let name = hit
        .display_name
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    Ok((lat, lng, name))
}

pub struct OpenMeteoProvider {
    http: reqwest::Client,
    cfg: WeatherConfig,
}

impl OpenMeteoProvider {
    pub fn new(cfg: WeatherConfig) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self { http, cfg })
    }

    async fn get_text(
        &self,
        service: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<String, WeatherError> {
        debug!(target: "weather", service, url, "GET");
        let resp = self.http.get(url).query(query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(WeatherError::Status {
                service,
                status: status.as_u16(),
            });
        }
        Ok(resp.text().await?)
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn fetch_weather(&self, lat: f64, lng: f64) -> Result<Location, WeatherError> {
        validate_coordinates(lat, lng)?;
        let (lat_s, lng_s) = (lat.to_string(), lng.to_string());

        let forecast_q = [
            ("latitude", lat_s.clone()),
            ("longitude", lng_s.clone()),
            ("current", FORECAST_FIELDS.to_string()),
        ];
        let air_q = [
            ("latitude", lat_s.clone()),
            ("longitude", lng_s.clone()),
            ("current", "us_aqi".to_string()),
        ];
        let geo_q = [
            ("format", "json".to_string()),
            ("lat", lat_s),
            ("lon", lng_s),
        ];

        let (forecast, air, geo) = tokio::join!(
            self.get_text("forecast", &self.cfg.forecast_url, &forecast_q),
            self.get_text("air-quality", &self.cfg.air_quality_url, &air_q),
            self.get_text("reverse-geocode", &self.cfg.reverse_geocode_url, &geo_q),
        );

        let current = parse_forecast(&forecast?)?;
        let aqi = parse_air_quality(&air?)?;
        let name = match geo {
            Ok(body) => parse_reverse_geocode(&body),
            Err(e) => {
                warn!(target: "weather", error = %e, "reverse geocoding failed, using placeholder name");
                None
            }
        };

        Ok(build_live_location(lat, lng, current, aqi, name))
    }

    async fn search_city(&self, query: &str) -> Result<Location, WeatherError> {
        let q = [
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("limit", "1".to_string()),
        ];
        let body = self.get_text("search", &self.cfg.search_url, &q).await?;
        let (lat, lng, name) = parse_search(&body, query)?;
        let loc = self.fetch_weather(lat, lng).await?;
        Ok(Location {
            id: search_id(query),
            name,
            ..loc
        })
    }

    fn name(&self) -> &'static str {
        "open-meteo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_fixture_decodes() {
        let body = r#"{
            "latitude": 28.625, "longitude": 77.25,
            "current": {
                "time": "2025-06-01T12:00", "interval": 900,
                "temperature_2m": 38.4, "relative_humidity_2m": 41,
                "apparent_temperature": 42.1, "precipitation": 0.0,
                "weather_code": 1, "wind_speed_10m": 9.7
            }
        }"#;
        let c = parse_forecast(body).unwrap();
        assert_eq!(c.temperature, 38.4);
        assert_eq!(c.humidity, 41.0);
        assert_eq!(c.apparent_temperature, 42.1);
    }

    #[test]
    fn air_quality_null_is_an_error() {
        assert_eq!(
            parse_air_quality(r#"{"current":{"time":"x","us_aqi":162}}"#).unwrap(),
            162.0
        );
        let err = parse_air_quality(r#"{"current":{"us_aqi":null}}"#).unwrap_err();
        assert!(matches!(err, WeatherError::Decode(_)));
    }

    #[test]
    fn reverse_geocode_name_order() {
        assert_eq!(
            parse_reverse_geocode(r#"{"address":{"town":"Gurgaon","county":"Haryana"}}"#),
            Some("Gurgaon".to_string())
        );
        assert_eq!(
            parse_reverse_geocode(r#"{"address":{"city":"Delhi","town":"x"}}"#),
            Some("Delhi".to_string())
        );
        assert_eq!(parse_reverse_geocode(r#"{"error":"Unable to geocode"}"#), None);
        assert_eq!(parse_reverse_geocode("not json"), None);
    }

    #[test]
    fn search_hits_and_misses() {
        let body = r#"[{"lat":"48.8588897","lon":"2.3200410","display_name":"Paris, Île-de-France, France"}]"#;
        let (lat, lng, name) = parse_search(body, "paris").unwrap();
        assert!((lat - 48.8588897).abs() < 1e-9);
        assert!((lng - 2.320041).abs() < 1e-9);
        assert_eq!(name, "Paris");

        let err = parse_search("[]", "Nowhereville").unwrap_err();
        assert!(matches!(err, WeatherError::CityNotFound(q) if q == "Nowhereville"));
    }
}
