// tests/metrics.rs
//
// The Prometheus recorder is process-global, so everything lives in one test.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use climate_stress::api::{self, AppState};
use climate_stress::location::Location;
use climate_stress::metrics::Metrics;
use climate_stress::weather::{WeatherError, WeatherProvider};
use climate_stress::EnvironmentalReading;

struct DownWeather;

#[async_trait]
impl WeatherProvider for DownWeather {
    async fn fetch_weather(&self, _lat: f64, _lng: f64) -> Result<Location, WeatherError> {
        Err(WeatherError::Status {
            service: "forecast",
            status: 503,
        })
    }

    async fn search_city(&self, query: &str) -> Result<Location, WeatherError> {
        Err(WeatherError::CityNotFound(query.to_string()))
    }

    fn name(&self) -> &'static str {
        "down"
    }
}

async fn status_of(app: &Router, req: Request<Body>) -> StatusCode {
    app.clone().oneshot(req).await.unwrap().status()
}

#[tokio::test]
async fn metrics_endpoint_exposes_assessment_and_weather_series() {
    let metrics = Metrics::init().expect("install recorder");
    let state = AppState::new(
        Arc::new(DownWeather),
        EnvironmentalReading::dashboard_baseline(),
        10,
    );
    let app = api::router(state).merge(metrics.router());

    let assess = Request::post("/assess")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"temperature":34.2,"humidity":78,"aqi":87,"co2_indoor":1240,"energy_demand":6.8,"night_cooling":22}"#,
        ))
        .unwrap();
    assert_eq!(status_of(&app, assess).await, StatusCode::OK);

    let weather = Request::get("/weather?lat=28.6&lng=77.2")
        .body(Body::empty())
        .unwrap();
    assert_eq!(status_of(&app, weather).await, StatusCode::BAD_GATEWAY);

    let resp = app
        .clone()
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    for needle in [
        "stress_assessments_total",
        r#"status="strained""#,
        "weather_fetch_errors_total",
        r#"provider="down""#,
        "weather_fetch_ms",
    ] {
        assert!(
            text.contains(needle),
            "metrics exposition missing '{needle}'\n{text}"
        );
    }
}
