use std::sync::{Arc, RwLock};
use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::config::EngineConfig;
use crate::factors::{FactorKey, InputBounds};
use crate::history::AssessmentHistory;
use crate::live::{assess_live, LiveAssessment};
use crate::location::{catalog, get_location, search_location, Location};
use crate::reading::{EnvironmentalReading, LiveReading};
use crate::scoring::{assess, factor_breakdown, FactorContribution, StressAssessment};
use crate::snapshot::StatusSnapshot;
use crate::status::Status;
use crate::timeline::{recovery_windows, segment_day, HourlyReading, RecoveryWindow, Segment};
use crate::weather::{validate_coordinates, OpenMeteoProvider, WeatherError, WeatherProvider};

#[derive(Clone)]
pub struct AppState {
    weather: Arc<dyn WeatherProvider>,
    snapshot: Arc<RwLock<StatusSnapshot>>,
    history: Arc<AssessmentHistory>,
}

impl AppState {
    /// State with an explicit weather provider; the initial snapshot is taken from `baseline`.
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        baseline: EnvironmentalReading,
        history_capacity: usize,
    ) -> Self {
        let snap = StatusSnapshot::capture(baseline);
        let history = AssessmentHistory::with_capacity(history_capacity);
        history.push(&snap);
        info!(
            target: "snapshot",
            score = snap.assessment.score,
            status = %snap.assessment.status,
            "initial status snapshot captured"
        );
        Self {
            weather,
            snapshot: Arc::new(RwLock::new(snap)),
            history: Arc::new(history),
        }
    }

    /// Production state: Open-Meteo provider built from config.
    pub fn from_config(cfg: &EngineConfig) -> anyhow::Result<Self> {
        let provider = OpenMeteoProvider::new(cfg.weather.clone())?;
        Ok(Self::new(
            Arc::new(provider),
            cfg.service.baseline,
            cfg.service.history_capacity,
        ))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/factors", get(list_factors))
        .route("/assess", post(assess_reading))
        .route("/classify", get(classify_score))
        .route("/live/assess", post(assess_live_reading))
        .route("/locations", get(list_locations))
        .route("/locations/search", get(search_locations))
        .route("/locations/{id}", get(location_by_id))
        .route("/weather", get(weather_at))
        .route("/weather/search", get(weather_search))
        .route("/snapshot", get(current_snapshot))
        .route("/snapshot/refresh", post(refresh_snapshot))
        .route("/timeline", post(timeline))
        .route("/debug/history", get(debug_history))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

// ---- errors ----

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Weather(WeatherError),
}

impl From<WeatherError> for ApiError {
    fn from(e: WeatherError) -> Self {
        ApiError::Weather(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, msg) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Weather(e @ WeatherError::InvalidCoordinates { .. }) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Weather(e @ WeatherError::CityNotFound(_)) => {
                (StatusCode::NOT_FOUND, e.to_string())
            }
            ApiError::Weather(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
        };
        (code, Json(ErrorBody { error: msg })).into_response()
    }
}

fn record_status(status: Status) {
    counter!("stress_assessments_total", "status" => status.as_str()).increment(1);
}

fn ensure_finite(reading: &EnvironmentalReading) -> Result<(), ApiError> {
    if reading.is_finite() {
        Ok(())
    } else {
        Err(ApiError::BadRequest("reading values must be finite".to_string()))
    }
}

// ---- factors ----

#[derive(Serialize)]
struct FactorInfo {
    key: FactorKey,
    label: &'static str,
    unit: &'static str,
    weight: f64,
    reference_min: f64,
    reference_max: f64,
    input: InputBounds,
}

async fn list_factors() -> Json<Vec<FactorInfo>> {
    let out = FactorKey::ALL
        .iter()
        .map(|&key| {
            let row = key.weight_row();
            FactorInfo {
                key,
                label: key.label(),
                unit: key.unit(),
                weight: row.weight,
                reference_min: row.reference_min,
                reference_max: row.reference_max,
                input: key.input_bounds(),
            }
        })
        .collect();
    Json(out)
}

// ---- simulation scoring ----

#[derive(Serialize)]
struct AssessResp {
    score: u8,
    status: Status,
    color: &'static str,
    breakdown: Vec<FactorContribution>,
}

async fn assess_reading(
    Json(reading): Json<EnvironmentalReading>,
) -> Result<Json<AssessResp>, ApiError> {
    ensure_finite(&reading)?;
    let StressAssessment { score, status } = assess(&reading);
    record_status(status);
    Ok(Json(AssessResp {
        score,
        status,
        color: status.color_hex(),
        breakdown: factor_breakdown(&reading).to_vec(),
    }))
}

#[derive(Deserialize)]
struct ClassifyQuery {
    score: i64,
}

async fn classify_score(
    Query(q): Query<ClassifyQuery>,
) -> Result<Json<StressAssessment>, ApiError> {
    let score = u8::try_from(q.score)
        .ok()
        .filter(|s| *s <= 100)
        .ok_or_else(|| ApiError::BadRequest(format!("score must be in 0..=100, got {}", q.score)))?;
    Ok(Json(StressAssessment::from_score(score)))
}

// ---- live scoring ----

async fn assess_live_reading(
    Json(live): Json<LiveReading>,
) -> Result<Json<LiveAssessment>, ApiError> {
    if !(live.aqi.is_finite() && live.apparent_temperature.is_finite()) {
        return Err(ApiError::BadRequest("live values must be finite".to_string()));
    }
    let out = assess_live(&live);
    record_status(out.status);
    Ok(Json(out))
}

// ---- locations ----

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn list_locations() -> Json<Vec<Location>> {
    Json(catalog().to_vec())
}

async fn search_locations(Query(q): Query<SearchQuery>) -> Json<Location> {
    Json(search_location(&q.q))
}

async fn location_by_id(Path(id): Path<String>) -> Json<Location> {
    Json(get_location(&id))
}

// ---- live weather ----

/// Latency histogram for every upstream call; errors are counted and logged.
fn record_weather_call(
    provider: &'static str,
    op: &'static str,
    started: Instant,
    res: Result<Location, WeatherError>,
) -> Result<Location, WeatherError> {
    histogram!("weather_fetch_ms", "provider" => provider, "op" => op)
        .record(started.elapsed().as_secs_f64() * 1_000.0);
    if let Err(e) = &res {
        counter!("weather_fetch_errors_total", "provider" => provider, "op" => op).increment(1);
        error!(target: "weather", provider, op, error = %e, "weather lookup failed");
    }
    res
}

#[derive(Deserialize)]
struct CoordQuery {
    lat: f64,
    lng: f64,
}

async fn weather_at(
    State(state): State<AppState>,
    Query(q): Query<CoordQuery>,
) -> Result<Json<Location>, ApiError> {
    validate_coordinates(q.lat, q.lng)?;
    let t0 = Instant::now();
    let res = state.weather.fetch_weather(q.lat, q.lng).await;
    let loc = record_weather_call(state.weather.name(), "fetch", t0, res)?;
    record_status(loc.status);
    Ok(Json(loc))
}

async fn weather_search(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Location>, ApiError> {
    let query = q.q.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("query parameter 'q' is required".to_string()));
    }
    let t0 = Instant::now();
    let res = state.weather.search_city(query).await;
    let loc = record_weather_call(state.weather.name(), "search", t0, res)?;
    record_status(loc.status);
    Ok(Json(loc))
}

// ---- snapshot ----

#[derive(Serialize)]
struct SnapshotOut {
    #[serde(flatten)]
    snapshot: StatusSnapshot,
    headline: String,
    greeting: String,
    color: &'static str,
    color_name: &'static str,
    age_secs: u64,
}

impl From<StatusSnapshot> for SnapshotOut {
    fn from(snapshot: StatusSnapshot) -> Self {
        Self {
            headline: snapshot.headline(),
            greeting: snapshot.assistant_greeting(),
            color: snapshot.assessment.status.color_hex(),
            color_name: snapshot.assessment.status.color_name(),
            age_secs: snapshot.age_secs(Utc::now()),
            snapshot,
        }
    }
}

async fn current_snapshot(State(state): State<AppState>) -> Json<SnapshotOut> {
    let snap = state.snapshot.read().expect("rwlock poisoned").clone();
    Json(snap.into())
}

async fn refresh_snapshot(
    State(state): State<AppState>,
    Json(reading): Json<EnvironmentalReading>,
) -> Result<Json<SnapshotOut>, ApiError> {
    ensure_finite(&reading)?;
    let snap = StatusSnapshot::capture(reading);
    {
        // History order must follow snapshot order.
        let mut w = state.snapshot.write().expect("rwlock poisoned");
        state.history.push(&snap);
        *w = snap.clone();
    }
    record_status(snap.assessment.status);
    info!(
        target: "snapshot",
        score = snap.assessment.score,
        status = %snap.assessment.status,
        "status snapshot refreshed"
    );
    Ok(Json(snap.into()))
}

// ---- timeline ----

fn default_every_n_hours() -> usize {
    3
}

#[derive(Deserialize)]
struct TimelineReq {
    readings: Vec<HourlyReading>,
    #[serde(default = "default_every_n_hours")]
    every_n_hours: usize,
}

#[derive(Serialize)]
struct TimelineResp {
    segments: Vec<Segment>,
    recovery_windows: Vec<RecoveryWindow>,
}

async fn timeline(Json(req): Json<TimelineReq>) -> Result<Json<TimelineResp>, ApiError> {
    if let Some(bad) = req.readings.iter().find(|r| !r.reading.is_finite()) {
        return Err(ApiError::BadRequest(format!(
            "reading for hour {} has non-finite values",
            bad.hour
        )));
    }
    let segments = segment_day(&req.readings, req.every_n_hours);
    let recovery_windows = recovery_windows(&segments);
    Ok(Json(TimelineResp {
        segments,
        recovery_windows,
    }))
}

// ---- debug ----

#[derive(Serialize)]
struct HistoryOut {
    ts_unix: i64,
    score: u8,
    status: Status,
    temperature: f64,
    aqi: f64,
}

async fn debug_history(State(state): State<AppState>) -> Json<Vec<HistoryOut>> {
    let rows = state.history.snapshot_last_n(10);
    let out = rows
        .into_iter()
        .map(|h| HistoryOut {
            ts_unix: h.ts_unix,
            score: h.score,
            status: h.status,
            temperature: h.temperature,
            aqi: h.aqi,
        })
        .collect::<Vec<_>>();
    Json(out)
}
