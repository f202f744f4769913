//! # Live-weather stress scoring
//!
//! Two-factor variant used for data fetched from the weather feed. It has its
//! own classification policy that reads the raw AQI and apparent temperature
//! directly; the live score is never run through [`crate::scoring::classify_from_score`].

use serde::Serialize;
use tracing::debug;

use crate::reading::LiveReading;
use crate::status::Status;

pub const LIVE_CRITICAL_AQI: f64 = 150.0;
pub const LIVE_CRITICAL_APPARENT_TEMP: f64 = 40.0;
pub const LIVE_STRAINED_AQI: f64 = 100.0;
pub const LIVE_STRAINED_APPARENT_TEMP: f64 = 35.0;

/// Live score with its companion recovery index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LiveScore {
    pub score: u8,
    pub recovery_index: u8,
}

/// Full live assessment: score, recovery and the independently derived status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LiveAssessment {
    pub score: u8,
    pub recovery_index: u8,
    pub status: Status,
}

/// `aqi / 3 + apparent * 1.5 - 20`, clamped to [0, 100].
pub fn live_raw_score(live: &LiveReading) -> f64 {
    let raw = live.aqi / 3.0 + live.apparent_temperature * 1.5 - 20.0;
    raw.max(0.0).min(100.0)
}

pub fn compute_live_stress_score(live: &LiveReading) -> LiveScore {
    let clamped = live_raw_score(live);
    // Recovery is taken from the unrounded value, so score + recovery may be 101.
    let out = LiveScore {
        score: clamped.round() as u8,
        recovery_index: (100.0 - clamped).round() as u8,
    };
    debug!(
        target: "live",
        aqi = live.aqi,
        apparent = live.apparent_temperature,
        score = out.score,
        recovery = out.recovery_index,
        "computed live stress score"
    );
    out
}

/// Raw AQI / apparent temperature → status. Either trigger alone suffices.
pub fn classify_from_live_factors(aqi: f64, apparent_temperature: f64) -> Status {
    if aqi > LIVE_CRITICAL_AQI || apparent_temperature > LIVE_CRITICAL_APPARENT_TEMP {
        Status::Critical
    } else if aqi > LIVE_STRAINED_AQI || apparent_temperature > LIVE_STRAINED_APPARENT_TEMP {
        Status::Strained
    } else {
        Status::Safe
    }
}

pub fn assess_live(live: &LiveReading) -> LiveAssessment {
    let LiveScore {
        score,
        recovery_index,
    } = compute_live_stress_score(live);
    LiveAssessment {
        score,
        recovery_index,
        status: classify_from_live_factors(live.aqi, live.apparent_temperature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_classification_boundaries() {
        assert_eq!(classify_from_live_factors(150.0, 30.0), Status::Strained);
        assert_eq!(classify_from_live_factors(151.0, 30.0), Status::Critical);
        assert_eq!(classify_from_live_factors(50.0, 40.1), Status::Critical);
        assert_eq!(classify_from_live_factors(50.0, 40.0), Status::Strained);
        assert_eq!(classify_from_live_factors(100.0, 35.0), Status::Safe);
        assert_eq!(classify_from_live_factors(101.0, 20.0), Status::Strained);
        assert_eq!(classify_from_live_factors(20.0, 35.5), Status::Strained);
    }

    #[test]
    fn live_score_formula() {
        // 90/3 + 30*1.5 - 20 = 55
        let s = compute_live_stress_score(&LiveReading::new(90.0, 30.0));
        assert_eq!(s.score, 55);
        assert_eq!(s.recovery_index, 45);
    }

    #[test]
    fn live_score_clamps() {
        let cold = compute_live_stress_score(&LiveReading::new(0.0, -10.0));
        assert_eq!(cold, LiveScore { score: 0, recovery_index: 100 });
        let hot = compute_live_stress_score(&LiveReading::new(500.0, 48.0));
        assert_eq!(hot, LiveScore { score: 100, recovery_index: 0 });
    }

    #[test]
    fn recovery_uses_unrounded_score() {
        // 6/3 + 39*1.5 - 20 = 40.5 → score 41 (half up), recovery round(59.5) = 60
        let s = compute_live_stress_score(&LiveReading::new(6.0, 39.0));
        assert_eq!(s.score, 41);
        assert_eq!(s.recovery_index, 60);
    }

    #[test]
    fn status_is_not_derived_from_live_score() {
        // 64 would be strained by score thresholds; both live triggers are below their limits.
        let live = LiveReading::new(99.0, 34.0);
        let a = assess_live(&live);
        assert_eq!(a.score, 64);
        assert_eq!(a.status, Status::Safe);
    }
}
