//! snapshot.rs: the "current status" shown in the header badge and the
//! assistant greeting.
//!
//! A snapshot is computed from a reading at a defined point (service start or an
//! explicit refresh) and handed to consumers; nothing reads a module-level value.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::reading::EnvironmentalReading;
use crate::scoring::{assess, StressAssessment};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub reading: EnvironmentalReading,
    pub assessment: StressAssessment,
    pub captured_at: DateTime<Utc>,
}

impl StatusSnapshot {
    pub fn capture(reading: EnvironmentalReading) -> Self {
        Self::capture_at(reading, Utc::now())
    }

    pub fn capture_at(reading: EnvironmentalReading, captured_at: DateTime<Utc>) -> Self {
        Self {
            assessment: assess(&reading),
            reading,
            captured_at,
        }
    }

    /// Badge text, e.g. `STRAINED (Score: 55/100)`.
    pub fn headline(&self) -> String {
        format!(
            "{} (Score: {}/100)",
            self.assessment.status.as_str().to_uppercase(),
            self.assessment.score
        )
    }

    /// Opening line for the assistant panel, seeded from this snapshot.
    pub fn assistant_greeting(&self) -> String {
        format!(
            "Current conditions: {}. Temperature {:.1}°C, humidity {:.0}%, AQI {:.0}. {}",
            self.headline(),
            self.reading.temperature,
            self.reading.humidity,
            self.reading.aqi,
            self.assessment.status.advisory()
        )
    }

    /// Seconds since capture, saturating at zero for clocks that moved backwards.
    pub fn age_secs(&self, now: DateTime<Utc>) -> u64 {
        u64::try_from((now - self.captured_at).num_seconds()).unwrap_or(0)
    }
}
