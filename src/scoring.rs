//! # Stress scoring (simulation variant)
//! Pure functions that map an [`EnvironmentalReading`] → `(score, status)`.
//! No I/O, no shared state; cheap enough to run on every slider movement.
//!
//! Policy: weighted sum of the six severity sub-scores, rounded half away from
//! zero, then `> 70` critical, `> 40` strained, otherwise safe. The boundary
//! values 40 and 70 belong to the lower band.

use serde::Serialize;
use tracing::debug;

use crate::factors::{FactorKey, FACTOR_TABLE};
use crate::reading::EnvironmentalReading;
use crate::status::Status;

pub const STRAINED_ABOVE: u8 = 40;
pub const CRITICAL_ABOVE: u8 = 70;

/// Score plus the status derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StressAssessment {
    pub score: u8,
    pub status: Status,
}

impl StressAssessment {
    /// The only way to attach a status to a score: status never depends on anything else.
    pub fn from_score(score: u8) -> Self {
        Self {
            score,
            status: classify_from_score(score),
        }
    }
}

/// Per-factor explainability row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorContribution {
    pub key: FactorKey,
    pub value: f64,
    /// Normalized sub-score in [0, 100].
    pub severity: f64,
    pub weight: f64,
    /// `severity * weight`, i.e. points added to the aggregate.
    pub points: f64,
}

/// Severity, weight and contributed points for each factor, in table order.
pub fn factor_breakdown(reading: &EnvironmentalReading) -> [FactorContribution; 6] {
    FACTOR_TABLE.map(|row| {
        let value = reading.value(row.key);
        let severity = row.severity(value);
        FactorContribution {
            key: row.key,
            value,
            severity,
            weight: row.weight,
            points: severity * row.weight,
        }
    })
}

/// Unrounded weighted sum; always within [0, 100].
pub fn weighted_sum(reading: &EnvironmentalReading) -> f64 {
    factor_breakdown(reading).iter().map(|c| c.points).sum()
}

/// Aggregate stress score in [0, 100].
pub fn compute_stress_score(reading: &EnvironmentalReading) -> u8 {
    let sum = weighted_sum(reading);
    // Sub-scores are clamped and weights sum to 1, so the cast cannot truncate.
    let score = sum.round().clamp(0.0, 100.0) as u8;
    debug!(target: "scoring", sum, score, "computed stress score");
    score
}

/// Score → status, strict thresholds (40 is safe, 70 is strained).
pub fn classify_from_score(score: u8) -> Status {
    if score > CRITICAL_ABOVE {
        Status::Critical
    } else if score > STRAINED_ABOVE {
        Status::Strained
    } else {
        Status::Safe
    }
}

/// Normalize, aggregate and classify in one step.
pub fn assess(reading: &EnvironmentalReading) -> StressAssessment {
    StressAssessment::from_score(compute_stress_score(reading))
}
