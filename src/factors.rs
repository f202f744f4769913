//! # Factor table
//!
//! The six environmental factors, their fixed weights and reference ranges, and
//! the linear clamp that turns a raw value into a 0–100 severity sub-score.
//!
//! The table is a compile-time constant and is never read from `EngineConfig`.

use serde::{Deserialize, Serialize};

/// Identifies one of the six scored factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKey {
    Temperature,
    Humidity,
    Aqi,
    Co2Indoor,
    EnergyDemand,
    NightCooling,
}

/// One row of the weight table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorWeight {
    pub key: FactorKey,
    pub reference_min: f64,
    pub reference_max: f64,
    pub weight: f64,
}

/// Slider range offered to users. Wider than the reference range on purpose;
/// anything past the reference bounds simply saturates at 0 or 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Weights sum to 1.0, so the aggregate stays on the same 0–100 scale.
pub const FACTOR_TABLE: [FactorWeight; 6] = [
    FactorWeight {
        key: FactorKey::Temperature,
        reference_min: 20.0,
        reference_max: 45.0,
        weight: 0.25,
    },
    FactorWeight {
        key: FactorKey::Humidity,
        reference_min: 40.0,
        reference_max: 90.0,
        weight: 0.20,
    },
    FactorWeight {
        key: FactorKey::Aqi,
        reference_min: 0.0,
        reference_max: 200.0,
        weight: 0.20,
    },
    FactorWeight {
        key: FactorKey::Co2Indoor,
        reference_min: 400.0,
        reference_max: 2000.0,
        weight: 0.15,
    },
    FactorWeight {
        key: FactorKey::EnergyDemand,
        reference_min: 2.0,
        reference_max: 10.0,
        weight: 0.10,
    },
    FactorWeight {
        key: FactorKey::NightCooling,
        reference_min: 18.0,
        reference_max: 33.0,
        weight: 0.10,
    },
];

impl FactorKey {
    pub const ALL: [FactorKey; 6] = [
        FactorKey::Temperature,
        FactorKey::Humidity,
        FactorKey::Aqi,
        FactorKey::Co2Indoor,
        FactorKey::EnergyDemand,
        FactorKey::NightCooling,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FactorKey::Temperature => "Temperature",
            FactorKey::Humidity => "Humidity",
            FactorKey::Aqi => "AQI Index",
            FactorKey::Co2Indoor => "Indoor CO2",
            FactorKey::EnergyDemand => "Energy Demand",
            FactorKey::NightCooling => "Night Cooling",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            FactorKey::Temperature | FactorKey::NightCooling => "°C",
            FactorKey::Humidity => "%",
            FactorKey::Aqi => "",
            FactorKey::Co2Indoor => "ppm",
            FactorKey::EnergyDemand => "kW",
        }
    }

    pub fn input_bounds(self) -> InputBounds {
        let (min, max, step) = match self {
            FactorKey::Temperature => (15.0, 50.0, 0.5),
            FactorKey::Humidity => (20.0, 100.0, 1.0),
            FactorKey::Aqi => (0.0, 300.0, 5.0),
            FactorKey::Co2Indoor => (400.0, 3000.0, 50.0),
            FactorKey::EnergyDemand => (1.0, 15.0, 0.2),
            FactorKey::NightCooling => (15.0, 35.0, 0.5),
        };
        InputBounds { min, max, step }
    }

    /// Row of [`FACTOR_TABLE`] for this key.
    pub fn weight_row(self) -> &'static FactorWeight {
        match self {
            FactorKey::Temperature => &FACTOR_TABLE[0],
            FactorKey::Humidity => &FACTOR_TABLE[1],
            FactorKey::Aqi => &FACTOR_TABLE[2],
            FactorKey::Co2Indoor => &FACTOR_TABLE[3],
            FactorKey::EnergyDemand => &FACTOR_TABLE[4],
            FactorKey::NightCooling => &FACTOR_TABLE[5],
        }
    }
}

impl FactorWeight {
    /// Severity sub-score of `value` against this row's reference range.
    pub fn severity(&self, value: f64) -> f64 {
        normalize(value, self.reference_min, self.reference_max)
    }
}

/// Linear map of `value` over `[reference_min, reference_max]` onto `[0, 100]`, clamped.
///
/// `reference_min < reference_max` is the caller's responsibility.
pub fn normalize(value: f64, reference_min: f64, reference_max: f64) -> f64 {
    debug_assert!(
        reference_min < reference_max,
        "reference range out of order: [{reference_min}, {reference_max}]"
    );
    let raw = (value - reference_min) / (reference_max - reference_min) * 100.0;
    // NaN collapses to 0 here.
    raw.max(0.0).min(100.0)
}
