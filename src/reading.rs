//! reading.rs: raw inputs to the scoring engine.

use serde::{Deserialize, Serialize};

use crate::factors::FactorKey;

/// Six-factor snapshot used by the simulation path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    /// °C
    pub temperature: f64,
    /// Relative humidity, %
    pub humidity: f64,
    pub aqi: f64,
    /// ppm
    #[serde(alias = "co2Indoor", alias = "co2")]
    pub co2_indoor: f64,
    /// kW
    #[serde(alias = "energyDemand", alias = "energy")]
    pub energy_demand: f64,
    /// Night/ambient cooling temperature, °C
    #[serde(alias = "nightCooling", alias = "cooling")]
    pub night_cooling: f64,
}

impl EnvironmentalReading {
    pub const fn new(
        temperature: f64,
        humidity: f64,
        aqi: f64,
        co2_indoor: f64,
        energy_demand: f64,
        night_cooling: f64,
    ) -> Self {
        Self {
            temperature,
            humidity,
            aqi,
            co2_indoor,
            energy_demand,
            night_cooling,
        }
    }

    /// Values the simulation sliders start from.
    pub const fn dashboard_baseline() -> Self {
        Self::new(34.2, 78.0, 87.0, 1240.0, 6.8, 22.0)
    }

    pub fn value(&self, key: FactorKey) -> f64 {
        match key {
            FactorKey::Temperature => self.temperature,
            FactorKey::Humidity => self.humidity,
            FactorKey::Aqi => self.aqi,
            FactorKey::Co2Indoor => self.co2_indoor,
            FactorKey::EnergyDemand => self.energy_demand,
            FactorKey::NightCooling => self.night_cooling,
        }
    }

    /// Copy with one factor replaced (builder style).
    pub fn with_factor(mut self, key: FactorKey, value: f64) -> Self {
        match key {
            FactorKey::Temperature => self.temperature = value,
            FactorKey::Humidity => self.humidity = value,
            FactorKey::Aqi => self.aqi = value,
            FactorKey::Co2Indoor => self.co2_indoor = value,
            FactorKey::EnergyDemand => self.energy_demand = value,
            FactorKey::NightCooling => self.night_cooling = value,
        }
        self
    }

    pub fn is_finite(&self) -> bool {
        FactorKey::ALL.iter().all(|k| self.value(*k).is_finite())
    }
}

impl Default for EnvironmentalReading {
    fn default() -> Self {
        Self::dashboard_baseline()
    }
}

/// Subset of a fetched weather/AQI response consumed by the live variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveReading {
    /// US AQI
    pub aqi: f64,
    /// Apparent ("feels like") temperature, °C
    #[serde(alias = "apparentTemperature")]
    pub apparent_temperature: f64,
}

impl LiveReading {
    pub const fn new(aqi: f64, apparent_temperature: f64) -> Self {
        Self {
            aqi,
            apparent_temperature,
        }
    }
}
