// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::history::MAX_HISTORY_CAPACITY;
use crate::reading::EnvironmentalReading;

pub const ENV_CONFIG_PATH: &str = "CLIMATE_CONFIG_PATH";
pub const ENV_HISTORY_CAPACITY: &str = "CLIMATE_HISTORY_CAPACITY";
pub const DEFAULT_CONFIG_PATH: &str = "config/climate.toml";

/// Default `EnvFilter` for dev logs when `RUST_LOG` is unset. Library events use
/// short targets, so each one is listed next to the crate path.
pub const DEV_LOG_FILTER: &str =
    "climate_stress=info,config=info,snapshot=info,weather=info,live=info,scoring=info,warn";

/// Upstream endpoints and HTTP client settings for the weather collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub forecast_url: String,
    pub air_quality_url: String,
    pub reverse_geocode_url: String,
    pub search_url: String,
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            air_quality_url: "https://air-quality-api.open-meteo.com/v1/air-quality".to_string(),
            reverse_geocode_url: "https://nominatim.openstreetmap.org/reverse".to_string(),
            search_url: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: concat!("climate-stress-engine/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_secs: 4,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub history_capacity: usize,
    /// Reading the initial status snapshot is computed from.
    pub baseline: EnvironmentalReading,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            history_capacity: 500,
            baseline: EnvironmentalReading::dashboard_baseline(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weather: WeatherConfig,
    pub service: ServiceConfig,
}

impl EngineConfig {
    /// Load from an explicit TOML file, then apply env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let cfg: EngineConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.finish()
    }

    /// Load config using env var + fallbacks:
    /// 1) $CLIMATE_CONFIG_PATH
    /// 2) config/climate.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!(
                "{ENV_CONFIG_PATH} points to non-existent path {}",
                pb.display()
            ));
        }
        let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from(&default_p);
        }
        info!(target: "config", "no config file found, using defaults");
        Self::default().finish()
    }

    fn finish(mut self) -> Result<Self> {
        if let Ok(raw) = std::env::var(ENV_HISTORY_CAPACITY) {
            self.service.history_capacity = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_HISTORY_CAPACITY} must be an integer, got {raw:?}"))?;
        }
        self.service.history_capacity = self.service.history_capacity.clamp(1, MAX_HISTORY_CAPACITY);

        if !self.service.baseline.is_finite() {
            return Err(anyhow!("service.baseline must contain finite values only"));
        }
        if self.weather.timeout_secs == 0 {
            self.weather.timeout_secs = WeatherConfig::default().timeout_secs;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: EngineConfig = toml::from_str(
            r#"
            [weather]
            timeout_secs = 3

            [service.baseline]
            temperature = 30.0
            humidity = 60.0
            aqi = 50.0
            co2_indoor = 800.0
            energy_demand = 4.0
            night_cooling = 20.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.weather.timeout_secs, 3);
        assert_eq!(cfg.weather.connect_timeout_secs, 4);
        assert!(cfg.weather.forecast_url.contains("open-meteo"));
        assert_eq!(cfg.service.history_capacity, 500);
        assert_eq!(cfg.service.baseline.aqi, 50.0);
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        // Isolate CWD so a real config/ in the repo does not interfere.
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        env::remove_var(ENV_CONFIG_PATH);
        env::remove_var(ENV_HISTORY_CAPACITY);

        // No files → defaults
        let c = EngineConfig::load_default().unwrap();
        assert_eq!(c, EngineConfig::default());

        // Env path wins
        let p = tmp.path().join("custom.toml");
        fs::write(&p, "[service]\nhistory_capacity = 7\n").unwrap();
        env::set_var(ENV_CONFIG_PATH, p.display().to_string());
        let c2 = EngineConfig::load_default().unwrap();
        assert_eq!(c2.service.history_capacity, 7);

        // Env override on top of the file
        env::set_var(ENV_HISTORY_CAPACITY, "99999");
        let c3 = EngineConfig::load_default().unwrap();
        assert_eq!(c3.service.history_capacity, MAX_HISTORY_CAPACITY);

        // Missing env path is an error
        env::remove_var(ENV_HISTORY_CAPACITY);
        env::set_var(ENV_CONFIG_PATH, tmp.path().join("missing.toml").display().to_string());
        assert!(EngineConfig::load_default().is_err());
        env::remove_var(ENV_CONFIG_PATH);

        env::set_current_dir(&old).unwrap();
    }

    #[serial_test::serial]
    #[test]
    fn bad_capacity_env_is_reported() {
        env::remove_var(ENV_CONFIG_PATH);
        env::set_var(ENV_HISTORY_CAPACITY, "lots");
        let err = EngineConfig::default().finish().unwrap_err();
        assert!(err.to_string().contains(ENV_HISTORY_CAPACITY));
        env::remove_var(ENV_HISTORY_CAPACITY);
    }
}
