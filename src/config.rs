use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub reports: ReportsConfig,
    pub detection: DetectionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Glob template used to locate report files. Tilde is expanded.
    pub template: String,
    /// Timestamp format of the first report column.
    pub timestamp_format: String,
}

/// Tunable constants of the cloud detection algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Numerator of the global sensitivity factor: `factor = scale / max(sum_wh)`.
    /// The per-day slope threshold is `sum_wh(day) * factor`, so the brightest
    /// day in the dataset gets a threshold equal to this value and dimmer days
    /// scale down proportionally.
    pub volatility_scale: f64,
    /// A day is clear when at most this many of its samples exceed the
    /// slope threshold.
    pub clear_day_max_flags: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reports: ReportsConfig {
                template: "Weekly_*.csv".to_string(),
                timestamp_format: "%d.%m.%Y %H:%M".to_string(),
            },
            detection: DetectionConfig::default(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            volatility_scale: 35.0,
            clear_day_max_flags: 5,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("PVCLEARSKY__").split("__"));
        Ok(figment.extract()?)
    }
}
