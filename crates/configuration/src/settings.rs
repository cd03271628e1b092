use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The largest scale a `Decimal` can carry.
const MAX_DECIMAL_PLACES: u32 = 28;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; omitted sections fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub indicators: IndicatorSettings,
    pub volatility: VolatilitySettings,
    pub logging: LoggingSettings,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.indicators.validate()
    }
}

/// Parameters for deriving the per-entity indicator set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    /// A growth rate strictly above this is ranked "Exceptional".
    pub exceptional_threshold: Decimal,
    /// A growth rate strictly above this (and not exceptional) is ranked "Good".
    pub good_threshold: Decimal,
    /// Rounding applied to the growth-rate standard deviation.
    pub std_dev_decimal_places: u32,
    /// Name given to an entity supplied without one.
    pub default_entity_name: String,
}

impl IndicatorSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exceptional_threshold <= self.good_threshold {
            return Err(ConfigError::ValidationError(format!(
                "indicators.exceptional_threshold ({}) must be greater than indicators.good_threshold ({})",
                self.exceptional_threshold, self.good_threshold
            )));
        }
        if self.std_dev_decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::ValidationError(format!(
                "indicators.std_dev_decimal_places must be at most {MAX_DECIMAL_PLACES}"
            )));
        }
        if self.default_entity_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "indicators.default_entity_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            exceptional_threshold: dec!(25),
            good_threshold: Decimal::ZERO,
            std_dev_decimal_places: 3,
            default_entity_name: "A".to_string(),
        }
    }
}

/// Parameters for the cross-entity volatility comparison.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VolatilitySettings {
    /// A minimum dispersion strictly below this is "most stable"; otherwise "least risky".
    pub stability_threshold: Decimal,
}

impl Default for VolatilitySettings {
    fn default() -> Self {
        Self {
            stability_threshold: dec!(25),
        }
    }
}

/// Controls the tracing subscriber installed by the binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "econ-pulse.log".to_string(),
        }
    }
}

/// How the binary renders its results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
