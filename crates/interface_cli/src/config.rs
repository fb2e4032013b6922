//! CLI configuration

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use core_kernel::{Currency, RoundingPolicy};
use domain_invoicing::config::DEFAULT_MAX_MAGNITUDE;
use domain_invoicing::{EngineConfig, Locale};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// CLI configuration
///
/// Read from `PAYBILL_*` environment variables; every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Rate for lines without a usable tax rate
    pub default_tax_rate: Decimal,
    /// Rounding of presented amounts
    pub rounding: RoundingPolicy,
    /// Currency of the totals
    pub currency: Currency,
    /// Inputs above this magnitude are treated as invalid
    pub max_magnitude: Decimal,
    /// Locale for `--document` output
    pub locale: Locale,
    /// Log level or filter directive
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            default_tax_rate: engine.default_tax_rate,
            rounding: engine.rounding,
            currency: engine.currency,
            max_magnitude: DEFAULT_MAX_MAGNITUDE,
            locale: engine.locale,
            log_level: "warn".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl CliConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(config::Environment::with_prefix("PAYBILL"))
    }

    /// Loads configuration from explicit `PAYBILL_*` variables instead of the
    /// process environment
    pub fn from_vars<K, V>(
        vars: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, config::ConfigError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map: HashMap<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::load(config::Environment::with_prefix("PAYBILL").source(Some(map)))
    }

    fn load(source: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    /// Engine settings carried by this configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            default_tax_rate: self.default_tax_rate,
            rounding: self.rounding,
            currency: self.currency,
            max_magnitude: self.max_magnitude,
            locale: self.locale,
        }
    }
}
