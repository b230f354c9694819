//! Model configuration

use crate::calendar::MonthCalendar;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// First month covered by the bundled monthly index data
pub const DEFAULT_BASE_YEAR: i32 = 1988;
pub const DEFAULT_BASE_MONTH: u32 = 1;

/// Settings for building and querying a forecast model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Calendar year of series index 0
    pub base_year: i32,
    /// Calendar month (1-12) of series index 0
    pub base_month: u32,
    /// Reject invalid reference data instead of letting `NaN` propagate
    pub validate_input: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_year: DEFAULT_BASE_YEAR,
            base_month: DEFAULT_BASE_MONTH,
            validate_input: true,
        }
    }
}

impl ModelConfig {
    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ForecastError::ConfigError(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=12).contains(&self.base_month) {
            return Err(ForecastError::ConfigError(format!(
                "base_month must be between 1 and 12, got {}",
                self.base_month
            )));
        }
        Ok(())
    }

    /// Calendar anchored at the configured base month
    pub fn calendar(&self) -> Result<MonthCalendar> {
        MonthCalendar::new(self.base_year, self.base_month)
    }
}
