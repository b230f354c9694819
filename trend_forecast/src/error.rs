//! Error types for the trend_forecast crate

use thiserror::Error;
use trend_math::MathError;

/// Custom error types for the trend_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to loading or parsing input data
    #[error("Data error: {0}")]
    DataError(String),

    /// Reference data that breaks the model's preconditions
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    /// Calendar input that cannot be mapped to a series index
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error from configuration loading or validation
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error from the regression engine
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error from JSON (de)serialization
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::JsonError(err.to_string())
    }
}
