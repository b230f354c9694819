//! # Trend Math
//!
//! Numerical building blocks for log-linear price trend forecasting.
//! This crate provides the series preparation steps (indexing, inflation
//! adjustment, log/exp transforms) and the regression engine (ordinary,
//! forced-intercept and last-point least squares plus a running population
//! standard deviation).
//!
//! All calculations are permissive: degenerate input yields `NaN` or infinite
//! values instead of errors. Callers that want hard failures run
//! [`ReferenceSeries::validate`] first.

use thiserror::Error;

pub mod deviation;
pub mod regression;
pub mod series;

pub use deviation::{population_standard_deviation, RunningDeviation};
pub use regression::{
    forced_intercept_regression, last_point_regression, ordinary_least_squares,
    RegressionCoefficients,
};
pub use series::{
    to_indexed_series, ObservationPoint, ObservationSeries, ReferencePoint, ReferenceSeries,
};

/// Errors that can occur in trend calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for trend math operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MathError::InvalidSeries("deflator at index 3 is zero".to_string());
        assert_eq!(err.to_string(), "Invalid series: deflator at index 3 is zero");

        let err = MathError::InsufficientData("need 2 points".to_string());
        assert!(err.to_string().starts_with("Insufficient data"));
    }
}
