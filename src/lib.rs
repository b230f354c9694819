//! # Price Trend
//!
//! Workspace facade over the regression engine (`trend_math`) and the
//! forecast model built on it (`trend_forecast`).
//!
//! ## Example
//!
//! ```
//! use price_trend_workspace::{ForecastModel, ReferenceSeries};
//!
//! // Twelve months of 1% monthly growth with a flat deflator
//! let reference = ReferenceSeries::from_pairs(
//!     (0..12).map(|i| (100.0 * (0.01 * i as f64).exp(), 250.0)),
//! );
//!
//! let model = ForecastModel::try_generate(&reference).unwrap();
//! assert_eq!(model.data_len(), 12);
//!
//! let expected = 100.0 * 0.24_f64.exp();
//! assert!((model.forecast_price(24) - expected).abs() < 1e-6);
//! ```

pub use trend_forecast::{
    calendar, config, data, error, model, parse_month_year, ForecastError, ForecastModel,
    ModelConfig, MonthCalendar, PriceEstimate, ReferenceLoader,
};
pub use trend_math::{
    deviation, forced_intercept_regression, last_point_regression, ordinary_least_squares,
    population_standard_deviation, regression, series, to_indexed_series, MathError,
    ObservationPoint, ObservationSeries, ReferencePoint, ReferenceSeries,
    RegressionCoefficients,
};
