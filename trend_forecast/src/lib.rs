//! # Trend Forecast
//!
//! Inflation-aware price trend and volatility forecasting from monthly
//! reference data (nominal price plus a deflator such as CPI).
//!
//! ## Features
//!
//! - Reference data loading from CSV or the bundled `[[price, deflator], ...]` JSON layout
//! - Smoothed historical price curve from a log-linear trend in real terms
//! - Price forecast anchored at the latest smoothed price
//! - Running standard deviation and an extrapolated volatility band
//! - Month/year to series index mapping
//!
//! ## Quick Start
//!
//! ```no_run
//! use trend_forecast::{ForecastModel, ModelConfig, ReferenceLoader};
//!
//! let reference = ReferenceLoader::from_csv("sp500tr.csv")?;
//! let config = ModelConfig::default();
//! let model = ForecastModel::with_config(&reference, &config)?;
//!
//! let calendar = config.calendar()?;
//! let estimate = model.estimate_on(&calendar, "06/2030")?;
//! println!("{}", estimate);
//! # Ok::<(), trend_forecast::ForecastError>(())
//! ```

pub mod calendar;
pub mod config;
pub mod data;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use crate::calendar::{parse_month_year, MonthCalendar};
pub use crate::config::ModelConfig;
pub use crate::data::ReferenceLoader;
pub use crate::error::ForecastError;
pub use crate::model::{ForecastModel, PriceEstimate};
pub use trend_math::{ReferencePoint, ReferenceSeries};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
