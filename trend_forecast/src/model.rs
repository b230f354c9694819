//! Inflation-aware log-linear price and volatility model
//!
//! A [`ForecastModel`] is built in one pass from a reference series and is
//! immutable afterwards. It holds:
//! - the smoothed nominal price curve for the historical window
//! - the log-space price line anchored at the latest smoothed price
//! - the running standard deviation of the raw prices
//! - the log-space line of the upper band (price + standard deviation)
//!
//! Indices inside the historical window are answered from the stored
//! series; later indices are extrapolated from the two lines. Extrapolation
//! is not range limited and grows exponentially with the index.

use crate::calendar::MonthCalendar;
use crate::config::ModelConfig;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument, warn};
use trend_math::{
    last_point_regression, ordinary_least_squares, population_standard_deviation,
    to_indexed_series, MathError, ObservationSeries, ReferenceSeries, RegressionCoefficients,
};

/// Generated price and volatility model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastModel {
    prices: ObservationSeries,
    price_coefficients: RegressionCoefficients,
    std_devs: ObservationSeries,
    band_coefficients: RegressionCoefficients,
    /// R-squared of the historical trend in inflation-adjusted log space
    trend_fit: Option<f64>,
}

impl ForecastModel {
    /// Build the model without checking the reference data.
    ///
    /// Fewer than two points or a zero deflator do not fail here; they show
    /// up as `NaN` or infinite values in the model. Use
    /// [`try_generate`](Self::try_generate) to reject such input.
    #[instrument(skip_all, fields(points = reference.len()))]
    pub fn generate(reference: &ReferenceSeries) -> Self {
        let indexed = to_indexed_series(reference);

        // Historical trend: OLS on inflation-adjusted log prices, mapped back to nominal
        let log_adjusted = indexed
            .clone()
            .adjust_for_inflation(reference)
            .log_transform();
        let trend = ordinary_least_squares(&log_adjusted);
        let trend_fit = trend.r_squared(&log_adjusted).ok();

        let prices = log_adjusted
            .map_values(|p| trend.value_at(p.index as f64))
            .exp_transform()
            .unadjust_for_inflation(reference);

        let price_coefficients = last_point_regression(&prices.clone().log_transform());

        let std_devs = population_standard_deviation(&indexed);

        // The deviation alone is far from exponential, price + deviation is close to it
        let upper_band = prices.zip_with(&std_devs, |price, std_dev| price + std_dev);
        let band_coefficients = last_point_regression(&upper_band.log_transform());

        debug!(
            trend_slope = trend.slope,
            trend_intercept = trend.intercept,
            price_slope = price_coefficients.slope,
            price_intercept = price_coefficients.intercept,
            band_slope = band_coefficients.slope,
            band_intercept = band_coefficients.intercept,
            "fitted forecast lines"
        );

        Self {
            prices,
            price_coefficients,
            std_devs,
            band_coefficients,
            trend_fit,
        }
    }

    /// Validate the reference data, then build the model
    pub fn try_generate(reference: &ReferenceSeries) -> Result<Self> {
        if let Err(err) = reference.validate() {
            warn!(error = %err, "rejected reference series");
            return Err(match err {
                MathError::InvalidSeries(msg) => ForecastError::InvalidSeries(msg),
                other => ForecastError::Math(other),
            });
        }

        let model = Self::generate(reference);
        info!(
            points = model.data_len(),
            trend_fit = ?model.trend_fit,
            "generated forecast model"
        );
        Ok(model)
    }

    /// Build the model, validating first when the configuration asks for it
    pub fn with_config(reference: &ReferenceSeries, config: &ModelConfig) -> Result<Self> {
        if config.validate_input {
            Self::try_generate(reference)
        } else {
            Ok(Self::generate(reference))
        }
    }

    /// Number of historical points
    pub fn data_len(&self) -> usize {
        self.prices.len()
    }

    /// Whether `index` lies past the historical window
    pub fn is_forecast(&self, index: usize) -> bool {
        index >= self.data_len()
    }

    /// Smoothed nominal price at a historical index
    pub fn current_price(&self, index: usize) -> Option<f64> {
        self.prices.get(index)
    }

    /// Extrapolated price: `exp(slope * index + intercept)`
    pub fn forecast_price(&self, index: usize) -> f64 {
        self.price_coefficients.exp_value_at(index as f64)
    }

    /// Running standard deviation of raw prices at a historical index
    pub fn current_std_dev(&self, index: usize) -> Option<f64> {
        self.std_devs.get(index)
    }

    /// Extrapolated standard deviation: forecast upper band minus forecast price
    pub fn forecast_std_dev(&self, index: usize) -> f64 {
        self.band_coefficients.exp_value_at(index as f64) - self.forecast_price(index)
    }

    /// Price at any index, looked up or extrapolated
    pub fn price_at(&self, index: usize) -> f64 {
        self.current_price(index)
            .unwrap_or_else(|| self.forecast_price(index))
    }

    /// Standard deviation at any index, looked up or extrapolated
    pub fn std_dev_at(&self, index: usize) -> f64 {
        self.current_std_dev(index)
            .unwrap_or_else(|| self.forecast_std_dev(index))
    }

    /// Price, deviation and one-deviation band at any index
    pub fn estimate_at(&self, index: usize) -> PriceEstimate {
        PriceEstimate::new(
            index,
            self.price_at(index),
            self.std_dev_at(index),
            self.is_forecast(index),
        )
    }

    /// Estimate for a `MM/YYYY` month on `calendar`
    pub fn estimate_on(&self, calendar: &MonthCalendar, month_year: &str) -> Result<PriceEstimate> {
        let index = calendar.index_of_str(month_year)?;
        Ok(self.estimate_at(index))
    }

    pub fn prices(&self) -> &ObservationSeries {
        &self.prices
    }

    pub fn std_devs(&self) -> &ObservationSeries {
        &self.std_devs
    }

    pub fn price_coefficients(&self) -> RegressionCoefficients {
        self.price_coefficients
    }

    pub fn band_coefficients(&self) -> RegressionCoefficients {
        self.band_coefficients
    }

    pub fn trend_fit(&self) -> Option<f64> {
        self.trend_fit
    }

    /// Whether both forecast lines have finite coefficients
    pub fn is_finite(&self) -> bool {
        self.price_coefficients.is_finite() && self.band_coefficients.is_finite()
    }

    /// Whether every stored value and coefficient is finite
    fn has_finite_values(&self) -> bool {
        self.is_finite()
            && self.prices.values().all(f64::is_finite)
            && self.std_devs.values().all(f64::is_finite)
            && self.trend_fit.map_or(true, f64::is_finite)
    }

    /// Serialize the model. JSON has no NaN or infinity, so a model built
    /// from invalid input in permissive mode is refused.
    pub fn to_json(&self) -> Result<String> {
        if !self.has_finite_values() {
            return Err(ForecastError::DataError(
                "Model contains non-finite values and cannot be exported".to_string(),
            ));
        }
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)?;
        if model.prices.len() != model.std_devs.len() {
            return Err(ForecastError::DataError(format!(
                "Price series has {} points but deviation series has {}",
                model.prices.len(),
                model.std_devs.len()
            )));
        }
        Ok(model)
    }
}

/// Point estimate with a one standard deviation band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceEstimate {
    pub index: usize,
    pub price: f64,
    pub std_dev: f64,
    pub upper: f64,
    pub lower: f64,
    /// Extrapolated rather than looked up
    pub forecast: bool,
}

impl PriceEstimate {
    pub fn new(index: usize, price: f64, std_dev: f64, forecast: bool) -> Self {
        Self {
            index,
            price,
            std_dev,
            upper: price + std_dev,
            lower: price - std_dev,
            forecast,
        }
    }
}

impl fmt::Display for PriceEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = if self.forecast { "forecast" } else { "historical" };
        writeln!(f, "Estimate at index {} ({}):", self.index, source)?;
        writeln!(f, "  Fair value:      {:.2}", self.price)?;
        writeln!(f, "  Std deviation:   {:.2}", self.std_dev)?;
        writeln!(f, "  Fair value + SD: {:.2}", self.upper)?;
        writeln!(f, "  Fair value - SD: {:.2}", self.lower)?;
        Ok(())
    }
}
