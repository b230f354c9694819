//! Running population standard deviation
//!
//! Uses the sum / sum-of-squares form
//! `sd = sqrt(n * sum(y^2) - sum(y)^2) / n`, so every prefix of a series is
//! covered in a single pass.

use crate::series::ObservationSeries;
use crate::{MathError, Result};

/// Streaming population standard deviation over every value seen so far
#[derive(Debug, Clone, Default)]
pub struct RunningDeviation {
    count: usize,
    sum: f64,
    sum_of_squares: f64,
}

impl RunningDeviation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value to the running totals
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_of_squares += value * value;
    }

    /// Population standard deviation of all values seen so far
    pub fn value(&self) -> Result<f64> {
        if self.count == 0 {
            return Err(MathError::InsufficientData(
                "No data available for standard deviation".to_string(),
            ));
        }

        let n = self.count as f64;
        let spread = n * self.sum_of_squares - self.sum * self.sum;
        // Rounding can push the difference slightly below zero for constant input;
        // NaN from non-finite input must pass through
        let spread = if spread < 0.0 { 0.0 } else { spread };

        Ok(spread.sqrt() / n)
    }

    /// Number of values seen so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Reset the running totals
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Population standard deviation of every prefix of `series`.
///
/// Output point `i` covers values `0..=i`; the output has the same length
/// and indices as the input.
pub fn population_standard_deviation(series: &ObservationSeries) -> ObservationSeries {
    let mut running = RunningDeviation::new();

    series.clone().map_values(|point| {
        running.update(point.value);
        running.value().unwrap_or(f64::NAN)
    })
}
