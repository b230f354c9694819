//! Least-squares regression variants for trend fitting
//!
//! Contains:
//! - Ordinary least squares over (index, value) pairs
//! - Least squares constrained to a chosen y-intercept (mirror-point method)
//! - Least squares constrained through the final observation
//!
//! None of the fits check their input; a series with fewer than two points
//! produces `NaN` coefficients.

use crate::series::ObservationSeries;
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionCoefficients {
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionCoefficients {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Evaluate the line at `x`
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Evaluate a log-space line at `x` and map it back: `exp(slope * x + intercept)`
    pub fn exp_value_at(&self, x: f64) -> f64 {
        self.value_at(x).exp()
    }

    pub fn is_finite(&self) -> bool {
        self.slope.is_finite() && self.intercept.is_finite()
    }

    /// Coefficient of determination of this line against `series`
    pub fn r_squared(&self, series: &ObservationSeries) -> Result<f64> {
        if series.len() < 2 {
            return Err(MathError::InsufficientData(
                "Not enough data to calculate R-squared. Need at least 2 points.".to_string(),
            ));
        }

        let y_mean = series.values().sum::<f64>() / series.len() as f64;

        let mut ss_total = 0.0;
        let mut ss_residual = 0.0;

        for point in series.iter() {
            let y_pred = self.value_at(point.index as f64);
            ss_total += (point.value - y_mean).powi(2);
            ss_residual += (point.value - y_pred).powi(2);
        }

        if ss_total.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate R-squared: total sum of squares is too small".to_string(),
            ));
        }

        Ok(1.0 - (ss_residual / ss_total))
    }
}

/// Running sums needed by the closed-form least-squares solution
#[derive(Debug, Default, Clone, Copy)]
struct LeastSquaresSums {
    n: f64,
    sum_x: f64,
    sum_y: f64,
    sum_xy: f64,
    sum_x2: f64,
}

impl LeastSquaresSums {
    fn add(&mut self, x: f64, y: f64) {
        self.n += 1.0;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xy += x * y;
        self.sum_x2 += x * x;
    }

    // slope = (N*SXY - SX*SY) / (N*SX2 - SX^2), intercept = mean(Y) - slope * mean(X)
    fn coefficients(&self) -> RegressionCoefficients {
        let dividend = self.n * self.sum_xy - self.sum_x * self.sum_y;
        let divisor = self.n * self.sum_x2 - self.sum_x * self.sum_x;
        let slope = dividend / divisor;

        let x_mean = self.sum_x / self.n;
        let y_mean = self.sum_y / self.n;

        RegressionCoefficients::new(slope, y_mean - slope * x_mean)
    }
}

fn fit<I>(points: I) -> RegressionCoefficients
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut sums = LeastSquaresSums::default();
    for (x, y) in points {
        sums.add(x, y);
    }
    sums.coefficients()
}

/// Fit through `(0, b)` by adding the mirror image `(-x, 2b - y)` of every
/// point with `x != 0`. A point at `x = 0` already lies on the forced
/// intercept, so it enters the fit as `(0, b)` and is not mirrored.
/// When the observed `y0 != b` this differs from the plain mirror method,
/// whose intercept would be `(y0 + 2b(n - 1)) / (2n - 1)` rather than `b`.
fn fit_through_intercept<I>(points: I, b: f64) -> RegressionCoefficients
where
    I: IntoIterator<Item = (f64, f64)>,
    I::IntoIter: Clone,
{
    let points = points.into_iter();
    let mirrored = points
        .clone()
        .filter(|&(x, _)| x != 0.0)
        .map(move |(x, y)| (-x, 2.0 * b - y));
    let anchored = points.map(move |(x, y)| if x == 0.0 { (x, b) } else { (x, y) });

    fit(anchored.chain(mirrored))
}

/// Classic least-squares line over the whole series
pub fn ordinary_least_squares(series: &ObservationSeries) -> RegressionCoefficients {
    fit(series.iter().map(|p| (p.index as f64, p.value)))
}

/// Least-squares line constrained to the y-intercept `b`
pub fn forced_intercept_regression(series: &ObservationSeries, b: f64) -> RegressionCoefficients {
    fit_through_intercept(series.iter().map(|p| (p.index as f64, p.value)), b)
}

/// Least-squares line constrained through the final (highest-index) point.
///
/// Indices are reversed so the last point sits at `x = 0`, the
/// forced-intercept fit is run there, and the line is mapped back to the
/// original direction. Forecasts built on this line start exactly at the
/// latest observed value.
pub fn last_point_regression(series: &ObservationSeries) -> RegressionCoefficients {
    let Some(last) = series.last() else {
        return RegressionCoefficients::new(f64::NAN, f64::NAN);
    };

    let last_x = last.index as f64;
    let last_y = last.value;

    let reversed = series
        .iter()
        .map(move |p| (last_x - p.index as f64, p.value));
    let reversed_fit = fit_through_intercept(reversed, last_y);

    RegressionCoefficients::new(
        -reversed_fit.slope,
        reversed_fit.slope * last_x + last_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn line(slope: f64, intercept: f64, n: usize) -> ObservationSeries {
        ObservationSeries::from_values((0..n).map(|i| slope * i as f64 + intercept))
    }

    fn random_series(rng: &mut StdRng, n: usize) -> ObservationSeries {
        ObservationSeries::from_values((0..n).map(|_| rng.gen_range(-50.0..150.0)))
    }

    #[test]
    fn test_ols_recovers_exact_line() {
        let coeffs = ordinary_least_squares(&line(2.0, 3.0, 10));
        assert_relative_eq!(coeffs.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(coeffs.intercept, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ols_two_points() {
        let series = ObservationSeries::from_values(vec![1.0, 4.0]);
        let coeffs = ordinary_least_squares(&series);
        assert_relative_eq!(coeffs.slope, 3.0);
        assert_relative_eq!(coeffs.intercept, 1.0);
    }

    #[test]
    fn test_ols_noisy_data() {
        let series = ObservationSeries::from_values(vec![1.5, 1.5, 3.5, 3.5]);
        let coeffs = ordinary_least_squares(&series);
        assert_relative_eq!(coeffs.slope, 0.8, epsilon = 1e-12);
        assert_relative_eq!(coeffs.intercept, 1.3, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_input_is_nan_not_panic() {
        let single = ObservationSeries::from_values(vec![5.0]);
        assert!(ordinary_least_squares(&single).slope.is_nan());
        assert!(last_point_regression(&single).slope.is_nan());

        let empty = ObservationSeries::default();
        assert!(!ordinary_least_squares(&empty).is_finite());
        assert!(!last_point_regression(&empty).is_finite());
    }

    #[test]
    fn test_forced_intercept_hits_b() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let n = rng.gen_range(2..40);
            let series = random_series(&mut rng, n);
            let b = rng.gen_range(-100.0..100.0);

            let coeffs = forced_intercept_regression(&series, b);
            assert_relative_eq!(coeffs.intercept, b, epsilon = 1e-9, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_forced_intercept_slope_is_constrained_least_squares() {
        // Through (0, b) the least-squares slope is sum(x * (y - b)) / sum(x^2)
        let series = ObservationSeries::from_values(vec![4.0, 6.0, 5.0, 9.0, 12.0]);
        let b = 3.0;

        let expected = series
            .iter()
            .map(|p| p.index as f64 * (p.value - b))
            .sum::<f64>()
            / series
                .iter()
                .map(|p| (p.index as f64).powi(2))
                .sum::<f64>();

        let coeffs = forced_intercept_regression(&series, b);
        assert_relative_eq!(coeffs.slope, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_forced_intercept_on_exact_line() {
        let coeffs = forced_intercept_regression(&line(2.0, 5.0, 8), 5.0);
        assert_relative_eq!(coeffs.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(coeffs.intercept, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_forced_intercept_ignores_observed_value_at_zero() {
        // Mirroring (0, 10) as well would pull the intercept up to 2
        let series = ObservationSeries::from_values(vec![10.0, 4.0, 6.0]);
        let coeffs = forced_intercept_regression(&series, 0.0);
        assert_relative_eq!(coeffs.intercept, 0.0, epsilon = 1e-12);
        assert_relative_eq!(coeffs.slope, 16.0 / 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_last_point_regression_passes_through_last_point() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let n = rng.gen_range(2..60);
            let series = random_series(&mut rng, n);
            let last = series.last().unwrap();

            let coeffs = last_point_regression(&series);
            assert_relative_eq!(
                coeffs.value_at(last.index as f64),
                last.value,
                epsilon = 1e-9,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_last_point_regression_on_exact_line() {
        let coeffs = last_point_regression(&line(-0.5, 10.0, 12));
        assert_relative_eq!(coeffs.slope, -0.5, epsilon = 1e-12);
        assert_relative_eq!(coeffs.intercept, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_last_point_differs_from_ols_when_last_point_is_off_trend() {
        let series = ObservationSeries::from_values(vec![1.0, 2.0, 3.0, 4.0, 10.0]);
        let ols = ordinary_least_squares(&series);
        let anchored = last_point_regression(&series);

        assert!((ols.value_at(4.0) - 10.0).abs() > 1.0);
        assert_relative_eq!(anchored.value_at(4.0), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_r_squared() {
        let series = line(1.5, -2.0, 6);
        let coeffs = ordinary_least_squares(&series);
        assert_relative_eq!(coeffs.r_squared(&series).unwrap(), 1.0, epsilon = 1e-12);

        let flat = ObservationSeries::from_values(vec![3.0, 3.0, 3.0]);
        assert!(ordinary_least_squares(&flat).r_squared(&flat).is_err());
    }
}
