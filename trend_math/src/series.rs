//! Series preparation for trend regression
//!
//! Contains the data types the regression engine works on and the
//! transforms that prepare them:
//! - Indexing a reference series into (month index, price) pairs
//! - Inflation adjustment against the reference deflators
//! - Natural log / exponential transforms
//!
//! Transforms take the series by value and hand it back transformed, so a
//! caller that still needs the untransformed values clones first.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// A single raw observation: nominal price and the deflator (e.g. CPI) of the same period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub price: f64,
    pub deflator: f64,
}

/// Ordered raw input of (price, deflator) pairs in uniform monthly steps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceSeries {
    points: Vec<ReferencePoint>,
}

impl ReferenceSeries {
    /// Create a reference series from points in chronological order
    pub fn new(points: Vec<ReferencePoint>) -> Self {
        Self { points }
    }

    /// Create a reference series from `(price, deflator)` pairs
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self {
            points: pairs
                .into_iter()
                .map(|(price, deflator)| ReferencePoint { price, deflator })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ReferencePoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReferencePoint> {
        self.points.iter()
    }

    pub fn points(&self) -> &[ReferencePoint] {
        &self.points
    }

    /// Deflator of the first period, the purchasing-power baseline
    pub fn base_deflator(&self) -> Option<f64> {
        self.points.first().map(|p| p.deflator)
    }

    /// Ratio `deflator[0] / deflator[index]` that restates a price at `index`
    /// in first-period purchasing power.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the series. A zero deflator is not
    /// checked and yields an infinite ratio.
    pub fn inflation_ratio(&self, index: usize) -> f64 {
        self.points[0].deflator / self.points[index].deflator
    }

    /// Check the preconditions the permissive calculations assume:
    /// at least two points, finite prices, finite nonzero deflators.
    pub fn validate(&self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(MathError::InvalidSeries(format!(
                "Need at least 2 observations, have {}",
                self.points.len()
            )));
        }

        for (i, point) in self.points.iter().enumerate() {
            if !point.price.is_finite() {
                return Err(MathError::InvalidSeries(format!(
                    "Price at index {} is not finite",
                    i
                )));
            }
            if !point.deflator.is_finite() || point.deflator == 0.0 {
                return Err(MathError::InvalidSeries(format!(
                    "Deflator at index {} must be finite and nonzero, got {}",
                    i, point.deflator
                )));
            }
        }

        Ok(())
    }
}

impl FromIterator<ReferencePoint> for ReferenceSeries {
    fn from_iter<T: IntoIterator<Item = ReferencePoint>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// One (index, value) pair of an observation series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationPoint {
    pub index: usize,
    pub value: f64,
}

/// Chronologically ordered values whose indices form the contiguous range `[0, N)`.
///
/// Holds raw prices, inflation-adjusted prices, log prices or running
/// standard deviations depending on which transforms were applied.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<ObservationPoint>",
    into = "Vec<ObservationPoint>"
)]
pub struct ObservationSeries {
    points: Vec<ObservationPoint>,
}

impl ObservationSeries {
    /// Build a series from values, assigning indices `0, 1, 2, ...`
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self {
            points: values
                .into_iter()
                .enumerate()
                .map(|(index, value)| ObservationPoint { index, value })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Value stored at `index`, if the index is inside the series
    pub fn get(&self, index: usize) -> Option<f64> {
        self.points.get(index).map(|p| p.value)
    }

    /// Final (highest-index) point
    pub fn last(&self) -> Option<ObservationPoint> {
        self.points.last().copied()
    }

    pub fn points(&self) -> &[ObservationPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObservationPoint> {
        self.points.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Apply `f` to every value, keeping indices and order
    pub fn map_values<F>(mut self, mut f: F) -> Self
    where
        F: FnMut(ObservationPoint) -> f64,
    {
        for point in &mut self.points {
            point.value = f(*point);
        }
        self
    }

    /// Combine two series pointwise, matched by index.
    ///
    /// The result is as long as the shorter input.
    pub fn zip_with<F>(&self, other: &ObservationSeries, mut f: F) -> Self
    where
        F: FnMut(f64, f64) -> f64,
    {
        Self {
            points: self
                .points
                .iter()
                .zip(other.points.iter())
                .map(|(a, b)| ObservationPoint {
                    index: a.index,
                    value: f(a.value, b.value),
                })
                .collect(),
        }
    }

    /// Replace every nonzero value with its natural log.
    ///
    /// Zero is kept as is and acts as a "no data" marker, so a genuine zero
    /// price cannot be told apart from a missing one.
    pub fn log_transform(self) -> Self {
        self.map_values(|p| if p.value != 0.0 { p.value.ln() } else { p.value })
    }

    /// Inverse of [`log_transform`](Self::log_transform); zero passes through unchanged.
    pub fn exp_transform(self) -> Self {
        self.map_values(|p| if p.value != 0.0 { p.value.exp() } else { p.value })
    }

    /// Restate every value in first-period purchasing power:
    /// `value_i * deflator[0] / deflator[i]`.
    ///
    /// # Panics
    ///
    /// Panics if the series is longer than `reference`.
    pub fn adjust_for_inflation(self, reference: &ReferenceSeries) -> Self {
        self.map_values(|p| p.value * reference.inflation_ratio(p.index))
    }

    /// Inverse of [`adjust_for_inflation`](Self::adjust_for_inflation).
    ///
    /// # Panics
    ///
    /// Panics if the series is longer than `reference`.
    pub fn unadjust_for_inflation(self, reference: &ReferenceSeries) -> Self {
        self.map_values(|p| p.value / reference.inflation_ratio(p.index))
    }
}

impl TryFrom<Vec<ObservationPoint>> for ObservationSeries {
    type Error = MathError;

    fn try_from(points: Vec<ObservationPoint>) -> Result<Self> {
        if let Some((position, point)) = points
            .iter()
            .enumerate()
            .find(|(position, point)| point.index != *position)
        {
            return Err(MathError::InvalidSeries(format!(
                "Expected index {} at position {}, found {}",
                position, position, point.index
            )));
        }

        Ok(Self { points })
    }
}

impl From<ObservationSeries> for Vec<ObservationPoint> {
    fn from(series: ObservationSeries) -> Self {
        series.points
    }
}

/// Pair every reference price with its position: `(i, price_i)` for `i = 0..N`
pub fn to_indexed_series(reference: &ReferenceSeries) -> ObservationSeries {
    ObservationSeries::from_values(reference.iter().map(|p| p.price))
}
