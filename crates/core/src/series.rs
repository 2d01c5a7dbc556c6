// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! An ordered, timestamp-keyed numeric series.

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::{UnixNanos, math};

/// An ordered mapping from timestamp to `f64` value.
///
/// Invariant: timestamps are strictly increasing (and therefore unique). Missing
/// observations are represented as `f64::NAN`; reductions skip them.
///
/// Element-wise arithmetic between two series requires identical indices - index
/// alignment is the caller's responsibility and misalignment is treated as a
/// programming error (the operation panics).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    index: Vec<UnixNanos>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Creates a new [`TimeSeries`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `index` and `values` differ in length, or if `index` is not
    /// strictly increasing.
    #[must_use]
    pub fn new(index: Vec<UnixNanos>, values: Vec<f64>) -> Self {
        Self::new_checked(index, values).expect("invalid `TimeSeries`")
    }

    /// Creates a new [`TimeSeries`] instance, validating the index invariant.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` and `values` differ in length, or if `index`
    /// is not strictly increasing.
    pub fn new_checked(index: Vec<UnixNanos>, values: Vec<f64>) -> anyhow::Result<Self> {
        if index.len() != values.len() {
            anyhow::bail!(
                "index length {} does not match values length {}",
                index.len(),
                values.len()
            );
        }
        if let Some(window) = index.windows(2).find(|w| w[0] >= w[1]) {
            anyhow::bail!(
                "index timestamps must be strictly increasing, found {} >= {}",
                window[0],
                window[1]
            );
        }
        Ok(Self { index, values })
    }

    /// Creates an empty [`TimeSeries`].
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            index: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the series holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the timestamps of the series.
    #[must_use]
    pub fn timestamps(&self) -> &[UnixNanos] {
        &self.index
    }

    /// Returns the values of the series.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the observation at position `pos`.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<(UnixNanos, f64)> {
        Some((*self.index.get(pos)?, *self.values.get(pos)?))
    }

    /// Returns the first timestamp, if any.
    #[must_use]
    pub fn first_timestamp(&self) -> Option<UnixNanos> {
        self.index.first().copied()
    }

    /// Returns the last timestamp, if any.
    #[must_use]
    pub fn last_timestamp(&self) -> Option<UnixNanos> {
        self.index.last().copied()
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn first_value(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Returns the last value, if any.
    #[must_use]
    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Returns the value stored at the given timestamp, if present.
    #[must_use]
    pub fn value_at(&self, ts: UnixNanos) -> Option<f64> {
        let pos = self.index.binary_search(&ts).ok()?;
        Some(self.values[pos])
    }

    /// Iterates over `(timestamp, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (UnixNanos, f64)> + '_ {
        self.index
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Returns a series with the same index and the given values.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not match the index length.
    #[must_use]
    pub fn with_values(&self, values: Vec<f64>) -> Self {
        assert_eq!(
            values.len(),
            self.index.len(),
            "values length must match index length"
        );
        Self {
            index: self.index.clone(),
            values,
        }
    }

    /// Applies `f` to every value, keeping the index.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        self.with_values(self.values.iter().map(|&v| f(v)).collect())
    }

    /// Returns the element-wise absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        self.map(f64::abs)
    }

    /// Keeps only the observations for which `predicate` returns `true`.
    #[must_use]
    pub fn filter(&self, predicate: impl Fn(UnixNanos, f64) -> bool) -> Self {
        let (index, values) = self
            .iter()
            .filter(|&(ts, value)| predicate(ts, value))
            .unzip();
        Self { index, values }
    }

    /// Returns the observations with timestamps in the inclusive range `[start, end]`.
    ///
    /// `None` bounds are unbounded.
    #[must_use]
    pub fn loc_range(&self, start: Option<UnixNanos>, end: Option<UnixNanos>) -> Self {
        self.filter(|ts, _| start.is_none_or(|s| ts >= s) && end.is_none_or(|e| ts <= e))
    }

    /// Removes the observations with timestamps in the half-open range `(start, end]`.
    #[must_use]
    pub fn remove_between(&self, start: UnixNanos, end: UnixNanos) -> Self {
        self.filter(|ts, _| ts <= start || ts > end)
    }

    /// Combines two aligned series element-wise.
    ///
    /// # Panics
    ///
    /// Panics if the series indices are not identical.
    #[must_use]
    pub fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        assert_eq!(
            self.index, other.index,
            "series indices are misaligned; alignment is the caller's responsibility"
        );
        let values = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Self {
            index: self.index.clone(),
            values,
        }
    }

    /// Returns the number of valid (non-NaN) observations.
    #[must_use]
    pub fn count_valid(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }

    /// Sums the valid observations (0.0 when none are present).
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().filter(|v| !v.is_nan()).sum()
    }

    /// Returns the mean of the valid observations, or `NaN` if there are none.
    #[must_use]
    pub fn mean(&self) -> f64 {
        math::mean(&self.values)
    }

    /// Returns the standard deviation of the valid observations with `ddof`
    /// delta degrees of freedom, or `NaN` for degenerate input.
    #[must_use]
    pub fn std(&self, ddof: usize) -> f64 {
        math::std(&self.values, ddof)
    }

    /// Returns the minimum valid observation, or `NaN` if there are none.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(f64::NAN, f64::min)
    }

    /// Returns the maximum valid observation, or `NaN` if there are none.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(f64::NAN, f64::max)
    }

    /// Returns the timestamp of the first minimum valid observation.
    #[must_use]
    pub fn idx_min(&self) -> Option<UnixNanos> {
        let mut best: Option<(UnixNanos, f64)> = None;
        for (ts, value) in self.iter() {
            if value.is_nan() {
                continue;
            }
            match best {
                Some((_, current)) if value >= current => {}
                _ => best = Some((ts, value)),
            }
        }
        best.map(|(ts, _)| ts)
    }

    /// Estimates the `q`-quantile of the valid observations with linear interpolation.
    ///
    /// # Panics
    ///
    /// Panics if `q` is outside `[0, 1]`.
    #[must_use]
    pub fn quantile(&self, q: f64) -> f64 {
        math::quantile_linear(&self.values, q)
    }

    /// Returns the forward-propagated running maximum.
    ///
    /// `NaN` inputs produce `NaN` outputs without disturbing the accumulator.
    #[must_use]
    pub fn cumulative_max(&self) -> Self {
        let mut running = f64::NAN;
        let values = self
            .values
            .iter()
            .map(|&v| {
                if v.is_nan() {
                    return f64::NAN;
                }
                running = if running.is_nan() { v } else { running.max(v) };
                running
            })
            .collect();
        Self {
            index: self.index.clone(),
            values,
        }
    }

    /// Returns the trailing rolling mean over `window` observations.
    ///
    /// The leading `window - 1` slots are `NaN`.
    ///
    /// # Panics
    ///
    /// Panics if `window` is zero.
    #[must_use]
    pub fn rolling_mean(&self, window: usize) -> Self {
        self.rolling(window, |chunk| math::mean(chunk))
    }

    /// Returns the trailing rolling standard deviation over `window` observations.
    ///
    /// The leading `window - 1` slots are `NaN`.
    ///
    /// # Panics
    ///
    /// Panics if `window` is zero.
    #[must_use]
    pub fn rolling_std(&self, window: usize, ddof: usize) -> Self {
        self.rolling(window, move |chunk| math::std(chunk, ddof))
    }

    fn rolling(&self, window: usize, f: impl Fn(&[f64]) -> f64) -> Self {
        assert!(window > 0, "`window` must be positive");
        let values = (0..self.len())
            .map(|pos| {
                if pos + 1 < window {
                    f64::NAN
                } else {
                    f(&self.values[pos + 1 - window..=pos])
                }
            })
            .collect();
        Self {
            index: self.index.clone(),
            values,
        }
    }
}

impl Add for &TimeSeries {
    type Output = TimeSeries;

    fn add(self, rhs: Self) -> TimeSeries {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub for &TimeSeries {
    type Output = TimeSeries;

    fn sub(self, rhs: Self) -> TimeSeries {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Mul for &TimeSeries {
    type Output = TimeSeries;

    fn mul(self, rhs: Self) -> TimeSeries {
        self.zip_with(rhs, |a, b| a * b)
    }
}

impl Div for &TimeSeries {
    type Output = TimeSeries;

    fn div(self, rhs: Self) -> TimeSeries {
        self.zip_with(rhs, |a, b| a / b)
    }
}

impl Add<f64> for &TimeSeries {
    type Output = TimeSeries;

    fn add(self, rhs: f64) -> TimeSeries {
        self.map(|v| v + rhs)
    }
}

impl Sub<f64> for &TimeSeries {
    type Output = TimeSeries;

    fn sub(self, rhs: f64) -> TimeSeries {
        self.map(|v| v - rhs)
    }
}

impl Mul<f64> for &TimeSeries {
    type Output = TimeSeries;

    fn mul(self, rhs: f64) -> TimeSeries {
        self.map(|v| v * rhs)
    }
}

impl Div<f64> for &TimeSeries {
    type Output = TimeSeries;

    fn div(self, rhs: f64) -> TimeSeries {
        self.map(|v| v / rhs)
    }
}
