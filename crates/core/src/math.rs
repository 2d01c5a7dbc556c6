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

//! Numeric helpers shared by the analytics engine.
//!
//! All slice statistics skip non-finite (`NaN`) entries and return `NaN` for
//! degenerate inputs instead of erroring, matching the engine-wide policy of
//! degrading to "not a number" on empty data.

/// Macro for approximate floating-point equality comparison.
///
/// Compares two floating-point values with a specified epsilon tolerance,
/// providing a safe alternative to exact equality checks which can fail due to
/// floating-point precision issues.
#[macro_export]
macro_rules! approx_eq {
    ($type:ty, $left:expr, $right:expr, epsilon = $epsilon:expr) => {{
        let left_val: $type = $left;
        let right_val: $type = $right;
        (left_val - right_val).abs() < $epsilon
    }};
}

/// Returns the arithmetic mean of the valid (non-NaN) entries, or `NaN` if there are none.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &value in values {
        if !value.is_nan() {
            sum += value;
            count += 1;
        }
    }
    if count == 0 {
        return f64::NAN;
    }
    sum / count as f64
}

/// Returns the standard deviation of the valid entries with `ddof` delta degrees of freedom.
///
/// Returns `NaN` when fewer than `ddof + 1` valid entries are present.
#[must_use]
pub fn std(values: &[f64], ddof: usize) -> f64 {
    let m = mean(values);
    if m.is_nan() {
        return f64::NAN;
    }
    let mut sum_sq = 0.0;
    let mut count = 0usize;
    for &value in values {
        if !value.is_nan() {
            sum_sq += (value - m) * (value - m);
            count += 1;
        }
    }
    if count <= ddof {
        return f64::NAN;
    }
    (sum_sq / (count - ddof) as f64).sqrt()
}

/// Estimates the `q`-quantile of the valid entries using linear interpolation.
///
/// Returns `NaN` when no valid entries are present.
///
/// # Panics
///
/// Panics if `q` is outside `[0, 1]`.
#[must_use]
pub fn quantile_linear(values: &[f64], q: f64) -> f64 {
    assert!((0.0..=1.0).contains(&q), "`q` must be in [0, 1], was {q}");

    let mut valid: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if valid.is_empty() {
        return f64::NAN;
    }
    valid.sort_by(|a, b| a.partial_cmp(b).expect("NaN values were filtered"));

    let position = q * (valid.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return valid[lower];
    }
    let weight = position - lower as f64;
    valid[lower] + weight * (valid[upper] - valid[lower])
}

/// Computes the ordinary-least-squares beta of `y` regressed on `x`:
/// `Cov(x, y) / Var(x)`.
///
/// Returns `NaN` when fewer than two observations are given or the variance of
/// `x` is zero.
///
/// # Panics
///
/// Panics if the slices have different lengths.
#[must_use]
pub fn ols_beta(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len(), "`x` and `y` must have the same length");
    if x.len() < 2 {
        return f64::NAN;
    }

    let mean_x = mean(x);
    let mean_y = mean(y);
    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        covariance += dx * (yi - mean_y);
        variance += dx * dx;
    }
    if variance == 0.0 {
        return f64::NAN;
    }
    covariance / variance
}
