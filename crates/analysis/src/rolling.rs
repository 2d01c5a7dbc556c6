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

//! Rolling windowed statistics, computed in parallel over index positions.

use folio_core::{TimeSeries, datetime::APPROX_BDAYS_PER_YEAR, math::ols_beta};
use rayon::prelude::*;

use crate::MIN_PARALLEL_TASKS;

/// Computes the rolling ordinary-least-squares beta of `strategy` against
/// `benchmark`.
///
/// Output slot `p` regresses over the trailing inclusive window of positions
/// `p - window ..= p`; slots with insufficient history are `NaN`. The
/// per-position regressions are independent and run on the rayon pool for
/// larger inputs, each writing to its own slot of the pre-sized output buffer.
///
/// # Panics
///
/// Panics if the series indices are not identical, or if `window` is zero.
#[must_use]
pub fn rolling_beta(strategy: &TimeSeries, benchmark: &TimeSeries, window: usize) -> TimeSeries {
    assert_eq!(
        strategy.timestamps(),
        benchmark.timestamps(),
        "series indices are misaligned; alignment is the caller's responsibility"
    );
    assert!(window > 0, "`window` must be positive");

    let n = strategy.len();
    let mut output = vec![f64::NAN; n];

    if n > window {
        let strategy_values = strategy.values();
        let benchmark_values = benchmark.values();
        let beta_at = |pos: usize| {
            ols_beta(
                &benchmark_values[pos - window..=pos],
                &strategy_values[pos - window..=pos],
            )
        };

        if n - window >= MIN_PARALLEL_TASKS {
            output[window..]
                .par_iter_mut()
                .enumerate()
                .for_each(|(offset, slot)| *slot = beta_at(window + offset));
        } else {
            for pos in window..n {
                output[pos] = beta_at(pos);
            }
        }
    }

    strategy.with_values(output)
}

/// Computes the trailing rolling sample standard deviation over `window`
/// periods, annualized by `sqrt(252)`.
///
/// # Panics
///
/// Panics if `window` is zero.
#[must_use]
pub fn rolling_volatility(returns: &TimeSeries, window: usize) -> TimeSeries {
    let annualizer = f64::from(APPROX_BDAYS_PER_YEAR).sqrt();
    &returns.rolling_std(window, 1) * annualizer
}

/// Computes the trailing rolling Sharpe ratio (mean over standard deviation)
/// over `window` periods, annualized by `sqrt(252)`.
///
/// # Panics
///
/// Panics if `window` is zero.
#[must_use]
pub fn rolling_sharpe(returns: &TimeSeries, window: usize) -> TimeSeries {
    let annualizer = f64::from(APPROX_BDAYS_PER_YEAR).sqrt();
    let mean = returns.rolling_mean(window);
    let std = returns.rolling_std(window, 1);
    &(&mean / &std) * annualizer
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use folio_core::{UnixNanos, approx_eq, datetime::NANOSECONDS_IN_DAY, math};
    use rstest::rstest;

    use super::*;

    fn daily(values: Vec<f64>) -> TimeSeries {
        let index = (0..values.len() as u64)
            .map(|day| UnixNanos::new(day * NANOSECONDS_IN_DAY))
            .collect();
        TimeSeries::new(index, values)
    }

    #[rstest]
    fn test_rolling_beta_perfectly_correlated() {
        let benchmark = daily(vec![0.01, -0.02, 0.03, 0.01, -0.01, 0.02, 0.00, 0.01]);
        let strategy = benchmark.map(|v| 2.0 * v);
        let window = 3;

        let beta = rolling_beta(&strategy, &benchmark, window);
        for (pos, value) in beta.values().iter().enumerate() {
            if pos < window {
                assert!(value.is_nan());
            } else {
                assert!(approx_eq!(f64, *value, 2.0, epsilon = 1e-9));
            }
        }
    }

    #[rstest]
    fn test_rolling_beta_matches_serial_ols() {
        // Long enough to cross the parallel-dispatch threshold
        let benchmark_values: Vec<f64> = (0..64).map(|i| ((i * 37 + 11) % 17) as f64 / 100.0 - 0.08).collect();
        let strategy_values: Vec<f64> = (0..64).map(|i| ((i * 23 + 5) % 19) as f64 / 100.0 - 0.09).collect();
        let benchmark = daily(benchmark_values);
        let strategy = daily(strategy_values);
        let window = 21;

        let beta = rolling_beta(&strategy, &benchmark, window);
        for pos in window..benchmark.len() {
            let expected = math::ols_beta(
                &benchmark.values()[pos - window..=pos],
                &strategy.values()[pos - window..=pos],
            );
            assert!(approx_eq!(f64, beta.values()[pos], expected, epsilon = 1e-12));
        }
    }

    #[rstest]
    fn test_rolling_beta_short_series_all_nan() {
        let benchmark = daily(vec![0.01, 0.02]);
        let strategy = daily(vec![0.02, 0.04]);
        let beta = rolling_beta(&strategy, &benchmark, 5);
        assert!(beta.values().iter().all(|v| v.is_nan()));
    }

    #[rstest]
    #[should_panic(expected = "misaligned")]
    fn test_rolling_beta_misaligned_panics() {
        let strategy = daily(vec![0.01, 0.02]);
        let benchmark = TimeSeries::new(
            vec![UnixNanos::new(7), UnixNanos::new(8)],
            vec![0.01, 0.02],
        );
        let _ = rolling_beta(&strategy, &benchmark, 1);
    }

    #[rstest]
    fn test_rolling_volatility_annualizes() {
        let returns = daily(vec![0.01, 0.02, 0.04, 0.01]);
        let vol = rolling_volatility(&returns, 2);
        assert!(vol.values()[0].is_nan());
        let expected = math::std(&[0.01, 0.02], 1) * 252.0f64.sqrt();
        assert!(approx_eq!(f64, vol.values()[1], expected, epsilon = 1e-12));
    }

    #[rstest]
    fn test_rolling_sharpe() {
        let returns = daily(vec![0.01, 0.02, 0.03, 0.02]);
        let sharpe = rolling_sharpe(&returns, 3);
        assert!(sharpe.values()[1].is_nan());
        let window = [0.01, 0.02, 0.03];
        let expected = math::mean(&window) / math::std(&window, 1) * 252.0f64.sqrt();
        assert!(approx_eq!(f64, sharpe.values()[2], expected, epsilon = 1e-12));
    }
}
