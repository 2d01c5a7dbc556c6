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

//! Scalar return-based performance statistics.
//!
//! All statistics degrade to `NaN` on empty or degenerate input rather than
//! erroring, so a failing metric never aborts a whole analytics run.

use folio_core::{TimeSeries, math};

use crate::{
    drawdown::underwater,
    returns::{Period, cum_returns_final},
};

/// Computes the compound annual growth rate of a returns series.
#[must_use]
pub fn annual_return(returns: &TimeSeries, period: Period) -> f64 {
    if returns.is_empty() {
        return f64::NAN;
    }
    let num_years = returns.len() as f64 / f64::from(period.annualization_factor());
    cum_returns_final(returns, 1.0).powf(1.0 / num_years) - 1.0
}

/// Computes the annualized volatility (sample standard deviation scaled by the
/// square root of the annualization factor).
#[must_use]
pub fn annual_volatility(returns: &TimeSeries, period: Period) -> f64 {
    if returns.len() < 2 {
        return f64::NAN;
    }
    returns.std(1) * f64::from(period.annualization_factor()).sqrt()
}

/// Computes the annualized Sharpe ratio of returns in excess of a constant
/// per-period risk-free rate.
#[must_use]
pub fn sharpe_ratio(returns: &TimeSeries, risk_free: f64, period: Period) -> f64 {
    if returns.len() < 2 {
        return f64::NAN;
    }
    let excess = returns.map(|r| r - risk_free);
    let std = excess.std(1);
    if std.is_nan() || std < f64::EPSILON {
        return f64::NAN;
    }
    excess.mean() / std * f64::from(period.annualization_factor()).sqrt()
}

/// Computes the annualized downside risk below a per-period required return.
#[must_use]
pub fn downside_risk(returns: &TimeSeries, required_return: f64, period: Period) -> f64 {
    if returns.is_empty() {
        return f64::NAN;
    }
    let downside = returns.map(|r| {
        if r.is_nan() {
            f64::NAN
        } else {
            (r - required_return).min(0.0)
        }
    });
    let mean_sq = math::mean(
        &downside
            .values()
            .iter()
            .map(|v| v * v)
            .collect::<Vec<f64>>(),
    );
    mean_sq.sqrt() * f64::from(period.annualization_factor()).sqrt()
}

/// Computes the annualized Sortino ratio: average return above the required
/// return over the downside risk.
#[must_use]
pub fn sortino_ratio(returns: &TimeSeries, required_return: f64, period: Period) -> f64 {
    if returns.len() < 2 {
        return f64::NAN;
    }
    let risk = downside_risk(returns, required_return, period);
    if risk.is_nan() || risk <= 0.0 {
        return f64::NAN;
    }
    let adjusted = returns.map(|r| r - required_return);
    adjusted.mean() * f64::from(period.annualization_factor()) / risk
}

/// Computes the maximum drawdown as a (negative) fraction of the peak.
#[must_use]
pub fn max_drawdown(returns: &TimeSeries) -> f64 {
    if returns.is_empty() {
        return f64::NAN;
    }
    underwater(returns).min()
}

/// Computes the Calmar ratio: annual return over the absolute maximum
/// drawdown. `NaN` when there is no drawdown.
#[must_use]
pub fn calmar_ratio(returns: &TimeSeries, period: Period) -> f64 {
    let max_dd = max_drawdown(returns);
    if max_dd.is_nan() || max_dd >= 0.0 {
        return f64::NAN;
    }
    let ratio = annual_return(returns, period) / max_dd.abs();
    if ratio.is_infinite() { f64::NAN } else { ratio }
}

/// Computes the Value at Risk as the `cutoff` quantile of returns.
///
/// # Panics
///
/// Panics if `cutoff` is outside `[0, 1]`.
#[must_use]
pub fn value_at_risk(returns: &TimeSeries, cutoff: f64) -> f64 {
    returns.quantile(cutoff)
}

/// Computes the Conditional Value at Risk (expected shortfall): the mean of
/// the worst `cutoff` fraction of returns.
#[must_use]
pub fn conditional_value_at_risk(returns: &TimeSeries, cutoff: f64) -> f64 {
    let mut valid: Vec<f64> = returns
        .values()
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .collect();
    if valid.is_empty() {
        return f64::NAN;
    }
    valid.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let cutoff_index = ((valid.len() - 1) as f64 * cutoff) as usize;
    math::mean(&valid[..=cutoff_index])
}

/// Computes the parametric Value at Risk `mean - sigma * std`.
#[must_use]
pub fn parametric_value_at_risk(returns: &TimeSeries, sigma: f64) -> f64 {
    returns.mean() - sigma * returns.std(1)
}

/// Computes the tail ratio: `|95th percentile| / |5th percentile|`.
///
/// A ratio of 0.25 means losses are four times as bad as profits.
#[must_use]
pub fn tail_ratio(returns: &TimeSeries) -> f64 {
    if returns.count_valid() == 0 {
        return f64::NAN;
    }
    returns.quantile(0.95).abs() / returns.quantile(0.05).abs()
}

/// Computes the R-squared of a linear fit to the cumulative log returns - a
/// measure of how consistent the growth of the equity curve is.
#[must_use]
pub fn stability_of_timeseries(returns: &TimeSeries) -> f64 {
    if returns.len() < 2 {
        return f64::NAN;
    }

    let mut cumulative = 0.0;
    let cum_log: Vec<f64> = returns
        .values()
        .iter()
        .filter(|v| !v.is_nan())
        .map(|&r| {
            cumulative += (1.0 + r).ln();
            cumulative
        })
        .collect();
    if cum_log.is_empty() {
        return f64::NAN;
    }

    let xs: Vec<f64> = (0..cum_log.len()).map(|i| i as f64).collect();
    let r_value = correlation(&xs, &cum_log);
    r_value * r_value
}

/// Computes the OLS beta of strategy returns against benchmark returns, both
/// in excess of a constant risk-free rate.
///
/// # Panics
///
/// Panics if the series indices are not identical.
#[must_use]
pub fn beta(strategy: &TimeSeries, benchmark: &TimeSeries, risk_free: f64) -> f64 {
    assert_eq!(
        strategy.timestamps(),
        benchmark.timestamps(),
        "series indices are misaligned; alignment is the caller's responsibility"
    );
    if strategy.len() < 2 {
        return f64::NAN;
    }
    let adj_strategy: Vec<f64> = strategy.values().iter().map(|r| r - risk_free).collect();
    let adj_benchmark: Vec<f64> = benchmark.values().iter().map(|r| r - risk_free).collect();
    math::ols_beta(&adj_benchmark, &adj_strategy)
}

/// Computes the annualized Jensen's alpha and the OLS beta of strategy returns
/// against benchmark returns.
///
/// # Panics
///
/// Panics if the series indices are not identical.
#[must_use]
pub fn alpha_beta(
    strategy: &TimeSeries,
    benchmark: &TimeSeries,
    risk_free: f64,
    period: Period,
) -> (f64, f64) {
    let b = beta(strategy, benchmark, risk_free);
    if b.is_nan() {
        return (f64::NAN, b);
    }

    let residual_mean = math::mean(
        &strategy
            .values()
            .iter()
            .zip(benchmark.values().iter())
            .map(|(&s, &m)| (s - risk_free) - b * (m - risk_free))
            .collect::<Vec<f64>>(),
    );
    let alpha = (1.0 + residual_mean).powf(f64::from(period.annualization_factor())) - 1.0;
    (alpha, b)
}

fn correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let mean_x = math::mean(xs);
    let mean_y = math::mean(ys);
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x) * (x - mean_x);
        var_y += (y - mean_y) * (y - mean_y);
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use folio_core::{UnixNanos, approx_eq, datetime::NANOSECONDS_IN_DAY};
    use rstest::rstest;

    use super::*;

    fn daily(values: Vec<f64>) -> TimeSeries {
        let index = (0..values.len() as u64)
            .map(|day| UnixNanos::new(day * NANOSECONDS_IN_DAY))
            .collect();
        TimeSeries::new(index, values)
    }

    #[rstest]
    fn test_annual_return_one_year_of_flat_growth() {
        // 252 days of 0.1% daily growth compound to (1.001)^252 over one year
        let returns = daily(vec![0.001; 252]);
        let expected = 1.001f64.powi(252) - 1.0;
        assert!(approx_eq!(
            f64,
            annual_return(&returns, Period::Daily),
            expected,
            epsilon = 1e-9
        ));
    }

    #[rstest]
    fn test_annual_volatility_scales_by_sqrt_factor() {
        let returns = daily(vec![0.01, -0.02, 0.015, -0.005, 0.025]);
        let expected = returns.std(1) * 252.0f64.sqrt();
        assert!(approx_eq!(
            f64,
            annual_volatility(&returns, Period::Daily),
            expected,
            epsilon = 1e-12
        ));
        assert!(annual_volatility(&daily(vec![0.01]), Period::Daily).is_nan());
    }

    #[rstest]
    fn test_sharpe_ratio_known_value() {
        let returns = daily(vec![0.01, -0.02, 0.015, -0.005, 0.025]);
        assert!(approx_eq!(
            f64,
            sharpe_ratio(&returns, 0.0, Period::Daily),
            4.48998886412873,
            epsilon = 1e-9
        ));
    }

    #[rstest]
    fn test_sharpe_ratio_zero_variance_is_nan() {
        let returns = daily(vec![0.01; 10]);
        assert!(sharpe_ratio(&returns, 0.0, Period::Daily).is_nan());
    }

    #[rstest]
    fn test_sortino_uses_downside_only() {
        let returns = daily(vec![0.02, -0.01, 0.03, -0.02, 0.01]);
        let sortino = sortino_ratio(&returns, 0.0, Period::Daily);
        let sharpe = sharpe_ratio(&returns, 0.0, Period::Daily);
        assert!(sortino.is_finite());
        // Downside deviation is smaller than total deviation here
        assert!(sortino > sharpe);
    }

    #[rstest]
    fn test_sortino_all_positive_is_nan() {
        let returns = daily(vec![0.01, 0.02, 0.03]);
        assert!(sortino_ratio(&returns, 0.0, Period::Daily).is_nan());
    }

    #[rstest]
    fn test_max_drawdown_known_path() {
        // Cumulative path 1.1, 0.99, 1.0885 -> worst underwater is -0.1
        let returns = daily(vec![0.1, -0.1, 0.1]);
        assert!(approx_eq!(
            f64,
            max_drawdown(&returns),
            -0.1,
            epsilon = 1e-12
        ));
        assert!(max_drawdown(&TimeSeries::empty()).is_nan());
    }

    #[rstest]
    fn test_max_drawdown_single_observation_is_zero() {
        assert_eq!(max_drawdown(&daily(vec![0.02])), 0.0);
    }

    #[rstest]
    fn test_max_drawdown_monotonic_growth_is_zero() {
        let returns = daily(vec![0.01, 0.02, 0.03]);
        assert_eq!(max_drawdown(&returns), 0.0);
    }

    #[rstest]
    fn test_calmar_requires_a_drawdown() {
        let growing = daily(vec![0.01, 0.02, 0.03]);
        assert!(calmar_ratio(&growing, Period::Daily).is_nan());

        let with_drawdown = daily(vec![0.1, -0.1, 0.1, 0.05]);
        assert!(calmar_ratio(&with_drawdown, Period::Daily).is_finite());
    }

    #[rstest]
    fn test_value_at_risk_is_quantile() {
        let returns = daily(vec![-0.05, -0.02, 0.0, 0.01, 0.03]);
        assert!(approx_eq!(
            f64,
            value_at_risk(&returns, 0.0),
            -0.05,
            epsilon = 1e-12
        ));
        assert!(value_at_risk(&returns, 0.05) > -0.05);
    }

    #[rstest]
    fn test_conditional_value_at_risk_is_tail_mean() {
        let returns = daily(vec![-0.10, -0.05, 0.0, 0.01, 0.02, 0.03, 0.01, 0.0, 0.02, 0.01]);
        // Worst 5% of ten observations is the single worst return
        assert!(approx_eq!(
            f64,
            conditional_value_at_risk(&returns, 0.05),
            -0.10,
            epsilon = 1e-12
        ));
    }

    #[rstest]
    fn test_parametric_value_at_risk() {
        let returns = daily(vec![0.01, -0.02, 0.015, -0.005, 0.025]);
        let expected = returns.mean() - 2.0 * returns.std(1);
        assert!(approx_eq!(
            f64,
            parametric_value_at_risk(&returns, 2.0),
            expected,
            epsilon = 1e-12
        ));
    }

    #[rstest]
    fn test_tail_ratio_symmetric_distribution() {
        let returns = daily(vec![-0.02, -0.01, 0.0, 0.01, 0.02]);
        assert!(approx_eq!(
            f64,
            tail_ratio(&returns),
            1.0,
            epsilon = 1e-12
        ));
    }

    #[rstest]
    fn test_stability_of_constant_growth_is_one() {
        let returns = daily(vec![0.01; 20]);
        assert!(approx_eq!(
            f64,
            stability_of_timeseries(&returns),
            1.0,
            epsilon = 1e-9
        ));
    }

    #[rstest]
    fn test_beta_of_scaled_benchmark() {
        let benchmark = daily(vec![0.01, -0.02, 0.03, 0.01, -0.01]);
        let strategy = benchmark.map(|v| 1.5 * v);
        assert!(approx_eq!(
            f64,
            beta(&strategy, &benchmark, 0.0),
            1.5,
            epsilon = 1e-9
        ));
    }

    #[rstest]
    fn test_alpha_beta_no_excess_return() {
        let benchmark = daily(vec![0.01, -0.02, 0.03, 0.01, -0.01]);
        let (alpha, beta_value) = alpha_beta(&benchmark.clone(), &benchmark, 0.0, Period::Daily);
        assert!(approx_eq!(f64, beta_value, 1.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, alpha, 0.0, epsilon = 1e-9));
    }
}
