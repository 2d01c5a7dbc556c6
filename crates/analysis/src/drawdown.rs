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

//! Underwater-curve detection and iterative top-K drawdown extraction.

use folio_core::{TimeSeries, UnixNanos, datetime::business_day_count};
use serde::{Deserialize, Serialize};

use crate::returns::cum_returns;

/// A single peak-to-valley drawdown episode.
///
/// `recovery` is absent while the drawdown is still open at the end of the
/// series.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DrawdownSpan {
    pub peak: UnixNanos,
    pub valley: UnixNanos,
    pub recovery: Option<UnixNanos>,
}

/// A row of the drawdown table produced by [`drawdown_table`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawdownRecord {
    /// Discovery ordinal (0 = worst remaining drawdown found first).
    pub index: usize,
    pub peak: UnixNanos,
    pub valley: UnixNanos,
    pub recovery: Option<UnixNanos>,
    /// Peak-to-valley decline as a percentage of the peak value, in `[0, 100]`.
    pub net_drawdown_pct: f64,
    /// Business days from peak to recovery inclusive; absent while unrecovered.
    pub duration_days: Option<u64>,
}

/// Derives the underwater curve `cum / running_max(cum) - 1` from a
/// cumulative-return series. Every value of the result is `<= 0`.
#[must_use]
pub fn underwater_from_cum_returns(cum: &TimeSeries) -> TimeSeries {
    let running_max = cum.cumulative_max();
    &(cum / &running_max) - 1.0
}

/// Derives the underwater curve directly from periodic returns.
#[must_use]
pub fn underwater(returns: &TimeSeries) -> TimeSeries {
    underwater_from_cum_returns(&cum_returns(returns, 1.0))
}

/// Locates the maximum drawdown on an underwater curve.
///
/// The valley is the timestamp of the global minimum; the peak is the last
/// zero crossing at or before the valley; the recovery is the first zero at or
/// after the valley (absent if the curve never recovers).
///
/// Returns `None` when the series holds no valid observations.
///
/// # Panics
///
/// Panics if the input is not an underwater curve (i.e. it has no zero value
/// at or before its minimum; a curve produced by
/// [`underwater_from_cum_returns`] always starts at zero).
#[must_use]
pub fn max_drawdown_span(underwater: &TimeSeries) -> Option<DrawdownSpan> {
    let valley = underwater.idx_min()?;

    let peak = underwater
        .iter()
        .take_while(|&(ts, _)| ts <= valley)
        .filter(|&(_, value)| value == 0.0)
        .map(|(ts, _)| ts)
        .last()
        .expect("underwater curve has no zero at or before the valley");

    let recovery = underwater
        .iter()
        .skip_while(|&(ts, _)| ts < valley)
        .find(|&(_, value)| value == 0.0)
        .map(|(ts, _)| ts);

    Some(DrawdownSpan {
        peak,
        valley,
        recovery,
    })
}

/// Locates the maximum drawdown of a returns series.
#[must_use]
pub fn max_drawdown(returns: &TimeSeries) -> Option<DrawdownSpan> {
    max_drawdown_span(&underwater(returns))
}

/// Iteratively extracts up to `top` drawdown episodes from a cumulative-return
/// series, worst remaining drawdown first.
///
/// The fold threads a shrinking "remaining" underwater series: once an episode
/// is extracted, its half-open interval `(peak, recovery]` is dropped; an
/// unrecovered episode truncates the remaining series to the prefix ending at
/// its peak, so data beyond an open drawdown's peak is not examined again.
/// Extraction stops when `top` episodes are found, the remaining series is
/// empty, or its minimum reaches zero.
#[must_use]
pub fn top_drawdowns_from_cum_returns(cum: &TimeSeries, top: usize) -> Vec<DrawdownSpan> {
    let mut remaining = underwater_from_cum_returns(cum);
    let mut spans = Vec::with_capacity(top);

    for _ in 0..top {
        let Some(span) = max_drawdown_span(&remaining) else {
            break;
        };

        remaining = match span.recovery {
            Some(recovery) => remaining.remove_between(span.peak, recovery),
            None => remaining.loc_range(None, Some(span.peak)),
        };

        spans.push(span);
        if remaining.is_empty() || remaining.min() == 0.0 {
            break;
        }
    }

    spans
}

/// Iteratively extracts up to `top` drawdown episodes from periodic returns.
#[must_use]
pub fn top_drawdowns(returns: &TimeSeries, top: usize) -> Vec<DrawdownSpan> {
    top_drawdowns_from_cum_returns(&cum_returns(returns, 1.0), top)
}

/// Generates the drawdown table for a returns series: the top `top` episodes
/// with net drawdown percentages and business-day durations.
#[must_use]
pub fn drawdown_table(returns: &TimeSeries, top: usize) -> Vec<DrawdownRecord> {
    let cum = cum_returns(returns, 1.0);
    top_drawdowns_from_cum_returns(&cum, top)
        .into_iter()
        .enumerate()
        .map(|(index, span)| {
            let peak_value = cum.value_at(span.peak).unwrap_or(f64::NAN);
            let valley_value = cum.value_at(span.valley).unwrap_or(f64::NAN);
            DrawdownRecord {
                index,
                peak: span.peak,
                valley: span.valley,
                recovery: span.recovery,
                net_drawdown_pct: (peak_value - valley_value) / peak_value * 100.0,
                duration_days: span
                    .recovery
                    .map(|recovery| business_day_count(span.peak, recovery)),
            }
        })
        .collect()
}
