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

//! Round-trip trade reconstruction and aggregate trade statistics.
//!
//! A round-trip event (open to close on one asset) is joined against the daily
//! portfolio valuation to derive a per-trade fractional return, then aggregated
//! by symbol and by side.

use ahash::AHashMap;
use folio_core::{DurationNanos, Frame, TimeSeries, UnixNanos, datetime::normalize_day, math};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{MIN_PARALLEL_TASKS, positions::SectorMapping};

/// A completed open-to-close trade cycle reported by the execution layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundTripEvent {
    pub open_ts: UnixNanos,
    pub close_ts: UnixNanos,
    pub is_long: bool,
    pub symbol: String,
    pub pnl: f64,
}

/// A reconstructed round-trip trade record.
///
/// `returns` is `pnl / portfolio value on the close day`, and is absent when
/// no portfolio snapshot exists for that day (a join miss, not an error).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundTrip {
    pub open_ts: UnixNanos,
    pub close_ts: UnixNanos,
    pub is_long: bool,
    pub symbol: String,
    pub duration_ns: DurationNanos,
    pub pnl: f64,
    pub returns: Option<f64>,
}

/// Reconstructs round-trip trade records by joining events against the daily
/// portfolio valuation.
///
/// The portfolio value at the start of period `t` is
/// `row_sum(positions[t]) / (1 + returns[t])`. Events are matched on the
/// calendar day (time-of-day stripped) of their close timestamp via a
/// left-outer join; unmatched events keep a `None` return.
///
/// # Panics
///
/// Panics if the positions and returns indices are not identical.
#[must_use]
pub fn extract_round_trips(
    events: &[RoundTripEvent],
    positions: &Frame,
    returns: &TimeSeries,
) -> Vec<RoundTrip> {
    let portfolio_value = &positions.row_sum() / &(returns + 1.0);
    let value_by_day: AHashMap<UnixNanos, f64> = portfolio_value
        .iter()
        .map(|(ts, value)| (normalize_day(ts), value))
        .collect();

    events
        .iter()
        .map(|event| {
            let matched = value_by_day
                .get(&normalize_day(event.close_ts))
                .copied()
                .filter(|value| !value.is_nan());
            let duration_ns = match event.close_ts.duration_since(&event.open_ts) {
                Some(duration) => duration,
                None => {
                    log::warn!(
                        "Round trip for {} closes before it opens ({} < {})",
                        event.symbol,
                        event.close_ts,
                        event.open_ts
                    );
                    0
                }
            };
            RoundTrip {
                open_ts: event.open_ts,
                close_ts: event.close_ts,
                is_long: event.is_long,
                symbol: event.symbol.clone(),
                duration_ns,
                pnl: event.pnl,
                returns: matched.map(|value| event.pnl / value),
            }
        })
        .collect()
}

/// Sums PnL per group and divides by the total PnL across all trades,
/// yielding a fractional attribution per group in first-seen order (the
/// fractions sum to 1 over all groups, absent rounding).
#[must_use]
pub fn profit_attribution_by<'a>(
    trades: &'a [RoundTrip],
    group: impl Fn(&'a RoundTrip) -> &'a str,
) -> Vec<(String, f64)> {
    let total: f64 = trades.iter().map(|trade| trade.pnl).sum();
    let mut by_group: IndexMap<&str, f64> = IndexMap::new();
    for trade in trades {
        *by_group.entry(group(trade)).or_insert(0.0) += trade.pnl;
    }
    by_group
        .into_iter()
        .map(|(key, pnl)| (key.to_string(), pnl / total))
        .collect()
}

/// Profit attribution grouped by symbol.
#[must_use]
pub fn profit_attribution(trades: &[RoundTrip]) -> Vec<(String, f64)> {
    profit_attribution_by(trades, |trade| trade.symbol.as_str())
}

/// Rolls the per-symbol profit attribution up to sectors; unmapped symbols
/// fall into an "Others" bucket.
#[must_use]
pub fn sector_profit_attribution(
    trades: &[RoundTrip],
    sector_mapping: &SectorMapping,
) -> Vec<(String, f64)> {
    let mut by_sector: IndexMap<&str, f64> = IndexMap::new();
    for (symbol, fraction) in &profit_attribution(trades) {
        let sector = sector_mapping.get(symbol).map_or("Others", String::as_str);
        *by_sector.entry(sector).or_insert(0.0) += fraction;
    }
    by_sector
        .into_iter()
        .map(|(sector, fraction)| (sector.to_string(), fraction))
        .collect()
}

/// A well-known reduction over a set of trade values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Reduction {
    Sum,
    Mean,
    Min,
    Max,
    Count,
    Median,
}

impl Reduction {
    fn apply(self, values: &[f64]) -> f64 {
        match self {
            Self::Sum => values.iter().sum(),
            Self::Mean => math::mean(values),
            Self::Min => values.iter().copied().fold(f64::NAN, f64::min),
            Self::Max => values.iter().copied().fold(f64::NAN, f64::max),
            Self::Count => values.len() as f64,
            Self::Median => math::quantile_linear(values, 0.5),
        }
    }
}

/// A statistic over a set of trade values: either a well-known reduction or an
/// arbitrary series-to-scalar function.
#[derive(Clone, Copy, Debug)]
pub enum TradeAgg {
    Reduce(Reduction),
    Custom(fn(&[f64]) -> f64),
}

impl TradeAgg {
    fn apply(self, values: &[f64]) -> f64 {
        match self {
            Self::Reduce(reduction) => reduction.apply(values),
            Self::Custom(f) => f(values),
        }
    }
}

/// A named statistic, as listed in the preset statistic tables.
pub type NamedAgg = (&'static str, TradeAgg);

/// One row of an all/long/short statistic table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TradeStatRow {
    pub key: String,
    pub all_trades: f64,
    pub long_trades: f64,
    pub short_trades: f64,
}

/// One row of an all/long/short duration table, cast to whole nanoseconds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DurationStatRow {
    pub key: String,
    pub all_trades: i64,
    pub long_trades: i64,
    pub short_trades: i64,
}

/// Computes each named statistic over all trades, long-only trades, and
/// short-only trades.
///
/// `accessor` selects the value column; trades where it yields `None` (e.g.
/// unmatched returns) are excluded. Percentage results are scaled by 100. The
/// per-statistic computations are independent and run on the rayon pool for
/// larger statistic lists.
#[must_use]
pub fn agg_all_long_short(
    trades: &[RoundTrip],
    accessor: fn(&RoundTrip) -> Option<f64>,
    stats: &[NamedAgg],
    is_percentage: bool,
) -> Vec<TradeStatRow> {
    let all: Vec<f64> = trades.iter().filter_map(accessor).collect();
    let long: Vec<f64> = trades
        .iter()
        .filter(|trade| trade.is_long)
        .filter_map(accessor)
        .collect();
    let short: Vec<f64> = trades
        .iter()
        .filter(|trade| !trade.is_long)
        .filter_map(accessor)
        .collect();
    let multiplier = if is_percentage { 100.0 } else { 1.0 };

    let compute = |&(key, agg): &NamedAgg| TradeStatRow {
        key: key.to_string(),
        all_trades: agg.apply(&all) * multiplier,
        long_trades: agg.apply(&long) * multiplier,
        short_trades: agg.apply(&short) * multiplier,
    };

    if stats.len() >= MIN_PARALLEL_TASKS {
        stats.par_iter().map(compute).collect()
    } else {
        stats.iter().map(compute).collect()
    }
}

/// As [`agg_all_long_short`] over trade durations, with results cast to whole
/// nanoseconds. Non-finite results (e.g. the mean over a side with no trades)
/// collapse to zero.
#[must_use]
pub fn agg_all_long_short_duration(
    trades: &[RoundTrip],
    stats: &[NamedAgg],
) -> Vec<DurationStatRow> {
    agg_all_long_short(trades, |trade| Some(trade.duration_ns as f64), stats, false)
        .into_iter()
        .map(|row| DurationStatRow {
            key: row.key,
            all_trades: cast_nanos(row.all_trades),
            long_trades: cast_nanos(row.long_trades),
            short_trades: cast_nanos(row.short_trades),
        })
        .collect()
}

fn cast_nanos(value: f64) -> i64 {
    if value.is_finite() { value as i64 } else { 0 }
}

fn gross_profit(values: &[f64]) -> f64 {
    values.iter().filter(|&&v| v > 0.0).sum()
}

fn gross_loss(values: &[f64]) -> f64 {
    values.iter().filter(|&&v| v < 0.0).sum()
}

fn profit_factor(values: &[f64]) -> f64 {
    let loss: f64 = values.iter().filter(|&&v| v < 0.0).map(|v| v.abs()).sum();
    if loss == 0.0 {
        return f64::NAN;
    }
    gross_profit(values) / loss
}

fn avg_winning(values: &[f64]) -> f64 {
    let winners: Vec<f64> = values.iter().copied().filter(|&v| v > 0.0).collect();
    math::mean(&winners)
}

fn avg_losing(values: &[f64]) -> f64 {
    let losers: Vec<f64> = values.iter().copied().filter(|&v| v < 0.0).collect();
    math::mean(&losers)
}

fn win_loss_ratio(values: &[f64]) -> f64 {
    let avg_loss = avg_losing(values).abs();
    if avg_loss == 0.0 || avg_loss.is_nan() {
        return f64::NAN;
    }
    avg_winning(values) / avg_loss
}

fn percent_profitable(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().filter(|&&v| v > 0.0).count() as f64 / values.len() as f64
}

fn winning_count(values: &[f64]) -> f64 {
    values.iter().filter(|&&v| v > 0.0).count() as f64
}

fn losing_count(values: &[f64]) -> f64 {
    values.iter().filter(|&&v| v < 0.0).count() as f64
}

fn even_count(values: &[f64]) -> f64 {
    values.iter().filter(|&&v| v == 0.0).count() as f64
}

fn median_winning(values: &[f64]) -> f64 {
    let winners: Vec<f64> = values.iter().copied().filter(|&v| v > 0.0).collect();
    math::quantile_linear(&winners, 0.5)
}

fn median_losing(values: &[f64]) -> f64 {
    let losers: Vec<f64> = values.iter().copied().filter(|&v| v < 0.0).collect();
    math::quantile_linear(&losers, 0.5)
}

/// PnL statistics, in dollars.
pub const PNL_STATS: &[NamedAgg] = &[
    ("Total profit", TradeAgg::Reduce(Reduction::Sum)),
    ("Gross profit", TradeAgg::Custom(gross_profit)),
    ("Gross loss", TradeAgg::Custom(gross_loss)),
    ("Profit factor", TradeAgg::Custom(profit_factor)),
    ("Avg. trade net profit", TradeAgg::Reduce(Reduction::Mean)),
    ("Avg. winning trade", TradeAgg::Custom(avg_winning)),
    ("Avg. losing trade", TradeAgg::Custom(avg_losing)),
    ("Ratio Avg. Win:Avg. Loss", TradeAgg::Custom(win_loss_ratio)),
    ("Largest winning trade", TradeAgg::Reduce(Reduction::Max)),
    ("Largest losing trade", TradeAgg::Reduce(Reduction::Min)),
];

/// Trade-count summary statistics.
pub const SUMMARY_STATS: &[NamedAgg] = &[
    ("Total number of round trips", TradeAgg::Reduce(Reduction::Count)),
    ("Percent profitable", TradeAgg::Custom(percent_profitable)),
    ("Winning round trips", TradeAgg::Custom(winning_count)),
    ("Losing round trips", TradeAgg::Custom(losing_count)),
    ("Even round trips", TradeAgg::Custom(even_count)),
];

/// Return statistics, reported as percentages.
pub const RETURNS_STATS: &[NamedAgg] = &[
    ("Avg returns all round trips", TradeAgg::Reduce(Reduction::Mean)),
    ("Avg returns winning", TradeAgg::Custom(avg_winning)),
    ("Avg returns losing", TradeAgg::Custom(avg_losing)),
    ("Median returns all round trips", TradeAgg::Reduce(Reduction::Median)),
    ("Median returns winning", TradeAgg::Custom(median_winning)),
    ("Median returns losing", TradeAgg::Custom(median_losing)),
    ("Largest winning trade", TradeAgg::Reduce(Reduction::Max)),
    ("Largest losing trade", TradeAgg::Reduce(Reduction::Min)),
];

/// Duration statistics, in nanoseconds.
pub const DURATION_STATS: &[NamedAgg] = &[
    ("Avg duration", TradeAgg::Reduce(Reduction::Mean)),
    ("Median duration", TradeAgg::Reduce(Reduction::Median)),
    ("Longest duration", TradeAgg::Reduce(Reduction::Max)),
    ("Shortest duration", TradeAgg::Reduce(Reduction::Min)),
];

/// The bundled all/long/short statistic tables for a set of round trips.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundTripStats {
    pub pnl: Vec<TradeStatRow>,
    pub summary: Vec<TradeStatRow>,
    pub returns: Vec<TradeStatRow>,
    pub duration: Vec<DurationStatRow>,
}

/// Computes the four preset statistic tables over the given trades.
#[must_use]
pub fn round_trip_stats(trades: &[RoundTrip]) -> RoundTripStats {
    RoundTripStats {
        pnl: agg_all_long_short(trades, |trade| Some(trade.pnl), PNL_STATS, false),
        summary: agg_all_long_short(trades, |trade| Some(trade.pnl), SUMMARY_STATS, false),
        returns: agg_all_long_short(trades, |trade| trade.returns, RETURNS_STATS, true),
        duration: agg_all_long_short_duration(trades, DURATION_STATS),
    }
}

/// The per-symbol return statistics table: one shared key column and one
/// percentage column per symbol, in first-seen symbol order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolStats {
    pub keys: Vec<String>,
    pub columns: Vec<(String, Vec<f64>)>,
}

/// Applies the return statistics to each symbol's trades, reported as
/// percentages.
#[must_use]
pub fn returns_by_symbol(trades: &[RoundTrip]) -> SymbolStats {
    let mut by_symbol: IndexMap<&str, Vec<f64>> = IndexMap::new();
    for trade in trades {
        let entry = by_symbol.entry(trade.symbol.as_str()).or_default();
        if let Some(value) = trade.returns {
            entry.push(value);
        }
    }

    let keys = RETURNS_STATS
        .iter()
        .map(|(key, _)| (*key).to_string())
        .collect();
    let columns = by_symbol
        .into_iter()
        .map(|(symbol, values)| {
            let stats = RETURNS_STATS
                .iter()
                .map(|(_, agg)| agg.apply(&values) * 100.0)
                .collect();
            (symbol.to_string(), stats)
        })
        .collect();
    SymbolStats { keys, columns }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use folio_core::{
        approx_eq,
        datetime::{NANOSECONDS_IN_DAY, NANOSECONDS_IN_SECOND},
    };
    use rstest::rstest;

    use super::*;

    fn day(offset: u64) -> UnixNanos {
        UnixNanos::new(offset * NANOSECONDS_IN_DAY)
    }

    fn at_hour(offset: u64, hour: u64) -> UnixNanos {
        day(offset) + hour * 3_600 * NANOSECONDS_IN_SECOND
    }

    fn trade(symbol: &str, is_long: bool, pnl: f64, returns: Option<f64>) -> RoundTrip {
        RoundTrip {
            open_ts: day(0),
            close_ts: day(1),
            is_long,
            symbol: symbol.to_string(),
            duration_ns: NANOSECONDS_IN_DAY,
            pnl,
            returns,
        }
    }

    #[rstest]
    fn test_extract_round_trips_matches_close_day() {
        // Portfolio value on day 1: row sum 1100 / (1 + 0.1) = 1000
        let positions = Frame::new(
            vec![day(0), day(1)],
            vec![
                ("AAPL".to_string(), vec![500.0, 600.0]),
                ("cash".to_string(), vec![500.0, 500.0]),
            ],
        );
        let returns = TimeSeries::new(vec![day(0), day(1)], vec![0.0, 0.1]);
        let events = vec![RoundTripEvent {
            open_ts: at_hour(0, 10),
            close_ts: at_hour(1, 15),
            is_long: true,
            symbol: "AAPL".to_string(),
            pnl: 100.0,
        }];

        let trades = extract_round_trips(&events, &positions, &returns);
        assert_eq!(trades.len(), 1);
        assert!(approx_eq!(
            f64,
            trades[0].returns.unwrap(),
            0.1,
            epsilon = 1e-12
        ));
        assert_eq!(
            trades[0].duration_ns,
            NANOSECONDS_IN_DAY + 5 * 3_600 * NANOSECONDS_IN_SECOND
        );
    }

    #[rstest]
    fn test_extract_round_trips_join_miss_yields_none() {
        let positions = Frame::new(
            vec![day(0)],
            vec![("AAPL".to_string(), vec![1000.0])],
        );
        let returns = TimeSeries::new(vec![day(0)], vec![0.0]);
        let events = vec![RoundTripEvent {
            open_ts: day(3),
            close_ts: day(5),
            is_long: false,
            symbol: "AAPL".to_string(),
            pnl: -50.0,
        }];

        let trades = extract_round_trips(&events, &positions, &returns);
        assert_eq!(trades[0].returns, None);
        assert_eq!(trades[0].pnl, -50.0);
    }

    #[rstest]
    fn test_profit_attribution_sums_to_one() {
        let trades = vec![
            trade("AAPL", true, 60.0, None),
            trade("MSFT", true, 30.0, None),
            trade("AAPL", false, 10.0, None),
        ];
        let attribution = profit_attribution(&trades);
        assert_eq!(attribution.len(), 2);
        assert_eq!(attribution[0].0, "AAPL");
        assert!(approx_eq!(f64, attribution[0].1, 0.7, epsilon = 1e-12));
        assert!(approx_eq!(f64, attribution[1].1, 0.3, epsilon = 1e-12));
        let total: f64 = attribution.iter().map(|(_, f)| f).sum();
        assert!(approx_eq!(f64, total, 1.0, epsilon = 1e-12));
    }

    #[rstest]
    fn test_profit_attribution_by_side() {
        let trades = vec![
            trade("AAPL", true, 75.0, None),
            trade("MSFT", false, 25.0, None),
        ];
        let attribution =
            profit_attribution_by(&trades, |t| if t.is_long { "long" } else { "short" });
        assert_eq!(attribution[0], ("long".to_string(), 0.75));
        assert_eq!(attribution[1], ("short".to_string(), 0.25));
    }

    #[rstest]
    fn test_sector_profit_attribution_uses_others_fallback() {
        let trades = vec![
            trade("AAPL", true, 50.0, None),
            trade("ZZZ", true, 50.0, None),
        ];
        let mut mapping = SectorMapping::default();
        mapping.insert("AAPL".to_string(), "Tech".to_string());

        let attribution = sector_profit_attribution(&trades, &mapping);
        assert_eq!(attribution[0].0, "Tech");
        assert_eq!(attribution[1].0, "Others");
        assert!(approx_eq!(f64, attribution[1].1, 0.5, epsilon = 1e-12));
    }

    #[rstest]
    fn test_agg_all_long_short_splits_sides() {
        let trades = vec![
            trade("AAPL", true, 10.0, Some(0.01)),
            trade("AAPL", true, -5.0, Some(-0.005)),
            trade("MSFT", false, 20.0, Some(0.02)),
        ];
        let rows = agg_all_long_short(&trades, |t| Some(t.pnl), PNL_STATS, false);

        let total = rows.iter().find(|r| r.key == "Total profit").unwrap();
        assert!(approx_eq!(f64, total.all_trades, 25.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, total.long_trades, 5.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, total.short_trades, 20.0, epsilon = 1e-12));

        let factor = rows.iter().find(|r| r.key == "Profit factor").unwrap();
        assert!(approx_eq!(f64, factor.all_trades, 30.0 / 5.0, epsilon = 1e-12));
        // No losing short trades: the ratio is undefined
        assert!(factor.short_trades.is_nan());
    }

    #[rstest]
    fn test_agg_all_long_short_percentage_scaling() {
        let trades = vec![
            trade("AAPL", true, 10.0, Some(0.01)),
            trade("MSFT", false, 20.0, Some(0.03)),
        ];
        let rows = agg_all_long_short(&trades, |t| t.returns, RETURNS_STATS, true);
        let avg = rows
            .iter()
            .find(|r| r.key == "Avg returns all round trips")
            .unwrap();
        assert!(approx_eq!(f64, avg.all_trades, 2.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, avg.long_trades, 1.0, epsilon = 1e-12));
    }

    #[rstest]
    fn test_agg_excludes_unmatched_returns() {
        let trades = vec![
            trade("AAPL", true, 10.0, Some(0.02)),
            trade("AAPL", true, 99.0, None),
        ];
        let rows = agg_all_long_short(&trades, |t| t.returns, RETURNS_STATS, true);
        let avg = rows
            .iter()
            .find(|r| r.key == "Avg returns all round trips")
            .unwrap();
        assert!(approx_eq!(f64, avg.all_trades, 2.0, epsilon = 1e-12));
    }

    #[rstest]
    fn test_duration_stats_cast_to_integer_nanos() {
        let mut trades = vec![
            trade("AAPL", true, 1.0, None),
            trade("AAPL", true, 1.0, None),
        ];
        trades[1].duration_ns = 2 * NANOSECONDS_IN_DAY;

        let rows = agg_all_long_short_duration(&trades, DURATION_STATS);
        let avg = rows.iter().find(|r| r.key == "Avg duration").unwrap();
        assert_eq!(avg.all_trades, (1.5 * NANOSECONDS_IN_DAY as f64) as i64);
        // No short trades: the mean is non-finite and collapses to zero
        assert_eq!(avg.short_trades, 0);
    }

    #[rstest]
    fn test_round_trip_stats_summary_counts() {
        let trades = vec![
            trade("AAPL", true, 10.0, Some(0.01)),
            trade("AAPL", false, -5.0, Some(-0.01)),
            trade("MSFT", true, 0.0, Some(0.0)),
        ];
        let stats = round_trip_stats(&trades);

        let count = |key: &str| {
            stats
                .summary
                .iter()
                .find(|r| r.key == key)
                .unwrap()
                .all_trades
        };
        assert_eq!(count("Total number of round trips"), 3.0);
        assert_eq!(count("Winning round trips"), 1.0);
        assert_eq!(count("Losing round trips"), 1.0);
        assert_eq!(count("Even round trips"), 1.0);
        assert!(approx_eq!(
            f64,
            count("Percent profitable"),
            1.0 / 3.0,
            epsilon = 1e-12
        ));
    }

    #[rstest]
    fn test_returns_by_symbol_orders_and_scales() {
        let trades = vec![
            trade("AAPL", true, 10.0, Some(0.01)),
            trade("MSFT", true, 20.0, Some(0.03)),
            trade("AAPL", false, -5.0, Some(-0.01)),
        ];
        let stats = returns_by_symbol(&trades);
        assert_eq!(stats.keys.len(), RETURNS_STATS.len());
        assert_eq!(stats.columns[0].0, "AAPL");
        assert_eq!(stats.columns[1].0, "MSFT");

        // AAPL average return: (0.01 - 0.01) / 2 = 0, as a percentage
        let avg_pos = stats
            .keys
            .iter()
            .position(|k| k == "Avg returns all round trips")
            .unwrap();
        assert!(approx_eq!(
            f64,
            stats.columns[0].1[avg_pos],
            0.0,
            epsilon = 1e-12
        ));
        assert!(approx_eq!(
            f64,
            stats.columns[1].1[avg_pos],
            3.0,
            epsilon = 1e-12
        ));
    }
}
