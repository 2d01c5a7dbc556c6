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

//! Transaction volume and portfolio turnover.

use ahash::AHashMap;
use folio_core::{Frame, TimeSeries, UnixNanos, datetime::normalize_day};
use serde::{Deserialize, Serialize};

use crate::positions::gross_book_value;

/// Selects the denominator used for the turnover ratio.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum TurnoverDenominator {
    /// A two-step trailing rolling mean of gross book value.
    #[default]
    Agb,
    /// The row-wise sum of all positions including cash.
    PortfolioValue,
}

/// A single fill: signed share amount at a price, at a (possibly intraday)
/// timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub ts: UnixNanos,
    pub amount: f64,
    pub price: f64,
}

/// Per-day traded share and dollar volume, keyed by calendar day.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionVolume {
    pub shares: TimeSeries,
    pub value: TimeSeries,
}

/// Sums absolute traded shares and absolute traded value (`|amount| * price`)
/// per calendar day (time-of-day stripped).
#[must_use]
pub fn transaction_volume(transactions: &[Transaction]) -> TransactionVolume {
    let mut by_day: AHashMap<UnixNanos, (f64, f64)> = AHashMap::new();
    for transaction in transactions {
        let entry = by_day
            .entry(normalize_day(transaction.ts))
            .or_insert((0.0, 0.0));
        let shares = transaction.amount.abs();
        entry.0 += shares;
        entry.1 += shares * transaction.price;
    }

    let mut days: Vec<UnixNanos> = by_day.keys().copied().collect();
    days.sort_unstable();

    let shares = days.iter().map(|day| by_day[day].0).collect();
    let value = days.iter().map(|day| by_day[day].1).collect();
    TransactionVolume {
        shares: TimeSeries::new(days.clone(), shares),
        value: TimeSeries::new(days, value),
    }
}

/// Computes the daily turnover ratio: traded dollar volume over a book-value
/// denominator.
///
/// With the [`TurnoverDenominator::Agb`] denominator, a two-step trailing
/// rolling mean of gross book value is used, with the first entry special-cased
/// to half of the first observation (a single-point trailing average is
/// undefined). Days where either side of the ratio is missing are filled with
/// zero.
#[must_use]
pub fn turnover(
    positions: &Frame,
    transactions: &[Transaction],
    denominator: TurnoverDenominator,
) -> TimeSeries {
    let traded_value = transaction_volume(transactions).value;

    let denom = match denominator {
        TurnoverDenominator::Agb => {
            let abg = gross_book_value(positions);
            let mut values = abg.rolling_mean(2).values().to_vec();
            if let Some(first) = abg.first_value() {
                values[0] = first / 2.0;
            }
            abg.with_values(values)
        }
        TurnoverDenominator::PortfolioValue => positions.row_sum(),
    };
    let denom = normalized_to_days(&denom);

    let mut days: Vec<UnixNanos> = traded_value
        .timestamps()
        .iter()
        .chain(denom.timestamps().iter())
        .copied()
        .collect();
    days.sort_unstable();
    days.dedup();

    let values = days
        .iter()
        .map(|&day| {
            let ratio = match (traded_value.value_at(day), denom.value_at(day)) {
                (Some(numerator), Some(denominator)) => numerator / denominator,
                _ => f64::NAN,
            };
            if ratio.is_nan() { 0.0 } else { ratio }
        })
        .collect();
    TimeSeries::new(days, values)
}

/// Re-keys a series to calendar days, keeping the original index (with a
/// warning) if day normalization would collapse distinct timestamps.
fn normalized_to_days(series: &TimeSeries) -> TimeSeries {
    let index: Vec<UnixNanos> = series
        .timestamps()
        .iter()
        .map(|&ts| normalize_day(ts))
        .collect();
    match TimeSeries::new_checked(index, series.values().to_vec()) {
        Ok(normalized) => normalized,
        Err(e) => {
            log::warn!("Failed to set normalized index: {e}");
            series.clone()
        }
    }
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

    fn sample_positions() -> Frame {
        Frame::new(
            vec![day(0), day(1), day(2)],
            vec![
                ("AAPL".to_string(), vec![100.0, -200.0, 150.0]),
                ("MSFT".to_string(), vec![50.0, 100.0, 50.0]),
                ("cash".to_string(), vec![50.0, 100.0, 100.0]),
            ],
        )
    }

    #[rstest]
    fn test_transaction_volume_groups_by_day() {
        let transactions = vec![
            Transaction {
                ts: at_hour(0, 10),
                amount: 10.0,
                price: 2.0,
            },
            Transaction {
                ts: at_hour(0, 15),
                amount: -5.0,
                price: 4.0,
            },
            Transaction {
                ts: at_hour(1, 11),
                amount: 3.0,
                price: 10.0,
            },
        ];
        let volume = transaction_volume(&transactions);
        assert_eq!(volume.shares.timestamps(), &[day(0), day(1)]);
        assert_eq!(volume.shares.values(), &[15.0, 3.0]);
        assert_eq!(volume.value.values(), &[40.0, 30.0]);
    }

    #[rstest]
    fn test_transaction_volume_empty() {
        let volume = transaction_volume(&[]);
        assert!(volume.shares.is_empty());
        assert!(volume.value.is_empty());
    }

    #[rstest]
    fn test_turnover_agb_denominator() {
        // Gross book values: 150, 300, 200
        let positions = sample_positions();
        let transactions = vec![
            Transaction {
                ts: at_hour(0, 10),
                amount: 10.0,
                price: 3.0,
            },
            Transaction {
                ts: at_hour(1, 10),
                amount: 20.0,
                price: 4.5,
            },
        ];

        let result = turnover(&positions, &transactions, TurnoverDenominator::Agb);
        assert_eq!(result.timestamps(), &[day(0), day(1), day(2)]);
        // First denominator entry is half of the first gross book value
        assert!(approx_eq!(
            f64,
            result.values()[0],
            30.0 / 75.0,
            epsilon = 1e-12
        ));
        // Second entry uses the two-step trailing mean (150 + 300) / 2
        assert!(approx_eq!(
            f64,
            result.values()[1],
            90.0 / 225.0,
            epsilon = 1e-12
        ));
        // No transactions on the third day: filled with zero
        assert_eq!(result.values()[2], 0.0);
    }

    #[rstest]
    fn test_turnover_portfolio_value_denominator() {
        // Portfolio values (including cash): 200, 0, 300
        let positions = sample_positions();
        let transactions = vec![Transaction {
            ts: at_hour(0, 12),
            amount: 10.0,
            price: 5.0,
        }];

        let result = turnover(&positions, &transactions, TurnoverDenominator::PortfolioValue);
        assert!(approx_eq!(
            f64,
            result.values()[0],
            50.0 / 200.0,
            epsilon = 1e-12
        ));
        assert_eq!(result.values()[1], 0.0);
    }

    #[rstest]
    fn test_turnover_without_positions_day_match() {
        // A transaction on a day with no position snapshot divides by nothing
        let positions = sample_positions();
        let transactions = vec![Transaction {
            ts: at_hour(9, 10),
            amount: 1.0,
            price: 1.0,
        }];
        let result = turnover(&positions, &transactions, TurnoverDenominator::Agb);
        assert_eq!(result.value_at(day(9)), Some(0.0));
    }
}
