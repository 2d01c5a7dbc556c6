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

//! Cumulative-return transforms and calendar-period aggregation.

use folio_core::{
    TimeSeries, UnixNanos,
    datetime::{
        APPROX_BDAYS_PER_YEAR, MONTHS_PER_YEAR, QUARTERS_PER_YEAR, WEEKS_PER_YEAR, iso_week_key,
        month_key, quarter_key, year_key,
    },
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The periodicity of a returns series.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Period {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Period {
    /// Returns the number of periods of this frequency in one year.
    #[must_use]
    pub const fn annualization_factor(&self) -> u32 {
        match self {
            Self::Daily => APPROX_BDAYS_PER_YEAR,
            Self::Weekly => WEEKS_PER_YEAR,
            Self::Monthly => MONTHS_PER_YEAR,
            Self::Quarterly => QUARTERS_PER_YEAR,
            Self::Yearly => 1,
        }
    }

    fn bucket_key(&self, ts: UnixNanos) -> (i32, u32) {
        match self {
            Self::Daily => unreachable!("daily aggregation is an identity"),
            Self::Weekly => iso_week_key(ts),
            Self::Monthly => month_key(ts),
            Self::Quarterly => quarter_key(ts),
            Self::Yearly => (year_key(ts), 0),
        }
    }
}

/// Scales a series by the ratio to its first observation.
///
/// # Errors
///
/// Returns an error if the series is empty.
pub fn normalize(series: &TimeSeries, starting_value: f64) -> anyhow::Result<TimeSeries> {
    let first = series
        .first_value()
        .ok_or_else(|| anyhow::anyhow!("Cannot normalize an empty series"))?;
    Ok(series.map(|v| starting_value * (v / first)))
}

/// Compounds periodic returns into a cumulative-return series.
///
/// An empty input yields an empty output. NaN entries contribute a
/// multiplicative factor of 1 (no change) rather than propagating. With a
/// `starting_value` of 0 the result is expressed as a fractional gain
/// (`prod(1 + r) - 1`); otherwise it is scaled from the starting value.
#[must_use]
pub fn cum_returns(returns: &TimeSeries, starting_value: f64) -> TimeSeries {
    if returns.is_empty() {
        return TimeSeries::empty();
    }

    let mut product = 1.0;
    let values = returns
        .values()
        .iter()
        .map(|&r| {
            if !r.is_nan() {
                product *= 1.0 + r;
            }
            if starting_value == 0.0 {
                product - 1.0
            } else {
                product * starting_value
            }
        })
        .collect();
    returns.with_values(values)
}

/// Compounds periodic returns down to the final cumulative value only.
///
/// Returns `NaN` for an empty input. NaN entries are skipped as in
/// [`cum_returns`].
#[must_use]
pub fn cum_returns_final(returns: &TimeSeries, starting_value: f64) -> f64 {
    if returns.is_empty() {
        return f64::NAN;
    }

    let product: f64 = returns
        .values()
        .iter()
        .filter(|r| !r.is_nan())
        .map(|&r| 1.0 + r)
        .product();
    if starting_value == 0.0 {
        product - 1.0
    } else {
        product * starting_value
    }
}

/// Groups observations into calendar buckets and compounds the returns within
/// each bucket (`prod(1 + r) - 1`), in chronological order.
///
/// Each bucket is keyed by the timestamp of its first observation. `Daily`
/// aggregation is an identity and returns a clone of the input.
#[must_use]
pub fn aggregate_returns(returns: &TimeSeries, period: Period) -> TimeSeries {
    if period == Period::Daily || returns.is_empty() {
        return returns.clone();
    }

    let mut index = Vec::new();
    let mut values = Vec::new();
    for (_, bucket) in &returns.iter().chunk_by(|(ts, _)| period.bucket_key(*ts)) {
        let mut first_ts = None;
        let mut compounded = 1.0;
        for (ts, r) in bucket {
            first_ts.get_or_insert(ts);
            if !r.is_nan() {
                compounded *= 1.0 + r;
            }
        }
        if let Some(ts) = first_ts {
            index.push(ts);
            values.push(compounded - 1.0);
        }
    }
    TimeSeries::new(index, values)
}
