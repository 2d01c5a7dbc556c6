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

//! Exposure analytics over per-asset positions tables.

use std::cmp::Ordering;

use folio_core::{Frame, TimeSeries, math::quantile_linear};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::CASH_COLUMN;

/// Maps asset symbols to sector names, immutable for an analysis run.
pub type SectorMapping = ahash::AHashMap<String, String>;

/// Computes the gross book value: the row-wise sum of the absolute value of
/// all non-cash positions.
#[must_use]
pub fn gross_book_value(positions: &Frame) -> TimeSeries {
    positions.drop_column(CASH_COLUMN).abs().row_sum()
}

/// Divides each position by the row-wise sum across all positions (including
/// cash), producing a fractional allocation per asset per day.
#[must_use]
pub fn percent_alloc(positions: &Frame) -> Frame {
    positions.div_by_series(&positions.row_sum())
}

/// Computes gross leverage: gross book value over total portfolio value.
#[must_use]
pub fn gross_leverage(positions: &Frame) -> TimeSeries {
    &gross_book_value(positions) / &positions.row_sum()
}

/// An asset ranked by one of the [`top_long_short_abs`] criteria.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedPosition {
    pub asset: String,
    pub value: f64,
}

/// The top-k long, short, and absolute positions of a portfolio.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TopPositions {
    /// Assets with the largest positive maxima, descending.
    pub long: Vec<RankedPosition>,
    /// Assets with the most negative minima, most negative first.
    pub short: Vec<RankedPosition>,
    /// Assets with the largest absolute magnitude, descending.
    pub absolute: Vec<RankedPosition>,
}

/// Ranks the non-cash assets by their per-asset maximum, minimum, and absolute
/// maximum over time, returning the top `k` of each.
#[must_use]
pub fn top_long_short_abs(positions: &Frame, k: usize) -> TopPositions {
    let assets = positions.drop_column(CASH_COLUMN);

    let mut long: Vec<RankedPosition> = assets
        .column_max()
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(asset, value)| RankedPosition { asset, value })
        .collect();
    long.sort_by(|a, b| cmp_desc(a.value, b.value));
    long.truncate(k);

    let mut short: Vec<RankedPosition> = assets
        .column_min()
        .into_iter()
        .filter(|(_, value)| *value < 0.0)
        .map(|(asset, value)| RankedPosition { asset, value })
        .collect();
    short.sort_by(|a, b| cmp_desc(b.value, a.value));
    short.truncate(k);

    let mut absolute: Vec<RankedPosition> = assets
        .abs()
        .column_max()
        .into_iter()
        .filter(|(_, value)| !value.is_nan())
        .map(|(asset, value)| RankedPosition { asset, value })
        .collect();
    absolute.sort_by(|a, b| cmp_desc(a.value, b.value));
    absolute.truncate(k);

    TopPositions {
        long,
        short,
        absolute,
    }
}

fn cmp_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Per-day long/short allocation concentration extremes and medians.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionConcentration {
    pub max_long: TimeSeries,
    pub median_long: TimeSeries,
    pub median_short: TimeSeries,
    pub max_short: TimeSeries,
}

/// Computes the per-day maximum and median of the long and short fractional
/// allocations (cash excluded). Days with no long (or short) exposure yield
/// `NaN` in the corresponding series.
#[must_use]
pub fn max_median_position_concentration(positions: &Frame) -> PositionConcentration {
    let exposures = percent_alloc(positions).drop_column(CASH_COLUMN);
    let n = exposures.len();

    let mut max_long = Vec::with_capacity(n);
    let mut median_long = Vec::with_capacity(n);
    let mut median_short = Vec::with_capacity(n);
    let mut max_short = Vec::with_capacity(n);

    for pos in 0..n {
        let row = exposures.row(pos);
        let longs: Vec<f64> = row.iter().copied().filter(|v| *v > 0.0).collect();
        let shorts: Vec<f64> = row.iter().copied().filter(|v| *v < 0.0).collect();

        max_long.push(longs.iter().copied().fold(f64::NAN, f64::max));
        median_long.push(quantile_linear(&longs, 0.5));
        median_short.push(quantile_linear(&shorts, 0.5));
        max_short.push(shorts.iter().copied().fold(f64::NAN, f64::min));
    }

    let index = exposures.timestamps().to_vec();
    PositionConcentration {
        max_long: TimeSeries::new(index.clone(), max_long),
        median_long: TimeSeries::new(index.clone(), median_long),
        median_short: TimeSeries::new(index.clone(), median_short),
        max_short: TimeSeries::new(index, max_short),
    }
}

/// Sums position columns into per-sector exposure columns using the supplied
/// asset-to-sector mapping. Assets without a mapping are excluded and logged.
#[must_use]
pub fn sector_exposure(positions: &Frame, sector_mapping: &SectorMapping) -> Frame {
    let mut grouped: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for asset in positions.column_names() {
        match sector_mapping.get(asset) {
            Some(sector) => grouped.entry(sector.as_str()).or_default().push(asset),
            None => log::warn!(
                "{asset} has no sector mapping and will not be included in sector allocations"
            ),
        }
    }

    let n = positions.len();
    let columns = grouped
        .into_iter()
        .map(|(sector, assets)| {
            let mut values = vec![0.0; n];
            for asset in assets {
                if let Some(column) = positions.column_values(asset) {
                    for (slot, &value) in values.iter_mut().zip(column.iter()) {
                        if !value.is_nan() {
                            *slot += value;
                        }
                    }
                }
            }
            (sector.to_string(), values)
        })
        .collect();

    Frame::new(positions.timestamps().to_vec(), columns)
}
