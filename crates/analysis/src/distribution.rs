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

//! Box-plot distribution summaries with outlier tagging.

use folio_core::{TimeSeries, math::quantile_linear};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::MIN_PARALLEL_TASKS;

/// The five-number summary of one series: whisker bounds and quartiles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotSummary {
    /// Lower whisker: `max(Q1 - 1.5 * IQR, min)`.
    pub low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Upper whisker: `min(Q3 + 1.5 * IQR, max)`.
    pub high: f64,
}

/// A point lying strictly outside the whisker bounds, tagged with the index of
/// the category (series) it came from so that several distributions can be
/// plotted together.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    pub category_index: usize,
    pub value: f64,
}

const WHISKER_OFFSET: f64 = 1.5;

impl BoxPlotSummary {
    /// Computes the summary and outliers for one series.
    ///
    /// Quartiles use linear interpolation; whiskers sit `1.5 * IQR` beyond the
    /// quartiles, clipped to the actual minimum and maximum. A point is an
    /// outlier iff it is strictly below the lower whisker or strictly above
    /// the upper whisker. NaN observations are ignored; an all-NaN or empty
    /// series yields an all-NaN summary with no outliers.
    #[must_use]
    pub fn make(category_index: usize, series: &TimeSeries) -> (Self, Vec<Outlier>) {
        let values = series.values();
        let q1 = quantile_linear(values, 0.25);
        let median = quantile_linear(values, 0.5);
        let q3 = quantile_linear(values, 0.75);
        let iqr = q3 - q1;

        let low = (q1 - WHISKER_OFFSET * iqr).max(series.min());
        let high = (q3 + WHISKER_OFFSET * iqr).min(series.max());

        let outliers = values
            .iter()
            .filter(|v| !v.is_nan())
            .filter(|&&v| v < low || v > high)
            .map(|&value| Outlier {
                category_index,
                value,
            })
            .collect();

        (
            Self {
                low,
                q1,
                median,
                q3,
                high,
            },
            outliers,
        )
    }
}

/// Computes box-plot summaries for a list of series, assigning each its list
/// position as the category index. Categories are independent and run on the
/// rayon pool for larger inputs.
#[must_use]
pub fn box_plot_summaries(categories: &[TimeSeries]) -> Vec<(BoxPlotSummary, Vec<Outlier>)> {
    if categories.len() >= MIN_PARALLEL_TASKS {
        categories
            .par_iter()
            .enumerate()
            .map(|(index, series)| BoxPlotSummary::make(index, series))
            .collect()
    } else {
        categories
            .iter()
            .enumerate()
            .map(|(index, series)| BoxPlotSummary::make(index, series))
            .collect()
    }
}
