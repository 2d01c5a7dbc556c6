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

//! Notable historical market periods for stress analysis.

use std::sync::LazyLock;

use folio_core::{TimeSeries, UnixNanos, datetime::unix_nanos_from_ymd};
use serde::{Deserialize, Serialize};

/// A named historical date range.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct InterestingPeriod {
    pub name: String,
    pub start: UnixNanos,
    pub end: UnixNanos,
}

fn period(name: &str, start: (i32, u32, u32), end: (i32, u32, u32)) -> InterestingPeriod {
    let to_nanos = |(year, month, day): (i32, u32, u32)| {
        unix_nanos_from_ymd(year, month, day).expect("static period dates are valid")
    };
    InterestingPeriod {
        name: name.to_string(),
        start: to_nanos(start),
        end: to_nanos(end),
    }
}

/// Notable market stress and regime periods, initialized once per process.
pub static INTERESTING_PERIODS: LazyLock<Vec<InterestingPeriod>> = LazyLock::new(|| {
    vec![
        period("Dotcom", (2000, 3, 10), (2000, 9, 10)),
        period("Lehman", (2008, 8, 1), (2008, 10, 1)),
        period("9/11", (2001, 9, 11), (2001, 10, 11)),
        period(
            "US downgrade/European Debt Crisis",
            (2011, 8, 5),
            (2011, 9, 5),
        ),
        period("Fukushima", (2011, 3, 16), (2011, 4, 16)),
        period("US Housing", (2003, 1, 8), (2003, 2, 8)),
        period("EZB IR Event", (2012, 9, 10), (2012, 10, 10)),
        period("Aug07", (2007, 8, 1), (2007, 9, 1)),
        period("Mar08", (2008, 3, 1), (2008, 4, 1)),
        period("Sept08", (2008, 9, 1), (2008, 10, 1)),
        period("2009Q1", (2009, 1, 1), (2009, 3, 1)),
        period("2009Q2", (2009, 3, 1), (2009, 6, 1)),
        period("Flash Crash", (2010, 5, 5), (2010, 5, 10)),
        period("Apr14", (2014, 4, 1), (2014, 5, 1)),
        period("Oct14", (2014, 10, 1), (2014, 11, 1)),
        period("Fall2015", (2015, 8, 15), (2015, 9, 30)),
        period("Low Volatility Bull Market", (2005, 1, 1), (2007, 8, 1)),
        period("GFC Crash", (2007, 8, 1), (2009, 4, 1)),
        period("Recovery", (2009, 4, 1), (2013, 1, 1)),
        period("New Normal", (2013, 1, 1), (2018, 9, 21)),
        period("Covid", (2020, 2, 11), (2022, 12, 31)),
    ]
});

/// Slices the returns series to each named period, skipping periods with no
/// overlapping observations.
#[must_use]
pub fn extract_interesting_date_ranges(
    returns: &TimeSeries,
    periods: &[InterestingPeriod],
) -> Vec<(String, TimeSeries)> {
    periods
        .iter()
        .filter_map(|period| {
            let slice = returns.loc_range(Some(period.start), Some(period.end));
            if slice.is_empty() {
                None
            } else {
                Some((period.name.clone(), slice))
            }
        })
        .collect()
}
