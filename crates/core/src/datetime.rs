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

//! Calendar and business-day functions for time-indexed analytics.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::UnixNanos;

/// Number of nanoseconds in one second.
pub const NANOSECONDS_IN_SECOND: u64 = 1_000_000_000;

/// Number of nanoseconds in one calendar day.
pub const NANOSECONDS_IN_DAY: u64 = 86_400 * NANOSECONDS_IN_SECOND;

/// Approximate number of business days in one month.
pub const APPROX_BDAYS_PER_MONTH: u32 = 21;

/// Approximate number of business days in one year.
pub const APPROX_BDAYS_PER_YEAR: u32 = 252;

/// Number of ISO weeks in one year.
pub const WEEKS_PER_YEAR: u32 = 52;

/// Number of months in one year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Number of quarters in one year.
pub const QUARTERS_PER_YEAR: u32 = 4;

/// Strips the time-of-day component, leaving midnight UTC of the same calendar day.
#[must_use]
pub const fn normalize_day(ts: UnixNanos) -> UnixNanos {
    UnixNanos::new(ts.as_u64() - ts.as_u64() % NANOSECONDS_IN_DAY)
}

/// Converts `(year, month, day)` to a UNIX nanoseconds timestamp at midnight UTC.
///
/// # Errors
///
/// Returns an error if the date is invalid.
pub fn unix_nanos_from_ymd(year: i32, month: u32, day: u32) -> anyhow::Result<UnixNanos> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow::anyhow!("Invalid date {year}-{month:02}-{day:02}"))?;
    let nanos = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("Invalid midnight for date {date}"))?
        .and_utc()
        .timestamp_nanos_opt()
        .ok_or_else(|| anyhow::anyhow!("Date out of range: {date}"))?;
    if nanos < 0 {
        anyhow::bail!("Date precedes the UNIX epoch: {date}");
    }
    Ok(UnixNanos::new(nanos as u64))
}

/// Returns the UTC calendar date of the given timestamp.
#[must_use]
pub fn to_naive_date(ts: UnixNanos) -> NaiveDate {
    ts.to_datetime_utc().date_naive()
}

/// Returns `true` if the timestamp falls on a weekday (Mon-Fri).
#[must_use]
pub fn is_business_day(ts: UnixNanos) -> bool {
    !matches!(to_naive_date(ts).weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts the business days (Mon-Fri) in the inclusive calendar range `[start, end]`.
///
/// Returns 0 when `start` is after `end`.
#[must_use]
pub fn business_day_count(start: UnixNanos, end: UnixNanos) -> u64 {
    let start_date = to_naive_date(start);
    let end_date = to_naive_date(end);
    if start_date > end_date {
        return 0;
    }

    let total_days = (end_date - start_date).num_days() as u64 + 1;
    let full_weeks = total_days / 7;
    let mut count = full_weeks * 5;

    let mut date = start_date + chrono::Days::new(full_weeks * 7);
    while date <= end_date {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            count += 1;
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    count
}

/// Returns the calendar year of the timestamp.
#[must_use]
pub fn year_key(ts: UnixNanos) -> i32 {
    to_naive_date(ts).year()
}

/// Returns the `(year, month)` bucket of the timestamp.
#[must_use]
pub fn month_key(ts: UnixNanos) -> (i32, u32) {
    let date = to_naive_date(ts);
    (date.year(), date.month())
}

/// Returns the `(year, quarter)` bucket of the timestamp.
#[must_use]
pub fn quarter_key(ts: UnixNanos) -> (i32, u32) {
    let date = to_naive_date(ts);
    (date.year(), (date.month() - 1) / 3 + 1)
}

/// Returns the `(iso_year, iso_week)` bucket of the timestamp.
#[must_use]
pub fn iso_week_key(ts: UnixNanos) -> (i32, u32) {
    let week = to_naive_date(ts).iso_week();
    (week.year(), week.week())
}
