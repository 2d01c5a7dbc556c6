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

//! A set of named numeric columns sharing one time index.

use serde::{Deserialize, Serialize};

use crate::{TimeSeries, UnixNanos};

/// A column-major table of `f64` values keyed by a shared, strictly increasing
/// time index - the shape of a per-asset positions or exposures table.
///
/// The same NaN-as-missing and fail-fast alignment conventions as [`TimeSeries`]
/// apply.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    index: Vec<UnixNanos>,
    names: Vec<String>,
    data: Vec<Vec<f64>>,
}

impl Frame {
    /// Creates a new [`Frame`] instance.
    ///
    /// # Panics
    ///
    /// Panics if the index is not strictly increasing, column names are not
    /// unique, or any column length differs from the index length.
    #[must_use]
    pub fn new(index: Vec<UnixNanos>, columns: Vec<(String, Vec<f64>)>) -> Self {
        Self::new_checked(index, columns).expect("invalid `Frame`")
    }

    /// Creates a new [`Frame`] instance, validating all invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is not strictly increasing, column names
    /// are not unique, or any column length differs from the index length.
    pub fn new_checked(
        index: Vec<UnixNanos>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> anyhow::Result<Self> {
        if let Some(window) = index.windows(2).find(|w| w[0] >= w[1]) {
            anyhow::bail!(
                "index timestamps must be strictly increasing, found {} >= {}",
                window[0],
                window[1]
            );
        }

        let mut names = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            if names.contains(&name) {
                anyhow::bail!("duplicate column name '{name}'");
            }
            if values.len() != index.len() {
                anyhow::bail!(
                    "column '{name}' length {} does not match index length {}",
                    values.len(),
                    index.len()
                );
            }
            names.push(name);
            data.push(values);
        }

        Ok(Self { index, names, data })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the frame holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the timestamps of the shared index.
    #[must_use]
    pub fn timestamps(&self) -> &[UnixNanos] {
        &self.index
    }

    /// Returns the column names in storage order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Returns `true` if a column with the given name exists.
    #[must_use]
    pub fn contains_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Returns the named column as a [`TimeSeries`], if present.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<TimeSeries> {
        let pos = self.names.iter().position(|n| n == name)?;
        Some(TimeSeries::new(self.index.clone(), self.data[pos].clone()))
    }

    /// Returns the raw values of the named column, if present.
    #[must_use]
    pub fn column_values(&self, name: &str) -> Option<&[f64]> {
        let pos = self.names.iter().position(|n| n == name)?;
        Some(&self.data[pos])
    }

    /// Returns a frame without the named column (a no-op if it is absent).
    #[must_use]
    pub fn drop_column(&self, name: &str) -> Self {
        match self.names.iter().position(|n| n == name) {
            Some(pos) => {
                let mut names = self.names.clone();
                let mut data = self.data.clone();
                names.remove(pos);
                data.remove(pos);
                Self {
                    index: self.index.clone(),
                    names,
                    data,
                }
            }
            None => self.clone(),
        }
    }

    /// Applies `f` to every value, keeping index and column names.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        let data = self
            .data
            .iter()
            .map(|column| column.iter().map(|&v| f(v)).collect())
            .collect();
        Self {
            index: self.index.clone(),
            names: self.names.clone(),
            data,
        }
    }

    /// Returns the element-wise absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        self.map(f64::abs)
    }

    /// Returns the values of the row at `pos` across all columns, in column order.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of range.
    #[must_use]
    pub fn row(&self, pos: usize) -> Vec<f64> {
        self.data.iter().map(|column| column[pos]).collect()
    }

    /// Sums each row across all columns, skipping NaN entries.
    #[must_use]
    pub fn row_sum(&self) -> TimeSeries {
        let values = (0..self.len())
            .map(|pos| {
                self.data
                    .iter()
                    .map(|column| column[pos])
                    .filter(|v| !v.is_nan())
                    .sum()
            })
            .collect();
        TimeSeries::new(self.index.clone(), values)
    }

    /// Returns `(name, max-over-time)` for every column, skipping NaN entries.
    #[must_use]
    pub fn column_max(&self) -> Vec<(String, f64)> {
        self.column_reduce(|values| {
            values
                .iter()
                .copied()
                .filter(|v| !v.is_nan())
                .fold(f64::NAN, f64::max)
        })
    }

    /// Returns `(name, min-over-time)` for every column, skipping NaN entries.
    #[must_use]
    pub fn column_min(&self) -> Vec<(String, f64)> {
        self.column_reduce(|values| {
            values
                .iter()
                .copied()
                .filter(|v| !v.is_nan())
                .fold(f64::NAN, f64::min)
        })
    }

    fn column_reduce(&self, f: impl Fn(&[f64]) -> f64) -> Vec<(String, f64)> {
        self.names
            .iter()
            .zip(self.data.iter())
            .map(|(name, values)| (name.clone(), f(values)))
            .collect()
    }

    /// Divides every column element-wise by the aligned series.
    ///
    /// # Panics
    ///
    /// Panics if the series index differs from the frame index.
    #[must_use]
    pub fn div_by_series(&self, divisor: &TimeSeries) -> Self {
        assert_eq!(
            self.index,
            divisor.timestamps(),
            "series indices are misaligned; alignment is the caller's responsibility"
        );
        let data = self
            .data
            .iter()
            .map(|column| {
                column
                    .iter()
                    .zip(divisor.values().iter())
                    .map(|(&v, &d)| v / d)
                    .collect()
            })
            .collect();
        Self {
            index: self.index.clone(),
            names: self.names.clone(),
            data,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::datetime::NANOSECONDS_IN_DAY;

    fn day(offset: u64) -> UnixNanos {
        UnixNanos::new(offset * NANOSECONDS_IN_DAY)
    }

    fn sample_frame() -> Frame {
        Frame::new(
            vec![day(0), day(1), day(2)],
            vec![
                ("AAPL".to_string(), vec![10.0, -5.0, 20.0]),
                ("MSFT".to_string(), vec![1.0, 2.0, 3.0]),
                ("cash".to_string(), vec![100.0, 100.0, 100.0]),
            ],
        )
    }

    #[rstest]
    fn test_new_checked_rejects_duplicate_columns() {
        let result = Frame::new_checked(
            vec![day(0)],
            vec![
                ("AAPL".to_string(), vec![1.0]),
                ("AAPL".to_string(), vec![2.0]),
            ],
        );
        assert!(result.is_err());
    }

    #[rstest]
    fn test_new_checked_rejects_ragged_columns() {
        let result = Frame::new_checked(
            vec![day(0), day(1)],
            vec![("AAPL".to_string(), vec![1.0])],
        );
        assert!(result.is_err());
    }

    #[rstest]
    fn test_column_access() {
        let frame = sample_frame();
        assert!(frame.contains_column("cash"));
        assert_eq!(
            frame.column("MSFT").unwrap().values(),
            &[1.0, 2.0, 3.0]
        );
        assert!(frame.column("TSLA").is_none());
    }

    #[rstest]
    fn test_drop_column() {
        let frame = sample_frame().drop_column("cash");
        assert_eq!(frame.column_names(), &["AAPL", "MSFT"]);
        // Dropping a missing column is a no-op
        assert_eq!(frame.drop_column("TSLA").column_names(), &["AAPL", "MSFT"]);
    }

    #[rstest]
    fn test_row_sum() {
        let frame = sample_frame();
        assert_eq!(frame.row_sum().values(), &[111.0, 97.0, 123.0]);
    }

    #[rstest]
    fn test_row_sum_skips_nan() {
        let frame = Frame::new(
            vec![day(0)],
            vec![
                ("a".to_string(), vec![f64::NAN]),
                ("b".to_string(), vec![2.0]),
            ],
        );
        assert_eq!(frame.row_sum().values(), &[2.0]);
    }

    #[rstest]
    fn test_column_extrema() {
        let frame = sample_frame().drop_column("cash");
        assert_eq!(
            frame.column_max(),
            vec![("AAPL".to_string(), 20.0), ("MSFT".to_string(), 3.0)]
        );
        assert_eq!(
            frame.column_min(),
            vec![("AAPL".to_string(), -5.0), ("MSFT".to_string(), 1.0)]
        );
    }

    #[rstest]
    fn test_abs_and_row() {
        let frame = sample_frame().abs();
        assert_eq!(frame.row(1), vec![5.0, 2.0, 100.0]);
    }

    #[rstest]
    fn test_div_by_series() {
        let frame = sample_frame();
        let divided = frame.div_by_series(&frame.row_sum());
        let aapl = divided.column_values("AAPL").unwrap();
        assert!((aapl[0] - 10.0 / 111.0).abs() < 1e-12);
        assert!((aapl[1] - -5.0 / 97.0).abs() < 1e-12);
    }

    #[rstest]
    #[should_panic(expected = "misaligned")]
    fn test_div_by_misaligned_series_panics() {
        let frame = sample_frame();
        let divisor = TimeSeries::new(vec![day(7)], vec![1.0]);
        let _ = frame.div_by_series(&divisor);
    }
}
