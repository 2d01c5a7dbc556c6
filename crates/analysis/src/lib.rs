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

//! Portfolio performance and risk analytics for the folio engine.
//!
//! The `folio-analysis` crate computes structured numeric results from raw
//! time-indexed financial data - equity and benchmark returns, per-asset
//! positions, transactions, and round-trip trade events - for consumption by a
//! separate presentation layer:
//!
//! - Cumulative-return transforms and calendar-period aggregation.
//! - Drawdown detection: underwater curves and iterative top-K episode extraction.
//! - Rolling windowed statistics (beta, volatility, Sharpe), computed in parallel.
//! - Distribution analysis: box-plot summaries with outlier tagging.
//! - Turnover, gross book value, percent allocation, and top-N exposures.
//! - Round-trip trade reconstruction via temporal join, with per-symbol and
//!   long/short aggregate statistics.
//!
//! Every function is a pure computation over immutable inputs. Degenerate
//! inputs (empty series, single observations) yield `NaN` or empty outputs;
//! index misalignment between series is a caller error and fails fast.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod distribution;
pub mod drawdown;
pub mod periods;
pub mod positions;
pub mod returns;
pub mod rolling;
pub mod round_trips;
pub mod stats;
pub mod transactions;

/// Minimum number of independent work items before an operation is dispatched
/// to the rayon thread pool; smaller inputs run serially to avoid the
/// parallel-dispatch overhead.
pub const MIN_PARALLEL_TASKS: usize = 10;

/// Name of the cash column in positions tables.
pub const CASH_COLUMN: &str = "cash";
