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

//! Core time-series primitives for the folio analytics engine.
//!
//! The `folio-core` crate provides the foundational building blocks shared by the
//! higher-level analytics crates:
//!
//! - A `UnixNanos` timestamp type for nanosecond-precision time indexing.
//! - Calendar utilities: business-day counting, day normalization, and period bucketing.
//! - A `TimeSeries` container: an ordered, timestamp-keyed numeric series with
//!   alignment-checked arithmetic, masking, rolling aggregates, and quantiles.
//! - A `Frame` container: a set of named columns (e.g. per-asset positions) sharing
//!   one time index.
//! - Numeric helpers: approximate float comparison, slice statistics, and OLS beta.
//!
//! Missing observations are represented as `f64::NAN` throughout; reductions skip
//! them, and arithmetic propagates them.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod datetime;
pub mod frame;
pub mod math;
pub mod nanos;
pub mod series;

pub use crate::{
    frame::Frame,
    nanos::{DurationNanos, UnixNanos},
    series::TimeSeries,
};
