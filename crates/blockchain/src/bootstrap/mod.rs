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

//! The pool bootstrap procedure.
//!
//! For each configured pair, in order:
//! 1. Encode the initial sqrt price from the configured USD prices.
//! 2. Find or create the pool through the factory ([`pool_resolver`]).
//! 3. Mint test tokens if requested and approve the position manager.
//! 4. Initialize the pool and mint a position around the current price ([`liquidity`]).
//!
//! The run is driven by [`orchestrator::run_bootstrap`] and configured by
//! [`config::BootstrapConfig`].

pub mod config;
pub mod error;
pub mod liquidity;
pub mod orchestrator;
pub mod pool_resolver;
pub mod reporting;

// Re-exports
pub use crate::bootstrap::{
    config::{BootstrapConfig, FailurePolicy},
    error::BootstrapError,
    orchestrator::{BootstrapReport, run_bootstrap},
    reporting::{collect_pool_prices, format_price_table},
};
