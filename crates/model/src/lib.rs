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

//! Domain model for Nova liquidity-pool bootstrapping.
//!
//! The `nova-model` crate holds the pure, I/O-free parts of the bootstrap tooling:
//!
//! - Token, token-pair and token-registry types.
//! - Fee tiers and their tick spacings.
//! - Q64.96 square-root price encoding with arbitrary-precision integer arithmetic.
//! - Tick math and concentrated-liquidity tick ranges.
//! - Decimal unit parsing and formatting for on-chain integer amounts.
//! - JSON-RPC envelope types shared by the RPC clients.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod defi;
