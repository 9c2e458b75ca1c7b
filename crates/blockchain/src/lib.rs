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

//! EVM client and Uniswap V3 pool bootstrap for Nova.
//!
//! The `nova-blockchain` crate talks to an EVM node over JSON-RPC and drives pre-deployed
//! Uniswap V3 contracts:
//!
//! - An HTTP JSON-RPC client that signs legacy EIP-155 transactions locally.
//! - Receipt confirmation with a timeout and cancellation.
//! - Contract bindings for the factory, position manager, pools and ERC-20 tokens.
//! - Decoding of the revert errors those contracts raise.
//! - The bootstrap procedure that creates, initializes and seeds each configured pool.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod bootstrap;
pub mod contracts;
pub mod rpc;

#[cfg(test)]
pub(crate) mod testing;
