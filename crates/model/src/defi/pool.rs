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

//! Records of bootstrapped pools and their summary table.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled, settings::Style};

use crate::defi::fee::FeeTier;

/// A pool that was resolved and seeded, kept for the summary report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct PoolRecord {
    /// Pool name in configured order, such as `"BTC-BNB"`.
    #[tabled(rename = "Pool")]
    pub name: String,
    /// The pool contract address.
    #[tabled(rename = "Address")]
    pub address: Address,
    /// The pool fee tier.
    #[tabled(rename = "Fee")]
    pub fee: FeeTier,
}

impl PoolRecord {
    /// Creates a new [`PoolRecord`].
    #[must_use]
    pub fn new(name: impl Into<String>, address: Address, fee: FeeTier) -> Self {
        Self {
            name: name.into(),
            address,
            fee,
        }
    }
}

/// Return a [`String`] representation of the pool records in a human-readable table format.
#[must_use]
pub fn format_pool_table(records: &[PoolRecord]) -> String {
    Table::new(records).with(Style::rounded()).to_string()
}
