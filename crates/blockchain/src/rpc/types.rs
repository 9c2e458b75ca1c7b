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

use alloy::primitives::{B256, U64};
use serde::{Deserialize, Serialize};

/// The subset of an `eth_getTransactionReceipt` result the bootstrap needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Hash of the mined transaction.
    pub transaction_hash: B256,
    /// Block the transaction was included in.
    #[serde(default)]
    pub block_number: Option<U64>,
    /// Gas consumed by the transaction.
    pub gas_used: U64,
    /// `1` on success and `0` on revert. Absent on pre-Byzantium chains.
    #[serde(default)]
    pub status: Option<U64>,
}

impl TransactionReceipt {
    /// Returns whether the receipt reports successful execution.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_none_or(|status| status == U64::from(1))
    }
}
