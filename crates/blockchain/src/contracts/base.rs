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

use std::sync::Arc;

use alloy::primitives::{Address, Bytes};

use crate::rpc::{
    ConfirmationOptions, EvmRpcClient, await_confirmation, error::BlockchainRpcClientError,
    types::TransactionReceipt,
};

/// Base contract functionality for interacting with blockchain contracts.
///
/// This struct provides common RPC execution patterns that can be reused
/// by specific contract implementations like ERC20, the factory and the position manager.
/// Every write is confirmed before the call returns.
#[derive(Debug, Clone)]
pub struct BaseContract {
    /// The RPC client used to communicate with the blockchain node.
    client: Arc<dyn EvmRpcClient>,
    /// Timeout, poll interval and cancellation for receipt waits.
    confirmation: ConfirmationOptions,
}

impl BaseContract {
    /// Creates a new base contract interface with the specified RPC client.
    #[must_use]
    pub fn new(client: Arc<dyn EvmRpcClient>, confirmation: ConfirmationOptions) -> Self {
        Self {
            client,
            confirmation,
        }
    }

    /// Returns the signing account that sends every write.
    #[must_use]
    pub fn sender(&self) -> Address {
        self.client.sender()
    }

    /// Executes a single read-only contract call and returns the raw response bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails or reverts.
    pub async fn execute_call(
        &self,
        contract_address: &Address,
        call_data: Vec<u8>,
    ) -> Result<Bytes, BlockchainRpcClientError> {
        self.client
            .call(*contract_address, Bytes::from(call_data))
            .await
    }

    /// Estimates the gas of a write without sending it.
    ///
    /// # Errors
    ///
    /// Returns an error if the node rejects the estimate, typically with
    /// [`BlockchainRpcClientError::ExecutionReverted`].
    pub async fn estimate_gas(
        &self,
        contract_address: &Address,
        call_data: Vec<u8>,
    ) -> Result<u64, BlockchainRpcClientError> {
        self.client
            .estimate_gas(*contract_address, Bytes::from(call_data))
            .await
    }

    /// Sends a write and waits for its receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if sending fails, confirmation times out or is cancelled, or the
    /// receipt reports a revert ([`BlockchainRpcClientError::TransactionReverted`]).
    pub async fn send_and_confirm(
        &self,
        contract_address: &Address,
        call_data: Vec<u8>,
        gas_limit: Option<u64>,
    ) -> Result<TransactionReceipt, BlockchainRpcClientError> {
        let tx_hash = self
            .client
            .send_transaction(*contract_address, Bytes::from(call_data), gas_limit)
            .await?;
        log::info!("Sent tx {tx_hash} to {contract_address}");

        let receipt = await_confirmation(self.client.as_ref(), tx_hash, &self.confirmation).await?;
        if !receipt.is_success() {
            return Err(BlockchainRpcClientError::TransactionReverted { tx_hash });
        }

        log::debug!(
            "Confirmed tx {tx_hash} in block {:?}, gas used {}",
            receipt.block_number,
            receipt.gas_used
        );
        Ok(receipt)
    }
}
