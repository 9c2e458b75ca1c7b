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

use alloy::{
    primitives::{Address, U256},
    sol,
    sol_types::SolCall,
};

use super::base::BaseContract;
use crate::rpc::{error::BlockchainRpcClientError, types::TransactionReceipt};

sol! {
    contract ERC20 {
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        /// Open mint available on the test tokens only.
        function mint(address to, uint256 amount) external;
    }
}

/// Interface for interacting with ERC20 token contracts on a blockchain.
///
/// Reads balances and allowances, and sends approvals and test-token mints from the
/// signing account.
#[derive(Debug, Clone)]
pub struct Erc20Contract {
    /// The base contract providing common RPC execution functionality.
    base: BaseContract,
}

impl Erc20Contract {
    /// Creates a new ERC20 contract interface over the given base contract.
    #[must_use]
    pub const fn new(base: BaseContract) -> Self {
        Self { base }
    }

    /// Fetches the token balance of `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the result cannot be decoded.
    pub async fn balance_of(
        &self,
        token_address: &Address,
        owner: Address,
    ) -> Result<U256, BlockchainRpcClientError> {
        let call_data = ERC20::balanceOfCall { owner }.abi_encode();
        let bytes = self.base.execute_call(token_address, call_data).await?;

        ERC20::balanceOfCall::abi_decode_returns(&bytes).map_err(|e| {
            BlockchainRpcClientError::AbiDecodingError(format!(
                "Error decoding ERC20 balanceOf of {token_address} with error {e}"
            ))
        })
    }

    /// Fetches the amount `spender` may transfer on behalf of `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the result cannot be decoded.
    pub async fn allowance(
        &self,
        token_address: &Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, BlockchainRpcClientError> {
        let call_data = ERC20::allowanceCall { owner, spender }.abi_encode();
        let bytes = self.base.execute_call(token_address, call_data).await?;

        ERC20::allowanceCall::abi_decode_returns(&bytes).map_err(|e| {
            BlockchainRpcClientError::AbiDecodingError(format!(
                "Error decoding ERC20 allowance of {token_address} with error {e}"
            ))
        })
    }

    /// Approves `spender` for `amount` and waits for confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails or reverts.
    pub async fn approve(
        &self,
        token_address: &Address,
        spender: Address,
        amount: U256,
    ) -> Result<TransactionReceipt, BlockchainRpcClientError> {
        let call_data = ERC20::approveCall { spender, amount }.abi_encode();
        self.base
            .send_and_confirm(token_address, call_data, None)
            .await
    }

    /// Mints `amount` test tokens to `to` and waits for confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails or reverts.
    pub async fn mint(
        &self,
        token_address: &Address,
        to: Address,
        amount: U256,
    ) -> Result<TransactionReceipt, BlockchainRpcClientError> {
        let call_data = ERC20::mintCall { to, amount }.abi_encode();
        self.base
            .send_and_confirm(token_address, call_data, None)
            .await
    }
}
