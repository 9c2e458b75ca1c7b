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
    primitives::{Address, aliases::U24},
    sol,
    sol_types::SolCall,
};
use nova_model::defi::FeeTier;

use super::base::BaseContract;
use crate::rpc::{error::BlockchainRpcClientError, types::TransactionReceipt};

sol! {
    contract UniswapV3Factory {
        function getPool(address tokenA, address tokenB, uint24 fee) external view returns (address pool);
        function createPool(address tokenA, address tokenB, uint24 fee) external returns (address pool);
    }
}

/// Interface for the Uniswap V3 factory deployed at a fixed address.
#[derive(Debug, Clone)]
pub struct UniswapV3FactoryContract {
    base: BaseContract,
    address: Address,
}

impl UniswapV3FactoryContract {
    /// Creates a new factory interface for the contract at `address`.
    #[must_use]
    pub const fn new(base: BaseContract, address: Address) -> Self {
        Self { base, address }
    }

    /// Looks up the pool for the pair and fee, returning the zero address when none exists.
    ///
    /// The factory accepts the tokens in either order.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the result cannot be decoded.
    pub async fn get_pool(
        &self,
        token_a: Address,
        token_b: Address,
        fee: FeeTier,
    ) -> Result<Address, BlockchainRpcClientError> {
        let call_data = UniswapV3Factory::getPoolCall {
            tokenA: token_a,
            tokenB: token_b,
            fee: U24::from(fee.as_u32()),
        }
        .abi_encode();
        let bytes = self.base.execute_call(&self.address, call_data).await?;

        UniswapV3Factory::getPoolCall::abi_decode_returns(&bytes).map_err(|e| {
            BlockchainRpcClientError::AbiDecodingError(format!(
                "Error decoding getPool response with error {e}"
            ))
        })
    }

    /// Creates the pool for the pair and fee and waits for confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails or reverts.
    pub async fn create_pool(
        &self,
        token_a: Address,
        token_b: Address,
        fee: FeeTier,
    ) -> Result<TransactionReceipt, BlockchainRpcClientError> {
        let call_data = UniswapV3Factory::createPoolCall {
            tokenA: token_a,
            tokenB: token_b,
            fee: U24::from(fee.as_u32()),
        }
        .abi_encode();
        self.base
            .send_and_confirm(&self.address, call_data, None)
            .await
    }
}
