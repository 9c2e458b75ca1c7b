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
    primitives::{
        Address, U160, U256,
        aliases::{I24, U24},
    },
    sol,
    sol_types::SolCall,
};
use nova_model::defi::{FeeTier, TickRange};

use super::base::BaseContract;
use crate::rpc::{error::BlockchainRpcClientError, types::TransactionReceipt};

sol! {
    contract NonfungiblePositionManager {
        struct MintParams {
            address token0;
            address token1;
            uint24 fee;
            int24 tickLower;
            int24 tickUpper;
            uint256 amount0Desired;
            uint256 amount1Desired;
            uint256 amount0Min;
            uint256 amount1Min;
            address recipient;
            uint256 deadline;
        }

        function createAndInitializePoolIfNecessary(
            address token0,
            address token1,
            uint24 fee,
            uint160 sqrtPriceX96
        ) external payable returns (address pool);

        function mint(MintParams calldata params)
            external
            payable
            returns (uint256 tokenId, uint128 liquidity, uint256 amount0, uint256 amount1);
    }
}

/// Parameters of a new liquidity position, with `token0 < token1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintPositionParams {
    pub token0: Address,
    pub token1: Address,
    pub fee: FeeTier,
    pub range: TickRange,
    pub amount0_desired: U256,
    pub amount1_desired: U256,
    pub amount0_min: U256,
    pub amount1_min: U256,
    pub recipient: Address,
    /// Unix timestamp in seconds after which the mint reverts.
    pub deadline: U256,
}

impl MintPositionParams {
    fn to_call_data(&self) -> Result<Vec<u8>, BlockchainRpcClientError> {
        let to_i24 = |tick: i32| {
            I24::try_from(tick).map_err(|_| {
                BlockchainRpcClientError::InvalidParameters(format!(
                    "Tick {tick} out of range for int24"
                ))
            })
        };

        let params = NonfungiblePositionManager::MintParams {
            token0: self.token0,
            token1: self.token1,
            fee: U24::from(self.fee.as_u32()),
            tickLower: to_i24(self.range.lower)?,
            tickUpper: to_i24(self.range.upper)?,
            amount0Desired: self.amount0_desired,
            amount1Desired: self.amount1_desired,
            amount0Min: self.amount0_min,
            amount1Min: self.amount1_min,
            recipient: self.recipient,
            deadline: self.deadline,
        };
        Ok(NonfungiblePositionManager::mintCall { params }.abi_encode())
    }
}

/// Interface for the Uniswap V3 `NonfungiblePositionManager`.
#[derive(Debug, Clone)]
pub struct PositionManagerContract {
    base: BaseContract,
    address: Address,
}

impl PositionManagerContract {
    /// Creates a new position manager interface for the contract at `address`.
    #[must_use]
    pub const fn new(base: BaseContract, address: Address) -> Self {
        Self { base, address }
    }

    /// Returns the position manager address, the spender the tokens are approved for.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the signing account, the recipient of minted positions.
    #[must_use]
    pub fn sender(&self) -> Address {
        self.base.sender()
    }

    /// Creates the pool if needed and initializes it at `sqrt_price_x96`, waiting for
    /// confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails or reverts, including when the pool is
    /// already initialized on nodes that surface that as a revert.
    pub async fn create_and_initialize_pool_if_necessary(
        &self,
        token0: Address,
        token1: Address,
        fee: FeeTier,
        sqrt_price_x96: U160,
    ) -> Result<TransactionReceipt, BlockchainRpcClientError> {
        let call_data = NonfungiblePositionManager::createAndInitializePoolIfNecessaryCall {
            token0,
            token1,
            fee: U24::from(fee.as_u32()),
            sqrtPriceX96: sqrt_price_x96,
        }
        .abi_encode();
        self.base
            .send_and_confirm(&self.address, call_data, None)
            .await
    }

    /// Estimates the gas for minting the position.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range or the estimate reverts.
    pub async fn estimate_mint(
        &self,
        params: &MintPositionParams,
    ) -> Result<u64, BlockchainRpcClientError> {
        let call_data = params.to_call_data()?;
        self.base.estimate_gas(&self.address, call_data).await
    }

    /// Mints the position with an explicit gas limit and waits for confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails or reverts.
    pub async fn mint(
        &self,
        params: &MintPositionParams,
        gas_limit: u64,
    ) -> Result<TransactionReceipt, BlockchainRpcClientError> {
        let call_data = params.to_call_data()?;
        self.base
            .send_and_confirm(&self.address, call_data, Some(gas_limit))
            .await
    }
}
