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
    primitives::{Address, U160},
    sol,
    sol_types::SolCall,
};
use thiserror::Error;

use super::base::BaseContract;
use crate::rpc::error::BlockchainRpcClientError;

sol! {
    contract UniswapV3Pool {
        /// Packed struct containing core pool state
        struct Slot0Data {
            uint160 sqrtPriceX96;
            int24 tick;
            uint16 observationIndex;
            uint16 observationCardinality;
            uint16 observationCardinalityNext;
            uint8 feeProtocol;
            bool unlocked;
        }

        function slot0() external view returns (Slot0Data memory);
    }
}

/// Represents errors that can occur when interacting with UniswapV3Pool contract.
#[derive(Debug, Error)]
pub enum UniswapV3PoolError {
    #[error("RPC error: {0}")]
    RpcError(#[from] BlockchainRpcClientError),
    #[error("Failed to decode {field} for pool {pool}: {reason} (raw data: {raw_data})")]
    DecodingError {
        field: String,
        pool: Address,
        reason: String,
        raw_data: String,
    },
    #[error("Pool {pool} is not initialized")]
    NotInitialized { pool: Address },
}

/// The current price state of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSlot0 {
    /// Current sqrt price as a Q64.96 number.
    pub sqrt_price_x96: U160,
    /// Current tick.
    pub tick: i32,
}

/// Interface for reading UniswapV3Pool contract state.
#[derive(Debug, Clone)]
pub struct UniswapV3PoolContract {
    /// The base contract providing common RPC execution functionality.
    base: BaseContract,
}

impl UniswapV3PoolContract {
    /// Creates a new UniswapV3Pool contract interface over the given base contract.
    #[must_use]
    pub const fn new(base: BaseContract) -> Self {
        Self { base }
    }

    /// Reads `slot0` from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails, decoding fails, or the pool has never been
    /// initialized (zero sqrt price).
    pub async fn get_slot0(
        &self,
        pool_address: &Address,
    ) -> Result<PoolSlot0, UniswapV3PoolError> {
        let call_data = UniswapV3Pool::slot0Call {}.abi_encode();
        let raw_response = self.base.execute_call(pool_address, call_data).await?;

        let slot0 = UniswapV3Pool::slot0Call::abi_decode_returns(&raw_response).map_err(|e| {
            UniswapV3PoolError::DecodingError {
                field: "slot0".to_string(),
                pool: *pool_address,
                reason: e.to_string(),
                raw_data: hex::encode(&raw_response),
            }
        })?;

        if slot0.sqrtPriceX96.is_zero() {
            return Err(UniswapV3PoolError::NotInitialized {
                pool: *pool_address,
            });
        }

        Ok(PoolSlot0 {
            sqrt_price_x96: slot0.sqrtPriceX96,
            tick: slot0.tick.as_i32(),
        })
    }
}
