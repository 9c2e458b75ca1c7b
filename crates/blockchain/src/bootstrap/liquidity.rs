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

//! Seeding a pool with its first position, a band of tick spacings around the current price.

use std::time::Duration;

use alloy::primitives::{Address, U160, U256};
use nova_model::defi::{
    FeeTier, TickRange,
    tick_map::{
        DEFAULT_HALF_WIDTH_SPACINGS, MAX_SQRT_RATIO, MIN_SQRT_RATIO, get_tick_at_sqrt_ratio,
    },
    token::sort_by_address,
};

use crate::{
    bootstrap::error::BootstrapError,
    contracts::{
        errors::{describe_revert, is_already_initialized},
        position_manager::{MintPositionParams, PositionManagerContract},
    },
    rpc::types::TransactionReceipt,
};

/// Desired amounts of a new position, in native integer units and configured token order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityRequest {
    pub pair_name: String,
    pub token_a: Address,
    pub token_b: Address,
    pub fee: FeeTier,
    pub amount_a: U256,
    pub amount_b: U256,
}

/// Tunables of [`seed_liquidity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOptions {
    /// Half-width of the position in tick spacings.
    pub half_width_spacings: u32,
    /// Time from now until the mint expires.
    pub deadline: Duration,
    /// Gas limit as a percentage of the mint estimate.
    pub gas_limit_multiplier_pct: u64,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            half_width_spacings: DEFAULT_HALF_WIDTH_SPACINGS,
            deadline: Duration::from_secs(20 * 60),
            gas_limit_multiplier_pct: 120,
        }
    }
}

impl SeedOptions {
    /// Returns the gas limit to send for a mint estimated at `estimate`.
    #[must_use]
    pub const fn gas_limit(&self, estimate: u64) -> u64 {
        estimate.saturating_mul(self.gas_limit_multiplier_pct) / 100
    }
}

fn mint_deadline(deadline: Duration) -> U256 {
    let now = chrono::Utc::now().timestamp().unsigned_abs();
    U256::from(now.saturating_add(deadline.as_secs()))
}

/// Initializes the pool at `sqrt_price_x96` if needed and mints a position around that price.
///
/// The tokens are submitted as `token0 < token1` with the amounts permuted to match. The
/// position spans `options.half_width_spacings` tick spacings on each side of the current
/// tick, zero minimum amounts, and the signing account as recipient. A pool that is already
/// initialized is not an error. The mint is estimated first and only sent with the gas limit
/// derived from that estimate.
///
/// # Errors
///
/// Returns an error if:
/// - Both tokens share an address, or `sqrt_price_x96` is outside the valid price range.
/// - Initialization fails for any reason other than the pool being already initialized.
/// - Gas estimation of the mint reverts ([`BootstrapError::MintEstimationReverted`]); nothing
///   is sent in that case.
/// - The mint fails, times out, or its receipt reports a revert.
pub async fn seed_liquidity(
    position_manager: &PositionManagerContract,
    request: LiquidityRequest,
    sqrt_price_x96: U160,
    options: &SeedOptions,
) -> Result<TransactionReceipt, BootstrapError> {
    let LiquidityRequest {
        pair_name,
        token_a,
        token_b,
        fee,
        amount_a,
        amount_b,
    } = request;

    if token_a == token_b {
        return Err(BootstrapError::InvalidInput {
            pair: pair_name,
            reason: format!("Both tokens are {token_a}"),
        });
    }
    if !(MIN_SQRT_RATIO..MAX_SQRT_RATIO).contains(&sqrt_price_x96) {
        return Err(BootstrapError::InvalidInput {
            pair: pair_name,
            reason: format!("Sqrt price {sqrt_price_x96} is out of range"),
        });
    }

    let ((token0, amount0), (token1, amount1)) =
        sort_by_address((token_a, amount_a), (token_b, amount_b));

    let current_tick = get_tick_at_sqrt_ratio(sqrt_price_x96);
    let range =
        TickRange::around_tick(current_tick, fee.tick_spacing(), options.half_width_spacings)
            .map_err(BootstrapError::invalid_input(&pair_name))?;

    match position_manager
        .create_and_initialize_pool_if_necessary(token0, token1, fee, sqrt_price_x96)
        .await
    {
        Ok(receipt) => log::info!(
            "{pair_name}: pool initialized at sqrtPriceX96 {sqrt_price_x96} (tx {})",
            receipt.transaction_hash
        ),
        Err(e) if is_already_initialized(&e) => {
            log::info!("{pair_name}: pool already initialized");
        }
        Err(e) => {
            return Err(BootstrapError::rpc_failure(
                pair_name,
                "createAndInitializePoolIfNecessary",
                e,
            ));
        }
    }

    log::info!(
        "{pair_name}: token0={token0} token1={token1} tick={current_tick} amount0={amount0} amount1={amount1}"
    );
    log::info!(
        "{pair_name}: range {range} (prices {:.8} to {:.8})",
        range.lower_price(),
        range.upper_price()
    );

    let params = MintPositionParams {
        token0,
        token1,
        fee,
        range,
        amount0_desired: amount0,
        amount1_desired: amount1,
        amount0_min: U256::ZERO,
        amount1_min: U256::ZERO,
        recipient: position_manager.sender(),
        deadline: mint_deadline(options.deadline),
    };

    let estimate = match position_manager.estimate_mint(&params).await {
        Ok(estimate) => estimate,
        Err(e) => {
            let error = BootstrapError::MintEstimationReverted {
                pair: pair_name,
                revert: describe_revert(&e),
                source: e,
            };
            log::error!("{error}");
            return Err(error);
        }
    };
    let gas_limit = options.gas_limit(estimate);
    log::info!("{pair_name}: mint gas estimate {estimate}, sending with limit {gas_limit}");

    let receipt = position_manager
        .mint(&params, gas_limit)
        .await
        .map_err(BootstrapError::rpc(&pair_name, "mint"))?;
    log::info!(
        "{pair_name}: liquidity minted in tx {}",
        receipt.transaction_hash
    );

    Ok(receipt)
}
