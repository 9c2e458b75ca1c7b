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

//! Post-bootstrap report of the live price and reserves of each configured pool.

use std::sync::Arc;

use alloy::primitives::{Address, U160};
use nova_model::defi::{
    FeeTier, TokenPair, tick_map::sqrt_price_x96_to_price, units::format_units,
};
use tabled::{Table, Tabled, settings::Style};
use tokio_util::sync::CancellationToken;

use crate::{
    bootstrap::{config::BootstrapConfig, error::BootstrapError},
    contracts::{
        base::BaseContract,
        erc20::Erc20Contract,
        uniswap_v3_factory::UniswapV3FactoryContract,
        uniswap_v3_pool::{UniswapV3PoolContract, UniswapV3PoolError},
    },
    rpc::EvmRpcClient,
};

/// The on-chain state of one pool, oriented as token0 in token1.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolPrice {
    pub name: String,
    pub pool: Address,
    pub fee: FeeTier,
    pub token0: String,
    pub token1: String,
    pub sqrt_price_x96: U160,
    pub tick: i32,
    /// Price of token0 in token1 units. Display only.
    pub price: f64,
    /// Price of token1 in token0 units. Display only.
    pub inverse_price: f64,
    /// Pool balance of token0 in decimal units.
    pub reserve0: String,
    /// Pool balance of token1 in decimal units.
    pub reserve1: String,
}

#[derive(Tabled)]
struct PoolPriceRow {
    #[tabled(rename = "Pool")]
    name: String,
    #[tabled(rename = "Tick")]
    tick: i32,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Inverse")]
    inverse: String,
    #[tabled(rename = "Reserve0")]
    reserve0: String,
    #[tabled(rename = "Reserve1")]
    reserve1: String,
}

impl From<&PoolPrice> for PoolPriceRow {
    fn from(value: &PoolPrice) -> Self {
        Self {
            name: value.name.clone(),
            tick: value.tick,
            price: format!("{:.8} {}/{}", value.price, value.token1, value.token0),
            inverse: format!("{:.8} {}/{}", value.inverse_price, value.token0, value.token1),
            reserve0: format!("{} {}", value.reserve0, value.token0),
            reserve1: format!("{} {}", value.reserve1, value.token1),
        }
    }
}

/// Return a [`String`] representation of the pool prices in a human-readable table format.
#[must_use]
pub fn format_price_table(prices: &[PoolPrice]) -> String {
    let rows: Vec<PoolPriceRow> = prices.iter().map(PoolPriceRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Reads `slot0` and both reserves of every configured pool.
///
/// Pools that do not exist or are not initialized yet are logged and left out.
///
/// # Errors
///
/// Returns an error if the token registry cannot be built or a node call fails.
pub async fn collect_pool_prices(
    config: &BootstrapConfig,
    client: Arc<dyn EvmRpcClient>,
) -> Result<Vec<PoolPrice>, BootstrapError> {
    let registry = config.token_registry()?;
    let base = BaseContract::new(client, config.confirmation_options(CancellationToken::new()));
    let factory = UniswapV3FactoryContract::new(base.clone(), config.factory);
    let pool_contract = UniswapV3PoolContract::new(base.clone());
    let erc20 = Erc20Contract::new(base);

    let mut prices = Vec::with_capacity(config.pairs.len());
    for pair in &config.pairs {
        let name = pair.name();
        let lookup = |symbol: &str| {
            registry
                .get(symbol)
                .cloned()
                .ok_or_else(|| BootstrapError::UnknownToken {
                    pair: name.clone(),
                    symbol: symbol.to_string(),
                })
        };
        let tokens = TokenPair::new(lookup(&pair.token_a)?, lookup(&pair.token_b)?)
            .map_err(BootstrapError::invalid_input(&name))?;
        let (token0, token1) = tokens.sorted();

        let pool = factory
            .get_pool(token0.address, token1.address, pair.fee)
            .await
            .map_err(BootstrapError::rpc(&name, "getPool"))?;
        if pool.is_zero() {
            log::warn!("{name}: no pool deployed for fee {}", pair.fee);
            continue;
        }

        let slot0 = match pool_contract.get_slot0(&pool).await {
            Ok(slot0) => slot0,
            Err(UniswapV3PoolError::NotInitialized { .. }) => {
                log::warn!("{name}: pool {pool} is not initialized");
                continue;
            }
            Err(source) => {
                return Err(BootstrapError::Pool {
                    pair: name,
                    pool,
                    source,
                });
            }
        };

        let reserve = |balance, decimals| {
            format_units(balance, decimals).map_err(BootstrapError::invalid_input(&name))
        };
        let balance0 = erc20
            .balance_of(&token0.address, pool)
            .await
            .map_err(BootstrapError::rpc(&name, "balanceOf"))?;
        let balance1 = erc20
            .balance_of(&token1.address, pool)
            .await
            .map_err(BootstrapError::rpc(&name, "balanceOf"))?;

        let price = sqrt_price_x96_to_price(slot0.sqrt_price_x96, token0.decimals, token1.decimals);
        let reserve0 = reserve(balance0, token0.decimals)?;
        let reserve1 = reserve(balance1, token1.decimals)?;
        log::info!(
            "{name}: price {price:.8} {}/{} at tick {}",
            token1.symbol,
            token0.symbol,
            slot0.tick
        );

        prices.push(PoolPrice {
            name,
            pool,
            fee: pair.fee,
            token0: token0.symbol.clone(),
            token1: token1.symbol.clone(),
            sqrt_price_x96: slot0.sqrt_price_x96,
            tick: slot0.tick,
            price,
            inverse_price: 1.0 / price,
            reserve0,
            reserve1,
        });
    }

    Ok(prices)
}
