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

//! Runs the bootstrap across the configured pairs, one transaction at a time.

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use nova_model::defi::{
    PoolRecord, Token, TokenPair, TokenRegistry,
    pool::format_pool_table,
    tick_map::{encode_sqrt_price, sqrt_price_x96_to_price},
    units::{format_units, parse_units},
};
use tokio_util::sync::CancellationToken;

use crate::{
    bootstrap::{
        config::{BootstrapConfig, FailurePolicy, PairConfig},
        error::BootstrapError,
        liquidity::{LiquidityRequest, SeedOptions, seed_liquidity},
        pool_resolver::resolve_pool,
    },
    contracts::{
        base::BaseContract, erc20::Erc20Contract, position_manager::PositionManagerContract,
        uniswap_v3_factory::UniswapV3FactoryContract,
    },
    rpc::EvmRpcClient,
};

/// A pair that did not complete.
#[derive(Debug)]
pub struct PairFailure {
    pub pair: String,
    pub error: BootstrapError,
}

/// Outcome of [`run_bootstrap`].
#[derive(Debug, Default)]
pub struct BootstrapReport {
    /// Every pair that completed, in configured order.
    pub pools: Vec<PoolRecord>,
    /// Every pair that failed, in configured order.
    pub failures: Vec<PairFailure>,
    /// Whether the run stopped early because the cancellation token fired.
    pub cancelled: bool,
}

impl BootstrapReport {
    /// Returns whether every configured pair completed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }

    /// Returns the summary table of completed pools.
    #[must_use]
    pub fn summary_table(&self) -> String {
        format_pool_table(&self.pools)
    }
}

struct Bootstrapper<'a> {
    config: &'a BootstrapConfig,
    registry: TokenRegistry,
    factory: UniswapV3FactoryContract,
    position_manager: PositionManagerContract,
    erc20: Erc20Contract,
    seed_options: SeedOptions,
}

impl<'a> Bootstrapper<'a> {
    fn new(
        config: &'a BootstrapConfig,
        client: Arc<dyn EvmRpcClient>,
        cancellation: CancellationToken,
    ) -> Result<Self, BootstrapError> {
        let base = BaseContract::new(client, config.confirmation_options(cancellation));
        Ok(Self {
            config,
            registry: config.token_registry()?,
            factory: UniswapV3FactoryContract::new(base.clone(), config.factory),
            position_manager: PositionManagerContract::new(base.clone(), config.position_manager),
            erc20: Erc20Contract::new(base),
            seed_options: config.seed_options(),
        })
    }

    fn token(&self, pair: &PairConfig, symbol: &str) -> Result<&Token, BootstrapError> {
        self.registry
            .get(symbol)
            .ok_or_else(|| BootstrapError::UnknownToken {
                pair: pair.name(),
                symbol: symbol.to_string(),
            })
    }

    async fn bootstrap_pair(&self, pair: &PairConfig) -> Result<PoolRecord, BootstrapError> {
        let name = pair.name();
        let tokens = TokenPair::new(
            self.token(pair, &pair.token_a)?.clone(),
            self.token(pair, &pair.token_b)?.clone(),
        )
        .map_err(BootstrapError::invalid_input(&name))?;

        let (token0, token1) = tokens.sorted();
        log::info!(
            "{name}: token0={} token1={}",
            self.registry.display_name(&token0.address),
            self.registry.display_name(&token1.address)
        );
        let price = |token: &Token| {
            self.config
                .price(&token.symbol)
                .ok_or_else(|| BootstrapError::InvalidInput {
                    pair: name.clone(),
                    reason: format!("No price configured for '{}'", token.symbol),
                })
        };
        let sqrt_price_x96 = encode_sqrt_price(
            price(token0)?,
            price(token1)?,
            token0.decimals,
            token1.decimals,
        )
        .map_err(BootstrapError::invalid_input(&name))?;
        log::info!(
            "{name}: initial price {:.8} {} per {} (sqrtPriceX96 {sqrt_price_x96})",
            sqrt_price_x96_to_price(sqrt_price_x96, token0.decimals, token1.decimals),
            token1.symbol,
            token0.symbol
        );

        let pool = resolve_pool(
            &self.factory,
            tokens.token_a.address,
            tokens.token_b.address,
            pair.fee,
            &name,
        )
        .await?;

        let amount_a = parse_units(pair.amount_a, tokens.token_a.decimals)
            .map_err(BootstrapError::invalid_input(&name))?;
        let amount_b = parse_units(pair.amount_b, tokens.token_b.decimals)
            .map_err(BootstrapError::invalid_input(&name))?;

        self.fund(&name, &tokens.token_a, amount_a, pair.mint).await?;
        self.fund(&name, &tokens.token_b, amount_b, pair.mint).await?;

        let request = LiquidityRequest {
            pair_name: name.clone(),
            token_a: tokens.token_a.address,
            token_b: tokens.token_b.address,
            fee: pair.fee,
            amount_a,
            amount_b,
        };
        seed_liquidity(
            &self.position_manager,
            request,
            sqrt_price_x96,
            &self.seed_options,
        )
        .await?;

        Ok(PoolRecord::new(name, pool, pair.fee))
    }

    /// Mints test tokens if requested, then approves the position manager for `amount`.
    ///
    /// Balances are logged, never checked; the mint estimate reports a shortfall.
    async fn fund(
        &self,
        pair_name: &str,
        token: &Token,
        amount: U256,
        mint: bool,
    ) -> Result<(), BootstrapError> {
        let sender = self.position_manager.sender();
        let spender = self.position_manager.address();
        let display = |value: U256| {
            format_units(value, token.decimals).unwrap_or_else(|_| value.to_string())
        };

        if mint {
            self.erc20
                .mint(&token.address, sender, amount)
                .await
                .map_err(BootstrapError::rpc(pair_name, "ERC20 mint"))?;
            log::info!("{pair_name}: minted {} {}", display(amount), token.symbol);
        }

        let balance = self
            .erc20
            .balance_of(&token.address, sender)
            .await
            .map_err(BootstrapError::rpc(pair_name, "balanceOf"))?;
        log::info!("{pair_name}: {} balance {}", token.symbol, display(balance));

        self.approve(pair_name, token, sender, spender, amount).await?;

        let allowance = self
            .erc20
            .allowance(&token.address, sender, spender)
            .await
            .map_err(BootstrapError::rpc(pair_name, "allowance"))?;
        log::info!(
            "{pair_name}: {} allowance for {spender} is {}",
            token.symbol,
            display(allowance)
        );
        Ok(())
    }

    async fn approve(
        &self,
        pair_name: &str,
        token: &Token,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<(), BootstrapError> {
        let current = self
            .erc20
            .allowance(&token.address, owner, spender)
            .await
            .map_err(BootstrapError::rpc(pair_name, "allowance"))?;

        // Tokens like USDT reject changing a non-zero allowance directly
        if !current.is_zero() {
            log::info!("{pair_name}: resetting {} allowance to 0", token.symbol);
            self.erc20
                .approve(&token.address, spender, U256::ZERO)
                .await
                .map_err(BootstrapError::rpc(pair_name, "approve"))?;
        }

        self.erc20
            .approve(&token.address, spender, amount)
            .await
            .map_err(BootstrapError::rpc(pair_name, "approve"))?;
        Ok(())
    }
}

/// Bootstraps every configured pair in order and returns what completed and what failed.
///
/// Each transaction is confirmed before the next one is sent. With
/// [`FailurePolicy::AbortOnFirstError`] the run stops at the first failing pair; with
/// [`FailurePolicy::CollectAndContinue`] it records the failure and moves on. Once
/// `cancellation` fires, pending confirmation waits fail and no further pair is started.
///
/// # Errors
///
/// Returns an error if the token registry cannot be built from `config`. Pair failures are
/// reported in [`BootstrapReport::failures`] instead.
pub async fn run_bootstrap(
    config: &BootstrapConfig,
    client: Arc<dyn EvmRpcClient>,
    cancellation: CancellationToken,
) -> Result<BootstrapReport, BootstrapError> {
    let bootstrapper = Bootstrapper::new(config, client, cancellation.clone())?;
    let mut report = BootstrapReport::default();
    let total = config.pairs.len();
    let symbols: Vec<&str> = bootstrapper
        .registry
        .iter()
        .map(|token| token.symbol.as_str())
        .collect();
    log::info!("Bootstrapping {total} pairs over tokens {}", symbols.join(", "));

    for (index, pair) in config.pairs.iter().enumerate() {
        if cancellation.is_cancelled() {
            log::warn!("Bootstrap cancelled before {}", pair.name());
            report.cancelled = true;
            break;
        }

        log::info!("Bootstrapping {} ({}/{total})", pair.name(), index + 1);
        match bootstrapper.bootstrap_pair(pair).await {
            Ok(record) => {
                log::info!("{}: done, pool {}", record.name, record.address);
                report.pools.push(record);
            }
            Err(e) => {
                log::error!("{e}");
                report.failures.push(PairFailure {
                    pair: pair.name(),
                    error: e,
                });
                if cancellation.is_cancelled() {
                    report.cancelled = true;
                    break;
                }
                if config.failure_policy == FailurePolicy::AbortOnFirstError {
                    log::warn!("Aborting after failure of {}", pair.name());
                    break;
                }
            }
        }
    }

    Ok(report)
}
