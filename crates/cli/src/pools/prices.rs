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

use nova_blockchain::{
    bootstrap::{BootstrapConfig, collect_pool_prices, format_price_table},
    rpc::EvmRpcClient,
};

use crate::{
    opt::PricesOpt,
    pools::{ConfigOverrides, create_read_client, load_config},
};

/// Runs the `prices` command. Needs no signing key.
///
/// # Errors
///
/// Returns an error if the config or client cannot be set up or a node call fails.
pub async fn run_prices_command(opt: PricesOpt) -> anyhow::Result<()> {
    let overrides = ConfigOverrides {
        rpc_url: opt.config.rpc_url,
        ..ConfigOverrides::default()
    };
    let config = load_config(&opt.config.config, overrides)?;
    let client = create_read_client(&config)?;
    print_prices(&config, client).await
}

/// Prints the price table of every configured pool.
///
/// # Errors
///
/// Returns an error if reading a pool fails.
pub async fn print_prices(
    config: &BootstrapConfig,
    client: Arc<dyn EvmRpcClient>,
) -> anyhow::Result<()> {
    let prices = collect_pool_prices(config, client).await?;
    if prices.is_empty() {
        log::warn!("No initialized pools found");
        return Ok(());
    }
    println!("{}", format_price_table(&prices));
    Ok(())
}
