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

use std::path::PathBuf;

use clap::Parser;

/// Main CLI structure for parsing command-line arguments and options.
///
/// This is the entry point for the Nova command-line interface, which bootstraps Uniswap V3
/// pools and reports their prices.
#[derive(Debug, Parser)]
#[clap(version, about, author)]
pub struct NovaCli {
    #[clap(subcommand)]
    pub command: Commands,
}

/// Available top-level commands for the Nova CLI.
#[derive(Parser, Debug)]
pub enum Commands {
    /// Creates, initializes and seeds every configured pool.
    Bootstrap(BootstrapOpt),
    /// Prints the current price and reserves of every configured pool.
    Prices(PricesOpt),
}

/// Options shared by every command.
#[derive(Parser, Debug, Clone)]
pub struct ConfigOpt {
    /// Path to the bootstrap TOML config.
    #[arg(long, default_value = "config/bootstrap.toml")]
    pub config: PathBuf,
    /// RPC HTTP URL (optional, overrides `RPC_HTTP_URL` and the config file)
    #[arg(long)]
    pub rpc_url: Option<String>,
}

/// Options of the `bootstrap` command.
#[derive(Parser, Debug, Clone)]
#[command(about = "Bootstrap pools and seed liquidity", long_about = None)]
pub struct BootstrapOpt {
    #[clap(flatten)]
    pub config: ConfigOpt,
    /// Record failing pairs and continue with the next one instead of aborting
    #[arg(long)]
    pub continue_on_error: bool,
    /// Skip the price report after a successful run
    #[arg(long)]
    pub no_price_report: bool,
}

/// Options of the `prices` command.
#[derive(Parser, Debug, Clone)]
#[command(about = "Report pool prices and reserves", long_about = None)]
pub struct PricesOpt {
    #[clap(flatten)]
    pub config: ConfigOpt,
}
