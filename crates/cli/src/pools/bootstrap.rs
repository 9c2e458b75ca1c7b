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

use nova_blockchain::bootstrap::run_bootstrap;
use tokio_util::sync::CancellationToken;

use crate::{
    opt::BootstrapOpt,
    pools::{ConfigOverrides, create_client, load_config, prices::print_prices},
};

/// Runs the `bootstrap` command: every configured pair, then the price report.
///
/// Ctrl-C cancels any confirmation wait in flight and stops before the next pair.
///
/// # Errors
///
/// Returns an error if the config or client cannot be set up, or if any pair failed or the
/// run was cancelled.
pub async fn run_bootstrap_command(opt: BootstrapOpt) -> anyhow::Result<()> {
    let overrides = ConfigOverrides {
        rpc_url: opt.config.rpc_url,
        continue_on_error: opt.continue_on_error,
        no_price_report: opt.no_price_report,
    };
    let config = load_config(&opt.config.config, overrides)?;
    let client = create_client(&config)?;

    let cancellation = CancellationToken::new();
    let signal_token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Received Ctrl-C, cancelling bootstrap");
            signal_token.cancel();
        }
    });

    let report = run_bootstrap(&config, client.clone(), cancellation).await?;

    println!("{}", report.summary_table());
    for failure in &report.failures {
        log::error!("{} failed: {}", failure.pair, failure.error);
    }

    if !report.is_success() {
        anyhow::bail!(
            "Bootstrap incomplete: {} of {} pairs succeeded{}",
            report.pools.len(),
            config.pairs.len(),
            if report.cancelled { " (cancelled)" } else { "" }
        );
    }

    log::info!("All {} pools bootstrapped", report.pools.len());
    if config.report_prices {
        print_prices(&config, client).await?;
    }
    Ok(())
}
