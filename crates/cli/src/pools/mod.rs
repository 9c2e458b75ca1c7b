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

//! Pool bootstrap and price report commands.

use std::{path::Path, sync::Arc};

use nova_blockchain::{
    bootstrap::{BootstrapConfig, FailurePolicy},
    rpc::{EvmRpcClient, http::BlockchainHttpRpcClient},
};

pub mod bootstrap;
pub mod prices;

/// Environment variable holding the deployer's private key.
pub const PRIVATE_KEY_ENV: &str = "DEPLOYER_PRIVATE_KEY";

/// Environment variable overriding the config file's RPC URL.
pub const RPC_URL_ENV: &str = "RPC_HTTP_URL";

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub rpc_url: Option<String>,
    pub continue_on_error: bool,
    pub no_price_report: bool,
}

impl ConfigOverrides {
    /// Applies the overrides: the `--rpc-url` flag wins over `env_rpc_url`, which wins over
    /// the file.
    pub fn apply(self, config: &mut BootstrapConfig, env_rpc_url: Option<String>) {
        if let Some(rpc_url) = self.rpc_url.or(env_rpc_url) {
            config.rpc_http_url = rpc_url;
        }
        if self.continue_on_error {
            config.failure_policy = FailurePolicy::CollectAndContinue;
        }
        if self.no_price_report {
            config.report_prices = false;
        }
    }
}

/// Loads the config at `path` and applies the overrides and the environment.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or is invalid.
pub fn load_config(path: &Path, overrides: ConfigOverrides) -> anyhow::Result<BootstrapConfig> {
    let mut config = BootstrapConfig::load(path)?;
    overrides.apply(&mut config, std::env::var(RPC_URL_ENV).ok());
    log::info!(
        "Loaded {} pairs from {}, RPC {}",
        config.pairs.len(),
        path.display(),
        config.rpc_http_url
    );
    Ok(config)
}

/// Creates the signing RPC client from the config and the deployer key in the environment.
///
/// # Errors
///
/// Returns an error if the key is missing or invalid, or the HTTP client cannot be built.
pub fn create_client(config: &BootstrapConfig) -> anyhow::Result<Arc<dyn EvmRpcClient>> {
    let private_key = std::env::var(PRIVATE_KEY_ENV)
        .map_err(|_| anyhow::anyhow!("{PRIVATE_KEY_ENV} environment variable is not set"))?;
    let client = BlockchainHttpRpcClient::from_private_key(
        config.rpc_http_url.clone(),
        config.chain_id,
        &private_key,
    )?;
    log::info!("Signing as {} on chain {}", client.sender(), client.chain_id());
    Ok(Arc::new(client))
}

/// Creates a read-only RPC client from the config, without touching the deployer key.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn create_read_client(config: &BootstrapConfig) -> anyhow::Result<Arc<dyn EvmRpcClient>> {
    let client = BlockchainHttpRpcClient::read_only(config.rpc_http_url.clone(), config.chain_id)?;
    log::info!("Reading chain {} through {}", client.chain_id(), config.rpc_http_url);
    Ok(Arc::new(client))
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn config() -> BootstrapConfig {
        BootstrapConfig::from_toml_str(
            r#"
rpc_http_url = "http://file:8545"
chain_id = 97
factory = "0x7fD493E18f52178485d34A1500a7Fa16e8c1a2b4"
position_manager = "0xB0cF94c1D32B57Fc05F8F199a8577EfcB3F62Ed8"

[[tokens]]
symbol = "USDT"
address = "0xA3142213778e757B2AacAdCEe143B03AacFe7bE9"
decimals = 6

[[tokens]]
symbol = "USDC"
address = "0x188E24768794fA1f126aB97ff5F06D4c5B4bda42"
decimals = 6

[prices]
USDT = "1"
USDC = "1"

[[pairs]]
token_a = "USDT"
token_b = "USDC"
fee = 500
amount_a = "1000000"
amount_b = "1000000"
mint = true
"#,
        )
        .unwrap()
    }

    #[rstest]
    fn test_no_overrides_keep_file(mut config: BootstrapConfig) {
        ConfigOverrides::default().apply(&mut config, None);

        assert_eq!(config.rpc_http_url, "http://file:8545");
        assert_eq!(config.failure_policy, FailurePolicy::AbortOnFirstError);
        assert!(config.report_prices);
    }

    #[rstest]
    #[case(None, Some("http://env:8545"), "http://env:8545")]
    #[case(Some("http://flag:8545"), Some("http://env:8545"), "http://flag:8545")]
    #[case(Some("http://flag:8545"), None, "http://flag:8545")]
    fn test_rpc_url_precedence(
        mut config: BootstrapConfig,
        #[case] flag: Option<&str>,
        #[case] env: Option<&str>,
        #[case] expected: &str,
    ) {
        let overrides = ConfigOverrides {
            rpc_url: flag.map(str::to_string),
            ..ConfigOverrides::default()
        };
        overrides.apply(&mut config, env.map(str::to_string));

        assert_eq!(config.rpc_http_url, expected);
    }

    #[rstest]
    fn test_flags_override_policy_and_report(mut config: BootstrapConfig) {
        let overrides = ConfigOverrides {
            rpc_url: None,
            continue_on_error: true,
            no_price_report: true,
        };
        overrides.apply(&mut config, None);

        assert_eq!(config.failure_policy, FailurePolicy::CollectAndContinue);
        assert!(!config.report_prices);
    }

    #[rstest]
    fn test_read_client_has_no_signer(config: BootstrapConfig) {
        let client = create_read_client(&config).unwrap();
        assert!(client.sender().is_zero());
    }
}
