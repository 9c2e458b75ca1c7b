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

//! TOML configuration of a bootstrap run.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use alloy::primitives::Address;
use indexmap::IndexMap;
use nova_model::defi::{
    FeeTier, Token, TokenRegistry, token::TokenRegistryError, validation::validate_address,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::{
    bootstrap::liquidity::SeedOptions,
    rpc::{ConfirmationOptions, DEFAULT_CONFIRMATION_TIMEOUT, DEFAULT_POLL_INTERVAL},
};

/// What the orchestrator does after a pair fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failing pair.
    #[default]
    AbortOnFirstError,
    /// Record the failure and move on to the next pair.
    CollectAndContinue,
}

/// Errors raised while loading or validating a [`BootstrapConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Registry(#[from] TokenRegistryError),
    #[error("Pair {pair} references unknown token '{symbol}'")]
    UnknownToken { pair: String, symbol: String },
    #[error("Pair {pair} uses token '{symbol}' on both sides")]
    SameToken { pair: String, symbol: String },
    #[error("Pair {pair} has a negative amount")]
    NegativeAmount { pair: String },
    #[error("No price configured for token '{0}'")]
    MissingPrice(String),
    #[error("Price of '{symbol}' must be positive, was {price}")]
    NonPositivePrice { symbol: String, price: Decimal },
    #[error("Field '{field}' must be at least {min}, was {value}")]
    OutOfRange {
        field: &'static str,
        min: u64,
        value: u64,
    },
    #[error("At least one pair must be configured")]
    NoPairs,
}

/// A token deployed on the target chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenConfig {
    pub symbol: String,
    #[serde(deserialize_with = "deserialize_address")]
    pub address: Address,
    pub decimals: u8,
}

/// A pool to bootstrap and the liquidity to seed it with, in configured order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PairConfig {
    pub token_a: String,
    pub token_b: String,
    pub fee: FeeTier,
    /// Amount of `token_a` in decimal units.
    pub amount_a: Decimal,
    /// Amount of `token_b` in decimal units.
    pub amount_b: Decimal,
    /// Whether to mint both amounts to the sender first (test tokens only).
    #[serde(default)]
    pub mint: bool,
}

impl PairConfig {
    /// Returns the pair name `"<A>-<B>"`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}-{}", self.token_a, self.token_b)
    }
}

const fn default_confirmation_timeout_secs() -> u64 {
    DEFAULT_CONFIRMATION_TIMEOUT.as_secs()
}

#[allow(clippy::cast_possible_truncation)]
const fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

const fn default_deadline_secs() -> u64 {
    20 * 60
}

const fn default_gas_limit_multiplier_pct() -> u64 {
    120
}

const fn default_half_width_spacings() -> u32 {
    nova_model::defi::tick_map::DEFAULT_HALF_WIDTH_SPACINGS
}

const fn default_true() -> bool {
    true
}

/// Configuration of a bootstrap run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BootstrapConfig {
    /// The HTTP URL of the JSON-RPC endpoint.
    pub rpc_http_url: String,
    /// The EIP-155 chain ID transactions are signed for.
    pub chain_id: u64,
    /// The Uniswap V3 factory address.
    #[serde(deserialize_with = "deserialize_address")]
    pub factory: Address,
    /// The `NonfungiblePositionManager` address.
    #[serde(deserialize_with = "deserialize_address")]
    pub position_manager: Address,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Seconds from now until a mint expires.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
    /// Gas limit sent with a mint as a percentage of its estimate.
    #[serde(default = "default_gas_limit_multiplier_pct")]
    pub gas_limit_multiplier_pct: u64,
    /// Half-width of each position in tick spacings.
    #[serde(default = "default_half_width_spacings")]
    pub half_width_spacings: u32,
    /// Whether to print the price report after a successful bootstrap.
    #[serde(default = "default_true")]
    pub report_prices: bool,
    pub tokens: Vec<TokenConfig>,
    /// USD price per token symbol, used only for initial pool prices.
    pub prices: IndexMap<String, Decimal>,
    pub pairs: Vec<PairConfig>,
}

fn deserialize_address<'de, D>(deserializer: D) -> Result<Address, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    validate_address(&value).map_err(serde::de::Error::custom)
}

impl BootstrapConfig {
    /// Reads, parses and validates the config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML for this schema, or fails
    /// [`BootstrapConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the config is usable before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A token symbol or address appears twice, or a token has more than 18 decimals.
    /// - A pair references an unknown symbol, uses one token twice, or has a negative amount.
    /// - A token used by a pair has no price, or a price is not positive.
    /// - There are no pairs, or a numeric setting is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let registry = self.token_registry()?;

        for (symbol, price) in &self.prices {
            if *price <= Decimal::ZERO {
                return Err(ConfigError::NonPositivePrice {
                    symbol: symbol.clone(),
                    price: *price,
                });
            }
        }

        if self.pairs.is_empty() {
            return Err(ConfigError::NoPairs);
        }

        for pair in &self.pairs {
            for symbol in [&pair.token_a, &pair.token_b] {
                if registry.get(symbol).is_none() {
                    return Err(ConfigError::UnknownToken {
                        pair: pair.name(),
                        symbol: symbol.clone(),
                    });
                }
                if !self.prices.contains_key(symbol) {
                    return Err(ConfigError::MissingPrice(symbol.clone()));
                }
            }
            if pair.token_a == pair.token_b {
                return Err(ConfigError::SameToken {
                    pair: pair.name(),
                    symbol: pair.token_a.clone(),
                });
            }
            if pair.amount_a.is_sign_negative() || pair.amount_b.is_sign_negative() {
                return Err(ConfigError::NegativeAmount { pair: pair.name() });
            }
        }

        check_at_least("confirmation_timeout_secs", self.confirmation_timeout_secs, 1)?;
        check_at_least("poll_interval_ms", self.poll_interval_ms, 1)?;
        check_at_least("deadline_secs", self.deadline_secs, 1)?;
        check_at_least("gas_limit_multiplier_pct", self.gas_limit_multiplier_pct, 100)?;
        check_at_least(
            "half_width_spacings",
            u64::from(self.half_width_spacings),
            1,
        )?;

        Ok(())
    }

    /// Builds the immutable token registry from `[[tokens]]`.
    ///
    /// # Errors
    ///
    /// Returns an error if a symbol or address is duplicated or decimals exceed 18.
    pub fn token_registry(&self) -> Result<TokenRegistry, ConfigError> {
        let tokens = self
            .tokens
            .iter()
            .map(|token| Token::new(token.symbol.clone(), token.address, token.decimals));
        Ok(TokenRegistry::new(tokens)?)
    }

    /// Returns the configured USD price of `symbol`.
    #[must_use]
    pub fn price(&self, symbol: &str) -> Option<Decimal> {
        self.prices.get(symbol).copied()
    }

    /// Returns the receipt wait settings, aborted by `cancellation`.
    #[must_use]
    pub fn confirmation_options(&self, cancellation: CancellationToken) -> ConfirmationOptions {
        ConfirmationOptions::new(
            Duration::from_secs(self.confirmation_timeout_secs),
            Duration::from_millis(self.poll_interval_ms),
            cancellation,
        )
    }

    /// Returns the liquidity seeding settings.
    #[must_use]
    pub fn seed_options(&self) -> SeedOptions {
        SeedOptions {
            half_width_spacings: self.half_width_spacings,
            deadline: Duration::from_secs(self.deadline_secs),
            gas_limit_multiplier_pct: self.gas_limit_multiplier_pct,
        }
    }
}

fn check_at_least(field: &'static str, value: u64, min: u64) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::OutOfRange { field, min, value });
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use std::io::Write;

    use alloy::primitives::address;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    use super::*;

    const CONFIG: &str = r#"
rpc_http_url = "http://127.0.0.1:8545"
chain_id = 97
factory = "0x7fD493E18f52178485d34A1500a7Fa16e8c1a2b4"
position_manager = "0xB0cF94c1D32B57Fc05F8F199a8577EfcB3F62Ed8"

[[tokens]]
symbol = "BTC"
address = "0x31a721837d8964772142e1136B8878b6608549F2"
decimals = 8

[[tokens]]
symbol = "BNB"
address = "0xE03639b06Be343BC0898FAaA8463EcF6E5c14869"
decimals = 18

[prices]
BTC = "107000"
BNB = "710"

[[pairs]]
token_a = "BTC"
token_b = "BNB"
fee = 500
amount_a = "0.01"
amount_b = "1.507042253521126760"
"#;

    #[fixture]
    fn config() -> BootstrapConfig {
        BootstrapConfig::from_toml_str(CONFIG).unwrap()
    }

    fn with_replaced(from: &str, to: &str) -> Result<BootstrapConfig, ConfigError> {
        BootstrapConfig::from_toml_str(&CONFIG.replace(from, to))
    }

    #[rstest]
    fn test_parse_config(config: BootstrapConfig) {
        assert_eq!(config.chain_id, 97);
        assert_eq!(
            config.factory,
            address!("0x7fD493E18f52178485d34A1500a7Fa16e8c1a2b4")
        );
        assert_eq!(config.tokens.len(), 2);
        assert_eq!(config.price("BTC"), Some(dec!(107000)));
        assert_eq!(config.price("GOLD"), None);

        let pair = &config.pairs[0];
        assert_eq!(pair.name(), "BTC-BNB");
        assert_eq!(pair.fee, FeeTier::Low);
        assert_eq!(pair.amount_a, dec!(0.01));
        assert_eq!(pair.amount_b, dec!(1.507042253521126760));
        assert!(!pair.mint);
    }

    #[rstest]
    fn test_defaults(config: BootstrapConfig) {
        assert_eq!(config.failure_policy, FailurePolicy::AbortOnFirstError);
        assert_eq!(config.confirmation_timeout_secs, 120);
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.deadline_secs, 1200);
        assert_eq!(config.gas_limit_multiplier_pct, 120);
        assert_eq!(config.half_width_spacings, 50);
        assert!(config.report_prices);

        let seed = config.seed_options();
        assert_eq!(seed, SeedOptions::default());

        let confirmation = config.confirmation_options(CancellationToken::new());
        assert_eq!(confirmation.timeout, Duration::from_secs(120));
        assert_eq!(confirmation.poll_interval, Duration::from_millis(500));
    }

    #[rstest]
    fn test_failure_policy_parses_snake_case() {
        let config = with_replaced(
            "chain_id = 97",
            "chain_id = 97\nfailure_policy = \"collect_and_continue\"",
        )
        .unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::CollectAndContinue);
    }

    #[rstest]
    fn test_token_registry(config: BootstrapConfig) {
        let registry = config.token_registry().unwrap();
        assert_eq!(registry.iter().count(), 2);
        assert_eq!(registry.get("BTC").unwrap().decimals, 8);
    }

    #[rstest]
    #[case("fee = 500", "fee = 2500")]
    #[case("decimals = 8", "decimals = \"eight\"")]
    #[case(
        "0x31a721837d8964772142e1136B8878b6608549F2",
        "0x31a721837d8964772142e1136B8878b6608549f2"
    )]
    #[case(
        "0x31a721837d8964772142e1136B8878b6608549F2",
        "31a721837d8964772142e1136B8878b6608549F2"
    )]
    fn test_rejects_unparseable(#[case] from: &str, #[case] to: &str) {
        let result = with_replaced(from, to);
        assert!(matches!(result, Err(ConfigError::Parse(_))), "{result:?}");
    }

    #[rstest]
    fn test_rejects_unknown_token() {
        let result = with_replaced("token_b = \"BNB\"", "token_b = \"ETH\"");
        assert!(matches!(
            result,
            Err(ConfigError::UnknownToken { pair, symbol }) if pair == "BTC-ETH" && symbol == "ETH"
        ));
    }

    #[rstest]
    fn test_rejects_same_token() {
        let result = with_replaced("token_b = \"BNB\"", "token_b = \"BTC\"");
        assert!(matches!(result, Err(ConfigError::SameToken { .. })));
    }

    #[rstest]
    fn test_rejects_duplicate_symbol() {
        let result = with_replaced("symbol = \"BNB\"", "symbol = \"BTC\"");
        assert!(matches!(
            result,
            Err(ConfigError::Registry(TokenRegistryError::DuplicateSymbol(_)))
        ));
    }

    #[rstest]
    fn test_rejects_too_many_decimals() {
        let result = with_replaced("decimals = 18", "decimals = 19");
        assert!(matches!(
            result,
            Err(ConfigError::Registry(TokenRegistryError::InvalidDecimals { .. }))
        ));
    }

    #[rstest]
    #[case("BNB = \"710\"", "BNB = \"0\"")]
    #[case("BNB = \"710\"", "BNB = \"-710\"")]
    fn test_rejects_non_positive_price(#[case] from: &str, #[case] to: &str) {
        let result = with_replaced(from, to);
        assert!(matches!(result, Err(ConfigError::NonPositivePrice { .. })));
    }

    #[rstest]
    fn test_rejects_missing_price() {
        let result = with_replaced("BNB = \"710\"", "");
        assert!(matches!(result, Err(ConfigError::MissingPrice(symbol)) if symbol == "BNB"));
    }

    #[rstest]
    fn test_rejects_negative_amount() {
        let result = with_replaced("amount_a = \"0.01\"", "amount_a = \"-0.01\"");
        assert!(matches!(result, Err(ConfigError::NegativeAmount { .. })));
    }

    #[rstest]
    fn test_rejects_low_gas_multiplier() {
        let result = with_replaced("chain_id = 97", "chain_id = 97\ngas_limit_multiplier_pct = 90");
        assert!(matches!(
            result,
            Err(ConfigError::OutOfRange {
                field: "gas_limit_multiplier_pct",
                ..
            })
        ));
    }

    #[rstest]
    fn test_rejects_no_pairs() {
        let without_pairs = format!("pairs = []\n{}", CONFIG.split("[[pairs]]").next().unwrap());
        let result = BootstrapConfig::from_toml_str(&without_pairs);
        assert!(matches!(result, Err(ConfigError::NoPairs)));
    }

    #[rstest]
    fn test_shipped_config_is_valid() {
        let config =
            BootstrapConfig::from_toml_str(include_str!("../../../../config/bootstrap.toml"))
                .unwrap();

        let names: Vec<String> = config.pairs.iter().map(PairConfig::name).collect();
        assert_eq!(
            names,
            vec![
                "BTC-BNB",
                "USDT-USDC",
                "DAI-BNB",
                "USDC-GOLD",
                "USDC-BNB",
                "USDT-BNB",
                "USDT-GOLD"
            ]
        );
        assert!(config.pairs.iter().all(|pair| pair.fee == FeeTier::Low));
        assert_eq!(config.token_registry().unwrap().iter().count(), 6);
        assert_eq!(config.price("GOLD"), Some(dec!(1900)));
    }

    #[rstest]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();

        let config = BootstrapConfig::load(file.path()).unwrap();

        assert_eq!(config.pairs.len(), 1);
    }

    #[rstest]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let result = BootstrapConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::Io { path: p, .. }) if p == path));
    }
}
