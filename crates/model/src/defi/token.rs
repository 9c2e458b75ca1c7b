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

use std::fmt::{Display, Formatter};

use ahash::AHashMap;
use alloy_primitives::Address;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::defi::units::MAX_TOKEN_DECIMALS;

/// Represents an ERC-20 token deployed on the target chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// The token's ticker symbol.
    pub symbol: String,
    /// The blockchain address of the token contract.
    pub address: Address,
    /// The number of decimal places used to represent fractional token amounts.
    pub decimals: u8,
}

impl Token {
    /// Creates a new [`Token`] instance with the specified properties.
    #[must_use]
    pub fn new(symbol: impl Into<String>, address: Address, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            address,
            decimals,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token(symbol={}, address={})", self.symbol, self.address)
    }
}

/// Returns the two entries ordered by address ascending, the order pool contracts require.
///
/// Each entry carries a value (an amount or a price) that is permuted with its address.
pub fn sort_by_address<T>(a: (Address, T), b: (Address, T)) -> ((Address, T), (Address, T)) {
    if a.0 <= b.0 { (a, b) } else { (b, a) }
}

/// Two distinct tokens as configured, before canonical ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub token_a: Token,
    pub token_b: Token,
}

impl TokenPair {
    /// Creates a new [`TokenPair`].
    ///
    /// # Errors
    ///
    /// Returns an error if both tokens share the same address.
    pub fn new(token_a: Token, token_b: Token) -> anyhow::Result<Self> {
        anyhow::ensure!(
            token_a.address != token_b.address,
            "Token pair {}-{} uses the same address {} twice",
            token_a.symbol,
            token_b.symbol,
            token_a.address
        );
        Ok(Self { token_a, token_b })
    }

    /// Returns `(token0, token1)`: the pair sorted by address ascending.
    #[must_use]
    pub fn sorted(&self) -> (&Token, &Token) {
        if self.token_a.address < self.token_b.address {
            (&self.token_a, &self.token_b)
        } else {
            (&self.token_b, &self.token_a)
        }
    }
}

/// Errors raised while building a [`TokenRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenRegistryError {
    #[error("Duplicate token symbol '{0}'")]
    DuplicateSymbol(String),
    #[error("Token '{symbol}' reuses address {address} of '{existing}'")]
    DuplicateAddress {
        symbol: String,
        address: Address,
        existing: String,
    },
    #[error("Token '{symbol}' has {decimals} decimals, maximum is {MAX_TOKEN_DECIMALS}")]
    InvalidDecimals { symbol: String, decimals: u8 },
}

/// Immutable lookup of the configured tokens by symbol and by address.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    by_symbol: IndexMap<String, Token>,
    by_address: AHashMap<Address, String>,
}

impl TokenRegistry {
    /// Creates a new [`TokenRegistry`], preserving the given token order.
    ///
    /// # Errors
    ///
    /// Returns an error if a symbol or address appears twice, or a token has more than 18
    /// decimals.
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Result<Self, TokenRegistryError> {
        let mut by_symbol = IndexMap::new();
        let mut by_address: AHashMap<Address, String> = AHashMap::new();

        for token in tokens {
            if token.decimals > MAX_TOKEN_DECIMALS {
                return Err(TokenRegistryError::InvalidDecimals {
                    symbol: token.symbol,
                    decimals: token.decimals,
                });
            }
            if by_symbol.contains_key(&token.symbol) {
                return Err(TokenRegistryError::DuplicateSymbol(token.symbol));
            }
            if let Some(existing) = by_address.get(&token.address) {
                return Err(TokenRegistryError::DuplicateAddress {
                    symbol: token.symbol,
                    address: token.address,
                    existing: existing.clone(),
                });
            }
            by_address.insert(token.address, token.symbol.clone());
            by_symbol.insert(token.symbol.clone(), token);
        }

        Ok(Self {
            by_symbol,
            by_address,
        })
    }

    /// Returns the token registered under `symbol`.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&Token> {
        self.by_symbol.get(symbol)
    }

    /// Returns the token deployed at `address`.
    #[must_use]
    pub fn get_by_address(&self, address: &Address) -> Option<&Token> {
        self.by_address
            .get(address)
            .and_then(|symbol| self.by_symbol.get(symbol))
    }

    /// Returns the symbol for `address`, or the checksummed address when it is not registered.
    #[must_use]
    pub fn display_name(&self, address: &Address) -> String {
        self.get_by_address(address)
            .map_or_else(|| address.to_checksum(None), |token| token.symbol.clone())
    }

    /// Returns the tokens in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.by_symbol.values()
    }
}
