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

use std::str::FromStr;

use alloy_primitives::Address;
use anyhow::{Context, bail};

/// Validates and parses an EVM address string.
///
/// Accepts `0x` followed by 40 hex digits. Mixed-case input must carry a valid EIP-55 checksum;
/// all-lowercase or all-uppercase input is accepted as is.
///
/// # Errors
///
/// Returns an error if the string is malformed or its mixed-case checksum does not match.
pub fn validate_address(address: &str) -> anyhow::Result<Address> {
    let Some(hex_part) = address.strip_prefix("0x") else {
        bail!("Address '{address}' must start with 0x");
    };
    if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Address '{address}' must be 40 hex digits after 0x");
    }

    let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(address, None)
            .with_context(|| format!("Address '{address}' has an invalid EIP-55 checksum"))
    } else {
        Address::from_str(address).with_context(|| format!("Invalid address '{address}'"))
    }
}
