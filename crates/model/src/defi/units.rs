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

//! Conversion between human decimal amounts and on-chain integer units.
//!
//! Pure integer math only: amounts are never routed through `f64`.

use alloy_primitives::U256;
use anyhow::{Result, anyhow, bail};
use rust_decimal::Decimal;

/// Maximum token decimals supported by the bootstrap.
pub const MAX_TOKEN_DECIMALS: u8 = 18;

/// Maximum decimals s.t. 10^decimals fits in 256 bits.
/// floor(log10(2^256-1)) = 77
const MAX_DECIMALS_FIT: u32 = 77;

/// Compute 10^d as U256 (d <= 77).
///
/// # Errors
///
/// Returns an error if `d` exceeds 77.
pub fn pow10_u256(d: u32) -> Result<U256> {
    if d > MAX_DECIMALS_FIT {
        bail!("decimals={d} exceeds 10^d capacity for U256");
    }
    Ok(U256::from(10u8).pow(U256::from(d)))
}

/// Split `amount / 10^decimals` into (integer_part, fractional_digits_string with length==decimals).
fn u256_scaled_parts(amount: U256, decimals: u32) -> Result<(U256, String)> {
    if decimals == 0 {
        return Ok((amount, String::new()));
    }
    let denom = pow10_u256(decimals)?;
    let int_part = amount / denom;
    let frac = amount % denom;

    let frac_digits = frac.to_string();
    let frac_str = format!("{frac_digits:0>width$}", width = decimals as usize);
    debug_assert_eq!(frac_str.len(), decimals as usize);
    Ok((int_part, frac_str))
}

/// Exact, human-friendly decimal string without floating point.
///
/// # Examples
/// - amount=1_000_000_000_000_000_000, decimals=18 -> "1"
/// - amount=12345, decimals=6 -> "0.012345"
///
/// # Errors
///
/// Returns an error if the decimals parameter exceeds the maximum supported value.
pub fn u256_to_decimal_string(amount: U256, decimals: u32) -> Result<String> {
    let (int_part, frac_str) = u256_scaled_parts(amount, decimals)?;
    let frac_str = frac_str.trim_end_matches('0');
    if frac_str.is_empty() {
        Ok(int_part.to_string())
    } else {
        Ok(format!("{int_part}.{frac_str}"))
    }
}

/// Converts a decimal amount into integer units: `floor(value * 10^decimals)`.
///
/// # Errors
///
/// Returns an error if `value` is negative or the result overflows 256 bits.
pub fn parse_units(value: Decimal, decimals: u8) -> Result<U256> {
    if value.is_sign_negative() && !value.is_zero() {
        bail!("Cannot convert negative amount {value} to integer units");
    }

    let mantissa = U256::from(value.mantissa().unsigned_abs());
    let scaled = mantissa
        .checked_mul(pow10_u256(u32::from(decimals))?)
        .ok_or_else(|| anyhow!("Amount {value} overflows U256 at {decimals} decimals"))?;

    Ok(scaled / pow10_u256(value.scale())?)
}

/// Formats integer units as a decimal string for the given token decimals.
///
/// # Errors
///
/// Returns an error if `decimals` exceeds the maximum supported value.
pub fn format_units(amount: U256, decimals: u8) -> Result<String> {
    u256_to_decimal_string(amount, u32::from(decimals))
}
