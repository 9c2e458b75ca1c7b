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

use alloy_primitives::{U160, U256, U512};
use anyhow::bail;
use rust_decimal::Decimal;

use super::{
    full_math::sqrt,
    tick_math::{MAX_SQRT_RATIO, MIN_SQRT_RATIO},
};
use crate::defi::units::{MAX_TOKEN_DECIMALS, parse_units};

/// Encodes the sqrt ratio of two token amounts as a Q64.96 fixed point number.
///
/// Calculates `floor(sqrt(amount1 / amount0) * 2^96)` exactly, as
/// `floor(sqrt((amount1 << 192) / amount0))` in 512-bit integers.
///
/// # Errors
///
/// Returns an error if the result does not fit in 160 bits.
///
/// # Panics
///
/// Panics if `amount0` is zero.
#[allow(clippy::panic_in_result_fn)]
pub fn encode_sqrt_ratio_x96(amount1: U256, amount0: U256) -> anyhow::Result<U160> {
    assert!(!amount0.is_zero(), "Division by zero: amount0 must be non-zero");

    let ratio_q192 = (U512::from(amount1) << 192) / U512::from(amount0);
    let root = sqrt(ratio_q192);

    if root >= U512::from(1u8) << 160usize {
        bail!("sqrt ratio of {amount1}/{amount0} overflows 160 bits");
    }
    Ok(root.to::<U160>())
}

/// Encodes the initial `sqrtPriceX96` for a pool from two reserve quantities.
///
/// Each reserve is normalized to 18 decimals as `floor(reserve * 10^(18 - decimals))` and the
/// scaled quote is divided by the scaled base. With `reserve_quote` the USD price of `token0`
/// and `reserve_base` the USD price of `token1`, the result is the price of `token0` in `token1`
/// native units, as the pool expects.
///
/// # Errors
///
/// Returns an error if:
/// - Either reserve is negative or `reserve_quote` is zero.
/// - Either token has more than 18 decimals.
/// - `reserve_base` scales to zero at 18 decimals.
/// - The result lies outside `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`.
///
/// # Panics
///
/// Panics if `reserve_base` is zero.
#[allow(clippy::panic_in_result_fn)]
pub fn encode_sqrt_price(
    reserve_quote: Decimal,
    reserve_base: Decimal,
    decimals_quote: u8,
    decimals_base: u8,
) -> anyhow::Result<U160> {
    assert!(!reserve_base.is_zero(), "reserve_base must be non-zero");

    if reserve_quote.is_sign_negative() || reserve_base.is_sign_negative() {
        bail!("Reserves must be non-negative, was {reserve_quote} / {reserve_base}");
    }
    if reserve_quote.is_zero() {
        bail!("reserve_quote must be positive");
    }
    for decimals in [decimals_quote, decimals_base] {
        if decimals > MAX_TOKEN_DECIMALS {
            bail!("Token decimals {decimals} exceed maximum {MAX_TOKEN_DECIMALS}");
        }
    }

    let quote_scaled = parse_units(reserve_quote, MAX_TOKEN_DECIMALS - decimals_quote)?;
    let base_scaled = parse_units(reserve_base, MAX_TOKEN_DECIMALS - decimals_base)?;
    if base_scaled.is_zero() {
        bail!("reserve_base {reserve_base} truncates to zero at {MAX_TOKEN_DECIMALS} decimals");
    }

    let sqrt_price_x96 = encode_sqrt_ratio_x96(quote_scaled, base_scaled)?;
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        bail!(
            "Encoded sqrt price {sqrt_price_x96} for {reserve_quote}/{reserve_base} lies outside [{MIN_SQRT_RATIO}, {MAX_SQRT_RATIO})"
        );
    }

    Ok(sqrt_price_x96)
}

/// Returns the price of token0 in token1 implied by `sqrt_price_x96`, adjusted for decimals.
///
/// Lossy `f64` conversion for logs and reports. Never feed the result back into a contract call.
#[must_use]
pub fn sqrt_price_x96_to_price(sqrt_price_x96: U160, decimals0: u8, decimals1: u8) -> f64 {
    // Q64.96 to Q64.64 always fits in u128
    let sqrt_q64 = (sqrt_price_x96 >> 32usize).to::<u128>() as f64;
    let sqrt_price = sqrt_q64 / 2f64.powi(64);
    let raw_price = sqrt_price * sqrt_price;
    raw_price * 10f64.powi(i32::from(decimals0) - i32::from(decimals1))
}
