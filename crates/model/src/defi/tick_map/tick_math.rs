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

//! Conversions between ticks and `sqrtPriceX96` values, bit-exact with the Uniswap V3 `TickMath`
//! library.

use alloy_primitives::{U160, U256};

/// The minimum tick that may be passed to [`get_sqrt_ratio_at_tick`].
pub const MIN_TICK: i32 = -887_272;

/// The maximum tick that may be passed to [`get_sqrt_ratio_at_tick`].
pub const MAX_TICK: i32 = -MIN_TICK;

/// The minimum value returned by [`get_sqrt_ratio_at_tick`], reached at [`MIN_TICK`].
pub const MIN_SQRT_RATIO: U160 = U160::from_limbs([4_295_128_739, 0, 0]);

/// The maximum value returned by [`get_sqrt_ratio_at_tick`], reached at [`MAX_TICK`].
pub const MAX_SQRT_RATIO: U160 = U160::from_limbs([
    6_743_328_256_752_651_558,
    17_280_870_778_742_802_505,
    4_294_805_859,
]);

const ODD_TICK_RATIO: u128 = 0xfffc_b933_bd6f_ad37_aa2d_162d_1a59_4001;

// Q128.128 values of 1 / sqrt(1.0001)^(2^i) for each remaining bit of |tick|.
const TICK_MULTIPLIERS: [(u32, u128); 19] = [
    (0x2, 0xfff9_7272_373d_4132_59a4_6990_580e_213a),
    (0x4, 0xfff2_e50f_5f65_6932_ef12_357c_f3c7_fdcc),
    (0x8, 0xffe5_caca_7e10_e4e6_1c36_24ea_a094_1cd0),
    (0x10, 0xffcb_9843_d60f_6159_c9db_5883_5c92_6644),
    (0x20, 0xff97_3b41_fa98_c081_472e_6896_dfb2_54c0),
    (0x40, 0xff2e_a164_66c9_6a38_43ec_78b3_26b5_2861),
    (0x80, 0xfe5d_ee04_6a99_a2a8_11c4_61f1_969c_3053),
    (0x100, 0xfcbe_86c7_900a_88ae_dcff_c83b_479a_a3a4),
    (0x200, 0xf987_a725_3ac4_1317_6f2b_074c_f781_5e54),
    (0x400, 0xf339_2b08_22b7_0005_940c_7a39_8e4b_70f3),
    (0x800, 0xe715_9475_a2c2_9b74_43b2_9c7f_a6e8_89d9),
    (0x1000, 0xd097_f3bd_fd20_22b8_845a_d8f7_92aa_5825),
    (0x2000, 0xa9f7_4646_2d87_0fdf_8a65_dc1f_90e0_61e5),
    (0x4000, 0x70d8_69a1_56d2_a1b8_90bb_3df6_2baf_32f7),
    (0x8000, 0x31be_135f_97d0_8fd9_8123_1505_542f_cfa6),
    (0x10000, 0x09aa_508b_5b7a_84e1_c677_de54_f3e9_9bc9),
    (0x20000, 0x005d_6af8_dedb_8119_6699_c329_225e_e604),
    (0x40000, 0x0000_2216_e584_f5fa_1ea9_2604_1bed_fe98),
    (0x80000, 0x0000_0000_048a_1703_91f7_dc42_444e_8fa2),
];

/// Returns `sqrt(1.0001^tick) * 2^96` as a Q64.96 number.
///
/// # Panics
///
/// Panics if `tick` is outside `[MIN_TICK, MAX_TICK]`.
#[must_use]
pub fn get_sqrt_ratio_at_tick(tick: i32) -> U160 {
    assert!(
        (MIN_TICK..=MAX_TICK).contains(&tick),
        "Tick {tick} out of bounds [{MIN_TICK}, {MAX_TICK}]"
    );

    let abs_tick = tick.unsigned_abs();
    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(ODD_TICK_RATIO)
    } else {
        U256::from(1u8) << 128
    };

    for &(mask, multiplier) in &TICK_MULTIPLIERS {
        if abs_tick & mask != 0 {
            ratio = (ratio * U256::from(multiplier)) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 to Q128.96, rounding up so that get_tick_at_sqrt_ratio(result) == tick
    let remainder_bits = U256::from(u32::MAX);
    let round_up = u8::from(!(ratio & remainder_bits).is_zero());
    U160::from((ratio >> 32) + U256::from(round_up))
}

/// Returns the greatest tick `t` such that `get_sqrt_ratio_at_tick(t) <= sqrt_price_x96`.
///
/// # Panics
///
/// Panics if `sqrt_price_x96` is outside `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`.
#[must_use]
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U160) -> i32 {
    assert!(
        sqrt_price_x96 >= MIN_SQRT_RATIO && sqrt_price_x96 < MAX_SQRT_RATIO,
        "Sqrt price {sqrt_price_x96} out of bounds [{MIN_SQRT_RATIO}, {MAX_SQRT_RATIO})"
    );

    let mut low = MIN_TICK;
    let mut high = MAX_TICK;
    while low < high {
        let mid = low + (high - low + 1) / 2;
        if get_sqrt_ratio_at_tick(mid) <= sqrt_price_x96 {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    low
}

/// Returns the lowest tick aligned to `tick_spacing` that is still `>= MIN_TICK`.
#[must_use]
pub const fn min_usable_tick(tick_spacing: i32) -> i32 {
    (MIN_TICK / tick_spacing) * tick_spacing
}

/// Returns the highest tick aligned to `tick_spacing` that is still `<= MAX_TICK`.
#[must_use]
pub const fn max_usable_tick(tick_spacing: i32) -> i32 {
    (MAX_TICK / tick_spacing) * tick_spacing
}

/// Returns the raw price `1.0001^tick` as an `f64`, for display only.
#[must_use]
pub fn tick_to_price(tick: i32) -> f64 {
    1.0001_f64.powi(tick)
}
