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

//! Wide-integer helpers shared by the sqrt-price and tick math.

use alloy_primitives::{U160, U256, Uint};

/// 2^96 as a [`U256`], the fixed-point unit of a `sqrtPriceX96`.
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);

/// 2^96 as a [`U160`].
pub const Q96_U160: U160 = U160::from_limbs([0, 1 << 32, 0]);

/// Returns the floor integer square root of `x` by Babylonian iteration.
///
/// Starts from `z = ceil(x / 2)` and iterates `z = (x / z + z) / 2` while the estimate keeps
/// decreasing. The result `r` satisfies `r * r <= x < (r + 1) * (r + 1)`.
#[must_use]
pub fn sqrt<const BITS: usize, const LIMBS: usize>(x: Uint<BITS, LIMBS>) -> Uint<BITS, LIMBS> {
    if x.is_zero() {
        return x;
    }

    let one = Uint::<BITS, LIMBS>::from(1u8);
    let mut y = x;
    // (x + 1) >> 1 without overflowing at Uint::MAX
    let mut z = (x >> 1) + (x & one);
    while z < y {
        y = z;
        z = (x / z + z) >> 1;
    }
    y
}
