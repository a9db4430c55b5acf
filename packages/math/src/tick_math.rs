// Tick <-> Q64.96 sqrt price conversion
//
// sqrt(1.0001^tick) * 2^96 is built as a product of precomputed
// Q128 factors sqrt(1.0001^-(2^i)), one per set bit of |tick|.

use primitive_types::U256;

use crate::constants::{MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK};
use crate::error::PoolError;

/// sqrt(1.0001^-(2^i)) in Q128 for i = 1..=19 (bit 0 seeds the product)
const BIT_FACTORS: [(u32, u128); 19] = [
    (0x2, 0xfff97272373d413259a46990580e213a),
    (0x4, 0xfff2e50f5f656932ef12357cf3c7fdcc),
    (0x8, 0xffe5caca7e10e4e61c3624eaa0941cd0),
    (0x10, 0xffcb9843d60f6159c9db58835c926644),
    (0x20, 0xff973b41fa98c081472e6896dfb254c0),
    (0x40, 0xff2ea16466c96a3843ec78b326b52861),
    (0x80, 0xfe5dee046a99a2a811c461f1969c3053),
    (0x100, 0xfcbe86c7900a88aedcffc83b479aa3a4),
    (0x200, 0xf987a7253ac413176f2b074cf7815e54),
    (0x400, 0xf3392b0822b70005940c7a398e4b70f3),
    (0x800, 0xe7159475a2c29b7443b29c7fa6e889d9),
    (0x1000, 0xd097f3bdfd2022b8845ad8f792aa5825),
    (0x2000, 0xa9f746462d870fdf8a65dc1f90e061e5),
    (0x4000, 0x70d869a156d2a1b890bb3df62baf32f7),
    (0x8000, 0x31be135f97d08fd981231505542fcfa6),
    (0x10000, 0x9aa508b5b7a84e1c677de54f3e99bc9),
    (0x20000, 0x5d6af8dedb81196699c329225ee604),
    (0x40000, 0x2216e584f5fa1ea926041bedfe98),
    (0x80000, 0x48a170391f7dc42444e8fa2),
];

const BIT0_FACTOR: u128 = 0xfffcb933bd6fad37aa2d162d1a594001;

/// log_sqrt(1.0001)(2) in Q128 scaled: 2^64 / log2(sqrt(1.0001))
const LOG_SQRT10001_MULTIPLIER: u128 = 255738958999603826347141;
/// Error bounds of the log approximation, Q128
const TICK_LOW_ERROR: u128 = 3402992956809132418596140100660247210;
const TICK_HIGH_ERROR: u128 = 291339464771989622907027621153398088495;

/// Q64.96 sqrt price for a tick.
///
/// Valid for MIN_TICK..=MAX_TICK; the result is rounded up so that
/// `get_tick_at_sqrt_ratio` maps it back to the same tick.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, PoolError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(PoolError::TickOutOfRange);
    }
    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(BIT0_FACTOR)
    } else {
        U256::one() << 128
    };
    for (bit, factor) in BIT_FACTORS.iter() {
        if abs_tick & bit != 0 {
            ratio = (ratio * U256::from(*factor)) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q128.96, rounding up
    let rounding = if (ratio & U256::from(u32::MAX)).is_zero() {
        U256::zero()
    } else {
        U256::one()
    };
    Ok((ratio >> 32) + rounding)
}

/// Greatest tick whose sqrt price is <= `sqrt_price_x96`.
///
/// Valid for MIN_SQRT_RATIO <= price < MAX_SQRT_RATIO.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U256) -> Result<i32, PoolError> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(PoolError::SqrtPriceOutOfRange);
    }
    let ratio = sqrt_price_x96 << 32;

    let msb = ratio.bits() - 1;
    let mut r = if msb >= 128 {
        ratio >> (msb - 127)
    } else {
        ratio << (127 - msb)
    };

    // Integer part of log2, Q64
    let mut log_2: i128 = (msb as i128 - 128) << 64;

    // Fractional bits by repeated squaring of the normalized mantissa
    for shift in (50..=63).rev() {
        r = (r * r) >> 127;
        let f = (r >> 128).low_u64();
        log_2 |= (f as i128) << shift;
        r = r >> (f as usize);
    }

    let log_sqrt10001 = signed(log_2).overflowing_mul(U256::from(LOG_SQRT10001_MULTIPLIER)).0;

    let tick_low = sar_128(log_sqrt10001.overflowing_sub(U256::from(TICK_LOW_ERROR)).0);
    let tick_high = sar_128(log_sqrt10001.overflowing_add(U256::from(TICK_HIGH_ERROR)).0);

    if tick_low == tick_high {
        Ok(tick_low)
    } else if get_sqrt_ratio_at_tick(tick_high)? <= sqrt_price_x96 {
        Ok(tick_high)
    } else {
        Ok(tick_low)
    }
}

/// i128 as a two's-complement 256-bit word
#[inline]
fn signed(x: i128) -> U256 {
    let magnitude = U256::from(x.unsigned_abs());
    if x < 0 {
        (!magnitude).overflowing_add(U256::one()).0
    } else {
        magnitude
    }
}

/// Arithmetic shift right by 128 of a two's-complement word, narrowed to a tick
#[inline]
fn sar_128(x: U256) -> i32 {
    let shifted = if x.bit(255) { !((!x) >> 128) } else { x >> 128 };
    shifted.low_u64() as i64 as i32
}
