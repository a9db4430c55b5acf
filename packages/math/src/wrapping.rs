// Fixed-width wrapping arithmetic
//
// Fee growth wraps at 2^256, seconds-per-liquidity at 2^160 and tick
// cumulatives at 2^56 (signed). Consumers only ever take differences,
// so each accumulator keeps exactly its own modulus.

use primitive_types::U256;

/// (a + b) mod 2^256
#[inline]
pub fn add_u256(a: U256, b: U256) -> U256 {
    a.overflowing_add(b).0
}

/// (a - b) mod 2^256
#[inline]
pub fn sub_u256(a: U256, b: U256) -> U256 {
    a.overflowing_sub(b).0
}

/// Truncate to the low 160 bits
#[inline]
pub fn truncate_u160(x: U256) -> U256 {
    x & ((U256::one() << 160) - U256::one())
}

/// (a + b) mod 2^160
#[inline]
pub fn add_u160(a: U256, b: U256) -> U256 {
    truncate_u160(add_u256(a, b))
}

/// (a - b) mod 2^160
#[inline]
pub fn sub_u160(a: U256, b: U256) -> U256 {
    truncate_u160(sub_u256(a, b))
}

/// Sign-extend the low 56 bits
#[inline]
pub fn truncate_i56(x: i64) -> i64 {
    (x << 8) >> 8
}

/// (a + b) as a signed 56-bit value
#[inline]
pub fn add_i56(a: i64, b: i64) -> i64 {
    truncate_i56(a.wrapping_add(b))
}

/// (a - b) as a signed 56-bit value
#[inline]
pub fn sub_i56(a: i64, b: i64) -> i64 {
    truncate_i56(a.wrapping_sub(b))
}
