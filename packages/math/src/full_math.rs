// Full-precision multiply-divide over 256-bit operands

use primitive_types::{U256, U512};

use crate::error::PoolError;

/// Narrow a 512-bit value, failing if the high half is occupied
#[inline]
fn narrow(value: U512) -> Result<U256, PoolError> {
    let U512(ref limbs) = value;
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return Err(PoolError::MulDivOverflow);
    }
    Ok(U256([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// floor(a * b / denominator) with a 512-bit intermediate product.
///
/// Fails on a zero denominator or when the quotient does not fit in 256 bits.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, PoolError> {
    if denominator.is_zero() {
        return Err(PoolError::DivisionByZero);
    }
    let (quotient, _) = a.full_mul(b).div_mod(U512::from(denominator));
    narrow(quotient)
}

/// ceil(a * b / denominator) with a 512-bit intermediate product.
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, PoolError> {
    if denominator.is_zero() {
        return Err(PoolError::DivisionByZero);
    }
    let (quotient, remainder) = a.full_mul(b).div_mod(U512::from(denominator));
    let result = narrow(quotient)?;
    if remainder.is_zero() {
        Ok(result)
    } else {
        result.checked_add(U256::one()).ok_or(PoolError::MulDivOverflow)
    }
}

/// ceil(a / b)
#[inline]
pub fn div_rounding_up(a: U256, b: U256) -> Result<U256, PoolError> {
    if b.is_zero() {
        return Err(PoolError::DivisionByZero);
    }
    let (quotient, remainder) = a.div_mod(b);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        // quotient < 2^256 - 1 whenever b > 1
        Ok(quotient + U256::one())
    }
}
