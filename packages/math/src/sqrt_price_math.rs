// Sqrt price and token amount deltas over a constant-liquidity range

use primitive_types::U256;

use crate::constants::{Q96, RESOLUTION_96};
use crate::error::PoolError;
use crate::full_math::{div_rounding_up, mul_div, mul_div_rounding_up};

/// Largest value representable in 160 bits
#[inline]
fn max_u160() -> U256 {
    (U256::one() << 160) - U256::one()
}

#[inline]
fn to_u160(x: U256) -> Result<U256, PoolError> {
    if x > max_u160() {
        Err(PoolError::PriceOverflow)
    } else {
        Ok(x)
    }
}

/// Unsigned amount as a signed token amount
#[inline]
pub fn to_amount(x: U256) -> Result<i128, PoolError> {
    if x > U256::from(i128::MAX as u128) {
        Err(PoolError::AmountOverflow)
    } else {
        Ok(x.low_u128() as i128)
    }
}

// ============================================================
// NEXT PRICE
// ============================================================

/// Next sqrt price after adding or removing `amount` of token0.
///
/// Always rounds up so the price moves no further than the amount allows:
/// up when removing token0 (price rises), up when adding (price falls less).
pub fn get_next_sqrt_price_from_amount0_rounding_up(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, PoolError> {
    if amount.is_zero() {
        return Ok(sqrt_price_x96);
    }
    let numerator1 = U256::from(liquidity) << RESOLUTION_96;

    if add {
        let (product, overflow) = amount.overflowing_mul(sqrt_price_x96);
        if !overflow {
            let (denominator, overflow) = numerator1.overflowing_add(product);
            if !overflow {
                return mul_div_rounding_up(numerator1, sqrt_price_x96, denominator);
            }
        }
        // liquidity / (liquidity / price + amount)
        let inverse = numerator1 / sqrt_price_x96;
        let denominator = inverse
            .checked_add(amount)
            .ok_or(PoolError::PriceOverflow)?;
        div_rounding_up(numerator1, denominator)
    } else {
        let (product, overflow) = amount.overflowing_mul(sqrt_price_x96);
        if overflow || numerator1 <= product {
            return Err(PoolError::PriceOverflow);
        }
        let denominator = numerator1 - product;
        to_u160(mul_div_rounding_up(numerator1, sqrt_price_x96, denominator)?)
    }
}

/// Next sqrt price after adding or removing `amount` of token1, rounding down.
pub fn get_next_sqrt_price_from_amount1_rounding_down(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, PoolError> {
    let liquidity = U256::from(liquidity);
    if liquidity.is_zero() {
        return Err(PoolError::DivisionByZero);
    }

    if add {
        let quotient = if amount <= max_u160() {
            (amount << RESOLUTION_96) / liquidity
        } else {
            mul_div(amount, Q96, liquidity)?
        };
        let next = sqrt_price_x96
            .checked_add(quotient)
            .ok_or(PoolError::PriceOverflow)?;
        to_u160(next)
    } else {
        let quotient = if amount <= max_u160() {
            div_rounding_up(amount << RESOLUTION_96, liquidity)?
        } else {
            mul_div_rounding_up(amount, Q96, liquidity)?
        };
        if sqrt_price_x96 <= quotient {
            return Err(PoolError::PriceOverflow);
        }
        Ok(sqrt_price_x96 - quotient)
    }
}

/// Next sqrt price given an input amount of token0 or token1
pub fn get_next_sqrt_price_from_input(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_in: U256,
    zero_for_one: bool,
) -> Result<U256, PoolError> {
    if sqrt_price_x96.is_zero() || liquidity == 0 {
        return Err(PoolError::InvalidPriceOrLiquidity);
    }
    if zero_for_one {
        get_next_sqrt_price_from_amount0_rounding_up(sqrt_price_x96, liquidity, amount_in, true)
    } else {
        get_next_sqrt_price_from_amount1_rounding_down(sqrt_price_x96, liquidity, amount_in, true)
    }
}

/// Next sqrt price given an output amount of token0 or token1
pub fn get_next_sqrt_price_from_output(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_out: U256,
    zero_for_one: bool,
) -> Result<U256, PoolError> {
    if sqrt_price_x96.is_zero() || liquidity == 0 {
        return Err(PoolError::InvalidPriceOrLiquidity);
    }
    if zero_for_one {
        get_next_sqrt_price_from_amount1_rounding_down(sqrt_price_x96, liquidity, amount_out, false)
    } else {
        get_next_sqrt_price_from_amount0_rounding_up(sqrt_price_x96, liquidity, amount_out, false)
    }
}

// ============================================================
// AMOUNT DELTAS
// ============================================================

/// Token0 between two prices: liquidity * (sqrt_b - sqrt_a) / (sqrt_a * sqrt_b)
pub fn get_amount0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, PoolError> {
    let (lower, upper) = if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    };
    if lower.is_zero() {
        return Err(PoolError::InvalidPriceOrLiquidity);
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION_96;
    let numerator2 = upper - lower;

    if round_up {
        div_rounding_up(mul_div_rounding_up(numerator1, numerator2, upper)?, lower)
    } else {
        Ok(mul_div(numerator1, numerator2, upper)? / lower)
    }
}

/// Token1 between two prices: liquidity * (sqrt_b - sqrt_a)
pub fn get_amount1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, PoolError> {
    let (lower, upper) = if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    };

    if round_up {
        mul_div_rounding_up(U256::from(liquidity), upper - lower, Q96)
    } else {
        mul_div(U256::from(liquidity), upper - lower, Q96)
    }
}

/// Signed token0 delta: rounds up what the pool receives, down what it pays
pub fn get_amount0_delta_signed(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: i128,
) -> Result<i128, PoolError> {
    if liquidity < 0 {
        let amount = get_amount0_delta(
            sqrt_ratio_a_x96,
            sqrt_ratio_b_x96,
            liquidity.unsigned_abs(),
            false,
        )?;
        Ok(-to_amount(amount)?)
    } else {
        let amount = get_amount0_delta(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity as u128, true)?;
        to_amount(amount)
    }
}

/// Signed token1 delta: rounds up what the pool receives, down what it pays
pub fn get_amount1_delta_signed(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: i128,
) -> Result<i128, PoolError> {
    if liquidity < 0 {
        let amount = get_amount1_delta(
            sqrt_ratio_a_x96,
            sqrt_ratio_b_x96,
            liquidity.unsigned_abs(),
            false,
        )?;
        Ok(-to_amount(amount)?)
    } else {
        let amount = get_amount1_delta(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity as u128, true)?;
        to_amount(amount)
    }
}
