// Liquidity delta arithmetic

use crate::error::PoolError;

/// Apply a signed liquidity delta, failing on underflow or overflow
#[inline]
pub fn add_delta(x: u128, y: i128) -> Result<u128, PoolError> {
    if y < 0 {
        x.checked_sub(y.unsigned_abs())
            .ok_or(PoolError::LiquidityUnderflow)
    } else {
        x.checked_add(y as u128)
            .ok_or(PoolError::LiquidityOverflow)
    }
}

/// Liquidity as a signed delta, failing when it exceeds i128::MAX
#[inline]
pub fn to_delta(liquidity: u128) -> Result<i128, PoolError> {
    i128::try_from(liquidity).map_err(|_| PoolError::LiquidityOverflow)
}
