// Bit scanning over 256-bit words

use primitive_types::U256;

use crate::error::PoolError;

/// Index of the most significant set bit
pub fn most_significant_bit(x: U256) -> Result<u8, PoolError> {
    if x.is_zero() {
        return Err(PoolError::ZeroValue);
    }
    Ok((x.bits() - 1) as u8)
}

/// Index of the least significant set bit
pub fn least_significant_bit(x: U256) -> Result<u8, PoolError> {
    if x.is_zero() {
        return Err(PoolError::ZeroValue);
    }
    Ok(x.trailing_zeros() as u8)
}
