use tidalswap_math::wrapping::sub_u256;
use tidalswap_math::{mul_div, PoolError, U256, Q128};

use crate::types::Position;

/// Fees accrued since the last touch, truncated to u128.
///
/// The growth difference wraps; the product never exceeds
/// 2^256 / 2^128 * liquidity, so the division never overflows.
pub fn pending_fees(
    pos: &Position,
    fee_growth_inside_0_x128: U256,
    fee_growth_inside_1_x128: U256,
) -> Result<(u128, u128), PoolError> {
    let liquidity = U256::from(pos.liquidity);

    let delta_0 = sub_u256(fee_growth_inside_0_x128, pos.fee_growth_inside_0_last_x128);
    let delta_1 = sub_u256(fee_growth_inside_1_x128, pos.fee_growth_inside_1_last_x128);

    let fee_0 = mul_div(delta_0, liquidity, Q128)?;
    let fee_1 = mul_div(delta_1, liquidity, Q128)?;

    Ok((fee_0.low_u128(), fee_1.low_u128()))
}
