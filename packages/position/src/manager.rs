// Position Management Logic

use tidalswap_math::{add_delta, PoolError, U256};

use crate::fees::pending_fees;
use crate::types::Position;

/// Credit accrued fees and apply a liquidity delta.
///
/// A zero delta is a "poke" that only settles fees; it is rejected on a
/// position without liquidity. The fee checkpoint is re-stamped even then.
pub fn update_position(
    pos: &mut Position,
    liquidity_delta: i128,
    fee_growth_inside_0_x128: U256,
    fee_growth_inside_1_x128: U256,
) -> Result<(), PoolError> {
    let liquidity_next = if liquidity_delta == 0 {
        if pos.liquidity == 0 {
            return Err(PoolError::NoPosition);
        }
        pos.liquidity
    } else {
        add_delta(pos.liquidity, liquidity_delta)?
    };

    let (owed_0, owed_1) = pending_fees(pos, fee_growth_inside_0_x128, fee_growth_inside_1_x128)?;

    pos.liquidity = liquidity_next;
    pos.fee_growth_inside_0_last_x128 = fee_growth_inside_0_x128;
    pos.fee_growth_inside_1_last_x128 = fee_growth_inside_1_x128;

    // Owners must collect before the counters wrap
    pos.tokens_owed_0 = pos.tokens_owed_0.wrapping_add(owed_0);
    pos.tokens_owed_1 = pos.tokens_owed_1.wrapping_add(owed_1);

    Ok(())
}

/// Take up to the requested amounts out of tokens owed
pub fn collect_owed(pos: &mut Position, amount_0_requested: u128, amount_1_requested: u128) -> (u128, u128) {
    let amount_0 = amount_0_requested.min(pos.tokens_owed_0);
    let amount_1 = amount_1_requested.min(pos.tokens_owed_1);

    pos.tokens_owed_0 -= amount_0;
    pos.tokens_owed_1 -= amount_1;

    (amount_0, amount_1)
}
