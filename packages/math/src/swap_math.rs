// Single swap step within one constant-liquidity range

use primitive_types::U256;

use crate::constants::FEE_DENOMINATOR;
use crate::error::PoolError;
use crate::full_math::{mul_div, mul_div_rounding_up};
use crate::sqrt_price_math::{
    get_amount0_delta, get_amount1_delta, get_next_sqrt_price_from_input,
    get_next_sqrt_price_from_output,
};

/// Result of one swap step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwapStep {
    /// Price reached by the step, never beyond the target
    pub sqrt_price_next_x96: U256,
    /// Input consumed, excluding fee
    pub amount_in: U256,
    /// Output produced
    pub amount_out: U256,
    /// Fee charged on the input
    pub fee_amount: U256,
}

/// Swap as much of `amount_remaining` as possible between the current and
/// target prices.
///
/// The direction is implied by the ordering of the two prices. A positive
/// `amount_remaining` is an exact input (fee included), a negative one an
/// exact output.
pub fn compute_swap_step(
    sqrt_ratio_current_x96: U256,
    sqrt_ratio_target_x96: U256,
    liquidity: u128,
    amount_remaining: i128,
    fee_pips: u32,
) -> Result<SwapStep, PoolError> {
    let zero_for_one = sqrt_ratio_current_x96 >= sqrt_ratio_target_x96;
    let exact_in = amount_remaining >= 0;
    let remaining_abs = U256::from(amount_remaining.unsigned_abs());
    let denominator = U256::from(FEE_DENOMINATOR);

    let mut amount_in = U256::zero();
    let mut amount_out = U256::zero();

    let sqrt_price_next_x96 = if exact_in {
        let remaining_less_fee = mul_div(
            remaining_abs,
            U256::from(FEE_DENOMINATOR - fee_pips),
            denominator,
        )?;
        amount_in = if zero_for_one {
            get_amount0_delta(sqrt_ratio_target_x96, sqrt_ratio_current_x96, liquidity, true)?
        } else {
            get_amount1_delta(sqrt_ratio_current_x96, sqrt_ratio_target_x96, liquidity, true)?
        };
        if remaining_less_fee >= amount_in {
            sqrt_ratio_target_x96
        } else {
            get_next_sqrt_price_from_input(
                sqrt_ratio_current_x96,
                liquidity,
                remaining_less_fee,
                zero_for_one,
            )?
        }
    } else {
        amount_out = if zero_for_one {
            get_amount1_delta(sqrt_ratio_target_x96, sqrt_ratio_current_x96, liquidity, false)?
        } else {
            get_amount0_delta(sqrt_ratio_current_x96, sqrt_ratio_target_x96, liquidity, false)?
        };
        if remaining_abs >= amount_out {
            sqrt_ratio_target_x96
        } else {
            get_next_sqrt_price_from_output(
                sqrt_ratio_current_x96,
                liquidity,
                remaining_abs,
                zero_for_one,
            )?
        }
    };

    let max = sqrt_ratio_target_x96 == sqrt_price_next_x96;

    if zero_for_one {
        if !(max && exact_in) {
            amount_in =
                get_amount0_delta(sqrt_price_next_x96, sqrt_ratio_current_x96, liquidity, true)?;
        }
        if !(max && !exact_in) {
            amount_out =
                get_amount1_delta(sqrt_price_next_x96, sqrt_ratio_current_x96, liquidity, false)?;
        }
    } else {
        if !(max && exact_in) {
            amount_in =
                get_amount1_delta(sqrt_ratio_current_x96, sqrt_price_next_x96, liquidity, true)?;
        }
        if !(max && !exact_in) {
            amount_out =
                get_amount0_delta(sqrt_ratio_current_x96, sqrt_price_next_x96, liquidity, false)?;
        }
    }

    // Output can round past what an exact-output swap asked for
    if !exact_in && amount_out > remaining_abs {
        amount_out = remaining_abs;
    }

    let fee_amount = if exact_in && sqrt_price_next_x96 != sqrt_ratio_target_x96 {
        // Target not reached: the remainder of the input is all fee
        remaining_abs - amount_in
    } else {
        mul_div_rounding_up(
            amount_in,
            U256::from(fee_pips),
            U256::from(FEE_DENOMINATOR - fee_pips),
        )?
    };

    Ok(SwapStep {
        sqrt_price_next_x96,
        amount_in,
        amount_out,
        fee_amount,
    })
}
