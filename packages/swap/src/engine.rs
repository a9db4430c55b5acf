use tidalswap_math::wrapping::add_u256;
use tidalswap_math::{
    add_delta, compute_swap_step, get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, mul_div,
    to_amount, PoolError, U256, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK, Q128,
};
use tidalswap_oracle::{observe_single, ObservationStore};
use tidalswap_tick::{
    cross, next_initialized_tick_within_one_word, BitmapStore, FeeGrowthGlobals, OracleSnapshot,
    TickStore,
};

use crate::types::{SwapParams, SwapResult, SwapState};

/// Check that the limit lies strictly between the current price and the
/// price bound in the swap direction
pub fn validate_price_limit(
    sqrt_price_x96: U256,
    zero_for_one: bool,
    sqrt_price_limit_x96: U256,
) -> Result<(), PoolError> {
    let valid = if zero_for_one {
        sqrt_price_limit_x96 < sqrt_price_x96 && sqrt_price_limit_x96 > MIN_SQRT_RATIO
    } else {
        sqrt_price_limit_x96 > sqrt_price_x96 && sqrt_price_limit_x96 < MAX_SQRT_RATIO
    };
    if valid {
        Ok(())
    } else {
        Err(PoolError::PriceLimitOutOfBounds)
    }
}

/// Oracle cumulatives as of the start of the swap, read at most once
struct LazySnapshot {
    snapshot: Option<OracleSnapshot>,
}

impl LazySnapshot {
    fn get<S: ObservationStore>(
        &mut self,
        store: &S,
        start: &SwapState,
    ) -> Result<OracleSnapshot, PoolError> {
        if let Some(snapshot) = self.snapshot {
            return Ok(snapshot);
        }
        let (tick_cumulative, seconds_per_liquidity_x128) = observe_single(
            store,
            start.time,
            0,
            start.tick,
            start.observation_index,
            start.liquidity,
            start.observation_cardinality,
        )?;
        let snapshot = OracleSnapshot {
            tick_cumulative,
            seconds_per_liquidity_x128,
            time: start.time,
        };
        self.snapshot = Some(snapshot);
        Ok(snapshot)
    }
}

/// Execute a swap against the tick, bitmap and oracle stores.
///
/// Walks the price one initialized tick (or one bitmap word) at a time
/// until the specified amount is used up or the price limit is reached,
/// crossing ticks and accruing fees along the way. On success `state`
/// holds the post-swap price, tick, liquidity, fee growth and oracle
/// position; token movement is left to the caller.
pub fn engine_swap<S>(
    store: &mut S,
    state: &mut SwapState,
    params: &SwapParams,
) -> Result<SwapResult, PoolError>
where
    S: TickStore + BitmapStore + ObservationStore,
{
    if params.amount_specified == 0 {
        return Err(PoolError::ZeroAmount);
    }
    validate_price_limit(
        state.sqrt_price_x96,
        params.zero_for_one,
        params.sqrt_price_limit_x96,
    )?;

    let start = state.clone();
    let zero_for_one = params.zero_for_one;
    let exact_input = params.amount_specified > 0;
    let limit = params.sqrt_price_limit_x96;

    let fee_protocol = if zero_for_one {
        start.fee_protocol % 16
    } else {
        start.fee_protocol >> 4
    };

    let mut oracle = LazySnapshot { snapshot: None };

    let mut remaining = params.amount_specified;
    let mut calculated: i128 = 0;
    let mut sqrt_price = start.sqrt_price_x96;
    let mut tick = start.tick;
    let mut liquidity = start.liquidity;
    let mut fee_growth_global = if zero_for_one {
        start.fee_growth_global_0_x128
    } else {
        start.fee_growth_global_1_x128
    };
    let mut protocol_fee: u128 = 0;

    while remaining != 0 && sqrt_price != limit {
        let step_start = sqrt_price;

        let (tick_next, initialized) =
            next_initialized_tick_within_one_word(store, tick, start.tick_spacing, zero_for_one)?;
        // the bitmap knows nothing of the tick bounds
        let tick_next = tick_next.clamp(MIN_TICK, MAX_TICK);
        let sqrt_price_next = get_sqrt_ratio_at_tick(tick_next)?;

        let beyond_limit = if zero_for_one {
            sqrt_price_next < limit
        } else {
            sqrt_price_next > limit
        };
        let target = if beyond_limit { limit } else { sqrt_price_next };

        let step = compute_swap_step(sqrt_price, target, liquidity, remaining, start.fee)?;
        sqrt_price = step.sqrt_price_next_x96;

        let amount_in = to_amount(
            step.amount_in
                .checked_add(step.fee_amount)
                .ok_or(PoolError::AmountOverflow)?,
        )?;
        let amount_out = to_amount(step.amount_out)?;

        if exact_input {
            remaining = remaining
                .checked_sub(amount_in)
                .ok_or(PoolError::AmountOverflow)?;
            calculated = calculated
                .checked_sub(amount_out)
                .ok_or(PoolError::AmountOverflow)?;
        } else {
            remaining = remaining
                .checked_add(amount_out)
                .ok_or(PoolError::AmountOverflow)?;
            calculated = calculated
                .checked_add(amount_in)
                .ok_or(PoolError::AmountOverflow)?;
        }

        let mut fee_amount = step.fee_amount;
        if fee_protocol > 0 {
            let delta = fee_amount / U256::from(fee_protocol);
            fee_amount -= delta;
            protocol_fee = protocol_fee.wrapping_add(delta.low_u128());
        }

        // fees with nobody in range are not claimable
        if liquidity > 0 {
            let growth = mul_div(fee_amount, Q128, U256::from(liquidity))?;
            fee_growth_global = add_u256(fee_growth_global, growth);
        }

        if sqrt_price == sqrt_price_next {
            if initialized {
                let snapshot = oracle.get(store, &start)?;
                let globals = if zero_for_one {
                    FeeGrowthGlobals {
                        token0_x128: fee_growth_global,
                        token1_x128: start.fee_growth_global_1_x128,
                    }
                } else {
                    FeeGrowthGlobals {
                        token0_x128: start.fee_growth_global_0_x128,
                        token1_x128: fee_growth_global,
                    }
                };

                let mut liquidity_net = cross(store, tick_next, &globals, &snapshot);
                if zero_for_one {
                    liquidity_net = liquidity_net
                        .checked_neg()
                        .ok_or(PoolError::LiquidityOverflow)?;
                }
                liquidity = add_delta(liquidity, liquidity_net)?;
            }

            tick = if zero_for_one { tick_next - 1 } else { tick_next };
        } else if sqrt_price != step_start {
            // landed between ticks
            tick = get_tick_at_sqrt_ratio(sqrt_price)?;
        }
    }

    if tick != start.tick {
        // record the state that held up to this block, not the post-swap tick
        let (index, cardinality) = tidalswap_oracle::write(
            store,
            start.observation_index,
            start.time,
            start.tick,
            start.liquidity,
            start.observation_cardinality,
            start.observation_cardinality_next,
        );
        state.observation_index = index;
        state.observation_cardinality = cardinality;
    }

    state.sqrt_price_x96 = sqrt_price;
    state.tick = tick;
    state.liquidity = liquidity;
    if zero_for_one {
        state.fee_growth_global_0_x128 = fee_growth_global;
    } else {
        state.fee_growth_global_1_x128 = fee_growth_global;
    }

    let specified_used = params
        .amount_specified
        .checked_sub(remaining)
        .ok_or(PoolError::AmountOverflow)?;

    let (amount0, amount1) = if zero_for_one == exact_input {
        (specified_used, calculated)
    } else {
        (calculated, specified_used)
    };

    Ok(SwapResult {
        amount0,
        amount1,
        protocol_fee,
    })
}
