// Tick Update and Crossing Logic

use tidalswap_math::{add_delta, PoolError, MAX_TICK, MIN_TICK};

use crate::store::TickStore;
use crate::types::{FeeGrowthGlobals, OracleSnapshot, OutsideSnapshot};

/// Apply a liquidity delta to a tick boundary.
///
/// Returns whether the tick flipped between initialized and uninitialized.
/// `upper` selects the sign applied to `liquidity_net`: a position's lower
/// tick adds liquidity when crossed upward, its upper tick removes it.
pub fn update<S: TickStore>(
    store: &mut S,
    tick: i32,
    tick_current: i32,
    liquidity_delta: i128,
    globals: &FeeGrowthGlobals,
    oracle: &OracleSnapshot,
    upper: bool,
    max_liquidity: u128,
) -> Result<bool, PoolError> {
    let mut info = store.tick(tick);

    let liquidity_gross_before = info.liquidity_gross;
    let liquidity_gross_after = add_delta(liquidity_gross_before, liquidity_delta)?;

    if liquidity_gross_after > max_liquidity {
        return Err(PoolError::LiquidityPerTickExceeded);
    }

    let flipped = (liquidity_gross_after == 0) != (liquidity_gross_before == 0);

    if liquidity_gross_before == 0 {
        if tick <= tick_current {
            info.outside = OutsideSnapshot::seeded(globals, oracle);
        }
        info.initialized = true;
    }

    info.liquidity_gross = liquidity_gross_after;

    info.liquidity_net = if upper {
        info.liquidity_net.checked_sub(liquidity_delta)
    } else {
        info.liquidity_net.checked_add(liquidity_delta)
    }
    .ok_or(PoolError::LiquidityOverflow)?;

    store.set_tick(tick, &info);

    Ok(flipped)
}

/// Cross a tick boundary during a swap.
///
/// Returns `liquidity_net`; the caller negates it when moving downward.
pub fn cross<S: TickStore>(
    store: &mut S,
    tick: i32,
    globals: &FeeGrowthGlobals,
    oracle: &OracleSnapshot,
) -> i128 {
    let mut info = store.tick(tick);
    info.outside = info.outside.mirrored(globals, oracle);
    store.set_tick(tick, &info);
    info.liquidity_net
}

/// Remove a tick whose gross liquidity returned to zero
#[inline]
pub fn clear<S: TickStore>(store: &mut S, tick: i32) {
    store.clear_tick(tick);
}

/// Per-tick liquidity cap such that the sum over every usable tick fits in u128
pub fn tick_spacing_to_max_liquidity_per_tick(tick_spacing: i32) -> Result<u128, PoolError> {
    if tick_spacing <= 0 || tick_spacing > MAX_TICK {
        return Err(PoolError::InvalidTickSpacing);
    }
    let min_tick = (MIN_TICK / tick_spacing) * tick_spacing;
    let max_tick = (MAX_TICK / tick_spacing) * tick_spacing;
    let num_ticks = ((max_tick - min_tick) / tick_spacing) as u128 + 1;
    Ok(u128::MAX / num_ticks)
}
