// Price and liquidity oracle
//
// Samples live in a ring of `cardinality` slots. The ring only grows when
// the write index lands on its last populated slot, so slots added by
// `grow` hold uninitialized placeholders until the writer reaches them.

use tidalswap_math::wrapping::{add_i56, add_u160, sub_i56, sub_u160};
use tidalswap_math::{PoolError, U256};

use crate::types::{Observation, ObservationStore};

/// Placeholder timestamp written into pre-allocated slots
const PLACEHOLDER_TIMESTAMP: u32 = 1;

/// Extend `last` to `block_timestamp` assuming `tick` and `liquidity` held throughout
pub fn transform(last: &Observation, block_timestamp: u32, tick: i32, liquidity: u128) -> Observation {
    let delta = block_timestamp.wrapping_sub(last.block_timestamp);
    let divisor = U256::from(liquidity.max(1));

    Observation {
        block_timestamp,
        tick_cumulative: add_i56(last.tick_cumulative, tick as i64 * delta as i64),
        seconds_per_liquidity_cumulative_x128: add_u160(
            last.seconds_per_liquidity_cumulative_x128,
            (U256::from(delta) << 128) / divisor,
        ),
        initialized: true,
    }
}

/// Seed slot 0; returns (cardinality, cardinality_next)
pub fn initialize<S: ObservationStore>(store: &mut S, time: u32) -> (u16, u16) {
    store.set_observation(
        0,
        &Observation {
            block_timestamp: time,
            tick_cumulative: 0,
            seconds_per_liquidity_cumulative_x128: U256::zero(),
            initialized: true,
        },
    );
    (1, 1)
}

/// Append a sample; at most one per block timestamp.
///
/// Returns the updated (index, cardinality).
pub fn write<S: ObservationStore>(
    store: &mut S,
    index: u16,
    block_timestamp: u32,
    tick: i32,
    liquidity: u128,
    cardinality: u16,
    cardinality_next: u16,
) -> (u16, u16) {
    let last = store.observation(index);

    if last.block_timestamp == block_timestamp {
        return (index, cardinality);
    }

    let on_last_slot = cardinality.checked_sub(1) == Some(index);
    let cardinality_updated = if cardinality_next > cardinality && on_last_slot {
        cardinality_next
    } else {
        cardinality
    };

    let index_updated = ((index as u32 + 1) % cardinality_updated as u32) as u16;
    store.set_observation(index_updated, &transform(&last, block_timestamp, tick, liquidity));

    (index_updated, cardinality_updated)
}

/// Pre-allocate slots up to `next`; returns the new cardinality_next
pub fn grow<S: ObservationStore>(store: &mut S, current: u16, next: u16) -> Result<u16, PoolError> {
    if current == 0 {
        return Err(PoolError::OracleUninitialized);
    }
    if next <= current {
        return Ok(current);
    }
    for i in current..next {
        store.set_observation(
            i,
            &Observation {
                block_timestamp: PLACEHOLDER_TIMESTAMP,
                ..Default::default()
            },
        );
    }
    Ok(next)
}

/// `a <= b` for timestamps that may have wrapped, both taken to be at or
/// before `time`
pub fn lte(time: u32, a: u32, b: u32) -> bool {
    if a <= time && b <= time {
        return a <= b;
    }
    let epoch = 1u64 << 32;
    let a_adjusted = if a > time { a as u64 } else { a as u64 + epoch };
    let b_adjusted = if b > time { b as u64 } else { b as u64 + epoch };
    a_adjusted <= b_adjusted
}

/// Samples bracketing `target`, searching the ring from its oldest slot.
///
/// The caller guarantees `target` lies within the retained window.
fn binary_search<S: ObservationStore>(
    store: &S,
    time: u32,
    target: u32,
    index: u16,
    cardinality: u16,
) -> Result<(Observation, Observation), PoolError> {
    let cardinality = cardinality as u32;
    let mut l = (index as u32 + 1) % cardinality;
    let mut r = l + cardinality - 1;

    while l <= r {
        let i = (l + r) / 2;
        let before_or_at = store.observation((i % cardinality) as u16);

        // placeholder not yet reached by the writer
        if !before_or_at.initialized {
            l = i + 1;
            continue;
        }

        let at_or_after = store.observation(((i + 1) % cardinality) as u16);
        let target_at_or_after = lte(time, before_or_at.block_timestamp, target);

        if target_at_or_after && lte(time, target, at_or_after.block_timestamp) {
            return Ok((before_or_at, at_or_after));
        }

        if !target_at_or_after {
            r = match i.checked_sub(1) {
                Some(r) => r,
                None => break,
            };
        } else {
            l = i + 1;
        }
    }

    Err(PoolError::ObservationTooOld)
}

/// Samples at or around `target`.
///
/// When `target` is at or after the latest sample the second value is the
/// latest sample extrapolated to `target` (or a default if they coincide).
fn get_surrounding_observations<S: ObservationStore>(
    store: &S,
    time: u32,
    target: u32,
    tick: i32,
    index: u16,
    liquidity: u128,
    cardinality: u16,
) -> Result<(Observation, Observation), PoolError> {
    let latest = store.observation(index);

    if lte(time, latest.block_timestamp, target) {
        if latest.block_timestamp == target {
            return Ok((latest, Observation::default()));
        }
        return Ok((latest, transform(&latest, target, tick, liquidity)));
    }

    let mut oldest = store.observation(((index as u32 + 1) % cardinality as u32) as u16);
    if !oldest.initialized {
        oldest = store.observation(0);
    }

    if !lte(time, oldest.block_timestamp, target) {
        return Err(PoolError::ObservationTooOld);
    }

    binary_search(store, time, target, index, cardinality)
}

/// Cumulatives as of `seconds_ago` before `time`.
///
/// Returns (tick_cumulative, seconds_per_liquidity_cumulative_x128).
pub fn observe_single<S: ObservationStore>(
    store: &S,
    time: u32,
    seconds_ago: u32,
    tick: i32,
    index: u16,
    liquidity: u128,
    cardinality: u16,
) -> Result<(i64, U256), PoolError> {
    if cardinality == 0 {
        return Err(PoolError::OracleUninitialized);
    }

    if seconds_ago == 0 {
        let mut last = store.observation(index);
        if last.block_timestamp != time {
            last = transform(&last, time, tick, liquidity);
        }
        return Ok((last.tick_cumulative, last.seconds_per_liquidity_cumulative_x128));
    }

    let target = time.wrapping_sub(seconds_ago);

    let (before_or_at, at_or_after) =
        get_surrounding_observations(store, time, target, tick, index, liquidity, cardinality)?;

    if target == before_or_at.block_timestamp {
        Ok((
            before_or_at.tick_cumulative,
            before_or_at.seconds_per_liquidity_cumulative_x128,
        ))
    } else if target == at_or_after.block_timestamp {
        Ok((
            at_or_after.tick_cumulative,
            at_or_after.seconds_per_liquidity_cumulative_x128,
        ))
    } else {
        // strictly between the two samples
        let observation_time_delta =
            at_or_after.block_timestamp.wrapping_sub(before_or_at.block_timestamp);
        let target_delta = target.wrapping_sub(before_or_at.block_timestamp);

        let tick_slope = sub_i56(at_or_after.tick_cumulative, before_or_at.tick_cumulative)
            / observation_time_delta as i64;
        let tick_cumulative = add_i56(
            before_or_at.tick_cumulative,
            tick_slope.wrapping_mul(target_delta as i64),
        );

        let seconds_per_liquidity_delta = sub_u160(
            at_or_after.seconds_per_liquidity_cumulative_x128,
            before_or_at.seconds_per_liquidity_cumulative_x128,
        );
        let seconds_per_liquidity = add_u160(
            before_or_at.seconds_per_liquidity_cumulative_x128,
            seconds_per_liquidity_delta * U256::from(target_delta)
                / U256::from(observation_time_delta),
        );

        Ok((tick_cumulative, seconds_per_liquidity))
    }
}

/// `observe_single` for each entry of `seconds_agos`, in order
pub fn observe<S, I, F>(
    store: &S,
    time: u32,
    seconds_agos: I,
    tick: i32,
    index: u16,
    liquidity: u128,
    cardinality: u16,
    mut each: F,
) -> Result<(), PoolError>
where
    S: ObservationStore,
    I: IntoIterator<Item = u32>,
    F: FnMut(i64, U256),
{
    if cardinality == 0 {
        return Err(PoolError::OracleUninitialized);
    }
    for seconds_ago in seconds_agos {
        let (tick_cumulative, seconds_per_liquidity) =
            observe_single(store, time, seconds_ago, tick, index, liquidity, cardinality)?;
        each(tick_cumulative, seconds_per_liquidity);
    }
    Ok(())
}
