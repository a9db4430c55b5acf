mod common;

use common::*;
use tidalswap_math::{get_sqrt_ratio_at_tick, PoolError, U256, MAX_SQRT_RATIO, MIN_SQRT_RATIO};
use tidalswap_swap::{engine_swap, validate_price_limit, SwapParams};
use tidalswap_tick::TickStore;
use tidalswap_oracle::ObservationStore;

const E18: i128 = 1_000_000_000_000_000_000;

fn exact_in_zero_for_one(amount: i128) -> SwapParams {
    SwapParams {
        zero_for_one: true,
        amount_specified: amount,
        sqrt_price_limit_x96: MIN_SQRT_RATIO + U256::one(),
    }
}

// ============================================================
// VALIDATION
// ============================================================

#[test]
fn test_zero_amount_rejected() {
    let mut pool = TestPool::new(0, 1000);
    let result = engine_swap(&mut pool.store, &mut pool.state, &exact_in_zero_for_one(0));
    assert_eq!(result, Err(PoolError::ZeroAmount));
}

#[test]
fn test_price_limit_bounds() {
    let price = get_sqrt_ratio_at_tick(0).unwrap();

    // zero for one needs a limit below the price and above the minimum
    assert!(validate_price_limit(price, true, price - U256::one()).is_ok());
    assert_eq!(
        validate_price_limit(price, true, price),
        Err(PoolError::PriceLimitOutOfBounds)
    );
    assert_eq!(
        validate_price_limit(price, true, MIN_SQRT_RATIO),
        Err(PoolError::PriceLimitOutOfBounds)
    );

    assert!(validate_price_limit(price, false, price + U256::one()).is_ok());
    assert_eq!(
        validate_price_limit(price, false, price - U256::one()),
        Err(PoolError::PriceLimitOutOfBounds)
    );
    assert_eq!(
        validate_price_limit(price, false, MAX_SQRT_RATIO),
        Err(PoolError::PriceLimitOutOfBounds)
    );
}

#[test]
fn test_rejected_swap_leaves_state_untouched() {
    let mut pool = TestPool::new(0, 1000);
    pool.add_liquidity(FULL_RANGE_LOWER, FULL_RANGE_UPPER, 2 * E18 as u128);
    let before = pool.state.clone();

    let params = SwapParams {
        zero_for_one: false,
        amount_specified: E18,
        sqrt_price_limit_x96: before.sqrt_price_x96,
    };
    assert_eq!(
        engine_swap(&mut pool.store, &mut pool.state, &params),
        Err(PoolError::PriceLimitOutOfBounds)
    );
    assert_eq!(pool.state, before);
}

// ============================================================
// FULL RANGE
// ============================================================

#[test]
fn test_exact_input_zero_for_one_full_range() {
    let mut pool = TestPool::new(0, 1000);
    pool.add_liquidity(FULL_RANGE_LOWER, FULL_RANGE_UPPER, 2 * E18 as u128);

    let result = engine_swap(&mut pool.store, &mut pool.state, &exact_in_zero_for_one(E18)).unwrap();

    assert_eq!(result.amount0, E18);
    assert!(result.amount1 < 0);
    assert!(-result.amount1 < E18);
    // 2 / (2 + 0.997) squared is ~0.4453, about tick -8090
    assert!(pool.state.tick < -8000 && pool.state.tick > -8200);
    assert_eq!(pool.state.liquidity, 2 * E18 as u128);
    assert!(pool.state.fee_growth_global_0_x128 > U256::zero());
    assert_eq!(pool.state.fee_growth_global_1_x128, U256::zero());
    assert_eq!(result.protocol_fee, 0);
}

#[test]
fn test_exact_output_one_for_zero_full_range() {
    let mut pool = TestPool::new(0, 1000);
    pool.add_liquidity(FULL_RANGE_LOWER, FULL_RANGE_UPPER, 2 * E18 as u128);

    let params = SwapParams {
        zero_for_one: false,
        amount_specified: -E18 / 10,
        sqrt_price_limit_x96: MAX_SQRT_RATIO - U256::one(),
    };
    let result = engine_swap(&mut pool.store, &mut pool.state, &params).unwrap();

    assert_eq!(result.amount0, -E18 / 10);
    // price impact plus fee
    assert!(result.amount1 > E18 / 10);
    assert!(pool.state.tick > 0);
    assert!(pool.state.fee_growth_global_1_x128 > U256::zero());
    assert_eq!(pool.state.fee_growth_global_0_x128, U256::zero());
}

#[test]
fn test_stops_at_price_limit() {
    let mut pool = TestPool::new(0, 1000);
    pool.add_liquidity(FULL_RANGE_LOWER, FULL_RANGE_UPPER, 2 * E18 as u128);

    let limit = get_sqrt_ratio_at_tick(-10).unwrap();
    let params = SwapParams {
        zero_for_one: true,
        amount_specified: E18,
        sqrt_price_limit_x96: limit,
    };
    let result = engine_swap(&mut pool.store, &mut pool.state, &params).unwrap();

    assert_eq!(pool.state.sqrt_price_x96, limit);
    assert_eq!(pool.state.tick, -10);
    assert!(result.amount0 > 0 && result.amount0 < E18);
    assert!(result.amount1 < 0);
}

#[test]
fn test_no_liquidity_moves_price_for_free() {
    let mut pool = TestPool::new(0, 1000);

    let limit = get_sqrt_ratio_at_tick(-600).unwrap();
    let params = SwapParams {
        zero_for_one: true,
        amount_specified: E18,
        sqrt_price_limit_x96: limit,
    };
    let result = engine_swap(&mut pool.store, &mut pool.state, &params).unwrap();

    assert_eq!(result.amount0, 0);
    assert_eq!(result.amount1, 0);
    assert_eq!(pool.state.sqrt_price_x96, limit);
    assert_eq!(pool.state.tick, -600);
    assert_eq!(pool.state.fee_growth_global_0_x128, U256::zero());
}

// ============================================================
// TICK CROSSING
// ============================================================

#[test]
fn test_crossing_out_of_range_drops_liquidity() {
    let mut pool = TestPool::new(0, 1000);
    pool.add_liquidity(-120, 120, E18 as u128);
    pool.state.time = 1010;

    let limit = get_sqrt_ratio_at_tick(-240).unwrap();
    let params = SwapParams {
        zero_for_one: true,
        amount_specified: E18,
        sqrt_price_limit_x96: limit,
    };
    let result = engine_swap(&mut pool.store, &mut pool.state, &params).unwrap();

    assert_eq!(pool.state.liquidity, 0);
    assert_eq!(pool.state.sqrt_price_x96, limit);
    assert_eq!(pool.state.tick, -240);
    // only the range down to -120 could be filled
    assert!(result.amount0 < E18);
    assert!(result.amount1 < 0);
    assert!(-result.amount1 < E18 / 100);

    // the crossed tick now records all fee growth as above it
    let crossed = pool.store.tick(-120);
    assert_eq!(
        crossed.outside.fee_growth_0_x128,
        pool.state.fee_growth_global_0_x128
    );
    assert_eq!(crossed.outside.seconds, 10);
    assert_eq!(crossed.outside.tick_cumulative, 0);

    // the other boundary is untouched
    assert_eq!(pool.store.tick(120).outside.fee_growth_0_x128, U256::zero());
}

#[test]
fn test_crossing_back_restores_liquidity() {
    let mut pool = TestPool::new(0, 1000);
    pool.add_liquidity(-120, 120, E18 as u128);

    let down = SwapParams {
        zero_for_one: true,
        amount_specified: E18,
        sqrt_price_limit_x96: get_sqrt_ratio_at_tick(-240).unwrap(),
    };
    engine_swap(&mut pool.store, &mut pool.state, &down).unwrap();
    assert_eq!(pool.state.liquidity, 0);

    let up = SwapParams {
        zero_for_one: false,
        amount_specified: E18,
        sqrt_price_limit_x96: get_sqrt_ratio_at_tick(60).unwrap(),
    };
    engine_swap(&mut pool.store, &mut pool.state, &up).unwrap();

    assert_eq!(pool.state.liquidity, E18 as u128);
    assert_eq!(pool.state.tick, 60);
}

#[test]
fn test_lands_exactly_on_initialized_tick_going_down() {
    let mut pool = TestPool::new(0, 1000);
    pool.add_liquidity(-60, 60, E18 as u128);

    let boundary = get_sqrt_ratio_at_tick(-60).unwrap();
    let params = SwapParams {
        zero_for_one: true,
        amount_specified: E18,
        sqrt_price_limit_x96: boundary,
    };
    engine_swap(&mut pool.store, &mut pool.state, &params).unwrap();

    // price sits on the boundary, the tick is just below it
    assert_eq!(pool.state.sqrt_price_x96, boundary);
    assert_eq!(pool.state.tick, -61);
    assert_eq!(pool.state.liquidity, 0);
}

// ============================================================
// PROTOCOL FEE
// ============================================================

#[test]
fn test_protocol_fee_takes_a_share() {
    let mut plain = TestPool::new(0, 1000);
    plain.add_liquidity(FULL_RANGE_LOWER, FULL_RANGE_UPPER, 2 * E18 as u128);
    let mut taxed = TestPool::new(0, 1000);
    taxed.add_liquidity(FULL_RANGE_LOWER, FULL_RANGE_UPPER, 2 * E18 as u128);
    // 1/4 on token0, nothing on token1
    taxed.state.fee_protocol = 4;

    let plain_result =
        engine_swap(&mut plain.store, &mut plain.state, &exact_in_zero_for_one(E18)).unwrap();
    let taxed_result =
        engine_swap(&mut taxed.store, &mut taxed.state, &exact_in_zero_for_one(E18)).unwrap();

    assert_eq!(plain_result.amount0, taxed_result.amount0);
    assert_eq!(plain_result.amount1, taxed_result.amount1);

    // ~0.3% of 1e18, a quarter of it
    assert!(taxed_result.protocol_fee > 749_000_000_000_000);
    assert!(taxed_result.protocol_fee < 751_000_000_000_000);
    assert!(taxed.state.fee_growth_global_0_x128 < plain.state.fee_growth_global_0_x128);
}

#[test]
fn test_protocol_fee_uses_direction_nibble() {
    let mut pool = TestPool::new(0, 1000);
    pool.add_liquidity(FULL_RANGE_LOWER, FULL_RANGE_UPPER, 2 * E18 as u128);
    // token1 share set, token0 share off
    pool.state.fee_protocol = 5 << 4;

    let result =
        engine_swap(&mut pool.store, &mut pool.state, &exact_in_zero_for_one(E18)).unwrap();
    assert_eq!(result.protocol_fee, 0);

    let params = SwapParams {
        zero_for_one: false,
        amount_specified: E18,
        sqrt_price_limit_x96: MAX_SQRT_RATIO - U256::one(),
    };
    let result = engine_swap(&mut pool.store, &mut pool.state, &params).unwrap();
    assert!(result.protocol_fee > 0);
}

// ============================================================
// ORACLE
// ============================================================

#[test]
fn test_swap_records_pre_swap_tick() {
    let mut pool = TestPool::new(100, 1000);
    pool.add_liquidity(FULL_RANGE_LOWER, FULL_RANGE_UPPER, 2 * E18 as u128);
    pool.state.time = 1010;

    engine_swap(&mut pool.store, &mut pool.state, &exact_in_zero_for_one(E18)).unwrap();

    assert_eq!(pool.state.observation_index, 0);
    assert_eq!(pool.state.observation_cardinality, 1);
    let observation = pool.store.observation(0);
    assert_eq!(observation.block_timestamp, 1010);
    assert_eq!(observation.tick_cumulative, 1000);
    assert_eq!(
        observation.seconds_per_liquidity_cumulative_x128,
        (U256::from(10u32) << 128) / U256::from(2 * E18 as u128)
    );
}

#[test]
fn test_same_block_swap_does_not_write() {
    let mut pool = TestPool::new(100, 1000);
    pool.add_liquidity(FULL_RANGE_LOWER, FULL_RANGE_UPPER, 2 * E18 as u128);

    engine_swap(&mut pool.store, &mut pool.state, &exact_in_zero_for_one(E18)).unwrap();

    let observation = pool.store.observation(0);
    assert_eq!(observation.block_timestamp, 1000);
    assert_eq!(observation.tick_cumulative, 0);
}

#[test]
fn test_grown_ring_advances_index() {
    let mut pool = TestPool::new(0, 1000);
    pool.add_liquidity(FULL_RANGE_LOWER, FULL_RANGE_UPPER, 2 * E18 as u128);
    pool.state.observation_cardinality_next =
        tidalswap_oracle::grow(&mut pool.store, 1, 4).unwrap();
    pool.state.time = 1005;

    engine_swap(&mut pool.store, &mut pool.state, &exact_in_zero_for_one(E18)).unwrap();

    assert_eq!(pool.state.observation_index, 1);
    assert_eq!(pool.state.observation_cardinality, 4);
    assert_eq!(pool.store.observation(1).block_timestamp, 1005);
}
