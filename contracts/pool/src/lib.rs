#![no_std]

use soroban_sdk::{
    contract, contractimpl, log, panic_with_error, token, Address, Bytes, Env, String, Vec,
};

use tidalswap_math::liquidity_math::to_delta;
use tidalswap_math::wrapping::{add_u256, sub_i56, sub_u160};
use tidalswap_math::{
    add_delta, get_amount0_delta_signed, get_amount1_delta_signed, get_sqrt_ratio_at_tick,
    get_tick_at_sqrt_ratio, mul_div, mul_div_rounding_up, to_amount, U256,
    FEE_DENOMINATOR, MAX_FEE_PROTOCOL, MAX_OBSERVATION_CARDINALITY, MAX_TICK, MIN_FEE_PROTOCOL,
    MIN_TICK, Q128,
};
use tidalswap_oracle::{observe_single, ObservationStore};
use tidalswap_position::{collect_owed, update_position, Position, PositionStore};
use tidalswap_swap::{engine_swap, SwapParams, SwapState};
use tidalswap_tick::{
    clear, flip_tick, get_fee_growth_inside, tick_spacing_to_max_liquidity_per_tick, update,
    BitmapStore, FeeGrowthGlobals, OracleSnapshot, TickStore,
};

mod events;
mod interface;
mod storage;
pub mod types;

pub use tidalswap_math::PoolError;

use events::*;
use storage::*;
use types::{
    CumulativesInside, ObservationRecord, Observed, PoolConfig, PositionRecord, Slot0, TickRecord,
};

#[contract]
pub struct TidalPool;

// ============================================================
// INTERNAL HELPERS
// ============================================================

/// Log the failure and return it
fn fail<T>(env: &Env, err: PoolError) -> Result<T, PoolError> {
    log!(env, "pool error", String::from_str(env, err.message()));
    Err(err)
}

/// Take the re-entrancy lock; also refuses every call before initialize
fn lock(env: &Env) -> Result<(), PoolError> {
    if !is_unlocked(env) {
        return fail(env, PoolError::Locked);
    }
    set_unlocked(env, false);
    extend_instance(env);
    Ok(())
}

fn unlock(env: &Env) {
    set_unlocked(env, true);
}

fn check_ticks(tick_lower: i32, tick_upper: i32) -> Result<(), PoolError> {
    if tick_lower >= tick_upper {
        return Err(PoolError::TickLowerNotBelowUpper);
    }
    if tick_lower < MIN_TICK {
        return Err(PoolError::TickLowerTooLow);
    }
    if tick_upper > MAX_TICK {
        return Err(PoolError::TickUpperTooHigh);
    }
    Ok(())
}

fn balance(env: &Env, token: &Address) -> i128 {
    token::Client::new(env, token).balance(&env.current_contract_address())
}

fn pay(env: &Env, token: &Address, to: &Address, amount: i128) {
    token::Client::new(env, token).transfer(&env.current_contract_address(), to, &amount);
}

fn owed_to_amount(amount: u128) -> Result<i128, PoolError> {
    i128::try_from(amount).map_err(|_| PoolError::AmountOverflow)
}

/// Oracle cumulatives as of the current block
fn oracle_snapshot(storage: &PoolStorage, state: &SwapState) -> Result<OracleSnapshot, PoolError> {
    let (tick_cumulative, seconds_per_liquidity_x128) = observe_single(
        storage,
        state.time,
        0,
        state.tick,
        state.observation_index,
        state.liquidity,
        state.observation_cardinality,
    )?;
    Ok(OracleSnapshot {
        tick_cumulative,
        seconds_per_liquidity_x128,
        time: state.time,
    })
}

/// Apply a liquidity delta to a position and its boundary ticks.
///
/// Settles the position's fees against the current fee growth inside its
/// range. Ticks that lose their last liquidity are cleared.
fn update_position_internal(
    env: &Env,
    config: &PoolConfig,
    state: &SwapState,
    owner: &Address,
    tick_lower: i32,
    tick_upper: i32,
    liquidity_delta: i128,
) -> Result<Position, PoolError> {
    let mut storage = PoolStorage::new(env);
    let mut position = storage.position(owner, tick_lower, tick_upper);

    let globals = FeeGrowthGlobals {
        token0_x128: state.fee_growth_global_0_x128,
        token1_x128: state.fee_growth_global_1_x128,
    };

    let mut flipped_lower = false;
    let mut flipped_upper = false;
    if liquidity_delta != 0 {
        let oracle = oracle_snapshot(&storage, state)?;

        flipped_lower = update(
            &mut storage,
            tick_lower,
            state.tick,
            liquidity_delta,
            &globals,
            &oracle,
            false,
            config.max_liquidity_per_tick,
        )?;
        flipped_upper = update(
            &mut storage,
            tick_upper,
            state.tick,
            liquidity_delta,
            &globals,
            &oracle,
            true,
            config.max_liquidity_per_tick,
        )?;

        if flipped_lower {
            flip_tick(&mut storage, tick_lower, config.tick_spacing)?;
        }
        if flipped_upper {
            flip_tick(&mut storage, tick_upper, config.tick_spacing)?;
        }
    }

    let (inside_0, inside_1) =
        get_fee_growth_inside(&storage, tick_lower, tick_upper, state.tick, &globals);

    update_position(&mut position, liquidity_delta, inside_0, inside_1)?;
    storage.set_position(owner, tick_lower, tick_upper, &position);

    // only a removal can empty a tick
    if liquidity_delta < 0 {
        if flipped_lower {
            clear(&mut storage, tick_lower);
        }
        if flipped_upper {
            clear(&mut storage, tick_upper);
        }
    }

    Ok(position)
}

/// Change a position's liquidity and return the token amounts it moves.
///
/// Positive amounts are owed to the pool, negative ones are owed to the
/// owner. Only a range containing the current tick touches active
/// liquidity and the oracle.
fn modify_position(
    env: &Env,
    owner: &Address,
    tick_lower: i32,
    tick_upper: i32,
    liquidity_delta: i128,
) -> Result<(Position, i128, i128), PoolError> {
    check_ticks(tick_lower, tick_upper)?;

    let config = read_config(env);
    let mut state = load_state(env, &config);

    let position = update_position_internal(
        env,
        &config,
        &state,
        owner,
        tick_lower,
        tick_upper,
        liquidity_delta,
    )?;

    let mut amount0 = 0;
    let mut amount1 = 0;

    if liquidity_delta != 0 {
        let sqrt_lower = get_sqrt_ratio_at_tick(tick_lower)?;
        let sqrt_upper = get_sqrt_ratio_at_tick(tick_upper)?;

        if state.tick < tick_lower {
            // range above the price: all token0
            amount0 = get_amount0_delta_signed(sqrt_lower, sqrt_upper, liquidity_delta)?;
        } else if state.tick < tick_upper {
            let mut storage = PoolStorage::new(env);
            let (index, cardinality) = tidalswap_oracle::write(
                &mut storage,
                state.observation_index,
                state.time,
                state.tick,
                state.liquidity,
                state.observation_cardinality,
                state.observation_cardinality_next,
            );
            state.observation_index = index;
            state.observation_cardinality = cardinality;
            store_slot0(env, &state);

            amount0 = get_amount0_delta_signed(state.sqrt_price_x96, sqrt_upper, liquidity_delta)?;
            amount1 = get_amount1_delta_signed(sqrt_lower, state.sqrt_price_x96, liquidity_delta)?;

            write_liquidity(env, add_delta(state.liquidity, liquidity_delta)?);
        } else {
            // range below the price: all token1
            amount1 = get_amount1_delta_signed(sqrt_lower, sqrt_upper, liquidity_delta)?;
        }
    }

    Ok((position, amount0, amount1))
}

#[contractimpl]
impl TidalPool {
    // ========================================================
    // DEPLOYMENT
    // ========================================================

    /// Deploy a pool for `token0`/`token1`.
    ///
    /// # Arguments
    /// * `factory` - Deployer whose `owner()` governs protocol fees
    /// * `fee` - Swap fee in hundredths of a bip, below 1_000_000
    /// * `tick_spacing` - Positive spacing between usable ticks
    ///
    /// The pool stays locked until `initialize` sets a price.
    pub fn __constructor(
        env: Env,
        factory: Address,
        token0: Address,
        token1: Address,
        fee: u32,
        tick_spacing: i32,
    ) {
        if fee >= FEE_DENOMINATOR {
            panic_with_error!(&env, PoolError::InvalidFee);
        }
        let max_liquidity_per_tick = match tick_spacing_to_max_liquidity_per_tick(tick_spacing) {
            Ok(max) => max,
            Err(err) => panic_with_error!(&env, err),
        };

        write_config(
            &env,
            &PoolConfig {
                factory,
                token0,
                token1,
                fee,
                tick_spacing,
                max_liquidity_per_tick,
            },
        );
        set_unlocked(&env, false);
        extend_instance(&env);
    }

    /// Set the starting price and seed the oracle. Callable once.
    pub fn initialize(env: Env, sqrt_price_x96: soroban_sdk::U256) -> Result<(), PoolError> {
        if is_initialized(&env) {
            return fail(&env, PoolError::AlreadyInitialized);
        }

        let sqrt_price_x96 = from_host(&sqrt_price_x96);
        let tick = get_tick_at_sqrt_ratio(sqrt_price_x96)?;

        let mut storage = PoolStorage::new(&env);
        let (cardinality, cardinality_next) =
            tidalswap_oracle::initialize(&mut storage, block_timestamp(&env));

        write_slot0(
            &env,
            &Slot0 {
                sqrt_price_x96: to_host(&env, sqrt_price_x96),
                tick,
                observation_index: 0,
                observation_cardinality: cardinality as u32,
                observation_cardinality_next: cardinality_next as u32,
                fee_protocol: 0,
            },
        );
        write_liquidity(&env, 0);
        write_fee_growth_global(&env, &FeeGrowthGlobals::default());
        write_protocol_fees(&env, (0, 0));
        unlock(&env);
        extend_instance(&env);

        emit_initialize(&env, sqrt_price_x96, tick);
        Ok(())
    }

    // ========================================================
    // LIQUIDITY
    // ========================================================

    /// Add `amount` of liquidity to `recipient`'s position.
    ///
    /// The owed token amounts are requested from `sender` through its
    /// `mint_callback`; the pool checks its balances afterwards.
    pub fn mint(
        env: Env,
        sender: Address,
        recipient: Address,
        tick_lower: i32,
        tick_upper: i32,
        amount: u128,
        data: Bytes,
    ) -> Result<(i128, i128), PoolError> {
        sender.require_auth();
        lock(&env)?;

        if amount == 0 {
            return fail(&env, PoolError::ZeroAmount);
        }

        let (_, amount0, amount1) =
            modify_position(&env, &recipient, tick_lower, tick_upper, to_delta(amount)?)?;

        let config = read_config(&env);
        let balance0_before = if amount0 > 0 { balance(&env, &config.token0) } else { 0 };
        let balance1_before = if amount1 > 0 { balance(&env, &config.token1) } else { 0 };

        interface::mint_callback(&env, &sender, amount0, amount1, &data);

        if amount0 > 0 {
            let expected = balance0_before
                .checked_add(amount0)
                .ok_or(PoolError::AmountOverflow)?;
            if balance(&env, &config.token0) < expected {
                return fail(&env, PoolError::InsufficientMintPayment0);
            }
        }
        if amount1 > 0 {
            let expected = balance1_before
                .checked_add(amount1)
                .ok_or(PoolError::AmountOverflow)?;
            if balance(&env, &config.token1) < expected {
                return fail(&env, PoolError::InsufficientMintPayment1);
            }
        }

        emit_mint(&env, &sender, &recipient, tick_lower, tick_upper, amount, amount0, amount1);
        unlock(&env);
        Ok((amount0, amount1))
    }

    /// Remove liquidity; the freed tokens become collectable. `amount == 0`
    /// settles accrued fees without moving liquidity.
    pub fn burn(
        env: Env,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
        amount: u128,
    ) -> Result<(i128, i128), PoolError> {
        owner.require_auth();
        lock(&env)?;

        let liquidity_delta = to_delta(amount)?
            .checked_neg()
            .ok_or(PoolError::LiquidityOverflow)?;
        let (mut position, amount0, amount1) =
            modify_position(&env, &owner, tick_lower, tick_upper, liquidity_delta)?;

        // removal yields non-positive deltas
        let amount0 = -amount0;
        let amount1 = -amount1;

        if amount0 > 0 || amount1 > 0 {
            position.tokens_owed_0 = position.tokens_owed_0.wrapping_add(amount0 as u128);
            position.tokens_owed_1 = position.tokens_owed_1.wrapping_add(amount1 as u128);
            PoolStorage::new(&env).set_position(&owner, tick_lower, tick_upper, &position);
        }

        emit_burn(&env, &owner, tick_lower, tick_upper, amount, amount0, amount1);
        unlock(&env);
        Ok((amount0, amount1))
    }

    /// Pay out up to the requested tokens owed to a position
    pub fn collect(
        env: Env,
        owner: Address,
        recipient: Address,
        tick_lower: i32,
        tick_upper: i32,
        amount0_requested: u128,
        amount1_requested: u128,
    ) -> Result<(u128, u128), PoolError> {
        owner.require_auth();
        lock(&env)?;

        let config = read_config(&env);
        let mut storage = PoolStorage::new(&env);
        let mut position = storage.position(&owner, tick_lower, tick_upper);

        let (amount0, amount1) = collect_owed(&mut position, amount0_requested, amount1_requested);

        if amount0 > 0 || amount1 > 0 {
            storage.set_position(&owner, tick_lower, tick_upper, &position);
        }
        if amount0 > 0 {
            pay(&env, &config.token0, &recipient, owed_to_amount(amount0)?);
        }
        if amount1 > 0 {
            pay(&env, &config.token1, &recipient, owed_to_amount(amount1)?);
        }

        emit_collect(&env, &owner, &recipient, tick_lower, tick_upper, amount0, amount1);
        unlock(&env);
        Ok((amount0, amount1))
    }

    // ========================================================
    // SWAP
    // ========================================================

    /// Swap against the pool.
    ///
    /// `amount_specified` is an exact input when positive and an exact
    /// output when negative. The output is paid to `recipient` first; the
    /// input is then requested from `sender` via `swap_callback`.
    /// Returns the pool's (amount0, amount1) deltas.
    pub fn swap(
        env: Env,
        sender: Address,
        recipient: Address,
        zero_for_one: bool,
        amount_specified: i128,
        sqrt_price_limit_x96: soroban_sdk::U256,
        data: Bytes,
    ) -> Result<(i128, i128), PoolError> {
        sender.require_auth();

        if amount_specified == 0 {
            return fail(&env, PoolError::ZeroAmount);
        }
        lock(&env)?;

        let config = read_config(&env);
        let mut state = load_state(&env, &config);
        let mut storage = PoolStorage::new(&env);

        let params = SwapParams {
            zero_for_one,
            amount_specified,
            sqrt_price_limit_x96: from_host(&sqrt_price_limit_x96),
        };
        let result = engine_swap(&mut storage, &mut state, &params)?;

        store_state(&env, &state);

        if result.protocol_fee > 0 {
            let (fees0, fees1) = read_protocol_fees(&env);
            let fees = if zero_for_one {
                (fees0.wrapping_add(result.protocol_fee), fees1)
            } else {
                (fees0, fees1.wrapping_add(result.protocol_fee))
            };
            write_protocol_fees(&env, fees);
        }

        let (amount0, amount1) = (result.amount0, result.amount1);

        if zero_for_one {
            if amount1 < 0 {
                pay(&env, &config.token1, &recipient, -amount1);
            }
            let balance0_before = balance(&env, &config.token0);
            interface::swap_callback(&env, &sender, amount0, amount1, &data);
            let expected = balance0_before
                .checked_add(amount0)
                .ok_or(PoolError::AmountOverflow)?;
            if balance(&env, &config.token0) < expected {
                return fail(&env, PoolError::InsufficientInputAmount);
            }
        } else {
            if amount0 < 0 {
                pay(&env, &config.token0, &recipient, -amount0);
            }
            let balance1_before = balance(&env, &config.token1);
            interface::swap_callback(&env, &sender, amount0, amount1, &data);
            let expected = balance1_before
                .checked_add(amount1)
                .ok_or(PoolError::AmountOverflow)?;
            if balance(&env, &config.token1) < expected {
                return fail(&env, PoolError::InsufficientInputAmount);
            }
        }

        emit_swap(
            &env,
            &sender,
            &recipient,
            amount0,
            amount1,
            state.sqrt_price_x96,
            state.liquidity,
            state.tick,
        );
        unlock(&env);
        Ok((amount0, amount1))
    }

    // ========================================================
    // FLASH
    // ========================================================

    /// Lend tokens for the duration of `sender`'s `flash_callback`.
    ///
    /// The callback must return the principal plus a fee at the swap fee
    /// rate; anything paid beyond the principal is shared among in-range
    /// liquidity.
    pub fn flash(
        env: Env,
        sender: Address,
        recipient: Address,
        amount0: u128,
        amount1: u128,
        data: Bytes,
    ) -> Result<(), PoolError> {
        sender.require_auth();
        lock(&env)?;

        let config = read_config(&env);
        let state = load_state(&env, &config);
        if state.liquidity == 0 {
            return fail(&env, PoolError::NoLiquidity);
        }

        let fee = U256::from(config.fee);
        let denominator = U256::from(FEE_DENOMINATOR);
        let fee0 = to_amount(mul_div_rounding_up(U256::from(amount0), fee, denominator)?)?;
        let fee1 = to_amount(mul_div_rounding_up(U256::from(amount1), fee, denominator)?)?;

        let balance0_before = balance(&env, &config.token0);
        let balance1_before = balance(&env, &config.token1);

        if amount0 > 0 {
            pay(&env, &config.token0, &recipient, owed_to_amount(amount0)?);
        }
        if amount1 > 0 {
            pay(&env, &config.token1, &recipient, owed_to_amount(amount1)?);
        }

        interface::flash_callback(&env, &sender, fee0, fee1, &data);

        let balance0_after = balance(&env, &config.token0);
        let balance1_after = balance(&env, &config.token1);

        let expected0 = balance0_before
            .checked_add(fee0)
            .ok_or(PoolError::AmountOverflow)?;
        if balance0_after < expected0 {
            return fail(&env, PoolError::FlashNotRepaid0);
        }
        let expected1 = balance1_before
            .checked_add(fee1)
            .ok_or(PoolError::AmountOverflow)?;
        if balance1_after < expected1 {
            return fail(&env, PoolError::FlashNotRepaid1);
        }

        // both non-negative after the checks above
        let paid0 = balance0_after - balance0_before;
        let paid1 = balance1_after - balance1_before;

        let liquidity = U256::from(state.liquidity);
        let mut globals = FeeGrowthGlobals {
            token0_x128: state.fee_growth_global_0_x128,
            token1_x128: state.fee_growth_global_1_x128,
        };
        let (mut protocol0, mut protocol1) = read_protocol_fees(&env);

        if paid0 > 0 {
            let fee_protocol0 = (state.fee_protocol % 16) as u128;
            let fees0 = if fee_protocol0 == 0 { 0 } else { paid0 as u128 / fee_protocol0 };
            protocol0 = protocol0.wrapping_add(fees0);
            let growth = mul_div(U256::from(paid0 as u128 - fees0), Q128, liquidity)?;
            globals.token0_x128 = add_u256(globals.token0_x128, growth);
        }
        if paid1 > 0 {
            let fee_protocol1 = (state.fee_protocol >> 4) as u128;
            let fees1 = if fee_protocol1 == 0 { 0 } else { paid1 as u128 / fee_protocol1 };
            protocol1 = protocol1.wrapping_add(fees1);
            let growth = mul_div(U256::from(paid1 as u128 - fees1), Q128, liquidity)?;
            globals.token1_x128 = add_u256(globals.token1_x128, growth);
        }

        write_fee_growth_global(&env, &globals);
        write_protocol_fees(&env, (protocol0, protocol1));

        emit_flash(&env, &sender, &recipient, amount0, amount1, paid0, paid1);
        unlock(&env);
        Ok(())
    }

    // ========================================================
    // ORACLE
    // ========================================================

    /// Pre-allocate oracle slots so the ring can hold `next` samples.
    ///
    /// Shortened from its full name to fit the host's function name limit.
    pub fn increase_obs_cardinality_next(env: Env, next: u32) -> Result<(), PoolError> {
        lock(&env)?;

        if next > MAX_OBSERVATION_CARDINALITY {
            return fail(&env, PoolError::CardinalityTooLarge);
        }

        let config = read_config(&env);
        let mut state = load_state(&env, &config);
        let old = state.observation_cardinality_next;

        let mut storage = PoolStorage::new(&env);
        let new = tidalswap_oracle::grow(&mut storage, old, next as u16)?;

        if new != old {
            state.observation_cardinality_next = new;
            store_slot0(&env, &state);
            emit_increase_cardinality_next(&env, old as u32, new as u32);
        }

        unlock(&env);
        Ok(())
    }

    // ========================================================
    // PROTOCOL FEES
    // ========================================================

    /// Set the protocol's share of swap fees as 1/N per token (0 disables).
    /// Only the factory owner may call this.
    pub fn set_fee_protocol(
        env: Env,
        fee_protocol0: u32,
        fee_protocol1: u32,
    ) -> Result<(), PoolError> {
        let config = read_config(&env);
        interface::factory_owner(&env, &config.factory).require_auth();
        lock(&env)?;

        let valid = |f: u32| f == 0 || (MIN_FEE_PROTOCOL..=MAX_FEE_PROTOCOL).contains(&f);
        if !valid(fee_protocol0) || !valid(fee_protocol1) {
            return fail(&env, PoolError::InvalidFeeProtocol);
        }

        let mut slot0 = read_slot0(&env);
        let old = slot0.fee_protocol;
        slot0.fee_protocol = fee_protocol0 | (fee_protocol1 << 4);
        write_slot0(&env, &slot0);

        emit_set_fee_protocol(&env, old % 16, old >> 4, fee_protocol0, fee_protocol1);
        unlock(&env);
        Ok(())
    }

    /// Withdraw accrued protocol fees; one unit always stays behind.
    pub fn collect_protocol(
        env: Env,
        recipient: Address,
        amount0_requested: u128,
        amount1_requested: u128,
    ) -> Result<(u128, u128), PoolError> {
        let config = read_config(&env);
        let owner = interface::factory_owner(&env, &config.factory);
        owner.require_auth();
        lock(&env)?;

        let (mut fees0, mut fees1) = read_protocol_fees(&env);

        let mut amount0 = amount0_requested.min(fees0);
        let mut amount1 = amount1_requested.min(fees1);

        if amount0 > 0 {
            if amount0 == fees0 {
                amount0 -= 1;
            }
            fees0 -= amount0;
        }
        if amount1 > 0 {
            if amount1 == fees1 {
                amount1 -= 1;
            }
            fees1 -= amount1;
        }
        write_protocol_fees(&env, (fees0, fees1));

        if amount0 > 0 {
            pay(&env, &config.token0, &recipient, owed_to_amount(amount0)?);
        }
        if amount1 > 0 {
            pay(&env, &config.token1, &recipient, owed_to_amount(amount1)?);
        }

        emit_collect_protocol(&env, &owner, &recipient, amount0, amount1);
        unlock(&env);
        Ok((amount0, amount1))
    }

    // ========================================================
    // VIEW FUNCTIONS
    // ========================================================

    pub fn config(env: Env) -> PoolConfig {
        read_config(&env)
    }

    pub fn slot0(env: Env) -> Slot0 {
        read_slot0(&env)
    }

    /// Liquidity active at the current tick
    pub fn liquidity(env: Env) -> u128 {
        read_liquidity(&env)
    }

    /// Global fee growth (token0, token1), Q128.128
    pub fn fee_growth_global(env: Env) -> (soroban_sdk::U256, soroban_sdk::U256) {
        let globals = read_fee_growth_global(&env);
        (
            to_host(&env, globals.token0_x128),
            to_host(&env, globals.token1_x128),
        )
    }

    pub fn protocol_fees(env: Env) -> (u128, u128) {
        read_protocol_fees(&env)
    }

    pub fn max_liquidity_per_tick(env: Env) -> u128 {
        read_config(&env).max_liquidity_per_tick
    }

    pub fn ticks(env: Env, tick: i32) -> TickRecord {
        let info = PoolStorage::new(&env).tick(tick);
        TickRecord::from_info(&env, &info)
    }

    pub fn positions(env: Env, owner: Address, tick_lower: i32, tick_upper: i32) -> PositionRecord {
        let position = PoolStorage::new(&env).position(&owner, tick_lower, tick_upper);
        PositionRecord::from_position(&env, &position)
    }

    pub fn observations(env: Env, index: u32) -> ObservationRecord {
        let observation = match u16::try_from(index) {
            Ok(index) => PoolStorage::new(&env).observation(index),
            Err(_) => Default::default(),
        };
        ObservationRecord::from_observation(&env, &observation)
    }

    pub fn tick_bitmap(env: Env, word_pos: i32) -> soroban_sdk::U256 {
        let word = match i16::try_from(word_pos) {
            Ok(word_pos) => PoolStorage::new(&env).word(word_pos),
            Err(_) => U256::zero(),
        };
        to_host(&env, word)
    }

    /// Cumulatives as of each `seconds_ago` before now
    pub fn observe(env: Env, seconds_agos: Vec<u32>) -> Result<Observed, PoolError> {
        let config = read_config(&env);
        let state = load_state(&env, &config);
        let storage = PoolStorage::new(&env);

        let mut tick_cumulatives = Vec::new(&env);
        let mut seconds_per_liquidity_x128s = Vec::new(&env);

        tidalswap_oracle::observe(
            &storage,
            state.time,
            seconds_agos.iter(),
            state.tick,
            state.observation_index,
            state.liquidity,
            state.observation_cardinality,
            |tick_cumulative, seconds_per_liquidity| {
                tick_cumulatives.push_back(tick_cumulative);
                seconds_per_liquidity_x128s.push_back(to_host(&env, seconds_per_liquidity));
            },
        )?;

        Ok(Observed {
            tick_cumulatives,
            seconds_per_liquidity_x128s,
        })
    }

    /// Tick cumulative, seconds per liquidity and seconds spent inside a
    /// range. Only comparable between snapshots taken while both ticks
    /// stayed initialized.
    pub fn snapshot_cumulatives_inside(
        env: Env,
        tick_lower: i32,
        tick_upper: i32,
    ) -> Result<CumulativesInside, PoolError> {
        check_ticks(tick_lower, tick_upper)?;

        let config = read_config(&env);
        let state = load_state(&env, &config);
        let storage = PoolStorage::new(&env);

        let lower = storage.tick(tick_lower);
        let upper = storage.tick(tick_upper);
        if !lower.initialized || !upper.initialized {
            return fail(&env, PoolError::TickNotInitialized);
        }
        let (lower, upper) = (lower.outside, upper.outside);

        let (tick_cumulative, seconds_per_liquidity, seconds) = if state.tick < tick_lower {
            (
                sub_i56(lower.tick_cumulative, upper.tick_cumulative),
                sub_u160(lower.seconds_per_liquidity_x128, upper.seconds_per_liquidity_x128),
                lower.seconds.wrapping_sub(upper.seconds),
            )
        } else if state.tick < tick_upper {
            let now = oracle_snapshot(&storage, &state)?;
            (
                sub_i56(
                    sub_i56(now.tick_cumulative, lower.tick_cumulative),
                    upper.tick_cumulative,
                ),
                sub_u160(
                    sub_u160(now.seconds_per_liquidity_x128, lower.seconds_per_liquidity_x128),
                    upper.seconds_per_liquidity_x128,
                ),
                now.time.wrapping_sub(lower.seconds).wrapping_sub(upper.seconds),
            )
        } else {
            (
                sub_i56(upper.tick_cumulative, lower.tick_cumulative),
                sub_u160(upper.seconds_per_liquidity_x128, lower.seconds_per_liquidity_x128),
                upper.seconds.wrapping_sub(lower.seconds),
            )
        };

        Ok(CumulativesInside {
            tick_cumulative_inside: tick_cumulative,
            seconds_per_liq_inside_x128: to_host(&env, seconds_per_liquidity),
            seconds_inside: seconds,
        })
    }
}
