// Pool storage module
//
// Singletons live in instance storage; ticks, bitmap words, positions and
// oracle slots are persistent entries. `PoolStorage` exposes the latter
// through the package store traits.

use soroban_sdk::{contracttype, Address, Env};

use tidalswap_math::U256;
use tidalswap_oracle::{Observation, ObservationStore};
use tidalswap_position::{Position, PositionStore};
use tidalswap_swap::SwapState;
use tidalswap_tick::{BitmapStore, FeeGrowthGlobals, TickInfo, TickStore};

use crate::types::{ObservationRecord, PoolConfig, PositionRecord, Slot0, TickRecord};

// ============================================================
// STORAGE KEYS
// ============================================================

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Immutable pool parameters
    Config,
    /// Price, tick and oracle cursor
    Slot0,
    /// Active liquidity
    Liquidity,
    /// (token0, token1) global fee growth, Q128.128
    FeeGrowthGlobal,
    /// (token0, token1) protocol fees owed
    ProtocolFees,
    /// Re-entrancy flag, false until initialize
    Unlocked,
    /// Tick record by tick index
    Tick(i32),
    /// Bitmap word by word position
    Bitmap(i32),
    /// Position by (owner, tick_lower, tick_upper)
    Position(Address, i32, i32),
    /// Oracle slot by ring index
    Observation(u32),
}

// ============================================================
// TTL CONFIGURATION
// ============================================================

/// Ledgers per day at ~5s per ledger
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage lifetime (~30 days)
const INSTANCE_LIFETIME: u32 = 30 * DAY_IN_LEDGERS;
const INSTANCE_BUMP_THRESHOLD: u32 = INSTANCE_LIFETIME - DAY_IN_LEDGERS;

/// Persistent storage lifetime in ledgers (~1 year at 5s/ledger)
const PERSISTENT_LIFETIME: u32 = 6_307_200;
const PERSISTENT_BUMP_THRESHOLD: u32 = PERSISTENT_LIFETIME - 30 * DAY_IN_LEDGERS;

/// Keep the contract instance alive
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_BUMP_THRESHOLD, INSTANCE_LIFETIME);
}

fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_BUMP_THRESHOLD, PERSISTENT_LIFETIME);
}

// ============================================================
// U256 CONVERSION
// ============================================================

/// Engine word to host word
pub fn to_host(env: &Env, value: U256) -> soroban_sdk::U256 {
    soroban_sdk::U256::from_parts(env, value.0[3], value.0[2], value.0[1], value.0[0])
}

/// Host word to engine word
pub fn from_host(value: &soroban_sdk::U256) -> U256 {
    let mut bytes = [0u8; 32];
    value.to_be_bytes().copy_into_slice(&mut bytes);
    U256::from_big_endian(&bytes)
}

// ============================================================
// CONFIG
// ============================================================

pub fn write_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn read_config(env: &Env) -> PoolConfig {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .expect("pool config is written by the constructor")
}

// ============================================================
// SLOT0 / LIQUIDITY / FEES
// ============================================================

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Slot0)
}

/// Slot0, zeroed before initialize
pub fn read_slot0(env: &Env) -> Slot0 {
    env.storage()
        .instance()
        .get(&DataKey::Slot0)
        .unwrap_or_else(|| Slot0 {
            sqrt_price_x96: soroban_sdk::U256::from_u32(env, 0),
            tick: 0,
            observation_index: 0,
            observation_cardinality: 0,
            observation_cardinality_next: 0,
            fee_protocol: 0,
        })
}

pub fn write_slot0(env: &Env, slot0: &Slot0) {
    env.storage().instance().set(&DataKey::Slot0, slot0);
}

pub fn read_liquidity(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::Liquidity)
        .unwrap_or(0)
}

pub fn write_liquidity(env: &Env, liquidity: u128) {
    env.storage().instance().set(&DataKey::Liquidity, &liquidity);
}

pub fn read_fee_growth_global(env: &Env) -> FeeGrowthGlobals {
    let stored: Option<(soroban_sdk::U256, soroban_sdk::U256)> =
        env.storage().instance().get(&DataKey::FeeGrowthGlobal);
    match stored {
        Some((token0, token1)) => FeeGrowthGlobals {
            token0_x128: from_host(&token0),
            token1_x128: from_host(&token1),
        },
        None => FeeGrowthGlobals::default(),
    }
}

pub fn write_fee_growth_global(env: &Env, globals: &FeeGrowthGlobals) {
    env.storage().instance().set(
        &DataKey::FeeGrowthGlobal,
        &(
            to_host(env, globals.token0_x128),
            to_host(env, globals.token1_x128),
        ),
    );
}

pub fn read_protocol_fees(env: &Env) -> (u128, u128) {
    env.storage()
        .instance()
        .get(&DataKey::ProtocolFees)
        .unwrap_or((0, 0))
}

pub fn write_protocol_fees(env: &Env, fees: (u128, u128)) {
    env.storage().instance().set(&DataKey::ProtocolFees, &fees);
}

pub fn is_unlocked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Unlocked)
        .unwrap_or(false)
}

pub fn set_unlocked(env: &Env, unlocked: bool) {
    env.storage().instance().set(&DataKey::Unlocked, &unlocked);
}

// ============================================================
// ENGINE STATE
// ============================================================

/// Current block timestamp, truncated to 32 bits
pub fn block_timestamp(env: &Env) -> u32 {
    env.ledger().timestamp() as u32
}

/// Gather the singletons the engine works on
pub fn load_state(env: &Env, config: &PoolConfig) -> SwapState {
    let slot0 = read_slot0(env);
    let globals = read_fee_growth_global(env);
    SwapState {
        sqrt_price_x96: from_host(&slot0.sqrt_price_x96),
        tick: slot0.tick,
        liquidity: read_liquidity(env),
        fee_growth_global_0_x128: globals.token0_x128,
        fee_growth_global_1_x128: globals.token1_x128,
        observation_index: slot0.observation_index as u16,
        observation_cardinality: slot0.observation_cardinality as u16,
        observation_cardinality_next: slot0.observation_cardinality_next as u16,
        fee_protocol: slot0.fee_protocol as u8,
        tick_spacing: config.tick_spacing,
        fee: config.fee,
        time: block_timestamp(env),
    }
}

/// Persist slot0 fields of an engine state
pub fn store_slot0(env: &Env, state: &SwapState) {
    write_slot0(
        env,
        &Slot0 {
            sqrt_price_x96: to_host(env, state.sqrt_price_x96),
            tick: state.tick,
            observation_index: state.observation_index as u32,
            observation_cardinality: state.observation_cardinality as u32,
            observation_cardinality_next: state.observation_cardinality_next as u32,
            fee_protocol: state.fee_protocol as u32,
        },
    );
}

/// Persist every singleton an engine state carries
pub fn store_state(env: &Env, state: &SwapState) {
    store_slot0(env, state);
    write_liquidity(env, state.liquidity);
    write_fee_growth_global(
        env,
        &FeeGrowthGlobals {
            token0_x128: state.fee_growth_global_0_x128,
            token1_x128: state.fee_growth_global_1_x128,
        },
    );
}

// ============================================================
// KEYED RECORDS
// ============================================================

/// Persistent-storage view for the package store traits
pub struct PoolStorage<'a> {
    env: &'a Env,
}

impl<'a> PoolStorage<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    fn read<V>(&self, key: &DataKey) -> Option<V>
    where
        V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
    {
        let result = self.env.storage().persistent().get(key);
        if result.is_some() {
            extend_ttl(self.env, key);
        }
        result
    }

    fn write<V>(&self, key: &DataKey, value: &V)
    where
        V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
    {
        self.env.storage().persistent().set(key, value);
        extend_ttl(self.env, key);
    }
}

impl TickStore for PoolStorage<'_> {
    fn tick(&self, tick: i32) -> TickInfo {
        self.read::<TickRecord>(&DataKey::Tick(tick))
            .map(|record| record.to_info())
            .unwrap_or_default()
    }

    fn set_tick(&mut self, tick: i32, info: &TickInfo) {
        self.write(&DataKey::Tick(tick), &TickRecord::from_info(self.env, info));
    }

    fn clear_tick(&mut self, tick: i32) {
        self.env.storage().persistent().remove(&DataKey::Tick(tick));
    }
}

impl BitmapStore for PoolStorage<'_> {
    fn word(&self, word_pos: i16) -> U256 {
        self.read::<soroban_sdk::U256>(&DataKey::Bitmap(word_pos as i32))
            .map(|word| from_host(&word))
            .unwrap_or_default()
    }

    fn set_word(&mut self, word_pos: i16, word: U256) {
        let key = DataKey::Bitmap(word_pos as i32);
        if word.is_zero() {
            self.env.storage().persistent().remove(&key);
        } else {
            self.write(&key, &to_host(self.env, word));
        }
    }
}

impl ObservationStore for PoolStorage<'_> {
    fn observation(&self, index: u16) -> Observation {
        self.read::<ObservationRecord>(&DataKey::Observation(index as u32))
            .map(|record| record.to_observation())
            .unwrap_or_default()
    }

    fn set_observation(&mut self, index: u16, observation: &Observation) {
        self.write(
            &DataKey::Observation(index as u32),
            &ObservationRecord::from_observation(self.env, observation),
        );
    }
}

impl PositionStore for PoolStorage<'_> {
    type Owner = Address;

    fn position(&self, owner: &Address, tick_lower: i32, tick_upper: i32) -> Position {
        self.read::<PositionRecord>(&DataKey::Position(owner.clone(), tick_lower, tick_upper))
            .map(|record| record.to_position())
            .unwrap_or_default()
    }

    fn set_position(
        &mut self,
        owner: &Address,
        tick_lower: i32,
        tick_upper: i32,
        position: &Position,
    ) {
        self.write(
            &DataKey::Position(owner.clone(), tick_lower, tick_upper),
            &PositionRecord::from_position(self.env, position),
        );
    }
}
