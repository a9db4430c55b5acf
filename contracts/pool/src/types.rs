// Pool Types
//
// Host-facing records. Engine types from the packages use
// primitive_types::U256; these carry soroban_sdk::U256 and u32 in place
// of u16 so they can cross the contract boundary.

use soroban_sdk::{contracttype, Address, Env, Vec, U256};

use tidalswap_oracle::Observation;
use tidalswap_position::Position;
use tidalswap_tick::{OutsideSnapshot, TickInfo};

use crate::storage::{from_host, to_host};

// ============================================================
// POOL CONFIGURATION
// ============================================================

/// Immutable parameters fixed at deployment
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Deployer; its `owner()` governs protocol fees
    pub factory: Address,
    pub token0: Address,
    pub token1: Address,
    /// Swap fee in hundredths of a bip (3000 = 0.3%)
    pub fee: u32,
    pub tick_spacing: i32,
    /// Cap on gross liquidity referencing a single tick
    pub max_liquidity_per_tick: u128,
}

// ============================================================
// SLOT0
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Slot0 {
    /// Current sqrt price, Q64.96
    pub sqrt_price_x96: U256,
    pub tick: i32,
    /// Most recently written oracle slot
    pub observation_index: u32,
    /// Populated oracle slots
    pub observation_cardinality: u32,
    /// Slots the ring grows to on its next wrap
    pub observation_cardinality_next: u32,
    /// Protocol fee denominators, token0 in the low 4 bits
    pub fee_protocol: u32,
}

// ============================================================
// TICKS
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickRecord {
    pub liquidity_gross: u128,
    pub liquidity_net: i128,
    pub fee_growth_outside_0_x128: U256,
    pub fee_growth_outside_1_x128: U256,
    pub tick_cumulative_outside: i64,
    pub seconds_per_liq_outside_x128: U256,
    pub seconds_outside: u32,
    pub initialized: bool,
}

impl TickRecord {
    pub fn from_info(env: &Env, info: &TickInfo) -> Self {
        Self {
            liquidity_gross: info.liquidity_gross,
            liquidity_net: info.liquidity_net,
            fee_growth_outside_0_x128: to_host(env, info.outside.fee_growth_0_x128),
            fee_growth_outside_1_x128: to_host(env, info.outside.fee_growth_1_x128),
            tick_cumulative_outside: info.outside.tick_cumulative,
            seconds_per_liq_outside_x128: to_host(env, info.outside.seconds_per_liquidity_x128),
            seconds_outside: info.outside.seconds,
            initialized: info.initialized,
        }
    }

    pub fn to_info(&self) -> TickInfo {
        TickInfo {
            liquidity_gross: self.liquidity_gross,
            liquidity_net: self.liquidity_net,
            outside: OutsideSnapshot {
                fee_growth_0_x128: from_host(&self.fee_growth_outside_0_x128),
                fee_growth_1_x128: from_host(&self.fee_growth_outside_1_x128),
                tick_cumulative: self.tick_cumulative_outside,
                seconds_per_liquidity_x128: from_host(&self.seconds_per_liq_outside_x128),
                seconds: self.seconds_outside,
            },
            initialized: self.initialized,
        }
    }
}

// ============================================================
// POSITIONS
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionRecord {
    pub liquidity: u128,
    pub fee_growth_inside_0_last_x128: U256,
    pub fee_growth_inside_1_last_x128: U256,
    pub tokens_owed_0: u128,
    pub tokens_owed_1: u128,
}

impl PositionRecord {
    pub fn from_position(env: &Env, position: &Position) -> Self {
        Self {
            liquidity: position.liquidity,
            fee_growth_inside_0_last_x128: to_host(env, position.fee_growth_inside_0_last_x128),
            fee_growth_inside_1_last_x128: to_host(env, position.fee_growth_inside_1_last_x128),
            tokens_owed_0: position.tokens_owed_0,
            tokens_owed_1: position.tokens_owed_1,
        }
    }

    pub fn to_position(&self) -> Position {
        Position {
            liquidity: self.liquidity,
            fee_growth_inside_0_last_x128: from_host(&self.fee_growth_inside_0_last_x128),
            fee_growth_inside_1_last_x128: from_host(&self.fee_growth_inside_1_last_x128),
            tokens_owed_0: self.tokens_owed_0,
            tokens_owed_1: self.tokens_owed_1,
        }
    }
}

// ============================================================
// ORACLE
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ObservationRecord {
    pub block_timestamp: u32,
    pub tick_cumulative: i64,
    pub seconds_per_liq_x128: U256,
    pub initialized: bool,
}

impl ObservationRecord {
    pub fn from_observation(env: &Env, observation: &Observation) -> Self {
        Self {
            block_timestamp: observation.block_timestamp,
            tick_cumulative: observation.tick_cumulative,
            seconds_per_liq_x128: to_host(env, observation.seconds_per_liquidity_cumulative_x128),
            initialized: observation.initialized,
        }
    }

    pub fn to_observation(&self) -> Observation {
        Observation {
            block_timestamp: self.block_timestamp,
            tick_cumulative: self.tick_cumulative,
            seconds_per_liquidity_cumulative_x128: from_host(&self.seconds_per_liq_x128),
            initialized: self.initialized,
        }
    }
}

/// Result of `observe`, one entry per requested `seconds_ago`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Observed {
    pub tick_cumulatives: Vec<i64>,
    pub seconds_per_liquidity_x128s: Vec<U256>,
}

/// Accumulator deltas attributable to a tick range
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CumulativesInside {
    pub tick_cumulative_inside: i64,
    pub seconds_per_liq_inside_x128: U256,
    pub seconds_inside: u32,
}
