// Tick Types

use tidalswap_math::wrapping::{sub_i56, sub_u160, sub_u256};
use tidalswap_math::U256;

/// Global fee growth per unit of liquidity, Q128.128, wrapping
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeGrowthGlobals {
    pub token0_x128: U256,
    pub token1_x128: U256,
}

/// Oracle cumulatives at a point in time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OracleSnapshot {
    /// Running sum of tick * seconds, wraps at 2^56
    pub tick_cumulative: i64,
    /// Running sum of seconds / max(1, liquidity), Q128, wraps at 2^160
    pub seconds_per_liquidity_x128: U256,
    /// Block timestamp, wraps at 2^32
    pub time: u32,
}

/// Accumulators on the far side of a tick.
///
/// Convention: the snapshot holds what accrued on the side of the tick
/// *away from* the current price. When a tick is first initialized at or
/// below the current tick, all growth so far is assumed to have happened
/// below it, so the snapshot is seeded with the globals; otherwise it
/// starts at zero. Every crossing replaces each field with
/// `global - outside`, flipping which side it describes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutsideSnapshot {
    pub fee_growth_0_x128: U256,
    pub fee_growth_1_x128: U256,
    pub tick_cumulative: i64,
    pub seconds_per_liquidity_x128: U256,
    pub seconds: u32,
}

impl OutsideSnapshot {
    /// Snapshot for a tick initialized at or below the current tick
    pub fn seeded(globals: &FeeGrowthGlobals, oracle: &OracleSnapshot) -> Self {
        Self {
            fee_growth_0_x128: globals.token0_x128,
            fee_growth_1_x128: globals.token1_x128,
            tick_cumulative: oracle.tick_cumulative,
            seconds_per_liquidity_x128: oracle.seconds_per_liquidity_x128,
            seconds: oracle.time,
        }
    }

    /// Snapshot after the price crosses the tick
    pub fn mirrored(&self, globals: &FeeGrowthGlobals, oracle: &OracleSnapshot) -> Self {
        Self {
            fee_growth_0_x128: sub_u256(globals.token0_x128, self.fee_growth_0_x128),
            fee_growth_1_x128: sub_u256(globals.token1_x128, self.fee_growth_1_x128),
            tick_cumulative: sub_i56(oracle.tick_cumulative, self.tick_cumulative),
            seconds_per_liquidity_x128: sub_u160(
                oracle.seconds_per_liquidity_x128,
                self.seconds_per_liquidity_x128,
            ),
            seconds: oracle.time.wrapping_sub(self.seconds),
        }
    }
}

/// Information stored for each initialized tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInfo {
    /// Total liquidity referencing this tick
    pub liquidity_gross: u128,
    /// Net liquidity change when crossing left-to-right
    pub liquidity_net: i128,
    /// Accumulators on the far side of this tick
    pub outside: OutsideSnapshot,
    /// Whether this tick is initialized
    pub initialized: bool,
}
