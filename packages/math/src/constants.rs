// TidalSwap Math Constants

use primitive_types::U256;

// ============================================================
// TICK BOUNDS
// ============================================================

/// Minimum tick (price = 1.0001^-887272 ≈ 2^-128)
pub const MIN_TICK: i32 = -887272;
/// Maximum tick (price = 1.0001^887272 ≈ 2^128)
pub const MAX_TICK: i32 = -MIN_TICK;

// ============================================================
// SQRT PRICE BOUNDS (Q64.96)
// ============================================================

/// get_sqrt_ratio_at_tick(MIN_TICK)
pub const MIN_SQRT_RATIO: U256 = U256([4295128739, 0, 0, 0]);

/// get_sqrt_ratio_at_tick(MAX_TICK)
/// = 1461446703485210103287273052203988822378723970342
pub const MAX_SQRT_RATIO: U256 = U256([
    0x5d951d5263988d26,
    0xefd1fc6a50648849,
    0xfffd8963,
    0,
]);

// ============================================================
// FIXED POINT
// ============================================================

pub const RESOLUTION_96: u32 = 96;

/// 2^96
pub const Q96: U256 = U256([0, 1 << 32, 0, 0]);
/// 2^128
pub const Q128: U256 = U256([0, 0, 1, 0]);

// ============================================================
// FEES
// ============================================================

/// Fees are expressed in hundredths of a bip (1e-6)
pub const FEE_DENOMINATOR: u32 = 1_000_000;

/// Protocol fee denominator bounds (0 disables the protocol share)
pub const MIN_FEE_PROTOCOL: u32 = 4;
pub const MAX_FEE_PROTOCOL: u32 = 10;

// ============================================================
// ORACLE
// ============================================================

/// Observation ring capacity upper bound
pub const MAX_OBSERVATION_CARDINALITY: u32 = u16::MAX as u32;
