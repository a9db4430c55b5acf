// TidalSwap Math Package
//
// Pure fixed-point arithmetic for the pool engine: Q64.96 sqrt prices,
// Q128.128 fee growth, 512-bit intermediate mul_div and tick conversion.

#![no_std]

pub mod bit_math;
pub mod constants;
pub mod error;
pub mod full_math;
pub mod liquidity_math;
pub mod sqrt_price_math;
pub mod swap_math;
pub mod tick_math;
pub mod wrapping;

pub use constants::*;
pub use error::PoolError;

pub use primitive_types::U256;

pub use bit_math::{least_significant_bit, most_significant_bit};
pub use full_math::{div_rounding_up, mul_div, mul_div_rounding_up};
pub use liquidity_math::add_delta;
pub use sqrt_price_math::{
    get_amount0_delta, get_amount0_delta_signed, get_amount1_delta, get_amount1_delta_signed,
    get_next_sqrt_price_from_input, get_next_sqrt_price_from_output, to_amount,
};
pub use swap_math::{compute_swap_step, SwapStep};
pub use tick_math::{get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio};
