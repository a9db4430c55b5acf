#![no_std]

pub mod engine;
pub mod types;

pub use engine::{engine_swap, validate_price_limit};
pub use types::{SwapParams, SwapResult, SwapState};
