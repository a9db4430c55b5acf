#![no_std]

pub mod bitmap;
pub mod fee_growth;
pub mod store;
pub mod types;
pub mod update;

pub use bitmap::{flip_tick, next_initialized_tick_within_one_word};
pub use fee_growth::get_fee_growth_inside;
pub use store::{BitmapStore, TickStore};
pub use types::{FeeGrowthGlobals, OracleSnapshot, OutsideSnapshot, TickInfo};
pub use update::{clear, cross, tick_spacing_to_max_liquidity_per_tick, update};
