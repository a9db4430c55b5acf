#![no_std]

pub mod fees;
pub mod manager;
pub mod store;
pub mod types;

pub use fees::pending_fees;
pub use manager::{collect_owed, update_position};
pub use store::PositionStore;
pub use types::Position;
