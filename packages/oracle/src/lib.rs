#![no_std]

pub mod oracle;
pub mod types;

pub use oracle::{grow, initialize, lte, observe, observe_single, transform, write};
pub use types::{Observation, ObservationStore};
