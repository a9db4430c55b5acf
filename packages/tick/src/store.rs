// Storage seams for tick records and bitmap words

use tidalswap_math::U256;

use crate::types::TickInfo;

/// Key-value access to tick records.
///
/// Missing ticks read as `TickInfo::default()`.
pub trait TickStore {
    fn tick(&self, tick: i32) -> TickInfo;
    fn set_tick(&mut self, tick: i32, info: &TickInfo);
    fn clear_tick(&mut self, tick: i32);
}

/// Key-value access to 256-bit bitmap words. Missing words read as zero.
pub trait BitmapStore {
    fn word(&self, word_pos: i16) -> U256;
    fn set_word(&mut self, word_pos: i16, word: U256);
}
