use std::collections::HashMap;

use tidalswap_math::U256;
use tidalswap_tick::{BitmapStore, TickInfo, TickStore};

/// In-memory tick and bitmap storage
#[derive(Default)]
pub struct MemoryStore {
    pub ticks: HashMap<i32, TickInfo>,
    pub words: HashMap<i16, U256>,
}

impl TickStore for MemoryStore {
    fn tick(&self, tick: i32) -> TickInfo {
        self.ticks.get(&tick).copied().unwrap_or_default()
    }

    fn set_tick(&mut self, tick: i32, info: &TickInfo) {
        self.ticks.insert(tick, *info);
    }

    fn clear_tick(&mut self, tick: i32) {
        self.ticks.remove(&tick);
    }
}

impl BitmapStore for MemoryStore {
    fn word(&self, word_pos: i16) -> U256 {
        self.words.get(&word_pos).copied().unwrap_or_default()
    }

    fn set_word(&mut self, word_pos: i16, word: U256) {
        self.words.insert(word_pos, word);
    }
}
