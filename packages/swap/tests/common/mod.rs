use std::collections::HashMap;

use tidalswap_math::{get_sqrt_ratio_at_tick, U256};
use tidalswap_oracle::{Observation, ObservationStore};
use tidalswap_swap::SwapState;
use tidalswap_tick::{
    flip_tick, tick_spacing_to_max_liquidity_per_tick, update, BitmapStore, FeeGrowthGlobals,
    OracleSnapshot, TickInfo, TickStore,
};

/// Ticks, bitmap words and oracle slots held in memory
#[derive(Default)]
pub struct MemoryStore {
    pub ticks: HashMap<i32, TickInfo>,
    pub words: HashMap<i16, U256>,
    pub observations: HashMap<u16, Observation>,
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

impl ObservationStore for MemoryStore {
    fn observation(&self, index: u16) -> Observation {
        self.observations.get(&index).copied().unwrap_or_default()
    }

    fn set_observation(&mut self, index: u16, observation: &Observation) {
        self.observations.insert(index, *observation);
    }
}

pub const FEE_MEDIUM: u32 = 3000;
pub const SPACING_MEDIUM: i32 = 60;
pub const FULL_RANGE_LOWER: i32 = -887220;
pub const FULL_RANGE_UPPER: i32 = 887220;

/// Pool state plus storage, driven without a host
pub struct TestPool {
    pub store: MemoryStore,
    pub state: SwapState,
}

impl TestPool {
    pub fn new(tick: i32, time: u32) -> Self {
        let mut store = MemoryStore::default();
        let (cardinality, cardinality_next) = tidalswap_oracle::initialize(&mut store, time);
        let state = SwapState {
            sqrt_price_x96: get_sqrt_ratio_at_tick(tick).unwrap(),
            tick,
            observation_cardinality: cardinality,
            observation_cardinality_next: cardinality_next,
            tick_spacing: SPACING_MEDIUM,
            fee: FEE_MEDIUM,
            time,
            ..Default::default()
        };
        Self { store, state }
    }

    pub fn add_liquidity(&mut self, lower: i32, upper: i32, amount: u128) {
        let globals = FeeGrowthGlobals {
            token0_x128: self.state.fee_growth_global_0_x128,
            token1_x128: self.state.fee_growth_global_1_x128,
        };
        let oracle = OracleSnapshot {
            time: self.state.time,
            ..Default::default()
        };
        let spacing = self.state.tick_spacing;
        let max = tick_spacing_to_max_liquidity_per_tick(spacing).unwrap();
        let tick = self.state.tick;

        for (boundary, upper_side) in [(lower, false), (upper, true)] {
            let flipped = update(
                &mut self.store,
                boundary,
                tick,
                amount as i128,
                &globals,
                &oracle,
                upper_side,
                max,
            )
            .unwrap();
            if flipped {
                flip_tick(&mut self.store, boundary, spacing).unwrap();
            }
        }

        if lower <= tick && tick < upper {
            self.state.liquidity += amount;
        }
    }
}
