use tidalswap_math::U256;

/// One oracle sample
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Observation {
    /// Block timestamp, wraps at 2^32
    pub block_timestamp: u32,
    /// tick * seconds since initialization, wraps at 2^56
    pub tick_cumulative: i64,
    /// seconds / max(1, liquidity) since initialization, Q128, wraps at 2^160
    pub seconds_per_liquidity_cumulative_x128: U256,
    pub initialized: bool,
}

/// Key-value access to the observation ring. Missing slots read as default.
pub trait ObservationStore {
    fn observation(&self, index: u16) -> Observation;
    fn set_observation(&mut self, index: u16, observation: &Observation);
}
