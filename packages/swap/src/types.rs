use tidalswap_math::U256;

/// Pool state the swap loop reads and advances
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwapState {
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub liquidity: u128,
    pub fee_growth_global_0_x128: U256,
    pub fee_growth_global_1_x128: U256,
    pub observation_index: u16,
    pub observation_cardinality: u16,
    pub observation_cardinality_next: u16,
    /// Protocol fee denominators, token0 in the low nibble
    pub fee_protocol: u8,
    pub tick_spacing: i32,
    /// Swap fee in hundredths of a bip
    pub fee: u32,
    /// Current block timestamp, truncated to 32 bits
    pub time: u32,
}

/// What the caller asked for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapParams {
    pub zero_for_one: bool,
    /// Positive for exact input, negative for exact output
    pub amount_specified: i128,
    pub sqrt_price_limit_x96: U256,
}

/// Net token flows from the pool's perspective: positive is owed to the pool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwapResult {
    pub amount0: i128,
    pub amount1: i128,
    /// Protocol share of the fee, in the input token
    pub protocol_fee: u128,
}
