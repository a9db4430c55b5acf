use tidalswap_math::U256;

/// Liquidity owned by one address over one tick range
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub liquidity: u128,
    /// Fee growth inside the range as of the last touch, Q128.128
    pub fee_growth_inside_0_last_x128: U256,
    pub fee_growth_inside_1_last_x128: U256,
    /// Fees and burned principal claimable through collect
    pub tokens_owed_0: u128,
    pub tokens_owed_1: u128,
}
