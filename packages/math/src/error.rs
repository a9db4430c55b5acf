// Pool error taxonomy shared by every TidalSwap package and the pool contract

use soroban_sdk::contracterror;

/// Errors surfaced by the pool engine.
///
/// Codes are grouped by class so a caller can tell a rejected request
/// (1xx) apart from an arithmetic fault (2xx), a payment that the callback
/// failed to deliver (3xx) or an oracle lookup outside the retained window (4xx).
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    // Precondition violations (100-199)
    /// Pool price was already set
    AlreadyInitialized = 100,
    /// Pool is locked: not yet initialized, or re-entered mid-operation
    Locked = 101,
    /// Lower tick must be strictly below upper tick
    TickLowerNotBelowUpper = 102,
    /// Lower tick below MIN_TICK
    TickLowerTooLow = 103,
    /// Upper tick above MAX_TICK
    TickUpperTooHigh = 104,
    /// Tick is not a multiple of the tick spacing
    TickNotSpaced = 105,
    /// Amount must be non-zero
    ZeroAmount = 106,
    /// Price limit on the wrong side of the current price or out of bounds
    PriceLimitOutOfBounds = 107,
    /// Zero-liquidity poke on an empty position
    NoPosition = 108,
    /// Flash requires active liquidity
    NoLiquidity = 109,
    /// Protocol fee denominator must be 0 or within 4..=10
    InvalidFeeProtocol = 110,
    /// Tick spacing must be positive and below the tick range
    InvalidTickSpacing = 111,
    /// Fee must be below 1_000_000 (hundredths of a bip)
    InvalidFee = 112,
    /// Tick has no liquidity referencing it
    TickNotInitialized = 113,
    /// Observation cardinality beyond u16 range
    CardinalityTooLarge = 114,

    // Arithmetic faults (200-299)
    /// Division by zero
    DivisionByZero = 200,
    /// mul_div quotient does not fit in 256 bits
    MulDivOverflow = 201,
    /// Liquidity subtraction underflowed
    LiquidityUnderflow = 202,
    /// Liquidity addition overflowed
    LiquidityOverflow = 203,
    /// Tick gross liquidity above the per-spacing cap
    LiquidityPerTickExceeded = 204,
    /// Tick outside [MIN_TICK, MAX_TICK]
    TickOutOfRange = 205,
    /// Sqrt price outside [MIN_SQRT_RATIO, MAX_SQRT_RATIO)
    SqrtPriceOutOfRange = 206,
    /// Sqrt price does not fit in 160 bits or underflowed
    PriceOverflow = 207,
    /// Token amount does not fit in i128
    AmountOverflow = 208,
    /// Bit scan over a zero word
    ZeroValue = 209,
    /// Zero price or zero liquidity in a price step
    InvalidPriceOrLiquidity = 210,

    // Payment verification failures (300-399)
    /// Mint callback under-delivered token0
    InsufficientMintPayment0 = 300,
    /// Mint callback under-delivered token1
    InsufficientMintPayment1 = 301,
    /// Swap callback under-delivered the input token
    InsufficientInputAmount = 302,
    /// Flash callback did not return token0 plus fee
    FlashNotRepaid0 = 303,
    /// Flash callback did not return token1 plus fee
    FlashNotRepaid1 = 304,

    // Oracle range errors (400-499)
    /// Target timestamp predates the oldest retained observation
    ObservationTooOld = 400,
    /// Oracle has no observations
    OracleUninitialized = 401,
}

impl PoolError {
    /// Short diagnostic naming the violated invariant
    pub const fn message(&self) -> &'static str {
        match self {
            PoolError::AlreadyInitialized => "pool already initialized",
            PoolError::Locked => "pool locked",
            PoolError::TickLowerNotBelowUpper => "tick lower must be below tick upper",
            PoolError::TickLowerTooLow => "tick lower below minimum",
            PoolError::TickUpperTooHigh => "tick upper above maximum",
            PoolError::TickNotSpaced => "tick not aligned to spacing",
            PoolError::ZeroAmount => "amount must be non-zero",
            PoolError::PriceLimitOutOfBounds => "sqrt price limit out of bounds",
            PoolError::NoPosition => "no position to poke",
            PoolError::NoLiquidity => "no active liquidity",
            PoolError::InvalidFeeProtocol => "invalid protocol fee",
            PoolError::InvalidTickSpacing => "invalid tick spacing",
            PoolError::InvalidFee => "invalid fee",
            PoolError::TickNotInitialized => "tick not initialized",
            PoolError::CardinalityTooLarge => "observation cardinality too large",
            PoolError::DivisionByZero => "division by zero",
            PoolError::MulDivOverflow => "mul_div overflow",
            PoolError::LiquidityUnderflow => "liquidity underflow",
            PoolError::LiquidityOverflow => "liquidity overflow",
            PoolError::LiquidityPerTickExceeded => "tick liquidity above cap",
            PoolError::TickOutOfRange => "tick out of range",
            PoolError::SqrtPriceOutOfRange => "sqrt price out of range",
            PoolError::PriceOverflow => "sqrt price overflow",
            PoolError::AmountOverflow => "amount overflow",
            PoolError::ZeroValue => "bit scan of zero",
            PoolError::InvalidPriceOrLiquidity => "zero price or liquidity",
            PoolError::InsufficientMintPayment0 => "mint underpaid token0",
            PoolError::InsufficientMintPayment1 => "mint underpaid token1",
            PoolError::InsufficientInputAmount => "swap underpaid input",
            PoolError::FlashNotRepaid0 => "flash not repaid token0",
            PoolError::FlashNotRepaid1 => "flash not repaid token1",
            PoolError::ObservationTooOld => "observation too old",
            PoolError::OracleUninitialized => "oracle uninitialized",
        }
    }
}
