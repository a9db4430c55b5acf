// Fee Growth Calculations

use tidalswap_math::wrapping::sub_u256;
use tidalswap_math::U256;

use crate::store::TickStore;
use crate::types::FeeGrowthGlobals;

/// Fee growth per unit of liquidity accrued strictly inside [lower, upper).
///
/// Only meaningful as a difference between two reads taken while the
/// range stayed initialized.
pub fn get_fee_growth_inside<S: TickStore>(
    store: &S,
    tick_lower: i32,
    tick_upper: i32,
    tick_current: i32,
    globals: &FeeGrowthGlobals,
) -> (U256, U256) {
    let lower = store.tick(tick_lower).outside;
    let upper = store.tick(tick_upper).outside;

    let (below_0, below_1) = if tick_current >= tick_lower {
        (lower.fee_growth_0_x128, lower.fee_growth_1_x128)
    } else {
        (
            sub_u256(globals.token0_x128, lower.fee_growth_0_x128),
            sub_u256(globals.token1_x128, lower.fee_growth_1_x128),
        )
    };

    let (above_0, above_1) = if tick_current < tick_upper {
        (upper.fee_growth_0_x128, upper.fee_growth_1_x128)
    } else {
        (
            sub_u256(globals.token0_x128, upper.fee_growth_0_x128),
            sub_u256(globals.token1_x128, upper.fee_growth_1_x128),
        )
    };

    (
        sub_u256(sub_u256(globals.token0_x128, below_0), above_0),
        sub_u256(sub_u256(globals.token1_x128, below_1), above_1),
    )
}
