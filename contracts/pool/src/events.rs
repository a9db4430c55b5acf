// Pool events
//
// One topic symbol per event; payloads are tuples in the documented order.

use soroban_sdk::{Address, Env, Symbol};

use tidalswap_math::U256;

use crate::storage::to_host;

/// Emitted once when the price is first set
/// Topics: ("Initialize",)
/// Data: (sqrt_price_x96, tick)
pub fn emit_initialize(env: &Env, sqrt_price_x96: U256, tick: i32) {
    env.events().publish(
        (Symbol::new(env, "Initialize"),),
        (to_host(env, sqrt_price_x96), tick),
    );
}

/// Topics: ("Mint",)
/// Data: (sender, owner, tick_lower, tick_upper, amount, amount0, amount1)
pub fn emit_mint(
    env: &Env,
    sender: &Address,
    owner: &Address,
    tick_lower: i32,
    tick_upper: i32,
    amount: u128,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        (Symbol::new(env, "Mint"),),
        (
            sender.clone(),
            owner.clone(),
            tick_lower,
            tick_upper,
            amount,
            amount0,
            amount1,
        ),
    );
}

/// Topics: ("Burn",)
/// Data: (owner, tick_lower, tick_upper, amount, amount0, amount1)
pub fn emit_burn(
    env: &Env,
    owner: &Address,
    tick_lower: i32,
    tick_upper: i32,
    amount: u128,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        (Symbol::new(env, "Burn"),),
        (owner.clone(), tick_lower, tick_upper, amount, amount0, amount1),
    );
}

/// Topics: ("Collect",)
/// Data: (owner, recipient, tick_lower, tick_upper, amount0, amount1)
pub fn emit_collect(
    env: &Env,
    owner: &Address,
    recipient: &Address,
    tick_lower: i32,
    tick_upper: i32,
    amount0: u128,
    amount1: u128,
) {
    env.events().publish(
        (Symbol::new(env, "Collect"),),
        (
            owner.clone(),
            recipient.clone(),
            tick_lower,
            tick_upper,
            amount0,
            amount1,
        ),
    );
}

/// Topics: ("Swap",)
/// Data: (sender, recipient, amount0, amount1, sqrt_price_x96, liquidity, tick)
pub fn emit_swap(
    env: &Env,
    sender: &Address,
    recipient: &Address,
    amount0: i128,
    amount1: i128,
    sqrt_price_x96: U256,
    liquidity: u128,
    tick: i32,
) {
    env.events().publish(
        (Symbol::new(env, "Swap"),),
        (
            sender.clone(),
            recipient.clone(),
            amount0,
            amount1,
            to_host(env, sqrt_price_x96),
            liquidity,
            tick,
        ),
    );
}

/// Topics: ("Flash",)
/// Data: (sender, recipient, amount0, amount1, paid0, paid1)
pub fn emit_flash(
    env: &Env,
    sender: &Address,
    recipient: &Address,
    amount0: u128,
    amount1: u128,
    paid0: i128,
    paid1: i128,
) {
    env.events().publish(
        (Symbol::new(env, "Flash"),),
        (
            sender.clone(),
            recipient.clone(),
            amount0,
            amount1,
            paid0,
            paid1,
        ),
    );
}

/// Topics: ("IncreaseObsCardinalityNext",)
/// Data: (old, new)
pub fn emit_increase_cardinality_next(env: &Env, old: u32, new: u32) {
    env.events().publish(
        (Symbol::new(env, "IncreaseObsCardinalityNext"),),
        (old, new),
    );
}

/// Topics: ("SetFeeProtocol",)
/// Data: (old0, old1, new0, new1)
pub fn emit_set_fee_protocol(env: &Env, old0: u32, old1: u32, new0: u32, new1: u32) {
    env.events().publish(
        (Symbol::new(env, "SetFeeProtocol"),),
        (old0, old1, new0, new1),
    );
}

/// Topics: ("CollectProtocol",)
/// Data: (sender, recipient, amount0, amount1)
pub fn emit_collect_protocol(
    env: &Env,
    sender: &Address,
    recipient: &Address,
    amount0: u128,
    amount1: u128,
) {
    env.events().publish(
        (Symbol::new(env, "CollectProtocol"),),
        (sender.clone(), recipient.clone(), amount0, amount1),
    );
}
