// Cross-contract calls made by the pool
//
// The pool pays out first and then hands control to the caller-supplied
// contract, which must settle through the token contracts before
// returning. Balances are checked by the pool afterwards.

use soroban_sdk::{vec, Address, Bytes, Env, IntoVal, Symbol};

/// Ask the minter to pay what the new liquidity is owed
pub fn mint_callback(env: &Env, callee: &Address, amount0_owed: i128, amount1_owed: i128, data: &Bytes) {
    env.invoke_contract::<()>(
        callee,
        &Symbol::new(env, "mint_callback"),
        vec![
            env,
            amount0_owed.into_val(env),
            amount1_owed.into_val(env),
            data.into_val(env),
        ],
    );
}

/// Report swap deltas; positive values are owed to the pool
pub fn swap_callback(env: &Env, callee: &Address, amount0_delta: i128, amount1_delta: i128, data: &Bytes) {
    env.invoke_contract::<()>(
        callee,
        &Symbol::new(env, "swap_callback"),
        vec![
            env,
            amount0_delta.into_val(env),
            amount1_delta.into_val(env),
            data.into_val(env),
        ],
    );
}

/// Ask the borrower to return the principal plus these fees
pub fn flash_callback(env: &Env, callee: &Address, fee0: i128, fee1: i128, data: &Bytes) {
    env.invoke_contract::<()>(
        callee,
        &Symbol::new(env, "flash_callback"),
        vec![
            env,
            fee0.into_val(env),
            fee1.into_val(env),
            data.into_val(env),
        ],
    );
}

/// Current owner of the deploying factory
pub fn factory_owner(env: &Env, factory: &Address) -> Address {
    env.invoke_contract(factory, &Symbol::new(env, "owner"), vec![env])
}
