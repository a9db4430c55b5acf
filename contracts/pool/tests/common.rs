#![allow(dead_code)]

use soroban_sdk::{
    contract, contractimpl, contracttype,
    testutils::{Address as _, Ledger},
    token, Address, Bytes, Env, U256,
};
use tidalswap_pool::{TidalPool, TidalPoolClient};

// Test constants
pub const FEE_MEDIUM: u32 = 3000; // 0.30%
pub const TICK_SPACING_MEDIUM: i32 = 60;
pub const MIN_TICK_MEDIUM: i32 = -887220;
pub const MAX_TICK_MEDIUM: i32 = 887220;
pub const START_TIME: u64 = 1_000;
pub const E18: i128 = 1_000_000_000_000_000_000;
pub const CALLEE_FUNDS: i128 = 1_000_000 * E18;

// ============================================================
// MOCK FACTORY
// ============================================================

// Separate module: each `#[contractimpl]` with a `__constructor` emits
// module-level items that would collide with the callee's.
mod factory {
    use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

    #[contracttype]
    enum FactoryKey {
        Owner,
    }

    #[contract]
    pub struct TestFactory;

    #[contractimpl]
    impl TestFactory {
        pub fn __constructor(env: Env, owner: Address) {
            env.storage().instance().set(&FactoryKey::Owner, &owner);
        }

        pub fn owner(env: Env) -> Address {
            env.storage().instance().get(&FactoryKey::Owner).unwrap()
        }
    }
}
pub use factory::*;

// ============================================================
// MOCK CALLEE
// ============================================================

#[contracttype]
enum CalleeKey {
    Pool,
    Token0,
    Token1,
    /// Amounts withheld from every payment
    Shortfall,
    /// Flash principal to return
    FlashRepay,
    /// Paid on top of the flash fee
    FlashExtra,
}

/// Pays whatever the pool asks for out of its own balance
#[contract]
pub struct TestCallee;

fn read_pair(env: &Env, key: &CalleeKey) -> (i128, i128) {
    env.storage().instance().get(key).unwrap_or((0, 0))
}

fn pay_pool(env: &Env, token_key: CalleeKey, amount: i128) {
    if amount <= 0 {
        return;
    }
    let token: Address = env.storage().instance().get(&token_key).unwrap();
    let pool: Address = env.storage().instance().get(&CalleeKey::Pool).unwrap();
    token::Client::new(env, &token).transfer(&env.current_contract_address(), &pool, &amount);
}

#[contractimpl]
impl TestCallee {
    pub fn __constructor(env: Env, pool: Address, token0: Address, token1: Address) {
        env.storage().instance().set(&CalleeKey::Pool, &pool);
        env.storage().instance().set(&CalleeKey::Token0, &token0);
        env.storage().instance().set(&CalleeKey::Token1, &token1);
    }

    pub fn set_shortfall(env: Env, shortfall0: i128, shortfall1: i128) {
        env.storage()
            .instance()
            .set(&CalleeKey::Shortfall, &(shortfall0, shortfall1));
    }

    pub fn set_flash(env: Env, repay0: i128, repay1: i128, extra0: i128, extra1: i128) {
        env.storage()
            .instance()
            .set(&CalleeKey::FlashRepay, &(repay0, repay1));
        env.storage()
            .instance()
            .set(&CalleeKey::FlashExtra, &(extra0, extra1));
    }

    pub fn mint_callback(env: Env, amount0_owed: i128, amount1_owed: i128, _data: Bytes) {
        let (short0, short1) = read_pair(&env, &CalleeKey::Shortfall);
        pay_pool(&env, CalleeKey::Token0, amount0_owed - short0);
        pay_pool(&env, CalleeKey::Token1, amount1_owed - short1);
    }

    pub fn swap_callback(env: Env, amount0_delta: i128, amount1_delta: i128, _data: Bytes) {
        let (short0, short1) = read_pair(&env, &CalleeKey::Shortfall);
        if amount0_delta > 0 {
            pay_pool(&env, CalleeKey::Token0, amount0_delta - short0);
        }
        if amount1_delta > 0 {
            pay_pool(&env, CalleeKey::Token1, amount1_delta - short1);
        }
    }

    pub fn flash_callback(env: Env, fee0: i128, fee1: i128, _data: Bytes) {
        let (short0, short1) = read_pair(&env, &CalleeKey::Shortfall);
        let (repay0, repay1) = read_pair(&env, &CalleeKey::FlashRepay);
        let (extra0, extra1) = read_pair(&env, &CalleeKey::FlashExtra);
        pay_pool(&env, CalleeKey::Token0, repay0 + fee0 + extra0 - short0);
        pay_pool(&env, CalleeKey::Token1, repay1 + fee1 + extra1 - short1);
    }
}

// ============================================================
// SETUP
// ============================================================

pub struct TestPool<'a> {
    pub env: Env,
    pub pool: TidalPoolClient<'a>,
    pub pool_id: Address,
    pub callee: TestCalleeClient<'a>,
    pub callee_id: Address,
    pub token0: Address,
    pub token1: Address,
    pub factory_owner: Address,
}

impl TestPool<'_> {
    pub fn balance0(&self, who: &Address) -> i128 {
        token::Client::new(&self.env, &self.token0).balance(who)
    }

    pub fn balance1(&self, who: &Address) -> i128 {
        token::Client::new(&self.env, &self.token1).balance(who)
    }

    pub fn no_data(&self) -> Bytes {
        Bytes::new(&self.env)
    }

    /// Mint liquidity paid for by the callee
    pub fn mint(&self, owner: &Address, tick_lower: i32, tick_upper: i32, amount: u128) -> (i128, i128) {
        self.pool.mint(
            &self.callee_id,
            owner,
            &tick_lower,
            &tick_upper,
            &amount,
            &self.no_data(),
        )
    }

    /// Exact-input swap paid for by the callee, sent to `recipient`
    pub fn swap_exact_in(&self, recipient: &Address, zero_for_one: bool, amount: i128) -> (i128, i128) {
        let limit = if zero_for_one {
            min_sqrt_ratio_plus_one(&self.env)
        } else {
            max_sqrt_ratio_minus_one(&self.env)
        };
        self.pool.swap(
            &self.callee_id,
            recipient,
            &zero_for_one,
            &amount,
            &limit,
            &self.no_data(),
        )
    }

    pub fn advance_time(&self, seconds: u64) {
        self.env.ledger().with_mut(|li| li.timestamp += seconds);
    }
}

/// Create a test token
pub fn create_token(env: &Env, admin: &Address) -> Address {
    env.register_stellar_asset_contract_v2(admin.clone()).address()
}

/// Mint tokens to an address
pub fn mint_tokens(env: &Env, token: &Address, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, token).mint(to, &amount);
}

/// sqrt(1) in Q64.96
pub fn price_one(env: &Env) -> U256 {
    U256::from_u128(env, 1u128 << 96)
}

pub fn min_sqrt_ratio_plus_one(env: &Env) -> U256 {
    U256::from_u128(env, 4_295_128_740)
}

pub fn max_sqrt_ratio_minus_one(env: &Env) -> U256 {
    U256::from_parts(env, 0, 0xfffd8963, 0xefd1fc6a50648849, 0x5d951d5263988d25)
}

/// Deployed but not initialized
pub fn deploy_pool<'a>(fee: u32, tick_spacing: i32) -> TestPool<'a> {
    let env = Env::default();
    env.mock_all_auths();
    // swaps across empty words walk many bitmap entries
    env.cost_estimate().budget().reset_unlimited();
    env.ledger().with_mut(|li| li.timestamp = START_TIME);

    let admin = Address::generate(&env);
    let factory_owner = Address::generate(&env);
    let token0 = create_token(&env, &admin);
    let token1 = create_token(&env, &admin);

    let factory_id = env.register(TestFactory, (factory_owner.clone(),));
    let pool_id = env.register(
        TidalPool,
        (factory_id, token0.clone(), token1.clone(), fee, tick_spacing),
    );
    let callee_id = env.register(TestCallee, (pool_id.clone(), token0.clone(), token1.clone()));

    mint_tokens(&env, &token0, &callee_id, CALLEE_FUNDS);
    mint_tokens(&env, &token1, &callee_id, CALLEE_FUNDS);

    let pool = TidalPoolClient::new(&env, &pool_id);
    let callee = TestCalleeClient::new(&env, &callee_id);

    TestPool {
        env,
        pool,
        pool_id,
        callee,
        callee_id,
        token0,
        token1,
        factory_owner,
    }
}

/// 0.3% pool with spacing 60, initialized at price 1
pub fn setup_pool<'a>() -> TestPool<'a> {
    let t = deploy_pool(FEE_MEDIUM, TICK_SPACING_MEDIUM);
    t.pool.initialize(&price_one(&t.env));
    t
}

/// `setup_pool` plus full-range liquidity of `liquidity`
pub fn setup_full_range<'a>(liquidity: u128) -> (TestPool<'a>, Address) {
    let t = setup_pool();
    let lp = Address::generate(&t.env);
    t.mint(&lp, MIN_TICK_MEDIUM, MAX_TICK_MEDIUM, liquidity);
    (t, lp)
}
