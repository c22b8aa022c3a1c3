#![no_std]

mod custody;
mod deltas;
mod donate;
mod executor;
mod positions;
mod registry;
mod storage;
mod tick;

use flash_types::{PoolError, PoolKey, PoolState, Position, TickInfo};
use soroban_sdk::{contract, contractimpl, Address, Bytes, Env, Symbol, Val, Vec, U256};

#[contract]
pub struct FlashPoolManager;

#[contractimpl]
impl FlashPoolManager {
    // === Pool Registry ===

    /// Canonical key for a currency pair. Argument order does not matter.
    pub fn pool_key(
        currency_a: Address,
        currency_b: Address,
        fee: u32,
        tick_spacing: i32,
        hooks: Option<Address>,
    ) -> Result<PoolKey, PoolError> {
        registry::pool_key(currency_a, currency_b, fee, tick_spacing, hooks)
    }

    /// Set the starting price of a pool, once. Returns the starting tick.
    pub fn initialize_pool(env: Env, key: PoolKey, sqrt_price_x96: U256) -> Result<i32, PoolError> {
        storage::extend_instance_ttl(&env);
        registry::initialize_pool(&env, &key, sqrt_price_x96)
    }

    // === Batches ===

    /// Run `actions` (one opcode byte per step) with their parameter blocks
    /// in `params`, all or nothing.
    ///
    /// Every currency delta must be back to zero when the last step has run;
    /// tokens owed to the pool are pulled from `caller`, which must have
    /// approved this contract on each ledger.
    pub fn execute(
        env: Env,
        caller: Address,
        actions: Bytes,
        params: Vec<Val>,
        deadline: u64,
    ) -> Result<(), PoolError> {
        caller.require_auth();
        storage::extend_instance_ttl(&env);

        let steps = actions.len();
        executor::execute(&env, caller.clone(), actions, params, deadline)?;

        env.events()
            .publish((Symbol::new(&env, "batch_executed"),), (caller, steps));

        Ok(())
    }

    /// Pay fees to the liquidity currently in range of `key`
    pub fn donate(
        env: Env,
        caller: Address,
        key: PoolKey,
        amount0: u128,
        amount1: u128,
    ) -> Result<(), PoolError> {
        caller.require_auth();
        storage::extend_instance_ttl(&env);
        donate::donate(&env, &caller, &key, amount0, amount1)
    }

    // === View Functions ===

    pub fn pool_state(env: Env, key: PoolKey) -> Option<PoolState> {
        storage::get_pool(&env, &key)
    }

    pub fn tick_info(env: Env, key: PoolKey, tick: i32) -> TickInfo {
        storage::get_tick(&env, &key, tick)
    }

    pub fn position(env: Env, id: u32) -> Option<Position> {
        storage::get_position(&env, id)
    }

    /// Id the next minted position will get
    pub fn next_position_id(env: Env) -> u32 {
        storage::get_next_position_id(&env)
    }
}
