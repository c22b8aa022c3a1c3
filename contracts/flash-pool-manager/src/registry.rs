use crate::storage::{has_pool, set_pool};
use flash_math::{get_tick_at_sqrt_ratio, max_sqrt_ratio, min_sqrt_ratio};
use flash_types::{Fee, PoolError, PoolKey, PoolState};
use soroban_sdk::{Address, Env, Symbol, U256};

/// Canonical key for a currency pair, in either argument order
pub fn pool_key(
    currency_a: Address,
    currency_b: Address,
    fee: Fee,
    tick_spacing: i32,
    hooks: Option<Address>,
) -> Result<PoolKey, PoolError> {
    if currency_a == currency_b {
        return Err(PoolError::IdenticalCurrencies);
    }
    Ok(PoolKey::new(currency_a, currency_b, fee, tick_spacing, hooks))
}

/// Record the starting price of a pool. Returns the tick of that price.
pub fn initialize_pool(env: &Env, key: &PoolKey, sqrt_price_x96: U256) -> Result<i32, PoolError> {
    if key.currency0 == key.currency1 {
        return Err(PoolError::IdenticalCurrencies);
    }
    if !key.is_valid() {
        return Err(PoolError::InvalidPoolKey);
    }

    // Rejects zero as well, MIN_SQRT_RATIO is positive
    if sqrt_price_x96 < min_sqrt_ratio(env) || sqrt_price_x96 >= max_sqrt_ratio(env) {
        return Err(PoolError::InvalidPrice);
    }

    if has_pool(env, key) {
        return Err(PoolError::AlreadyInitialized);
    }

    let tick = get_tick_at_sqrt_ratio(env, &sqrt_price_x96);
    let state = PoolState::new(env, sqrt_price_x96.clone(), tick);
    set_pool(env, key, &state);

    env.events().publish(
        (Symbol::new(env, "pool_initialized"),),
        (key.clone(), sqrt_price_x96, tick),
    );

    Ok(tick)
}
