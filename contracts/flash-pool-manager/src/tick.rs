use crate::storage::{get_tick, set_tick};
use flash_math::wrapping_sub;
use flash_types::{PoolError, PoolKey, PoolState};
use soroban_sdk::{Env, U256};

/// Update a tick with liquidity delta.
/// Returns true if the tick was flipped (initialized or cleared).
pub fn update(
    env: &Env,
    key: &PoolKey,
    tick: i32,
    state: &PoolState,
    liquidity_delta: i128,
    upper: bool,
    max_liquidity: u128,
) -> Result<bool, PoolError> {
    let mut info = get_tick(env, key, tick);

    let liquidity_gross_before = info.liquidity_gross;
    let liquidity_gross_after = if liquidity_delta < 0 {
        liquidity_gross_before
            .checked_sub(liquidity_delta.unsigned_abs())
            .ok_or(PoolError::InsufficientLiquidity)?
    } else {
        liquidity_gross_before
            .checked_add(liquidity_delta as u128)
            .ok_or(PoolError::TickLiquidityOverflow)?
    };

    if liquidity_gross_after > max_liquidity {
        return Err(PoolError::TickLiquidityOverflow);
    }

    let flipped = (liquidity_gross_after == 0) != (liquidity_gross_before == 0);

    if liquidity_gross_before == 0 {
        // All fee growth so far happened below the current tick by convention
        if tick <= state.tick {
            info.fee_growth_outside_0_x128 = state.fee_growth_global_0_x128.clone();
            info.fee_growth_outside_1_x128 = state.fee_growth_global_1_x128.clone();
        }
        info.initialized = true;
    }

    info.liquidity_gross = liquidity_gross_after;

    // Update liquidity_net (add for lower tick, subtract for upper tick)
    let net = if upper {
        info.liquidity_net.checked_sub(liquidity_delta)
    } else {
        info.liquidity_net.checked_add(liquidity_delta)
    };
    info.liquidity_net = net.ok_or(PoolError::TickLiquidityOverflow)?;

    if liquidity_gross_after == 0 {
        info.initialized = false;
    }

    set_tick(env, key, tick, &info);

    Ok(flipped)
}

/// Get fee growth inside a tick range
pub fn get_fee_growth_inside(
    env: &Env,
    key: &PoolKey,
    tick_lower: i32,
    tick_upper: i32,
    state: &PoolState,
) -> (U256, U256) {
    let lower = get_tick(env, key, tick_lower);
    let upper = get_tick(env, key, tick_upper);
    let global_0 = &state.fee_growth_global_0_x128;
    let global_1 = &state.fee_growth_global_1_x128;

    // Calculate fee growth below
    let (fee_growth_below_0, fee_growth_below_1) = if state.tick >= tick_lower {
        (
            lower.fee_growth_outside_0_x128.clone(),
            lower.fee_growth_outside_1_x128.clone(),
        )
    } else {
        (
            wrapping_sub(env, global_0, &lower.fee_growth_outside_0_x128),
            wrapping_sub(env, global_1, &lower.fee_growth_outside_1_x128),
        )
    };

    // Calculate fee growth above
    let (fee_growth_above_0, fee_growth_above_1) = if state.tick < tick_upper {
        (
            upper.fee_growth_outside_0_x128.clone(),
            upper.fee_growth_outside_1_x128.clone(),
        )
    } else {
        (
            wrapping_sub(env, global_0, &upper.fee_growth_outside_0_x128),
            wrapping_sub(env, global_1, &upper.fee_growth_outside_1_x128),
        )
    };

    // Fee growth inside = global - below - above
    (
        wrapping_sub(
            env,
            &wrapping_sub(env, global_0, &fee_growth_below_0),
            &fee_growth_above_0,
        ),
        wrapping_sub(
            env,
            &wrapping_sub(env, global_1, &fee_growth_below_1),
            &fee_growth_above_1,
        ),
    )
}
