use crate::custody::pull;
use crate::storage::{get_pool, set_pool};
use flash_math::{fee_growth_delta, wrapping_add};
use flash_types::{PoolError, PoolKey};
use soroban_sdk::{Address, Env, Symbol};

/// Pay `amount0` / `amount1` to the liquidity currently in range.
///
/// The tokens are pulled from `payer` straight away and show up as fees on
/// every in-range position, pro rata to liquidity.
pub fn donate(
    env: &Env,
    payer: &Address,
    key: &PoolKey,
    amount0: u128,
    amount1: u128,
) -> Result<(), PoolError> {
    let mut state = get_pool(env, key).ok_or(PoolError::PoolNotInitialized)?;
    if state.liquidity == 0 {
        return Err(PoolError::NoLiquidity);
    }

    let amount0_i = i128::try_from(amount0).map_err(|_| PoolError::Overflow)?;
    let amount1_i = i128::try_from(amount1).map_err(|_| PoolError::Overflow)?;

    if amount0 > 0 {
        state.fee_growth_global_0_x128 = wrapping_add(
            env,
            &state.fee_growth_global_0_x128,
            &fee_growth_delta(env, amount0, state.liquidity),
        );
    }
    if amount1 > 0 {
        state.fee_growth_global_1_x128 = wrapping_add(
            env,
            &state.fee_growth_global_1_x128,
            &fee_growth_delta(env, amount1, state.liquidity),
        );
    }
    set_pool(env, key, &state);

    pull(env, &key.currency0, payer, amount0_i)?;
    pull(env, &key.currency1, payer, amount1_i)?;

    env.events().publish(
        (Symbol::new(env, "donate"),),
        (key.clone(), payer.clone(), amount0, amount1),
    );

    Ok(())
}
