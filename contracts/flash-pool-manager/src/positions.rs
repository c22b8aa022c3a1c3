use crate::storage::{get_pool, set_pool};
use crate::tick::{get_fee_growth_inside, update as update_tick};
use flash_math::{add_delta, fees_owed, get_amounts_for_liquidity, get_sqrt_ratio_at_tick};
use flash_types::{max_liquidity_per_tick, PoolError, PoolKey, Position, MAX_TICK, MIN_TICK};
use soroban_sdk::{Address, Env, U256};

/// Token amounts moved by one liquidity change
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LiquidityChange {
    /// Principal paid in (adding) or released (removing), currency0
    pub amount0: u128,
    /// Principal paid in (adding) or released (removing), currency1
    pub amount1: u128,
    /// Fees accrued since the position was last touched, currency0
    pub fees0: u128,
    /// Fees accrued since the position was last touched, currency1
    pub fees1: u128,
}

/// Validate tick parameters
pub fn validate_ticks(tick_lower: i32, tick_upper: i32) -> Result<(), PoolError> {
    if tick_lower >= tick_upper || tick_lower < MIN_TICK || tick_upper > MAX_TICK {
        return Err(PoolError::InvalidTickRange);
    }
    Ok(())
}

/// A fresh, empty position for `owner`. Liquidity is added with [`modify_liquidity`].
pub fn new_position(
    env: &Env,
    id: u32,
    owner: Address,
    pool_key: PoolKey,
    tick_lower: i32,
    tick_upper: i32,
) -> Position {
    Position {
        id,
        owner,
        pool_key,
        tick_lower,
        tick_upper,
        liquidity: 0,
        fee_growth_inside_0_last_x128: U256::from_u32(env, 0),
        fee_growth_inside_1_last_x128: U256::from_u32(env, 0),
    }
}

/// Apply `liquidity_delta` to a position and its pool.
///
/// Ticks and pool liquidity are written to storage; the position itself is
/// only updated in memory and must be persisted by the caller. Amounts are
/// rounded up when liquidity is added and down when it is removed. Amounts or
/// fees too large for a u128 fail with `Overflow`.
pub fn modify_liquidity(
    env: &Env,
    position: &mut Position,
    liquidity_delta: i128,
) -> Result<LiquidityChange, PoolError> {
    if liquidity_delta < 0 && liquidity_delta.unsigned_abs() > position.liquidity {
        return Err(PoolError::InsufficientLiquidity);
    }

    let key = position.pool_key.clone();
    let mut state = get_pool(env, &key).ok_or(PoolError::PoolNotInitialized)?;

    // Tick and pool writes are not staged. A batch that fails later is undone
    // by the host discarding the whole invocation.
    if liquidity_delta != 0 {
        let max_liquidity = max_liquidity_per_tick(key.tick_spacing);
        update_tick(
            env,
            &key,
            position.tick_lower,
            &state,
            liquidity_delta,
            false, // lower tick
            max_liquidity,
        )?;
        update_tick(
            env,
            &key,
            position.tick_upper,
            &state,
            liquidity_delta,
            true, // upper tick
            max_liquidity,
        )?;

        // Update liquidity if position is in range
        if state.tick >= position.tick_lower && state.tick < position.tick_upper {
            state.liquidity = add_delta(state.liquidity, liquidity_delta);
            set_pool(env, &key, &state);
        }
    }

    let (fee_growth_inside_0, fee_growth_inside_1) =
        get_fee_growth_inside(env, &key, position.tick_lower, position.tick_upper, &state);

    // Fees earned since last update, at the liquidity held over that period
    let fees0 = fees_owed(
        env,
        &fee_growth_inside_0,
        &position.fee_growth_inside_0_last_x128,
        position.liquidity,
    )
    .ok_or(PoolError::Overflow)?;
    let fees1 = fees_owed(
        env,
        &fee_growth_inside_1,
        &position.fee_growth_inside_1_last_x128,
        position.liquidity,
    )
    .ok_or(PoolError::Overflow)?;

    position.liquidity = add_delta(position.liquidity, liquidity_delta);
    position.fee_growth_inside_0_last_x128 = fee_growth_inside_0;
    position.fee_growth_inside_1_last_x128 = fee_growth_inside_1;

    let (amount0, amount1) = if liquidity_delta == 0 {
        (0, 0)
    } else {
        get_amounts_for_liquidity(
            env,
            &state.sqrt_price_x96,
            &get_sqrt_ratio_at_tick(env, position.tick_lower),
            &get_sqrt_ratio_at_tick(env, position.tick_upper),
            liquidity_delta.unsigned_abs(),
            liquidity_delta > 0,
        )
        .ok_or(PoolError::Overflow)?
    };

    Ok(LiquidityChange {
        amount0,
        amount1,
        fees0,
        fees1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::initialize_pool;
    use crate::storage::get_tick;
    use crate::FlashPoolManager;
    use flash_types::Q96;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::{Address, Env};

    const L: u128 = 1_000_000_000_000_000_000;

    fn setup(env: &Env) -> (Address, PoolKey) {
        let contract_id = env.register(FlashPoolManager, ());
        let key = PoolKey::new(
            Address::generate(env),
            Address::generate(env),
            3000,
            60,
            None,
        );
        env.as_contract(&contract_id, || {
            initialize_pool(env, &key, U256::from_u128(env, Q96)).unwrap();
        });
        (contract_id, key)
    }

    #[test]
    fn test_validate_ticks() {
        assert_eq!(validate_ticks(-887272, 887272), Ok(()));
        assert_eq!(validate_ticks(-60, 60), Ok(()));
        assert_eq!(validate_ticks(60, 60), Err(PoolError::InvalidTickRange));
        assert_eq!(validate_ticks(120, 60), Err(PoolError::InvalidTickRange));
        assert_eq!(validate_ticks(MIN_TICK - 1, 0), Err(PoolError::InvalidTickRange));
        assert_eq!(validate_ticks(0, MAX_TICK + 1), Err(PoolError::InvalidTickRange));
    }

    #[test]
    fn test_add_full_range_liquidity() {
        let env = Env::default();
        let (contract_id, key) = setup(&env);
        let owner = Address::generate(&env);

        env.as_contract(&contract_id, || {
            let mut position = new_position(&env, 1, owner, key.clone(), MIN_TICK, MAX_TICK);
            let change = modify_liquidity(&env, &mut position, L as i128).unwrap();

            assert_eq!(change.amount0, L);
            assert_eq!(change.amount1, L);
            assert_eq!((change.fees0, change.fees1), (0, 0));
            assert_eq!(position.liquidity, L);

            let state = get_pool(&env, &key).unwrap();
            assert_eq!(state.liquidity, L);
            assert_eq!(get_tick(&env, &key, MIN_TICK).liquidity_net, L as i128);
            assert_eq!(get_tick(&env, &key, MAX_TICK).liquidity_net, -(L as i128));
        });
    }

    #[test]
    fn test_remove_rounds_down() {
        let env = Env::default();
        let (contract_id, key) = setup(&env);
        let owner = Address::generate(&env);

        env.as_contract(&contract_id, || {
            let mut position = new_position(&env, 1, owner, key.clone(), MIN_TICK, MAX_TICK);
            modify_liquidity(&env, &mut position, L as i128).unwrap();

            let change = modify_liquidity(&env, &mut position, -(L as i128)).unwrap();
            assert_eq!(change.amount0, L - 1);
            assert_eq!(change.amount1, L - 1);
            assert_eq!(position.liquidity, 0);
            assert_eq!(get_pool(&env, &key).unwrap().liquidity, 0);
            assert!(!get_tick(&env, &key, MIN_TICK).initialized);
        });
    }

    #[test]
    fn test_remove_more_than_held() {
        let env = Env::default();
        let (contract_id, key) = setup(&env);
        let owner = Address::generate(&env);
        let other = Address::generate(&env);

        env.as_contract(&contract_id, || {
            // Another position keeps the ticks populated
            let mut big = new_position(&env, 1, other, key.clone(), -600, 600);
            modify_liquidity(&env, &mut big, 1000).unwrap();

            let mut small = new_position(&env, 2, owner, key.clone(), -600, 600);
            modify_liquidity(&env, &mut small, 10).unwrap();

            assert_eq!(
                modify_liquidity(&env, &mut small, -11),
                Err(PoolError::InsufficientLiquidity)
            );
        });
    }

    #[test]
    fn test_out_of_range_position_leaves_pool_liquidity() {
        let env = Env::default();
        let (contract_id, key) = setup(&env);
        let owner = Address::generate(&env);

        env.as_contract(&contract_id, || {
            let mut position = new_position(&env, 1, owner, key.clone(), 600, 1200);
            let change = modify_liquidity(&env, &mut position, 1_000_000).unwrap();

            // Above the current price the range is all currency0
            assert!(change.amount0 > 0);
            assert_eq!(change.amount1, 0);
            assert_eq!(get_pool(&env, &key).unwrap().liquidity, 0);
        });
    }

    #[test]
    fn test_uninitialized_pool() {
        let env = Env::default();
        let (contract_id, key) = setup(&env);
        let owner = Address::generate(&env);
        let other_key = PoolKey::new(key.currency0.clone(), key.currency1.clone(), 500, 10, None);

        env.as_contract(&contract_id, || {
            let mut position = new_position(&env, 1, owner, other_key, -60, 60);
            assert_eq!(
                modify_liquidity(&env, &mut position, 100),
                Err(PoolError::PoolNotInitialized)
            );
        });
    }

    #[test]
    fn test_amount_too_large_is_overflow() {
        let env = Env::default();
        let contract_id = env.register(FlashPoolManager, ());
        let key = PoolKey::new(
            Address::generate(&env),
            Address::generate(&env),
            3000,
            60,
            None,
        );
        let owner = Address::generate(&env);

        env.as_contract(&contract_id, || {
            initialize_pool(&env, &key, flash_math::min_sqrt_ratio(&env)).unwrap();

            // At the lowest price a full range position is all currency0, about 2^130
            let mut position = new_position(&env, 1, owner, key.clone(), MIN_TICK, MAX_TICK);
            assert_eq!(
                modify_liquidity(&env, &mut position, 100_000_000_000_000_000_000),
                Err(PoolError::Overflow)
            );
        });
    }
}
