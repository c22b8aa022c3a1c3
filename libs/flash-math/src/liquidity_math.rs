use crate::full_math::{mul_div, q128, wrapping_sub};
use crate::sqrt_price_math::{get_amount0_delta, get_amount1_delta};
use soroban_sdk::{Env, U256};

/// Get amounts from liquidity for a price range.
///
/// Callers round up when the pool receives tokens and down when it pays out.
/// Returns `None` when either amount does not fit in a u128.
pub fn get_amounts_for_liquidity(
    env: &Env,
    sqrt_ratio_x96: &U256,
    sqrt_ratio_a_x96: &U256,
    sqrt_ratio_b_x96: &U256,
    liquidity: u128,
    round_up: bool,
) -> Option<(u128, u128)> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    };

    if sqrt_ratio_x96 <= sqrt_ratio_lower {
        // Below range - all token0
        let amount0 =
            get_amount0_delta(env, sqrt_ratio_lower, sqrt_ratio_upper, liquidity, round_up)?;
        Some((amount0, 0))
    } else if sqrt_ratio_x96 < sqrt_ratio_upper {
        // In range - both tokens
        let amount0 =
            get_amount0_delta(env, sqrt_ratio_x96, sqrt_ratio_upper, liquidity, round_up)?;
        let amount1 =
            get_amount1_delta(env, sqrt_ratio_lower, sqrt_ratio_x96, liquidity, round_up)?;
        Some((amount0, amount1))
    } else {
        // Above range - all token1
        let amount1 =
            get_amount1_delta(env, sqrt_ratio_lower, sqrt_ratio_upper, liquidity, round_up)?;
        Some((0, amount1))
    }
}

/// Add signed liquidity delta to unsigned liquidity
pub fn add_delta(liquidity: u128, delta: i128) -> u128 {
    if delta < 0 {
        match liquidity.checked_sub(delta.unsigned_abs()) {
            Some(result) => result,
            None => panic!("Liquidity underflow"),
        }
    } else {
        match liquidity.checked_add(delta as u128) {
            Some(result) => result,
            None => panic!("Liquidity overflow"),
        }
    }
}

/// Fee growth per unit of liquidity for `amount` spread over `liquidity`, in Q128
pub fn fee_growth_delta(env: &Env, amount: u128, liquidity: u128) -> U256 {
    mul_div(
        env,
        &U256::from_u128(env, amount),
        &q128(env),
        &U256::from_u128(env, liquidity),
    )
}

/// Tokens earned by `liquidity` while fee growth inside moved from `last` to `now`.
/// Returns `None` when the fees do not fit in a u128.
pub fn fees_owed(env: &Env, now_x128: &U256, last_x128: &U256, liquidity: u128) -> Option<u128> {
    if liquidity == 0 {
        return Some(0);
    }
    let growth = wrapping_sub(env, now_x128, last_x128);

    // growth * L / 2^128 with growth = hi * 2^128 + lo, so no product exceeds 256 bits
    let l = U256::from_u128(env, liquidity);
    let hi = growth.shr(128);
    let lo = growth.sub(&hi.shl(128));
    hi.mul(&l).add(&lo.mul(&l).shr(128)).to_u128()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tick_math::{get_sqrt_ratio_at_tick, max_sqrt_ratio, min_sqrt_ratio};
    use flash_types::Q96;
    use soroban_sdk::Env;

    fn u(env: &Env, v: u128) -> U256 {
        U256::from_u128(env, v)
    }

    // === add_delta tests ===

    #[test]
    fn test_add_delta_positive() {
        assert_eq!(add_delta(100, 50), 150);
    }

    #[test]
    fn test_add_delta_negative() {
        assert_eq!(add_delta(100, -50), 50);
    }

    #[test]
    fn test_add_delta_to_zero() {
        assert_eq!(add_delta(100, -100), 0);
    }

    #[test]
    fn test_add_delta_max_i128() {
        assert_eq!(add_delta(0, i128::MAX), i128::MAX as u128);
    }

    #[test]
    fn test_add_delta_min_i128() {
        let start = 1u128 << 127;
        assert_eq!(add_delta(start, i128::MIN), 0);
    }

    #[test]
    #[should_panic(expected = "Liquidity underflow")]
    fn test_add_delta_underflow() {
        add_delta(50, -100);
    }

    #[test]
    #[should_panic(expected = "Liquidity overflow")]
    fn test_add_delta_overflow() {
        add_delta(u128::MAX, 1);
    }

    // === get_amounts_for_liquidity tests ===

    #[test]
    fn test_get_amounts_for_liquidity_in_range() {
        let env = Env::default();
        let sqrt_price = u(&env, Q96);
        let sqrt_lower = get_sqrt_ratio_at_tick(&env, -600);
        let sqrt_upper = get_sqrt_ratio_at_tick(&env, 600);

        let (amount0, amount1) = get_amounts_for_liquidity(
            &env,
            &sqrt_price,
            &sqrt_lower,
            &sqrt_upper,
            1_000_000_000_000,
            false,
        )
        .unwrap();

        assert!(amount0 > 0, "amount0 should be > 0 in range");
        assert!(amount1 > 0, "amount1 should be > 0 in range");
    }

    #[test]
    fn test_get_amounts_for_liquidity_below_range() {
        let env = Env::default();
        let sqrt_price = get_sqrt_ratio_at_tick(&env, -1200);
        let sqrt_lower = get_sqrt_ratio_at_tick(&env, -600);
        let sqrt_upper = get_sqrt_ratio_at_tick(&env, 600);

        let (amount0, amount1) = get_amounts_for_liquidity(
            &env,
            &sqrt_price,
            &sqrt_lower,
            &sqrt_upper,
            1_000_000_000_000,
            true,
        )
        .unwrap();

        assert!(amount0 > 0, "amount0 should be > 0 below range");
        assert_eq!(amount1, 0, "amount1 should be 0 below range");
    }

    #[test]
    fn test_get_amounts_for_liquidity_above_range() {
        let env = Env::default();
        let sqrt_price = get_sqrt_ratio_at_tick(&env, 1200);
        let sqrt_lower = get_sqrt_ratio_at_tick(&env, -600);
        let sqrt_upper = get_sqrt_ratio_at_tick(&env, 600);

        let (amount0, amount1) = get_amounts_for_liquidity(
            &env,
            &sqrt_price,
            &sqrt_lower,
            &sqrt_upper,
            1_000_000_000_000,
            true,
        )
        .unwrap();

        assert_eq!(amount0, 0, "amount0 should be 0 above range");
        assert!(amount1 > 0, "amount1 should be > 0 above range");
    }

    #[test]
    fn test_get_amounts_for_liquidity_at_upper_boundary() {
        let env = Env::default();
        let sqrt_lower = get_sqrt_ratio_at_tick(&env, -600);
        let sqrt_upper = get_sqrt_ratio_at_tick(&env, 600);

        // At the upper bound the position is entirely token1
        let (amount0, amount1) =
            get_amounts_for_liquidity(&env, &sqrt_upper, &sqrt_lower, &sqrt_upper, 1_000_000, true)
                .unwrap();
        assert_eq!(amount0, 0);
        assert!(amount1 > 0);
    }

    #[test]
    fn test_get_amounts_full_range_at_parity() {
        let env = Env::default();
        let liquidity = 1_000_000_000_000_000_000u128;

        let (amount0, amount1) = get_amounts_for_liquidity(
            &env,
            &u(&env, Q96),
            &min_sqrt_ratio(&env),
            &max_sqrt_ratio(&env),
            liquidity,
            true,
        )
        .unwrap();
        assert_eq!(amount0, liquidity);
        assert_eq!(amount1, liquidity);

        // Paying out never exceeds what was paid in
        let (out0, out1) = get_amounts_for_liquidity(
            &env,
            &u(&env, Q96),
            &min_sqrt_ratio(&env),
            &max_sqrt_ratio(&env),
            liquidity,
            false,
        )
        .unwrap();
        assert!(out0 <= amount0);
        assert!(out1 <= amount1);
    }

    #[test]
    fn test_get_amounts_for_zero_liquidity() {
        let env = Env::default();
        let amounts = get_amounts_for_liquidity(
            &env,
            &u(&env, Q96),
            &min_sqrt_ratio(&env),
            &max_sqrt_ratio(&env),
            0,
            true,
        );
        assert_eq!(amounts, Some((0, 0)));
    }

    #[test]
    fn test_get_amounts_too_large_for_u128() {
        let env = Env::default();
        // Below range at the minimum price, all token0: around 2^130
        let amounts = get_amounts_for_liquidity(
            &env,
            &min_sqrt_ratio(&env),
            &min_sqrt_ratio(&env),
            &max_sqrt_ratio(&env),
            100_000_000_000_000_000_000,
            true,
        );
        assert_eq!(amounts, None);
    }

    // === fee accounting tests ===

    #[test]
    fn test_fee_growth_and_fees_owed() {
        let env = Env::default();
        let zero = u(&env, 0);

        // 1000 tokens over 1000 units of liquidity is exactly 1 token per unit
        let growth = fee_growth_delta(&env, 1000, 1000);
        assert_eq!(growth, q128(&env));
        assert_eq!(fees_owed(&env, &growth, &zero, 250), Some(250));
    }

    #[test]
    fn test_fees_owed_rounds_down() {
        let env = Env::default();
        let zero = u(&env, 0);

        let growth = fee_growth_delta(&env, 10, 3);
        assert_eq!(fees_owed(&env, &growth, &zero, 1), Some(3));
        assert_eq!(fees_owed(&env, &growth, &zero, 3), Some(9));
    }

    #[test]
    fn test_fees_owed_across_wrap() {
        let env = Env::default();
        let last = crate::full_math::u256_max(&env);
        // one full unit past a wrapped accumulator
        let now = q128(&env).sub(&u(&env, 1));
        assert_eq!(fees_owed(&env, &now, &last, 5), Some(5));
    }

    #[test]
    fn test_fees_owed_zero_liquidity() {
        let env = Env::default();
        assert_eq!(fees_owed(&env, &q128(&env), &u(&env, 0), 0), Some(0));
    }

    #[test]
    fn test_fees_owed_large_growth() {
        let env = Env::default();
        let zero = u(&env, 0);
        // 2^100 tokens per unit over 2^20 units
        let growth = q128(&env).shl(100);
        assert_eq!(fees_owed(&env, &growth, &zero, 1 << 20), Some(1u128 << 120));
        // 2^100 per unit over 2^40 units no longer fits
        assert_eq!(fees_owed(&env, &growth, &zero, 1 << 40), None);
    }
}
