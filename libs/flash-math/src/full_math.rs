use soroban_sdk::{Env, U256};

/// 2^128 as U256
pub fn q128(env: &Env) -> U256 {
    U256::from_u32(env, 1).shl(128)
}

/// 2^256 - 1
pub fn u256_max(env: &Env) -> U256 {
    U256::from_parts(env, u64::MAX, u64::MAX, u64::MAX, u64::MAX)
}

/// Multiply and divide with 256-bit intermediate precision (rounds down)
/// Returns (a * b) / denominator. The product must fit in 256 bits.
pub fn mul_div(env: &Env, a: &U256, b: &U256, denominator: &U256) -> U256 {
    if *denominator == U256::from_u32(env, 0) {
        panic!("Division by zero");
    }
    a.mul(b).div(denominator)
}

/// Unsigned division with rounding up
pub fn div_rounding_up(env: &Env, a: &U256, b: &U256) -> U256 {
    let zero = U256::from_u32(env, 0);
    if *b == zero {
        panic!("Division by zero");
    }

    let result = a.div(b);
    if a.rem_euclid(b) > zero {
        result.add(&U256::from_u32(env, 1))
    } else {
        result
    }
}

/// a - b modulo 2^256. Fee growth accumulators rely on wrap-around.
pub fn wrapping_sub(env: &Env, a: &U256, b: &U256) -> U256 {
    if a >= b {
        a.sub(b)
    } else {
        // (2^256 - 1 - b) + a + 1, never exceeds 2^256 - 1 since a < b
        u256_max(env).sub(b).add(a).add(&U256::from_u32(env, 1))
    }
}

/// a + b modulo 2^256
pub fn wrapping_add(env: &Env, a: &U256, b: &U256) -> U256 {
    let headroom = u256_max(env).sub(a);
    if *b <= headroom {
        a.add(b)
    } else {
        b.sub(&headroom).sub(&U256::from_u32(env, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    fn u(env: &Env, v: u128) -> U256 {
        U256::from_u128(env, v)
    }

    // === mul_div tests ===

    #[test]
    fn test_mul_div_basic() {
        let env = Env::default();
        // Basic test: (10 * 20) / 5 = 40
        assert_eq!(mul_div(&env, &u(&env, 10), &u(&env, 20), &u(&env, 5)), u(&env, 40));
    }

    #[test]
    fn test_mul_div_phantom_overflow() {
        let env = Env::default();
        // (MAX * MAX) / MAX = MAX, the product only fits in 256 bits
        let max = u(&env, u128::MAX);
        assert_eq!(mul_div(&env, &max, &max, &max), max);
    }

    #[test]
    fn test_mul_div_rounds_down() {
        let env = Env::default();
        assert_eq!(mul_div(&env, &u(&env, 3), &u(&env, 1), &u(&env, 2)), u(&env, 1));
        assert_eq!(mul_div(&env, &u(&env, 5), &u(&env, 1), &u(&env, 3)), u(&env, 1));
    }

    #[test]
    #[should_panic(expected = "Division by zero")]
    fn test_mul_div_zero_denominator() {
        let env = Env::default();
        mul_div(&env, &u(&env, 10), &u(&env, 20), &u(&env, 0));
    }

    // === div_rounding_up tests ===

    #[test]
    fn test_div_rounding_up() {
        let env = Env::default();
        assert_eq!(div_rounding_up(&env, &u(&env, 9), &u(&env, 3)), u(&env, 3));
        assert_eq!(div_rounding_up(&env, &u(&env, 10), &u(&env, 3)), u(&env, 4));
        assert_eq!(div_rounding_up(&env, &u(&env, 0), &u(&env, 5)), u(&env, 0));
    }

    #[test]
    #[should_panic(expected = "Division by zero")]
    fn test_div_rounding_up_zero_denominator() {
        let env = Env::default();
        div_rounding_up(&env, &u(&env, 10), &u(&env, 0));
    }

    // === wrapping_sub tests ===

    #[test]
    fn test_wrapping_sub_no_wrap() {
        let env = Env::default();
        assert_eq!(wrapping_sub(&env, &u(&env, 10), &u(&env, 3)), u(&env, 7));
    }

    #[test]
    fn test_wrapping_sub_wraps_and_recovers() {
        let env = Env::default();
        let a = u(&env, 3);
        let b = u(&env, 10);

        let wrapped = wrapping_sub(&env, &a, &b);
        assert_eq!(wrapped, u256_max(&env).sub(&u(&env, 6)));

        // 0 - (3 - 10) == 7 modulo 2^256
        assert_eq!(wrapping_sub(&env, &u(&env, 0), &wrapped), u(&env, 7));
    }

    #[test]
    fn test_wrapping_add() {
        let env = Env::default();
        assert_eq!(wrapping_add(&env, &u(&env, 2), &u(&env, 3)), u(&env, 5));
        assert_eq!(
            wrapping_add(&env, &u256_max(&env), &u(&env, 1)),
            u(&env, 0)
        );
        assert_eq!(
            wrapping_add(&env, &u256_max(&env).sub(&u(&env, 1)), &u(&env, 10)),
            u(&env, 8)
        );
    }

    #[test]
    fn test_q_constants() {
        let env = Env::default();
        assert_eq!(q128(&env), u(&env, 1u128 << 64).mul(&u(&env, 1u128 << 64)));
    }
}
