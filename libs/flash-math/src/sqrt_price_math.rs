use crate::full_math::div_rounding_up;
use soroban_sdk::{Env, U256};

fn sorted(a: &U256, b: &U256) -> (U256, U256) {
    if a > b {
        (b.clone(), a.clone())
    } else {
        (a.clone(), b.clone())
    }
}

/// Calculate amount0 delta between two sqrt prices
/// delta_x = L * 2^96 / sqrt_pa - L * 2^96 / sqrt_pb
///
/// Each quotient fits in 256 bits, which a single L * 2^96 * (sqrt_pb - sqrt_pa)
/// product would not once prices use the full 160-bit range.
/// Returns `None` when the amount does not fit in a u128.
pub fn get_amount0_delta(
    env: &Env,
    sqrt_ratio_a_x96: &U256,
    sqrt_ratio_b_x96: &U256,
    liquidity: u128,
    round_up: bool,
) -> Option<u128> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_ratio_lower == U256::from_u32(env, 0) {
        panic!("sqrt_ratio_lower cannot be zero");
    }

    let numerator = U256::from_u128(env, liquidity).shl(96);

    let (at_lower, at_upper) = if round_up {
        (
            div_rounding_up(env, &numerator, &sqrt_ratio_lower),
            numerator.div(&sqrt_ratio_upper),
        )
    } else {
        (
            numerator.div(&sqrt_ratio_lower),
            div_rounding_up(env, &numerator, &sqrt_ratio_upper),
        )
    };

    if at_lower > at_upper {
        at_lower.sub(&at_upper).to_u128()
    } else {
        Some(0)
    }
}

/// Calculate amount1 delta between two sqrt prices
/// delta_y = L * (sqrt_pb - sqrt_pa) / 2^96
/// Returns `None` when the amount does not fit in a u128.
pub fn get_amount1_delta(
    env: &Env,
    sqrt_ratio_a_x96: &U256,
    sqrt_ratio_b_x96: &U256,
    liquidity: u128,
    round_up: bool,
) -> Option<u128> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    // Split the price difference at bit 96 so both partial products stay
    // below 2^256: diff = hi * 2^96 + lo
    let diff = sqrt_ratio_upper.sub(&sqrt_ratio_lower);
    let hi = diff.shr(96);
    let lo = diff.sub(&hi.shl(96));

    let l = U256::from_u128(env, liquidity);
    let low_product = l.mul(&lo);
    let mut result = l.mul(&hi).add(&low_product.shr(96));

    if round_up {
        let remainder = low_product.sub(&low_product.shr(96).shl(96));
        if remainder > U256::from_u32(env, 0) {
            result = result.add(&U256::from_u32(env, 1));
        }
    }

    result.to_u128()
}
