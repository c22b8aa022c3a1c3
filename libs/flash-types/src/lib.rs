#![no_std]

mod actions;
mod error;
mod pool;
mod position;
mod tick;

pub use actions::*;
pub use error::*;
pub use pool::*;
pub use position::*;
pub use tick::*;

/// Q96 constant (2^96) for fixed-point math
pub const Q96: u128 = 1 << 96;

/// Minimum tick index, the lowest tick representable at tick spacing 1
pub const MIN_TICK: i32 = -887272;

/// Maximum tick index
pub const MAX_TICK: i32 = 887272;

/// Minimum sqrt price (at MIN_TICK) as Q64.96
pub const MIN_SQRT_RATIO: u128 = 4295128739;

/// Upper 32 bits of the maximum sqrt price (at MAX_TICK).
/// The full value is 1461446703485210103287273052203988822378723970342
/// and needs 160 bits, see `flash_math::max_sqrt_ratio`.
pub const MAX_SQRT_RATIO_HI: u64 = 0xfffd8963;
pub const MAX_SQRT_RATIO_MID: u64 = 0xefd1fc6a50648849;
pub const MAX_SQRT_RATIO_LO: u64 = 0x5d951d5263988d26;

/// Fee amount in hundredths of a basis point (1e-6)
/// 500 = 0.05%, 3000 = 0.3%, 10000 = 1%
pub type Fee = u32;

/// Fees are expressed in pips and must stay below 100%
pub const MAX_FEE_PIPS: Fee = 1_000_000;

pub const MIN_TICK_SPACING: i32 = 1;
pub const MAX_TICK_SPACING: i32 = 16384;

/// Calculate maximum liquidity per tick for a given tick spacing
pub fn max_liquidity_per_tick(tick_spacing: i32) -> u128 {
    let min_tick = (MIN_TICK / tick_spacing) * tick_spacing;
    let max_tick = (MAX_TICK / tick_spacing) * tick_spacing;
    let num_ticks = ((max_tick - min_tick) / tick_spacing) as u128 + 1;
    u128::MAX / num_ticks
}
