use crate::{Fee, MAX_FEE_PIPS, MAX_TICK_SPACING, MIN_TICK_SPACING};
use soroban_sdk::{contracttype, Address, Env, U256};

/// Canonical pool identity. `currency0` always sorts below `currency1`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolKey {
    /// Lower currency address
    pub currency0: Address,
    /// Higher currency address
    pub currency1: Address,
    /// Fee tier in pips (hundredths of a bp)
    pub fee: u32,
    /// Tick spacing for this pool
    pub tick_spacing: i32,
    /// Optional hook contract, carried as part of the identity only
    pub hooks: Option<Address>,
}

impl PoolKey {
    /// Build the canonical key for a pair, whatever order the currencies come in
    pub fn new(
        currency_a: Address,
        currency_b: Address,
        fee: Fee,
        tick_spacing: i32,
        hooks: Option<Address>,
    ) -> Self {
        let (currency0, currency1) = if currency_a < currency_b {
            (currency_a, currency_b)
        } else {
            (currency_b, currency_a)
        };
        Self {
            currency0,
            currency1,
            fee,
            tick_spacing,
            hooks,
        }
    }

    /// True when the currencies are strictly ordered and fee / spacing are usable
    pub fn is_valid(&self) -> bool {
        self.currency0 < self.currency1
            && self.fee < MAX_FEE_PIPS
            && self.tick_spacing >= MIN_TICK_SPACING
            && self.tick_spacing <= MAX_TICK_SPACING
    }
}

/// Current pool state
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    /// Current sqrt(price) as Q64.96, up to 160 bits
    pub sqrt_price_x96: U256,
    /// Current tick index
    pub tick: i32,
    /// Total liquidity currently in range
    pub liquidity: u128,
    /// Fee growth global for currency0 (Q128.128)
    pub fee_growth_global_0_x128: U256,
    /// Fee growth global for currency1 (Q128.128)
    pub fee_growth_global_1_x128: U256,
}

impl PoolState {
    pub fn new(env: &Env, sqrt_price_x96: U256, tick: i32) -> Self {
        Self {
            sqrt_price_x96,
            tick,
            liquidity: 0,
            fee_growth_global_0_x128: U256::from_u32(env, 0),
            fee_growth_global_1_x128: U256::from_u32(env, 0),
        }
    }
}
