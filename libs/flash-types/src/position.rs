use crate::PoolKey;
use soroban_sdk::{contracttype, Address, U256};

/// A liquidity position held by the pool manager
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    /// Position id, assigned from 1 upwards
    pub id: u32,
    /// Address the position was minted for
    pub owner: Address,
    /// Pool the liquidity sits in
    pub pool_key: PoolKey,
    /// Lower tick boundary
    pub tick_lower: i32,
    /// Upper tick boundary
    pub tick_upper: i32,
    /// Liquidity amount, may reach zero
    pub liquidity: u128,
    /// Fee growth inside at last action (currency0)
    pub fee_growth_inside_0_last_x128: U256,
    /// Fee growth inside at last action (currency1)
    pub fee_growth_inside_1_last_x128: U256,
}
