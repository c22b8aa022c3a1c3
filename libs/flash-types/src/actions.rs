use crate::PoolKey;
use soroban_sdk::{contracttype, Address, Bytes, Env, IntoVal, TryFromVal, Val, Vec};

// Opcodes, one byte each
pub const INCREASE_LIQUIDITY: u8 = 0x00;
pub const DECREASE_LIQUIDITY: u8 = 0x01;
pub const MINT_POSITION: u8 = 0x02;
pub const SETTLE_PAIR: u8 = 0x0d;
pub const TAKE_PAIR: u8 = 0x11;

/// Mint a new position
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintPositionParams {
    pub pool_key: PoolKey,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity: u128,
    pub amount0_max: u128,
    pub amount1_max: u128,
    pub owner: Address,
    pub hook_data: Bytes,
}

/// Add liquidity to an existing position
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IncreaseLiquidityParams {
    pub position_id: u32,
    pub liquidity: u128,
    pub amount0_max: u128,
    pub amount1_max: u128,
    pub hook_data: Bytes,
}

/// Remove liquidity from a position. `liquidity = 0` only collects fees.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecreaseLiquidityParams {
    pub position_id: u32,
    pub liquidity: u128,
    pub amount0_min: u128,
    pub amount1_min: u128,
    pub hook_data: Bytes,
}

/// Pay everything the caller owes in both currencies
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettlePairParams {
    pub currency0: Address,
    pub currency1: Address,
}

/// Withdraw everything the pool owes in both currencies
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TakePairParams {
    pub currency0: Address,
    pub currency1: Address,
    pub recipient: Address,
}

/// A decoded batch step
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    IncreaseLiquidity(IncreaseLiquidityParams),
    DecreaseLiquidity(DecreaseLiquidityParams),
    MintPosition(MintPositionParams),
    SettlePair(SettlePairParams),
    TakePair(TakePairParams),
}

impl Action {
    pub fn opcode(&self) -> u8 {
        match self {
            Action::IncreaseLiquidity(_) => INCREASE_LIQUIDITY,
            Action::DecreaseLiquidity(_) => DECREASE_LIQUIDITY,
            Action::MintPosition(_) => MINT_POSITION,
            Action::SettlePair(_) => SETTLE_PAIR,
            Action::TakePair(_) => TAKE_PAIR,
        }
    }

    /// Decode one parameter block for `opcode`.
    /// Returns None for an unknown opcode or a payload of any other shape.
    pub fn decode(env: &Env, opcode: u8, payload: &Val) -> Option<Action> {
        match opcode {
            INCREASE_LIQUIDITY => IncreaseLiquidityParams::try_from_val(env, payload)
                .ok()
                .map(Action::IncreaseLiquidity),
            DECREASE_LIQUIDITY => DecreaseLiquidityParams::try_from_val(env, payload)
                .ok()
                .map(Action::DecreaseLiquidity),
            MINT_POSITION => MintPositionParams::try_from_val(env, payload)
                .ok()
                .map(Action::MintPosition),
            SETTLE_PAIR => SettlePairParams::try_from_val(env, payload)
                .ok()
                .map(Action::SettlePair),
            TAKE_PAIR => TakePairParams::try_from_val(env, payload)
                .ok()
                .map(Action::TakePair),
            _ => None,
        }
    }

    /// Encode the parameter block (without the opcode)
    pub fn encode(&self, env: &Env) -> Val {
        match self {
            Action::IncreaseLiquidity(params) => params.clone().into_val(env),
            Action::DecreaseLiquidity(params) => params.clone().into_val(env),
            Action::MintPosition(params) => params.clone().into_val(env),
            Action::SettlePair(params) => params.clone().into_val(env),
            Action::TakePair(params) => params.clone().into_val(env),
        }
    }
}

/// Builds the `(opcodes, params)` pair accepted by the pool manager's `execute`
pub struct ActionPlan {
    env: Env,
    actions: Bytes,
    params: Vec<Val>,
}

impl ActionPlan {
    pub fn new(env: &Env) -> Self {
        Self {
            env: env.clone(),
            actions: Bytes::new(env),
            params: Vec::new(env),
        }
    }

    pub fn add(mut self, action: Action) -> Self {
        self.actions.push_back(action.opcode());
        self.params.push_back(action.encode(&self.env));
        self
    }

    pub fn len(&self) -> u32 {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn finalize(self) -> (Bytes, Vec<Val>) {
        (self.actions, self.params)
    }
}
