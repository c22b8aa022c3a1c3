use crate::custody::{pull, push};
use crate::deltas::DeltaAccumulator;
use crate::positions::{modify_liquidity, new_position, validate_ticks};
use crate::storage;
use flash_types::{
    Action, DecreaseLiquidityParams, IncreaseLiquidityParams, MintPositionParams, PoolError,
    Position, SettlePairParams, TakePairParams,
};
use soroban_sdk::{contracttype, log, Address, Bytes, Env, Map, Symbol, Val, Vec};

/// A token movement queued during interpretation and run at commit
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenMove {
    /// (currency, payer, amount) pulled into custody
    Pull(Address, Address, i128),
    /// (currency, recipient, amount) paid out of custody
    Push(Address, Address, i128),
}

/// Fail with `Expired` once the ledger is past `deadline`
pub fn check_deadline(env: &Env, deadline: u64) -> Result<(), PoolError> {
    if env.ledger().timestamp() > deadline {
        return Err(PoolError::Expired);
    }
    Ok(())
}

/// Decode every step up front. Nothing is interpreted unless the whole batch is well formed.
pub fn decode(env: &Env, actions: &Bytes, params: &Vec<Val>) -> Result<Vec<Action>, PoolError> {
    if actions.is_empty() || actions.len() != params.len() {
        return Err(PoolError::MalformedBatch);
    }

    let mut decoded = Vec::new(env);
    for (opcode, payload) in actions.iter().zip(params.iter()) {
        let action = Action::decode(env, opcode, &payload).ok_or(PoolError::MalformedBatch)?;
        decoded.push_back(action);
    }
    Ok(decoded)
}

/// Scratch state of one batch.
///
/// Positions, the id counter and token movements are staged here and only
/// reach storage and the ledgers in [`BatchState::commit`].
pub struct BatchState {
    env: Env,
    caller: Address,
    deltas: DeltaAccumulator,
    positions: Map<u32, Position>,
    next_position_id: u32,
    moves: Vec<TokenMove>,
}

impl BatchState {
    pub fn new(env: &Env, caller: Address) -> Self {
        Self {
            env: env.clone(),
            caller,
            deltas: DeltaAccumulator::new(env),
            positions: Map::new(env),
            next_position_id: storage::get_next_position_id(env),
            moves: Vec::new(env),
        }
    }

    pub fn apply(&mut self, action: Action) -> Result<(), PoolError> {
        match action {
            Action::MintPosition(params) => self.mint_position(params),
            Action::IncreaseLiquidity(params) => self.increase_liquidity(params),
            Action::DecreaseLiquidity(params) => self.decrease_liquidity(params),
            Action::SettlePair(params) => self.settle_pair(params),
            Action::TakePair(params) => self.take_pair(params),
        }
    }

    fn mint_position(&mut self, params: MintPositionParams) -> Result<(), PoolError> {
        validate_ticks(params.tick_lower, params.tick_upper)?;
        if params.liquidity == 0 {
            return Err(PoolError::InvalidLiquidity);
        }
        let liquidity_delta =
            i128::try_from(params.liquidity).map_err(|_| PoolError::TickLiquidityOverflow)?;

        let id = self.next_position_id;
        self.next_position_id = id.checked_add(1).ok_or(PoolError::Overflow)?;

        let mut position = new_position(
            &self.env,
            id,
            params.owner,
            params.pool_key,
            params.tick_lower,
            params.tick_upper,
        );
        let change = modify_liquidity(&self.env, &mut position, liquidity_delta)?;

        if change.amount0 > params.amount0_max || change.amount1 > params.amount1_max {
            return Err(PoolError::SlippageExceeded);
        }

        self.deltas
            .add(&position.pool_key.currency0, to_i128(change.amount0)?)?;
        self.deltas
            .add(&position.pool_key.currency1, to_i128(change.amount1)?)?;

        log!(&self.env, "mint position", id, change.amount0, change.amount1);
        self.env.events().publish(
            (Symbol::new(&self.env, "position_minted"),),
            (id, position.owner.clone(), params.liquidity),
        );

        self.positions.set(id, position);
        Ok(())
    }

    fn increase_liquidity(&mut self, params: IncreaseLiquidityParams) -> Result<(), PoolError> {
        let mut position = self.load_owned_position(params.position_id)?;
        if params.liquidity == 0 {
            return Err(PoolError::InvalidLiquidity);
        }
        let liquidity_delta =
            i128::try_from(params.liquidity).map_err(|_| PoolError::TickLiquidityOverflow)?;

        let change = modify_liquidity(&self.env, &mut position, liquidity_delta)?;

        // Accrued fees are netted against what the caller pays in
        let owed0 = net_owed(change.amount0, change.fees0)?;
        let owed1 = net_owed(change.amount1, change.fees1)?;
        if exceeds(owed0, params.amount0_max) || exceeds(owed1, params.amount1_max) {
            return Err(PoolError::SlippageExceeded);
        }

        self.deltas.add(&position.pool_key.currency0, owed0)?;
        self.deltas.add(&position.pool_key.currency1, owed1)?;

        log!(&self.env, "increase liquidity", position.id, owed0, owed1);
        self.env.events().publish(
            (Symbol::new(&self.env, "liquidity_increased"),),
            (position.id, params.liquidity),
        );

        self.positions.set(position.id, position);
        Ok(())
    }

    fn decrease_liquidity(&mut self, params: DecreaseLiquidityParams) -> Result<(), PoolError> {
        let mut position = self.load_owned_position(params.position_id)?;
        if params.liquidity > position.liquidity {
            return Err(PoolError::InsufficientLiquidity);
        }
        let liquidity_delta =
            i128::try_from(params.liquidity).map_err(|_| PoolError::InsufficientLiquidity)?;

        let change = modify_liquidity(&self.env, &mut position, -liquidity_delta)?;

        // Minimums bound the principal only, fees come on top
        if change.amount0 < params.amount0_min || change.amount1 < params.amount1_min {
            return Err(PoolError::SlippageExceeded);
        }

        let total0 = change
            .amount0
            .checked_add(change.fees0)
            .ok_or(PoolError::Overflow)?;
        let total1 = change
            .amount1
            .checked_add(change.fees1)
            .ok_or(PoolError::Overflow)?;

        self.deltas
            .add(&position.pool_key.currency0, -to_i128(total0)?)?;
        self.deltas
            .add(&position.pool_key.currency1, -to_i128(total1)?)?;

        log!(&self.env, "decrease liquidity", position.id, total0, total1);
        self.env.events().publish(
            (Symbol::new(&self.env, "liquidity_decreased"),),
            (position.id, params.liquidity, total0, total1),
        );

        self.positions.set(position.id, position);
        Ok(())
    }

    fn settle_pair(&mut self, params: SettlePairParams) -> Result<(), PoolError> {
        for currency in [params.currency0, params.currency1] {
            let owed = self.deltas.get(&currency);
            if owed > 0 {
                self.deltas.clear(&currency);
                self.moves
                    .push_back(TokenMove::Pull(currency, self.caller.clone(), owed));
            }
        }
        Ok(())
    }

    fn take_pair(&mut self, params: TakePairParams) -> Result<(), PoolError> {
        for currency in [params.currency0, params.currency1] {
            let owed = self.deltas.get(&currency);
            if owed < 0 {
                self.deltas.clear(&currency);
                self.moves
                    .push_back(TokenMove::Push(currency, params.recipient.clone(), -owed));
            }
        }
        Ok(())
    }

    /// Staged copy first, then storage
    fn load_position(&self, id: u32) -> Result<Position, PoolError> {
        self.positions
            .get(id)
            .or_else(|| storage::get_position(&self.env, id))
            .ok_or(PoolError::PositionNotFound)
    }

    fn load_owned_position(&self, id: u32) -> Result<Position, PoolError> {
        let position = self.load_position(id)?;
        if position.owner != self.caller {
            return Err(PoolError::NotPositionOwner);
        }
        Ok(position)
    }

    /// Check every delta is zero, then write staged positions and move tokens
    pub fn commit(self) -> Result<(), PoolError> {
        if let Some((currency, delta)) = self.deltas.first_unsettled() {
            log!(&self.env, "unsettled delta", currency, delta);
            return Err(PoolError::UnsettledDelta);
        }

        for (_, position) in self.positions.iter() {
            storage::set_position(&self.env, &position);
        }
        if self.next_position_id != storage::get_next_position_id(&self.env) {
            storage::set_next_position_id(&self.env, self.next_position_id);
        }

        for movement in self.moves.iter() {
            match movement {
                TokenMove::Pull(currency, payer, amount) => {
                    pull(&self.env, &currency, &payer, amount)?
                }
                TokenMove::Push(currency, recipient, amount) => {
                    push(&self.env, &currency, &recipient, amount)?
                }
            }
        }
        Ok(())
    }
}

fn to_i128(amount: u128) -> Result<i128, PoolError> {
    i128::try_from(amount).map_err(|_| PoolError::Overflow)
}

fn net_owed(amount: u128, fees: u128) -> Result<i128, PoolError> {
    to_i128(amount)?
        .checked_sub(to_i128(fees)?)
        .ok_or(PoolError::Overflow)
}

fn exceeds(owed: i128, max: u128) -> bool {
    owed > 0 && owed.unsigned_abs() > max
}

/// Run one batch end to end
pub fn execute(
    env: &Env,
    caller: Address,
    actions: Bytes,
    params: Vec<Val>,
    deadline: u64,
) -> Result<(), PoolError> {
    check_deadline(env, deadline)?;
    let decoded = decode(env, &actions, &params)?;

    let mut batch = BatchState::new(env, caller);
    for action in decoded.iter() {
        batch.apply(action)?;
    }
    batch.commit()
}
