use flash_types::{PoolError, TokenError};
use soroban_sdk::{Address, Env, IntoVal, Symbol, Val, Vec};

/// Pull `amount` of `currency` from `payer` into the manager's custody.
/// The payer must have approved the manager for at least `amount`.
pub fn pull(env: &Env, currency: &Address, payer: &Address, amount: i128) -> Result<(), PoolError> {
    if amount == 0 {
        return Ok(());
    }
    let custody = env.current_contract_address();
    invoke_ledger(
        env,
        currency,
        "transfer_from",
        (custody.clone(), payer.clone(), custody, amount).into_val(env),
    )
}

/// Pay `amount` of `currency` out of custody to `recipient`
pub fn push(
    env: &Env,
    currency: &Address,
    recipient: &Address,
    amount: i128,
) -> Result<(), PoolError> {
    if amount == 0 {
        return Ok(());
    }
    invoke_ledger(
        env,
        currency,
        "transfer",
        (env.current_contract_address(), recipient.clone(), amount).into_val(env),
    )
}

fn invoke_ledger(env: &Env, currency: &Address, func: &str, args: Vec<Val>) -> Result<(), PoolError> {
    match env.try_invoke_contract::<(), TokenError>(currency, &Symbol::new(env, func), args) {
        Ok(Ok(())) => Ok(()),
        Err(Ok(err)) => Err(err.into()),
        // Not a ledger we understand, or it trapped
        Ok(Err(_)) | Err(Err(_)) => Err(PoolError::TokenCallFailed),
    }
}
