#![no_std]

use flash_types::TokenError;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String, Symbol};

#[contract]
pub struct FlashToken;

/// Storage keys for the token contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Display decimals, also marks the token initialized (Instance storage)
    Decimals,
    /// Token name (Instance storage)
    Name,
    /// Token symbol (Instance storage)
    Symbol,
    /// Sum of all balances (Instance storage)
    TotalSupply,
    /// Account -> balance (Persistent storage)
    Balance(Address),
    /// (owner, spender) -> allowance (Persistent storage)
    Allowance(Address, Address),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

#[contractimpl]
impl FlashToken {
    /// Set token metadata once
    pub fn initialize(
        env: Env,
        decimals: u32,
        name: String,
        symbol: String,
    ) -> Result<(), TokenError> {
        if env.storage().instance().has(&DataKey::Decimals) {
            return Err(TokenError::AlreadyInitialized);
        }

        let storage = env.storage().instance();
        storage.set(&DataKey::Decimals, &decimals);
        storage.set(&DataKey::Name, &name);
        storage.set(&DataKey::Symbol, &symbol);
        storage.set(&DataKey::TotalSupply, &0i128);
        extend_instance_ttl(&env);

        Ok(())
    }

    /// Create `amount` new units for `to`. Unrestricted.
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), TokenError> {
        check_nonnegative(amount)?;

        let supply = total_supply(&env)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let balance = read_balance(&env, &to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        write_balance(&env, &to, balance);
        env.storage().instance().set(&DataKey::TotalSupply, &supply);
        extend_instance_ttl(&env);

        env.events()
            .publish((Symbol::new(&env, "mint"),), (to, amount));

        Ok(())
    }

    /// Move `amount` from `from` to `to`
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();
        check_nonnegative(amount)?;

        move_balance(&env, &from, &to, amount)?;

        env.events()
            .publish((Symbol::new(&env, "transfer"),), (from, to, amount));

        Ok(())
    }

    /// Move `amount` from `from` to `to` on behalf of `spender`, spending its allowance
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        spender.require_auth();
        check_nonnegative(amount)?;

        let allowance = read_allowance(&env, &from, &spender);
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance);
        }

        move_balance(&env, &from, &to, amount)?;
        write_allowance(&env, &from, &spender, allowance - amount);

        env.events()
            .publish((Symbol::new(&env, "transfer"),), (from, to, amount));

        Ok(())
    }

    /// Set the allowance of `spender` over `owner`'s balance, replacing any previous value
    pub fn approve(
        env: Env,
        owner: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        owner.require_auth();
        check_nonnegative(amount)?;

        write_allowance(&env, &owner, &spender, amount);

        env.events()
            .publish((Symbol::new(&env, "approve"),), (owner, spender, amount));

        Ok(())
    }

    // === View Functions ===

    pub fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    pub fn allowance(env: Env, owner: Address, spender: Address) -> i128 {
        read_allowance(&env, &owner, &spender)
    }

    pub fn total_supply(env: Env) -> i128 {
        total_supply(&env)
    }

    pub fn decimals(env: Env) -> Result<u32, TokenError> {
        read_metadata(&env, &DataKey::Decimals)
    }

    pub fn name(env: Env) -> Result<String, TokenError> {
        read_metadata(&env, &DataKey::Name)
    }

    pub fn symbol(env: Env) -> Result<String, TokenError> {
        read_metadata(&env, &DataKey::Symbol)
    }
}

// === Helper Functions ===

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

fn check_nonnegative(amount: i128) -> Result<(), TokenError> {
    if amount < 0 {
        return Err(TokenError::NegativeAmount);
    }
    Ok(())
}

fn read_metadata<V>(env: &Env, key: &DataKey) -> Result<V, TokenError>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    env.storage()
        .instance()
        .get(key)
        .ok_or(TokenError::NotInitialized)
}

fn total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

fn read_balance(env: &Env, id: &Address) -> i128 {
    let key = DataKey::Balance(id.clone());
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(balance) => {
            extend_persistent_ttl(env, &key);
            balance
        }
        None => 0,
    }
}

fn write_balance(env: &Env, id: &Address, balance: i128) {
    let key = DataKey::Balance(id.clone());
    env.storage().persistent().set(&key, &balance);
    extend_persistent_ttl(env, &key);
}

fn read_allowance(env: &Env, owner: &Address, spender: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Allowance(owner.clone(), spender.clone()))
        .unwrap_or(0)
}

fn write_allowance(env: &Env, owner: &Address, spender: &Address, amount: i128) {
    let key = DataKey::Allowance(owner.clone(), spender.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        extend_persistent_ttl(env, &key);
    }
}

/// Debit then credit. Nothing is written unless both sides succeed.
fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), TokenError> {
    let from_balance = read_balance(env, from);
    if from_balance < amount {
        return Err(TokenError::InsufficientBalance);
    }
    if amount == 0 || from == to {
        return Ok(());
    }

    let to_balance = read_balance(env, to)
        .checked_add(amount)
        .ok_or(TokenError::Overflow)?;

    write_balance(env, from, from_balance - amount);
    write_balance(env, to, to_balance);
    Ok(())
}
