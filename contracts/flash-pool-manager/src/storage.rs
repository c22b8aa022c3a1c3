use flash_types::{PoolKey, PoolState, Position, TickInfo};
use soroban_sdk::{contracttype, Env};

// ============================================================================
// SOROBAN RESOURCE LIMITS - constraints for batch execution:
// ============================================================================
// - Write entries per tx: 50 entries / 132 KB
// - Read entries per tx: 100 entries / 200 KB
//
// Storage design considerations:
// - Pools, ticks and positions are separate persistent entries
// - A mint touches 2 tick entries + 1 pool + 1 position + the id counter,
//   plus the ledger entries of each token transfer at commit
// - Batches stay small (a handful of actions) to remain within limits
// ============================================================================

/// Storage keys for the pool manager contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Next position id counter (Instance storage)
    NextPositionId,
    /// Pool state by key (Persistent storage)
    Pool(PoolKey),
    /// Tick data: (pool, tick index) -> TickInfo (Persistent storage)
    Tick(PoolKey, i32),
    /// Position data by id (Persistent storage)
    Position(u32),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/// Extend persistent storage TTL for a key
pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Pool ===

pub fn has_pool(env: &Env, key: &PoolKey) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Pool(key.clone()))
}

pub fn get_pool(env: &Env, key: &PoolKey) -> Option<PoolState> {
    env.storage().persistent().get(&DataKey::Pool(key.clone()))
}

pub fn set_pool(env: &Env, key: &PoolKey, state: &PoolState) {
    let data_key = DataKey::Pool(key.clone());
    env.storage().persistent().set(&data_key, state);
    extend_persistent_ttl(env, &data_key);
}

// === Tick ===

pub fn get_tick(env: &Env, key: &PoolKey, tick: i32) -> TickInfo {
    env.storage()
        .persistent()
        .get(&DataKey::Tick(key.clone(), tick))
        .unwrap_or_else(|| TickInfo::new(env))
}

pub fn set_tick(env: &Env, key: &PoolKey, tick: i32, info: &TickInfo) {
    let data_key = DataKey::Tick(key.clone(), tick);
    if info.liquidity_gross == 0 {
        // Remove empty tick
        env.storage().persistent().remove(&data_key);
    } else {
        env.storage().persistent().set(&data_key, info);
        extend_persistent_ttl(env, &data_key);
    }
}

// === Position ===

pub fn get_position(env: &Env, id: u32) -> Option<Position> {
    env.storage().persistent().get(&DataKey::Position(id))
}

/// Positions are never removed, even once their liquidity reaches zero
pub fn set_position(env: &Env, position: &Position) {
    let data_key = DataKey::Position(position.id);
    env.storage().persistent().set(&data_key, position);
    extend_persistent_ttl(env, &data_key);
}

// === Position ids ===

pub fn get_next_position_id(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::NextPositionId)
        .unwrap_or(1)
}

pub fn set_next_position_id(env: &Env, id: u32) {
    env.storage().instance().set(&DataKey::NextPositionId, &id);
    extend_instance_ttl(env);
}
