use flash_types::PoolError;
use soroban_sdk::{Address, Env, Map};

/// Per-currency running balance for one batch.
///
/// Positive means the caller owes the pool, negative means the pool owes the
/// caller. Entries that return to zero are dropped, so an empty accumulator is
/// a settled one.
pub struct DeltaAccumulator {
    deltas: Map<Address, i128>,
}

impl DeltaAccumulator {
    pub fn new(env: &Env) -> Self {
        Self {
            deltas: Map::new(env),
        }
    }

    /// Current delta for `currency`, zero when untouched
    pub fn get(&self, currency: &Address) -> i128 {
        self.deltas.get(currency.clone()).unwrap_or(0)
    }

    /// Add `amount` to the running delta of `currency`. Returns the new value.
    pub fn add(&mut self, currency: &Address, amount: i128) -> Result<i128, PoolError> {
        if amount == 0 {
            return Ok(self.get(currency));
        }

        let next = self
            .get(currency)
            .checked_add(amount)
            .ok_or(PoolError::Overflow)?;

        if next == 0 {
            self.deltas.remove(currency.clone());
        } else {
            self.deltas.set(currency.clone(), next);
        }
        Ok(next)
    }

    /// Reset `currency` to zero and return what it was
    pub fn clear(&mut self, currency: &Address) -> i128 {
        let previous = self.get(currency);
        self.deltas.remove(currency.clone());
        previous
    }

    /// First currency with a non-zero delta, if any
    pub fn first_unsettled(&self) -> Option<(Address, i128)> {
        self.deltas.iter().next()
    }
}
