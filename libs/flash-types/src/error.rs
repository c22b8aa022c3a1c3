use soroban_sdk::contracterror;

/// Token ledger failures
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    InsufficientBalance = 1,
    InsufficientAllowance = 2,
    Overflow = 3,
    NegativeAmount = 4,
    AlreadyInitialized = 5,
    NotInitialized = 6,
}

/// Pool manager failures.
///
/// Ledger failures raised while settling keep the token ledger's codes so a
/// caller sees the same reason whichever contract reported it.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    InsufficientBalance = 1,
    InsufficientAllowance = 2,
    Overflow = 3,

    // Registry
    AlreadyInitialized = 10,
    InvalidPrice = 11,
    IdenticalCurrencies = 12,
    InvalidPoolKey = 13,
    PoolNotInitialized = 14,
    NoLiquidity = 15,

    // Batch execution
    MalformedBatch = 20,
    Expired = 21,
    PositionNotFound = 22,
    InsufficientLiquidity = 23,
    SlippageExceeded = 24,
    UnsettledDelta = 25,
    InvalidTickRange = 26,
    InvalidLiquidity = 27,
    TickLiquidityOverflow = 28,
    TokenCallFailed = 29,
    NotPositionOwner = 30,
}

impl From<TokenError> for PoolError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InsufficientBalance => PoolError::InsufficientBalance,
            TokenError::InsufficientAllowance => PoolError::InsufficientAllowance,
            TokenError::Overflow => PoolError::Overflow,
            _ => PoolError::TokenCallFailed,
        }
    }
}
