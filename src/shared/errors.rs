//! Error handling for the application

use alloy_primitives::U256;
use thiserror::Error;

use crate::shared::types::{AccountId, AssetId};

/// Ledger-related errors, surfaced by [`AssetLedger`] implementations
///
/// [`AssetLedger`]: crate::domain::ledger::AssetLedger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account {account} holds {available} of {asset}, needed {needed}")]
    InsufficientBalance {
        account: AccountId,
        asset: AssetId,
        available: U256,
        needed: U256,
    },

    #[error("spender {spender} is approved for {available} of {asset}, needed {needed}")]
    InsufficientAllowance {
        spender: AccountId,
        asset: AssetId,
        available: U256,
        needed: U256,
    },

    #[error("asset not registered on this ledger: {0}")]
    UnknownAsset(AssetId),
}

/// Pool-related errors
///
/// Every failure mode is a distinct variant so callers can assert on the
/// exact kind. All of them are raised before any reserve mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("caller is not the pool owner")]
    Unauthorized,

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("both reserves must be positive to price a swap")]
    InsufficientLiquidity,

    #[error("withdrawal exceeds current reserves")]
    InsufficientReserves,

    #[error("swap output {computed} is below the required minimum {minimum}")]
    SlippageExceeded { computed: U256, minimum: U256 },

    #[error("swap would drain the output reserve")]
    ReserveWouldDrainToZero,

    #[error("asset is not part of this pool: {0}")]
    InvalidTokenQuery(AssetId),

    #[error("price is undefined while the queried reserve is zero")]
    DivisionByZero,

    #[error("reentrant call rejected")]
    ReentrancyDetected,

    #[error("arithmetic overflow in pool math")]
    ArithmeticOverflow,

    #[error("invalid pool configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
