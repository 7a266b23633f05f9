//! Liquidity domain - owner deposit and withdrawal rules

use alloy_primitives::U256;

use crate::domain::pool::PoolState;
use crate::shared::errors::PoolError;

/// Both deposit legs must be positive
pub fn validate_deposit(amount_a: U256, amount_b: U256) -> Result<(), PoolError> {
    if amount_a.is_zero() || amount_b.is_zero() {
        return Err(PoolError::InvalidAmount);
    }
    Ok(())
}

/// Credit both reserves by the deposited amounts.
///
/// Deposits are not required to match the current reserve ratio: the owner
/// is the only provider, and an imbalanced deposit deliberately shifts the
/// effective price.
pub fn apply_deposit(
    state: &mut PoolState,
    amount_a: U256,
    amount_b: U256,
) -> Result<(), PoolError> {
    state.reserve_a = state
        .reserve_a
        .checked_add(amount_a)
        .ok_or(PoolError::ArithmeticOverflow)?;
    state.reserve_b = state
        .reserve_b
        .checked_add(amount_b)
        .ok_or(PoolError::ArithmeticOverflow)?;
    Ok(())
}

/// A withdrawal may take at most what the pool currently holds
pub fn validate_withdrawal(
    state: &PoolState,
    amount_a: U256,
    amount_b: U256,
) -> Result<(), PoolError> {
    if amount_a > state.reserve_a || amount_b > state.reserve_b {
        return Err(PoolError::InsufficientReserves);
    }
    Ok(())
}

/// Debit both reserves by the withdrawn amounts.
///
/// Withdrawing both sides to zero deactivates the pool. Withdrawing only one
/// side to zero is permitted by the preconditions and leaves later swaps and
/// price queries failing on the empty reserve; that exposure is the owner's
/// responsibility.
pub fn apply_withdrawal(
    state: &mut PoolState,
    amount_a: U256,
    amount_b: U256,
) -> Result<(), PoolError> {
    state.reserve_a = state
        .reserve_a
        .checked_sub(amount_a)
        .ok_or(PoolError::InsufficientReserves)?;
    state.reserve_b = state
        .reserve_b
        .checked_sub(amount_b)
        .ok_or(PoolError::InsufficientReserves)?;
    Ok(())
}
