//! Entry guards - owner check and reentrancy exclusion

use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;

use crate::domain::pool::PoolState;
use crate::shared::errors::PoolError;
use crate::shared::types::AccountId;

/// Fail unless the caller is the stored pool owner
pub fn ensure_owner(state: &PoolState, caller: &AccountId) -> Result<(), PoolError> {
    if *caller != state.owner {
        return Err(PoolError::Unauthorized);
    }
    Ok(())
}

/// Mutual-exclusion flag guarding the pool's mutating entry points.
///
/// `enter` never waits: a second mutating call arriving while one is in
/// flight (e.g. a ledger callback re-entering the pool mid-update) fails
/// fast with `ReentrancyDetected`. The returned guard releases the flag on
/// drop, so every exit path of the guarded operation releases it.
#[derive(Debug, Default)]
pub struct ReentrancyLock {
    flag: Mutex<()>,
}

impl ReentrancyLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&self) -> Result<EntryGuard<'_>, PoolError> {
        match self.flag.try_lock() {
            Ok(guard) => Ok(EntryGuard { _guard: guard }),
            Err(_) => {
                warn!("rejected reentrant call into the pool");
                Err(PoolError::ReentrancyDetected)
            }
        }
    }
}

/// Holds the entry flag for the duration of one mutating operation
#[derive(Debug)]
pub struct EntryGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::AssetId;

    fn state() -> PoolState {
        PoolState::new(
            AccountId::new("owner"),
            AssetId::new("TKA"),
            AssetId::new("TKB"),
        )
    }

    #[test]
    fn owner_passes_the_guard() {
        assert!(ensure_owner(&state(), &AccountId::new("owner")).is_ok());
    }

    #[test]
    fn non_owner_is_unauthorized() {
        assert_eq!(
            ensure_owner(&state(), &AccountId::new("mallory")),
            Err(PoolError::Unauthorized)
        );
    }

    #[test]
    fn second_enter_fails_while_first_is_held() {
        let lock = ReentrancyLock::new();
        let held = lock.enter().unwrap();
        assert_eq!(lock.enter().err(), Some(PoolError::ReentrancyDetected));
        drop(held);
        assert!(lock.enter().is_ok());
    }
}
