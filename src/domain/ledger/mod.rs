//! Asset ledger interface trait

use alloy_primitives::U256;
use async_trait::async_trait;

use crate::shared::errors::LedgerError;
use crate::shared::types::{AccountId, AssetId};

/// Common interface to the external balance ledger holding the pool's assets.
///
/// The conventional contract applies: transfers fail on insufficient balance,
/// `transfer_from` additionally fails on insufficient allowance and consumes
/// the allowance it spends.
#[async_trait]
pub trait AssetLedger: Send + Sync {
    /// Move `amount` of `asset` from `from` to `to`
    async fn transfer(
        &self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: U256,
    ) -> Result<(), LedgerError>;

    /// Move `amount` of `asset` out of `owner`'s balance on behalf of
    /// `spender`, within the allowance `owner` granted to `spender`
    async fn transfer_from(
        &self,
        asset: &AssetId,
        owner: &AccountId,
        spender: &AccountId,
        to: &AccountId,
        amount: U256,
    ) -> Result<(), LedgerError>;

    /// Remaining amount `spender` may move out of `owner`'s balance
    async fn allowance(
        &self,
        asset: &AssetId,
        owner: &AccountId,
        spender: &AccountId,
    ) -> Result<U256, LedgerError>;
}
