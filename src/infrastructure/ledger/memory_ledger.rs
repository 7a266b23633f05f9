//! In-memory asset ledger for the demo token pair
//!
//! Reference implementation of the [`AssetLedger`] contract: per-account
//! balances and per-spender allowances for a fixed set of registered assets,
//! failing on insufficient balance or allowance the way a conventional token
//! ledger does. Used by the tests and by programs embedding the pool without
//! an external ledger.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::U256;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ledger::AssetLedger;
use crate::shared::errors::LedgerError;
use crate::shared::types::{AccountId, AssetId};

type BalanceKey = (AssetId, AccountId);
/// (asset, owner, spender)
type AllowanceKey = (AssetId, AccountId, AccountId);

/// Balance ledger backed by in-memory maps
pub struct InMemoryLedger {
    assets: Vec<AssetId>,
    balances: Arc<RwLock<HashMap<BalanceKey, U256>>>,
    allowances: Arc<RwLock<HashMap<AllowanceKey, U256>>>,
}

impl InMemoryLedger {
    pub fn new(assets: Vec<AssetId>) -> Self {
        Self {
            assets,
            balances: Arc::new(RwLock::new(HashMap::new())),
            allowances: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Credit freshly created units to an account
    pub async fn mint(
        &self,
        asset: &AssetId,
        account: &AccountId,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.ensure_known(asset)?;
        let mut balances = self.balances.write().await;
        let entry = balances
            .entry((asset.clone(), account.clone()))
            .or_insert(U256::ZERO);
        *entry += amount;
        debug!(%asset, %account, %amount, "minted");
        Ok(())
    }

    /// Grant `spender` the right to move up to `amount` out of `owner`'s
    /// balance; replaces any previous grant
    pub async fn approve(
        &self,
        asset: &AssetId,
        owner: &AccountId,
        spender: &AccountId,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.ensure_known(asset)?;
        self.allowances
            .write()
            .await
            .insert((asset.clone(), owner.clone(), spender.clone()), amount);
        Ok(())
    }

    pub async fn balance_of(
        &self,
        asset: &AssetId,
        account: &AccountId,
    ) -> Result<U256, LedgerError> {
        self.ensure_known(asset)?;
        Ok(self
            .balances
            .read()
            .await
            .get(&(asset.clone(), account.clone()))
            .copied()
            .unwrap_or(U256::ZERO))
    }

    fn ensure_known(&self, asset: &AssetId) -> Result<(), LedgerError> {
        if !self.assets.contains(asset) {
            return Err(LedgerError::UnknownAsset(asset.clone()));
        }
        Ok(())
    }

    async fn move_balance(
        &self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let mut balances = self.balances.write().await;
        let from_key = (asset.clone(), from.clone());
        let available = balances.get(&from_key).copied().unwrap_or(U256::ZERO);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from.clone(),
                asset: asset.clone(),
                available,
                needed: amount,
            });
        }
        balances.insert(from_key, available - amount);
        let to_entry = balances
            .entry((asset.clone(), to.clone()))
            .or_insert(U256::ZERO);
        *to_entry += amount;
        Ok(())
    }
}

#[async_trait]
impl AssetLedger for InMemoryLedger {
    async fn transfer(
        &self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.ensure_known(asset)?;
        self.move_balance(asset, from, to, amount).await
    }

    async fn transfer_from(
        &self,
        asset: &AssetId,
        owner: &AccountId,
        spender: &AccountId,
        to: &AccountId,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.ensure_known(asset)?;

        {
            let mut allowances = self.allowances.write().await;
            let key = (asset.clone(), owner.clone(), spender.clone());
            let granted = allowances.get(&key).copied().unwrap_or(U256::ZERO);
            if granted < amount {
                return Err(LedgerError::InsufficientAllowance {
                    spender: spender.clone(),
                    asset: asset.clone(),
                    available: granted,
                    needed: amount,
                });
            }
            allowances.insert(key, granted - amount);
        }

        match self.move_balance(asset, owner, to, amount).await {
            Ok(()) => Ok(()),
            Err(err) => {
                // restore the allowance consumed above
                let mut allowances = self.allowances.write().await;
                let key = (asset.clone(), owner.clone(), spender.clone());
                let granted = allowances.get(&key).copied().unwrap_or(U256::ZERO);
                allowances.insert(key, granted + amount);
                Err(err)
            }
        }
    }

    async fn allowance(
        &self,
        asset: &AssetId,
        owner: &AccountId,
        spender: &AccountId,
    ) -> Result<U256, LedgerError> {
        self.ensure_known(asset)?;
        Ok(self
            .allowances
            .read()
            .await
            .get(&(asset.clone(), owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(U256::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::units;

    fn tka() -> AssetId {
        AssetId::new("TKA")
    }

    fn alice() -> AccountId {
        AccountId::new("alice")
    }

    fn bob() -> AccountId {
        AccountId::new("bob")
    }

    fn ledger() -> InMemoryLedger {
        InMemoryLedger::new(vec![tka()])
    }

    #[tokio::test]
    async fn mint_and_transfer_move_balances() {
        let ledger = ledger();
        ledger.mint(&tka(), &alice(), units(10)).await.unwrap();

        ledger
            .transfer(&tka(), &alice(), &bob(), units(4))
            .await
            .unwrap();
        assert_eq!(ledger.balance_of(&tka(), &alice()).await.unwrap(), units(6));
        assert_eq!(ledger.balance_of(&tka(), &bob()).await.unwrap(), units(4));
    }

    #[tokio::test]
    async fn transfer_beyond_balance_fails() {
        let ledger = ledger();
        ledger.mint(&tka(), &alice(), units(1)).await.unwrap();
        let err = ledger
            .transfer(&tka(), &alice(), &bob(), units(2))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(ledger.balance_of(&tka(), &alice()).await.unwrap(), units(1));
    }

    #[tokio::test]
    async fn transfer_from_consumes_the_allowance() {
        let ledger = ledger();
        ledger.mint(&tka(), &alice(), units(10)).await.unwrap();
        ledger
            .approve(&tka(), &alice(), &bob(), units(5))
            .await
            .unwrap();

        ledger
            .transfer_from(&tka(), &alice(), &bob(), &bob(), units(3))
            .await
            .unwrap();
        assert_eq!(
            ledger.allowance(&tka(), &alice(), &bob()).await.unwrap(),
            units(2)
        );

        let err = ledger
            .transfer_from(&tka(), &alice(), &bob(), &bob(), units(3))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));
    }

    #[tokio::test]
    async fn failed_pull_restores_the_allowance() {
        let ledger = ledger();
        // approved beyond the funded balance
        ledger.mint(&tka(), &alice(), units(1)).await.unwrap();
        ledger
            .approve(&tka(), &alice(), &bob(), units(5))
            .await
            .unwrap();

        let err = ledger
            .transfer_from(&tka(), &alice(), &bob(), &bob(), units(2))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(
            ledger.allowance(&tka(), &alice(), &bob()).await.unwrap(),
            units(5)
        );
    }

    #[tokio::test]
    async fn unknown_assets_are_rejected() {
        let ledger = ledger();
        let err = ledger
            .balance_of(&AssetId::new("TKX"), &alice())
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::UnknownAsset(AssetId::new("TKX")));
    }
}
