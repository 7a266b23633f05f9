//! Pool service - the pool's public entry points
//!
//! Every mutating call runs through the same sequence: acquire the
//! reentrancy flag, check access, validate arguments against a state
//! snapshot, move tokens on the asset ledger, commit the new reserves in a
//! single write, append the notification. All failures abort before the
//! commit, so observers only ever see the pre- or post-state of a call.

use std::sync::Arc;

use alloy_primitives::U256;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::application::events::{PoolEvent, PoolEventKind};
use crate::domain::guard::{ensure_owner, ReentrancyLock};
use crate::domain::ledger::AssetLedger;
use crate::domain::liquidity;
use crate::domain::pool::PoolState;
use crate::domain::price;
use crate::domain::swap::{self, SwapDirection};
use crate::shared::config::PoolConfig;
use crate::shared::errors::{LedgerError, PoolError};
use crate::shared::types::{AccountId, AssetId};
use crate::shared::utils::format_units;

/// A two-asset constant-product liquidity pool
pub struct LiquidityPool {
    config: PoolConfig,
    /// The pool's own identity on the asset ledger; reserves mirror this
    /// account's balances
    account: AccountId,
    state: Arc<RwLock<PoolState>>,
    entry: ReentrancyLock,
    ledger: Arc<dyn AssetLedger>,
    events: Arc<RwLock<Vec<PoolEvent>>>,
}

impl LiquidityPool {
    /// Create a pool with empty reserves. `owner` becomes the sole
    /// authorized liquidity manager; `account` is the pool's identity on
    /// the ledger.
    pub fn new(
        config: PoolConfig,
        owner: AccountId,
        account: AccountId,
        asset_a: AssetId,
        asset_b: AssetId,
        ledger: Arc<dyn AssetLedger>,
    ) -> Result<Self, PoolError> {
        config.validate()?;
        if asset_a == asset_b {
            return Err(PoolError::InvalidConfig(
                "pool requires two distinct assets".to_string(),
            ));
        }

        Ok(Self {
            config,
            account,
            state: Arc::new(RwLock::new(PoolState::new(owner, asset_a, asset_b))),
            entry: ReentrancyLock::new(),
            ledger,
            events: Arc::new(RwLock::new(Vec::new())),
        })
    }

    /// Deposit both assets into the pool. Owner only.
    ///
    /// The deposit is not required to match the current reserve ratio; an
    /// imbalanced deposit deliberately shifts the effective price.
    pub async fn add_liquidity(
        &self,
        caller: &AccountId,
        amount_a: U256,
        amount_b: U256,
    ) -> Result<(), PoolError> {
        let _entry = self.entry.enter()?;
        let snapshot = self.state.read().await.clone();

        ensure_owner(&snapshot, caller)?;
        liquidity::validate_deposit(amount_a, amount_b)?;

        let mut updated = snapshot.clone();
        liquidity::apply_deposit(&mut updated, amount_a, amount_b)?;

        self.ensure_allowance(&snapshot.asset_a, caller, amount_a).await?;
        self.ensure_allowance(&snapshot.asset_b, caller, amount_b).await?;

        self.ledger
            .transfer_from(&snapshot.asset_a, caller, &self.account, &self.account, amount_a)
            .await?;
        if let Err(err) = self
            .ledger
            .transfer_from(&snapshot.asset_b, caller, &self.account, &self.account, amount_b)
            .await
        {
            self.refund(&snapshot.asset_a, caller, amount_a).await;
            return Err(err.into());
        }

        self.commit(&updated).await;
        self.push_event(PoolEventKind::LiquidityAdded {
            provider: caller.clone(),
            amount_a,
            amount_b,
        })
        .await;

        info!(
            provider = %caller,
            amount_a = %format_units(amount_a, 18),
            amount_b = %format_units(amount_b, 18),
            reserve_a = %format_units(updated.reserve_a, 18),
            reserve_b = %format_units(updated.reserve_b, 18),
            "liquidity added"
        );
        Ok(())
    }

    /// Withdraw both assets from the pool. Owner only.
    ///
    /// Withdrawing both reserves to zero deactivates the pool. Withdrawing
    /// exactly one reserve to zero is permitted by the preconditions and
    /// leaves subsequent swaps and price queries failing on the empty side;
    /// that exposure is the owner's responsibility.
    pub async fn remove_liquidity(
        &self,
        caller: &AccountId,
        amount_a: U256,
        amount_b: U256,
    ) -> Result<(), PoolError> {
        let _entry = self.entry.enter()?;
        let snapshot = self.state.read().await.clone();

        ensure_owner(&snapshot, caller)?;
        liquidity::validate_withdrawal(&snapshot, amount_a, amount_b)?;

        let mut updated = snapshot.clone();
        liquidity::apply_withdrawal(&mut updated, amount_a, amount_b)?;

        // Reserve bookkeeping mirrors the pool's ledger balances, so these
        // pushes only fail against a misbehaving ledger; reserves stay
        // uncommitted in that case.
        self.ledger
            .transfer(&snapshot.asset_a, &self.account, caller, amount_a)
            .await?;
        if let Err(err) = self
            .ledger
            .transfer(&snapshot.asset_b, &self.account, caller, amount_b)
            .await
        {
            warn!(%err, "asset ledger rejected the second withdrawal leg");
            return Err(err.into());
        }

        self.commit(&updated).await;
        self.push_event(PoolEventKind::LiquidityRemoved {
            provider: caller.clone(),
            amount_a,
            amount_b,
        })
        .await;

        info!(
            provider = %caller,
            amount_a = %format_units(amount_a, 18),
            amount_b = %format_units(amount_b, 18),
            reserve_a = %format_units(updated.reserve_a, 18),
            reserve_b = %format_units(updated.reserve_b, 18),
            "liquidity removed"
        );
        Ok(())
    }

    /// Swap asset A for asset B. Open to any caller.
    ///
    /// A `min_out` of zero disables the slippage bound.
    pub async fn swap_a_for_b(
        &self,
        caller: &AccountId,
        amount_in: U256,
        min_out: U256,
    ) -> Result<U256, PoolError> {
        self.swap(caller, SwapDirection::AToB, amount_in, min_out).await
    }

    /// Swap asset B for asset A. Open to any caller.
    pub async fn swap_b_for_a(
        &self,
        caller: &AccountId,
        amount_in: U256,
        min_out: U256,
    ) -> Result<U256, PoolError> {
        self.swap(caller, SwapDirection::BToA, amount_in, min_out).await
    }

    async fn swap(
        &self,
        caller: &AccountId,
        direction: SwapDirection,
        amount_in: U256,
        min_out: U256,
    ) -> Result<U256, PoolError> {
        let _entry = self.entry.enter()?;
        let snapshot = self.state.read().await.clone();

        let (reserve_in, reserve_out) = direction.reserves(&snapshot);
        let amount_out =
            swap::plan_swap(amount_in, reserve_in, reserve_out, self.config.fee_bps, min_out)?;

        let mut updated = snapshot.clone();
        swap::apply_swap(&mut updated, direction, amount_in, amount_out)?;

        let asset_in = direction.asset_in(&snapshot).clone();
        let asset_out = direction.asset_out(&snapshot).clone();

        self.ensure_allowance(&asset_in, caller, amount_in).await?;
        self.ledger
            .transfer_from(&asset_in, caller, &self.account, &self.account, amount_in)
            .await?;
        if let Err(err) = self
            .ledger
            .transfer(&asset_out, &self.account, caller, amount_out)
            .await
        {
            self.refund(&asset_in, caller, amount_in).await;
            return Err(err.into());
        }

        self.commit(&updated).await;
        self.push_event(PoolEventKind::Swapped {
            user: caller.clone(),
            asset_in: asset_in.clone(),
            amount_in,
            amount_out,
        })
        .await;

        info!(
            user = %caller,
            asset_in = %asset_in,
            amount_in = %format_units(amount_in, 18),
            amount_out = %format_units(amount_out, 18),
            "swap executed"
        );
        Ok(amount_out)
    }

    /// Spot price of `asset` in units of the paired asset, scaled by 1e18.
    ///
    /// Read-only: takes no entry lock and makes no ledger calls.
    pub async fn get_price(&self, asset: &AssetId) -> Result<U256, PoolError> {
        let state = self.state.read().await;
        price::spot_price(&state, asset)
    }

    /// Current reserves as (reserve_a, reserve_b)
    pub async fn reserves(&self) -> (U256, U256) {
        let state = self.state.read().await;
        (state.reserve_a, state.reserve_b)
    }

    pub async fn owner(&self) -> AccountId {
        self.state.read().await.owner.clone()
    }

    /// The pool's asset pair as (asset_a, asset_b)
    pub async fn assets(&self) -> (AssetId, AssetId) {
        let state = self.state.read().await;
        (state.asset_a.clone(), state.asset_b.clone())
    }

    /// Full state snapshot
    pub async fn state(&self) -> PoolState {
        self.state.read().await.clone()
    }

    /// The pool's identity on the asset ledger
    pub fn pool_account(&self) -> &AccountId {
        &self.account
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Notifications emitted so far, in completion order
    pub async fn events(&self) -> Vec<PoolEvent> {
        self.events.read().await.clone()
    }

    async fn ensure_allowance(
        &self,
        asset: &AssetId,
        owner: &AccountId,
        amount: U256,
    ) -> Result<(), PoolError> {
        let available = self.ledger.allowance(asset, owner, &self.account).await?;
        if available < amount {
            return Err(LedgerError::InsufficientAllowance {
                spender: self.account.clone(),
                asset: asset.clone(),
                available,
                needed: amount,
            }
            .into());
        }
        Ok(())
    }

    /// Return an already-pulled input amount after an aborted operation
    async fn refund(&self, asset: &AssetId, to: &AccountId, amount: U256) {
        if let Err(err) = self.ledger.transfer(asset, &self.account, to, amount).await {
            warn!(%asset, %to, %err, "failed to refund after aborted operation");
        }
    }

    async fn commit(&self, updated: &PoolState) {
        let mut state = self.state.write().await;
        state.reserve_a = updated.reserve_a;
        state.reserve_b = updated.reserve_b;
    }

    async fn push_event(&self, kind: PoolEventKind) {
        self.events.write().await.push(PoolEvent::now(kind));
    }
}
