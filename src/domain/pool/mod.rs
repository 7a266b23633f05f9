//! Pool domain - reserve bookkeeping and pool identity

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::shared::types::{AccountId, AssetId};

/// The single source of truth for a pool: owner, asset pair, reserves.
///
/// Owner and asset identities are fixed at construction. Reserves are either
/// both zero (uninitialized pool) or both strictly positive (active pool);
/// the swap and withdrawal rules in [`crate::domain::swap`] and
/// [`crate::domain::liquidity`] are what maintain that shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub owner: AccountId,
    pub asset_a: AssetId,
    pub asset_b: AssetId,
    pub reserve_a: U256,
    pub reserve_b: U256,
}

impl PoolState {
    /// Create a pool with empty reserves; the given account becomes the
    /// sole authorized liquidity manager
    pub fn new(owner: AccountId, asset_a: AssetId, asset_b: AssetId) -> Self {
        Self {
            owner,
            asset_a,
            asset_b,
            reserve_a: U256::ZERO,
            reserve_b: U256::ZERO,
        }
    }

    /// Both reserves strictly positive
    pub fn is_active(&self) -> bool {
        !self.reserve_a.is_zero() && !self.reserve_b.is_zero()
    }

    /// Both reserves zero
    pub fn is_uninitialized(&self) -> bool {
        self.reserve_a.is_zero() && self.reserve_b.is_zero()
    }

    pub fn contains_asset(&self, asset: &AssetId) -> bool {
        *asset == self.asset_a || *asset == self.asset_b
    }

    /// The paired asset, if the argument belongs to the pool
    pub fn counter_asset(&self, asset: &AssetId) -> Option<&AssetId> {
        if *asset == self.asset_a {
            Some(&self.asset_b)
        } else if *asset == self.asset_b {
            Some(&self.asset_a)
        } else {
            None
        }
    }

    /// Constant-product value `reserve_a * reserve_b`, None on overflow
    pub fn product(&self) -> Option<U256> {
        self.reserve_a.checked_mul(self.reserve_b)
    }
}
