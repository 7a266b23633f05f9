//! Pool notifications, appended in completion order

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::types::{AccountId, AssetId};

/// A notification emitted on successful completion of a mutating operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEvent {
    pub kind: PoolEventKind,
    pub timestamp: DateTime<Utc>,
}

impl PoolEvent {
    pub fn now(kind: PoolEventKind) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
        }
    }
}

/// Event payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolEventKind {
    LiquidityAdded {
        provider: AccountId,
        amount_a: U256,
        amount_b: U256,
    },
    LiquidityRemoved {
        provider: AccountId,
        amount_a: U256,
        amount_b: U256,
    },
    Swapped {
        user: AccountId,
        asset_in: AssetId,
        amount_in: U256,
        amount_out: U256,
    },
}
