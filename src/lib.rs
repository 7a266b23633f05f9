//! Duopool - two-asset constant-product liquidity pool
//! Built with Domain-Driven Design principles

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;

// Re-export main types for convenience
pub use application::events::{PoolEvent, PoolEventKind};
pub use application::pool_service::LiquidityPool;
pub use domain::ledger::AssetLedger;
pub use infrastructure::ledger::InMemoryLedger;
pub use shared::config::{ConfigLoader, PoolConfig};
pub use shared::errors::{LedgerError, PoolError};
pub use shared::types::{AccountId, AssetId};
