//! Application layer - use cases and services

pub mod events;
pub mod pool_service;

pub use events::{PoolEvent, PoolEventKind};
pub use pool_service::LiquidityPool;
