//! Infrastructure layer - concrete collaborator implementations

pub mod ledger;

pub use ledger::InMemoryLedger;
