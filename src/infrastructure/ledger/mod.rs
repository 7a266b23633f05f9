//! Asset ledger implementations

mod memory_ledger;

pub use memory_ledger::InMemoryLedger;
