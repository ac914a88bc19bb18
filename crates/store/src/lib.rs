//! `huvudbok-store` — the append-only ledger store boundary.
//!
//! The store is the only shared mutable state in the workspace. Corrections
//! are new offsetting verifications; nothing is ever mutated in place or
//! deleted.

pub mod in_memory;
pub mod store;

pub use in_memory::InMemoryLedgerStore;
pub use store::{LedgerStore, StoreError};
