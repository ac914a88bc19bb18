//! `huvudbok-ledger` — accounts, the BAS catalog, and the verification model.
//!
//! The verification type enforces the double-entry balance law at construction:
//! an unbalanced `Verification` value cannot exist.

pub mod account;
pub mod catalog;
pub mod verification;

pub use account::{Account, AccountCategory, AccountCode};
pub use catalog::AccountCatalog;
pub use verification::{NewVerification, Row, SourceType, Verification, validate_rows};
