//! `huvudbok-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod amount;
pub mod error;
pub mod id;

pub use amount::{AMOUNT_DP, round_amount};
pub use error::{DomainError, DomainResult};
pub use id::VerificationId;
