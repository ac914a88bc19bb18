//! Domain error model.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic bookkeeping failures (balance law,
/// catalog membership, malformed values). Infrastructure concerns belong
/// elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The double-entry balance law was violated (totals after 2-decimal rounding).
    #[error("imbalanced entry: debit {debit} != credit {credit}")]
    ImbalancedEntry { debit: Decimal, credit: Decimal },

    /// A verification was submitted without any rows.
    #[error("entry has no rows")]
    EmptyEntry,

    /// A row carried a negative debit or credit amount.
    #[error("negative amount: {0}")]
    NegativeAmount(Decimal),

    /// An account code is not present in the catalog.
    #[error("unknown account: {0}")]
    UnknownAccount(String),

    /// An account code is not a 4-digit BAS code.
    #[error("invalid account code: {0}")]
    InvalidAccountCode(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn imbalanced(debit: Decimal, credit: Decimal) -> Self {
        Self::ImbalancedEntry { debit, credit }
    }

    pub fn unknown_account(code: impl Into<String>) -> Self {
        Self::UnknownAccount(code.into())
    }

    pub fn invalid_account_code(code: impl Into<String>) -> Self {
        Self::InvalidAccountCode(code.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
