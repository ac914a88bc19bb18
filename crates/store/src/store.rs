//! The ledger store trait and its error model.

use thiserror::Error;

use huvudbok_core::{DomainError, VerificationId};
use huvudbok_ledger::Verification;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Validation failed at the point of entry (the write is refused whole).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The verification id is already present.
    #[error("duplicate verification id {0}")]
    DuplicateId(VerificationId),

    /// The caller-supplied number collides with the series numbering.
    #[error("number {number} is not after the last number in series {series}")]
    Conflict { series: String, number: u32 },

    /// Internal lock poisoning.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Append-only collection of verifications.
///
/// Implementations must validate before persisting (refuse unbalanced writes
/// atomically) and must hand out monotonic, gap-free numbers per series when
/// the appended verification carries none, also under concurrent appends.
pub trait LedgerStore {
    /// Validate, number and persist. Returns the stored verification, which
    /// always carries a series number.
    fn append(&self, verification: Verification) -> Result<Verification, StoreError>;

    /// Every stored verification, in append order.
    fn all(&self) -> Result<Vec<Verification>, StoreError>;

    /// Stored verifications of one series, in append order.
    fn by_series(&self, series: &str) -> Result<Vec<Verification>, StoreError>;

    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}
