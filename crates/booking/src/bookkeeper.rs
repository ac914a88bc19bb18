//! Strict booking and the SIE import boundary.

use std::sync::RwLock;

use serde::Serialize;
use thiserror::Error;

use huvudbok_core::DomainError;
use huvudbok_ledger::{Account, AccountCatalog, NewVerification, Verification};
use huvudbok_sie::{SieDocument, SieError, SieVerification};
use huvudbok_store::{LedgerStore, StoreError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Validation failure: imbalance, empty entry, unknown account.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("catalog lock poisoned")]
    Poisoned,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Structural parse failure; carries the offending line number.
    #[error(transparent)]
    Parse(#[from] SieError),

    /// A parsed verification cannot be admitted into the ledger. Nothing has
    /// been written when this is returned.
    #[error("verification {label} cannot be admitted: {reason}")]
    Admission {
        label: String,
        #[source]
        reason: DomainError,
    },

    /// A parsed verification has a missing or unparseable date.
    #[error("verification {label} has no usable date")]
    MissingDate { label: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("catalog lock poisoned")]
    Poisoned,
}

/// Statistics reported by both import operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub verifications: usize,
    pub accounts: usize,
    pub balances: usize,
    /// "`start` - `end`" over the declared fiscal years, when any.
    pub period: Option<String>,
}

fn summarize(doc: &SieDocument) -> ImportSummary {
    ImportSummary {
        verifications: doc.verifications.len(),
        accounts: doc.accounts.len(),
        balances: doc.balances.len(),
        period: doc.period().map(|(start, end)| format!("{start} - {end}")),
    }
}

fn label(verification: &SieVerification) -> String {
    match verification.number {
        Some(number) => format!("{} {}", verification.series, number),
        None => format!("{} -", verification.series),
    }
}

/// The booking service: a ledger-store handle plus the account catalog.
///
/// Explicitly constructed and passed around; catalog growth is the only
/// mutable state of its own, guarded by one lock.
pub struct Bookkeeper<S: LedgerStore> {
    store: S,
    catalog: RwLock<AccountCatalog>,
}

impl<S: LedgerStore> Bookkeeper<S> {
    /// Service over the standard BAS catalog.
    pub fn new(store: S) -> Self {
        Self::with_catalog(store, AccountCatalog::bas_default())
    }

    pub fn with_catalog(store: S, catalog: AccountCatalog) -> Self {
        Self {
            store,
            catalog: RwLock::new(catalog),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of the current catalog.
    pub fn catalog(&self) -> Result<AccountCatalog, BookingError> {
        let catalog = self.catalog.read().map_err(|_| BookingError::Poisoned)?;
        Ok(catalog.clone())
    }

    /// Strict booking: validate shape and balance, require every account in
    /// the catalog, then append. Fails whole; nothing is persisted on error.
    pub fn book(&self, input: NewVerification) -> Result<Verification, BookingError> {
        let verification = Verification::new(input)?;
        {
            let catalog = self.catalog.read().map_err(|_| BookingError::Poisoned)?;
            catalog.check_rows(verification.rows())?;
        }
        let stored = self.store.append(verification)?;
        tracing::info!(
            series = stored.series(),
            number = ?stored.number(),
            text = stored.text(),
            "verification booked"
        );
        Ok(stored)
    }

    /// Parse-only import: report statistics, touch nothing.
    pub fn import_preview(&self, text: &str) -> Result<ImportSummary, ImportError> {
        let doc = huvudbok_sie::parse(text)?;
        for verification in &doc.verifications {
            if !verification.is_balanced() {
                tracing::warn!(
                    verification = %label(verification),
                    debit = %verification.debit_total(),
                    credit = %verification.credit_total(),
                    "unbalanced verification in import"
                );
            }
        }
        Ok(summarize(&doc))
    }

    /// Parse-and-merge import.
    ///
    /// Two-phase: every parsed verification is admitted through the strict
    /// constructor first, so one unbalanced or dateless verification aborts
    /// the import before the catalog or store sees anything. File-supplied
    /// series numbers are preserved.
    pub fn import_merge(&self, text: &str) -> Result<ImportSummary, ImportError> {
        let doc = huvudbok_sie::parse(text)?;

        let mut admitted = Vec::with_capacity(doc.verifications.len());
        for parsed in &doc.verifications {
            let date = parsed.date.ok_or_else(|| ImportError::MissingDate {
                label: label(parsed),
            })?;
            let mut input = NewVerification::new(
                parsed.series.clone(),
                date,
                parsed.text.clone(),
                parsed.rows.clone(),
            );
            input.number = parsed.number;
            let verification = Verification::new(input).map_err(|reason| ImportError::Admission {
                label: label(parsed),
                reason,
            })?;
            admitted.push(verification);
        }

        {
            let mut catalog = self.catalog.write().map_err(|_| ImportError::Poisoned)?;
            for account in &doc.accounts {
                catalog.insert(account.clone());
            }
            // Row accounts the file never declared become ad-hoc extensions.
            for verification in &admitted {
                for row in verification.rows() {
                    if catalog.get(row.account).is_none() {
                        tracing::warn!(account = %row.account, "undeclared account extended ad hoc");
                        catalog.insert(Account::new(row.account, row.account.to_string()));
                    }
                }
            }
        }

        for verification in admitted {
            self.store.append(verification)?;
        }

        let summary = summarize(&doc);
        tracing::info!(
            verifications = summary.verifications,
            accounts = summary.accounts,
            balances = summary.balances,
            "SIE import merged"
        );
        Ok(summary)
    }
}
