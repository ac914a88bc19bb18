//! In-memory append-only ledger store.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use huvudbok_core::VerificationId;
use huvudbok_ledger::{Verification, validate_rows};

use crate::store::{LedgerStore, StoreError};

/// In-memory store.
///
/// A single write lock serializes appends, so per-series numbering stays
/// monotonic and gap-free under concurrent callers and no two appends can
/// interleave. Construct explicitly and pass by handle; there is no
/// process-wide instance.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<Verification>,
    ids: HashSet<VerificationId>,
    /// Highest number handed out per series.
    counters: HashMap<String, u32>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn append(&self, verification: Verification) -> Result<Verification, StoreError> {
        // Fail fast before taking the lock; nothing is ever partially written.
        validate_rows(verification.rows())?;

        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;

        if inner.ids.contains(&verification.id()) {
            return Err(StoreError::DuplicateId(verification.id()));
        }

        let last = inner
            .counters
            .get(verification.series())
            .copied()
            .unwrap_or(0);
        let number = match verification.number() {
            None => last + 1,
            Some(supplied) if supplied > last => supplied,
            Some(supplied) => {
                return Err(StoreError::Conflict {
                    series: verification.series().to_string(),
                    number: supplied,
                });
            }
        };

        let stored = verification.numbered(number);
        inner.counters.insert(stored.series().to_string(), number);
        inner.ids.insert(stored.id());
        inner.entries.push(stored.clone());

        tracing::debug!(
            series = stored.series(),
            number,
            rows = stored.rows().len(),
            "verification appended"
        );
        Ok(stored)
    }

    fn all(&self) -> Result<Vec<Verification>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.entries.clone())
    }

    fn by_series(&self, series: &str) -> Result<Vec<Verification>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner
            .entries
            .iter()
            .filter(|v| v.series() == series)
            .cloned()
            .collect())
    }

    fn len(&self) -> Result<usize, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use huvudbok_ledger::{AccountCode, NewVerification, Row};

    fn acct(code: &str) -> AccountCode {
        code.parse().unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn entry(series: &str, amount: i64) -> Verification {
        Verification::new(NewVerification::new(
            series,
            date("2024-03-01"),
            "Bokning",
            vec![
                Row::debit(acct("1930"), Decimal::from(amount)),
                Row::credit(acct("1510"), Decimal::from(amount)),
            ],
        ))
        .unwrap()
    }

    #[test]
    fn append_accepts_and_numbers_a_balanced_entry() {
        let store = InMemoryLedgerStore::new();
        let stored = store.append(entry("A", 1000)).unwrap();
        assert_eq!(stored.number(), Some(1));
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(store.all().unwrap()[0], stored);
    }

    #[test]
    fn numbers_are_monotonic_per_series() {
        let store = InMemoryLedgerStore::new();
        assert_eq!(store.append(entry("A", 1)).unwrap().number(), Some(1));
        assert_eq!(store.append(entry("A", 2)).unwrap().number(), Some(2));
        assert_eq!(store.append(entry("B", 3)).unwrap().number(), Some(1));
        assert_eq!(store.append(entry("A", 4)).unwrap().number(), Some(3));
    }

    #[test]
    fn supplied_numbers_are_preserved_and_advance_the_counter() {
        let store = InMemoryLedgerStore::new();
        let stored = store.append(entry("A", 1).numbered(7)).unwrap();
        assert_eq!(stored.number(), Some(7));
        assert_eq!(store.append(entry("A", 2)).unwrap().number(), Some(8));
    }

    #[test]
    fn stale_supplied_number_is_a_conflict() {
        let store = InMemoryLedgerStore::new();
        store.append(entry("A", 1).numbered(5)).unwrap();
        let err = store.append(entry("A", 2).numbered(5)).unwrap_err();
        assert_eq!(
            err,
            StoreError::Conflict {
                series: "A".to_string(),
                number: 5,
            }
        );
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let store = InMemoryLedgerStore::new();
        let verification = entry("A", 100);
        store.append(verification.clone()).unwrap();
        let err = store.append(verification.clone()).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId(verification.id()));
    }

    #[test]
    fn append_order_is_preserved() {
        let store = InMemoryLedgerStore::new();
        for amount in [10, 20, 30] {
            store.append(entry("A", amount)).unwrap();
        }
        let debits: Vec<Decimal> = store
            .all()
            .unwrap()
            .iter()
            .map(|v| v.debit_total())
            .collect();
        assert_eq!(debits, vec![10.into(), 20.into(), 30.into()]);
    }

    #[test]
    fn by_series_filters() {
        let store = InMemoryLedgerStore::new();
        store.append(entry("A", 1)).unwrap();
        store.append(entry("B", 2)).unwrap();
        store.append(entry("A", 3)).unwrap();
        assert_eq!(store.by_series("A").unwrap().len(), 2);
        assert_eq!(store.by_series("B").unwrap().len(), 1);
        assert!(store.by_series("C").unwrap().is_empty());
    }

    #[test]
    fn concurrent_appends_stay_gap_free() {
        let store = Arc::new(InMemoryLedgerStore::new());
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store.append(entry("A", 100)).unwrap();
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        let mut numbers: Vec<u32> = store
            .all()
            .unwrap()
            .iter()
            .map(|v| v.number().unwrap())
            .collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=200).collect::<Vec<u32>>());
    }
}
