//! The account catalog: ordered reference data with range queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use huvudbok_core::{DomainError, DomainResult};

use crate::account::{Account, AccountCategory, AccountCode};
use crate::verification::Row;

const fn code(raw: u16) -> AccountCode {
    match AccountCode::new(raw) {
        Some(c) => c,
        None => panic!("seed account code out of range"),
    }
}

/// Standard BAS accounts the bookkeeping flows touch. Imports extend the
/// catalog ad hoc; this seed only has to cover day-to-day booking.
const BAS_SEED: &[(AccountCode, &str)] = &[
    (code(1220), "Inventarier och verktyg"),
    (code(1229), "Ackumulerade avskrivningar på inventarier"),
    (code(1510), "Kundfordringar"),
    (code(1630), "Skattekonto"),
    (code(1650), "Momsfordran"),
    (code(1910), "Kassa"),
    (code(1930), "Företagskonto"),
    (code(2081), "Aktiekapital"),
    (code(2091), "Balanserad vinst eller förlust"),
    (code(2099), "Årets resultat"),
    (code(2440), "Leverantörsskulder"),
    (code(2510), "Skatteskulder"),
    (code(2610), "Utgående moms, 25 %"),
    (code(2640), "Ingående moms"),
    (code(2710), "Personalskatt"),
    (code(2731), "Avräkning lagstadgade sociala avgifter"),
    (code(2898), "Outtagen vinstutdelning"),
    (code(3001), "Försäljning inom Sverige, 25 % moms"),
    (code(3740), "Öres- och kronutjämning"),
    (code(3960), "Valutakursvinster"),
    (code(4000), "Inköp av varor från Sverige"),
    (code(5010), "Lokalhyra"),
    (code(5410), "Förbrukningsinventarier"),
    (code(6110), "Kontorsmateriel"),
    (code(6212), "Telefon"),
    (code(6230), "Datakommunikation"),
    (code(6570), "Bankkostnader"),
    (code(7210), "Löner till tjänstemän"),
    (code(7510), "Lagstadgade sociala avgifter"),
    (code(7832), "Avskrivningar på inventarier och verktyg"),
    (code(8310), "Ränteintäkter från omsättningstillgångar"),
    (code(8410), "Räntekostnader för långfristiga skulder"),
    (code(8999), "Årets resultat"),
];

/// Ordered account reference data.
///
/// Backed by a `BTreeMap` so range queries come straight from the key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountCatalog {
    accounts: BTreeMap<AccountCode, Account>,
}

impl AccountCatalog {
    /// An empty catalog. Every lookup fails until accounts are inserted.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog seeded with the standard BAS accounts above.
    pub fn bas_default() -> Self {
        let mut catalog = Self::empty();
        for (code, name) in BAS_SEED {
            catalog.insert(Account::new(*code, *name));
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, code: AccountCode) -> Option<&Account> {
        self.accounts.get(&code)
    }

    /// Look up an account, failing with `UnknownAccount` if absent.
    pub fn resolve(&self, code: AccountCode) -> DomainResult<&Account> {
        self.get(code)
            .ok_or_else(|| DomainError::unknown_account(code.to_string()))
    }

    /// Insert an account (ad-hoc catalog extension). Returns `false` when the
    /// code was already present; existing reference data is never overwritten.
    pub fn insert(&mut self, account: Account) -> bool {
        use std::collections::btree_map::Entry;
        match self.accounts.entry(account.code) {
            Entry::Vacant(slot) => {
                slot.insert(account);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Accounts whose codes fall in the closed interval `[low, high]`,
    /// in code order.
    pub fn in_range(
        &self,
        low: AccountCode,
        high: AccountCode,
    ) -> impl Iterator<Item = &Account> {
        self.accounts.range(low..=high).map(|(_, account)| account)
    }

    /// Accounts in a standard category range, in code order.
    pub fn in_category(&self, category: AccountCategory) -> impl Iterator<Item = &Account> {
        let (low, high) = category.code_range();
        self.in_range(low, high)
    }

    /// All accounts in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Strict-booking policy: every row must reference a cataloged account.
    pub fn check_rows(&self, rows: &[Row]) -> DomainResult<()> {
        for row in rows {
            self.resolve(row.account)?;
        }
        Ok(())
    }
}
