//! Account codes, categories and reference data.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use huvudbok_core::{DomainError, DomainResult};

/// A 4-digit BAS account code.
///
/// Codes order numerically ("3000" < "3799"), which is what every range query
/// in this workspace relies on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountCode(u16);

impl AccountCode {
    pub const MIN: u16 = 1000;
    pub const MAX: u16 = 9999;

    /// Construct from a raw number. Usable in const context, so static tables
    /// (the INK2 field catalog, the BAS seed) fail at compile time if a code
    /// is out of range.
    pub const fn new(raw: u16) -> Option<Self> {
        if raw >= Self::MIN && raw <= Self::MAX {
            Some(Self(raw))
        } else {
            None
        }
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    /// Closed-interval membership test.
    pub fn in_range(self, low: AccountCode, high: AccountCode) -> bool {
        low.0 <= self.0 && self.0 <= high.0
    }

    pub fn category(self) -> Option<AccountCategory> {
        AccountCategory::for_code(self)
    }
}

impl core::fmt::Display for AccountCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl FromStr for AccountCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_account_code(s));
        }
        let raw: u16 = s
            .parse()
            .map_err(|_| DomainError::invalid_account_code(s))?;
        Self::new(raw).ok_or_else(|| DomainError::invalid_account_code(s))
    }
}

impl TryFrom<String> for AccountCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountCode> for String {
    fn from(value: AccountCode) -> Self {
        value.to_string()
    }
}

/// High-level account category, derived from the BAS code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountCategory {
    Asset,
    Equity,
    Liability,
    Revenue,
    Expense,
    Financial,
}

impl AccountCategory {
    /// Category for a code, by BAS range. Class 9 (9000–9999) is free for
    /// internal bookings and carries no category.
    pub fn for_code(code: AccountCode) -> Option<Self> {
        match code.get() {
            1000..=1999 => Some(Self::Asset),
            2000..=2099 => Some(Self::Equity),
            2100..=2999 => Some(Self::Liability),
            3000..=3999 => Some(Self::Revenue),
            4000..=7999 => Some(Self::Expense),
            8000..=8999 => Some(Self::Financial),
            _ => None,
        }
    }

    /// The standard code range for this category, as a closed interval.
    pub const fn code_range(self) -> (AccountCode, AccountCode) {
        const fn code(raw: u16) -> AccountCode {
            match AccountCode::new(raw) {
                Some(c) => c,
                None => panic!("category range bound out of account-code range"),
            }
        }
        match self {
            Self::Asset => (code(1000), code(1999)),
            Self::Equity => (code(2000), code(2099)),
            Self::Liability => (code(2100), code(2999)),
            Self::Revenue => (code(3000), code(3999)),
            Self::Expense => (code(4000), code(7999)),
            Self::Financial => (code(8000), code(8999)),
        }
    }
}

/// Account identifier + metadata. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub code: AccountCode,
    pub name: String,
    pub category: Option<AccountCategory>,
}

impl Account {
    /// Build an account, deriving the category from the code range.
    pub fn new(code: AccountCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            category: code.category(),
        }
    }

    /// Parse the code and build the account in one go.
    pub fn parse(code: &str, name: impl Into<String>) -> DomainResult<Self> {
        Ok(Self::new(code.parse()?, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_displays_as_four_digits() {
        let code: AccountCode = "1930".parse().unwrap();
        assert_eq!(code.to_string(), "1930");
        assert_eq!(code.get(), 1930);
    }

    #[test]
    fn code_rejects_non_four_digit_input() {
        for bad in ["193", "19300", "19a0", "0999", " 1930"] {
            assert!(
                bad.parse::<AccountCode>().is_err(),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn codes_order_numerically() {
        let low: AccountCode = "3000".parse().unwrap();
        let mid: AccountCode = "3001".parse().unwrap();
        let high: AccountCode = "3799".parse().unwrap();
        assert!(low < mid && mid < high);
        assert!(mid.in_range(low, high));
        assert!(!"3800".parse::<AccountCode>().unwrap().in_range(low, high));
    }

    #[test]
    fn categories_follow_bas_ranges() {
        let cases = [
            ("1930", Some(AccountCategory::Asset)),
            ("2081", Some(AccountCategory::Equity)),
            ("2440", Some(AccountCategory::Liability)),
            ("3001", Some(AccountCategory::Revenue)),
            ("4000", Some(AccountCategory::Expense)),
            ("7832", Some(AccountCategory::Expense)),
            ("8310", Some(AccountCategory::Financial)),
            ("9999", None),
        ];
        for (code, expected) in cases {
            let code: AccountCode = code.parse().unwrap();
            assert_eq!(code.category(), expected, "code {code}");
        }
    }

    #[test]
    fn account_derives_category_at_construction() {
        let account = Account::parse("3001", "Försäljning inom Sverige, 25 % moms").unwrap();
        assert_eq!(account.category, Some(AccountCategory::Revenue));
    }
}
