//! The parsed SIE document model.
//!
//! This layer is lossless: verifications are kept exactly as the file states
//! them, including unbalanced ones and unparseable dates. Admission into the
//! ledger happens elsewhere, through the strict verification constructor.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use huvudbok_core::round_amount;
use huvudbok_ledger::{Account, AccountCode, Row};

/// A fiscal year declared by a `#RAR` line. Index 0 is the export's current
/// year, -1 the year before, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYear {
    pub index: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Which balance line a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceKind {
    /// `#IB`: opening balance of a balance-sheet account.
    Opening,
    /// `#UB`: closing balance of a balance-sheet account.
    Closing,
    /// `#RES`: year result of an income-statement account.
    Result,
}

/// One `#IB`/`#UB`/`#RES` line. Amounts are signed, debit-positive, as SIE
/// records them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SieBalance {
    pub kind: BalanceKind,
    pub year_index: i32,
    pub account: AccountCode,
    pub amount: Decimal,
}

/// A verification as the file states it. `number` may be absent and `date`
/// unparseable; both are resolved at admission, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SieVerification {
    pub series: String,
    pub number: Option<u32>,
    pub date: Option<NaiveDate>,
    pub text: String,
    pub rows: Vec<Row>,
}

impl SieVerification {
    pub fn debit_total(&self) -> Decimal {
        round_amount(self.rows.iter().map(|r| r.debit).sum())
    }

    pub fn credit_total(&self) -> Decimal {
        round_amount(self.rows.iter().map(|r| r.credit).sum())
    }

    /// The balance-law flag. A rowless verification is trivially balanced
    /// here; strict admission still rejects it as empty.
    pub fn is_balanced(&self) -> bool {
        self.debit_total() == self.credit_total()
    }
}

/// Everything one `parse` call extracts from a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SieDocument {
    pub company_name: Option<String>,
    pub org_number: Option<String>,
    pub accounts: Vec<Account>,
    pub verifications: Vec<SieVerification>,
    pub balances: Vec<SieBalance>,
    pub fiscal_years: Vec<FiscalYear>,
}

impl SieDocument {
    /// The fiscal year with the given signed index.
    pub fn fiscal_year(&self, index: i32) -> Option<&FiscalYear> {
        self.fiscal_years.iter().find(|fy| fy.index == index)
    }

    /// Overall period covered by the declared fiscal years: earliest start to
    /// latest end.
    pub fn period(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.fiscal_years.iter().map(|fy| fy.start).min()?;
        let end = self.fiscal_years.iter().map(|fy| fy.end).max()?;
        Some((start, end))
    }
}
