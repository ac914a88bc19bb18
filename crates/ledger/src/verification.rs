//! The verification (journal entry) model and the balance law.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use huvudbok_core::{DomainError, DomainResult, VerificationId, round_amount};

use crate::account::AccountCode;

/// Where a verification originated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Manual,
    Transaction,
    Invoice,
    Payment,
}

/// One debit or credit line within a verification.
///
/// In practice exactly one of `debit`/`credit` is non-zero; zero/zero memo
/// rows are legal, negative amounts are not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub account: AccountCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub debit: Decimal,
    pub credit: Decimal,
}

impl Row {
    pub fn debit(account: AccountCode, amount: Decimal) -> Self {
        Self {
            account,
            text: None,
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    pub fn credit(account: AccountCode, amount: Decimal) -> Self {
        Self {
            account,
            text: None,
            debit: Decimal::ZERO,
            credit: amount,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Net movement of this row, credit-positive.
    pub fn net(&self) -> Decimal {
        self.credit - self.debit
    }
}

/// Pure, idempotent row validation: the balance law plus shape checks.
///
/// This is the single predicate both the constructor and the store use, so a
/// verification can be refused atomically before anything is written.
pub fn validate_rows(rows: &[Row]) -> DomainResult<()> {
    if rows.is_empty() {
        return Err(DomainError::EmptyEntry);
    }

    let mut debit_total = Decimal::ZERO;
    let mut credit_total = Decimal::ZERO;

    for row in rows {
        if row.debit.is_sign_negative() && !row.debit.is_zero() {
            return Err(DomainError::NegativeAmount(row.debit));
        }
        if row.credit.is_sign_negative() && !row.credit.is_zero() {
            return Err(DomainError::NegativeAmount(row.credit));
        }
        debit_total += row.debit;
        credit_total += row.credit;
    }

    let debit_total = round_amount(debit_total);
    let credit_total = round_amount(credit_total);

    if debit_total != credit_total {
        return Err(DomainError::imbalanced(debit_total, credit_total));
    }

    Ok(())
}

/// Input for [`Verification::new`]. Open struct: callers fill what they know,
/// the constructor assigns the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVerification {
    #[serde(default)]
    pub id: Option<VerificationId>,
    pub series: String,
    #[serde(default)]
    pub number: Option<u32>,
    pub date: NaiveDate,
    pub text: String,
    pub rows: Vec<Row>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub source_type: SourceType,
}

impl NewVerification {
    pub fn new(
        series: impl Into<String>,
        date: NaiveDate,
        text: impl Into<String>,
        rows: Vec<Row>,
    ) -> Self {
        Self {
            id: None,
            series: series.into(),
            number: None,
            date,
            text: text.into(),
            rows,
            source_id: None,
            source_type: SourceType::Manual,
        }
    }

    pub fn with_source(mut self, source_type: SourceType, source_id: impl Into<String>) -> Self {
        self.source_type = source_type;
        self.source_id = Some(source_id.into());
        self
    }
}

/// A validated journal entry.
///
/// Constructed only through [`Verification::new`]; deserialization routes
/// through the same constructor, so no code path can observe an unbalanced
/// verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NewVerification")]
pub struct Verification {
    id: VerificationId,
    series: String,
    number: Option<u32>,
    date: NaiveDate,
    text: String,
    rows: Vec<Row>,
    source_id: Option<String>,
    source_type: SourceType,
}

impl Verification {
    /// Validate and build. Assigns a fresh id when the input has none; the
    /// series number stays unassigned until the store appends the entry.
    pub fn new(input: NewVerification) -> DomainResult<Self> {
        validate_rows(&input.rows)?;

        Ok(Self {
            id: input.id.unwrap_or_default(),
            series: input.series,
            number: input.number,
            date: input.date,
            text: input.text,
            rows: input.rows,
            source_id: input.source_id,
            source_type: input.source_type,
        })
    }

    pub fn id(&self) -> VerificationId {
        self.id
    }

    pub fn series(&self) -> &str {
        &self.series
    }

    /// Monotonic number within the series; `None` until stored.
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn source_id(&self) -> Option<&str> {
        self.source_id.as_deref()
    }

    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    /// Total debits, rounded to the ledger precision.
    pub fn debit_total(&self) -> Decimal {
        round_amount(self.rows.iter().map(|r| r.debit).sum())
    }

    /// Total credits, rounded to the ledger precision.
    pub fn credit_total(&self) -> Decimal {
        round_amount(self.rows.iter().map(|r| r.credit).sum())
    }

    /// The balance-law predicate. Holds by construction; the store still
    /// re-checks it before persisting.
    pub fn is_balanced(&self) -> bool {
        validate_rows(&self.rows).is_ok()
    }

    /// Copy with the series number assigned. Used by the store at append.
    pub fn numbered(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }
}

impl TryFrom<NewVerification> for Verification {
    type Error = DomainError;

    fn try_from(input: NewVerification) -> Result<Self, Self::Error> {
        Self::new(input)
    }
}
