//! Range aggregation over ledger rows.

use rust_decimal::Decimal;

use huvudbok_core::round_amount;
use huvudbok_ledger::{AccountCode, Verification};

use crate::period::Period;

/// Net movement over a closed account-code range and period.
///
/// The convention is `credit - debit`, applied uniformly to every account:
/// revenue ranges come out positive, cost ranges negative. The field catalog
/// encodes the expected sign per range, so the caller interprets, this
/// routine never does. Codes outside the range contribute nothing; a date
/// outside the period excludes the whole verification.
pub fn sum_by_range<'a, I>(verifications: I, low: AccountCode, high: AccountCode, period: Period) -> Decimal
where
    I: IntoIterator<Item = &'a Verification>,
{
    let mut net = Decimal::ZERO;

    for verification in verifications {
        if !period.contains(verification.date()) {
            continue;
        }
        for row in verification.rows() {
            if row.account.in_range(low, high) {
                net += row.net();
            }
        }
    }

    round_amount(net)
}
