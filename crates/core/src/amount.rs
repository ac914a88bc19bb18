//! Amount precision helpers.
//!
//! All ledger amounts are exact decimals. The balance law compares totals at a
//! fixed precision of two decimal places, which is also the resolution SIE
//! files carry.

use rust_decimal::Decimal;

/// Decimal places used when comparing debit/credit totals.
pub const AMOUNT_DP: u32 = 2;

/// Round an amount to the ledger's fixed precision.
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp(AMOUNT_DP)
}
