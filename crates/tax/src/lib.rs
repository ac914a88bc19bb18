//! `huvudbok-tax` — range aggregation and the INK2 field catalog.
//!
//! Tax-return fields are data: each is a label plus a closed account-code
//! range, and one generic range-sum routine computes them all.

pub mod aggregate;
pub mod fields;
pub mod period;

pub use aggregate::sum_by_range;
pub use fields::{INK2_FIELDS, TaxField, TaxFieldValue, calculate_fields};
pub use period::Period;
