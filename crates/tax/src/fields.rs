//! The INK2 field catalog.
//!
//! Each statutory field is a label plus a closed BAS account-code range; the
//! derived result field 4.1 is the arithmetic sum of the eight computed
//! fields. Cost ranges contribute negative nets, so the sum subtracts them
//! naturally.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use huvudbok_ledger::{AccountCode, Verification};

use crate::aggregate::sum_by_range;
use crate::period::Period;

const fn code(raw: u16) -> AccountCode {
    match AccountCode::new(raw) {
        Some(c) => c,
        None => panic!("field range bound out of account-code range"),
    }
}

/// One range-defined tax-return field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxField {
    pub code: &'static str,
    pub label: &'static str,
    pub low: AccountCode,
    pub high: AccountCode,
}

/// The range-defined INK2 fields, in form order.
pub const INK2_FIELDS: &[TaxField] = &[
    TaxField {
        code: "1.1",
        label: "Nettoomsättning",
        low: code(3000),
        high: code(3799),
    },
    TaxField {
        code: "1.4",
        label: "Övriga rörelseintäkter",
        low: code(3800),
        high: code(3999),
    },
    TaxField {
        code: "2.1",
        label: "Råvaror och förnödenheter",
        low: code(4000),
        high: code(4999),
    },
    TaxField {
        code: "2.4",
        label: "Övriga externa kostnader",
        low: code(5000),
        high: code(6999),
    },
    TaxField {
        code: "2.5",
        label: "Personalkostnader",
        low: code(7000),
        high: code(7699),
    },
    TaxField {
        code: "2.7",
        label: "Av- och nedskrivningar av materiella och immateriella anläggningstillgångar",
        low: code(7700),
        high: code(7899),
    },
    TaxField {
        code: "3.1",
        label: "Ränteintäkter och liknande resultatposter",
        low: code(8300),
        high: code(8399),
    },
    TaxField {
        code: "3.3",
        label: "Räntekostnader och liknande resultatposter",
        low: code(8400),
        high: code(8499),
    },
];

/// Field code of the derived result row.
pub const RESULT_FIELD: &str = "4.1";

/// A computed field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxFieldValue {
    pub field: String,
    pub label: String,
    pub value: Decimal,
}

/// Compute every INK2 field for a calendar year, plus the derived 4.1 result.
///
/// Returned in form order, result last.
pub fn calculate_fields<'a, I>(verifications: I, year: i32) -> Vec<TaxFieldValue>
where
    I: IntoIterator<Item = &'a Verification>,
    I::IntoIter: Clone,
{
    let verifications = verifications.into_iter();
    let period = Period::CalendarYear(year);

    let mut values: Vec<TaxFieldValue> = INK2_FIELDS
        .iter()
        .map(|field| TaxFieldValue {
            field: field.code.to_string(),
            label: field.label.to_string(),
            value: sum_by_range(verifications.clone(), field.low, field.high, period),
        })
        .collect();

    let result: Decimal = values.iter().map(|v| v.value).sum();
    values.push(TaxFieldValue {
        field: RESULT_FIELD.to_string(),
        label: "Årets resultat".to_string(),
        value: result,
    });

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use huvudbok_ledger::{NewVerification, Row};

    fn acct(code: &str) -> AccountCode {
        code.parse().unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn verification(day: &str, rows: Vec<Row>) -> Verification {
        Verification::new(NewVerification::new("A", date(day), "test", rows)).unwrap()
    }

    fn field<'a>(values: &'a [TaxFieldValue], code: &str) -> &'a TaxFieldValue {
        values.iter().find(|v| v.field == code).unwrap()
    }

    #[test]
    fn a_single_sale_lands_in_net_revenue_and_result() {
        let ledger = vec![verification(
            "2024-05-10",
            vec![
                Row::debit(acct("1930"), Decimal::from(1000)),
                Row::credit(acct("3001"), Decimal::from(1000)),
            ],
        )];

        let values = calculate_fields(&ledger, 2024);

        assert_eq!(field(&values, "1.1").value, Decimal::from(1000));
        assert_eq!(field(&values, "4.1").value, Decimal::from(1000));
        for code in ["1.4", "2.1", "2.4", "2.5", "2.7", "3.1", "3.3"] {
            assert_eq!(field(&values, code).value, Decimal::ZERO, "field {code}");
        }
    }

    #[test]
    fn costs_subtract_from_the_result() {
        let ledger = vec![
            verification(
                "2024-03-01",
                vec![
                    Row::debit(acct("1930"), Decimal::from(10_000)),
                    Row::credit(acct("3001"), Decimal::from(10_000)),
                ],
            ),
            verification(
                "2024-03-15",
                vec![
                    Row::debit(acct("7210"), Decimal::from(6_000)),
                    Row::credit(acct("1930"), Decimal::from(6_000)),
                ],
            ),
            verification(
                "2024-06-30",
                vec![
                    Row::debit(acct("7832"), Decimal::from(1_500)),
                    Row::credit(acct("1229"), Decimal::from(1_500)),
                ],
            ),
            verification(
                "2024-12-31",
                vec![
                    Row::debit(acct("8410"), Decimal::from(250)),
                    Row::credit(acct("1930"), Decimal::from(250)),
                ],
            ),
        ];

        let values = calculate_fields(&ledger, 2024);

        assert_eq!(field(&values, "1.1").value, Decimal::from(10_000));
        assert_eq!(field(&values, "2.5").value, Decimal::from(-6_000));
        assert_eq!(field(&values, "2.7").value, Decimal::from(-1_500));
        assert_eq!(field(&values, "3.3").value, Decimal::from(-250));
        assert_eq!(field(&values, "4.1").value, Decimal::from(2_250));
    }

    #[test]
    fn other_years_are_invisible() {
        let ledger = vec![verification(
            "2023-05-10",
            vec![
                Row::debit(acct("1930"), Decimal::from(1000)),
                Row::credit(acct("3001"), Decimal::from(1000)),
            ],
        )];

        let values = calculate_fields(&ledger, 2024);
        assert!(values.iter().all(|v| v.value == Decimal::ZERO));
    }

    #[test]
    fn fields_come_back_in_form_order_with_result_last() {
        let values = calculate_fields(core::iter::empty(), 2024);
        let codes: Vec<&str> = values.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            codes,
            ["1.1", "1.4", "2.1", "2.4", "2.5", "2.7", "3.1", "3.3", "4.1"]
        );
    }

    #[test]
    fn uncovered_accounts_land_in_no_field() {
        // 2xxx and 1xxx accounts are balance-sheet only; no INK2 range covers them.
        let ledger = vec![verification(
            "2024-05-10",
            vec![
                Row::debit(acct("1930"), Decimal::from(500)),
                Row::credit(acct("2081"), Decimal::from(500)),
            ],
        )];
        let values = calculate_fields(&ledger, 2024);
        assert!(values.iter().all(|v| v.value == Decimal::ZERO));
    }
}
