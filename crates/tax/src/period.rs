//! Time windows for ledger aggregation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A filter over verification dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    /// Everything.
    All,
    /// One calendar year.
    CalendarYear(i32),
    /// Closed date interval.
    Between(NaiveDate, NaiveDate),
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::CalendarYear(year) => date.year() == *year,
            Self::Between(start, end) => *start <= date && date <= *end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn calendar_year_matches_exactly() {
        let period = Period::CalendarYear(2024);
        assert!(period.contains(date("2024-01-01")));
        assert!(period.contains(date("2024-12-31")));
        assert!(!period.contains(date("2023-12-31")));
        assert!(!period.contains(date("2025-01-01")));
    }

    #[test]
    fn between_is_a_closed_interval() {
        let period = Period::Between(date("2024-07-01"), date("2025-06-30"));
        assert!(period.contains(date("2024-07-01")));
        assert!(period.contains(date("2025-06-30")));
        assert!(!period.contains(date("2024-06-30")));
    }
}
