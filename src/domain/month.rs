//! Calendar month index without a year dimension.

use std::fmt;

use crate::errors::{LedgerError, LedgerResult};

pub const MONTHS_PER_YEAR: usize = 12;

/// Month index in `0..12`, January being `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(u8);

impl Month {
    pub const JANUARY: Month = Month(0);
    pub const DECEMBER: Month = Month(11);

    pub fn new(index: i64) -> LedgerResult<Self> {
        if (0..MONTHS_PER_YEAR as i64).contains(&index) {
            Ok(Month(index as u8))
        } else {
            Err(LedgerError::invalid(format!(
                "month index {index} is outside 0..=11"
            )))
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = Month> {
        (0..MONTHS_PER_YEAR as u8).map(Month)
    }

    fn calendar(self) -> chrono::Month {
        // Index is range-checked on construction.
        chrono::Month::try_from(self.0 + 1).unwrap_or(chrono::Month::January)
    }

    /// Full English name, e.g. `January`.
    pub fn label(self) -> &'static str {
        self.calendar().name()
    }

    /// Three-letter axis label, e.g. `Jan`.
    pub fn short_label(self) -> &'static str {
        &self.label()[..3]
    }

    /// Parses a 1-based month number (`1`..`12`) or an English month name or
    /// its three-letter prefix.
    pub fn parse_label(token: &str) -> LedgerResult<Self> {
        let trimmed = token.trim();
        if let Ok(number) = trimmed.parse::<i64>() {
            return Month::new(number - 1);
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower.len() >= 3 {
            let found = Month::all().find(|m| m.label().to_ascii_lowercase().starts_with(&lower));
            if let Some(month) = found {
                return Ok(month);
            }
        }
        Err(LedgerError::invalid(format!("unknown month `{token}`")))
    }
}

impl From<Month> for i64 {
    fn from(month: Month) -> Self {
        month.0 as i64
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_indices() {
        assert!(Month::new(-1).is_err());
        assert!(Month::new(12).is_err());
        assert_eq!(Month::new(11).unwrap(), Month::DECEMBER);
    }

    #[test]
    fn labels_follow_calendar_order() {
        let labels: Vec<_> = Month::all().map(Month::short_label).collect();
        assert_eq!(labels.first(), Some(&"Jan"));
        assert_eq!(labels.last(), Some(&"Dec"));
        assert_eq!(Month::new(4).unwrap().label(), "May");
    }

    #[test]
    fn parses_numbers_and_names() {
        assert_eq!(Month::parse_label("1").unwrap(), Month::JANUARY);
        assert_eq!(Month::parse_label("sep").unwrap().index(), 8);
        assert_eq!(Month::parse_label("December").unwrap(), Month::DECEMBER);
        assert!(Month::parse_label("13").is_err());
        assert!(Month::parse_label("ju").is_err());
    }
}
