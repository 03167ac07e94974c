//! Pay period and holiday models.
//!
//! This module contains the [`PayPeriod`] date range and the
//! [`HolidayCalendar`] predicate used to flag holiday days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A dated public holiday.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PublicHoliday;
/// use chrono::NaiveDate;
///
/// let holiday = PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     name: "Independence Movement Day".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}

/// Answers whether a local calendar date is a holiday.
///
/// The engine never decides this itself. Any `Fn(NaiveDate) -> bool` works,
/// as does a slice of [`PublicHoliday`] entries.
pub trait HolidayCalendar {
    /// Returns true if `date` is a holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

impl<F> HolidayCalendar for F
where
    F: Fn(NaiveDate) -> bool,
{
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self(date)
    }
}

impl HolidayCalendar for [PublicHoliday] {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.iter().any(|h| h.date == date)
    }
}

impl HolidayCalendar for Vec<PublicHoliday> {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.as_slice().is_holiday(date)
    }
}

/// A calendar with no holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// An inclusive range of local calendar dates.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
/// ).unwrap();
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
/// assert_eq!(period.day_count(), 31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The first date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a period, rejecting one that ends before it starts.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        if end_date < start_date {
            return Err(EngineError::InvalidPeriod {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// A period covering a single date.
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start_date: date,
            end_date: date,
        }
    }

    /// Checks if a given date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of calendar days in the period; zero if the range is inverted.
    pub fn day_count(&self) -> i64 {
        ((self.end_date - self.start_date).num_days() + 1).max(0)
    }

    /// Splits the period into `[start, at)` and `[at, end]`.
    ///
    /// Returns `None` unless `start < at <= end`, since both halves must be
    /// non-empty.
    pub fn split_at(&self, at: NaiveDate) -> Option<(PayPeriod, PayPeriod)> {
        if at <= self.start_date || at > self.end_date {
            return None;
        }
        let before_end = at.pred_opt()?;
        Some((
            PayPeriod {
                start_date: self.start_date,
                end_date: before_end,
            },
            PayPeriod {
                start_date: at,
                end_date: self.end_date,
            },
        ))
    }

    /// The smallest period covering both periods.
    pub fn span(&self, other: &PayPeriod) -> PayPeriod {
        PayPeriod {
            start_date: self.start_date.min(other.start_date),
            end_date: self.end_date.max(other.end_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> PayPeriod {
        PayPeriod::new(date(2026, 1, 1), date(2026, 1, 31)).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        let result = PayPeriod::new(date(2026, 1, 10), date(2026, 1, 9));
        match result {
            Err(EngineError::InvalidPeriod { start, end }) => {
                assert_eq!(start, date(2026, 1, 10));
                assert_eq!(end, date(2026, 1, 9));
            }
            _ => panic!("Expected InvalidPeriod error"),
        }
    }

    #[test]
    fn test_contains_date_boundaries() {
        let period = january();
        assert!(period.contains_date(date(2026, 1, 1)));
        assert!(period.contains_date(date(2026, 1, 31)));
        assert!(!period.contains_date(date(2025, 12, 31)));
        assert!(!period.contains_date(date(2026, 2, 1)));
    }

    #[test]
    fn test_single_day_period() {
        let period = PayPeriod::single_day(date(2026, 1, 14));
        assert_eq!(period.day_count(), 1);
        assert!(period.contains_date(date(2026, 1, 14)));
    }

    #[test]
    fn test_split_at_produces_adjacent_halves() {
        let (first, second) = january().split_at(date(2026, 1, 16)).unwrap();
        assert_eq!(first.start_date, date(2026, 1, 1));
        assert_eq!(first.end_date, date(2026, 1, 15));
        assert_eq!(second.start_date, date(2026, 1, 16));
        assert_eq!(second.end_date, date(2026, 1, 31));
        assert_eq!(first.day_count() + second.day_count(), 31);
    }

    #[test]
    fn test_split_at_last_day() {
        let (first, second) = january().split_at(date(2026, 1, 31)).unwrap();
        assert_eq!(first.end_date, date(2026, 1, 30));
        assert_eq!(second.day_count(), 1);
    }

    #[test]
    fn test_split_at_outside_range_is_none() {
        assert!(january().split_at(date(2026, 1, 1)).is_none());
        assert!(january().split_at(date(2026, 2, 1)).is_none());
    }

    #[test]
    fn test_span_covers_both() {
        let a = PayPeriod::single_day(date(2026, 1, 5));
        let b = PayPeriod::single_day(date(2026, 1, 9));
        assert_eq!(a.span(&b), PayPeriod::new(date(2026, 1, 5), date(2026, 1, 9)).unwrap());
    }

    #[test]
    fn test_holiday_list_calendar() {
        let holidays = vec![PublicHoliday {
            date: date(2026, 1, 1),
            name: "New Year's Day".to_string(),
        }];
        assert!(holidays.is_holiday(date(2026, 1, 1)));
        assert!(!holidays.is_holiday(date(2026, 1, 2)));
    }

    #[test]
    fn test_closure_calendar() {
        let first_of_month = |d: NaiveDate| chrono::Datelike::day(&d) == 1;
        assert!(first_of_month.is_holiday(date(2026, 5, 1)));
        assert!(!first_of_month.is_holiday(date(2026, 5, 2)));
        assert!(!NoHolidays.is_holiday(date(2026, 5, 1)));
    }

    #[test]
    fn test_pay_period_deserialization() {
        let json = r#"{"start_date": "2026-01-01", "end_date": "2026-01-15"}"#;
        let period: PayPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.day_count(), 15);
    }
}
