//! Time bucket models.
//!
//! Every worked minute lands in exactly one [`Bucket`]. [`TimeBuckets`] holds
//! the minute counts and [`BucketHours`] the same totals expressed in hours.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A mutually exclusive classification of worked minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Day-time minutes within the daily threshold.
    Regular,
    /// Day-time minutes beyond the daily threshold.
    Overtime,
    /// Minutes inside the night window.
    Night,
    /// Any minute worked on a holiday.
    Holiday,
}

impl Bucket {
    /// All buckets, in precedence-independent display order.
    pub const ALL: [Bucket; 4] = [
        Bucket::Regular,
        Bucket::Overtime,
        Bucket::Night,
        Bucket::Holiday,
    ];
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bucket::Regular => write!(f, "Regular"),
            Bucket::Overtime => write!(f, "Overtime"),
            Bucket::Night => write!(f, "Night"),
            Bucket::Holiday => write!(f, "Holiday"),
        }
    }
}

/// Minutes worked per bucket.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Bucket, TimeBuckets};
///
/// let buckets = TimeBuckets {
///     regular_minutes: 480,
///     overtime_minutes: 120,
///     night_minutes: 60,
///     holiday_minutes: 0,
/// };
/// assert_eq!(buckets.total_minutes(), 660);
/// assert_eq!(buckets.minutes(Bucket::Night), 60);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBuckets {
    /// Regular minutes.
    pub regular_minutes: i64,
    /// Overtime minutes.
    pub overtime_minutes: i64,
    /// Night-window minutes.
    pub night_minutes: i64,
    /// Holiday minutes.
    pub holiday_minutes: i64,
}

impl TimeBuckets {
    /// Returns the minutes recorded for one bucket.
    pub fn minutes(&self, bucket: Bucket) -> i64 {
        match bucket {
            Bucket::Regular => self.regular_minutes,
            Bucket::Overtime => self.overtime_minutes,
            Bucket::Night => self.night_minutes,
            Bucket::Holiday => self.holiday_minutes,
        }
    }

    /// Total worked minutes across all buckets.
    pub fn total_minutes(&self) -> i64 {
        self.regular_minutes + self.overtime_minutes + self.night_minutes + self.holiday_minutes
    }

    /// Returns true if no minutes were worked.
    pub fn is_empty(&self) -> bool {
        self.total_minutes() == 0
    }

    /// Converts the minute totals to hours.
    pub fn to_hours(&self) -> BucketHours {
        BucketHours {
            regular_hours: minutes_to_hours(self.regular_minutes),
            overtime_hours: minutes_to_hours(self.overtime_minutes),
            night_hours: minutes_to_hours(self.night_minutes),
            holiday_hours: minutes_to_hours(self.holiday_minutes),
        }
    }
}

impl Add for TimeBuckets {
    type Output = TimeBuckets;

    fn add(self, rhs: TimeBuckets) -> TimeBuckets {
        TimeBuckets {
            regular_minutes: self.regular_minutes + rhs.regular_minutes,
            overtime_minutes: self.overtime_minutes + rhs.overtime_minutes,
            night_minutes: self.night_minutes + rhs.night_minutes,
            holiday_minutes: self.holiday_minutes + rhs.holiday_minutes,
        }
    }
}

impl AddAssign for TimeBuckets {
    fn add_assign(&mut self, rhs: TimeBuckets) {
        *self = *self + rhs;
    }
}

impl Sum for TimeBuckets {
    fn sum<I: Iterator<Item = TimeBuckets>>(iter: I) -> Self {
        iter.fold(TimeBuckets::default(), Add::add)
    }
}

impl<'a> Sum<&'a TimeBuckets> for TimeBuckets {
    fn sum<I: Iterator<Item = &'a TimeBuckets>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Bucket totals in hours, for display and reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketHours {
    /// Regular hours.
    pub regular_hours: Decimal,
    /// Overtime hours.
    pub overtime_hours: Decimal,
    /// Night-window hours.
    pub night_hours: Decimal,
    /// Holiday hours.
    pub holiday_hours: Decimal,
}

impl BucketHours {
    /// Total hours across all buckets.
    pub fn total_hours(&self) -> Decimal {
        self.regular_hours + self.overtime_hours + self.night_hours + self.holiday_hours
    }
}

/// Converts whole minutes to hours.
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}
