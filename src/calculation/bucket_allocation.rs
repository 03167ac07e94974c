//! Time bucket allocation.
//!
//! This module assigns every worked minute of an employee-day to exactly one
//! bucket, using a fixed precedence: holiday, then night, then overtime, then
//! regular.
//!
//! # Policy
//!
//! 1. On a holiday every minute is a holiday minute. Night and overtime do
//!    not apply.
//! 2. Otherwise minutes inside the night window (`18:00` to `06:00` local
//!    time) are night minutes.
//! 3. The remaining day-time minutes, taken in chronological order across all
//!    of the day's segments, are regular up to
//!    [`REGULAR_MINUTES_PER_DAY`] and overtime beyond it.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::json;

use crate::models::{AuditStep, DaySegment, TimeBuckets};

use super::local_time::{local_midnight, local_to_utc, overlap_minutes, wall_clock};

/// Local hour the night window opens.
pub const NIGHT_WINDOW_START_HOUR: u32 = 18;

/// Local hour the night window closes on the following morning.
pub const NIGHT_WINDOW_END_HOUR: u32 = 6;

/// Day-time minutes per day paid at the regular rate before overtime applies.
pub const REGULAR_MINUTES_PER_DAY: i64 = 8 * 60;

/// The night-window portions of one local day, as UTC intervals.
///
/// A local day holds two pieces of the window: the early-morning tail
/// `[00:00, 06:00)` and the evening head `[18:00, 24:00)`.
fn night_intervals<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> [(DateTime<Utc>, DateTime<Utc>); 2] {
    let midnight = local_midnight(tz, date);
    let morning_end = local_to_utc(tz, wall_clock(date, NIGHT_WINDOW_END_HOUR));
    let evening_start = local_to_utc(tz, wall_clock(date, NIGHT_WINDOW_START_HOUR));
    let next_midnight = match date.succ_opt() {
        Some(next) => local_midnight(tz, next),
        None => evening_start,
    };
    [(midnight, morning_end), (evening_start, next_midnight)]
}

/// Minutes of a segment inside the night window of its own date.
fn night_minutes_in<Tz: TimeZone>(tz: &Tz, segment: &DaySegment) -> i64 {
    night_intervals(tz, segment.date)
        .iter()
        .map(|(start, end)| overlap_minutes(segment.start, segment.end, *start, *end))
        .sum()
}

/// Allocates the minutes of one employee-day to buckets.
///
/// `segments` should all belong to the same employee and local date; they may
/// come from several sessions and need not be sorted.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::allocate_day;
/// use payroll_engine::models::DaySegment;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// // 08:00-19:00 on a regular Wednesday
/// let segment = DaySegment {
///     date: NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
///     employee_id: "emp_001".to_string(),
///     start: Utc.with_ymd_and_hms(2026, 1, 14, 8, 0, 0).unwrap(),
///     end: Utc.with_ymd_and_hms(2026, 1, 14, 19, 0, 0).unwrap(),
///     minutes: 660,
///     is_holiday_day: false,
/// };
///
/// let buckets = allocate_day(&[segment], &Utc);
/// assert_eq!(buckets.regular_minutes, 480);
/// assert_eq!(buckets.overtime_minutes, 120);
/// assert_eq!(buckets.night_minutes, 60);
/// assert_eq!(buckets.holiday_minutes, 0);
/// ```
pub fn allocate_day<Tz: TimeZone>(segments: &[DaySegment], tz: &Tz) -> TimeBuckets {
    let mut ordered: Vec<&DaySegment> = segments.iter().collect();
    ordered.sort_by_key(|s| s.start);

    let mut buckets = TimeBuckets::default();
    let mut regular_remaining = REGULAR_MINUTES_PER_DAY;

    for segment in ordered {
        if segment.is_holiday_day {
            buckets.holiday_minutes += segment.minutes;
            continue;
        }

        let night = night_minutes_in(tz, segment).min(segment.minutes);
        let day_time = segment.minutes - night;
        let regular = day_time.min(regular_remaining);

        buckets.night_minutes += night;
        buckets.regular_minutes += regular;
        buckets.overtime_minutes += day_time - regular;
        regular_remaining -= regular;
    }

    buckets
}

/// Groups segments by local date and allocates each day.
pub fn allocate_by_day<Tz: TimeZone>(
    segments: &[DaySegment],
    tz: &Tz,
) -> BTreeMap<NaiveDate, TimeBuckets> {
    let mut by_date: BTreeMap<NaiveDate, Vec<DaySegment>> = BTreeMap::new();
    for segment in segments {
        by_date
            .entry(segment.date)
            .or_default()
            .push(segment.clone());
    }

    by_date
        .into_iter()
        .map(|(date, day_segments)| (date, allocate_day(&day_segments, tz)))
        .collect()
}

/// Builds the audit step recording one day's allocation.
pub fn allocation_audit_step(
    date: NaiveDate,
    is_holiday: bool,
    buckets: &TimeBuckets,
    step_number: u32,
) -> AuditStep {
    let reasoning = if is_holiday {
        format!(
            "{} is a holiday: all {} minutes paid as holiday time",
            date,
            buckets.total_minutes()
        )
    } else if buckets.overtime_minutes > 0 {
        format!(
            "{} night-window minutes; {} day-time minutes exceed the {} minute daily threshold by {}",
            buckets.night_minutes,
            buckets.regular_minutes + buckets.overtime_minutes,
            REGULAR_MINUTES_PER_DAY,
            buckets.overtime_minutes
        )
    } else {
        format!(
            "{} night-window minutes; {} day-time minutes within the {} minute daily threshold",
            buckets.night_minutes, buckets.regular_minutes, REGULAR_MINUTES_PER_DAY
        )
    };

    AuditStep {
        step_number,
        rule_id: "bucket_allocation".to_string(),
        rule_name: "Time Bucket Allocation".to_string(),
        date: Some(date),
        input: json!({
            "worked_minutes": buckets.total_minutes(),
            "is_holiday": is_holiday,
            "night_window": format!(
                "{:02}:00-{:02}:00",
                NIGHT_WINDOW_START_HOUR, NIGHT_WINDOW_END_HOUR
            ),
            "regular_threshold_minutes": REGULAR_MINUTES_PER_DAY
        }),
        output: json!({
            "regular_minutes": buckets.regular_minutes,
            "overtime_minutes": buckets.overtime_minutes,
            "night_minutes": buckets.night_minutes,
            "holiday_minutes": buckets.holiday_minutes
        }),
        reasoning,
    }
}
