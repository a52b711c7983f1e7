// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar breakdown and wall-clock resolution.
//!
//! Calendar fields are normalised by carrying: every field
//! may be out of range and is carried into the next larger unit (month 13
//! is January of the following year, day 0 is the last day of the previous
//! month, second 3 600 is one hour later). Day-of-month is never clamped.
//!
//! The resulting wall-clock time is then placed on the time line through a
//! [`chrono::TimeZone`]:
//!
//! | Wall-clock reading | Resolution |
//! |--------------------|------------|
//! | unique             | that instant |
//! | ambiguous (fall-back overlap) | the earliest instant |
//! | skipped (spring-forward gap)  | read with the offset in force before the gap |

use crate::error::{Error, Result};
use chrono::{
    Datelike, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone, Timelike,
};
use tracing::{debug, trace};

/// Calendar breakdown of an instant in a zone.
///
/// `month` and `day` are 1-based. `nanosecond` is the sub-second part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub nanosecond: u32,
}

impl CalendarFields {
    pub(crate) fn from_naive(naive: &NaiveDateTime) -> Self {
        Self {
            year: naive.year(),
            month: naive.month(),
            day: naive.day(),
            hour: naive.hour(),
            minute: naive.minute(),
            second: naive.second(),
            nanosecond: naive.nanosecond(),
        }
    }
}

/// Unnormalised calendar input. Any field may be negative or overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawFields {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    pub nanosecond: i64,
}

impl RawFields {
    pub(crate) fn ymd_hms(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
    ) -> Self {
        Self {
            year: year.into(),
            month: month.into(),
            day: day.into(),
            hour: hour.into(),
            minute: minute.into(),
            second: second.into(),
            nanosecond: 0,
        }
    }
}

impl From<CalendarFields> for RawFields {
    fn from(fields: CalendarFields) -> Self {
        Self {
            year: fields.year.into(),
            month: fields.month.into(),
            day: fields.day.into(),
            hour: fields.hour.into(),
            minute: fields.minute.into(),
            second: fields.second.into(),
            nanosecond: fields.nanosecond.into(),
        }
    }
}

/// Carry out-of-range fields into a valid wall-clock reading.
pub(crate) fn normalize(raw: RawFields) -> Result<NaiveDateTime> {
    let month0 = raw.month - 1;
    let year = raw.year + month0.div_euclid(12);
    let month = month0.rem_euclid(12) + 1;

    let year = i32::try_from(year).map_err(|_| Error::out_of_range(format!("year {year}")))?;
    // month is in 1..=12 here
    let first = NaiveDate::from_ymd_opt(year, month as u32, 1)
        .ok_or_else(|| Error::out_of_range(format!("year {year}")))?;

    let offset = TimeDelta::try_days(raw.day - 1)
        .and_then(|d| d.checked_add(&TimeDelta::try_hours(raw.hour)?))
        .and_then(|d| d.checked_add(&TimeDelta::try_minutes(raw.minute)?))
        .and_then(|d| d.checked_add(&TimeDelta::try_seconds(raw.second)?))
        .and_then(|d| d.checked_add(&TimeDelta::nanoseconds(raw.nanosecond)))
        .ok_or_else(|| Error::out_of_range(format!("{raw:?}")))?;

    let naive = first
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.checked_add_signed(offset))
        .ok_or_else(|| Error::out_of_range(format!("{raw:?}")))?;

    if !reads_as(&raw, &naive) {
        trace!(?raw, normalized = %naive, "calendar fields carried");
    }
    Ok(naive)
}

/// Whether `naive` shows exactly the fields in `raw`, i.e. nothing was carried.
fn reads_as(raw: &RawFields, naive: &NaiveDateTime) -> bool {
    let shown = CalendarFields::from_naive(naive);
    raw.year == i64::from(shown.year)
        && raw.month == i64::from(shown.month)
        && raw.day == i64::from(shown.day)
        && raw.hour == i64::from(shown.hour)
        && raw.minute == i64::from(shown.minute)
        && raw.second == i64::from(shown.second)
        && raw.nanosecond == i64::from(shown.nanosecond)
}

/// Place a wall-clock reading of `zone` on the UTC time line.
pub(crate) fn resolve_local<Tz: TimeZone>(
    zone: &Tz,
    naive: &NaiveDateTime,
) -> Result<NaiveDateTime> {
    match zone.from_local_datetime(naive) {
        LocalResult::Single(dt) => return Ok(dt.naive_utc()),
        LocalResult::Ambiguous(a, b) => {
            // Some zones (Local on Unix) list the later instant first.
            let earliest = a.naive_utc().min(b.naive_utc());
            debug!(
                wall_clock = %naive,
                %earliest,
                "ambiguous local time, taking the earliest instant"
            );
            return Ok(earliest);
        }
        LocalResult::None => {}
    }

    // Skipped by a forward transition: use the offset from one day before.
    let before = naive
        .checked_sub_signed(TimeDelta::days(1))
        .ok_or_else(|| Error::out_of_range(format!("{naive}")))?;
    let offset = zone.offset_from_utc_datetime(&before).fix().local_minus_utc();
    debug!(wall_clock = %naive, offset, "local time falls in a gap, using the earlier offset");
    naive
        .checked_sub_signed(TimeDelta::seconds(offset.into()))
        .ok_or_else(|| Error::out_of_range(format!("{naive}")))
}

/// Nanoseconds since the Unix epoch of a UTC wall-clock reading.
pub(crate) fn utc_nanos(naive_utc: &NaiveDateTime) -> Result<i64> {
    naive_utc
        .and_utc()
        .timestamp_nanos_opt()
        .ok_or_else(|| Error::out_of_range(format!("{naive_utc} is outside the nanosecond range")))
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
