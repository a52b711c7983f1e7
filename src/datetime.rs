// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Zone-aware absolute instant.
//!
//! [`DateTime<Tz>`] stores whole nanoseconds since 1970-01-01T00:00:00 UTC,
//! which is enough for the years 1677..2262. The zone `Tz` is any
//! [`chrono::TimeZone`] and is only consulted when an operation needs a
//! calendar breakdown: construction from fields, [`add_years`],
//! [`add_months`], [`fields`] and [`format`]. Everything else is plain
//! offset arithmetic.
//!
//! The default zone is [`chrono::Local`], i.e. the host's configured time
//! zone. Pass [`chrono::Utc`] or a [`chrono::FixedOffset`] explicitly to get
//! results that do not depend on the host.
//!
//! [`add_years`]: DateTime::add_years
//! [`add_months`]: DateTime::add_months
//! [`fields`]: DateTime::fields
//! [`format`]: DateTime::format

use crate::calendar::{self, CalendarFields, RawFields};
use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::span::TimeSpan;
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, TimeZone, Utc};
use std::cmp::Ordering;
use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Sub, SubAssign};
use tracing::debug;

/// strftime pattern used by [`Display`](fmt::Display).
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;

/// An absolute point in time, broken down into calendar fields through `Tz`.
///
/// Equality, ordering and hashing only look at the instant; two values
/// in different zones that denote the same instant compare equal.
#[derive(Debug, Clone, Copy)]
pub struct DateTime<Tz: TimeZone = Local> {
    nanos: i64,
    zone: Tz,
}

/// Instant whose calendar view is UTC.
pub type UtcDateTime = DateTime<Utc>;

impl<Tz: TimeZone> DateTime<Tz> {
    // ── constructors ──────────────────────────────────────────────────

    /// Instant `nanos` nanoseconds after the Unix epoch.
    #[inline]
    pub fn from_timestamp_nanos_in(zone: Tz, nanos: i64) -> Self {
        Self { nanos, zone }
    }

    /// Instant `seconds` whole seconds after the Unix epoch.
    ///
    /// Saturates at the representable range.
    #[inline]
    pub fn from_timestamp_in(zone: Tz, seconds: i64) -> Self {
        Self::from_timestamp_nanos_in(zone, seconds.saturating_mul(NANOS_PER_SECOND))
    }

    /// Build from a `chrono::DateTime`, keeping its zone.
    ///
    /// Returns [`Error::OutOfRange`] outside 1677..2262.
    pub fn from_chrono(datetime: chrono::DateTime<Tz>) -> Result<Self> {
        let nanos = datetime.timestamp_nanos_opt().ok_or_else(|| {
            let utc = datetime.naive_utc();
            Error::out_of_range(format!("{utc} is outside the nanosecond range"))
        })?;
        Ok(Self::from_timestamp_nanos_in(datetime.timezone(), nanos))
    }

    /// Current time from the system clock, viewed in `zone`.
    pub fn now_in(zone: Tz) -> Self {
        Self::now_with(&SystemClock, zone)
    }

    /// Current time as reported by `clock`, viewed in `zone`.
    pub fn now_with<C: Clock + ?Sized>(clock: &C, zone: Tz) -> Self {
        let now = clock.now();
        let nanos = now.timestamp_nanos_opt().unwrap_or_else(|| {
            debug!(%now, "clock reading outside the nanosecond range, saturating");
            if now.timestamp() < 0 {
                i64::MIN
            } else {
                i64::MAX
            }
        });
        Self::from_timestamp_nanos_in(zone, nanos)
    }

    /// Midnight of the given date in `zone`.
    ///
    /// Out-of-range fields carry into the next unit instead of failing; see
    /// [`from_ymd_hms_in`](Self::from_ymd_hms_in).
    pub fn from_ymd_in(zone: Tz, year: i32, month: i32, day: i32) -> Result<Self> {
        Self::from_ymd_hms_in(zone, year, month, day, 0, 0, 0)
    }

    /// Wall-clock time in `zone`.
    ///
    /// Fields outside their usual range are normalised by carrying into the
    /// next larger unit: month 13 is January of the next year, day 32 of
    /// January is February 1st, minute -1 is the last minute of the
    /// previous hour. An error is returned only if the normalised result
    /// cannot be represented.
    ///
    /// ```
    /// use chrono::Utc;
    /// use civtime::DateTime;
    ///
    /// let t = DateTime::from_ymd_hms_in(Utc, 2023, 3, 15, 10, 30, 0).unwrap();
    /// assert_eq!(t.format("%Y-%m-%d %H:%M:%S").unwrap(), "2023-03-15 10:30:00");
    ///
    /// let carried = DateTime::from_ymd_in(Utc, 2023, 13, 32).unwrap();
    /// assert_eq!(carried.to_string(), "2024-02-01 00:00:00");
    /// ```
    pub fn from_ymd_hms_in(
        zone: Tz,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
    ) -> Result<Self> {
        Self::from_raw_in(zone, RawFields::ymd_hms(year, month, day, hour, minute, second))
    }

    fn from_raw_in(zone: Tz, raw: RawFields) -> Result<Self> {
        let wall_clock = calendar::normalize(raw)?;
        let utc = calendar::resolve_local(&zone, &wall_clock)?;
        let nanos = calendar::utc_nanos(&utc)?;
        Ok(Self::from_timestamp_nanos_in(zone, nanos))
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Nanoseconds since the Unix epoch.
    #[inline]
    pub const fn timestamp_nanos(&self) -> i64 {
        self.nanos
    }

    /// Seconds since the Unix epoch, with sub-second fraction.
    #[inline]
    pub fn timestamp(&self) -> f64 {
        self.nanos as f64 / NANOS_PER_SECOND as f64
    }

    #[inline]
    pub fn zone(&self) -> &Tz {
        &self.zone
    }

    /// Same instant, viewed in another zone.
    #[inline]
    pub fn with_zone<Tz2: TimeZone>(&self, zone: Tz2) -> DateTime<Tz2> {
        DateTime::from_timestamp_nanos_in(zone, self.nanos)
    }

    pub fn to_chrono(&self) -> chrono::DateTime<Tz> {
        self.zone.timestamp_nanos(self.nanos)
    }

    /// Calendar breakdown in this instant's zone.
    pub fn fields(&self) -> CalendarFields {
        CalendarFields::from_naive(&self.to_chrono().naive_local())
    }

    // ── offset arithmetic ─────────────────────────────────────────────

    fn shifted(&self, delta_nanos: i64) -> Self {
        let nanos = self.nanos.checked_add(delta_nanos).unwrap_or_else(|| {
            debug!(nanos = self.nanos, delta_nanos, "instant arithmetic saturated");
            self.nanos.saturating_add(delta_nanos)
        });
        Self::from_timestamp_nanos_in(self.zone.clone(), nanos)
    }

    /// Shift by `span`, rounded to the nearest nanosecond.
    #[inline]
    pub fn add_span(&self, span: TimeSpan) -> Self {
        self.shifted(span.as_nanos_saturating())
    }

    /// Shift by `days` fixed 86 400-second days, regardless of DST.
    #[inline]
    pub fn add_days(&self, days: f64) -> Self {
        self.add_span(TimeSpan::from_days(days))
    }

    #[inline]
    pub fn add_hours(&self, hours: f64) -> Self {
        self.add_span(TimeSpan::from_hours(hours))
    }

    #[inline]
    pub fn add_minutes(&self, minutes: i64) -> Self {
        self.shifted(minutes.saturating_mul(NANOS_PER_MINUTE))
    }

    #[inline]
    pub fn add_seconds(&self, seconds: i64) -> Self {
        self.shifted(seconds.saturating_mul(NANOS_PER_SECOND))
    }

    // ── calendar arithmetic ───────────────────────────────────────────

    /// Add `years` to the year field and renormalise.
    ///
    /// February 29th plus one year is March 1st.
    pub fn add_years(&self, years: i32) -> Result<Self> {
        let mut raw = RawFields::from(self.fields());
        raw.year += i64::from(years);
        Self::from_raw_in(self.zone.clone(), raw)
    }

    /// Add `months` to the month field and renormalise.
    ///
    /// The day of month is kept as is and carried when the target month is
    /// shorter, so January 31st plus one month lands in early March.
    ///
    /// ```
    /// use chrono::Utc;
    /// use civtime::DateTime;
    ///
    /// let jan31 = DateTime::from_ymd_in(Utc, 2024, 1, 31).unwrap();
    /// assert_eq!(jan31.add_months(1).unwrap().format("%F").unwrap(), "2024-03-02");
    /// ```
    pub fn add_months(&self, months: i32) -> Result<Self> {
        let mut raw = RawFields::from(self.fields());
        raw.month += i64::from(months);
        Self::from_raw_in(self.zone.clone(), raw)
    }
}

impl<Tz: TimeZone> DateTime<Tz>
where
    Tz::Offset: fmt::Display,
{
    /// Render the calendar breakdown with a strftime pattern.
    ///
    /// Returns [`Error::Format`] if the pattern has an unrecognised specifier.
    pub fn format(&self, pattern: &str) -> Result<String> {
        let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(Error::format(pattern));
        }
        let mut out = String::new();
        write!(out, "{}", self.to_chrono().format_with_items(items.iter()))
            .map_err(|_| Error::format(pattern))?;
        Ok(out)
    }
}

impl DateTime<Local> {
    /// Current time in the host's local zone.
    pub fn now() -> Self {
        Self::now_in(Local)
    }

    /// Midnight of the given date in the host's local zone.
    pub fn from_ymd(year: i32, month: i32, day: i32) -> Result<Self> {
        Self::from_ymd_in(Local, year, month, day)
    }

    /// Wall-clock time in the host's local zone.
    pub fn from_ymd_hms(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
    ) -> Result<Self> {
        Self::from_ymd_hms_in(Local, year, month, day, hour, minute, second)
    }

    /// Whole seconds since the Unix epoch, viewed in the host's local zone.
    pub fn from_timestamp(seconds: i64) -> Self {
        Self::from_timestamp_in(Local, seconds)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

// ── Display ───────────────────────────────────────────────────────────────

impl<Tz: TimeZone> fmt::Display for DateTime<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_chrono().format(DEFAULT_FORMAT))
    }
}

// ── Comparison ────────────────────────────────────────────────────────────

impl<Tz: TimeZone, Tz2: TimeZone> PartialEq<DateTime<Tz2>> for DateTime<Tz> {
    #[inline]
    fn eq(&self, other: &DateTime<Tz2>) -> bool {
        self.nanos == other.nanos
    }
}

impl<Tz: TimeZone> Eq for DateTime<Tz> {}

impl<Tz: TimeZone, Tz2: TimeZone> PartialOrd<DateTime<Tz2>> for DateTime<Tz> {
    #[inline]
    fn partial_cmp(&self, other: &DateTime<Tz2>) -> Option<Ordering> {
        Some(self.nanos.cmp(&other.nanos))
    }
}

impl<Tz: TimeZone> Ord for DateTime<Tz> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.nanos.cmp(&other.nanos)
    }
}

impl<Tz: TimeZone> Hash for DateTime<Tz> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nanos.hash(state);
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl<Tz: TimeZone> Add<TimeSpan> for DateTime<Tz> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: TimeSpan) -> Self::Output {
        self.add_span(rhs)
    }
}

impl<Tz: TimeZone> AddAssign<TimeSpan> for DateTime<Tz> {
    #[inline]
    fn add_assign(&mut self, rhs: TimeSpan) {
        *self = self.add_span(rhs);
    }
}

impl<Tz: TimeZone> Sub<TimeSpan> for DateTime<Tz> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: TimeSpan) -> Self::Output {
        self.shifted(rhs.as_nanos_saturating().saturating_neg())
    }
}

impl<Tz: TimeZone> SubAssign<TimeSpan> for DateTime<Tz> {
    #[inline]
    fn sub_assign(&mut self, rhs: TimeSpan) {
        *self = self.clone() - rhs;
    }
}

/// Signed elapsed time, left minus right.
impl<Tz: TimeZone, Tz2: TimeZone> Sub<DateTime<Tz2>> for DateTime<Tz> {
    type Output = TimeSpan;
    #[inline]
    fn sub(self, rhs: DateTime<Tz2>) -> Self::Output {
        let nanos = i128::from(self.nanos) - i128::from(rhs.nanos);
        TimeSpan::from_seconds(nanos as f64 / NANOS_PER_SECOND as f64)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
