// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Signed elapsed-time value.
//!
//! [`TimeSpan`] stores a single `f64` count of seconds. It is the result
//! of subtracting two [`DateTime`](crate::DateTime)s and the operand for
//! shifting one. Arithmetic is plain IEEE-754: nothing here panics or
//! returns an error, so dividing by zero yields an infinite or NaN span.
//! Callers that want to reject non-finite input use
//! [`TimeSpan::try_from_seconds`].

use crate::error::{Error, Result};
use qtty::{Days, Second, Seconds};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

pub(crate) const SECONDS_PER_MINUTE: f64 = 60.0;
pub(crate) const SECONDS_PER_HOUR: f64 = 3_600.0;
pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;

/// An elapsed amount of time, signed, with sub-second precision.
///
/// Comparison is exact floating-point comparison of the seconds count;
/// apply a tolerance yourself when comparing computed spans.
///
/// ```
/// use civtime::TimeSpan;
///
/// let span = TimeSpan::from_hours(1.5) + TimeSpan::from_minutes(30.0);
/// assert_eq!(span.total_hours(), 2.0);
/// assert!(TimeSpan::from_seconds(-1.0) < TimeSpan::ZERO);
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
pub struct TimeSpan {
    seconds: f64,
}

impl TimeSpan {
    /// The empty span.
    pub const ZERO: Self = Self::from_seconds(0.0);

    // ── constructors ──────────────────────────────────────────────────

    /// Span of `seconds` seconds. No validation is performed.
    #[inline]
    pub const fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Like [`from_seconds`](Self::from_seconds), but rejects NaN and infinities.
    pub fn try_from_seconds(seconds: f64) -> Result<Self> {
        if seconds.is_finite() {
            Ok(Self::from_seconds(seconds))
        } else {
            Err(Error::invalid_argument(format!(
                "seconds must be finite, got {seconds}"
            )))
        }
    }

    #[inline]
    pub fn from_milliseconds(milliseconds: f64) -> Self {
        Self::from_seconds(milliseconds / 1_000.0)
    }

    #[inline]
    pub fn from_minutes(minutes: f64) -> Self {
        Self::from_seconds(minutes * SECONDS_PER_MINUTE)
    }

    #[inline]
    pub fn from_hours(hours: f64) -> Self {
        Self::from_seconds(hours * SECONDS_PER_HOUR)
    }

    /// Span of `days` fixed 86 400-second days.
    #[inline]
    pub fn from_days(days: f64) -> Self {
        Self::from_seconds(days * SECONDS_PER_DAY)
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn total_seconds(&self) -> f64 {
        self.seconds
    }

    #[inline]
    pub fn total_milliseconds(&self) -> f64 {
        self.seconds * 1_000.0
    }

    #[inline]
    pub fn total_minutes(&self) -> f64 {
        self.seconds / SECONDS_PER_MINUTE
    }

    #[inline]
    pub fn total_hours(&self) -> f64 {
        self.seconds / SECONDS_PER_HOUR
    }

    #[inline]
    pub fn total_days(&self) -> f64 {
        self.seconds / SECONDS_PER_DAY
    }

    /// The span as a [`Days`] quantity.
    #[inline]
    pub fn to_days(&self) -> Days {
        Days::new(self.total_days())
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self::from_seconds(self.seconds.abs())
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.seconds < 0.0
    }

    /// Span rounded to whole nanoseconds, saturating at the `i64` range.
    ///
    /// NaN maps to zero.
    #[inline]
    pub(crate) fn as_nanos_saturating(&self) -> i64 {
        (self.seconds * 1e9).round() as i64
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

// ── Display ───────────────────────────────────────────────────────────────

impl std::fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Seconds::new(self.seconds))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add for TimeSpan {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::from_seconds(self.seconds + rhs.seconds)
    }
}

impl AddAssign for TimeSpan {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.seconds += rhs.seconds;
    }
}

impl Sub for TimeSpan {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_seconds(self.seconds - rhs.seconds)
    }
}

impl SubAssign for TimeSpan {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.seconds -= rhs.seconds;
    }
}

impl Neg for TimeSpan {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        Self::from_seconds(-self.seconds)
    }
}

impl Mul<f64> for TimeSpan {
    type Output = Self;
    #[inline]
    fn mul(self, factor: f64) -> Self::Output {
        Self::from_seconds(self.seconds * factor)
    }
}

impl Mul<TimeSpan> for f64 {
    type Output = TimeSpan;
    #[inline]
    fn mul(self, span: TimeSpan) -> Self::Output {
        span * self
    }
}

impl Div<f64> for TimeSpan {
    type Output = Self;
    #[inline]
    fn div(self, divisor: f64) -> Self::Output {
        Self::from_seconds(self.seconds / divisor)
    }
}

/// Ratio of two spans.
impl Div for TimeSpan {
    type Output = f64;
    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self.seconds / rhs.seconds
    }
}

// ── Conversions ───────────────────────────────────────────────────────────

impl From<Seconds> for TimeSpan {
    #[inline]
    fn from(seconds: Seconds) -> Self {
        Self::from_seconds(seconds.value())
    }
}

impl From<TimeSpan> for Seconds {
    #[inline]
    fn from(span: TimeSpan) -> Self {
        Seconds::new(span.seconds)
    }
}

impl From<Days> for TimeSpan {
    #[inline]
    fn from(days: Days) -> Self {
        Self::from_seconds(days.to::<Second>().value())
    }
}

impl From<std::time::Duration> for TimeSpan {
    #[inline]
    fn from(duration: std::time::Duration) -> Self {
        Self::from_seconds(duration.as_secs_f64())
    }
}

impl TryFrom<TimeSpan> for std::time::Duration {
    type Error = Error;

    fn try_from(span: TimeSpan) -> Result<Self> {
        std::time::Duration::try_from_secs_f64(span.seconds).map_err(|e| {
            Error::invalid_argument(format!("{span} does not fit std::time::Duration: {e}"))
        })
    }
}

impl From<chrono::TimeDelta> for TimeSpan {
    fn from(delta: chrono::TimeDelta) -> Self {
        // subsec_nanos carries the sign of the delta.
        Self::from_seconds(delta.num_seconds() as f64 + delta.subsec_nanos() as f64 / 1e9)
    }
}

impl TryFrom<TimeSpan> for chrono::TimeDelta {
    type Error = Error;

    fn try_from(span: TimeSpan) -> Result<Self> {
        let seconds = TimeSpan::try_from_seconds(span.seconds)?.seconds;
        let mut whole = seconds.floor();
        let mut nanos = ((seconds - whole) * 1e9).round() as u32;
        if nanos >= 1_000_000_000 {
            whole += 1.0;
            nanos = 0;
        }
        if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
            return Err(Error::invalid_argument(format!(
                "{span} does not fit chrono::TimeDelta"
            )));
        }
        chrono::TimeDelta::new(whole as i64, nanos).ok_or_else(|| {
            Error::invalid_argument(format!("{span} does not fit chrono::TimeDelta"))
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f64; 9] = [0.0, 1.0, -1.0, 0.5, 59.25, -3_600.125, 86_400.0, 1e9, -7.75e-3];

    #[test]
    fn factories_scale_by_unit() {
        for &a in &SAMPLES {
            assert_eq!(TimeSpan::from_seconds(a).total_seconds(), a);
            assert_eq!(TimeSpan::from_minutes(a).total_seconds(), a * 60.0);
            assert_eq!(TimeSpan::from_hours(a).total_seconds(), a * 3_600.0);
            assert_eq!(TimeSpan::from_days(a).total_seconds(), a * 86_400.0);
        }
    }

    #[test]
    fn totals_divide_without_rounding() {
        let span = TimeSpan::from_seconds(90.0);
        assert_eq!(span.total_minutes(), 1.5);
        assert_eq!(span.total_hours(), 0.025);
        assert_eq!(TimeSpan::from_days(2.0).total_days(), 2.0);
        assert_eq!(TimeSpan::from_hours(36.0).total_days(), 1.5);
        assert_eq!(TimeSpan::from_milliseconds(1_500.0).total_seconds(), 1.5);
        assert_eq!(TimeSpan::from_seconds(0.25).total_milliseconds(), 250.0);
    }

    #[test]
    fn addition_matches_scalar_addition() {
        for &a in &SAMPLES {
            for &b in &SAMPLES {
                assert_eq!(
                    TimeSpan::from_seconds(a) + TimeSpan::from_seconds(b),
                    TimeSpan::from_seconds(a + b)
                );
                assert_eq!(
                    TimeSpan::from_seconds(a) - TimeSpan::from_seconds(b),
                    TimeSpan::from_seconds(a - b)
                );
            }
        }
    }

    #[test]
    fn add_assign_sub_assign_neg() {
        let mut span = TimeSpan::from_minutes(1.0);
        span += TimeSpan::from_seconds(30.0);
        assert_eq!(span.total_seconds(), 90.0);
        span -= TimeSpan::from_seconds(100.0);
        assert_eq!(span.total_seconds(), -10.0);
        assert!(span.is_negative());
        assert_eq!(-span, TimeSpan::from_seconds(10.0));
        assert_eq!(span.abs(), TimeSpan::from_seconds(10.0));
    }

    #[test]
    fn scalar_scaling() {
        assert_eq!(TimeSpan::from_seconds(10.0) * 2.0, TimeSpan::from_seconds(20.0));
        assert_eq!(2.0 * TimeSpan::from_seconds(10.0), TimeSpan::from_seconds(20.0));
        assert_eq!(TimeSpan::from_seconds(10.0) / 4.0, TimeSpan::from_seconds(2.5));
        assert_eq!(TimeSpan::from_hours(1.0) / TimeSpan::from_minutes(15.0), 4.0);
    }

    #[test]
    fn division_by_zero_is_not_trapped() {
        let inf = TimeSpan::from_seconds(10.0) / 0.0;
        assert!(inf.total_seconds().is_infinite());
        assert!(inf.total_seconds() > 0.0);

        let nan = TimeSpan::ZERO / 0.0;
        assert!(nan.total_seconds().is_nan());
        assert_ne!(nan, nan);
    }

    #[test]
    fn ordering_is_exact() {
        let a = TimeSpan::from_seconds(0.1 + 0.2);
        let b = TimeSpan::from_seconds(0.3);
        assert_ne!(a, b);
        assert!(a > b);
        assert!(TimeSpan::from_days(-1.0) < TimeSpan::from_hours(-23.0));
    }

    #[test]
    fn try_from_seconds_rejects_non_finite() {
        assert!(TimeSpan::try_from_seconds(1.5).is_ok());
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                TimeSpan::try_from_seconds(bad),
                Err(Error::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn qtty_conversions() {
        let span: TimeSpan = Seconds::new(120.0).into();
        assert_eq!(span.total_minutes(), 2.0);

        let seconds: Seconds = TimeSpan::from_minutes(1.0).into();
        assert_eq!(seconds, Seconds::new(60.0));

        let from_days = TimeSpan::from(Days::new(1.5));
        assert!((from_days.total_seconds() - 129_600.0).abs() < 1e-6);
        assert_eq!(TimeSpan::from_hours(12.0).to_days(), Days::new(0.5));
    }

    #[test]
    fn std_duration_conversions() {
        let span = TimeSpan::from(std::time::Duration::from_millis(2_500));
        assert_eq!(span.total_seconds(), 2.5);

        let back = std::time::Duration::try_from(span).unwrap();
        assert_eq!(back, std::time::Duration::from_millis(2_500));

        assert!(std::time::Duration::try_from(TimeSpan::from_seconds(-1.0)).is_err());
        assert!(std::time::Duration::try_from(TimeSpan::from_seconds(f64::NAN)).is_err());
    }

    #[test]
    fn chrono_delta_conversions() {
        let span = TimeSpan::from(chrono::TimeDelta::milliseconds(-1_500));
        assert_eq!(span.total_seconds(), -1.5);

        let delta = chrono::TimeDelta::try_from(TimeSpan::from_seconds(-1.5)).unwrap();
        assert_eq!(delta, chrono::TimeDelta::milliseconds(-1_500));

        let delta = chrono::TimeDelta::try_from(TimeSpan::from_hours(30.0)).unwrap();
        assert_eq!(delta.num_hours(), 30);

        assert!(chrono::TimeDelta::try_from(TimeSpan::from_seconds(f64::INFINITY)).is_err());
        assert!(chrono::TimeDelta::try_from(TimeSpan::from_seconds(1e300)).is_err());
    }

    #[test]
    fn chrono_delta_carries_rounded_nanos_into_seconds() {
        let delta = chrono::TimeDelta::try_from(TimeSpan::from_seconds(0.999_999_999_9)).unwrap();
        assert_eq!(delta, chrono::TimeDelta::seconds(1));
        assert_eq!(delta.subsec_nanos(), 0);

        let delta = chrono::TimeDelta::try_from(TimeSpan::from_seconds(-1e-10)).unwrap();
        assert_eq!(delta, chrono::TimeDelta::zero());
    }

    #[test]
    fn nanos_round_to_nearest() {
        assert_eq!(TimeSpan::from_seconds(0.3).as_nanos_saturating(), 300_000_000);
        assert_eq!(TimeSpan::from_seconds(-1.5).as_nanos_saturating(), -1_500_000_000);
        assert_eq!(TimeSpan::from_seconds(1e300).as_nanos_saturating(), i64::MAX);
        assert_eq!(TimeSpan::from_seconds(f64::NAN).as_nanos_saturating(), 0);
    }

    #[test]
    fn display_uses_seconds() {
        let s = format!("{}", TimeSpan::from_minutes(1.5));
        assert!(s.contains("90"), "{s}");
    }
}
