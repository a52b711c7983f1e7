// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil time values
//!
//! This crate provides two value types for everyday clock and calendar
//! arithmetic, plus the glue to move between them.
//!
//! # Core types
//!
//! - [`TimeSpan`] — signed elapsed time, an `f64` count of seconds.
//! - [`DateTime<Tz>`] — absolute instant (nanoseconds since the Unix epoch)
//!   broken down into calendar fields through a [`chrono::TimeZone`].
//! - [`UtcDateTime`] — type alias for `DateTime<Utc>`.
//! - [`CalendarFields`] — year/month/day/hour/minute/second breakdown.
//! - [`Clock`] — injectable source of the current time
//!   ([`SystemClock`], [`FixedClock`]).
//!
//! # Arithmetic
//!
//! | Expression | Result |
//! |------------|--------|
//! | `DateTime - DateTime` | [`TimeSpan`] |
//! | `DateTime ± TimeSpan` | [`DateTime`] |
//! | `TimeSpan ± TimeSpan` | [`TimeSpan`] |
//! | `TimeSpan * f64`, `TimeSpan / f64` | [`TimeSpan`] |
//!
//! `add_days`, `add_hours`, `add_minutes` and `add_seconds` shift the
//! instant by a fixed amount. `add_months` and `add_years` go through the
//! calendar breakdown in the instant's zone and carry overflowing days
//! forward instead of clamping them.
//!
//! # Zones
//!
//! The default zone is [`chrono::Local`], so `DateTime::from_ymd(2024, 1, 31)`
//! means midnight on the host's wall clock. Use [`chrono::Utc`] or
//! [`chrono::FixedOffset`] for results that do not depend on the host
//! configuration.

mod calendar;
mod clock;
pub(crate) mod datetime;
mod error;
pub(crate) mod span;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::CalendarFields;
pub use clock::{Clock, FixedClock, SystemClock};
pub use datetime::{DateTime, UtcDateTime, DEFAULT_FORMAT};
pub use error::{Error, Result};
pub use span::TimeSpan;
