// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by the checked operations of the crate.
//!
//! Plain arithmetic never fails: spans follow IEEE-754 and instants
//! saturate. Only the operations that go through a calendar breakdown, a
//! format string, or a checked conversion return [`Result`].

use thiserror::Error;

/// Errors returned by checked constructors, calendar arithmetic and formatting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A numeric input was rejected (NaN, infinite, or outside the target type).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The strftime format string contains an unrecognised specifier.
    #[error("invalid format string: {0:?}")]
    Format(String),

    /// The calendar result does not fit the representable instant range.
    #[error("date out of range: {0}")]
    OutOfRange(String),
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn format(pattern: impl Into<String>) -> Self {
        Self::Format(pattern.into())
    }

    pub(crate) fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
