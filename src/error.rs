// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible operation in the crate.
//!
//! All failures surface through a single [`Error`] enum.  Callers that only
//! care about the *category* of a failure can match on [`Error::kind`]:
//!
//! | Kind | Raised when |
//! |------|-------------|
//! | [`ErrorKind::Range`] | a numeric component is outside its valid domain |
//! | [`ErrorKind::Format`] | text does not match the expected grammar |
//! | [`ErrorKind::UnsupportedField`] | a field or unit does not apply to the value |
//! | [`ErrorKind::UnknownZone`] | a well-formed region id has no rules |
//! | [`ErrorKind::NullArgument`] | a required argument was omitted |
//! | [`ErrorKind::IllegalArgument`] | a structurally invalid combination |
//! | [`ErrorKind::Arithmetic`] | an intermediate computation overflowed |

use crate::field::{ChronoField, ChronoUnit};
use thiserror::Error;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Range,
    Format,
    UnsupportedField,
    UnknownZone,
    NullArgument,
    IllegalArgument,
    Arithmetic,
}

/// The error type of this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A value fell outside the valid range for `what`.
    #[error("invalid value for {what} (valid values {min} - {max}): {value}")]
    Range {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A range failure that is not a single bounded value (for example an
    /// offset whose hour/minute/second combination exceeds ±18:00).
    #[error("{0}")]
    RangeMessage(String),

    /// Text could not be parsed.
    #[error("text '{input}' could not be parsed at index {position}: {message}")]
    Format {
        input: String,
        position: usize,
        message: String,
    },

    #[error("unsupported field: {0}")]
    UnsupportedField(ChronoField),

    #[error("unsupported unit: {0}")]
    UnsupportedUnit(ChronoUnit),

    #[error("unknown time-zone id: {0}")]
    UnknownZone(String),

    #[error("{0} must not be null")]
    NullArgument(&'static str),

    #[error("{0}")]
    IllegalArgument(String),

    #[error("arithmetic overflow: {0}")]
    Arithmetic(&'static str),
}

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Range { .. } | Error::RangeMessage(_) => ErrorKind::Range,
            Error::Format { .. } => ErrorKind::Format,
            Error::UnsupportedField(_) | Error::UnsupportedUnit(_) => ErrorKind::UnsupportedField,
            Error::UnknownZone(_) => ErrorKind::UnknownZone,
            Error::NullArgument(_) => ErrorKind::NullArgument,
            Error::IllegalArgument(_) => ErrorKind::IllegalArgument,
            Error::Arithmetic(_) => ErrorKind::Arithmetic,
        }
    }

    pub(crate) fn range(what: &'static str, value: i64, min: i64, max: i64) -> Self {
        Error::Range {
            what,
            value,
            min,
            max,
        }
    }

    pub(crate) fn format(input: &str, position: usize, message: impl Into<String>) -> Self {
        Error::Format {
            input: input.to_string(),
            position,
            message: message.into(),
        }
    }

    pub(crate) fn illegal(message: impl Into<String>) -> Self {
        Error::IllegalArgument(message.into())
    }
}

/// Checks `value` against an inclusive range, producing [`Error::Range`].
#[inline]
pub(crate) fn check_range(what: &'static str, value: i64, min: i64, max: i64) -> Result<i64, Error> {
    if value < min || value > max {
        Err(Error::range(what, value, min, max))
    } else {
        Ok(value)
    }
}
