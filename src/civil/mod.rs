// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendrical value types of the ISO calendar.
//!
//! All types here are small, `Copy` and immutable.  Factories validate every
//! component eagerly; adjusters return new values.
//!
//! Years are printed and parsed with the *exceeds-pad* rule: at least four
//! digits, zero padded, and a `+` sign only when more than four digits are
//! needed.
//!
//! | Year | Text |
//! |------|------|
//! | 5 | `0005` |
//! | -5 | `-0005` |
//! | 2012 | `2012` |
//! | 12345 | `+12345` |

pub mod date;
pub mod month;
pub mod month_day;
pub mod weekday;
pub mod year;

pub use date::Date;
pub use month::Month;
pub use month_day::MonthDay;
pub use weekday::DayOfWeek;
pub use year::Year;

pub(crate) use date::write_ymd;

use crate::error::Error;
use std::fmt;

/// Writes `year` with the exceeds-pad sign rule.
pub(crate) fn write_year(f: &mut fmt::Formatter<'_>, year: i64) -> fmt::Result {
    if year > 9_999 {
        write!(f, "+{year}")
    } else if year < 0 {
        write!(f, "-{:04}", year.unsigned_abs())
    } else {
        write!(f, "{year:04}")
    }
}

/// Parses a year at the start of `text` with the exceeds-pad sign rule.
///
/// Unsigned years have exactly four digits, `-` needs at least four and `+`
/// at least five; at most ten digits are read.  Returns the year and the
/// number of bytes consumed.
pub(crate) fn parse_year(text: &str) -> Result<(i64, usize), Error> {
    let bytes = text.as_bytes();
    let (sign, start) = match bytes.first() {
        Some(b'+') => (Some(1), 1),
        Some(b'-') => (Some(-1), 1),
        _ => (None, 0),
    };
    let digits = bytes[start..]
        .iter()
        .take(10)
        .take_while(|b| b.is_ascii_digit())
        .count();
    let end = start + digits;
    if digits < 4 {
        return Err(Error::format(text, end, "expected at least four year digits"));
    }
    match sign {
        None if digits > 4 => {
            return Err(Error::format(
                text,
                0,
                "a sign is required for years with more than four digits",
            ))
        }
        Some(1) if digits == 4 => {
            return Err(Error::format(
                text,
                0,
                "'+' is only allowed for years with more than four digits",
            ))
        }
        _ => {}
    }
    let magnitude = text[start..end]
        .parse::<i64>()
        .map_err(|_| Error::format(text, start, "invalid year digits"))?;
    if sign == Some(-1) && magnitude == 0 {
        return Err(Error::format(text, 0, "negative zero year"));
    }
    Ok((sign.unwrap_or(1) * magnitude, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    struct YearText(i64);

    impl fmt::Display for YearText {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_year(f, self.0)
        }
    }

    #[test]
    fn test_write_year() {
        assert_eq!(YearText(0).to_string(), "0000");
        assert_eq!(YearText(5).to_string(), "0005");
        assert_eq!(YearText(-5).to_string(), "-0005");
        assert_eq!(YearText(9_999).to_string(), "9999");
        assert_eq!(YearText(10_000).to_string(), "+10000");
        assert_eq!(YearText(-10_000).to_string(), "-10000");
        assert_eq!(YearText(-999_999_999).to_string(), "-999999999");
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2012"), Ok((2012, 4)));
        assert_eq!(parse_year("0000-01"), Ok((0, 4)));
        assert_eq!(parse_year("-0001"), Ok((-1, 5)));
        assert_eq!(parse_year("+12345"), Ok((12_345, 6)));
        assert_eq!(parse_year("-12345"), Ok((-12_345, 6)));
        assert_eq!(parse_year("+9999999999"), Ok((9_999_999_999, 11)));
        assert_eq!(parse_year("+999999999999"), Ok((9_999_999_999, 11)));
    }

    #[test]
    fn test_parse_year_rejects() {
        for text in ["", "12", "201", "+2012", "12345", "-0000", "-12", "x2012"] {
            let err = parse_year(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "{text}");
        }
    }
}
