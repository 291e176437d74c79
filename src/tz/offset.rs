// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Fixed offsets from UTC.
//!
//! A [`ZoneOffset`] is a whole number of seconds in `-18:00 ..= +18:00`.  Its
//! canonical text is `Z` for zero and `±HH:MM` otherwise, with a trailing
//! `:SS` only when the seconds are non-zero.
//!
//! [`ZoneOffset::of`] additionally accepts the compact spellings
//!
//! ```text
//! ±H   ±HH   ±HHMM   ±HH:MM   ±HHMMSS   ±HH:MM:SS
//! ```
//!
//! and always normalizes them back to the canonical form.

use crate::error::{check_range, Error};
use crate::field::ChronoField;
use crate::instant::Instant;
use crate::temporal::TemporalAccessor;
use crate::tz::rules::ZoneRules;
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const MAX_SECONDS: i32 = 18 * 3_600;
const QUARTER_HOUR: i32 = 15 * 60;

/// Canonical ids of every quarter-hour offset, indexed from `-18:00`.
static QUARTER_HOUR_IDS: Lazy<Vec<String>> = Lazy::new(|| {
    (-MAX_SECONDS..=MAX_SECONDS)
        .step_by(QUARTER_HOUR as usize)
        .map(build_id)
        .collect()
});

fn build_id(total: i32) -> String {
    if total == 0 {
        return "Z".to_string();
    }
    let sign = if total < 0 { '-' } else { '+' };
    let abs = total.unsigned_abs();
    let (h, m, s) = (abs / 3_600, abs / 60 % 60, abs % 60);
    if s == 0 {
        format!("{sign}{h:02}:{m:02}")
    } else {
        format!("{sign}{h:02}:{m:02}:{s:02}")
    }
}

/// A fixed offset from UTC, seconds resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ZoneOffset {
    seconds: i32,
}

impl ZoneOffset {
    pub const UTC: ZoneOffset = ZoneOffset { seconds: 0 };
    /// `-18:00`.
    pub const MIN: ZoneOffset = ZoneOffset {
        seconds: -MAX_SECONDS,
    };
    /// `+18:00`.
    pub const MAX: ZoneOffset = ZoneOffset {
        seconds: MAX_SECONDS,
    };

    const SUPPORTED: &'static [ChronoField] = &[ChronoField::OffsetSeconds];

    // ── constructors ──────────────────────────────────────────────────

    pub fn of_total_seconds(seconds: i64) -> Result<Self, Error> {
        let seconds = check_range(
            "OffsetSeconds",
            seconds,
            -(MAX_SECONDS as i64),
            MAX_SECONDS as i64,
        )?;
        Ok(Self {
            seconds: seconds as i32,
        })
    }

    pub fn of_hours(hours: i64) -> Result<Self, Error> {
        Self::of_hours_minutes_seconds(hours, 0, 0)
    }

    pub fn of_hours_minutes(hours: i64, minutes: i64) -> Result<Self, Error> {
        Self::of_hours_minutes_seconds(hours, minutes, 0)
    }

    /// Offset from components that all share one sign (or are zero).
    ///
    /// ```
    /// use calendoch::{ErrorKind, ZoneOffset};
    ///
    /// let offset = ZoneOffset::of_hours_minutes_seconds(-5, -30, 0).unwrap();
    /// assert_eq!(offset.id(), "-05:30");
    ///
    /// let mixed = ZoneOffset::of_hours_minutes_seconds(1, -1, 0).unwrap_err();
    /// assert_eq!(mixed.kind(), ErrorKind::IllegalArgument);
    /// let large = ZoneOffset::of_hours_minutes_seconds(18, 0, 1).unwrap_err();
    /// assert_eq!(large.kind(), ErrorKind::Range);
    /// ```
    pub fn of_hours_minutes_seconds(hours: i64, minutes: i64, seconds: i64) -> Result<Self, Error> {
        check_range("ZoneOffset hours", hours, -18, 18)?;
        let mixed = if hours > 0 {
            minutes < 0 || seconds < 0
        } else if hours < 0 {
            minutes > 0 || seconds > 0
        } else {
            (minutes > 0 && seconds < 0) || (minutes < 0 && seconds > 0)
        };
        if mixed {
            return Err(Error::illegal(format!(
                "zone offset components must share one sign: {hours}, {minutes}, {seconds}"
            )));
        }
        check_range("ZoneOffset minutes", minutes, -59, 59)?;
        check_range("ZoneOffset seconds", seconds, -59, 59)?;
        if hours.abs() == 18 && (minutes != 0 || seconds != 0) {
            return Err(Error::RangeMessage(
                "zone offset not in valid range: -18:00 to +18:00".to_string(),
            ));
        }
        Self::of_total_seconds(hours * 3_600 + minutes * 60 + seconds)
    }

    /// Parses an offset id.
    ///
    /// ```
    /// use calendoch::ZoneOffset;
    ///
    /// for text in ["+0100", "+01:00", "+010000", "+01:00:00", "+1"] {
    ///     assert_eq!(ZoneOffset::of(text).unwrap().id(), "+01:00");
    /// }
    /// assert_eq!(ZoneOffset::of("Z").unwrap(), ZoneOffset::UTC);
    /// ```
    pub fn of(id: &str) -> Result<Self, Error> {
        if id == "Z" {
            return Ok(Self::UTC);
        }
        let bytes = id.as_bytes();
        let (hours, minutes, seconds) = match bytes.len() {
            2 => (digit(id, 1)?, 0, 0),
            3 => (two_digits(id, 1, false)?, 0, 0),
            5 => (two_digits(id, 1, false)?, two_digits(id, 3, false)?, 0),
            6 => (two_digits(id, 1, false)?, two_digits(id, 4, true)?, 0),
            7 => (
                two_digits(id, 1, false)?,
                two_digits(id, 3, false)?,
                two_digits(id, 5, false)?,
            ),
            9 => (
                two_digits(id, 1, false)?,
                two_digits(id, 4, true)?,
                two_digits(id, 7, true)?,
            ),
            _ => return Err(Error::format(id, 0, "invalid format for zone offset")),
        };
        match bytes[0] {
            b'+' => Self::of_hours_minutes_seconds(hours, minutes, seconds),
            b'-' => Self::of_hours_minutes_seconds(-hours, -minutes, -seconds),
            _ => Err(Error::format(id, 0, "plus/minus not found when expected")),
        }
    }

    /// Offset carried by `temporal`, via the offset query.
    pub fn from_temporal(temporal: &dyn TemporalAccessor) -> Result<Self, Error> {
        temporal
            .query_offset()
            .ok_or_else(|| Error::illegal("unable to obtain ZoneOffset from temporal value"))
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn total_seconds(&self) -> i32 {
        self.seconds
    }

    /// Canonical id, interned for quarter-hour offsets.
    pub fn id(&self) -> Cow<'static, str> {
        if self.seconds % QUARTER_HOUR == 0 {
            let index = ((self.seconds + MAX_SECONDS) / QUARTER_HOUR) as usize;
            if let Some(id) = QUARTER_HOUR_IDS.get(index) {
                return Cow::Borrowed(id.as_str());
            }
        }
        Cow::Owned(build_id(self.seconds))
    }

    /// Fixed rules that always answer this offset.
    pub fn rules(&self) -> ZoneRules {
        ZoneRules::fixed(*self)
    }

    /// Local-time view of `instant`: its epoch second shifted by this offset.
    #[inline]
    pub(crate) fn local_epoch_second(&self, instant: Instant) -> i64 {
        instant.epoch_second() + i64::from(self.seconds)
    }
}

fn digit(id: &str, pos: usize) -> Result<i64, Error> {
    match id.as_bytes()[pos] {
        b @ b'0'..=b'9' => Ok(i64::from(b - b'0')),
        _ => Err(Error::format(id, pos, "non-numeric character")),
    }
}

fn two_digits(id: &str, pos: usize, after_colon: bool) -> Result<i64, Error> {
    if after_colon && id.as_bytes()[pos - 1] != b':' {
        return Err(Error::format(id, pos - 1, "expected ':'"));
    }
    Ok(digit(id, pos)? * 10 + digit(id, pos + 1)?)
}

impl Default for ZoneOffset {
    fn default() -> Self {
        Self::UTC
    }
}

/// Larger offsets sort first: `+10:00 < +09:00`, the order in which
/// the same local time occurs around the world.
impl Ord for ZoneOffset {
    fn cmp(&self, other: &Self) -> Ordering {
        other.seconds.cmp(&self.seconds)
    }
}

impl PartialOrd for ZoneOffset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl FromStr for ZoneOffset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::of(s)
    }
}

impl TemporalAccessor for ZoneOffset {
    fn supported_fields(&self) -> &'static [ChronoField] {
        Self::SUPPORTED
    }

    fn field_value(&self, field: ChronoField) -> Option<i64> {
        match field {
            ChronoField::OffsetSeconds => Some(i64::from(self.seconds)),
            _ => None,
        }
    }

    fn query_offset(&self) -> Option<ZoneOffset> {
        Some(*self)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ZoneOffset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.id())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ZoneOffset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        ZoneOffset::of(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::temporal::queries;

    #[test]
    fn test_canonical_ids() {
        assert_eq!(ZoneOffset::UTC.id(), "Z");
        assert_eq!(ZoneOffset::MAX.id(), "+18:00");
        assert_eq!(ZoneOffset::MIN.id(), "-18:00");
        assert_eq!(ZoneOffset::of_total_seconds(3_723).unwrap().id(), "+01:02:03");
        assert_eq!(ZoneOffset::of_total_seconds(-1).unwrap().id(), "-00:00:01");
        assert!(matches!(ZoneOffset::of_hours(5).unwrap().id(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_total_seconds_bounds() {
        assert!(ZoneOffset::of_total_seconds(64_800).is_ok());
        assert_eq!(
            ZoneOffset::of_total_seconds(64_801).unwrap_err().kind(),
            ErrorKind::Range
        );
        assert_eq!(
            ZoneOffset::of_total_seconds(-64_801).unwrap_err().kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn test_compact_spellings() {
        let expected = ZoneOffset::of_hours_minutes_seconds(-2, -30, -15).unwrap();
        assert_eq!(ZoneOffset::of("-023015").unwrap(), expected);
        assert_eq!(ZoneOffset::of("-02:30:15").unwrap(), expected);
        assert_eq!(ZoneOffset::of("-2").unwrap(), ZoneOffset::of_hours(-2).unwrap());
        assert_eq!(ZoneOffset::of("+00").unwrap(), ZoneOffset::UTC);
    }

    #[test]
    fn test_malformed_text() {
        for text in ["", "A", "+", "+0A", "+01:0", "+01-00", "01:00", "+01:00:0", "+1:00"] {
            let err = ZoneOffset::of(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "{text}");
        }
        let err = ZoneOffset::of("+01-00").unwrap_err();
        assert!(matches!(err, Error::Format { position: 3, .. }));
        assert_eq!(ZoneOffset::of("+19:00").unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(ZoneOffset::of("+01:60").unwrap_err().kind(), ErrorKind::Range);
    }

    #[test]
    fn test_component_validation() {
        assert_eq!(
            ZoneOffset::of_hours_minutes_seconds(0, 1, -1).unwrap_err().kind(),
            ErrorKind::IllegalArgument
        );
        assert_eq!(
            ZoneOffset::of_hours_minutes_seconds(-1, 0, 1).unwrap_err().kind(),
            ErrorKind::IllegalArgument
        );
        assert_eq!(
            ZoneOffset::of_hours_minutes(0, 60).unwrap_err().kind(),
            ErrorKind::Range
        );
        assert_eq!(ZoneOffset::of_hours(19).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(
            ZoneOffset::of_hours_minutes(0, -45).unwrap().total_seconds(),
            -2_700
        );
    }

    #[test]
    fn test_ordering_is_descending() {
        let ten = ZoneOffset::of_hours(10).unwrap();
        let nine = ZoneOffset::of_hours(9).unwrap();
        assert!(ten < nine);
        assert!(ZoneOffset::MAX < ZoneOffset::UTC);
        assert!(ZoneOffset::UTC < ZoneOffset::MIN);
    }

    #[test]
    fn test_field_protocol() {
        let offset = ZoneOffset::of_hours(-3).unwrap();
        assert_eq!(offset.get(ChronoField::OffsetSeconds), Ok(-10_800));
        assert!(!offset.is_supported(ChronoField::Year));
        assert_eq!(offset.query(queries::offset()), Ok(Some(offset)));
        assert_eq!(offset.query(queries::zone_id()), Ok(None));
        assert_eq!(ZoneOffset::from_temporal(&offset), Ok(offset));
    }
}
