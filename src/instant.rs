// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! A point on the UTC time line.
//!
//! [`Instant`] stores signed seconds since 1970-01-01T00:00Z plus a
//! nanosecond-of-second in `0..1_000_000_000`.  The supported range is the
//! whole proleptic year range of the crate:
//!
//! ```text
//! -1000000000-01-01T00:00:00Z ..= 1000000000-12-31T23:59:59.999999999Z
//! ```
//!
//! Conversions to and from `chrono::DateTime<Utc>` are provided for interop;
//! chrono's range is narrower, so the conversion *to* chrono is fallible.

use crate::error::Error;
use crate::field::{ChronoField, ChronoUnit, ValueRange};
use crate::iso;
use crate::temporal::{Temporal, TemporalAccessor};
use chrono::{DateTime, Utc};
use qtty::{Day, Days, Seconds};
use std::fmt;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const SECONDS_PER_DAY: i64 = 86_400;

/// JD of the Unix epoch 1970-01-01T00:00Z.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

// ═══════════════════════════════════════════════════════════════════════════
// Instant
// ═══════════════════════════════════════════════════════════════════════════

/// An instantaneous point on the time line, nanosecond precision.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Instant {
    seconds: i64,
    nanos: u32,
}

impl Instant {
    /// Smallest supported epoch second.
    pub const MIN_SECOND: i64 = -31_557_014_167_219_200;
    /// Largest supported epoch second.
    pub const MAX_SECOND: i64 = 31_556_889_864_403_199;

    pub const EPOCH: Instant = Instant {
        seconds: 0,
        nanos: 0,
    };
    pub const MIN: Instant = Instant {
        seconds: Self::MIN_SECOND,
        nanos: 0,
    };
    pub const MAX: Instant = Instant {
        seconds: Self::MAX_SECOND,
        nanos: 999_999_999,
    };

    const SUPPORTED: &'static [ChronoField] = &[
        ChronoField::NanoOfSecond,
        ChronoField::MicroOfSecond,
        ChronoField::MilliOfSecond,
        ChronoField::InstantSeconds,
    ];

    // ── constructors ──────────────────────────────────────────────────

    /// Instant from epoch seconds and a nanosecond adjustment of any sign.
    pub fn of_epoch_second(seconds: i64, nano_adjustment: i64) -> Result<Self, Error> {
        let carry = nano_adjustment.div_euclid(NANOS_PER_SECOND);
        let nanos = nano_adjustment.rem_euclid(NANOS_PER_SECOND) as u32;
        let seconds = seconds
            .checked_add(carry)
            .ok_or(Error::Arithmetic("instant seconds"))?;
        Self::create(seconds, nanos)
    }

    pub fn of_epoch_milli(millis: i64) -> Result<Self, Error> {
        let seconds = millis.div_euclid(1_000);
        let nanos = (millis.rem_euclid(1_000) * 1_000_000) as u32;
        Self::create(seconds, nanos)
    }

    /// Instant from a total nanosecond count since the epoch.
    pub(crate) fn of_total_nanos(total: i128) -> Result<Self, Error> {
        let seconds = total.div_euclid(NANOS_PER_SECOND as i128);
        let nanos = total.rem_euclid(NANOS_PER_SECOND as i128) as u32;
        let seconds = i64::try_from(seconds).map_err(|_| Error::Arithmetic("instant seconds"))?;
        Self::create(seconds, nanos)
    }

    fn create(seconds: i64, nanos: u32) -> Result<Self, Error> {
        if !(Self::MIN_SECOND..=Self::MAX_SECOND).contains(&seconds) {
            return Err(Error::range(
                "InstantSeconds",
                seconds,
                Self::MIN_SECOND,
                Self::MAX_SECOND,
            ));
        }
        Ok(Self { seconds, nanos })
    }

    /// The current instant read from the system wall clock.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn epoch_second(&self) -> i64 {
        self.seconds
    }

    #[inline]
    pub const fn nano(&self) -> u32 {
        self.nanos
    }

    /// Milliseconds since the epoch.
    pub fn to_epoch_milli(&self) -> Result<i64, Error> {
        self.seconds
            .checked_mul(1_000)
            .and_then(|ms| ms.checked_add(i64::from(self.nanos / 1_000_000)))
            .ok_or(Error::Arithmetic("epoch milliseconds"))
    }

    #[inline]
    pub(crate) fn total_nanos(&self) -> i128 {
        self.seconds as i128 * NANOS_PER_SECOND as i128 + self.nanos as i128
    }

    // ── arithmetic ────────────────────────────────────────────────────

    pub fn plus_seconds(&self, seconds: i64) -> Result<Self, Error> {
        self.plus_nanos_i128(seconds as i128 * NANOS_PER_SECOND as i128)
    }

    pub fn plus_millis(&self, millis: i64) -> Result<Self, Error> {
        self.plus_nanos_i128(millis as i128 * 1_000_000)
    }

    pub fn plus_nanos(&self, nanos: i64) -> Result<Self, Error> {
        self.plus_nanos_i128(nanos as i128)
    }

    pub(crate) fn plus_nanos_i128(&self, nanos: i128) -> Result<Self, Error> {
        if nanos == 0 {
            return Ok(*self);
        }
        let total = self
            .total_nanos()
            .checked_add(nanos)
            .ok_or(Error::Arithmetic("instant nanos"))?;
        Self::of_total_nanos(total)
    }

    // ── UTC helpers ───────────────────────────────────────────────────

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the value falls outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.seconds, self.nanos)
    }

    /// Build an instant from a `chrono::DateTime<Utc>`.
    ///
    /// Every chrono timestamp lies inside this crate's range.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self {
            seconds: datetime.timestamp(),
            nanos: datetime.timestamp_subsec_nanos().min(999_999_999),
        }
    }

    /// Julian Day (UTC-based) of this instant.
    pub fn to_julian_day(&self) -> Days {
        let seconds = Seconds::new(self.seconds as f64 + self.nanos as f64 / 1e9);
        Days::new(UNIX_EPOCH_JD) + seconds.to::<Day>()
    }
}

impl Default for Instant {
    fn default() -> Self {
        Self::EPOCH
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl fmt::Display for Instant {
    /// ISO-8601 in UTC, fraction printed in groups of three digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let epoch_day = self.seconds.div_euclid(SECONDS_PER_DAY);
        let secs_of_day = self.seconds.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = iso::from_epoch_day(epoch_day);
        crate::civil::write_ymd(f, year, month, day)?;
        write!(
            f,
            "T{:02}:{:02}:{:02}",
            secs_of_day / 3_600,
            secs_of_day / 60 % 60,
            secs_of_day % 60
        )?;
        if self.nanos > 0 {
            if self.nanos % 1_000_000 == 0 {
                write!(f, ".{:03}", self.nanos / 1_000_000)?;
            } else if self.nanos % 1_000 == 0 {
                write!(f, ".{:06}", self.nanos / 1_000)?;
            } else {
                write!(f, ".{:09}", self.nanos)?;
            }
        }
        f.write_str("Z")
    }
}

// ── chrono interop ────────────────────────────────────────────────────────

impl From<DateTime<Utc>> for Instant {
    #[inline]
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_utc(datetime)
    }
}

impl TryFrom<Instant> for DateTime<Utc> {
    type Error = Error;

    fn try_from(instant: Instant) -> Result<Self, Self::Error> {
        instant.to_utc().ok_or_else(|| {
            Error::RangeMessage(format!("instant {instant} outside chrono::DateTime range"))
        })
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl serde::Serialize for Instant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut t = serializer.serialize_tuple(2)?;
        t.serialize_element(&self.seconds)?;
        t.serialize_element(&self.nanos)?;
        t.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Instant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (seconds, nanos) = <(i64, u32)>::deserialize(deserializer)?;
        Instant::of_epoch_second(seconds, i64::from(nanos)).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Temporal protocol
// ═══════════════════════════════════════════════════════════════════════════

impl TemporalAccessor for Instant {
    fn supported_fields(&self) -> &'static [ChronoField] {
        Self::SUPPORTED
    }

    fn field_value(&self, field: ChronoField) -> Option<i64> {
        match field {
            ChronoField::NanoOfSecond => Some(i64::from(self.nanos)),
            ChronoField::MicroOfSecond => Some(i64::from(self.nanos / 1_000)),
            ChronoField::MilliOfSecond => Some(i64::from(self.nanos / 1_000_000)),
            ChronoField::InstantSeconds => Some(self.seconds),
            _ => None,
        }
    }

    fn field_range(&self, field: ChronoField) -> ValueRange {
        match field {
            ChronoField::InstantSeconds => ValueRange::of(Self::MIN_SECOND, Self::MAX_SECOND),
            _ => field.range(),
        }
    }

    fn query_precision(&self) -> Option<ChronoUnit> {
        Some(ChronoUnit::Nanos)
    }
}

/// Nanoseconds in one `unit`, for the units an instant supports.
const fn unit_nanos(unit: ChronoUnit) -> Option<i128> {
    let n = match unit {
        ChronoUnit::Nanos => 1,
        ChronoUnit::Micros => 1_000,
        ChronoUnit::Millis => 1_000_000,
        ChronoUnit::Seconds => NANOS_PER_SECOND,
        ChronoUnit::Minutes => 60 * NANOS_PER_SECOND,
        ChronoUnit::Hours => 3_600 * NANOS_PER_SECOND,
        ChronoUnit::HalfDays => 43_200 * NANOS_PER_SECOND,
        ChronoUnit::Days => SECONDS_PER_DAY * NANOS_PER_SECOND,
        _ => return None,
    };
    Some(n as i128)
}

impl Temporal for Instant {
    fn is_supported_unit(&self, unit: ChronoUnit) -> bool {
        unit_nanos(unit).is_some()
    }

    fn with_field(&self, field: ChronoField, value: i64) -> Result<Self, Error> {
        let value = self.field_range(field).check_valid_value(value, field)?;
        match field {
            ChronoField::NanoOfSecond => Self::create(self.seconds, value as u32),
            ChronoField::MicroOfSecond => Self::create(self.seconds, value as u32 * 1_000),
            ChronoField::MilliOfSecond => Self::create(self.seconds, value as u32 * 1_000_000),
            ChronoField::InstantSeconds => Self::create(value, self.nanos),
            _ => Err(Error::UnsupportedField(field)),
        }
    }

    fn plus(&self, amount: i64, unit: ChronoUnit) -> Result<Self, Error> {
        let per = unit_nanos(unit).ok_or(Error::UnsupportedUnit(unit))?;
        let nanos = (amount as i128)
            .checked_mul(per)
            .ok_or(Error::Arithmetic("instant plus"))?;
        self.plus_nanos_i128(nanos)
    }

    fn until(&self, end: &Self, unit: ChronoUnit) -> Result<i64, Error> {
        let per = unit_nanos(unit).ok_or(Error::UnsupportedUnit(unit))?;
        // i128 division truncates toward zero.
        let amount = (end.total_nanos() - self.total_nanos()) / per;
        i64::try_from(amount).map_err(|_| Error::Arithmetic("instant until"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::TimeZone;

    #[test]
    fn test_epoch_second_normalizes_negative_nanos() {
        let i = Instant::of_epoch_second(3, -1).unwrap();
        assert_eq!(i.epoch_second(), 2);
        assert_eq!(i.nano(), 999_999_999);
    }

    #[test]
    fn test_epoch_milli_roundtrip() {
        let i = Instant::of_epoch_milli(-1).unwrap();
        assert_eq!(i.epoch_second(), -1);
        assert_eq!(i.nano(), 999_000_000);
        assert_eq!(i.to_epoch_milli(), Ok(-1));
    }

    #[test]
    fn test_range_limits() {
        assert!(Instant::of_epoch_second(Instant::MAX_SECOND, 999_999_999).is_ok());
        let err = Instant::of_epoch_second(Instant::MAX_SECOND + 1, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(Instant::MAX.to_string(), "+1000000000-12-31T23:59:59.999999999Z");
        assert_eq!(Instant::MIN.to_string(), "-1000000000-01-01T00:00:00Z");
    }

    #[test]
    fn test_display() {
        assert_eq!(Instant::EPOCH.to_string(), "1970-01-01T00:00:00Z");
        let i = Instant::of_epoch_second(1_341_483_330, 500_000_000).unwrap();
        assert_eq!(i.to_string(), "2012-07-05T10:15:30.500Z");
        let i = Instant::of_epoch_second(-1, 1_000).unwrap();
        assert_eq!(i.to_string(), "1969-12-31T23:59:59.000001Z");
    }

    #[test]
    fn test_utc_roundtrip() {
        let datetime = Utc.with_ymd_and_hms(2012, 7, 5, 10, 15, 30).unwrap();
        let instant = Instant::from(datetime);
        assert_eq!(instant.epoch_second(), 1_341_483_330);
        assert_eq!(DateTime::<Utc>::try_from(instant), Ok(datetime));
        assert!(DateTime::<Utc>::try_from(Instant::MAX).is_err());
    }

    #[test]
    fn test_julian_day_of_epoch_and_j2000() {
        assert_eq!(Instant::EPOCH.to_julian_day(), Days::new(2_440_587.5));
        let j2000 = Instant::of_epoch_second(946_728_000, 0).unwrap();
        assert!((j2000.to_julian_day() - Days::new(2_451_545.0)).abs() < Days::new(1e-9));
    }

    #[test]
    fn test_fields() {
        let i = Instant::of_epoch_second(12, 345_678_901).unwrap();
        assert_eq!(i.get(ChronoField::MilliOfSecond), Ok(345));
        assert_eq!(i.get(ChronoField::MicroOfSecond), Ok(345_678));
        assert_eq!(i.get_long(ChronoField::InstantSeconds), Ok(12));
        assert_eq!(
            i.get(ChronoField::InstantSeconds).unwrap_err().kind(),
            ErrorKind::Range
        );
        assert_eq!(
            i.get(ChronoField::DayOfMonth).unwrap_err().kind(),
            ErrorKind::UnsupportedField
        );
    }

    #[test]
    fn test_plus_and_until() {
        let a = Instant::of_epoch_second(0, 0).unwrap();
        let b = a.plus(90, ChronoUnit::Minutes).unwrap();
        assert_eq!(b.epoch_second(), 5_400);
        assert_eq!(a.until(&b, ChronoUnit::Hours), Ok(1));
        assert_eq!(b.until(&a, ChronoUnit::Hours), Ok(-1));
        assert_eq!(
            a.plus(1, ChronoUnit::Months).unwrap_err().kind(),
            ErrorKind::UnsupportedField
        );
        assert_eq!(
            Instant::MAX.plus_nanos(1).unwrap_err().kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn test_with_field() {
        let i = Instant::of_epoch_second(7, 5).unwrap();
        let j = i.with_field(ChronoField::MilliOfSecond, 250).unwrap();
        assert_eq!(j.nano(), 250_000_000);
        assert_eq!(
            i.with_field(ChronoField::NanoOfSecond, 1_000_000_000)
                .unwrap_err()
                .kind(),
            ErrorKind::Range
        );
    }
}
