// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Month and day-of-month without a year.

use crate::civil::{Date, Month};
use crate::clock::Clock;
use crate::error::Error;
use crate::field::{ChronoField, ValueRange};
use crate::iso::{self, IsoChronology};
use crate::temporal::{read_field, TemporalAccessor};
use std::fmt;
use std::str::FromStr;

/// A month-day such as `--12-03`.
///
/// The day is validated against the longest form of the month, so
/// `--02-29` is always a valid month-day; whether it exists in a given year
/// is answered by [`MonthDay::is_valid_year`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthDay {
    month: Month,
    day: u8,
}

impl MonthDay {
    const SUPPORTED: &'static [ChronoField] =
        &[ChronoField::DayOfMonth, ChronoField::MonthOfYear];

    pub fn of(month: i64, day: i64) -> Result<Self, Error> {
        Self::of_month(Month::of(month)?, day)
    }

    pub fn of_month(month: Month, day: i64) -> Result<Self, Error> {
        let day = ChronoField::DayOfMonth.check_valid_value(day)?;
        if day > i64::from(month.max_length()) {
            return Err(Error::RangeMessage(format!(
                "illegal value for DayOfMonth field, value {day} is not valid for month {month}"
            )));
        }
        Ok(Self {
            month,
            day: day as u8,
        })
    }

    /// Today's month-day in the zone of `clock`.
    pub fn now(clock: &Clock) -> Result<Self, Error> {
        let today = Date::now(clock)?;
        Self::of_month(today.month(), i64::from(today.day_of_month()))
    }

    /// Month-day of any value that supports both fields.
    pub fn from_temporal(temporal: &dyn TemporalAccessor) -> Result<Self, Error> {
        let month = read_field(temporal, ChronoField::MonthOfYear)?;
        let day = read_field(temporal, ChronoField::DayOfMonth)?;
        Self::of(month, day)
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn month(&self) -> Month {
        self.month
    }

    #[inline]
    pub const fn month_value(&self) -> u8 {
        self.month.value()
    }

    #[inline]
    pub const fn day_of_month(&self) -> u8 {
        self.day
    }

    /// `false` only for Feb 29 in a non-leap year.
    pub const fn is_valid_year(&self, year: i64) -> bool {
        !(self.day == 29 && matches!(self.month, Month::February) && !iso::is_leap_year(year))
    }

    // ── adjusters ─────────────────────────────────────────────────────

    /// Same day in `month`, clamped to the month's longest length.
    pub fn with_month(&self, month: i64) -> Result<Self, Error> {
        Ok(self.with(Month::of(month)?))
    }

    pub fn with(&self, month: Month) -> Self {
        Self {
            month,
            day: self.day.min(month.max_length()),
        }
    }

    pub fn with_day_of_month(&self, day: i64) -> Result<Self, Error> {
        if day == i64::from(self.day) {
            return Ok(*self);
        }
        Self::of_month(self.month, day)
    }

    /// This month-day in `year`; Feb 29 becomes Feb 28 in non-leap years.
    ///
    /// ```
    /// use calendoch::{Date, MonthDay};
    ///
    /// let leap_day = MonthDay::of(2, 29).unwrap();
    /// assert_eq!(leap_day.at_year(2011).unwrap(), Date::of(2011, 2, 28).unwrap());
    /// ```
    pub fn at_year(&self, year: i64) -> Result<Date, Error> {
        let day = if self.is_valid_year(year) { self.day } else { 28 };
        Date::of(year, i64::from(self.month.value()), i64::from(day))
    }

    /// `date` moved to this month-day, the day clamped to the month.
    pub fn adjust_date(&self, date: Date) -> Result<Date, Error> {
        let moved = date.with_month(i64::from(self.month.value()))?;
        let day = self.day.min(moved.length_of_month());
        moved.with_day_of_month(i64::from(day))
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{:02}-{:02}", self.month.value(), self.day)
    }
}

impl FromStr for MonthDay {
    type Err = Error;

    /// Parses exactly `--MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let expected = b"--00-00";
        for (i, &e) in expected.iter().enumerate() {
            let ok = match (bytes.get(i), e) {
                (Some(b), b'0') => b.is_ascii_digit(),
                (Some(&b), e) => b == e,
                (None, _) => false,
            };
            if !ok {
                return Err(Error::format(s, i, "expected --MM-DD"));
            }
        }
        if bytes.len() != expected.len() {
            return Err(Error::format(s, expected.len(), "unparsed text found"));
        }
        let two = |at: usize| i64::from(bytes[at] - b'0') * 10 + i64::from(bytes[at + 1] - b'0');
        Self::of(two(2), two(5))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MonthDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MonthDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl TemporalAccessor for MonthDay {
    fn supported_fields(&self) -> &'static [ChronoField] {
        Self::SUPPORTED
    }

    fn field_value(&self, field: ChronoField) -> Option<i64> {
        match field {
            ChronoField::DayOfMonth => Some(i64::from(self.day)),
            ChronoField::MonthOfYear => Some(i64::from(self.month.value())),
            _ => None,
        }
    }

    fn field_range(&self, field: ChronoField) -> ValueRange {
        match field {
            ChronoField::DayOfMonth => ValueRange::of_variable_max(
                1,
                i64::from(self.month.min_length()),
                i64::from(self.month.max_length()),
            ),
            _ => field.range(),
        }
    }

    fn query_chronology(&self) -> Option<IsoChronology> {
        Some(IsoChronology)
    }
}
