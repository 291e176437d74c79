// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Day-of-week with ISO numbering.

use crate::error::Error;
use crate::field::{ChronoField, ChronoUnit};
use crate::temporal::{read_field, TemporalAccessor};
use std::fmt;
use std::str::FromStr;

/// A day-of-week, Monday (1) to Sunday (7).
///
/// Arithmetic wraps around the week in both directions.
///
/// ```
/// use calendoch::DayOfWeek;
///
/// assert_eq!(DayOfWeek::of(1).unwrap().minus(8), DayOfWeek::of(2).unwrap());
/// assert_eq!(DayOfWeek::Sunday.plus(1), DayOfWeek::Monday);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayOfWeek {
    Monday = 1,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    const SUPPORTED: &'static [ChronoField] = &[ChronoField::DayOfWeek];

    pub fn of(day_of_week: i64) -> Result<Self, Error> {
        let value = ChronoField::DayOfWeek.check_valid_value(day_of_week)?;
        Ok(Self::ALL[(value - 1) as usize])
    }

    /// Day-of-week of any value that supports `DayOfWeek`.
    pub fn from_temporal(temporal: &dyn TemporalAccessor) -> Result<Self, Error> {
        Self::of(read_field(temporal, ChronoField::DayOfWeek)?)
    }

    /// Day-of-week of an epoch day; 1970-01-01 was a Thursday.
    pub(crate) fn of_epoch_day(epoch_day: i64) -> Self {
        Self::ALL[(epoch_day + 3).rem_euclid(7) as usize]
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub fn plus(self, days: i64) -> Self {
        let shift = days.rem_euclid(7) as usize;
        Self::ALL[(self as usize - 1 + shift) % 7]
    }

    pub fn minus(self, days: i64) -> Self {
        self.plus(-(days % 7))
    }

    pub const fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MONDAY",
            DayOfWeek::Tuesday => "TUESDAY",
            DayOfWeek::Wednesday => "WEDNESDAY",
            DayOfWeek::Thursday => "THURSDAY",
            DayOfWeek::Friday => "FRIDAY",
            DayOfWeek::Saturday => "SATURDAY",
            DayOfWeek::Sunday => "SUNDAY",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| Error::format(s, 0, "unknown day-of-week name"))
    }
}

impl From<DayOfWeek> for chrono::Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => chrono::Weekday::Mon,
            DayOfWeek::Tuesday => chrono::Weekday::Tue,
            DayOfWeek::Wednesday => chrono::Weekday::Wed,
            DayOfWeek::Thursday => chrono::Weekday::Thu,
            DayOfWeek::Friday => chrono::Weekday::Fri,
            DayOfWeek::Saturday => chrono::Weekday::Sat,
            DayOfWeek::Sunday => chrono::Weekday::Sun,
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        Self::ALL[day.num_days_from_monday() as usize]
    }
}

impl TemporalAccessor for DayOfWeek {
    fn supported_fields(&self) -> &'static [ChronoField] {
        Self::SUPPORTED
    }

    fn field_value(&self, field: ChronoField) -> Option<i64> {
        match field {
            ChronoField::DayOfWeek => Some(i64::from(self.value())),
            _ => None,
        }
    }

    fn query_precision(&self) -> Option<ChronoUnit> {
        Some(ChronoUnit::Days)
    }
}
