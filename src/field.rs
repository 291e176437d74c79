// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Field and unit tokens of the temporal protocol.
//!
//! A [`ChronoField`] names a queryable component of a value (day-of-month,
//! year-of-era, ...).  Every field carries an outer [`ValueRange`]; a value
//! type may narrow that range (February narrows `DayOfMonth` to `1 - 28/29`).
//!
//! A [`ChronoUnit`] names an amount of time used by `plus`/`minus`/`until`.

use crate::error::Error;
use crate::iso::{MAX_YEAR, MIN_YEAR};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════
// ValueRange
// ═══════════════════════════════════════════════════════════════════════════

/// The range of valid values for a field.
///
/// Most fields have a fixed range, but some (day-of-month, day-of-year) have
/// a maximum that depends on context, so both the smallest and the largest
/// possible maximum are tracked: `1 - 28/31`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ValueRange {
    min_smallest: i64,
    min_largest: i64,
    max_smallest: i64,
    max_largest: i64,
}

impl ValueRange {
    /// A fixed range `min..=max`.
    pub const fn of(min: i64, max: i64) -> Self {
        Self {
            min_smallest: min,
            min_largest: min,
            max_smallest: max,
            max_largest: max,
        }
    }

    /// A range with a fixed minimum and a variable maximum.
    pub const fn of_variable_max(min: i64, max_smallest: i64, max_largest: i64) -> Self {
        Self {
            min_smallest: min,
            min_largest: min,
            max_smallest,
            max_largest,
        }
    }

    #[inline]
    pub const fn minimum(&self) -> i64 {
        self.min_smallest
    }

    #[inline]
    pub const fn largest_minimum(&self) -> i64 {
        self.min_largest
    }

    #[inline]
    pub const fn smallest_maximum(&self) -> i64 {
        self.max_smallest
    }

    #[inline]
    pub const fn maximum(&self) -> i64 {
        self.max_largest
    }

    /// `true` when neither bound varies.
    pub const fn is_fixed(&self) -> bool {
        self.min_smallest == self.min_largest && self.max_smallest == self.max_largest
    }

    /// `true` when every value in the range fits in an `i32`.
    pub const fn is_int_value(&self) -> bool {
        self.min_smallest >= i32::MIN as i64 && self.max_largest <= i32::MAX as i64
    }

    #[inline]
    pub const fn is_valid_value(&self, value: i64) -> bool {
        value >= self.min_smallest && value <= self.max_largest
    }

    pub const fn is_valid_int_value(&self, value: i64) -> bool {
        self.is_int_value() && self.is_valid_value(value)
    }

    /// Validates `value` against this range on behalf of `field`.
    pub fn check_valid_value(&self, value: i64, field: ChronoField) -> Result<i64, Error> {
        if self.is_valid_value(value) {
            Ok(value)
        } else {
            Err(Error::range(
                field.name(),
                value,
                self.min_smallest,
                self.max_largest,
            ))
        }
    }

    /// Validates `value` and narrows it to `i32`.
    ///
    /// Fails with a range error when the range itself does not fit `i32`,
    /// even if `value` would.
    pub fn check_valid_int_value(&self, value: i64, field: ChronoField) -> Result<i32, Error> {
        if !self.is_int_value() {
            return Err(Error::RangeMessage(format!(
                "invalid field {} for get(): range {} does not fit in an i32, use get_long()",
                field, self
            )));
        }
        self.check_valid_value(value, field).map(|v| v as i32)
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.min_smallest)?;
        if self.min_smallest != self.min_largest {
            write!(f, "/{}", self.min_largest)?;
        }
        write!(f, " - {}", self.max_smallest)?;
        if self.max_smallest != self.max_largest {
            write!(f, "/{}", self.max_largest)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ChronoUnit
// ═══════════════════════════════════════════════════════════════════════════

/// Standard units of time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChronoUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    HalfDays,
    Days,
    Weeks,
    Months,
    Years,
    Decades,
    Centuries,
    Millennia,
    Eras,
    Forever,
}

impl ChronoUnit {
    /// Estimated length of the unit as `(seconds, nanos)`.
    ///
    /// Date units use the ISO average year of 365.2425 days.
    pub const fn duration(self) -> (i64, u32) {
        const YEAR_SECS: i64 = 31_556_952;
        match self {
            ChronoUnit::Nanos => (0, 1),
            ChronoUnit::Micros => (0, 1_000),
            ChronoUnit::Millis => (0, 1_000_000),
            ChronoUnit::Seconds => (1, 0),
            ChronoUnit::Minutes => (60, 0),
            ChronoUnit::Hours => (3_600, 0),
            ChronoUnit::HalfDays => (43_200, 0),
            ChronoUnit::Days => (86_400, 0),
            ChronoUnit::Weeks => (7 * 86_400, 0),
            ChronoUnit::Months => (YEAR_SECS / 12, 0),
            ChronoUnit::Years => (YEAR_SECS, 0),
            ChronoUnit::Decades => (YEAR_SECS * 10, 0),
            ChronoUnit::Centuries => (YEAR_SECS * 100, 0),
            ChronoUnit::Millennia => (YEAR_SECS * 1_000, 0),
            ChronoUnit::Eras => (YEAR_SECS * 1_000_000_000, 0),
            ChronoUnit::Forever => (i64::MAX, 999_999_999),
        }
    }

    /// `true` for units whose length varies (days and longer).
    pub const fn is_duration_estimated(self) -> bool {
        matches!(
            self,
            ChronoUnit::Days
                | ChronoUnit::Weeks
                | ChronoUnit::Months
                | ChronoUnit::Years
                | ChronoUnit::Decades
                | ChronoUnit::Centuries
                | ChronoUnit::Millennia
                | ChronoUnit::Eras
                | ChronoUnit::Forever
        )
    }

    pub const fn is_date_based(self) -> bool {
        self.is_duration_estimated() && !matches!(self, ChronoUnit::Forever)
    }

    pub const fn is_time_based(self) -> bool {
        !self.is_duration_estimated()
    }

    pub const fn name(self) -> &'static str {
        match self {
            ChronoUnit::Nanos => "Nanos",
            ChronoUnit::Micros => "Micros",
            ChronoUnit::Millis => "Millis",
            ChronoUnit::Seconds => "Seconds",
            ChronoUnit::Minutes => "Minutes",
            ChronoUnit::Hours => "Hours",
            ChronoUnit::HalfDays => "HalfDays",
            ChronoUnit::Days => "Days",
            ChronoUnit::Weeks => "Weeks",
            ChronoUnit::Months => "Months",
            ChronoUnit::Years => "Years",
            ChronoUnit::Decades => "Decades",
            ChronoUnit::Centuries => "Centuries",
            ChronoUnit::Millennia => "Millennia",
            ChronoUnit::Eras => "Eras",
            ChronoUnit::Forever => "Forever",
        }
    }
}

impl fmt::Display for ChronoUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ChronoField
// ═══════════════════════════════════════════════════════════════════════════

/// Standard fields of the ISO calendar and of the time line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChronoField {
    NanoOfSecond,
    NanoOfDay,
    MicroOfSecond,
    MicroOfDay,
    MilliOfSecond,
    MilliOfDay,
    SecondOfMinute,
    SecondOfDay,
    MinuteOfHour,
    MinuteOfDay,
    HourOfAmPm,
    ClockHourOfAmPm,
    HourOfDay,
    ClockHourOfDay,
    AmPmOfDay,
    DayOfWeek,
    AlignedDayOfWeekInMonth,
    AlignedDayOfWeekInYear,
    DayOfMonth,
    DayOfYear,
    EpochDay,
    AlignedWeekOfMonth,
    AlignedWeekOfYear,
    MonthOfYear,
    ProlepticMonth,
    YearOfEra,
    Year,
    Era,
    InstantSeconds,
    OffsetSeconds,
}

impl ChronoField {
    /// Every field, in declaration order.
    pub const ALL: [ChronoField; 30] = [
        ChronoField::NanoOfSecond,
        ChronoField::NanoOfDay,
        ChronoField::MicroOfSecond,
        ChronoField::MicroOfDay,
        ChronoField::MilliOfSecond,
        ChronoField::MilliOfDay,
        ChronoField::SecondOfMinute,
        ChronoField::SecondOfDay,
        ChronoField::MinuteOfHour,
        ChronoField::MinuteOfDay,
        ChronoField::HourOfAmPm,
        ChronoField::ClockHourOfAmPm,
        ChronoField::HourOfDay,
        ChronoField::ClockHourOfDay,
        ChronoField::AmPmOfDay,
        ChronoField::DayOfWeek,
        ChronoField::AlignedDayOfWeekInMonth,
        ChronoField::AlignedDayOfWeekInYear,
        ChronoField::DayOfMonth,
        ChronoField::DayOfYear,
        ChronoField::EpochDay,
        ChronoField::AlignedWeekOfMonth,
        ChronoField::AlignedWeekOfYear,
        ChronoField::MonthOfYear,
        ChronoField::ProlepticMonth,
        ChronoField::YearOfEra,
        ChronoField::Year,
        ChronoField::Era,
        ChronoField::InstantSeconds,
        ChronoField::OffsetSeconds,
    ];

    /// The outer range of the field, independent of any particular value.
    pub const fn range(self) -> ValueRange {
        use ChronoField::*;
        match self {
            NanoOfSecond => ValueRange::of(0, 999_999_999),
            NanoOfDay => ValueRange::of(0, 86_400 * 1_000_000_000 - 1),
            MicroOfSecond => ValueRange::of(0, 999_999),
            MicroOfDay => ValueRange::of(0, 86_400 * 1_000_000 - 1),
            MilliOfSecond => ValueRange::of(0, 999),
            MilliOfDay => ValueRange::of(0, 86_400 * 1_000 - 1),
            SecondOfMinute => ValueRange::of(0, 59),
            SecondOfDay => ValueRange::of(0, 86_400 - 1),
            MinuteOfHour => ValueRange::of(0, 59),
            MinuteOfDay => ValueRange::of(0, 24 * 60 - 1),
            HourOfAmPm => ValueRange::of(0, 11),
            ClockHourOfAmPm => ValueRange::of(1, 12),
            HourOfDay => ValueRange::of(0, 23),
            ClockHourOfDay => ValueRange::of(1, 24),
            AmPmOfDay => ValueRange::of(0, 1),
            DayOfWeek => ValueRange::of(1, 7),
            AlignedDayOfWeekInMonth => ValueRange::of(1, 7),
            AlignedDayOfWeekInYear => ValueRange::of(1, 7),
            DayOfMonth => ValueRange::of_variable_max(1, 28, 31),
            DayOfYear => ValueRange::of_variable_max(1, 365, 366),
            EpochDay => ValueRange::of(-365_243_219_162, 365_241_780_471),
            AlignedWeekOfMonth => ValueRange::of_variable_max(1, 4, 5),
            AlignedWeekOfYear => ValueRange::of(1, 53),
            MonthOfYear => ValueRange::of(1, 12),
            ProlepticMonth => ValueRange::of(MIN_YEAR * 12, MAX_YEAR * 12 + 11),
            YearOfEra => ValueRange::of_variable_max(1, MAX_YEAR, MAX_YEAR + 1),
            Year => ValueRange::of(MIN_YEAR, MAX_YEAR),
            Era => ValueRange::of(0, 1),
            InstantSeconds => ValueRange::of(i64::MIN, i64::MAX),
            OffsetSeconds => ValueRange::of(-18 * 3_600, 18 * 3_600),
        }
    }

    /// The unit the field is measured in.
    pub const fn base_unit(self) -> ChronoUnit {
        use ChronoField::*;
        match self {
            NanoOfSecond | NanoOfDay => ChronoUnit::Nanos,
            MicroOfSecond | MicroOfDay => ChronoUnit::Micros,
            MilliOfSecond | MilliOfDay => ChronoUnit::Millis,
            SecondOfMinute | SecondOfDay | InstantSeconds | OffsetSeconds => ChronoUnit::Seconds,
            MinuteOfHour | MinuteOfDay => ChronoUnit::Minutes,
            HourOfAmPm | ClockHourOfAmPm | HourOfDay | ClockHourOfDay => ChronoUnit::Hours,
            AmPmOfDay => ChronoUnit::HalfDays,
            DayOfWeek | AlignedDayOfWeekInMonth | AlignedDayOfWeekInYear | DayOfMonth
            | DayOfYear | EpochDay => ChronoUnit::Days,
            AlignedWeekOfMonth | AlignedWeekOfYear => ChronoUnit::Weeks,
            MonthOfYear | ProlepticMonth => ChronoUnit::Months,
            YearOfEra | Year => ChronoUnit::Years,
            Era => ChronoUnit::Eras,
        }
    }

    /// `true` for fields that describe a calendar date.
    pub const fn is_date_based(self) -> bool {
        use ChronoField::*;
        matches!(
            self,
            DayOfWeek
                | AlignedDayOfWeekInMonth
                | AlignedDayOfWeekInYear
                | DayOfMonth
                | DayOfYear
                | EpochDay
                | AlignedWeekOfMonth
                | AlignedWeekOfYear
                | MonthOfYear
                | ProlepticMonth
                | YearOfEra
                | Year
                | Era
        )
    }

    /// `true` for fields that describe a time of day.
    pub const fn is_time_based(self) -> bool {
        (self as u8) < (ChronoField::DayOfWeek as u8)
    }

    /// Validates `value` against the outer range of this field.
    pub fn check_valid_value(self, value: i64) -> Result<i64, Error> {
        self.range().check_valid_value(value, self)
    }

    /// Validates `value` against the outer range and narrows it to `i32`.
    pub fn check_valid_int_value(self, value: i64) -> Result<i32, Error> {
        self.range().check_valid_int_value(value, self)
    }

    pub const fn name(self) -> &'static str {
        use ChronoField::*;
        match self {
            NanoOfSecond => "NanoOfSecond",
            NanoOfDay => "NanoOfDay",
            MicroOfSecond => "MicroOfSecond",
            MicroOfDay => "MicroOfDay",
            MilliOfSecond => "MilliOfSecond",
            MilliOfDay => "MilliOfDay",
            SecondOfMinute => "SecondOfMinute",
            SecondOfDay => "SecondOfDay",
            MinuteOfHour => "MinuteOfHour",
            MinuteOfDay => "MinuteOfDay",
            HourOfAmPm => "HourOfAmPm",
            ClockHourOfAmPm => "ClockHourOfAmPm",
            HourOfDay => "HourOfDay",
            ClockHourOfDay => "ClockHourOfDay",
            AmPmOfDay => "AmPmOfDay",
            DayOfWeek => "DayOfWeek",
            AlignedDayOfWeekInMonth => "AlignedDayOfWeekInMonth",
            AlignedDayOfWeekInYear => "AlignedDayOfWeekInYear",
            DayOfMonth => "DayOfMonth",
            DayOfYear => "DayOfYear",
            EpochDay => "EpochDay",
            AlignedWeekOfMonth => "AlignedWeekOfMonth",
            AlignedWeekOfYear => "AlignedWeekOfYear",
            MonthOfYear => "MonthOfYear",
            ProlepticMonth => "ProlepticMonth",
            YearOfEra => "YearOfEra",
            Year => "Year",
            Era => "Era",
            InstantSeconds => "InstantSeconds",
            OffsetSeconds => "OffsetSeconds",
        }
    }
}

impl fmt::Display for ChronoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
