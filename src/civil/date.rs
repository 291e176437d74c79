// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Proleptic ISO dates.
//!
//! [`Date`] is a year-month-day triple in the full year range of the crate.
//! Month and year arithmetic resolves to the last valid day of the target
//! month, so `2012-01-31` plus one month is `2012-02-29` and plus one more
//! year is `2013-02-28`.
//!
//! Day arithmetic goes through the epoch day, the count of days since
//! 1970-01-01, which is also the value of the `EpochDay` field.

use crate::civil::{parse_year, write_year, DayOfWeek, Month};
use crate::clock::Clock;
use crate::error::Error;
use crate::field::{ChronoField, ChronoUnit, ValueRange};
use crate::iso::{self, Era, IsoChronology, MAX_YEAR};
use crate::temporal::{Temporal, TemporalAccessor};
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_DAY: i64 = 86_400;

/// A date in the proleptic ISO calendar.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date {
    year: i32,
    month: u8,
    day: u8,
}

impl Date {
    /// `-999999999-01-01`.
    pub const MIN: Date = Date {
        year: -999_999_999,
        month: 1,
        day: 1,
    };
    /// `+999999999-12-31`.
    pub const MAX: Date = Date {
        year: 999_999_999,
        month: 12,
        day: 31,
    };
    /// `1970-01-01`.
    pub const EPOCH: Date = Date {
        year: 1970,
        month: 1,
        day: 1,
    };

    const SUPPORTED: &'static [ChronoField] = &[
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
    ];

    // ── constructors ──────────────────────────────────────────────────

    /// Date from year, month and day, all validated.
    ///
    /// ```
    /// use calendoch::{Date, ErrorKind};
    ///
    /// let date = Date::of(2012, 2, 29).unwrap();
    /// assert_eq!(date.to_string(), "2012-02-29");
    /// assert_eq!(Date::of(2011, 2, 29).unwrap_err().kind(), ErrorKind::Range);
    /// ```
    pub fn of(year: i64, month: i64, day: i64) -> Result<Self, Error> {
        let year = ChronoField::Year.check_valid_value(year)?;
        let month = Month::of(month)?;
        let day = ChronoField::DayOfMonth.check_valid_value(day)?;
        let length = month.length(iso::is_leap_year(year));
        if day > i64::from(length) {
            return Err(Error::RangeMessage(format!(
                "invalid date '{month} {day}' in year {year}"
            )));
        }
        Ok(Self::create(year, month.value(), day as u8))
    }

    /// Date from a year and a day-of-year.
    pub fn of_year_day(year: i64, day_of_year: i64) -> Result<Self, Error> {
        let year = ChronoField::Year.check_valid_value(year)?;
        let day_of_year = ChronoField::DayOfYear.check_valid_value(day_of_year)?;
        let leap = iso::is_leap_year(year);
        if day_of_year == 366 && !leap {
            return Err(Error::RangeMessage(format!(
                "invalid date 'DayOfYear 366' as '{year}' is not a leap year"
            )));
        }
        let day_of_year = day_of_year as u16;
        let month = Month::ALL
            .into_iter()
            .rev()
            .find(|m| m.first_day_of_year(leap) <= day_of_year)
            .unwrap_or(Month::January);
        let day = day_of_year - month.first_day_of_year(leap) + 1;
        Ok(Self::create(year, month.value(), day as u8))
    }

    /// Date from a count of days since 1970-01-01.
    pub fn of_epoch_day(epoch_day: i64) -> Result<Self, Error> {
        let epoch_day = ChronoField::EpochDay.check_valid_value(epoch_day)?;
        let (year, month, day) = iso::from_epoch_day(epoch_day);
        Ok(Self::create(year, month, day))
    }

    /// Today in the zone of `clock`.
    pub fn now(clock: &Clock) -> Result<Self, Error> {
        let instant = clock.instant()?;
        let offset = clock.zone().offset_at(instant);
        let local = offset.local_epoch_second(instant);
        Self::of_epoch_day(local.div_euclid(SECONDS_PER_DAY))
    }

    /// Date of any value that answers the local-date query.
    pub fn from_temporal(temporal: &dyn TemporalAccessor) -> Result<Self, Error> {
        crate::temporal::queries::local_date()
            .query_from(temporal)?
            .ok_or_else(|| Error::illegal("unable to obtain Date from temporal value"))
    }

    #[inline]
    const fn create(year: i64, month: u8, day: u8) -> Self {
        Self {
            year: year as i32,
            month,
            day,
        }
    }

    /// Same month with the day clamped to the month's length.
    fn resolve_previous_valid(year: i64, month: u8, day: u8) -> Self {
        let length = iso::month_length(month, iso::is_leap_year(year));
        Self::create(year, month, day.min(length))
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn year(&self) -> i64 {
        self.year as i64
    }

    #[inline]
    pub fn month(&self) -> Month {
        Month::ALL[self.month as usize - 1]
    }

    #[inline]
    pub const fn month_value(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day_of_month(&self) -> u8 {
        self.day
    }

    pub fn day_of_year(&self) -> u16 {
        self.month().first_day_of_year(self.is_leap_year()) + u16::from(self.day) - 1
    }

    pub fn day_of_week(&self) -> DayOfWeek {
        DayOfWeek::of_epoch_day(self.to_epoch_day())
    }

    #[inline]
    pub const fn is_leap_year(&self) -> bool {
        iso::is_leap_year(self.year as i64)
    }

    pub fn length_of_month(&self) -> u8 {
        iso::month_length(self.month, self.is_leap_year())
    }

    pub fn length_of_year(&self) -> u16 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    #[inline]
    pub fn to_epoch_day(&self) -> i64 {
        iso::to_epoch_day(self.year(), self.month, self.day)
    }

    #[inline]
    fn proleptic_month(&self) -> i64 {
        self.year() * 12 + i64::from(self.month) - 1
    }

    pub fn era(&self) -> Era {
        Era::of_year(self.year())
    }

    // ── adjusters ─────────────────────────────────────────────────────

    /// Same month and day in `year`, Feb 29 becoming Feb 28.
    pub fn with_year(&self, year: i64) -> Result<Self, Error> {
        if year == self.year() {
            return Ok(*self);
        }
        let year = ChronoField::Year.check_valid_value(year)?;
        Ok(Self::resolve_previous_valid(year, self.month, self.day))
    }

    /// Same year and day in `month`, the day clamped to the month's length.
    pub fn with_month(&self, month: i64) -> Result<Self, Error> {
        let month = Month::of(month)?;
        Ok(Self::resolve_previous_valid(self.year(), month.value(), self.day))
    }

    pub fn with_day_of_month(&self, day: i64) -> Result<Self, Error> {
        if day == i64::from(self.day) {
            return Ok(*self);
        }
        Self::of(self.year(), i64::from(self.month), day)
    }

    pub fn with_day_of_year(&self, day_of_year: i64) -> Result<Self, Error> {
        Self::of_year_day(self.year(), day_of_year)
    }

    // ── arithmetic ────────────────────────────────────────────────────

    pub fn plus_days(&self, days: i64) -> Result<Self, Error> {
        if days == 0 {
            return Ok(*self);
        }
        let epoch_day = self
            .to_epoch_day()
            .checked_add(days)
            .ok_or(Error::Arithmetic("epoch day"))?;
        Self::of_epoch_day(epoch_day)
    }

    pub fn plus_weeks(&self, weeks: i64) -> Result<Self, Error> {
        let days = weeks.checked_mul(7).ok_or(Error::Arithmetic("weeks"))?;
        self.plus_days(days)
    }

    /// Adds months, resolving to the last valid day of the target month.
    pub fn plus_months(&self, months: i64) -> Result<Self, Error> {
        if months == 0 {
            return Ok(*self);
        }
        let total = self
            .proleptic_month()
            .checked_add(months)
            .ok_or(Error::Arithmetic("proleptic month"))?;
        let year = ChronoField::Year.check_valid_value(total.div_euclid(12))?;
        let month = total.rem_euclid(12) as u8 + 1;
        Ok(Self::resolve_previous_valid(year, month, self.day))
    }

    /// Adds years, resolving Feb 29 to Feb 28 in non-leap years.
    pub fn plus_years(&self, years: i64) -> Result<Self, Error> {
        if years == 0 {
            return Ok(*self);
        }
        let year = self
            .year()
            .checked_add(years)
            .ok_or(Error::Arithmetic("year"))?;
        let year = ChronoField::Year.check_valid_value(year)?;
        Ok(Self::resolve_previous_valid(year, self.month, self.day))
    }

    fn plus_years_scaled(&self, amount: i64, scale: i64) -> Result<Self, Error> {
        let years = amount
            .checked_mul(scale)
            .ok_or(Error::Arithmetic("years"))?;
        self.plus_years(years)
    }

    /// Whole months from `self` to `end`, truncated toward zero.
    fn months_until(&self, end: &Self) -> i64 {
        let packed1 = self.proleptic_month() * 32 + i64::from(self.day);
        let packed2 = end.proleptic_month() * 32 + i64::from(end.day);
        (packed2 - packed1) / 32
    }

    fn aligned(value: i64) -> (i64, i64) {
        ((value - 1) % 7 + 1, (value - 1) / 7 + 1)
    }
}

/// Writes `year-month-day` with the exceeds-pad year.
pub(crate) fn write_ymd(f: &mut fmt::Formatter<'_>, year: i64, month: u8, day: u8) -> fmt::Result {
    write_year(f, year)?;
    write!(f, "-{month:02}-{day:02}")
}

impl Default for Date {
    fn default() -> Self {
        Self::EPOCH
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ymd(f, self.year(), self.month, self.day)
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Parses `YYYY-MM-DD`, the year following the exceeds-pad rule.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, pos) = parse_year(s)?;
        let rest = &s.as_bytes()[pos..];
        let two = |at: usize| -> Result<i64, Error> {
            match (rest.get(at), rest.get(at + 1)) {
                (Some(&a), Some(&b)) if a.is_ascii_digit() && b.is_ascii_digit() => {
                    Ok(i64::from(a - b'0') * 10 + i64::from(b - b'0'))
                }
                _ => Err(Error::format(s, pos + at, "expected two digits")),
            }
        };
        for at in [0, 3] {
            if rest.get(at) != Some(&b'-') {
                return Err(Error::format(s, pos + at, "expected '-'"));
            }
        }
        let month = two(1)?;
        let day = two(4)?;
        if rest.len() != 6 {
            return Err(Error::format(s, pos + 6, "unparsed text found"));
        }
        Self::of(year, month, day)
    }
}

// ── chrono interop ────────────────────────────────────────────────────────

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self::create(i64::from(date.year()), date.month() as u8, date.day() as u8)
    }
}

impl TryFrom<Date> for NaiveDate {
    type Error = Error;

    fn try_from(date: Date) -> Result<Self, Self::Error> {
        NaiveDate::from_ymd_opt(date.year, u32::from(date.month), u32::from(date.day))
            .ok_or_else(|| Error::RangeMessage(format!("date {date} outside chrono::NaiveDate range")))
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl serde::Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Temporal protocol
// ═══════════════════════════════════════════════════════════════════════════

impl TemporalAccessor for Date {
    fn supported_fields(&self) -> &'static [ChronoField] {
        Self::SUPPORTED
    }

    fn field_value(&self, field: ChronoField) -> Option<i64> {
        let day = i64::from(self.day);
        let day_of_year = i64::from(self.day_of_year());
        let value = match field {
            ChronoField::DayOfWeek => i64::from(self.day_of_week().value()),
            ChronoField::AlignedDayOfWeekInMonth => Self::aligned(day).0,
            ChronoField::AlignedDayOfWeekInYear => Self::aligned(day_of_year).0,
            ChronoField::DayOfMonth => day,
            ChronoField::DayOfYear => day_of_year,
            ChronoField::EpochDay => self.to_epoch_day(),
            ChronoField::AlignedWeekOfMonth => Self::aligned(day).1,
            ChronoField::AlignedWeekOfYear => Self::aligned(day_of_year).1,
            ChronoField::MonthOfYear => i64::from(self.month),
            ChronoField::ProlepticMonth => self.proleptic_month(),
            ChronoField::YearOfEra => iso::year_of_era(self.year()),
            ChronoField::Year => self.year(),
            ChronoField::Era => self.era().value(),
            _ => return None,
        };
        Some(value)
    }

    fn field_range(&self, field: ChronoField) -> ValueRange {
        match field {
            ChronoField::DayOfMonth => ValueRange::of(1, i64::from(self.length_of_month())),
            ChronoField::DayOfYear => ValueRange::of(1, i64::from(self.length_of_year())),
            ChronoField::AlignedWeekOfMonth => {
                let weeks = if self.month == 2 && !self.is_leap_year() { 4 } else { 5 };
                ValueRange::of(1, weeks)
            }
            ChronoField::YearOfEra => {
                let max = if self.year <= 0 { MAX_YEAR + 1 } else { MAX_YEAR };
                ValueRange::of(1, max)
            }
            _ => field.range(),
        }
    }

    fn query_precision(&self) -> Option<ChronoUnit> {
        Some(ChronoUnit::Days)
    }

    fn query_chronology(&self) -> Option<IsoChronology> {
        Some(IsoChronology)
    }
}

impl Temporal for Date {
    fn is_supported_unit(&self, unit: ChronoUnit) -> bool {
        unit.is_date_based()
    }

    fn with_field(&self, field: ChronoField, value: i64) -> Result<Self, Error> {
        if !self.supports_field(field) {
            return Err(Error::UnsupportedField(field));
        }
        let value = field.check_valid_value(value)?;
        let current = |f: ChronoField| self.field_value(f).unwrap_or_default();
        match field {
            ChronoField::DayOfWeek
            | ChronoField::AlignedDayOfWeekInMonth
            | ChronoField::AlignedDayOfWeekInYear => self.plus_days(value - current(field)),
            ChronoField::DayOfMonth => self.with_day_of_month(value),
            ChronoField::DayOfYear => self.with_day_of_year(value),
            ChronoField::EpochDay => Self::of_epoch_day(value),
            ChronoField::AlignedWeekOfMonth | ChronoField::AlignedWeekOfYear => {
                self.plus_weeks(value - current(field))
            }
            ChronoField::MonthOfYear => self.with_month(value),
            ChronoField::ProlepticMonth => self.plus_months(value - self.proleptic_month()),
            ChronoField::YearOfEra => {
                self.with_year(if self.year >= 1 { value } else { 1 - value })
            }
            ChronoField::Year => self.with_year(value),
            ChronoField::Era => {
                if self.era().value() == value {
                    Ok(*self)
                } else {
                    self.with_year(1 - self.year())
                }
            }
            _ => Err(Error::UnsupportedField(field)),
        }
    }

    fn plus(&self, amount: i64, unit: ChronoUnit) -> Result<Self, Error> {
        match unit {
            ChronoUnit::Days => self.plus_days(amount),
            ChronoUnit::Weeks => self.plus_weeks(amount),
            ChronoUnit::Months => self.plus_months(amount),
            ChronoUnit::Years => self.plus_years(amount),
            ChronoUnit::Decades => self.plus_years_scaled(amount, 10),
            ChronoUnit::Centuries => self.plus_years_scaled(amount, 100),
            ChronoUnit::Millennia => self.plus_years_scaled(amount, 1_000),
            ChronoUnit::Eras => {
                let era = self
                    .era()
                    .value()
                    .checked_add(amount)
                    .ok_or(Error::Arithmetic("era"))?;
                self.with_field(ChronoField::Era, era)
            }
            _ => Err(Error::UnsupportedUnit(unit)),
        }
    }

    fn until(&self, end: &Self, unit: ChronoUnit) -> Result<i64, Error> {
        let days = end.to_epoch_day() - self.to_epoch_day();
        match unit {
            ChronoUnit::Days => Ok(days),
            ChronoUnit::Weeks => Ok(days / 7),
            ChronoUnit::Months => Ok(self.months_until(end)),
            ChronoUnit::Years => Ok(self.months_until(end) / 12),
            ChronoUnit::Decades => Ok(self.months_until(end) / 120),
            ChronoUnit::Centuries => Ok(self.months_until(end) / 1_200),
            ChronoUnit::Millennia => Ok(self.months_until(end) / 12_000),
            ChronoUnit::Eras => Ok(end.era().value() - self.era().value()),
            _ => Err(Error::UnsupportedUnit(unit)),
        }
    }
}
