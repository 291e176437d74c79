// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The ISO-8601 calendar system.
//!
//! The proleptic Gregorian calendar extended backwards and forwards without
//! era discontinuity: year 0 exists and is a leap year, year -1 precedes it.
//!
//! The free functions here work on plain integers and form the arithmetic
//! core shared by the civil value types; [`IsoChronology`] is the public face
//! returned by the chronology query and owns field resolution.

use crate::civil::{Date, Month};
use crate::error::{check_range, Error};
use crate::field::ChronoField;
use std::fmt;

/// Smallest supported proleptic year.
pub const MIN_YEAR: i64 = -999_999_999;
/// Largest supported proleptic year.
pub const MAX_YEAR: i64 = 999_999_999;

/// Days in a 400-year cycle.
pub(crate) const DAYS_PER_CYCLE: i64 = 146_097;
/// Days from 0000-01-01 to 1970-01-01.
pub(crate) const DAYS_0000_TO_1970: i64 = DAYS_PER_CYCLE * 5 - (30 * 365 + 7);

// ---------------------------------------------------------------------------
// Integer core
// ---------------------------------------------------------------------------

/// Gregorian leap-year rule, valid for negative years and year 0.
#[inline]
pub const fn is_leap_year(year: i64) -> bool {
    (year & 3) == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1..=12) of a year with the given leapness.
#[inline]
pub(crate) const fn month_length(month: u8, leap: bool) -> u8 {
    match month {
        2 => {
            if leap {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Epoch day (days since 1970-01-01) of a valid ISO date.
pub(crate) const fn to_epoch_day(year: i64, month: u8, day: u8) -> i64 {
    let y = year;
    let m = month as i64;
    let mut total = 365 * y;
    if y >= 0 {
        total += (y + 3) / 4 - (y + 99) / 100 + (y + 399) / 400;
    } else {
        total -= y / -4 - y / -100 + y / -400;
    }
    total += (367 * m - 362) / 12;
    total += day as i64 - 1;
    if m > 2 {
        total -= 1;
        if !is_leap_year(year) {
            total -= 1;
        }
    }
    total - DAYS_0000_TO_1970
}

/// Inverse of [`to_epoch_day`].  The caller validates the epoch-day range.
pub(crate) const fn from_epoch_day(epoch_day: i64) -> (i64, u8, u8) {
    // Shift to a March-based year so the leap day is the last day of it.
    let mut zero_day = epoch_day + DAYS_0000_TO_1970 - 60;
    let mut adjust = 0;
    if zero_day < 0 {
        let adjust_cycles = (zero_day + 1) / DAYS_PER_CYCLE - 1;
        adjust = adjust_cycles * 400;
        zero_day += -adjust_cycles * DAYS_PER_CYCLE;
    }
    let mut year_est = (400 * zero_day + 591) / DAYS_PER_CYCLE;
    let mut doy_est = zero_day - (365 * year_est + year_est / 4 - year_est / 100 + year_est / 400);
    if doy_est < 0 {
        year_est -= 1;
        doy_est = zero_day - (365 * year_est + year_est / 4 - year_est / 100 + year_est / 400);
    }
    year_est += adjust;
    let march_doy0 = doy_est;
    let march_month0 = (march_doy0 * 5 + 2) / 153;
    let month = (march_month0 + 2) % 12 + 1;
    let dom = march_doy0 - (march_month0 * 306 + 5) / 10 + 1;
    year_est += march_month0 / 10;
    (year_est, month as u8, dom as u8)
}

// ═══════════════════════════════════════════════════════════════════════════
// Era
// ═══════════════════════════════════════════════════════════════════════════

/// ISO eras: before the common era (year ≤ 0) and common era (year ≥ 1).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Era {
    Bce = 0,
    Ce = 1,
}

impl Era {
    pub fn of(value: i64) -> Result<Self, Error> {
        match value {
            0 => Ok(Era::Bce),
            1 => Ok(Era::Ce),
            _ => Err(Error::range("Era", value, 0, 1)),
        }
    }

    #[inline]
    pub const fn value(self) -> i64 {
        self as i64
    }

    /// The era a proleptic year belongs to.
    #[inline]
    pub const fn of_year(proleptic_year: i64) -> Self {
        if proleptic_year >= 1 {
            Era::Ce
        } else {
            Era::Bce
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Era::Bce => "BCE",
            Era::Ce => "CE",
        })
    }
}

/// Year-of-era of a proleptic year (`0` is `1 BCE`).
#[inline]
pub(crate) const fn year_of_era(proleptic_year: i64) -> i64 {
    if proleptic_year >= 1 {
        proleptic_year
    } else {
        1 - proleptic_year
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Resolution
// ═══════════════════════════════════════════════════════════════════════════

/// How strictly out-of-range day or month values are treated when a date is
/// resolved from separate fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResolverStyle {
    /// Every field must be valid for the resulting date.
    Strict,
    /// Month must be 1-12 and day 1-31; a day past the end of the month is
    /// moved back to the last valid day (`2011-02-30` → `2011-02-28`).
    Smart,
    /// Months and days overflow into the following months/years
    /// (`2011-13-01` → `2012-01-01`).
    Lenient,
}

/// The ISO calendar system.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct IsoChronology;

impl IsoChronology {
    pub const ID: &'static str = "ISO";

    #[inline]
    pub fn id(&self) -> &'static str {
        Self::ID
    }

    #[inline]
    pub fn is_leap_year(&self, proleptic_year: i64) -> bool {
        is_leap_year(proleptic_year)
    }

    /// Proleptic year from an era and a year-of-era.
    pub fn proleptic_year(&self, era: Era, year_of_era: i64) -> Result<i64, Error> {
        check_range("YearOfEra", year_of_era, 1, MAX_YEAR + 1)?;
        let year = match era {
            Era::Ce => year_of_era,
            Era::Bce => 1 - year_of_era,
        };
        ChronoField::Year.check_valid_value(year)
    }

    pub fn date(&self, year: i64, month: i64, day: i64) -> Result<Date, Error> {
        Date::of(year, month, day)
    }

    pub fn date_year_day(&self, year: i64, day_of_year: i64) -> Result<Date, Error> {
        Date::of_year_day(year, day_of_year)
    }

    pub fn date_epoch_day(&self, epoch_day: i64) -> Result<Date, Error> {
        Date::of_epoch_day(epoch_day)
    }

    /// Builds a date from year, month and day values under `style`.
    ///
    /// ```
    /// use calendoch::{Date, IsoChronology, ResolverStyle};
    ///
    /// let iso = IsoChronology;
    /// let smart = iso.resolve_date(2011, 2, 30, ResolverStyle::Smart).unwrap();
    /// assert_eq!(smart, Date::of(2011, 2, 28).unwrap());
    /// assert!(iso.resolve_date(2011, 2, 30, ResolverStyle::Strict).is_err());
    /// let lenient = iso.resolve_date(2011, 14, 1, ResolverStyle::Lenient).unwrap();
    /// assert_eq!(lenient, Date::of(2012, 2, 1).unwrap());
    /// ```
    pub fn resolve_date(
        &self,
        year: i64,
        month: i64,
        day: i64,
        style: ResolverStyle,
    ) -> Result<Date, Error> {
        let year = ChronoField::Year.check_valid_value(year)?;
        match style {
            ResolverStyle::Strict => Date::of(year, month, day),
            ResolverStyle::Smart => {
                let month = Month::of(month)?;
                let day = ChronoField::DayOfMonth.check_valid_value(day)?;
                let last = month.length(is_leap_year(year)) as i64;
                Date::of(year, month.value() as i64, day.min(last))
            }
            ResolverStyle::Lenient => {
                let months = month
                    .checked_sub(1)
                    .ok_or(Error::Arithmetic("month overflow"))?;
                let days = day.checked_sub(1).ok_or(Error::Arithmetic("day overflow"))?;
                Date::of(year, 1, 1)?.plus_months(months)?.plus_days(days)
            }
        }
    }
}

impl fmt::Display for IsoChronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::ID)
    }
}
