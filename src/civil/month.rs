// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Month-of-year.

use crate::error::Error;
use crate::field::{ChronoField, ChronoUnit};
use crate::iso::{self, IsoChronology};
use crate::temporal::{read_field, TemporalAccessor};
use std::fmt;
use std::str::FromStr;

/// A month-of-year, January (1) to December (12).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    const SUPPORTED: &'static [ChronoField] = &[ChronoField::MonthOfYear];

    pub fn of(month: i64) -> Result<Self, Error> {
        let value = ChronoField::MonthOfYear.check_valid_value(month)?;
        Ok(Self::ALL[(value - 1) as usize])
    }

    /// Month-of-year of any value that supports `MonthOfYear`.
    pub fn from_temporal(temporal: &dyn TemporalAccessor) -> Result<Self, Error> {
        Self::of(read_field(temporal, ChronoField::MonthOfYear)?)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// The month `months` later, wrapping around the year.
    pub fn plus(self, months: i64) -> Self {
        let shift = months.rem_euclid(12) as usize;
        Self::ALL[(self as usize - 1 + shift) % 12]
    }

    pub fn minus(self, months: i64) -> Self {
        self.plus(-(months % 12))
    }

    /// Days in this month for a year of the given leapness.
    #[inline]
    pub const fn length(self, leap_year: bool) -> u8 {
        iso::month_length(self as u8, leap_year)
    }

    #[inline]
    pub const fn min_length(self) -> u8 {
        self.length(false)
    }

    #[inline]
    pub const fn max_length(self) -> u8 {
        self.length(true)
    }

    /// Day-of-year of the first day of this month.
    pub const fn first_day_of_year(self, leap_year: bool) -> u16 {
        let leap = leap_year as u16;
        match self {
            Month::January => 1,
            Month::February => 32,
            Month::March => 60 + leap,
            Month::April => 91 + leap,
            Month::May => 121 + leap,
            Month::June => 152 + leap,
            Month::July => 182 + leap,
            Month::August => 213 + leap,
            Month::September => 244 + leap,
            Month::October => 274 + leap,
            Month::November => 305 + leap,
            Month::December => 335 + leap,
        }
    }

    /// January, April, July or October.
    pub const fn first_month_of_quarter(self) -> Month {
        match self {
            Month::January | Month::February | Month::March => Month::January,
            Month::April | Month::May | Month::June => Month::April,
            Month::July | Month::August | Month::September => Month::July,
            Month::October | Month::November | Month::December => Month::October,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Month::January => "JANUARY",
            Month::February => "FEBRUARY",
            Month::March => "MARCH",
            Month::April => "APRIL",
            Month::May => "MAY",
            Month::June => "JUNE",
            Month::July => "JULY",
            Month::August => "AUGUST",
            Month::September => "SEPTEMBER",
            Month::October => "OCTOBER",
            Month::November => "NOVEMBER",
            Month::December => "DECEMBER",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| Error::format(s, 0, "unknown month name"))
    }
}

impl TemporalAccessor for Month {
    fn supported_fields(&self) -> &'static [ChronoField] {
        Self::SUPPORTED
    }

    fn field_value(&self, field: ChronoField) -> Option<i64> {
        match field {
            ChronoField::MonthOfYear => Some(self.value() as i64),
            _ => None,
        }
    }

    fn query_precision(&self) -> Option<ChronoUnit> {
        Some(ChronoUnit::Months)
    }

    fn query_chronology(&self) -> Option<IsoChronology> {
        Some(IsoChronology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_of_and_value() {
        assert_eq!(Month::of(3), Ok(Month::March));
        assert_eq!(Month::March.value(), 3);
        assert_eq!(Month::of(0).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(Month::of(13).unwrap_err().kind(), ErrorKind::Range);
    }

    #[test]
    fn test_plus_wraps() {
        assert_eq!(Month::December.plus(1), Month::January);
        assert_eq!(Month::January.minus(1), Month::December);
        assert_eq!(Month::March.plus(-14), Month::January);
        assert_eq!(Month::March.minus(i64::MIN), Month::November);
    }

    #[test]
    fn test_lengths() {
        assert_eq!(Month::February.length(false), 28);
        assert_eq!(Month::February.max_length(), 29);
        assert_eq!(Month::April.min_length(), 30);
        assert_eq!(Month::March.first_day_of_year(true), 61);
        assert_eq!(Month::December.first_day_of_year(false), 335);
        assert_eq!(Month::August.first_month_of_quarter(), Month::July);
    }

    #[test]
    fn test_first_day_of_year_matches_lengths() {
        for leap in [false, true] {
            let mut expected = 1u16;
            for m in Month::ALL {
                assert_eq!(m.first_day_of_year(leap), expected);
                expected += m.length(leap) as u16;
            }
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Month::May.to_string(), "MAY");
        assert_eq!("SEPTEMBER".parse::<Month>(), Ok(Month::September));
        assert!("September".parse::<Month>().is_err());
    }
}
