// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Proleptic ISO years.

use crate::civil::{parse_year, write_year, Date, MonthDay};
use crate::clock::Clock;
use crate::error::Error;
use crate::field::{ChronoField, ChronoUnit, ValueRange};
use crate::iso::{self, Era, IsoChronology, MAX_YEAR, MIN_YEAR};
use crate::temporal::{read_field, Temporal, TemporalAccessor};
use qtty::Days;
use std::fmt;
use std::str::FromStr;

/// A year in the proleptic ISO calendar, `-999_999_999 ..= 999_999_999`.
///
/// Year 0 exists (1 BCE) and is a leap year.
///
/// ```
/// use calendoch::Year;
///
/// let year: Year = "+12345".parse().unwrap();
/// assert_eq!(year.value(), 12_345);
/// assert_eq!(Year::of(5).unwrap().to_string(), "0005");
/// assert!(Year::of(2000).unwrap().is_leap());
/// assert!(!Year::of(1900).unwrap().is_leap());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Year {
    year: i32,
}

impl Year {
    pub const MIN_VALUE: i64 = MIN_YEAR;
    pub const MAX_VALUE: i64 = MAX_YEAR;

    const SUPPORTED: &'static [ChronoField] =
        &[ChronoField::YearOfEra, ChronoField::Year, ChronoField::Era];

    // ── constructors ──────────────────────────────────────────────────

    pub fn of(year: i64) -> Result<Self, Error> {
        let year = ChronoField::Year.check_valid_value(year)?;
        Ok(Self { year: year as i32 })
    }

    /// Current year in the zone of `clock`.
    pub fn now(clock: &Clock) -> Result<Self, Error> {
        Self::of(Date::now(clock)?.year())
    }

    /// Year of any value that supports the `Year` field.
    pub fn from_temporal(temporal: &dyn TemporalAccessor) -> Result<Self, Error> {
        Self::of(read_field(temporal, ChronoField::Year)?)
    }

    /// Gregorian leap rule, for any proleptic year.
    #[inline]
    pub const fn is_leap_year(year: i64) -> bool {
        iso::is_leap_year(year)
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn value(&self) -> i64 {
        self.year as i64
    }

    #[inline]
    pub const fn is_leap(&self) -> bool {
        iso::is_leap_year(self.year as i64)
    }

    /// Days in this year, 365 or 366.
    pub const fn length(&self) -> u16 {
        if self.is_leap() {
            366
        } else {
            365
        }
    }

    /// Length of this year as a day quantity.
    pub fn length_days(&self) -> Days {
        Days::new(f64::from(self.length()))
    }

    /// `true` when `month_day` exists in this year.
    pub fn is_valid_month_day(&self, month_day: Option<&MonthDay>) -> bool {
        month_day.map_or(false, |md| md.is_valid_year(self.value()))
    }

    pub fn is_before(&self, other: &Year) -> bool {
        self.year < other.year
    }

    pub fn is_after(&self, other: &Year) -> bool {
        self.year > other.year
    }

    // ── combinations ──────────────────────────────────────────────────

    /// The date at `day_of_year` in this year.
    pub fn at_day(&self, day_of_year: i64) -> Result<Date, Error> {
        Date::of_year_day(self.value(), day_of_year)
    }

    /// The date of `month_day` in this year; Feb 29 becomes Feb 28 in
    /// non-leap years.
    pub fn at_month_day(&self, month_day: MonthDay) -> Result<Date, Error> {
        month_day.at_year(self.value())
    }

    // ── arithmetic ────────────────────────────────────────────────────

    pub fn plus_years(&self, years: i64) -> Result<Self, Error> {
        if years == 0 {
            return Ok(*self);
        }
        let year = self
            .value()
            .checked_add(years)
            .ok_or(Error::Arithmetic("year"))?;
        Self::of(year)
    }

    pub fn minus_years(&self, years: i64) -> Result<Self, Error> {
        if years == i64::MIN {
            self.plus_years(i64::MAX)?.plus_years(1)
        } else {
            self.plus_years(-years)
        }
    }

    fn plus_years_scaled(&self, amount: i64, scale: i64) -> Result<Self, Error> {
        let years = amount
            .checked_mul(scale)
            .ok_or(Error::Arithmetic("years"))?;
        self.plus_years(years)
    }

    fn era(&self) -> Era {
        Era::of_year(self.value())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.value())
    }
}

impl FromStr for Year {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, end) = parse_year(s)?;
        if end != s.len() {
            return Err(Error::format(s, end, "unparsed text found"));
        }
        Self::of(year)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Year {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Year {
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

impl TemporalAccessor for Year {
    fn supported_fields(&self) -> &'static [ChronoField] {
        Self::SUPPORTED
    }

    fn field_value(&self, field: ChronoField) -> Option<i64> {
        match field {
            ChronoField::YearOfEra => Some(iso::year_of_era(self.value())),
            ChronoField::Year => Some(self.value()),
            ChronoField::Era => Some(self.era().value()),
            _ => None,
        }
    }

    fn field_range(&self, field: ChronoField) -> ValueRange {
        match field {
            ChronoField::YearOfEra if self.year <= 0 => ValueRange::of(1, MAX_YEAR + 1),
            ChronoField::YearOfEra => ValueRange::of(1, MAX_YEAR),
            _ => field.range(),
        }
    }

    fn query_precision(&self) -> Option<ChronoUnit> {
        Some(ChronoUnit::Years)
    }

    fn query_chronology(&self) -> Option<IsoChronology> {
        Some(IsoChronology)
    }
}

impl Temporal for Year {
    fn is_supported_unit(&self, unit: ChronoUnit) -> bool {
        matches!(
            unit,
            ChronoUnit::Years
                | ChronoUnit::Decades
                | ChronoUnit::Centuries
                | ChronoUnit::Millennia
                | ChronoUnit::Eras
        )
    }

    fn with_field(&self, field: ChronoField, value: i64) -> Result<Self, Error> {
        if !self.supports_field(field) {
            return Err(Error::UnsupportedField(field));
        }
        let value = field.check_valid_value(value)?;
        match field {
            ChronoField::YearOfEra if self.year < 1 => Self::of(1 - value),
            ChronoField::YearOfEra | ChronoField::Year => Self::of(value),
            ChronoField::Era if self.era().value() == value => Ok(*self),
            ChronoField::Era => Self::of(1 - self.value()),
            _ => Err(Error::UnsupportedField(field)),
        }
    }

    fn plus(&self, amount: i64, unit: ChronoUnit) -> Result<Self, Error> {
        match unit {
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
        let years = end.value() - self.value();
        match unit {
            ChronoUnit::Years => Ok(years),
            ChronoUnit::Decades => Ok(years / 10),
            ChronoUnit::Centuries => Ok(years / 100),
            ChronoUnit::Millennia => Ok(years / 1_000),
            ChronoUnit::Eras => Ok(end.era().value() - self.era().value()),
            _ => Err(Error::UnsupportedUnit(unit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::instant::Instant;
    use crate::temporal::queries;
    use crate::tz::ZoneId;

    fn year(y: i64) -> Year {
        Year::of(y).unwrap()
    }

    #[test]
    fn test_of_bounds() {
        assert!(Year::of(Year::MIN_VALUE).is_ok());
        assert!(Year::of(Year::MAX_VALUE).is_ok());
        assert_eq!(Year::of(Year::MAX_VALUE + 1).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(Year::of(Year::MIN_VALUE - 1).unwrap_err().kind(), ErrorKind::Range);
    }

    #[test]
    fn test_leap_rule() {
        for y in [-400, -4, 0, 4, 1996, 2000, 2400] {
            assert!(Year::is_leap_year(y), "{y}");
        }
        for y in [-100, -1, 1, 1900, 2100, 2011] {
            assert!(!Year::is_leap_year(y), "{y}");
        }
        assert_eq!(year(2012).length(), 366);
        assert_eq!(year(2011).length_days(), Days::new(365.0));
    }

    #[test]
    fn test_text() {
        assert_eq!(year(2012).to_string(), "2012");
        assert_eq!(year(0).to_string(), "0000");
        assert_eq!(year(-1).to_string(), "-0001");
        assert_eq!(year(999_999_999).to_string(), "+999999999");
        for y in [-999_999_999, -10_000, -1, 0, 1, 9_999, 10_000, 999_999_999] {
            assert_eq!(year(y).to_string().parse::<Year>(), Ok(year(y)));
        }
        assert_eq!("2012x".parse::<Year>().unwrap_err().kind(), ErrorKind::Format);
        assert_eq!("+1000000000".parse::<Year>().unwrap_err().kind(), ErrorKind::Range);
    }

    #[test]
    fn test_fields() {
        let bce = year(-5);
        assert_eq!(bce.get(ChronoField::YearOfEra), Ok(6));
        assert_eq!(bce.get(ChronoField::Era), Ok(0));
        assert_eq!(bce.range(ChronoField::YearOfEra), Ok(ValueRange::of(1, MAX_YEAR + 1)));
        assert_eq!(year(5).range(ChronoField::YearOfEra), Ok(ValueRange::of(1, MAX_YEAR)));
        assert_eq!(
            bce.get(ChronoField::MonthOfYear).unwrap_err().kind(),
            ErrorKind::UnsupportedField
        );
        assert_eq!(bce.query(queries::precision()), Ok(Some(ChronoUnit::Years)));
    }

    #[test]
    fn test_with_field() {
        let y = year(2012);
        assert_eq!(y.with_field(ChronoField::Era, 0), Ok(year(-2011)));
        assert_eq!(y.with_field(ChronoField::Era, 1), Ok(y));
        assert_eq!(year(-4).with_field(ChronoField::YearOfEra, 10), Ok(year(-9)));
        assert_eq!(
            y.with_field(ChronoField::Era, 2).unwrap_err().kind(),
            ErrorKind::Range
        );
        assert_eq!(
            y.with_field(ChronoField::DayOfMonth, 1).unwrap_err().kind(),
            ErrorKind::UnsupportedField
        );
    }

    #[test]
    fn test_plus_minus() {
        let y = year(2012);
        assert_eq!(y.plus(3, ChronoUnit::Decades), Ok(year(2042)));
        assert_eq!(y.minus(1, ChronoUnit::Millennia), Ok(year(1012)));
        assert_eq!(y.plus(-1, ChronoUnit::Eras), Ok(year(-2011)));
        assert_eq!(y.minus_years(i64::MIN).unwrap_err().kind(), ErrorKind::Arithmetic);
        assert_eq!(
            y.plus(1, ChronoUnit::Months).unwrap_err().kind(),
            ErrorKind::UnsupportedField
        );
        assert_eq!(
            year(Year::MAX_VALUE).plus_years(1).unwrap_err().kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn test_until() {
        let a = year(2012);
        let b = year(1_987);
        assert_eq!(a.until(&b, ChronoUnit::Years), Ok(-25));
        assert_eq!(a.until(&b, ChronoUnit::Decades), Ok(-2));
        assert_eq!(b.until(&a, ChronoUnit::Decades), Ok(2));
        assert_eq!(a.until(&year(0), ChronoUnit::Eras), Ok(-1));
    }

    #[test]
    fn test_combinations() {
        let leap = year(2012);
        let plain = year(2011);
        let feb29 = MonthDay::of(2, 29).unwrap();
        assert_eq!(leap.at_month_day(feb29), Date::of(2012, 2, 29));
        assert_eq!(plain.at_month_day(feb29), Date::of(2011, 2, 28));
        assert!(leap.is_valid_month_day(Some(&feb29)));
        assert!(!plain.is_valid_month_day(Some(&feb29)));
        assert!(!plain.is_valid_month_day(None));
        assert_eq!(plain.at_day(365), Date::of(2011, 12, 31));
        assert_eq!(plain.at_day(366).unwrap_err().kind(), ErrorKind::Range);
        assert!(plain.is_before(&leap) && leap.is_after(&plain));
    }

    #[test]
    fn test_now_and_from_temporal() {
        let instant = Instant::of_epoch_second(1_341_483_330, 0).unwrap();
        let clock = Clock::fixed(instant, ZoneId::UTC);
        assert_eq!(Year::now(&clock), Ok(year(2012)));
        let date = Date::of(1999, 12, 31).unwrap();
        assert_eq!(Year::from_temporal(&date), Ok(year(1999)));
        let err = Year::from_temporal(&crate::civil::DayOfWeek::Monday).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedField);
    }
}
