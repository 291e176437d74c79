// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The temporal field/query protocol.
//!
//! Every value type in the crate answers the same five questions:
//!
//! | Operation | Unsupported field | `None` field |
//! |-----------|-------------------|--------------|
//! | [`is_supported`](TemporalAccessor::is_supported) | `false` | `false` |
//! | [`range`](TemporalAccessor::range) | `UnsupportedField` | `NullArgument` |
//! | [`get_long`](TemporalAccessor::get_long) | `UnsupportedField` | `NullArgument` |
//! | [`get`](TemporalAccessor::get) | `UnsupportedField` | `NullArgument` |
//! | [`query`](TemporalAccessor::query) | `Ok(None)` | `NullArgument` |
//!
//! `get` additionally fails with a range error when the field's range does
//! not fit an `i32`, even for supported fields.
//!
//! Implementors only provide the object-safe core: a static table of
//! supported fields, the raw value of each, and optional answers to the
//! built-in queries.  The checked entry points are provided methods, so the
//! contract is enforced identically across types.

use crate::civil::Date;
use crate::error::Error;
use crate::field::{ChronoField, ChronoUnit, ValueRange};
use crate::iso::IsoChronology;
use crate::tz::{ZoneId, ZoneOffset};
use std::cmp::Ordering;
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════
// TemporalAccessor
// ═══════════════════════════════════════════════════════════════════════════

/// Read-only access to the fields of a temporal value.
pub trait TemporalAccessor {
    /// The static support table of this type.
    fn supported_fields(&self) -> &'static [ChronoField];

    /// Raw value of `field`, `None` when unsupported.
    fn field_value(&self, field: ChronoField) -> Option<i64>;

    /// Range of a supported field for this particular value.
    ///
    /// Defaults to the outer range of the field.
    fn field_range(&self, field: ChronoField) -> ValueRange {
        field.range()
    }

    /// Smallest unit this value is precise to.
    fn query_precision(&self) -> Option<ChronoUnit> {
        None
    }

    /// Calendar system of the value, if it has one.
    fn query_chronology(&self) -> Option<IsoChronology> {
        None
    }

    /// Zone id carried by the value, if any.
    fn query_zone_id(&self) -> Option<ZoneId> {
        None
    }

    /// Offset carried by the value, if any.
    fn query_offset(&self) -> Option<ZoneOffset> {
        None
    }

    /// Table lookup of `field`.
    #[inline]
    fn supports_field(&self, field: ChronoField) -> bool {
        self.supported_fields().contains(&field)
    }

    // ── checked entry points ──────────────────────────────────────────

    /// `true` when `field` can be read from this value; `None` is never
    /// supported.
    fn is_supported<F>(&self, field: F) -> bool
    where
        F: Into<Option<ChronoField>>,
        Self: Sized,
    {
        field.into().map_or(false, |f| self.supports_field(f))
    }

    /// Range of valid values for `field` on this value.
    fn range<F>(&self, field: F) -> Result<ValueRange, Error>
    where
        F: Into<Option<ChronoField>>,
        Self: Sized,
    {
        let field = require_field(field.into())?;
        if !self.supports_field(field) {
            return Err(Error::UnsupportedField(field));
        }
        Ok(self.field_range(field))
    }

    /// Value of `field` as an `i64`.
    fn get_long<F>(&self, field: F) -> Result<i64, Error>
    where
        F: Into<Option<ChronoField>>,
        Self: Sized,
    {
        let field = require_field(field.into())?;
        read_field(self, field)
    }

    /// Value of `field` as an `i32`.
    fn get<F>(&self, field: F) -> Result<i32, Error>
    where
        F: Into<Option<ChronoField>>,
        Self: Sized,
    {
        let field = require_field(field.into())?;
        if !self.supports_field(field) {
            return Err(Error::UnsupportedField(field));
        }
        let range = self.field_range(field);
        let value = read_field(self, field)?;
        range.check_valid_int_value(value, field)
    }

    /// Runs `query` against this value.
    fn query<R, Q>(&self, query: Q) -> Result<Option<R>, Error>
    where
        Q: IntoQuery<R>,
        Self: Sized,
    {
        let query = query.into_query().ok_or(Error::NullArgument("query"))?;
        query.query_from(self)
    }
}

#[inline]
fn require_field(field: Option<ChronoField>) -> Result<ChronoField, Error> {
    field.ok_or(Error::NullArgument("field"))
}

/// Reads a field through the object-safe core.
pub(crate) fn read_field(
    temporal: &(impl TemporalAccessor + ?Sized),
    field: ChronoField,
) -> Result<i64, Error> {
    if !temporal.supports_field(field) {
        return Err(Error::UnsupportedField(field));
    }
    temporal
        .field_value(field)
        .ok_or(Error::UnsupportedField(field))
}

// ═══════════════════════════════════════════════════════════════════════════
// TemporalQuery
// ═══════════════════════════════════════════════════════════════════════════

/// A typed extraction function over any [`TemporalAccessor`].
///
/// Queries return `Ok(None)` when the value cannot answer them.
pub struct TemporalQuery<R> {
    name: &'static str,
    run: fn(&dyn TemporalAccessor) -> Result<Option<R>, Error>,
}

impl<R> TemporalQuery<R> {
    pub const fn new(
        name: &'static str,
        run: fn(&dyn TemporalAccessor) -> Result<Option<R>, Error>,
    ) -> Self {
        Self { name, run }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the query.
    #[inline]
    pub fn query_from(&self, temporal: &dyn TemporalAccessor) -> Result<Option<R>, Error> {
        (self.run)(temporal)
    }
}

/// Conversion into an optional query, so `query` accepts either a query or
/// an `Option` of one.
pub trait IntoQuery<R> {
    fn into_query(self) -> Option<TemporalQuery<R>>;
}

impl<R> IntoQuery<R> for TemporalQuery<R> {
    #[inline]
    fn into_query(self) -> Option<TemporalQuery<R>> {
        Some(self)
    }
}

impl<R> IntoQuery<R> for Option<TemporalQuery<R>> {
    #[inline]
    fn into_query(self) -> Option<TemporalQuery<R>> {
        self
    }
}

impl<R> Clone for TemporalQuery<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for TemporalQuery<R> {}

impl<R> fmt::Debug for TemporalQuery<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TemporalQuery").field(&self.name).finish()
    }
}

/// Built-in queries.
pub mod queries {
    use super::*;

    /// Smallest supported unit.
    pub fn precision() -> TemporalQuery<ChronoUnit> {
        TemporalQuery::new("Precision", |t| Ok(t.query_precision()))
    }

    /// Calendar system.
    pub fn chronology() -> TemporalQuery<IsoChronology> {
        TemporalQuery::new("Chronology", |t| Ok(t.query_chronology()))
    }

    /// Strict zone id: only values that carry a [`ZoneId`] answer.
    pub fn zone_id() -> TemporalQuery<ZoneId> {
        TemporalQuery::new("ZoneId", |t| Ok(t.query_zone_id()))
    }

    /// Offset from UTC.
    pub fn offset() -> TemporalQuery<ZoneOffset> {
        TemporalQuery::new("Offset", |t| Ok(t.query_offset()))
    }

    /// Lenient zone: the zone id, falling back to the offset.
    pub fn zone() -> TemporalQuery<ZoneId> {
        TemporalQuery::new("Zone", |t| {
            Ok(t.query_zone_id().or_else(|| t.query_offset().map(ZoneId::from)))
        })
    }

    /// Local date, answered by anything that supports `EpochDay`.
    pub fn local_date() -> TemporalQuery<Date> {
        TemporalQuery::new("LocalDate", |t| {
            if !t.supports_field(ChronoField::EpochDay) {
                return Ok(None);
            }
            read_field(t, ChronoField::EpochDay)
                .and_then(Date::of_epoch_day)
                .map(Some)
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Temporal (arithmetic)
// ═══════════════════════════════════════════════════════════════════════════

/// A temporal value that can be adjusted.
pub trait Temporal: TemporalAccessor + Sized {
    /// `true` when `plus`/`until` accept `unit`.
    fn is_supported_unit(&self, unit: ChronoUnit) -> bool;

    /// Returns a copy with `field` set to `value`.
    fn with_field(&self, field: ChronoField, value: i64) -> Result<Self, Error>;

    /// Returns a copy with `amount` of `unit` added.
    fn plus(&self, amount: i64, unit: ChronoUnit) -> Result<Self, Error>;

    /// Signed amount of `unit` between `self` and `end`, truncated toward zero.
    fn until(&self, end: &Self, unit: ChronoUnit) -> Result<i64, Error>;

    /// Returns a copy with `amount` of `unit` subtracted.
    fn minus(&self, amount: i64, unit: ChronoUnit) -> Result<Self, Error> {
        if amount == i64::MIN {
            self.plus(i64::MAX, unit)?.plus(1, unit)
        } else {
            self.plus(-amount, unit)
        }
    }

    /// Adds an amount expressed in a single unit.
    fn plus_amount(&self, amount: &UnitAmount) -> Result<Self, Error> {
        self.plus(amount.amount(), amount.unit())
    }

    fn minus_amount(&self, amount: &UnitAmount) -> Result<Self, Error> {
        self.minus(amount.amount(), amount.unit())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// UnitAmount
// ═══════════════════════════════════════════════════════════════════════════

/// An amount of time in a single unit, such as "3 months".
///
/// Amounts in the same unit are totally ordered; amounts in different units
/// are not comparable (`partial_cmp` returns `None`, [`UnitAmount::try_cmp`]
/// returns an illegal-argument error).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UnitAmount {
    amount: i64,
    unit: ChronoUnit,
}

impl UnitAmount {
    pub const fn new(amount: i64, unit: ChronoUnit) -> Self {
        Self { amount, unit }
    }

    #[inline]
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    #[inline]
    pub const fn unit(&self) -> ChronoUnit {
        self.unit
    }

    /// Orders two amounts of the same unit.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, Error> {
        if self.unit != other.unit {
            return Err(Error::illegal(format!(
                "units cannot be compared: {} and {}",
                self.unit, other.unit
            )));
        }
        Ok(self.amount.cmp(&other.amount))
    }

    pub fn negated(&self) -> Result<Self, Error> {
        let amount = self
            .amount
            .checked_neg()
            .ok_or(Error::Arithmetic("amount negation"))?;
        Ok(Self::new(amount, self.unit))
    }
}

impl PartialOrd for UnitAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for UnitAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::{DayOfWeek, Year};
    use crate::error::ErrorKind;

    #[test]
    fn none_field_is_never_supported() {
        let year = Year::of(2012).unwrap();
        assert!(!year.is_supported(None::<ChronoField>));
        assert!(year.is_supported(ChronoField::Year));
    }

    #[test]
    fn none_field_is_a_null_argument() {
        let dow = DayOfWeek::Monday;
        assert_eq!(
            dow.get(None::<ChronoField>).unwrap_err().kind(),
            ErrorKind::NullArgument
        );
        assert_eq!(
            dow.range(None::<ChronoField>).unwrap_err().kind(),
            ErrorKind::NullArgument
        );
        assert_eq!(
            dow.get_long(None::<ChronoField>).unwrap_err().kind(),
            ErrorKind::NullArgument
        );
        assert_eq!(
            dow.query(None::<TemporalQuery<ChronoUnit>>)
                .unwrap_err()
                .kind(),
            ErrorKind::NullArgument
        );
    }

    #[test]
    fn unsupported_field_errors() {
        let dow = DayOfWeek::Friday;
        for field in ChronoField::ALL {
            if dow.is_supported(field) {
                continue;
            }
            assert_eq!(dow.get(field).unwrap_err().kind(), ErrorKind::UnsupportedField);
            assert_eq!(dow.range(field).unwrap_err().kind(), ErrorKind::UnsupportedField);
        }
    }

    #[test]
    fn custom_query_falls_back_to_none() {
        let weekday: TemporalQuery<i64> = TemporalQuery::new("Weekday", |t| {
            if t.supports_field(ChronoField::DayOfWeek) {
                read_field(t, ChronoField::DayOfWeek).map(Some)
            } else {
                Ok(None)
            }
        });
        assert_eq!(DayOfWeek::Sunday.query(weekday), Ok(Some(7)));
        assert_eq!(Year::of(2000).unwrap().query(weekday), Ok(None));
        assert_eq!(weekday.name(), "Weekday");
    }

    #[test]
    fn unit_amounts_only_compare_within_a_unit() {
        let a = UnitAmount::new(3, ChronoUnit::Days);
        let b = UnitAmount::new(5, ChronoUnit::Days);
        let c = UnitAmount::new(1, ChronoUnit::Months);
        assert!(a < b);
        assert_eq!(a.try_cmp(&b), Ok(Ordering::Less));
        assert_eq!(a.partial_cmp(&c), None);
        assert_eq!(a.try_cmp(&c).unwrap_err().kind(), ErrorKind::IllegalArgument);
        assert_eq!(c.to_string(), "1 Months");
        assert_eq!(
            UnitAmount::new(i64::MIN, ChronoUnit::Days)
                .negated()
                .unwrap_err()
                .kind(),
            ErrorKind::Arithmetic
        );
    }
}
