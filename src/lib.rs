// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendrical Engine
//!
//! This crate provides the ISO-8601 calendrical building blocks: offsets from
//! UTC, zone identifiers, clocks, and calendar values tied together by a
//! uniform field/query protocol.
//!
//! # Core types
//!
//! - [`ZoneOffset`]: a fixed offset from UTC, within ±18:00.
//! - [`ZoneId`]: either a fixed offset or a named region with [`ZoneRules`].
//! - [`Clock`]: source of the current [`Instant`] in a zone; fixed, system,
//!   ticking or offset.
//! - [`Year`], [`Month`], [`MonthDay`], [`DayOfWeek`], [`Date`]: proleptic
//!   ISO calendar values.
//! - [`TemporalAccessor`] / [`TemporalQuery`]: read fields and run queries
//!   against any of the above.
//!
//! # Zone identifiers
//!
//! | Input | Result |
//! |-------|--------|
//! | `Z`, `+05:30`, `-08` | offset zone |
//! | `UTC`, `GMT`, `UT` | region `UTC` / `GMT` / `UT` with UTC rules |
//! | `UTC+01:00`, `GMT-5` | prefixed offset zone |
//! | `Asia/Tokyo` | region resolved through the registered providers |
//!
//! ```
//! use calendoch::{ZoneId, ZoneOffset, SHORT_IDS};
//!
//! let offset = ZoneOffset::of("+05:30").unwrap();
//! assert_eq!(offset.total_seconds(), 19_800);
//!
//! let est = ZoneId::of_with_aliases("EST", &SHORT_IDS).unwrap();
//! assert_eq!(est.id(), "-05:00");
//! ```
//!
//! # Field protocol
//!
//! ```
//! use calendoch::{ChronoField, ErrorKind, MonthDay, TemporalAccessor};
//!
//! let md = MonthDay::of(2, 29).unwrap();
//! assert_eq!(md.get(ChronoField::MonthOfYear).unwrap(), 2);
//! assert_eq!(
//!     md.get(ChronoField::Year).unwrap_err().kind(),
//!     ErrorKind::UnsupportedField
//! );
//! ```
//!
//! # Features
//!
//! - `serde`: text-based (de)serialization of every value type.
//! - `logging`: registry and fallback diagnostics through the `log` facade.

#[macro_use]
mod logging;

pub mod civil;
mod clock;
mod error;
mod field;
pub(crate) mod instant;
mod iso;
pub mod temporal;
pub mod tz;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use civil::{Date, DayOfWeek, Month, MonthDay, Year};
pub use clock::Clock;
pub use error::{Error, ErrorKind};
pub use field::{ChronoField, ChronoUnit, ValueRange};
pub use instant::Instant;
pub use iso::{is_leap_year, Era, IsoChronology, ResolverStyle, MAX_YEAR, MIN_YEAR};
pub use temporal::{queries, IntoQuery, Temporal, TemporalAccessor, TemporalQuery, UnitAmount};
pub use tz::{
    available_zone_ids, register_provider, BuiltinProvider, ZoneId, ZoneOffset,
    ZoneOffsetTransition, ZoneRules, ZoneRulesProvider, SHORT_IDS,
};
