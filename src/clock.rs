// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sources of the current instant.
//!
//! A [`Clock`] is a cheap-to-clone handle over one of four variants:
//!
//! | Variant | `instant()` |
//! |---------|-------------|
//! | fixed   | always the same instant |
//! | system  | the wall clock, via `chrono::Utc::now()` |
//! | tick    | the base clock floored to a multiple of the tick |
//! | offset  | the base clock shifted by a duration |
//!
//! The zone of a clock is metadata used by the `now` constructors of the
//! civil types; it never changes the instant.
//!
//! Clocks compare structurally.  Identity is observable separately through
//! [`Clock::same_instance`]: a tick of zero or one nanosecond, and an offset
//! of zero, hand back the base clock itself.

use crate::error::Error;
use crate::instant::Instant;
use crate::tz::ZoneId;
use chrono::{TimeDelta, Utc};
use std::fmt;
use std::sync::Arc;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A source of the current instant and zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clock {
    inner: Arc<ClockInner>,
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum ClockInner {
    Fixed { instant: Instant, zone: ZoneId },
    System { zone: ZoneId },
    Tick { base: Clock, tick_nanos: i64 },
    Offset { base: Clock, offset: TimeDelta },
}

impl Clock {
    fn new(inner: ClockInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    // ── constructors ──────────────────────────────────────────────────

    /// A clock that always returns `instant`.
    pub fn fixed(instant: Instant, zone: ZoneId) -> Self {
        Self::new(ClockInner::Fixed { instant, zone })
    }

    /// The system wall clock, tagged with `zone`.
    pub fn system(zone: ZoneId) -> Self {
        Self::new(ClockInner::System { zone })
    }

    pub fn system_utc() -> Self {
        Self::system(ZoneId::UTC)
    }

    /// The system clock in the zone named by `TZ`.
    pub fn system_default_zone() -> Self {
        Self::system(ZoneId::system_default())
    }

    /// A clock that rounds `base` down to multiples of `tick`.
    ///
    /// The tick must be non-negative and either an exact divisor of one
    /// second or a whole number of seconds.  Ticks of zero or one
    /// nanosecond return `base` itself.
    ///
    /// ```
    /// use calendoch::{Clock, Instant, ZoneId};
    /// use chrono::TimeDelta;
    ///
    /// let base = Clock::fixed(Instant::of_epoch_second(125, 7).unwrap(), ZoneId::UTC);
    /// let minutes = Clock::tick(base.clone(), TimeDelta::minutes(1)).unwrap();
    /// assert_eq!(minutes.instant().unwrap().epoch_second(), 120);
    ///
    /// let same = Clock::tick(base.clone(), TimeDelta::nanoseconds(1)).unwrap();
    /// assert!(same.same_instance(&base));
    /// ```
    pub fn tick(base: Clock, tick: TimeDelta) -> Result<Self, Error> {
        if tick < TimeDelta::zero() {
            return Err(Error::illegal("tick duration must not be negative"));
        }
        let nanos = tick
            .num_nanoseconds()
            .ok_or(Error::Arithmetic("tick duration in nanoseconds"))?;
        if nanos <= 1 {
            return Ok(base);
        }
        if NANOS_PER_SECOND % nanos != 0 && nanos % NANOS_PER_SECOND != 0 {
            return Err(Error::illegal(format!("invalid tick duration: {nanos}ns")));
        }
        Ok(Self::new(ClockInner::Tick {
            base,
            tick_nanos: nanos,
        }))
    }

    /// System clock in `zone`, ticking in whole seconds.
    pub fn tick_seconds(zone: ZoneId) -> Self {
        Self::new(ClockInner::Tick {
            base: Self::system(zone),
            tick_nanos: NANOS_PER_SECOND,
        })
    }

    /// System clock in `zone`, ticking in whole minutes.
    pub fn tick_minutes(zone: ZoneId) -> Self {
        Self::new(ClockInner::Tick {
            base: Self::system(zone),
            tick_nanos: 60 * NANOS_PER_SECOND,
        })
    }

    /// A clock that reads `base` shifted by `offset`.
    pub fn offset(base: Clock, offset: TimeDelta) -> Self {
        if offset.is_zero() {
            return base;
        }
        Self::new(ClockInner::Offset { base, offset })
    }

    // ── reads ─────────────────────────────────────────────────────────

    /// The current instant of this clock.
    pub fn instant(&self) -> Result<Instant, Error> {
        match &*self.inner {
            ClockInner::Fixed { instant, .. } => Ok(*instant),
            ClockInner::System { .. } => Ok(Instant::from_utc(Utc::now())),
            ClockInner::Tick { base, tick_nanos } => {
                let total = base.instant()?.total_nanos();
                let tick = i128::from(*tick_nanos);
                Instant::of_total_nanos(total - total.rem_euclid(tick))
            }
            ClockInner::Offset { base, offset } => {
                let shift = i128::from(offset.num_seconds()) * i128::from(NANOS_PER_SECOND)
                    + i128::from(offset.subsec_nanos());
                base.instant()?.plus_nanos_i128(shift)
            }
        }
    }

    /// Milliseconds since the epoch.
    pub fn millis(&self) -> Result<i64, Error> {
        self.instant()?.to_epoch_milli()
    }

    pub fn zone(&self) -> &ZoneId {
        match &*self.inner {
            ClockInner::Fixed { zone, .. } | ClockInner::System { zone } => zone,
            ClockInner::Tick { base, .. } | ClockInner::Offset { base, .. } => base.zone(),
        }
    }

    /// A copy of this clock in `zone`; `self` when the zone is unchanged.
    pub fn with_zone(&self, zone: ZoneId) -> Self {
        if *self.zone() == zone {
            return self.clone();
        }
        match &*self.inner {
            ClockInner::Fixed { instant, .. } => Self::fixed(*instant, zone),
            ClockInner::System { .. } => Self::system(zone),
            ClockInner::Tick { base, tick_nanos } => Self::new(ClockInner::Tick {
                base: base.with_zone(zone),
                tick_nanos: *tick_nanos,
            }),
            ClockInner::Offset { base, offset } => Self::new(ClockInner::Offset {
                base: base.with_zone(zone),
                offset: *offset,
            }),
        }
    }

    /// `true` when both handles point at the same clock.
    #[inline]
    pub fn same_instance(&self, other: &Clock) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.inner {
            ClockInner::Fixed { instant, zone } => write!(f, "FixedClock[{instant},{zone}]"),
            ClockInner::System { zone } => write!(f, "SystemClock[{zone}]"),
            ClockInner::Tick { base, tick_nanos } => write!(f, "TickClock[{base},{tick_nanos}ns]"),
            ClockInner::Offset { base, offset } => write!(f, "OffsetClock[{base},{offset}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn fixed(seconds: i64, nanos: i64) -> Clock {
        Clock::fixed(Instant::of_epoch_second(seconds, nanos).unwrap(), ZoneId::UTC)
    }

    #[test]
    fn test_fixed_clock() {
        let clock = fixed(1_000, 123_456_789);
        assert_eq!(clock.instant().unwrap().epoch_second(), 1_000);
        assert_eq!(clock.millis(), Ok(1_000_123));
        assert_eq!(clock.zone(), &ZoneId::UTC);
        assert_eq!(clock, fixed(1_000, 123_456_789));
        assert_ne!(clock, fixed(1_000, 0));
    }

    #[test]
    fn test_with_zone_keeps_instant() {
        let clock = fixed(42, 0);
        let tokyo = ZoneId::of("Asia/Tokyo").unwrap();
        let moved = clock.with_zone(tokyo.clone());
        assert_eq!(moved.zone(), &tokyo);
        assert_eq!(moved.instant(), clock.instant());
        assert!(clock.with_zone(ZoneId::UTC).same_instance(&clock));
    }

    #[test]
    fn test_system_clock_tracks_wall_time() {
        let before = Utc::now().timestamp();
        let read = Clock::system_utc().instant().unwrap().epoch_second();
        let after = Utc::now().timestamp();
        assert!(before <= read && read <= after);
    }

    #[test]
    fn test_sub_second_tick() {
        let base = fixed(10, 123_456_789);
        let tick = Clock::tick(base, TimeDelta::microseconds(250)).unwrap();
        let instant = tick.instant().unwrap();
        assert_eq!(instant.epoch_second(), 10);
        assert_eq!(instant.nano(), 123_250_000);
    }

    #[test]
    fn test_whole_second_tick_floors_negative_instants() {
        let base = fixed(-1, 500_000_000);
        let tick = Clock::tick(base, TimeDelta::seconds(10)).unwrap();
        let instant = tick.instant().unwrap();
        assert_eq!(instant.epoch_second(), -10);
        assert_eq!(instant.nano(), 0);
    }

    #[test]
    fn test_degenerate_ticks_return_base() {
        let base = Clock::system_utc();
        let zero = Clock::tick(base.clone(), TimeDelta::zero()).unwrap();
        let one = Clock::tick(base.clone(), TimeDelta::nanoseconds(1)).unwrap();
        assert!(zero.same_instance(&base));
        assert!(one.same_instance(&base));
        let two = Clock::tick(base.clone(), TimeDelta::nanoseconds(2)).unwrap();
        assert!(!two.same_instance(&base));
    }

    #[test]
    fn test_invalid_ticks() {
        let base = Clock::system_utc();
        let err = Clock::tick(base.clone(), TimeDelta::seconds(-1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalArgument);
        let err = Clock::tick(base.clone(), TimeDelta::nanoseconds(999_999_999)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalArgument);
        // Whole milliseconds are not enough on their own.
        for millis in [3, 7, 1_500] {
            let err = Clock::tick(base.clone(), TimeDelta::milliseconds(millis)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::IllegalArgument, "{millis}ms");
        }
        assert!(Clock::tick(base.clone(), TimeDelta::milliseconds(2_000)).is_ok());
        let err = Clock::tick(base, TimeDelta::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arithmetic);
    }

    #[test]
    fn test_tick_equality_is_structural() {
        let a = Clock::tick(fixed(5, 0), TimeDelta::milliseconds(10)).unwrap();
        let b = Clock::tick(fixed(5, 0), TimeDelta::milliseconds(10)).unwrap();
        assert_eq!(a, b);
        assert!(!a.same_instance(&b));
        assert_eq!(Clock::tick_seconds(ZoneId::UTC), Clock::tick_seconds(ZoneId::UTC));
        assert_ne!(Clock::tick_seconds(ZoneId::UTC), Clock::tick_minutes(ZoneId::UTC));
    }

    #[test]
    fn test_offset_clock() {
        let base = fixed(100, 0);
        let shifted = Clock::offset(base.clone(), TimeDelta::milliseconds(-1_500));
        let instant = shifted.instant().unwrap();
        assert_eq!(instant.epoch_second(), 98);
        assert_eq!(instant.nano(), 500_000_000);
        assert!(Clock::offset(base.clone(), TimeDelta::zero()).same_instance(&base));

        // Longer than i64 nanoseconds can hold.
        let far = TimeDelta::days(200_000) + TimeDelta::nanoseconds(123);
        let instant = Clock::offset(fixed(0, 0), far).instant().unwrap();
        assert_eq!(instant.epoch_second(), 17_280_000_000);
        assert_eq!(instant.nano(), 123);
        let instant = Clock::offset(fixed(0, 0), -far).instant().unwrap();
        assert_eq!(instant.epoch_second(), -17_280_000_001);
        assert_eq!(instant.nano(), 999_999_877);
    }
}
