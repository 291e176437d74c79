//! Property-based checks of the calendrical invariants.
//!
//! Properties tested:
//! - Offset ids round-trip through parsing
//! - Year arithmetic is reversible
//! - The proleptic leap-year rule, including year zero and negative years
//! - Tick clocks only produce multiples of their granularity
//! - `until` is antisymmetric

use calendoch::{
    is_leap_year, ChronoUnit, Clock, Date, ErrorKind, Instant, MonthDay, Temporal, Year, ZoneId,
    ZoneOffset, MAX_YEAR, MIN_YEAR,
};
use chrono::TimeDelta;
use proptest::prelude::*;

fn reference_leap(y: i64) -> bool {
    y % 4 == 0 && (y % 100 != 0 || y % 400 == 0)
}

proptest! {
    #[test]
    fn offset_id_round_trips(seconds in -64_800i64..=64_800) {
        let offset = ZoneOffset::of_total_seconds(seconds).unwrap();
        let parsed = ZoneOffset::of(&offset.id()).unwrap();
        prop_assert_eq!(parsed, offset);
        prop_assert_eq!(i64::from(parsed.total_seconds()), seconds);
    }

    #[test]
    fn year_plus_minus_is_identity(y in MIN_YEAR..=MAX_YEAR, n in -2_000_000_000i64..=2_000_000_000) {
        let year = Year::of(y).unwrap();
        if let Ok(moved) = year.plus_years(n) {
            prop_assert_eq!(moved.minus_years(n).unwrap(), year);
        }
    }

    #[test]
    fn leap_rule(y in MIN_YEAR..=MAX_YEAR) {
        prop_assert_eq!(is_leap_year(y), reference_leap(y));
        prop_assert_eq!(Year::of(y).unwrap().is_leap(), reference_leap(y));
    }

    #[test]
    fn leap_day_valid_only_in_leap_years(y in -10_000i64..=10_000) {
        let leap_day = MonthDay::of(2, 29).unwrap();
        prop_assert_eq!(leap_day.is_valid_year(y), reference_leap(y));
    }

    #[test]
    fn sub_second_ticks_truncate_nanos(
        seconds in -1_000_000_000_000i64..1_000_000_000_000,
        nanos in 0i64..1_000_000_000,
        tick in prop::sample::select(vec![2i64, 5, 1_000, 40_000, 1_000_000, 125_000_000, 500_000_000]),
    ) {
        let base = Clock::fixed(Instant::of_epoch_second(seconds, nanos).unwrap(), ZoneId::UTC);
        let clock = Clock::tick(base, TimeDelta::nanoseconds(tick)).unwrap();
        let instant = clock.instant().unwrap();
        prop_assert_eq!(i64::from(instant.nano()) % tick, 0);
        prop_assert_eq!(instant.epoch_second(), seconds);
    }

    #[test]
    fn accepted_sub_second_ticks_divide_one_second(
        seconds in -1_000_000_000_000i64..1_000_000_000_000,
        nanos in 0i64..1_000_000_000,
        tick in 2i64..1_000_000_000,
    ) {
        let base = Clock::fixed(Instant::of_epoch_second(seconds, nanos).unwrap(), ZoneId::UTC);
        match Clock::tick(base, TimeDelta::nanoseconds(tick)) {
            Ok(clock) => {
                prop_assert_eq!(1_000_000_000 % tick, 0);
                let instant = clock.instant().unwrap();
                prop_assert_eq!(i64::from(instant.nano()) % tick, 0);
                prop_assert_eq!(instant.epoch_second(), seconds);
            }
            Err(err) => {
                prop_assert_ne!(1_000_000_000 % tick, 0);
                prop_assert_eq!(err.kind(), ErrorKind::IllegalArgument);
            }
        }
    }

    #[test]
    fn whole_second_ticks_truncate_seconds(
        seconds in -1_000_000_000_000i64..1_000_000_000_000,
        nanos in 0i64..1_000_000_000,
        tick in prop::sample::select(vec![1i64, 2, 60, 3_600, 86_400]),
    ) {
        let base = Clock::fixed(Instant::of_epoch_second(seconds, nanos).unwrap(), ZoneId::UTC);
        let clock = Clock::tick(base, TimeDelta::seconds(tick)).unwrap();
        let instant = clock.instant().unwrap();
        prop_assert_eq!(instant.nano(), 0);
        prop_assert_eq!(instant.epoch_second().rem_euclid(tick), 0);
        prop_assert!(instant.epoch_second() <= seconds);
        prop_assert!(seconds - instant.epoch_second() < tick);
    }

    #[test]
    fn date_until_is_antisymmetric(
        a in -3_000_000i64..3_000_000,
        b in -3_000_000i64..3_000_000,
        unit in prop::sample::select(vec![
            ChronoUnit::Days,
            ChronoUnit::Weeks,
            ChronoUnit::Months,
            ChronoUnit::Years,
            ChronoUnit::Decades,
            ChronoUnit::Centuries,
            ChronoUnit::Millennia,
            ChronoUnit::Eras,
        ]),
    ) {
        let a = Date::of_epoch_day(a).unwrap();
        let b = Date::of_epoch_day(b).unwrap();
        prop_assert_eq!(a.until(&b, unit).unwrap(), -b.until(&a, unit).unwrap());
    }

    #[test]
    fn year_until_is_antisymmetric(
        a in MIN_YEAR..=MAX_YEAR,
        b in MIN_YEAR..=MAX_YEAR,
        unit in prop::sample::select(vec![
            ChronoUnit::Years,
            ChronoUnit::Decades,
            ChronoUnit::Centuries,
            ChronoUnit::Millennia,
            ChronoUnit::Eras,
        ]),
    ) {
        let a = Year::of(a).unwrap();
        let b = Year::of(b).unwrap();
        prop_assert_eq!(a.until(&b, unit).unwrap(), -b.until(&a, unit).unwrap());
    }
}
