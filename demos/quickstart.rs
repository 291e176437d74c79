use calendoch::{Clock, Date, DayOfWeek, MonthDay, Year, ZoneId, ZoneOffset, SHORT_IDS};
use chrono::TimeDelta;

fn main() -> Result<(), calendoch::Error> {
    let zone = ZoneId::of_with_aliases("JST", &SHORT_IDS)?;
    let clock = Clock::tick(Clock::system(zone.clone()), TimeDelta::seconds(1))?;

    let today = Date::now(&clock)?;
    let year = Year::now(&clock)?;
    let birthday = MonthDay::of(2, 29)?;

    println!("Zone: {zone} ({})", zone.offset_at(clock.instant()?));
    println!("Instant: {}", clock.instant()?);
    println!("Today: {today} ({})", today.day_of_week());
    println!("Leap year: {}", year.is_leap());
    println!("{birthday} this year: {}", year.at_month_day(birthday)?);
    println!("Next Monday is in {} days", next_monday(today.day_of_week()));
    println!("Etc/GMT+5 is {}", ZoneId::of("Etc/GMT+5")?.normalized());
    println!("Largest offset: {}", ZoneOffset::MAX);
    Ok(())
}

fn next_monday(today: DayOfWeek) -> u8 {
    (8 - today.value()) % 7
}
