use anyhow::Context;
use time::{Date, Duration, Month, OffsetDateTime};

/// Serde adapter for calendar dates as "YYYY-MM-DD".
pub mod iso_date {
    time::serde::format_description!(format, Date, "[year]-[month]-[day]");

    pub use self::format::*;
}

/// Adds whole calendar months, clamping to the last day of the target month.
pub fn add_months(date: Date, months: u32) -> anyhow::Result<Date> {
    let zero_based = i64::from(u8::from(date.month())) - 1 + i64::from(months);
    let year = i64::from(date.year()) + zero_based.div_euclid(12);
    let year = i32::try_from(year).context("year out of range")?;
    let month = Month::try_from((zero_based.rem_euclid(12) + 1) as u8)?;
    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).context("invalid calendar date")
}

/// Half-open UTC range `[start, end)` covering `day`.
pub fn utc_day_range(day: Date) -> (OffsetDateTime, OffsetDateTime) {
    let start = day.midnight().assume_utc();
    (start, start + Duration::days(1))
}
