use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use tracing::debug;

use crate::error::AvailabilityError;
use crate::models::CalendarDayDescriptor;

const DAYS_PER_WEEK: usize = 7;

/// Calendar strip for the week `offset` weeks away from the current one,
/// using today's local date.
pub fn week_days(offset: i64) -> Result<[CalendarDayDescriptor; 7], AvailabilityError> {
    week_days_from(Local::now().date_naive(), offset)
}

/// Seven consecutive days starting on the Sunday of the week `offset`
/// weeks away from the week containing `today`.
pub fn week_days_from(
    today: NaiveDate,
    offset: i64,
) -> Result<[CalendarDayDescriptor; 7], AvailabilityError> {
    let start = week_start(today, offset)?;

    // Keep the whole strip inside chrono's supported range.
    start
        .checked_add_days(Days::new(DAYS_PER_WEEK as u64 - 1))
        .ok_or(AvailabilityError::OffsetOutOfRange(offset))?;

    debug!("Building week strip starting {} (offset {})", start, offset);

    Ok(std::array::from_fn(|i| describe(start + Days::new(i as u64))))
}

/// Sunday that opens the target week.
pub fn week_start(today: NaiveDate, offset: i64) -> Result<NaiveDate, AvailabilityError> {
    let sunday = today - Days::new(u64::from(today.weekday().num_days_from_sunday()));

    let shift = offset
        .checked_mul(DAYS_PER_WEEK as i64)
        .ok_or(AvailabilityError::OffsetOutOfRange(offset))?;
    let days = Days::new(shift.unsigned_abs());

    let start = if shift >= 0 {
        sunday.checked_add_days(days)
    } else {
        sunday.checked_sub_days(days)
    };

    start.ok_or(AvailabilityError::OffsetOutOfRange(offset))
}

fn describe(date: NaiveDate) -> CalendarDayDescriptor {
    let weekday = date.weekday();
    CalendarDayDescriptor {
        day: date.day(),
        date_obj: date,
        day_short: short_day_name(weekday).to_string(),
        day_name: weekday_full_name(weekday)[..1].to_string(),
    }
}

pub fn short_day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

pub fn weekday_full_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Exact three-letter abbreviation as emitted in the week strip.
pub fn parse_short_day(short: &str) -> Option<Weekday> {
    match short {
        "Sun" => Some(Weekday::Sun),
        "Mon" => Some(Weekday::Mon),
        "Tue" => Some(Weekday::Tue),
        "Wed" => Some(Weekday::Wed),
        "Thu" => Some(Weekday::Thu),
        "Fri" => Some(Weekday::Fri),
        "Sat" => Some(Weekday::Sat),
        _ => None,
    }
}

/// Full English weekday name for a strip abbreviation. Anything else is
/// returned unchanged; use [`parse_short_day`] to detect that case.
pub fn full_day_name(short: &str) -> String {
    match parse_short_day(short) {
        Some(weekday) => weekday_full_name(weekday).to_string(),
        None => short.to_string(),
    }
}

/// `"<Month> <Year>"` of the strip's middle day.
pub fn month_label(week: &[CalendarDayDescriptor]) -> Option<String> {
    week.get(week.len() / 2)
        .map(|middle| middle.date_obj.format("%B %Y").to_string())
}
