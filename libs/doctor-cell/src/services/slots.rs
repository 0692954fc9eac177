use std::sync::OnceLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use tracing::{debug, warn};

use crate::error::AvailabilityError;
use crate::models::{
    AvailabilityEntry, DayAvailability, HourlySlot, RejectedRange, SlotExpansion, TimeRange,
};

fn wall_clock_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").expect("wall clock pattern is valid")
    })
}

/// Strict two-digit `HH:MM`, 24-hour clock.
pub fn parse_wall_clock(raw: &str) -> Result<NaiveTime, AvailabilityError> {
    let malformed = || AvailabilityError::MalformedTime(raw.to_string());

    let captures = wall_clock_pattern().captures(raw.trim()).ok_or_else(malformed)?;
    let hour: u32 = captures[1].parse().map_err(|_| malformed())?;
    let minute: u32 = captures[2].parse().map_err(|_| malformed())?;

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(malformed)
}

/// Whole hours covered by `range`: `[from.hour, to.hour)`. A trailing
/// partial hour is dropped and minute offsets are discarded.
pub fn expand_range(range: &TimeRange) -> Result<Vec<HourlySlot>, AvailabilityError> {
    let from = parse_wall_clock(&range.from)?;
    let to = parse_wall_clock(&range.to)?;

    if from >= to {
        return Err(AvailabilityError::InvertedRange {
            from: range.from.clone(),
            to: range.to.clone(),
        });
    }

    Ok((from.hour()..to.hour())
        .filter_map(|hour| HourlySlot::new(hour as u8))
        .collect())
}

/// First entry whose day matches `day_name`, ignoring case.
pub fn find_entry<'a>(
    entries: &'a [AvailabilityEntry],
    day_name: &str,
) -> Option<&'a AvailabilityEntry> {
    let wanted = day_name.trim();
    entries
        .iter()
        .find(|entry| entry.day.trim().eq_ignore_ascii_case(wanted))
}

/// Expands every range configured for `day_name`, in stored order.
/// Hours repeated by overlapping ranges are kept once, at their first
/// position. Unusable ranges are reported in `rejected`.
pub fn expand_day(entries: &[AvailabilityEntry], day_name: Option<&str>) -> SlotExpansion {
    let day_name = match day_name.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => return SlotExpansion::default(),
    };

    let Some(entry) = find_entry(entries, day_name) else {
        debug!("No availability configured for {}", day_name);
        return SlotExpansion::default();
    };

    let mut expansion = SlotExpansion::default();
    let mut seen = [false; 24];

    for range in &entry.time_slots {
        match expand_range(range) {
            Ok(slots) => {
                for slot in slots {
                    let hour = usize::from(slot.hour());
                    if !seen[hour] {
                        seen[hour] = true;
                        expansion.slots.push(slot);
                    }
                }
            }
            Err(reason) => {
                warn!(
                    "Skipping availability range {}-{} on {}: {}",
                    range.from, range.to, entry.day, reason
                );
                expansion.rejected.push(RejectedRange {
                    range: range.clone(),
                    reason,
                });
            }
        }
    }

    debug!("{} bookable hours on {}", expansion.slots.len(), day_name);
    expansion
}

/// Bookable hourly slots for `day_name`. Empty means the day is unavailable.
pub fn update_available_hours(
    entries: &[AvailabilityEntry],
    day_name: Option<&str>,
) -> Vec<HourlySlot> {
    expand_day(entries, day_name).slots
}

/// Slots for `day_name` with the derived availability flags. `is_past`
/// disables booking without marking the day itself unavailable.
pub fn day_availability(
    entries: &[AvailabilityEntry],
    day_name: &str,
    is_past: bool,
) -> DayAvailability {
    let slots = update_available_hours(entries, Some(day_name));
    let is_day_unavailable = slots.is_empty();

    DayAvailability {
        day_name: day_name.to_string(),
        slots,
        is_day_unavailable,
        is_book_disabled: is_day_unavailable || is_past,
    }
}
