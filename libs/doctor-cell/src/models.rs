use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AvailabilityError;

/// A coarse `HH:MM`-`HH:MM` window inside one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
}

impl TimeRange {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// One weekday's configured opening hours for a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityEntry {
    pub day: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_slots: Vec<TimeRange>,
}

impl AvailabilityEntry {
    pub fn new(day: &str, time_slots: Vec<TimeRange>) -> Self {
        Self {
            day: day.to_string(),
            time_slots,
        }
    }
}

/// A whole-hour bookable unit, rendered as `HH:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourlySlot(u8);

impl HourlySlot {
    pub fn new(hour: u8) -> Option<Self> {
        (hour < 24).then_some(Self(hour))
    }

    pub fn hour(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for HourlySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for HourlySlot {
    type Err = AvailabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = crate::services::slots::parse_wall_clock(s)
            .map_err(|_| AvailabilityError::InvalidSlot(s.to_string()))?;
        if time.minute() != 0 {
            return Err(AvailabilityError::InvalidSlot(s.to_string()));
        }
        Ok(Self(time.hour() as u8))
    }
}

impl PartialEq<&str> for HourlySlot {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl Serialize for HourlySlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HourlySlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One cell of the seven-day calendar strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDayDescriptor {
    pub day: u32,
    pub date_obj: NaiveDate,
    pub day_short: String,
    /// First letter of the weekday, display only.
    pub day_name: String,
}

/// Slots for one day together with the ranges that could not be expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotExpansion {
    pub slots: Vec<HourlySlot>,
    pub rejected: Vec<RejectedRange>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRange {
    pub range: TimeRange,
    pub reason: AvailabilityError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayAvailability {
    pub day_name: String,
    pub slots: Vec<HourlySlot>,
    pub is_day_unavailable: bool,
    pub is_book_disabled: bool,
}

/// Doctor record as served by the profile backend. Only the fields the
/// booking flow reads are modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorProfile {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub fees: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub availability: Vec<AvailabilityEntry>,
}

/// Payload handed to the checkout flow once a slot is picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub day_name: String,
    pub slot: HourlySlot,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingDraftRequest {
    pub date: NaiveDate,
    pub slot: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
