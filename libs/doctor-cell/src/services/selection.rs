use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::AvailabilityError;
use crate::models::{AvailabilityEntry, BookingDraft, CalendarDayDescriptor, HourlySlot};
use crate::services::calendar::{
    full_day_name, month_label, short_day_name, week_days_from, weekday_full_name,
};
use crate::services::slots::update_available_hours;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    NoDaySelected,
    DaySelected,
    SlotSelected(HourlySlot),
    DayUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDay {
    pub date: NaiveDate,
    pub day_short: String,
    pub day_name: String,
}

impl SelectedDay {
    fn from_date(date: NaiveDate) -> Self {
        let weekday = date.weekday();
        Self {
            date,
            day_short: short_day_name(weekday).to_string(),
            day_name: weekday_full_name(weekday).to_string(),
        }
    }
}

/// Day and slot selection for one doctor's booking screen.
///
/// The selected date, its abbreviation and its full name are always
/// replaced together before slots are re-expanded, so the slot list never
/// reflects a stale day.
#[derive(Debug, Clone)]
pub struct BookingSelection {
    today: NaiveDate,
    availability: Vec<AvailabilityEntry>,
    week_offset: i64,
    week: [CalendarDayDescriptor; 7],
    selected: Option<SelectedDay>,
    slots: Vec<HourlySlot>,
    selected_slot: Option<HourlySlot>,
}

impl BookingSelection {
    /// Starts on the current week with `today` selected.
    pub fn new(
        availability: Vec<AvailabilityEntry>,
        today: NaiveDate,
    ) -> Result<Self, AvailabilityError> {
        let week = week_days_from(today, 0)?;
        let mut selection = Self {
            today,
            availability,
            week_offset: 0,
            week,
            selected: None,
            slots: Vec::new(),
            selected_slot: None,
        };
        selection.select_date(today);
        Ok(selection)
    }

    pub fn select_day(&mut self, descriptor: &CalendarDayDescriptor) {
        let day = SelectedDay {
            date: descriptor.date_obj,
            day_short: descriptor.day_short.clone(),
            day_name: full_day_name(&descriptor.day_short),
        };
        self.apply_selection(day);
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.apply_selection(SelectedDay::from_date(date));
    }

    fn apply_selection(&mut self, day: SelectedDay) {
        debug!("Selecting {} ({})", day.date, day.day_name);
        self.slots = update_available_hours(&self.availability, Some(&day.day_name));
        self.selected = Some(day);
        self.selected_slot = None;
    }

    /// Pages the strip by `delta` weeks. The current selection is kept even
    /// when it falls outside the new week.
    pub fn shift_week(
        &mut self,
        delta: i64,
    ) -> Result<&[CalendarDayDescriptor; 7], AvailabilityError> {
        let offset = self.week_offset.checked_add(delta).ok_or_else(|| {
            AvailabilityError::OffsetOutOfRange(self.week_offset.saturating_add(delta))
        })?;
        self.week = week_days_from(self.today, offset)?;
        self.week_offset = offset;
        Ok(&self.week)
    }

    pub fn select_slot(&mut self, slot: &str) -> Result<HourlySlot, AvailabilityError> {
        let day = self.selected.as_ref().ok_or(AvailabilityError::NoDaySelected)?;
        let wanted: HourlySlot = slot.parse()?;

        if !self.slots.contains(&wanted) {
            return Err(AvailabilityError::SlotNotAvailable {
                slot: wanted.to_string(),
                day: day.day_name.clone(),
            });
        }

        self.selected_slot = Some(wanted);
        Ok(wanted)
    }

    /// Replaces the doctor's availability after a profile refresh. A chosen
    /// slot survives only if it is still offered.
    pub fn update_availability(&mut self, availability: Vec<AvailabilityEntry>) {
        self.availability = availability;
        if let Some(day) = &self.selected {
            self.slots = update_available_hours(&self.availability, Some(&day.day_name));
        }
        if let Some(slot) = self.selected_slot {
            if !self.slots.contains(&slot) {
                self.selected_slot = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.slots.clear();
        self.selected_slot = None;
    }

    pub fn state(&self) -> SelectionState {
        match (&self.selected, self.selected_slot) {
            (None, _) => SelectionState::NoDaySelected,
            (Some(_), Some(slot)) => SelectionState::SlotSelected(slot),
            (Some(_), None) if self.slots.is_empty() => SelectionState::DayUnavailable,
            (Some(_), None) => SelectionState::DaySelected,
        }
    }

    pub fn is_day_unavailable(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_selected_date_past(&self) -> bool {
        self.selected
            .as_ref()
            .map(|day| day.date < self.today)
            .unwrap_or(false)
    }

    pub fn is_book_disabled(&self) -> bool {
        self.is_day_unavailable() || self.is_selected_date_past()
    }

    /// Checkout hand-off, available once a slot is chosen on a bookable day.
    pub fn booking_draft(&self, doctor_id: &str) -> Option<BookingDraft> {
        if self.is_book_disabled() {
            return None;
        }
        let day = self.selected.as_ref()?;
        let slot = self.selected_slot?;

        Some(BookingDraft {
            doctor_id: doctor_id.to_string(),
            date: day.date,
            day_name: day.day_name.clone(),
            slot,
        })
    }

    pub fn week(&self) -> &[CalendarDayDescriptor; 7] {
        &self.week
    }

    pub fn week_offset(&self) -> i64 {
        self.week_offset
    }

    pub fn month_label(&self) -> Option<String> {
        month_label(&self.week)
    }

    pub fn selected(&self) -> Option<&SelectedDay> {
        self.selected.as_ref()
    }

    pub fn slots(&self) -> &[HourlySlot] {
        &self.slots
    }

    pub fn selected_slot(&self) -> Option<HourlySlot> {
        self.selected_slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeRange;
    use chrono::Days;

    // 2026-10-19 is a Monday.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn weekday_schedule() -> Vec<AvailabilityEntry> {
        vec![
            AvailabilityEntry::new("Monday", vec![TimeRange::new("09:00", "12:00")]),
            AvailabilityEntry::new("wednesday", vec![TimeRange::new("13:00", "15:00")]),
        ]
    }

    #[test]
    fn starts_with_today_selected() {
        let selection = BookingSelection::new(weekday_schedule(), today()).unwrap();
        let selected = selection.selected().unwrap();
        assert_eq!(selected.date, today());
        assert_eq!(selected.day_name, "Monday");
        assert_eq!(selection.slots().len(), 3);
        assert_eq!(selection.state(), SelectionState::DaySelected);
        assert!(!selection.is_book_disabled());
    }

    #[test]
    fn picking_a_day_updates_all_fields_together() {
        let mut selection = BookingSelection::new(weekday_schedule(), today()).unwrap();
        let wednesday = selection.week()[3].clone();
        selection.select_day(&wednesday);

        let selected = selection.selected().unwrap();
        assert_eq!(selected.date, wednesday.date_obj);
        assert_eq!(selected.day_short, "Wed");
        assert_eq!(selected.day_name, "Wednesday");
        let labels: Vec<String> = selection.slots().iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["13:00", "14:00"]);
    }

    #[test]
    fn day_without_hours_is_unavailable() {
        let mut selection = BookingSelection::new(weekday_schedule(), today()).unwrap();
        let tuesday = selection.week()[2].clone();
        selection.select_day(&tuesday);

        assert_eq!(selection.state(), SelectionState::DayUnavailable);
        assert!(selection.is_day_unavailable());
        assert!(selection.is_book_disabled());
        assert_eq!(selection.booking_draft("doc-1"), None);
    }

    #[test]
    fn slot_selection_produces_draft() {
        let mut selection = BookingSelection::new(weekday_schedule(), today()).unwrap();
        let slot = selection.select_slot("10:00").unwrap();

        assert_eq!(selection.state(), SelectionState::SlotSelected(slot));
        let draft = selection.booking_draft("doc-1").unwrap();
        assert_eq!(draft.doctor_id, "doc-1");
        assert_eq!(draft.date, today());
        assert_eq!(draft.day_name, "Monday");
        assert_eq!(draft.slot.to_string(), "10:00");
    }

    #[test]
    fn slot_outside_expansion_is_refused() {
        let mut selection = BookingSelection::new(weekday_schedule(), today()).unwrap();
        let err = selection.select_slot("12:00").unwrap_err();
        assert_eq!(
            err,
            AvailabilityError::SlotNotAvailable {
                slot: "12:00".to_string(),
                day: "Monday".to_string()
            }
        );
        assert_eq!(selection.selected_slot(), None);
    }

    #[test]
    fn changing_day_drops_chosen_slot() {
        let mut selection = BookingSelection::new(weekday_schedule(), today()).unwrap();
        selection.select_slot("09:00").unwrap();
        selection.select_date(today() + Days::new(2));
        assert_eq!(selection.selected_slot(), None);
        assert_eq!(selection.state(), SelectionState::DaySelected);
    }

    #[test]
    fn week_shift_keeps_selection() {
        let mut selection = BookingSelection::new(weekday_schedule(), today()).unwrap();
        let next = selection.shift_week(1).unwrap().clone();

        assert_eq!(next[0].date_obj, NaiveDate::from_ymd_opt(2026, 10, 25).unwrap());
        assert_eq!(selection.week_offset(), 1);
        assert_eq!(selection.selected().unwrap().date, today());
        assert_eq!(selection.month_label().as_deref(), Some("October 2026"));
    }

    #[test]
    fn failed_week_shift_reports_target_offset() {
        let mut selection = BookingSelection::new(weekday_schedule(), today()).unwrap();
        selection.shift_week(2).unwrap();

        assert_eq!(
            selection.shift_week(1_000_000_000).unwrap_err(),
            AvailabilityError::OffsetOutOfRange(1_000_000_002)
        );
        assert_eq!(
            selection.shift_week(i64::MAX).unwrap_err(),
            AvailabilityError::OffsetOutOfRange(i64::MAX)
        );
        assert_eq!(selection.week_offset(), 2);
        assert_eq!(selection.week()[0].date_obj, NaiveDate::from_ymd_opt(2026, 11, 1).unwrap());
    }

    #[test]
    fn past_days_are_selectable_but_not_bookable() {
        let mut selection = BookingSelection::new(weekday_schedule(), today()).unwrap();
        selection.shift_week(-1).unwrap();
        let last_monday = selection.week()[1].clone();
        selection.select_day(&last_monday);

        assert!(!selection.is_day_unavailable());
        assert!(selection.is_selected_date_past());
        assert!(selection.is_book_disabled());
        selection.select_slot("09:00").unwrap();
        assert_eq!(selection.booking_draft("doc-1"), None);
    }

    #[test]
    fn refresh_drops_slot_no_longer_offered() {
        let mut selection = BookingSelection::new(weekday_schedule(), today()).unwrap();
        selection.select_slot("11:00").unwrap();
        selection.update_availability(vec![AvailabilityEntry::new(
            "Monday",
            vec![TimeRange::new("09:00", "10:00")],
        )]);

        assert_eq!(selection.selected_slot(), None);
        assert_eq!(selection.slots().len(), 1);
    }

    #[test]
    fn clear_returns_to_no_selection() {
        let mut selection = BookingSelection::new(Vec::new(), today()).unwrap();
        assert_eq!(selection.state(), SelectionState::DayUnavailable);
        selection.clear();
        assert_eq!(selection.state(), SelectionState::NoDaySelected);
        assert_eq!(selection.select_slot("09:00"), Err(AvailabilityError::NoDaySelected));
    }
}
