use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use axum_extra::TypedHeader;
use chrono::{Datelike, Local, NaiveDate};
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::error::AvailabilityError;
use crate::models::BookingDraftRequest;
use crate::services::calendar::{
    full_day_name, month_label, parse_short_day, week_days_from, weekday_full_name,
};
use crate::services::selection::BookingSelection;
use crate::services::slots::{day_availability, update_available_hours};
use crate::services::DoctorDirectory;

pub type DirectoryState = Arc<dyn DoctorDirectory>;

type BearerHeader = Option<TypedHeader<Authorization<Bearer>>>;

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub day: Option<String>,
    pub date: Option<NaiveDate>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn bearer(auth: &BearerHeader) -> Option<&str> {
    auth.as_ref().map(|TypedHeader(header)| header.token())
}

// ==============================================================================
// CALENDAR HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_week(
    query: Result<Query<WeekQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    let offset = query.offset.unwrap_or(0);
    let days = week_days_from(today(), offset)?;

    Ok(Json(json!({
        "offset": offset,
        "month": month_label(&days),
        "days": days
    })))
}

#[axum::debug_handler]
pub async fn get_full_day_name(Path(short): Path<String>) -> Json<Value> {
    Json(json!({
        "short": short,
        "full_name": full_day_name(&short),
        "recognized": parse_short_day(&short).is_some()
    }))
}

// ==============================================================================
// DOCTOR AVAILABILITY HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_doctor_week(
    State(directory): State<DirectoryState>,
    Path(doctor_id): Path<String>,
    query: Result<Query<WeekQuery>, QueryRejection>,
    auth: BearerHeader,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    let offset = query.offset.unwrap_or(0);
    let days = week_days_from(today(), offset)?;
    let doctor = directory.fetch_doctor(&doctor_id, bearer(&auth)).await?;

    let strip: Vec<Value> = days
        .iter()
        .map(|descriptor| {
            let day_name = full_day_name(&descriptor.day_short);
            let slots = update_available_hours(&doctor.availability, Some(&day_name));
            json!({
                "descriptor": descriptor,
                "day_name": day_name,
                "has_slots": !slots.is_empty()
            })
        })
        .collect();

    Ok(Json(json!({
        "doctor_id": doctor.id,
        "offset": offset,
        "month": month_label(&days),
        "days": strip
    })))
}

#[axum::debug_handler]
pub async fn get_doctor_slots(
    State(directory): State<DirectoryState>,
    Path(doctor_id): Path<String>,
    query: Result<Query<SlotsQuery>, QueryRejection>,
    auth: BearerHeader,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    let doctor = directory.fetch_doctor(&doctor_id, bearer(&auth)).await?;
    let today = today();

    // An explicit date wins over a bare day name.
    let (date, availability) = match (query.date, query.day.as_deref()) {
        (Some(date), _) => {
            let day_name = weekday_full_name(date.weekday());
            (Some(date), day_availability(&doctor.availability, day_name, date < today))
        }
        (None, Some(day)) => (None, day_availability(&doctor.availability, day, false)),
        (None, None) => {
            let day_name = weekday_full_name(today.weekday());
            (Some(today), day_availability(&doctor.availability, day_name, false))
        }
    };

    Ok(Json(json!({
        "doctor_id": doctor.id,
        "date": date,
        "day_name": availability.day_name,
        "slots": availability.slots,
        "total_slots": availability.slots.len(),
        "is_day_unavailable": availability.is_day_unavailable,
        "is_book_disabled": availability.is_book_disabled
    })))
}

#[axum::debug_handler]
pub async fn create_booking_draft(
    State(directory): State<DirectoryState>,
    Path(doctor_id): Path<String>,
    auth: BearerHeader,
    request: Result<Json<BookingDraftRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = request?;
    let doctor = directory.fetch_doctor(&doctor_id, bearer(&auth)).await?;

    let mut selection = BookingSelection::new(doctor.availability, today())?;
    selection.select_date(request.date);

    let day_name = selection
        .selected()
        .map(|day| day.day_name.clone())
        .unwrap_or_default();

    if selection.is_book_disabled() {
        let target = format!("{} ({})", request.date, day_name);
        return Err(AvailabilityError::BookingDisabled(target).into());
    }

    selection.select_slot(&request.slot)?;

    let draft = selection
        .booking_draft(&doctor.id)
        .ok_or_else(|| AppError::Conflict("Slot could not be reserved".to_string()))?;

    Ok(Json(json!(draft)))
}
