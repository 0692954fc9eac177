use thiserror::Error;

use shared_api_client::ApiClientError;
use shared_models::error::AppError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Malformed time '{0}', expected HH:MM")]
    MalformedTime(String),

    #[error("Time range {from}-{to} does not end after it starts")]
    InvertedRange { from: String, to: String },

    #[error("Invalid slot '{0}', expected HH:00")]
    InvalidSlot(String),

    #[error("Slot {slot} is not offered on {day}")]
    SlotNotAvailable { slot: String, day: String },

    #[error("Booking is disabled for {0}")]
    BookingDisabled(String),

    #[error("No day selected")]
    NoDaySelected,

    #[error("Week offset {0} is outside the supported calendar range")]
    OffsetOutOfRange(i64),
}

#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("Invalid doctor id '{0}'")]
    InvalidId(String),

    #[error("Doctor not found: {0}")]
    NotFound(String),

    #[error("Unauthorized access to doctor data: {0}")]
    Unauthorized(String),

    #[error("Doctor backend error: {0}")]
    Upstream(String),
}

impl DoctorError {
    pub fn from_client(doctor_id: &str, err: ApiClientError) -> Self {
        match err {
            ApiClientError::NotFound(_) => DoctorError::NotFound(doctor_id.to_string()),
            ApiClientError::Auth(msg) => DoctorError::Unauthorized(msg),
            other => DoctorError::Upstream(other.to_string()),
        }
    }
}

impl From<AvailabilityError> for AppError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::SlotNotAvailable { .. }
            | AvailabilityError::BookingDisabled(_) => AppError::Conflict(err.to_string()),
            _ => AppError::ValidationError(err.to_string()),
        }
    }
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::InvalidId(_) => AppError::ValidationError(err.to_string()),
            DoctorError::NotFound(_) => AppError::NotFound(err.to_string()),
            DoctorError::Unauthorized(_) => AppError::Auth(err.to_string()),
            DoctorError::Upstream(_) => AppError::ExternalService(err.to_string()),
        }
    }
}
