use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_config::AppConfig;

use crate::handlers::{self, DirectoryState};
use crate::services::DoctorService;

pub fn doctor_routes(state: Arc<AppConfig>) -> Router {
    doctor_routes_with_directory(Arc::new(DoctorService::new(&state)))
}

pub fn doctor_routes_with_directory(directory: DirectoryState) -> Router {
    // Pure calendar lookups, no doctor record needed
    let calendar_routes = Router::new()
        .route("/week", get(handlers::get_week))
        .route("/days/{short}/full-name", get(handlers::get_full_day_name));

    // Doctor-specific availability, backed by the profile backend
    let availability_routes = Router::new()
        .route("/doctors/{doctor_id}/week", get(handlers::get_doctor_week))
        .route("/doctors/{doctor_id}/slots", get(handlers::get_doctor_slots))
        .route("/doctors/{doctor_id}/booking-draft", post(handlers::create_booking_draft))
        .with_state(directory);

    Router::new()
        .merge(calendar_routes)
        .merge(availability_routes)
}
