use std::sync::Arc;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub doctor_api_url: String,
    pub doctor_api_key: String,
    pub http_max_retries: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            doctor_api_url: "http://localhost:54321".to_string(),
            doctor_api_key: "test-api-key".to_string(),
            http_max_retries: 0,
        }
    }
}

impl TestConfig {
    /// Points the config at a mock backend, e.g. `MockServer::uri()`.
    pub fn with_backend(url: &str) -> Self {
        Self {
            doctor_api_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            doctor_api_url: self.doctor_api_url.clone(),
            doctor_api_key: self.doctor_api_key.clone(),
            http_max_retries: self.http_max_retries,
            http_retry_delay_ms: 1,
            server_port: 0,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct MockDoctorResponses;

impl MockDoctorResponses {
    pub fn new_doctor_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Weekday clinic hours: mornings Monday to Friday, an extra afternoon
    /// block on Wednesday, nothing at the weekend.
    pub fn weekly_schedule() -> Value {
        json!([
            {"day": "Monday", "timeSlots": [{"from": "09:00", "to": "12:00"}]},
            {"day": "tuesday", "timeSlots": [{"from": "09:00", "to": "11:30"}]},
            {"day": "Wednesday", "timeSlots": [
                {"from": "09:00", "to": "12:00"},
                {"from": "14:00", "to": "17:00"}
            ]},
            {"day": "Thursday", "timeSlots": [{"from": "09:00", "to": "12:00"}]},
            {"day": "Friday", "timeSlots": [{"from": "09:00", "to": "12:00"}]}
        ])
    }

    pub fn every_day_schedule() -> Value {
        let days = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];
        Value::Array(
            days.iter()
                .map(|day| json!({"day": day, "timeSlots": [{"from": "10:00", "to": "13:00"}]}))
                .collect(),
        )
    }

    pub fn doctor_profile_response(doctor_id: &str, availability: Value) -> Value {
        json!({
            "_id": doctor_id,
            "name": "Dr. Test",
            "specialty": "General Practice",
            "fees": 50.0,
            "availability": availability
        })
    }

    pub fn doctor_without_availability(doctor_id: &str) -> Value {
        json!({
            "_id": doctor_id,
            "name": "Dr. Unscheduled",
            "specialty": "Dermatology"
        })
    }

    pub fn error_response(message: &str) -> Value {
        json!({
            "message": message
        })
    }
}
