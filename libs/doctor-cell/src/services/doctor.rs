use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, instrument};

use shared_api_client::RestClient;
use shared_config::AppConfig;

use crate::error::DoctorError;
use crate::models::DoctorProfile;

/// Source of doctor records for the booking flow.
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    async fn fetch_doctor(
        &self,
        doctor_id: &str,
        auth_token: Option<&str>,
    ) -> Result<DoctorProfile, DoctorError>;
}

// The profile backend answers either with the bare record or wrapped in
// `{"doctor": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum DoctorEnvelope {
    Wrapped { doctor: DoctorProfile },
    Bare(DoctorProfile),
}

// Ids travel as one encoded path segment; dot segments would be dropped by
// URL normalisation and address the collection instead of a record.
fn validate_doctor_id(doctor_id: &str) -> Result<(), DoctorError> {
    let trimmed = doctor_id.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return Err(DoctorError::InvalidId(doctor_id.to_string()));
    }
    Ok(())
}

pub struct DoctorService {
    client: RestClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: RestClient::new(config),
        }
    }
}

#[async_trait]
impl DoctorDirectory for DoctorService {
    #[instrument(skip(self, auth_token))]
    async fn fetch_doctor(
        &self,
        doctor_id: &str,
        auth_token: Option<&str>,
    ) -> Result<DoctorProfile, DoctorError> {
        debug!("Fetching doctor profile: {}", doctor_id);

        validate_doctor_id(doctor_id)?;

        let envelope: DoctorEnvelope = self
            .client
            .request(Method::GET, &["doctors", doctor_id], auth_token, None)
            .await
            .map_err(|e| DoctorError::from_client(doctor_id, e))?;

        let doctor = match envelope {
            DoctorEnvelope::Wrapped { doctor } | DoctorEnvelope::Bare(doctor) => doctor,
        };

        debug!(
            "Doctor {} has availability on {} day(s)",
            doctor.id,
            doctor.availability.len()
        );
        Ok(doctor)
    }
}
