use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub doctor_api_url: String,
    pub doctor_api_key: String,
    pub http_max_retries: u32,
    pub http_retry_delay_ms: u64,
    pub server_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            doctor_api_url: env::var("DOCTOR_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("DOCTOR_API_URL not set, using empty value");
                    String::new()
                }),
            doctor_api_key: env::var("DOCTOR_API_KEY").unwrap_or_default(),
            http_max_retries: parse_or_default("HTTP_MAX_RETRIES", 3),
            http_retry_delay_ms: parse_or_default("HTTP_RETRY_DELAY_MS", 200),
            server_port: parse_or_default("SERVER_PORT", 3000),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.doctor_api_url.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            doctor_api_url: String::new(),
            doctor_api_key: String::new(),
            http_max_retries: 3,
            http_retry_delay_ms: 200,
            server_port: 3000,
        }
    }
}

fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
