use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiClientError {
    #[error("Backend URL is not configured")]
    NotConfigured,

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiClientError {
    /// Server-side and transport failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiClientError::Status { status, .. } => *status >= 500,
            ApiClientError::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }
}
