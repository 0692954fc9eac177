use std::time::Duration;

use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Method, Url,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use shared_config::AppConfig;

use crate::error::ApiClientError;

pub struct RestClient {
    client: Client,
    base_url: String,
    api_key: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl RestClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.doctor_api_url.trim_end_matches('/').to_string(),
            api_key: config.doctor_api_key.clone(),
            max_retries: config.http_max_retries,
            retry_delay: Duration::from_millis(config.http_retry_delay_ms),
        }
    }

    fn get_headers(&self, auth_token: Option<&str>) -> Result<HeaderMap, ApiClientError> {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if !self.api_key.is_empty() {
            let value = HeaderValue::from_str(&self.api_key)
                .map_err(|_| ApiClientError::InvalidHeader("apikey".to_string()))?;
            headers.insert("apikey", value);
        }

        if let Some(token) = auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiClientError::InvalidHeader("authorization".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// Appends `segments` to the base URL, percent-encoding each one so a
    /// segment can never add path components or a query string.
    pub fn resource_url(&self, segments: &[&str]) -> Result<Url, ApiClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| ApiClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Sends a JSON request to the resource named by `segments`, retrying
    /// transport failures and 5xx responses with a linearly growing delay.
    pub async fn request<T>(
        &self,
        method: Method,
        segments: &[&str],
        auth_token: Option<&str>,
        body: Option<Value>,
    ) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
    {
        if self.base_url.is_empty() {
            return Err(ApiClientError::NotConfigured);
        }

        let url = self.resource_url(segments)?;

        let mut attempt = 0;
        loop {
            match self.send_once(method.clone(), &url, auth_token, body.as_ref()).await {
                Ok(data) => return Ok(data),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "Request to {} failed ({}), retrying (attempt {}/{})",
                        url, e, attempt, self.max_retries
                    );
                    tokio::time::sleep(self.retry_delay * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once<T>(
        &self,
        method: Method,
        url: &Url,
        auth_token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
    {
        debug!("Making request to {}", url);

        let headers = self.get_headers(auth_token)?;

        let mut req = self.client.request(method, url.clone()).headers(headers);

        if let Some(body_data) = body {
            req = req.json(body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => ApiClientError::Auth(error_text),
                404 => ApiClientError::NotFound(error_text),
                code => ApiClientError::Status { status: code, body: error_text },
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
