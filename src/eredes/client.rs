use crate::config::EredesConfig;
use crate::error::{ConfigError, TransportError};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, HOST, USER_AGENT,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

use super::headers::ExtraHeaders;

// The provider rejects unknown clients; present a browser.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_13_6) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/13.1.2 Safari/605.1.15";

/// Shared HTTP plumbing for the sign-in and usage endpoints.
///
/// Built once at startup and reused across cycles; cycles are sequential so
/// no further synchronization is needed.
pub struct Transport {
    http: HttpClient,
    base_headers: HeaderMap,
    success_status_codes: Vec<u16>,
}

impl Transport {
    pub fn new(
        timeout: Duration,
        insecure_skip_verify: bool,
        extra_headers: &ExtraHeaders,
        success_status_codes: Vec<u16>,
    ) -> Result<Self, ConfigError> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(insecure_skip_verify)
            .build()
            .map_err(|e| ConfigError::invalid("http_client", e))?;

        // Configured headers first, fixed pair after, so the fixed pair wins.
        let mut base_headers = HeaderMap::new();
        for (name, value) in extra_headers.iter() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ConfigError::invalid("extra_headers", e))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ConfigError::invalid("extra_headers", e))?;
            base_headers.insert(name, value);
        }
        if let Some(host) = extra_headers.host() {
            let value = HeaderValue::from_str(host)
                .map_err(|e| ConfigError::invalid("extra_headers", e))?;
            base_headers.insert(HOST, value);
        }
        base_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        base_headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        Ok(Self {
            http,
            base_headers,
            success_status_codes,
        })
    }

    pub fn from_config(config: &EredesConfig) -> Result<Self, ConfigError> {
        let extra_headers = match config.extra_headers.as_deref() {
            Some(spec) => ExtraHeaders::parse(spec)?,
            None => ExtraHeaders::default(),
        };
        Self::new(
            Duration::from_secs(config.timeout_seconds),
            config.insecure_skip_verify,
            &extra_headers,
            config.success_status_codes.clone(),
        )
    }

    /// POSTs a JSON body, optionally with a bearer token, and returns the
    /// raw response payload when the status code is in the accepted set.
    pub async fn post_json(
        &self,
        url: &str,
        body: String,
        bearer_token: Option<&str>,
    ) -> Result<Vec<u8>, TransportError> {
        let mut headers = self.base_headers.clone();
        if let Some(token) = bearer_token {
            let bearer = format!("Bearer {}", token.trim());
            let value = HeaderValue::from_str(&bearer).map_err(|_| {
                TransportError::InvalidHeader {
                    name: "authorization".to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let response = self
            .http
            .post(url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !self.success_status_codes.contains(&status.as_u16()) {
            return Err(TransportError::status(status, &self.success_status_codes));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
