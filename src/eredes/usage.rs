use std::sync::Arc;

use super::client::Transport;
use super::window::RequestWindow;
use crate::error::FetchError;

// Fixed request type for load-curve data on the sysgrid endpoint.
const LOAD_CURVE_REQUEST_TYPE: &str = "3";

/// Fetches raw usage payloads for a metering point and window.
pub struct UsageFetcher {
    transport: Arc<Transport>,
    url: String,
}

impl UsageFetcher {
    pub fn new(transport: Arc<Transport>, url: impl Into<String>) -> Self {
        Self {
            transport,
            url: url.into(),
        }
    }

    /// Issues the authenticated usage request and returns the raw payload.
    ///
    /// The payload is opaque here; extraction is a separate step so a fetch
    /// failure and a parse failure surface as distinct error kinds.
    pub async fn fetch(
        &self,
        window: &RequestWindow,
        cpe: &str,
        token: &str,
    ) -> Result<Vec<u8>, FetchError> {
        let body = serde_json::json!({
            "cpe": cpe,
            "request_type": LOAD_CURVE_REQUEST_TYPE,
            "start_date": window.start.as_str(),
            "end_date": window.end.as_str(),
            "wait": true,
            "formatted": false,
        })
        .to_string();

        tracing::debug!(url = %self.url, start = %window.start, end = %window.end, "requesting usages");
        self.transport
            .post_json(&self.url, body, Some(token))
            .await
            .map_err(FetchError)
    }
}
