use async_trait::async_trait;
use std::sync::Arc;

use super::client::Transport;
use super::json_path;
use crate::error::AuthError;

/// Token returned by the fixed-token variant when none is supplied.
pub const FIXED_TEST_TOKEN: &str = "TOKEN1234567890";

const TOKEN_PATH: &str = "Body.Result.token";

/// Obtains a session token for one collection cycle.
///
/// Two variants exist, selected at construction time: [`HttpAuthClient`]
/// signs in against the provider, [`FixedTokenAuthClient`] returns a canned
/// token for wiring tests. Production logic never branches on a test flag.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Signs in and returns the session token.
    ///
    /// An empty string means the response carried no token; that is not an
    /// error — the caller decides what it means for the cycle.
    async fn sign_in(&self) -> Result<String, AuthError>;
}

/// Network-backed sign-in against the provider's credential endpoint.
pub struct HttpAuthClient {
    transport: Arc<Transport>,
    url: String,
    username: String,
    password: String,
}

impl HttpAuthClient {
    pub fn new(
        transport: Arc<Transport>,
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn sign_in(&self) -> Result<String, AuthError> {
        let body = serde_json::json!({
            "password": self.password.as_str(),
            "username": self.username.as_str(),
        })
        .to_string();

        tracing::debug!(url = %self.url, "signing in");
        let payload = self
            .transport
            .post_json(&self.url, body, None)
            .await
            .map_err(AuthError)?;

        Ok(extract_token(&payload))
    }
}

/// Pulls `Body.Result.token` out of the sign-in response.
///
/// An absent path, a non-string token, or an unparseable body all yield an
/// empty token.
fn extract_token(payload: &[u8]) -> String {
    let Ok(document) = serde_json::from_slice::<serde_json::Value>(payload) else {
        return String::new();
    };
    json_path::lookup(&document, TOKEN_PATH)
        .and_then(|token| token.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Fixed-token fake for exercising the wiring without network access.
pub struct FixedTokenAuthClient {
    token: String,
}

impl FixedTokenAuthClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Default for FixedTokenAuthClient {
    fn default() -> Self {
        Self::new(FIXED_TEST_TOKEN)
    }
}

#[async_trait]
impl AuthClient for FixedTokenAuthClient {
    async fn sign_in(&self) -> Result<String, AuthError> {
        Ok(self.token.clone())
    }
}
