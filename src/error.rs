//! Error types for the E-Redes to InfluxDB2 forwarder.
//!
//! This module defines typed errors for different components of the application,
//! providing better error categorization and enabling specific error handling strategies.

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// Collection cycle errors (sign-in, usage fetch, extraction)
    #[error("collector error")]
    Collector(#[from] CollectorError),

    /// InfluxDB storage errors
    #[error("storage error")]
    Storage(#[from] StorageError),

    /// Generic errors that don't fit other categories
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// HTTP transport errors shared by the sign-in and usage endpoints.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Request failed before a usable response arrived (connect, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response carried a status code outside the accepted set
    #[error("received status code {status} ({reason}), expected any value out of {accepted:?}")]
    Status {
        status: u16,
        reason: String,
        accepted: Vec<u16>,
    },

    /// A header value could not be encoded onto the request
    #[error("invalid request header value for {name}")]
    InvalidHeader { name: String },
}

/// Sign-in failure. Fatal for the current cycle only.
#[derive(Error, Debug)]
#[error("sign-in failed: {0}")]
pub struct AuthError(#[from] pub TransportError);

/// Usage fetch failure. Fatal for the current cycle only.
#[derive(Error, Debug)]
#[error("usage fetch failed: {0}")]
pub struct FetchError(#[from] pub TransportError);

/// Payload extraction errors. Any of these aborts extraction for the whole
/// fetch; partial results are discarded, never emitted.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Payload is not valid JSON
    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Configured path does not resolve within the payload
    #[error("path '{path}' not found in payload")]
    PathNotFound { path: String },

    /// Configured path resolves to something other than an array
    #[error("path '{path}' is not an array")]
    NotAnArray { path: String },

    /// A record in the array has an unexpected shape
    #[error("unexpected record structure: {0}")]
    UnexpectedStructure(String),

    /// A record lacks the configured timestamp field
    #[error("record is missing field '{field}'")]
    MissingField { field: String },

    /// A record carries none of the configured value fields
    #[error("record has none of the configured value fields {fields:?}")]
    EmptyRecord { fields: Vec<String> },

    /// Failed to parse the timestamp field
    #[error("failed to parse timestamp from '{text}' with format '{format}': {message}")]
    TimestampParse {
        text: String,
        format: String,
        message: String,
    },
}

/// Everything that can fail inside one collection cycle.
#[derive(Error, Debug)]
pub enum CollectorError {
    /// Sign-in transport/status failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Usage transport/status failure
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Payload extraction failure
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// InfluxDB storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// InfluxDB client error
    #[error("InfluxDB error: {0}")]
    Client(#[from] influxdb2::RequestError),

    /// Invalid data point
    #[error("invalid data point: {0}")]
    InvalidDataPoint(String),
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(err: impl std::fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.to_string(),
        }
    }
}

impl TransportError {
    /// Creates a status error from a response status and the accepted set.
    pub fn status(status: reqwest::StatusCode, accepted: &[u16]) -> Self {
        Self::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            accepted: accepted.to_vec(),
        }
    }
}

impl ParseError {
    /// Creates a path not found error.
    pub fn path_not_found(path: impl Into<String>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Creates a not-an-array error.
    pub fn not_an_array(path: impl Into<String>) -> Self {
        Self::NotAnArray { path: path.into() }
    }

    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates a timestamp parse error.
    pub fn timestamp_parse(
        text: impl Into<String>,
        format: impl Into<String>,
        err: impl std::fmt::Display,
    ) -> Self {
        Self::TimestampParse {
            text: text.into(),
            format: format.into(),
            message: err.to_string(),
        }
    }
}
