//! Error types for the AIVA client

use thiserror::Error;

/// Failures while turning the service account key into a bearer token.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("failed to read service account key {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse service account key: {0}")]
    KeyParse(#[from] serde_json::Error),

    #[error("failed to sign token assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("token exchange failed with status {status}: {body}")]
    Exchange {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("token exchange transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Failures of a single reasoning engine query.
///
/// Every variant is caught and logged at the layer it occurs; none of them
/// crosses the tool boundary (the gateway collapses them to a fixed
/// fallback string).
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: std::time::Duration },

    #[error("reasoning engine returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}
