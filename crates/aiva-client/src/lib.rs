//! aiva-client: TM Forum AIVA Reasoning Engine Integration
//!
//! ## Endpoints & Auth
//!
//! | Call | URL | Auth |
//! |------|-----|------|
//! | Query | Vertex AI `reasoningEngines/{id}:query` | `Authorization: Bearer {token}` |
//! | Token exchange | service account key's `token_uri` | signed RS256 JWT assertion |
//!
//! One query is one POST: a fresh bearer token is exchanged for every call,
//! the request is attempted exactly once with bounded timeouts, and the
//! response is passed through as raw JSON with `output.output` as the only
//! structurally significant field.

pub mod auth;
pub mod client;
pub mod error;
pub mod provider;
pub mod snapshot;

pub use auth::{ServiceAccountAuth, ServiceAccountKey, CLOUD_PLATFORM_SCOPE};
pub use client::{answer_text, AivaClient, AivaConfig, Timeouts};
pub use error::{AuthError, QueryError};
pub use provider::Assistant;
pub use snapshot::{FileSink, NoopSink, ResponseSink};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::auth::{ServiceAccountAuth, ServiceAccountKey};
    pub use super::client::{answer_text, AivaClient, AivaConfig, Timeouts};
    pub use super::error::{AuthError, QueryError};
    pub use super::provider::Assistant;
    pub use super::snapshot::{FileSink, NoopSink, ResponseSink};
}
