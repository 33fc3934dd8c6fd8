//! Assistant provider trait

use async_trait::async_trait;
use serde_json::Value;

use crate::error::QueryError;

/// Backend that answers natural-language queries.
///
/// The MCP gateway depends on this seam rather than on the concrete HTTP
/// client, so tests can substitute stub backends.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Submit one query and return the raw engine response.
    async fn query(&self, query: &str) -> Result<Value, QueryError>;
}
