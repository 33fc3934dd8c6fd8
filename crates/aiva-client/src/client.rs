//! AIVA Reasoning Engine client
//!
//! One HTTP POST per query against the fixed Vertex AI reasoning engine
//! endpoint:
//!
//! ```text
//! POST {endpoint}
//! Authorization: Bearer {token}
//! Content-Type: application/json
//!
//! {"input": {"input": "<query text>"}}
//! ```
//!
//! Expected success shape is `{"output": {"output": "<answer>"}}`; all other
//! keys are opaque passthrough. A single attempt per call is the full retry
//! policy.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::auth::{ServiceAccountAuth, ServiceAccountKey, CLOUD_PLATFORM_SCOPE};
use crate::error::QueryError;
use crate::provider::Assistant;
use crate::snapshot::{NoopSink, ResponseSink};

/// Fixed endpoints for the AIVA reasoning engine.
pub mod endpoints {
    /// Vertex AI reasoning engine query endpoint.
    pub const REASONING_ENGINE_URL: &str = "https://us-central1-aiplatform.googleapis.com/v1beta1/projects/982845833565/locations/us-central1/reasoningEngines/156728785469702144:query";
}

/// Timeout tuple applied to each query.
#[derive(Debug, Clone)]
pub struct Timeouts {
    pub connect: Duration,
    /// Whole-request deadline; dominated by reading the engine's answer.
    pub read: Duration,
    pub write: Duration,
    pub pool: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            read: Duration::from_secs(30),
            write: Duration::from_secs(10),
            pool: Duration::from_secs(5),
        }
    }
}

/// Client configuration: endpoint URL, OAuth scope, timeout tuple, pool cap.
#[derive(Debug, Clone)]
pub struct AivaConfig {
    pub endpoint: String,
    pub scope: String,
    pub timeouts: Timeouts,
    /// Idle connections kept alive per host.
    pub max_idle_connections: usize,
}

impl Default for AivaConfig {
    fn default() -> Self {
        Self {
            endpoint: endpoints::REASONING_ENGINE_URL.to_string(),
            scope: CLOUD_PLATFORM_SCOPE.to_string(),
            timeouts: Timeouts::default(),
            max_idle_connections: 5,
        }
    }
}

/// Client for the AIVA reasoning engine.
///
/// Holds the pooled HTTP client, the credential exchanger, and the snapshot
/// sink. No state outlives a single `query` call.
pub struct AivaClient {
    http: Client,
    config: AivaConfig,
    auth: ServiceAccountAuth,
    sink: Arc<dyn ResponseSink>,
}

impl AivaClient {
    pub fn new(config: AivaConfig, key: ServiceAccountKey) -> Self {
        Self::with_sink(config, key, Arc::new(NoopSink))
    }

    /// Create a client with an explicit response sink.
    pub fn with_sink(
        config: AivaConfig,
        key: ServiceAccountKey,
        sink: Arc<dyn ResponseSink>,
    ) -> Self {
        let http = Client::builder()
            .connect_timeout(config.timeouts.connect)
            .timeout(config.timeouts.read)
            .pool_idle_timeout(config.timeouts.pool)
            .pool_max_idle_per_host(config.max_idle_connections)
            .build()
            .unwrap_or_default();
        let auth = ServiceAccountAuth::new(key, config.scope.clone());
        Self {
            http,
            config,
            auth,
            sink,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    async fn query_engine(&self, query: &str) -> Result<Value, QueryError> {
        info!(query = %query, "querying AIVA");

        let token = self.auth.access_token().await.map_err(|e| {
            error!(error = %e, "failed to get access token");
            e
        })?;

        let payload = json!({ "input": { "input": query } });

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.classify_transport(e))?;

        if !status.is_success() {
            error!(status = %status, body = %body, "reasoning engine returned error status");
            return Err(QueryError::Status { status, body });
        }

        let parsed: Value = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "failed to decode reasoning engine response");
            QueryError::Decode(e)
        })?;

        match answer_text(&parsed) {
            Some(output) => info!(output = %output, "response received"),
            None => warn!("no output found in response"),
        }

        self.sink.record(&parsed);
        Ok(parsed)
    }

    fn classify_transport(&self, err: reqwest::Error) -> QueryError {
        if err.is_timeout() {
            let timeout = self.config.timeouts.read;
            error!(timeout = ?timeout, "request timed out");
            QueryError::Timeout { timeout }
        } else {
            error!(error = %err, "transport error");
            QueryError::Transport(err)
        }
    }
}

#[async_trait::async_trait]
impl Assistant for AivaClient {
    async fn query(&self, query: &str) -> Result<Value, QueryError> {
        self.query_engine(query).await
    }
}

/// Extract the answer string at `output.output`, if present.
///
/// Absence is not an error: the caller degrades to its "no response"
/// fallback instead.
pub fn answer_text(response: &Value) -> Option<&str> {
    response.get("output")?.get("output")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answer_text_extracts_nested_output() {
        let response = json!({"output": {"output": "ODF is the Open Digital Framework"}});
        assert_eq!(
            answer_text(&response),
            Some("ODF is the Open Digital Framework")
        );
    }

    #[test]
    fn answer_text_is_none_when_missing() {
        assert_eq!(answer_text(&json!({})), None);
        assert_eq!(answer_text(&json!({"output": {}})), None);
        assert_eq!(answer_text(&json!({"output": {"output": 42}})), None);
        assert_eq!(answer_text(&json!({"output": "flat"})), None);
    }

    #[test]
    fn default_timeouts_match_the_wire_contract() {
        let timeouts = Timeouts::default();
        assert_eq!(timeouts.connect, Duration::from_secs(10));
        assert_eq!(timeouts.read, Duration::from_secs(30));
        assert_eq!(timeouts.write, Duration::from_secs(10));
        assert_eq!(timeouts.pool, Duration::from_secs(5));
    }

    #[test]
    fn default_config_targets_the_reasoning_engine() {
        let config = AivaConfig::default();
        assert_eq!(config.endpoint, endpoints::REASONING_ENGINE_URL);
        assert_eq!(config.scope, CLOUD_PLATFORM_SCOPE);
        assert_eq!(config.max_idle_connections, 5);
    }
}
