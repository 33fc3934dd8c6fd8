//! Tool gateway
//!
//! The callable surface exposed over `tools/call`. One tool: query the AIVA
//! assistant and return a plain answer string.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::warn;

use aiva_client::{answer_text, Assistant};

/// Returned when the query fails for any classified reason.
pub const UNABLE_TO_FETCH: &str = "Unable to fetch data from AIVA.";
/// Returned when a successful response carries no answer text.
pub const NO_RESPONSE: &str = "No response from AIVA.";

/// A named operation callable through `tools/call`.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON schema for the tool input.
    fn input_schema(&self) -> Value;

    /// Execute the tool. An `Err` here means the arguments were unusable;
    /// operational failures are reported in-band as result text.
    async fn execute(&self, input: Value) -> Result<Value>;
}

/// Queries the AIVA assistant.
///
/// Failures never cross this boundary: every `QueryError` collapses to the
/// fixed fallback string, so the caller always receives some answer text.
pub struct QueryAssistantTool {
    backend: Arc<dyn Assistant>,
}

impl QueryAssistantTool {
    pub fn new(backend: Arc<dyn Assistant>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for QueryAssistantTool {
    fn name(&self) -> &str {
        "query_tmforum_ai_assistant"
    }

    fn description(&self) -> &str {
        "Get information from the TM Forum knowledge base using the AIVA AI Assistant. \
         Queries the TM Forum AIVA AI Assistant to retrieve expert knowledge about \
         TM Forum standards, APIs, frameworks, and best practices."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "A natural language question about TM Forum topics (e.g., standards, APIs, frameworks)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let query = input
            .get("query")
            .and_then(|q| q.as_str())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: query"))?;

        // Empty queries are passed through to the engine unchanged.
        let text = match self.backend.query(query).await {
            Ok(response) => answer_text(&response).unwrap_or(NO_RESPONSE).to_string(),
            Err(e) => {
                warn!(error = %e, "query failed, returning fallback");
                UNABLE_TO_FETCH.to_string()
            }
        };

        Ok(Value::String(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aiva_client::QueryError;
    use std::time::Duration;

    struct StubAssistant {
        reply: std::result::Result<Value, ()>,
    }

    #[async_trait]
    impl Assistant for StubAssistant {
        async fn query(&self, _query: &str) -> std::result::Result<Value, QueryError> {
            match &self.reply {
                Ok(v) => Ok(v.clone()),
                Err(()) => Err(QueryError::Timeout {
                    timeout: Duration::from_secs(30),
                }),
            }
        }
    }

    fn tool_with(reply: std::result::Result<Value, ()>) -> QueryAssistantTool {
        QueryAssistantTool::new(Arc::new(StubAssistant { reply }))
    }

    #[tokio::test]
    async fn answer_is_extracted_verbatim() {
        let tool = tool_with(Ok(json!({"output": {"output": "ODF is ..."}})));
        let out = tool.execute(json!({"query": "Describe ODF"})).await.unwrap();
        assert_eq!(out, json!("ODF is ..."));
    }

    #[tokio::test]
    async fn missing_answer_degrades_to_no_response() {
        let tool = tool_with(Ok(json!({"output": {}})));
        let out = tool.execute(json!({"query": "Describe ODF"})).await.unwrap();
        assert_eq!(out, json!(NO_RESPONSE));
    }

    #[tokio::test]
    async fn backend_failure_degrades_to_unable_to_fetch() {
        let tool = tool_with(Err(()));
        let out = tool.execute(json!({"query": "Describe ODF"})).await.unwrap();
        assert_eq!(out, json!(UNABLE_TO_FETCH));
    }

    #[tokio::test]
    async fn missing_query_argument_is_an_error() {
        let tool = tool_with(Ok(json!({})));
        assert!(tool.execute(json!({})).await.is_err());
        assert!(tool.execute(json!({"query": 42})).await.is_err());
    }
}
