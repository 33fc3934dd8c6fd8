//! MCP server
//!
//! Transport-agnostic protocol logic: one query tool, two reference
//! resources, five prompt templates. The server holds no per-call state;
//! every entity a request needs is built and discarded within that call.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::gateway::Tool;
use crate::prompts::PromptRegistry;
use crate::protocol::{JsonRpcError, McpRequest, McpResponse};
use crate::resources::ResourceRegistry;
use crate::{PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION};

pub struct McpServer {
    tools: Vec<Arc<dyn Tool>>,
    resources: ResourceRegistry,
    prompts: PromptRegistry,
}

impl McpServer {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self {
            tools,
            resources: ResourceRegistry::new(),
            prompts: PromptRegistry::new(),
        }
    }

    /// Handle one MCP request. `None` means the request was a notification
    /// and no response must be written.
    pub async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        debug!(method = %request.method, "handling MCP request");

        if request.is_notification() {
            if request.method == "notifications/initialized" {
                info!("client initialized");
            }
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "ping" => McpResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            "resources/list" => self.handle_resources_list(request),
            "resources/read" => self.handle_resources_read(request),
            "prompts/list" => self.handle_prompts_list(request),
            "prompts/get" => self.handle_prompts_get(request),
            _ => McpResponse::error(
                request.id,
                JsonRpcError::method_not_found(&request.method),
            ),
        };

        Some(response)
    }

    fn handle_initialize(&self, request: McpRequest) -> McpResponse {
        let client_name = request
            .params
            .as_ref()
            .and_then(|p| p.get("clientInfo"))
            .and_then(|ci| ci.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or("unknown");

        info!(client = %client_name, "client connected");

        McpResponse::success(
            request.id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": { "listChanged": false },
                    "resources": { "subscribe": false, "listChanged": false },
                    "prompts": { "listChanged": false }
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION
                }
            }),
        )
    }

    fn handle_tools_list(&self, request: McpRequest) -> McpResponse {
        let tools: Vec<_> = self
            .tools
            .iter()
            .map(|t| {
                json!({
                    "name": t.name(),
                    "description": t.description(),
                    "inputSchema": t.input_schema()
                })
            })
            .collect();

        McpResponse::success(request.id, json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, request: McpRequest) -> McpResponse {
        let params = match &request.params {
            Some(p) => p.clone(),
            None => {
                return McpResponse::error(request.id, JsonRpcError::invalid_params("Missing params"))
            }
        };

        let tool_name = match params.get("name").and_then(|n| n.as_str()) {
            Some(n) => n,
            None => {
                return McpResponse::error(
                    request.id,
                    JsonRpcError::invalid_params("Missing tool name"),
                )
            }
        };

        let Some(tool) = self.tools.iter().find(|t| t.name() == tool_name) else {
            return McpResponse::error(
                request.id,
                JsonRpcError::new(-32001, format!("Tool '{}' is not available", tool_name)),
            );
        };

        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        match tool.execute(arguments).await {
            Ok(Value::String(text)) => McpResponse::tool_text(request.id, text, false),
            Ok(other) => McpResponse::tool_text(
                request.id,
                serde_json::to_string_pretty(&other).unwrap_or_default(),
                false,
            ),
            // The only execute error is unusable arguments; operational
            // failures are already folded into the result text.
            Err(e) => McpResponse::error(request.id, JsonRpcError::invalid_params(e.to_string())),
        }
    }

    fn handle_resources_list(&self, request: McpRequest) -> McpResponse {
        let resources: Vec<_> = self
            .resources
            .list()
            .iter()
            .map(|r| {
                json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect();

        McpResponse::success(request.id, json!({ "resources": resources }))
    }

    fn handle_resources_read(&self, request: McpRequest) -> McpResponse {
        let uri = request.param_str("uri").unwrap_or("").to_string();
        if uri.is_empty() {
            return McpResponse::error(request.id, JsonRpcError::invalid_params("Missing uri"));
        }

        match self.resources.read(&uri) {
            Some(content) => McpResponse::success(
                request.id,
                json!({
                    "contents": [{
                        "uri": uri,
                        "mimeType": "text/plain",
                        "text": content
                    }]
                }),
            ),
            None => McpResponse::error(request.id, JsonRpcError::resource_not_found(&uri)),
        }
    }

    fn handle_prompts_list(&self, request: McpRequest) -> McpResponse {
        let prompts: Vec<_> = self
            .prompts
            .list()
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "description": p.description
                })
            })
            .collect();

        McpResponse::success(request.id, json!({ "prompts": prompts }))
    }

    fn handle_prompts_get(&self, request: McpRequest) -> McpResponse {
        let name = request.param_str("name").unwrap_or("").to_string();
        if name.is_empty() {
            return McpResponse::error(request.id, JsonRpcError::invalid_params("Missing name"));
        }

        match self.prompts.get(&name) {
            Some(prompt) => McpResponse::success(
                request.id,
                json!({
                    "description": prompt.description,
                    "messages": [{
                        "role": "user",
                        "content": { "type": "text", "text": prompt.text }
                    }]
                }),
            ),
            None => McpResponse::error(
                request.id,
                JsonRpcError::invalid_params(format!("Unknown prompt: {}", name)),
            ),
        }
    }
}
