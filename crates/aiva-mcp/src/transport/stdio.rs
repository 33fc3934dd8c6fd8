//! Stdio transport
//!
//! Standard MCP transport over stdin/stdout. One request at a time; stdout
//! carries only protocol messages (logs go to the log file / stderr).

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use super::{McpHandler, Transport};
use crate::protocol::{JsonRpcError, McpRequest, McpResponse};

/// Stdio transport - reads JSON-RPC from stdin, writes to stdout.
pub struct StdioTransport;

impl StdioTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Transport for StdioTransport {
    async fn serve<H: McpHandler + 'static>(self, handler: Arc<H>) -> Result<()> {
        info!("starting MCP stdio transport");

        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin).lines();

        while let Some(line) = reader.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            debug!(request = %line, "received request");

            let response = match serde_json::from_str::<McpRequest>(line) {
                Ok(request) => handler.handle_request(request).await,
                Err(e) => {
                    error!(error = %e, "parse error");
                    Some(McpResponse::error(None, JsonRpcError::parse_error(e.to_string())))
                }
            };

            // Notifications produce no response line.
            let Some(response) = response else { continue };

            let payload = serde_json::to_string(&response)?;
            debug!(response = %payload, "sending response");

            stdout.write_all(payload.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }

        info!("stdio transport shutting down");
        Ok(())
    }
}
