//! Transport layer
//!
//! The bridge serves a single transport: line-delimited JSON-RPC over
//! stdin/stdout. The `Transport` trait keeps the server decoupled from it.

mod stdio;

pub use stdio::StdioTransport;

use anyhow::Result;
use std::sync::Arc;

use crate::protocol::{McpRequest, McpResponse};

/// Request handler served by a transport.
#[async_trait::async_trait]
pub trait McpHandler: Send + Sync {
    /// Handle one request; `None` for notifications (no response written).
    async fn handle_request(&self, request: McpRequest) -> Option<McpResponse>;
}

/// Transport trait - implement for new transport types.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Serve requests until the peer closes the connection.
    async fn serve<H: McpHandler + 'static>(self, handler: Arc<H>) -> Result<()>;
}

#[async_trait::async_trait]
impl McpHandler for crate::McpServer {
    async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        self.handle_request(request).await
    }
}
