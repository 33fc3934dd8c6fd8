//! aiva-mcp: MCP adapter for the TM Forum AIVA assistant
//!
//! A thin bridge exposing the AIVA reasoning engine via the Model Context
//! Protocol:
//!
//! stdin → MCP JSON-RPC → reasoning engine query → stdout
//!
//! Methods:
//! - initialize → handshake
//! - tools/list, tools/call → query_tmforum_ai_assistant
//! - resources/list, resources/read → embedded TM Forum reference docs
//! - prompts/list, prompts/get → fixed example queries

pub mod gateway;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod settings;
pub mod transport;

pub use gateway::{QueryAssistantTool, Tool, NO_RESPONSE, UNABLE_TO_FETCH};
pub use prompts::{PromptInfo, PromptRegistry};
pub use protocol::{JsonRpcError, McpRequest, McpResponse};
pub use resources::{ResourceInfo, ResourceRegistry};
pub use server::McpServer;
pub use settings::Settings;

/// MCP protocol version implemented by this server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";
/// Advertised server name.
pub const SERVER_NAME: &str = "aiva";
/// Advertised server version.
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude for convenient imports
pub mod prelude {
    pub use super::gateway::{QueryAssistantTool, Tool};
    pub use super::protocol::{JsonRpcError, McpRequest, McpResponse};
    pub use super::server::McpServer;
    pub use super::transport::{StdioTransport, Transport};
}
