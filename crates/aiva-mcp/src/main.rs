//! aiva-mcp-server: MCP stdio bridge for the TM Forum AIVA assistant
//!
//! The process takes no arguments. Settings come from `config/default.toml`
//! and `AIVA_*` environment variables. Logs go to
//! `logs/aiva-mcp-server.log`; stdout belongs to the MCP transport.
//!
//! Exit codes: 0 on clean interrupt, non-zero on an unhandled startup or
//! runtime error.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use aiva_client::{
    AivaClient, AivaConfig, Assistant, FileSink, NoopSink, ResponseSink, ServiceAccountKey,
};
use aiva_mcp::gateway::{QueryAssistantTool, Tool};
use aiva_mcp::transport::{StdioTransport, Transport};
use aiva_mcp::{McpServer, Settings};

const LOG_FILE: &str = "aiva-mcp-server.log";

fn init_logging(settings: &Settings) -> Result<()> {
    std::fs::create_dir_all(&settings.log_dir).with_context(|| {
        format!(
            "failed to create log directory {}",
            settings.log_dir.display()
        )
    })?;

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(settings.log_dir.join(LOG_FILE))
        .context("failed to open log file")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout is the MCP transport; logs go to the file, and to stderr only
    // when mirroring is enabled.
    if settings.log_stderr {
        use tracing_subscriber::fmt::writer::MakeWriterExt;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file).and(std::io::stderr))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    Ok(())
}

async fn run(settings: Settings) -> Result<()> {
    let key = ServiceAccountKey::from_file(&settings.service_account_file).with_context(|| {
        format!(
            "failed to load service account key {}",
            settings.service_account_file.display()
        )
    })?;

    let config = AivaConfig {
        endpoint: settings.endpoint.clone(),
        scope: settings.scope.clone(),
        ..AivaConfig::default()
    };

    let sink: Arc<dyn ResponseSink> = match &settings.snapshot_file {
        Some(path) => Arc::new(FileSink::new(path)),
        None => Arc::new(NoopSink),
    };

    let backend: Arc<dyn Assistant> = Arc::new(AivaClient::with_sink(config, key, sink));
    let tool: Arc<dyn Tool> = Arc::new(QueryAssistantTool::new(backend));
    let server = Arc::new(McpServer::new(vec![tool]));

    tokio::select! {
        result = StdioTransport::new().serve(server) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("server shutting down");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    init_logging(&settings)?;

    info!("AIVA MCP Server");

    if let Err(e) = run(settings).await {
        error!(error = %e, "server error");
        return Err(e);
    }

    Ok(())
}
