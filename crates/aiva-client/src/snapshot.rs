//! Best-effort capture of raw engine responses
//!
//! The last successful response is written to a fixed file as a debug
//! artifact. Recording must never fail the query path: implementations log
//! and swallow their own errors.

use std::path::PathBuf;

use serde_json::Value;
use tracing::warn;

/// Sink for raw successful responses.
pub trait ResponseSink: Send + Sync {
    fn record(&self, raw: &Value);
}

/// Writes the response to a fixed path, overwriting the previous one.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResponseSink for FileSink {
    fn record(&self, raw: &Value) {
        let pretty = match serde_json::to_string_pretty(raw) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "failed to serialize response snapshot");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, pretty) {
            warn!(
                path = %self.path.display(),
                error = %e,
                "failed to write response snapshot"
            );
        }
    }
}

/// Discards responses.
pub struct NoopSink;

impl ResponseSink for NoopSink {
    fn record(&self, _raw: &Value) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn file_sink_overwrites_with_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("response.json");
        let sink = FileSink::new(&path);

        sink.record(&json!({"output": {"output": "first"}}));
        sink.record(&json!({"output": {"output": "second"}}));

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["output"]["output"], "second");
    }

    #[test]
    fn file_sink_swallows_write_failures() {
        let sink = FileSink::new("/nonexistent-dir/response.json");
        // Must not panic or propagate.
        sink.record(&json!({"ok": true}));
    }
}
