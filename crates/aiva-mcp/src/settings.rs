//! Runtime settings
//!
//! Layered from `config/default.toml` plus `AIVA_*` environment overrides.
//! The process takes no command-line arguments; behavior is fixed at
//! startup.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use aiva_client::client::endpoints;
use aiva_client::CLOUD_PLATFORM_SCOPE;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Path to the service account key JSON file.
    pub service_account_file: PathBuf,
    /// Reasoning engine query URL.
    pub endpoint: String,
    /// OAuth scope requested for the bearer token.
    pub scope: String,
    /// Where to write the last raw response; unset disables the snapshot.
    #[serde(default)]
    pub snapshot_file: Option<PathBuf>,
    /// Directory for the server log file, created at startup if absent.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Mirror log output to stderr in addition to the log file.
    #[serde(default)]
    pub log_stderr: bool,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            .set_default("service_account_file", "vodafone-key.json")?
            .set_default("endpoint", endpoints::REASONING_ENGINE_URL)?
            .set_default("scope", CLOUD_PLATFORM_SCOPE)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("AIVA"))
            .build()?;
        cfg.try_deserialize()
    }
}
