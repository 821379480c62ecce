// src/settings.rs

//! Settings loading utilities.
//!
//! Client settings come from a TOML file with a `[client]` table holding the
//! same fields as the client config object. The table is validated by the
//! client schema like any other input. The remote endpoint and function id
//! resolve as: explicit value, then environment, then built-in default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::ValidationError;
use crate::models::ClientConfig;
use crate::schema;

/// Built-in remote execution endpoint.
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:3005/api/v1/functions/execute";

/// Built-in function id of the crawl executor.
pub const DEFAULT_FUNCTION_ID: &str = "bless-crawl";

pub const ENDPOINT_URL_ENV: &str = "BLESS_CRAWL_ENDPOINT_URL";
pub const FUNCTION_ID_ENV: &str = "BLESS_CRAWL_FUNCTION_ID";

/// Settings loading failure.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid client settings: {0}")]
    Validation(#[from] ValidationError),
}

/// Root settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Client config fields, validated on use
    #[serde(default)]
    pub client: toml::Table,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Logging settings for the command-line front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default `env_logger` filter
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load settings or return defaults if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Settings load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// The `[client]` table as an untyped config object.
    pub fn client_value(&self) -> Result<Value, SettingsError> {
        Ok(serde_json::to_value(&self.client)?)
    }

    /// Validate the `[client]` table.
    pub fn client_config(&self) -> Result<ClientConfig, SettingsError> {
        Ok(schema::validate_client(&self.client_value()?)?)
    }
}

/// Resolve the endpoint URL.
pub fn resolve_endpoint(explicit: Option<&str>) -> String {
    let env = std::env::var(ENDPOINT_URL_ENV).ok();
    pick(explicit, env.as_deref(), DEFAULT_ENDPOINT_URL)
}

/// Resolve the function id.
pub fn resolve_function_id(explicit: Option<&str>) -> String {
    let env = std::env::var(FUNCTION_ID_ENV).ok();
    pick(explicit, env.as_deref(), DEFAULT_FUNCTION_ID)
}

fn pick(explicit: Option<&str>, env: Option<&str>, default: &str) -> String {
    explicit
        .or(env.filter(|v| !v.trim().is_empty()))
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Format;
    use std::io::Write;

    #[test]
    fn test_pick_precedence() {
        assert_eq!(pick(Some("a"), Some("b"), "c"), "a");
        assert_eq!(pick(None, Some("b"), "c"), "b");
        assert_eq!(pick(None, Some("  "), "c"), "c");
        assert_eq!(pick(None, None, "c"), "c");
    }

    #[test]
    fn test_env_overrides_builtin_defaults() {
        // only this test touches these variables
        unsafe {
            std::env::set_var(ENDPOINT_URL_ENV, "http://10.0.0.5:3005/execute");
            std::env::set_var(FUNCTION_ID_ENV, "crawl-from-env");
        }
        assert_eq!(resolve_endpoint(None), "http://10.0.0.5:3005/execute");
        assert_eq!(resolve_function_id(None), "crawl-from-env");
        assert_eq!(resolve_function_id(Some("explicit")), "explicit");

        unsafe {
            std::env::remove_var(ENDPOINT_URL_ENV);
            std::env::remove_var(FUNCTION_ID_ENV);
        }
        assert_eq!(resolve_endpoint(None), DEFAULT_ENDPOINT_URL);
        assert_eq!(resolve_function_id(None), DEFAULT_FUNCTION_ID);
    }

    #[test]
    fn test_load_client_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[client]
format = "markdown"
timeout = 30000
function_id = "crawl-fn"

[client.viewport]
width = 1920
height = 1080

[logging]
level = "debug"
"#
        )
        .unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.logging.level, "debug");

        let config = settings.client_config().unwrap();
        assert_eq!(config.defaults.format, Some(Format::Markdown));
        assert_eq!(config.defaults.timeout, Some(30000));
        assert_eq!(config.defaults.viewport.and_then(|v| v.width), Some(1920));
        assert_eq!(config.function_id.as_deref(), Some("crawl-fn"));
    }

    #[test]
    fn test_invalid_client_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[client]\nmax_depth = 9\nwait_time = 99999").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        let err = settings.client_config().unwrap_err();
        match err {
            SettingsError::Validation(v) => assert!(v.mentions("wait_time")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(dir.path().join("missing.toml"));
        assert!(settings.client.is_empty());
        assert_eq!(settings.logging.level, "info");
    }
}
