//! Configuration schema types.

use std::collections::BTreeMap;

use reqres_telemetry::{LogConfig, LogFormat as TelemetryLogFormat};
use serde::{Deserialize, Serialize};

/// Target service section.
///
/// Set once before any scenario runs and treated as immutable afterwards.
///
/// # Example
///
/// ```
/// use reqres_config::TargetConfig;
///
/// let target = TargetConfig::default();
/// assert_eq!(target.base_uri, "https://reqres.in");
/// assert_eq!(target.base_path, "/api");
/// assert!(target.timeout_ms.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Scheme and host of the service under test.
    #[serde(default = "default_base_uri")]
    pub base_uri: String,

    /// Path prefix used when a request specification has none of its own.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Client-side timeout in milliseconds. None keeps the HTTP client default.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Headers added to every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_uri: default_base_uri(),
            base_path: default_base_path(),
            timeout_ms: None,
            headers: BTreeMap::new(),
        }
    }
}

fn default_base_uri() -> String {
    "https://reqres.in".to_string()
}

fn default_base_path() -> String {
    "/api".to_string()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// JSON lines.
    Json,
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Enable log output.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingSection {
    /// Converts this section into the telemetry crate's configuration.
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            format: match self.format {
                LogFormat::Pretty => TelemetryLogFormat::Pretty,
                LogFormat::Json => TelemetryLogFormat::Json,
            },
            ..LogConfig::default()
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
