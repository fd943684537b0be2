//! Root configuration type.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, LoggingSection, TargetConfig};

/// Complete suite configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to layer a file and environment
/// overrides on top of the defaults.
///
/// # Example
///
/// ```
/// use reqres_config::SuiteConfig;
///
/// let config = SuiteConfig::default();
/// assert_eq!(config.target.base_uri, "https://reqres.in");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Service under test.
    #[serde(default)]
    pub target: TargetConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl SuiteConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> SuiteConfigBuilder {
        SuiteConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Rejected` if:
    /// - `target.base_uri` is not an absolute http(s) address
    /// - `target.base_path` is neither empty nor starting with `/`
    /// - `target.timeout_ms` is zero
    /// - `logging.level` is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let uri = self.target.base_uri.as_str();
        let host = uri
            .strip_prefix("https://")
            .or_else(|| uri.strip_prefix("http://"))
            .ok_or_else(|| {
                ConfigError::rejected(
                    "target.base_uri",
                    format!("expected an http:// or https:// address, got '{uri}'"),
                )
            })?;
        if host.trim_end_matches('/').is_empty() {
            return Err(ConfigError::rejected(
                "target.base_uri",
                "host is empty",
            ));
        }

        let base_path = self.target.base_path.as_str();
        if !base_path.is_empty() && !base_path.starts_with('/') {
            return Err(ConfigError::rejected(
                "target.base_path",
                format!("must start with '/', got '{base_path}'"),
            ));
        }

        if self.target.timeout_ms == Some(0) {
            return Err(ConfigError::rejected(
                "target.timeout_ms",
                "must be greater than zero",
            ));
        }

        reqres_telemetry::create_env_filter(&self.logging.level)
            .map_err(|e| ConfigError::rejected("logging.level", e.to_string()))?;

        Ok(())
    }
}

/// Builder for [`SuiteConfig`].
#[derive(Debug, Default)]
pub struct SuiteConfigBuilder {
    target: Option<TargetConfig>,
    logging: Option<LoggingSection>,
}

impl SuiteConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target section.
    #[must_use]
    pub fn target(mut self, target: TargetConfig) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the logging section.
    #[must_use]
    pub fn logging(mut self, logging: LoggingSection) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Build the configuration. Unset sections use their defaults.
    #[must_use]
    pub fn build(self) -> SuiteConfig {
        SuiteConfig {
            target: self.target.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    pub fn build_validated(self) -> Result<SuiteConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
