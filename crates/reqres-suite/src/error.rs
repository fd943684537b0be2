//! Suite setup errors.

use reqres_config::ConfigError;
use reqres_telemetry::TelemetryError;
use reqres_test::TestError;
use thiserror::Error;

/// Errors raised while preparing the suite, before any scenario runs.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be set up.
    #[error("Logging error: {0}")]
    Telemetry(#[from] TelemetryError),

    /// The HTTP client could not be built.
    #[error("Client error: {0}")]
    Client(#[from] TestError),
}
