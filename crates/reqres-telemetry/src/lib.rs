//! Logging setup for the ReqRes contract suite.
//!
//! The suite has no metrics or tracing backends; its observability is the
//! structured log of every exchange and report step. This crate owns the
//! subscriber setup.
//!
//! # Example
//!
//! ```rust,ignore
//! use reqres_telemetry::{init_logging, LogConfig, LogFormat};
//!
//! let config = LogConfig {
//!     format: LogFormat::Json,
//!     ..LogConfig::default()
//! };
//! init_logging(&config)?;
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, try_init_for_tests, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
