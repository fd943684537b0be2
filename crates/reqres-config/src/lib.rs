//! Typed configuration for the ReqRes contract suite.
//!
//! The suite needs very little configuration: where the service lives, which
//! headers every request carries, and how to log. Values are layered
//! (defaults → file → environment) so CI can point the same scenarios at a
//! staging host without code changes.
//!
//! # Example
//!
//! ```no_run
//! use reqres_config::ConfigLoader;
//!
//! # fn main() -> Result<(), reqres_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("reqres.toml")?
//!     .with_env_prefix("REQRES")
//!     .load()?;
//!
//! println!("Scenarios target {}", config.target.base_uri);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [target]
//! base_uri = "https://reqres.in"
//! base_path = "/api"
//! timeout_ms = 10000
//!
//! [target.headers]
//! x-api-key = "reqres-free-v1"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "pretty"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden with `PREFIX__SECTION__KEY` variables:
//!
//! - `REQRES__TARGET__BASE_URI=http://localhost:8080`
//! - `REQRES__TARGET__TIMEOUT_MS=none`
//! - `REQRES__TARGET__HEADERS__X_API_KEY=secret` (adds header `x-api-key`)
//! - `REQRES__LOGGING__FORMAT=json`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::*;
pub use error::{ConfigError, Syntax};
pub use loader::ConfigLoader;
pub use schema::*;
