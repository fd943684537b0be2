//! # ReqRes Suite
//!
//! Contract scenarios for the public ReqRes REST API (<https://reqres.in>).
//!
//! Each scenario sends one request through a shared specification, records
//! a "Perform" step and a "Check" step in its report, and returns the decoded
//! payload.
//!
//! | Scenario | Endpoint | Contract |
//! |----------|----------|----------|
//! | [`scenarios::create_user`] | `POST /api/users` | 201, `name` and `job` echoed |
//! | [`scenarios::get_default_user`] | `GET /api/users/2` | 200, Janet Weaver |
//! | [`scenarios::count_catalog_items`] | `GET /api/unknown` | 6 entries |
//! | [`scenarios::check_catalog_colors`] | `GET /api/unknown` | includes 3 colours |
//! | [`scenarios::response_time`] | `GET /api/users?delay=3` | 200 within 5 s |
//!
//! ## Example
//!
//! ```no_run
//! use reqres_models::UserCreateRequest;
//! use reqres_suite::{scenarios, Suite};
//! use reqres_test::TracingSink;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let suite = Suite::from_env()?;
//! let request = UserCreateRequest::new("morpheus", "leader");
//!
//! let (result, report) = suite
//!     .run("Create a user", &TracingSink, |client, report| async move {
//!         scenarios::create_user(&client, &report, &request).await
//!     })
//!     .await;
//!
//! println!("{}: {:?}", report.name, report.status);
//! result?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod scenarios;
pub mod specs;
mod suite;

pub use error::SuiteError;
pub use suite::{Suite, CONFIG_FILE, ENV_PREFIX};
