//! # ReqRes Test
//!
//! Declarative HTTP contract testing: reusable request and response
//! specifications, a `given / when / then` exchange API on top of `reqwest`,
//! and step reporting for human-readable scenario reports.
//!
//! ## Key Features
//!
//! - **Specifications**: immutable request/response defaults shared between scenarios
//! - **Exchange builder**: path templates, query parameters, JSON bodies
//! - **Timing**: every response carries the elapsed time of the whole exchange
//! - **Steps**: `Passed` / `Failed` / `Broken` outcomes with attachments
//! - **Interceptors**: side-effect hooks around each exchange
//!
//! ## Example
//!
//! ```ignore
//! use http::StatusCode;
//! use reqres_test::{step, ApiClient, LogDetail, Report, RequestSpec, ResponseSpec, TracingSink};
//!
//! let request = RequestSpec::builder()
//!     .base_path("/api/users")
//!     .log(LogDetail::Method)
//!     .log(LogDetail::Uri)
//!     .build();
//! let response = ResponseSpec::builder()
//!     .expect_status(StatusCode::OK)
//!     .log(LogDetail::Body)
//!     .build();
//!
//! let report = Report::new("Get a user");
//! let client = ApiClient::new("https://reqres.in")?.with_report(&report);
//!
//! let user = step(&report, "Perform a GET request", async {
//!     client
//!         .given(&request)
//!         .path_param("id", "2")
//!         .get("/{id}")
//!         .await?
//!         .then(&response)
//! })
//! .await?;
//!
//! report.finish(&TracingSink);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod assertions;
mod client;
mod error;
mod interceptor;
pub mod report;
mod request;
mod response;

pub use client::{ApiClient, ApiClientBuilder, Exchange};
pub use error::{TestError, TestResult};
pub use interceptor::{render_request, render_response, Interceptor, ReportAttachments};
pub use report::{
    step, Attachment, FinishedReport, MemorySink, Report, ReportSink, StepRecord, StepStatus,
    TracingSink,
};
pub use request::{render_path, LogDetail, RequestRecord, RequestSpec, RequestSpecBuilder};
pub use response::{json_path, ApiResponse, ResponseSpec, ResponseSpecBuilder};
