//! # ReqRes Models
//!
//! Plain value types mirroring the JSON payloads of the ReqRes REST API.
//!
//! Every field is optional: the contract suite asserts only on the subset of
//! fields a scenario cares about, so a missing, `null` or extra field never
//! fails deserialization. Values are built fresh for each exchange and dropped once
//! their assertions have run.
//!
//! | Endpoint | Request | Response |
//! |----------|---------|----------|
//! | `POST /api/users` | [`UserCreateRequest`] | [`UserCreateResponse`] |
//! | `GET /api/users/{id}` | - | [`UserByIdResponse`] |
//! | `GET /api/users?delay={n}` | - | [`UsersPageResponse`] |
//! | `GET /api/unknown` | - | [`UnknownListResponse`] |
//!
//! ## Example
//!
//! ```
//! use reqres_models::UserByIdResponse;
//!
//! let body = r#"{"data":{"id":2,"first_name":"Janet","last_name":"Weaver"}}"#;
//! let response: UserByIdResponse = serde_json::from_str(body).unwrap();
//!
//! assert_eq!(response.first_name(), Some("Janet"));
//! assert!(response.support.is_none());
//! ```

#![forbid(unsafe_code)]

mod catalog;
mod lenient;
mod support;
mod user;

pub use catalog::{ColorRecord, UnknownListResponse};
pub use support::SupportInfo;
pub use user::{
    UserByIdResponse, UserCreateRequest, UserCreateResponse, UserRecord, UsersPageResponse,
};
