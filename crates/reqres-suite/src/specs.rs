//! Shared request/response specifications, one pair per endpoint.
//!
//! Each pair is built on first use and then shared read-only by every
//! scenario in the process.

use std::sync::OnceLock;

use http::StatusCode;
use reqres_test::{LogDetail, ReportAttachments, RequestSpec, ResponseSpec};

/// Request defaults and response expectations for one endpoint.
#[derive(Debug, Clone)]
pub struct SpecPair {
    /// Request defaults.
    pub request: RequestSpec,
    /// Response expectations.
    pub response: ResponseSpec,
}

/// `POST /api/users`: JSON body, expects `201 Created`.
pub fn user_create() -> &'static SpecPair {
    static SPEC: OnceLock<SpecPair> = OnceLock::new();
    SPEC.get_or_init(|| SpecPair {
        request: RequestSpec::builder()
            .base_path("/api/users")
            .content_type("application/json")
            .interceptor(ReportAttachments)
            .log(LogDetail::Method)
            .log(LogDetail::Uri)
            .log(LogDetail::Body)
            .build(),
        response: ResponseSpec::builder()
            .log(LogDetail::Status)
            .expect_status(StatusCode::CREATED)
            .log(LogDetail::Body)
            .build(),
    })
}

/// `GET /api/users/{id}`: expects `200 OK`.
pub fn user_by_id() -> &'static SpecPair {
    static SPEC: OnceLock<SpecPair> = OnceLock::new();
    SPEC.get_or_init(|| SpecPair {
        request: RequestSpec::builder()
            .base_path("/api/users")
            .interceptor(ReportAttachments)
            .log(LogDetail::Method)
            .log(LogDetail::Uri)
            .build(),
        response: ResponseSpec::builder()
            .log(LogDetail::Status)
            .expect_status(StatusCode::OK)
            .log(LogDetail::Body)
            .build(),
    })
}

/// `GET /api/users?delay={n}`: expects `200 OK`, logs only the status.
pub fn user_delay() -> &'static SpecPair {
    static SPEC: OnceLock<SpecPair> = OnceLock::new();
    SPEC.get_or_init(|| SpecPair {
        request: RequestSpec::builder()
            .base_path("/api/users")
            .interceptor(ReportAttachments)
            .log(LogDetail::Method)
            .log(LogDetail::Uri)
            .build(),
        response: ResponseSpec::builder()
            .log(LogDetail::Status)
            .expect_status(StatusCode::OK)
            .build(),
    })
}

/// `GET /api/unknown`: no status expectation.
pub fn unknown() -> &'static SpecPair {
    static SPEC: OnceLock<SpecPair> = OnceLock::new();
    SPEC.get_or_init(|| SpecPair {
        request: RequestSpec::builder()
            .base_path("/api/unknown")
            .interceptor(ReportAttachments)
            .log(LogDetail::Method)
            .log(LogDetail::Uri)
            .build(),
        response: ResponseSpec::builder().log(LogDetail::Body).build(),
    })
}
