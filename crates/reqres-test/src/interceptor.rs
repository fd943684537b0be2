//! Before/after hooks around an exchange.
//!
//! Interceptors are pure side effects: they can observe a request and its
//! response but cannot change either, and cannot fail the exchange.

use std::fmt::Write as _;

use http::HeaderMap;

use crate::report::{Attachment, Report};
use crate::request::RequestRecord;
use crate::response::{render_body, ApiResponse};

/// Hook called around every exchange built from a [`RequestSpec`](crate::RequestSpec).
///
/// `report` is the report the client is bound to, if any.
pub trait Interceptor: Send + Sync {
    /// Called right before the request is sent.
    fn before_request(&self, _request: &RequestRecord, _report: Option<&Report>) {}

    /// Called once the whole response body has been read.
    fn after_response(
        &self,
        _request: &RequestRecord,
        _response: &ApiResponse,
        _report: Option<&Report>,
    ) {
    }
}

/// Attaches the rendered request and response to the running report step.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAttachments;

impl ReportAttachments {
    /// Name of the request attachment.
    pub const REQUEST: &'static str = "Request";
    /// Name of the response attachment.
    pub const RESPONSE: &'static str = "Response";
}

impl Interceptor for ReportAttachments {
    fn before_request(&self, request: &RequestRecord, report: Option<&Report>) {
        if let Some(report) = report {
            report.attach(Attachment::text(Self::REQUEST, render_request(request)));
        }
    }

    fn after_response(
        &self,
        _request: &RequestRecord,
        response: &ApiResponse,
        report: Option<&Report>,
    ) {
        if let Some(report) = report {
            report.attach(Attachment::text(Self::RESPONSE, render_response(response)));
        }
    }
}

/// Renders a request as `METHOD URL`, headers, blank line, body.
pub fn render_request(request: &RequestRecord) -> String {
    let mut out = format!("{} {}\n", request.method, request.url);
    render_headers(&mut out, &request.headers);
    if let Some(body) = &request.body {
        out.push('\n');
        out.push_str(&render_body(body));
        out.push('\n');
    }
    out
}

/// Renders a response as status line with timing, headers, blank line, body.
pub fn render_response(response: &ApiResponse) -> String {
    let mut out = format!(
        "{} ({} ms)\n",
        response.status(),
        response.elapsed_millis()
    );
    render_headers(&mut out, response.headers());
    if !response.body().is_empty() {
        out.push('\n');
        out.push_str(&render_body(response.body()));
        out.push('\n');
    }
    out
}

fn render_headers(out: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        let _ = writeln!(out, "{}: {}", name, value.to_str().unwrap_or("<binary>"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{header, HeaderValue, Method, StatusCode};
    use std::time::Duration;

    fn request() -> RequestRecord {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        RequestRecord {
            method: Method::POST,
            url: "https://reqres.in/api/users".to_string(),
            headers,
            body: Some(Bytes::from_static(br#"{"name":"morpheus"}"#)),
        }
    }

    fn response() -> ApiResponse {
        ApiResponse::new(
            StatusCode::CREATED,
            HeaderMap::new(),
            Bytes::from_static(br#"{"id":"37"}"#),
            Duration::from_millis(250),
        )
    }

    #[test]
    fn test_render_request() {
        let rendered = render_request(&request());
        assert!(rendered.starts_with("POST https://reqres.in/api/users\n"));
        assert!(rendered.contains("content-type: application/json\n"));
        assert!(rendered.contains("\"name\": \"morpheus\""));
    }

    #[test]
    fn test_render_response() {
        let rendered = render_response(&response());
        assert!(rendered.starts_with("201 Created (250 ms)\n"));
        assert!(rendered.contains("\"id\": \"37\""));
    }

    #[tokio::test]
    async fn test_attachments_land_in_running_step() {
        let report = Report::new("attachments");
        let interceptor = ReportAttachments;

        crate::report::step(&report, "exchange", async {
            interceptor.before_request(&request(), Some(&report));
            interceptor.after_response(&request(), &response(), Some(&report));
            Ok(())
        })
        .await
        .unwrap();

        let steps = report.steps();
        let names: Vec<&str> = steps[0]
            .attachments
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec![ReportAttachments::REQUEST, ReportAttachments::RESPONSE]);
    }

    #[test]
    fn test_without_report_is_noop() {
        ReportAttachments.before_request(&request(), None);
        ReportAttachments.after_response(&request(), &response(), None);
    }
}
