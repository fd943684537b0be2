//! Received responses and response specifications.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::TestError;
use crate::request::LogDetail;

/// A fully read response with helpers for assertions.
pub struct ApiResponse {
    /// HTTP status code
    status: StatusCode,
    /// Response headers
    headers: HeaderMap,
    /// Response body bytes
    body: Bytes,
    /// Wall-clock time from sending the request to reading the last body byte
    elapsed: Duration,
}

impl ApiResponse {
    /// Creates a response from raw parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes, elapsed: Duration) -> Self {
        Self {
            status,
            headers,
            body,
            elapsed,
        }
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the status code as a u16.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns true if the status is successful (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns a reference to the headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Gets a header value by name.
    #[must_use]
    pub fn header(&self, name: impl AsRef<str>) -> Option<&HeaderValue> {
        self.headers.get(name.as_ref())
    }

    /// Gets a header value as a string.
    #[must_use]
    pub fn header_str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.header(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the Content-Type header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header_str(header::CONTENT_TYPE.as_str())
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Time taken by the whole exchange.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Time taken by the whole exchange, in milliseconds.
    #[must_use]
    pub fn elapsed_millis(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    /// Returns the body as a string.
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(&self) -> Result<String, TestError> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| TestError::BodyRead(format!("Invalid UTF-8: {e}")))
    }

    /// Deserializes the body as JSON.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let user: UserByIdResponse = response.json()?;
    /// assert_eq!(user.first_name(), Some("Janet"));
    /// ```
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        serde_json::from_slice(&self.body).map_err(TestError::Json)
    }

    /// Deserializes the body as a JSON Value.
    pub fn json_value(&self) -> Result<serde_json::Value, TestError> {
        self.json()
    }

    /// Applies a response spec: logs what it asks for, then checks its
    /// expected status if it has one.
    ///
    /// # Errors
    ///
    /// Returns `TestError::UnexpectedStatus` on a status mismatch.
    pub fn then(self, spec: &ResponseSpec) -> Result<Self, TestError> {
        spec.verify(&self)?;
        Ok(self)
    }

    // Assertion methods

    /// Asserts that the status code equals the expected value.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status, expected,
            "Expected status {}, got {}",
            expected, self.status
        );
        self
    }

    /// Asserts that the status code equals the expected u16 value.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match.
    pub fn assert_status_code(&self, expected: u16) -> &Self {
        assert_eq!(
            self.status.as_u16(),
            expected,
            "Expected status {}, got {}",
            expected,
            self.status.as_u16()
        );
        self
    }

    /// Asserts that the exchange took less than `limit`.
    ///
    /// # Panics
    ///
    /// Panics if the exchange was not faster than `limit`.
    pub fn assert_time_below(&self, limit: Duration) -> &Self {
        assert!(
            self.elapsed < limit,
            "Expected response in less than {:?}, took {:?}",
            limit,
            self.elapsed
        );
        self
    }

    /// Asserts that a JSON field exists and equals the expected value.
    ///
    /// # Panics
    ///
    /// Panics if the field doesn't exist or doesn't match.
    pub fn assert_json_field(&self, path: impl AsRef<str>, expected: &serde_json::Value) -> &Self {
        let path = path.as_ref();
        let json: serde_json::Value = self.json().expect("Body should be valid JSON");
        let actual = json_path(&json, path).unwrap_or_else(|| {
            panic!("JSON path '{}' not found in: {:?}", path, json);
        });
        assert_eq!(
            actual, expected,
            "JSON field '{}': expected {:?}, got {:?}",
            path, expected, actual
        );
        self
    }
}

impl fmt::Debug for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .field("elapsed", &self.elapsed)
            .finish()
    }
}

/// Reusable response expectations.
///
/// Only the status is validated centrally. Field-level checks belong to the
/// scenario. A spec without an expected status never fails on status alone.
///
/// # Example
///
/// ```
/// use http::StatusCode;
/// use reqres_test::{LogDetail, ResponseSpec};
///
/// let spec = ResponseSpec::builder()
///     .log(LogDetail::Status)
///     .expect_status(StatusCode::CREATED)
///     .build();
///
/// assert_eq!(spec.expected_status(), Some(StatusCode::CREATED));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResponseSpec {
    expected_status: Option<StatusCode>,
    log: Vec<LogDetail>,
}

impl ResponseSpec {
    /// Creates a new spec builder.
    pub fn builder() -> ResponseSpecBuilder {
        ResponseSpecBuilder::default()
    }

    /// Status every response must carry, if enforced.
    pub fn expected_status(&self) -> Option<StatusCode> {
        self.expected_status
    }

    /// Response parts to log after receiving.
    pub fn log_details(&self) -> &[LogDetail] {
        &self.log
    }

    /// Logs the configured parts of `response`, then checks its status.
    ///
    /// # Errors
    ///
    /// Returns `TestError::UnexpectedStatus` on a status mismatch.
    pub fn verify(&self, response: &ApiResponse) -> Result<(), TestError> {
        self.log_response(response);

        match self.expected_status {
            Some(expected) if expected != response.status() => {
                Err(TestError::UnexpectedStatus {
                    expected,
                    actual: response.status(),
                    body: render_body(response.body()),
                })
            }
            _ => Ok(()),
        }
    }

    fn log_response(&self, response: &ApiResponse) {
        for detail in &self.log {
            match detail {
                LogDetail::Status => tracing::info!(
                    http.status_code = response.status_code(),
                    duration_ms = response.elapsed_millis(),
                    "Response status"
                ),
                LogDetail::Headers => {
                    tracing::info!(headers = ?response.headers(), "Response headers");
                }
                LogDetail::Body => {
                    tracing::info!(body = %render_body(response.body()), "Response body");
                }
                // Request attributes
                LogDetail::Method | LogDetail::Uri => {}
            }
        }
    }
}

/// Builder for [`ResponseSpec`].
#[must_use]
#[derive(Default)]
pub struct ResponseSpecBuilder {
    spec: ResponseSpec,
}

impl ResponseSpecBuilder {
    /// Requires every response to carry `status`.
    pub fn expect_status(mut self, status: StatusCode) -> Self {
        self.spec.expected_status = Some(status);
        self
    }

    /// Logs `detail` after receiving. Repeated details are logged once.
    pub fn log(mut self, detail: LogDetail) -> Self {
        if !self.spec.log.contains(&detail) {
            self.spec.log.push(detail);
        }
        self
    }

    /// Finishes the spec.
    pub fn build(self) -> ResponseSpec {
        self.spec
    }
}

/// Renders a body for logs and reports: pretty JSON when it parses, lossy
/// UTF-8 otherwise.
pub(crate) fn render_body(body: &[u8]) -> String {
    if body.is_empty() {
        return String::new();
    }
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned())
}

/// Simple JSON path accessor (`data.first_name`, `data.0.color`).
pub fn json_path<'a>(value: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
    let mut current = value;
    for segment in path.split('.') {
        if segment.is_empty() {
            continue;
        }
        if let Ok(index) = segment.parse::<usize>() {
            current = current.get(index)?;
        } else {
            current = current.get(segment)?;
        }
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_response(status: u16, body: &str) -> ApiResponse {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        ApiResponse::new(
            StatusCode::from_u16(status).unwrap(),
            headers,
            Bytes::from(body.to_string()),
            Duration::from_millis(120),
        )
    }

    #[test]
    fn test_status() {
        let response = create_response(201, "{}");
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.status_code(), 201);
        assert!(response.is_success());
    }

    #[test]
    fn test_header() {
        let response = create_response(200, "{}");
        assert_eq!(response.content_type(), Some("application/json"));
        assert!(response.header("x-missing").is_none());
    }

    #[test]
    fn test_elapsed() {
        let response = create_response(200, "{}");
        assert_eq!(response.elapsed(), Duration::from_millis(120));
        assert_eq!(response.elapsed_millis(), 120);
    }

    #[test]
    fn test_json() {
        let response = create_response(200, r#"{"data":{"first_name":"Janet"}}"#);
        let value = response.json_value().unwrap();
        assert_eq!(value["data"]["first_name"], "Janet");
    }

    #[test]
    fn test_json_invalid() {
        let response = create_response(200, "<html>");
        assert!(matches!(
            response.json::<serde_json::Value>(),
            Err(TestError::Json(_))
        ));
    }

    #[test]
    fn test_assert_helpers() {
        let response = create_response(200, r##"{"data":[{"color":"#98B2D1"}]}"##);
        response
            .assert_status(StatusCode::OK)
            .assert_status_code(200)
            .assert_time_below(Duration::from_secs(5))
            .assert_json_field("data.0.color", &json!("#98B2D1"));
    }

    #[test]
    #[should_panic(expected = "Expected status 201")]
    fn test_assert_status_panics() {
        create_response(400, "{}").assert_status_code(201);
    }

    #[test]
    fn test_spec_without_status_accepts_anything() {
        let spec = ResponseSpec::builder().log(LogDetail::Body).build();
        assert!(spec.expected_status().is_none());
        assert!(spec.verify(&create_response(404, "{}")).is_ok());
        assert!(spec.verify(&create_response(500, "")).is_ok());
    }

    #[test]
    fn test_spec_status_match() {
        let spec = ResponseSpec::builder()
            .expect_status(StatusCode::OK)
            .build();
        assert!(create_response(200, "{}").then(&spec).is_ok());
    }

    #[test]
    fn test_spec_status_mismatch() {
        let spec = ResponseSpec::builder()
            .expect_status(StatusCode::CREATED)
            .log(LogDetail::Status)
            .build();

        let err = create_response(400, r#"{"error":"Missing password"}"#)
            .then(&spec)
            .unwrap_err();

        match err {
            TestError::UnexpectedStatus {
                expected,
                actual,
                body,
            } => {
                assert_eq!(expected, StatusCode::CREATED);
                assert_eq!(actual, StatusCode::BAD_REQUEST);
                assert!(body.contains("Missing password"));
            }
            other => panic!("Expected UnexpectedStatus, got {other:?}"),
        }
    }

    #[test]
    fn test_render_body() {
        assert_eq!(render_body(b""), "");
        assert_eq!(render_body(b"plain"), "plain");
        assert_eq!(render_body(br#"{"a":1}"#), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_json_path() {
        let value = json!({
            "data": [
                {"color": "#98B2D1"},
                {"color": "#C74375"}
            ],
            "support": {"url": "https://reqres.in"}
        });

        assert_eq!(json_path(&value, "data.1.color"), Some(&json!("#C74375")));
        assert_eq!(json_path(&value, "support.url"), Some(&json!("https://reqres.in")));
        assert_eq!(json_path(&value, "data.7"), None);
        assert_eq!(json_path(&value, "nonexistent"), None);
    }
}
