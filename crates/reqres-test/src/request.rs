//! Request specifications.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, Method};

use crate::error::TestError;
use crate::interceptor::Interceptor;
use crate::response::render_body;

/// Parts of an exchange that a specification asks to log.
///
/// Logging is a diagnostic side effect and never changes the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogDetail {
    /// Request method.
    Method,
    /// Full request URL.
    Uri,
    /// Request or response headers.
    Headers,
    /// Request or response body.
    Body,
    /// Response status line.
    Status,
}

/// A request about to be sent, as seen by logging and interceptors.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    /// HTTP method.
    pub method: Method,
    /// Fully resolved URL, including the query string.
    pub url: String,
    /// Headers sent with the request.
    pub headers: HeaderMap,
    /// Request body, if any.
    pub body: Option<Bytes>,
}

/// Reusable request defaults.
///
/// A spec is immutable once built and is usually stored in a process-wide
/// registry and shared by reference between scenarios.
///
/// # Example
///
/// ```
/// use reqres_test::{LogDetail, RequestSpec};
///
/// let spec = RequestSpec::builder()
///     .base_path("/api/users")
///     .content_type("application/json")
///     .log(LogDetail::Method)
///     .log(LogDetail::Uri)
///     .build();
///
/// assert_eq!(spec.base_path(), Some("/api/users"));
/// ```
#[derive(Clone, Default)]
pub struct RequestSpec {
    base_path: Option<String>,
    content_type: Option<String>,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    log: Vec<LogDetail>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl RequestSpec {
    /// Creates a new spec builder.
    pub fn builder() -> RequestSpecBuilder {
        RequestSpecBuilder::default()
    }

    /// Path prefix replacing the client's base path, if set.
    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// Content type declared for request bodies.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Default headers.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Default query parameters.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Request parts to log before sending.
    pub fn log_details(&self) -> &[LogDetail] {
        &self.log
    }

    /// Registered interceptors, in call order.
    pub fn interceptors(&self) -> &[Arc<dyn Interceptor>] {
        &self.interceptors
    }

    /// Returns true if `detail` is logged for requests built from this spec.
    pub fn logs(&self, detail: LogDetail) -> bool {
        self.log.contains(&detail)
    }

    /// Emits the configured log lines for `request`.
    pub fn log_request(&self, request: &RequestRecord) {
        for detail in &self.log {
            match detail {
                LogDetail::Method => {
                    tracing::info!(http.method = %request.method, "Request method");
                }
                LogDetail::Uri => tracing::info!(http.url = %request.url, "Request URI"),
                LogDetail::Headers => {
                    tracing::info!(headers = ?request.headers, "Request headers");
                }
                LogDetail::Body => match &request.body {
                    Some(body) => tracing::info!(body = %render_body(body), "Request body"),
                    None => tracing::info!("Request body: <none>"),
                },
                // Not a request attribute
                LogDetail::Status => {}
            }
        }
    }
}

impl fmt::Debug for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSpec")
            .field("base_path", &self.base_path)
            .field("content_type", &self.content_type)
            .field("headers", &self.headers)
            .field("query", &self.query)
            .field("log", &self.log)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

/// Builder for [`RequestSpec`].
#[must_use]
#[derive(Default)]
pub struct RequestSpecBuilder {
    spec: RequestSpec,
}

impl RequestSpecBuilder {
    /// Sets the path prefix applied to every request built from the spec.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.spec.base_path = Some(base_path.into());
        self
    }

    /// Sets the content type sent along with request bodies.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.spec.content_type = Some(content_type.into());
        self
    }

    /// Adds a default header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.headers.push((name.into(), value.into()));
        self
    }

    /// Adds a default query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.query.push((name.into(), value.into()));
        self
    }

    /// Logs `detail` before sending. Repeated details are logged once.
    pub fn log(mut self, detail: LogDetail) -> Self {
        if !self.spec.log.contains(&detail) {
            self.spec.log.push(detail);
        }
        self
    }

    /// Registers an interceptor.
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.spec.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Finishes the spec.
    pub fn build(self) -> RequestSpec {
        self.spec
    }
}

/// Substitutes `{name}` placeholders in `template` with URL-encoded values.
///
/// # Errors
///
/// Returns `TestError::RequestBuild` for a placeholder without a value or an
/// unterminated `{`.
pub fn render_path(template: &str, params: &[(String, String)]) -> Result<String, TestError> {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| {
            TestError::request_build(format!("unterminated placeholder in '{template}'"))
        })?;
        let name = &after[..close];
        let value = params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
            .ok_or_else(|| {
                TestError::request_build(format!(
                    "no value for path parameter '{{{name}}}' in '{template}'"
                ))
            })?;
        rendered.push_str(&urlencoding::encode(value));
        rest = &after[close + 1..];
    }
    rendered.push_str(rest);

    Ok(rendered)
}
