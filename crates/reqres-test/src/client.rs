//! HTTP client for contract exchanges.

use std::time::{Duration, Instant};

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use http::Method;
use reqres_config::TargetConfig;
use reqwest::Url;
use serde::Serialize;

use crate::error::TestError;
use crate::report::Report;
use crate::request::{render_path, RequestRecord, RequestSpec};
use crate::response::ApiResponse;

/// Client for one target service.
///
/// The base address, base path and default headers are fixed at construction.
/// Cloning is cheap; the underlying connection pool is shared.
///
/// # Example
///
/// ```ignore
/// use reqres_test::{ApiClient, RequestSpec};
///
/// let client = ApiClient::new("https://reqres.in")?;
/// let spec = RequestSpec::builder().base_path("/api/users").build();
///
/// let response = client
///     .given(&spec)
///     .path_param("id", "2")
///     .get("/{id}")
///     .await?;
/// assert_eq!(response.status_code(), 200);
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_uri: String,
    base_path: String,
    default_headers: Vec<(String, String)>,
    report: Option<Report>,
}

impl ApiClient {
    /// Creates a client for `base_uri` with an empty base path and the HTTP
    /// client's default timeout.
    pub fn new(base_uri: impl Into<String>) -> Result<Self, TestError> {
        Self::builder(base_uri).build()
    }

    /// Creates a client builder.
    pub fn builder(base_uri: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder::new(base_uri)
    }

    /// Creates a client from the `[target]` configuration section.
    pub fn from_target(target: &TargetConfig) -> Result<Self, TestError> {
        let mut builder = Self::builder(&target.base_uri).base_path(&target.base_path);
        if let Some(timeout_ms) = target.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        for (name, value) in &target.headers {
            builder = builder.default_header(name, value);
        }
        builder.build()
    }

    /// Returns a clone whose exchanges feed `report` (through interceptors).
    #[must_use]
    pub fn with_report(&self, report: &Report) -> Self {
        Self {
            report: Some(report.clone()),
            ..self.clone()
        }
    }

    /// The report this client is bound to.
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Scheme and host of the target.
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Path prefix used when a request spec has none.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Starts an exchange using `spec` as request defaults.
    pub fn given<'a>(&'a self, spec: &'a RequestSpec) -> Exchange<'a> {
        Exchange {
            client: self,
            spec,
            path_params: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            error: None,
        }
    }

    /// Resolves the full URL for `path` under `spec`.
    ///
    /// The spec's base path replaces the client's. Query parameters are
    /// appended in order.
    pub fn resolve_url(
        &self,
        spec: &RequestSpec,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Url, TestError> {
        let base_path = spec.base_path().unwrap_or(&self.base_path);
        let separator = if path.is_empty() || path.starts_with('/') || path.starts_with('?') {
            ""
        } else {
            "/"
        };
        let raw = format!(
            "{}{}{}{}",
            self.base_uri.trim_end_matches('/'),
            base_path.trim_end_matches('/'),
            separator,
            path
        );

        let mut url = Url::parse(&raw)
            .map_err(|e| TestError::request_build(format!("Invalid URL '{raw}': {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

/// Builder for [`ApiClient`].
#[must_use]
pub struct ApiClientBuilder {
    base_uri: String,
    base_path: String,
    default_headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl ApiClientBuilder {
    fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            base_path: String::new(),
            default_headers: Vec::new(),
            timeout: None,
        }
    }

    /// Sets the path prefix used when a request spec has none.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Adds a header sent with every request.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Sets a client-side timeout for the whole exchange.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<ApiClient, TestError> {
        Url::parse(&self.base_uri).map_err(|e| {
            TestError::request_build(format!("Invalid base URI '{}': {e}", self.base_uri))
        })?;

        let mut http = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http
            .build()
            .map_err(|e| TestError::request_build(format!("failed to create client: {e}")))?;

        Ok(ApiClient {
            http,
            base_uri: self.base_uri,
            base_path: self.base_path,
            default_headers: self.default_headers,
            report: None,
        })
    }
}

/// One exchange being prepared: spec defaults plus scenario data.
#[must_use]
pub struct Exchange<'a> {
    client: &'a ApiClient,
    spec: &'a RequestSpec,
    path_params: Vec<(String, String)>,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
    error: Option<TestError>,
}

impl Exchange<'_> {
    /// Sets the value for a `{name}` placeholder in the path.
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.push((name.into(), value.into()));
        self
    }

    /// Appends a query parameter after the spec's defaults.
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Sets a header, overriding client and spec defaults with the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the JSON request body.
    ///
    /// A serialization error is reported when the exchange is sent.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.body = Some(Bytes::from(bytes)),
            Err(e) => self.error = Some(TestError::Json(e)),
        }
        self
    }

    /// Sends a GET request to `path`.
    pub async fn get(self, path: &str) -> Result<ApiResponse, TestError> {
        self.send(Method::GET, path).await
    }

    /// Sends a POST request to `path`.
    pub async fn post(self, path: &str) -> Result<ApiResponse, TestError> {
        self.send(Method::POST, path).await
    }

    /// Sends a PUT request to `path`.
    pub async fn put(self, path: &str) -> Result<ApiResponse, TestError> {
        self.send(Method::PUT, path).await
    }

    /// Sends a PATCH request to `path`.
    pub async fn patch(self, path: &str) -> Result<ApiResponse, TestError> {
        self.send(Method::PATCH, path).await
    }

    /// Sends a DELETE request to `path`.
    pub async fn delete(self, path: &str) -> Result<ApiResponse, TestError> {
        self.send(Method::DELETE, path).await
    }

    /// Builds the request, runs interceptors and logging, sends it and reads
    /// the whole response.
    ///
    /// # Errors
    ///
    /// `RequestBuild` for an invalid path, header or URL, `Json` for a body
    /// that failed to serialize, `Transport` when the HTTP client fails and
    /// `BodyRead` when the response body cannot be read.
    pub async fn send(self, method: Method, path: &str) -> Result<ApiResponse, TestError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let path = render_path(path, &self.path_params)?;
        let query: Vec<(String, String)> = self
            .spec
            .query()
            .iter()
            .cloned()
            .chain(self.query)
            .collect();
        let url = self.client.resolve_url(self.spec, &path, &query)?;

        let mut headers = HeaderMap::new();
        let defaults = self
            .client
            .default_headers
            .iter()
            .chain(self.spec.headers())
            .chain(&self.headers);
        for (name, value) in defaults {
            let (name, value) = parse_header(name, value)?;
            headers.insert(name, value);
        }
        if self.body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            if let Some(content_type) = self.spec.content_type() {
                let (name, value) = parse_header(CONTENT_TYPE.as_str(), content_type)?;
                headers.insert(name, value);
            }
        }

        let record = RequestRecord {
            method,
            url: url.to_string(),
            headers,
            body: self.body,
        };

        self.spec.log_request(&record);
        let report = self.client.report();
        for interceptor in self.spec.interceptors() {
            interceptor.before_request(&record, report);
        }

        let mut request = self
            .client
            .http
            .request(record.method.clone(), url)
            .headers(record.headers.clone());
        if let Some(body) = &record.body {
            request = request.body(body.clone());
        }

        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let response_headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| TestError::BodyRead(e.to_string()))?;
        let elapsed = started.elapsed();

        let response = ApiResponse::new(status, response_headers, body, elapsed);
        tracing::debug!(
            http.method = %record.method,
            http.url = %record.url,
            http.status_code = response.status_code(),
            duration_ms = response.elapsed_millis(),
            "Exchange completed"
        );

        for interceptor in self.spec.interceptors() {
            interceptor.after_response(&record, &response, report);
        }

        Ok(response)
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), TestError> {
    let header_name = HeaderName::try_from(name)
        .map_err(|e| TestError::request_build(format!("Invalid header name '{name}': {e}")))?;
    let header_value = HeaderValue::try_from(value)
        .map_err(|e| TestError::request_build(format!("Invalid header value for '{name}': {e}")))?;
    Ok((header_name, header_value))
}
