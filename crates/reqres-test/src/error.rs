//! Test error types.

use http::StatusCode;
use thiserror::Error;

/// Errors that end a scenario.
///
/// Assertion failures ([`TestError::Assertion`] and
/// [`TestError::UnexpectedStatus`]) mean the service broke its contract.
/// Every other variant means the exchange itself could not be completed.
#[derive(Debug, Error)]
pub enum TestError {
    /// Request building failed (bad URL, header, path template, or body).
    #[error("Request build error: {0}")]
    RequestBuild(String),

    /// Connection, DNS, TLS or timeout failure reported by the HTTP client.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response status differs from the one the response spec expects.
    #[error("Expected status {expected}, got {actual}")]
    UnexpectedStatus {
        /// Status the response spec requires.
        expected: StatusCode,
        /// Status actually received.
        actual: StatusCode,
        /// Response body, for the report.
        body: String,
    },

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body reading failed.
    #[error("Body read error: {0}")]
    BodyRead(String),

    /// A scenario-level check did not hold.
    #[error("Assertion failed: {description}: expected {expected}, got {actual}")]
    Assertion {
        /// What was being checked.
        description: String,
        /// Expected value, debug-formatted.
        expected: String,
        /// Actual value, debug-formatted.
        actual: String,
    },
}

impl TestError {
    /// Create an assertion failure.
    pub fn assertion(
        description: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::Assertion {
            description: description.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a request build error.
    pub fn request_build(message: impl Into<String>) -> Self {
        Self::RequestBuild(message.into())
    }

    /// Returns true when the service answered but broke the contract.
    pub fn is_assertion(&self) -> bool {
        matches!(self, Self::Assertion { .. } | Self::UnexpectedStatus { .. })
    }

    /// Error category for logs and reports.
    pub fn category(&self) -> &'static str {
        match self {
            Self::RequestBuild(_) => "request",
            Self::Transport(_) => "transport",
            Self::UnexpectedStatus { .. } | Self::Assertion { .. } => "assertion",
            Self::Json(_) | Self::BodyRead(_) => "deserialization",
        }
    }
}

/// Result type for exchange operations.
pub type TestResult<T> = Result<T, TestError>;
