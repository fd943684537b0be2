//! Step reporting.
//!
//! A [`Report`] collects the named steps of one scenario. [`step`] wraps an
//! operation, runs it and records its label and outcome. When the scenario
//! is over, [`Report::finish`] hands the collected steps to a [`ReportSink`].
//!
//! ```ignore
//! let report = Report::new("Get a user by id");
//! let user = step(&report, "Perform a GET request", async {
//!     client.given(&spec).path_param("id", "2").get("/{id}").await?.json::<UserByIdResponse>()
//! })
//! .await?;
//! report.finish(&TracingSink);
//! ```

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

use crate::error::TestError;

/// Outcome of a step or report.
///
/// Ordered by severity so the worst step decides the report status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// The operation completed.
    Passed,
    /// A contract check did not hold.
    Failed,
    /// The operation could not be completed (transport, decoding, build).
    Broken,
}

impl StepStatus {
    /// Classifies an outcome.
    pub fn of<T>(result: &Result<T, TestError>) -> Self {
        match result {
            Ok(_) => Self::Passed,
            Err(e) if e.is_assertion() => Self::Failed,
            Err(_) => Self::Broken,
        }
    }
}

/// A text attachment (rendered request, response, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// Display name.
    pub name: String,
    /// MIME type of `content`.
    pub content_type: String,
    /// Attachment body.
    pub content: String,
}

impl Attachment {
    /// Creates a `text/plain` attachment.
    pub fn text(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: "text/plain".to_string(),
            content: content.into(),
        }
    }
}

/// A finished step.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    /// Step label.
    pub name: String,
    /// Outcome.
    pub status: StepStatus,
    /// When the step started.
    pub started_at: DateTime<Utc>,
    /// When the step finished.
    pub stopped_at: DateTime<Utc>,
    /// Attachments added while the step was running.
    pub attachments: Vec<Attachment>,
    /// Error message for failed or broken steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A finished report, as delivered to sinks.
#[derive(Debug, Clone, Serialize)]
pub struct FinishedReport {
    /// Scenario name.
    pub name: String,
    /// Worst step status, `Passed` for a report without steps.
    pub status: StepStatus,
    /// When the report was created.
    pub started_at: DateTime<Utc>,
    /// When the report was finished.
    pub stopped_at: DateTime<Utc>,
    /// Steps in completion order.
    pub steps: Vec<StepRecord>,
    /// Attachments added outside of any step.
    pub attachments: Vec<Attachment>,
}

impl FinishedReport {
    /// Serializes the report as pretty JSON.
    pub fn to_json(&self) -> Result<String, TestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Finds a step by name.
    pub fn step(&self, name: &str) -> Option<&StepRecord> {
        self.steps.iter().find(|step| step.name == name)
    }
}

struct OpenStep {
    name: String,
    started_at: DateTime<Utc>,
    attachments: Vec<Attachment>,
}

#[derive(Default)]
struct ReportState {
    open: Vec<OpenStep>,
    steps: Vec<StepRecord>,
    attachments: Vec<Attachment>,
}

struct ReportInner {
    name: String,
    started_at: DateTime<Utc>,
    state: Mutex<ReportState>,
}

/// Step collector for one scenario.
///
/// Cloning is cheap and clones share the same steps.
#[derive(Clone)]
pub struct Report {
    inner: Arc<ReportInner>,
}

impl Report {
    /// Creates an empty report.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ReportInner {
                name: name.into(),
                started_at: Utc::now(),
                state: Mutex::new(ReportState::default()),
            }),
        }
    }

    /// Scenario name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Adds an attachment to the innermost running step, or to the report
    /// itself when no step is running.
    pub fn attach(&self, attachment: Attachment) {
        let mut state = self.inner.state.lock();
        match state.open.last_mut() {
            Some(step) => step.attachments.push(attachment),
            None => state.attachments.push(attachment),
        }
    }

    /// Snapshot of the finished steps.
    pub fn steps(&self) -> Vec<StepRecord> {
        self.inner.state.lock().steps.clone()
    }

    /// Worst status among the finished steps.
    pub fn status(&self) -> StepStatus {
        self.inner
            .state
            .lock()
            .steps
            .iter()
            .map(|step| step.status)
            .max()
            .unwrap_or(StepStatus::Passed)
    }

    fn start_step(&self, name: String) {
        self.inner.state.lock().open.push(OpenStep {
            name,
            started_at: Utc::now(),
            attachments: Vec::new(),
        });
    }

    fn stop_step(&self, status: StepStatus, error: Option<String>) {
        let mut state = self.inner.state.lock();
        if let Some(open) = state.open.pop() {
            state.steps.push(StepRecord {
                name: open.name,
                status,
                started_at: open.started_at,
                stopped_at: Utc::now(),
                attachments: open.attachments,
                error,
            });
        }
    }

    /// Closes the report and delivers it to `sink`.
    ///
    /// Steps still running (their future was dropped) are not included.
    pub fn finish(&self, sink: &dyn ReportSink) -> FinishedReport {
        let finished = {
            let state = self.inner.state.lock();
            FinishedReport {
                name: self.inner.name.clone(),
                status: state
                    .steps
                    .iter()
                    .map(|step| step.status)
                    .max()
                    .unwrap_or(StepStatus::Passed),
                started_at: self.inner.started_at,
                stopped_at: Utc::now(),
                steps: state.steps.clone(),
                attachments: state.attachments.clone(),
            }
        };
        sink.accept(&finished);
        finished
    }
}

impl std::fmt::Debug for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Report")
            .field("name", &self.inner.name)
            .field("steps", &state.steps.len())
            .field("open", &state.open.len())
            .finish()
    }
}

/// Runs `operation` as a named step of `report`.
///
/// The step is recorded as `Passed`, `Failed` (assertion errors) or `Broken`
/// (any other error); the result is returned unchanged.
pub async fn step<T, F>(report: &Report, name: impl Into<String>, operation: F) -> Result<T, TestError>
where
    F: Future<Output = Result<T, TestError>>,
{
    let name = name.into();
    tracing::info!(step = %name, "Step started");
    report.start_step(name.clone());

    let result = operation.await;

    let status = StepStatus::of(&result);
    let error = match &result {
        Ok(_) => {
            tracing::info!(step = %name, "Step passed");
            None
        }
        Err(e) => {
            tracing::warn!(
                step = %name,
                status = ?status,
                category = e.category(),
                error = %e,
                "Step did not pass"
            );
            Some(e.to_string())
        }
    };
    report.stop_step(status, error);

    result
}

/// Destination of finished reports.
pub trait ReportSink: Send + Sync {
    /// Receives a finished report.
    fn accept(&self, report: &FinishedReport);
}

/// Writes every finished report to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn accept(&self, report: &FinishedReport) {
        for step in &report.steps {
            tracing::info!(
                scenario = %report.name,
                step = %step.name,
                status = ?step.status,
                attachments = step.attachments.len(),
                "Report step"
            );
        }
        match report.status {
            StepStatus::Passed => tracing::info!(scenario = %report.name, "Scenario passed"),
            StepStatus::Failed => tracing::error!(scenario = %report.name, "Scenario failed"),
            StepStatus::Broken => tracing::error!(scenario = %report.name, "Scenario broken"),
        }
    }
}

/// Keeps finished reports in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<FinishedReport>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports received so far.
    pub fn reports(&self) -> Vec<FinishedReport> {
        self.reports.lock().clone()
    }
}

impl ReportSink for MemorySink {
    fn accept(&self, report: &FinishedReport) {
        self.reports.lock().push(report.clone());
    }
}
