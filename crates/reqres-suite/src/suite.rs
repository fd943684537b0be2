//! Suite setup and scenario runner.

use std::future::Future;

use reqres_config::{ConfigLoader, SuiteConfig};
use reqres_telemetry::{init_logging, TelemetryError};
use reqres_test::{ApiClient, FinishedReport, Report, ReportSink, TestError};

use crate::error::SuiteError;

/// Optional configuration file, relative to the working directory.
pub const CONFIG_FILE: &str = "reqres.toml";

/// Prefix of environment overrides (`REQRES__TARGET__BASE_URI`, ...).
pub const ENV_PREFIX: &str = "REQRES";

/// Configured target plus the client every scenario shares.
#[derive(Debug, Clone)]
pub struct Suite {
    config: SuiteConfig,
    client: ApiClient,
}

impl Suite {
    /// Loads the configuration (defaults, then `reqres.toml` if present,
    /// then `REQRES__*` variables, which a `.env` file may supply), sets up
    /// logging and builds the client.
    ///
    /// Logging that is already set up in this process is kept as is.
    pub fn from_env() -> Result<Self, SuiteError> {
        let config = ConfigLoader::new()
            .with_defaults()
            .with_dotenv()?
            .with_optional_file(CONFIG_FILE)?
            .with_env_prefix(ENV_PREFIX)
            .load()?;

        match init_logging(&config.logging.to_log_config()) {
            Ok(()) => {}
            Err(TelemetryError::LoggingInit(reason)) => {
                tracing::debug!(reason = %reason, "Keeping existing log subscriber");
            }
            Err(e) => return Err(e.into()),
        }

        Self::new(config)
    }

    /// Builds the suite from an already loaded configuration.
    ///
    /// Does not touch logging.
    pub fn new(config: SuiteConfig) -> Result<Self, SuiteError> {
        config.validate()?;
        let client = ApiClient::from_target(&config.target)?;

        tracing::info!(
            base_uri = %config.target.base_uri,
            base_path = %config.target.base_path,
            "Suite ready"
        );

        Ok(Self { config, client })
    }

    /// Effective configuration.
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Client for the configured target.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Runs one scenario under a fresh report named `name` and hands the
    /// finished report to `sink`.
    ///
    /// The scenario receives its own client bound to the report.
    pub async fn run<T, F, Fut>(
        &self,
        name: &str,
        sink: &dyn ReportSink,
        scenario: F,
    ) -> (Result<T, TestError>, FinishedReport)
    where
        F: FnOnce(ApiClient, Report) -> Fut,
        Fut: Future<Output = Result<T, TestError>>,
    {
        let report = Report::new(name);
        tracing::info!(scenario = %name, "Scenario started");

        let result = scenario(self.client.with_report(&report), report.clone()).await;
        let finished = report.finish(sink);

        (result, finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqres_config::TargetConfig;
    use reqres_test::{MemorySink, StepStatus};

    fn config(base_uri: &str) -> SuiteConfig {
        SuiteConfig::builder()
            .target(TargetConfig {
                base_uri: base_uri.to_string(),
                ..TargetConfig::default()
            })
            .build()
    }

    #[test]
    fn test_new_uses_target() {
        let suite = Suite::new(config("http://localhost:8080")).unwrap();
        assert_eq!(suite.client().base_uri(), "http://localhost:8080");
        assert_eq!(suite.client().base_path(), "/api");
        assert_eq!(suite.config().target.base_uri, "http://localhost:8080");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = Suite::new(config("ftp://reqres.in"));
        assert!(matches!(result, Err(SuiteError::Config(_))));
    }

    #[tokio::test]
    async fn test_run_finishes_report() {
        let suite = Suite::new(config("http://localhost:8080")).unwrap();
        let sink = MemorySink::new();

        let (result, finished) = suite
            .run("Offline scenario", &sink, |client, report| async move {
                assert_eq!(client.report().unwrap().name(), report.name());
                reqres_test::step(&report, "No exchange", async { Ok(7) }).await
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(finished.name, "Offline scenario");
        assert_eq!(finished.status, StepStatus::Passed);
        assert_eq!(sink.reports().len(), 1);
    }
}
