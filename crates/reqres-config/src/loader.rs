//! Configuration loader with layered approach.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use crate::{ConfigError, LogFormat, SuiteConfig, Syntax};

/// Configuration loader with layered approach.
///
/// Later layers override earlier ones:
/// 1. Default values (built into the code)
/// 2. Configuration file (TOML or JSON)
/// 3. Environment variables (optionally seeded from a `.env` file)
///
/// # Example
///
/// ```no_run
/// use reqres_config::ConfigLoader;
///
/// # fn main() -> Result<(), reqres_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_file("reqres.toml")?
///     .with_env_prefix("REQRES")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: SuiteConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader starting from defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SuiteConfig::default(),
            env_prefix: None,
        }
    }

    /// Start with default configuration values.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = SuiteConfig::default();
        self
    }

    /// Load configuration from a file.
    ///
    /// The format is picked from the extension (`.toml` or `.json`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file does not exist, cannot be read,
    /// does not parse, or contains unknown fields.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::missing(path));
        }

        let syntax = Syntax::of_path(path)
            .ok_or_else(|| ConfigError::unknown_format(path.display().to_string()))?;
        let content = fs::read_to_string(path).map_err(|e| ConfigError::unreadable(path, e))?;

        self.config = parse(&content, syntax, &path.display().to_string())?;
        Ok(self)
    }

    /// Load configuration from a file if it exists.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string in the given format ("toml" or "json").
    ///
    /// # Example
    ///
    /// ```
    /// use reqres_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [target]
    ///     base_uri = "http://127.0.0.1:3000"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.target.base_uri, "http://127.0.0.1:3000");
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        let syntax = Syntax::from_name(format).ok_or_else(|| ConfigError::unknown_format(format))?;
        self.config = parse(content, syntax, "inline document")?;
        Ok(self)
    }

    /// Set environment variable prefix for overrides.
    ///
    /// Variables use the format `PREFIX__SECTION__KEY`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load the nearest `.env` file into the process environment, if there
    /// is one.
    ///
    /// Variables already set in the environment win over the file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Dotenv` if a `.env` file exists but cannot be
    /// read or has a malformed line.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        skip_missing(dotenvy::dotenv())?;
        Ok(self)
    }

    /// Same as [`with_dotenv`](Self::with_dotenv) for an explicit path.
    pub fn with_dotenv_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        skip_missing(dotenvy::from_path(path.as_ref()))?;
        Ok(self)
    }

    /// Apply environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an override does not parse or validation fails.
    pub fn load(mut self) -> Result<SuiteConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;

        Ok(self.config)
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        self.apply_overrides(prefix, env::vars())
    }

    /// Applies every `PREFIX__...` pair of `vars` in name order. Names that
    /// only share the prefix, such as `PREFIX_API_KEY`, are not overrides.
    fn apply_overrides<I>(&mut self, prefix: &str, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let marker = format!("{prefix}__");
        let overrides: BTreeMap<String, String> = vars
            .into_iter()
            .filter(|(k, _)| k.starts_with(&marker))
            .collect();

        for (key, value) in &overrides {
            self.apply_env_var(key, value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let key_without_prefix = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
            .ok_or_else(|| ConfigError::bad_override(key, value, "expected PREFIX__SECTION__KEY"))?;

        let parts: Vec<&str> = key_without_prefix.split("__").collect();

        match parts.as_slice() {
            ["TARGET", "BASE_URI"] => {
                self.config.target.base_uri = value.to_string();
            }
            ["TARGET", "BASE_PATH"] => {
                self.config.target.base_path = value.to_string();
            }
            ["TARGET", "TIMEOUT_MS"] => {
                self.config.target.timeout_ms = if value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(value.parse().map_err(|_| {
                        ConfigError::bad_override(key, value, "expected integer or 'none'")
                    })?)
                };
            }
            ["TARGET", "HEADERS", name] if !name.is_empty() => {
                let header = name.to_lowercase().replace('_', "-");
                self.config.target.headers.insert(header, value.to_string());
            }

            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::bad_override(key, value, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => {
                self.config.logging.level = value.to_string();
            }
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::bad_override(
                            key,
                            value,
                            "expected 'json' or 'pretty'",
                        ))
                    }
                };
            }

            // Unknown key
            _ => {}
        }

        Ok(())
    }
}

fn parse(content: &str, syntax: Syntax, origin: &str) -> Result<SuiteConfig, ConfigError> {
    match syntax {
        Syntax::Toml => {
            toml::from_str(content).map_err(|e| ConfigError::malformed(origin, syntax, e))
        }
        Syntax::Json => {
            serde_json::from_str(content).map_err(|e| ConfigError::malformed(origin, syntax, e))
        }
    }
}

/// Treats a missing `.env` file as empty.
fn skip_missing<T>(result: Result<T, dotenvy::Error>) -> Result<(), ConfigError> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::Dotenv(e)),
    }
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loader_new() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config.target.base_uri, "https://reqres.in");
    }

    #[test]
    fn test_loader_with_string_toml() {
        let toml = r#"
            [target]
            base_uri = "http://127.0.0.1:3000"
            timeout_ms = 8000

            [target.headers]
            x-api-key = "reqres-free-v1"
        "#;

        let config = ConfigLoader::new()
            .with_string(toml, "toml")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.target.base_uri, "http://127.0.0.1:3000");
        assert_eq!(config.target.base_path, "/api");
        assert_eq!(config.target.timeout_ms, Some(8000));
        assert_eq!(
            config.target.headers.get("x-api-key").map(String::as_str),
            Some("reqres-free-v1")
        );
    }

    #[test]
    fn test_loader_with_string_json() {
        let json = r#"{"logging": {"level": "debug", "format": "json"}}"#;

        let config = ConfigLoader::new()
            .with_string(json, "json")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_loader_with_string_unknown_format() {
        let result = ConfigLoader::new().with_string("", "yaml");
        assert!(matches!(result, Err(ConfigError::UnknownFormat { name }) if name == "yaml"));
    }

    #[test]
    fn test_loader_rejects_unknown_section() {
        let result = ConfigLoader::new().with_string("[server]\nport = 1", "toml");
        assert!(matches!(
            result,
            Err(ConfigError::Malformed { syntax: Syntax::Toml, .. })
        ));
    }

    #[test]
    fn test_loader_with_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[target]\nbase_path = \"/v2\"").unwrap();

        let config = ConfigLoader::new()
            .with_file(file.path())
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.target.base_path, "/v2");
    }

    #[test]
    fn test_loader_with_file_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let result = ConfigLoader::new().with_file(file.path());
        assert!(matches!(result, Err(ConfigError::UnknownFormat { .. })));
    }

    #[test]
    fn test_loader_with_file_not_found() {
        let result = ConfigLoader::new().with_file("/nonexistent/reqres.toml");
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_loader_with_optional_file_not_found() {
        let config = ConfigLoader::new()
            .with_optional_file("/nonexistent/reqres.toml")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.target.base_uri, "https://reqres.in");
    }

    #[test]
    fn test_load_validates() {
        let result = ConfigLoader::new()
            .with_string("[target]\nbase_uri = \"ftp://reqres.in\"", "toml")
            .unwrap()
            .load();

        assert!(matches!(result, Err(ConfigError::Rejected { .. })));
    }

    #[test]
    fn test_loader_with_file_malformed_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{\"target\": ").unwrap();

        let err = ConfigLoader::new().with_file(file.path()).unwrap_err();
        match err {
            ConfigError::Malformed { origin, syntax, .. } => {
                assert_eq!(syntax, Syntax::Json);
                assert_eq!(origin, file.path().display().to_string());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dotenv_file_missing_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new().with_dotenv_file(dir.path().join(".env"));
        assert!(loader.is_ok());
    }

    #[test]
    fn test_dotenv_file_malformed_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not a dotenv line").unwrap();

        let result = ConfigLoader::new().with_dotenv_file(file.path());
        assert!(matches!(result, Err(ConfigError::Dotenv(_))));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("On"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    // Environment overrides are exercised through apply_env_var directly so
    // tests never mutate the process environment.

    #[test]
    fn test_apply_env_var_target() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("TEST__TARGET__BASE_URI", "http://localhost:9000", "TEST")
            .unwrap();
        loader
            .apply_env_var("TEST__TARGET__TIMEOUT_MS", "1500", "TEST")
            .unwrap();
        assert_eq!(loader.config.target.base_uri, "http://localhost:9000");
        assert_eq!(loader.config.target.timeout_ms, Some(1500));

        loader
            .apply_env_var("TEST__TARGET__TIMEOUT_MS", "none", "TEST")
            .unwrap();
        assert_eq!(loader.config.target.timeout_ms, None);
    }

    #[test]
    fn test_apply_env_var_header() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("TEST__TARGET__HEADERS__X_API_KEY", "secret", "TEST")
            .unwrap();
        assert_eq!(
            loader.config.target.headers.get("x-api-key").map(String::as_str),
            Some("secret")
        );
    }

    #[test]
    fn test_apply_env_var_logging() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("TEST__LOGGING__FORMAT", "json", "TEST")
            .unwrap();
        loader
            .apply_env_var("TEST__LOGGING__ENABLED", "off", "TEST")
            .unwrap();
        assert_eq!(loader.config.logging.format, LogFormat::Json);
        assert!(!loader.config.logging.enabled);
    }

    #[test]
    fn test_apply_env_var_invalid_values() {
        let mut loader = ConfigLoader::new();
        assert!(loader
            .apply_env_var("TEST__TARGET__TIMEOUT_MS", "soon", "TEST")
            .is_err());
        assert!(loader
            .apply_env_var("TEST__LOGGING__FORMAT", "xml", "TEST")
            .is_err());
    }

    #[test]
    fn test_overrides_skip_names_sharing_only_the_prefix() {
        let vars = [
            ("REQRES_API_KEY", "reqres-free-v1"),
            ("REQRESX__TARGET__BASE_PATH", "/elsewhere"),
            ("REQRES__TARGET__BASE_PATH", "/v2"),
            ("PATH", "/usr/bin"),
        ]
        .map(|(k, v)| (k.to_string(), v.to_string()));

        let mut loader = ConfigLoader::new();
        loader.apply_overrides("REQRES", vars).unwrap();

        assert_eq!(loader.config.target.base_path, "/v2");
        assert!(loader.config.validate().is_ok());
    }

    #[test]
    fn test_overrides_report_the_variable() {
        let vars = [("REQRES__LOGGING__ENABLED".to_string(), "sometimes".to_string())];

        let mut loader = ConfigLoader::new();
        let err = loader.apply_overrides("REQRES", vars).unwrap_err();

        assert!(matches!(
            &err,
            ConfigError::Override { var, value, .. }
                if var == "REQRES__LOGGING__ENABLED" && value == "sometimes"
        ));
    }

    #[test]
    fn test_apply_env_var_unknown_key_ignored() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("TEST__SERVER__PORT", "80", "TEST")
            .unwrap();
        assert_eq!(loader.config, SuiteConfig::default());
    }
}
