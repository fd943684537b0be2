//! Errors raised while assembling a [`SuiteConfig`](crate::SuiteConfig).

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Syntax of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl Syntax {
    /// Looks up a syntax by name or file extension, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Picks the syntax from the extension of `path`.
    pub fn of_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_name)
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        })
    }
}

/// Why a configuration layer was rejected.
///
/// Every variant names the layer it came from (a file path, an inline
/// document, an environment variable or a setting) so the message alone
/// tells the user what to fix.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required configuration file does not exist.
    #[error("no configuration file at {}", .path.display())]
    Missing {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// A configuration file exists but could not be read.
    #[error("cannot read {}", .path.display())]
    Unreadable {
        /// Path of the file.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A document did not parse, or names a section or key the suite
    /// does not know.
    #[error("{origin} is not a valid {syntax} suite configuration: {message}")]
    Malformed {
        /// File path, or `inline document`.
        origin: String,
        /// Syntax the document was read as.
        syntax: Syntax,
        /// Parser message.
        message: String,
    },

    /// The document format is neither TOML nor JSON.
    #[error("cannot read '{name}' as configuration, expected toml or json")]
    UnknownFormat {
        /// Requested format or offending file path.
        name: String,
    },

    /// A setting holds a value the suite cannot run with.
    #[error("{setting} rejected: {reason}")]
    Rejected {
        /// Dotted setting name such as `target.base_uri`.
        setting: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A `PREFIX__SECTION__KEY` variable carries a value that does not parse.
    #[error("override {var}={value:?} rejected: {reason}")]
    Override {
        /// Variable name.
        var: String,
        /// Raw value.
        value: String,
        /// What was expected instead.
        reason: String,
    },

    /// A `.env` file exists but could not be loaded.
    #[error("cannot load .env file: {0}")]
    Dotenv(#[source] dotenvy::Error),
}

impl ConfigError {
    pub(crate) fn missing(path: impl Into<PathBuf>) -> Self {
        Self::Missing { path: path.into() }
    }

    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(
        origin: impl Into<String>,
        syntax: Syntax,
        message: impl fmt::Display,
    ) -> Self {
        Self::Malformed {
            origin: origin.into(),
            syntax,
            message: message.to_string(),
        }
    }

    pub(crate) fn unknown_format(name: impl Into<String>) -> Self {
        Self::UnknownFormat { name: name.into() }
    }

    /// Rejects the value of `setting`.
    pub fn rejected(setting: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            setting: setting.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn bad_override(var: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::Override {
            var: var.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Dotted name of the offending setting, when the error is about one.
    pub fn setting(&self) -> Option<&str> {
        match self {
            Self::Rejected { setting, .. } => Some(setting),
            _ => None,
        }
    }
}
