//! LM-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, LmError>;

/// Top-level error type for the LegacyMod dashboard shell.
///
/// The assessment core is total and never produces these; they come from the
/// ambient layers around it (config loading, terminal I/O, output encoding).
#[derive(Debug, Error)]
pub enum LmError {
    #[error("[LM-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[LM-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[LM-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[LM-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[LM-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[LM-3101] terminal failure: {source}")]
    Terminal {
        #[source]
        source: std::io::Error,
    },

    #[error("[LM-3900] runtime failure: {details}")]
    Runtime { details: String },
}

impl LmError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "LM-1001",
            Self::MissingConfig { .. } => "LM-1002",
            Self::ConfigParse { .. } => "LM-1003",
            Self::Serialization { .. } => "LM-2101",
            Self::Io { .. } => "LM-3002",
            Self::Terminal { .. } => "LM-3101",
            Self::Runtime { .. } => "LM-3900",
        }
    }

    /// Whether retrying might resolve the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::Terminal { .. } | Self::Runtime { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for LmError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for LmError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

impl From<toml::ser::Error> for LmError {
    fn from(value: toml::ser::Error) -> Self {
        Self::Serialization {
            context: "toml",
            details: value.to_string(),
        }
    }
}
