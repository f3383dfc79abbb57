//! Error types for blogsync-core.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from configuration handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure, with the path that was being accessed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load, with the file path and serde_yaml line context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The config file did not exist at the expected path.
    #[error("config not found at {path}; run `blogsync init` first")]
    NotFound { path: PathBuf },

    /// `init` refused to overwrite an existing config.
    #[error("config already exists at {path}")]
    AlreadyExists { path: PathBuf },

    /// A value was present but unusable.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}

/// What was wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Required key absent.
    Missing,
    /// Present with the wrong JSON kind.
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    /// A number that is negative, fractional, or out of range.
    NotUnsignedInteger,
    /// A string that does not parse as an absolute URL.
    InvalidUrl,
    /// A string that does not equal the one permitted literal.
    LiteralMismatch { expected: &'static str },
    /// A slug that cannot be used as a file name.
    UnsafeSlug,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Missing => write!(f, "required"),
            ViolationKind::WrongType { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ViolationKind::NotUnsignedInteger => write!(f, "expected a non-negative integer"),
            ViolationKind::InvalidUrl => write!(f, "invalid url"),
            ViolationKind::LiteralMismatch { expected } => {
                write!(f, "expected literal \"{expected}\"")
            }
            ViolationKind::UnsafeSlug => write!(f, "slug is not usable as a file name"),
        }
    }
}

/// One violated field. `path` is dotted, with `[i]` for array positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "<root>: {}", self.kind)
        } else {
            write!(f, "{}: {}", self.path, self.kind)
        }
    }
}

/// Every field that failed validation, in document order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field violation(s): {}", .violations.len(), join(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Whether any violation is reported at exactly `path`.
    pub fn touches(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
