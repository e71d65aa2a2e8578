//! Structured error types shared across the fixture generator crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`ProbError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (parameter names, offending values, paths).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Canonical error type for the fixture generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum ProbError {
    /// Distribution parameters outside their valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(ErrorInfo),
    /// Sample data that statistics cannot be computed from.
    #[error("invalid input: {0}")]
    InvalidInput(ErrorInfo),
    /// Exact integer arithmetic exceeded its representable range.
    #[error("numeric overflow: {0}")]
    NumericOverflow(ErrorInfo),
    /// Filesystem failures while reading inputs or writing fixtures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

/// Discriminant of a [`ProbError`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`ProbError::InvalidParameter`].
    InvalidParameter,
    /// See [`ProbError::InvalidInput`].
    InvalidInput,
    /// See [`ProbError::NumericOverflow`].
    NumericOverflow,
    /// See [`ProbError::Io`].
    Io,
    /// See [`ProbError::Serde`].
    Serde,
}

impl ProbError {
    /// Shorthand for an [`ProbError::InvalidParameter`] naming the parameter and its value.
    pub fn invalid_parameter(
        code: &str,
        message: impl Into<String>,
        parameter: &str,
        value: impl Display,
    ) -> Self {
        ProbError::InvalidParameter(
            ErrorInfo::new(code, message)
                .with_context("parameter", parameter)
                .with_context("value", value.to_string()),
        )
    }

    /// Shorthand for an [`ProbError::InvalidInput`] without extra context.
    pub fn invalid_input(code: &str, message: impl Into<String>) -> Self {
        ProbError::InvalidInput(ErrorInfo::new(code, message))
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            ProbError::InvalidParameter(info)
            | ProbError::InvalidInput(info)
            | ProbError::NumericOverflow(info)
            | ProbError::Io(info)
            | ProbError::Serde(info) => info,
        }
    }

    /// Returns the error family.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProbError::InvalidParameter(_) => ErrorKind::InvalidParameter,
            ProbError::InvalidInput(_) => ErrorKind::InvalidInput,
            ProbError::NumericOverflow(_) => ErrorKind::NumericOverflow,
            ProbError::Io(_) => ErrorKind::Io,
            ProbError::Serde(_) => ErrorKind::Serde,
        }
    }

    /// True for errors raised by parameter or data validation.
    ///
    /// These stay local to the dataset that produced them; I/O and serde
    /// failures are not validation errors.
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidParameter | ErrorKind::InvalidInput | ErrorKind::NumericOverflow
        )
    }
}
