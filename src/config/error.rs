//! Configuration error types.

use std::fmt;
use std::path::PathBuf;

use owo_colors::{OwoColorize, Stream};
use thiserror::Error;

/// Errors from loading `folio.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed config")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// A single invalid field.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    /// Dotted field path, e.g. `reading.words-per-minute`.
    pub field: &'static str,
    pub message: String,
    pub hint: Option<String>,
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field.if_supports_color(Stream::Stderr, |t| t.cyan());
        write!(f, "  {field}: {}", self.message)?;
        if let Some(hint) = &self.hint {
            let label = "hint:".if_supports_color(Stream::Stderr, |t| t.yellow());
            write!(f, "\n    {label} {hint}")?;
        }
        Ok(())
    }
}

/// Every invalid field found in one validation pass.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: &'static str, message: impl Into<String>) {
        self.push(field, message.into(), None);
    }

    pub fn error_with_hint(
        &mut self,
        field: &'static str,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.push(field, message.into(), Some(hint.into()));
    }

    fn push(&mut self, field: &'static str, message: String, hint: Option<String>) {
        self.errors.push(ConfigDiagnostic {
            field,
            message,
            hint,
        });
    }

    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    /// `Ok` when nothing was reported.
    pub fn into_result(self) -> Result<(), ConfigError> {
        match self.errors.is_empty() {
            true => Ok(()),
            false => Err(ConfigError::Diagnostics(self)),
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.errors.len();
        let noun = if count == 1 { "problem" } else { "problems" };
        write!(f, "invalid configuration ({count} {noun}):")?;
        for err in &self.errors {
            write!(f, "\n{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}
