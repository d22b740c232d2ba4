use pagegen_chunks::ChunkError;
use pagegen_imports::ChainFailure;
use serde::{Deserialize, Serialize};

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// One reportable finding attached to a compilation outcome.
///
/// Every non-fatal problem surfaces here; nothing is silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,

    /// Identity of the file the finding is about, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub message: String,
}

impl Diagnostic {
    /// Create a warning tied to a source file
    pub fn warning(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            source: Some(source.into()),
            message: message.into(),
        }
    }

    /// Create an error tied to a source file
    pub fn error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            source: Some(source.into()),
            message: message.into(),
        }
    }
}

impl From<&ChainFailure> for Diagnostic {
    fn from(failure: &ChainFailure) -> Self {
        let message = failure.error.to_string();
        match failure.error {
            // a file that exists but cannot be read is an environment
            // problem, not a content problem
            ChunkError::UnreadableSource(_) => Self::error(failure.source.as_str(), message),
            _ => Self::warning(failure.source.as_str(), message),
        }
    }
}
