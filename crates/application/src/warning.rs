//! Per-item diagnostics for batch operations
//!
//! Batch operations report what happened to each item without aborting
//! the rest; these types carry those reports up to the command surface,
//! which decides which stream they land on.

use std::fmt;

/// Severity of a per-item diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    /// The item was processed; informational report.
    Info,
    /// The item was skipped; the batch continued.
    Warning,
    /// The item failed; the batch continued.
    Error,
}

impl fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic tied to one item of a batch operation.
#[derive(Debug, Clone)]
pub struct OperationWarning {
    /// The item the diagnostic refers to (a resource or variable name).
    pub subject: String,
    /// Human-readable description.
    pub message: String,
    /// Severity level.
    pub severity: WarningSeverity,
}

impl OperationWarning {
    /// Creates a diagnostic.
    pub fn new(
        subject: impl Into<String>,
        message: impl Into<String>,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            severity,
        }
    }

    /// Creates an info-level report.
    pub fn info(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(subject, message, WarningSeverity::Info)
    }

    /// Creates a warning-level report.
    pub fn warning(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(subject, message, WarningSeverity::Warning)
    }

    /// Creates an error-level report.
    pub fn error(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(subject, message, WarningSeverity::Error)
    }

    /// Whether this diagnostic reports a skipped or failed item.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(self.severity, WarningSeverity::Info)
    }
}

impl fmt::Display for OperationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.subject, self.message)
    }
}
