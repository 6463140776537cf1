//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The named resource kind is not one the server exposes.
    #[error("unknown resource kind: {0}")]
    UnknownResourceKind(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
