//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// The share and billing calculators are total and never return these; errors
/// only surface at the typed boundary (parsing quantities, validating
/// participants, handling aggregate commands).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),

    /// A share or pool size off the half-unit grid, negative, or unparsable.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A command addressed a different aggregate than the one handling it.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The named thing (expense, assignment) does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Duplicate creation or a participant claiming twice.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Optimistic concurrency check failed.
    #[error("stale version (expected {expected}, actual {actual})")]
    StaleVersion { expected: u64, actual: u64 },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(what: &'static str) -> Self {
        Self::NotFound(what)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(DomainError::not_found("expense").to_string(), "expense not found");
        assert_eq!(
            DomainError::StaleVersion {
                expected: 2,
                actual: 3
            }
            .to_string(),
            "stale version (expected 2, actual 3)"
        );
        assert_eq!(
            DomainError::invalid_quantity("0.3").to_string(),
            "invalid quantity: 0.3"
        );
    }
}
