//! Commit graph error types
//!
//! All errors that can occur during graph operations are defined here.
//! We use `thiserror` for ergonomic error definition and better error messages

use thiserror::Error;

use crate::graph::types::InvalidNameError;

/// the main error type for graph operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// caller supplied an unusable value (empty message, empty branch name, bad hex)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// an internal invariant is broken; this is a bug, not a user error
    #[error("integrity violation: {0}")]
    IntegrityViolation(String),

    /// the requested branch or commit does not exist
    #[error("not found: {0}")]
    NotFound(String),
}

impl GraphError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn integrity(msg: impl Into<String>) -> Self {
        Self::IntegrityViolation(msg.into())
    }

    /// check if this error was caused by a bad argument
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, GraphError::InvalidInput(_))
    }

    /// check if this error signals a broken invariant
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, GraphError::IntegrityViolation(_))
    }

    /// check if this error indicates the resource doesn't exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, GraphError::NotFound(_))
    }
}

impl From<InvalidNameError> for GraphError {
    fn from(err: InvalidNameError) -> Self {
        GraphError::InvalidInput(err.to_string())
    }
}

impl From<hex::FromHexError> for GraphError {
    fn from(err: hex::FromHexError) -> Self {
        GraphError::InvalidInput(format!("malformed commit id: {}", err))
    }
}

/// result type alias for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let bad = GraphError::invalid_input("commit message cannot be empty");
        assert!(bad.is_invalid_input());
        assert!(!bad.is_integrity_violation());
        assert!(!bad.is_not_found());

        let broken = GraphError::integrity("HEAD points at a missing commit");
        assert!(broken.is_integrity_violation());
        assert!(!broken.is_invalid_input());

        let missing = GraphError::NotFound("branch 'ghost'".into());
        assert!(missing.is_not_found());
    }

    #[test]
    fn test_name_error_becomes_invalid_input() {
        let err: GraphError = InvalidNameError::Empty.into();
        assert_eq!(err, GraphError::InvalidInput("name cannot be empty".into()));
    }

    #[test]
    fn test_error_display() {
        let err = GraphError::integrity("duplicate branch 'dev'");
        assert_eq!(err.to_string(), "integrity violation: duplicate branch 'dev'");
    }
}
