//! Shell error types.

use thiserror::Error;

use crate::graph::GraphError;

/// Result type for shell operations.
pub type ShellResult<T> = Result<T, ShellError>;

/// Errors that can occur while running shell commands.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Commit graph error.
    #[error("{0}")]
    Graph(#[from] GraphError),

    /// First word of the line is not a command.
    #[error("unknown command: {0} (type 'help' for a list)")]
    UnknownCommand(String),

    /// Command recognised but arguments are wrong.
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShellError {
    /// Check if the user can simply retype the command.
    pub fn is_user_error(&self) -> bool {
        match self {
            ShellError::UnknownCommand(_) | ShellError::Usage(_) => true,
            ShellError::Graph(e) => e.is_invalid_input() || e.is_not_found(),
            ShellError::Json(_) | ShellError::Io(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors() {
        assert!(ShellError::UnknownCommand("push".into()).is_user_error());
        assert!(ShellError::Usage("checkout <branch>").is_user_error());
        assert!(ShellError::Graph(GraphError::invalid_input("empty")).is_user_error());
        assert!(!ShellError::Graph(GraphError::integrity("bad")).is_user_error());
    }

    #[test]
    fn test_graph_error_display_passthrough() {
        let err: ShellError = GraphError::NotFound("branch 'x'".into()).into();
        assert_eq!(err.to_string(), "not found: branch 'x'");
    }
}
