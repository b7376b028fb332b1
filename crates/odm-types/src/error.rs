use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid node path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("invalid subject id: {0}")]
    InvalidSubjectId(String),
}

/// Result alias for type operations.
pub type TypeResult<T> = Result<T, TypeError>;
