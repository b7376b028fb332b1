//! Error types for the queue crate.

use crate::kind::OperationKind;

/// Errors that can occur while building operations or loading queue config.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// The requested operation kind is not a recognised kind.
    #[error("unrecognized operation kind: {0:?}")]
    InvalidKind(String),

    /// The arguments belong to a different kind than the one requested.
    #[error("arguments for {actual} cannot build a {expected} operation")]
    KindMismatch {
        expected: OperationKind,
        actual: OperationKind,
    },

    /// The queue configuration could not be parsed.
    #[error("invalid queue config: {0}")]
    Config(String),
}

/// Convenience alias for queue results.
pub type QueueResult<T> = Result<T, QueueError>;
