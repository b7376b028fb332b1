use odm_types::{NodePath, SubjectId};

/// Errors from node store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// No node is bound to the subject.
    #[error("subject {0} is not in the tree")]
    UnknownSubject(SubjectId),

    /// The subject is already bound to a node.
    #[error("subject {subject} already stored at {path}")]
    SubjectExists { subject: SubjectId, path: NodePath },

    /// A node already exists at the target path.
    #[error("node already exists at {0}")]
    PathOccupied(NodePath),

    /// The parent of the target path does not exist.
    #[error("parent of {0} does not exist")]
    MissingParent(NodePath),

    /// A node cannot be moved into its own subtree.
    #[error("cannot move {from} into its own subtree at {to}")]
    MoveIntoSelf { from: NodePath, to: NodePath },

    /// The root node cannot be bound, moved or removed.
    #[error("the root node cannot be modified")]
    RootImmutable,

    /// Internal lock was poisoned by a panicking writer.
    #[error("node store lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result alias for node store operations.
pub type TreeResult<T> = Result<T, TreeError>;
