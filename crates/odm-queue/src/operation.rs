//! A single pending structural change.

use odm_types::{NodePath, SubjectId};
use serde::{Deserialize, Serialize};

use crate::error::{QueueError, QueueResult};
use crate::kind::OperationKind;

/// Kind-specific parameters of an operation.
///
/// Each variant carries only the fields its kind needs, so the kind of an
/// operation is always derivable from its arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OperationArgs {
    /// Destination path of the moved node.
    Move { target: NodePath },
    /// Path the new node is created at.
    Insert { path: NodePath },
    Remove,
}

impl OperationArgs {
    /// The kind these arguments belong to.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Move { .. } => OperationKind::Move,
            Self::Insert { .. } => OperationKind::Insert,
            Self::Remove => OperationKind::Remove,
        }
    }
}

/// One pending move, insert or remove against a tracked document.
///
/// The subject and arguments are fixed at construction. The only mutable
/// state is the validity flag, which can only go from valid to invalid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Operation {
    subject: SubjectId,
    args: OperationArgs,
    valid: bool,
}

impl Operation {
    /// Build a valid operation; the kind follows from `args`.
    pub fn new(subject: SubjectId, args: OperationArgs) -> Self {
        Self {
            subject,
            args,
            valid: true,
        }
    }

    /// Build an operation for an explicitly requested kind.
    ///
    /// Fails with [`QueueError::KindMismatch`] if `args` belong to another kind.
    pub fn with_kind(
        kind: OperationKind,
        subject: SubjectId,
        args: OperationArgs,
    ) -> QueueResult<Self> {
        let actual = args.kind();
        if actual != kind {
            return Err(QueueError::KindMismatch {
                expected: kind,
                actual,
            });
        }
        Ok(Self::new(subject, args))
    }

    /// Build an operation from a kind name such as `"move"`.
    ///
    /// Fails with [`QueueError::InvalidKind`] for an unrecognised name.
    pub fn from_parts(kind: &str, subject: SubjectId, args: OperationArgs) -> QueueResult<Self> {
        Self::with_kind(kind.parse()?, subject, args)
    }

    /// Move `subject` to `target`.
    pub fn move_to(subject: SubjectId, target: NodePath) -> Self {
        Self::new(subject, OperationArgs::Move { target })
    }

    /// Insert `subject` as a new node at `path`.
    pub fn insert(subject: SubjectId, path: NodePath) -> Self {
        Self::new(subject, OperationArgs::Insert { path })
    }

    /// Remove `subject` and its subtree.
    pub fn remove(subject: SubjectId) -> Self {
        Self::new(subject, OperationArgs::Remove)
    }

    /// Kind of the operation, derived from its arguments.
    pub fn kind(&self) -> OperationKind {
        self.args.kind()
    }

    /// The tracked document this operation applies to.
    pub fn subject(&self) -> SubjectId {
        self.subject
    }

    /// Kind-specific arguments.
    pub fn args(&self) -> &OperationArgs {
        &self.args
    }

    /// `false` once the operation has been invalidated.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Mark the operation as superseded. Repeated calls are no-ops.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    pub(crate) fn matches(&self, kind: OperationKind, subject: SubjectId) -> bool {
        self.subject == subject && self.kind() == kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> NodePath {
        NodePath::parse(s).unwrap()
    }

    #[test]
    fn new_operation_is_valid() {
        let op = Operation::move_to(SubjectId::new(1234), path("/cms/target"));
        assert!(op.is_valid());
        assert_eq!(op.kind(), OperationKind::Move);
        assert_eq!(op.subject(), SubjectId::new(1234));
        assert_eq!(
            op.args(),
            &OperationArgs::Move {
                target: path("/cms/target")
            }
        );
    }

    #[test]
    fn invalidate_is_one_way_and_idempotent() {
        let mut op = Operation::remove(SubjectId::new(1));
        op.invalidate();
        assert!(!op.is_valid());
        op.invalidate();
        assert!(!op.is_valid());
    }

    #[test]
    fn from_parts_parses_kind_name() {
        let op = Operation::from_parts(
            "insert",
            SubjectId::new(5),
            OperationArgs::Insert { path: path("/a") },
        )
        .unwrap();
        assert_eq!(op.kind(), OperationKind::Insert);
    }

    #[test]
    fn from_parts_rejects_unknown_kind() {
        let err = Operation::from_parts("copy", SubjectId::new(5), OperationArgs::Remove)
            .unwrap_err();
        assert_eq!(err, QueueError::InvalidKind("copy".into()));
    }

    #[test]
    fn with_kind_rejects_foreign_args() {
        let err = Operation::with_kind(
            OperationKind::Move,
            SubjectId::new(5),
            OperationArgs::Remove,
        )
        .unwrap_err();
        assert_eq!(
            err,
            QueueError::KindMismatch {
                expected: OperationKind::Move,
                actual: OperationKind::Remove,
            }
        );
    }

    #[test]
    fn args_serialize_with_kind_tag() {
        let args = OperationArgs::Move {
            target: path("/x/y"),
        };
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json["kind"], "move");
        assert_eq!(json["target"], "/x/y");

        let back: OperationArgs = serde_json::from_str(r#"{"kind":"remove"}"#).unwrap();
        assert_eq!(back, OperationArgs::Remove);
    }
}
