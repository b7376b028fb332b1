use odm_types::{NodePath, SubjectId};

use crate::error::TreeResult;
use crate::node::Node;

/// Hierarchical node storage.
///
/// All implementations must satisfy these invariants:
/// - The root `/` always exists, is never bound to a subject, and cannot be
///   moved or removed.
/// - `insert` requires an existing parent, a free path, and a subject that
///   is not yet stored.
/// - `move_to` and `remove` act on the whole subtree below the subject's node.
/// - A mutation that returns `Err` leaves the tree untouched.
pub trait NodeStore: Send + Sync {
    /// Create a node at `path` bound to `subject`.
    fn insert(&self, subject: SubjectId, path: &NodePath) -> TreeResult<()>;

    /// Relocate the subject's node and its descendants to `target`.
    ///
    /// Returns the previous path of the node.
    fn move_to(&self, subject: SubjectId, target: &NodePath) -> TreeResult<NodePath>;

    /// Delete the subject's node and its descendants.
    ///
    /// Returns every node removed, the subject's own node first.
    fn remove(&self, subject: SubjectId) -> TreeResult<Vec<Node>>;

    /// Current path of the subject, if it is stored.
    fn path_of(&self, subject: SubjectId) -> TreeResult<Option<NodePath>>;

    /// The node at `path`, if any. The root is reported as absent.
    fn node_at(&self, path: &NodePath) -> TreeResult<Option<Node>>;

    /// Direct children of `path`, sorted by path.
    fn children(&self, path: &NodePath) -> TreeResult<Vec<Node>>;

    /// Check whether a node exists at `path`. The root always exists.
    fn exists(&self, path: &NodePath) -> TreeResult<bool> {
        if path.is_root() {
            return Ok(true);
        }
        Ok(self.node_at(path)?.is_some())
    }

    /// Check whether the subject is stored anywhere in the tree.
    fn contains(&self, subject: SubjectId) -> TreeResult<bool> {
        Ok(self.path_of(subject)?.is_some())
    }
}
