use odm_types::{NodePath, SubjectId};
use serde::{Deserialize, Serialize};

/// A node of the content tree and the document bound to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Absolute location of the node.
    pub path: NodePath,
    /// Document bound to the node.
    pub subject: SubjectId,
}

impl Node {
    /// Bind `subject` to `path`.
    pub fn new(path: NodePath, subject: SubjectId) -> Self {
        Self { path, subject }
    }

    /// Last path segment of the node.
    pub fn name(&self) -> &str {
        self.path.name().unwrap_or("")
    }
}
