//! Hierarchical node store for Arbor ODM.
//!
//! This crate models the content repository that flushed batches are
//! executed against: a tree of nodes addressed by [`NodePath`], each bound to
//! the [`SubjectId`] of the document it stores.
//!
//! # Storage Backends
//!
//! All backends implement the [`NodeStore`] trait:
//!
//! - [`InMemoryNodeStore`] -- `BTreeMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. The root node `/` always exists and is never bound to a subject.
//! 2. A node can only be created beneath an existing parent.
//! 3. A subject is bound to at most one node at a time.
//! 4. Moves and removals carry the whole subtree with them.
//! 5. A failed mutation leaves the tree unchanged.
//!
//! [`NodePath`]: odm_types::NodePath
//! [`SubjectId`]: odm_types::SubjectId

pub mod error;
pub mod memory;
pub mod node;
pub mod traits;

pub use error::{TreeError, TreeResult};
pub use memory::InMemoryNodeStore;
pub use node::Node;
pub use traits::NodeStore;
