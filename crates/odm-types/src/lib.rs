//! Foundation types for Arbor ODM.
//!
//! This crate provides the identity and addressing types shared by the
//! operation queue, the node store, and the flush executor.
//!
//! # Key Types
//!
//! - [`SubjectId`] -- Caller-assigned identity of a tracked document
//! - [`NodePath`] -- Validated absolute path of a node in the content tree

pub mod error;
pub mod path;
pub mod subject;

pub use error::{TypeError, TypeResult};
pub use path::NodePath;
pub use subject::SubjectId;
