//! Tree operation queue for Arbor ODM.
//!
//! Pending structural changes against the content tree (move, insert,
//! remove) are pushed onto an [`OperationQueue`] as the unit of work decides
//! on them. At flush time the queue partitions its ledger into [`Batch`]es:
//! maximal contiguous runs of the same [`OperationKind`], in ledger order.
//!
//! # Design Rules
//!
//! 1. The ledger is append-only; entries are invalidated, never edited.
//! 2. Invalidation is one-way. An invalidated operation never becomes valid again.
//! 3. Contiguity, not global grouping, decides batch boundaries, so
//!    `[Move, Insert, Move]` yields three batches.
//! 4. Within a batch the last args pushed for a subject win; the subject
//!    keeps the position where it was first scheduled.
//! 5. The queue never clears itself. The caller clears it after a
//!    successful flush.
//!
//! # Modules
//!
//! - [`kind`] -- [`OperationKind`]
//! - [`operation`] -- [`Operation`] and its [`OperationArgs`]
//! - [`batch`] -- [`Schedule`] and [`Batch`]
//! - [`queue`] -- [`OperationQueue`]
//! - [`config`] -- [`QueueConfig`]

pub mod batch;
pub mod config;
pub mod error;
pub mod kind;
pub mod operation;
pub mod queue;

pub use batch::{Batch, Schedule};
pub use config::QueueConfig;
pub use error::{QueueError, QueueResult};
pub use kind::OperationKind;
pub use operation::{Operation, OperationArgs};
pub use queue::OperationQueue;
