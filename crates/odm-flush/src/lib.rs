//! Flush executor for Arbor ODM.
//!
//! This crate is the caller side of the operation queue: it asks an
//! [`OperationQueue`] for its batches, applies them in order to a
//! [`NodeStore`], and clears the queue once every batch went through.
//!
//! - [`Flusher`] drives batch application
//! - [`FlushReport`] / [`AppliedBatch`] summarise a successful flush
//! - [`FlushError`] reports the batch and subject that failed
//!
//! There is no rollback. Batches applied before a failure stay applied, and
//! the queue keeps its ledger so the caller can decide how to recover.
//!
//! [`OperationQueue`]: odm_queue::OperationQueue
//! [`NodeStore`]: odm_tree::NodeStore

pub mod error;
pub mod flusher;
pub mod report;

pub use error::{FlushError, FlushResult};
pub use flusher::Flusher;
pub use report::{AppliedBatch, FlushReport};
