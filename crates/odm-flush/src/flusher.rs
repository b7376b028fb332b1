use odm_queue::{Batch, OperationArgs, OperationKind, OperationQueue};
use odm_tree::NodeStore;
use odm_types::SubjectId;
use tracing::{debug, info, warn};

use crate::error::{FlushError, FlushResult};
use crate::report::{AppliedBatch, FlushReport};

/// Applies queued batches to a node store.
pub struct Flusher<'a, S: NodeStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: NodeStore + ?Sized> Flusher<'a, S> {
    /// A flusher writing to `store`.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Apply every entry of `batch` in schedule order.
    ///
    /// Stops at the first entry the store rejects; earlier entries of the
    /// batch stay applied.
    pub fn apply_batch(&self, batch: &Batch) -> FlushResult<AppliedBatch> {
        let kind = batch.kind();
        let mut subjects = Vec::with_capacity(batch.len());
        for (subject, args) in batch.iter() {
            self.apply_entry(kind, *subject, args)?;
            subjects.push(*subject);
        }
        debug!(%kind, entries = subjects.len(), "batch applied");
        Ok(AppliedBatch { kind, subjects })
    }

    /// Apply all of the queue's batches in order, then clear the queue.
    ///
    /// On failure the queue is left as it was and the error names the batch
    /// that failed.
    pub fn flush(&self, queue: &mut OperationQueue) -> FlushResult<FlushReport> {
        let batches = queue.batches();
        let mut report = FlushReport::default();

        for (index, batch) in batches.iter().enumerate() {
            match self.apply_batch(batch) {
                Ok(applied) => report.batches.push(applied),
                Err(source) => {
                    warn!(index, kind = %batch.kind(), error = %source, "flush aborted");
                    return Err(FlushError::Aborted {
                        index,
                        applied: report.batches.len(),
                        source: Box::new(source),
                    });
                }
            }
        }

        queue.clear();
        info!(
            batches = report.batches.len(),
            operations = report.operations(),
            "flush complete"
        );
        Ok(report)
    }

    fn apply_entry(
        &self,
        kind: OperationKind,
        subject: SubjectId,
        args: &OperationArgs,
    ) -> FlushResult<()> {
        let result = match (kind, args) {
            (OperationKind::Move, OperationArgs::Move { target }) => {
                self.store.move_to(subject, target).map(|_| ())
            }
            (OperationKind::Insert, OperationArgs::Insert { path }) => {
                self.store.insert(subject, path)
            }
            (OperationKind::Remove, OperationArgs::Remove) => {
                self.store.remove(subject).map(|_| ())
            }
            (kind, args) => {
                return Err(FlushError::ArgsMismatch {
                    kind,
                    actual: args.kind(),
                    subject,
                })
            }
        };
        result.map_err(|source| FlushError::Apply {
            kind,
            subject,
            source,
        })
    }
}
