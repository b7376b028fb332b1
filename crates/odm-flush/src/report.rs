use odm_queue::OperationKind;
use odm_types::SubjectId;
use serde::Serialize;

/// One batch that was applied to the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppliedBatch {
    /// Kind shared by the batch's operations.
    pub kind: OperationKind,
    /// Subjects in the order they were applied.
    pub subjects: Vec<SubjectId>,
}

impl AppliedBatch {
    /// Number of operations applied from this batch.
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Returns `true` if the batch applied nothing.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

/// Summary of a successful flush.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FlushReport {
    /// Applied batches in application order.
    pub batches: Vec<AppliedBatch>,
}

impl FlushReport {
    /// Total operations applied across all batches.
    pub fn operations(&self) -> usize {
        self.batches.iter().map(AppliedBatch::len).sum()
    }

    /// Batch kinds in application order.
    pub fn kinds(&self) -> Vec<OperationKind> {
        self.batches.iter().map(|b| b.kind).collect()
    }

    /// Returns `true` if the flushed queue had nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
