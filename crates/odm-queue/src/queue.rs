//! The operation ledger and its batching pass.
//!
//! [`OperationQueue`] owns an insertion-ordered `Vec<Operation>`. Entries are
//! invalidated in place rather than removed, so ledger order stays the single
//! source of truth for both batch boundaries and last-write-wins resolution.

use odm_types::SubjectId;
use tracing::debug;

use crate::batch::{Batch, Schedule};
use crate::config::QueueConfig;
use crate::kind::OperationKind;
use crate::operation::Operation;

/// Unit-of-work scoped ledger of pending structural operations.
///
/// The queue has no internal locking. Concurrent callers must guard the
/// whole queue with a single lock.
#[derive(Clone, Debug, Default)]
pub struct OperationQueue {
    ledger: Vec<Operation>,
    invalid: usize,
    config: QueueConfig,
}

impl OperationQueue {
    /// Create an empty queue with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty queue using `config`.
    pub fn with_config(config: QueueConfig) -> Self {
        Self {
            ledger: Vec::new(),
            invalid: 0,
            config,
        }
    }

    /// Settings the queue was built with.
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Total ledger entries, including invalidated ones.
    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    /// Number of entries that are still valid.
    pub fn pending(&self) -> usize {
        self.ledger.len() - self.invalid
    }

    /// `true` when no valid operation is queued.
    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }

    /// Valid operations in ledger order.
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.ledger.iter().filter(|op| op.is_valid())
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Append an operation to the end of the ledger.
    pub fn push(&mut self, operation: Operation) {
        debug!(
            kind = %operation.kind(),
            subject = %operation.subject(),
            position = self.ledger.len(),
            "operation queued"
        );
        if !operation.is_valid() {
            self.invalid += 1;
        }
        self.ledger.push(operation);
    }

    /// Invalidate every entry matching both `kind` and `subject`.
    ///
    /// Returns how many entries went from valid to invalid.
    pub fn unqueue(&mut self, kind: OperationKind, subject: SubjectId) -> usize {
        let invalidated = self.invalidate_where(|op| op.matches(kind, subject));
        debug!(%kind, %subject, invalidated, "operations unqueued");
        self.maybe_compact();
        invalidated
    }

    /// Invalidate every entry for `subject`, whatever its kind.
    ///
    /// Used when the subject is dropped from tracking altogether.
    pub fn unregister(&mut self, subject: SubjectId) -> usize {
        let invalidated = self.invalidate_where(|op| op.subject() == subject);
        debug!(%subject, invalidated, "subject unregistered");
        self.maybe_compact();
        invalidated
    }

    /// Drop every entry. Called by the owner after a successful flush.
    pub fn clear(&mut self) {
        debug!(entries = self.ledger.len(), "queue cleared");
        self.ledger.clear();
        self.invalid = 0;
    }

    /// Remove invalidated entries from the ledger.
    ///
    /// Batches, schedules and `is_queued` answers are the same before and
    /// after. Returns the number of entries removed.
    pub fn compact(&mut self) -> usize {
        let before = self.ledger.len();
        self.ledger.retain(Operation::is_valid);
        let removed = before - self.ledger.len();
        self.invalid = 0;
        if removed > 0 {
            debug!(removed, remaining = self.ledger.len(), "ledger compacted");
        }
        removed
    }

    fn invalidate_where(&mut self, mut predicate: impl FnMut(&Operation) -> bool) -> usize {
        let mut invalidated = 0;
        for op in self.ledger.iter_mut() {
            if op.is_valid() && predicate(&*op) {
                op.invalidate();
                invalidated += 1;
            }
        }
        self.invalid += invalidated;
        invalidated
    }

    fn maybe_compact(&mut self) {
        if let Some(threshold) = self.config.compact_after {
            if self.invalid > 0 && self.invalid >= threshold {
                self.compact();
            }
        }
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    /// Partition the valid ledger entries into contiguous same-kind batches.
    ///
    /// A new batch starts whenever the kind changes, so a kind that recurs
    /// after an interruption gets a batch of its own. An empty or fully
    /// invalidated ledger yields no batches.
    pub fn batches(&self) -> Vec<Batch> {
        let mut batches: Vec<Batch> = Vec::new();
        for op in self.iter() {
            let kind = op.kind();
            match batches.last_mut() {
                Some(current) if current.kind() == kind => {
                    current.schedule(op.subject(), op.args().clone());
                }
                _ => {
                    let mut batch = Batch::new(kind);
                    batch.schedule(op.subject(), op.args().clone());
                    batches.push(batch);
                }
            }
        }
        debug!(
            batches = batches.len(),
            operations = self.pending(),
            "ledger partitioned"
        );
        batches
    }

    /// Collect `subject -> args` for every valid entry.
    ///
    /// `kind` does not filter the result: every valid operation is included,
    /// whatever its kind. Use [`schedule_for`](Self::schedule_for) for a
    /// per-kind view. Later entries for a subject overwrite earlier ones.
    pub fn schedule(&self, _kind: OperationKind) -> Schedule {
        self.collect_schedule(|_| true)
    }

    /// Collect `subject -> args` for valid entries of `kind` only.
    pub fn schedule_for(&self, kind: OperationKind) -> Schedule {
        self.collect_schedule(|op| op.kind() == kind)
    }

    fn collect_schedule(&self, keep: impl Fn(&Operation) -> bool) -> Schedule {
        let mut schedule = Schedule::new();
        for op in self.iter().filter(|op| keep(*op)) {
            schedule.insert(op.subject(), op.args().clone());
        }
        schedule
    }

    /// `true` if a valid entry matches both `kind` and `subject`.
    pub fn is_queued(&self, kind: OperationKind, subject: SubjectId) -> bool {
        self.iter().any(|op| op.matches(kind, subject))
    }
}
