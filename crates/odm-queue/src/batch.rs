//! Same-kind groups of operations handed to the flush step.

use std::collections::HashMap;

use odm_types::SubjectId;
use serde::{Serialize, Serializer};

use crate::kind::OperationKind;
use crate::operation::OperationArgs;

/// Insertion-ordered mapping from subject to operation arguments.
///
/// A subject keeps the position at which it was first scheduled; scheduling
/// it again replaces its arguments in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    entries: Vec<(SubjectId, OperationArgs)>,
    positions: HashMap<SubjectId, usize>,
}

impl Schedule {
    /// An empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the arguments for `subject`.
    pub fn insert(&mut self, subject: SubjectId, args: OperationArgs) {
        match self.positions.get(&subject) {
            Some(&idx) => self.entries[idx].1 = args,
            None => {
                self.positions.insert(subject, self.entries.len());
                self.entries.push((subject, args));
            }
        }
    }

    /// Arguments currently scheduled for `subject`.
    pub fn get(&self, subject: &SubjectId) -> Option<&OperationArgs> {
        self.positions.get(subject).map(|&idx| &self.entries[idx].1)
    }

    /// Returns `true` if `subject` has an entry.
    pub fn contains(&self, subject: &SubjectId) -> bool {
        self.positions.contains_key(subject)
    }

    /// Number of distinct subjects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in scheduling order.
    pub fn iter(&self) -> impl Iterator<Item = (&SubjectId, &OperationArgs)> {
        self.entries.iter().map(|(subject, args)| (subject, args))
    }

    /// Subjects in scheduling order.
    pub fn subjects(&self) -> impl Iterator<Item = SubjectId> + '_ {
        self.entries.iter().map(|(subject, _)| *subject)
    }

    /// Consume the schedule, yielding its entries in scheduling order.
    pub fn into_entries(self) -> Vec<(SubjectId, OperationArgs)> {
        self.entries
    }
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// A contiguous run of same-kind operations, keyed by subject.
///
/// Batches are derived views produced by
/// [`OperationQueue::batches`](crate::OperationQueue::batches). They are not
/// retained by the queue and go stale once the queue is mutated again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Batch {
    kind: OperationKind,
    schedule: Schedule,
}

impl Batch {
    /// An empty batch of the given kind.
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            schedule: Schedule::new(),
        }
    }

    /// The kind shared by every operation in the run.
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Record `args` for `subject`. The batch does not inspect the arguments.
    pub fn schedule(&mut self, subject: SubjectId, args: OperationArgs) {
        self.schedule.insert(subject, args);
    }

    /// Snapshot of the scheduled entries.
    pub fn entries(&self) -> &Schedule {
        &self.schedule
    }

    /// Arguments scheduled for `subject` in this batch.
    pub fn get(&self, subject: &SubjectId) -> Option<&OperationArgs> {
        self.schedule.get(subject)
    }

    /// Number of distinct subjects in the batch.
    pub fn len(&self) -> usize {
        self.schedule.len()
    }

    /// Returns `true` if the batch holds no entries.
    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }

    /// Entries in scheduling order.
    pub fn iter(&self) -> impl Iterator<Item = (&SubjectId, &OperationArgs)> {
        self.schedule.iter()
    }

    /// Consume the batch, keeping only its schedule.
    pub fn into_schedule(self) -> Schedule {
        self.schedule
    }
}
