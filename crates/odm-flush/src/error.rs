use odm_queue::OperationKind;
use odm_tree::TreeError;
use odm_types::SubjectId;

/// Errors produced while applying batches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlushError {
    /// A batch entry carries arguments of another kind than its batch.
    #[error("{kind} batch holds {actual} arguments for subject {subject}")]
    ArgsMismatch {
        kind: OperationKind,
        actual: OperationKind,
        subject: SubjectId,
    },

    /// The node store rejected one entry of a batch.
    #[error("{kind} of subject {subject} failed: {source}")]
    Apply {
        kind: OperationKind,
        subject: SubjectId,
        #[source]
        source: TreeError,
    },

    /// A flush stopped at the batch with the given index.
    #[error("flush aborted at batch {index} after {applied} applied batches: {source}")]
    Aborted {
        index: usize,
        applied: usize,
        #[source]
        source: Box<FlushError>,
    },
}

/// Result alias for flush operations.
pub type FlushResult<T> = Result<T, FlushError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn aborted_chains_down_to_the_store_error() {
        let subject = SubjectId::new(4);
        let err = FlushError::Aborted {
            index: 2,
            applied: 2,
            source: Box::new(FlushError::Apply {
                kind: OperationKind::Remove,
                subject,
                source: TreeError::UnknownSubject(subject),
            }),
        };

        let apply = err.source().unwrap();
        assert!(apply.to_string().starts_with("remove of subject 4 failed"));
        let store = apply.source().unwrap();
        assert_eq!(store.to_string(), TreeError::UnknownSubject(subject).to_string());
        assert!(store.source().is_none());
    }
}
