use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueueError;

/// Kind of structural change an operation applies to the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Relocate an existing node (and its subtree) to a new path.
    Move,
    /// Create a node for a newly persisted document.
    Insert,
    /// Delete a node (and its subtree).
    Remove,
}

impl OperationKind {
    /// Every kind, in declaration order.
    pub const ALL: [OperationKind; 3] = [Self::Move, Self::Insert, Self::Remove];

    /// Lowercase name, as used in serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Insert => "insert",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QueueError::InvalidKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!("move".parse::<OperationKind>().unwrap(), OperationKind::Move);
        assert_eq!("Insert".parse::<OperationKind>().unwrap(), OperationKind::Insert);
        assert_eq!("REMOVE".parse::<OperationKind>().unwrap(), OperationKind::Remove);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "reorder".parse::<OperationKind>().unwrap_err();
        assert_eq!(err, QueueError::InvalidKind("reorder".into()));
        assert!("".parse::<OperationKind>().is_err());
    }

    #[test]
    fn display_matches_as_str() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
            assert_eq!(kind.as_str().parse::<OperationKind>().unwrap(), kind);
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&OperationKind::Insert).unwrap();
        assert_eq!(json, "\"insert\"");
    }
}
