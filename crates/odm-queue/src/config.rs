use serde::{Deserialize, Serialize};

use crate::error::{QueueError, QueueResult};

/// Configuration for an [`OperationQueue`](crate::OperationQueue).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueConfig {
    /// Compact the ledger after an invalidation once at least this many
    /// invalidated entries have accumulated. `None` never compacts
    /// automatically; the ledger then only shrinks on `clear` or an
    /// explicit `compact`.
    pub compact_after: Option<usize>,
}

impl QueueConfig {
    /// Parse a config from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> QueueResult<Self> {
        toml::from_str(source).map_err(|e| QueueError::Config(e.to_string()))
    }

    /// A config that compacts once `threshold` entries are invalid.
    pub fn compacting(threshold: usize) -> Self {
        Self {
            compact_after: Some(threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_never_compacts() {
        assert_eq!(QueueConfig::default().compact_after, None);
    }

    #[test]
    fn parse_toml() {
        let config = QueueConfig::from_toml_str("compact_after = 64").unwrap();
        assert_eq!(config, QueueConfig::compacting(64));
    }

    #[test]
    fn empty_toml_is_default() {
        let config = QueueConfig::from_toml_str("").unwrap();
        assert_eq!(config, QueueConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = QueueConfig::from_toml_str("compact_every = 3").unwrap_err();
        assert!(matches!(err, QueueError::Config(_)));
    }
}
