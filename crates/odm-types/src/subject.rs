use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// Stable identity of a tracked document within one unit of work.
///
/// A `SubjectId` is assigned by the caller when it starts tracking a
/// document and stays fixed for the lifetime of that unit of work. It is an
/// explicit token, never a memory address, so two ids compare equal exactly
/// when the caller handed out the same value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(u64);

impl SubjectId {
    /// Wrap a raw identity token.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Create a random id for tests and demos.
    pub fn ephemeral() -> Self {
        Self(rand::random())
    }

    /// The raw token.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for SubjectId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for SubjectId {
    type Err = TypeError;

    fn from_str(s: &str) -> TypeResult<Self> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| TypeError::InvalidSubjectId(format!("{s:?}: {e}")))
    }
}

impl fmt::Debug for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubjectId({})", self.0)
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
