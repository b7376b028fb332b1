//! Absolute node paths in the content tree.
//!
//! Valid paths:
//! - Must be absolute (start with `/`); `/` alone is the root
//! - Must not end with `/` (except the root)
//! - Segments between slashes must be non-empty and not `.` or `..`
//! - Segments must not contain `[`, `]`, `*`, `|` or line/tab characters
//!
//! Namespaced names such as `jcr:content` are accepted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// Characters that are forbidden anywhere in a path segment.
const FORBIDDEN_CHARS: &[char] = &['[', ']', '*', '|', '\t', '\n', '\r'];

/// Validated absolute path of a node.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodePath(String);

impl NodePath {
    /// The root path `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Parse and validate an absolute path.
    ///
    /// # Examples
    ///
    /// ```
    /// use odm_types::NodePath;
    ///
    /// assert!(NodePath::parse("/cms/pages/home").is_ok());
    /// assert!(NodePath::parse("relative").is_err());
    /// assert!(NodePath::parse("/cms//pages").is_err());
    /// ```
    pub fn parse(path: &str) -> TypeResult<Self> {
        if path.is_empty() {
            return Err(invalid(path, "path must not be empty"));
        }
        if !path.starts_with('/') {
            return Err(invalid(path, "path must be absolute"));
        }
        if path == "/" {
            return Ok(Self::root());
        }
        if path.ends_with('/') {
            return Err(invalid(path, "must not end with '/'"));
        }
        for segment in path[1..].split('/') {
            validate_segment(path, segment)?;
        }
        Ok(Self(path.to_string()))
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for `/`.
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Number of segments; the root has depth 0.
    pub fn depth(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.0.matches('/').count()
        }
    }

    /// The parent path, or `None` for the root.
    pub fn parent(&self) -> Option<NodePath> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// The last segment, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.0.rfind('/').map(|idx| &self.0[idx + 1..])
    }

    /// Append a single segment.
    pub fn child(&self, name: &str) -> TypeResult<NodePath> {
        let joined = if self.is_root() {
            format!("/{name}")
        } else {
            format!("{}/{name}", self.0)
        };
        validate_segment(&joined, name)?;
        Ok(Self(joined))
    }

    /// Iterate over the segments from the root down.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// `true` if `self` equals `base` or lies beneath it.
    pub fn starts_with(&self, base: &NodePath) -> bool {
        if base.is_root() || self.0 == base.0 {
            return true;
        }
        self.0.len() > base.0.len()
            && self.0.starts_with(base.0.as_str())
            && self.0.as_bytes()[base.0.len()] == b'/'
    }

    /// `true` if `other` lies strictly beneath `self`.
    pub fn is_ancestor_of(&self, other: &NodePath) -> bool {
        self != other && other.starts_with(self)
    }

    /// Re-anchor `self` from the subtree at `from` to the subtree at `to`.
    ///
    /// Returns `None` when `self` is not inside `from`.
    pub fn rebase(&self, from: &NodePath, to: &NodePath) -> Option<NodePath> {
        if !self.starts_with(from) {
            return None;
        }
        let suffix = if from.is_root() {
            if self.is_root() {
                ""
            } else {
                self.0.as_str()
            }
        } else {
            &self.0[from.0.len()..]
        };
        let rebased = match (to.is_root(), suffix.is_empty()) {
            (true, true) => "/".to_string(),
            (true, false) => suffix.to_string(),
            (false, _) => format!("{}{suffix}", to.0),
        };
        Some(Self(rebased))
    }
}

fn validate_segment(path: &str, segment: &str) -> TypeResult<()> {
    if segment.is_empty() {
        return Err(invalid(path, "path segments must not be empty"));
    }
    if segment == "." || segment == ".." {
        return Err(invalid(path, "'.' and '..' segments are not allowed"));
    }
    if segment.contains('/') {
        return Err(invalid(path, "segment must not contain '/'"));
    }
    if let Some(ch) = segment.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(invalid(
            path,
            &format!("contains forbidden character: {ch:?}"),
        ));
    }
    Ok(())
}

fn invalid(path: &str, reason: &str) -> TypeError {
    TypeError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

impl TryFrom<String> for NodePath {
    type Error = TypeError;

    fn try_from(value: String) -> TypeResult<Self> {
        Self::parse(&value)
    }
}

impl From<NodePath> for String {
    fn from(path: NodePath) -> Self {
        path.0
    }
}

impl std::str::FromStr for NodePath {
    type Err = TypeError;

    fn from_str(s: &str) -> TypeResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Debug for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodePath({})", self.0)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
