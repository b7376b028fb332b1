use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use odm_types::{NodePath, SubjectId};
use tracing::debug;

use crate::error::{TreeError, TreeResult};
use crate::node::Node;
use crate::traits::NodeStore;

/// In-memory, `BTreeMap`-based node store.
///
/// Intended for tests and embedding. The tree lives behind a single
/// `RwLock`; every mutation validates first and only then edits, so a
/// rejected call leaves the tree as it was.
pub struct InMemoryNodeStore {
    inner: RwLock<TreeState>,
}

#[derive(Default)]
struct TreeState {
    nodes: BTreeMap<NodePath, SubjectId>,
    paths: HashMap<SubjectId, NodePath>,
}

impl TreeState {
    fn parent_exists(&self, path: &NodePath) -> bool {
        match path.parent() {
            Some(parent) => parent.is_root() || self.nodes.contains_key(&parent),
            None => false,
        }
    }

    fn subtree(&self, base: &NodePath) -> Vec<(NodePath, SubjectId)> {
        self.nodes
            .iter()
            .filter(|(path, _)| path.starts_with(base))
            .map(|(path, subject)| (path.clone(), *subject))
            .collect()
    }
}

impl InMemoryNodeStore {
    /// Create a store holding only the root node.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TreeState::default()),
        }
    }

    /// Number of nodes, not counting the root.
    pub fn len(&self) -> TreeResult<usize> {
        Ok(self.read()?.nodes.len())
    }

    /// Returns `true` if only the root exists.
    pub fn is_empty(&self) -> TreeResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Remove every node below the root.
    pub fn clear(&self) -> TreeResult<()> {
        let mut state = self.write()?;
        state.nodes.clear();
        state.paths.clear();
        Ok(())
    }

    /// All nodes sorted by path.
    pub fn nodes(&self) -> TreeResult<Vec<Node>> {
        let state = self.read()?;
        Ok(state
            .nodes
            .iter()
            .map(|(path, subject)| Node::new(path.clone(), *subject))
            .collect())
    }

    fn read(&self) -> TreeResult<RwLockReadGuard<'_, TreeState>> {
        self.inner
            .read()
            .map_err(|e| TreeError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> TreeResult<RwLockWriteGuard<'_, TreeState>> {
        self.inner
            .write()
            .map_err(|e| TreeError::LockPoisoned(e.to_string()))
    }
}

impl Default for InMemoryNodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore for InMemoryNodeStore {
    fn insert(&self, subject: SubjectId, path: &NodePath) -> TreeResult<()> {
        if path.is_root() {
            return Err(TreeError::RootImmutable);
        }
        let mut state = self.write()?;
        if let Some(existing) = state.paths.get(&subject) {
            return Err(TreeError::SubjectExists {
                subject,
                path: existing.clone(),
            });
        }
        if state.nodes.contains_key(path) {
            return Err(TreeError::PathOccupied(path.clone()));
        }
        if !state.parent_exists(path) {
            return Err(TreeError::MissingParent(path.clone()));
        }

        state.nodes.insert(path.clone(), subject);
        state.paths.insert(subject, path.clone());
        debug!(%subject, %path, "node inserted");
        Ok(())
    }

    fn move_to(&self, subject: SubjectId, target: &NodePath) -> TreeResult<NodePath> {
        if target.is_root() {
            return Err(TreeError::RootImmutable);
        }
        let mut state = self.write()?;
        let from = state
            .paths
            .get(&subject)
            .cloned()
            .ok_or(TreeError::UnknownSubject(subject))?;

        if &from == target {
            return Ok(from);
        }
        if from.is_ancestor_of(target) {
            return Err(TreeError::MoveIntoSelf {
                from,
                to: target.clone(),
            });
        }
        if state.nodes.contains_key(target) {
            return Err(TreeError::PathOccupied(target.clone()));
        }
        if !state.parent_exists(target) {
            return Err(TreeError::MissingParent(target.clone()));
        }

        let subtree = state.subtree(&from);
        for (path, _) in &subtree {
            state.nodes.remove(path);
        }
        for (path, moved) in &subtree {
            // Every subtree path starts with `from`, so rebasing cannot fail.
            if let Some(rebased) = path.rebase(&from, target) {
                state.nodes.insert(rebased.clone(), *moved);
                state.paths.insert(*moved, rebased);
            }
        }
        debug!(%subject, %from, to = %target, nodes = subtree.len(), "subtree moved");
        Ok(from)
    }

    fn remove(&self, subject: SubjectId) -> TreeResult<Vec<Node>> {
        let mut state = self.write()?;
        let base = state
            .paths
            .get(&subject)
            .cloned()
            .ok_or(TreeError::UnknownSubject(subject))?;

        let subtree = state.subtree(&base);
        for (path, removed) in &subtree {
            state.nodes.remove(path);
            state.paths.remove(removed);
        }
        debug!(%subject, path = %base, nodes = subtree.len(), "subtree removed");
        Ok(subtree
            .into_iter()
            .map(|(path, subject)| Node::new(path, subject))
            .collect())
    }

    fn path_of(&self, subject: SubjectId) -> TreeResult<Option<NodePath>> {
        Ok(self.read()?.paths.get(&subject).cloned())
    }

    fn node_at(&self, path: &NodePath) -> TreeResult<Option<Node>> {
        let state = self.read()?;
        Ok(state
            .nodes
            .get(path)
            .map(|subject| Node::new(path.clone(), *subject)))
    }

    fn children(&self, path: &NodePath) -> TreeResult<Vec<Node>> {
        let state = self.read()?;
        Ok(state
            .nodes
            .iter()
            .filter(|(child, _)| child.parent().as_ref() == Some(path))
            .map(|(child, subject)| Node::new(child.clone(), *subject))
            .collect())
    }
}

impl std::fmt::Debug for InMemoryNodeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryNodeStore")
            .field("node_count", &self.len().ok())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> NodePath {
        NodePath::parse(s).unwrap()
    }

    fn id(raw: u64) -> SubjectId {
        SubjectId::new(raw)
    }

    /// `/cms` (1) with `/cms/pages` (2) and `/cms/pages/home` (3).
    fn seeded() -> InMemoryNodeStore {
        let store = InMemoryNodeStore::new();
        store.insert(id(1), &p("/cms")).unwrap();
        store.insert(id(2), &p("/cms/pages")).unwrap();
        store.insert(id(3), &p("/cms/pages/home")).unwrap();
        store
    }

    // -----------------------------------------------------------------------
    // Insert
    // -----------------------------------------------------------------------

    #[test]
    fn insert_and_lookup() {
        let store = seeded();
        assert_eq!(store.len().unwrap(), 3);
        assert_eq!(store.path_of(id(3)).unwrap(), Some(p("/cms/pages/home")));
        assert_eq!(
            store.node_at(&p("/cms")).unwrap(),
            Some(Node::new(p("/cms"), id(1)))
        );
        assert!(store.exists(&NodePath::root()).unwrap());
        assert!(store.contains(id(2)).unwrap());
        assert!(!store.contains(id(9)).unwrap());
    }

    #[test]
    fn insert_requires_parent() {
        let store = InMemoryNodeStore::new();
        let err = store.insert(id(1), &p("/a/b")).unwrap_err();
        assert_eq!(err, TreeError::MissingParent(p("/a/b")));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn insert_rejects_occupied_path_and_known_subject() {
        let store = seeded();
        assert_eq!(
            store.insert(id(9), &p("/cms")).unwrap_err(),
            TreeError::PathOccupied(p("/cms"))
        );
        assert_eq!(
            store.insert(id(1), &p("/other")).unwrap_err(),
            TreeError::SubjectExists {
                subject: id(1),
                path: p("/cms"),
            }
        );
    }

    #[test]
    fn root_cannot_be_bound_or_moved() {
        let store = seeded();
        assert_eq!(
            store.insert(id(9), &NodePath::root()).unwrap_err(),
            TreeError::RootImmutable
        );
        assert_eq!(
            store.move_to(id(1), &NodePath::root()).unwrap_err(),
            TreeError::RootImmutable
        );
    }

    // -----------------------------------------------------------------------
    // Move
    // -----------------------------------------------------------------------

    #[test]
    fn move_carries_subtree() {
        let store = seeded();
        store.insert(id(4), &p("/archive")).unwrap();

        let old = store.move_to(id(2), &p("/archive/pages")).unwrap();
        assert_eq!(old, p("/cms/pages"));
        assert_eq!(store.path_of(id(2)).unwrap(), Some(p("/archive/pages")));
        assert_eq!(
            store.path_of(id(3)).unwrap(),
            Some(p("/archive/pages/home"))
        );
        assert!(!store.exists(&p("/cms/pages")).unwrap());
        assert!(store.exists(&p("/cms")).unwrap());
        assert_eq!(store.len().unwrap(), 4);
    }

    #[test]
    fn move_can_rename_in_place() {
        let store = seeded();
        store.move_to(id(3), &p("/cms/pages/start")).unwrap();
        assert_eq!(store.path_of(id(3)).unwrap(), Some(p("/cms/pages/start")));
    }

    #[test]
    fn move_to_current_path_is_noop() {
        let store = seeded();
        assert_eq!(store.move_to(id(2), &p("/cms/pages")).unwrap(), p("/cms/pages"));
        assert_eq!(store.len().unwrap(), 3);
    }

    #[test]
    fn move_into_own_subtree_is_rejected() {
        let store = seeded();
        let err = store.move_to(id(1), &p("/cms/pages/home/cms")).unwrap_err();
        assert!(matches!(err, TreeError::MoveIntoSelf { .. }));
        assert_eq!(store.path_of(id(1)).unwrap(), Some(p("/cms")));
    }

    #[test]
    fn move_rejections_leave_tree_untouched() {
        let store = seeded();
        assert_eq!(
            store.move_to(id(3), &p("/cms")).unwrap_err(),
            TreeError::PathOccupied(p("/cms"))
        );
        assert_eq!(
            store.move_to(id(3), &p("/nowhere/home")).unwrap_err(),
            TreeError::MissingParent(p("/nowhere/home"))
        );
        assert_eq!(
            store.move_to(id(9), &p("/x")).unwrap_err(),
            TreeError::UnknownSubject(id(9))
        );
        assert_eq!(store.path_of(id(3)).unwrap(), Some(p("/cms/pages/home")));
    }

    // -----------------------------------------------------------------------
    // Remove / children
    // -----------------------------------------------------------------------

    #[test]
    fn remove_drops_subtree_own_node_first() {
        let store = seeded();
        let removed = store.remove(id(2)).unwrap();
        assert_eq!(
            removed,
            vec![
                Node::new(p("/cms/pages"), id(2)),
                Node::new(p("/cms/pages/home"), id(3)),
            ]
        );
        assert_eq!(store.len().unwrap(), 1);
        assert!(!store.contains(id(3)).unwrap());
        assert_eq!(
            store.remove(id(2)).unwrap_err(),
            TreeError::UnknownSubject(id(2))
        );
    }

    #[test]
    fn removal_respects_segment_boundaries() {
        let store = seeded();
        store.insert(id(5), &p("/cms/pages-old")).unwrap();
        store.remove(id(2)).unwrap();
        assert!(store.contains(id(5)).unwrap());
    }

    #[test]
    fn children_lists_direct_descendants() {
        let store = seeded();
        store.insert(id(4), &p("/cms/assets")).unwrap();

        let names: Vec<String> = store
            .children(&p("/cms"))
            .unwrap()
            .iter()
            .map(|n| n.name().to_string())
            .collect();
        assert_eq!(names, vec!["assets", "pages"]);
        assert_eq!(store.children(&NodePath::root()).unwrap().len(), 1);
    }

    #[test]
    fn poisoned_lock_is_reported_not_hidden() {
        let store = std::sync::Arc::new(seeded());
        let writer = std::sync::Arc::clone(&store);
        let joined = std::thread::spawn(move || {
            let _guard = writer.inner.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(joined.is_err());

        assert!(matches!(store.len(), Err(TreeError::LockPoisoned(_))));
        assert!(matches!(store.is_empty(), Err(TreeError::LockPoisoned(_))));
        assert!(matches!(
            store.path_of(id(1)),
            Err(TreeError::LockPoisoned(_))
        ));
        assert_eq!(
            format!("{store:?}"),
            "InMemoryNodeStore { node_count: None }"
        );
    }

    #[test]
    fn clear_keeps_only_root() {
        let store = seeded();
        store.clear().unwrap();
        assert!(store.is_empty().unwrap());
        assert!(store.exists(&NodePath::root()).unwrap());
        assert!(store.nodes().unwrap().is_empty());
    }
}
