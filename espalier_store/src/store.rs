// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core store implementation: arena, attach order, and the detach/reattach protocol.

use alloc::vec::Vec;
use hashbrown::HashMap;
use kurbo::Point;
use smallvec::SmallVec;
use thiserror::Error;

use crate::staging::StagingSet;
use crate::types::{Node, NodeId};

/// Structural failures rejected before any mutation takes place.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum StructureError {
    /// The referenced parent id is not present in the store.
    #[error("parent node {0:?} does not exist in the store")]
    MissingParent(NodeId),
    /// A root node already exists; a tree has at most one.
    #[error("the store already contains a root node")]
    RootAlreadyExists,
}

/// Authoritative collection of placed nodes.
///
/// An id-indexed arena (`hashbrown::HashMap`) paired with an ordered id list.
/// The list preserves attach order, which both snap detection (first match
/// wins) and sibling layout (children never reordered) depend on.
#[derive(Clone, Debug, Default)]
pub struct NodeStore {
    nodes: HashMap<NodeId, Node>,
    order: Vec<NodeId>,
    next_id: u32,
}

impl NodeStore {
    /// Create an empty store. The first allocated id will be 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placed nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `id` refers to a placed node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Look up a node. Returns `None` for stale or staged ids.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Look up a node mutably. Returns `None` for stale or staged ids.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Ids in attach order.
    pub fn ids(&self) -> &[NodeId] {
        &self.order
    }

    /// Iterate `(id, node)` pairs in attach order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.order.iter().map(|id| (*id, &self.nodes[id]))
    }

    /// The root node's id, if one is placed.
    pub fn root(&self) -> Option<NodeId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.nodes[id].parent.is_none())
    }

    /// Direct children of `id`, in attach order. Empty for stale ids.
    pub fn children_of(&self, id: NodeId) -> SmallVec<[NodeId; 4]> {
        self.order
            .iter()
            .copied()
            .filter(|c| self.nodes[c].parent == Some(id))
            .collect()
    }

    /// The parent of a node, or `None` for the root and stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Whether a node should be laid out as a root: it has no parent link,
    /// or its parent link dangles (tolerated after a partial import).
    pub fn is_root_like(&self, id: NodeId) -> bool {
        match self.nodes.get(&id) {
            Some(node) => match node.parent {
                None => true,
                Some(p) => !self.nodes.contains_key(&p),
            },
            None => false,
        }
    }

    /// Ids laid out as roots, in attach order. At most one for a well-formed
    /// tree; possibly several after a tolerated partial import.
    pub fn root_like_ids(&self) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.is_root_like(*id))
            .collect()
    }

    /// Walk parent links from `id` up to its root, inclusive of `id`.
    ///
    /// The walk is capped at the node count, so a corrupted parent cycle
    /// terminates instead of spinning.
    pub fn ancestor_chain(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            if !self.nodes.contains_key(&c) || chain.len() > self.order.len() {
                break;
            }
            chain.push(c);
            current = self.nodes[&c].parent;
        }
        chain
    }

    /// Allocate the next id and append a new leaf node.
    ///
    /// Used both for the very first node (`parent == None`) and for
    /// detected-target drops. Fails without mutating if the parent is
    /// missing, or if a second root would be created.
    pub fn attach_new(
        &mut self,
        parent: Option<NodeId>,
        width: f64,
        height: f64,
        pos: Point,
    ) -> Result<NodeId, StructureError> {
        match parent {
            Some(p) if !self.nodes.contains_key(&p) => {
                return Err(StructureError::MissingParent(p));
            }
            None if self.root().is_some() => {
                return Err(StructureError::RootAlreadyExists);
            }
            _ => {}
        }
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(parent, width, height, pos));
        self.order.push(id);
        Ok(id)
    }

    /// Remove `id` and every descendant, breadth-first layer by layer,
    /// returning them as a [`StagingSet`] (detached root first).
    ///
    /// Detaching a missing id is a no-op returning an empty set.
    pub fn detach_subtree(&mut self, id: NodeId) -> StagingSet {
        if !self.nodes.contains_key(&id) {
            return StagingSet::default();
        }
        let mut layer: Vec<NodeId> = Vec::new();
        layer.push(id);
        let mut collected: Vec<NodeId> = Vec::new();
        while !layer.is_empty() {
            let mut next = Vec::new();
            for &n in &layer {
                next.extend(self.children_of(n));
            }
            collected.append(&mut layer);
            layer = next;
        }
        let mut staging = StagingSet::default();
        for n in collected {
            self.order.retain(|o| *o != n);
            if let Some(node) = self.nodes.remove(&n) {
                staging.push(n, node);
            }
        }
        staging
    }

    /// Merge a staging set back into the store under `new_parent`.
    ///
    /// Only the detached root's parent link is rewritten; the internal links
    /// among the remaining staged nodes are untouched. Merged ids are
    /// appended to the attach order, so a reattached subtree becomes the new
    /// parent's last child.
    ///
    /// Reattaching to a missing parent fails before any mutation; the staged
    /// nodes are dropped with the set, which is the caller's mandated
    /// degrade-to-delete. An empty set is a no-op.
    pub fn reattach_subtree(
        &mut self,
        mut staging: StagingSet,
        new_parent: Option<NodeId>,
    ) -> Result<(), StructureError> {
        if staging.is_empty() {
            return Ok(());
        }
        match new_parent {
            Some(p) if !self.nodes.contains_key(&p) => {
                return Err(StructureError::MissingParent(p));
            }
            None if self.root().is_some() => {
                return Err(StructureError::RootAlreadyExists);
            }
            _ => {}
        }
        if let Some((_, root_node)) = staging.root_mut() {
            root_node.parent = new_parent;
        }
        for (id, node) in staging.drain() {
            self.nodes.insert(id, node);
            self.order.push(id);
        }
        Ok(())
    }

    /// Drop every node and reset the id counter to 0.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
        self.next_id = 0;
    }

    pub(crate) fn insert_raw(&mut self, id: NodeId, node: Node) {
        self.nodes.insert(id, node);
        self.order.push(id);
        self.next_id = self.next_id.max(id.0.saturating_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(store: &mut NodeStore, parent: Option<NodeId>) -> NodeId {
        store
            .attach_new(parent, 100.0, 50.0, Point::new(0.0, 0.0))
            .expect("attach should succeed")
    }

    #[test]
    fn first_node_becomes_root_with_id_zero() {
        let mut store = NodeStore::new();
        let id = store
            .attach_new(None, 100.0, 50.0, Point::new(400.0, 300.0))
            .unwrap();
        assert_eq!(id.raw(), 0);
        assert_eq!(store.len(), 1);
        let node = store.get(id).unwrap();
        assert_eq!(node.parent, None);
        assert_eq!(node.subtree_width, 0.0);
        assert_eq!(store.root(), Some(id));
    }

    #[test]
    fn second_root_is_rejected() {
        let mut store = NodeStore::new();
        let _root = place(&mut store, None);
        let err = store
            .attach_new(None, 10.0, 10.0, Point::new(0.0, 0.0))
            .unwrap_err();
        assert_eq!(err, StructureError::RootAlreadyExists);
        assert_eq!(store.len(), 1, "failed attach must not mutate");
    }

    #[test]
    fn attach_to_missing_parent_is_rejected() {
        let mut store = NodeStore::new();
        let root = place(&mut store, None);
        let staged = store.detach_subtree(root);
        let stale = staged.root().map(|(id, _)| id).unwrap();
        let err = store
            .attach_new(Some(stale), 10.0, 10.0, Point::new(0.0, 0.0))
            .unwrap_err();
        assert_eq!(err, StructureError::MissingParent(stale));
    }

    #[test]
    fn ids_are_monotonic_and_reset_on_clear() {
        let mut store = NodeStore::new();
        let a = place(&mut store, None);
        let b = place(&mut store, Some(a));
        assert_eq!((a.raw(), b.raw()), (0, 1));

        // Detaching does not recycle ids.
        let _ = store.detach_subtree(b);
        let c = place(&mut store, Some(a));
        assert_eq!(c.raw(), 2);

        store.clear();
        assert!(store.is_empty());
        let again = place(&mut store, None);
        assert_eq!(again.raw(), 0, "clear resets the id counter");
    }

    #[test]
    fn exactly_one_root_in_nonempty_store() {
        let mut store = NodeStore::new();
        let root = place(&mut store, None);
        let a = place(&mut store, Some(root));
        let _b = place(&mut store, Some(a));
        let roots = store
            .ids()
            .iter()
            .filter(|id| store.get(**id).unwrap().parent.is_none())
            .count();
        assert_eq!(roots, 1);
    }

    #[test]
    fn parent_links_terminate_within_node_count_hops() {
        let mut store = NodeStore::new();
        let mut parent = place(&mut store, None);
        for _ in 0..10 {
            parent = place(&mut store, Some(parent));
        }
        for &id in store.ids() {
            let chain = store.ancestor_chain(id);
            assert!(chain.len() <= store.len());
            let top = *chain.last().unwrap();
            assert_eq!(store.parent_of(top), None, "chain must end at the root");
        }
    }

    #[test]
    fn detach_is_breadth_first_and_complete() {
        let mut store = NodeStore::new();
        // root -> [a -> [c, d], b]
        let root = place(&mut store, None);
        let a = place(&mut store, Some(root));
        let b = place(&mut store, Some(root));
        let c = place(&mut store, Some(a));
        let d = place(&mut store, Some(a));

        let staged = store.detach_subtree(a);
        let ids: alloc::vec::Vec<NodeId> = staged.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, alloc::vec![a, c, d], "layer order: root, then children");
        assert_eq!(store.len(), 2);
        assert!(store.contains(root));
        assert!(store.contains(b));
        assert!(!store.contains(c));
    }

    #[test]
    fn detach_missing_id_is_noop() {
        let mut store = NodeStore::new();
        let root = place(&mut store, None);
        let staged = store.detach_subtree(root);
        let stale = staged.root().map(|(id, _)| id).unwrap();
        drop(staged);

        let empty = store.detach_subtree(stale);
        assert!(empty.is_empty());
    }

    #[test]
    fn reattach_preserves_internal_links() {
        let mut store = NodeStore::new();
        // root -> [a -> [c, d], b]
        let root = place(&mut store, None);
        let a = place(&mut store, Some(root));
        let b = place(&mut store, Some(root));
        let c = place(&mut store, Some(a));
        let d = place(&mut store, Some(a));

        let staged = store.detach_subtree(a);
        store.reattach_subtree(staged, Some(b)).unwrap();

        assert_eq!(store.parent_of(a), Some(b));
        assert_eq!(store.parent_of(c), Some(a), "internal link untouched");
        assert_eq!(store.parent_of(d), Some(a), "internal link untouched");
        // Reattached subtree becomes the new parent's last child.
        assert_eq!(store.children_of(b).as_slice(), &[a]);
    }

    #[test]
    fn reattach_to_missing_parent_fails_without_mutation() {
        let mut store = NodeStore::new();
        let root = place(&mut store, None);
        let a = place(&mut store, Some(root));
        let gone = store.detach_subtree(a);
        let stale_parent = gone.root().map(|(id, _)| id).unwrap();
        drop(gone);

        let child = place(&mut store, Some(root));
        let staged = store.detach_subtree(child);
        let err = store
            .reattach_subtree(staged, Some(stale_parent))
            .unwrap_err();
        assert_eq!(err, StructureError::MissingParent(stale_parent));
        assert!(
            !store.contains(child),
            "failed reattach degrades to delete: staged nodes are gone"
        );
    }

    #[test]
    fn reattach_empty_staging_is_noop() {
        let mut store = NodeStore::new();
        let root = place(&mut store, None);
        store.reattach_subtree(StagingSet::default(), Some(root)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn children_keep_attach_order() {
        let mut store = NodeStore::new();
        let root = place(&mut store, None);
        let a = place(&mut store, Some(root));
        let b = place(&mut store, Some(root));
        let c = place(&mut store, Some(root));
        assert_eq!(store.children_of(root).as_slice(), &[a, b, c]);
    }

    #[test]
    fn root_like_tolerates_dangling_parents() {
        let mut store = NodeStore::new();
        let root = place(&mut store, None);
        let a = place(&mut store, Some(root));
        let orphaned_child = place(&mut store, Some(a));

        // Surgically drop `a` as an import with a dangling parent would.
        let staged = store.detach_subtree(a);
        let (_, orphan) = staged.iter().find(|(id, _)| *id == orphaned_child).unwrap();
        store.insert_raw(orphaned_child, orphan.clone());

        assert!(store.is_root_like(root));
        assert!(store.is_root_like(orphaned_child), "dangling parent is root-like");
        assert_eq!(store.root_like_ids(), alloc::vec![root, orphaned_child]);
    }
}
