// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transient holding area for a subtree while it is being dragged.

use alloc::vec::Vec;

use crate::types::{Node, NodeId};

/// A detached subtree in flight between two positions in the tree.
///
/// Produced by [`NodeStore::detach_subtree`] and consumed by
/// [`NodeStore::reattach_subtree`] (or dropped, which deletes the subtree).
/// The detached root is the first entry; the rest follow in breadth-first
/// layer order, so sibling order is preserved across a reattach.
///
/// [`NodeStore::detach_subtree`]: crate::NodeStore::detach_subtree
/// [`NodeStore::reattach_subtree`]: crate::NodeStore::reattach_subtree
#[derive(Clone, Debug, Default)]
pub struct StagingSet {
    entries: Vec<(NodeId, Node)>,
}

impl StagingSet {
    /// Number of staged nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The detached root of the staged subtree.
    pub fn root(&self) -> Option<(NodeId, &Node)> {
        self.entries.first().map(|(id, n)| (*id, n))
    }

    /// Mutable access to the detached root, e.g. to follow the pointer
    /// during a drag.
    pub fn root_mut(&mut self) -> Option<(NodeId, &mut Node)> {
        self.entries.first_mut().map(|(id, n)| (*id, n))
    }

    /// Whether `id` is staged here.
    pub fn contains(&self, id: NodeId) -> bool {
        self.entries.iter().any(|(e, _)| *e == id)
    }

    /// Iterate staged `(id, node)` pairs, detached root first.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.entries.iter().map(|(id, n)| (*id, n))
    }

    pub(crate) fn push(&mut self, id: NodeId, node: Node) {
        self.entries.push((id, node));
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (NodeId, Node)> + '_ {
        self.entries.drain(..)
    }
}
