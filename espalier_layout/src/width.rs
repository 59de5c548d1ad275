// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bottom-up maintenance of the cached subtree widths.

use espalier_store::{FlowConfig, NodeId, NodeStore};

/// Recompute one node's cached subtree width from its direct children.
///
/// A childless node caches 0, not its own width — a single-child parent
/// reserves just that child's own width, while a grandparent reserves the
/// larger of the child's width and the child's subtree width.
fn recompute_one(store: &mut NodeStore, id: NodeId, config: &FlowConfig) {
    let children = store.children_of(id);
    let width = if children.is_empty() {
        0.0
    } else {
        let packed: f64 = children
            .iter()
            .map(|c| store.get(*c).map_or(0.0, |n| n.effective_width()))
            .sum();
        #[allow(clippy::cast_precision_loss, reason = "child counts are small")]
        let gaps = (children.len() - 1) as f64 * config.horizontal_spacing;
        packed + gaps
    };
    if let Some(node) = store.get_mut(id) {
        node.subtree_width = width;
    }
}

/// Recompute cached subtree widths along the ancestor chain of `from`,
/// bottom-up from `from` to its root.
///
/// This is the incremental path run after every attach, detach, or reattach:
/// a node's width depends only on its direct children, so only the chain
/// from the change site upward can have changed. Idempotent when the
/// structure is unchanged.
pub fn recompute_chain(store: &mut NodeStore, from: NodeId, config: &FlowConfig) {
    for id in store.ancestor_chain(from) {
        recompute_one(store, id, config);
    }
}

/// Recompute every cached subtree width from scratch, bottom-up.
///
/// Used after an import, where the cached `childwidth` values are untrusted.
/// Nodes unreachable from a root-like node (only possible with corrupted
/// parent links) are left as imported.
pub fn recompute_all(store: &mut NodeStore, config: &FlowConfig) {
    for top in store.root_like_ids() {
        recompute_subtree(store, top, config);
    }
}

fn recompute_subtree(store: &mut NodeStore, id: NodeId, config: &FlowConfig) {
    for child in store.children_of(id) {
        recompute_subtree(store, child, config);
    }
    recompute_one(store, id, config);
}
