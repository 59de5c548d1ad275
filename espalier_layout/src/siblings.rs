// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-down positioning of children: centered, packed, one row per depth.

use espalier_store::{FlowConfig, NodeId, NodeStore};

/// Reposition the children of `parent`, then recurse through every
/// descendant layer.
///
/// Children are packed left to right in attach order, each claiming its
/// effective width (the larger of its cached subtree width and its own
/// width), separated by the horizontal spacing, with the packed run centered
/// on the parent's x. Every child lands on the row one vertical spacing
/// below the parent's bottom edge. A childless parent performs no layout.
///
/// Cached subtree widths must be current (see
/// [`recompute_chain`](crate::recompute_chain)) before calling this.
pub fn layout_children(store: &mut NodeStore, parent: NodeId, config: &FlowConfig) {
    let children = store.children_of(parent);
    if children.is_empty() {
        return;
    }
    let Some(parent_node) = store.get(parent) else {
        return;
    };
    let parent_x = parent_node.pos.x;
    let row_y = parent_node.bottom() + config.vertical_spacing;

    let packed: f64 = children
        .iter()
        .map(|c| store.get(*c).map_or(0.0, |n| n.effective_width()))
        .sum();
    #[allow(clippy::cast_precision_loss, reason = "child counts are small")]
    let total = packed + (children.len() - 1) as f64 * config.horizontal_spacing;

    let mut cursor = parent_x - total / 2.0;
    for &child in &children {
        let Some(node) = store.get_mut(child) else {
            continue;
        };
        let eff = node.effective_width();
        node.pos.x = cursor + eff / 2.0;
        node.pos.y = row_y;
        cursor += eff + config.horizontal_spacing;
    }

    for child in children {
        layout_children(store, child, config);
    }
}
