// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attach-target detection for dragged nodes.
//!
//! While a node is dragged, every pointer move asks: is the pointer close
//! enough to a placed node that releasing here should attach to it? Each
//! candidate exposes an *attach box* — its own bounds padded horizontally by
//! the snap pad and extended downward, biasing detection toward the space
//! just under the node where a child would land.
//!
//! Candidates are scanned in store order and the first match wins; there is
//! deliberately no spatial index. Placed positions move on every frame of a
//! drag (the whole tree can shift), so an index would be rebuilt per move
//! anyway; a linear scan over at most a few hundred nodes is the simpler
//! contract and keeps the first-match ordering explicit.
//!
//! The crate also computes the anchor point for the host's insertion
//! indicator ([`indicator_anchor`]), so the renderer-side affordance needs no
//! geometry of its own.

#![no_std]

extern crate alloc;

use espalier_store::{Node, NodeId, NodeStore};
use kurbo::{Point, Rect};

/// The attach box of a candidate node.
///
/// Horizontal extent is the node's own width padded by `pad_x` on both
/// sides. Vertical extent runs from the node's top edge down to one node
/// height past its center, so the hot zone hangs below the node where a
/// child row would appear. All boundaries are inclusive.
pub fn attach_box(node: &Node, pad_x: f64) -> Rect {
    Rect::new(
        node.left() - pad_x,
        node.top(),
        node.pos.x + node.width / 2.0 + pad_x,
        node.pos.y + node.height,
    )
}

/// Find the node a point should attach to, if any.
///
/// Scans placed nodes in store order and returns the first whose attach box
/// contains `point` (inclusive boundaries). Returns `None` on no match or an
/// empty store. O(n) per call by design; see the crate docs.
pub fn find_attach_target(store: &NodeStore, point: Point, pad_x: f64) -> Option<NodeId> {
    store
        .iter()
        .find(|(_, node)| {
            let b = attach_box(node, pad_x);
            point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
        })
        .map(|(id, _)| id)
}

/// Anchor for the insertion indicator on an attach target.
///
/// The indicator sits at the target's lower edge, offset from its top-left
/// corner by `(width / 2 - 5, height)`.
pub fn indicator_anchor(node: &Node) -> Point {
    Point::new(node.pos.x - 5.0, node.bottom())
}
