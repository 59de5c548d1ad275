// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the store: node identifiers, node data, and engine configuration.

use kurbo::Point;

/// Identifier for a placed node.
///
/// Ids are assigned monotonically from 0 by [`NodeStore::attach_new`] and are
/// reset only when the store is fully cleared. They are *not* generational:
/// an id freed by a detach is never reused until a [`NodeStore::clear`].
///
/// [`NodeStore::attach_new`]: crate::NodeStore::attach_new
/// [`NodeStore::clear`]: crate::NodeStore::clear
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw integer value, as it appears in export records.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// A placed diagram node.
///
/// Positions are center coordinates in canvas space. `subtree_width` is the
/// cached horizontal footprint reserved for this node's descendants: 0 for a
/// leaf, and the packed sum of child effective widths for an internal node.
/// It is maintained by the layout crate, not by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Parent link; `None` for the root.
    pub parent: Option<NodeId>,
    /// Center position in canvas coordinates.
    pub pos: Point,
    /// Node width. Positive.
    pub width: f64,
    /// Node height. Positive.
    pub height: f64,
    /// Cached descendant footprint. 0 for leaves.
    pub subtree_width: f64,
}

impl Node {
    /// Create a node with the given parent, dimensions, and center position.
    ///
    /// `subtree_width` starts at 0 (a freshly placed node is a leaf).
    pub const fn new(parent: Option<NodeId>, width: f64, height: f64, pos: Point) -> Self {
        Self {
            parent,
            pos,
            width,
            height,
            subtree_width: 0.0,
        }
    }

    /// X coordinate of the left edge.
    pub fn left(&self) -> f64 {
        self.pos.x - self.width / 2.0
    }

    /// Y coordinate of the top edge.
    pub fn top(&self) -> f64 {
        self.pos.y - self.height / 2.0
    }

    /// Y coordinate of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.pos.y + self.height / 2.0
    }

    /// The horizontal footprint this node occupies among its siblings:
    /// the larger of its own width and its cached subtree width.
    pub fn effective_width(&self) -> f64 {
        self.subtree_width.max(self.width)
    }
}

/// Spacing configuration shared by snapping, layout, and connector routing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowConfig {
    /// Horizontal gap between packed siblings. Also the horizontal snap pad
    /// and the left-boundary margin.
    pub horizontal_spacing: f64,
    /// Vertical gap between a parent's bottom edge and its children's row.
    pub vertical_spacing: f64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 20.0,
            vertical_spacing: 80.0,
        }
    }
}
