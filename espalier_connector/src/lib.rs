// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orthogonal connector routing between a child node and its parent.
//!
//! A connector leaves the parent's bottom-center, descends half of the
//! vertical spacing, turns horizontally toward an anchor just inside the
//! child's top edge, and descends to it, ending in a small downward
//! arrowhead. The anchor inset depends on the approach direction: 20 to the
//! right of the child's center when the child sits at or right of the
//! parent, 5 to the left when it sits left (the legs mirror).
//!
//! Paths are value types ([`kurbo::BezPath`] plus an arrowhead triangle) and
//! are always rebuilt whole when either endpoint moves — there is no
//! incremental patching.

#![no_std]

extern crate alloc;

use espalier_store::Node;
use kurbo::{BezPath, Point};

/// Half-width and height of the arrowhead triangle.
const ARROW_SIZE: f64 = 5.0;

/// Anchor inset from the child's center when approaching from the left.
const INSET_RIGHTWARD: f64 = 20.0;

/// Anchor inset from the child's center when approaching from the right.
const INSET_LEFTWARD: f64 = 5.0;

/// A routed connector: the orthogonal line and its arrowhead.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
    /// The orthogonal polyline from the parent's bottom-center to the
    /// child's top edge.
    pub path: BezPath,
    /// Arrowhead triangle at the child's top edge: tip, left wing, right wing.
    pub arrow: [Point; 3],
}

impl Connector {
    /// The point the arrowhead points at, on the child's top edge.
    pub fn tip(&self) -> Point {
        self.arrow[0]
    }
}

/// Route the connector from `parent` down to `child`.
pub fn route(child: &Node, parent: &Node, vertical_spacing: f64) -> Connector {
    let dx = child.pos.x - parent.pos.x;
    let start = Point::new(parent.pos.x, parent.bottom());
    let elbow_y = start.y + vertical_spacing / 2.0;
    let anchor_x = if dx >= 0.0 {
        child.pos.x + INSET_RIGHTWARD
    } else {
        child.pos.x - INSET_LEFTWARD
    };
    let end = Point::new(anchor_x, child.top());

    let mut path = BezPath::new();
    path.move_to(start);
    path.line_to(Point::new(start.x, elbow_y));
    path.line_to(Point::new(anchor_x, elbow_y));
    path.line_to(end);

    let arrow = [
        end,
        Point::new(anchor_x - ARROW_SIZE, end.y - ARROW_SIZE),
        Point::new(anchor_x + ARROW_SIZE, end.y - ARROW_SIZE),
    ];

    Connector { path, arrow }
}
