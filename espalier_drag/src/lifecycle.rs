// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag lifecycle states and terminals.

use espalier_store::{Node, NodeId, StagingSet};
use kurbo::Point;

/// What a pointer-down grabbed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrabSource {
    /// A palette template: a new node of the given dimensions will float
    /// under the pointer.
    PaletteTemplate {
        /// Width of the node the template creates.
        width: f64,
        /// Height of the node the template creates.
        height: f64,
    },
    /// An already placed node; it and its subtree are staged for reparenting.
    Existing(NodeId),
}

/// Terminal state of a resolved drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// A created node became the root of an empty canvas.
    AttachedAsRoot(NodeId),
    /// A created node attached under a snap target.
    AttachedAsChild {
        /// The new node.
        id: NodeId,
        /// The snap target it attached to.
        parent: NodeId,
    },
    /// A rearranged subtree attached under a new parent (`None`: the whole
    /// tree was dragged and put back as the root).
    Reattached {
        /// The staged subtree's root.
        id: NodeId,
        /// The new parent, or `None` for a root reattach.
        parent: Option<NodeId>,
    },
    /// A rearranged subtree went back to the parent it was detached from.
    RestoredToOriginalParent(NodeId),
    /// The dragged node (and any staged subtree) was deleted.
    Discarded,
    /// Pointer-up with no drag in progress.
    Ignored,
}

/// Current interaction, if any. One drag at a time.
#[derive(Clone, Debug, Default)]
pub(crate) enum DragPhase {
    #[default]
    Idle,
    /// A palette node floating under the pointer; not yet in the store.
    CreatingNew { node: Node },
    /// A detached subtree following the pointer.
    Rearranging {
        staging: StagingSet,
        original_parent: Option<NodeId>,
        /// Where the subtree's root sat before the drag; used when a
        /// root-level drag is restored.
        original_pos: Point,
    },
}

impl DragPhase {
    pub(crate) fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
