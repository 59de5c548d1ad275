// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host callback contract.

use espalier_store::{Node, NodeId};
use kurbo::Point;

/// Callbacks the engine raises while processing pointer events.
///
/// All methods have defaults, so hosts implement only what they need. The
/// two boolean callbacks are vetoes: the engine asks, the host decides, and
/// the engine resolves the drag accordingly — a declined operation is a
/// normal terminal, never an error.
pub trait FlowCallbacks {
    /// A drag started: a palette template was picked up, or a placed node
    /// (with its subtree) was grabbed.
    fn on_grab(&mut self, node: &Node) {
        let _ = node;
    }

    /// The pointer was released, ending the drag (before the terminal is
    /// resolved).
    fn on_release(&mut self) {}

    /// A release is about to attach `dragged`. `is_first_node` is true when
    /// the canvas is empty and the node would become the root (`parent` is
    /// then `None`). Return `false` to veto; the drag resolves to
    /// [`DropOutcome::Discarded`](crate::DropOutcome::Discarded).
    fn on_snap(&mut self, dragged: &Node, is_first_node: bool, parent: Option<&Node>) -> bool {
        let _ = (dragged, is_first_node, parent);
        true
    }

    /// A rearrange drag was released with no attach target. Return `true`
    /// to restore the subtree to `original_parent`, `false` to delete it.
    fn on_rearrange(&mut self, dragged: &Node, original_parent: Option<&Node>) -> bool {
        let _ = (dragged, original_parent);
        false
    }

    /// The pointer moved over a new attach target; show the insertion
    /// indicator at `anchor` (the target's lower edge).
    fn show_indicator(&mut self, target: NodeId, anchor: Point) {
        let _ = (target, anchor);
    }

    /// The pointer left the current attach target (or the drag ended);
    /// hide the insertion indicator.
    fn hide_indicator(&mut self) {}
}

/// The do-nothing host: accepts every snap, restores nothing, renders nothing.
impl FlowCallbacks for () {}
