// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine facade: pointer events in, a settled tree out.

use alloc::vec::Vec;
use core::mem;
use kurbo::Point;
use log::{debug, warn};

use espalier_connector::{Connector, route};
use espalier_layout::{BoundaryCorrector, layout_children, recompute_all, recompute_chain};
use espalier_snap::{find_attach_target, indicator_anchor};
use espalier_store::records::NodeRecord;
use espalier_store::{FlowConfig, Node, NodeId, NodeStore, StagingSet};

use crate::callbacks::FlowCallbacks;
use crate::lifecycle::{DragPhase, DropOutcome, GrabSource};

/// The layout-and-attachment engine.
///
/// Owns the node store, the drag phase, the boundary corrector's remembered
/// shift, and the routed connectors. Hosts feed pointer events in and read
/// [`FlowEngine::store`] and [`FlowEngine::connectors`] back out after each
/// call; every mutation settles synchronously before the call returns.
#[derive(Debug)]
pub struct FlowEngine {
    store: NodeStore,
    config: FlowConfig,
    canvas_left: f64,
    boundary: BoundaryCorrector,
    phase: DragPhase,
    last_target: Option<NodeId>,
    connectors: Vec<(NodeId, Connector)>,
}

impl Default for FlowEngine {
    fn default() -> Self {
        Self::new(FlowConfig::default())
    }
}

impl FlowEngine {
    /// Create an engine with the canvas's left edge at x = 0.
    pub fn new(config: FlowConfig) -> Self {
        Self::with_canvas_left(config, 0.0)
    }

    /// Create an engine with an explicit left edge for boundary correction.
    pub fn with_canvas_left(config: FlowConfig, canvas_left: f64) -> Self {
        Self {
            store: NodeStore::new(),
            boundary: BoundaryCorrector::new(config.horizontal_spacing),
            config,
            canvas_left,
            phase: DragPhase::Idle,
            last_target: None,
            connectors: Vec::new(),
        }
    }

    /// The placed nodes.
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// The spacing configuration.
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Routed connectors, one per (child, parent) edge, rebuilt on every
    /// settle. Pairs are `(child id, connector)`.
    pub fn connectors(&self) -> &[(NodeId, Connector)] {
        &self.connectors
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        !self.phase.is_idle()
    }

    /// Begin a drag. Ignored if one is already active, or if an
    /// [`GrabSource::Existing`] id is stale.
    pub fn pointer_down(&mut self, source: GrabSource, point: Point, cb: &mut impl FlowCallbacks) {
        if !self.phase.is_idle() {
            debug!("pointer down ignored: a drag is already active");
            return;
        }
        match source {
            GrabSource::PaletteTemplate { width, height } => {
                let node = Node::new(None, width, height, point);
                cb.on_grab(&node);
                debug!("drag started: new {width}x{height} node");
                self.phase = DragPhase::CreatingNew { node };
            }
            GrabSource::Existing(id) => {
                let Some(node) = self.store.get(id) else {
                    debug!("pointer down ignored: {id:?} is not placed");
                    return;
                };
                let original_pos = node.pos;
                let original_parent = node.parent;
                let staging = self.store.detach_subtree(id);
                if let Some((_, root)) = staging.root() {
                    cb.on_grab(root);
                }
                debug!("drag started: rearranging {id:?} ({} nodes staged)", staging.len());
                self.phase = DragPhase::Rearranging {
                    staging,
                    original_parent,
                    original_pos,
                };
                // Connectors touching the staged subtree are gone until the
                // drag resolves; the host draws the dragged ghost itself.
                self.reroute();
            }
        }
    }

    /// Track the pointer: the dragged node follows it, and the insertion
    /// indicator toggles whenever the attach target changes. No-op while
    /// idle.
    pub fn pointer_move(&mut self, point: Point, cb: &mut impl FlowCallbacks) {
        match &mut self.phase {
            DragPhase::Idle => return,
            DragPhase::CreatingNew { node } => node.pos = point,
            DragPhase::Rearranging { staging, .. } => {
                if let Some((_, root)) = staging.root_mut() {
                    root.pos = point;
                }
            }
        }
        let target = find_attach_target(&self.store, point, self.config.horizontal_spacing);
        if target != self.last_target {
            if self.last_target.is_some() {
                cb.hide_indicator();
            }
            if let Some(t) = target
                && let Some(node) = self.store.get(t)
            {
                cb.show_indicator(t, indicator_anchor(node));
            }
            self.last_target = target;
        }
    }

    /// End the drag and resolve its terminal. Returns
    /// [`DropOutcome::Ignored`] when no drag is active.
    ///
    /// Each committing terminal runs the settle pipeline: widths up the
    /// affected ancestor chain, sibling layout down from the chain's top,
    /// connector rerouting, then (for terminals that began with a detach)
    /// boundary correction.
    pub fn pointer_up(&mut self, point: Point, cb: &mut impl FlowCallbacks) -> DropOutcome {
        let phase = mem::take(&mut self.phase);
        if phase.is_idle() {
            return DropOutcome::Ignored;
        }
        cb.on_release();
        if self.last_target.take().is_some() {
            cb.hide_indicator();
        }
        let outcome = match phase {
            DragPhase::Idle => DropOutcome::Ignored,
            DragPhase::CreatingNew { node } => self.drop_new(node, point, cb),
            DragPhase::Rearranging {
                staging,
                original_parent,
                original_pos,
            } => self.drop_rearrange(staging, original_parent, original_pos, point, cb),
        };
        debug!("drag resolved: {outcome:?}");
        outcome
    }

    /// Export the placed nodes, in attach order.
    pub fn export(&self) -> Vec<NodeRecord> {
        self.store.to_records()
    }

    /// Replace the whole diagram from exported records.
    ///
    /// Any active drag is dropped. Cached widths are recomputed from
    /// scratch, every root-like node's subtree is laid out fresh, and
    /// connectors are rebuilt, so only the (id, parent) edges are taken
    /// verbatim from the records.
    pub fn import(&mut self, records: &[NodeRecord]) {
        self.phase = DragPhase::Idle;
        self.last_target = None;
        self.store = NodeStore::from_records(records);
        self.boundary = BoundaryCorrector::new(self.config.horizontal_spacing);
        recompute_all(&mut self.store, &self.config);
        for top in self.store.root_like_ids() {
            layout_children(&mut self.store, top, &self.config);
        }
        self.reroute();
    }

    /// Remove every node, abandon any drag, and reset the id counter.
    pub fn clear(&mut self) {
        self.store.clear();
        self.connectors.clear();
        self.phase = DragPhase::Idle;
        self.last_target = None;
        self.boundary = BoundaryCorrector::new(self.config.horizontal_spacing);
    }

    // --- terminal resolution ---

    fn drop_new(
        &mut self,
        mut node: Node,
        point: Point,
        cb: &mut impl FlowCallbacks,
    ) -> DropOutcome {
        node.pos = point;
        if self.store.is_empty() {
            if !cb.on_snap(&node, true, None) {
                debug!("first-node drop vetoed");
                return DropOutcome::Discarded;
            }
            return match self.store.attach_new(None, node.width, node.height, point) {
                Ok(id) => {
                    self.settle(id, false);
                    DropOutcome::AttachedAsRoot(id)
                }
                Err(err) => {
                    warn!("root attach rejected ({err}); discarding");
                    DropOutcome::Discarded
                }
            };
        }
        let Some(target) = find_attach_target(&self.store, point, self.config.horizontal_spacing)
        else {
            debug!("dropped with no attach target");
            return DropOutcome::Discarded;
        };
        if !cb.on_snap(&node, false, self.store.get(target)) {
            debug!("snap to {target:?} vetoed");
            return DropOutcome::Discarded;
        }
        match self
            .store
            .attach_new(Some(target), node.width, node.height, point)
        {
            Ok(id) => {
                self.settle(id, false);
                DropOutcome::AttachedAsChild { id, parent: target }
            }
            Err(err) => {
                warn!("attach to {target:?} rejected ({err}); discarding");
                DropOutcome::Discarded
            }
        }
    }

    fn drop_rearrange(
        &mut self,
        mut staging: StagingSet,
        original_parent: Option<NodeId>,
        original_pos: Point,
        point: Point,
        cb: &mut impl FlowCallbacks,
    ) -> DropOutcome {
        let Some((id, _)) = staging.root() else {
            return DropOutcome::Discarded;
        };
        if let Some((_, root)) = staging.root_mut() {
            root.pos = point;
        }
        let dragged = staging
            .root()
            .map(|(_, n)| n.clone())
            .unwrap_or_else(|| Node::new(None, 0.0, 0.0, point));

        if self.store.is_empty() {
            // The whole tree is in flight; the only possible parents are
            // "none" (root) via snap or restore.
            if cb.on_snap(&dragged, true, None) {
                return match self.store.reattach_subtree(staging, None) {
                    Ok(()) => {
                        self.settle(id, true);
                        DropOutcome::Reattached { id, parent: None }
                    }
                    Err(err) => {
                        warn!("root reattach rejected ({err}); staged subtree deleted");
                        DropOutcome::Discarded
                    }
                };
            }
            if cb.on_rearrange(&dragged, None) {
                if let Some((_, root)) = staging.root_mut() {
                    root.pos = original_pos;
                }
                return match self.store.reattach_subtree(staging, None) {
                    Ok(()) => {
                        self.settle(id, true);
                        DropOutcome::RestoredToOriginalParent(id)
                    }
                    Err(err) => {
                        warn!("root restore rejected ({err}); staged subtree deleted");
                        DropOutcome::Discarded
                    }
                };
            }
            debug!("rearrange of the whole tree resolved to delete");
            self.settle_after_delete(None);
            return DropOutcome::Discarded;
        }

        if let Some(target) = find_attach_target(&self.store, point, self.config.horizontal_spacing)
            && cb.on_snap(&dragged, false, self.store.get(target))
        {
            return match self.store.reattach_subtree(staging, Some(target)) {
                Ok(()) => {
                    self.settle(id, true);
                    DropOutcome::Reattached {
                        id,
                        parent: Some(target),
                    }
                }
                Err(err) => {
                    warn!("reattach to {target:?} rejected ({err}); staged subtree deleted");
                    self.settle_after_delete(original_parent);
                    DropOutcome::Discarded
                }
            };
        }

        if cb.on_rearrange(&dragged, original_parent.and_then(|p| self.store.get(p))) {
            if let Some(op) = original_parent
                && self.store.contains(op)
            {
                return match self.store.reattach_subtree(staging, Some(op)) {
                    Ok(()) => {
                        self.settle(id, true);
                        DropOutcome::RestoredToOriginalParent(id)
                    }
                    Err(err) => {
                        warn!("restore to {op:?} rejected ({err}); staged subtree deleted");
                        self.settle_after_delete(original_parent);
                        DropOutcome::Discarded
                    }
                };
            }
            warn!("original parent {original_parent:?} is gone; staged subtree deleted");
        }
        drop(staging);
        debug!("rearrange resolved to delete");
        self.settle_after_delete(original_parent);
        DropOutcome::Discarded
    }

    // --- settle pipeline ---

    /// Width recompute up from `site`, layout down from the chain's top,
    /// connector rebuild, and optionally boundary correction (which
    /// re-routes again if it moved anything).
    fn settle(&mut self, site: NodeId, run_boundary: bool) {
        recompute_chain(&mut self.store, site, &self.config);
        if let Some(&top) = self.store.ancestor_chain(site).last() {
            layout_children(&mut self.store, top, &self.config);
        }
        self.reroute();
        if run_boundary && self.boundary.correct(&mut self.store, self.canvas_left) != 0.0 {
            self.reroute();
        }
    }

    /// Settle after a staged subtree was deleted: the change site is the
    /// parent it was detached from, if it still exists.
    fn settle_after_delete(&mut self, site: Option<NodeId>) {
        if let Some(p) = site
            && self.store.contains(p)
        {
            self.settle(p, true);
        } else {
            self.reroute();
            if self.boundary.correct(&mut self.store, self.canvas_left) != 0.0 {
                self.reroute();
            }
        }
    }

    fn reroute(&mut self) {
        let mut routed = Vec::with_capacity(self.connectors.len());
        for (id, node) in self.store.iter() {
            if let Some(p) = node.parent
                && let Some(parent) = self.store.get(p)
            {
                routed.push((id, route(node, parent, self.config.vertical_spacing)));
            }
        }
        self.connectors = routed;
    }
}
