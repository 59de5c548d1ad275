// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping the tree inside the canvas's left edge.

use espalier_store::NodeStore;

/// Shifts the whole tree right when its leftmost extent would render off
/// the canvas, and reverses exactly that shift once it is no longer needed.
///
/// The corrector is stateful: the applied shift is remembered so that the
/// reversal restores the pre-shift positions verbatim instead of recomputing
/// a new placement. Reversal can legally leave the tree past the edge again
/// (the remembered shift wins over a fresh measurement); the next correcting
/// call moves it back. Callers fire this after detach-involving changes, not
/// after ordinary attaches.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryCorrector {
    shift: f64,
    margin: f64,
}

impl BoundaryCorrector {
    /// Create a corrector with the given margin between the canvas edge and
    /// the tree's leftmost node after a shift.
    pub const fn new(margin: f64) -> Self {
        Self { shift: 0.0, margin }
    }

    /// The currently applied rightward shift.
    pub const fn applied_shift(&self) -> f64 {
        self.shift
    }

    /// Measure the tree's leftmost extent against `canvas_left` and shift
    /// every node as needed. Returns the delta applied to every x (0.0 for
    /// a no-op; negative when undoing).
    ///
    /// An empty store is a no-op, even with a remembered shift.
    pub fn correct(&mut self, store: &mut NodeStore, canvas_left: f64) -> f64 {
        let Some(min_left) = store
            .iter()
            .map(|(_, n)| n.left())
            .min_by(f64::total_cmp)
        else {
            return 0.0;
        };

        let delta = if min_left < canvas_left {
            let d = canvas_left - min_left + self.margin;
            self.shift += d;
            d
        } else if self.shift != 0.0 {
            let d = -self.shift;
            self.shift = 0.0;
            d
        } else {
            return 0.0;
        };

        let ids: alloc::vec::Vec<_> = store.ids().to_vec();
        for id in ids {
            if let Some(node) = store.get_mut(id) {
                node.pos.x += delta;
            }
        }
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use espalier_store::NodeId;
    use kurbo::Point;

    fn place(store: &mut NodeStore, parent: Option<NodeId>, x: f64) -> NodeId {
        store
            .attach_new(parent, 100.0, 50.0, Point::new(x, 300.0))
            .unwrap()
    }

    #[test]
    fn empty_store_is_noop() {
        let mut store = NodeStore::new();
        let mut corrector = BoundaryCorrector::new(20.0);
        assert_eq!(corrector.correct(&mut store, 0.0), 0.0);
    }

    #[test]
    fn tree_inside_canvas_is_untouched() {
        let mut store = NodeStore::new();
        let root = place(&mut store, None, 400.0);
        let mut corrector = BoundaryCorrector::new(20.0);
        assert_eq!(corrector.correct(&mut store, 0.0), 0.0);
        assert_eq!(store.get(root).unwrap().pos.x, 400.0);
    }

    #[test]
    fn off_canvas_tree_shifts_right_with_margin() {
        let mut store = NodeStore::new();
        // Left edges at -90 and 110.
        let root = place(&mut store, None, -40.0);
        let child = place(&mut store, Some(root), 160.0);
        let mut corrector = BoundaryCorrector::new(20.0);

        let delta = corrector.correct(&mut store, 0.0);
        // 0 - (-90) + 20
        assert_eq!(delta, 110.0);
        assert_eq!(corrector.applied_shift(), 110.0);
        assert_eq!(store.get(root).unwrap().pos.x, 70.0);
        assert_eq!(store.get(child).unwrap().pos.x, 270.0);
    }

    #[test]
    fn shift_is_undone_exactly_once_clear() {
        let mut store = NodeStore::new();
        let root = place(&mut store, None, -40.0);
        let mut corrector = BoundaryCorrector::new(20.0);
        corrector.correct(&mut store, 0.0);
        assert_eq!(store.get(root).unwrap().pos.x, 70.0);

        // Tree is inside the edge now; the remembered shift is reversed
        // verbatim, restoring the original position.
        let delta = corrector.correct(&mut store, 0.0);
        assert_eq!(delta, -110.0);
        assert_eq!(corrector.applied_shift(), 0.0);
        assert_eq!(store.get(root).unwrap().pos.x, -40.0);
    }

    #[test]
    fn repeated_shifts_accumulate_and_undo_together() {
        let mut store = NodeStore::new();
        let root = place(&mut store, None, -40.0);
        let mut corrector = BoundaryCorrector::new(20.0);
        corrector.correct(&mut store, 0.0); // +110, x = 70
        store.get_mut(root).unwrap().pos.x = -10.0; // drifts off again
        corrector.correct(&mut store, 0.0); // +80, x = 70
        assert_eq!(corrector.applied_shift(), 190.0);

        let delta = corrector.correct(&mut store, 0.0);
        assert_eq!(delta, -190.0);
        assert_eq!(store.get(root).unwrap().pos.x, -120.0);
        // The exact-undo may leave the tree off-canvas; a further call
        // corrects forward again.
        let delta = corrector.correct(&mut store, 0.0);
        assert_eq!(delta, 190.0);
    }
}
