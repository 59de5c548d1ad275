// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat export/import records.
//!
//! The persisted layout of a diagram is an ordered list of [`NodeRecord`]s,
//! one per node in attach order, with `parent == -1` marking the root. The
//! actual serialization format is the host's concern; with the `serde`
//! feature the records derive `Serialize`/`Deserialize` so any serde format
//! works.
//!
//! Import is tolerant by design: malformed records are skipped (with a
//! `log::warn!`), duplicate ids keep the first occurrence, and a parent id
//! that references a skipped or absent node is kept as-is — layout treats
//! such nodes as root-like. Importing never panics. Absolute positions are
//! carried through, but hosts normally rerun a layout pass after import, so
//! only the (id, parent) edge set is guaranteed to round-trip verbatim.

use alloc::vec::Vec;
use kurbo::Point;
use log::warn;

use crate::store::NodeStore;
use crate::types::{Node, NodeId};

/// One exported node.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRecord {
    /// Node id. Non-negative.
    pub id: i64,
    /// Parent id, or -1 for the root.
    pub parent: i64,
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Node width.
    pub width: f64,
    /// Node height.
    pub height: f64,
    /// Cached subtree width at export time.
    pub childwidth: f64,
}

impl NodeRecord {
    fn is_well_formed(&self) -> bool {
        self.id >= 0
            && self.id <= i64::from(u32::MAX)
            && self.parent != self.id
            && self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.width > 0.0
            && self.height.is_finite()
            && self.height > 0.0
            && self.childwidth.is_finite()
    }
}

impl NodeStore {
    /// Export every node as a [`NodeRecord`], in attach order.
    pub fn to_records(&self) -> Vec<NodeRecord> {
        self.iter()
            .map(|(id, node)| NodeRecord {
                id: i64::from(id.raw()),
                parent: node.parent.map_or(-1, |p| i64::from(p.raw())),
                x: node.pos.x,
                y: node.pos.y,
                width: node.width,
                height: node.height,
                childwidth: node.subtree_width,
            })
            .collect()
    }

    /// Rebuild a store from exported records.
    ///
    /// Malformed records are skipped; see the module docs for the tolerance
    /// rules. The id counter resumes past the highest imported id.
    pub fn from_records(records: &[NodeRecord]) -> Self {
        let mut store = Self::new();
        for record in records {
            if !record.is_well_formed() {
                warn!("skipping malformed node record {record:?}");
                continue;
            }
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "range-checked by is_well_formed"
            )]
            let id = NodeId::new(record.id as u32);
            if store.contains(id) {
                warn!("skipping duplicate node record for id {}", record.id);
                continue;
            }
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "negative parents map to None; range-checked against u32"
            )]
            let parent = if record.parent >= 0 && record.parent <= i64::from(u32::MAX) {
                Some(NodeId::new(record.parent as u32))
            } else {
                None
            };
            let mut node = Node::new(
                parent,
                record.width,
                record.height,
                Point::new(record.x, record.y),
            );
            node.subtree_width = record.childwidth.max(0.0);
            store.insert_raw(id, node);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, parent: i64) -> NodeRecord {
        NodeRecord {
            id,
            parent,
            x: 100.0,
            y: 100.0,
            width: 100.0,
            height: 50.0,
            childwidth: 0.0,
        }
    }

    fn edge_set(store: &NodeStore) -> Vec<(u32, i64)> {
        store
            .to_records()
            .iter()
            .map(|r| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "test ids are small")]
                let id = r.id as u32;
                (id, r.parent)
            })
            .collect()
    }

    #[test]
    fn export_import_export_reproduces_edges() {
        let mut store = NodeStore::new();
        let root = store
            .attach_new(None, 100.0, 50.0, Point::new(400.0, 300.0))
            .unwrap();
        let a = store
            .attach_new(Some(root), 80.0, 40.0, Point::new(340.0, 405.0))
            .unwrap();
        let _b = store
            .attach_new(Some(root), 100.0, 40.0, Point::new(450.0, 405.0))
            .unwrap();
        let _c = store
            .attach_new(Some(a), 60.0, 40.0, Point::new(340.0, 500.0))
            .unwrap();

        let exported = store.to_records();
        let reimported = NodeStore::from_records(&exported);
        assert_eq!(edge_set(&store), edge_set(&reimported));
        assert_eq!(reimported.to_records(), exported);
    }

    #[test]
    fn import_resumes_id_counter_past_max() {
        let records = [record(0, -1), record(7, 0)];
        let mut store = NodeStore::from_records(&records);
        let parent = NodeId::new(7);
        let next = store
            .attach_new(Some(parent), 10.0, 10.0, Point::new(0.0, 0.0))
            .unwrap();
        assert_eq!(next.raw(), 8);
    }

    #[test]
    fn malformed_records_are_skipped() {
        let mut bad_width = record(1, 0);
        bad_width.width = 0.0;
        let mut bad_nan = record(2, 0);
        bad_nan.x = f64::NAN;
        let records = [
            record(0, -1),
            bad_width,
            bad_nan,
            record(-3, 0), // negative id
            record(4, 4),  // self-parent
            record(5, 0),
        ];
        let store = NodeStore::from_records(&records);
        assert_eq!(store.len(), 2);
        assert!(store.contains(NodeId::new(0)));
        assert!(store.contains(NodeId::new(5)));
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let mut second = record(1, 0);
        second.width = 64.0;
        let records = [record(0, -1), record(1, 0), second];
        let store = NodeStore::from_records(&records);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(NodeId::new(1)).unwrap().width, 100.0);
    }

    #[test]
    fn dangling_parent_is_kept_and_root_like() {
        let records = [record(0, -1), record(1, 99)];
        let store = NodeStore::from_records(&records);
        assert_eq!(store.len(), 2);
        let orphan = NodeId::new(1);
        assert_eq!(store.parent_of(orphan), Some(NodeId::new(99)));
        assert!(store.is_root_like(orphan));
    }

    #[test]
    fn negative_childwidth_is_clamped() {
        let mut r = record(0, -1);
        r.childwidth = -5.0;
        let store = NodeStore::from_records(&[r]);
        assert_eq!(store.get(NodeId::new(0)).unwrap().subtree_width, 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn records_round_trip_through_json() {
        let records = alloc::vec![record(0, -1), record(1, 0)];
        let json = serde_json::to_string(&records).unwrap();
        let back: alloc::vec::Vec<NodeRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, records);
    }
}
