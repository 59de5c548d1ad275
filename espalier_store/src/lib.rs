// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Espalier Store: the authoritative node collection of the Espalier flow engine.
//!
//! A flow diagram in Espalier is a rooted tree: one root, every other node
//! attached to exactly one parent. This crate owns that structure and nothing
//! else — no layout policy, no hit testing, no rendering. Companion crates
//! (`espalier_snap`, `espalier_layout`, `espalier_connector`, `espalier_drag`)
//! operate on the store through the accessors defined here.
//!
//! ## Ownership model
//!
//! Placed nodes live in [`NodeStore`]: an id-indexed arena plus an ordered id
//! list. The order is the attach order and is load-bearing — snap detection
//! returns the first match in store order, and sibling layout packs children
//! in attach order, never reordered.
//!
//! During a reparent drag, a node and its whole subtree move out of the store
//! into a [`StagingSet`] and back (or are discarded). A node is owned by
//! exactly one of the two at any instant; [`NodeStore::detach_subtree`] and
//! [`NodeStore::reattach_subtree`] are the only transfer points.
//!
//! ## API overview
//!
//! - [`NodeStore::attach_new`] → [`NodeId`]: allocate the next id and append.
//! - [`NodeStore::detach_subtree`] → [`StagingSet`]: remove a node and all
//!   of its descendants, breadth-first.
//! - [`NodeStore::reattach_subtree`]: merge a staging set back under a new
//!   parent; only the detached root's parent link changes.
//! - [`NodeStore::to_records`] / [`NodeStore::from_records`]: the flat
//!   export/import contract (see [`records`]).
//! - [`NodeStore::clear`]: drop everything and reset the id counter.
//!
//! Ids are plain monotonic integers starting at 0, reset only by a full
//! [`NodeStore::clear`]. Stale ids are tolerated: lookups return `None` and
//! [`NodeStore::detach_subtree`] of a missing id is a no-op.

#![no_std]

extern crate alloc;

mod staging;
mod store;
mod types;

pub mod records;

pub use staging::StagingSet;
pub use store::{NodeStore, StructureError};
pub use types::{FlowConfig, Node, NodeId};
