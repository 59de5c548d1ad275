// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Espalier Drag: the lifecycle that turns pointer events into tree edits.
//!
//! This crate coordinates the other Espalier crates. The host feeds it a
//! normalized pointer stream — down with a [`GrabSource`] (palette template
//! or existing node), moves, up — and it drives snapping, the store's
//! detach/reattach protocol, width recomputation, sibling layout, connector
//! routing, and boundary correction, in that order, synchronously inside
//! each call.
//!
//! Two interactions exist:
//!
//! - **Create**: pointer-down on a palette template floats a new node under
//!   the pointer; release attaches it as the root (empty canvas) or as a
//!   child of the snap target, or discards it.
//! - **Rearrange**: pointer-down on a placed node detaches the node and its
//!   whole subtree into a staging set; release reattaches it under a new
//!   parent, restores it to the original parent, or discards it.
//!
//! Hosts observe and veto through [`FlowCallbacks`]: `on_snap` can refuse an
//! attach and `on_rearrange` decides whether a failed reparent restores or
//! deletes. Rendering is entirely the host's concern — it consumes
//! [`FlowEngine::store`] and [`FlowEngine::connectors`] after each call and
//! draws the insertion indicator where `show_indicator` tells it to.
//!
//! Everything is single-threaded and runs to completion per event; a node is
//! owned by exactly one of the store and the staging set between calls.

#![no_std]

extern crate alloc;

mod callbacks;
mod engine;
mod lifecycle;

pub use callbacks::FlowCallbacks;
pub use engine::FlowEngine;
pub use lifecycle::{DropOutcome, GrabSource};
