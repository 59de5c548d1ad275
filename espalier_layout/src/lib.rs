// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout for Espalier flow diagrams: subtree widths, sibling packing, and
//! left-boundary correction.
//!
//! The layout scheme is deliberately specific, not a general tree-drawing
//! algorithm: siblings are packed left to right in attach order, each
//! reserving its *effective width* (the larger of its own width and its
//! cached subtree width), and the packed run is centered under the parent.
//! One row per depth.
//!
//! The pieces run in a fixed order after any structural change:
//!
//! 1. [`recompute_chain`] refreshes the cached subtree widths along the
//!    ancestor chain from the change site up to the root. A node's width
//!    depends only on its direct children, so nothing below the change site
//!    needs recomputing.
//! 2. [`layout_children`] repositions children top-down from the chain's
//!    top, recursing through every descendant.
//! 3. [`BoundaryCorrector::correct`] shifts the whole tree right if its
//!    leftmost extent fell off the canvas, and undoes that shift when it is
//!    no longer needed.

#![no_std]

extern crate alloc;

mod boundary;
mod siblings;
mod width;

pub use boundary::BoundaryCorrector;
pub use siblings::layout_children;
pub use width::{recompute_all, recompute_chain};
