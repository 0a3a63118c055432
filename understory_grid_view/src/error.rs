// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the grid view.
//!
//! Only configuration mistakes are errors. Missing data (no grid, zero extents, empty
//! cells, a lock that could not be taken in time, an object that moved out of reach)
//! produces empty results or [`Located::Unknown`](crate::Located::Unknown) instead.

/// A configuration mistake detected while drawing or hit-testing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// No renderer is registered for the object's kind and there is no default.
    #[error("no renderer registered for objects of kind {kind}")]
    NoRenderer {
        /// Debug rendering of the object kind.
        kind: String,
    },
    /// The resolved renderer cannot paint or hit-test onto a 2D surface.
    #[error("renderer `{renderer}` for objects of kind {kind} cannot project onto a 2D surface")]
    MissingCapability {
        /// Renderer name.
        renderer: String,
        /// Debug rendering of the object kind.
        kind: String,
    },
}
