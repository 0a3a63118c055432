// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dense_grid --heading-base-level=0

//! Understory Dense Grid: a dense 3D grid of object multisets.
//!
//! This crate is the storage side of a grid simulation viewer.
//!
//! - [`DenseGrid3D`] holds a multiset of objects per cell, allocated lazily.
//! - Cells are addressed by [`Coord3`]; scans run x-major, then y, then z.
//! - [`DenseGrid3D::moore_locations`] enumerates bounded or toroidal neighborhoods.
//! - [`DenseGrid3D::find`] is the exhaustive (cold) object search.
//! - [`SharedGrid`] wraps a grid in a reader/writer lock so a simulation stepper can
//!   mutate it while observers read consistent snapshots.
//!
//! Object membership is decided by [`Identity`], not by value equality. It is
//! implemented for `Arc<T>`, `Rc<T>`, and `&T` by pointer identity.
//!
//! The crate is `no_std` with `alloc`. The default `std` feature adds [`SharedGrid`],
//! which needs `parking_lot`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use understory_dense_grid::{Boundary, Coord3, DenseGrid3D, SharedGrid};
//!
//! let mut grid = DenseGrid3D::new(5, 5, 5);
//! let agent = Arc::new("agent");
//! grid.add(Coord3::new(2, 2, 2), agent.clone());
//!
//! // Toroidal neighborhood around a corner wraps to the far side.
//! let near = grid.moore_locations(Coord3::new(0, 0, 0), 1, Boundary::Toroidal, false);
//! assert!(near.contains(&Coord3::new(4, 4, 4)));
//!
//! // Share it with a viewer; the stepper writes, the viewer reads.
//! let shared = SharedGrid::new(grid);
//! shared.write().move_object(Coord3::new(2, 2, 2), Coord3::new(3, 2, 2), &agent);
//! assert_eq!(shared.read().find(&agent), Some(Coord3::new(3, 2, 2)));
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod grid;
pub mod neighborhood;
#[cfg(feature = "std")]
pub mod shared;
pub mod types;

pub use grid::DenseGrid3D;
pub use neighborhood::moore_locations;
#[cfg(feature = "std")]
pub use shared::SharedGrid;
pub use types::{Boundary, Coord3, Extent3, Identity};
