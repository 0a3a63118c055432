// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive grid types: coordinates, extents, boundary modes, and object identity.

use alloc::rc::Rc;
use alloc::sync::Arc;
use core::fmt;

/// Integer cell address in a 3D grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord3 {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    /// Layer.
    pub z: usize,
}

impl Coord3 {
    /// Create a coordinate from its three axes.
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }
}

impl From<(usize, usize, usize)> for Coord3 {
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Coord3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Per-axis size of a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Extent3 {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Number of layers.
    pub depth: usize,
}

impl Extent3 {
    /// Create an extent from its three axes.
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Total number of cells, or `None` on overflow.
    pub fn volume(&self) -> Option<usize> {
        self.width.checked_mul(self.height)?.checked_mul(self.depth)
    }

    /// True if any axis is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.depth == 0
    }

    /// True if `c` addresses a cell inside these extents.
    pub const fn contains(&self, c: Coord3) -> bool {
        c.x < self.width && c.y < self.height && c.z < self.depth
    }
}

/// How neighborhoods treat the grid edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Coordinates are clipped at the edges.
    Bounded,
    /// Coordinates wrap around the edges (cyclic boundary).
    Toroidal,
}

/// Identity comparison for objects stored in a grid.
///
/// Location tracking and selection compare objects by identity, never by value:
/// two distinct objects with equal fields are different objects.
pub trait Identity {
    /// True if `self` and `other` are the same object.
    fn same_object(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for Arc<T> {
    #[inline]
    fn same_object(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Rc<T> {
    #[inline]
    fn same_object(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for &T {
    #[inline]
    fn same_object(&self, other: &Self) -> bool {
        core::ptr::eq(*self, *other)
    }
}
