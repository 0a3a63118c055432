// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dense 3D grid whose cells hold multisets of objects.

use alloc::vec::Vec;

use crate::neighborhood::moore_locations;
use crate::types::{Boundary, Coord3, Extent3, Identity};

/// A dense 3D grid of object multisets.
///
/// Every cell is addressable, but storage for a cell is only allocated once an object
/// is added to it; an absent cell and an empty cell mean the same thing. Cells are
/// laid out x-major, then y, then z, which is also the order of every full scan.
///
/// Objects inside a cell keep their insertion order. Removing an object keeps the
/// relative order of the survivors.
pub struct DenseGrid3D<T> {
    extent: Extent3,
    cells: Vec<Option<Vec<T>>>,
}

impl<T> DenseGrid3D<T> {
    /// Create an empty grid.
    ///
    /// Zero-sized axes are allowed and produce a grid with no cells.
    ///
    /// # Panics
    ///
    /// Panics if the total number of cells overflows `usize`.
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        let extent = Extent3::new(width, height, depth);
        let volume = extent.volume().expect("grid volume overflows usize");
        let mut cells = Vec::with_capacity(volume);
        cells.resize_with(volume, || None);
        Self { extent, cells }
    }

    /// Per-axis size.
    pub const fn extent(&self) -> Extent3 {
        self.extent
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.extent.width
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.extent.height
    }

    /// Number of layers.
    pub const fn depth(&self) -> usize {
        self.extent.depth
    }

    #[inline]
    fn slot(&self, c: Coord3) -> Option<usize> {
        if !self.extent.contains(c) {
            return None;
        }
        Some((c.x * self.extent.height + c.y) * self.extent.depth + c.z)
    }

    fn slot_or_panic(&self, c: Coord3) -> usize {
        match self.slot(c) {
            Some(i) => i,
            None => panic!("cell {c} is outside grid extent {:?}", self.extent),
        }
    }

    /// Objects at `c`, or `None` if the cell is absent or outside the grid.
    ///
    /// A present cell may still be empty after removals.
    pub fn cell(&self, c: Coord3) -> Option<&[T]> {
        self.cells.get(self.slot(c)?)?.as_deref()
    }

    /// Objects at `(x, y, z)`. See [`DenseGrid3D::cell`].
    pub fn cell_at(&self, x: usize, y: usize, z: usize) -> Option<&[T]> {
        self.cell(Coord3::new(x, y, z))
    }

    /// Append `object` to the cell at `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c` is outside the grid.
    pub fn add(&mut self, c: Coord3, object: T) {
        let i = self.slot_or_panic(c);
        self.cells[i].get_or_insert_with(Vec::new).push(object);
    }

    /// Remove every object from the cell at `c`, returning them.
    pub fn clear_cell(&mut self, c: Coord3) -> Option<Vec<T>> {
        let i = self.slot(c)?;
        self.cells[i].take()
    }

    /// Remove every object from the grid, keeping its extent.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Total number of objects across all cells.
    pub fn len(&self) -> usize {
        self.cells.iter().flatten().map(Vec::len).sum()
    }

    /// True if no cell holds an object.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Vec::is_empty)
    }

    /// Iterate non-empty cells in scan order (x-major, then y, then z).
    pub fn occupied(&self) -> impl Iterator<Item = (Coord3, &[T])> + '_ {
        let Extent3 { height, depth, .. } = self.extent;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| {
                let objects = cell.as_deref()?;
                if objects.is_empty() {
                    return None;
                }
                let z = i % depth;
                let y = (i / depth) % height;
                let x = i / (depth * height);
                Some((Coord3::new(x, y, z), objects))
            })
    }

    /// Moore neighborhood of `origin` within this grid.
    ///
    /// See [`moore_locations`](crate::moore_locations) for ordering and edge rules.
    pub fn moore_locations(
        &self,
        origin: Coord3,
        distance: usize,
        boundary: Boundary,
        include_origin: bool,
    ) -> Vec<Coord3> {
        moore_locations(self.extent, origin, distance, boundary, include_origin)
    }

    /// Map a coordinate back into the grid by wrapping each axis.
    ///
    /// Returns `None` for a grid with no cells.
    pub fn wrap(&self, c: Coord3) -> Option<Coord3> {
        if self.extent.is_empty() {
            return None;
        }
        Some(Coord3::new(
            c.x % self.extent.width,
            c.y % self.extent.height,
            c.z % self.extent.depth,
        ))
    }
}

impl<T: Identity> DenseGrid3D<T> {
    /// True if `object` is a member of the cell at `c`.
    pub fn contains_at(&self, c: Coord3, object: &T) -> bool {
        self.cell(c)
            .is_some_and(|objs| objs.iter().any(|o| o.same_object(object)))
    }

    /// Remove `object` from the cell at `c`, returning it if it was there.
    ///
    /// A cell left empty is released.
    pub fn remove(&mut self, c: Coord3, object: &T) -> Option<T> {
        let i = self.slot(c)?;
        let objs = self.cells[i].as_mut()?;
        let pos = objs.iter().position(|o| o.same_object(object))?;
        let removed = objs.remove(pos);
        if objs.is_empty() {
            self.cells[i] = None;
        }
        Some(removed)
    }

    /// Move `object` from `from` to the end of the cell at `to`.
    ///
    /// Returns false (and changes nothing) if the object was not at `from`.
    ///
    /// # Panics
    ///
    /// Panics if `to` is outside the grid.
    pub fn move_object(&mut self, from: Coord3, to: Coord3, object: &T) -> bool {
        let _ = self.slot_or_panic(to);
        match self.remove(from, object) {
            Some(o) => {
                self.add(to, o);
                true
            }
            None => false,
        }
    }

    /// Exhaustive search for `object`, in scan order.
    ///
    /// Returns the first cell containing it, or `None`.
    pub fn find(&self, object: &T) -> Option<Coord3> {
        self.occupied()
            .find(|(_, objs)| objs.iter().any(|o| o.same_object(object)))
            .map(|(c, _)| c)
    }
}

impl<T> core::fmt::Debug for DenseGrid3D<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let allocated = self.cells.iter().filter(|c| c.is_some()).count();
        f.debug_struct("DenseGrid3D")
            .field("extent", &self.extent)
            .field("allocated_cells", &allocated)
            .field("objects", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;
    use alloc::vec;

    #[test]
    fn add_and_read_cells() {
        let mut g = DenseGrid3D::new(3, 3, 2);
        let a = Arc::new("a");
        let b = Arc::new("b");
        g.add(Coord3::new(1, 2, 1), a.clone());
        g.add(Coord3::new(1, 2, 1), b.clone());
        let cell = g.cell_at(1, 2, 1).unwrap();
        assert_eq!(cell.len(), 2);
        assert!(cell[0].same_object(&a) && cell[1].same_object(&b));
        assert!(g.cell_at(0, 0, 0).is_none(), "untouched cells stay absent");
        assert!(g.cell_at(3, 0, 0).is_none());
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn remove_releases_empty_cells_and_keeps_order() {
        let mut g = DenseGrid3D::new(2, 2, 2);
        let c = Coord3::new(0, 1, 1);
        let objs: Vec<_> = (0..3).map(Arc::new).collect();
        for o in &objs {
            g.add(c, o.clone());
        }
        assert!(g.remove(c, &objs[1]).is_some());
        let cell = g.cell(c).unwrap();
        assert!(cell[0].same_object(&objs[0]) && cell[1].same_object(&objs[2]));
        assert!(g.remove(c, &objs[1]).is_none());
        g.remove(c, &objs[0]);
        g.remove(c, &objs[2]);
        assert!(g.cell(c).is_none());
        assert!(g.is_empty());
    }

    #[test]
    fn find_uses_identity_and_scan_order() {
        let mut g = DenseGrid3D::new(4, 4, 4);
        let a = Arc::new(1_u8);
        let twin = Arc::new(1_u8);
        g.add(Coord3::new(3, 0, 0), a.clone());
        g.add(Coord3::new(0, 3, 3), twin.clone());
        assert_eq!(g.find(&a), Some(Coord3::new(3, 0, 0)));
        assert_eq!(g.find(&twin), Some(Coord3::new(0, 3, 3)));
        g.add(Coord3::new(1, 0, 0), a.clone());
        assert_eq!(g.find(&a), Some(Coord3::new(1, 0, 0)), "first in x-major order");
        assert_eq!(g.find(&Arc::new(9_u8)), None);
    }

    #[test]
    fn occupied_reports_coordinates_in_scan_order() {
        let mut g = DenseGrid3D::new(2, 3, 4);
        g.add(Coord3::new(1, 2, 3), Arc::new(()));
        g.add(Coord3::new(0, 1, 2), Arc::new(()));
        let coords: Vec<_> = g.occupied().map(|(c, _)| c).collect();
        assert_eq!(coords, vec![Coord3::new(0, 1, 2), Coord3::new(1, 2, 3)]);
    }

    #[test]
    fn move_object_between_cells() {
        let mut g = DenseGrid3D::new(3, 3, 3);
        let a = Arc::new(());
        g.add(Coord3::new(0, 0, 0), a.clone());
        assert!(g.move_object(Coord3::new(0, 0, 0), Coord3::new(2, 2, 2), &a));
        assert!(g.contains_at(Coord3::new(2, 2, 2), &a));
        assert!(!g.contains_at(Coord3::new(0, 0, 0), &a));
        assert!(!g.move_object(Coord3::new(0, 0, 0), Coord3::new(1, 1, 1), &a));
    }

    #[test]
    fn clear_cell_returns_objects_in_order() {
        let mut g = DenseGrid3D::new(2, 2, 1);
        let c = Coord3::new(1, 1, 0);
        g.add(c, Arc::new(1));
        g.add(c, Arc::new(2));
        g.add(Coord3::new(0, 0, 0), Arc::new(3));
        let taken = g.clear_cell(c).unwrap();
        assert_eq!(taken.iter().map(|o| **o).collect::<Vec<_>>(), [1, 2]);
        assert!(g.cell(c).is_none());
        assert_eq!(g.len(), 1, "other cells untouched");
        assert!(g.clear_cell(c).is_none());
        assert!(g.clear_cell(Coord3::new(5, 0, 0)).is_none());
    }

    #[test]
    fn zero_sized_grid_has_no_cells() {
        let g: DenseGrid3D<Arc<()>> = DenseGrid3D::new(0, 5, 5);
        assert!(g.cell_at(0, 0, 0).is_none());
        assert_eq!(g.occupied().count(), 0);
        assert_eq!(g.wrap(Coord3::new(1, 1, 1)), None);
    }

    #[test]
    #[should_panic(expected = "outside grid extent")]
    fn add_outside_panics() {
        let mut g = DenseGrid3D::new(2, 2, 2);
        g.add(Coord3::new(2, 0, 0), Arc::new(()));
    }
}
