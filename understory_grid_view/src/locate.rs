// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recovering where an object is now, given where it was last seen.
//!
//! [`ObjectLocator::locate`] first checks the last known cell. If the object has left
//! it, the toroidal Moore neighborhood of that cell is searched up to the configured
//! distance, in neighborhood order, and the first cell holding the object wins. An
//! object that moved farther than that in one step is reported as
//! [`Located::Unknown`]; callers that need certainty use [`ObjectLocator::find`],
//! which scans the whole grid.
//!
//! [`LocationHandle`] keeps the last good coordinate for one object and revalidates it
//! on demand.

use core::fmt;
use core::time::Duration;

use understory_dense_grid::{Boundary, Coord3, Identity, SharedGrid};

use crate::options::DEFAULT_SEARCH_DISTANCE;
use crate::types::Located;

/// Bounded search for objects that may have moved since they were last seen.
pub struct ObjectLocator<O> {
    grid: SharedGrid<O>,
    search_distance: usize,
    lock_timeout: Option<Duration>,
}

impl<O> ObjectLocator<O> {
    /// Locator over `grid` with the default search distance and no lock timeout.
    pub fn new(grid: SharedGrid<O>) -> Self {
        Self {
            grid,
            search_distance: DEFAULT_SEARCH_DISTANCE,
            lock_timeout: None,
        }
    }

    /// Set how many cells away from the last known cell to search.
    pub fn with_search_distance(mut self, distance: usize) -> Self {
        self.search_distance = distance;
        self
    }

    /// Give up on a query if the read lock is not available within `timeout`.
    pub fn with_lock_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// The grid being searched.
    pub fn grid(&self) -> &SharedGrid<O> {
        &self.grid
    }

    /// Current search distance.
    pub fn search_distance(&self) -> usize {
        self.search_distance
    }
}

impl<O: Identity> ObjectLocator<O> {
    /// Where `object` is now, starting from `last`.
    ///
    /// Returns `last` unchanged if the object is still there. Otherwise returns the
    /// first neighborhood cell holding it, or [`Located::Unknown`] if none does or the
    /// grid could not be read in time. A `last` outside the grid is wrapped back in and
    /// its wrapped cell is searched too.
    pub fn locate(&self, object: &O, last: Coord3) -> Located {
        let Some(grid) = self.grid.read_within(self.lock_timeout) else {
            log::debug!("grid busy, location of object near {last} not checked");
            return Located::Unknown;
        };
        if grid.contains_at(last, object) {
            return Located::At(last);
        }
        let Some(origin) = grid.wrap(last) else {
            return Located::Unknown;
        };
        let include_origin = origin != last;
        let found = grid
            .moore_locations(
                origin,
                self.search_distance,
                Boundary::Toroidal,
                include_origin,
            )
            .into_iter()
            .find(|&c| grid.contains_at(c, object));
        if found.is_none() {
            log::debug!(
                "object left {last} and is not within {} cells of it",
                self.search_distance
            );
        }
        found.into()
    }

    /// Exhaustive search for `object`, for when there is no last known cell.
    ///
    /// Returns `None` if the object is not on the grid or the grid could not be read in
    /// time.
    pub fn find(&self, object: &O) -> Option<Coord3> {
        let Some(grid) = self.grid.read_within(self.lock_timeout) else {
            log::debug!("grid busy, full search skipped");
            return None;
        };
        grid.find(object)
    }
}

impl<O> Clone for ObjectLocator<O> {
    fn clone(&self) -> Self {
        Self {
            grid: self.grid.clone(),
            search_distance: self.search_distance,
            lock_timeout: self.lock_timeout,
        }
    }
}

impl<O> fmt::Debug for ObjectLocator<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectLocator")
            .field("search_distance", &self.search_distance)
            .field("lock_timeout", &self.lock_timeout)
            .finish_non_exhaustive()
    }
}

/// One object and the last cell it was confirmed in.
///
/// [`LocationHandle::location`] never reports a cell the object is not in: it either
/// confirms or updates the cached cell, or returns [`Located::Unknown`] and keeps the
/// last good cell for [`LocationHandle::last_known`].
pub struct LocationHandle<O> {
    object: O,
    location: Coord3,
    locator: ObjectLocator<O>,
}

impl<O: Identity> LocationHandle<O> {
    /// Bind `object`, last seen at `location`, to `locator`.
    pub fn new(object: O, location: Coord3, locator: ObjectLocator<O>) -> Self {
        Self {
            object,
            location,
            locator,
        }
    }

    /// The tracked object.
    pub fn object(&self) -> &O {
        &self.object
    }

    /// Last cell the object was confirmed in.
    pub fn last_known(&self) -> Coord3 {
        self.location
    }

    /// Revalidate and return the object's current cell.
    pub fn location(&mut self) -> Located {
        let located = self.locator.locate(&self.object, self.location);
        if let Located::At(c) = located {
            self.location = c;
        }
        located
    }

    /// Current cell as text, or `"location unknown"`.
    pub fn location_name(&mut self) -> String {
        self.location().to_string()
    }

    /// True if `other` is the tracked object.
    pub fn same_object(&self, other: &O) -> bool {
        self.object.same_object(other)
    }

    /// Stop tracking and return the object.
    pub fn into_object(self) -> O {
        self.object
    }
}

impl<O> fmt::Debug for LocationHandle<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationHandle")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LOCATION_UNKNOWN;
    use std::sync::Arc;
    use understory_dense_grid::DenseGrid3D;

    fn grid_with(extent: usize, at: Coord3, object: &Arc<u32>) -> SharedGrid<Arc<u32>> {
        let mut grid = DenseGrid3D::new(extent, extent, extent);
        grid.add(at, object.clone());
        SharedGrid::new(grid)
    }

    #[test]
    fn locate_is_idempotent_without_mutation() {
        let a = Arc::new(1);
        let at = Coord3::new(2, 2, 2);
        let locator = ObjectLocator::new(grid_with(5, at, &a));
        assert_eq!(locator.locate(&a, at), Located::At(at));
        assert_eq!(locator.locate(&a, at), Located::At(at));
    }

    #[test]
    fn handle_follows_a_neighbouring_move() {
        let a = Arc::new(1);
        let start = Coord3::new(2, 2, 2);
        let shared = grid_with(5, start, &a);
        let mut handle = LocationHandle::new(a.clone(), start, ObjectLocator::new(shared.clone()));
        assert_eq!(handle.location(), Located::At(start));

        let next = Coord3::new(3, 2, 2);
        assert!(shared.write().move_object(start, next, &a));
        assert_eq!(handle.location(), Located::At(next));
        assert_eq!(handle.last_known(), next);
        assert_eq!(handle.location_name(), "(3, 2, 2)");
    }

    #[test]
    fn search_wraps_around_the_edges() {
        let a = Arc::new(1);
        let start = Coord3::new(0, 0, 0);
        let shared = grid_with(5, start, &a);
        let locator = ObjectLocator::new(shared.clone()).with_search_distance(1);
        shared
            .write()
            .move_object(start, Coord3::new(4, 0, 0), &a);
        assert_eq!(locator.locate(&a, start), Located::At(Coord3::new(4, 0, 0)));
    }

    #[test]
    fn object_beyond_the_radius_is_lost_but_remembered() {
        let a = Arc::new(1);
        let start = Coord3::new(2, 2, 2);
        let far = Coord3::new(10, 10, 10);
        let shared = grid_with(20, start, &a);
        let locator = ObjectLocator::new(shared.clone());
        let mut handle = LocationHandle::new(a.clone(), start, locator.clone());
        shared.write().move_object(start, far, &a);

        assert_eq!(handle.location(), Located::Unknown);
        assert_eq!(handle.location_name(), LOCATION_UNKNOWN);
        assert_eq!(handle.last_known(), start);
        assert_eq!(locator.find(&a), Some(far), "full search still finds it");
    }

    #[test]
    fn identity_not_value_decides_membership() {
        let a = Arc::new(7);
        let twin = Arc::new(7);
        let at = Coord3::new(1, 1, 1);
        let locator = ObjectLocator::new(grid_with(3, at, &a));
        assert_eq!(locator.locate(&twin, at), Located::Unknown);
        assert_eq!(locator.find(&twin), None);
    }

    #[test]
    fn handle_gives_back_its_object() {
        let a = Arc::new(1);
        let at = Coord3::new(0, 1, 0);
        let locator = ObjectLocator::new(grid_with(2, at, &a)).with_search_distance(1);
        assert_eq!(locator.search_distance(), 1);
        let handle = LocationHandle::new(a.clone(), at, locator);
        assert!(handle.same_object(&a));
        assert!(!handle.same_object(&Arc::new(1)));
        assert!(handle.into_object().same_object(&a));
    }

    #[test]
    fn out_of_range_last_is_wrapped_and_checked() {
        let a = Arc::new(1);
        let at = Coord3::new(1, 0, 0);
        let locator = ObjectLocator::new(grid_with(4, at, &a)).with_search_distance(0);
        assert_eq!(locator.locate(&a, Coord3::new(5, 4, 8)), Located::At(at));
    }

    #[test]
    fn busy_grid_reports_unknown() {
        let a = Arc::new(1);
        let at = Coord3::new(0, 0, 0);
        let shared = grid_with(2, at, &a);
        let locator = ObjectLocator::new(shared.clone())
            .with_lock_timeout(Some(Duration::from_millis(5)));
        let _stepping = shared.write();
        assert_eq!(locator.locate(&a, at), Located::Unknown);
        assert_eq!(locator.find(&a), None);
    }
}
