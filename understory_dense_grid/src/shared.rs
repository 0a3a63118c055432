// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared, lock-guarded access to a grid.
//!
//! The simulation stepper mutates the grid under [`SharedGrid::write`]; observers such as
//! a viewer take [`SharedGrid::read`] (or a timed read) for the whole of one operation, so
//! they never see a grid halfway through a step.
//!
//! Observer reads are recursive: a thread that already holds a read guard can read
//! again (a renderer revalidating a location mid-scan, say) even while a writer is
//! queued. Writers still wait for every reader to finish.

use alloc::sync::Arc;
use core::fmt;
use core::time::Duration;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::grid::DenseGrid3D;

/// Cloneable handle to a grid guarded by a reader/writer lock.
pub struct SharedGrid<T> {
    inner: Arc<RwLock<DenseGrid3D<T>>>,
}

impl<T> SharedGrid<T> {
    /// Wrap a grid for shared access.
    pub fn new(grid: DenseGrid3D<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(grid)),
        }
    }

    /// Block until shared read access is available.
    ///
    /// Never blocks behind a queued writer while this thread already reads.
    pub fn read(&self) -> RwLockReadGuard<'_, DenseGrid3D<T>> {
        self.inner.read_recursive()
    }

    /// Read access if it is available right now.
    pub fn try_read(&self) -> Option<RwLockReadGuard<'_, DenseGrid3D<T>>> {
        self.inner.try_read_recursive()
    }

    /// Read access, waiting at most `timeout` when one is given.
    ///
    /// `None` waits indefinitely. Returns `None` if the timeout elapsed first.
    pub fn read_within(
        &self,
        timeout: Option<Duration>,
    ) -> Option<RwLockReadGuard<'_, DenseGrid3D<T>>> {
        match timeout {
            None => Some(self.inner.read_recursive()),
            Some(d) => self.inner.try_read_recursive_for(d),
        }
    }

    /// Block until exclusive write access is available.
    pub fn write(&self) -> RwLockWriteGuard<'_, DenseGrid3D<T>> {
        self.inner.write()
    }

    /// True if both handles share the same grid.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for SharedGrid<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> From<DenseGrid3D<T>> for SharedGrid<T> {
    fn from(grid: DenseGrid3D<T>) -> Self {
        Self::new(grid)
    }
}

impl<T> fmt::Debug for SharedGrid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("SharedGrid");
        s.field("handles", &Arc::strong_count(&self.inner));
        match self.inner.try_read_recursive() {
            Some(grid) => s.field("grid", &*grid),
            None => s.field("grid", &"<locked>"),
        };
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord3;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn clones_share_the_grid() {
        let shared = SharedGrid::new(DenseGrid3D::new(2, 2, 2));
        let other = shared.clone();
        shared.write().add(Coord3::new(1, 1, 1), Arc::new(()));
        assert_eq!(other.read().len(), 1);
        assert!(shared.ptr_eq(&other));
    }

    #[test]
    fn timed_read_gives_up_while_writer_holds_the_lock() {
        let shared: SharedGrid<Arc<()>> = SharedGrid::new(DenseGrid3D::new(1, 1, 1));
        let guard = shared.write();
        assert!(
            shared
                .read_within(Some(Duration::from_millis(1)))
                .is_none()
        );
        assert!(shared.try_read().is_none());
        drop(guard);
        assert!(shared.read_within(Some(Duration::from_millis(1))).is_some());
        assert!(shared.read_within(None).is_some());
    }

    #[test]
    fn nested_read_does_not_wait_for_a_queued_writer() {
        let shared = SharedGrid::new(DenseGrid3D::new(2, 1, 1));
        let a = Arc::new(());
        shared.write().add(Coord3::new(0, 0, 0), a.clone());

        let outer = shared.read();
        let (started, waiting) = mpsc::channel();
        let stepper = {
            let shared = shared.clone();
            let a = a.clone();
            thread::spawn(move || {
                started.send(()).unwrap();
                shared
                    .write()
                    .move_object(Coord3::new(0, 0, 0), Coord3::new(1, 0, 0), &a)
            })
        };
        waiting.recv().unwrap();
        // Give the stepper time to park in `write`.
        thread::sleep(Duration::from_millis(50));

        let inner = shared.read_within(Some(Duration::from_secs(2)));
        assert!(inner.is_some(), "nested read blocked behind the writer");
        assert!(shared.read().contains_at(Coord3::new(0, 0, 0), &a));
        drop(inner);
        drop(outer);
        assert!(stepper.join().unwrap(), "writer runs once readers are gone");
        assert!(shared.read().contains_at(Coord3::new(1, 0, 0), &a));
    }
}
