// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-cell object filters.
//!
//! A filter sees a cell's full object list and may substitute a reduced or reordered
//! list for the scan to use instead. The output buffer is cleared before every cell,
//! so a filter never sees what it produced for the previous cell.
//!
//! Any `Fn(&[O], &mut Vec<O>) -> bool` closure is a filter.
//!
//! ```
//! use understory_grid_view::CellFilter;
//!
//! // Keep only even values; leave cells without any untouched.
//! let evens = |cell: &[u32], out: &mut Vec<u32>| {
//!     out.extend(cell.iter().copied().filter(|v| v % 2 == 0));
//!     !out.is_empty()
//! };
//! let mut out = Vec::new();
//! assert!(evens.filter(&[1, 2, 3, 4], &mut out));
//! assert_eq!(out, [2, 4]);
//! ```

/// Chooses which of a cell's objects the scan touches.
pub trait CellFilter<O> {
    /// Inspect `cell` and optionally fill `out`, which arrives empty.
    ///
    /// Return true to use `out` in place of `cell` for this cell only, false to use
    /// `cell` unchanged.
    fn filter(&self, cell: &[O], out: &mut Vec<O>) -> bool;
}

impl<O, F> CellFilter<O> for F
where
    F: Fn(&[O], &mut Vec<O>) -> bool,
{
    fn filter(&self, cell: &[O], out: &mut Vec<O>) -> bool {
        self(cell, out)
    }
}

/// Keep only the first object of each cell (the one drawn underneath).
#[derive(Copy, Clone, Debug, Default)]
pub struct FirstOnly;

impl<O: Clone> CellFilter<O> for FirstOnly {
    fn filter(&self, cell: &[O], out: &mut Vec<O>) -> bool {
        if cell.len() <= 1 {
            return false;
        }
        out.push(cell[0].clone());
        true
    }
}

/// Keep only the last object of each cell (the one drawn on top).
#[derive(Copy, Clone, Debug, Default)]
pub struct LastOnly;

impl<O: Clone> CellFilter<O> for LastOnly {
    fn filter(&self, cell: &[O], out: &mut Vec<O>) -> bool {
        match cell {
            [] | [_] => false,
            [.., last] => {
                out.push(last.clone());
                true
            }
        }
    }
}
