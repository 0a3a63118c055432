// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moore neighborhoods over a 3D extent.
//!
//! A Moore neighborhood of distance `d` is the `(2d+1)³` block of cells centered on an
//! origin. With [`Boundary::Toroidal`] the block wraps around the grid edges; when the
//! block is wider than an axis the whole axis is taken once, so no cell is reported
//! twice. With [`Boundary::Bounded`] the block is clipped at the edges.

use alloc::vec::Vec;

use crate::types::{Boundary, Coord3, Extent3};

/// Cells on one axis covered by a neighborhood, in enumeration order.
fn axis_span(center: usize, distance: usize, extent: usize, boundary: Boundary) -> Vec<usize> {
    debug_assert!(center < extent, "neighborhood origin must lie inside the grid");
    match boundary {
        Boundary::Toroidal => {
            let span = distance.saturating_mul(2).saturating_add(1);
            if span >= extent {
                (0..extent).collect()
            } else {
                // distance < extent / 2 here, so the subtraction cannot wrap.
                let start = center + extent - distance;
                (0..span).map(|i| (start + i) % extent).collect()
            }
        }
        Boundary::Bounded => {
            let lo = center.saturating_sub(distance);
            let hi = center.saturating_add(distance).min(extent - 1);
            (lo..=hi).collect()
        }
    }
}

/// Enumerate the Moore neighborhood of `origin` within `extent`.
///
/// Cells come back x-major, then y, then z, each axis starting at its lowest offset.
/// The origin itself is skipped unless `include_origin` is set. Returns nothing for an
/// empty extent or an origin outside the extent.
pub fn moore_locations(
    extent: Extent3,
    origin: Coord3,
    distance: usize,
    boundary: Boundary,
    include_origin: bool,
) -> Vec<Coord3> {
    if extent.is_empty() || !extent.contains(origin) {
        return Vec::new();
    }
    let xs = axis_span(origin.x, distance, extent.width, boundary);
    let ys = axis_span(origin.y, distance, extent.height, boundary);
    let zs = axis_span(origin.z, distance, extent.depth, boundary);
    let mut out = Vec::with_capacity(xs.len() * ys.len() * zs.len());
    for &x in &xs {
        for &y in &ys {
            for &z in &zs {
                let c = Coord3::new(x, y, z);
                if !include_origin && c == origin {
                    continue;
                }
                out.push(c);
            }
        }
    }
    out
}
