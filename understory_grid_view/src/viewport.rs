// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping between grid cells and viewport pixels.
//!
//! The grid's width and height are stretched over the draw rectangle; depth is not
//! projected, every layer of a column shares that column's pixels. Cell bounds are
//! truncated to whole pixels by computing both edges from the unrounded scale, so
//! neighbouring cells always share an edge: no gaps, no overlaps.

use core::ops::Range;

use kurbo::{Point, Rect, Vec2};
use understory_dense_grid::{Coord3, Extent3};

/// Where the grid is drawn and which part of it needs work.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportGeometry {
    /// Rectangle the whole grid is stretched over.
    pub draw: Rect,
    /// Region to draw, or the region to hit-test.
    pub clip: Rect,
    /// Ask renderers for precise rather than fast output.
    pub precise: bool,
}

impl ViewportGeometry {
    /// Geometry with an explicit clip.
    pub const fn new(draw: Rect, clip: Rect) -> Self {
        Self {
            draw,
            clip,
            precise: false,
        }
    }

    /// Geometry whose clip is the whole draw rectangle.
    pub const fn full(draw: Rect) -> Self {
        Self::new(draw, draw)
    }

    /// The same geometry with a different clip.
    pub const fn with_clip(self, clip: Rect) -> Self {
        Self { clip, ..self }
    }

    /// Cell mapper for a grid of `extent`.
    ///
    /// Returns `None` if the grid has no cells or the draw rectangle yields a scale that
    /// is not finite and positive.
    pub fn mapper(&self, extent: Extent3) -> Option<CellMapper> {
        if extent.is_empty() {
            return None;
        }
        let draw = self.draw.abs();
        let scale = Vec2::new(
            draw.width() / extent.width as f64,
            draw.height() / extent.height as f64,
        );
        let valid = |s: f64| s.is_finite() && s > 0.0;
        if !valid(scale.x) || !valid(scale.y) {
            return None;
        }
        Some(CellMapper {
            origin: draw.origin(),
            scale,
        })
    }

    /// Cells whose pixels may intersect the clip.
    ///
    /// The clip is padded by one pixel on each side to absorb truncation, converted to
    /// cell indices, widened by one index at each boundary, and clamped to the grid.
    /// Every cell whose footprint intersects the clip is included; a few neighbours
    /// outside it may be too. Depth is always visited in full.
    pub fn visit_range(&self, extent: Extent3) -> VisitRange {
        let Some(mapper) = self.mapper(extent) else {
            return VisitRange::EMPTY;
        };
        let clip = self.clip.abs();
        let x = axis_range(
            clip.x0 - mapper.origin.x,
            clip.x1 - mapper.origin.x,
            mapper.scale.x,
            extent.width,
        );
        let y = axis_range(
            clip.y0 - mapper.origin.y,
            clip.y1 - mapper.origin.y,
            mapper.scale.y,
            extent.height,
        );
        if x.is_empty() || y.is_empty() {
            return VisitRange::EMPTY;
        }
        VisitRange {
            x,
            y,
            z: 0..extent.depth,
        }
    }
}

fn axis_range(lo: f64, hi: f64, scale: f64, extent: usize) -> Range<usize> {
    let start = ((lo - 1.0) / scale).floor() - 1.0;
    let end = ((hi + 1.0) / scale).floor() + 2.0;
    let clamp = |v: f64| -> usize {
        if v.is_nan() || v <= 0.0 {
            0
        } else if v >= extent as f64 {
            extent
        } else {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "v is a non-negative whole number below the extent."
            )]
            let i = v as usize;
            i
        }
    };
    let (start, end) = (clamp(start), clamp(end));
    if start >= end { 0..0 } else { start..end }
}

/// Affine map from cell indices to pixel rectangles for one draw rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellMapper {
    /// Top-left corner of the draw rectangle.
    pub origin: Point,
    /// Pixels per cell along x and y.
    pub scale: Vec2,
}

impl CellMapper {
    /// Pixel rectangle of column `x`, row `y`.
    ///
    /// Both edges are truncated from the unrounded position, so `cell_rect(x, y).x1`
    /// equals `cell_rect(x + 1, y).x0` exactly. At scales below one pixel a rectangle
    /// may be empty.
    pub fn cell_rect(&self, x: usize, y: usize) -> Rect {
        let edge = |origin: f64, scale: f64, i: usize| (origin + scale * i as f64).trunc();
        Rect::new(
            edge(self.origin.x, self.scale.x, x),
            edge(self.origin.y, self.scale.y, y),
            edge(self.origin.x, self.scale.x, x + 1),
            edge(self.origin.y, self.scale.y, y + 1),
        )
    }
}

/// Half-open cell index ranges to visit, clamped to the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitRange {
    /// Columns.
    pub x: Range<usize>,
    /// Rows.
    pub y: Range<usize>,
    /// Layers; always the full depth unless the range is empty.
    pub z: Range<usize>,
}

impl VisitRange {
    /// A range that visits nothing.
    pub const EMPTY: Self = Self {
        x: 0..0,
        y: 0..0,
        z: 0..0,
    };

    /// True if no cell is visited.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// True if the range covers `c`.
    pub fn contains(&self, c: Coord3) -> bool {
        self.x.contains(&c.x) && self.y.contains(&c.y) && self.z.contains(&c.z)
    }

    /// Cells in traversal order: x-major, then y, then z.
    pub fn cells(&self) -> impl Iterator<Item = Coord3> + '_ {
        self.x.clone().flat_map(move |x| {
            self.y
                .clone()
                .flat_map(move |y| self.z.clone().map(move |z| Coord3::new(x, y, z)))
        })
    }
}
