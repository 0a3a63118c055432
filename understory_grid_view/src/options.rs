// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View configuration: decorations, search radius, and lock policy.

use core::time::Duration;

use crate::render::{Color, Stroke};

/// Default radius, in cells, of the neighborhood searched for a moved object.
pub const DEFAULT_SEARCH_DISTANCE: usize = 3;

/// Grid lines drawn over the cells every `modulus` columns and rows.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridLines {
    /// Line color.
    pub color: Color,
    /// Draw a line every this many cells. Zero draws none.
    pub modulus: usize,
    /// Line width as a fraction of the horizontal cell scale.
    pub fraction: f64,
    /// Lower bound on the line width in pixels.
    pub min_width: f64,
    /// Upper bound on the line width in pixels.
    pub max_width: f64,
}

impl Default for GridLines {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            modulus: 10,
            fraction: 0.125,
            min_width: 1.0,
            max_width: f64::INFINITY,
        }
    }
}

impl GridLines {
    /// Stroke for a horizontal cell scale of `scale` pixels.
    pub fn stroke(&self, scale: f64) -> Stroke {
        Stroke {
            color: self.color,
            width: bounded_width(scale * self.fraction, self.min_width, self.max_width),
        }
    }
}

/// Outline drawn around the whole draw rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Border {
    /// Line color.
    pub color: Color,
    /// Line width as a fraction of the horizontal cell scale.
    pub fraction: f64,
    /// Lower bound on the line width in pixels.
    pub min_width: f64,
    /// Upper bound on the line width in pixels.
    pub max_width: f64,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            color: Color::RED,
            fraction: 0.125,
            min_width: 1.0,
            max_width: f64::INFINITY,
        }
    }
}

impl Border {
    /// Stroke for a horizontal cell scale of `scale` pixels.
    pub fn stroke(&self, scale: f64) -> Stroke {
        Stroke {
            color: self.color,
            width: bounded_width(scale * self.fraction, self.min_width, self.max_width),
        }
    }
}

// `f64::clamp` panics on inverted bounds; configuration should not be able to do that.
fn bounded_width(w: f64, min: f64, max: f64) -> f64 {
    w.max(min).min(max)
}

/// Options for a [`GridView`](crate::GridView).
#[derive(Clone, Debug, PartialEq)]
pub struct ViewOptions {
    /// Grid-line overlay, off when `None`.
    pub grid_lines: Option<GridLines>,
    /// Border around the draw rectangle, off when `None`.
    pub border: Option<Border>,
    /// Radius of the neighborhood searched when an object left its last known cell.
    pub search_distance: usize,
    /// How long to wait for the grid read lock. `None` waits indefinitely; on timeout
    /// the operation does nothing.
    pub lock_timeout: Option<Duration>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            grid_lines: None,
            border: None,
            search_distance: DEFAULT_SEARCH_DISTANCE,
            lock_timeout: None,
        }
    }
}

impl ViewOptions {
    /// Turn the grid-line overlay on.
    pub fn with_grid_lines(mut self, lines: GridLines) -> Self {
        self.grid_lines = Some(lines);
        self
    }

    /// Turn the border on.
    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    /// Set the relocation search radius.
    pub fn with_search_distance(mut self, distance: usize) -> Self {
        self.search_distance = distance;
        self
    }

    /// Bound the wait for the grid read lock.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_width_follows_scale_within_bounds() {
        let lines = GridLines::default();
        assert_eq!(lines.stroke(16.0).width, 2.0);
        assert_eq!(lines.stroke(2.0).width, 1.0, "clamped to the minimum");
        let capped = Border {
            max_width: 3.0,
            ..Border::default()
        };
        assert_eq!(capped.stroke(100.0).width, 3.0);
    }
}
