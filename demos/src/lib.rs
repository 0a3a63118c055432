// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces for the grid view demos: a character-cell canvas and a glyph renderer.

use std::sync::Arc;

use kurbo::{Line, Point, Rect};
use understory_grid_view::{Canvas, Classify, DrawInfo, ObjectRenderer, Stroke};

/// Pixels per character cell of an [`AsciiCanvas`].
pub const PX_PER_CHAR: f64 = 10.0;

/// A tiny raster where every character stands for a 10×10 pixel block.
#[derive(Clone, Debug)]
pub struct AsciiCanvas {
    cols: usize,
    rows: usize,
    chars: Vec<char>,
}

impl AsciiCanvas {
    /// Blank canvas of `cols` by `rows` characters.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            chars: vec!['.'; cols * rows],
        }
    }

    /// Pixel bounds covered by the canvas.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.cols as f64 * PX_PER_CHAR,
            self.rows as f64 * PX_PER_CHAR,
        )
    }

    /// Set the character under pixel `pt`, ignoring points off the canvas.
    pub fn put(&mut self, pt: Point, ch: char) {
        if pt.x < 0.0 || pt.y < 0.0 {
            return;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Non-negative pixel positions; anything past the canvas is dropped below."
        )]
        let (col, row) = (
            (pt.x / PX_PER_CHAR) as usize,
            (pt.y / PX_PER_CHAR) as usize,
        );
        if col < self.cols && row < self.rows {
            self.chars[row * self.cols + col] = ch;
        }
    }

    /// The canvas as lines of text.
    pub fn render(&self) -> String {
        self.chars
            .chunks(self.cols.max(1))
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Canvas for AsciiCanvas {
    fn stroke_line(&mut self, line: Line, _: &Stroke) {
        let ch = if line.p0.x == line.p1.x { '|' } else { '-' };
        let steps = (line.length() / PX_PER_CHAR).ceil().max(1.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Small positive step count derived from canvas-sized lines."
        )]
        let n = steps as usize;
        for i in 0..n {
            let t = (i as f64 + 0.5) / steps;
            self.put(line.p0.lerp(line.p1, t), ch);
        }
    }

    fn stroke_rect(&mut self, rect: Rect, _: &Stroke) {
        let inset = PX_PER_CHAR / 2.0;
        for corner in [
            Point::new(rect.x0 + inset, rect.y0 + inset),
            Point::new(rect.x1 - inset, rect.y0 + inset),
            Point::new(rect.x0 + inset, rect.y1 - inset),
            Point::new(rect.x1 - inset, rect.y1 - inset),
        ] {
            self.put(corner, '+');
        }
    }
}

/// What a demo agent is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Species {
    /// Moves every step.
    Ant,
    /// Stays put.
    Food,
}

/// A demo agent.
#[derive(Debug)]
pub struct Agent {
    /// Display name.
    pub name: String,
    /// Renderer lookup key.
    pub species: Species,
}

impl Agent {
    /// A shareable agent.
    pub fn new(name: &str, species: Species) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            species,
        })
    }
}

impl Classify for Agent {
    type Kind = Species;

    fn kind(&self) -> Species {
        self.species
    }
}

/// Paints one character at the cell center; upper case when selected.
#[derive(Copy, Clone, Debug)]
pub struct Glyph(pub char);

impl ObjectRenderer<Arc<Agent>, AsciiCanvas> for Glyph {
    fn name(&self) -> &str {
        "glyph"
    }

    fn paint(&self, _: &Arc<Agent>, canvas: &mut AsciiCanvas, info: &DrawInfo) {
        let ch = if info.selected {
            self.0.to_ascii_uppercase()
        } else {
            self.0
        };
        canvas.put(info.center(), ch);
    }

    fn hit_test(&self, _: &Arc<Agent>, info: &DrawInfo) -> bool {
        info.footprint().intersect(info.clip).area() > 0.0
    }
}
