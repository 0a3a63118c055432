// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_grid_view --heading-base-level=0

//! Understory Grid View: draw, hit-test, and track objects of a dense 3D grid through a
//! 2D viewport.
//!
//! The grid's width and height are stretched over a draw rectangle; depth is flattened,
//! so every layer of a column shares its pixels. A viewer built on this crate:
//!
//! - Draws exactly the cells that may intersect a clip rectangle ([`GridView::draw`]).
//! - Answers "what is under this pixel?" with the same traversal
//!   ([`GridView::hit_test_point`], [`GridView::hit_test_rect`]).
//! - Keeps a selected object anchored across simulation steps with a
//!   [`LocationHandle`], which cheaply confirms the last known cell or searches its
//!   toroidal neighborhood ([`ObjectLocator`]).
//!
//! ## API overview
//!
//! - [`ViewportGeometry`] and [`CellMapper`]: cell-to-pixel mapping and the visit range.
//! - [`GridView`]: the traversal, owning a [`SharedGrid`](understory_dense_grid::SharedGrid),
//!   a [`RendererRegistry`], an optional [`CellFilter`], a [`Selection`], and
//!   [`ViewOptions`].
//! - [`ObjectRenderer`]: paints and hit-tests one kind of object, see [`Classify`].
//! - [`Located`]: a cell, or [`Located::Unknown`] when the object moved out of reach.
//!
//! Configuration mistakes (no renderer for a kind, a renderer without 2D support) are
//! reported as [`ViewError`]. Missing data never is.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade: `trace` for per-scan counts, `debug` for
//! lock timeouts and lost objects, `error` for renderer configuration errors.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use kurbo::{Line, Point, Rect};
//! use understory_dense_grid::{Coord3, DenseGrid3D, SharedGrid};
//! use understory_grid_view::{
//!     Canvas, Classify, DrawInfo, GridView, Located, ObjectRenderer, RendererRegistry,
//!     Stroke, ViewportGeometry,
//! };
//!
//! struct Bug;
//! impl Classify for Bug {
//!     type Kind = ();
//!     fn kind(&self) {}
//! }
//!
//! #[derive(Default)]
//! struct Screen(Vec<Point>);
//! impl Canvas for Screen {
//!     fn stroke_line(&mut self, _: Line, _: &Stroke) {}
//!     fn stroke_rect(&mut self, _: Rect, _: &Stroke) {}
//! }
//!
//! struct Dot;
//! impl ObjectRenderer<Arc<Bug>, Screen> for Dot {
//!     fn paint(&self, _: &Arc<Bug>, screen: &mut Screen, info: &DrawInfo) {
//!         screen.0.push(info.center());
//!     }
//!     fn hit_test(&self, _: &Arc<Bug>, info: &DrawInfo) -> bool {
//!         info.footprint().intersect(info.clip).area() > 0.0
//!     }
//! }
//!
//! let bug = Arc::new(Bug);
//! let mut grid = DenseGrid3D::new(10, 10, 1);
//! grid.add(Coord3::new(3, 4, 0), bug.clone());
//! let shared = SharedGrid::new(grid);
//!
//! let view = GridView::new(RendererRegistry::new().with_default(Dot)).with_grid(shared.clone());
//! let geometry = ViewportGeometry::full(Rect::new(0.0, 0.0, 100.0, 100.0));
//!
//! let mut screen = Screen::default();
//! view.draw(&mut screen, &geometry).unwrap();
//! assert_eq!(screen.0, [Point::new(35.0, 45.0)]);
//!
//! let hit = view.hit_test_topmost(&geometry, Point::new(31.0, 42.0)).unwrap().unwrap();
//! let mut handle = view.handle_for(&hit).unwrap();
//!
//! // The simulation steps the bug one cell over; the handle follows it.
//! shared.write().move_object(Coord3::new(3, 4, 0), Coord3::new(4, 4, 0), &bug);
//! assert_eq!(handle.location(), Located::At(Coord3::new(4, 4, 0)));
//! ```

pub mod error;
pub mod filter;
pub mod locate;
pub mod options;
pub mod render;
pub mod types;
pub mod view;
pub mod viewport;

pub use error::ViewError;
pub use filter::{CellFilter, FirstOnly, LastOnly};
pub use locate::{LocationHandle, ObjectLocator};
pub use options::{Border, DEFAULT_SEARCH_DISTANCE, GridLines, ViewOptions};
pub use render::{
    Canvas, Capabilities, Classify, Color, ObjectRenderer, RendererRegistry, Stroke,
};
pub use types::{Candidate, DrawInfo, LOCATION_UNKNOWN, Located, Selection};
pub use view::{GridView, ScanSummary};
pub use viewport::{CellMapper, ViewportGeometry, VisitRange};
