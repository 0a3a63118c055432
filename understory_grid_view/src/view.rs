// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The grid view: one traversal shared by drawing and hit-testing.
//!
//! ## Traversal
//!
//! Both [`GridView::draw`] and the hit tests hold the grid's read lock for the whole
//! call, compute the cells that may intersect the clip (see
//! [`ViewportGeometry::visit_range`]), and walk them x-major, then y, then z. Each
//! non-empty cell's objects, optionally replaced by the configured [`CellFilter`], are
//! handed to the renderer resolved for their kind, in cell order.
//!
//! Because objects later in the walk are painted over earlier ones, the last hit
//! candidate is the topmost one on screen.
//!
//! ## Failure
//!
//! A missing renderer or one that cannot project to 2D stops the call with a
//! [`ViewError`]. Having no grid, a grid with a zero extent, or a grid that stays
//! locked past [`ViewOptions::lock_timeout`] is not an error: nothing is drawn and no
//! candidates are returned.

use core::fmt;

use kurbo::{Line, Point, Rect, Size};
use understory_dense_grid::{Coord3, Extent3, Identity, SharedGrid};

use crate::error::ViewError;
use crate::filter::CellFilter;
use crate::locate::{LocationHandle, ObjectLocator};
use crate::options::ViewOptions;
use crate::render::{Canvas, Classify, RendererRegistry};
use crate::types::{Candidate, DrawInfo, Located, Selection};
use crate::viewport::{CellMapper, ViewportGeometry};

/// Counts from one draw call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Non-empty cells visited.
    pub cells: usize,
    /// Objects handed to a renderer.
    pub objects: usize,
}

enum Pass<'a, O, S: ?Sized> {
    Draw(&'a mut S),
    Hit(&'a mut Vec<Candidate<O>>),
}

/// Draws and hit-tests a shared dense grid through a 2D viewport.
///
/// `O` is the object type stored in the grid and `S` the render surface.
pub struct GridView<O: Classify, S: ?Sized> {
    grid: Option<SharedGrid<O>>,
    renderers: RendererRegistry<O, S>,
    filter: Option<Box<dyn CellFilter<O>>>,
    selection: Selection<O>,
    options: ViewOptions,
}

impl<O, S> GridView<O, S>
where
    O: Classify + Identity + Clone,
    S: Canvas + ?Sized,
{
    /// A view without a grid that resolves renderers from `renderers`.
    pub fn new(renderers: RendererRegistry<O, S>) -> Self {
        Self {
            grid: None,
            renderers,
            filter: None,
            selection: Selection::default(),
            options: ViewOptions::default(),
        }
    }

    /// Builder form of [`GridView::set_grid`].
    pub fn with_grid(mut self, grid: SharedGrid<O>) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Show `grid`, or nothing when `None`.
    pub fn set_grid(&mut self, grid: Option<SharedGrid<O>>) {
        self.grid = grid;
    }

    /// The grid being shown.
    pub fn grid(&self) -> Option<&SharedGrid<O>> {
        self.grid.as_ref()
    }

    /// Use `filter` to choose each cell's objects, in both draw and hit-test calls.
    pub fn set_filter<F>(&mut self, filter: F)
    where
        F: CellFilter<O> + 'static,
    {
        self.filter = Some(Box::new(filter));
    }

    /// Remove the cell filter.
    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    /// The renderer registry, for adding or replacing renderers.
    pub fn renderers_mut(&mut self) -> &mut RendererRegistry<O, S> {
        &mut self.renderers
    }

    /// Current options.
    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Replace the options.
    pub fn set_options(&mut self, options: ViewOptions) {
        self.options = options;
    }

    /// Builder form of [`GridView::set_options`].
    pub fn with_options(mut self, options: ViewOptions) -> Self {
        self.options = options;
        self
    }

    /// Objects drawn with the selection hint.
    pub fn selection(&self) -> &Selection<O> {
        &self.selection
    }

    /// Replace the selection.
    pub fn set_selection(&mut self, selection: Selection<O>) {
        self.selection = selection;
    }

    /// Mutable access to the selection.
    pub fn selection_mut(&mut self) -> &mut Selection<O> {
        &mut self.selection
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Paint the cells intersecting `geometry.clip` onto `surface`, then any configured
    /// grid lines and border.
    pub fn draw(
        &self,
        surface: &mut S,
        geometry: &ViewportGeometry,
    ) -> Result<ScanSummary, ViewError> {
        self.scan(geometry, &mut Pass::Draw(surface))
    }

    /// Objects whose renderers report a hit against `region`, in traversal order.
    ///
    /// The last candidate is the topmost.
    pub fn hit_test_rect(
        &self,
        geometry: &ViewportGeometry,
        region: Rect,
    ) -> Result<Vec<Candidate<O>>, ViewError> {
        let mut hits = Vec::new();
        self.scan(&geometry.with_clip(region), &mut Pass::Hit(&mut hits))?;
        Ok(hits)
    }

    /// Objects under the pixel at `pt`, in traversal order.
    pub fn hit_test_point(
        &self,
        geometry: &ViewportGeometry,
        pt: Point,
    ) -> Result<Vec<Candidate<O>>, ViewError> {
        self.hit_test_rect(geometry, Rect::from_origin_size(pt, Size::new(1.0, 1.0)))
    }

    /// The topmost object under the pixel at `pt`.
    pub fn hit_test_topmost(
        &self,
        geometry: &ViewportGeometry,
        pt: Point,
    ) -> Result<Option<Candidate<O>>, ViewError> {
        Ok(self.hit_test_point(geometry, pt)?.pop())
    }

    /// Locator over the current grid, using the view's search distance and lock timeout.
    pub fn locator(&self) -> Option<ObjectLocator<O>> {
        let grid = self.grid.clone()?;
        Some(
            ObjectLocator::new(grid)
                .with_search_distance(self.options.search_distance)
                .with_lock_timeout(self.options.lock_timeout),
        )
    }

    /// Track a hit candidate across later frames.
    pub fn handle_for(&self, candidate: &Candidate<O>) -> Option<LocationHandle<O>> {
        let locator = self.locator()?;
        Some(LocationHandle::new(
            candidate.object.clone(),
            candidate.location,
            locator,
        ))
    }

    /// Track `object` without a known cell, finding it with a full scan first.
    pub fn handle_for_object(&self, object: O) -> Option<LocationHandle<O>> {
        let locator = self.locator()?;
        let at = locator.find(&object)?;
        Some(LocationHandle::new(object, at, locator))
    }

    /// Revalidate `handle` and return where its object is now.
    pub fn locate(&self, handle: &mut LocationHandle<O>) -> Located {
        handle.location()
    }

    /// Full scan of the grid for `object`.
    pub fn find_object_on_grid(&self, object: &O) -> Option<Coord3> {
        self.locator()?.find(object)
    }

    fn scan(
        &self,
        geometry: &ViewportGeometry,
        pass: &mut Pass<'_, O, S>,
    ) -> Result<ScanSummary, ViewError> {
        let mut summary = ScanSummary::default();
        let Some(shared) = &self.grid else {
            return Ok(summary);
        };
        let Some(grid) = shared.read_within(self.options.lock_timeout) else {
            log::debug!("grid busy, scan skipped");
            return Ok(summary);
        };
        let extent = grid.extent();
        let Some(mapper) = geometry.mapper(extent) else {
            return Ok(summary);
        };
        let range = geometry.visit_range(extent);

        let mut scratch = Vec::new();
        for x in range.x.clone() {
            for y in range.y.clone() {
                let cell = mapper.cell_rect(x, y);
                let draw = Rect::from_origin_size(cell.center(), cell.size());
                for z in range.z.clone() {
                    let location = Coord3::new(x, y, z);
                    let Some(objects) = grid.cell(location).filter(|o| !o.is_empty()) else {
                        continue;
                    };
                    let objects = match &self.filter {
                        Some(filter) => {
                            scratch.clear();
                            if filter.filter(objects, &mut scratch) {
                                &scratch[..]
                            } else {
                                objects
                            }
                        }
                        None => objects,
                    };
                    summary.cells += 1;
                    for object in objects {
                        let renderer = self
                            .renderers
                            .resolve(object)
                            .inspect_err(|e| log::error!("{e} at {location}"))?;
                        let mut info = DrawInfo {
                            draw,
                            clip: geometry.clip,
                            location,
                            selected: false,
                            precise: geometry.precise,
                        };
                        match pass {
                            Pass::Draw(surface) => {
                                info.selected = self.selection.contains(object);
                                renderer.paint(object, &mut **surface, &info);
                            }
                            Pass::Hit(hits) => {
                                if renderer.hit_test(object, &info) {
                                    hits.push(Candidate {
                                        object: object.clone(),
                                        location,
                                    });
                                }
                            }
                        }
                        summary.objects += 1;
                    }
                }
            }
        }

        if let Pass::Draw(surface) = pass {
            self.decorate(&mut **surface, geometry.draw.abs(), extent, &mapper);
        }
        log::trace!(
            "visited {} cells and {} objects of {range:?}",
            summary.cells,
            summary.objects
        );
        Ok(summary)
    }

    fn decorate(&self, surface: &mut S, draw: Rect, extent: Extent3, mapper: &CellMapper) {
        if let Some(lines) = &self.options.grid_lines
            && lines.modulus > 0
        {
            let stroke = lines.stroke(mapper.scale.x);
            for x in (lines.modulus..extent.width).step_by(lines.modulus) {
                let px = mapper.cell_rect(x, 0).x0;
                surface.stroke_line(Line::new((px, draw.y0), (px, draw.y1)), &stroke);
            }
            for y in (lines.modulus..extent.height).step_by(lines.modulus) {
                let py = mapper.cell_rect(0, y).y0;
                surface.stroke_line(Line::new((draw.x0, py), (draw.x1, py)), &stroke);
            }
        }
        if let Some(border) = &self.options.border {
            surface.stroke_rect(draw, &border.stroke(mapper.scale.x));
        }
    }
}

impl<O: Classify, S: ?Sized> fmt::Debug for GridView<O, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridView")
            .field("grid", &self.grid)
            .field("renderers", &self.renderers)
            .field("filtered", &self.filter.is_some())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
