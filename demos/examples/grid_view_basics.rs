// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw a small grid as text, with grid lines and a border, then hit-test a few pixels.
//!
//! Run with `RUST_LOG=trace` to see per-scan counts.

use kurbo::{Point, Rect};
use understory_dense_grid::{Coord3, DenseGrid3D, SharedGrid};
use understory_grid_view::{
    Border, GridLines, GridView, LastOnly, RendererRegistry, ViewOptions, ViewportGeometry,
};
use understory_grid_view_demos::{AsciiCanvas, Agent, Glyph, Species};

fn main() {
    env_logger::init();

    let mut grid = DenseGrid3D::new(20, 10, 2);
    grid.add(Coord3::new(2, 3, 0), Agent::new("ant-1", Species::Ant));
    grid.add(Coord3::new(2, 3, 1), Agent::new("crumb", Species::Food));
    grid.add(Coord3::new(14, 7, 0), Agent::new("ant-2", Species::Ant));
    grid.add(Coord3::new(14, 7, 0), Agent::new("ant-3", Species::Ant));

    let renderers = RendererRegistry::new()
        .with(Species::Ant, Glyph('a'))
        .with(Species::Food, Glyph('f'));
    let mut view = GridView::new(renderers)
        .with_grid(SharedGrid::new(grid))
        .with_options(
            ViewOptions::default()
                .with_grid_lines(GridLines {
                    modulus: 5,
                    ..GridLines::default()
                })
                .with_border(Border::default()),
        );

    let mut canvas = AsciiCanvas::new(20, 10);
    let geometry = ViewportGeometry::full(canvas.bounds());
    match view.draw(&mut canvas, &geometry) {
        Ok(summary) => println!(
            "{}\n{} cells, {} objects",
            canvas.render(),
            summary.cells,
            summary.objects
        ),
        Err(e) => {
            eprintln!("draw failed: {e}");
            return;
        }
    }

    for pt in [Point::new(25.0, 35.0), Point::new(145.0, 75.0), Point::new(0.0, 0.0)] {
        let names: Vec<_> = view
            .hit_test_point(&geometry, pt)
            .unwrap_or_default()
            .into_iter()
            .map(|c| format!("{} at {}", c.object.name, c.location))
            .collect();
        println!("under {pt:?}: {names:?}");
    }

    // Keep only the topmost object of each cell and hit the crowded cell again.
    view.set_filter(LastOnly);
    let region = Rect::new(140.0, 70.0, 150.0, 80.0);
    if let Ok(hits) = view.hit_test_rect(&geometry, region) {
        for c in hits {
            println!("topmost only: {} at {}", c.object.name, c.location);
        }
    }
}
