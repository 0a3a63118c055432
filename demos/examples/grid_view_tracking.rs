// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Select an agent by clicking it, then follow it while a simulation thread moves it.
//!
//! The walker drifts one cell per step, so its handle keeps up; on the last step it jumps
//! across the grid and the handle reports it as lost. Run with `RUST_LOG=debug` to see
//! the locator's diagnostics.

use std::thread;
use std::time::Duration;

use kurbo::Point;
use understory_dense_grid::{Coord3, DenseGrid3D, SharedGrid};
use understory_grid_view::{GridView, RendererRegistry, Selection, ViewOptions, ViewportGeometry};
use understory_grid_view_demos::{AsciiCanvas, Agent, Glyph, Species};

fn main() {
    env_logger::init();

    let walker = Agent::new("walker", Species::Ant);
    let start = Coord3::new(1, 1, 0);
    let mut grid = DenseGrid3D::new(12, 6, 1);
    grid.add(start, walker.clone());
    let shared = SharedGrid::new(grid);

    let mut view = GridView::new(RendererRegistry::new().with_default(Glyph('w')))
        .with_grid(shared.clone())
        .with_options(ViewOptions::default().with_lock_timeout(Duration::from_millis(50)));

    let mut canvas = AsciiCanvas::new(12, 6);
    let geometry = ViewportGeometry::full(canvas.bounds());

    let Ok(Some(hit)) = view.hit_test_topmost(&geometry, Point::new(15.0, 15.0)) else {
        eprintln!("nothing under the cursor");
        return;
    };
    let Some(mut handle) = view.handle_for(&hit) else {
        return;
    };
    view.set_selection(Selection::single(hit.object.clone()));

    let stepper = {
        let shared = shared.clone();
        let walker = walker.clone();
        thread::spawn(move || {
            let mut at = start;
            for step in 0..6 {
                let to = if step == 5 {
                    Coord3::new(0, 4, 0)
                } else {
                    Coord3::new((at.x + 1) % 12, at.y, at.z)
                };
                shared.write().move_object(at, to, &walker);
                log::info!("step {step}: walker {at} -> {to}");
                at = to;
                thread::sleep(Duration::from_millis(20));
            }
        })
    };

    for _ in 0..8 {
        thread::sleep(Duration::from_millis(20));
        let location = handle.location_name();
        println!("{} is at {}", handle.object().name, location);
    }
    if stepper.join().is_err() {
        eprintln!("simulation thread panicked");
        return;
    }

    println!("last confirmed at {}", handle.last_known());
    if let Some(at) = view.find_object_on_grid(&walker) {
        println!("full scan finds it at {at}");
    }
    if view.draw(&mut canvas, &geometry).is_ok() {
        println!("{}", canvas.render());
    }
}
