// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Line, Point, Rect};
use understory_dense_grid::{Coord3, DenseGrid3D, SharedGrid};
use understory_grid_view::{
    Canvas, Classify, DrawInfo, FirstOnly, GridView, ObjectLocator, ObjectRenderer,
    RendererRegistry, Stroke, ViewportGeometry,
};

struct Particle;

impl Classify for Particle {
    type Kind = ();
    fn kind(&self) {}
}

#[derive(Default)]
struct Sink {
    painted: usize,
}

impl Canvas for Sink {
    fn stroke_line(&mut self, _: Line, _: &Stroke) {}
    fn stroke_rect(&mut self, _: Rect, _: &Stroke) {}
}

struct Tile;

impl ObjectRenderer<Arc<Particle>, Sink> for Tile {
    fn paint(&self, _: &Arc<Particle>, sink: &mut Sink, info: &DrawInfo) {
        black_box(info.draw);
        sink.painted += 1;
    }

    fn hit_test(&self, _: &Arc<Particle>, info: &DrawInfo) -> bool {
        info.footprint().intersect(info.clip).area() > 0.0
    }
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

type Placed = Vec<(Arc<Particle>, Coord3)>;

fn populated(n: usize, depth: usize, count: usize, seed: u64) -> (SharedGrid<Arc<Particle>>, Placed) {
    let mut rng = Rng(seed);
    let mut grid = DenseGrid3D::new(n, n, depth);
    let mut placed = Vec::with_capacity(count);
    for _ in 0..count {
        let at = Coord3::new(rng.below(n), rng.below(n), rng.below(depth));
        let p = Arc::new(Particle);
        grid.add(at, p.clone());
        placed.push((p, at));
    }
    (SharedGrid::new(grid), placed)
}

fn view(grid: SharedGrid<Arc<Particle>>) -> GridView<Arc<Particle>, Sink> {
    GridView::new(RendererRegistry::new().with_default(Tile)).with_grid(grid)
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw");
    let draw = Rect::new(0.0, 0.0, 1000.0, 1000.0);
    for &n in &[50_usize, 200] {
        let (grid, placed) = populated(n, 4, n * n, 0x9e37_79b9);
        let mut v = view(grid);
        group.throughput(Throughput::Elements(placed.len() as u64));
        group.bench_function(format!("full_n{n}"), |b| {
            b.iter(|| {
                let mut sink = Sink::default();
                v.draw(&mut sink, &ViewportGeometry::full(draw)).unwrap();
                black_box(sink.painted)
            });
        });
        let clip = Rect::new(400.0, 400.0, 500.0, 500.0);
        group.bench_function(format!("clipped_n{n}"), |b| {
            b.iter(|| {
                let mut sink = Sink::default();
                v.draw(&mut sink, &ViewportGeometry::new(draw, clip)).unwrap();
                black_box(sink.painted)
            });
        });
        v.set_filter(FirstOnly);
        group.bench_function(format!("first_only_n{n}"), |b| {
            b.iter(|| {
                let mut sink = Sink::default();
                v.draw(&mut sink, &ViewportGeometry::full(draw)).unwrap();
                black_box(sink.painted)
            });
        });
    }
    group.finish();
}

fn bench_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");
    let geometry = ViewportGeometry::full(Rect::new(0.0, 0.0, 1000.0, 1000.0));
    let (grid, _) = populated(200, 4, 40_000, 0x51_7cc1);
    let v = view(grid);
    let mut rng = Rng(0xdead_beef);
    let points: Vec<_> = (0..256)
        .map(|_| Point::new(rng.below(1000) as f64, rng.below(1000) as f64))
        .collect();
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("point_n200", |b| {
        b.iter(|| {
            let mut hits = 0;
            for &pt in &points {
                hits += v.hit_test_point(&geometry, pt).unwrap().len();
            }
            black_box(hits)
        });
    });
    group.finish();
}

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    let (grid, placed) = populated(100, 4, 5_000, 0x1234_5678);
    let locator = ObjectLocator::new(grid.clone());
    group.throughput(Throughput::Elements(placed.len() as u64));
    group.bench_function("unmoved", |b| {
        b.iter(|| {
            for (p, at) in &placed {
                black_box(locator.locate(p, *at));
            }
        });
    });
    group.bench_function("moved_one_step", |b| {
        b.iter_batched(
            || {
                let (grid, placed) = populated(100, 4, 5_000, 0x1234_5678);
                {
                    let mut g = grid.write();
                    for (p, at) in &placed {
                        let to = Coord3::new((at.x + 1) % 100, at.y, at.z);
                        g.move_object(*at, to, p);
                    }
                }
                (ObjectLocator::new(grid), placed)
            },
            |(locator, placed)| {
                for (p, at) in &placed {
                    black_box(locator.locate(p, *at));
                }
            },
            BatchSize::LargeInput,
        );
    });
    group.bench_function("full_scan", |b| {
        b.iter(|| black_box(locator.find(&placed[placed.len() / 2].0)));
    });
    group.finish();
}

criterion_group!(benches, bench_draw, bench_hit, bench_locate);
criterion_main!(benches);
