//! Benchmark: hit testing and move handling.
//!
//! Run with: `cargo bench -p patternlock-core --bench tracker_bench`
//!
//! Moves arrive in batches of historical samples at touch-screen rates, so
//! per-sample cost bounds how much input a frame can absorb.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use patternlock_core::{
    DrawArea, Grid, GridGeometry, PatternTracker, Point, TrackerConfig,
};

/// A dense zig-zag sweep over the whole view.
fn sweep(side: f32, steps: usize) -> Vec<Point> {
    (0..steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let row = (t * 8.0).floor();
            let x = if row as u32 % 2 == 0 { t * 8.0 - row } else { 1.0 - (t * 8.0 - row) };
            Point::new(x * side, t * side)
        })
        .collect()
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");
    for size in [3u16, 8, 32] {
        let geometry = GridGeometry::with_default_hit_factor(
            Grid::new(size).unwrap(),
            DrawArea::new(0.0, 0.0, 1000.0, 1000.0),
        );
        let points = sweep(1000.0, 256);
        group.bench_with_input(BenchmarkId::from_parameter(size), &points, |b, points| {
            b.iter(|| {
                for p in points {
                    black_box(geometry.hit_test(black_box(*p)));
                }
            });
        });
    }
    group.finish();
}

fn bench_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture");
    for size in [3u16, 8] {
        let config = TrackerConfig {
            grid_size: size,
            ..TrackerConfig::default()
        };
        let samples = sweep(1000.0, 512);
        group.bench_with_input(BenchmarkId::from_parameter(size), &samples, |b, samples| {
            b.iter(|| {
                let mut tracker = PatternTracker::new(&config).unwrap();
                tracker.layout(1000.0, 1000.0);
                tracker.on_down(samples[0]);
                for batch in samples.chunks(16) {
                    black_box(tracker.on_move(batch));
                }
                black_box(tracker.on_up())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hit_test, bench_gesture);
criterion_main!(benches);
