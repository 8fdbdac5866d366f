//! Benchmarks for the two hottest physics operators (§10), matching the
//! reference implementation's `basic/benches/supporting_queues.rs` in
//! structure (plain `criterion_group!`/`criterion_main!`, no harness).

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use shape_census::config::Config;
use shape_census::physics::{collapse, supported_mask};
use shape_census::shape::{Cell, Shape};

fn scattered_shape(cfg: Config) -> Shape {
    let mut s = Shape::empty();
    for layer in 0..cfg.layers {
        for part in 0..cfg.parts {
            if (layer + part) % 2 == 0 {
                s = s.set(cfg, layer, part, Cell::Shape);
            }
        }
    }
    s
}

fn bench_collapse(c: &mut Criterion) {
    let cfg = Config::new(5, 4).unwrap();
    let s = scattered_shape(cfg);
    c.bench_function("collapse 5x4 scattered", |b| {
        b.iter(|| collapse(cfg, black_box(s)))
    });
}

fn bench_supported_mask(c: &mut Criterion) {
    let cfg = Config::new(5, 4).unwrap();
    let s = scattered_shape(cfg);
    c.bench_function("supported_mask 5x4 scattered", |b| {
        b.iter(|| supported_mask(cfg, black_box(s)))
    });
}

criterion_group!(benches, bench_collapse, bench_supported_mask);
criterion_main!(benches);
