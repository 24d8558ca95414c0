//! Microbenchmarks for the quad-edge operators
//!
//! This benchmark suite measures the operations a triangulation driver calls
//! in its inner loops:
//!
//! 1. **Fan construction**: `make_edge`, `splice`, `resolve_edge` and `connect`
//!    over a convex polygon
//! 2. **Splice**: a merge immediately undone by a split
//! 3. **Swap**: four flips of one diagonal, which restore the mesh
//! 4. **Connect/Delete cycle**: re-adding and removing a diagonal
//! 5. **Validation**: `validate_all` over whole fans
//!
//! Polygons are jittered with a seeded RNG so runs are reproducible.

#![allow(missing_docs)] // Criterion macros generate undocumented functions

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quadedge::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;
use std::hint::black_box;
use std::sync::OnceLock;

/// Get the deterministic seed for polygon generation.
/// Reads `QUADEDGE_BENCH_SEED` (decimal or 0x-hex). Defaults to 0x9E57.
fn get_benchmark_seed() -> u64 {
    static SEED: OnceLock<u64> = OnceLock::new();
    *SEED.get_or_init(|| {
        std::env::var("QUADEDGE_BENCH_SEED")
            .ok()
            .and_then(|s| {
                let s = s.trim();
                s.strip_prefix("0x")
                    .or_else(|| s.strip_prefix("0X"))
                    .map_or_else(|| s.parse().ok(), |hex| u64::from_str_radix(hex, 16).ok())
            })
            .unwrap_or(0x9E57)
    })
}

/// Counter-clockwise convex polygon with `n` jittered vertices on a circle.
fn convex_polygon(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    let slice = TAU / n as f64;
    (0..n)
        .map(|i| {
            let jitter: f64 = rng.random_range(0.05..0.6);
            let (s, c) = ((i as f64 + jitter) * slice).sin_cos();
            Point::new([100.0 * c, 100.0 * s])
        })
        .collect()
}

/// Fan triangulation around the first vertex. Returns the sides of the open
/// chain and the fan edges ending at the first vertex.
fn fan(mesh: &mut QuadEdgeMesh, points: &[Point]) -> (Vec<EdgeRef>, Vec<EdgeRef>) {
    let order = WindingOrder::counter_clockwise();
    let first = mesh.make_edge_with_end_points(points[0], points[1]);
    let second = mesh.make_edge_with_end_points(points[1], points[2]);
    mesh.splice(first.sym(), second);
    let mut closing = mesh
        .connect(second, first, order)
        .expect("fan edges are live");
    let mut sides = vec![first, second];
    let mut spokes = vec![closing];
    for i in 3..points.len() {
        let side = mesh.make_edge_with_end_points(points[i - 1], points[i]);
        let anchor = mesh
            .resolve_edge(order, closing, points[i])
            .expect("convex polygon vertices resolve");
        mesh.splice(side, anchor);
        closing = mesh
            .connect(side, closing.sym(), order)
            .expect("fan edges are live");
        sides.push(side);
        spokes.push(closing);
    }
    (sides, spokes)
}

fn benchmark_fan_construction(c: &mut Criterion) {
    let seed = get_benchmark_seed();
    let mut group = c.benchmark_group("fan_construction");

    for &n_points in &[16_usize, 64, 256, 1024] {
        group.throughput(Throughput::Elements(n_points as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_points),
            &n_points,
            |b, &n_points| {
                b.iter_batched(
                    || convex_polygon(n_points, seed),
                    |points| {
                        let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
                        black_box(fan(&mut mesh, &points));
                        mesh
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn benchmark_splice(c: &mut Criterion) {
    let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
    let a = mesh.make_edge_with_end_points(Point::new([0.0, 0.0]), Point::new([1.0, 0.0]));
    let b = mesh.make_edge_with_end_points(Point::new([0.0, 0.0]), Point::new([0.0, 1.0]));

    c.bench_function("splice_merge_split", |bench| {
        bench.iter(|| {
            mesh.splice(black_box(a), black_box(b));
            mesh.splice(black_box(a), black_box(b));
        });
    });
}

fn benchmark_swap(c: &mut Criterion) {
    let seed = get_benchmark_seed();
    let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
    let (_, spokes) = fan(&mut mesh, &convex_polygon(64, seed));
    let diagonal = spokes[spokes.len() / 2];

    c.bench_function("swap_four_times", |bench| {
        bench.iter(|| {
            for _ in 0..4 {
                mesh.swap(black_box(diagonal));
            }
        });
    });
}

fn benchmark_connect_delete(c: &mut Criterion) {
    let seed = get_benchmark_seed();
    let order = WindingOrder::counter_clockwise();
    let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
    let (sides, spokes) = fan(&mut mesh, &convex_polygon(4, seed));
    mesh.delete(spokes[0]);

    c.bench_function("connect_delete_cycle", |bench| {
        bench.iter(|| {
            let e = mesh
                .connect(black_box(sides[1]), black_box(sides[0]), order)
                .expect("quadrilateral sides are live");
            mesh.delete(e);
        });
    });
}

fn benchmark_validation(c: &mut Criterion) {
    let seed = get_benchmark_seed();
    let order = WindingOrder::counter_clockwise();
    let mut group = c.benchmark_group("validate_all");

    for &n_points in &[16_usize, 256] {
        let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
        fan(&mut mesh, &convex_polygon(n_points, seed));
        group.throughput(Throughput::Elements(mesh.number_of_quad_edges() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_points), &mesh, |b, mesh| {
            b.iter(|| black_box(validate_all(mesh, order)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_fan_construction,
    benchmark_splice,
    benchmark_swap,
    benchmark_connect_delete,
    benchmark_validation
);
criterion_main!(benches);
