//! Benchmarks for isoline tracing and contour generation.
//!
//! Run with: cargo bench --package renderer --bench contour_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use geodraw_common::{ContourGrid, Matrix, RegularGrid};
use rand::Rng;
use renderer::contour::{connect_segments, march_squares, IsolineTracer, MarchingSquares};
use renderer::isolines::{generate_contour_lines, smooth_line, ContourConfig, GeoPoint};
use renderer::padding::pad_longitude;
use test_utils::{axis, gaussian_bump_grid};

/// Generate a smooth temperature-like field with hills and valleys.
fn generate_smooth_field(width: usize, height: usize) -> Vec<f64> {
    let mut data = vec![0.0; width * height];

    for y in 0..height {
        for x in 0..width {
            let fx = x as f64 / width as f64;
            let fy = y as f64 / height as f64;

            let v1 = (fx * std::f64::consts::PI * 4.0).sin() * 20.0;
            let v2 = (fy * std::f64::consts::PI * 4.0).sin() * 20.0;
            let v3 = ((fx + fy) * std::f64::consts::PI * 2.0).sin() * 10.0;

            data[y * width + x] = 50.0 + v1 + v2 + v3;
        }
    }
    data
}

/// Smooth field plus random noise (many short isolines).
fn generate_noisy_field(width: usize, height: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    generate_smooth_field(width, height)
        .into_iter()
        .map(|v| v + rng.gen_range(-5.0..5.0))
        .collect()
}

/// Global contour grid over the smooth field.
fn smooth_contour_grid(rows: usize, cols: usize, step: f64) -> ContourGrid {
    let lat_step = 180.0 / (rows - 1) as f64;
    let lon_step = 360.0 / (cols - 1) as f64;
    let values = Matrix::new(rows, cols, generate_smooth_field(cols, rows))
        .expect("field matches grid shape");
    ContourGrid::new(
        RegularGrid::new(
            axis(-90.0, lat_step, rows),
            axis(-180.0, lon_step, cols),
            lat_step,
            values,
            "bench.geojson",
        ),
        step,
    )
}

// =============================================================================
// MARCHING SQUARES BENCHMARKS
// =============================================================================

fn bench_march_squares(c: &mut Criterion) {
    let mut group = c.benchmark_group("march_squares");

    for size in [128usize, 256, 512] {
        let smooth = generate_smooth_field(size, size);
        let noisy = generate_noisy_field(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("smooth", size), &smooth, |b, data| {
            b.iter(|| march_squares(black_box(data), size, size, black_box(50.0)));
        });
        group.bench_with_input(BenchmarkId::new("noisy", size), &noisy, |b, data| {
            b.iter(|| march_squares(black_box(data), size, size, black_box(50.0)));
        });
    }

    group.finish();
}

fn bench_connect_segments(c: &mut Criterion) {
    let mut group = c.benchmark_group("connect_segments");

    for size in [256usize, 512] {
        let noisy = generate_noisy_field(size, size);
        let segments = march_squares(&noisy, size, size, 50.0);
        group.throughput(Throughput::Elements(segments.len() as u64));

        group.bench_with_input(BenchmarkId::new("noisy", size), &segments, |b, segments| {
            b.iter(|| connect_segments(black_box(segments)));
        });
    }

    group.finish();
}

fn bench_trace(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace");
    let grid = gaussian_bump_grid(721, 1440, "bench.geojson");
    let padded = pad_longitude(&grid);

    for level in [10.0, 50.0, 90.0] {
        group.bench_with_input(BenchmarkId::new("bump_quarter_degree", level), &level, |b, &level| {
            b.iter(|| {
                MarchingSquares.trace(
                    black_box(padded.values.as_slice()),
                    padded.width(),
                    padded.height(),
                    level,
                )
            });
        });
    }

    group.finish();
}

// =============================================================================
// PIPELINE BENCHMARKS
// =============================================================================

fn bench_smooth_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("smooth_line");

    for len in [100usize, 1_000, 10_000] {
        let points: Vec<GeoPoint> = (0..len)
            .map(|i| GeoPoint::new(i as f64 * 0.1, (i as f64 * 0.05).sin()))
            .collect();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("window_5", len), &points, |b, points| {
            b.iter(|| smooth_line(black_box(points), 5));
        });
    }

    group.finish();
}

fn bench_generate_contour_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_contour_lines");
    group.sample_size(20);
    let config = ContourConfig::default();

    for (rows, cols, step) in [(181usize, 361usize, 5.0), (361, 721, 5.0), (361, 721, 1.0)] {
        let grid = smooth_contour_grid(rows, cols, step);
        let name = format!("{}x{}_step_{}", rows, cols, step);
        group.bench_function(BenchmarkId::new("smooth", name), |b| {
            b.iter(|| generate_contour_lines(black_box(&grid), &config));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_march_squares,
    bench_connect_segments,
    bench_trace,
    bench_smooth_line,
    bench_generate_contour_lines,
);

criterion_main!(benches);
