//! End-to-end tests: grids in, files on disk out.

use geodraw_common::{ContourGrid, GeoDrawError};
use image::Rgba;
use renderer::coloring::{magnitude_ramp, red_ramp};
use renderer::draw::{
    draw_contour_lines, draw_mercator_default, draw_mercator_dual_with,
    draw_mercator_irregular_with, draw_mercator_with,
};
use renderer::raster::RasterConfig;
use test_utils::{
    canvas, flat_global_grid, global_dual_grid, output_path, peak_grid, scattered_samples,
    scratch_dir, uniform_contour_grid, CONTOUR_GRID_JSON,
};

fn read_geojson(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

// ============================================================================
// Raster output
// ============================================================================

#[test]
fn test_draw_mercator_writes_png() {
    let dir = scratch_dir();
    let grid = flat_global_grid(10.0, 50.0, output_path(&dir, "flat.png"));

    draw_mercator_with(&grid, &RasterConfig::new(canvas::TINY), red_ramp(0.0, 100.0)).unwrap();

    let image = image::open(&grid.output).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (65, 65));
    let first = *image.get_pixel(0, 0);
    assert!(image.pixels().all(|p| *p == first));
    assert_eq!(first[0], 255);
}

#[test]
fn test_draw_mercator_default_canvas() {
    let dir = scratch_dir();
    let grid = flat_global_grid(1.0, 200.0, output_path(&dir, "full.png"));

    draw_mercator_default(&grid).unwrap();

    let image = image::open(&grid.output).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (canvas::FULL, canvas::FULL));
    assert_eq!(*image.get_pixel(1024, 1024), Rgba([200, 0, 0, 200]));
}

#[test]
fn test_draw_dual_writes_png() {
    let dir = scratch_dir();
    let grid = global_dual_grid(10.0, |_, _| 3.0, |_, _| 4.0, output_path(&dir, "wind.png"));

    draw_mercator_dual_with(&grid, &RasterConfig::new(canvas::TINY), magnitude_ramp(0.0, 5.0))
        .unwrap();

    let image = image::open(&grid.output).unwrap().to_rgba8();
    assert!(image.pixels().all(|p| *p == Rgba([255, 0, 0, 255])));
}

#[test]
fn test_draw_irregular_writes_png() {
    let dir = scratch_dir();
    let grid = scattered_samples(500, output_path(&dir, "points.png"));

    draw_mercator_irregular_with(&grid, &RasterConfig::new(canvas::SMALL), |pixel, _, _, _| {
        *pixel = Rgba([0, 0, 255, 255]);
    })
    .unwrap();

    let image = image::open(&grid.output).unwrap().to_rgba8();
    let painted = image.pixels().filter(|p| p[3] == 255).count();
    assert!(painted > 0 && painted <= 500);
}

#[test]
fn test_failed_render_writes_nothing() {
    let dir = scratch_dir();
    let mut grid = flat_global_grid(10.0, 1.0, output_path(&dir, "broken.png"));
    grid.latitudes.truncate(3);

    let err = draw_mercator_with(&grid, &RasterConfig::new(canvas::TINY), red_ramp(0.0, 1.0))
        .unwrap_err();
    assert!(err.is_input_error());
    assert!(!grid.output.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_unwritable_output_is_io_error() {
    let dir = scratch_dir();
    let grid = flat_global_grid(
        10.0,
        1.0,
        dir.path().join("no_such_dir").join("out.png"),
    );

    let err = draw_mercator_with(&grid, &RasterConfig::new(canvas::TINY), red_ramp(0.0, 1.0))
        .unwrap_err();
    assert!(matches!(err, GeoDrawError::Io { .. }));
}

// ============================================================================
// Contour output
// ============================================================================

#[test]
fn test_uniform_grid_exports_empty_collection() {
    let dir = scratch_dir();
    let grid = uniform_contour_grid(output_path(&dir, "uniform.geojson"));

    draw_contour_lines(&grid).unwrap();

    let json = read_geojson(&grid.grid.output);
    assert_eq!(json["type"], "FeatureCollection");
    assert_eq!(json["features"].as_array().unwrap().len(), 0);
}

#[test]
fn test_peak_exports_one_feature() {
    let dir = scratch_dir();
    let grid = ContourGrid::new(peak_grid(5, 10.0, output_path(&dir, "peak.geojson")), 5.0);

    draw_contour_lines(&grid).unwrap();

    let json = read_geojson(&grid.grid.output);
    let features = json["features"].as_array().unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["geometry"]["type"], "LineString");
    assert_eq!(features[0]["properties"]["value"], 5.0);
    assert_eq!(
        features[0]["geometry"]["coordinates"].as_array().unwrap().len(),
        5
    );
}

#[test]
fn test_contour_job_from_json() {
    let dir = scratch_dir();
    let mut grid: ContourGrid = serde_json::from_str(CONTOUR_GRID_JSON).unwrap();
    grid.grid.output = output_path(&dir, "job.geojson");

    draw_contour_lines(&grid).unwrap();
    let json = read_geojson(&grid.grid.output);
    assert_eq!(json["features"].as_array().unwrap().len(), 1);
}

#[test]
fn test_contour_failure_writes_nothing() {
    let dir = scratch_dir();
    let mut grid = uniform_contour_grid(output_path(&dir, "bad.geojson"));
    grid.step = 0.0;

    let err = draw_contour_lines(&grid).unwrap_err();
    assert!(matches!(err, GeoDrawError::Config(_)));
    assert!(!grid.grid.output.exists());
}
