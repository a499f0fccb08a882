//! End-to-end entry points: validate, compute, encode, write.
//!
//! Each `draw_*` function writes exactly one file at the grid's output path
//! or fails without writing anything.

use crate::coloring::{default_color, default_dual_color};
use crate::geojson::export_feature_collection;
use crate::isolines::{generate_contour_lines, ContourConfig};
use crate::output::write_atomic;
use crate::png::encode_png;
use crate::raster::{rasterize_dual, rasterize_irregular, rasterize_regular, RasterConfig};
use geodraw_common::{ContourGrid, DualGrid, GeoDrawResult, IrregularGrid, RegularGrid};
use image::{Rgba, RgbaImage};
use std::path::Path;
use std::time::Instant;
use tracing::info;

fn write_png(image: &RgbaImage, path: &Path) -> GeoDrawResult<()> {
    let bytes = encode_png(image)?;
    write_atomic(path, &bytes)
}

/// Render a single-value grid to a PNG on the default canvas.
pub fn draw_mercator<F>(grid: &RegularGrid, color: F) -> GeoDrawResult<()>
where
    F: Fn(&mut Rgba<u8>, u32, u32, f64) + Sync,
{
    draw_mercator_with(grid, &RasterConfig::default(), color)
}

/// Render a single-value grid to a PNG.
pub fn draw_mercator_with<F>(grid: &RegularGrid, config: &RasterConfig, color: F) -> GeoDrawResult<()>
where
    F: Fn(&mut Rgba<u8>, u32, u32, f64) + Sync,
{
    let start = Instant::now();
    let image = rasterize_regular(grid, config, color)?;
    write_png(&image, &grid.output)?;

    info!(
        output = %grid.output.display(),
        size = config.size,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Rendered Mercator raster"
    );
    Ok(())
}

/// Render a single-value grid with [`default_color`].
pub fn draw_mercator_default(grid: &RegularGrid) -> GeoDrawResult<()> {
    draw_mercator(grid, default_color)
}

/// Render a dual-value grid to a PNG on the default canvas.
pub fn draw_mercator_dual<F>(grid: &DualGrid, color: F) -> GeoDrawResult<()>
where
    F: Fn(&mut Rgba<u8>, u32, u32, f64, f64) + Sync,
{
    draw_mercator_dual_with(grid, &RasterConfig::default(), color)
}

pub fn draw_mercator_dual_with<F>(grid: &DualGrid, config: &RasterConfig, color: F) -> GeoDrawResult<()>
where
    F: Fn(&mut Rgba<u8>, u32, u32, f64, f64) + Sync,
{
    let start = Instant::now();
    let image = rasterize_dual(grid, config, color)?;
    write_png(&image, &grid.output)?;

    info!(
        output = %grid.output.display(),
        size = config.size,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Rendered dual-value Mercator raster"
    );
    Ok(())
}

/// Render a dual-value grid with [`default_dual_color`].
pub fn draw_mercator_dual_default(grid: &DualGrid) -> GeoDrawResult<()> {
    draw_mercator_dual(grid, default_dual_color)
}

/// Render scattered samples to a PNG on the default canvas.
pub fn draw_mercator_irregular<F>(grid: &IrregularGrid, color: F) -> GeoDrawResult<()>
where
    F: Fn(&mut Rgba<u8>, u32, u32, f64),
{
    draw_mercator_irregular_with(grid, &RasterConfig::default(), color)
}

pub fn draw_mercator_irregular_with<F>(
    grid: &IrregularGrid,
    config: &RasterConfig,
    color: F,
) -> GeoDrawResult<()>
where
    F: Fn(&mut Rgba<u8>, u32, u32, f64),
{
    let start = Instant::now();
    let image = rasterize_irregular(grid, config, color)?;
    write_png(&image, &grid.output)?;

    info!(
        output = %grid.output.display(),
        samples = grid.len(),
        size = config.size,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Rendered irregular Mercator raster"
    );
    Ok(())
}

/// Render scattered samples with [`default_color`].
pub fn draw_mercator_irregular_default(grid: &IrregularGrid) -> GeoDrawResult<()> {
    draw_mercator_irregular(grid, default_color)
}

/// Trace contour lines and write them as a GeoJSON FeatureCollection.
pub fn draw_contour_lines(grid: &ContourGrid) -> GeoDrawResult<()> {
    draw_contour_lines_with(grid, &ContourConfig::default())
}

pub fn draw_contour_lines_with(grid: &ContourGrid, config: &ContourConfig) -> GeoDrawResult<()> {
    let start = Instant::now();
    let lines = generate_contour_lines(grid, config)?;
    let collection = export_feature_collection(&lines);
    write_atomic(&grid.grid.output, &collection.to_json_pretty()?)?;

    info!(
        output = %grid.grid.output.display(),
        features = collection.features.len(),
        step = grid.step,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Wrote contour lines"
    );
    Ok(())
}
