//! Rasterization of grids onto a square Web Mercator canvas.
//!
//! The canvas is `size × size` pixels covering `[-R, R]` on both axes with a
//! uniform step of `2R / (size - 1)`. Every variant uses the same pixel
//! convention:
//!
//! - pixel column `px` sits at `x = -R + px * step`
//! - pixel row `py` sits at `y = R - py * step` (row 0 is the northern edge)
//!
//! so the first and last pixel of each axis lie exactly on the extent
//! boundary. Regular grids are sampled by inverse-projecting every pixel and
//! taking the nearest-lower grid cell; irregular samples are forward-projected
//! and snapped to the nearest pixel.

use geodraw_common::{
    DualGrid, GeoDrawError, GeoDrawResult, IrregularGrid, Matrix, RegularGrid, Validate,
};
use image::{Pixel, Rgba, RgbaImage};
use projection::{WebMercator, WEB_MERCATOR_MAX_EXTENT};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default canvas side in pixels.
pub const DEFAULT_CANVAS_SIZE: u32 = 2049;

/// Largest accepted canvas side in pixels.
pub const MAX_CANVAS_SIZE: u32 = 16_384;

/// Canvas geometry shared by every rasterizer variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    /// Side length of the square canvas in pixels
    pub size: u32,
    /// Projected half-width of the canvas in meters
    pub max_extent: f64,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_CANVAS_SIZE,
            max_extent: WEB_MERCATOR_MAX_EXTENT,
        }
    }
}

impl RasterConfig {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Check that the canvas can be laid out.
    pub fn validate(&self) -> GeoDrawResult<()> {
        if !(2..=MAX_CANVAS_SIZE).contains(&self.size) {
            return Err(GeoDrawError::Config(format!(
                "canvas size must be between 2 and {} pixels, got {}",
                MAX_CANVAS_SIZE, self.size
            )));
        }
        if !(self.max_extent.is_finite() && self.max_extent > 0.0) {
            return Err(GeoDrawError::Config(format!(
                "max extent must be a positive finite number, got {}",
                self.max_extent
            )));
        }
        Ok(())
    }

    pub fn projection(&self) -> WebMercator {
        WebMercator::new(self.max_extent)
    }

    /// Distance in projected meters between adjacent pixel centers.
    pub fn step(&self) -> f64 {
        2.0 * self.max_extent / (self.size as f64 - 1.0)
    }

    /// Projected coordinates of a pixel center.
    pub fn pixel_to_projected(&self, px: u32, py: u32) -> (f64, f64) {
        let step = self.step();
        (
            -self.max_extent + px as f64 * step,
            self.max_extent - py as f64 * step,
        )
    }

    /// Nearest pixel for projected coordinates, or `None` when the point lies
    /// outside the canvas (or is not finite).
    pub fn projected_to_pixel(&self, x: f64, y: f64) -> Option<(u32, u32)> {
        let step = self.step();
        let size = self.size as f64;
        let col = ((x + self.max_extent) / step + 0.5).floor();
        let row_from_south = ((y + self.max_extent) / step + 0.5).floor();

        let inside = |v: f64| v >= 0.0 && v < size;
        if !(inside(col) && inside(row_from_south)) {
            return None;
        }
        Some((col as u32, self.size - 1 - row_from_south as u32))
    }
}

/// Grid cell `(row, col)` containing a geographic position, for a grid whose
/// first cell starts at (-90, -180) and whose cells are `accuracy` degrees wide.
pub fn cell_index(lat: f64, lon: f64, accuracy: f64) -> (i64, i64) {
    (
        ((lat + 90.0) / accuracy).floor() as i64,
        ((lon + 180.0) / accuracy).floor() as i64,
    )
}

/// Per-pixel cell lookup for a regular grid, resolved once per row and once
/// per column since the Mercator inverse is separable.
struct CellLookup {
    rows: Vec<usize>,
    cols: Vec<usize>,
    stride: usize,
}

impl CellLookup {
    fn build(config: &RasterConfig, accuracy: f64, values: &Matrix) -> GeoDrawResult<Self> {
        let proj = config.projection();
        let rows: Vec<i64> = (0..config.size)
            .map(|py| {
                let (x, y) = config.pixel_to_projected(0, py);
                let (lat, lon) = proj.inverse(x, y);
                cell_index(lat, lon, accuracy).0
            })
            .collect();
        let cols: Vec<i64> = (0..config.size)
            .map(|px| {
                let (x, y) = config.pixel_to_projected(px, 0);
                let (lat, lon) = proj.inverse(x, y);
                cell_index(lat, lon, accuracy).1
            })
            .collect();

        let n_rows = values.rows();
        let n_cols = values.cols();
        let row_ok = |r: i64| r >= 0 && (r as usize) < n_rows;
        let col_ok = |c: i64| c >= 0 && (c as usize) < n_cols;

        // Report the first offending pixel in row-major scan order.
        let bad_row = rows.iter().position(|&r| !row_ok(r));
        let bad_col = cols.iter().position(|&c| !col_ok(c));
        let offending = match (bad_row, bad_col) {
            (Some(0), _) => Some((0, 0)),
            (_, Some(px)) => Some((px, 0)),
            (Some(py), None) => Some((0, py)),
            (None, None) => None,
        };
        if let Some((px, py)) = offending {
            return Err(GeoDrawError::IndexOutOfRange {
                pixel_x: px as u32,
                pixel_y: py as u32,
                row: rows[py],
                col: cols[px],
                rows: n_rows,
                cols: n_cols,
            });
        }

        Ok(Self {
            rows: rows.into_iter().map(|r| r as usize).collect(),
            cols: cols.into_iter().map(|c| c as usize).collect(),
            stride: n_cols,
        })
    }

    /// Flat index into the grid buffer for pixel `(px, py)`.
    #[inline]
    fn index(&self, px: usize, py: usize) -> usize {
        self.rows[py] * self.stride + self.cols[px]
    }
}

/// Paint every pixel from a lookup, in parallel over canvas rows.
fn paint_rows<F>(config: &RasterConfig, color: F) -> RgbaImage
where
    F: Fn(&mut Rgba<u8>, u32, u32) + Sync,
{
    let size = config.size;
    let mut image = RgbaImage::new(size, size);
    let row_bytes = size as usize * 4;

    image
        .par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(py, row)| {
            for (px, channels) in row.chunks_exact_mut(4).enumerate() {
                color(Rgba::from_slice_mut(channels), px as u32, py as u32);
            }
        });

    image
}

/// Rasterize a single-value regular grid.
///
/// The coloring function is called exactly once per pixel with the value of
/// the grid cell under it. Fails with [`GeoDrawError::IndexOutOfRange`]
/// before any pixel is painted if the grid does not cover the canvas.
pub fn rasterize_regular<F>(
    grid: &RegularGrid,
    config: &RasterConfig,
    color: F,
) -> GeoDrawResult<RgbaImage>
where
    F: Fn(&mut Rgba<u8>, u32, u32, f64) + Sync,
{
    grid.validate()?;
    config.validate()?;

    let lookup = CellLookup::build(config, grid.accuracy, &grid.values)?;
    let values = grid.values.as_slice();

    let image = paint_rows(config, |pixel, px, py| {
        let value = values[lookup.index(px as usize, py as usize)];
        color(pixel, px, py, value);
    });

    debug!(
        size = config.size,
        rows = grid.values.rows(),
        cols = grid.values.cols(),
        accuracy = grid.accuracy,
        "Rasterized regular grid"
    );

    Ok(image)
}

/// Rasterize a dual-value regular grid; both values of the covering cell are
/// handed to the coloring function.
pub fn rasterize_dual<F>(grid: &DualGrid, config: &RasterConfig, color: F) -> GeoDrawResult<RgbaImage>
where
    F: Fn(&mut Rgba<u8>, u32, u32, f64, f64) + Sync,
{
    grid.validate()?;
    config.validate()?;

    let lookup = CellLookup::build(config, grid.accuracy, &grid.first)?;
    let first = grid.first.as_slice();
    let second = grid.second.as_slice();

    let image = paint_rows(config, |pixel, px, py| {
        let idx = lookup.index(px as usize, py as usize);
        color(pixel, px, py, first[idx], second[idx]);
    });

    debug!(
        size = config.size,
        rows = grid.first.rows(),
        cols = grid.first.cols(),
        accuracy = grid.accuracy,
        "Rasterized dual grid"
    );

    Ok(image)
}

/// Rasterize scattered samples.
///
/// Each sample is forward-projected and snapped to the nearest pixel, then
/// handed to the coloring function. Samples are processed in input order so
/// later samples overwrite earlier ones sharing a pixel. Samples whose
/// projection is not finite or falls outside the canvas are skipped.
pub fn rasterize_irregular<F>(
    grid: &IrregularGrid,
    config: &RasterConfig,
    color: F,
) -> GeoDrawResult<RgbaImage>
where
    F: Fn(&mut Rgba<u8>, u32, u32, f64),
{
    grid.validate()?;
    config.validate()?;

    let proj = config.projection();
    let mut image = RgbaImage::new(config.size, config.size);
    let mut skipped = 0usize;

    for (lat, lon, value) in grid.samples() {
        let pixel = proj
            .forward_checked(lat, lon)
            .ok()
            .and_then(|(x, y)| config.projected_to_pixel(x, y));

        match pixel {
            Some((px, py)) => color(image.get_pixel_mut(px, py), px, py, value),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(
            skipped,
            total = grid.len(),
            "Irregular samples outside the Mercator canvas were skipped"
        );
    }
    debug!(size = config.size, samples = grid.len(), "Rasterized irregular grid");

    Ok(image)
}
