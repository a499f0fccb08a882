//! Contour line generation in geographic coordinates.
//!
//! Pipeline per grid:
//! 1. pad the grid along the longitude axis
//! 2. derive levels `min, min + step, ...` up to the value maximum
//! 3. trace every level over the padded field (levels run in parallel)
//! 4. map traced grid-index paths back to lon/lat by axis interpolation
//! 5. smooth each path with a centered moving average
//!
//! Lines are returned grouped by ascending level, in tracer order within a
//! level.

use crate::contour::{IsolineTracer, MarchingSquares, Polyline};
use crate::padding::{pad_longitude, PaddedGrid};
use geodraw_common::{ContourGrid, GeoDrawError, GeoDrawResult, Validate};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Tuning for contour generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    /// Moving-average window applied to every traced line
    pub smoothing_window: usize,
    /// Upper bound on the number of levels a single grid may produce
    pub max_levels: usize,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 5,
            max_levels: 10_000,
        }
    }
}

impl ContourConfig {
    pub fn validate(&self) -> GeoDrawResult<()> {
        if self.max_levels == 0 {
            return Err(GeoDrawError::Config(
                "max_levels must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// One traced and smoothed isoline.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourLine {
    /// Level the line was traced at
    pub value: f64,
    pub points: Vec<GeoPoint>,
}

/// Contour levels `min + k * step` for every `k >= 0` not exceeding `max`.
///
/// `min == max` yields the single level `min`. Fails with
/// [`GeoDrawError::Config`] if the step is not a positive finite number, the
/// range is not finite, or more than `max_levels` levels would be produced.
pub fn generate_levels(min: f64, max: f64, step: f64, max_levels: usize) -> GeoDrawResult<Vec<f64>> {
    if !(step.is_finite() && step > 0.0) {
        return Err(GeoDrawError::Config(format!(
            "contour step must be a positive finite number, got {}",
            step
        )));
    }
    if !(min.is_finite() && max.is_finite()) {
        return Err(GeoDrawError::Config(format!(
            "value range [{}, {}] is not finite",
            min, max
        )));
    }

    let mut levels = Vec::new();
    let mut k = 0u64;
    loop {
        let level = min + k as f64 * step;
        if level > max {
            break;
        }
        if levels.len() == max_levels {
            return Err(GeoDrawError::Config(format!(
                "step {} over [{}, {}] produces more than {} levels",
                step, min, max, max_levels
            )));
        }
        levels.push(level);
        k += 1;
    }

    Ok(levels)
}

/// Value at fractional index `idx` of `axis`, interpolating linearly between
/// neighbors.
///
/// The base index is clamped to `[0, len - 2]`, so indices past either end
/// extrapolate from the outermost pair. A single-element axis always yields
/// its only value; an empty axis yields NaN.
pub fn interpolate_axis(axis: &[f64], idx: f64) -> f64 {
    match axis.len() {
        0 => f64::NAN,
        1 => axis[0],
        len => {
            let base = if idx.is_nan() {
                0
            } else {
                (idx.floor().max(0.0) as usize).min(len - 2)
            };
            let frac = idx - base as f64;
            axis[base] * (1.0 - frac) + axis[base + 1] * frac
        }
    }
}

/// Centered moving average over `window` points.
///
/// Each output point is the mean of the input points within `window / 2` of
/// it, truncated at the ends. Lines with at most `window` points are
/// returned unchanged. The output has the same length as the input.
pub fn smooth_line(points: &[GeoPoint], window: usize) -> Vec<GeoPoint> {
    let n = points.len();
    if n <= window {
        return points.to_vec();
    }

    let half = window / 2;
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half).min(n - 1);
            let span = &points[lo..=hi];
            let count = span.len() as f64;
            let (lon, lat) = span
                .iter()
                .fold((0.0, 0.0), |(lon, lat), p| (lon + p.lon, lat + p.lat));
            GeoPoint::new(lon / count, lat / count)
        })
        .collect()
}

/// Generate contour lines with the marching squares tracer.
pub fn generate_contour_lines(
    grid: &ContourGrid,
    config: &ContourConfig,
) -> GeoDrawResult<Vec<ContourLine>> {
    generate_contour_lines_with(grid, config, &MarchingSquares)
}

/// Generate contour lines with a caller-provided tracer.
pub fn generate_contour_lines_with<T: IsolineTracer>(
    grid: &ContourGrid,
    config: &ContourConfig,
    tracer: &T,
) -> GeoDrawResult<Vec<ContourLine>> {
    let start = Instant::now();
    grid.validate()?;
    config.validate()?;

    let (min, max) = grid.grid.values.min_max().ok_or_else(|| {
        GeoDrawError::Config("grid contains no finite values to contour".to_string())
    })?;
    let levels = generate_levels(min, max, grid.step, config.max_levels)?;
    let padded = pad_longitude(&grid.grid);

    let per_level: Vec<Vec<ContourLine>> = levels
        .par_iter()
        .map(|&level| trace_level(&padded, level, config, tracer))
        .collect::<GeoDrawResult<_>>()?;
    let lines: Vec<ContourLine> = per_level.into_iter().flatten().collect();

    debug!(
        levels = levels.len(),
        lines = lines.len(),
        width = padded.width(),
        height = padded.height(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Generated contour lines"
    );

    Ok(lines)
}

/// Trace one level and convert its paths to smoothed geographic lines.
fn trace_level<T: IsolineTracer>(
    padded: &PaddedGrid,
    level: f64,
    config: &ContourConfig,
    tracer: &T,
) -> GeoDrawResult<Vec<ContourLine>> {
    let paths = tracer.trace(
        padded.values.as_slice(),
        padded.width(),
        padded.height(),
        level,
    )?;

    Ok(paths
        .iter()
        .filter(|path| path.points.len() >= 2)
        .map(|path| ContourLine {
            value: level,
            points: smooth_line(&to_geographic(path, padded), config.smoothing_window),
        })
        .collect())
}

fn to_geographic(path: &Polyline, padded: &PaddedGrid) -> Vec<GeoPoint> {
    path.points
        .iter()
        .map(|p| {
            GeoPoint::new(
                interpolate_axis(&padded.longitudes, p.x),
                interpolate_axis(&padded.latitudes, p.y),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_inclusive_of_max() {
        assert_eq!(generate_levels(0.0, 10.0, 5.0, 100).unwrap(), vec![0.0, 5.0, 10.0]);
        assert_eq!(generate_levels(0.0, 9.0, 5.0, 100).unwrap(), vec![0.0, 5.0]);
    }

    #[test]
    fn test_levels_flat_range() {
        assert_eq!(generate_levels(1.0, 1.0, 1.0, 100).unwrap(), vec![1.0]);
    }

    #[test]
    fn test_levels_reject_bad_step() {
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                generate_levels(0.0, 1.0, step, 100),
                Err(GeoDrawError::Config(_))
            ));
        }
    }

    #[test]
    fn test_levels_cap() {
        assert!(generate_levels(0.0, 100.0, 1.0, 101).is_ok());
        assert!(matches!(
            generate_levels(0.0, 100.0, 1.0, 100),
            Err(GeoDrawError::Config(_))
        ));
        // Step too small to advance past min
        assert!(generate_levels(1e20, 1e20 + 1e5, 1.0, 50).is_err());
    }

    #[test]
    fn test_interpolate_axis() {
        let axis = [-20.0, -10.0, 0.0, 10.0, 20.0];
        assert_eq!(interpolate_axis(&axis, 0.0), -20.0);
        assert_eq!(interpolate_axis(&axis, 1.5), -5.0);
        assert_eq!(interpolate_axis(&axis, 4.0), 20.0);
        // Past the end extrapolates from the last pair
        assert_eq!(interpolate_axis(&axis, 5.0), 30.0);
        assert_eq!(interpolate_axis(&axis, -1.0), -30.0);
    }

    #[test]
    fn test_interpolate_axis_degenerate() {
        assert_eq!(interpolate_axis(&[7.0], 3.5), 7.0);
        assert!(interpolate_axis(&[], 0.0).is_nan());
    }

    #[test]
    fn test_smooth_short_line_unchanged() {
        let points: Vec<_> = (0..5).map(|i| GeoPoint::new(i as f64, 0.0)).collect();
        assert_eq!(smooth_line(&points, 5), points);
    }

    #[test]
    fn test_smooth_line_window_five() {
        let points: Vec<_> = (0..7).map(|i| GeoPoint::new(i as f64, 2.0 * i as f64)).collect();
        let smoothed = smooth_line(&points, 5);
        let lons: Vec<f64> = smoothed.iter().map(|p| p.lon).collect();
        assert_eq!(lons, vec![1.0, 1.5, 2.0, 3.0, 4.0, 4.5, 5.0]);
        assert_eq!(smoothed[3].lat, 6.0);
        assert_eq!(smoothed.len(), points.len());
    }
}
