//! Synthetic grid generators.
//!
//! Global generators lay grids out the way the rasterizer's cell lookup
//! expects: latitudes start at -90 and longitudes at -180, both spaced by
//! the grid accuracy, with the closing row and column (90 and 180)
//! included.

use geodraw_common::{DualGrid, IrregularGrid, Matrix, RegularGrid};
use std::path::PathBuf;

/// `count` values starting at `start`, `step` apart.
///
/// # Example
///
/// ```
/// use test_utils::axis;
///
/// assert_eq!(axis(-10.0, 10.0, 3), vec![-10.0, 0.0, 10.0]);
/// ```
pub fn axis(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// Latitude and longitude axes covering the globe at `accuracy` degrees.
pub fn global_axes(accuracy: f64) -> (Vec<f64>, Vec<f64>) {
    let rows = (180.0 / accuracy).round() as usize + 1;
    let cols = (360.0 / accuracy).round() as usize + 1;
    (axis(-90.0, accuracy, rows), axis(-180.0, accuracy, cols))
}

/// Global grid whose cell values are `f(lat, lon)`.
pub fn global_grid_from_fn(
    accuracy: f64,
    f: impl Fn(f64, f64) -> f64,
    output: impl Into<PathBuf>,
) -> RegularGrid {
    let (lats, lons) = global_axes(accuracy);
    let values = Matrix::from_fn(lats.len(), lons.len(), |r, c| f(lats[r], lons[c]));
    RegularGrid::new(lats, lons, accuracy, values, output)
}

/// Global grid with every cell set to `value`.
pub fn flat_global_grid(accuracy: f64, value: f64, output: impl Into<PathBuf>) -> RegularGrid {
    global_grid_from_fn(accuracy, |_, _| value, output)
}

/// Global grid whose value is the latitude itself.
///
/// Useful for checking canvas orientation: northern pixels see larger values.
pub fn latitude_grid(accuracy: f64, output: impl Into<PathBuf>) -> RegularGrid {
    global_grid_from_fn(accuracy, |lat, _| lat, output)
}

/// Global dual grid built from two cell functions.
pub fn global_dual_grid(
    accuracy: f64,
    first: impl Fn(f64, f64) -> f64,
    second: impl Fn(f64, f64) -> f64,
    output: impl Into<PathBuf>,
) -> DualGrid {
    let (lats, lons) = global_axes(accuracy);
    let first = Matrix::from_fn(lats.len(), lons.len(), |r, c| first(lats[r], lons[c]));
    let second = Matrix::from_fn(lats.len(), lons.len(), |r, c| second(lats[r], lons[c]));
    DualGrid {
        latitudes: lats,
        longitudes: lons,
        accuracy,
        first,
        second,
        output: output.into(),
    }
}

/// Square `size × size` grid of zeros with `peak` in the center cell.
///
/// Axes are centered on zero with a 10 degree spacing.
pub fn peak_grid(size: usize, peak: f64, output: impl Into<PathBuf>) -> RegularGrid {
    let start = -(size as f64 - 1.0) / 2.0 * 10.0;
    let center = size / 2;
    let values = Matrix::from_fn(size, size, |r, c| {
        if r == center && c == center {
            peak
        } else {
            0.0
        }
    });
    RegularGrid::new(
        axis(start, 10.0, size),
        axis(start, 10.0, size),
        10.0,
        values,
        output,
    )
}

/// Smooth bump centered on the grid, values in `0..=100`.
///
/// Produces nested closed isolines; used by the contour benchmarks.
pub fn gaussian_bump_grid(rows: usize, cols: usize, output: impl Into<PathBuf>) -> RegularGrid {
    let lat_step = 180.0 / (rows.max(2) - 1) as f64;
    let lon_step = 360.0 / (cols.max(2) - 1) as f64;
    let lats = axis(-90.0, lat_step, rows);
    let lons = axis(-180.0, lon_step, cols);
    let values = Matrix::from_fn(rows, cols, |r, c| {
        let dy = lats[r] / 45.0;
        let dx = lons[c] / 90.0;
        100.0 * (-(dx * dx + dy * dy)).exp()
    });
    RegularGrid::new(lats, lons, lat_step.min(lon_step), values, output)
}

/// Deterministic scattered samples spread over the Mercator latitude band.
///
/// Sample `i` has value `i % 256`.
pub fn scattered_samples(count: usize, output: impl Into<PathBuf>) -> IrregularGrid {
    const GOLDEN: f64 = 0.618_033_988_749_895;
    let mut latitudes = Vec::with_capacity(count);
    let mut longitudes = Vec::with_capacity(count);
    let mut values = Vec::with_capacity(count);

    for i in 0..count {
        let u = (i as f64 * GOLDEN).fract();
        let v = (i as f64 + 0.5) / count.max(1) as f64;
        latitudes.push(-80.0 + 160.0 * v);
        longitudes.push(-180.0 + 360.0 * u);
        values.push((i % 256) as f64);
    }

    IrregularGrid {
        latitudes,
        longitudes,
        values,
        accuracy: 1.0,
        output: output.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geodraw_common::Validate;

    #[test]
    fn test_global_axes() {
        let (lats, lons) = global_axes(10.0);
        assert_eq!(lats.len(), 19);
        assert_eq!(lons.len(), 37);
        assert_eq!(lats[0], -90.0);
        assert_eq!(*lats.last().unwrap(), 90.0);
        assert_eq!(*lons.last().unwrap(), 180.0);
    }

    #[test]
    fn test_flat_grid_is_valid() {
        let grid = flat_global_grid(10.0, 3.0, "flat.png");
        assert_eq!(grid.validate(), Ok(()));
        assert_eq!(grid.values.min_max(), Some((3.0, 3.0)));
    }

    #[test]
    fn test_peak_grid() {
        let grid = peak_grid(5, 10.0, "peak.geojson");
        assert_eq!(grid.latitudes, vec![-20.0, -10.0, 0.0, 10.0, 20.0]);
        assert_eq!(grid.values.get(2, 2), Some(10.0));
        assert_eq!(grid.values.get(2, 3), Some(0.0));
        assert_eq!(grid.validate(), Ok(()));
    }

    #[test]
    fn test_dual_grid_is_valid() {
        let grid = global_dual_grid(30.0, |lat, _| lat, |_, lon| lon, "dual.png");
        assert_eq!(grid.validate(), Ok(()));
        assert_eq!(grid.first.get(0, 0), Some(-90.0));
        assert_eq!(grid.second.get(0, 0), Some(-180.0));
    }

    #[test]
    fn test_scattered_samples() {
        let grid = scattered_samples(300, "points.png");
        assert_eq!(grid.len(), 300);
        assert_eq!(grid.validate(), Ok(()));
        assert!(grid.latitudes.iter().all(|lat| (-80.0..=80.0).contains(lat)));
        assert_eq!(grid.values[257], 1.0);
    }
}
