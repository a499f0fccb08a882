//! Longitude padding applied before contour tracing.
//!
//! The tracer has no notion of wraparound, so lines running into the
//! western or eastern edge of a grid would be clipped there. Padding adds
//! one extra column on each side that repeats the edge values, which gives
//! traced paths room to close.

use geodraw_common::{Matrix, RegularGrid};

/// Distance in degrees between the outermost grid column and the padding
/// column added next to it.
pub const LONGITUDE_PAD_DEGREES: f64 = 10.0;

/// A regular grid widened by one column on each side.
#[derive(Debug, Clone, PartialEq)]
pub struct PaddedGrid {
    pub latitudes: Vec<f64>,
    /// Original longitudes with one padding value prepended and appended
    pub longitudes: Vec<f64>,
    /// `rows × (cols + 2)` values
    pub values: Matrix,
}

impl PaddedGrid {
    pub fn width(&self) -> usize {
        self.values.cols()
    }

    pub fn height(&self) -> usize {
        self.values.rows()
    }
}

/// Pad a validated grid along the longitude axis.
///
/// The new western longitude lies [`LONGITUDE_PAD_DEGREES`] beyond the first
/// longitude and the new eastern one the same distance beyond the last,
/// following the axis direction. Each row gains a copy of its first value at
/// the front and of its last value at the back; interior values are
/// untouched.
pub fn pad_longitude(grid: &RegularGrid) -> PaddedGrid {
    let lons = &grid.longitudes;
    let (first, last) = match (lons.first(), lons.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => {
            return PaddedGrid {
                latitudes: grid.latitudes.clone(),
                longitudes: Vec::new(),
                values: grid.values.clone(),
            }
        }
    };
    let direction = if last >= first { 1.0 } else { -1.0 };

    let mut longitudes = Vec::with_capacity(lons.len() + 2);
    longitudes.push(first - LONGITUDE_PAD_DEGREES * direction);
    longitudes.extend_from_slice(lons);
    longitudes.push(last + LONGITUDE_PAD_DEGREES * direction);

    let cols = grid.values.cols();
    let values = if cols == 0 {
        grid.values.clone()
    } else {
        Matrix::from_fn(grid.values.rows(), cols + 2, |row, col| {
            let src = col.saturating_sub(1).min(cols - 1);
            grid.values.row(row)[src]
        })
    };

    PaddedGrid {
        latitudes: grid.latitudes.clone(),
        longitudes,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(lons: Vec<f64>, rows: Vec<Vec<f64>>) -> RegularGrid {
        let lats = (0..rows.len()).map(|i| i as f64 * 10.0).collect();
        RegularGrid::new(lats, lons, 10.0, Matrix::from_rows(rows).unwrap(), "out.geojson")
    }

    #[test]
    fn test_pad_three_by_three() {
        let grid = grid(
            vec![-10.0, 0.0, 10.0],
            vec![
                vec![1.0, 2.0, 3.0],
                vec![4.0, 5.0, 6.0],
                vec![7.0, 8.0, 9.0],
            ],
        );
        let padded = pad_longitude(&grid);

        assert_eq!(padded.longitudes, vec![-20.0, -10.0, 0.0, 10.0, 20.0]);
        assert_eq!(padded.width(), 5);
        assert_eq!(padded.height(), 3);
        assert_eq!(padded.values.row(0), &[1.0, 1.0, 2.0, 3.0, 3.0]);
        assert_eq!(padded.values.row(2), &[7.0, 7.0, 8.0, 9.0, 9.0]);
        assert_eq!(padded.latitudes, grid.latitudes);
    }

    #[test]
    fn test_pad_descending_longitudes() {
        let grid = grid(vec![10.0, 0.0], vec![vec![1.0, 2.0]]);
        let padded = pad_longitude(&grid);
        assert_eq!(padded.longitudes, vec![20.0, 10.0, 0.0, -10.0]);
        assert_eq!(padded.values.row(0), &[1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_pad_single_column() {
        let grid = grid(vec![5.0], vec![vec![3.0], vec![4.0]]);
        let padded = pad_longitude(&grid);
        assert_eq!(padded.longitudes, vec![-5.0, 5.0, 15.0]);
        assert_eq!(padded.values.row(1), &[4.0, 4.0, 4.0]);
    }
}
