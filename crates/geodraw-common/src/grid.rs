//! Grid shapes consumed by the rasterizer and contour generator.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Row-major matrix of grid values stored in a single flat buffer.
///
/// Serialized as nested rows so input documents read naturally.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a matrix from a flat row-major buffer.
    ///
    /// Returns `None` if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != rows * cols {
            return None;
        }
        Some(Self { rows, cols, data })
    }

    /// Create a matrix filled with a single value.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Build a matrix by evaluating `f(row, col)` for every cell in row-major order.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    /// Create a matrix from nested rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);

        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(ValidationError::RaggedMatrix {
                    row,
                    len: values.len(),
                    expected: cols,
                });
            }
            data.extend_from_slice(values);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Number of rows (latitude direction).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (longitude direction).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check if the matrix holds no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// The flat row-major buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Minimum and maximum over the finite values; NaN and infinities are
    /// skipped.
    ///
    /// Returns `None` when the matrix has no finite values to compare.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let (min, max) = self
            .data
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            });

        if min.is_finite() && max.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = ValidationError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(matrix: Matrix) -> Self {
        if matrix.cols == 0 {
            return vec![Vec::new(); matrix.rows];
        }
        matrix
            .data
            .chunks(matrix.cols)
            .map(|row| row.to_vec())
            .collect()
    }
}

/// Regular lat/lon grid carrying one value per cell.
///
/// Latitudes are expected to start at -90 and longitudes at -180 with a
/// spacing of `accuracy` degrees, which is what the rasterizer's cell
/// lookup assumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularGrid {
    /// Latitudes of the matrix rows (degrees)
    pub latitudes: Vec<f64>,
    /// Longitudes of the matrix columns (degrees)
    pub longitudes: Vec<f64>,
    /// Cell size in degrees
    pub accuracy: f64,
    /// One row per latitude, one column per longitude
    pub values: Matrix,
    /// Where the rendered output is written
    pub output: PathBuf,
}

impl RegularGrid {
    pub fn new(
        latitudes: Vec<f64>,
        longitudes: Vec<f64>,
        accuracy: f64,
        values: Matrix,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            latitudes,
            longitudes,
            accuracy,
            values,
            output: output.into(),
        }
    }
}

/// Regular grid carrying two values per cell (e.g. u/v wind components).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualGrid {
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
    pub accuracy: f64,
    /// First value per cell
    pub first: Matrix,
    /// Second value per cell, sharing the first matrix's geographic index
    pub second: Matrix,
    pub output: PathBuf,
}

/// Scattered samples, one (lat, lon, value) triple per index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrregularGrid {
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
    pub values: Vec<f64>,
    pub accuracy: f64,
    pub output: PathBuf,
}

impl IrregularGrid {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(lat, lon, value)` triples.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.latitudes
            .iter()
            .zip(&self.longitudes)
            .zip(&self.values)
            .map(|((&lat, &lon), &value)| (lat, lon, value))
    }
}

/// Input for contour generation: a regular grid plus the iso-value spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourGrid {
    #[serde(flatten)]
    pub grid: RegularGrid,
    /// Spacing between consecutive contour levels
    pub step: f64,
}

impl ContourGrid {
    pub fn new(grid: RegularGrid, step: f64) -> Self {
        Self { grid, step }
    }
}
