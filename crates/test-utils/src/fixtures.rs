//! Small hand-checked inputs with known outputs.

use crate::generators::axis;
use geodraw_common::{ContourGrid, Matrix, RegularGrid};
use std::path::PathBuf;

/// Canvas sizes used by the rasterizer tests.
pub mod canvas {
    /// Small canvas for quick end-to-end checks
    pub const TINY: u32 = 65;

    /// Small odd canvas with a pixel exactly on the equator and meridian
    pub const SMALL: u32 = 257;

    /// Production canvas
    pub const FULL: u32 = 2049;
}

/// The 3×3 grid used to illustrate longitude padding: axis `[-10, 0, 10]`,
/// rows `[1, 2, 3]`, `[4, 5, 6]`, `[7, 8, 9]`.
pub fn padding_example_grid(output: impl Into<PathBuf>) -> RegularGrid {
    RegularGrid::new(
        axis(-10.0, 10.0, 3),
        axis(-10.0, 10.0, 3),
        10.0,
        Matrix::from_fn(3, 3, |r, c| (r * 3 + c + 1) as f64),
        output,
    )
}

/// Uniform 3×3 contour grid of ones with step 1; traces no lines.
pub fn uniform_contour_grid(output: impl Into<PathBuf>) -> ContourGrid {
    ContourGrid::new(
        RegularGrid::new(
            axis(-10.0, 10.0, 3),
            axis(-10.0, 10.0, 3),
            10.0,
            Matrix::filled(3, 3, 1.0),
            output,
        ),
        1.0,
    )
}

/// JSON document of a contour job, as the CLI reads it.
pub const CONTOUR_GRID_JSON: &str = r#"{
    "latitudes": [-20.0, -10.0, 0.0, 10.0, 20.0],
    "longitudes": [-20.0, -10.0, 0.0, 10.0, 20.0],
    "accuracy": 10.0,
    "values": [
        [0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 10.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0]
    ],
    "output": "peak.geojson",
    "step": 5.0
}"#;
