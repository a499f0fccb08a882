//! Grid documents read from JSON files.

use anyhow::{Context, Result};
use clap::ValueEnum;
use geodraw_common::{ContourGrid, DualGrid, IrregularGrid, RegularGrid};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Shape of the grid stored in a raster input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GridKind {
    /// One value matrix (`values`)
    Regular,
    /// Two value matrices (`first`, `second`)
    Dual,
    /// Parallel `latitudes`, `longitudes` and `values` lists
    Irregular,
}

/// A parsed raster input document.
#[derive(Debug, Clone)]
pub enum RasterInput {
    Regular(RegularGrid),
    Dual(DualGrid),
    Irregular(IrregularGrid),
}

impl RasterInput {
    /// Override the output path stored in the document.
    pub fn set_output(&mut self, output: &Path) {
        let target = match self {
            RasterInput::Regular(grid) => &mut grid.output,
            RasterInput::Dual(grid) => &mut grid.output,
            RasterInput::Irregular(grid) => &mut grid.output,
        };
        *target = output.to_path_buf();
    }

    pub fn output(&self) -> &Path {
        match self {
            RasterInput::Regular(grid) => &grid.output,
            RasterInput::Dual(grid) => &grid.output,
            RasterInput::Irregular(grid) => &grid.output,
        }
    }
}

/// Read and deserialize a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse grid document {}", path.display()))
}

pub fn load_raster_input(path: &Path, kind: GridKind) -> Result<RasterInput> {
    Ok(match kind {
        GridKind::Regular => RasterInput::Regular(read_json(path)?),
        GridKind::Dual => RasterInput::Dual(read_json(path)?),
        GridKind::Irregular => RasterInput::Irregular(read_json(path)?),
    })
}

pub fn load_contour_input(path: &Path) -> Result<ContourGrid> {
    read_json(path)
}
