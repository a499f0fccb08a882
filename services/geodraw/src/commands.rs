//! Subcommand implementations.

use crate::config::{ColorScheme, JobConfig};
use crate::input::{load_contour_input, load_raster_input, GridKind, RasterInput};
use anyhow::{bail, Context, Result};
use geodraw_common::Matrix;
use renderer::coloring::{default_color, default_dual_color, magnitude_ramp, red_ramp};
use renderer::draw::{
    draw_contour_lines_with, draw_mercator_dual_with, draw_mercator_irregular_with,
    draw_mercator_with,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Inputs of the `raster` subcommand.
#[derive(Debug, Clone)]
pub struct RasterJob {
    pub input: PathBuf,
    pub kind: GridKind,
    pub output: Option<PathBuf>,
}

/// Inputs of the `contour` subcommand.
#[derive(Debug, Clone)]
pub struct ContourJob {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub step: Option<f64>,
}

/// Load a grid document and render it to PNG. Returns the output path.
pub fn run_raster(job: &RasterJob, config: &JobConfig) -> Result<PathBuf> {
    let mut input = load_raster_input(&job.input, job.kind)?;
    if let Some(output) = &job.output {
        input.set_output(output);
    }

    info!(
        input = %job.input.display(),
        kind = ?job.kind,
        scheme = ?config.color.scheme,
        size = config.raster.size,
        "Rendering raster"
    );

    let raster = &config.raster;
    let color = &config.color;
    let result = match (&input, color.scheme) {
        (RasterInput::Regular(grid), ColorScheme::Default) => {
            draw_mercator_with(grid, raster, default_color)
        }
        (RasterInput::Regular(grid), ColorScheme::RedRamp) => {
            let (min, max) = color.range(grid.values.min_max());
            draw_mercator_with(grid, raster, red_ramp(min, max))
        }
        (RasterInput::Dual(grid), ColorScheme::Default) => {
            draw_mercator_dual_with(grid, raster, default_dual_color)
        }
        (RasterInput::Dual(grid), ColorScheme::Magnitude) => {
            let (min, max) = color.range(magnitude_range(&grid.first, &grid.second));
            draw_mercator_dual_with(grid, raster, magnitude_ramp(min, max))
        }
        (RasterInput::Irregular(grid), ColorScheme::Default) => {
            draw_mercator_irregular_with(grid, raster, default_color)
        }
        (RasterInput::Irregular(grid), ColorScheme::RedRamp) => {
            let (min, max) = color.range(value_range(&grid.values));
            draw_mercator_irregular_with(grid, raster, red_ramp(min, max))
        }
        (_, scheme) => bail!(
            "color scheme {:?} does not apply to {:?} grids",
            scheme,
            job.kind
        ),
    };
    result.with_context(|| format!("Failed to render {}", job.input.display()))?;

    Ok(input.output().to_path_buf())
}

/// Load a contour grid document and write its contour lines as GeoJSON.
/// Returns the output path.
pub fn run_contour(job: &ContourJob, config: &JobConfig) -> Result<PathBuf> {
    let mut grid = load_contour_input(&job.input)?;
    if let Some(output) = &job.output {
        grid.grid.output = output.clone();
    }
    if let Some(step) = job.step {
        grid.step = step;
    }

    info!(
        input = %job.input.display(),
        step = grid.step,
        smoothing_window = config.contour.smoothing_window,
        "Generating contour lines"
    );

    draw_contour_lines_with(&grid, &config.contour)
        .with_context(|| format!("Failed to contour {}", job.input.display()))?;

    Ok(grid.grid.output)
}

fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    Matrix::new(1, values.len(), values.to_vec()).and_then(|m| m.min_max())
}

fn magnitude_range(first: &Matrix, second: &Matrix) -> Option<(f64, f64)> {
    let magnitudes: Vec<f64> = first
        .as_slice()
        .iter()
        .zip(second.as_slice())
        .map(|(a, b)| a.hypot(*b))
        .collect();
    value_range(&magnitudes)
}

/// Describe where a job's output went, for the final log line.
pub fn describe_output(path: &Path) -> String {
    match std::fs::metadata(path) {
        Ok(meta) => format!("{} ({} bytes)", path.display(), meta.len()),
        Err(_) => path.display().to_string(),
    }
}
