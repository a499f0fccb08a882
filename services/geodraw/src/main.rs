//! geodraw command-line tool.
//!
//! Renders lat/lon grids to Web Mercator PNG rasters and traces contour
//! lines to GeoJSON. Grids are read from JSON documents; canvas, contour and
//! coloring settings come from an optional YAML job file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use geodraw::commands::{describe_output, run_contour, run_raster, ContourJob, RasterJob};
use geodraw::config::JobConfig;
use geodraw::input::GridKind;

#[derive(Parser, Debug)]
#[command(name = "geodraw")]
#[command(about = "Web Mercator rasters and contour lines from lat/lon grids")]
struct Args {
    /// Job configuration file (YAML)
    #[arg(short, long, env = "GEODRAW_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "GEODRAW_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "GEODRAW_LOG_JSON")]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a grid to a PNG raster
    Raster {
        /// Grid document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Grid shape stored in the document
        #[arg(short, long, value_enum, default_value_t = GridKind::Regular)]
        kind: GridKind,

        /// Output path, overriding the document's
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Trace contour lines and write GeoJSON
    Contour {
        /// Contour grid document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output path, overriding the document's
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Level spacing, overriding the document's
        #[arg(long)]
        step: Option<f64>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);
    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    let config = JobConfig::load(args.config.as_deref())?;
    info!(config = ?args.config, "Loaded configuration");

    let output = match args.command {
        Command::Raster {
            input,
            kind,
            output,
        } => run_raster(
            &RasterJob {
                input,
                kind,
                output,
            },
            &config,
        )?,
        Command::Contour {
            input,
            output,
            step,
        } => run_contour(
            &ContourJob {
                input,
                output,
                step,
            },
            &config,
        )?,
    };

    info!(output = %describe_output(&output), "Done");
    Ok(())
}
