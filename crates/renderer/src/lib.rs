//! Web Mercator rasterization and contour extraction for lat/lon grids.
//!
//! Two products are supported:
//! - PNG rasters of single-value, dual-value and scattered grids
//!   ([`raster`], [`draw`])
//! - smoothed contour lines exported as GeoJSON ([`isolines`], [`geojson`])

pub mod coloring;
pub mod contour;
pub mod draw;
pub mod geojson;
pub mod isolines;
pub mod output;
pub mod padding;
pub mod png;
pub mod raster;

pub use contour::{IsolineTracer, MarchingSquares, Point, Polyline};
pub use draw::{
    draw_contour_lines, draw_contour_lines_with, draw_mercator, draw_mercator_default,
    draw_mercator_dual, draw_mercator_dual_default, draw_mercator_dual_with,
    draw_mercator_irregular, draw_mercator_irregular_default, draw_mercator_irregular_with,
    draw_mercator_with,
};
pub use geojson::{export_feature_collection, FeatureCollection};
pub use isolines::{
    generate_contour_lines, generate_contour_lines_with, ContourConfig, ContourLine, GeoPoint,
};
pub use padding::{pad_longitude, PaddedGrid};
pub use raster::{rasterize_dual, rasterize_irregular, rasterize_regular, RasterConfig};
