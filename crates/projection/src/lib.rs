//! Coordinate reference system transformations.
//!
//! Implements the spherical Web Mercator projection from scratch without
//! external dependencies.

pub mod mercator;

pub use mercator::{WebMercator, WEB_MERCATOR_MAX_EXTENT};
