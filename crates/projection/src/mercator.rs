//! Spherical Web Mercator (EPSG:3857) projection.
//!
//! Maps geographic coordinates to planar meters on a square extent of
//! `[-max_extent, max_extent]` on both axes. Longitude is scaled linearly,
//! latitude logarithmically:
//!
//! - `x = lon / 180 * R`
//! - `y = R / 180 * (180 / π) * ln(tan((90 + lat) * π / 360))`
//!
//! and the inverse:
//!
//! - `lon = x / R * 180`
//! - `lat = atan(exp(y * π / R)) * 360 / π - 90`
//!
//! where `R` is the half-circumference of the projected world. The forward
//! transform is undefined exactly at the poles; there it returns a
//! non-finite `y` (or a value far outside the extent) instead of failing.

use geodraw_common::{GeoDrawError, GeoDrawResult};
use std::f64::consts::PI;

/// Half-circumference of the Web Mercator world in meters.
pub const WEB_MERCATOR_MAX_EXTENT: f64 = 20037508.34;

/// Stateless Web Mercator transform with a configurable extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercator {
    /// Projected coordinate of longitude 180° (meters)
    pub max_extent: f64,
}

impl WebMercator {
    pub fn new(max_extent: f64) -> Self {
        Self { max_extent }
    }

    /// Project geographic coordinates (degrees) to planar meters.
    ///
    /// Returns `(x, y)`.
    pub fn forward(&self, lat: f64, lon: f64) -> (f64, f64) {
        let x = lon / 180.0 * self.max_extent;
        let y = self.max_extent / 180.0
            * (180.0 / PI)
            * ((90.0 + lat) * PI / 360.0).tan().ln();
        (x, y)
    }

    /// Like [`forward`](Self::forward), but reports non-finite results as
    /// [`GeoDrawError::ProjectionDomain`].
    pub fn forward_checked(&self, lat: f64, lon: f64) -> GeoDrawResult<(f64, f64)> {
        let (x, y) = self.forward(lat, lon);
        if x.is_finite() && y.is_finite() {
            Ok((x, y))
        } else {
            Err(GeoDrawError::ProjectionDomain { lat, lon })
        }
    }

    /// Unproject planar meters to geographic coordinates (degrees).
    ///
    /// Returns `(lat, lon)`.
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = x / self.max_extent * 180.0;
        let lat = (y * PI / self.max_extent).exp().atan() * 360.0 / PI - 90.0;
        (lat, lon)
    }

    /// Latitude at the top edge of the square extent (about 85.05°).
    pub fn max_latitude(&self) -> f64 {
        self.inverse(0.0, self.max_extent).0
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new(WEB_MERCATOR_MAX_EXTENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        let proj = WebMercator::default();
        let (x, y) = proj.forward(0.0, 0.0);
        assert!(x.abs() < 1e-9, "x should be 0, got {}", x);
        assert!(y.abs() < 1e-6, "y should be 0, got {}", y);

        let (lat, lon) = proj.inverse(0.0, 0.0);
        assert!(lat.abs() < 1e-9);
        assert!(lon.abs() < 1e-9);
    }

    #[test]
    fn test_antimeridian_maps_to_extent() {
        let proj = WebMercator::default();
        let (x, _) = proj.forward(0.0, 180.0);
        assert!((x - WEB_MERCATOR_MAX_EXTENT).abs() < 1e-6);
        let (x, _) = proj.forward(0.0, -180.0);
        assert!((x + WEB_MERCATOR_MAX_EXTENT).abs() < 1e-6);
    }

    #[test]
    fn test_max_latitude() {
        let proj = WebMercator::default();
        let max_lat = proj.max_latitude();
        assert!(
            (max_lat - 85.0511).abs() < 1e-3,
            "max latitude should be ~85.0511, got {}",
            max_lat
        );
    }

    #[test]
    fn test_extent_edges_are_exact() {
        let proj = WebMercator::default();
        assert_eq!(proj.inverse(-WEB_MERCATOR_MAX_EXTENT, 0.0).1, -180.0);
        assert_eq!(proj.inverse(WEB_MERCATOR_MAX_EXTENT, 0.0).1, 180.0);
        assert_eq!(proj.forward(0.0, 180.0).0, WEB_MERCATOR_MAX_EXTENT);
    }

    #[test]
    fn test_symmetry() {
        let proj = WebMercator::default();
        let (_, y_north) = proj.forward(45.0, 0.0);
        let (_, y_south) = proj.forward(-45.0, 0.0);
        assert!(y_north > 0.0);
        assert!((y_north + y_south).abs() < 1e-6);
    }

    #[test]
    fn test_roundtrip() {
        let proj = WebMercator::default();
        let lats = [-89.89, -85.0, -60.5, -30.0, -0.001, 0.0, 12.25, 45.0, 70.0, 89.89];
        let lons = [-180.0, -179.75, -90.0, 0.0, 33.3, 135.0, 180.0];

        for &lat in &lats {
            for &lon in &lons {
                let (x, y) = proj.forward(lat, lon);
                let (lat_back, lon_back) = proj.inverse(x, y);
                assert!(
                    (lat - lat_back).abs() < 1e-9,
                    "lat roundtrip failed for ({}, {}): got {}",
                    lat,
                    lon,
                    lat_back
                );
                assert!(
                    (lon - lon_back).abs() < 1e-9,
                    "lon roundtrip failed for ({}, {}): got {}",
                    lat,
                    lon,
                    lon_back
                );
            }
        }
    }

    #[test]
    fn test_custom_extent() {
        let proj = WebMercator::new(1000.0);
        let (x, _) = proj.forward(0.0, 90.0);
        assert!((x - 500.0).abs() < 1e-9);
        let (_, lon) = proj.inverse(-1000.0, 0.0);
        assert!((lon + 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_south_pole_is_not_finite() {
        let proj = WebMercator::default();
        let (_, y) = proj.forward(-90.0, 0.0);
        assert!(!y.is_finite());

        let err = proj.forward_checked(-90.0, 10.0).unwrap_err();
        assert!(matches!(
            err,
            GeoDrawError::ProjectionDomain { lat, lon } if lat == -90.0 && lon == 10.0
        ));
        assert!(proj.forward_checked(45.0, 10.0).is_ok());
    }
}
