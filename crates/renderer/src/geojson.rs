//! GeoJSON export of contour lines.
//!
//! Each line becomes a `Feature` with a `LineString` geometry in
//! `[longitude, latitude]` order and a single `value` property holding the
//! contour level.

use crate::isolines::ContourLine;
use geodraw_common::GeoDrawResult;
use serde::{Deserialize, Serialize};

/// A GeoJSON FeatureCollection of contour lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features: Vec::new(),
        }
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// Serialize as indented JSON text.
    pub fn to_json_pretty(&self) -> GeoDrawResult<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// A single contour feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    pub geometry: Geometry,

    pub properties: ContourProperties,
}

impl Feature {
    /// Create a LineString feature for a contour level.
    pub fn line_string(coordinates: Vec<[f64; 2]>, value: f64) -> Self {
        Self {
            type_: "Feature".to_string(),
            geometry: Geometry::LineString { coordinates },
            properties: ContourProperties { value },
        }
    }
}

/// Geometry of a contour feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    LineString {
        /// Array of [longitude, latitude] coordinate pairs.
        coordinates: Vec<[f64; 2]>,
    },
}

/// Properties attached to each contour feature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ContourProperties {
    /// Contour level
    pub value: f64,
}

/// Build a feature collection from contour lines, one feature per line in
/// input order. Lines with fewer than two points are left out.
pub fn export_feature_collection(lines: &[ContourLine]) -> FeatureCollection {
    lines
        .iter()
        .filter(|line| line.points.len() >= 2)
        .fold(FeatureCollection::new(), |collection, line| {
            let coordinates = line.points.iter().map(|p| [p.lon, p.lat]).collect();
            collection.with_feature(Feature::line_string(coordinates, line.value))
        })
}
