//! Error types for geodraw operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using GeoDrawError.
pub type GeoDrawResult<T> = Result<T, GeoDrawError>;

/// Structural problems with an input grid.
///
/// Variants are listed in the order `validate` checks them; the first
/// violated invariant is the one reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("latitude list is empty")]
    EmptyLatitudes,

    #[error("longitude list is empty")]
    EmptyLongitudes,

    #[error("{field} is empty")]
    EmptyValues { field: &'static str },

    #[error("{field} has {len} rows but there are {expected} latitudes")]
    RowCountMismatch {
        field: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("{field} has {len} columns but there are {expected} longitudes")]
    ColumnCountMismatch {
        field: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("accuracy must be strictly positive, got {0}")]
    InvalidAccuracy(f64),

    #[error("output path is empty")]
    EmptyOutputPath,

    #[error("matrix row {row} has {len} values, expected {expected}")]
    RaggedMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// Primary error type for rasterization and contour generation.
#[derive(Debug, Error)]
pub enum GeoDrawError {
    // === Input Errors ===
    #[error("invalid grid: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid configuration: {0}")]
    Config(String),

    // === Numeric Errors ===
    #[error("projection of lat={lat}, lon={lon} is not finite")]
    ProjectionDomain { lat: f64, lon: f64 },

    #[error("pixel ({pixel_x}, {pixel_y}) maps to cell [{row}, {col}] outside the {rows}x{cols} grid")]
    IndexOutOfRange {
        pixel_x: u32,
        pixel_y: u32,
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },

    #[error("contour generation failed: {0}")]
    Generation(String),

    // === Output Errors ===
    #[error("encoding failed: {0}")]
    Encoding(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GeoDrawError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GeoDrawError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error was caused by the caller's input rather than by
    /// the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GeoDrawError::Validation(_)
                | GeoDrawError::Config(_)
                | GeoDrawError::ProjectionDomain { .. }
                | GeoDrawError::IndexOutOfRange { .. }
        )
    }
}

impl From<serde_json::Error> for GeoDrawError {
    fn from(err: serde_json::Error) -> Self {
        GeoDrawError::Encoding(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts() {
        let err: GeoDrawError = ValidationError::EmptyLatitudes.into();
        assert!(matches!(
            err,
            GeoDrawError::Validation(ValidationError::EmptyLatitudes)
        ));
        assert!(err.is_input_error());
        assert_eq!(err.to_string(), "invalid grid: latitude list is empty");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = GeoDrawError::io(
            "/tmp/out.png",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_input_error());
        assert!(err.to_string().contains("/tmp/out.png"));
    }
}
