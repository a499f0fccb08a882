//! Structural validation of input grids.
//!
//! Checks run in a fixed priority order and stop at the first failure:
//!
//! 1. latitudes non-empty
//! 2. longitudes non-empty
//! 3. value container(s) non-empty
//! 4. container length matches the latitude count
//! 5. container width matches the longitude count
//! 6. accuracy strictly positive
//! 7. output path non-empty
//!
//! No numeric work happens here; a failed check is always fatal for the
//! operation that requested it.

use crate::error::ValidationError;
use crate::grid::{ContourGrid, DualGrid, IrregularGrid, Matrix, RegularGrid};
use std::path::Path;

/// A grid that can check its own structural invariants.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for RegularGrid {
    fn validate(&self) -> Result<(), ValidationError> {
        check_axes(&self.latitudes, &self.longitudes)?;
        check_matrix("values", &self.values, &self.latitudes, &self.longitudes)?;
        check_accuracy(self.accuracy)?;
        check_output(&self.output)
    }
}

impl Validate for DualGrid {
    fn validate(&self) -> Result<(), ValidationError> {
        check_axes(&self.latitudes, &self.longitudes)?;
        check_matrix("first", &self.first, &self.latitudes, &self.longitudes)?;
        check_matrix("second", &self.second, &self.latitudes, &self.longitudes)?;
        check_accuracy(self.accuracy)?;
        check_output(&self.output)
    }
}

impl Validate for IrregularGrid {
    fn validate(&self) -> Result<(), ValidationError> {
        check_axes(&self.latitudes, &self.longitudes)?;

        if self.values.is_empty() {
            return Err(ValidationError::EmptyValues { field: "values" });
        }
        if self.values.len() != self.latitudes.len() {
            return Err(ValidationError::RowCountMismatch {
                field: "values",
                len: self.values.len(),
                expected: self.latitudes.len(),
            });
        }
        // Samples are triples, so the longitude list pairs with the latitudes.
        if self.longitudes.len() != self.latitudes.len() {
            return Err(ValidationError::ColumnCountMismatch {
                field: "longitudes",
                len: self.longitudes.len(),
                expected: self.latitudes.len(),
            });
        }

        check_accuracy(self.accuracy)?;
        check_output(&self.output)
    }
}

impl Validate for ContourGrid {
    fn validate(&self) -> Result<(), ValidationError> {
        self.grid.validate()
    }
}

fn check_axes(latitudes: &[f64], longitudes: &[f64]) -> Result<(), ValidationError> {
    if latitudes.is_empty() {
        return Err(ValidationError::EmptyLatitudes);
    }
    if longitudes.is_empty() {
        return Err(ValidationError::EmptyLongitudes);
    }
    Ok(())
}

fn check_matrix(
    field: &'static str,
    matrix: &Matrix,
    latitudes: &[f64],
    longitudes: &[f64],
) -> Result<(), ValidationError> {
    if matrix.rows() == 0 {
        return Err(ValidationError::EmptyValues { field });
    }
    if matrix.rows() != latitudes.len() {
        return Err(ValidationError::RowCountMismatch {
            field,
            len: matrix.rows(),
            expected: latitudes.len(),
        });
    }
    if matrix.cols() != longitudes.len() {
        return Err(ValidationError::ColumnCountMismatch {
            field,
            len: matrix.cols(),
            expected: longitudes.len(),
        });
    }
    Ok(())
}

fn check_accuracy(accuracy: f64) -> Result<(), ValidationError> {
    // Written this way round so NaN is rejected too.
    if !(accuracy > 0.0) {
        return Err(ValidationError::InvalidAccuracy(accuracy));
    }
    Ok(())
}

fn check_output(output: &Path) -> Result<(), ValidationError> {
    if output.as_os_str().is_empty() {
        return Err(ValidationError::EmptyOutputPath);
    }
    Ok(())
}
