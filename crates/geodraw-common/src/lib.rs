//! Common types shared by the geodraw crates: grid shapes, validation and errors.

pub mod error;
pub mod grid;
pub mod validation;

pub use error::{GeoDrawError, GeoDrawResult, ValidationError};
pub use grid::{ContourGrid, DualGrid, IrregularGrid, Matrix, RegularGrid};
pub use validation::Validate;
