//! Prime field coordinate system
//!
//! Axis computation and the piecewise field classification built on it.

pub mod axes;
pub mod classify;

pub use axes::{calculate_prime_field_axes, FieldAxes};
pub use classify::FieldType;
