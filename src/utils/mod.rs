//! Utility functions

pub mod validation;

pub use validation::{normalize_grade_and_class, parse_position, validate_name, validate_score};
