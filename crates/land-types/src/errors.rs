//! # Error Types
//!
//! Coordinate validation errors. These are raised before any external call
//! and are never retried.

use thiserror::Error;

/// A coordinate input that cannot name a grid cell.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoordinateError {
    /// A parcel was built without one of its axes.
    #[error("both coordinates are required to build an id: x = {} y = {}", axis(.x), axis(.y))]
    MissingAxis { x: Option<i64>, y: Option<i64> },

    /// The supplied id or pair is not two signed integer tokens.
    #[error("the coordinates \"{input}\" are not valid")]
    Invalid { input: String },
}

impl CoordinateError {
    /// Build an [`CoordinateError::Invalid`] echoing the rejected input.
    pub fn invalid(input: impl Into<String>) -> Self {
        CoordinateError::Invalid {
            input: input.into(),
        }
    }
}

/// Missing axes print as `undefined`, matching the wire representation of
/// loosely-shaped rows.
fn axis(value: &Option<i64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "undefined".to_string(),
    }
}
