//! # Coordinate Codec
//!
//! Canonical encoding of grid coordinates into parcel ids and back.
//!
//! The canonical id of the cell at `(x, y)` is the string `"x,y"`. Encoding
//! is total over integer pairs and decoding is its unique inverse, so ids
//! are collision-free and safe to use as primary keys.

use crate::errors::CoordinateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the two axes in a canonical id.
pub const ID_SEPARATOR: char = ',';

/// Canonical parcel id, the primary key of a grid cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParcelId(String);

impl ParcelId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode this id back into its coordinate pair.
    pub fn coords(&self) -> Result<(i64, i64), CoordinateError> {
        parse_id(&self.0)
    }
}

impl fmt::Display for ParcelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode a coordinate pair into its canonical id.
pub fn build_id(x: i64, y: i64) -> ParcelId {
    ParcelId(format!("{x}{ID_SEPARATOR}{y}"))
}

/// Encode possibly-missing coordinates, failing when an axis is absent.
///
/// Rows deserialized from loosely-shaped sources may lack one axis; the
/// error message echoes both values so the offending row is identifiable.
pub fn try_build_id(x: Option<i64>, y: Option<i64>) -> Result<ParcelId, CoordinateError> {
    match (x, y) {
        (Some(x), Some(y)) => Ok(build_id(x, y)),
        _ => Err(CoordinateError::MissingAxis { x, y }),
    }
}

/// Decode a canonical id string into its coordinate pair.
///
/// A string is valid iff it is exactly two signed integer tokens separated
/// by [`ID_SEPARATOR`], with optional spaces after the separator only.
pub fn parse_id(id: &str) -> Result<(i64, i64), CoordinateError> {
    let invalid = || CoordinateError::invalid(id);

    let (x_raw, y_raw) = id.split_once(ID_SEPARATOR).ok_or_else(invalid)?;
    let x = integer_token(x_raw).ok_or_else(invalid)?;
    let y = integer_token(y_raw.trim_start_matches(' ')).ok_or_else(invalid)?;

    Ok((x, y))
}

/// Parse a signed integer token: optional leading `-`, then digits only.
fn integer_token(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// A coordinate supplied by a caller: either a canonical id string or a
/// two-element pair whose entries may be missing.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    Id(String),
    Pair(Vec<Option<i64>>),
}

impl From<&str> for CoordinateInput {
    fn from(id: &str) -> Self {
        CoordinateInput::Id(id.to_string())
    }
}

impl From<[i64; 2]> for CoordinateInput {
    fn from(pair: [i64; 2]) -> Self {
        CoordinateInput::Pair(vec![Some(pair[0]), Some(pair[1])])
    }
}

/// Validate a coordinate input and return the decoded pair.
///
/// The error echoes exactly what was rejected; a pair prints its entries
/// joined by the separator with missing entries blank, so `[1, null]`
/// reports `"1,"`.
pub fn check_is_valid(input: &CoordinateInput) -> Result<(i64, i64), CoordinateError> {
    match input {
        CoordinateInput::Id(id) => parse_id(id),
        CoordinateInput::Pair(pair) => match pair.as_slice() {
            [Some(x), Some(y)] => Ok((*x, *y)),
            _ => {
                let echoed = pair
                    .iter()
                    .map(|v| v.map(|v| v.to_string()).unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(&ID_SEPARATOR.to_string());
                Err(CoordinateError::invalid(echoed))
            }
        },
    }
}

/// Anything that names a grid cell.
pub trait GridCell {
    fn x(&self) -> i64;
    fn y(&self) -> i64;
}

impl GridCell for (i64, i64) {
    fn x(&self) -> i64 {
        self.0
    }

    fn y(&self) -> i64 {
        self.1
    }
}

/// Parallel component arrays for batched ledger calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitCoordinates {
    pub x: Vec<i64>,
    pub y: Vec<i64>,
}

/// Project coordinate-bearing records into two parallel arrays,
/// preserving input order.
pub fn split_pairs<C: GridCell>(cells: &[C]) -> SplitCoordinates {
    let mut split = SplitCoordinates {
        x: Vec::with_capacity(cells.len()),
        y: Vec::with_capacity(cells.len()),
    };
    for cell in cells {
        split.x.push(cell.x());
        split.y.push(cell.y());
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_id_joins_coordinates_with_the_separator() {
        assert_eq!(build_id(22, 30).as_str(), "22,30");
        assert_eq!(build_id(0, 0).as_str(), "0,0");
        assert_eq!(build_id(-7, 5).as_str(), "-7,5");
    }

    #[test]
    fn decode_is_the_inverse_of_encode() {
        for &(x, y) in &[(0, 0), (22, 30), (-1, 2), (1, -2), (i64::MAX, i64::MIN)] {
            assert_eq!(parse_id(build_id(x, y).as_str()).unwrap(), (x, y));
        }
    }

    #[test]
    fn try_build_id_requires_both_axes() {
        assert_eq!(try_build_id(Some(22), Some(30)).unwrap().as_str(), "22,30");

        let err = try_build_id(Some(22), None).unwrap_err();
        assert!(err.to_string().contains("x = 22 y = undefined"));
    }

    #[test]
    fn check_is_valid_rejects_malformed_inputs() {
        for input in ["a,b", "1,2  b", "", "1 ,2", "1,2,3", "1.5,2"] {
            assert!(
                check_is_valid(&CoordinateInput::from(input)).is_err(),
                "{input:?} should be rejected"
            );
        }

        let err = check_is_valid(&CoordinateInput::Pair(vec![Some(1), None])).unwrap_err();
        assert_eq!(err, CoordinateError::invalid("1,"));
    }

    #[test]
    fn check_is_valid_accepts_well_formed_inputs() {
        assert_eq!(check_is_valid(&"1,2".into()).unwrap(), (1, 2));
        assert_eq!(check_is_valid(&"-1,2".into()).unwrap(), (-1, 2));
        assert_eq!(check_is_valid(&"1,-2".into()).unwrap(), (1, -2));
        assert_eq!(check_is_valid(&"1,   2".into()).unwrap(), (1, 2));
        assert_eq!(check_is_valid(&[22, 23].into()).unwrap(), (22, 23));
    }

    #[test]
    fn split_pairs_preserves_input_order() {
        let cells = vec![(1, 2), (5, 3), (-1, -2), (9, -7)];
        let split = split_pairs(&cells);

        assert_eq!(split.x, vec![1, 5, -1, 9]);
        assert_eq!(split.y, vec![2, 3, -2, -7]);
    }

    #[test]
    fn coordinate_input_deserializes_untagged() {
        let id: CoordinateInput = serde_json::from_str("\"1,2\"").unwrap();
        assert_eq!(id, CoordinateInput::Id("1,2".to_string()));

        let pair: CoordinateInput = serde_json::from_str("[1, null]").unwrap();
        assert_eq!(pair, CoordinateInput::Pair(vec![Some(1), None]));
    }
}
