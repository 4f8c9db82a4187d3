//! # Land Data Wire Codec
//!
//! On-ledger parcel metadata travels as a CSV string:
//! `version,name,description,ipns`. Fields containing commas or double
//! quotes are double-quoted, with embedded quotes doubled.

use land_types::LandData;
use thiserror::Error;

/// Number of fields in the wire representation.
const FIELD_COUNT: usize = 4;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataCodecError {
    /// Not a well-formed CSV record of the expected shape.
    #[error("malformed land data: {raw:?}")]
    Malformed { raw: String },

    /// The leading version field is not a known version number.
    #[error("unknown land data version: {raw:?}")]
    BadVersion { raw: String },
}

/// Encode decoded metadata into the ledger's expected wire string.
pub fn encode_land_data(data: &LandData) -> String {
    let fields = [
        data.version.to_string(),
        data.name.clone().unwrap_or_default(),
        data.description.clone().unwrap_or_default(),
        data.ipns.clone().unwrap_or_default(),
    ];

    fields
        .iter()
        .map(|field| quote_field(field))
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode a raw ledger-returned metadata string.
pub fn decode_land_data(raw: &str) -> Result<LandData, DataCodecError> {
    let fields = split_record(raw).ok_or_else(|| DataCodecError::Malformed {
        raw: raw.to_string(),
    })?;

    if fields.len() != FIELD_COUNT {
        return Err(DataCodecError::Malformed {
            raw: raw.to_string(),
        });
    }

    let version = fields[0]
        .parse::<u8>()
        .map_err(|_| DataCodecError::BadVersion {
            raw: fields[0].clone(),
        })?;

    Ok(LandData {
        version,
        name: Some(fields[1].clone()),
        description: Some(fields[2].clone()),
        ipns: Some(fields[3].clone()),
    })
}

fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split one CSV record honoring double-quoted fields. Returns `None` on
/// unbalanced quotes or characters trailing a closing quote.
fn split_record(raw: &str) -> Option<Vec<String>> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_started = false;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if !field_started => {
                in_quotes = true;
                field_started = true;
            }
            '"' => return None,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                field_started = false;
            }
            _ => {
                current.push(c);
                field_started = true;
            }
        }
    }

    if in_quotes {
        return None;
    }

    fields.push(current);
    Some(fields)
}
