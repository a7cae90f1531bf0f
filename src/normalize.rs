// src/normalize.rs

use serde_json::{Map, Value};
use std::error::Error;
use std::fmt;

/// Facility fields nested under `facilities` during ingestion. Key spellings
/// match the upstream payload exactly.
pub const FACILITY_FIELDS: [&str; 5] = [
    "room_living_room_facilitites",
    "room_kitchen_facilitites",
    "room_toilet_facilitites",
    "room_bathroom_facilitites",
    "room_bedroom_facilitites",
];

/// Listing metadata fields nested under `info`.
pub const INFO_FIELDS: [&str; 16] = [
    "Huisdieren",
    "Muziek-instrument",
    "Energy_label",
    "Elevator",
    "Flooring",
    "Garden",
    "Heatings",
    "Maintenance_indoor",
    "Maintenance_outdoor",
    "Price_on_request",
    "Rental_period",
    "Roofterrace",
    "Smoking Allowed",
    "Balcony",
    "Servicekosten yes/no",
    "Kadestraal_owner",
];

#[derive(Debug)]
pub enum NormalizeError {
    NotCoercible { field: String, value: String },
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::NotCoercible { field, value } => {
                write!(f, "Field '{field}' value {value} cannot be converted to 0/1")
            }
        }
    }
}

impl Error for NormalizeError {}

/// Moves the named top-level fields of each listing into a nested sub-object
/// under `group_key`. Absent fields are skipped, as are non-object entries.
/// The sub-object is only inserted when at least one field actually moved, so
/// re-running over already-grouped listings is a no-op.
pub fn group_fields(listings: &mut [Value], fields: &[&str], group_key: &str) {
    for item in listings {
        let Some(obj) = item.as_object_mut() else {
            continue;
        };

        let mut grouped = Map::new();
        for field in fields {
            if let Some(value) = obj.remove(*field) {
                grouped.insert((*field).to_string(), value);
            }
        }

        if !grouped.is_empty() {
            obj.insert(group_key.to_string(), Value::Object(grouped));
        }
    }
}

/// Rewrites the named fields to an integer 0/1 wherever they are present:
/// booleans map directly, numbers and numeric strings by a nonzero test, and
/// the literals "true"/"false"/"yes"/"no" by meaning. A present value outside
/// those forms fails the run.
pub fn convert_boolean_fields(
    listings: &mut [Value],
    fields: &[&str],
) -> Result<(), NormalizeError> {
    for item in listings.iter_mut() {
        let Some(obj) = item.as_object_mut() else {
            continue;
        };

        for field in fields {
            if let Some(value) = obj.get_mut(*field) {
                let flag = as_flag(value).ok_or_else(|| NormalizeError::NotCoercible {
                    field: (*field).to_string(),
                    value: value.to_string(),
                })?;
                *value = Value::from(flag);
            }
        }
    }

    Ok(())
}

fn as_flag(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n.as_f64().map(|f| i64::from(f != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(1),
            "false" | "no" => Some(0),
            other => other.parse::<f64>().ok().map(|f| i64::from(f != 0.0)),
        },
        _ => None,
    }
}
