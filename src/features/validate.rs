//! Request-body validation for feature records.
//!
//! Works on raw JSON so that every field can be checked independently and
//! all failures reported together, instead of stopping at the first bad
//! field. Each failure becomes one [`FieldError`] with a field path, a
//! human-readable message, and a machine-readable error type.

use serde::Serialize;
use serde_json::Value;

use crate::features::record::{FeatureRecord, Island, Sex};

/// One per-field validation failure, as surfaced in 400 responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Path to the offending field, e.g. `["body", "bill_length_mm"]`.
    pub loc: Vec<String>,

    /// Human-readable description.
    pub msg: String,

    /// Machine-readable error kind, e.g. `missing` or `enum`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    fn new(field: &str, msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: vec!["body".to_string(), field.to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    /// An error attached to the body as a whole rather than one field.
    pub fn body(msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

/// Validate and coerce an untyped JSON body into a [`FeatureRecord`].
///
/// Numeric fields accept JSON numbers and numeric strings; `year` must be
/// integral. Enum fields match their literals exactly. On failure, returns
/// every field error found, in record field order.
pub fn parse_record(body: &Value) -> Result<FeatureRecord, Vec<FieldError>> {
    let Some(object) = body.as_object() else {
        return Err(vec![FieldError::body(
            "Input should be a valid dictionary or object",
            "model_type",
        )]);
    };

    let mut errors = Vec::new();

    let bill_length_mm = require_f64(object, "bill_length_mm", &mut errors);
    let bill_depth_mm = require_f64(object, "bill_depth_mm", &mut errors);
    let flipper_length_mm = require_f64(object, "flipper_length_mm", &mut errors);
    let body_mass_g = require_f64(object, "body_mass_g", &mut errors);
    let year = require_i64(object, "year", &mut errors);
    let sex = require_sex(object, &mut errors);
    let island = require_island(object, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    // All fields validated above; the unwraps cannot fire.
    Ok(FeatureRecord {
        bill_length_mm: bill_length_mm.unwrap(),
        bill_depth_mm: bill_depth_mm.unwrap(),
        flipper_length_mm: flipper_length_mm.unwrap(),
        body_mass_g: body_mass_g.unwrap(),
        year: year.unwrap(),
        sex: sex.unwrap(),
        island: island.unwrap(),
    })
}

fn require_f64(
    object: &serde_json::Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    let Some(value) = object.get(field) else {
        errors.push(FieldError::new(field, "Field required", "missing"));
        return None;
    };

    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.parse::<f64>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                errors.push(FieldError::new(
                    field,
                    "Input should be a valid number, unable to parse string as a number",
                    "float_parsing",
                ));
                None
            }
        },
        _ => {
            errors.push(FieldError::new(
                field,
                "Input should be a valid number",
                "float_type",
            ));
            None
        }
    }
}

fn require_i64(
    object: &serde_json::Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<i64> {
    let Some(value) = object.get(field) else {
        errors.push(FieldError::new(field, "Field required", "missing"));
        return None;
    };

    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| integral_f64(n.as_f64()?)),
        Value::String(s) => s
            .parse::<i64>()
            .ok()
            .or_else(|| integral_f64(s.parse::<f64>().ok()?)),
        _ => None,
    };

    if parsed.is_none() {
        errors.push(FieldError::new(
            field,
            "Input should be a valid integer",
            "int_parsing",
        ));
    }
    parsed
}

/// Accept a float only if it carries no fractional part.
fn integral_f64(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

fn require_sex(
    object: &serde_json::Map<String, Value>,
    errors: &mut Vec<FieldError>,
) -> Option<Sex> {
    let Some(value) = object.get("sex") else {
        errors.push(FieldError::new("sex", "Field required", "missing"));
        return None;
    };

    let parsed = value.as_str().and_then(Sex::parse);
    if parsed.is_none() {
        errors.push(FieldError::new(
            "sex",
            "Input should be 'male' or 'female'",
            "enum",
        ));
    }
    parsed
}

fn require_island(
    object: &serde_json::Map<String, Value>,
    errors: &mut Vec<FieldError>,
) -> Option<Island> {
    let Some(value) = object.get("island") else {
        errors.push(FieldError::new("island", "Field required", "missing"));
        return None;
    };

    let parsed = value.as_str().and_then(Island::parse);
    if parsed.is_none() {
        errors.push(FieldError::new(
            "island",
            "Input should be 'Torgersen', 'Biscoe' or 'Dream'",
            "enum",
        ));
    }
    parsed
}
