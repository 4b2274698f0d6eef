//! EXIF orientation description
//!
//! Reports whether an image needs rotating or mirroring for display, in
//! the shape the analysis report stores under `autoOrient`.

use serde::Serialize;
use serde_json::Value;

use crate::classify::{MetadataRecord, MetadataValue};

/// Field the description is stored under in an analyzed record
pub const AUTO_ORIENT_KEY: &str = "autoOrient";

/// Fields holding the orientation, in lookup order
const ORIENTATION_FIELDS: &[&str] = &["Orientation", "EXIF:Orientation"];

/// Orientation summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoOrient {
    /// Whether the image differs from its stored orientation
    pub applied: bool,
    /// Parsed orientation number, the raw value if unparsable, or null
    pub orientation: Value,
    pub description: String,
}

/// Human-readable name of an EXIF orientation value
pub fn describe(orientation: i64) -> Option<&'static str> {
    Some(match orientation {
        1 => "Normal (0°)",
        2 => "Mirrored horizontal",
        3 => "Rotated 180°",
        4 => "Mirrored vertical",
        5 => "Mirrored horizontal then rotated 90° CCW",
        6 => "Rotated 90° CW",
        7 => "Mirrored horizontal then rotated 90° CW",
        8 => "Rotated 90° CCW",
        _ => return None,
    })
}

/// Describe the orientation stored in a metadata record
pub fn auto_orient(record: &MetadataRecord) -> AutoOrient {
    let Some(raw) = ORIENTATION_FIELDS
        .iter()
        .filter_map(|field| record.get(*field))
        .map(MetadataValue::to_json)
        .find(is_present)
    else {
        return AutoOrient {
            applied: false,
            orientation: Value::Null,
            description: "No EXIF orientation tag found".to_string(),
        };
    };

    match leading_integer(&raw) {
        Some(n) => AutoOrient {
            applied: n != 1,
            orientation: Value::from(n),
            description: describe(n)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Unknown ({n})")),
        },
        None => AutoOrient {
            applied: false,
            orientation: raw,
            description: "Unknown orientation value".to_string(),
        },
    }
}

/// Empty strings, zero, false and null count as absent
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Integer prefix of a value's text, e.g. `6` for `"6 (Rotate 90 CW)"`
fn leading_integer(value: &Value) -> Option<i64> {
    let text = match value {
        Value::Number(n) => return n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim_start(),
        _ => return None,
    };

    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

impl From<AutoOrient> for MetadataValue {
    fn from(orient: AutoOrient) -> Self {
        MetadataValue::Opaque(serde_json::json!({
            "applied": orient.applied,
            "orientation": orient.orientation,
            "description": orient.description,
        }))
    }
}
