//! Metadata values as produced by the metadata reader
//!
//! Readers hand back strings for most fields, raw byte buffers for
//! embedded blobs, and arbitrary JSON for everything else (numbers, date
//! objects, nested structures). Buffers that went through JSON arrive in
//! the Node.js form `{"type": "Buffer", "data": [..]}` and are recognized
//! as binary again.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Field name -> value, in reader order
pub type MetadataRecord = IndexMap<String, MetadataValue>;

/// A single metadata value
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    /// Plain text
    Text(String),
    /// Unparsed bytes, tagged with the field they were read from
    RawBinary { bytes: Vec<u8>, source_key: String },
    /// Any other value, kept in its original shape
    Opaque(Value),
}

/// How a value presents itself to the classifier
#[derive(Debug)]
pub(crate) enum Shape<'a> {
    Text(&'a str),
    Binary(Cow<'a, [u8]>),
    Scalar(&'a Value),
    Structured(&'a Value),
}

impl MetadataValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn binary(bytes: impl Into<Vec<u8>>, source_key: impl Into<String>) -> Self {
        Self::RawBinary {
            bytes: bytes.into(),
            source_key: source_key.into(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Bytes carried by this value, if it is binary in any recognized form
    pub fn binary_bytes(&self) -> Option<Cow<'_, [u8]>> {
        match self {
            Self::RawBinary { bytes, .. } => Some(Cow::Borrowed(bytes)),
            Self::Opaque(value) => node_buffer_bytes(value).map(Cow::Owned),
            Self::Text(_) => None,
        }
    }

    pub(crate) fn shape(&self) -> Shape<'_> {
        match self {
            Self::Text(s) => Shape::Text(s),
            Self::RawBinary { bytes, .. } => Shape::Binary(Cow::Borrowed(bytes)),
            Self::Opaque(v) => match node_buffer_bytes(v) {
                Some(bytes) => Shape::Binary(Cow::Owned(bytes)),
                None if v.is_boolean() || v.is_number() || v.is_string() => Shape::Scalar(v),
                None => Shape::Structured(v),
            },
        }
    }

    /// JSON form of the value
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::RawBinary { bytes, .. } => node_buffer_json(bytes),
            Self::Opaque(v) => v.clone(),
        }
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Value> for MetadataValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            other => Self::Opaque(other),
        }
    }
}

impl Serialize for MetadataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::RawBinary { bytes, .. } => node_buffer_json(bytes).serialize(serializer),
            Self::Opaque(v) => v.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for MetadataValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

/// Decode `{"type": "Buffer", "data": [..]}`
fn node_buffer_bytes(value: &Value) -> Option<Vec<u8>> {
    let obj = value.as_object()?;
    if obj.get("type")?.as_str()? != "Buffer" {
        return None;
    }
    obj.get("data")?
        .as_array()?
        .iter()
        .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
        .collect()
}

fn node_buffer_json(bytes: &[u8]) -> Value {
    serde_json::json!({ "type": "Buffer", "data": bytes })
}
