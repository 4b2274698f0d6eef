//! Classifier configuration
//!
//! The built-in defaults describe what common metadata readers return for
//! JPEG/PNG/TIFF files. Everything can be overridden from JSON; missing
//! keys fall back to the defaults.
//!
//! ```
//! use kaashif_core::ClassifierConfig;
//!
//! let config = ClassifierConfig::from_json_str(r#"{ "lut_display_limit": 8 }"#).unwrap();
//! assert_eq!(config.lut_display_limit, 8);
//! assert!(config.trc_fields.contains_key("RedTRC"));
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::icc::TagSignature;
use crate::icc::tags::DEFAULT_DISPLAY_LIMIT;
use crate::{Error, Result};

/// Fields the metadata reader reports as embedded binary containers
pub const DEFAULT_BINARY_FIELDS: &[&str] = &[
    "EXIF",
    "ICC_Profile",
    "ICCProfile",
    "XMP",
    "XMPToolkit",
    "XMPMP",
    "XMPData",
    "ICC",
    "ICCProfileData",
];

/// Words that mark decoded binary as readable metadata text
///
/// Each entry is a regex fragment, matched case-insensitively anywhere.
pub const DEFAULT_TEXT_KEYWORDS: &[&str] = &[
    "xmpmeta",
    "rdf:RDF",
    "icc",
    "profile",
    "desc",
    "copyright",
    "adobe",
    "photoshop",
    "exif",
    "tiff",
    "camera",
    "date",
];

/// Classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// TRC field name -> ICC tag holding the curve
    pub trc_fields: IndexMap<String, TagSignature>,
    /// Fields always rendered as text, even when not binary
    pub binary_fields: Vec<String>,
    /// Keyword fragments that keep decoded binary as text
    pub text_keywords: Vec<String>,
    /// LUT entries shown before eliding
    pub lut_display_limit: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let trc_fields = [
            ("RedTRC", TagSignature::RED_TRC),
            ("GreenTRC", TagSignature::GREEN_TRC),
            ("BlueTRC", TagSignature::BLUE_TRC),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            trc_fields,
            binary_fields: DEFAULT_BINARY_FIELDS.iter().map(|s| s.to_string()).collect(),
            text_keywords: DEFAULT_TEXT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            lut_display_limit: DEFAULT_DISPLAY_LIMIT,
        }
    }
}

impl ClassifierConfig {
    /// Parse configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> Result<()> {
        if self.lut_display_limit == 0 {
            return Err(Error::InvalidConfig(
                "lut_display_limit must be at least 1".to_string(),
            ));
        }
        if let Some(empty) = self.text_keywords.iter().find(|k| k.is_empty()) {
            return Err(Error::InvalidConfig(format!(
                "empty text keyword {empty:?} would match everything"
            )));
        }
        Ok(())
    }
}
