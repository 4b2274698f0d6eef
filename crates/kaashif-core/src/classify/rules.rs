//! Field name -> handling rule table

use std::collections::HashMap;

use crate::config::ClassifierConfig;
use crate::icc::TagSignature;

/// How a field is treated before its value is looked at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Tone reproduction curve stored under this ICC tag
    Trc(TagSignature),
    /// Known container of embedded binary metadata (EXIF, ICC, XMP)
    BinaryBlob,
    /// Everything else
    Default,
}

/// Lookup table built from a [`ClassifierConfig`]
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    rules: HashMap<String, FieldRule>,
}

impl FieldRules {
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let mut rules = HashMap::new();
        for field in &config.binary_fields {
            rules.insert(field.clone(), FieldRule::BinaryBlob);
        }
        // TRC handling takes precedence if a field is listed twice
        for (field, sig) in &config.trc_fields {
            rules.insert(field.clone(), FieldRule::Trc(*sig));
        }
        Self { rules }
    }

    pub fn rule_for(&self, key: &str) -> FieldRule {
        self.rules.get(key).copied().unwrap_or(FieldRule::Default)
    }
}
