//! Metadata field classification
//!
//! Turns every value of a [`MetadataRecord`] into something a report can
//! show directly. Each field is handled on its own by one ordered set of
//! rules; the first rule that applies decides the output:
//!
//! 1. TRC field holding the reader's `(Binary data N bytes, ...)`
//!    placeholder: the curve is read from the image's ICC profile.
//! 2. TRC field holding bytes: the bytes are the curve tag payload.
//! 3. Any field holding bytes: XML or metadata-looking text is kept as
//!    UTF-8, anything else becomes base64.
//! 4. Text is passed through.
//! 5. Numbers and booleans are written in their usual textual form.
//! 6. Other structures are dumped as compact JSON. Outside the known binary
//!    fields they keep their structure in a normalized record.
//!
//! Classification never fails. Problems inside one field turn into a fixed
//! placeholder string for that field and nothing else.

mod rules;
mod value;

pub use rules::{FieldRule, FieldRules};
pub use value::{MetadataRecord, MetadataValue};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::debug;
use rayon::prelude::*;
use regex::Regex;
use regex::bytes::Regex as BytesRegex;
use serde_json::Value;

use crate::Result;
use crate::config::ClassifierConfig;
use crate::icc::tags::{CurveTag, UnreadableReason, decode_curve};
use crate::icc::{IccError, IccProfile, TagSignature};
use crate::orientation::{AUTO_ORIENT_KEY, auto_orient};
use value::Shape;

/// Output when no ICC profile was supplied for the image
pub const TRC_PROFILE_NOT_AVAILABLE: &str = "[TRC: ICC profile not available]";
/// Output when the ICC profile cannot hold a tag table
pub const TRC_EXTRACTION_ERROR: &str = "[TRC: ICC extraction error]";
/// Output when the TRC tag is missing or points outside the profile
pub const TRC_TAG_NOT_FOUND: &str = "[TRC: ICC tag not found]";
/// Output for a single-gamma curve without a usable gamma
pub const TRC_GAMMA_UNREADABLE: &str = "[TRC: gamma, unreadable]";
/// Output for a payload that is not a curve
pub const TRC_UNKNOWN_TYPE: &str = "[TRC: unknown or not curveType]";

/// What the reader writes in place of binary fields it did not extract
const PLACEHOLDER_PATTERN: &str = r"\(Binary data [0-9]+ bytes, use -b option to extract\)";

/// ICC profile of the request, parsed once and shared by every TRC field
type ParsedProfile<'a> = std::result::Result<IccProfile<'a>, IccError>;

/// Classification result before it is turned into a string or a value
enum Classified<'a> {
    Text(String),
    Structured(&'a Value),
}

/// Field classifier
///
/// Holds the compiled field rules and patterns; cheap to share between
/// threads and reusable across records.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: FieldRules,
    placeholder: Regex,
    text_keywords: Option<BytesRegex>,
    lut_display_limit: usize,
}

impl Classifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        config.validate()?;

        // ASCII-only case folding: `ſ` or the Kelvin sign never match `s`/`k`
        let text_keywords = if config.text_keywords.is_empty() {
            None
        } else {
            Some(BytesRegex::new(&format!(
                "(?i-u)(?:{})",
                config.text_keywords.join("|")
            ))?)
        };

        Ok(Self {
            rules: FieldRules::from_config(config),
            placeholder: Regex::new(PLACEHOLDER_PATTERN)?,
            text_keywords,
            lut_display_limit: config.lut_display_limit,
        })
    }

    /// Classifier with the built-in field table
    pub fn with_defaults() -> Result<Self> {
        Self::new(&ClassifierConfig::default())
    }

    /// Render one field as text
    ///
    /// `icc` is the ICC profile of the same image, when one could be read.
    /// It is only consulted for TRC fields holding the reader placeholder.
    pub fn classify(&self, key: &str, value: &MetadataValue, icc: Option<&[u8]>) -> String {
        let profile = self.profile_for(key, icc);
        match self.classify_inner(key, value, profile.as_ref()) {
            Classified::Text(text) => text,
            Classified::Structured(v) => v.to_string(),
        }
    }

    /// Classify one field into its normalized value
    ///
    /// Same as [`classify`](Self::classify), except that structured values
    /// outside the known binary fields are kept as [`MetadataValue::Opaque`].
    pub fn classify_value(
        &self,
        key: &str,
        value: &MetadataValue,
        icc: Option<&[u8]>,
    ) -> MetadataValue {
        let profile = self.profile_for(key, icc);
        Self::to_metadata_value(self.classify_inner(key, value, profile.as_ref()))
    }

    /// Parse the profile for a single field; only TRC rules read it
    fn profile_for<'a>(&self, key: &str, icc: Option<&'a [u8]>) -> Option<ParsedProfile<'a>> {
        match self.rules.rule_for(key) {
            FieldRule::Trc(_) => icc.map(IccProfile::parse),
            FieldRule::BinaryBlob | FieldRule::Default => None,
        }
    }

    fn to_metadata_value(classified: Classified<'_>) -> MetadataValue {
        match classified {
            Classified::Text(text) => MetadataValue::Text(text),
            Classified::Structured(v) => MetadataValue::Opaque(v.clone()),
        }
    }

    fn classify_inner<'v>(
        &self,
        key: &str,
        value: &'v MetadataValue,
        profile: Option<&ParsedProfile<'_>>,
    ) -> Classified<'v> {
        let rule = self.rules.rule_for(key);

        let text = match (rule, value.shape()) {
            (FieldRule::Trc(sig), Shape::Text(s)) if self.placeholder.is_match(s) => {
                self.trc_from_profile(key, sig, profile)
            }
            (FieldRule::Trc(_), Shape::Binary(bytes)) => {
                debug!("{key}: decoding {} byte curve payload", bytes.len());
                self.render_curve(&decode_curve(&bytes))
            }
            (_, Shape::Binary(bytes)) => {
                if let MetadataValue::RawBinary { source_key, .. } = value {
                    debug!("{key}: {} bytes read from {source_key}", bytes.len());
                }
                self.binary_to_text(&bytes)
            }
            (_, Shape::Text(s)) => s.to_string(),
            (_, Shape::Scalar(Value::String(s))) => s.clone(),
            (_, Shape::Scalar(v)) => scalar_text(v),
            (FieldRule::BinaryBlob, Shape::Structured(v)) => v.to_string(),
            (_, Shape::Structured(v)) => return Classified::Structured(v),
        };

        Classified::Text(text)
    }

    fn trc_from_profile(
        &self,
        key: &str,
        sig: TagSignature,
        profile: Option<&ParsedProfile<'_>>,
    ) -> String {
        let Some(profile) = profile else {
            debug!("{key}: placeholder value and no ICC profile");
            return TRC_PROFILE_NOT_AVAILABLE.to_string();
        };

        let payload = match profile {
            Ok(profile) => profile.tag_data(sig),
            Err(e) => Err(e.clone()),
        };
        match payload {
            Ok(payload) => self.render_curve(&decode_curve(payload)),
            Err(e) if e.is_invalid_profile() => {
                debug!("{key}: {e}");
                TRC_EXTRACTION_ERROR.to_string()
            }
            Err(e) => {
                debug!("{key}: {e}");
                TRC_TAG_NOT_FOUND.to_string()
            }
        }
    }

    /// Render a decoded curve the way reports show it
    pub fn render_curve(&self, curve: &CurveTag) -> String {
        match curve {
            CurveTag::Gamma(g) => format!("Gamma: {g}"),
            CurveTag::Lut(lut) => lut.display(self.lut_display_limit).to_string(),
            CurveTag::Unreadable(
                UnreadableReason::GammaValueTruncated | UnreadableReason::GammaValueZero,
            ) => TRC_GAMMA_UNREADABLE.to_string(),
            CurveTag::Unreadable(UnreadableReason::UnknownOrNotCurveType) => {
                TRC_UNKNOWN_TYPE.to_string()
            }
        }
    }

    fn binary_to_text(&self, bytes: &[u8]) -> String {
        let utf8 = String::from_utf8_lossy(bytes);
        let readable = utf8.starts_with("<?xml")
            || self
                .text_keywords
                .as_ref()
                .is_some_and(|re| re.is_match(utf8.as_bytes()));

        if readable {
            utf8.into_owned()
        } else {
            BASE64.encode(bytes)
        }
    }

    /// Classify every field of a record into a new record
    ///
    /// Fields are independent and classified in parallel; the output keeps
    /// the input field order. The ICC tag table is read once and shared by
    /// every TRC field.
    pub fn normalize(&self, record: &MetadataRecord, icc: Option<&[u8]>) -> MetadataRecord {
        let profile = icc.map(IccProfile::parse);
        let profile = profile.as_ref();

        let entries: Vec<(&String, &MetadataValue)> = record.iter().collect();
        entries
            .par_iter()
            .map(|(key, value)| {
                let classified = self.classify_inner(key, value, profile);
                ((*key).clone(), Self::to_metadata_value(classified))
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }

    /// Normalize a record and append the `autoOrient` description
    ///
    /// Orientation is read from the record as delivered by the reader.
    pub fn analyze(&self, record: &MetadataRecord, icc: Option<&[u8]>) -> MetadataRecord {
        let orient = auto_orient(record);
        let mut normalized = self.normalize(record, icc);
        normalized.insert(AUTO_ORIENT_KEY.to_string(), orient.into());
        normalized
    }
}

/// Textual form of a JSON number or boolean
///
/// Whole-valued floats drop their fraction (`4.0` renders as `4`).
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f + 0.0),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
