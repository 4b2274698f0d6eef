//! # kaashif - image metadata normalization
//!
//! Turns the raw metadata a reader extracts from an image (EXIF, ICC, XMP)
//! into values a forensic report can show directly.
//!
//! - **ICC tone curves**: `RedTRC`/`GreenTRC`/`BlueTRC` are decoded from the
//!   embedded ICC profile into `Gamma: 2.2` or `LUT: [...] (total n)`.
//! - **Binary fields**: embedded blobs are kept as text when they look like
//!   XML or metadata, and base64 encoded otherwise.
//! - **Hex dump**: fixed-width offset / hex / ASCII rows for the raw file.
//! - **Orientation**: the EXIF orientation flag, described in words.
//!
//! ## Quick Start
//!
//! ```
//! use kaashif_core::{Classifier, MetadataRecord, MetadataValue};
//!
//! let classifier = Classifier::with_defaults().unwrap();
//!
//! let mut record = MetadataRecord::new();
//! record.insert("Make".into(), MetadataValue::text("Canon"));
//! record.insert(
//!     "RedTRC".into(),
//!     MetadataValue::text("(Binary data 14 bytes, use -b option to extract)"),
//! );
//!
//! // No ICC profile could be read for this image
//! let normalized = classifier.normalize(&record, None);
//! assert_eq!(normalized["Make"].as_text(), Some("Canon"));
//! assert_eq!(
//!     normalized["RedTRC"].as_text(),
//!     Some("[TRC: ICC profile not available]")
//! );
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod hexdump;
pub mod icc;
pub mod orientation;

pub use classify::{Classifier, FieldRule, MetadataRecord, MetadataValue};
pub use config::ClassifierConfig;
pub use error::{Error, Result};
pub use hexdump::{HexDump, HexRow};
pub use icc::{CurveTag, IccError, IccProfile, TagEntry, TagSignature, decode_curve, locate_tag};
pub use orientation::{AutoOrient, auto_orient};

/// Version of kaashif
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
