//! ICC Profile Tag Lookup
//!
//! Reads just enough of an embedded ICC profile to find a tag and decode
//! tone reproduction curves, according to ICC.1:2022.
//!
//! # Structure
//!
//! An ICC profile consists of:
//! 1. A 128-byte header
//! 2. A tag table listing all tags
//! 3. Tag data (may overlap)
//!
//! # Example
//!
//! ```
//! use kaashif_core::icc::{IccError, TagSignature, locate_tag};
//!
//! // Anything shorter than header + tag count cannot hold a tag table
//! let err = locate_tag(&[0u8; 64], TagSignature::RED_TRC).unwrap_err();
//! assert!(matches!(err, IccError::TooSmall { .. }));
//! ```

pub mod tags;

mod error;
mod parser;
mod types;

pub use error::IccError;
pub use parser::{
    HEADER_SIZE, IccProfile, TAG_COUNT_OFFSET, TAG_ENTRY_SIZE, TAG_TABLE_OFFSET, TagEntry,
    locate_tag,
};
pub use tags::{CurveTag, Lut, UnreadableReason, decode_curve};
pub use types::{TagSignature, TypeSignature, U8Fixed8};
