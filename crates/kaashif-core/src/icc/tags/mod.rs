//! ICC Profile Tag Decoding
//!
//! Tags contain the actual profile data. Each tag payload starts with:
//! - A 4-byte type signature identifying the data format
//! - 4 reserved bytes
//! - Type-specific data
//!
//! Only the curve types used by tone reproduction curves are decoded.
//!
//! See ICC.1:2022 Section 9.

mod curves;

pub use curves::{
    CurveTag, DEFAULT_DISPLAY_LIMIT, LEGACY_LUT_SIZE, Lut, LutDisplay, UnreadableReason,
    decode_curve,
};
