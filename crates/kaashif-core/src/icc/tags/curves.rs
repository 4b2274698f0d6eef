//! Curve Tag Types
//!
//! ICC profiles store tone reproduction curves (TRC) as `curv` tags:
//! a count followed by either one u8Fixed8 gamma or `count` u16 samples.
//! Some embedded profiles carry a bare 32-byte table instead, with one
//! 8-bit sample per byte.
//!
//! See ICC.1:2022 Section 10.6 (curv)

use std::fmt;

use crate::icc::types::{TypeSignature, U8Fixed8, read_u16_be, read_u32_be};

/// Offset of the curve entry count (after type signature and reserved bytes)
const COUNT_OFFSET: usize = 8;

/// Offset of the first curve entry
const ENTRIES_OFFSET: usize = 12;

/// Size of a legacy 8-bit curve table
pub const LEGACY_LUT_SIZE: usize = 32;

/// Entries shown before a rendered LUT is elided
pub const DEFAULT_DISPLAY_LIMIT: usize = 16;

/// Why a curve payload could not be turned into a gamma or a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreadableReason {
    /// Neither a `curv` payload nor a 32-byte legacy table
    UnknownOrNotCurveType,
    /// Single-gamma curve without the two gamma bytes
    GammaValueTruncated,
    /// Single-gamma curve whose gamma is zero
    GammaValueZero,
}

/// Curve lookup table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lut {
    entries: Vec<u16>,
}

impl Lut {
    pub fn new(entries: Vec<u16>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[u16] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether rendering with `limit` entries elides part of the table
    pub fn truncated_for_display(&self, limit: usize) -> bool {
        self.entries.len() > limit
    }

    /// Render with at most `limit` entries shown
    ///
    /// The total always reports every entry in the table.
    pub fn display(&self, limit: usize) -> LutDisplay<'_> {
        LutDisplay { lut: self, limit }
    }
}

/// Rendered form of a [`Lut`]: `LUT: [a, b, c, ...] (total n)`
pub struct LutDisplay<'a> {
    lut: &'a Lut,
    limit: usize,
}

impl fmt::Display for LutDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.lut.entries();
        f.write_str("LUT: [")?;
        for (i, v) in entries.iter().take(self.limit).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        if self.lut.truncated_for_display(self.limit) {
            f.write_str(", ...")?;
        }
        write!(f, "] (total {})", entries.len())
    }
}

/// Decoded TRC tag
#[derive(Debug, Clone, PartialEq)]
pub enum CurveTag {
    /// Simple gamma (count = 1)
    Gamma(f64),
    /// Sampled curve, or a legacy 8-bit table
    Lut(Lut),
    /// Payload that cannot be interpreted
    Unreadable(UnreadableReason),
}

impl CurveTag {
    /// Decode a tag payload, starting at its type signature
    pub fn decode(data: &[u8]) -> Self {
        let is_curv = data.len() >= ENTRIES_OFFSET
            && read_u32_be(data, 0) == Some(TypeSignature::CURVE.0);

        if is_curv {
            Self::decode_curv(data)
        } else if data.len() == LEGACY_LUT_SIZE {
            CurveTag::Lut(Lut::new(data.iter().map(|&b| u16::from(b)).collect()))
        } else {
            CurveTag::Unreadable(UnreadableReason::UnknownOrNotCurveType)
        }
    }

    fn decode_curv(data: &[u8]) -> Self {
        let count = read_u32_be(data, COUNT_OFFSET).unwrap_or(0) as usize;

        if count == 1 {
            return match read_u16_be(data, ENTRIES_OFFSET).map(U8Fixed8) {
                None => CurveTag::Unreadable(UnreadableReason::GammaValueTruncated),
                Some(U8Fixed8(0)) => CurveTag::Unreadable(UnreadableReason::GammaValueZero),
                Some(gamma) => CurveTag::Gamma(gamma.to_f64()),
            };
        }

        // A count larger than the payload yields the samples that are present
        let table = data[ENTRIES_OFFSET..]
            .chunks_exact(2)
            .take(count)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        CurveTag::Lut(Lut::new(table))
    }

    pub fn as_gamma(&self) -> Option<f64> {
        match self {
            CurveTag::Gamma(g) => Some(*g),
            _ => None,
        }
    }

    pub fn as_lut(&self) -> Option<&Lut> {
        match self {
            CurveTag::Lut(lut) => Some(lut),
            _ => None,
        }
    }
}

/// Decode a tag payload as a TRC curve
pub fn decode_curve(data: &[u8]) -> CurveTag {
    CurveTag::decode(data)
}
