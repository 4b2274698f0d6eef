//! Fixed-width hex dump
//!
//! Splits a buffer into 16-byte rows of offset, hex bytes and printable
//! ASCII, the layout shown by the hex view page. The concatenated ASCII
//! column is exposed as "decoded text"; it is illustrative only and cannot
//! be turned back into the original bytes.

use std::fmt::Write;

use serde::Serialize;

/// Bytes per row
pub const ROW_WIDTH: usize = 16;

/// One row of a hex dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HexRow {
    /// `0x` + zero-padded lowercase offset of the first byte, e.g. `0x00000010`
    pub offset: String,
    /// Space separated lowercase byte pairs
    pub hex: String,
    /// Printable ASCII, `.` for everything else
    pub text: String,
}

impl HexRow {
    fn new(start: usize, chunk: &[u8]) -> Self {
        let mut hex = String::with_capacity(chunk.len() * 3);
        for (i, b) in chunk.iter().enumerate() {
            if i > 0 {
                hex.push(' ');
            }
            // Writing to a String cannot fail
            let _ = write!(hex, "{b:02x}");
        }

        Self {
            offset: format!("0x{start:08x}"),
            hex,
            text: chunk.iter().map(|&b| printable(b)).collect(),
        }
    }

    /// Number of bytes represented by this row
    pub fn byte_count(&self) -> usize {
        self.text.len()
    }
}

fn printable(b: u8) -> char {
    if (32..=126).contains(&b) {
        b as char
    } else {
        '.'
    }
}

/// Full hex dump of a buffer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HexDump {
    pub hex_rows: Vec<HexRow>,
    pub decoded_text: String,
}

impl HexDump {
    pub fn from_bytes(data: &[u8]) -> Self {
        let hex_rows = format(data);
        let decoded_text = hex_rows.iter().map(|row| row.text.as_str()).collect();
        Self {
            hex_rows,
            decoded_text,
        }
    }
}

/// Format `data` as hex dump rows, one per 16-byte chunk
pub fn format(data: &[u8]) -> Vec<HexRow> {
    data.chunks(ROW_WIDTH)
        .enumerate()
        .map(|(i, chunk)| HexRow::new(i * ROW_WIDTH, chunk))
        .collect()
}
