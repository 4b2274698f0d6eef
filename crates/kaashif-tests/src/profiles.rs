//! Synthetic ICC profiles
//!
//! Profiles only carry what tag lookup reads: a zeroed 128-byte header
//! (with the size field filled in), the tag count and the tag table, then
//! the tag payloads in table order.

/// Tag table entry to be written
#[derive(Debug, Clone)]
enum Entry {
    /// Payload appended after the table, offset/size filled in
    Payload { sig: [u8; 4], data: Vec<u8> },
    /// Offset/size written verbatim
    Raw { sig: [u8; 4], offset: u32, size: u32 },
}

/// Builder for minimal ICC profiles
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    entries: Vec<Entry>,
    declared_count: Option<u32>,
    truncate_to: Option<usize>,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag whose payload follows the tag table
    pub fn tag(mut self, sig: &[u8; 4], data: impl Into<Vec<u8>>) -> Self {
        self.entries.push(Entry::Payload {
            sig: *sig,
            data: data.into(),
        });
        self
    }

    /// Add a tag entry with explicit offset and size
    pub fn raw_entry(mut self, sig: &[u8; 4], offset: u32, size: u32) -> Self {
        self.entries.push(Entry::Raw {
            sig: *sig,
            offset,
            size,
        });
        self
    }

    /// Write this tag count instead of the real number of entries
    pub fn declared_count(mut self, count: u32) -> Self {
        self.declared_count = Some(count);
        self
    }

    /// Cut the finished profile to `len` bytes
    pub fn truncate(mut self, len: usize) -> Self {
        self.truncate_to = Some(len);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let count = self.entries.len();
        let mut data = vec![0u8; 128];
        let declared = self.declared_count.unwrap_or(count as u32);
        data.extend_from_slice(&declared.to_be_bytes());

        let mut offset = 132 + count * 12;
        for entry in &self.entries {
            let (sig, entry_offset, size) = match entry {
                Entry::Payload { sig, data: payload } => {
                    let start = offset;
                    offset += payload.len();
                    (sig, start as u32, payload.len() as u32)
                }
                Entry::Raw { sig, offset, size } => (sig, *offset, *size),
            };
            data.extend_from_slice(sig);
            data.extend_from_slice(&entry_offset.to_be_bytes());
            data.extend_from_slice(&size.to_be_bytes());
        }

        for entry in &self.entries {
            if let Entry::Payload { data: payload, .. } = entry {
                data.extend_from_slice(payload);
            }
        }

        let size = data.len() as u32;
        data[0..4].copy_from_slice(&size.to_be_bytes());
        data[36..40].copy_from_slice(b"acsp");

        if let Some(len) = self.truncate_to {
            data.truncate(len);
        }
        data
    }
}

/// `curv` payload holding a single u8Fixed8 gamma
pub fn curv_gamma(raw: u16) -> Vec<u8> {
    let mut data = curv_header(1);
    data.extend_from_slice(&raw.to_be_bytes());
    data
}

/// `curv` payload holding a table
pub fn curv_table(values: &[u16]) -> Vec<u8> {
    let mut data = curv_header(values.len() as u32);
    for v in values {
        data.extend_from_slice(&v.to_be_bytes());
    }
    data
}

/// `curv` header with an arbitrary count and no entries
pub fn curv_header(count: u32) -> Vec<u8> {
    let mut data = b"curv".to_vec();
    data.extend_from_slice(&[0u8; 4]);
    data.extend_from_slice(&count.to_be_bytes());
    data
}

/// 32-byte legacy table, a linear ramp 0..=248
pub fn legacy_lut() -> Vec<u8> {
    (0..32u8).map(|i| i * 8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let data = ProfileBuilder::new()
            .tag(b"rTRC", vec![1, 2])
            .raw_entry(b"gTRC", 10, 4)
            .build();

        assert_eq!(data.len(), 132 + 24 + 2);
        assert_eq!(&data[128..132], &2u32.to_be_bytes());
        assert_eq!(&data[132..136], b"rTRC");
        assert_eq!(&data[136..140], &156u32.to_be_bytes());
        assert_eq!(&data[144..148], b"gTRC");
        assert_eq!(&data[148..152], &10u32.to_be_bytes());
        assert_eq!(&data[156..], &[1, 2]);
    }
}
