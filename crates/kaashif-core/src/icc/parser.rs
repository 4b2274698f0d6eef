//! ICC Profile Parser
//!
//! Borrowed view over an embedded ICC profile that reads the tag table and
//! locates individual tags. Only the parts needed for tag lookup are read;
//! the 128-byte header is otherwise left alone.
//!
//! # Structure
//!
//! 1. A 128-byte header
//! 2. A big-endian tag count at offset 128
//! 3. The tag table at offset 132, 12 bytes per entry
//! 4. Tag data (may overlap/share data)
//!
//! # Usage
//!
//! ```ignore
//! let profile = IccProfile::parse(&bytes)?;
//! let payload = profile.tag_data(TagSignature::RED_TRC)?;
//! ```

use log::trace;

use super::error::IccError;
use super::types::{TagSignature, read_u32_be};

/// Size of the fixed ICC header
pub const HEADER_SIZE: usize = 128;

/// Offset of the tag count
pub const TAG_COUNT_OFFSET: usize = HEADER_SIZE;

/// Offset of the first tag table entry
pub const TAG_TABLE_OFFSET: usize = TAG_COUNT_OFFSET + 4;

/// signature(4) + offset(4) + size(4)
pub const TAG_ENTRY_SIZE: usize = 12;

/// Tag table entry (as stored in profile)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEntry {
    /// Tag signature
    pub signature: TagSignature,
    /// Offset from start of profile
    pub offset: u32,
    /// Size of tag data
    pub size: u32,
}

impl TagEntry {
    fn from_bytes(entry: &[u8]) -> Option<Self> {
        Some(Self {
            signature: TagSignature(read_u32_be(entry, 0)?),
            offset: read_u32_be(entry, 4)?,
            size: read_u32_be(entry, 8)?,
        })
    }

    /// Byte range of the tag data, if it lies inside a profile of `profile_len` bytes
    pub fn data_range(&self, profile_len: usize) -> Option<std::ops::Range<usize>> {
        let start = self.offset as usize;
        let end = start.checked_add(self.size as usize)?;
        (end <= profile_len).then_some(start..end)
    }
}

/// An ICC profile tag table borrowed from raw bytes
///
/// Built once per analysis and discarded afterwards; the table never
/// changes after `parse`.
#[derive(Debug, Clone)]
pub struct IccProfile<'a> {
    data: &'a [u8],
    declared_tag_count: u32,
    entries: Vec<TagEntry>,
    /// Signature and offset of a declared entry cut off by the end of the data
    cut_entry: Option<(TagSignature, usize)>,
}

impl<'a> IccProfile<'a> {
    /// Parse the tag table of an ICC profile
    pub fn parse(data: &'a [u8]) -> Result<Self, IccError> {
        let declared_tag_count = Self::parse_tag_count(data)?;
        let (entries, cut_entry) = Self::parse_tag_table(data, declared_tag_count);

        trace!(
            "ICC profile: {} bytes, {} tags declared, {} readable",
            data.len(),
            declared_tag_count,
            entries.len()
        );

        Ok(Self {
            data,
            declared_tag_count,
            entries,
            cut_entry,
        })
    }

    fn parse_tag_count(data: &[u8]) -> Result<u32, IccError> {
        if data.len() < TAG_TABLE_OFFSET {
            return Err(IccError::TooSmall {
                expected: TAG_TABLE_OFFSET,
                actual: data.len(),
            });
        }

        read_u32_be(data, TAG_COUNT_OFFSET).ok_or(IccError::TooSmall {
            expected: TAG_TABLE_OFFSET,
            actual: data.len(),
        })
    }

    /// Parse the tag table
    ///
    /// A declared count that runs past the end of the data yields only the
    /// entries that are fully present. An entry that still has its
    /// signature but lost its offset or size is returned separately.
    fn parse_tag_table(
        data: &[u8],
        count: u32,
    ) -> (Vec<TagEntry>, Option<(TagSignature, usize)>) {
        let table = &data[TAG_TABLE_OFFSET..];
        let readable = table.len() / TAG_ENTRY_SIZE;
        let count = count as usize;

        let entries = table
            .chunks_exact(TAG_ENTRY_SIZE)
            .take(count.min(readable))
            .filter_map(TagEntry::from_bytes)
            .collect();

        let cut_entry = if count > readable {
            let offset = TAG_TABLE_OFFSET + readable * TAG_ENTRY_SIZE;
            read_u32_be(data, offset).map(|sig| (TagSignature(sig), offset))
        } else {
            None
        };

        (entries, cut_entry)
    }

    /// Find the first entry with the given signature
    ///
    /// Duplicate signatures are not allowed by ICC, but when present the
    /// first entry in table order wins. A matching entry whose data lies
    /// outside the profile is reported as `TagOutOfBounds`; one that is
    /// itself cut off by the end of the profile as `TruncatedEntry`.
    pub fn locate(&self, sig: TagSignature) -> Result<TagEntry, IccError> {
        let Some(entry) = self.entries.iter().find(|e| e.signature == sig).copied() else {
            return Err(match self.cut_entry {
                Some((tag, offset)) if tag == sig => IccError::TruncatedEntry {
                    tag,
                    offset,
                    profile_size: self.data.len(),
                },
                _ => IccError::TagNotFound(sig),
            });
        };

        if entry.data_range(self.data.len()).is_none() {
            return Err(IccError::TagOutOfBounds {
                tag: sig,
                offset: entry.offset,
                size: entry.size,
                profile_size: self.data.len(),
            });
        }

        trace!(
            "Located tag '{}' at offset {} ({} bytes)",
            sig, entry.offset, entry.size
        );
        Ok(entry)
    }

    /// Get the raw payload of a tag, including its type signature
    pub fn tag_data(&self, sig: TagSignature) -> Result<&'a [u8], IccError> {
        let entry = self.locate(sig)?;
        let range = entry
            .data_range(self.data.len())
            .ok_or(IccError::TagOutOfBounds {
                tag: sig,
                offset: entry.offset,
                size: entry.size,
                profile_size: self.data.len(),
            })?;
        Ok(&self.data[range])
    }

    /// Tag table entries in table order
    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    /// Tag count as written in the profile
    pub fn declared_tag_count(&self) -> u32 {
        self.declared_tag_count
    }

    /// Get the raw profile data
    pub fn raw_data(&self) -> &'a [u8] {
        self.data
    }
}

/// Locate a tag in raw ICC bytes
pub fn locate_tag(data: &[u8], sig: TagSignature) -> Result<TagEntry, IccError> {
    IccProfile::parse(data)?.locate(sig)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a profile with the given (signature, payload) tags laid out
    /// right after the tag table
    fn create_profile(tags: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        data.extend_from_slice(&(tags.len() as u32).to_be_bytes());

        let mut offset = TAG_TABLE_OFFSET + tags.len() * TAG_ENTRY_SIZE;
        for (sig, payload) in tags {
            data.extend_from_slice(*sig);
            data.extend_from_slice(&(offset as u32).to_be_bytes());
            data.extend_from_slice(&(payload.len() as u32).to_be_bytes());
            offset += payload.len();
        }
        for (_, payload) in tags {
            data.extend_from_slice(payload);
        }

        let size = data.len() as u32;
        data[0..4].copy_from_slice(&size.to_be_bytes());
        data
    }

    #[test]
    fn test_profile_too_small() {
        for len in [0, 1, 100, 128, 131] {
            let data = vec![0u8; len];
            let err = locate_tag(&data, TagSignature::RED_TRC).unwrap_err();
            assert!(err.is_invalid_profile(), "len {len}: {err:?}");
        }
    }

    #[test]
    fn test_empty_tag_table() {
        let data = create_profile(&[]);
        assert_eq!(data.len(), 132);

        let profile = IccProfile::parse(&data).unwrap();
        assert_eq!(profile.declared_tag_count(), 0);
        assert_eq!(
            profile.locate(TagSignature::RED_TRC),
            Err(IccError::TagNotFound(TagSignature::RED_TRC))
        );
    }

    #[test]
    fn test_locate_tag() {
        let data = create_profile(&[(b"rTRC", b"aaaa"), (b"gTRC", b"bbbbbb")]);

        let entry = locate_tag(&data, TagSignature::GREEN_TRC).unwrap();
        assert_eq!(entry.signature, TagSignature::GREEN_TRC);
        assert_eq!(entry.offset as usize, 132 + 24 + 4);
        assert_eq!(entry.size, 6);

        let profile = IccProfile::parse(&data).unwrap();
        assert_eq!(profile.tag_data(TagSignature::RED_TRC).unwrap(), b"aaaa");
        assert_eq!(profile.tag_data(TagSignature::GREEN_TRC).unwrap(), b"bbbbbb");
        assert!(matches!(
            profile.tag_data(TagSignature::BLUE_TRC),
            Err(IccError::TagNotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_signature_first_wins() {
        let data = create_profile(&[(b"bTRC", b"first"), (b"bTRC", b"second")]);
        let profile = IccProfile::parse(&data).unwrap();
        assert_eq!(profile.tag_data(TagSignature::BLUE_TRC).unwrap(), b"first");
    }

    #[test]
    fn test_tag_out_of_bounds() {
        let mut data = create_profile(&[(b"rTRC", b"abcd")]);
        // Push the size past the end of the profile
        data[132 + 8..132 + 12].copy_from_slice(&1000u32.to_be_bytes());

        let err = locate_tag(&data, TagSignature::RED_TRC).unwrap_err();
        assert!(matches!(err, IccError::TagOutOfBounds { size: 1000, .. }));
        assert!(!err.is_invalid_profile());
    }

    #[test]
    fn test_offset_overflow_is_out_of_bounds() {
        let mut data = create_profile(&[(b"rTRC", b"abcd")]);
        data[132 + 4..132 + 8].copy_from_slice(&u32::MAX.to_be_bytes());
        data[132 + 8..132 + 12].copy_from_slice(&u32::MAX.to_be_bytes());

        assert!(matches!(
            locate_tag(&data, TagSignature::RED_TRC),
            Err(IccError::TagOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_declared_count_exceeds_data() {
        let mut data = create_profile(&[(b"rTRC", b"abcd")]);
        data[128..132].copy_from_slice(&u32::MAX.to_be_bytes());

        let profile = IccProfile::parse(&data).unwrap();
        assert_eq!(profile.declared_tag_count(), u32::MAX);
        // Table region holds the one real entry plus 4 payload bytes
        assert_eq!(profile.entries().len(), 1);
        assert_eq!(profile.tag_data(TagSignature::RED_TRC).unwrap(), b"abcd");
        assert!(matches!(
            profile.locate(TagSignature::GRAY_TRC),
            Err(IccError::TagNotFound(_))
        ));
    }

    #[test]
    fn test_entry_cut_off_at_end() {
        let mut data = create_profile(&[]);
        data[128..132].copy_from_slice(&2u32.to_be_bytes());
        data.extend_from_slice(b"rTRC\0\0\0\x90");
        data.extend_from_slice(b"gTR");

        let profile = IccProfile::parse(&data).unwrap();
        assert!(profile.entries().is_empty());

        let err = profile.locate(TagSignature::RED_TRC).unwrap_err();
        assert_eq!(
            err,
            IccError::TruncatedEntry {
                tag: TagSignature::RED_TRC,
                offset: 132,
                profile_size: 143,
            }
        );
        assert!(err.is_invalid_profile());

        // Other signatures, and a signature that is itself cut off, are just missing
        assert_eq!(
            profile.locate(TagSignature::GREEN_TRC),
            Err(IccError::TagNotFound(TagSignature::GREEN_TRC))
        );
    }
}
