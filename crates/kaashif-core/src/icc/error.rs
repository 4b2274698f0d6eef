//! ICC Profile Error Types

use thiserror::Error;

use super::types::TagSignature;

/// Errors that can occur when locating tags in an ICC profile
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IccError {
    /// Profile data is too small to hold a tag table
    #[error("Profile too small: expected {expected} bytes, got {actual}")]
    TooSmall { expected: usize, actual: usize },

    /// No tag table entry carries the requested signature
    #[error("Tag '{0}' not found")]
    TagNotFound(TagSignature),

    /// Tag data extends past the end of the profile
    #[error("Tag '{tag}' out of bounds: offset {offset} + size {size} > profile size {profile_size}")]
    TagOutOfBounds {
        tag: TagSignature,
        offset: u32,
        size: u32,
        profile_size: usize,
    },

    /// Tag table entry whose signature is present but whose offset or size
    /// runs past the end of the profile
    #[error("Tag table entry for '{tag}' at offset {offset} cut off: profile size {profile_size}")]
    TruncatedEntry {
        tag: TagSignature,
        offset: usize,
        profile_size: usize,
    },
}

impl IccError {
    /// Whether the profile itself is structurally unusable
    ///
    /// Missing and out-of-bounds tags only affect the requested signature.
    pub fn is_invalid_profile(&self) -> bool {
        matches!(self, Self::TooSmall { .. } | Self::TruncatedEntry { .. })
    }
}
