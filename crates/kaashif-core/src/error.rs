//! Error types for kaashif

use thiserror::Error;

/// Result type for kaashif operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up a classifier
///
/// Classification itself never fails; these cover configuration only.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Configuration could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A text keyword does not form a valid pattern
    #[error("Invalid keyword pattern: {0}")]
    KeywordPattern(#[from] regex::Error),

    /// Invalid configuration value
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
