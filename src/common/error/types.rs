//! Unified error type for project decoding.
use thiserror::Error;

/// Main error type for decode operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer is not a usable project: bad magic, wrong form type, or a
    /// malformed top-level chunk sequence.
    #[error("Corrupted project: {0}")]
    Corrupt(String),

    /// A chunk declares a payload that extends past the end of the buffer.
    #[error(
        "Truncated chunk '{tag}' at offset {offset}: declares {declared} bytes, only {available} available"
    )]
    Truncated {
        /// Four-character tag of the offending chunk
        tag: String,
        /// Absolute offset of the chunk header
        offset: usize,
        /// Declared payload length
        declared: u32,
        /// Bytes actually available after the header
        available: usize,
    },
}

impl DecodeError {
    /// Build a [`DecodeError::Corrupt`] from any displayable reason.
    #[inline]
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::Corrupt(reason.into())
    }

    /// Whether this error reports a truncated buffer.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

/// Result type for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
