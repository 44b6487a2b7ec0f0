//! Forward-only chunk iterator.
//!
//! # Performance
//!
//! - Lazy: parses one header per `next()`
//! - Zero-copy: yields borrowed [`Chunk`]s
//! - Fused after the first error, since nothing after a bad length can be
//!   located reliably

use super::chunk::{CHUNK_HEADER_LEN, Chunk, ChunkHeader};
use super::tags::{ChunkTag, FourCC};
use crate::common::DecodeError;
use std::iter::FusedIterator;
use thiserror::Error;
use zerocopy::FromBytes;

/// Errors produced while stepping through a chunk sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// The payload would extend past the end of the buffer.
    #[error("chunk '{tag}' at {offset} declares {declared} bytes but only {available} remain in the buffer")]
    Truncated {
        tag: FourCC,
        offset: usize,
        declared: u32,
        available: usize,
    },
    /// The payload stays inside the buffer but overruns the enclosing chunk.
    #[error("chunk '{tag}' at {offset} declares {declared} bytes but its parent leaves {available}")]
    Overrun {
        tag: FourCC,
        offset: usize,
        declared: u32,
        available: usize,
    },
    /// Fewer than eight bytes remain where a header was expected.
    #[error("incomplete chunk header at {offset}: {available} bytes remain")]
    IncompleteHeader { offset: usize, available: usize },
}

impl ChunkError {
    /// Absolute offset at which the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            ChunkError::Truncated { offset, .. }
            | ChunkError::Overrun { offset, .. }
            | ChunkError::IncompleteHeader { offset, .. } => *offset,
        }
    }
}

impl From<ChunkError> for DecodeError {
    fn from(err: ChunkError) -> Self {
        match err {
            ChunkError::Truncated {
                tag,
                offset,
                declared,
                available,
            } => DecodeError::Truncated {
                tag: tag.to_string(),
                offset,
                declared,
                available,
            },
            other => DecodeError::Corrupt(other.to_string()),
        }
    }
}

/// Iterator over the chunks in `data[start..end]`.
///
/// Offsets reported by yielded chunks are absolute positions in `data`, so a
/// nested reader created from [`Chunk::children`] still knows where the real
/// buffer ends.
#[derive(Debug, Clone)]
pub struct ChunkReader<'data> {
    data: &'data [u8],
    offset: usize,
    end: usize,
    fused: bool,
}

impl<'data> ChunkReader<'data> {
    /// Read chunks across the whole buffer.
    #[inline]
    pub fn new(data: &'data [u8]) -> Self {
        Self::with_range(data, 0, data.len())
    }

    /// Read chunks within `data[start..end]`.
    ///
    /// Out-of-range bounds are clamped to the buffer.
    #[inline]
    pub fn with_range(data: &'data [u8], start: usize, end: usize) -> Self {
        let end = end.min(data.len());
        Self {
            data,
            offset: start.min(end),
            end,
            fused: false,
        }
    }

    /// Current cursor position (absolute).
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// End of the range this reader covers (absolute).
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Bytes between the cursor and the end of the range.
    #[inline]
    pub fn remaining(&self) -> &'data [u8] {
        &self.data[self.offset..self.end]
    }

    fn fail(&mut self, err: ChunkError) -> Option<Result<Chunk<'data>, ChunkError>> {
        self.fused = true;
        Some(Err(err))
    }
}

impl<'data> Iterator for ChunkReader<'data> {
    type Item = Result<Chunk<'data>, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused || self.offset >= self.end {
            return None;
        }

        let header_bytes = &self.data[self.offset..self.end];
        let Ok((header, _)) = ChunkHeader::read_from_prefix(header_bytes) else {
            let err = ChunkError::IncompleteHeader {
                offset: self.offset,
                available: header_bytes.len(),
            };
            return self.fail(err);
        };

        let declared = header.length.get();
        let payload_start = self.offset + CHUNK_HEADER_LEN;
        let payload_end = payload_start.saturating_add(declared as usize);

        if payload_end > self.data.len() {
            let err = ChunkError::Truncated {
                tag: FourCC(header.tag),
                offset: self.offset,
                declared,
                available: self.data.len() - payload_start,
            };
            return self.fail(err);
        }
        if payload_end > self.end {
            let err = ChunkError::Overrun {
                tag: FourCC(header.tag),
                offset: self.offset,
                declared,
                available: self.end - payload_start,
            };
            return self.fail(err);
        }

        let chunk = Chunk::new(
            ChunkTag::from(header.tag),
            self.offset,
            declared,
            self.data,
            payload_start..payload_end,
        );

        // Odd payloads carry one pad byte, which may be missing at the very end
        let padded_end = payload_end + (declared as usize & 1);
        self.offset = padded_end.min(self.end);

        Some(Ok(chunk))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.fused {
            return (0, Some(0));
        }
        let remaining = self.end.saturating_sub(self.offset);
        (0, Some(remaining / CHUNK_HEADER_LEN + 1))
    }
}

impl FusedIterator for ChunkReader<'_> {}
