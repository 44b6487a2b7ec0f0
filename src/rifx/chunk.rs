//! Borrowed chunk view.
//!
//! # Performance
//!
//! - Zero-copy: a chunk is an offset range into the caller's buffer
//! - Nested lists are re-read lazily through [`Chunk::children`]

use super::reader::ChunkReader;
use super::tags::{ChunkTag, ListKind};
use std::ops::Range;
use zerocopy::{BE, U32};
use zerocopy_derive::{FromBytes, Immutable, KnownLayout, Unaligned};

/// Size of a chunk header (tag + length).
pub const CHUNK_HEADER_LEN: usize = 8;

/// On-disk chunk header (8 bytes).
///
/// # Format
///
/// - Bytes 0-3: Tag
/// - Bytes 4-7: Payload length (big-endian, excluding the pad byte)
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct ChunkHeader {
    pub tag: [u8; 4],
    pub length: U32<BE>,
}

/// A single chunk borrowed from the source buffer.
#[derive(Debug, Clone)]
pub struct Chunk<'data> {
    /// Decoded tag
    pub tag: ChunkTag,
    /// Absolute offset of the chunk header
    pub offset: usize,
    /// Payload length as declared in the header
    pub declared_len: u32,
    data: &'data [u8],
    payload: Range<usize>,
}

impl<'data> Chunk<'data> {
    /// Create a chunk over `data[payload]`.
    ///
    /// The reader guarantees `payload` lies inside `data`.
    #[inline]
    pub(crate) fn new(
        tag: ChunkTag,
        offset: usize,
        declared_len: u32,
        data: &'data [u8],
        payload: Range<usize>,
    ) -> Self {
        debug_assert!(payload.end <= data.len(), "payload must lie inside the buffer");
        Self {
            tag,
            offset,
            declared_len,
            data,
            payload,
        }
    }

    /// The payload bytes.
    #[inline]
    pub fn payload(&self) -> &'data [u8] {
        &self.data[self.payload.clone()]
    }

    /// Absolute range of the payload within the source buffer.
    #[inline]
    pub fn payload_range(&self) -> Range<usize> {
        self.payload.clone()
    }

    /// Whether this is a `LIST` chunk.
    #[inline]
    pub fn is_list(&self) -> bool {
        self.tag == ChunkTag::List
    }

    /// The list type, if this is a `LIST` chunk with at least four payload bytes.
    pub fn list_kind(&self) -> Option<ListKind> {
        if !self.is_list() {
            return None;
        }
        self.payload()
            .first_chunk::<4>()
            .map(|code| ListKind::from(*code))
    }

    /// Whether this is a `LIST` of the given type.
    #[inline]
    pub fn is_list_of(&self, kind: ListKind) -> bool {
        self.list_kind() == Some(kind)
    }

    /// Iterate over the chunks nested inside a `LIST`.
    ///
    /// For a non-list chunk (or a list too short to carry its type) the
    /// returned reader is empty.
    pub fn children(&self) -> ChunkReader<'data> {
        if self.list_kind().is_some() {
            ChunkReader::with_range(self.data, self.payload.start + 4, self.payload.end)
        } else {
            ChunkReader::with_range(self.data, self.payload.end, self.payload.end)
        }
    }

    /// Payload decoded as a NUL-trimmed string (used for `Utf8`, `tdmn`, ...).
    pub fn to_string_lossy(&self) -> String {
        crate::common::binary::parse_nul_padded_string(self.payload())
    }

    /// Short description for log lines.
    pub fn describe(&self) -> String {
        match self.list_kind() {
            Some(kind) => format!("LIST '{}' at {}", kind, self.offset),
            None => format!("'{}' at {}", self.tag, self.offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_children() {
        // LIST 'tdgp' { tdmn "ab" }
        let data = [
            b'L', b'I', b'S', b'T', 0, 0, 0, 14, b't', b'd', b'g', b'p', b't', b'd', b'm', b'n',
            0, 0, 0, 2, b'a', b'b',
        ];
        let mut reader = ChunkReader::new(&data);
        let list = reader.next().unwrap().unwrap();
        assert_eq!(list.list_kind(), Some(ListKind::PropertyGroup));

        let children: Vec<_> = list.children().filter_map(|c| c.ok()).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].tag, ChunkTag::Tdmn);
        assert_eq!(children[0].to_string_lossy(), "ab");
        assert_eq!(children[0].offset, 12);
    }

    #[test]
    fn test_plain_chunk_has_no_children() {
        let data = [b'U', b't', b'f', b'8', 0, 0, 0, 2, b'h', b'i'];
        let chunk = ChunkReader::new(&data).next().unwrap().unwrap();
        assert!(chunk.list_kind().is_none());
        assert_eq!(chunk.children().count(), 0);
        assert_eq!(chunk.describe(), "'Utf8' at 0");
    }
}
