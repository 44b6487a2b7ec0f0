//! Per-descent state threaded through the builder.
//!
//! The builder keeps no mutable state of its own while walking nested lists:
//! every recursive reader receives a [`Context`] by value, and a child context
//! is derived for each level it descends into.

use super::DecodeOptions;
use crate::common::Result;
use crate::project::property::Property;
use crate::rifx::{Chunk, ChunkError, ChunkReader};
use smallvec::SmallVec;

/// Chunks of one list, read eagerly.
pub(crate) type ChunkRun<'data> = SmallVec<[Chunk<'data>; 8]>;

/// Descent state for one level of nesting.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Context<'opts> {
    options: &'opts DecodeOptions,
    depth: usize,
}

impl<'opts> Context<'opts> {
    /// Context for the body of the file.
    pub(crate) fn root(options: &'opts DecodeOptions) -> Self {
        Self { options, depth: 0 }
    }

    /// Nesting level (0 for direct children of the body).
    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Context for the contents of a list one level down, or `None` once the
    /// nesting limit is reached.
    pub(crate) fn descend(&self) -> Option<Self> {
        let depth = self.depth + 1;
        (depth <= self.options.max_depth).then_some(Self {
            options: self.options,
            depth,
        })
    }
}

/// Result of reading the chunks of one list.
#[derive(Debug, Default)]
pub(crate) struct Children<'data> {
    /// Well-formed chunks, in file order
    pub chunks: ChunkRun<'data>,
    /// Bytes that could not be split into chunks, preserved verbatim
    pub remainder: Option<Property>,
}

/// Read every chunk from `reader`.
///
/// A chunk that runs past the end of the buffer is fatal. A malformed chunk
/// that stays inside the buffer only ends this list: the bytes from that point
/// on are kept as one opaque node and the caller carries on.
pub(crate) fn read_children<'data>(mut reader: ChunkReader<'data>) -> Result<Children<'data>> {
    let mut children = Children::default();
    while let Some(next) = reader.next() {
        match next {
            Ok(chunk) => children.chunks.push(chunk),
            Err(err @ ChunkError::Truncated { .. }) => return Err(err.into()),
            Err(err) => {
                log::warn!("absorbing malformed chunk data: {}", err);
                children.remainder = Some(Property::opaque("????", reader.remaining()));
                break;
            },
        }
    }
    Ok(children)
}

/// Preserve `chunk` verbatim.
///
/// Lists are named by their list type, other chunks by their tag.
pub(crate) fn opaque(chunk: &Chunk<'_>) -> Property {
    log::debug!("preserving {} as opaque", chunk.describe());
    match chunk.list_kind() {
        Some(kind) => Property::opaque(kind, chunk.payload()),
        None => Property::opaque(chunk.tag, chunk.payload()),
    }
}
