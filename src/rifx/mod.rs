//! RIFX container reading.
//!
//! RIFX is the big-endian sibling of RIFF. A project file is one `RIFX`
//! chunk whose form type is `Egg!`, followed by a flat or nested sequence of
//! tagged, length-prefixed chunks:
//!
//! ```text
//! "RIFX" u32 length "Egg!"
//!   tag[4] u32 length payload [pad]
//!   "LIST" u32 length list_type[4] (tag[4] u32 length payload [pad])*
//! ```
//!
//! # Architecture
//!
//! - Zero-copy: chunks borrow their payload from the caller's buffer
//! - Lazy: [`ChunkReader`] parses one header per `next()` call
//! - Bounded: a chunk is only yielded when its whole payload lies inside the
//!   enclosing range, and the buffer end is never crossed
//!
//! # Modules
//!
//! - `tags`: closed enums of known chunk tags and list types
//! - `chunk`: borrowed chunk view and header layout
//! - `reader`: forward-only chunk iterator and its error type
//! - `file`: file header validation

pub mod chunk;
pub mod file;
pub mod reader;
pub mod tags;

pub use chunk::{CHUNK_HEADER_LEN, Chunk, ChunkHeader};
pub use file::{FILE_HEADER_LEN, RifxFile};
pub use reader::{ChunkError, ChunkReader};
pub use tags::{ChunkTag, FourCC, ListKind};
