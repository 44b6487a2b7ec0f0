//! Document builder: turns the chunk stream of a project file into a
//! [`Project`].
//!
//! The builder drives a [`ChunkReader`](crate::rifx::ChunkReader) over the
//! file body and dispatches on [`ChunkTag`] and [`ListKind`]. Anything it
//! does not recognize, or that fails its own layout checks, is kept as an
//! opaque [`Property`](crate::project::Property) where it was found. Only
//! structural damage to the file itself is reported as an error:
//!
//! - [`DecodeError::Corrupt`] for a bad header, a foreign form type or a
//!   malformed chunk directly inside the body
//! - [`DecodeError::Truncated`] for any chunk, at any depth, whose declared
//!   length runs past the end of the buffer
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("project.aep")?;
//! let project = aepkit::decode(&data)?;
//! for (comp, layer) in project.text_layers() {
//!     println!("{} / {}", comp.name, layer.name);
//! }
//! # Ok(())
//! # }
//! ```

mod context;
mod item;
mod layer;
mod property;

use crate::common::{DecodeError, Result};
use crate::project::model::{Project, ProjectBuilder};
use crate::project::types::ColorDepth;
use crate::rifx::{ChunkTag, ListKind, RifxFile};
use context::Context;

/// Default limit on list nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Offset of the color depth code inside `nhed`.
const NHED_COLOR_DEPTH: usize = 15;

/// Options controlling how a project is decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest list nesting that is interpreted; deeper lists are kept opaque
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Decode a complete project file held in memory.
///
/// # Errors
///
/// See the [module documentation](self). No partial project is returned.
pub fn decode(data: &[u8]) -> Result<Project> {
    decode_with(data, &DecodeOptions::default())
}

/// Decode with explicit options.
pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<Project> {
    let file = RifxFile::parse(data)?;
    if file.kind() != ListKind::Project {
        return Err(DecodeError::corrupt(format!(
            "expected form type 'Egg!', found '{}'",
            file.form_type
        )));
    }
    if file.trailing_len() > 0 {
        log::debug!("ignoring {} bytes after the declared body", file.trailing_len());
    }

    let ctx = Context::root(options);
    let mut project = ProjectBuilder::default();

    for next in file.chunks() {
        let chunk = next?;
        log::trace!("body: {}", chunk.describe());

        match (chunk.tag, chunk.list_kind()) {
            (ChunkTag::Head, _) => {},
            (ChunkTag::Nhed, _) => match chunk.payload().get(NHED_COLOR_DEPTH) {
                Some(&code) => project.set_color_depth(ColorDepth::from(code)),
                None => {
                    log::warn!("{} is too short to hold the color depth", chunk.describe());
                    project.push_unparsed(context::opaque(&chunk));
                },
            },
            (_, Some(ListKind::ExpressionEngine)) => {
                let children = context::read_children(chunk.children())?;
                match children.chunks.iter().find(|c| c.tag == ChunkTag::Utf8) {
                    Some(engine) => project.set_expression_engine(engine.to_string_lossy()),
                    None => project.push_unparsed(context::opaque(&chunk)),
                }
            },
            (_, Some(ListKind::Fold)) => {
                let Some(inner) = ctx.descend() else {
                    project.push_unparsed(context::opaque(&chunk));
                    continue;
                };
                let contents = item::read_folder_contents(&chunk, inner, &mut project)?;
                for id in contents.ids {
                    project.push_root(id);
                }
                for prop in contents.unparsed {
                    project.push_unparsed(prop);
                }
            },
            _ => project.push_unparsed(context::opaque(&chunk)),
        }
    }

    Ok(project.finish())
}

/// Decode several independent buffers in parallel.
///
/// Results are returned in input order.
#[cfg(feature = "parallel")]
pub fn decode_many<B>(buffers: &[B], options: &DecodeOptions) -> Vec<Result<Project>>
where
    B: AsRef<[u8]> + Sync,
{
    use rayon::prelude::*;

    buffers
        .par_iter()
        .map(|buffer| decode_with(buffer.as_ref(), options))
        .collect()
}
