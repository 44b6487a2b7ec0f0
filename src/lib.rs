//! aepkit - A Rust library for reading After Effects project files
//!
//! Project files (`.aep`) are RIFX containers: big-endian RIFF with the form
//! type `Egg!`. This library decodes the container into a typed tree of
//! items, layers and properties, and recovers the text of text layers, which
//! the format does not store in any documented place.
//!
//! # Features
//!
//! - **Chunk reader**: Zero-copy, bounds-checked iteration over RIFX chunks
//! - **Document builder**: Folders, compositions, footage, layers and
//!   property trees, with unknown chunks preserved as opaque nodes
//! - **Text recovery**: Ordered heuristics over labels, known properties and
//!   raw payloads, never failing
//! - **Parallel decoding**: Decode many buffers across a thread pool
//!   (`parallel` feature)
//! - **Configuration**: Tune recovery thresholds from YAML (`config` feature)
//!
//! # Example - Listing text layers
//!
//! ```no_run
//! use aepkit::text::recover_layer_text;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("project.aep")?;
//! let project = aepkit::decode(&data)?;
//!
//! for (comp, layer) in project.text_layers() {
//!     if let Some(doc) = recover_layer_text(layer) {
//!         println!("{} / {}: {}", comp.name, layer.name, doc.text);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Walking chunks
//!
//! ```no_run
//! use aepkit::rifx::RifxFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("project.aep")?;
//! let file = RifxFile::parse(&data)?;
//! for chunk in file.chunks() {
//!     println!("{}", chunk?.describe());
//! }
//! # Ok(())
//! # }
//! ```

/// Shared binary readers, error types and format sniffing
pub mod common;

/// RIFX container reader
///
/// Low-level access to the chunk structure without any knowledge of what
/// the chunks mean.
pub mod rifx;

/// Decoded project model and the builder that produces it
pub mod project;

/// Text layer content recovery
pub mod text;

#[cfg(test)]
mod tests;

pub use common::{DecodeError, Result};
#[cfg(feature = "parallel")]
pub use project::decode_many;
pub use project::{DecodeOptions, Project, decode, decode_with};
pub use text::{RecoveryConfig, TextDocument, extract_all_text_layers, recover_text};
