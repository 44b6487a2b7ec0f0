//! Error types surfaced by the decoder.
//!
//! Only structural failures of the outer container cross the crate boundary.
//! Anything below that is absorbed by the builder and preserved as opaque
//! property nodes, and text recovery never fails.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{DecodeError, Result};
