//! Shared building blocks: big-endian field readers, error types and format
//! sniffing.

// Submodule declarations
pub mod binary;
pub mod detect;
pub mod error;

// Re-exports for convenience
pub use binary::{BinaryError, BinaryResult};
pub use detect::is_project;
pub use error::{DecodeError, Result};
