//! Crate-level tests over assembled project files.

pub(crate) mod fixtures;

mod decode;
mod properties;
