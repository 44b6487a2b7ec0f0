//! Text recovery.
//!
//! Text layers rarely store their content in a documented place. This module
//! walks a layer's text property subtree and tries a series of strategies,
//! from explicit labels down to byte-level scans of raw payloads, to recover
//! something a person would recognize as the layer's text. See
//! [`recover_text`] for the order.
//!
//! All thresholds live in [`RecoveryConfig`].

pub mod config;
pub mod document;
pub mod heuristics;
pub mod recovery;
mod style;
pub mod validate;

pub use config::{ConfigError, RecoveryConfig};
pub use document::{Justification, TextDocument, TextSource, UNEXTRACTED_TEXT};
pub use recovery::{
    CompositionText, LayerText, SOURCE_TEXT, TEXT_DOCUMENT, TextRecovery, extract_all_text_layers,
    parse_text_expression, recover_layer_text, recover_text,
};
pub use validate::{clean_text, is_valid_text};
