//! Text recovery for text layers.
//!
//! Strategies run in a fixed order and the first one that yields acceptable
//! text wins:
//!
//! 1. the property's user label, taken as is
//! 2. known text properties (`ADBE Text Document`, `ADBE Source Text`)
//! 3. byte-level scanners over every raw payload in the subtree
//! 4. the owning layer's name, when it looks like a text placeholder
//!
//! Recovery never fails. When every strategy comes up empty the document
//! carries [`UNEXTRACTED_TEXT`](super::UNEXTRACTED_TEXT).

use super::config::RecoveryConfig;
use super::document::{TextDocument, TextSource};
use super::heuristics::{extract_printable, scan_payload};
use super::style::apply_style;
use super::validate::accept;
use crate::project::{ItemId, Layer, Project, Property};
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Match name of the text document property.
pub const TEXT_DOCUMENT: &str = "ADBE Text Document";
/// Match name of the source text property.
pub const SOURCE_TEXT: &str = "ADBE Source Text";

static DEFAULT_HINTS: Lazy<Option<AhoCorasick>> =
    Lazy::new(|| build_hints(&RecoveryConfig::global().layer_name_hints));

fn build_hints(hints: &[String]) -> Option<AhoCorasick> {
    if hints.is_empty() {
        return None;
    }
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(hints)
        .map_err(|err| log::warn!("unusable layer name hints: {}", err))
        .ok()
}

/// Recovery engine bound to one configuration.
#[derive(Debug, Clone)]
pub struct TextRecovery<'c> {
    config: &'c RecoveryConfig,
    hints: Option<AhoCorasick>,
}

impl Default for TextRecovery<'static> {
    fn default() -> Self {
        Self {
            config: RecoveryConfig::global(),
            hints: DEFAULT_HINTS.clone(),
        }
    }
}

impl<'c> TextRecovery<'c> {
    pub fn new(config: &'c RecoveryConfig) -> Self {
        let hints = if config.layer_name_hints == RecoveryConfig::global().layer_name_hints {
            DEFAULT_HINTS.clone()
        } else {
            build_hints(&config.layer_name_hints)
        };
        Self { config, hints }
    }

    #[inline]
    pub fn config(&self) -> &RecoveryConfig {
        self.config
    }

    /// Recover the document of a text property subtree.
    ///
    /// `layer_name` enables the layer-name fallback.
    pub fn recover(&self, text: &Property, layer_name: Option<&str>) -> TextDocument {
        let found = self
            .find_text(text)
            .or_else(|| layer_name.and_then(|name| self.from_layer_name(name)));

        let mut doc = match found {
            Some((content, source)) => {
                log::debug!("recovered text for '{}' via {:?}", text.match_name, source);
                TextDocument::with_text(content, source)
            },
            None => {
                log::debug!("no text recovered for '{}'", text.match_name);
                TextDocument::default()
            },
        };
        apply_style(&mut doc, text);
        doc
    }

    /// Recover the document of a layer, if it is a text layer.
    pub fn recover_layer(&self, layer: &Layer) -> Option<TextDocument> {
        layer
            .text
            .as_ref()
            .map(|text| self.recover(text, Some(&layer.name)))
    }

    fn find_text(&self, text: &Property) -> Option<(String, TextSource)> {
        if let Some(label) = verbatim_label(text) {
            return Some((label, TextSource::Label));
        }

        let known = text.iter().find_map(|prop| match prop.match_name.as_str() {
            TEXT_DOCUMENT => self.text_document(prop).map(|t| (t, TextSource::TextDocument)),
            SOURCE_TEXT => self.source_text(prop).map(|t| (t, TextSource::SourceText)),
            _ => None,
        });
        if known.is_some() {
            return known;
        }

        text.iter()
            .filter_map(Property::raw_bytes)
            .find_map(|raw| scan_payload(raw, self.config))
    }

    fn text_document(&self, prop: &Property) -> Option<String> {
        if let Some(label) = verbatim_label(prop) {
            return Some(label);
        }
        prop.children
            .iter()
            .filter(|child| child.is_opaque() || child.match_name.contains("Key"))
            .filter_map(Property::raw_bytes)
            .find_map(|raw| self.printable(raw))
    }

    fn source_text(&self, prop: &Property) -> Option<String> {
        if prop.name != prop.match_name {
            if let Some(name) = accept(&prop.name, self.config) {
                return Some(name);
            }
        }
        if !prop.options.is_empty() {
            if let Some(joined) = accept(&prop.options.join(" "), self.config) {
                return Some(joined);
            }
        }
        prop.raw_bytes().and_then(|raw| self.printable(raw))
    }

    fn printable(&self, raw: &[u8]) -> Option<String> {
        extract_printable(&raw[..raw.len().min(self.config.max_scan_len)], self.config)
    }

    fn from_layer_name(&self, name: &str) -> Option<(String, TextSource)> {
        let hints = self.hints.as_ref()?;
        hints
            .is_match(name)
            .then(|| (format!("[{}]", name), TextSource::LayerName))
    }
}

/// A user label is taken as typed; the heuristic filters do not apply to it.
fn verbatim_label(prop: &Property) -> Option<String> {
    prop.user_label()
        .filter(|label| !label.is_empty())
        .map(str::to_string)
}

/// Recover the document of a text property subtree with default settings.
///
/// # Examples
///
/// ```
/// use aepkit::project::Property;
/// use aepkit::text::recover_text;
///
/// let mut text = Property::new("ADBE Text Properties");
/// text.label = Some("Opening Title".to_string());
/// assert_eq!(recover_text(&text).text, "Opening Title");
/// ```
pub fn recover_text(text: &Property) -> TextDocument {
    TextRecovery::default().recover(text, None)
}

/// Recover the document of a layer with default settings.
pub fn recover_layer_text(layer: &Layer) -> Option<TextDocument> {
    TextRecovery::default().recover_layer(layer)
}

/// Recovered text of one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerText {
    /// 1-based layer index
    pub layer: u32,
    pub layer_name: String,
    pub document: TextDocument,
}

/// Recovered text of every text layer in one composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionText {
    pub item_id: ItemId,
    pub name: String,
    pub documents: Vec<LayerText>,
}

/// Recover every text layer in `project`, grouped by composition.
///
/// Compositions without text layers are left out.
pub fn extract_all_text_layers(project: &Project) -> Vec<CompositionText> {
    let recovery = TextRecovery::default();
    project
        .compositions()
        .filter_map(|(item, comp)| {
            let documents: Vec<_> = comp
                .text_layers()
                .filter_map(|layer| {
                    recovery.recover_layer(layer).map(|document| LayerText {
                        layer: layer.index,
                        layer_name: layer.name.clone(),
                        document,
                    })
                })
                .collect();
            (!documents.is_empty()).then(|| CompositionText {
                item_id: item.id,
                name: item.name.clone(),
                documents,
            })
        })
        .collect()
}

/// Text produced by a plain string expression, with surrounding whitespace
/// and quotes removed. Returns `None` when nothing is left.
///
/// # Examples
///
/// ```
/// use aepkit::text::parse_text_expression;
/// assert_eq!(parse_text_expression("  \"Hello\" "), Some("Hello".to_string()));
/// assert_eq!(parse_text_expression("''"), None);
/// ```
pub fn parse_text_expression(expression: &str) -> Option<String> {
    let trimmed = expression.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(trimmed);
    (!unquoted.is_empty()).then(|| unquoted.to_string())
}
