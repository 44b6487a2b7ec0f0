/// Recovered text documents.
use serde::Serialize;
use std::fmt;

/// Placeholder returned when no strategy produced usable text.
pub const UNEXTRACTED_TEXT: &str = "[Text content not extracted - check keyframes/expressions]";

/// Paragraph justification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Justification {
    #[default]
    Left,
    Right,
    Center,
    JustifyLastLeft,
    JustifyLastRight,
    JustifyLastCenter,
    JustifyAll,
}

impl Justification {
    /// Map a dropdown index (0-based) to a justification.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Justification::Left),
            1 => Some(Justification::Right),
            2 => Some(Justification::Center),
            3 => Some(Justification::JustifyLastLeft),
            4 => Some(Justification::JustifyLastRight),
            5 => Some(Justification::JustifyLastCenter),
            6 => Some(Justification::JustifyAll),
            _ => None,
        }
    }

    /// Map a dropdown option label to a justification.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_ascii_lowercase();
        match label.as_str() {
            "left" | "left align text" => Some(Justification::Left),
            "right" | "right align text" => Some(Justification::Right),
            "center" | "center text" => Some(Justification::Center),
            "justify last line left" => Some(Justification::JustifyLastLeft),
            "justify last line right" => Some(Justification::JustifyLastRight),
            "justify last line center" => Some(Justification::JustifyLastCenter),
            "justify all lines" | "justify all" => Some(Justification::JustifyAll),
            _ => None,
        }
    }
}

/// Which strategy produced [`TextDocument::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TextSource {
    /// The property's user label
    Label,
    /// A text document property (label or keyframe block)
    TextDocument,
    /// A source text property (display name, options or raw bytes)
    SourceText,
    /// UTF-16LE run found in a raw payload
    Utf16,
    /// UTF-8 run found in a raw payload
    Utf8,
    /// NUL-terminated ASCII run found in a raw payload
    NulTerminated,
    /// Printable run following a known marker
    Marker,
    /// Derived from the owning layer's name
    LayerName,
    /// Nothing usable was found
    #[default]
    Unextracted,
}

impl TextSource {
    /// Whether real text content was recovered.
    #[inline]
    pub fn is_recovered(self) -> bool {
        !matches!(self, TextSource::LayerName | TextSource::Unextracted)
    }
}

/// Text content and character style of a text layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextDocument {
    /// Recovered text; never empty
    pub text: String,
    pub font_name: String,
    pub font_size: f64,
    pub font_style: String,
    /// Fill color (RGBA, 0.0-1.0)
    pub fill_color: [f32; 4],
    /// Stroke color (RGBA, 0.0-1.0)
    pub stroke_color: [f32; 4],
    pub stroke_width: f64,
    pub justification: Justification,
    pub tracking: f64,
    pub line_height: f64,
    pub baseline_shift: f64,
    /// Strategy that produced `text`
    pub source: TextSource,
}

impl Default for TextDocument {
    fn default() -> Self {
        Self {
            text: UNEXTRACTED_TEXT.to_string(),
            font_name: "Arial".to_string(),
            font_size: 12.0,
            font_style: "Regular".to_string(),
            fill_color: [1.0, 1.0, 1.0, 1.0],
            stroke_color: [0.0, 0.0, 0.0, 1.0],
            stroke_width: 0.0,
            justification: Justification::Left,
            tracking: 0.0,
            line_height: 0.0,
            baseline_shift: 0.0,
            source: TextSource::Unextracted,
        }
    }
}

impl TextDocument {
    /// A document with the given text and default style.
    pub fn with_text(text: impl Into<String>, source: TextSource) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            text,
            source,
            ..Self::default()
        }
    }

    /// Whether real text content was recovered.
    #[inline]
    pub fn is_recovered(&self) -> bool {
        self.source.is_recovered()
    }
}

impl fmt::Display for TextDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let doc = TextDocument::default();
        assert_eq!(doc.text, UNEXTRACTED_TEXT);
        assert_eq!(doc.font_name, "Arial");
        assert_eq!(doc.font_size, 12.0);
        assert_eq!(doc.font_style, "Regular");
        assert_eq!(doc.fill_color, [1.0; 4]);
        assert_eq!(doc.stroke_color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(doc.justification, Justification::Left);
        assert!(!doc.is_recovered());
    }

    #[test]
    fn test_with_text_never_empty() {
        assert_eq!(TextDocument::with_text("", TextSource::Utf8).text, UNEXTRACTED_TEXT);
        let doc = TextDocument::with_text("Hi", TextSource::Label);
        assert_eq!(doc.to_string(), "Hi");
        assert!(doc.is_recovered());
    }

    #[test]
    fn test_justification_lookup() {
        assert_eq!(Justification::from_index(2), Some(Justification::Center));
        assert_eq!(Justification::from_index(9), None);
        assert_eq!(Justification::from_label(" Right "), Some(Justification::Right));
    }
}
