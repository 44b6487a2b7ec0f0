/// Generic property tree.
///
/// Properties form a strict tree: every node is owned by exactly one parent
/// and there is no sharing, so a depth-first walk always terminates.
use super::types::PropertyValueType;
use bytes::Bytes;
use phf::phf_map;
use serde::Serialize;
use std::fmt;

/// Label stored by the authoring tool when the user never renamed a group.
pub const EMPTY_LABEL: &str = "-_0_/-";

/// Display names for match names whose stored name is not user-facing.
static DISPLAY_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "ADBE Effect Parade" => "Effects",
    "ADBE Transform Group" => "Transform",
    "ADBE Text Properties" => "Text",
    "ADBE Marker" => "Marker",
};

/// A property node.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Property {
    /// Language-independent identifier of the property's role
    pub match_name: String,
    /// Display name
    pub name: String,
    /// User label, when one was set
    pub label: Option<String>,
    /// 1-based position among its siblings (0 when not indexed)
    pub index: u32,
    /// Value type from the property definition
    pub value_type: PropertyValueType,
    /// Dropdown options for select-style properties
    pub options: Vec<String>,
    /// Static values
    pub values: Vec<f64>,
    /// Raw payload the builder did not interpret
    pub raw: Option<Bytes>,
    /// Sub-properties, in file order
    pub children: Vec<Property>,
    /// Whether this node preserves an unrecognized chunk verbatim
    pub opaque: bool,
}

impl Property {
    /// Create an empty property for `match_name`.
    pub fn new(match_name: impl Into<String>) -> Self {
        let match_name = match_name.into();
        let name = DISPLAY_NAMES
            .get(match_name.as_str())
            .map_or_else(|| match_name.clone(), |name| (*name).to_string());
        Self {
            match_name,
            name,
            ..Self::default()
        }
    }

    /// Preserve an unrecognized chunk as an opaque node.
    ///
    /// `code` is the chunk tag (or list type) and `payload` its raw bytes.
    pub fn opaque(code: impl fmt::Display, payload: &[u8]) -> Self {
        let code = code.to_string();
        Self {
            name: code.clone(),
            match_name: code,
            raw: Some(Bytes::copy_from_slice(payload)),
            opaque: true,
            ..Self::default()
        }
    }

    /// Whether this node preserves an unrecognized chunk.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    /// The user label, ignoring the "never renamed" sentinel.
    pub fn user_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| *label != EMPTY_LABEL)
    }

    /// Raw payload bytes, if any.
    #[inline]
    pub fn raw_bytes(&self) -> Option<&[u8]> {
        self.raw.as_deref()
    }

    /// First direct child with the given match name.
    pub fn child(&self, match_name: &str) -> Option<&Property> {
        self.children.iter().find(|p| p.match_name == match_name)
    }

    /// First node (including `self`) with the given match name, depth-first.
    pub fn find(&self, match_name: &str) -> Option<&Property> {
        self.iter().find(|p| p.match_name == match_name)
    }

    /// Depth-first, pre-order walk starting at `self`.
    pub fn iter(&self) -> PropertyIter<'_> {
        PropertyIter { stack: vec![self] }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false: a subtree contains at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Pre-order iterator over a property subtree.
#[derive(Debug, Clone)]
pub struct PropertyIter<'a> {
    stack: Vec<&'a Property>,
}

impl<'a> Iterator for PropertyIter<'a> {
    type Item = &'a Property;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a Property {
    type Item = &'a Property;
    type IntoIter = PropertyIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Property {
        let mut root = Property::new("ADBE Text Properties");
        let mut doc = Property::new("ADBE Text Document");
        doc.children.push(Property::new("ADBE Text Font"));
        root.children.push(doc);
        root.children.push(Property::new("ADBE Text Animators"));
        root
    }

    #[test]
    fn test_display_name_overrides() {
        assert_eq!(Property::new("ADBE Effect Parade").name, "Effects");
        assert_eq!(Property::new("ADBE Opacity").name, "ADBE Opacity");
    }

    #[test]
    fn test_preorder_walk() {
        let root = tree();
        let names: Vec<_> = root.iter().map(|p| p.match_name.as_str()).collect();
        assert_eq!(
            names,
            [
                "ADBE Text Properties",
                "ADBE Text Document",
                "ADBE Text Font",
                "ADBE Text Animators"
            ]
        );
        assert_eq!(root.len(), 4);
        assert!(root.find("ADBE Text Font").is_some());
        assert!(root.child("ADBE Text Font").is_none());
    }

    #[test]
    fn test_user_label_ignores_sentinel() {
        let mut prop = Property::new("ADBE Effect Parade");
        prop.label = Some(EMPTY_LABEL.to_string());
        assert_eq!(prop.user_label(), None);
        prop.label = Some("Glow".to_string());
        assert_eq!(prop.user_label(), Some("Glow"));
    }

    #[test]
    fn test_opaque_keeps_bytes() {
        let prop = Property::opaque("Zzzz", &[1, 2, 3]);
        assert!(prop.is_opaque());
        assert_eq!(prop.match_name, "Zzzz");
        assert_eq!(prop.raw_bytes(), Some(&[1u8, 2, 3][..]));
    }
}
