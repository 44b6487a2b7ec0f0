/// Project items: folders, compositions and footage.
use super::layer::Layer;
use super::property::Property;
use super::types::{FootageKind, ItemType};
use serde::Serialize;

/// Item identifier, unique within a project.
pub type ItemId = u32;

/// An entry of the project panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Free-form comment from the project panel
    pub comment: Option<String>,
    pub kind: ItemKind,
    /// Chunks preserved verbatim
    pub unparsed: Vec<Property>,
}

/// Type-specific item payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ItemKind {
    Folder(Folder),
    Composition(Composition),
    Footage(Footage),
}

/// A folder in the project panel.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Folder {
    /// Child item ids, in panel order
    pub children: Vec<ItemId>,
    /// Whether the folder is expanded in the panel
    pub expanded: bool,
    /// Whether the folder is hidden from the timeline (shy)
    pub shy: bool,
    /// Label color index
    pub label_color: u8,
}

/// A composition and its layers.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Composition {
    /// Layers in z-order
    pub layers: Vec<Layer>,
    /// Background color (RGB)
    pub background_color: [u8; 3],
    pub width: u16,
    pub height: u16,
    /// Frames per second
    pub frame_rate: f64,
    /// Duration in seconds
    pub duration: f64,
}

impl Composition {
    /// Layers that carry a text property subtree.
    pub fn text_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|layer| layer.is_text_layer())
    }
}

/// A footage item (file, solid or placeholder).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Footage {
    pub kind: FootageKind,
    pub width: u16,
    pub height: u16,
    pub frame_rate: f64,
    pub duration: f64,
}

impl Default for Footage {
    fn default() -> Self {
        Self {
            kind: FootageKind::Unknown(0),
            width: 0,
            height: 0,
            frame_rate: 0.0,
            duration: 0.0,
        }
    }
}

impl Item {
    /// The item type code this payload corresponds to.
    pub fn item_type(&self) -> ItemType {
        match self.kind {
            ItemKind::Folder(_) => ItemType::Folder,
            ItemKind::Composition(_) => ItemType::Composition,
            ItemKind::Footage(_) => ItemType::Footage,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match &self.kind {
            ItemKind::Folder(folder) => Some(folder),
            _ => None,
        }
    }

    pub fn as_composition(&self) -> Option<&Composition> {
        match &self.kind {
            ItemKind::Composition(comp) => Some(comp),
            _ => None,
        }
    }

    pub fn as_footage(&self) -> Option<&Footage> {
        match &self.kind {
            ItemKind::Footage(footage) => Some(footage),
            _ => None,
        }
    }

    #[inline]
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, ItemKind::Folder(_))
    }

    #[inline]
    pub fn is_composition(&self) -> bool {
        matches!(self.kind, ItemKind::Composition(_))
    }
}
