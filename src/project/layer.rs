/// Composition layers.
use super::item::ItemId;
use super::property::Property;
use super::types::LayerQuality;
use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// Layer switches, from the 24-bit attribute field of `ldta`.
    ///
    /// Bit positions count from the least significant bit of the big-endian
    /// three-byte field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct LayerFlags: u32 {
        /// Effects are rendered
        const EFFECTS = 1 << 2;
        /// Adjustment layer
        const ADJUSTMENT = 1 << 9;
        /// 3D layer
        const THREE_D = 1 << 10;
        /// Motion blur enabled
        const MOTION_BLUR = 1 << 11;
        /// Locked against edits
        const LOCKED = 1 << 13;
        /// Hidden when the shy switch is on
        const SHY = 1 << 14;
        /// Collapse transformations / continuously rasterize
        const COLLAPSE_TRANSFORM = 1 << 15;
        /// Guide layer (not rendered)
        const GUIDE = 1 << 17;
        /// Solo
        const SOLO = 1 << 19;
    }
}

/// A layer inside a composition.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Layer {
    /// 1-based position in the composition (z-order)
    pub index: u32,
    /// Layer name
    pub name: String,
    /// Item this layer draws from; never checked against the item table
    pub source_id: Option<ItemId>,
    /// Layer switches
    pub flags: LayerFlags,
    /// Render quality
    pub quality: LayerQuality,
    /// Text property subtree, present only on text layers
    pub text: Option<Property>,
    /// Other top-level property groups (transform, effects, ...)
    pub properties: Vec<Property>,
    /// Chunks preserved verbatim
    pub unparsed: Vec<Property>,
}

impl Layer {
    /// Whether this is a text layer.
    #[inline]
    pub fn is_text_layer(&self) -> bool {
        self.text.is_some()
    }

    #[inline]
    pub fn three_d(&self) -> bool {
        self.flags.contains(LayerFlags::THREE_D)
    }

    #[inline]
    pub fn solo(&self) -> bool {
        self.flags.contains(LayerFlags::SOLO)
    }

    #[inline]
    pub fn shy(&self) -> bool {
        self.flags.contains(LayerFlags::SHY)
    }

    #[inline]
    pub fn locked(&self) -> bool {
        self.flags.contains(LayerFlags::LOCKED)
    }

    #[inline]
    pub fn guide(&self) -> bool {
        self.flags.contains(LayerFlags::GUIDE)
    }

    #[inline]
    pub fn adjustment(&self) -> bool {
        self.flags.contains(LayerFlags::ADJUSTMENT)
    }

    #[inline]
    pub fn motion_blur(&self) -> bool {
        self.flags.contains(LayerFlags::MOTION_BLUR)
    }

    #[inline]
    pub fn effects_enabled(&self) -> bool {
        self.flags.contains(LayerFlags::EFFECTS)
    }

    #[inline]
    pub fn collapse_transform(&self) -> bool {
        self.flags.contains(LayerFlags::COLLAPSE_TRANSFORM)
    }

    /// First top-level property group with the given match name.
    pub fn property(&self, match_name: &str) -> Option<&Property> {
        self.text
            .iter()
            .chain(self.properties.iter())
            .find(|p| p.match_name == match_name)
    }
}
