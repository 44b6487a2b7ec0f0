/// Metadata decoders.
///
/// Each decoder is a total mapping from the raw number stored in the file to
/// a semantic enum. Values outside the known table map to an `Unknown`
/// variant that keeps the raw code, so decoding never fails here.
use serde::Serialize;
use std::fmt;

/// Project color depth (bits per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ColorDepth {
    /// 8 bits per channel
    #[default]
    Bpc8,
    /// 16 bits per channel
    Bpc16,
    /// 32-bit floating point per channel
    Bpc32,
    /// Unrecognized code
    Unknown(u8),
}

impl From<u8> for ColorDepth {
    fn from(value: u8) -> Self {
        match value {
            0x00 => ColorDepth::Bpc8,
            0x01 => ColorDepth::Bpc16,
            0x02 => ColorDepth::Bpc32,
            other => ColorDepth::Unknown(other),
        }
    }
}

impl ColorDepth {
    /// Bits per channel, if known.
    pub const fn bits(self) -> Option<u8> {
        match self {
            ColorDepth::Bpc8 => Some(8),
            ColorDepth::Bpc16 => Some(16),
            ColorDepth::Bpc32 => Some(32),
            ColorDepth::Unknown(_) => None,
        }
    }
}

impl fmt::Display for ColorDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorDepth::Bpc8 => write!(f, "8-bit"),
            ColorDepth::Bpc16 => write!(f, "16-bit"),
            ColorDepth::Bpc32 => write!(f, "32-bit (float)"),
            ColorDepth::Unknown(code) => write!(f, "Unknown ({})", code),
        }
    }
}

/// Kind of source behind a footage item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FootageKind {
    /// Missing-source placeholder
    Placeholder,
    /// Generated solid color
    Solid,
    /// Still image
    Image,
    /// Video file
    Video,
    /// Audio-only file
    Audio,
    /// Any other file-backed source
    Other,
    /// Unrecognized code
    Unknown(u16),
}

impl From<u16> for FootageKind {
    fn from(value: u16) -> Self {
        match value {
            0x02 => FootageKind::Placeholder,
            0x09 => FootageKind::Solid,
            0x0A => FootageKind::Image,
            0x0B => FootageKind::Video,
            0x0C => FootageKind::Audio,
            0x0D => FootageKind::Other,
            other => FootageKind::Unknown(other),
        }
    }
}

impl fmt::Display for FootageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FootageKind::Placeholder => write!(f, "Placeholder"),
            FootageKind::Solid => write!(f, "Solid"),
            FootageKind::Image => write!(f, "Image"),
            FootageKind::Video => write!(f, "Video"),
            FootageKind::Audio => write!(f, "Audio"),
            FootageKind::Other => write!(f, "Other"),
            FootageKind::Unknown(code) => write!(f, "Unknown ({})", code),
        }
    }
}

/// Layer render quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LayerQuality {
    /// Wireframe preview
    Wireframe,
    /// Draft quality
    Draft,
    /// Best quality
    #[default]
    Best,
    /// Unrecognized code
    Unknown(u16),
}

impl From<u16> for LayerQuality {
    fn from(value: u16) -> Self {
        match value {
            0x0000 => LayerQuality::Wireframe,
            0x0001 => LayerQuality::Draft,
            0x0002 => LayerQuality::Best,
            other => LayerQuality::Unknown(other),
        }
    }
}

impl fmt::Display for LayerQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerQuality::Wireframe => write!(f, "Wireframe"),
            LayerQuality::Draft => write!(f, "Draft"),
            LayerQuality::Best => write!(f, "Best"),
            LayerQuality::Unknown(code) => write!(f, "Unknown ({})", code),
        }
    }
}

/// Item type code stored in `idta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Folder,
    Composition,
    Footage,
    Unknown(u16),
}

impl From<u16> for ItemType {
    fn from(value: u16) -> Self {
        match value {
            0x01 => ItemType::Folder,
            0x04 => ItemType::Composition,
            0x07 => ItemType::Footage,
            other => ItemType::Unknown(other),
        }
    }
}

/// Value type of a property, from its `pard` definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PropertyValueType {
    /// Single-valued layer selection
    LayerSelect,
    /// One-dimensional slider
    OneD,
    /// One-dimensional angle
    Angle,
    /// Checkbox
    Boolean,
    /// Four-component color
    Color,
    /// Two-dimensional point
    TwoD,
    /// Single-valued dropdown
    Select,
    /// Collection of sub-properties
    Group,
    /// Three-dimensional point
    ThreeD,
    /// Anything else, with its raw code
    Custom(u16),
}

impl Default for PropertyValueType {
    fn default() -> Self {
        PropertyValueType::Custom(0x0F)
    }
}

impl From<u16> for PropertyValueType {
    fn from(value: u16) -> Self {
        match value {
            0x00 => PropertyValueType::LayerSelect,
            // 0x0a is a second encoding of a one-dimensional slider
            0x02 | 0x0A => PropertyValueType::OneD,
            0x03 => PropertyValueType::Angle,
            0x04 => PropertyValueType::Boolean,
            0x05 => PropertyValueType::Color,
            0x06 => PropertyValueType::TwoD,
            0x07 => PropertyValueType::Select,
            0x0D => PropertyValueType::Group,
            0x12 => PropertyValueType::ThreeD,
            other => PropertyValueType::Custom(other),
        }
    }
}

impl fmt::Display for PropertyValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyValueType::LayerSelect => "LayerSelect",
            PropertyValueType::OneD => "OneD",
            PropertyValueType::Angle => "Angle",
            PropertyValueType::Boolean => "Boolean",
            PropertyValueType::Color => "Color",
            PropertyValueType::TwoD => "TwoD",
            PropertyValueType::Select => "Select",
            PropertyValueType::Group => "Group",
            PropertyValueType::ThreeD => "ThreeD",
            PropertyValueType::Custom(_) => "Custom",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_depth_is_total() {
        assert_eq!(ColorDepth::from(0), ColorDepth::Bpc8);
        assert_eq!(ColorDepth::from(1), ColorDepth::Bpc16);
        assert_eq!(ColorDepth::from(2), ColorDepth::Bpc32);
        for code in 3..=u8::MAX {
            assert_eq!(ColorDepth::from(code), ColorDepth::Unknown(code));
        }
        assert_eq!(ColorDepth::Bpc32.to_string(), "32-bit (float)");
        assert_eq!(ColorDepth::Bpc16.bits(), Some(16));
        assert_eq!(ColorDepth::Unknown(9).bits(), None);
    }

    #[test]
    fn test_footage_kind() {
        assert_eq!(FootageKind::from(0x09), FootageKind::Solid);
        assert_eq!(FootageKind::from(0x02), FootageKind::Placeholder);
        assert_eq!(FootageKind::from(0x0B), FootageKind::Video);
        assert_eq!(FootageKind::from(0x7777), FootageKind::Unknown(0x7777));
        assert_eq!(FootageKind::Unknown(5).to_string(), "Unknown (5)");
    }

    #[test]
    fn test_layer_quality() {
        assert_eq!(LayerQuality::from(0), LayerQuality::Wireframe);
        assert_eq!(LayerQuality::from(1), LayerQuality::Draft);
        assert_eq!(LayerQuality::from(2), LayerQuality::Best);
        assert_eq!(LayerQuality::from(3), LayerQuality::Unknown(3));
    }

    #[test]
    fn test_property_value_type_aliases() {
        assert_eq!(PropertyValueType::from(0x0A), PropertyValueType::OneD);
        assert_eq!(PropertyValueType::from(0x02), PropertyValueType::OneD);
        assert_eq!(PropertyValueType::from(0x0F), PropertyValueType::default());
        assert_eq!(PropertyValueType::Custom(0x33).to_string(), "Custom");
    }

    #[test]
    fn test_item_type() {
        assert_eq!(ItemType::from(1), ItemType::Folder);
        assert_eq!(ItemType::from(4), ItemType::Composition);
        assert_eq!(ItemType::from(7), ItemType::Footage);
        assert_eq!(ItemType::from(2), ItemType::Unknown(2));
    }
}
