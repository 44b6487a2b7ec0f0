/// Chunk tags and LIST types understood by the decoder.
///
/// Anything not listed here is carried through as `Unknown` with its original
/// four bytes, so the builder can preserve the chunk verbatim.
use serde::{Serialize, Serializer};
use std::fmt;

/// A four-character code as stored in the file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// Wrap four raw bytes.
    #[inline]
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// The raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for FourCC {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            let ch = if (0x20..=0x7E).contains(&b) { b as char } else { '.' };
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCC({:?})", self.to_string())
    }
}

impl Serialize for FourCC {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Chunk tags.
///
/// Names follow the on-disk codes; see the builder modules for what each
/// payload contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkTag {
    /// File container (`RIFX`)
    Rifx,
    /// Nested chunk list (`LIST`)
    List,
    /// File version header (`head`)
    Head,
    /// Project header (`nhed`)
    Nhed,
    /// UTF-8 string (`Utf8`)
    Utf8,
    /// Item descriptor (`idta`)
    Idta,
    /// Composition descriptor (`cdta`)
    Cdta,
    /// Layer descriptor (`ldta`)
    Ldta,
    /// Folder descriptor (`fdta`)
    Fdta,
    /// Item comment (`cmta`)
    Cmta,
    /// Footage source specification (`sspc` block form)
    Sspc,
    /// Footage options (`opti`)
    Opti,
    /// Property match name (`tdmn`)
    Tdmn,
    /// Property group label (`tdsn`)
    Tdsn,
    /// Effect display name (`fnam`)
    Fnam,
    /// Property display name or select options (`pdnm`)
    Pdnm,
    /// Property definition (`pard`)
    Pard,
    /// Static property values (`cdat`)
    Cdat,
    /// Text document binary stream (`tdbs` block form)
    Tdbs,
    /// Any other tag
    Unknown(FourCC),
}

impl From<[u8; 4]> for ChunkTag {
    fn from(bytes: [u8; 4]) -> Self {
        match &bytes {
            b"RIFX" => ChunkTag::Rifx,
            b"LIST" => ChunkTag::List,
            b"head" => ChunkTag::Head,
            b"nhed" => ChunkTag::Nhed,
            b"Utf8" => ChunkTag::Utf8,
            b"idta" => ChunkTag::Idta,
            b"cdta" => ChunkTag::Cdta,
            b"ldta" => ChunkTag::Ldta,
            b"fdta" => ChunkTag::Fdta,
            b"cmta" => ChunkTag::Cmta,
            b"sspc" => ChunkTag::Sspc,
            b"opti" => ChunkTag::Opti,
            b"tdmn" => ChunkTag::Tdmn,
            b"tdsn" => ChunkTag::Tdsn,
            b"fnam" => ChunkTag::Fnam,
            b"pdnm" => ChunkTag::Pdnm,
            b"pard" => ChunkTag::Pard,
            b"cdat" => ChunkTag::Cdat,
            b"tdbs" => ChunkTag::Tdbs,
            _ => ChunkTag::Unknown(FourCC(bytes)),
        }
    }
}

impl ChunkTag {
    /// The on-disk code for this tag.
    pub const fn fourcc(self) -> FourCC {
        FourCC(match self {
            ChunkTag::Rifx => *b"RIFX",
            ChunkTag::List => *b"LIST",
            ChunkTag::Head => *b"head",
            ChunkTag::Nhed => *b"nhed",
            ChunkTag::Utf8 => *b"Utf8",
            ChunkTag::Idta => *b"idta",
            ChunkTag::Cdta => *b"cdta",
            ChunkTag::Ldta => *b"ldta",
            ChunkTag::Fdta => *b"fdta",
            ChunkTag::Cmta => *b"cmta",
            ChunkTag::Sspc => *b"sspc",
            ChunkTag::Opti => *b"opti",
            ChunkTag::Tdmn => *b"tdmn",
            ChunkTag::Tdsn => *b"tdsn",
            ChunkTag::Fnam => *b"fnam",
            ChunkTag::Pdnm => *b"pdnm",
            ChunkTag::Pard => *b"pard",
            ChunkTag::Cdat => *b"cdat",
            ChunkTag::Tdbs => *b"tdbs",
            ChunkTag::Unknown(code) => code.0,
        })
    }

    /// Whether the tag is not part of the known set.
    #[inline]
    pub const fn is_unknown(self) -> bool {
        matches!(self, ChunkTag::Unknown(_))
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fourcc(), f)
    }
}

/// LIST types (the first four payload bytes of a `LIST` chunk).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Project body (`Egg!`)
    Project,
    /// Root folder (`Fold`)
    Fold,
    /// Project item (`Item`)
    Item,
    /// Folder contents (`Sfdr`)
    FolderContents,
    /// Composition layer (`Layr`)
    Layer,
    /// Footage source (`Pin `)
    Pin,
    /// Expression engine (`ExEn`)
    ExpressionEngine,
    /// Property group (`tdgp`)
    PropertyGroup,
    /// Effect instance (`sspc`)
    Effect,
    /// Effect parameter list (`parT`)
    EffectParams,
    /// Text document stream (`tdbs`)
    TextDocument,
    /// Any other list type
    Unknown(FourCC),
}

impl From<[u8; 4]> for ListKind {
    fn from(bytes: [u8; 4]) -> Self {
        match &bytes {
            b"Egg!" => ListKind::Project,
            b"Fold" => ListKind::Fold,
            b"Item" => ListKind::Item,
            b"Sfdr" => ListKind::FolderContents,
            b"Layr" => ListKind::Layer,
            b"Pin " => ListKind::Pin,
            b"ExEn" => ListKind::ExpressionEngine,
            b"tdgp" => ListKind::PropertyGroup,
            b"sspc" => ListKind::Effect,
            b"parT" => ListKind::EffectParams,
            b"tdbs" => ListKind::TextDocument,
            _ => ListKind::Unknown(FourCC(bytes)),
        }
    }
}

impl ListKind {
    /// The on-disk code for this list type.
    pub const fn fourcc(self) -> FourCC {
        FourCC(match self {
            ListKind::Project => *b"Egg!",
            ListKind::Fold => *b"Fold",
            ListKind::Item => *b"Item",
            ListKind::FolderContents => *b"Sfdr",
            ListKind::Layer => *b"Layr",
            ListKind::Pin => *b"Pin ",
            ListKind::ExpressionEngine => *b"ExEn",
            ListKind::PropertyGroup => *b"tdgp",
            ListKind::Effect => *b"sspc",
            ListKind::EffectParams => *b"parT",
            ListKind::TextDocument => *b"tdbs",
            ListKind::Unknown(code) => code.0,
        })
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fourcc(), f)
    }
}
