//! Layers (`LIST Layr`).

use super::context::{self, Context, read_children};
use super::property::read_group;
use crate::common::Result;
use crate::common::binary::{read_u16_be, read_u24_be, read_u32_be};
use crate::project::layer::{Layer, LayerFlags};
use crate::project::types::LayerQuality;
use crate::rifx::{Chunk, ChunkTag, ListKind};

/// Match name of the text property group.
const TEXT_PROPERTIES: &str = "ADBE Text Properties";

/// Match name given to a layer's root property group.
const ROOT_GROUP: &str = "ADBE Root Vectors Group";

/// Minimum `ldta` length covering the source id.
const LDTA_MIN_LEN: usize = 44;

/// Layer fields read from `ldta`.
///
/// # Format (big-endian)
///
/// - Bytes 4-5: Quality
/// - Bytes 37-39: Attribute switches
/// - Bytes 40-43: Source item id (0 when the layer has no source)
struct LayerData {
    quality: LayerQuality,
    flags: LayerFlags,
    source_id: Option<u32>,
}

impl LayerData {
    fn parse(payload: &[u8]) -> Option<Self> {
        if payload.len() < LDTA_MIN_LEN {
            return None;
        }
        let quality = read_u16_be(payload, 4).ok()?;
        let flags = read_u24_be(payload, 37).ok()?;
        let source = read_u32_be(payload, 40).ok()?;
        Some(Self {
            quality: LayerQuality::from(quality),
            flags: LayerFlags::from_bits_retain(flags),
            source_id: (source != 0).then_some(source),
        })
    }
}

/// Read one layer. `index` is its 1-based position in the composition.
pub(crate) fn read_layer(list: &Chunk<'_>, ctx: Context<'_>, index: u32) -> Result<Layer> {
    let children = read_children(list.children())?;
    let mut layer = Layer {
        index,
        ..Layer::default()
    };
    let mut named = false;

    for chunk in &children.chunks {
        match (chunk.tag, chunk.list_kind()) {
            (ChunkTag::Ldta, _) => match LayerData::parse(chunk.payload()) {
                Some(data) => {
                    layer.quality = data.quality;
                    layer.flags = data.flags;
                    layer.source_id = data.source_id;
                },
                None => {
                    log::warn!(
                        "layer {}: {} is {} bytes, expected at least {}",
                        index,
                        chunk.describe(),
                        chunk.payload().len(),
                        LDTA_MIN_LEN
                    );
                    layer.unparsed.push(context::opaque(chunk));
                },
            },
            (ChunkTag::Utf8, _) if !named => {
                layer.name = chunk.to_string_lossy();
                named = true;
            },
            (_, Some(ListKind::PropertyGroup)) => {
                let Some(inner) = ctx.descend() else {
                    layer.unparsed.push(context::opaque(chunk));
                    continue;
                };
                let root = read_group(chunk, inner, ROOT_GROUP)?;
                for prop in root.children {
                    if prop.is_opaque() {
                        layer.unparsed.push(prop);
                    } else if prop.match_name == TEXT_PROPERTIES && layer.text.is_none() {
                        layer.text = Some(prop);
                    } else {
                        layer.properties.push(prop);
                    }
                }
            },
            _ => layer.unparsed.push(context::opaque(chunk)),
        }
    }

    layer.unparsed.extend(children.remainder);
    Ok(layer)
}
