//! Items (`LIST Item`) and the folders that hold them.

use super::context::{self, Context, read_children};
use super::layer::read_layer;
use crate::common::Result;
use crate::common::binary::{ratio, read_u16_be, read_u32_be};
use crate::project::item::{Composition, Folder, Footage, Item, ItemId, ItemKind};
use crate::project::model::ProjectBuilder;
use crate::project::property::Property;
use crate::project::types::{FootageKind, ItemType};
use crate::rifx::{Chunk, ChunkTag, ListKind};

/// Minimum `idta` length covering the item id.
const IDTA_MIN_LEN: usize = 20;
/// Minimum `cdta` length covering the frame size.
const CDTA_MIN_LEN: usize = 24;
/// Minimum footage `sspc` length covering the duration.
const SSPC_MIN_LEN: usize = 20;
/// `fdta` flag bits (byte 0).
const FDTA_EXPANDED: u8 = 0x01;
const FDTA_SHY: u8 = 0x02;

/// Items and leftovers read from a folder's contents.
#[derive(Debug, Default)]
pub(crate) struct FolderContents {
    pub ids: Vec<ItemId>,
    pub unparsed: Vec<Property>,
}

/// Read the `LIST Item` entries of a folder (`LIST Fold` or `LIST Sfdr`).
///
/// Items are inserted into `project` in pre-order: a folder comes before its
/// children.
pub(crate) fn read_folder_contents(
    list: &Chunk<'_>,
    ctx: Context<'_>,
    project: &mut ProjectBuilder,
) -> Result<FolderContents> {
    let children = read_children(list.children())?;
    let mut contents = FolderContents::default();

    for chunk in &children.chunks {
        if !chunk.is_list_of(ListKind::Item) {
            contents.unparsed.push(context::opaque(chunk));
            continue;
        }
        let Some(inner) = ctx.descend() else {
            log::warn!("nesting limit reached at {}", chunk.describe());
            contents.unparsed.push(context::opaque(chunk));
            continue;
        };
        match read_item(chunk, inner, project)? {
            Some(id) => contents.ids.push(id),
            None => contents.unparsed.push(context::opaque(chunk)),
        }
    }

    contents.unparsed.extend(children.remainder);
    Ok(contents)
}

/// Item header read from `idta`.
///
/// # Format (big-endian)
///
/// - Bytes 0-1: Item type
/// - Bytes 16-19: Item id
fn parse_idta(payload: &[u8]) -> Option<(ItemType, ItemId)> {
    if payload.len() < IDTA_MIN_LEN {
        return None;
    }
    let item_type = read_u16_be(payload, 0).ok()?;
    let id = read_u32_be(payload, 16).ok()?;
    Some((ItemType::from(item_type), id))
}

/// Read one item and insert it. Returns `None` when the item has no usable
/// header, in which case the caller keeps the list as opaque.
fn read_item(list: &Chunk<'_>, ctx: Context<'_>, project: &mut ProjectBuilder) -> Result<Option<ItemId>> {
    let children = read_children(list.children())?;

    let header = children
        .chunks
        .iter()
        .find(|c| c.tag == ChunkTag::Idta)
        .and_then(|c| parse_idta(c.payload()));
    let (id, kind) = match header {
        Some((ItemType::Folder, id)) => (id, ItemKind::Folder(Folder::default())),
        Some((ItemType::Composition, id)) => (id, ItemKind::Composition(Composition::default())),
        Some((ItemType::Footage, id)) => (id, ItemKind::Footage(Footage::default())),
        Some((ItemType::Unknown(code), id)) => {
            log::debug!("item {} has unknown type {}", id, code);
            return Ok(None);
        },
        None => {
            log::warn!("{} has no usable idta", list.describe());
            return Ok(None);
        },
    };

    let mut item = Item {
        id,
        name: String::new(),
        comment: None,
        kind,
        unparsed: Vec::new(),
    };
    let mut folder_lists = Vec::new();
    let mut named = false;
    let mut layer_index = 0u32;

    for chunk in &children.chunks {
        match (chunk.tag, chunk.list_kind()) {
            (ChunkTag::Idta, _) => {},
            (ChunkTag::Utf8, _) if !named => {
                item.name = chunk.to_string_lossy();
                named = true;
            },
            (ChunkTag::Cmta, _) => {
                let comment = chunk.to_string_lossy();
                item.comment = (!comment.is_empty()).then_some(comment);
            },
            _ => match &mut item.kind {
                ItemKind::Folder(folder) => match (chunk.tag, chunk.list_kind()) {
                    (ChunkTag::Fdta, _) if !chunk.payload().is_empty() => {
                        let payload = chunk.payload();
                        folder.expanded = payload[0] & FDTA_EXPANDED != 0;
                        folder.shy = payload[0] & FDTA_SHY != 0;
                        folder.label_color = payload.get(1).copied().unwrap_or(0);
                    },
                    (_, Some(ListKind::FolderContents)) => folder_lists.push(chunk.clone()),
                    _ => item.unparsed.push(context::opaque(chunk)),
                },
                ItemKind::Composition(comp) => match (chunk.tag, chunk.list_kind()) {
                    (ChunkTag::Cdta, _) if chunk.payload().len() >= CDTA_MIN_LEN => {
                        read_cdta(comp, chunk.payload())
                    },
                    (_, Some(ListKind::Layer)) => match ctx.descend() {
                        Some(inner) => {
                            layer_index += 1;
                            comp.layers.push(read_layer(chunk, inner, layer_index)?);
                        },
                        None => item.unparsed.push(context::opaque(chunk)),
                    },
                    _ => item.unparsed.push(context::opaque(chunk)),
                },
                ItemKind::Footage(footage) => match chunk.list_kind() {
                    Some(ListKind::Pin) => {
                        let leftovers = read_pin(footage, chunk)?;
                        item.unparsed.extend(leftovers);
                    },
                    _ => item.unparsed.push(context::opaque(chunk)),
                },
            },
        }
    }
    item.unparsed.extend(children.remainder);

    if project.insert(item) {
        log::warn!("duplicate item id {}: the later declaration replaces the earlier one", id);
    }

    // Children follow their folder in the item table
    for folder_list in &folder_lists {
        let Some(inner) = ctx.descend() else {
            if let Some(item) = project.item_mut(id) {
                item.unparsed.push(context::opaque(folder_list));
            }
            continue;
        };
        let contents = read_folder_contents(folder_list, inner, project)?;
        match project.item_mut(id) {
            Some(Item {
                kind: ItemKind::Folder(folder),
                unparsed,
                ..
            }) => {
                for child in contents.ids {
                    if !folder.children.contains(&child) {
                        folder.children.push(child);
                    }
                }
                unparsed.extend(contents.unparsed);
            },
            _ => log::warn!("folder {} was replaced by one of its own children", id),
        }
    }

    Ok(Some(id))
}

/// Composition settings from `cdta`.
///
/// # Format (big-endian)
///
/// - Bytes 0-7: Frame rate as dividend / divisor
/// - Bytes 8-15: Duration as dividend / divisor
/// - Bytes 16-18: Background color (RGB)
/// - Bytes 20-21: Width
/// - Bytes 22-23: Height
fn read_cdta(comp: &mut Composition, payload: &[u8]) {
    let u32_at = |offset| read_u32_be(payload, offset).unwrap_or(0);
    let u16_at = |offset| read_u16_be(payload, offset).unwrap_or(0);

    comp.frame_rate = ratio(u32_at(0), u32_at(4));
    comp.duration = ratio(u32_at(8), u32_at(12));
    comp.background_color = [payload[16], payload[17], payload[18]];
    comp.width = u16_at(20);
    comp.height = u16_at(22);
}

/// Footage settings from `LIST Pin`. Returns the chunks it did not use.
///
/// # Format (big-endian)
///
/// - `sspc` bytes 0-3: Width, height
/// - `sspc` bytes 4-11: Frame rate as dividend / divisor
/// - `sspc` bytes 12-19: Duration as dividend / divisor
/// - `opti` bytes 4-5: Footage kind
fn read_pin(footage: &mut Footage, list: &Chunk<'_>) -> Result<Vec<Property>> {
    let children = read_children(list.children())?;
    let mut leftovers = Vec::new();

    for chunk in &children.chunks {
        let payload = chunk.payload();
        match chunk.tag {
            ChunkTag::Sspc if payload.len() >= SSPC_MIN_LEN => {
                let u32_at = |offset| read_u32_be(payload, offset).unwrap_or(0);
                footage.width = read_u16_be(payload, 0).unwrap_or(0);
                footage.height = read_u16_be(payload, 2).unwrap_or(0);
                footage.frame_rate = ratio(u32_at(4), u32_at(8));
                footage.duration = ratio(u32_at(12), u32_at(16));
            },
            ChunkTag::Opti => match read_u16_be(payload, 4) {
                Ok(code) => footage.kind = FootageKind::from(code),
                Err(err) => {
                    log::warn!("{}: {}", chunk.describe(), err);
                    leftovers.push(context::opaque(chunk));
                },
            },
            _ => leftovers.push(context::opaque(chunk)),
        }
    }

    leftovers.extend(children.remainder);
    Ok(leftovers)
}
