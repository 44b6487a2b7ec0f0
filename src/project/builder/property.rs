//! Property groups (`LIST tdgp`), effects (`LIST sspc`) and leaf properties.
//!
//! A group is a flat run of chunks in which each `tdmn` names the entry made
//! of the chunks that follow it:
//!
//! ```text
//! LIST tdgp
//!   tdsn "-_0_/-"            <- describes the group itself
//!   tdmn "ADBE Transform Group"
//!   LIST tdgp { ... }        <- structured entry
//!   tdmn "ADBE Opacity"
//!   pard ... cdat ...        <- leaf entry
//!   tdmn "ADBE Group End"    <- closes the run
//! ```

use super::context::{self, ChunkRun, Context, read_children};
use crate::common::Result;
use crate::common::binary::{parse_nul_padded_string, read_f64_seq_be, read_u16_be};
use crate::project::property::{EMPTY_LABEL, Property};
use crate::project::types::PropertyValueType;
use crate::rifx::{Chunk, ChunkTag, ListKind};
use bytes::Bytes;

/// Match names that end an entry without starting a new one.
const CLOSING_MATCH_NAMES: [&str; 2] = ["ADBE Group End", "ADBE Effect Built In Params"];

/// Minimum `pard` length that carries the value type.
const PARD_MIN_LEN: usize = 16;

/// Byte range of the parameter name inside `pard`.
const PARD_NAME: std::ops::Range<usize> = 16..48;

/// One `tdmn` entry collected from a group.
struct Entry<'data> {
    match_name: String,
    chunks: ChunkRun<'data>,
}

/// Chunks of a group, split at its `tdmn` markers.
struct Pairing<'data> {
    /// Chunks before the first `tdmn`
    header: ChunkRun<'data>,
    entries: Vec<Entry<'data>>,
}

fn pair_match_names<'data>(chunks: ChunkRun<'data>) -> Pairing<'data> {
    let mut pairing = Pairing {
        header: ChunkRun::new(),
        entries: Vec::new(),
    };
    let mut open = false;
    let mut skipping = false;

    for chunk in chunks {
        if chunk.tag == ChunkTag::Tdmn {
            let match_name = chunk.to_string_lossy();
            if CLOSING_MATCH_NAMES.contains(&match_name.as_str()) {
                open = false;
                skipping = true;
                continue;
            }
            pairing.entries.push(Entry {
                match_name,
                chunks: ChunkRun::new(),
            });
            open = true;
            skipping = false;
        } else if open {
            if let Some(entry) = pairing.entries.last_mut() {
                entry.chunks.push(chunk);
            }
        } else if skipping {
            log::trace!("skipping {} after a closing match name", chunk.describe());
        } else {
            pairing.header.push(chunk);
        }
    }
    pairing
}

fn set_label(prop: &mut Property, chunk: &Chunk<'_>) {
    let label = chunk.to_string_lossy();
    if label != EMPTY_LABEL {
        prop.label = Some(label);
    }
}

#[inline]
fn is_text_like(match_name: &str) -> bool {
    match_name.contains("Text") || match_name.contains("Source")
}

/// Read a `LIST tdgp` (or any list laid out like one) as a group named
/// `match_name`.
pub(crate) fn read_group(list: &Chunk<'_>, ctx: Context<'_>, match_name: &str) -> Result<Property> {
    let children = read_children(list.children())?;
    let pairing = pair_match_names(children.chunks);

    let mut group = Property::new(match_name);
    group.value_type = PropertyValueType::Group;
    let mut unclaimed = ChunkRun::new();
    for chunk in pairing.header {
        match chunk.tag {
            ChunkTag::Tdsn => set_label(&mut group, &chunk),
            _ => unclaimed.push(chunk),
        }
    }
    push_opaque_run(&mut group.children, &unclaimed);

    for (position, entry) in pairing.entries.into_iter().enumerate() {
        let mut prop = read_entry(entry, ctx)?;
        prop.index = position as u32 + 1;
        group.children.push(prop);
    }

    group.children.extend(children.remainder);
    Ok(group)
}

/// Build the property described by one `tdmn` entry.
fn read_entry(entry: Entry<'_>, ctx: Context<'_>) -> Result<Property> {
    let Entry { match_name, chunks } = entry;
    let structured = chunks
        .first()
        .and_then(Chunk::list_kind)
        .filter(|kind| *kind != ListKind::TextDocument);

    let Some(kind) = structured else {
        return read_leaf(&match_name, &chunks, ctx);
    };
    let first = &chunks[0];
    let Some(inner) = ctx.descend() else {
        log::warn!(
            "nesting limit reached at depth {}: {}",
            ctx.depth(),
            first.describe()
        );
        let mut prop = Property::new(match_name);
        prop.children.push(context::opaque(first));
        return Ok(prop);
    };

    let mut prop = match kind {
        ListKind::Effect => read_effect(first, inner, &match_name)?,
        _ => read_group(first, inner, &match_name)?,
    };
    push_opaque_run(&mut prop.children, &chunks[1..]);
    Ok(prop)
}

/// Read an effect instance (`LIST sspc`).
///
/// The effect's parameters come from `LIST parT`, whose first entry describes
/// the effect itself and is skipped.
pub(crate) fn read_effect(list: &Chunk<'_>, ctx: Context<'_>, match_name: &str) -> Result<Property> {
    let children = read_children(list.children())?;
    let mut effect = Property::new(match_name);
    effect.value_type = PropertyValueType::Group;

    for chunk in &children.chunks {
        match (chunk.tag, chunk.list_kind()) {
            (ChunkTag::Fnam, _) => {
                let name = chunk.to_string_lossy();
                if !name.is_empty() {
                    effect.name = name;
                }
            },
            (_, Some(ListKind::PropertyGroup)) => {
                let header = read_children(chunk.children())?;
                if let Some(tdsn) = header.chunks.iter().find(|c| c.tag == ChunkTag::Tdsn) {
                    set_label(&mut effect, tdsn);
                }
            },
            (_, Some(ListKind::EffectParams)) => {
                let params = read_children(chunk.children())?;
                let pairing = pair_match_names(params.chunks);
                for (position, entry) in pairing.entries.into_iter().enumerate().skip(1) {
                    let mut param = read_entry(entry, ctx)?;
                    param.index = position as u32;
                    effect.children.push(param);
                }
                effect.children.extend(params.remainder);
            },
            _ => effect.children.push(context::opaque(chunk)),
        }
    }

    effect.children.extend(children.remainder);
    Ok(effect)
}

/// Build a leaf property from the chunks of its entry.
fn read_leaf(match_name: &str, chunks: &[Chunk<'_>], ctx: Context<'_>) -> Result<Property> {
    let mut prop = Property::new(match_name);
    let mut previous = None;
    for chunk in chunks {
        match prop.children.last_mut() {
            Some(owner) if is_orphan(previous, chunk) => owner.children.push(context::opaque(chunk)),
            _ => apply_leaf_chunk(&mut prop, chunk, ctx)?,
        }
        previous = Some(chunk);
    }
    Ok(prop)
}

/// Whether `chunk` is a group or effect list whose `tdmn` was replaced by
/// the unknown chunk right before it.
fn is_orphan(previous: Option<&Chunk<'_>>, chunk: &Chunk<'_>) -> bool {
    previous.is_some_and(|p| p.tag.is_unknown())
        && matches!(chunk.list_kind(), Some(ListKind::PropertyGroup | ListKind::Effect))
}

/// Keep `chunks` as opaque nodes. An orphaned list stays under the unknown
/// chunk that took its `tdmn`'s place.
fn push_opaque_run(children: &mut Vec<Property>, chunks: &[Chunk<'_>]) {
    let mut previous = None;
    for chunk in chunks {
        let node = context::opaque(chunk);
        match children.last_mut() {
            Some(owner) if is_orphan(previous, chunk) => owner.children.push(node),
            _ => children.push(node),
        }
        previous = Some(chunk);
    }
}

fn apply_leaf_chunk(prop: &mut Property, chunk: &Chunk<'_>, ctx: Context<'_>) -> Result<()> {
    log::trace!("leaf '{}': {}", prop.match_name, chunk.describe());
    let payload = chunk.payload();

    match chunk.tag {
        ChunkTag::Pard => {
            let Ok(code) = read_u16_be(payload, 14) else {
                log::warn!(
                    "{} is {} bytes, expected at least {}",
                    chunk.describe(),
                    payload.len(),
                    PARD_MIN_LEN
                );
                prop.children.push(context::opaque(chunk));
                return Ok(());
            };
            prop.value_type = PropertyValueType::from(code);
            let name_end = PARD_NAME.end.min(payload.len());
            let name = parse_nul_padded_string(&payload[PARD_NAME.start..name_end]);
            if !name.is_empty() {
                prop.name = name;
            }
        },
        ChunkTag::Pdnm => {
            let text = chunk.to_string_lossy();
            if prop.value_type == PropertyValueType::Select {
                prop.options = text.split('|').map(str::to_string).collect();
            } else if !text.is_empty() {
                prop.name = text.clone();
            }
            if is_text_like(&prop.match_name) {
                prop.raw = Some(Bytes::from(text));
            }
        },
        ChunkTag::Utf8 => {
            let text = chunk.to_string_lossy();
            if !text.is_empty() && is_text_like(&prop.match_name) && prop.raw.is_none() {
                prop.raw = Some(Bytes::from(text));
            }
        },
        ChunkTag::Tdbs => prop.raw = Some(Bytes::copy_from_slice(payload)),
        ChunkTag::Cdat => prop.values = read_f64_seq_be(payload),
        ChunkTag::Tdsn => set_label(prop, chunk),
        ChunkTag::List if chunk.is_list_of(ListKind::TextDocument) => {
            // Keep the whole document block for text recovery, and pick up
            // the label and keyframe blocks stored inside it
            prop.raw = Some(Bytes::copy_from_slice(&payload[4..]));
            let Some(inner) = ctx.descend() else {
                return Ok(());
            };
            let children = read_children(chunk.children())?;
            for nested in &children.chunks {
                match nested.tag {
                    ChunkTag::Tdsn => set_label(prop, nested),
                    ChunkTag::Cdat => prop.values = read_f64_seq_be(nested.payload()),
                    ChunkTag::List => prop.children.push(read_keyframes(nested, inner)?),
                    _ => {},
                }
            }
            prop.children.extend(children.remainder);
        },
        _ => prop.children.push(context::opaque(chunk)),
    }
    Ok(())
}

/// Keep a list found inside a text document block as an opaque node whose
/// children are its own nested lists, so recovery can visit each one.
fn read_keyframes(list: &Chunk<'_>, ctx: Context<'_>) -> Result<Property> {
    let mut prop = context::opaque(list);
    let Some(inner) = ctx.descend() else {
        return Ok(prop);
    };
    let children = read_children(list.children())?;
    for nested in children.chunks.iter().filter(|c| c.is_list()) {
        prop.children.push(read_keyframes(nested, inner)?);
    }
    prop.children.extend(children.remainder);
    Ok(prop)
}
