/// The decoded project.
use super::item::{Composition, Item, ItemId};
use super::layer::Layer;
use super::property::Property;
use super::types::ColorDepth;
use serde::Serialize;
use std::collections::HashMap;

/// A decoded project.
///
/// Built once by [`decode`](crate::decode) and read-only afterwards. Items
/// are kept in declaration order; lookups by id go through a side index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Project {
    color_depth: ColorDepth,
    expression_engine: String,
    items: Vec<Item>,
    #[serde(skip)]
    index: HashMap<ItemId, usize>,
    root_items: Vec<ItemId>,
    unparsed: Vec<Property>,
}

/// A layer whose source id names no item in the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DanglingSource {
    pub composition: ItemId,
    /// 1-based layer index
    pub layer: u32,
    pub source: ItemId,
}

impl Project {
    /// Bits per channel of the project working space.
    #[inline]
    pub fn color_depth(&self) -> ColorDepth {
        self.color_depth
    }

    /// Expression engine identifier (empty when the file does not name one).
    #[inline]
    pub fn expression_engine(&self) -> &str {
        &self.expression_engine
    }

    /// All items, in declaration order.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Item ids directly inside the root folder.
    #[inline]
    pub fn root_items(&self) -> &[ItemId] {
        &self.root_items
    }

    /// Top-level chunks preserved verbatim.
    #[inline]
    pub fn unparsed(&self) -> &[Property] {
        &self.unparsed
    }

    /// Look up an item by id.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.index.get(&id).and_then(|&slot| self.items.get(slot))
    }

    #[inline]
    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Compositions, in declaration order.
    pub fn compositions(&self) -> impl Iterator<Item = (&Item, &Composition)> {
        self.items
            .iter()
            .filter_map(|item| item.as_composition().map(|comp| (item, comp)))
    }

    /// Every text layer with the composition that owns it.
    pub fn text_layers(&self) -> impl Iterator<Item = (&Item, &Layer)> {
        self.compositions()
            .flat_map(|(item, comp)| comp.text_layers().map(move |layer| (item, layer)))
    }

    /// Layers whose `source_id` does not resolve to an item.
    pub fn dangling_sources(&self) -> Vec<DanglingSource> {
        self.compositions()
            .flat_map(|(item, comp)| {
                comp.layers.iter().filter_map(move |layer| {
                    let source = layer.source_id?;
                    (!self.contains(source)).then_some(DanglingSource {
                        composition: item.id,
                        layer: layer.index,
                        source,
                    })
                })
            })
            .collect()
    }
}

/// Mutable project under construction.
#[derive(Debug, Default)]
pub(crate) struct ProjectBuilder {
    project: Project,
}

impl ProjectBuilder {
    pub(crate) fn set_color_depth(&mut self, depth: ColorDepth) {
        self.project.color_depth = depth;
    }

    pub(crate) fn set_expression_engine(&mut self, engine: String) {
        self.project.expression_engine = engine;
    }

    /// Record a root item; repeated ids keep their first position.
    pub(crate) fn push_root(&mut self, id: ItemId) {
        if !self.project.root_items.contains(&id) {
            self.project.root_items.push(id);
        }
    }

    pub(crate) fn push_unparsed(&mut self, prop: Property) {
        self.project.unparsed.push(prop);
    }

    /// Insert an item. A repeated id replaces the earlier entry in place and
    /// returns `true`.
    pub(crate) fn insert(&mut self, item: Item) -> bool {
        match self.project.index.get(&item.id) {
            Some(&slot) => {
                self.project.items[slot] = item;
                true
            },
            None => {
                self.project.index.insert(item.id, self.project.items.len());
                self.project.items.push(item);
                false
            },
        }
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        let slot = *self.project.index.get(&id)?;
        self.project.items.get_mut(slot)
    }

    pub(crate) fn finish(self) -> Project {
        self.project
    }
}
