//! Decoded project model.
//!
//! A [`Project`] owns a flat item table. Folders refer to their children by
//! [`ItemId`], compositions own their [`Layer`]s, and layers own their
//! [`Property`] trees. Nothing in the model is shared, so the whole tree can
//! be cloned, sent across threads or serialized as is.
//!
//! The [`builder`] submodule turns a [`RifxFile`](crate::rifx::RifxFile) into
//! this model.

pub mod builder;
pub mod item;
pub mod layer;
pub mod model;
pub mod property;
pub mod types;

pub use builder::{DecodeOptions, decode, decode_with};
#[cfg(feature = "parallel")]
pub use builder::decode_many;
pub use item::{Composition, Folder, Footage, Item, ItemId, ItemKind};
pub use layer::{Layer, LayerFlags};
pub use model::{DanglingSource, Project};
pub use property::{EMPTY_LABEL, Property, PropertyIter};
pub use types::{ColorDepth, FootageKind, ItemType, LayerQuality, PropertyValueType};
