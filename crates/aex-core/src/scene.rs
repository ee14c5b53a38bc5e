//! # Scene Module
//!
//! In-memory host scene graph that the codec reads from and writes into.
//!
//! ## Responsibilities
//! - **Item Storage**: ordered `Vec<Item>` with session-scoped `ItemId`s.
//! - **Hierarchy**: folders, comps owning layers, layers owning property trees.
//! - **Transactions**: `Project::undo_group` brackets a batch of mutations.
//!
//! ## Key Types
//! - `Project`: the root container and id allocator.
//! - `Item` / `ItemKind`: folders, footage and comps.
//! - `Layer` / `LayerKind`: the layers of a comp.
//! - `PropertyGroup` / `Property`: the host property tree under each layer.

pub mod item;
pub mod layer;
pub mod match_names;
pub mod property;
pub mod templates;
pub mod text;

pub use item::{AvAttributes, CompItem, FootageItem, FootageSource, Item, ItemId, ItemKind};
pub use layer::{AvLayer, Layer, LayerKind, LightLayer};
pub use property::{
    Grouping, Keyframe, KeyframeEase, MarkerValue, MaskAttributes, Property, PropertyBase,
    PropertyGroup, PropertyValue, PropertyValueType, Shape,
};
pub use templates::TemplateRegistry;
pub use text::TextDocument;

use aex_data::constants::time_display;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use thiserror::Error;

/// Errors raised by the host graph itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// No item with this id
    #[error("Item {0} does not exist")]
    MissingItem(ItemId),

    /// The item exists but is not a composition
    #[error("Item {0} is not a composition")]
    NotAComp(ItemId),

    /// Layer index outside `1..=num_layers`
    #[error("Layer {index} does not exist in comp {comp}")]
    MissingLayer { comp: ItemId, index: usize },

    /// Read or write of an attribute whose governing flag is off
    #[error("Cannot access '{attribute}' while '{flag}' is off")]
    GuardedAccess {
        attribute: &'static str,
        flag: &'static str,
    },

    /// Setter rejected the value
    #[error("Invalid value for '{match_name}': {reason}")]
    InvalidValue { match_name: String, reason: String },

    /// Keyframe index outside the property's key list
    #[error("Keyframe {index} does not exist on '{match_name}'")]
    MissingKey { match_name: String, index: usize },

    /// `add_property` on a group that does not accept new children
    #[error("'{0}' does not accept added properties")]
    NotIndexed(String),

    /// No host template registered for a matchName
    #[error("No template registered for '{0}'")]
    UnknownTemplate(String),
}

/// The root of the host scene graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub bits_per_channel: u32,
    pub expression_engine: String,
    pub linear_blending: bool,
    pub linearize_working_space: bool,
    pub working_gamma: f64,
    pub working_space: String,
    pub display_start_frame: i64,
    pub time_display_type: u32,
    items: Vec<Item>,
    next_id: ItemId,
    undo_history: Vec<String>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            bits_per_channel: 8,
            expression_engine: "javascript-1.0".to_string(),
            linear_blending: false,
            linearize_working_space: false,
            working_gamma: 2.4,
            working_space: "None".to_string(),
            display_start_frame: 0,
            time_display_type: time_display::TIMECODE,
            items: Vec::new(),
            next_id: 1,
            undo_history: Vec::new(),
        }
    }
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// All items in project order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn item(&self, id: ItemId) -> Result<&Item, SceneError> {
        self.items
            .iter()
            .find(|i| i.id == id)
            .ok_or(SceneError::MissingItem(id))
    }

    pub fn item_mut(&mut self, id: ItemId) -> Result<&mut Item, SceneError> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(SceneError::MissingItem(id))
    }

    pub fn comp(&self, id: ItemId) -> Result<&CompItem, SceneError> {
        match &self.item(id)?.kind {
            ItemKind::Comp(comp) => Ok(comp),
            _ => Err(SceneError::NotAComp(id)),
        }
    }

    pub fn comp_mut(&mut self, id: ItemId) -> Result<&mut CompItem, SceneError> {
        match &mut self.item_mut(id)?.kind {
            ItemKind::Comp(comp) => Ok(comp),
            _ => Err(SceneError::NotAComp(id)),
        }
    }

    pub fn layer(&self, comp: ItemId, index: usize) -> Result<&Layer, SceneError> {
        self.comp(comp)?
            .layer(index)
            .ok_or(SceneError::MissingLayer { comp, index })
    }

    pub fn layer_mut(&mut self, comp: ItemId, index: usize) -> Result<&mut Layer, SceneError> {
        self.comp_mut(comp)?
            .layer_mut(index)
            .ok_or(SceneError::MissingLayer { comp, index })
    }

    /// Appends an item and assigns it the next session id.
    pub fn add_item(&mut self, name: &str, kind: ItemKind) -> ItemId {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Item::new(id, name, kind));
        id
    }

    pub fn add_folder(&mut self, name: &str) -> ItemId {
        self.add_item(name, ItemKind::Folder)
    }

    pub fn add_comp(&mut self, name: &str, av: AvAttributes) -> ItemId {
        self.add_item(name, ItemKind::Comp(Box::new(CompItem::new(av))))
    }

    pub fn add_solid(&mut self, name: &str, av: AvAttributes, color: Vec<f64>) -> ItemId {
        self.add_item(
            name,
            ItemKind::Footage(FootageItem::new(av, FootageSource::Solid { color })),
        )
    }

    pub fn add_placeholder(&mut self, name: &str, av: AvAttributes) -> ItemId {
        self.add_item(
            name,
            ItemKind::Footage(FootageItem::new(av, FootageSource::Placeholder)),
        )
    }

    pub fn add_file_footage(&mut self, name: &str, av: AvAttributes, path: &str) -> ItemId {
        self.add_item(
            name,
            ItemKind::Footage(FootageItem::new(
                av,
                FootageSource::File {
                    path: path.to_string(),
                },
            )),
        )
    }

    /// Session-scoped identity string for an item.
    pub fn aexid(&self, id: ItemId) -> Result<String, SceneError> {
        let item = self.item(id)?;
        Ok(format!("{}:{}", item.name.to_lowercase(), item.id))
    }

    /// Folder names from the item's direct parent outwards. Root is not listed.
    pub fn folder_path(&self, id: ItemId) -> Result<Vec<String>, SceneError> {
        let mut path = Vec::new();
        let mut current = self.item(id)?.parent_folder;
        while let Some(folder_id) = current {
            let folder = self.item(folder_id)?;
            path.push(folder.name.clone());
            current = folder.parent_folder;
        }
        Ok(path)
    }

    /// Returns the folder named `name` directly under `parent`, creating it
    /// if there is none.
    pub fn get_or_create_folder(&mut self, name: &str, parent: Option<ItemId>) -> ItemId {
        let existing = self.items.iter().find(|i| {
            matches!(i.kind, ItemKind::Folder) && i.name == name && i.parent_folder == parent
        });
        if let Some(folder) = existing {
            return folder.id;
        }
        let id = self.add_folder(name);
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.parent_folder = parent;
        }
        id
    }

    /// Opens a transaction bracket. The bracket closes when the guard drops,
    /// whether or not the work inside it succeeded; nothing is rolled back.
    pub fn undo_group(&mut self, name: &str) -> UndoGroup<'_> {
        tracing::debug!(undo_group = name, "begin undo group");
        UndoGroup {
            project: self,
            name: name.to_string(),
        }
    }

    /// Names of the closed undo groups, oldest first.
    pub fn undo_history(&self) -> &[String] {
        &self.undo_history
    }
}

/// An open undo group. Derefs to the project being mutated.
pub struct UndoGroup<'a> {
    project: &'a mut Project,
    name: String,
}

impl Deref for UndoGroup<'_> {
    type Target = Project;

    fn deref(&self) -> &Project {
        self.project
    }
}

impl DerefMut for UndoGroup<'_> {
    fn deref_mut(&mut self) -> &mut Project {
        self.project
    }
}

impl Drop for UndoGroup<'_> {
    fn drop(&mut self) {
        tracing::debug!(undo_group = %self.name, "end undo group");
        self.project
            .undo_history
            .push(std::mem::take(&mut self.name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn av() -> AvAttributes {
        AvAttributes {
            width: 100,
            height: 100,
            pixel_aspect: 1.0,
            frame_rate: 24.0,
            duration: 2.0,
        }
    }

    #[test]
    fn ids_are_sequential_and_aexid_lowercases() {
        let mut project = Project::new();
        let a = project.add_folder("Assets");
        let b = project.add_comp("Main Comp", av());
        assert_eq!(b, a + 1);
        assert_eq!(project.aexid(b).unwrap(), format!("main comp:{b}"));
    }

    #[test]
    fn folder_path_is_innermost_first() {
        let mut project = Project::new();
        let outer = project.get_or_create_folder("Outer", None);
        let inner = project.get_or_create_folder("Inner", Some(outer));
        let comp = project.add_comp("Comp", av());
        project.item_mut(comp).unwrap().parent_folder = Some(inner);

        assert_eq!(project.folder_path(comp).unwrap(), vec!["Inner", "Outer"]);
    }

    #[test]
    fn get_or_create_folder_is_idempotent() {
        let mut project = Project::new();
        let a = project.get_or_create_folder("Assets", None);
        let b = project.get_or_create_folder("Assets", None);
        assert_eq!(a, b);
        assert_eq!(project.num_items(), 1);

        // Same name under a different parent is a different folder.
        let nested = project.get_or_create_folder("Assets", Some(a));
        assert_ne!(nested, a);
    }

    #[test]
    fn undo_group_closes_on_drop() {
        let mut project = Project::new();
        {
            let mut tx = project.undo_group("AEX: Add Folder");
            tx.add_folder("Folder");
        }
        assert_eq!(project.undo_history(), ["AEX: Add Folder".to_string()]);
        assert_eq!(project.num_items(), 1);
    }

    #[test]
    fn comp_lookup_rejects_other_items() {
        let mut project = Project::new();
        let folder = project.add_folder("Folder");
        assert_eq!(project.comp(folder).err(), Some(SceneError::NotAComp(folder)));
        assert_eq!(project.comp(99).err(), Some(SceneError::MissingItem(99)));
    }
}
