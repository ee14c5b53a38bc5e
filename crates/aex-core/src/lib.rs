//! # aex-core
//!
//! Mirrors a compositing scene graph into canonical, type-tagged, default-
//! elided documents ([`get`]) and reconciles such documents back into the
//! scene ([`create`], [`update`]).
//!
//! ## Module Map
//! - `scene`: the host scene graph the codec reads and mutates.
//! - `normalize`, `policy`, `options`, `state`: shared plumbing for a walk.
//! - `property`, `text`, `group`, `mask`: the property tree codec.
//! - `item`, `comp`, `layer`, `project`: per-kind serializers.
//! - `dispatch`, `matching`, `reconcile`: addressing, pairing and the
//!   create/update engine.

pub mod comp;
pub mod dispatch;
pub mod error;
pub mod group;
pub mod item;
pub mod layer;
pub mod mask;
pub mod matching;
pub mod normalize;
pub mod options;
pub mod policy;
pub mod project;
pub mod property;
pub mod reconcile;
pub mod scene;
pub mod state;
pub mod text;

pub use dispatch::{classify, SceneKind, SceneRef};
pub use error::AexError;
pub use options::{GetOptions, MatchBy, MismatchBehavior, UnsupportedPropertyBehavior, UpdateOptions};
pub use reconcile::{prescan, WriteResult};
pub use scene::{Project, SceneError};
pub use state::{LogEntry, LogLevel, Stats};

use aex_data::model::{AexNode, AexPropertyGroup, GroupType};
use aex_data::tags::NodeCategory;
use scene::match_names as mn;
use scene::PropertyBase;
use serde::Serialize;
use state::AexState;

/// A document and the log of everything the read skipped or warned about.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetResult {
    pub object: AexNode,
    pub log: Vec<LogEntry>,
}

fn encode_target(project: &Project, target: &SceneRef, state: &mut AexState) -> Result<AexNode, AexError> {
    let node = match (classify(project, target)?, target) {
        (SceneKind::Project, _) => AexNode::Project(Box::new(project::encode_project(project, state)?)),
        (SceneKind::Comp, SceneRef::Item(id)) => AexNode::Comp(Box::new(comp::encode_comp(project, *id, state)?)),
        (SceneKind::Item(_), SceneRef::Item(id)) => AexNode::Item(Box::new(item::encode_item(project, *id)?)),
        (SceneKind::Layer(_), SceneRef::Layer { comp, index }) => {
            AexNode::Layer(Box::new(layer::encode_layer(project, *comp, *index, state)?))
        }
        (_, SceneRef::Property { comp, layer, path }) => {
            let root = &project.layer(*comp, *layer)?.root;
            match root.at_path(path) {
                Some(PropertyBase::Property(p)) => {
                    let encoded = property::encode_property(p, state)?;
                    AexNode::Property(Box::new(encoded.unwrap_or_else(|| property::bare_property(p))))
                }
                Some(PropertyBase::Group(g)) if g.mask.is_some() => {
                    AexNode::Mask(Box::new(mask::encode_mask(g, state)?))
                }
                Some(PropertyBase::Group(g)) if g.match_name == mn::LAYER_STYLES => {
                    let styles = group::encode_layer_styles(g, state)?;
                    AexNode::Group(Box::new(styles.unwrap_or_else(|| empty_group(g, GroupType::LayerStyle))))
                }
                Some(PropertyBase::Group(g)) => {
                    let encoded = if g.is_indexed() {
                        Some(group::encode_indexed_entry(g, state)?)
                    } else {
                        group::encode_group(g, state)?
                    };
                    AexNode::Group(Box::new(encoded.unwrap_or_else(|| empty_group(g, GroupType::Group))))
                }
                None => return Err(AexError::UnrecognizedType(target.to_string())),
            }
        }
        (kind, _) => return Err(AexError::UnrecognizedType(kind.tag().to_string())),
    };
    Ok(node)
}

fn empty_group(group: &scene::PropertyGroup, kind: GroupType) -> AexPropertyGroup {
    AexPropertyGroup {
        kind,
        name: None,
        match_name: group.match_name.clone(),
        enabled: None,
        properties: Vec::new(),
        contents: Vec::new(),
    }
}

/// Encodes the object at `target`.
///
/// A property that has nothing to report is returned bare (type, name and
/// matchName) rather than as an error, so a caller asking for one specific
/// property always gets a node back.
pub fn get(project: &Project, target: &SceneRef, options: GetOptions) -> Result<GetResult, AexError> {
    tracing::info!(target = %target, "get");
    let mut state = AexState::for_get(options);
    let object = encode_target(project, target, &mut state)?;
    Ok(GetResult {
        object,
        log: state.log,
    })
}

/// Checks the `type` tag of a raw document and decodes it.
pub fn parse_document(value: serde_json::Value) -> Result<AexNode, AexError> {
    if value.is_null() {
        return Err(AexError::Assertion("document is required".to_string()));
    }
    let tag = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| AexError::Assertion("document has no 'type'".to_string()))?;
    if NodeCategory::of(tag).is_none() {
        return Err(AexError::UnrecognizedType(tag.to_string()));
    }
    Ok(AexNode::from_value(value)?)
}

/// Creates the document under `parent`. See [`reconcile::create`].
pub fn create(
    project: &mut Project,
    parent: &SceneRef,
    document: serde_json::Value,
    options: UpdateOptions,
) -> Result<WriteResult, AexError> {
    let node = parse_document(document)?;
    reconcile::create(project, parent, &node, options)
}

/// Applies the document to the object at `target`. See [`reconcile::update`].
pub fn update(
    project: &mut Project,
    target: &SceneRef,
    document: serde_json::Value,
    options: UpdateOptions,
) -> Result<WriteResult, AexError> {
    let node = parse_document(document)?;
    reconcile::update(project, target, &node, options)
}
