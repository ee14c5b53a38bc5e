//! # Reconcile Module
//!
//! Decides whether an incoming node creates, updates or is rejected, then
//! applies it inside one undo group.
//!
//! ## Responsibilities
//! - **Validation**: every kind check runs before the undo group opens, so a
//!   rejected call leaves no trace in the undo history.
//! - **Dispatch**: `(target kind, node kind)` pairs route to the per-kind
//!   writers in `project`, `comp`, `item`, `layer`, `group` and `mask`.
//! - **Transactions**: the undo group closes on success and on error alike.
//!   Nothing already applied is rolled back.

use crate::comp::{apply_comp_layers, create_comp, update_comp};
use crate::dispatch::{classify, SceneKind, SceneRef};
use crate::error::AexError;
use crate::group::{decode_group, decode_layer_styles};
use crate::item::{create_item, update_item};
use crate::layer::{apply_parent, create_layer, update_layer};
use crate::mask::decode_mask;
use crate::options::UpdateOptions;
use crate::project::update_project;
use crate::property::decode_property;
use crate::scene::{match_names as mn, ItemId, ItemKind, Project, PropertyBase, PropertyGroup};
use crate::state::{AexState, LogEntry, Stats};
use aex_data::model::AexNode;
use serde::Serialize;

/// What a write touched, plus the document-level log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WriteResult {
    pub stats: Stats,
    pub log: Vec<LogEntry>,
}

impl From<AexState> for WriteResult {
    fn from(state: AexState) -> Self {
        Self {
            stats: state.stats,
            log: state.log,
        }
    }
}

fn layer_root<'a>(
    project: &'a mut Project,
    comp: ItemId,
    layer: usize,
) -> Result<&'a mut PropertyGroup, AexError> {
    Ok(&mut project.layer_mut(comp, layer)?.root)
}

fn at_path<'a>(
    project: &'a mut Project,
    target: &SceneRef,
) -> Result<&'a mut PropertyBase, AexError> {
    let SceneRef::Property { comp, layer, path } = target else {
        return Err(AexError::UnrecognizedType(target.to_string()));
    };
    layer_root(project, *comp, *layer)?
        .at_path_mut(path)
        .ok_or_else(|| AexError::PropertyNotFound(path.join("/")))
}

/// Rejects a `(parent, node)` pair that has no create path.
fn check_create(parent: SceneKind, node: &AexNode) -> Result<(), AexError> {
    let ok = matches!(
        (parent, node),
        (SceneKind::Project, AexNode::Comp(_))
            | (SceneKind::Project, AexNode::Item(_))
            | (SceneKind::Comp, AexNode::Layer(_))
            | (SceneKind::Layer(_), AexNode::Property(_))
            | (SceneKind::Layer(_), AexNode::Mask(_))
    );
    if ok {
        Ok(())
    } else {
        Err(AexError::cannot_create(parent.tag(), node.type_tag()))
    }
}

/// Rejects a `(target, node)` pair whose kinds do not line up.
fn check_update(target: SceneKind, node: &AexNode) -> Result<(), AexError> {
    let ok = match (target, node) {
        (SceneKind::Project, AexNode::Project(_)) => true,
        (SceneKind::Comp, AexNode::Comp(_)) => true,
        (SceneKind::Item(live), AexNode::Item(doc)) => live == doc.kind,
        (SceneKind::Layer(live), AexNode::Layer(doc)) => live == doc.kind,
        (SceneKind::Property(live), AexNode::Property(doc)) => live == doc.kind,
        (SceneKind::PropertyGroup, AexNode::Group(_)) => true,
        (SceneKind::MaskGroup, AexNode::Mask(_)) => true,
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(AexError::cannot_update(target.tag(), node.type_tag()))
    }
}

/// Creates `node` under `parent`.
///
/// A property "created" under a layer is applied to the layer's existing
/// property of that matchName; a mask is appended to the layer's masks.
pub fn create(
    project: &mut Project,
    parent: &SceneRef,
    node: &AexNode,
    options: UpdateOptions,
) -> Result<WriteResult, AexError> {
    let parent_kind = classify(project, parent)?;
    check_create(parent_kind, node)?;
    tracing::info!(parent = %parent, node = node.type_tag(), "create");

    let mut state = AexState::for_update(options);
    let mut tx = project.undo_group(&format!("AEX: Create {}", node.type_tag()));
    let project: &mut Project = &mut tx;

    match (parent, node) {
        (SceneRef::Project, AexNode::Comp(doc)) => {
            let id = create_comp(project, doc, &mut state)?;
            apply_comp_layers(project, id, doc, &mut state)?;
        }
        (SceneRef::Project, AexNode::Item(doc)) => {
            create_item(project, doc, &mut state)?;
        }
        (SceneRef::Item(comp), AexNode::Layer(doc)) => {
            let index = create_layer(project, *comp, doc, &mut state)?;
            apply_parent(project, *comp, index, doc.parent_layer_index)?;
        }
        (SceneRef::Layer { comp, index }, AexNode::Property(doc)) => {
            let property = layer_root(project, *comp, *index)?
                .find_property_mut(&doc.match_name)
                .ok_or_else(|| AexError::PropertyNotFound(doc.match_name.clone()))?;
            decode_property(doc, property, &mut state)?;
        }
        (SceneRef::Layer { comp, index }, AexNode::Mask(doc)) => {
            let masks = layer_root(project, *comp, *index)?
                .group_mut(mn::MASKS)
                .ok_or_else(|| AexError::PropertyNotFound(mn::MASKS.to_string()))?;
            let atom = masks.add_property(mn::MASK_ATOM)?;
            decode_mask(doc, atom, &mut state)?;
        }
        _ => return Err(AexError::cannot_create(parent_kind.tag(), node.type_tag())),
    }

    Ok(state.into())
}

/// Applies `node` to the existing object at `target`.
pub fn update(
    project: &mut Project,
    target: &SceneRef,
    node: &AexNode,
    options: UpdateOptions,
) -> Result<WriteResult, AexError> {
    let target_kind = classify(project, target)?;
    check_update(target_kind, node)?;
    tracing::info!(target = %target, node = node.type_tag(), "update");

    let mut state = AexState::for_update(options);
    let mut tx = project.undo_group(&format!("AEX: Update {}", node.type_tag()));
    let project: &mut Project = &mut tx;

    match (target, node) {
        (SceneRef::Project, AexNode::Project(doc)) => update_project(project, doc, &mut state)?,
        (SceneRef::Item(id), AexNode::Comp(doc)) => {
            update_comp(project, *id, doc, &mut state)?;
            apply_comp_layers(project, *id, doc, &mut state)?;
        }
        (SceneRef::Item(id), AexNode::Item(doc)) => update_item(project, *id, doc, &mut state)?,
        (SceneRef::Layer { comp, index }, AexNode::Layer(doc)) => {
            update_layer(project, *comp, *index, doc, &mut state)?;
            apply_parent(project, *comp, *index, doc.parent_layer_index)?;
        }
        (SceneRef::Property { .. }, AexNode::Property(doc)) => match at_path(project, target)? {
            PropertyBase::Property(p) => decode_property(doc, p, &mut state)?,
            PropertyBase::Group(g) => {
                return Err(AexError::cannot_update(&g.match_name, doc.kind.tag()))
            }
        },
        (SceneRef::Property { .. }, AexNode::Group(doc)) => match at_path(project, target)? {
            PropertyBase::Group(g) if g.match_name == mn::LAYER_STYLES => {
                decode_layer_styles(doc, g, &mut state)?
            }
            PropertyBase::Group(g) => decode_group(doc, g, &mut state)?,
            PropertyBase::Property(p) => {
                return Err(AexError::cannot_update(&p.match_name, node.type_tag()))
            }
        },
        (SceneRef::Property { .. }, AexNode::Mask(doc)) => match at_path(project, target)? {
            PropertyBase::Group(atom) => decode_mask(doc, atom, &mut state)?,
            PropertyBase::Property(p) => {
                return Err(AexError::cannot_update(&p.match_name, node.type_tag()))
            }
        },
        _ => return Err(AexError::cannot_update(target_kind.tag(), node.type_tag())),
    }

    Ok(state.into())
}

fn count_group(group: &PropertyGroup) -> usize {
    group
        .children
        .iter()
        .map(|c| match c {
            PropertyBase::Property(_) => 1,
            PropertyBase::Group(g) => 1 + count_group(g),
        })
        .sum()
}

fn count_comp(project: &Project, id: ItemId) -> Result<usize, AexError> {
    let comp = project.comp(id)?;
    Ok(1 + comp
        .layers()
        .iter()
        .map(|l| 1 + count_group(&l.root))
        .sum::<usize>())
}

/// Number of nodes a read of `target` would visit. Used for progress
/// reporting; it counts live nodes, not emitted ones.
pub fn prescan(project: &Project, target: &SceneRef) -> Result<usize, AexError> {
    let total = match classify(project, target)? {
        SceneKind::Project => {
            let mut total = 1;
            for item in project.items() {
                total += match item.kind {
                    ItemKind::Comp(_) => count_comp(project, item.id)?,
                    _ => 1,
                };
            }
            total
        }
        SceneKind::Comp => match target {
            SceneRef::Item(id) => count_comp(project, *id)?,
            _ => 1,
        },
        SceneKind::Item(_) => 1,
        SceneKind::Layer(_) => match target {
            SceneRef::Layer { comp, index } => 1 + count_group(&project.layer(*comp, *index)?.root),
            _ => 1,
        },
        SceneKind::Property(_) => 1,
        SceneKind::PropertyGroup | SceneKind::MaskGroup => {
            let SceneRef::Property { comp, layer, path } = target else {
                return Ok(1);
            };
            match project.layer(*comp, *layer)?.root.at_path(path) {
                Some(PropertyBase::Group(g)) => 1 + count_group(g),
                _ => 1,
            }
        }
    };
    tracing::debug!(target = %target, total, "prescan");
    Ok(total)
}
