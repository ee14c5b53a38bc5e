//! Footage and folder items.

use crate::dispatch::{item_kind, SceneKind};
use crate::error::AexError;
use crate::normalize::{modified, modified_num, read_if, Rounded};
use crate::scene::{AvAttributes, FootageItem, FootageSource, ItemId, ItemKind, Project};
use crate::state::AexState;
use aex_data::constants::{alpha_mode, field_separation, pulldown_phase};
use aex_data::model::{AexItem, ItemType};

const DEFAULT_LABEL: u32 = 15;
const BLACK: [f64; 3] = [0.0, 0.0, 0.0];

pub(crate) fn item_type(project: &Project, id: ItemId) -> Result<ItemType, AexError> {
    match item_kind(project.item(id)?)? {
        SceneKind::Item(kind) => Ok(kind),
        other => Err(AexError::cannot_update(other.tag(), ItemType::Folder.tag())),
    }
}

fn encode_footage(footage: &FootageItem, out: &mut AexItem) -> Result<(), AexError> {
    out.alpha_mode = modified(footage.alpha_mode, alpha_mode::STRAIGHT);
    out.conform_frame_rate = modified_num(footage.conform_frame_rate, 0.0);
    out.field_separation_type = modified(footage.field_separation_type, field_separation::OFF);
    out.high_quality_field_separation = modified(footage.high_quality_field_separation, false);
    out.loop_count = modified(footage.loop_count, 1);
    out.premul_color = modified_num(footage.premul_color.clone(), BLACK.to_vec());
    out.remove_pulldown = modified(footage.remove_pulldown, pulldown_phase::OFF);
    out.invert_alpha = read_if(
        footage.has_alpha && footage.alpha_mode != alpha_mode::IGNORE,
        || footage.invert_alpha(),
        false,
    )?;

    match &footage.source {
        FootageSource::File { path } => out.file = Some(path.clone()),
        FootageSource::Solid { color } => out.color = modified_num(color.clone(), BLACK.to_vec()),
        FootageSource::Placeholder | FootageSource::Unknown { .. } => {}
    }
    Ok(())
}

/// Encodes a non-comp item. The AV attributes of footage are always
/// written; they define the footage rather than decorate it.
pub fn encode_item(project: &Project, id: ItemId) -> Result<AexItem, AexError> {
    let kind = item_type(project, id)?;
    let item = project.item(id)?;
    tracing::debug!(item = %item.name, kind = kind.tag(), "encode item");

    let mut out = AexItem {
        kind,
        item_type: Some(kind.label().to_string()),
        aexid: project.aexid(id)?,
        name: item.name.clone(),
        comment: modified(item.comment.clone(), String::new()),
        label: modified(item.label, DEFAULT_LABEL),
        folder: project.folder_path(id)?,
        ..AexItem::default()
    };

    if let ItemKind::Footage(footage) = &item.kind {
        out.width = Some(footage.av.width);
        out.height = Some(footage.av.height);
        out.pixel_aspect = Some(footage.av.pixel_aspect.rounded());
        out.frame_rate = Some(footage.av.frame_rate.rounded());
        out.duration = Some(footage.av.duration.rounded());
        encode_footage(footage, &mut out)?;
    }
    Ok(out)
}

/// Creates (or reuses) the folder chain for an innermost-first path and
/// returns the innermost folder.
pub fn ensure_folder_path(project: &mut Project, path: &[String]) -> Option<ItemId> {
    let mut parent = None;
    for name in path.iter().rev() {
        parent = Some(project.get_or_create_folder(name, parent));
    }
    parent
}

pub(crate) fn av_from_doc(
    base: AvAttributes,
    width: Option<u32>,
    height: Option<u32>,
    pixel_aspect: Option<f64>,
    frame_rate: Option<f64>,
    duration: Option<f64>,
) -> AvAttributes {
    AvAttributes {
        width: width.unwrap_or(base.width),
        height: height.unwrap_or(base.height),
        pixel_aspect: pixel_aspect.unwrap_or(base.pixel_aspect),
        frame_rate: frame_rate.unwrap_or(base.frame_rate),
        duration: duration.unwrap_or(base.duration),
    }
}

fn apply_item(project: &mut Project, id: ItemId, doc: &AexItem) -> Result<(), AexError> {
    let parent = ensure_folder_path(project, &doc.folder);
    let item = project.item_mut(id)?;
    if !doc.name.is_empty() {
        item.name = doc.name.clone();
    }
    if let Some(comment) = &doc.comment {
        item.comment = comment.clone();
    }
    if let Some(label) = doc.label {
        item.label = label;
    }
    if parent != Some(id) {
        item.parent_folder = parent;
    }

    let ItemKind::Footage(footage) = &mut item.kind else {
        return Ok(());
    };
    footage.av = av_from_doc(
        footage.av,
        doc.width,
        doc.height,
        doc.pixel_aspect,
        doc.frame_rate,
        doc.duration,
    );
    if let Some(v) = doc.alpha_mode {
        footage.alpha_mode = v;
    }
    if let Some(v) = doc.conform_frame_rate {
        footage.conform_frame_rate = v;
    }
    if let Some(v) = doc.field_separation_type {
        footage.field_separation_type = v;
    }
    if let Some(v) = doc.high_quality_field_separation {
        footage.high_quality_field_separation = v;
    }
    if let Some(v) = doc.loop_count {
        footage.loop_count = v;
    }
    if let Some(v) = &doc.premul_color {
        footage.premul_color = v.clone();
    }
    if let Some(v) = doc.remove_pulldown {
        footage.remove_pulldown = v;
    }
    if let Some(v) = doc.invert_alpha {
        footage.set_invert_alpha(v)?;
    }

    match &mut footage.source {
        FootageSource::Solid { color } => {
            if let Some(c) = &doc.color {
                *color = c.clone();
            }
        }
        FootageSource::File { path } => {
            if let Some(file) = &doc.file {
                *path = file.clone();
            }
        }
        FootageSource::Placeholder | FootageSource::Unknown { .. } => {}
    }
    Ok(())
}

fn register_source(doc: &AexItem, id: ItemId, state: &mut AexState) {
    if !doc.aexid.is_empty() {
        state.sources.insert(doc.aexid.clone(), id);
    }
}

/// Creates a project item from a document. Folders are reused when one of
/// the same name already exists at the same place.
pub fn create_item(project: &mut Project, doc: &AexItem, state: &mut AexState) -> Result<ItemId, AexError> {
    tracing::debug!(item = %doc.name, kind = doc.kind.tag(), "create item");
    let av = av_from_doc(
        AvAttributes::default(),
        doc.width,
        doc.height,
        doc.pixel_aspect,
        doc.frame_rate,
        doc.duration,
    );

    let id = match doc.kind {
        ItemType::Folder => {
            let parent = ensure_folder_path(project, &doc.folder);
            project.get_or_create_folder(&doc.name, parent)
        }
        ItemType::Solid => project.add_solid(
            &doc.name,
            av,
            doc.color.clone().unwrap_or_else(|| BLACK.to_vec()),
        ),
        ItemType::Placeholder => project.add_placeholder(&doc.name, av),
        ItemType::FileFootage => {
            project.add_file_footage(&doc.name, av, doc.file.as_deref().unwrap_or_default())
        }
    };

    apply_item(project, id, doc)?;
    register_source(doc, id, state);
    state.stats.non_comp_item_count += 1;
    Ok(id)
}

/// Updates an existing item of the same kind in place.
pub fn update_item(
    project: &mut Project,
    id: ItemId,
    doc: &AexItem,
    state: &mut AexState,
) -> Result<(), AexError> {
    let live = item_type(project, id)?;
    if live != doc.kind {
        return Err(AexError::cannot_update(live.tag(), doc.kind.tag()));
    }
    tracing::debug!(item = %doc.name, kind = doc.kind.tag(), "update item");
    apply_item(project, id, doc)?;
    register_source(doc, id, state);
    state.stats.non_comp_item_count += 1;
    Ok(())
}
