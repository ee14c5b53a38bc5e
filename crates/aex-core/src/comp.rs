//! Composition encode/decode.
//!
//! Writes are split in two so a project can create every comp before any
//! layer needs one as its source: [`create_comp`] / [`update_comp`] handle
//! the comp itself, [`apply_comp_layers`] fills in its layers.

use crate::error::AexError;
use crate::item::{av_from_doc, ensure_folder_path};
use crate::layer::{apply_parent, create_layer, encode_layer, update_layer};
use crate::matching::pair;
use crate::normalize::{modified, modified_num, Rounded};
use crate::property::{decode_markers, encode_markers};
use crate::scene::{AvAttributes, CompItem, ItemId, Project};
use crate::state::AexState;
use aex_data::model::{AexComp, CompType};

const DEFAULT_LABEL: u32 = 15;

pub fn encode_comp(project: &Project, id: ItemId, state: &mut AexState) -> Result<AexComp, AexError> {
    let item = project.item(id)?;
    let comp = project.comp(id)?;
    let d = CompItem::new(comp.av);
    tracing::debug!(comp = %item.name, layers = comp.num_layers(), "encode comp");

    let layers = (1..=comp.num_layers())
        .map(|index| encode_layer(project, id, index, state))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AexComp {
        kind: CompType::Comp,
        item_type: Some("Comp".to_string()),
        aexid: project.aexid(id)?,
        name: item.name.clone(),
        comment: modified(item.comment.clone(), String::new()),
        label: modified(item.label, DEFAULT_LABEL),
        folder: project.folder_path(id)?,

        width: Some(comp.av.width),
        height: Some(comp.av.height),
        pixel_aspect: Some(comp.av.pixel_aspect.rounded()),
        frame_rate: Some(comp.av.frame_rate.rounded()),
        duration: Some(comp.av.duration.rounded()),

        bg_color: modified_num(comp.bg_color.clone(), d.bg_color),
        display_start_time: modified_num(comp.display_start_time, d.display_start_time),
        draft3d: modified(comp.draft3d, d.draft3d),
        drop_frame: modified(comp.drop_frame, d.drop_frame),
        frame_blending: modified(comp.frame_blending, d.frame_blending),
        hide_shy_layers: modified(comp.hide_shy_layers, d.hide_shy_layers),
        motion_blur: modified(comp.motion_blur, d.motion_blur),
        motion_blur_adaptive_sample_limit: modified(
            comp.motion_blur_adaptive_sample_limit,
            d.motion_blur_adaptive_sample_limit,
        ),
        motion_blur_samples_per_frame: modified(
            comp.motion_blur_samples_per_frame,
            d.motion_blur_samples_per_frame,
        ),
        preserve_nested_frame_rate: modified(
            comp.preserve_nested_frame_rate,
            d.preserve_nested_frame_rate,
        ),
        preserve_nested_resolution: modified(
            comp.preserve_nested_resolution,
            d.preserve_nested_resolution,
        ),
        renderer: modified(comp.renderer.clone(), d.renderer),
        resolution_factor: modified(comp.resolution_factor.clone(), d.resolution_factor),
        shutter_angle: modified_num(comp.shutter_angle, d.shutter_angle),
        shutter_phase: modified_num(comp.shutter_phase, d.shutter_phase),
        work_area_start: modified_num(comp.work_area_start, d.work_area_start),
        work_area_duration: modified_num(comp.work_area_duration, d.work_area_duration),

        markers: encode_markers(&comp.markers),
        layers,
    })
}

fn apply_comp(project: &mut Project, id: ItemId, doc: &AexComp, state: &mut AexState) -> Result<(), AexError> {
    let parent = ensure_folder_path(project, &doc.folder);
    let marker_match_by = state.update_options.marker_match_by;

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
    item.parent_folder = parent;

    let comp = project.comp_mut(id)?;
    comp.av = av_from_doc(
        comp.av,
        doc.width,
        doc.height,
        doc.pixel_aspect,
        doc.frame_rate,
        doc.duration,
    );
    macro_rules! assign {
        ($($field:ident),* $(,)?) => {
            $(if let Some(v) = &doc.$field { comp.$field = v.clone(); })*
        };
    }
    assign!(
        bg_color, display_start_time, draft3d, drop_frame, frame_blending, hide_shy_layers,
        motion_blur, motion_blur_adaptive_sample_limit, motion_blur_samples_per_frame,
        preserve_nested_frame_rate, preserve_nested_resolution, renderer, resolution_factor,
        shutter_angle, shutter_phase, work_area_start, work_area_duration,
    );

    if !doc.markers.is_empty() {
        decode_markers(&doc.markers, &mut comp.markers, marker_match_by, state)?;
    }

    if !doc.aexid.is_empty() {
        state.sources.insert(doc.aexid.clone(), id);
    }
    state.stats.comp_count += 1;
    Ok(())
}

/// Creates an empty comp carrying the document's attributes and markers.
pub fn create_comp(project: &mut Project, doc: &AexComp, state: &mut AexState) -> Result<ItemId, AexError> {
    tracing::debug!(comp = %doc.name, "create comp");
    let base = AvAttributes::default();
    let av = av_from_doc(
        base,
        doc.width,
        doc.height,
        doc.pixel_aspect,
        doc.frame_rate,
        doc.duration,
    );
    let id = project.add_comp(&doc.name, av);
    apply_comp(project, id, doc, state)?;
    Ok(id)
}

/// Applies the document's comp attributes and markers to an existing comp.
pub fn update_comp(
    project: &mut Project,
    id: ItemId,
    doc: &AexComp,
    state: &mut AexState,
) -> Result<(), AexError> {
    project.comp(id)?;
    tracing::debug!(comp = %doc.name, "update comp");
    apply_comp(project, id, doc, state)
}

/// Creates or updates the comp's layers, then links parents. Live layers
/// without a document counterpart are left untouched.
pub fn apply_comp_layers(
    project: &mut Project,
    id: ItemId,
    doc: &AexComp,
    state: &mut AexState,
) -> Result<(), AexError> {
    if doc.layers.is_empty() {
        return Ok(());
    }

    let existing: Vec<String> = project
        .comp(id)?
        .layers()
        .iter()
        .map(|l| l.name.clone())
        .collect();
    let incoming: Vec<String> = doc
        .layers
        .iter()
        .map(|l| l.name.clone().unwrap_or_default())
        .collect();
    let pairs = pair(&existing, &incoming, state.update_options.layer_match_by);

    let mut indices = Vec::with_capacity(doc.layers.len());
    for (layer, target) in doc.layers.iter().zip(pairs) {
        let index = match target {
            Some(i) => {
                update_layer(project, id, i + 1, layer, state)?;
                i + 1
            }
            None => create_layer(project, id, layer, state)?,
        };
        indices.push(index);
    }

    // Document parent indices refer to document order.
    for (layer, &index) in doc.layers.iter().zip(&indices) {
        let Some(p) = layer.parent_layer_index else {
            continue;
        };
        match p.checked_sub(1).and_then(|i| indices.get(i)) {
            Some(&parent) => apply_parent(project, id, index, Some(parent))?,
            None => state.warn(
                format!(
                    "Layer {index} names parent {p}, but the document has {} layers; parent left unset",
                    indices.len()
                ),
                None,
            ),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{MatchBy, UpdateOptions};
    use crate::scene::Layer;
    use aex_data::model::{AexLayer, LayerType};
    use serde_json::json;

    fn null(name: &str) -> AexLayer {
        AexLayer {
            kind: LayerType::Null,
            name: Some(name.into()),
            ..AexLayer::default()
        }
    }

    #[test]
    fn fresh_comp_writes_only_identity_and_av() {
        let mut project = Project::new();
        let id = project.add_comp("Main", AvAttributes::default());
        let mut state = AexState::default();
        let out = encode_comp(&project, id, &mut state).unwrap();
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({
                "type": "aex:item:av:comp",
                "itemType": "Comp",
                "aexid": format!("main:{id}"),
                "name": "Main",
                "folder": [],
                "width": 1920,
                "height": 1080,
                "pixelAspect": 1.0,
                "frameRate": 30.0,
                "duration": 10.0
            })
        );
    }

    #[test]
    fn index_update_leaves_trailing_layers_alone() {
        let mut project = Project::new();
        let id = project.add_comp("Main", AvAttributes::default());
        for name in ["A", "B", "C"] {
            project.comp_mut(id).unwrap().add_layer(Layer::null(name, 10.0));
        }
        let doc = AexComp {
            layers: vec![null("A2"), null("B2")],
            ..AexComp::default()
        };
        let mut state = AexState::default();
        apply_comp_layers(&mut project, id, &doc, &mut state).unwrap();

        let names: Vec<&str> = project
            .comp(id)
            .unwrap()
            .layers()
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["A2", "B2", "C"]);
        assert_eq!(state.stats.layer_count, 2);
    }

    #[test]
    fn name_matching_creates_unmatched_layers() {
        let mut project = Project::new();
        let id = project.add_comp("Main", AvAttributes::default());
        project.comp_mut(id).unwrap().add_layer(Layer::null("Keep", 10.0));
        let doc = AexComp {
            layers: vec![null("New"), null("Keep")],
            ..AexComp::default()
        };
        let mut state = AexState::for_update(UpdateOptions {
            layer_match_by: MatchBy::Name,
            ..UpdateOptions::default()
        });
        apply_comp_layers(&mut project, id, &doc, &mut state).unwrap();
        assert_eq!(project.comp(id).unwrap().num_layers(), 2);
        assert_eq!(project.layer(id, 2).unwrap().name, "New");
    }

    #[test]
    fn parents_resolve_in_document_order() {
        let mut project = Project::new();
        let id = project.add_comp("Main", AvAttributes::default());
        let mut child = null("Child");
        child.parent_layer_index = Some(2);
        let doc = AexComp {
            layers: vec![child, null("Parent")],
            ..AexComp::default()
        };
        let mut state = AexState::default();
        apply_comp_layers(&mut project, id, &doc, &mut state).unwrap();
        assert_eq!(project.layer(id, 1).unwrap().parent, Some(2));
    }

    #[test]
    fn out_of_range_parent_is_logged_not_linked() {
        let mut project = Project::new();
        let id = project.add_comp("Main", AvAttributes::default());
        for name in ["A", "B", "Trailing"] {
            project.comp_mut(id).unwrap().add_layer(Layer::null(name, 10.0));
        }
        let mut first = null("A");
        first.parent_layer_index = Some(3);
        let mut second = null("B");
        second.parent_layer_index = Some(0);
        let doc = AexComp {
            layers: vec![first, second],
            ..AexComp::default()
        };
        let mut state = AexState::default();
        apply_comp_layers(&mut project, id, &doc, &mut state).unwrap();

        assert_eq!(project.layer(id, 1).unwrap().parent, None);
        assert_eq!(project.layer(id, 2).unwrap().parent, None);
        assert_eq!(state.log.len(), 2);
    }
}
