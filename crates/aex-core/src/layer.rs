//! # Layer Codec
//!
//! Shared layer attributes, transform, markers and the per-kind payloads
//! (AV, text, shape, light, camera).
//!
//! Rotation follows the layer's dimensionality: 3D layers write
//! `xRotation`/`yRotation`/`zRotation` plus orientation, 2D layers write a
//! single `rotation`. On write the choice is made against the layer as it is
//! after the document's `threeDLayer` has been applied.

use crate::dispatch::layer_type;
use crate::error::AexError;
use crate::group::{
    decode_group, decode_indexed, decode_layer_styles, encode_group, encode_indexed,
    encode_layer_styles,
};
use crate::mask::{decode_masks, encode_masks};
use crate::normalize::{modified, modified_num, read_if};
use crate::property::{decode_markers, decode_property, encode_markers, encode_property};
use crate::scene::match_names as mn;
use crate::scene::{
    AvLayer, ItemId, Layer, LayerKind, LightLayer, Project, PropertyGroup, SceneError,
};
use crate::state::AexState;
use aex_data::constants::{
    auto_orient, blending_mode, frame_blending, layer_quality, light_type, sampling_quality,
    track_matte,
};
use aex_data::model::{AexLayer, AexProperty, AexTransform, LayerType};

fn encode_child(
    group: &PropertyGroup,
    match_name: &str,
    state: &mut AexState,
) -> Result<Option<AexProperty>, AexError> {
    match group.property(match_name) {
        Some(p) => encode_property(p, state),
        None => Ok(None),
    }
}

fn encode_named(
    root: &PropertyGroup,
    match_name: &str,
    state: &mut AexState,
) -> Result<Option<aex_data::model::AexPropertyGroup>, AexError> {
    match root.group(match_name) {
        Some(g) => encode_group(g, state),
        None => Ok(None),
    }
}

fn encode_transform(layer: &Layer, state: &mut AexState) -> Result<AexTransform, AexError> {
    let Some(t) = layer.transform() else {
        return Ok(AexTransform::default());
    };

    let mut out = AexTransform {
        anchor_point: encode_child(t, mn::ANCHOR_POINT, state)?,
        point_of_interest: encode_child(t, mn::POINT_OF_INTEREST, state)?,
        position: encode_child(t, mn::POSITION, state)?,
        scale: encode_child(t, mn::SCALE, state)?,
        opacity: encode_child(t, mn::OPACITY, state)?,
        ..AexTransform::default()
    };
    if layer.is_three_d() {
        out.orientation = encode_child(t, mn::ORIENTATION, state)?;
        out.x_rotation = encode_child(t, mn::ROTATE_X, state)?;
        out.y_rotation = encode_child(t, mn::ROTATE_Y, state)?;
        out.z_rotation = encode_child(t, mn::ROTATE_Z, state)?;
    } else {
        out.rotation = encode_child(t, mn::ROTATE_Z, state)?;
    }
    Ok(out)
}

fn source_duration(project: &Project, source: Option<ItemId>) -> Option<f64> {
    source
        .and_then(|id| project.item(id).ok())
        .and_then(|item| item.av())
        .map(|av| av.duration)
}

fn encode_av(
    project: &Project,
    layer: &Layer,
    av: &AvLayer,
    out: &mut AexLayer,
    state: &mut AexState,
) -> Result<(), AexError> {
    out.adjustment_layer = modified(av.adjustment_layer, false);
    out.audio_enabled = modified(av.audio_enabled, true);
    out.auto_orient = modified(av.auto_orient, auto_orient::NO_AUTO_ORIENT);
    out.blending_mode = modified(av.blending_mode, blending_mode::NORMAL);
    out.collapse_transformation = modified(av.collapse_transformation, false);
    out.effects_active = modified(av.effects_active, true);
    out.environment_layer = modified(av.environment_layer, false);
    out.frame_blending = modified(av.frame_blending(), false);
    out.frame_blending_type = read_if(
        av.frame_blending(),
        || Ok::<_, AexError>(av.frame_blending_type),
        frame_blending::NO_FRAME_BLEND,
    )?;
    out.guide_layer = modified(av.guide_layer, false);
    out.motion_blur = modified(av.motion_blur, false);
    out.preserve_transparency = modified(av.preserve_transparency, false);
    out.quality = modified(av.quality, layer_quality::BEST);
    out.sampling_quality = modified(av.sampling_quality, sampling_quality::BILINEAR);
    out.three_d_layer = modified(av.three_d_layer, false);
    out.time_remap_enabled = modified(av.time_remap_enabled, false);
    out.track_matte_type = modified(av.track_matte_type, track_matte::NO_TRACK_MATTE);
    out.source = av.source.map(|id| project.aexid(id)).transpose()?;

    let root = &layer.root;
    if av.time_remap_enabled {
        state.time_remap_duration = source_duration(project, av.source);
        let remap = encode_child(root, mn::TIME_REMAP, state);
        state.time_remap_duration = None;
        out.time_remap = remap?;
    }

    out.masks = encode_masks(root.group(mn::MASKS), state)?;
    out.effects = encode_indexed(root.group(mn::EFFECTS), state)?;
    out.trackers = encode_indexed(root.group(mn::TRACKERS), state)?;
    out.layer_styles = match root.group(mn::LAYER_STYLES) {
        Some(styles) => encode_layer_styles(styles, state)?,
        None => None,
    };
    out.audio = encode_named(root, mn::AUDIO, state)?;
    if av.three_d_layer {
        out.geometry_option = encode_named(root, mn::GEOMETRY_OPTIONS, state)?;
        out.material_option = encode_named(root, mn::MATERIAL_OPTIONS, state)?;
    }
    Ok(())
}

/// Encodes the layer at `index` (1-based) of a comp.
pub fn encode_layer(
    project: &Project,
    comp: ItemId,
    index: usize,
    state: &mut AexState,
) -> Result<AexLayer, AexError> {
    let duration = project.comp(comp)?.av.duration;
    let layer = project.layer(comp, index)?;
    let kind = layer_type(layer);
    tracing::debug!(layer = %layer.name, index, kind = kind.tag(), "encode layer");

    let mut out = AexLayer {
        kind,
        name: Some(layer.name.clone()),
        label: Some(layer.label),
        comment: modified(layer.comment.clone(), String::new()),
        enabled: modified(layer.enabled, true),
        has_video: modified(
            layer.has_video,
            !matches!(kind, LayerType::Light | LayerType::Camera),
        ),
        in_point: modified_num(layer.in_point, 0.0),
        out_point: modified_num(layer.out_point, duration),
        start_time: modified_num(layer.start_time, 0.0),
        stretch: modified_num(layer.stretch, 100.0),
        shy: modified(layer.shy, false),
        solo: modified(layer.solo, false),
        parent_layer_index: layer.parent,
        markers: layer.markers().map(encode_markers).unwrap_or_default(),
        transform: encode_transform(layer, state)?,
        ..AexLayer::default()
    };

    if let Some(av) = layer.av_layer() {
        encode_av(project, layer, av, &mut out, state)?;
    }

    let root = &layer.root;
    match &layer.kind {
        LayerKind::Text(av) => {
            out.three_d_per_char = read_if(
                av.three_d_layer,
                || Ok::<_, AexError>(av.three_d_per_char),
                false,
            )?;
            if let Some(text) = root.group(mn::TEXT_PROPERTIES) {
                out.source_text = encode_child(text, mn::TEXT_DOCUMENT, state)?;
                out.path_option = encode_named(text, mn::TEXT_PATH_OPTIONS, state)?;
                out.more_option = encode_named(text, mn::TEXT_MORE_OPTIONS, state)?;
                out.animators = encode_named(text, mn::TEXT_ANIMATORS, state)?;
            }
        }
        LayerKind::Shape(_) => {
            out.contents = encode_indexed(root.group(mn::ROOT_VECTORS), state)?;
        }
        LayerKind::Light(light) => {
            out.light_type = Some(light.light_type);
            out.light_option = encode_named(root, mn::LIGHT_OPTIONS, state)?;
        }
        LayerKind::Camera => {
            out.camera_option = encode_named(root, mn::CAMERA_OPTIONS, state)?;
        }
        LayerKind::Av(_) | LayerKind::Null(_) => {}
    }

    Ok(out)
}

/// Finds the live item a layer source aexid refers to: first an item this
/// call created or matched, then an exact aexid, then a name match.
pub fn resolve_source(project: &Project, aexid: &str, state: &mut AexState) -> Option<ItemId> {
    if let Some(id) = state.sources.get(aexid) {
        return Some(*id);
    }

    let candidates = || project.items().iter().filter(|i| i.av().is_some());
    if let Some(item) = candidates().find(|i| project.aexid(i.id).ok().as_deref() == Some(aexid)) {
        return Some(item.id);
    }
    let name = aexid.rsplit_once(':').map_or(aexid, |(name, _)| name);
    if let Some(item) = candidates().find(|i| i.name.to_lowercase() == name) {
        return Some(item.id);
    }

    state.warn(format!("Could not resolve layer source '{aexid}'"), None);
    None
}

fn group_mut<'a>(
    root: &'a mut PropertyGroup,
    match_name: &str,
) -> Result<&'a mut PropertyGroup, AexError> {
    root.group_mut(match_name)
        .ok_or_else(|| AexError::PropertyNotFound(match_name.to_string()))
}

fn decode_child(
    doc: Option<&AexProperty>,
    group: &mut PropertyGroup,
    match_name: &str,
    state: &mut AexState,
) -> Result<(), AexError> {
    let Some(doc) = doc else {
        return Ok(());
    };
    let property = group
        .property_mut(match_name)
        .ok_or_else(|| AexError::PropertyNotFound(match_name.to_string()))?;
    decode_property(doc, property, state)
}

fn decode_transform(doc: &AexTransform, layer: &mut Layer, state: &mut AexState) -> Result<(), AexError> {
    let three_d = layer.is_three_d();
    let t = group_mut(&mut layer.root, mn::TRANSFORM)?;

    decode_child(doc.anchor_point.as_ref(), t, mn::ANCHOR_POINT, state)?;
    decode_child(doc.point_of_interest.as_ref(), t, mn::POINT_OF_INTEREST, state)?;
    decode_child(doc.position.as_ref(), t, mn::POSITION, state)?;
    decode_child(doc.scale.as_ref(), t, mn::SCALE, state)?;
    decode_child(doc.opacity.as_ref(), t, mn::OPACITY, state)?;

    let z = if three_d {
        doc.z_rotation.as_ref().or(doc.rotation.as_ref())
    } else {
        doc.rotation.as_ref().or(doc.z_rotation.as_ref())
    };
    decode_child(z, t, mn::ROTATE_Z, state)?;
    if three_d {
        decode_child(doc.orientation.as_ref(), t, mn::ORIENTATION, state)?;
        decode_child(doc.x_rotation.as_ref(), t, mn::ROTATE_X, state)?;
        decode_child(doc.y_rotation.as_ref(), t, mn::ROTATE_Y, state)?;
    }
    Ok(())
}

fn apply_av_attributes(doc: &AexLayer, av: &mut AvLayer, source: Option<ItemId>) {
    macro_rules! assign {
        ($($field:ident),* $(,)?) => {
            $(if let Some(v) = doc.$field { av.$field = v; })*
        };
    }
    assign!(
        adjustment_layer, audio_enabled, auto_orient, blending_mode, collapse_transformation,
        effects_active, environment_layer, guide_layer, motion_blur, preserve_transparency,
        quality, sampling_quality, three_d_layer, time_remap_enabled, track_matte_type,
        three_d_per_char,
    );
    match (doc.frame_blending, doc.frame_blending_type) {
        (_, Some(kind)) => av.frame_blending_type = kind,
        (Some(false), None) => av.frame_blending_type = frame_blending::NO_FRAME_BLEND,
        (Some(true), None) if !av.frame_blending() => {
            av.frame_blending_type = frame_blending::FRAME_MIX
        }
        _ => {}
    }
    if source.is_some() {
        av.source = source;
    }
}

/// Applies a layer document to the live layer at `index`. The parent link
/// is left to [`apply_parent`], since the parent may not exist yet.
pub fn apply_layer(
    project: &mut Project,
    comp: ItemId,
    index: usize,
    doc: &AexLayer,
    state: &mut AexState,
) -> Result<(), AexError> {
    let resolved = match &doc.source {
        Some(aexid) => resolve_source(project, aexid, state),
        None => None,
    };
    let current = project.layer(comp, index)?.av_layer().and_then(|av| av.source);
    let remap_duration = source_duration(project, resolved.or(current));
    let marker_match_by = state.update_options.marker_match_by;

    let layer = project.layer_mut(comp, index)?;
    if let Some(name) = &doc.name {
        layer.name = name.clone();
    }
    macro_rules! assign {
        ($($field:ident),* $(,)?) => {
            $(if let Some(v) = &doc.$field { layer.$field = v.clone(); })*
        };
    }
    assign!(label, comment, enabled, has_video, in_point, out_point, start_time, stretch, shy, solo);

    match &mut layer.kind {
        LayerKind::Light(light) => {
            if let Some(kind) = doc.light_type {
                light.light_type = kind;
            }
        }
        LayerKind::Camera => {}
        LayerKind::Av(av) | LayerKind::Text(av) | LayerKind::Shape(av) | LayerKind::Null(av) => {
            apply_av_attributes(doc, av, resolved);
        }
    }

    if !doc.markers.is_empty() {
        if let Some(markers) = layer.markers_mut() {
            decode_markers(&doc.markers, markers, marker_match_by, state)?;
        }
    }
    decode_transform(&doc.transform, layer, state)?;

    let root = &mut layer.root;
    if let Some(remap) = &doc.time_remap {
        state.time_remap_duration = remap_duration;
        let result = decode_child(Some(remap), root, mn::TIME_REMAP, state);
        state.time_remap_duration = None;
        result?;
    }
    if !doc.masks.is_empty() {
        decode_masks(&doc.masks, group_mut(root, mn::MASKS)?, state)?;
    }
    if !doc.effects.is_empty() {
        decode_indexed(&doc.effects, group_mut(root, mn::EFFECTS)?, state)?;
    }
    if !doc.trackers.is_empty() {
        decode_indexed(&doc.trackers, group_mut(root, mn::TRACKERS)?, state)?;
    }
    if let Some(styles) = &doc.layer_styles {
        decode_layer_styles(styles, group_mut(root, mn::LAYER_STYLES)?, state)?;
    }

    let named = [
        (doc.audio.as_ref(), mn::AUDIO),
        (doc.geometry_option.as_ref(), mn::GEOMETRY_OPTIONS),
        (doc.material_option.as_ref(), mn::MATERIAL_OPTIONS),
        (doc.light_option.as_ref(), mn::LIGHT_OPTIONS),
        (doc.camera_option.as_ref(), mn::CAMERA_OPTIONS),
    ];
    for (group, match_name) in named {
        if let Some(group) = group {
            decode_group(group, group_mut(root, match_name)?, state)?;
        }
    }

    if !doc.contents.is_empty() {
        decode_indexed(&doc.contents, group_mut(root, mn::ROOT_VECTORS)?, state)?;
    }

    let text_docs = [
        doc.path_option.as_ref(),
        doc.more_option.as_ref(),
        doc.animators.as_ref(),
    ];
    if doc.source_text.is_some() || text_docs.iter().any(Option::is_some) {
        let text = group_mut(root, mn::TEXT_PROPERTIES)?;
        decode_child(doc.source_text.as_ref(), text, mn::TEXT_DOCUMENT, state)?;
        for (group, match_name) in text_docs.into_iter().zip([
            mn::TEXT_PATH_OPTIONS,
            mn::TEXT_MORE_OPTIONS,
            mn::TEXT_ANIMATORS,
        ]) {
            if let Some(group) = group {
                decode_group(group, group_mut(text, match_name)?, state)?;
            }
        }
    }

    Ok(())
}

/// Links a layer to its parent. Runs after every layer of the comp exists.
pub fn apply_parent(
    project: &mut Project,
    comp: ItemId,
    index: usize,
    parent: Option<usize>,
) -> Result<(), AexError> {
    let Some(parent) = parent else {
        return Ok(());
    };
    if parent == index {
        return Err(SceneError::MissingLayer { comp, index: parent }.into());
    }
    project.layer(comp, parent)?;
    project.layer_mut(comp, index)?.parent = Some(parent);
    Ok(())
}

fn default_name(kind: LayerType) -> &'static str {
    match kind {
        LayerType::Av => "Layer",
        LayerType::Shape => "Shape Layer 1",
        LayerType::Text => "Text",
        LayerType::Camera => "Camera 1",
        LayerType::Light => "Light 1",
        LayerType::Null => "Null 1",
    }
}

/// Adds a layer to a comp from a document and returns its index.
pub fn create_layer(
    project: &mut Project,
    comp: ItemId,
    doc: &AexLayer,
    state: &mut AexState,
) -> Result<usize, AexError> {
    let duration = project.comp(comp)?.av.duration;
    let source = match &doc.source {
        Some(aexid) => resolve_source(project, aexid, state),
        None => None,
    };
    let name = doc
        .name
        .clone()
        .or_else(|| source.and_then(|id| project.item(id).ok()).map(|i| i.name.clone()))
        .unwrap_or_else(|| default_name(doc.kind).to_string());
    tracing::debug!(layer = %name, kind = doc.kind.tag(), "create layer");

    let av = AvLayer {
        source,
        ..AvLayer::default()
    };
    let kind = match doc.kind {
        LayerType::Av => LayerKind::Av(av),
        LayerType::Text => LayerKind::Text(av),
        LayerType::Shape => LayerKind::Shape(av),
        LayerType::Null => LayerKind::Null(AvLayer::default()),
        LayerType::Light => LayerKind::Light(LightLayer {
            light_type: doc.light_type.unwrap_or(light_type::POINT),
        }),
        LayerType::Camera => LayerKind::Camera,
    };

    let index = project.comp_mut(comp)?.add_layer(Layer::new(&name, kind, duration));
    apply_layer(project, comp, index, doc, state)?;
    state.stats.layer_count += 1;
    Ok(index)
}

/// Updates the live layer at `index` from a document of the same kind.
pub fn update_layer(
    project: &mut Project,
    comp: ItemId,
    index: usize,
    doc: &AexLayer,
    state: &mut AexState,
) -> Result<(), AexError> {
    let live = layer_type(project.layer(comp, index)?);
    if live != doc.kind {
        return Err(AexError::cannot_update(live.tag(), doc.kind.tag()));
    }
    tracing::debug!(index, kind = doc.kind.tag(), "update layer");
    apply_layer(project, comp, index, doc, state)?;
    state.stats.layer_count += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{AvAttributes, PropertyValue};
    use serde_json::json;

    fn project_with_comp() -> (Project, ItemId) {
        let mut project = Project::new();
        let comp = project.add_comp("Comp", AvAttributes::default());
        (project, comp)
    }

    #[test]
    fn fresh_null_layer_is_minimal() {
        let (mut project, comp) = project_with_comp();
        project.comp_mut(comp).unwrap().add_layer(Layer::null("Null 1", 10.0));

        let mut state = AexState::default();
        let out = encode_layer(&project, comp, 1, &mut state).unwrap();
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({ "type": "aex:layer:null", "name": "Null 1", "label": 1 })
        );
    }

    #[test]
    fn rotation_follows_dimensionality() {
        let (mut project, comp) = project_with_comp();
        let mut layer = Layer::null("Null 1", 10.0);
        let t = layer.root.group_mut(mn::TRANSFORM).unwrap();
        t.property_mut(mn::ROTATE_Z)
            .unwrap()
            .set_value(PropertyValue::Number(45.0))
            .unwrap();
        t.property_mut(mn::ROTATE_X)
            .unwrap()
            .set_value(PropertyValue::Number(10.0))
            .unwrap();
        project.comp_mut(comp).unwrap().add_layer(layer);

        let mut state = AexState::default();
        let flat = encode_layer(&project, comp, 1, &mut state).unwrap();
        assert!(flat.transform.rotation.is_some());
        assert!(flat.transform.x_rotation.is_none());

        if let Some(av) = project.layer_mut(comp, 1).unwrap().av_layer_mut() {
            av.three_d_layer = true;
        }
        let deep = encode_layer(&project, comp, 1, &mut state).unwrap();
        assert!(deep.transform.rotation.is_none());
        assert!(deep.transform.x_rotation.is_some());
        assert!(deep.transform.z_rotation.is_some());
        assert!(deep.transform.y_rotation.is_none());
    }

    #[test]
    fn rotation_write_rechecks_three_d_after_attributes() {
        let (mut project, comp) = project_with_comp();
        let mut state = AexState::default();
        let doc: AexLayer = serde_json::from_value(json!({
            "type": "aex:layer:null",
            "threeDLayer": true,
            "transform": {
                "xRotation": { "type": "aex:property:oned", "matchName": mn::ROTATE_X, "value": 30.0 },
                "zRotation": { "type": "aex:property:oned", "matchName": mn::ROTATE_Z, "value": 15.0 }
            }
        }))
        .unwrap();
        let index = create_layer(&mut project, comp, &doc, &mut state).unwrap();

        let layer = project.layer(comp, index).unwrap();
        let t = layer.transform().unwrap();
        assert_eq!(t.property(mn::ROTATE_X).unwrap().value(), &PropertyValue::Number(30.0));
        assert_eq!(t.property(mn::ROTATE_Z).unwrap().value(), &PropertyValue::Number(15.0));
    }

    #[test]
    fn source_resolution_falls_back_to_name() {
        let (mut project, comp) = project_with_comp();
        let solid = project.add_solid("Red Solid", AvAttributes::default(), vec![1.0, 0.0, 0.0]);
        let mut state = AexState::default();

        let doc = AexLayer {
            kind: LayerType::Av,
            source: Some("red solid:999".into()),
            ..AexLayer::default()
        };
        let index = create_layer(&mut project, comp, &doc, &mut state).unwrap();
        let layer = project.layer(comp, index).unwrap();
        assert_eq!(layer.av_layer().unwrap().source, Some(solid));
        assert_eq!(layer.name, "Red Solid");

        let missing = AexLayer {
            kind: LayerType::Av,
            source: Some("gone:1".into()),
            ..AexLayer::default()
        };
        create_layer(&mut project, comp, &missing, &mut state).unwrap();
        assert_eq!(state.log.len(), 1);
    }

    #[test]
    fn updating_across_kinds_is_rejected() {
        let (mut project, comp) = project_with_comp();
        project.comp_mut(comp).unwrap().add_layer(Layer::null("Null 1", 10.0));
        let mut state = AexState::default();
        let doc = AexLayer {
            kind: LayerType::Camera,
            ..AexLayer::default()
        };
        let err = update_layer(&mut project, comp, 1, &doc, &mut state).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Updating a 'aex:layer:null' from a 'aex:layer:camera' is not supported"
        );
    }

    #[test]
    fn parent_must_be_another_existing_layer() {
        let (mut project, comp) = project_with_comp();
        project.comp_mut(comp).unwrap().add_layer(Layer::null("A", 10.0));
        project.comp_mut(comp).unwrap().add_layer(Layer::null("B", 10.0));

        apply_parent(&mut project, comp, 2, Some(1)).unwrap();
        assert_eq!(project.layer(comp, 2).unwrap().parent, Some(1));
        assert!(apply_parent(&mut project, comp, 2, Some(2)).is_err());
        assert!(apply_parent(&mut project, comp, 2, Some(5)).is_err());
    }
}
