//! # Property Group Codec
//!
//! Three walks over the host property tree:
//! - **named** groups (transform, options) emit only modified children and
//!   vanish when nothing inside them is modified;
//! - **indexed** groups (effects, shape contents, animators, trackers) emit
//!   every entry, since the entries themselves are the user's content;
//! - **layer styles** emit only styles that have been applied.
//!
//! Decoding follows the same split: named children are paired by matchName
//! (and occurrence), indexed children by position.

use crate::error::AexError;
use crate::normalize::read_if;
use crate::property::{decode_property, encode_property};
use crate::scene::match_names as mn;
use crate::scene::{PropertyBase, PropertyGroup};
use crate::state::AexState;
use aex_data::model::{AexPropertyGroup, AexPropertyNode, GroupType};
use std::collections::HashMap;

fn encode_enabled(group: &PropertyGroup) -> Option<bool> {
    read_if(group.can_set_enabled, || Ok::<_, AexError>(group.enabled), true)
        .ok()
        .flatten()
}

fn encode_children(
    group: &PropertyGroup,
    state: &mut AexState,
) -> Result<Vec<AexPropertyNode>, AexError> {
    let mut out = Vec::new();
    for child in &group.children {
        match child {
            PropertyBase::Property(p) => {
                if let Some(p) = encode_property(p, state)? {
                    out.push(AexPropertyNode::Property(p));
                }
            }
            PropertyBase::Group(g) => {
                let encoded = if group.is_indexed() {
                    Some(encode_indexed_entry(g, state)?)
                } else {
                    encode_group(g, state)?
                };
                if let Some(g) = encoded {
                    out.push(AexPropertyNode::Group(g));
                }
            }
        }
    }
    Ok(out)
}

/// Encodes a named group, or `None` when nothing under it is modified.
pub fn encode_group(
    group: &PropertyGroup,
    state: &mut AexState,
) -> Result<Option<AexPropertyGroup>, AexError> {
    let properties = encode_children(group, state)?;
    let enabled = encode_enabled(group);
    if properties.is_empty() && enabled.is_none() {
        return Ok(None);
    }
    Ok(Some(AexPropertyGroup {
        kind: GroupType::Group,
        name: None,
        match_name: group.match_name.clone(),
        enabled,
        properties,
        contents: Vec::new(),
    }))
}

/// Encodes one entry of an indexed group. Entries are always written, with
/// their display name, even when nothing inside them is modified.
pub fn encode_indexed_entry(
    group: &PropertyGroup,
    state: &mut AexState,
) -> Result<AexPropertyGroup, AexError> {
    let mut out = AexPropertyGroup {
        kind: GroupType::Group,
        name: Some(group.name.clone()),
        match_name: group.match_name.clone(),
        enabled: encode_enabled(group),
        properties: Vec::new(),
        contents: Vec::new(),
    };

    // Shape groups nest their contents one level down.
    if group.match_name == mn::VECTOR_GROUP {
        for child in &group.children {
            match child {
                PropertyBase::Group(g) if g.match_name == mn::VECTORS_GROUP => {
                    out.contents = encode_indexed(Some(g), state)?;
                }
                PropertyBase::Group(g) => {
                    if let Some(g) = encode_group(g, state)? {
                        out.properties.push(AexPropertyNode::Group(g));
                    }
                }
                PropertyBase::Property(p) => {
                    if let Some(p) = encode_property(p, state)? {
                        out.properties.push(AexPropertyNode::Property(p));
                    }
                }
            }
        }
    } else {
        out.properties = encode_children(group, state)?;
    }
    Ok(out)
}

/// Every entry of an indexed group, in order.
pub fn encode_indexed(
    group: Option<&PropertyGroup>,
    state: &mut AexState,
) -> Result<Vec<AexPropertyGroup>, AexError> {
    let Some(group) = group else {
        return Ok(Vec::new());
    };
    group
        .children
        .iter()
        .filter_map(|c| match c {
            PropertyBase::Group(g) => Some(g),
            PropertyBase::Property(_) => None,
        })
        .map(|g| encode_indexed_entry(g, state))
        .collect()
}

/// Layer styles, when any have been applied. The first style (blending
/// options) is always walked; the others only once applied.
pub fn encode_layer_styles(
    group: &PropertyGroup,
    state: &mut AexState,
) -> Result<Option<AexPropertyGroup>, AexError> {
    if !group.can_set_enabled {
        return Ok(None);
    }

    let mut properties = Vec::new();
    for (i, child) in group.children.iter().enumerate() {
        let PropertyBase::Group(style) = child else {
            continue;
        };
        if i > 0 && !style.can_set_enabled {
            continue;
        }
        properties.push(AexPropertyNode::Group(AexPropertyGroup {
            kind: GroupType::Group,
            name: None,
            match_name: style.match_name.clone(),
            enabled: (i > 0).then_some(style.enabled),
            properties: encode_children(style, state)?,
            contents: Vec::new(),
        }));
    }

    Ok(Some(AexPropertyGroup {
        kind: GroupType::LayerStyle,
        name: None,
        match_name: group.match_name.clone(),
        enabled: Some(group.enabled),
        properties,
        contents: Vec::new(),
    }))
}

fn node_tag(node: &AexPropertyNode) -> &'static str {
    match node {
        AexPropertyNode::Property(p) => p.kind.tag(),
        AexPropertyNode::Group(g) => g.kind.tag(),
    }
}

fn live_tag(child: &PropertyBase) -> &'static str {
    match child {
        PropertyBase::Property(p) => crate::property::property_type(p.value_type)
            .unwrap_or_else(|k| k)
            .tag(),
        PropertyBase::Group(_) => GroupType::Group.tag(),
    }
}

fn decode_enabled(enabled: Option<bool>, live: &mut PropertyGroup) -> Result<(), AexError> {
    if let Some(enabled) = enabled {
        if enabled != live.enabled {
            live.set_enabled(enabled)?;
        }
    }
    Ok(())
}

/// Applies document children to a named group, pairing by matchName and
/// occurrence.
pub fn decode_named_children(
    nodes: &[AexPropertyNode],
    live: &mut PropertyGroup,
    state: &mut AexState,
) -> Result<(), AexError> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for node in nodes {
        let match_name = node.match_name();
        let ordinal = seen.entry(match_name).or_insert(0);
        let occurrence = *ordinal;
        *ordinal += 1;

        let parent = live.match_name.clone();
        let child = live
            .children
            .iter_mut()
            .filter(|c| c.match_name() == match_name)
            .nth(occurrence)
            .ok_or_else(|| AexError::PropertyNotFound(format!("{match_name} in {parent}")))?;

        match (node, child) {
            (AexPropertyNode::Property(doc), PropertyBase::Property(p)) => {
                decode_property(doc, p, state)?
            }
            (AexPropertyNode::Group(doc), PropertyBase::Group(g)) => decode_group(doc, g, state)?,
            (node, child) => return Err(AexError::cannot_update(live_tag(child), node_tag(node))),
        }
    }
    Ok(())
}

/// Applies entries to an indexed group by position, adding entries the
/// live group is missing. Live entries past the end are left alone.
pub fn decode_indexed<'a>(
    entries: impl IntoIterator<Item = &'a AexPropertyGroup>,
    live: &mut PropertyGroup,
    state: &mut AexState,
) -> Result<(), AexError> {
    for (i, doc) in entries.into_iter().enumerate() {
        if i >= live.children.len() {
            tracing::debug!(match_name = %doc.match_name, parent = %live.match_name, "add property");
            live.add_property(&doc.match_name)?;
        }
        match &mut live.children[i] {
            PropertyBase::Group(g) if g.match_name == doc.match_name => {
                if let Some(name) = &doc.name {
                    g.name = name.clone();
                }
                decode_group(doc, g, state)?;
            }
            other => {
                return Err(AexError::cannot_update(
                    other.match_name(),
                    &doc.match_name,
                ))
            }
        }
    }
    Ok(())
}

/// Applies a document group to a live one of the same matchName.
pub fn decode_group(
    doc: &AexPropertyGroup,
    live: &mut PropertyGroup,
    state: &mut AexState,
) -> Result<(), AexError> {
    decode_enabled(doc.enabled, live)?;

    if live.is_indexed() {
        let entries = doc.properties.iter().filter_map(|n| match n {
            AexPropertyNode::Group(g) => Some(g),
            AexPropertyNode::Property(_) => None,
        });
        decode_indexed(entries, live, state)?;
    } else {
        decode_named_children(&doc.properties, live, state)?;
    }

    if !doc.contents.is_empty() {
        let parent = live.match_name.clone();
        let vectors = live
            .group_mut(mn::VECTORS_GROUP)
            .ok_or_else(|| AexError::PropertyNotFound(format!("{} in {parent}", mn::VECTORS_GROUP)))?;
        decode_indexed(&doc.contents, vectors, state)?;
    }
    Ok(())
}

/// Applies layer styles, turning on each style the document lists.
pub fn decode_layer_styles(
    doc: &AexPropertyGroup,
    live: &mut PropertyGroup,
    state: &mut AexState,
) -> Result<(), AexError> {
    live.can_set_enabled = true;
    if let Some(enabled) = doc.enabled {
        live.enabled = enabled;
    }

    let first = live.children.first().map(|c| c.match_name().to_string());
    for node in &doc.properties {
        let AexPropertyNode::Group(style) = node else {
            return Err(AexError::cannot_update(GroupType::LayerStyle.tag(), node_tag(node)));
        };
        let parent = live.match_name.clone();
        let target = live
            .group_mut(&style.match_name)
            .ok_or_else(|| AexError::PropertyNotFound(format!("{} in {parent}", style.match_name)))?;

        if first.as_deref() != Some(style.match_name.as_str()) && !target.can_set_enabled {
            target.can_set_enabled = true;
            target.enabled = true;
        }
        decode_enabled(style.enabled, target)?;
        decode_named_children(&style.properties, target, state)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{AvLayer, Layer, LayerKind, PropertyValue};
    use aex_data::model::AexProperty;
    use serde_json::json;

    fn av_layer() -> Layer {
        Layer::new("Layer", LayerKind::Av(AvLayer::default()), 10.0)
    }

    #[test]
    fn untouched_named_groups_vanish() {
        let layer = av_layer();
        let mut state = AexState::default();
        let audio = layer.root.group(mn::AUDIO).unwrap();
        assert!(encode_group(audio, &mut state).unwrap().is_none());
    }

    #[test]
    fn effects_are_kept_even_when_unmodified() {
        let mut layer = av_layer();
        let effects = layer.root.group_mut(mn::EFFECTS).unwrap();
        effects.add_property(mn::GAUSSIAN_BLUR).unwrap();

        let mut state = AexState::default();
        let out = encode_indexed(layer.root.group(mn::EFFECTS), &mut state).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].match_name, mn::GAUSSIAN_BLUR);
        assert!(out[0].name.is_some());
        assert!(out[0].properties.is_empty());
    }

    #[test]
    fn indexed_decode_adds_missing_entries_and_rejects_mismatches() {
        let mut layer = av_layer();
        let mut state = AexState::default();
        let slider = json!({
            "type": "aex:propertygroup",
            "name": "Speed",
            "matchName": mn::SLIDER_CONTROL,
            "properties": [{
                "type": "aex:property:oned",
                "matchName": format!("{}-0001", mn::SLIDER_CONTROL),
                "value": 42.0
            }]
        });
        let doc: AexPropertyGroup = serde_json::from_value(slider).unwrap();

        let effects = layer.root.group_mut(mn::EFFECTS).unwrap();
        decode_indexed([&doc], effects, &mut state).unwrap();
        assert_eq!(effects.num_properties(), 1);
        let entry = effects.group(mn::SLIDER_CONTROL).unwrap();
        assert_eq!(entry.name, "Speed");
        let value = entry.children[0].clone();
        match value {
            PropertyBase::Property(p) => assert_eq!(p.value(), &PropertyValue::Number(42.0)),
            PropertyBase::Group(_) => panic!("expected a property"),
        }

        let blur = AexPropertyGroup {
            match_name: mn::GAUSSIAN_BLUR.to_string(),
            ..AexPropertyGroup::default()
        };
        let err = decode_indexed([&blur], effects, &mut state).unwrap_err();
        assert!(matches!(err, AexError::NotSupportedOperation(_)));
    }

    #[test]
    fn layer_styles_are_absent_until_applied() {
        let mut layer = av_layer();
        let mut state = AexState::default();
        let styles = layer.root.group(mn::LAYER_STYLES).unwrap();
        assert!(encode_layer_styles(styles, &mut state).unwrap().is_none());

        let doc = AexPropertyGroup {
            kind: GroupType::LayerStyle,
            match_name: mn::LAYER_STYLES.to_string(),
            properties: vec![AexPropertyNode::Group(AexPropertyGroup {
                match_name: mn::DROP_SHADOW.to_string(),
                ..AexPropertyGroup::default()
            })],
            ..AexPropertyGroup::default()
        };
        let styles = layer.root.group_mut(mn::LAYER_STYLES).unwrap();
        decode_layer_styles(&doc, styles, &mut state).unwrap();

        let out = encode_layer_styles(layer.root.group(mn::LAYER_STYLES).unwrap(), &mut state)
            .unwrap()
            .unwrap();
        let names: Vec<&str> = out.properties.iter().map(|n| n.match_name()).collect();
        assert_eq!(names, vec![mn::BLEND_OPTIONS, mn::DROP_SHADOW]);
    }

    #[test]
    fn unknown_named_child_is_reported() {
        let mut layer = av_layer();
        let mut state = AexState::default();
        let doc = vec![AexPropertyNode::Property(AexProperty::default())];
        let transform = layer.root.group_mut(mn::TRANSFORM).unwrap();
        let err = decode_named_children(&doc, transform, &mut state).unwrap_err();
        assert!(matches!(err, AexError::PropertyNotFound(_)));
    }
}
