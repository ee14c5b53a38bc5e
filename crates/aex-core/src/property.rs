//! # Property Codec
//!
//! Encodes one animatable property, with its keyframes, into the document
//! value union and applies a document property back onto a live one.
//!
//! Value transforms:
//! - text documents expand to a flat, individually elided record (`text.rs`);
//! - shape paths are written positionally, never elided;
//! - marker keys become `{time, ...}` records with the time taken from the key;
//! - time remap values are divided by the layer source duration on read and
//!   multiplied by the *current* source duration on write.

use crate::error::AexError;
use crate::normalize::{modified, modified_num, read_if, Rounded};
use crate::options::MatchBy;
use crate::policy;
use crate::scene::match_names as mn;
use crate::scene::{Keyframe, KeyframeEase, MarkerValue, Property, PropertyValue, PropertyValueType, Shape};
use crate::state::AexState;
use crate::text;
use aex_data::constants::interpolation;
use aex_data::model::{
    AexEase, AexInterpolationType, AexKeyframe, AexKeyframeAttributes, AexMarker, AexProperty,
    AexShape, AexSpatialTangent, AexTemporalEase, AexValue, PropertyType,
};

/// Document tag for a host value category. `Err` carries the tag of a
/// category that has no document form.
pub fn property_type(value_type: PropertyValueType) -> Result<PropertyType, PropertyType> {
    use PropertyValueType as T;

    match value_type {
        T::OneD => Ok(PropertyType::OneD),
        T::TwoD | T::TwoDSpatial => Ok(PropertyType::TwoD),
        T::ThreeD | T::ThreeDSpatial => Ok(PropertyType::ThreeD),
        T::Color => Ok(PropertyType::Color),
        T::Shape => Ok(PropertyType::Shape),
        T::TextDocument => Ok(PropertyType::TextDocument),
        T::MaskIndex => Ok(PropertyType::MaskIndex),
        T::Marker => Ok(PropertyType::Marker),
        T::Dropdown => Ok(PropertyType::Dropdown),
        T::LayerIndex => Err(PropertyType::LayerIndex),
        T::CustomValue => Err(PropertyType::Custom),
        T::NoValue => Err(PropertyType::NoValue),
    }
}

fn time_remap_scale(property: &Property, state: &AexState) -> Option<f64> {
    if property.match_name != mn::TIME_REMAP {
        return None;
    }
    state.time_remap_duration.filter(|d| *d > 0.0)
}

/// Encodes a property, or `None` when it is unmodified or dropped by the
/// unsupported-property policy. Dropdowns are always written so their menu
/// labels survive.
pub fn encode_property(
    property: &Property,
    state: &mut AexState,
) -> Result<Option<AexProperty>, AexError> {
    let is_dropdown = property.value_type == PropertyValueType::Dropdown;
    if !property.is_modified() && !is_dropdown {
        return Ok(None);
    }

    let kind = match property_type(property.value_type) {
        Ok(kind) => kind,
        Err(kind) => {
            return policy::unsupported_property(state, &property.name, &property.match_name, kind)
        }
    };
    tracing::debug!(match_name = %property.match_name, "encode property");

    let mut out = AexProperty {
        kind,
        name: Some(property.name.clone()),
        match_name: property.match_name.clone(),
        enabled: read_if(
            property.can_set_enabled,
            || Ok::<_, AexError>(property.enabled()),
            true,
        )?,
        expression: modified(property.expression().to_string(), String::new()),
        expression_enabled: modified(
            property.expression_enabled,
            !property.expression().is_empty(),
        ),
        items: is_dropdown.then(|| property.menu_items.clone()),
        value: None,
        keys: Vec::new(),
    };

    if kind == PropertyType::Marker {
        let markers = encode_markers(property);
        if !markers.is_empty() {
            out.value = Some(AexValue::Markers(markers));
        }
        return Ok(Some(out));
    }

    let scale = time_remap_scale(property, state);
    if property.num_keys() == 0 {
        if property.value() != property.default_value() {
            out.value = Some(encode_value(property.value(), scale)?);
        }
    } else {
        out.keys = property
            .keys()
            .iter()
            .map(|key| encode_keyframe(key, property.value_type, scale))
            .collect::<Result<_, _>>()?;
    }

    Ok(Some(out))
}

/// Value-less node for a property that has nothing to report.
pub fn bare_property(property: &Property) -> AexProperty {
    let kind = property_type(property.value_type).unwrap_or_else(|k| k);
    AexProperty {
        kind,
        name: Some(property.name.clone()),
        match_name: property.match_name.clone(),
        ..AexProperty::default()
    }
}

fn encode_value(value: &PropertyValue, scale: Option<f64>) -> Result<AexValue, AexError> {
    match value {
        PropertyValue::Number(n) => Ok(AexValue::Scalar(scale.map_or(*n, |d| n / d).rounded())),
        PropertyValue::Vector(v) => Ok(AexValue::Vector(v.rounded())),
        PropertyValue::Shape(shape) => Ok(AexValue::Shape(Box::new(encode_shape(shape)))),
        PropertyValue::TextDocument(doc) => Ok(AexValue::TextDocument(Box::new(
            text::encode_text_document(doc)?,
        ))),
        PropertyValue::Marker(marker) => Ok(AexValue::Markers(vec![encode_marker(0.0, marker)])),
        PropertyValue::None | PropertyValue::Custom(_) => Err(AexError::UnsupportedProperty {
            match_name: String::new(),
            value_type: format!("{value:?}"),
        }),
    }
}

fn encode_ease(ease: &[KeyframeEase]) -> Vec<AexEase> {
    ease.iter()
        .map(|e| {
            AexEase {
                influence: e.influence,
                speed: e.speed,
            }
            .rounded()
        })
        .collect()
}

/// Encodes one keyframe. Hold edges carry no ease; spatial fields are only
/// written for spatial properties.
pub fn encode_keyframe(
    key: &Keyframe,
    value_type: PropertyValueType,
    scale: Option<f64>,
) -> Result<AexKeyframe, AexError> {
    let linear = interpolation::LINEAR;
    let interpolation_type = if key.in_interpolation == linear && key.out_interpolation == linear {
        None
    } else {
        Some(AexInterpolationType {
            in_type: modified(key.in_interpolation, linear),
            out_type: modified(key.out_interpolation, linear),
        })
    };

    let hold = key.in_interpolation == interpolation::HOLD || key.out_interpolation == interpolation::HOLD;
    let temporal_ease = (!hold).then(|| AexTemporalEase {
        in_ease: encode_ease(&key.in_ease),
        out_ease: encode_ease(&key.out_ease),
    });

    let mut attributes = AexKeyframeAttributes {
        interpolation_type,
        temporal_ease,
        temporal_auto_bezier: modified(key.temporal_auto_bezier, false),
        temporal_continuous: modified(key.temporal_continuous, false),
        ..AexKeyframeAttributes::default()
    };

    if value_type.is_spatial() {
        let zero = vec![0.0; value_type.dimensions().unwrap_or(0)];
        let in_tangent = modified_num(key.in_spatial_tangent.clone(), zero.clone());
        let out_tangent = modified_num(key.out_spatial_tangent.clone(), zero);
        if in_tangent.is_some() || out_tangent.is_some() {
            attributes.spatial_tangent = Some(AexSpatialTangent {
                in_tangent,
                out_tangent,
            });
        }
        attributes.spatial_auto_bezier = modified(key.spatial_auto_bezier, false);
        attributes.spatial_continuous = modified(key.spatial_continuous, false);
        attributes.roving = modified(key.roving, false);
    }

    Ok(AexKeyframe {
        time: key.time,
        value: encode_value(&key.value, scale)?,
        attributes,
    })
}

pub fn encode_shape(shape: &Shape) -> AexShape {
    AexShape {
        closed: shape.closed,
        vertices: shape.vertices.rounded(),
        in_tangents: shape.in_tangents.rounded(),
        out_tangents: shape.out_tangents.rounded(),
        feather_interps: shape.feather_interps.clone(),
        feather_radii: shape.feather_radii.rounded(),
        feather_rel_corner_angles: shape.feather_rel_corner_angles.rounded(),
        feather_rel_seg_locs: shape.feather_rel_seg_locs.rounded(),
        feather_seg_locs: shape.feather_seg_locs.clone(),
        feather_tensions: shape.feather_tensions.rounded(),
        feather_types: shape.feather_types.clone(),
    }
}

fn decode_shape(shape: &AexShape) -> Shape {
    Shape {
        closed: shape.closed,
        vertices: shape.vertices.clone(),
        in_tangents: shape.in_tangents.clone(),
        out_tangents: shape.out_tangents.clone(),
        feather_interps: shape.feather_interps.clone(),
        feather_radii: shape.feather_radii.clone(),
        feather_rel_corner_angles: shape.feather_rel_corner_angles.clone(),
        feather_rel_seg_locs: shape.feather_rel_seg_locs.clone(),
        feather_seg_locs: shape.feather_seg_locs.clone(),
        feather_tensions: shape.feather_tensions.clone(),
        feather_types: shape.feather_types.clone(),
    }
}

fn encode_marker(time: f64, marker: &MarkerValue) -> AexMarker {
    AexMarker {
        time,
        comment: modified(marker.comment.clone(), String::new()),
        chapter: modified(marker.chapter.clone(), String::new()),
        url: modified(marker.url.clone(), String::new()),
        frame_target: modified(marker.frame_target.clone(), String::new()),
        cue_point_name: modified(marker.cue_point_name.clone(), String::new()),
        duration: modified_num(marker.duration, 0.0),
        label: modified(marker.label, 0),
        protected_region: modified(marker.protected_region, false),
        parameters: (!marker.parameters.is_empty()).then(|| {
            marker
                .parameters
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect()
        }),
    }
}

fn decode_marker(marker: &AexMarker) -> MarkerValue {
    MarkerValue {
        comment: marker.comment.clone().unwrap_or_default(),
        chapter: marker.chapter.clone().unwrap_or_default(),
        url: marker.url.clone().unwrap_or_default(),
        frame_target: marker.frame_target.clone().unwrap_or_default(),
        cue_point_name: marker.cue_point_name.clone().unwrap_or_default(),
        duration: marker.duration.unwrap_or(0.0),
        label: marker.label.unwrap_or(0),
        protected_region: marker.protected_region.unwrap_or(false),
        parameters: marker
            .parameters
            .iter()
            .flatten()
            .map(|(k, v)| {
                let v = match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), v)
            })
            .collect(),
    }
}

/// Markers of a marker property, in time order.
pub fn encode_markers(property: &Property) -> Vec<AexMarker> {
    property
        .keys()
        .iter()
        .filter_map(|key| match &key.value {
            PropertyValue::Marker(marker) => Some(encode_marker(key.time, marker)),
            _ => None,
        })
        .collect()
}

/// Writes markers onto a marker property. The Nth document marker replaces
/// the Nth existing one; existing markers past the end of the document are
/// kept.
pub fn decode_markers(
    markers: &[AexMarker],
    property: &mut Property,
    match_by: MatchBy,
    state: &mut AexState,
) -> Result<(), AexError> {
    if match_by == MatchBy::Name {
        state.warn(
            "Markers have no name to match by; matching by index".to_string(),
            Some(&property.match_name),
        );
    }

    // A document marker wins over a kept live marker at the same time.
    let kept: Vec<(f64, PropertyValue)> = property
        .keys()
        .iter()
        .skip(markers.len())
        .filter(|k| !markers.iter().any(|m| m.time == k.time))
        .map(|k| (k.time, k.value.clone()))
        .collect();

    property.remove_all_keys();
    for marker in markers {
        property.set_value_at_time(marker.time, PropertyValue::Marker(Box::new(decode_marker(marker))))?;
        state.stats.key_count += 1;
    }
    for (time, value) in kept {
        property.set_value_at_time(time, value)?;
    }
    Ok(())
}

fn decode_value(value: &AexValue, scale: Option<f64>) -> Result<PropertyValue, AexError> {
    Ok(match value {
        AexValue::Scalar(n) => PropertyValue::Number(scale.map_or(*n, |d| n * d)),
        AexValue::Vector(v) => PropertyValue::Vector(v.clone()),
        AexValue::Shape(shape) => PropertyValue::Shape(decode_shape(shape)),
        AexValue::TextDocument(doc) => {
            PropertyValue::TextDocument(Box::new(text::decode_text_document(doc)?))
        }
        AexValue::Markers(markers) => match markers.first() {
            Some(marker) => PropertyValue::Marker(Box::new(decode_marker(marker))),
            None => PropertyValue::None,
        },
    })
}

fn decode_ease(ease: &[AexEase]) -> Vec<KeyframeEase> {
    ease.iter()
        .map(|e| KeyframeEase {
            influence: e.influence,
            speed: e.speed,
        })
        .collect()
}

fn decode_keyframe(
    key: &AexKeyframe,
    property: &mut Property,
    scale: Option<f64>,
) -> Result<(), AexError> {
    let index = property.set_value_at_time(key.time, decode_value(&key.value, scale)?)?;
    let attrs = &key.attributes;

    let (in_type, out_type) = attrs
        .interpolation_type
        .as_ref()
        .map(|i| {
            (
                i.in_type.unwrap_or(interpolation::LINEAR),
                i.out_type.unwrap_or(interpolation::LINEAR),
            )
        })
        .unwrap_or((interpolation::LINEAR, interpolation::LINEAR));
    property.set_interpolation_type_at_key(index, in_type, out_type)?;

    if let Some(ease) = &attrs.temporal_ease {
        property.set_temporal_ease_at_key(index, decode_ease(&ease.in_ease), decode_ease(&ease.out_ease))?;
    }

    if property.value_type.is_spatial() {
        let zero = vec![0.0; property.value_type.dimensions().unwrap_or(0)];
        let (in_tangent, out_tangent) = match &attrs.spatial_tangent {
            Some(t) => (
                t.in_tangent.clone().unwrap_or_else(|| zero.clone()),
                t.out_tangent.clone().unwrap_or_else(|| zero.clone()),
            ),
            None => (zero.clone(), zero),
        };
        property.set_spatial_tangents_at_key(index, in_tangent, out_tangent)?;
    }

    property.set_key_flags(index, |k| {
        k.temporal_auto_bezier = attrs.temporal_auto_bezier.unwrap_or(false);
        k.temporal_continuous = attrs.temporal_continuous.unwrap_or(false);
        k.spatial_auto_bezier = attrs.spatial_auto_bezier.unwrap_or(false);
        k.spatial_continuous = attrs.spatial_continuous.unwrap_or(false);
        k.roving = attrs.roving.unwrap_or(false);
    })?;
    Ok(())
}

/// Applies a document property to a live one. Host setter errors are
/// returned as they are.
pub fn decode_property(
    doc: &AexProperty,
    property: &mut Property,
    state: &mut AexState,
) -> Result<(), AexError> {
    let live_kind = property_type(property.value_type).unwrap_or_else(|k| k);
    if live_kind != doc.kind {
        return Err(AexError::cannot_update(live_kind.tag(), doc.kind.tag()));
    }
    tracing::debug!(match_name = %property.match_name, "decode property");

    if let Some(AexValue::Markers(markers)) = &doc.value {
        if doc.kind == PropertyType::Marker {
            let match_by = state.update_options.marker_match_by;
            decode_markers(markers, property, match_by, state)?;
            state.stats.property_count += 1;
            return Ok(());
        }
    }

    let scale = time_remap_scale(property, state);
    if !doc.keys.is_empty() {
        property.remove_all_keys();
        for key in &doc.keys {
            decode_keyframe(key, property, scale)?;
            state.stats.key_count += 1;
        }
    } else if let Some(value) = &doc.value {
        property.remove_all_keys();
        property.set_value(decode_value(value, scale)?)?;
    }

    if let Some(expression) = &doc.expression {
        property.set_expression(expression)?;
    }
    if let Some(enabled) = doc.expression_enabled {
        property.expression_enabled = enabled;
    }
    if let Some(enabled) = doc.enabled {
        if enabled != property.enabled() {
            property.set_enabled(enabled)?;
        }
    }

    state.stats.property_count += 1;
    Ok(())
}
