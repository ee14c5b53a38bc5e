//! Mask encode/decode. Masks are entries of the layer's indexed mask
//! group carrying host mask attributes next to their four properties.

use crate::error::AexError;
use crate::normalize::{modified, Rounded};
use crate::property::{decode_property, encode_property};
use crate::scene::match_names as mn;
use crate::scene::{MaskAttributes, PropertyBase, PropertyGroup};
use crate::state::AexState;
use aex_data::model::{AexMask, AexProperty, GroupType};

fn encode_child(
    atom: &PropertyGroup,
    match_name: &str,
    state: &mut AexState,
) -> Result<Option<AexProperty>, AexError> {
    match atom.property(match_name) {
        Some(p) => encode_property(p, state),
        None => Ok(None),
    }
}

pub fn encode_mask(atom: &PropertyGroup, state: &mut AexState) -> Result<AexMask, AexError> {
    let d = MaskAttributes::default();
    let attrs = atom.mask.clone().unwrap_or_default();

    Ok(AexMask {
        kind: GroupType::Mask,
        name: Some(atom.name.clone()),
        color: Some(attrs.color.rounded()),
        mask_mode: modified(attrs.mask_mode, d.mask_mode),
        inverted: modified(attrs.inverted, d.inverted),
        roto_bezier: modified(attrs.roto_bezier, d.roto_bezier),
        mask_motion_blur: modified(attrs.mask_motion_blur, d.mask_motion_blur),
        locked: modified(attrs.locked, d.locked),
        mask_path: encode_child(atom, mn::MASK_SHAPE, state)?,
        mask_feather: encode_child(atom, mn::MASK_FEATHER, state)?,
        mask_opacity: encode_child(atom, mn::MASK_OPACITY, state)?,
        mask_expansion: encode_child(atom, mn::MASK_EXPANSION, state)?,
    })
}

/// All masks of a layer, in order.
pub fn encode_masks(
    masks: Option<&PropertyGroup>,
    state: &mut AexState,
) -> Result<Vec<AexMask>, AexError> {
    let Some(masks) = masks else {
        return Ok(Vec::new());
    };
    masks
        .children
        .iter()
        .filter_map(|c| match c {
            PropertyBase::Group(g) if g.mask.is_some() => Some(g),
            _ => None,
        })
        .map(|g| encode_mask(g, state))
        .collect()
}

fn decode_child(
    doc: Option<&AexProperty>,
    atom: &mut PropertyGroup,
    match_name: &str,
    state: &mut AexState,
) -> Result<(), AexError> {
    let Some(doc) = doc else {
        return Ok(());
    };
    let property = atom
        .property_mut(match_name)
        .ok_or_else(|| AexError::PropertyNotFound(match_name.to_string()))?;
    decode_property(doc, property, state)
}

pub fn decode_mask(doc: &AexMask, atom: &mut PropertyGroup, state: &mut AexState) -> Result<(), AexError> {
    if let Some(name) = &doc.name {
        atom.name = name.clone();
    }
    let attrs = atom.mask.get_or_insert_with(MaskAttributes::default);
    if let Some(color) = &doc.color {
        attrs.color = color.clone();
    }
    if let Some(mode) = doc.mask_mode {
        attrs.mask_mode = mode;
    }
    if let Some(inverted) = doc.inverted {
        attrs.inverted = inverted;
    }
    if let Some(roto_bezier) = doc.roto_bezier {
        attrs.roto_bezier = roto_bezier;
    }
    if let Some(blur) = doc.mask_motion_blur {
        attrs.mask_motion_blur = blur;
    }
    if let Some(locked) = doc.locked {
        attrs.locked = locked;
    }

    decode_child(doc.mask_path.as_ref(), atom, mn::MASK_SHAPE, state)?;
    decode_child(doc.mask_feather.as_ref(), atom, mn::MASK_FEATHER, state)?;
    decode_child(doc.mask_opacity.as_ref(), atom, mn::MASK_OPACITY, state)?;
    decode_child(doc.mask_expansion.as_ref(), atom, mn::MASK_EXPANSION, state)?;
    Ok(())
}

/// Applies masks by position, adding masks the layer does not have yet.
pub fn decode_masks(
    docs: &[AexMask],
    masks: &mut PropertyGroup,
    state: &mut AexState,
) -> Result<(), AexError> {
    for (i, doc) in docs.iter().enumerate() {
        if i >= masks.children.len() {
            masks.add_property(mn::MASK_ATOM)?;
        }
        match &mut masks.children[i] {
            PropertyBase::Group(atom) if atom.mask.is_some() => decode_mask(doc, atom, state)?,
            other => {
                return Err(AexError::cannot_update(other.match_name(), GroupType::Mask.tag()))
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Layer, PropertyValue, Shape};
    use aex_data::constants::mask_mode;

    fn triangle() -> Shape {
        Shape {
            closed: true,
            vertices: vec![[0.0, 0.0], [100.0, 0.0], [50.0, 80.0]],
            in_tangents: vec![[0.0, 0.0]; 3],
            out_tangents: vec![[0.0, 0.0]; 3],
            ..Shape::default()
        }
    }

    #[test]
    fn masks_round_trip_through_a_fresh_layer() {
        let mut state = AexState::default();
        let mut src = Layer::null("Source", 5.0);
        let masks = src.root.group_mut(mn::MASKS).unwrap();
        let atom = masks.add_property(mn::MASK_ATOM).unwrap();
        atom.name = "Cutout".into();
        if let Some(attrs) = atom.mask.as_mut() {
            attrs.mask_mode = mask_mode::SUBTRACT;
            attrs.inverted = true;
        }
        atom.property_mut(mn::MASK_SHAPE)
            .unwrap()
            .set_value(PropertyValue::Shape(triangle()))
            .unwrap();

        let docs = encode_masks(src.root.group(mn::MASKS), &mut state).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name.as_deref(), Some("Cutout"));
        assert_eq!(docs[0].color, Some(vec![0.0, 0.0, 1.0]));
        assert_eq!(docs[0].mask_mode, Some(mask_mode::SUBTRACT));
        assert!(docs[0].mask_opacity.is_none());

        let mut dst = Layer::null("Target", 5.0);
        decode_masks(&docs, dst.root.group_mut(mn::MASKS).unwrap(), &mut state).unwrap();
        let again = encode_masks(dst.root.group(mn::MASKS), &mut state).unwrap();
        assert_eq!(again, docs);
    }
}
