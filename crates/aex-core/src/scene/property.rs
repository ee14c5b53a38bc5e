use super::templates::TemplateRegistry;
use super::text::TextDocument;
use super::SceneError;
use aex_data::constants::{interpolation, mask_mode, mask_motion_blur};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value category the host reports for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValueType {
    NoValue,
    ThreeDSpatial,
    ThreeD,
    TwoDSpatial,
    TwoD,
    OneD,
    Color,
    CustomValue,
    Marker,
    LayerIndex,
    MaskIndex,
    Shape,
    TextDocument,
    Dropdown,
}

impl PropertyValueType {
    pub fn is_spatial(self) -> bool {
        matches!(
            self,
            PropertyValueType::TwoDSpatial | PropertyValueType::ThreeDSpatial
        )
    }

    /// Vector length for vector-valued types.
    pub fn dimensions(self) -> Option<usize> {
        match self {
            PropertyValueType::TwoD | PropertyValueType::TwoDSpatial => Some(2),
            PropertyValueType::ThreeD | PropertyValueType::ThreeDSpatial => Some(3),
            PropertyValueType::Color => Some(4),
            _ => None,
        }
    }

    /// Number of ease entries per keyframe edge. Spatial properties ease
    /// along the path, so they keep one.
    pub fn ease_dimensions(self) -> usize {
        match self {
            PropertyValueType::TwoD => 2,
            PropertyValueType::ThreeD => 3,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum PropertyValue {
    None,
    Number(f64),
    Vector(Vec<f64>),
    Shape(Shape),
    TextDocument(Box<TextDocument>),
    Marker(Box<MarkerValue>),
    Custom(String), // opaque host blob
}

/// Bezier path with per-vertex feather data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shape {
    pub closed: bool,
    pub vertices: Vec<[f64; 2]>,
    pub in_tangents: Vec<[f64; 2]>,
    pub out_tangents: Vec<[f64; 2]>,
    pub feather_interps: Vec<u32>,
    pub feather_radii: Vec<f64>,
    pub feather_rel_corner_angles: Vec<f64>,
    pub feather_rel_seg_locs: Vec<f64>,
    pub feather_seg_locs: Vec<u32>,
    pub feather_tensions: Vec<f64>,
    pub feather_types: Vec<u32>,
}

impl Shape {
    fn validate(&self) -> Result<(), String> {
        let n = self.vertices.len();
        if self.in_tangents.len() != n || self.out_tangents.len() != n {
            return Err(format!(
                "{} vertices but {} in / {} out tangents",
                n,
                self.in_tangents.len(),
                self.out_tangents.len()
            ));
        }
        let feathers = [
            self.feather_interps.len(),
            self.feather_radii.len(),
            self.feather_rel_corner_angles.len(),
            self.feather_rel_seg_locs.len(),
            self.feather_seg_locs.len(),
            self.feather_tensions.len(),
            self.feather_types.len(),
        ];
        if feathers.iter().any(|&len| len != feathers[0]) {
            return Err("feather arrays differ in length".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerValue {
    pub comment: String,
    pub chapter: String,
    pub url: String,
    pub frame_target: String,
    pub cue_point_name: String,
    pub duration: f64,
    pub label: u32,
    pub protected_region: bool,
    pub parameters: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyframeEase {
    pub influence: f64, // percent
    pub speed: f64,
}

impl Default for KeyframeEase {
    fn default() -> Self {
        Self {
            influence: 16.666666667,
            speed: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f64,
    pub value: PropertyValue,
    pub in_interpolation: u32,
    pub out_interpolation: u32,
    pub in_ease: Vec<KeyframeEase>,
    pub out_ease: Vec<KeyframeEase>,
    pub in_spatial_tangent: Vec<f64>,
    pub out_spatial_tangent: Vec<f64>,
    pub temporal_auto_bezier: bool,
    pub temporal_continuous: bool,
    pub spatial_auto_bezier: bool,
    pub spatial_continuous: bool,
    pub roving: bool,
}

impl Keyframe {
    fn new(time: f64, value: PropertyValue, value_type: PropertyValueType) -> Self {
        let ease = vec![KeyframeEase::default(); value_type.ease_dimensions()];
        let tangent = if value_type.is_spatial() {
            vec![0.0; value_type.dimensions().unwrap_or(0)]
        } else {
            Vec::new()
        };
        Self {
            time,
            value,
            in_interpolation: interpolation::LINEAR,
            out_interpolation: interpolation::LINEAR,
            in_ease: ease.clone(),
            out_ease: ease,
            in_spatial_tangent: tangent.clone(),
            out_spatial_tangent: tangent,
            temporal_auto_bezier: false,
            temporal_continuous: false,
            spatial_auto_bezier: false,
            spatial_continuous: false,
            roving: false,
        }
    }
}

/// An animatable host property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub match_name: String,
    pub value_type: PropertyValueType,
    value: PropertyValue,
    default_value: PropertyValue,
    #[serde(default)]
    keys: Vec<Keyframe>,
    #[serde(default)]
    expression: String,
    #[serde(default)]
    pub expression_enabled: bool,
    #[serde(default = "yes")]
    pub can_set_expression: bool,
    #[serde(default = "yes")]
    enabled: bool,
    #[serde(default)]
    pub can_set_enabled: bool,
    #[serde(default)]
    pub menu_items: Vec<String>, // dropdown labels
}

fn yes() -> bool {
    true
}

impl Property {
    pub fn new(
        name: &str,
        match_name: &str,
        value_type: PropertyValueType,
        default_value: PropertyValue,
    ) -> Self {
        Self {
            name: name.to_string(),
            match_name: match_name.to_string(),
            value_type,
            value: default_value.clone(),
            default_value,
            keys: Vec::new(),
            expression: String::new(),
            expression_enabled: false,
            can_set_expression: !matches!(
                value_type,
                PropertyValueType::NoValue | PropertyValueType::CustomValue
            ),
            enabled: true,
            can_set_enabled: false,
            menu_items: Vec::new(),
        }
    }

    pub fn oned(name: &str, match_name: &str, default: f64) -> Self {
        Self::new(
            name,
            match_name,
            PropertyValueType::OneD,
            PropertyValue::Number(default),
        )
    }

    pub fn vector(name: &str, match_name: &str, value_type: PropertyValueType, default: &[f64]) -> Self {
        Self::new(name, match_name, value_type, PropertyValue::Vector(default.to_vec()))
    }

    pub fn dropdown(name: &str, match_name: &str, items: &[&str]) -> Self {
        let mut p = Self::new(
            name,
            match_name,
            PropertyValueType::Dropdown,
            PropertyValue::Number(1.0),
        );
        p.menu_items = items.iter().map(|s| s.to_string()).collect();
        p
    }

    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    pub fn default_value(&self) -> &PropertyValue {
        &self.default_value
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn num_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Whether anything about the property differs from a fresh instance.
    pub fn is_modified(&self) -> bool {
        !self.keys.is_empty() || self.value != self.default_value || !self.expression.is_empty()
    }

    fn invalid(&self, reason: impl Into<String>) -> SceneError {
        SceneError::InvalidValue {
            match_name: self.match_name.clone(),
            reason: reason.into(),
        }
    }

    fn check(&self, value: &PropertyValue) -> Result<(), SceneError> {
        use PropertyValueType as T;

        match (self.value_type, value) {
            (T::OneD | T::LayerIndex | T::MaskIndex, PropertyValue::Number(_)) => Ok(()),
            (T::Dropdown, PropertyValue::Number(n)) => {
                if n.fract() == 0.0 && *n >= 1.0 && (*n as usize) <= self.menu_items.len() {
                    Ok(())
                } else {
                    Err(self.invalid(format!(
                        "menu selection {n} outside 1..={}",
                        self.menu_items.len()
                    )))
                }
            }
            (t, PropertyValue::Vector(v)) if t.dimensions().is_some() => {
                if t.dimensions() == Some(v.len()) {
                    Ok(())
                } else {
                    Err(self.invalid(format!(
                        "expected {} components, got {}",
                        t.dimensions().unwrap_or(0),
                        v.len()
                    )))
                }
            }
            (T::Shape, PropertyValue::Shape(shape)) => shape.validate().map_err(|r| self.invalid(r)),
            (T::TextDocument, PropertyValue::TextDocument(_)) => Ok(()),
            (T::Marker, PropertyValue::Marker(_)) => Ok(()),
            (T::CustomValue, PropertyValue::Custom(_)) => Ok(()),
            (t, v) => Err(self.invalid(format!("{v:?} does not fit a {t:?} property"))),
        }
    }

    /// Sets the static value. Fails on keyframed properties.
    pub fn set_value(&mut self, value: PropertyValue) -> Result<(), SceneError> {
        if !self.keys.is_empty() {
            return Err(self.invalid("property is keyframed"));
        }
        self.check(&value)?;
        self.value = value;
        Ok(())
    }

    /// Adds a keyframe, or replaces the value of the one already at `time`.
    /// Returns the 0-based key index.
    pub fn set_value_at_time(&mut self, time: f64, value: PropertyValue) -> Result<usize, SceneError> {
        self.check(&value)?;
        if let Some(index) = self.keys.iter().position(|k| k.time == time) {
            self.keys[index].value = value;
            return Ok(index);
        }
        let index = self.keys.partition_point(|k| k.time < time);
        self.keys
            .insert(index, Keyframe::new(time, value, self.value_type));
        Ok(index)
    }

    pub fn remove_all_keys(&mut self) {
        self.keys.clear();
    }

    pub fn key(&self, index: usize) -> Result<&Keyframe, SceneError> {
        self.keys.get(index).ok_or_else(|| SceneError::MissingKey {
            match_name: self.match_name.clone(),
            index,
        })
    }

    fn key_mut(&mut self, index: usize) -> Result<&mut Keyframe, SceneError> {
        let match_name = self.match_name.clone();
        self.keys
            .get_mut(index)
            .ok_or(SceneError::MissingKey { match_name, index })
    }

    pub fn set_interpolation_type_at_key(
        &mut self,
        index: usize,
        in_type: u32,
        out_type: u32,
    ) -> Result<(), SceneError> {
        let valid = interpolation::LINEAR..=interpolation::HOLD;
        if !valid.contains(&in_type) || !valid.contains(&out_type) {
            return Err(self.invalid(format!(
                "unknown interpolation {in_type}/{out_type}"
            )));
        }
        let key = self.key_mut(index)?;
        key.in_interpolation = in_type;
        key.out_interpolation = out_type;
        Ok(())
    }

    pub fn set_temporal_ease_at_key(
        &mut self,
        index: usize,
        in_ease: Vec<KeyframeEase>,
        out_ease: Vec<KeyframeEase>,
    ) -> Result<(), SceneError> {
        let dims = self.value_type.ease_dimensions();
        if in_ease.len() != dims || out_ease.len() != dims {
            return Err(self.invalid(format!("temporal ease needs {dims} entries")));
        }
        let key = self.key_mut(index)?;
        key.in_ease = in_ease;
        key.out_ease = out_ease;
        Ok(())
    }

    pub fn set_spatial_tangents_at_key(
        &mut self,
        index: usize,
        in_tangent: Vec<f64>,
        out_tangent: Vec<f64>,
    ) -> Result<(), SceneError> {
        if !self.value_type.is_spatial() {
            return Err(self.invalid("spatial tangents on a non-spatial property"));
        }
        let dims = self.value_type.dimensions().unwrap_or(0);
        if in_tangent.len() != dims || out_tangent.len() != dims {
            return Err(self.invalid(format!("spatial tangents need {dims} components")));
        }
        let key = self.key_mut(index)?;
        key.in_spatial_tangent = in_tangent;
        key.out_spatial_tangent = out_tangent;
        Ok(())
    }

    /// Sets the auto-bezier, continuity and roving flags of a key.
    pub fn set_key_flags(
        &mut self,
        index: usize,
        apply: impl FnOnce(&mut Keyframe),
    ) -> Result<(), SceneError> {
        let spatial = self.value_type.is_spatial();
        let key = self.key_mut(index)?;
        apply(key);
        if !spatial {
            key.spatial_auto_bezier = false;
            key.spatial_continuous = false;
            key.roving = false;
        }
        Ok(())
    }

    pub fn set_expression(&mut self, expression: &str) -> Result<(), SceneError> {
        if !self.can_set_expression {
            return Err(self.invalid("property does not accept expressions"));
        }
        self.expression = expression.to_string();
        self.expression_enabled = !expression.is_empty();
        Ok(())
    }

    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), SceneError> {
        if !self.can_set_enabled {
            return Err(SceneError::GuardedAccess {
                attribute: "enabled",
                flag: "canSetEnabled",
            });
        }
        self.enabled = enabled;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// Fixed children identified by matchName.
    Named,
    /// User-populated list (effects, masks, shape contents).
    Indexed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskAttributes {
    pub mask_mode: u32,
    pub inverted: bool,
    pub roto_bezier: bool,
    pub mask_motion_blur: u32,
    pub locked: bool,
    pub color: Vec<f64>,
}

impl Default for MaskAttributes {
    fn default() -> Self {
        Self {
            mask_mode: mask_mode::ADD,
            inverted: false,
            roto_bezier: false,
            mask_motion_blur: mask_motion_blur::SAME_AS_LAYER,
            locked: false,
            color: vec![0.0, 0.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyGroup {
    pub name: String,
    pub match_name: String,
    pub grouping: Grouping,
    pub enabled: bool,
    pub can_set_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<MaskAttributes>,
    #[serde(default)]
    pub children: Vec<PropertyBase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum PropertyBase {
    Property(Property),
    Group(PropertyGroup),
}

impl PropertyBase {
    pub fn match_name(&self) -> &str {
        match self {
            PropertyBase::Property(p) => &p.match_name,
            PropertyBase::Group(g) => &g.match_name,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PropertyBase::Property(p) => &p.name,
            PropertyBase::Group(g) => &g.name,
        }
    }
}

impl PropertyGroup {
    fn with_grouping(name: &str, match_name: &str, grouping: Grouping) -> Self {
        Self {
            name: name.to_string(),
            match_name: match_name.to_string(),
            grouping,
            enabled: true,
            can_set_enabled: false,
            mask: None,
            children: Vec::new(),
        }
    }

    pub fn named(name: &str, match_name: &str) -> Self {
        Self::with_grouping(name, match_name, Grouping::Named)
    }

    pub fn indexed(name: &str, match_name: &str) -> Self {
        Self::with_grouping(name, match_name, Grouping::Indexed)
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.children.push(PropertyBase::Property(property));
        self
    }

    pub fn with_group(mut self, group: PropertyGroup) -> Self {
        self.children.push(PropertyBase::Group(group));
        self
    }

    pub fn enableable(mut self) -> Self {
        self.can_set_enabled = true;
        self
    }

    pub fn is_indexed(&self) -> bool {
        self.grouping == Grouping::Indexed
    }

    pub fn num_properties(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, match_name: &str) -> Option<&PropertyBase> {
        self.children.iter().find(|c| c.match_name() == match_name)
    }

    pub fn group(&self, match_name: &str) -> Option<&PropertyGroup> {
        self.children.iter().find_map(|c| match c {
            PropertyBase::Group(g) if g.match_name == match_name => Some(g),
            _ => None,
        })
    }

    pub fn group_mut(&mut self, match_name: &str) -> Option<&mut PropertyGroup> {
        self.children.iter_mut().find_map(|c| match c {
            PropertyBase::Group(g) if g.match_name == match_name => Some(g),
            _ => None,
        })
    }

    pub fn property(&self, match_name: &str) -> Option<&Property> {
        self.children.iter().find_map(|c| match c {
            PropertyBase::Property(p) if p.match_name == match_name => Some(p),
            _ => None,
        })
    }

    pub fn property_mut(&mut self, match_name: &str) -> Option<&mut Property> {
        self.children.iter_mut().find_map(|c| match c {
            PropertyBase::Property(p) if p.match_name == match_name => Some(p),
            _ => None,
        })
    }

    /// Depth-first search for the first property with this matchName.
    pub fn find_property(&self, match_name: &str) -> Option<&Property> {
        self.children.iter().find_map(|c| match c {
            PropertyBase::Property(p) if p.match_name == match_name => Some(p),
            PropertyBase::Property(_) => None,
            PropertyBase::Group(g) => g.find_property(match_name),
        })
    }

    pub fn find_property_mut(&mut self, match_name: &str) -> Option<&mut Property> {
        self.children.iter_mut().find_map(|c| match c {
            PropertyBase::Property(p) if p.match_name == match_name => Some(p),
            PropertyBase::Property(_) => None,
            PropertyBase::Group(g) => g.find_property_mut(match_name),
        })
    }

    /// Follows a matchName path down from this group.
    pub fn at_path(&self, path: &[String]) -> Option<&PropertyBase> {
        let (first, rest) = path.split_first()?;
        let child = self.child(first)?;
        match (child, rest.is_empty()) {
            (_, true) => Some(child),
            (PropertyBase::Group(g), false) => g.at_path(rest),
            (PropertyBase::Property(_), false) => None,
        }
    }

    pub fn at_path_mut(&mut self, path: &[String]) -> Option<&mut PropertyBase> {
        let (first, rest) = path.split_first()?;
        let child = self.children.iter_mut().find(|c| c.match_name() == first)?;
        if rest.is_empty() {
            return Some(child);
        }
        match child {
            PropertyBase::Group(g) => g.at_path_mut(rest),
            PropertyBase::Property(_) => None,
        }
    }

    /// Appends a new child built from the host template for `match_name`.
    pub fn add_property(&mut self, match_name: &str) -> Result<&mut PropertyGroup, SceneError> {
        if !self.is_indexed() {
            return Err(SceneError::NotIndexed(self.match_name.clone()));
        }
        let template = TemplateRegistry::global()
            .group(match_name)
            .ok_or_else(|| SceneError::UnknownTemplate(match_name.to_string()))?;
        self.children.push(PropertyBase::Group(template));
        match self.children.last_mut() {
            Some(PropertyBase::Group(g)) => Ok(g),
            _ => Err(SceneError::UnknownTemplate(match_name.to_string())),
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), SceneError> {
        if !self.can_set_enabled {
            return Err(SceneError::GuardedAccess {
                attribute: "enabled",
                flag: "canSetEnabled",
            });
        }
        self.enabled = enabled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::match_names as mn;

    fn position() -> Property {
        Property::vector(
            "Position",
            mn::POSITION,
            PropertyValueType::ThreeDSpatial,
            &[0.0, 0.0, 0.0],
        )
    }

    #[test]
    fn modified_tracks_value_keys_and_expression() {
        let mut p = position();
        assert!(!p.is_modified());
        p.set_value(PropertyValue::Vector(vec![0.0, 0.0, 0.0])).unwrap();
        assert!(!p.is_modified());
        p.set_expression("wiggle(1, 2)").unwrap();
        assert!(p.is_modified());
    }

    #[test]
    fn setters_check_dimensions() {
        let mut p = position();
        let err = p.set_value(PropertyValue::Vector(vec![1.0, 2.0])).unwrap_err();
        assert!(matches!(err, SceneError::InvalidValue { .. }));
        assert!(p.set_value(PropertyValue::Number(1.0)).is_err());
    }

    #[test]
    fn keys_stay_sorted_and_replace_on_same_time() {
        let mut p = Property::oned("Opacity", mn::OPACITY, 100.0);
        assert_eq!(p.set_value_at_time(2.0, PropertyValue::Number(0.0)).unwrap(), 0);
        assert_eq!(p.set_value_at_time(1.0, PropertyValue::Number(50.0)).unwrap(), 0);
        assert_eq!(p.set_value_at_time(2.0, PropertyValue::Number(10.0)).unwrap(), 1);
        assert_eq!(p.num_keys(), 2);
        assert_eq!(p.key(1).unwrap().value, PropertyValue::Number(10.0));
        assert!(p.set_value(PropertyValue::Number(1.0)).is_err());
    }

    #[test]
    fn new_keys_carry_host_defaults() {
        let mut p = position();
        p.set_value_at_time(0.0, PropertyValue::Vector(vec![1.0, 2.0, 3.0]))
            .unwrap();
        let key = p.key(0).unwrap();
        assert_eq!(key.in_interpolation, interpolation::LINEAR);
        assert_eq!(key.in_ease, vec![KeyframeEase::default()]);
        assert_eq!(key.in_spatial_tangent, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn ease_length_follows_dimensions() {
        let mut scale = Property::vector("Scale", mn::SCALE, PropertyValueType::ThreeD, &[100.0; 3]);
        scale
            .set_value_at_time(0.0, PropertyValue::Vector(vec![50.0; 3]))
            .unwrap();
        let one = vec![KeyframeEase::default()];
        assert!(scale.set_temporal_ease_at_key(0, one.clone(), one).is_err());
        let three = vec![KeyframeEase::default(); 3];
        assert!(scale.set_temporal_ease_at_key(0, three.clone(), three).is_ok());
    }

    #[test]
    fn dropdown_selection_is_bounded() {
        let mut p = Property::dropdown("Menu", "ADBE Dropdown Control-0001", &["A", "B"]);
        assert!(p.set_value(PropertyValue::Number(2.0)).is_ok());
        assert!(p.set_value(PropertyValue::Number(3.0)).is_err());
        assert!(p.set_value(PropertyValue::Number(0.0)).is_err());
    }

    #[test]
    fn paths_and_depth_first_lookup() {
        let root = PropertyGroup::named("Root", "root").with_group(
            PropertyGroup::named("Transform", mn::TRANSFORM).with_property(position()),
        );
        assert!(root.find_property(mn::POSITION).is_some());
        let path = vec![mn::TRANSFORM.to_string(), mn::POSITION.to_string()];
        assert!(matches!(root.at_path(&path), Some(PropertyBase::Property(_))));
        assert!(root.at_path(&[mn::POSITION.to_string()]).is_none());
    }

    #[test]
    fn only_indexed_groups_accept_new_children() {
        let mut named = PropertyGroup::named("Transform", mn::TRANSFORM);
        assert!(matches!(
            named.add_property(mn::SLIDER_CONTROL),
            Err(SceneError::NotIndexed(_))
        ));

        let mut effects = PropertyGroup::indexed("Effects", mn::EFFECTS);
        let slider = effects.add_property(mn::SLIDER_CONTROL).unwrap();
        assert_eq!(slider.match_name, mn::SLIDER_CONTROL);
        assert!(matches!(
            effects.add_property("ADBE Nonexistent"),
            Err(SceneError::UnknownTemplate(_))
        ));
    }
}
