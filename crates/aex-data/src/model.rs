use crate::tags::{self, NodeCategory};
use schemars::JsonSchema;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

pub type Vec2 = [f64; 2];

// Type tags

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum ProjectType {
    #[default]
    #[serde(rename = "aex:project")]
    Project,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum CompType {
    #[default]
    #[serde(rename = "aex:item:av:comp")]
    Comp,
}

/// Non-comp item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum ItemType {
    #[serde(rename = "aex:item:av:footage:file")]
    FileFootage,
    #[default]
    #[serde(rename = "aex:item:av:footage:solid")]
    Solid,
    #[serde(rename = "aex:item:av:footage:placeholder")]
    Placeholder,
    #[serde(rename = "aex:item:folder")]
    Folder,
}

impl ItemType {
    pub fn tag(self) -> &'static str {
        match self {
            ItemType::FileFootage => tags::FILE_FOOTAGE_ITEM,
            ItemType::Solid => tags::SOLID_ITEM,
            ItemType::Placeholder => tags::PLACEHOLDER_ITEM,
            ItemType::Folder => tags::FOLDER_ITEM,
        }
    }

    /// Human label written to `itemType`.
    pub fn label(self) -> &'static str {
        match self {
            ItemType::FileFootage => "Footage",
            ItemType::Solid => "Solid",
            ItemType::Placeholder => "Placeholder",
            ItemType::Folder => "Folder",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum LayerType {
    #[default]
    #[serde(rename = "aex:layer:av")]
    Av,
    #[serde(rename = "aex:layer:av:shape")]
    Shape,
    #[serde(rename = "aex:layer:av:text")]
    Text,
    #[serde(rename = "aex:layer:camera")]
    Camera,
    #[serde(rename = "aex:layer:light")]
    Light,
    #[serde(rename = "aex:layer:null")]
    Null,
}

impl LayerType {
    pub fn tag(self) -> &'static str {
        match self {
            LayerType::Av => tags::AV_LAYER,
            LayerType::Shape => tags::SHAPE_LAYER,
            LayerType::Text => tags::TEXT_LAYER,
            LayerType::Camera => tags::CAMERA_LAYER,
            LayerType::Light => tags::LIGHT_LAYER,
            LayerType::Null => tags::NULL_LAYER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum GroupType {
    #[default]
    #[serde(rename = "aex:propertygroup")]
    Group,
    #[serde(rename = "aex:propertygroup:layerstyle")]
    LayerStyle,
    #[serde(rename = "aex:propertygroup:mask")]
    Mask,
}

impl GroupType {
    pub fn tag(self) -> &'static str {
        match self {
            GroupType::Group => tags::PROPERTY_GROUP,
            GroupType::LayerStyle => tags::LAYER_STYLE_GROUP,
            GroupType::Mask => tags::MASK_GROUP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum PropertyType {
    #[default]
    #[serde(rename = "aex:property:oned")]
    OneD,
    #[serde(rename = "aex:property:twod")]
    TwoD,
    #[serde(rename = "aex:property:threed")]
    ThreeD,
    #[serde(rename = "aex:property:color")]
    Color,
    #[serde(rename = "aex:property:shape")]
    Shape,
    #[serde(rename = "aex:property:textdocument")]
    TextDocument,
    #[serde(rename = "aex:property:maskindex")]
    MaskIndex,
    #[serde(rename = "aex:property:marker")]
    Marker,
    #[serde(rename = "aex:property:dropdown")]
    Dropdown,
    #[serde(rename = "aex:property:layerindex")]
    LayerIndex,
    #[serde(rename = "aex:property:custom")]
    Custom,
    #[serde(rename = "aex:property:novalue")]
    NoValue,
}

impl PropertyType {
    pub fn tag(self) -> &'static str {
        match self {
            PropertyType::OneD => tags::ONED_PROPERTY,
            PropertyType::TwoD => tags::TWOD_PROPERTY,
            PropertyType::ThreeD => tags::THREED_PROPERTY,
            PropertyType::Color => tags::COLOR_PROPERTY,
            PropertyType::Shape => tags::SHAPE_PROPERTY,
            PropertyType::TextDocument => tags::TEXT_DOCUMENT_PROPERTY,
            PropertyType::MaskIndex => tags::MASK_INDEX_PROPERTY,
            PropertyType::Marker => tags::MARKER_PROPERTY,
            PropertyType::Dropdown => tags::DROPDOWN_PROPERTY,
            PropertyType::LayerIndex => tags::LAYER_INDEX_PROPERTY,
            PropertyType::Custom => tags::CUSTOM_PROPERTY,
            PropertyType::NoValue => tags::NO_VALUE_PROPERTY,
        }
    }
}

// Top-level nodes

/// Any document node, discriminated by its `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum AexNode {
    Project(Box<AexProject>),
    Comp(Box<AexComp>),
    Item(Box<AexItem>),
    Layer(Box<AexLayer>),
    Mask(Box<AexMask>),
    Group(Box<AexPropertyGroup>),
    Property(Box<AexProperty>),
}

impl AexNode {
    /// Decodes a node by reading its tag first. Unknown tags are rejected
    /// before the payload is looked at.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let tag = type_tag(&value)?;
        let category = NodeCategory::of(&tag)
            .ok_or_else(|| serde_json::Error::custom(format!("unknown node type '{tag}'")))?;

        Ok(match category {
            NodeCategory::Project => AexNode::Project(serde_json::from_value(value)?),
            NodeCategory::Comp => AexNode::Comp(serde_json::from_value(value)?),
            NodeCategory::Item => AexNode::Item(serde_json::from_value(value)?),
            NodeCategory::Layer => AexNode::Layer(serde_json::from_value(value)?),
            NodeCategory::PropertyGroup if tag == tags::MASK_GROUP => {
                AexNode::Mask(serde_json::from_value(value)?)
            }
            NodeCategory::PropertyGroup => AexNode::Group(serde_json::from_value(value)?),
            NodeCategory::Property => AexNode::Property(serde_json::from_value(value)?),
        })
    }

    pub fn type_tag(&self) -> &'static str {
        match self {
            AexNode::Project(_) => tags::PROJECT,
            AexNode::Comp(_) => tags::COMP_ITEM,
            AexNode::Item(item) => item.kind.tag(),
            AexNode::Layer(layer) => layer.kind.tag(),
            AexNode::Mask(_) => tags::MASK_GROUP,
            AexNode::Group(group) => match group.kind {
                GroupType::Group => tags::PROPERTY_GROUP,
                GroupType::LayerStyle => tags::LAYER_STYLE_GROUP,
                GroupType::Mask => tags::MASK_GROUP,
            },
            AexNode::Property(property) => property.kind.tag(),
        }
    }
}

impl<'de> Deserialize<'de> for AexNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = serde_json::Value::deserialize(deserializer)?;
        AexNode::from_value(v).map_err(D::Error::custom)
    }
}

fn type_tag(value: &serde_json::Value) -> Result<String, serde_json::Error> {
    value
        .get("type")
        .and_then(|t| t.as_str())
        .map(str::to_owned)
        .ok_or_else(|| serde_json::Error::custom("node has no 'type' tag"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexProject {
    #[serde(rename = "type")]
    pub kind: ProjectType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits_per_channel: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linear_blending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linearize_working_space: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_gamma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_space: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_start_frame: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_display_type: Option<u32>,
    #[serde(default)]
    pub items: Vec<AexItem>, // non-comp items, project order
    #[serde(default)]
    pub comps: Vec<AexComp>,
}

/// Folder and footage items. Comps have their own record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexItem {
    #[serde(rename = "type")]
    pub kind: ItemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>, // informational; the tag is authoritative
    #[serde(default)]
    pub aexid: String,
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<u32>,
    #[serde(default)]
    pub folder: Vec<String>, // innermost folder first

    // AV
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_aspect: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    // Footage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha_mode: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conform_frame_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_separation_type: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_quality_field_separation: Option<bool>,
    #[serde(rename = "loop", skip_serializing_if = "Option::is_none")]
    pub loop_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premul_color: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_pulldown: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invert_alpha: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>, // file footage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<f64>>, // solids
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexComp {
    #[serde(rename = "type")]
    pub kind: CompType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default)]
    pub aexid: String,
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<u32>,
    #[serde(default)]
    pub folder: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_aspect: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_start_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft3d: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_frame: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_blending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_shy_layers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion_blur: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion_blur_adaptive_sample_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion_blur_samples_per_frame: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_nested_frame_rate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_nested_resolution: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renderer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_factor: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutter_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutter_phase: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_area_start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_area_duration: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<AexMarker>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<AexLayer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexLayer {
    #[serde(rename = "type")]
    pub kind: LayerType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_video: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_point: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_point: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stretch: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_layer_index: Option<usize>, // 1-based
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<AexMarker>,
    #[serde(default, skip_serializing_if = "AexTransform::is_empty")]
    pub transform: AexTransform,

    // AV, shape, text, null
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment_layer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_orient: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blending_mode: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapse_transformation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_layer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_blending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_blending_type: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide_layer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion_blur: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_transparency: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_quality: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub three_d_layer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_remap_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_matte_type: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>, // aexid of the footage or comp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_remap: Option<AexProperty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub masks: Vec<AexMask>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<AexPropertyGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trackers: Vec<AexPropertyGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer_styles: Option<AexPropertyGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<AexPropertyGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry_option: Option<AexPropertyGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_option: Option<AexPropertyGroup>,

    // Shape
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<AexPropertyGroup>,

    // Text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub three_d_per_char: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_text: Option<AexProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_option: Option<AexPropertyGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_option: Option<AexPropertyGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animators: Option<AexPropertyGroup>,

    // Light
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_type: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_option: Option<AexPropertyGroup>,

    // Camera
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_option: Option<AexPropertyGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexTransform {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_point: Option<AexProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_of_interest: Option<AexProperty>, // camera and light
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<AexProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<AexProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<AexProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_rotation: Option<AexProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_rotation: Option<AexProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_rotation: Option<AexProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<AexProperty>, // 2D layers only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<AexProperty>,
}

impl AexTransform {
    pub fn is_empty(&self) -> bool {
        self == &AexTransform::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexMask {
    #[serde(rename = "type")]
    pub kind: GroupType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_mode: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roto_bezier: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_motion_blur: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_path: Option<AexProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_feather: Option<AexProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_opacity: Option<AexProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_expansion: Option<AexProperty>,
}

// Property groups

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexPropertyGroup {
    #[serde(rename = "type")]
    pub kind: GroupType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub match_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<AexPropertyNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<AexPropertyGroup>, // nested shape groups
}

/// A child of a property group.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum AexPropertyNode {
    Property(AexProperty),
    Group(AexPropertyGroup),
}

impl AexPropertyNode {
    pub fn match_name(&self) -> &str {
        match self {
            AexPropertyNode::Property(p) => &p.match_name,
            AexPropertyNode::Group(g) => &g.match_name,
        }
    }
}

impl<'de> Deserialize<'de> for AexPropertyNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = serde_json::Value::deserialize(deserializer)?;
        let tag = type_tag(&v).map_err(D::Error::custom)?;

        match NodeCategory::of(&tag) {
            Some(NodeCategory::Property) => serde_json::from_value(v)
                .map(AexPropertyNode::Property)
                .map_err(D::Error::custom),
            Some(NodeCategory::PropertyGroup) => serde_json::from_value(v)
                .map(AexPropertyNode::Group)
                .map_err(D::Error::custom),
            _ => Err(D::Error::custom(format!(
                "'{tag}' cannot appear inside a property group"
            ))),
        }
    }
}

// Properties

#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexProperty {
    #[serde(rename = "type")]
    pub kind: PropertyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub match_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>, // dropdown menu labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<AexValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<AexKeyframe>,
}

/// Wire shape of a property before `value` is typed by the tag.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProperty {
    #[serde(rename = "type")]
    kind: PropertyType,
    name: Option<String>,
    match_name: String,
    enabled: Option<bool>,
    expression: Option<String>,
    expression_enabled: Option<bool>,
    items: Option<Vec<String>>,
    value: Option<serde_json::Value>,
    #[serde(default)]
    keys: Vec<RawKeyframe>,
}

#[derive(Deserialize)]
struct RawKeyframe {
    time: f64,
    value: serde_json::Value,
    #[serde(flatten)]
    attributes: AexKeyframeAttributes,
}

impl<'de> Deserialize<'de> for AexProperty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawProperty::deserialize(deserializer)?;
        let kind = raw.kind;

        let value = match raw.value {
            Some(v) if !v.is_null() => Some(AexValue::from_json(kind, v).map_err(D::Error::custom)?),
            _ => None,
        };
        let keys = raw
            .keys
            .into_iter()
            .map(|k| {
                Ok(AexKeyframe {
                    time: k.time,
                    value: AexValue::from_json(kind, k.value)?,
                    attributes: k.attributes,
                })
            })
            .collect::<Result<Vec<_>, serde_json::Error>>()
            .map_err(D::Error::custom)?;

        Ok(AexProperty {
            kind,
            name: raw.name,
            match_name: raw.match_name,
            enabled: raw.enabled,
            expression: raw.expression,
            expression_enabled: raw.expression_enabled,
            items: raw.items,
            value,
            keys,
        })
    }
}

/// Property value union. Which variant a JSON value decodes to is decided by
/// the owning property's tag, never by the value's shape.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum AexValue {
    Scalar(f64),
    Vector(Vec<f64>),
    Shape(Box<AexShape>),
    TextDocument(Box<AexTextDocument>),
    Markers(Vec<AexMarker>),
}

impl AexValue {
    pub fn from_json(kind: PropertyType, v: serde_json::Value) -> Result<Self, serde_json::Error> {
        match kind {
            PropertyType::OneD
            | PropertyType::MaskIndex
            | PropertyType::Dropdown
            | PropertyType::LayerIndex => Ok(AexValue::Scalar(serde_json::from_value(v)?)),
            PropertyType::TwoD | PropertyType::ThreeD | PropertyType::Color => {
                Ok(AexValue::Vector(serde_json::from_value(v)?))
            }
            PropertyType::Shape => Ok(AexValue::Shape(serde_json::from_value(v)?)),
            PropertyType::TextDocument => Ok(AexValue::TextDocument(serde_json::from_value(v)?)),
            PropertyType::Marker => Ok(AexValue::Markers(serde_json::from_value(v)?)),
            PropertyType::Custom | PropertyType::NoValue => Err(serde_json::Error::custom(format!(
                "'{}' properties carry no value",
                kind.tag()
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexKeyframe {
    pub time: f64,
    pub value: AexValue,
    #[serde(flatten)]
    pub attributes: AexKeyframeAttributes,
}

/// Everything about a keyframe except its time and value. Each field is
/// elided independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexKeyframeAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpolation_type: Option<AexInterpolationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal_ease: Option<AexTemporalEase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial_tangent: Option<AexSpatialTangent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal_auto_bezier: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal_continuous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial_auto_bezier: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial_continuous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roving: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexInterpolationType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_type: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_type: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexTemporalEase {
    pub in_ease: Vec<AexEase>,
    pub out_ease: Vec<AexEase>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AexEase {
    pub influence: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexSpatialTangent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_tangent: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_tangent: Option<Vec<f64>>,
}

// Value payloads

/// Shape path. Every array is always written, index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexShape {
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub vertices: Vec<Vec2>,
    #[serde(default)]
    pub in_tangents: Vec<Vec2>,
    #[serde(default)]
    pub out_tangents: Vec<Vec2>,
    #[serde(default)]
    pub feather_interps: Vec<u32>,
    #[serde(default)]
    pub feather_radii: Vec<f64>,
    #[serde(default)]
    pub feather_rel_corner_angles: Vec<f64>,
    #[serde(default)]
    pub feather_rel_seg_locs: Vec<f64>,
    #[serde(default)]
    pub feather_seg_locs: Vec<u32>,
    #[serde(default)]
    pub feather_tensions: Vec<f64>,
    #[serde(default)]
    pub feather_types: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexTextDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_caps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_stroke: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_locs: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_shift: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_text: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_text_pos: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_text_size: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faux_bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faux_italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_caps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_over_fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscript: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superscript: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_scale: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AexMarker {
    pub time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cue_point_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected_region: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Map<String, serde_json::Value>>,
}
