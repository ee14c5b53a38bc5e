use super::layer::Layer;
use super::match_names as mn;
use super::property::{Property, PropertyValue, PropertyValueType};
use super::SceneError;
use aex_data::constants::{alpha_mode, field_separation, pulldown_phase};
use serde::{Deserialize, Serialize};

/// Session-scoped numeric item id.
pub type ItemId = u32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default = "default_label")]
    pub label: u32,
    #[serde(default)]
    pub parent_folder: Option<ItemId>, // None = root folder
    pub kind: ItemKind,
}

fn default_label() -> u32 {
    15
}

impl Item {
    pub fn new(id: ItemId, name: &str, kind: ItemKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            comment: String::new(),
            label: default_label(),
            parent_folder: None,
            kind,
        }
    }

    pub fn av(&self) -> Option<&AvAttributes> {
        match &self.kind {
            ItemKind::Folder => None,
            ItemKind::Footage(f) => Some(&f.av),
            ItemKind::Comp(c) => Some(&c.av),
        }
    }

    pub fn av_mut(&mut self) -> Option<&mut AvAttributes> {
        match &mut self.kind {
            ItemKind::Folder => None,
            ItemKind::Footage(f) => Some(&mut f.av),
            ItemKind::Comp(c) => Some(&mut c.av),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    Folder,
    Footage(FootageItem),
    Comp(Box<CompItem>),
}

/// Attributes shared by every audio/visual item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvAttributes {
    pub width: u32,
    pub height: u32,
    pub pixel_aspect: f64,
    pub frame_rate: f64,
    pub duration: f64, // seconds
}

impl Default for AvAttributes {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            pixel_aspect: 1.0,
            frame_rate: 30.0,
            duration: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FootageSource {
    File { path: String },
    Solid { color: Vec<f64> },
    Placeholder,
    /// A source kind the codec has no document form for (e.g. an image
    /// sequence proxy).
    Unknown { description: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootageItem {
    pub av: AvAttributes,
    pub source: FootageSource,
    pub alpha_mode: u32,
    pub conform_frame_rate: f64,
    pub field_separation_type: u32,
    pub high_quality_field_separation: bool,
    pub loop_count: u32,
    pub premul_color: Vec<f64>,
    pub remove_pulldown: u32,
    pub has_alpha: bool,
    invert_alpha: bool,
}

impl FootageItem {
    pub fn new(av: AvAttributes, source: FootageSource) -> Self {
        Self {
            av,
            source,
            alpha_mode: alpha_mode::STRAIGHT,
            conform_frame_rate: 0.0,
            field_separation_type: field_separation::OFF,
            high_quality_field_separation: false,
            loop_count: 1,
            premul_color: vec![0.0, 0.0, 0.0],
            remove_pulldown: pulldown_phase::OFF,
            has_alpha: false,
            invert_alpha: false,
        }
    }

    fn alpha_is_interpreted(&self) -> bool {
        self.has_alpha && self.alpha_mode != alpha_mode::IGNORE
    }

    /// Only meaningful for footage with an interpreted alpha channel.
    pub fn invert_alpha(&self) -> Result<bool, SceneError> {
        if !self.alpha_is_interpreted() {
            return Err(SceneError::GuardedAccess {
                attribute: "invertAlpha",
                flag: "hasAlpha",
            });
        }
        Ok(self.invert_alpha)
    }

    pub fn set_invert_alpha(&mut self, value: bool) -> Result<(), SceneError> {
        if !self.alpha_is_interpreted() {
            return Err(SceneError::GuardedAccess {
                attribute: "invertAlpha",
                flag: "hasAlpha",
            });
        }
        self.invert_alpha = value;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompItem {
    pub av: AvAttributes,
    pub bg_color: Vec<f64>,
    pub display_start_time: f64,
    pub draft3d: bool,
    pub drop_frame: bool,
    pub frame_blending: bool,
    pub hide_shy_layers: bool,
    pub motion_blur: bool,
    pub motion_blur_adaptive_sample_limit: u32,
    pub motion_blur_samples_per_frame: u32,
    pub preserve_nested_frame_rate: bool,
    pub preserve_nested_resolution: bool,
    pub renderer: String,
    pub resolution_factor: Vec<u32>,
    pub shutter_angle: f64,
    pub shutter_phase: f64,
    pub work_area_start: f64,
    pub work_area_duration: f64,
    pub markers: Property,
    layers: Vec<Layer>,
}

impl CompItem {
    pub fn new(av: AvAttributes) -> Self {
        Self {
            av,
            bg_color: vec![0.0, 0.0, 0.0],
            display_start_time: 0.0,
            draft3d: false,
            drop_frame: false,
            frame_blending: false,
            hide_shy_layers: false,
            motion_blur: false,
            motion_blur_adaptive_sample_limit: 128,
            motion_blur_samples_per_frame: 16,
            preserve_nested_frame_rate: false,
            preserve_nested_resolution: false,
            renderer: "ADBE Advanced 3d".to_string(),
            resolution_factor: vec![1, 1],
            shutter_angle: 180.0,
            shutter_phase: -90.0,
            work_area_start: 0.0,
            work_area_duration: av.duration,
            markers: Property::new(
                "Marker",
                mn::MARKER,
                PropertyValueType::Marker,
                PropertyValue::None,
            ),
            layers: Vec::new(),
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// 1-based, like the host.
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        index.checked_sub(1).and_then(|i| self.layers.get(i))
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        index.checked_sub(1).and_then(|i| self.layers.get_mut(i))
    }

    /// Appends a layer and returns its 1-based index.
    pub fn add_layer(&mut self, layer: Layer) -> usize {
        self.layers.push(layer);
        self.layers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_alpha_is_guarded() {
        let mut footage = FootageItem::new(AvAttributes::default(), FootageSource::Placeholder);
        assert!(footage.invert_alpha().is_err());
        assert!(footage.set_invert_alpha(true).is_err());

        footage.has_alpha = true;
        footage.set_invert_alpha(true).unwrap();
        assert_eq!(footage.invert_alpha(), Ok(true));

        footage.alpha_mode = alpha_mode::IGNORE;
        assert!(footage.invert_alpha().is_err());
    }

    #[test]
    fn layer_indices_are_one_based() {
        let mut comp = CompItem::new(AvAttributes::default());
        assert!(comp.layer(0).is_none());
        let index = comp.add_layer(Layer::null("Null 1", comp.av.duration));
        assert_eq!(index, 1);
        assert_eq!(comp.layer(1).map(|l| l.name.as_str()), Some("Null 1"));
    }
}
