use super::item::ItemId;
use super::match_names as mn;
use super::property::{Property, PropertyGroup};
use super::templates::TemplateRegistry;
use aex_data::constants::{
    auto_orient, blending_mode, frame_blending, layer_quality, light_type, sampling_quality,
    track_matte,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub comment: String,
    pub label: u32,
    pub enabled: bool,
    pub has_video: bool,
    pub in_point: f64,
    pub out_point: f64,
    pub start_time: f64,
    pub stretch: f64, // percent
    pub shy: bool,
    pub solo: bool,
    pub parent: Option<usize>, // 1-based index of the parent layer
    pub kind: LayerKind,
    pub root: PropertyGroup,
}

/// Layer kinds. Text, shape and null layers are AV layers with extra payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerKind {
    Av(AvLayer),
    Text(AvLayer),
    Shape(AvLayer),
    Null(AvLayer),
    Light(LightLayer),
    Camera,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvLayer {
    pub adjustment_layer: bool,
    pub audio_enabled: bool,
    pub auto_orient: u32,
    pub blending_mode: u32,
    pub collapse_transformation: bool,
    pub effects_active: bool,
    pub environment_layer: bool,
    pub frame_blending_type: u32, // NO_FRAME_BLEND means frame blending is off
    pub guide_layer: bool,
    pub motion_blur: bool,
    pub preserve_transparency: bool,
    pub quality: u32,
    pub sampling_quality: u32,
    pub three_d_layer: bool,
    pub three_d_per_char: bool, // text layers only
    pub time_remap_enabled: bool,
    pub track_matte_type: u32,
    pub source: Option<ItemId>,
}

impl Default for AvLayer {
    fn default() -> Self {
        Self {
            adjustment_layer: false,
            audio_enabled: true,
            auto_orient: auto_orient::NO_AUTO_ORIENT,
            blending_mode: blending_mode::NORMAL,
            collapse_transformation: false,
            effects_active: true,
            environment_layer: false,
            frame_blending_type: frame_blending::NO_FRAME_BLEND,
            guide_layer: false,
            motion_blur: false,
            preserve_transparency: false,
            quality: layer_quality::BEST,
            sampling_quality: sampling_quality::BILINEAR,
            three_d_layer: false,
            three_d_per_char: false,
            time_remap_enabled: false,
            track_matte_type: track_matte::NO_TRACK_MATTE,
            source: None,
        }
    }
}

impl AvLayer {
    pub fn frame_blending(&self) -> bool {
        self.frame_blending_type != frame_blending::NO_FRAME_BLEND
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightLayer {
    pub light_type: u32,
}

impl Default for LightLayer {
    fn default() -> Self {
        Self {
            light_type: light_type::POINT,
        }
    }
}

impl Layer {
    /// A fresh layer spanning `0..duration` with the host's property tree
    /// for its kind.
    pub fn new(name: &str, kind: LayerKind, duration: f64) -> Self {
        let root = TemplateRegistry::global().layer_root(&kind);
        let has_video = !matches!(kind, LayerKind::Light(_) | LayerKind::Camera);
        Self {
            name: name.to_string(),
            comment: String::new(),
            label: 1,
            enabled: true,
            has_video,
            in_point: 0.0,
            out_point: duration,
            start_time: 0.0,
            stretch: 100.0,
            shy: false,
            solo: false,
            parent: None,
            kind,
            root,
        }
    }

    pub fn null(name: &str, duration: f64) -> Self {
        Self::new(name, LayerKind::Null(AvLayer::default()), duration)
    }

    pub fn av(name: &str, source: Option<ItemId>, duration: f64) -> Self {
        let av = AvLayer {
            source,
            ..AvLayer::default()
        };
        Self::new(name, LayerKind::Av(av), duration)
    }

    pub fn av_layer(&self) -> Option<&AvLayer> {
        match &self.kind {
            LayerKind::Av(av) | LayerKind::Text(av) | LayerKind::Shape(av) | LayerKind::Null(av) => {
                Some(av)
            }
            LayerKind::Light(_) | LayerKind::Camera => None,
        }
    }

    pub fn av_layer_mut(&mut self) -> Option<&mut AvLayer> {
        match &mut self.kind {
            LayerKind::Av(av) | LayerKind::Text(av) | LayerKind::Shape(av) | LayerKind::Null(av) => {
                Some(av)
            }
            LayerKind::Light(_) | LayerKind::Camera => None,
        }
    }

    /// Cameras and lights always live in 3D; AV layers only when flagged.
    pub fn is_three_d(&self) -> bool {
        match &self.kind {
            LayerKind::Light(_) | LayerKind::Camera => true,
            _ => self.av_layer().is_some_and(|av| av.three_d_layer),
        }
    }

    pub fn markers(&self) -> Option<&Property> {
        self.root.property(mn::MARKER)
    }

    pub fn markers_mut(&mut self) -> Option<&mut Property> {
        self.root.property_mut(mn::MARKER)
    }

    pub fn transform(&self) -> Option<&PropertyGroup> {
        self.root.group(mn::TRANSFORM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cameras_have_no_video_and_are_three_d() {
        let camera = Layer::new("Camera 1", LayerKind::Camera, 5.0);
        assert!(!camera.has_video);
        assert!(camera.is_three_d());
        assert!(camera.root.group(mn::CAMERA_OPTIONS).is_some());
    }

    #[test]
    fn av_layers_follow_their_flag() {
        let mut layer = Layer::av("Solid", None, 5.0);
        assert!(!layer.is_three_d());
        if let Some(av) = layer.av_layer_mut() {
            av.three_d_layer = true;
        }
        assert!(layer.is_three_d());
        assert_eq!(layer.out_point, 5.0);
        assert!(layer.markers().is_some());
    }
}
