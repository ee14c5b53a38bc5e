//! # Template Registry
//!
//! Host-defined property trees, keyed by matchName. New layers, and effects,
//! masks or shape groups added to an indexed group, are cloned from here.

use super::layer::LayerKind;
use super::match_names as mn;
use super::property::{
    MaskAttributes, Property, PropertyGroup, PropertyValue, PropertyValueType as T, Shape,
};
use super::text::TextDocument;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Global template registry - lazily initialized.
static REGISTRY: OnceLock<TemplateRegistry> = OnceLock::new();

pub struct TemplateRegistry {
    groups: HashMap<String, PropertyGroup>,
}

impl TemplateRegistry {
    /// Get the global registry instance.
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::build)
    }

    fn build() -> Self {
        let mut reg = Self {
            groups: HashMap::new(),
        };

        reg.register_builtin_effects();
        reg.register_builtin_masks();
        reg.register_builtin_shapes();
        reg.register_builtin_text();
        reg.register_builtin_trackers();

        reg
    }

    fn register(&mut self, group: PropertyGroup) {
        self.groups.insert(group.match_name.clone(), group);
    }

    /// A fresh copy of the template for `match_name`.
    pub fn group(&self, match_name: &str) -> Option<PropertyGroup> {
        self.groups.get(match_name).cloned()
    }

    pub fn contains(&self, match_name: &str) -> bool {
        self.groups.contains_key(match_name)
    }

    fn register_builtin_effects(&mut self) {
        let effects = [
            PropertyGroup::named("Slider Control", mn::SLIDER_CONTROL)
                .enableable()
                .with_property(Property::oned("Slider", "ADBE Slider Control-0001", 0.0)),
            PropertyGroup::named("Point Control", mn::POINT_CONTROL)
                .enableable()
                .with_property(Property::vector(
                    "Point",
                    "ADBE Point Control-0001",
                    T::TwoDSpatial,
                    &[0.0, 0.0],
                )),
            PropertyGroup::named("Color Control", mn::COLOR_CONTROL)
                .enableable()
                .with_property(Property::vector(
                    "Color",
                    "ADBE Color Control-0001",
                    T::Color,
                    &[1.0, 0.0, 0.0, 1.0],
                )),
            PropertyGroup::named("Dropdown Menu Control", mn::DROPDOWN_CONTROL)
                .enableable()
                .with_property(Property::dropdown(
                    "Menu",
                    "ADBE Dropdown Control-0001",
                    &["Item 1", "Item 2", "Item 3"],
                )),
            PropertyGroup::named("Layer Control", mn::LAYER_CONTROL)
                .enableable()
                .with_property(Property::new(
                    "Layer",
                    "ADBE Layer Control-0001",
                    T::LayerIndex,
                    PropertyValue::Number(0.0),
                )),
            PropertyGroup::named("Gaussian Blur", mn::GAUSSIAN_BLUR)
                .enableable()
                .with_property(Property::oned("Blurriness", "ADBE Gaussian Blur 2-0001", 0.0))
                .with_property(Property::oned("Blur Dimensions", "ADBE Gaussian Blur 2-0002", 1.0))
                .with_property(Property::oned(
                    "Repeat Edge Pixels",
                    "ADBE Gaussian Blur 2-0003",
                    0.0,
                )),
            PropertyGroup::named("Fill", mn::FILL)
                .enableable()
                .with_property(Property::new(
                    "Fill Mask",
                    "ADBE Fill-0001",
                    T::MaskIndex,
                    PropertyValue::Number(0.0),
                ))
                .with_property(Property::vector(
                    "Color",
                    "ADBE Fill-0002",
                    T::Color,
                    &[1.0, 0.0, 0.0, 1.0],
                ))
                .with_property(Property::oned("Opacity", "ADBE Fill-0005", 1.0)),
            PropertyGroup::named("Levels", mn::LEVELS)
                .enableable()
                .with_property(Property::new(
                    "Histogram",
                    "ADBE Easy Levels2-0002",
                    T::CustomValue,
                    PropertyValue::Custom(String::new()),
                ))
                .with_property(Property::oned("Input Black", "ADBE Easy Levels2-0004", 0.0)),
        ];

        for effect in effects {
            self.register(effect);
        }
    }

    fn register_builtin_masks(&mut self) {
        let mut atom = PropertyGroup::named("Mask 1", mn::MASK_ATOM)
            .with_property(Property::new(
                "Mask Path",
                mn::MASK_SHAPE,
                T::Shape,
                PropertyValue::Shape(Shape::default()),
            ))
            .with_property(Property::vector(
                "Mask Feather",
                mn::MASK_FEATHER,
                T::TwoD,
                &[0.0, 0.0],
            ))
            .with_property(Property::oned("Mask Opacity", mn::MASK_OPACITY, 100.0))
            .with_property(Property::oned("Mask Expansion", mn::MASK_EXPANSION, 0.0));
        atom.mask = Some(MaskAttributes::default());
        self.register(atom);
    }

    fn register_builtin_shapes(&mut self) {
        let shapes = [
            PropertyGroup::named("Group 1", mn::VECTOR_GROUP)
                .enableable()
                .with_group(PropertyGroup::indexed("Contents", mn::VECTORS_GROUP))
                .with_group(vector_transform()),
            PropertyGroup::named("Rectangle Path 1", mn::VECTOR_RECT)
                .enableable()
                .with_property(Property::vector(
                    "Size",
                    "ADBE Vector Rect Size",
                    T::TwoD,
                    &[100.0, 100.0],
                ))
                .with_property(Property::vector(
                    "Position",
                    "ADBE Vector Rect Position",
                    T::TwoDSpatial,
                    &[0.0, 0.0],
                ))
                .with_property(Property::oned("Roundness", "ADBE Vector Rect Roundness", 0.0)),
            PropertyGroup::named("Path 1", mn::VECTOR_PATH)
                .enableable()
                .with_property(Property::new(
                    "Path",
                    "ADBE Vector Shape",
                    T::Shape,
                    PropertyValue::Shape(Shape::default()),
                )),
            PropertyGroup::named("Fill 1", mn::VECTOR_FILL)
                .enableable()
                .with_property(Property::vector(
                    "Color",
                    "ADBE Vector Fill Color",
                    T::Color,
                    &[1.0, 0.0, 0.0, 1.0],
                ))
                .with_property(Property::oned("Opacity", "ADBE Vector Fill Opacity", 100.0)),
            PropertyGroup::named("Stroke 1", mn::VECTOR_STROKE)
                .enableable()
                .with_property(Property::vector(
                    "Color",
                    "ADBE Vector Stroke Color",
                    T::Color,
                    &[1.0, 1.0, 1.0, 1.0],
                ))
                .with_property(Property::oned("Opacity", "ADBE Vector Stroke Opacity", 100.0))
                .with_property(Property::oned("Stroke Width", "ADBE Vector Stroke Width", 2.0)),
        ];

        for shape in shapes {
            self.register(shape);
        }
    }

    fn register_builtin_text(&mut self) {
        let animator = PropertyGroup::named("Animator 1", mn::TEXT_ANIMATOR)
            .enableable()
            .with_group(PropertyGroup::indexed("Selectors", "ADBE Text Selectors"))
            .with_group(
                PropertyGroup::named("Properties", "ADBE Text Animator Properties")
                    .with_property(Property::oned("Opacity", "ADBE Text Opacity", 100.0))
                    .with_property(Property::vector(
                        "Position",
                        "ADBE Text Position 3D",
                        T::ThreeDSpatial,
                        &[0.0, 0.0, 0.0],
                    )),
            );
        self.register(animator);
    }

    fn register_builtin_trackers(&mut self) {
        let point = PropertyGroup::named("Track Point 1", mn::TRACK_POINT)
            .enableable()
            .with_property(Property::vector(
                "Feature Center",
                "ADBE MTracker Pt Feature Center",
                T::TwoDSpatial,
                &[0.0, 0.0],
            ))
            .with_property(Property::vector(
                "Attach Point",
                "ADBE MTracker Pt Attach Pt",
                T::TwoDSpatial,
                &[0.0, 0.0],
            ))
            .with_property(Property::oned("Confidence", "ADBE MTracker Pt Confidence", 0.0));
        let tracker = PropertyGroup::indexed("Tracker 1", mn::TRACKER);

        self.register(point);
        self.register(tracker);
    }

    /// The root property group of a new layer of `kind`.
    pub fn layer_root(&self, kind: &LayerKind) -> PropertyGroup {
        let three_d_capable = matches!(kind, LayerKind::Light(_) | LayerKind::Camera);
        let mut root = PropertyGroup::named("", "")
            .with_property(Property::new(
                "Marker",
                mn::MARKER,
                T::Marker,
                PropertyValue::None,
            ))
            .with_group(layer_transform(three_d_capable));

        match kind {
            LayerKind::Camera => {
                root = root.with_group(camera_options());
            }
            LayerKind::Light(_) => {
                root = root.with_group(light_options());
            }
            LayerKind::Av(_) | LayerKind::Null(_) | LayerKind::Shape(_) | LayerKind::Text(_) => {
                root = root
                    .with_property(Property::oned("Time Remap", mn::TIME_REMAP, 0.0))
                    .with_group(PropertyGroup::indexed("Motion Trackers", mn::TRACKERS))
                    .with_group(PropertyGroup::indexed("Masks", mn::MASKS))
                    .with_group(PropertyGroup::indexed("Effects", mn::EFFECTS))
                    .with_group(layer_styles())
                    .with_group(PropertyGroup::named("Audio", mn::AUDIO).with_property(
                        Property::vector("Audio Levels", "ADBE Audio Levels", T::TwoD, &[0.0, 0.0]),
                    ))
                    .with_group(geometry_options())
                    .with_group(material_options());
                if let LayerKind::Text(_) = kind {
                    root = root.with_group(text_properties());
                }
                if let LayerKind::Shape(_) = kind {
                    root = root.with_group(PropertyGroup::indexed("Contents", mn::ROOT_VECTORS));
                }
            }
        }

        root
    }
}

fn layer_transform(camera_or_light: bool) -> PropertyGroup {
    let mut group = PropertyGroup::named("Transform", mn::TRANSFORM);
    if camera_or_light {
        group = group.with_property(Property::vector(
            "Point of Interest",
            mn::POINT_OF_INTEREST,
            T::ThreeDSpatial,
            &[0.0, 0.0, 0.0],
        ));
    } else {
        group = group.with_property(Property::vector(
            "Anchor Point",
            mn::ANCHOR_POINT,
            T::ThreeDSpatial,
            &[0.0, 0.0, 0.0],
        ));
    }
    group = group.with_property(Property::vector(
        "Position",
        mn::POSITION,
        T::ThreeDSpatial,
        &[0.0, 0.0, 0.0],
    ));
    if !camera_or_light {
        group = group.with_property(Property::vector(
            "Scale",
            mn::SCALE,
            T::ThreeD,
            &[100.0, 100.0, 100.0],
        ));
    }
    group = group
        .with_property(Property::vector(
            "Orientation",
            mn::ORIENTATION,
            T::ThreeD,
            &[0.0, 0.0, 0.0],
        ))
        .with_property(Property::oned("X Rotation", mn::ROTATE_X, 0.0))
        .with_property(Property::oned("Y Rotation", mn::ROTATE_Y, 0.0))
        .with_property(Property::oned("Rotation", mn::ROTATE_Z, 0.0));
    if !camera_or_light {
        group = group.with_property(Property::oned("Opacity", mn::OPACITY, 100.0));
    }
    group
}

fn vector_transform() -> PropertyGroup {
    PropertyGroup::named("Transform", mn::VECTOR_TRANSFORM)
        .with_property(Property::vector(
            "Anchor Point",
            "ADBE Vector Anchor",
            T::TwoDSpatial,
            &[0.0, 0.0],
        ))
        .with_property(Property::vector(
            "Position",
            "ADBE Vector Position",
            T::TwoDSpatial,
            &[0.0, 0.0],
        ))
        .with_property(Property::vector(
            "Scale",
            "ADBE Vector Scale",
            T::TwoD,
            &[100.0, 100.0],
        ))
        .with_property(Property::oned("Rotation", "ADBE Vector Rotation", 0.0))
        .with_property(Property::oned("Opacity", "ADBE Vector Group Opacity", 100.0))
}

fn layer_styles() -> PropertyGroup {
    let style = |name: &str, match_name: &str, prefix: &str| {
        let mut g = PropertyGroup::named(name, match_name)
            .with_property(Property::oned(
                "Opacity",
                &format!("{prefix}/opacity"),
                75.0,
            ))
            .with_property(Property::vector(
                "Color",
                &format!("{prefix}/color"),
                T::Color,
                &[0.0, 0.0, 0.0, 1.0],
            ));
        g.enabled = false;
        g
    };

    PropertyGroup::named("Layer Styles", mn::LAYER_STYLES)
        .with_group(
            PropertyGroup::named("Blending Options", mn::BLEND_OPTIONS)
                .with_property(Property::oned("Global Light Angle", "ADBE Global Angle2", 120.0))
                .with_property(Property::oned(
                    "Global Light Altitude",
                    "ADBE Global Altitude2",
                    30.0,
                )),
        )
        .with_group(style("Drop Shadow", mn::DROP_SHADOW, "dropShadow"))
        .with_group(style("Inner Shadow", mn::INNER_SHADOW, "innerShadow"))
        .with_group(style("Stroke", mn::STROKE_STYLE, "frameFX"))
}

fn geometry_options() -> PropertyGroup {
    PropertyGroup::named("Geometry Options", mn::GEOMETRY_OPTIONS)
        .with_property(Property::oned("Bevel Depth", "ADBE Bevel Depth", 0.0))
        .with_property(Property::oned("Extrusion Depth", "ADBE Extrsn Depth", 0.0))
}

fn material_options() -> PropertyGroup {
    PropertyGroup::named("Material Options", mn::MATERIAL_OPTIONS)
        .with_property(Property::oned("Casts Shadows", "ADBE Casts Shadows", 0.0))
        .with_property(Property::oned("Light Transmission", "ADBE Light Transmission", 0.0))
        .with_property(Property::oned("Accepts Shadows", "ADBE Accepts Shadows", 1.0))
        .with_property(Property::oned("Accepts Lights", "ADBE Accepts Lights", 1.0))
        .with_property(Property::oned("Ambient", "ADBE Ambient Coefficient", 100.0))
        .with_property(Property::oned("Diffuse", "ADBE Diffuse Coefficient", 50.0))
        .with_property(Property::oned("Specular Intensity", "ADBE Specular Coefficient", 50.0))
        .with_property(Property::oned("Specular Shininess", "ADBE Shininess Coefficient", 5.0))
        .with_property(Property::oned("Metal", "ADBE Metal Coefficient", 100.0))
}

fn text_properties() -> PropertyGroup {
    PropertyGroup::named("Text", mn::TEXT_PROPERTIES)
        .with_property(Property::new(
            "Source Text",
            mn::TEXT_DOCUMENT,
            T::TextDocument,
            PropertyValue::TextDocument(Box::new(TextDocument::default())),
        ))
        .with_group(
            PropertyGroup::named("Path Options", mn::TEXT_PATH_OPTIONS)
                .with_property(Property::new(
                    "Path",
                    "ADBE Text Path",
                    T::MaskIndex,
                    PropertyValue::Number(0.0),
                ))
                .with_property(Property::oned("Reverse Path", "ADBE Text Reverse Path", 0.0))
                .with_property(Property::oned(
                    "Perpendicular To Path",
                    "ADBE Text Perpendicular To Path",
                    1.0,
                ))
                .with_property(Property::oned("First Margin", "ADBE Text First Margin", 0.0)),
        )
        .with_group(
            PropertyGroup::named("More Options", mn::TEXT_MORE_OPTIONS)
                .with_property(Property::oned(
                    "Anchor Point Grouping",
                    "ADBE Text Anchor Point Option",
                    1.0,
                ))
                .with_property(Property::vector(
                    "Grouping Alignment",
                    "ADBE Text Anchor Point Align",
                    T::TwoD,
                    &[0.0, 0.0],
                ))
                .with_property(Property::oned("Fill & Stroke", "ADBE Text Render Order", 1.0)),
        )
        .with_group(PropertyGroup::indexed("Animators", mn::TEXT_ANIMATORS))
}

fn light_options() -> PropertyGroup {
    PropertyGroup::named("Light Options", mn::LIGHT_OPTIONS)
        .with_property(Property::oned("Intensity", "ADBE Light Intensity", 100.0))
        .with_property(Property::vector(
            "Color",
            "ADBE Light Color",
            T::Color,
            &[1.0, 1.0, 1.0, 1.0],
        ))
        .with_property(Property::oned("Cone Angle", "ADBE Light Cone Angle", 90.0))
        .with_property(Property::oned("Cone Feather", "ADBE Light Cone Feather 2", 50.0))
        .with_property(Property::oned("Casts Shadows", "ADBE Casts Shadows", 0.0))
        .with_property(Property::oned("Shadow Darkness", "ADBE Light Shadow Darkness", 100.0))
}

fn camera_options() -> PropertyGroup {
    PropertyGroup::named("Camera Options", mn::CAMERA_OPTIONS)
        .with_property(Property::oned("Zoom", "ADBE Camera Zoom", 1777.7778))
        .with_property(Property::oned("Depth of Field", "ADBE Camera Depth of Field", 0.0))
        .with_property(Property::oned(
            "Focus Distance",
            "ADBE Camera Focus Distance",
            1777.7778,
        ))
        .with_property(Property::oned("Aperture", "ADBE Camera Aperture", 17.7))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::layer::AvLayer;
    use crate::scene::property::PropertyBase;

    #[test]
    fn registry_is_shared() {
        let a = TemplateRegistry::global() as *const _;
        let b = TemplateRegistry::global() as *const _;
        assert_eq!(a, b);
        assert!(TemplateRegistry::global().contains(mn::SLIDER_CONTROL));
        assert!(TemplateRegistry::global().contains(mn::MASK_ATOM));
    }

    #[test]
    fn text_layers_get_text_properties() {
        let root = TemplateRegistry::global().layer_root(&LayerKind::Text(AvLayer::default()));
        let text = root.group(mn::TEXT_PROPERTIES).unwrap();
        assert!(matches!(
            text.child(mn::TEXT_DOCUMENT),
            Some(PropertyBase::Property(_))
        ));
        assert!(root.group(mn::ROOT_VECTORS).is_none());
    }

    #[test]
    fn camera_transform_has_point_of_interest() {
        let root = TemplateRegistry::global().layer_root(&LayerKind::Camera);
        let transform = root.group(mn::TRANSFORM).unwrap();
        assert!(transform.property(mn::POINT_OF_INTEREST).is_some());
        assert!(transform.property(mn::ANCHOR_POINT).is_none());
        assert!(root.group(mn::EFFECTS).is_none());
    }

    #[test]
    fn mask_template_carries_mask_attributes() {
        let atom = TemplateRegistry::global().group(mn::MASK_ATOM).unwrap();
        assert_eq!(atom.mask, Some(MaskAttributes::default()));
        assert_eq!(atom.num_properties(), 4);
    }
}
