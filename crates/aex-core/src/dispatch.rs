//! Addressing and classification of live scene objects.
//!
//! Classification is most-specific-first: comps before footage, text/shape/
//! null before plain AV layers, the mask group before generic groups.

use crate::error::AexError;
use crate::scene::{FootageSource, Item, ItemId, ItemKind, Layer, LayerKind, Project, PropertyBase};
use aex_data::model::{ItemType, LayerType, PropertyType};
use aex_data::tags;
use std::fmt;
use std::str::FromStr;

/// A handle to a live scene object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneRef {
    Project,
    Item(ItemId),
    Layer { comp: ItemId, index: usize },
    /// A property or group reached by following matchNames from a layer root.
    Property {
        comp: ItemId,
        layer: usize,
        path: Vec<String>,
    },
}

impl fmt::Display for SceneRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneRef::Project => write!(f, "project"),
            SceneRef::Item(id) => write!(f, "item:{id}"),
            SceneRef::Layer { comp, index } => write!(f, "layer:{comp}:{index}"),
            SceneRef::Property { comp, layer, path } => {
                write!(f, "property:{comp}:{layer}:{}", path.join("/"))
            }
        }
    }
}

impl FromStr for SceneRef {
    type Err = AexError;

    /// Parses `project`, `item:<id>` (or `comp:<id>`), `layer:<comp>:<index>`
    /// and `property:<comp>:<layer>:<matchName>/<matchName>...`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || AexError::Assertion(format!("invalid scene reference '{s}'"));
        let number = |v: &str| v.trim().parse::<u32>().map_err(|_| bad());

        let mut parts = s.splitn(4, ':');
        match parts.next().map(str::trim) {
            Some("project") => Ok(SceneRef::Project),
            Some("item" | "comp") => {
                let id = number(parts.next().ok_or_else(bad)?)?;
                Ok(SceneRef::Item(id))
            }
            Some("layer") => {
                let comp = number(parts.next().ok_or_else(bad)?)?;
                let index = number(parts.next().ok_or_else(bad)?)? as usize;
                Ok(SceneRef::Layer { comp, index })
            }
            Some("property") => {
                let comp = number(parts.next().ok_or_else(bad)?)?;
                let layer = number(parts.next().ok_or_else(bad)?)? as usize;
                let path: Vec<String> = parts
                    .next()
                    .ok_or_else(bad)?
                    .split('/')
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect();
                if path.is_empty() {
                    return Err(bad());
                }
                Ok(SceneRef::Property { comp, layer, path })
            }
            _ => Err(bad()),
        }
    }
}

/// The kind of a live object, as its document tag would name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Project,
    Comp,
    Item(ItemType),
    Layer(LayerType),
    MaskGroup,
    PropertyGroup,
    Property(PropertyType),
}

impl SceneKind {
    pub fn tag(self) -> &'static str {
        match self {
            SceneKind::Project => tags::PROJECT,
            SceneKind::Comp => tags::COMP_ITEM,
            SceneKind::Item(kind) => kind.tag(),
            SceneKind::Layer(kind) => kind.tag(),
            SceneKind::MaskGroup => tags::MASK_GROUP,
            SceneKind::PropertyGroup => tags::PROPERTY_GROUP,
            SceneKind::Property(kind) => kind.tag(),
        }
    }
}

pub fn layer_type(layer: &Layer) -> LayerType {
    match &layer.kind {
        LayerKind::Text(_) => LayerType::Text,
        LayerKind::Shape(_) => LayerType::Shape,
        LayerKind::Null(_) => LayerType::Null,
        LayerKind::Av(_) => LayerType::Av,
        LayerKind::Light(_) => LayerType::Light,
        LayerKind::Camera => LayerType::Camera,
    }
}

pub fn item_kind(item: &Item) -> Result<SceneKind, AexError> {
    match &item.kind {
        ItemKind::Comp(_) => Ok(SceneKind::Comp),
        ItemKind::Folder => Ok(SceneKind::Item(ItemType::Folder)),
        ItemKind::Footage(footage) => match &footage.source {
            FootageSource::Solid { .. } => Ok(SceneKind::Item(ItemType::Solid)),
            FootageSource::File { .. } => Ok(SceneKind::Item(ItemType::FileFootage)),
            FootageSource::Placeholder => Ok(SceneKind::Item(ItemType::Placeholder)),
            FootageSource::Unknown { description } => {
                Err(AexError::UnrecognizedType(description.clone()))
            }
        },
    }
}

/// Resolves a reference to the kind of object it points at. A dangling
/// reference is an unrecognized type.
pub fn classify(project: &Project, target: &SceneRef) -> Result<SceneKind, AexError> {
    let dangling = || AexError::UnrecognizedType(target.to_string());
    match target {
        SceneRef::Project => Ok(SceneKind::Project),
        SceneRef::Item(id) => item_kind(project.item(*id).map_err(|_| dangling())?),
        SceneRef::Layer { comp, index } => {
            let layer = project.layer(*comp, *index).map_err(|_| dangling())?;
            Ok(SceneKind::Layer(layer_type(layer)))
        }
        SceneRef::Property { comp, layer, path } => {
            let layer = project.layer(*comp, *layer).map_err(|_| dangling())?;
            match layer.root.at_path(path).ok_or_else(dangling)? {
                PropertyBase::Group(g) if g.mask.is_some() => Ok(SceneKind::MaskGroup),
                PropertyBase::Group(_) => Ok(SceneKind::PropertyGroup),
                PropertyBase::Property(p) => Ok(SceneKind::Property(
                    crate::property::property_type(p.value_type).unwrap_or_else(|k| k),
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{AvAttributes, Layer};

    #[test]
    fn parses_and_prints_references() {
        let cases = [
            ("project", SceneRef::Project),
            ("comp:3", SceneRef::Item(3)),
            ("layer:3:2", SceneRef::Layer { comp: 3, index: 2 }),
            (
                "property:3:1:ADBE Transform Group/ADBE Position",
                SceneRef::Property {
                    comp: 3,
                    layer: 1,
                    path: vec!["ADBE Transform Group".into(), "ADBE Position".into()],
                },
            ),
        ];
        for (text, expected) in cases {
            assert_eq!(text.parse::<SceneRef>().unwrap(), expected);
        }
        assert_eq!(SceneRef::Item(3).to_string(), "item:3");
        assert!("layer:x:1".parse::<SceneRef>().is_err());
        assert!("property:1:1:".parse::<SceneRef>().is_err());
        assert!("render:1".parse::<SceneRef>().is_err());
    }

    #[test]
    fn classification_is_most_specific_first() {
        let mut project = Project::new();
        let comp = project.add_comp("Comp", AvAttributes::default());
        let solid = project.add_solid("Solid", AvAttributes::default(), vec![1.0, 0.0, 0.0]);
        project
            .comp_mut(comp)
            .unwrap()
            .add_layer(Layer::null("Null 1", 10.0));

        assert_eq!(classify(&project, &SceneRef::Item(comp)).unwrap(), SceneKind::Comp);
        assert_eq!(
            classify(&project, &SceneRef::Item(solid)).unwrap().tag(),
            tags::SOLID_ITEM
        );
        assert_eq!(
            classify(&project, &SceneRef::Layer { comp, index: 1 }).unwrap(),
            SceneKind::Layer(LayerType::Null)
        );
    }

    #[test]
    fn dangling_and_unknown_objects_are_unrecognized() {
        let mut project = Project::new();
        let err = classify(&project, &SceneRef::Item(42)).unwrap_err();
        assert!(matches!(err, AexError::UnrecognizedType(_)));

        let proxy = project.add_item(
            "Sequence",
            ItemKind::Footage(crate::scene::FootageItem::new(
                AvAttributes::default(),
                FootageSource::Unknown {
                    description: "ImageSequence".into(),
                },
            )),
        );
        let err = classify(&project, &SceneRef::Item(proxy)).unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized type: ImageSequence");
    }
}
