//! The closed `type` vocabulary.
//!
//! Every node in a document carries one of these tags. Readers dispatch on the
//! tag alone; the shape of the rest of the node is never consulted.

pub const PROJECT: &str = "aex:project";

pub const COMP_ITEM: &str = "aex:item:av:comp";
pub const FILE_FOOTAGE_ITEM: &str = "aex:item:av:footage:file";
pub const SOLID_ITEM: &str = "aex:item:av:footage:solid";
pub const PLACEHOLDER_ITEM: &str = "aex:item:av:footage:placeholder";
pub const FOLDER_ITEM: &str = "aex:item:folder";

pub const AV_LAYER: &str = "aex:layer:av";
pub const SHAPE_LAYER: &str = "aex:layer:av:shape";
pub const TEXT_LAYER: &str = "aex:layer:av:text";
pub const CAMERA_LAYER: &str = "aex:layer:camera";
pub const LIGHT_LAYER: &str = "aex:layer:light";
pub const NULL_LAYER: &str = "aex:layer:null";

pub const PROPERTY_GROUP: &str = "aex:propertygroup";
pub const LAYER_STYLE_GROUP: &str = "aex:propertygroup:layerstyle";
pub const MASK_GROUP: &str = "aex:propertygroup:mask";

pub const ONED_PROPERTY: &str = "aex:property:oned";
pub const TWOD_PROPERTY: &str = "aex:property:twod";
pub const THREED_PROPERTY: &str = "aex:property:threed";
pub const COLOR_PROPERTY: &str = "aex:property:color";
pub const SHAPE_PROPERTY: &str = "aex:property:shape";
pub const TEXT_DOCUMENT_PROPERTY: &str = "aex:property:textdocument";
pub const MASK_INDEX_PROPERTY: &str = "aex:property:maskindex";
pub const MARKER_PROPERTY: &str = "aex:property:marker";
pub const DROPDOWN_PROPERTY: &str = "aex:property:dropdown";
pub const LAYER_INDEX_PROPERTY: &str = "aex:property:layerindex";
pub const CUSTOM_PROPERTY: &str = "aex:property:custom";
pub const NO_VALUE_PROPERTY: &str = "aex:property:novalue";

/// Broad node category a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    Project,
    Comp,
    Item,
    Layer,
    PropertyGroup,
    Property,
}

impl NodeCategory {
    /// Classifies a tag. Comps are checked before the generic item prefix.
    pub fn of(tag: &str) -> Option<Self> {
        if tag == PROJECT {
            Some(NodeCategory::Project)
        } else if tag == COMP_ITEM {
            Some(NodeCategory::Comp)
        } else if tag.starts_with("aex:item:") {
            Some(NodeCategory::Item)
        } else if tag.starts_with("aex:layer:") {
            Some(NodeCategory::Layer)
        } else if tag == PROPERTY_GROUP || tag.starts_with("aex:propertygroup:") {
            Some(NodeCategory::PropertyGroup)
        } else if tag.starts_with("aex:property:") {
            Some(NodeCategory::Property)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_prefixes() {
        assert_eq!(NodeCategory::of(PROJECT), Some(NodeCategory::Project));
        assert_eq!(NodeCategory::of(COMP_ITEM), Some(NodeCategory::Comp));
        assert_eq!(NodeCategory::of(SOLID_ITEM), Some(NodeCategory::Item));
        assert_eq!(NodeCategory::of(TEXT_LAYER), Some(NodeCategory::Layer));
        assert_eq!(
            NodeCategory::of(LAYER_STYLE_GROUP),
            Some(NodeCategory::PropertyGroup)
        );
        assert_eq!(NodeCategory::of(ONED_PROPERTY), Some(NodeCategory::Property));
        assert_eq!(NodeCategory::of("aex:propertygroups"), None);
        assert_eq!(NodeCategory::of("layer"), None);
    }
}
