//! Host matchNames the codec addresses directly.

// Layer root
pub const MARKER: &str = "ADBE Marker";
pub const TIME_REMAP: &str = "ADBE Time Remapping";
pub const TRANSFORM: &str = "ADBE Transform Group";
pub const MASKS: &str = "ADBE Mask Parade";
pub const EFFECTS: &str = "ADBE Effect Parade";
pub const TRACKERS: &str = "ADBE MTrackers";
pub const LAYER_STYLES: &str = "ADBE Layer Styles";
pub const AUDIO: &str = "ADBE Audio Group";
pub const GEOMETRY_OPTIONS: &str = "ADBE Extrsn Options Group";
pub const MATERIAL_OPTIONS: &str = "ADBE Material Options Group";
pub const TEXT_PROPERTIES: &str = "ADBE Text Properties";
pub const ROOT_VECTORS: &str = "ADBE Root Vectors Group";
pub const LIGHT_OPTIONS: &str = "ADBE Light Options Group";
pub const CAMERA_OPTIONS: &str = "ADBE Camera Options Group";

// Transform
pub const ANCHOR_POINT: &str = "ADBE Anchor Point";
pub const POINT_OF_INTEREST: &str = "ADBE Point of Interest";
pub const POSITION: &str = "ADBE Position";
pub const SCALE: &str = "ADBE Scale";
pub const ORIENTATION: &str = "ADBE Orientation";
pub const ROTATE_X: &str = "ADBE Rotate X";
pub const ROTATE_Y: &str = "ADBE Rotate Y";
pub const ROTATE_Z: &str = "ADBE Rotate Z";
pub const OPACITY: &str = "ADBE Opacity";

// Masks
pub const MASK_ATOM: &str = "ADBE Mask Atom";
pub const MASK_SHAPE: &str = "ADBE Mask Shape";
pub const MASK_FEATHER: &str = "ADBE Mask Feather";
pub const MASK_OPACITY: &str = "ADBE Mask Opacity";
pub const MASK_EXPANSION: &str = "ADBE Mask Offset";

// Layer styles
pub const BLEND_OPTIONS: &str = "ADBE Blend Options Group";
pub const DROP_SHADOW: &str = "dropShadow/enabled";
pub const INNER_SHADOW: &str = "innerShadow/enabled";
pub const STROKE_STYLE: &str = "frameFX/enabled";

// Text
pub const TEXT_DOCUMENT: &str = "ADBE Text Document";
pub const TEXT_PATH_OPTIONS: &str = "ADBE Text Path Options";
pub const TEXT_MORE_OPTIONS: &str = "ADBE Text More Options";
pub const TEXT_ANIMATORS: &str = "ADBE Text Animators";
pub const TEXT_ANIMATOR: &str = "ADBE Text Animator";

// Shapes
pub const VECTOR_GROUP: &str = "ADBE Vector Group";
pub const VECTORS_GROUP: &str = "ADBE Vectors Group";
pub const VECTOR_TRANSFORM: &str = "ADBE Vector Transform Group";
pub const VECTOR_RECT: &str = "ADBE Vector Shape - Rect";
pub const VECTOR_PATH: &str = "ADBE Vector Shape - Group";
pub const VECTOR_FILL: &str = "ADBE Vector Graphic - Fill";
pub const VECTOR_STROKE: &str = "ADBE Vector Graphic - Stroke";

// Trackers
pub const TRACKER: &str = "ADBE MTracker";
pub const TRACK_POINT: &str = "ADBE MTracker Pt";

// Effects
pub const SLIDER_CONTROL: &str = "ADBE Slider Control";
pub const POINT_CONTROL: &str = "ADBE Point Control";
pub const COLOR_CONTROL: &str = "ADBE Color Control";
pub const DROPDOWN_CONTROL: &str = "ADBE Dropdown Control";
pub const LAYER_CONTROL: &str = "ADBE Layer Control";
pub const GAUSSIAN_BLUR: &str = "ADBE Gaussian Blur 2";
pub const FILL: &str = "ADBE Fill";
pub const LEVELS: &str = "ADBE Easy Levels2";
