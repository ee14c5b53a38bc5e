//! Host enumeration codes carried verbatim in documents.
//!
//! The host reports its enums as plain integers; documents keep them that way
//! so a value read from one host version can be written back to another.

pub mod interpolation {
    pub const LINEAR: u32 = 6612;
    pub const BEZIER: u32 = 6613;
    pub const HOLD: u32 = 6614;
}

pub mod blending_mode {
    pub const NORMAL: u32 = 5212;
    pub const MULTIPLY: u32 = 5216;
    pub const SCREEN: u32 = 5224;
    pub const ADD: u32 = 5220;
}

pub mod auto_orient {
    pub const NO_AUTO_ORIENT: u32 = 4212;
    pub const ALONG_PATH: u32 = 4213;
    pub const CAMERA_OR_POINT_OF_INTEREST: u32 = 4214;
}

pub mod frame_blending {
    pub const NO_FRAME_BLEND: u32 = 4012;
    pub const FRAME_MIX: u32 = 4013;
    pub const PIXEL_MOTION: u32 = 4014;
}

pub mod layer_quality {
    pub const WIREFRAME: u32 = 4612;
    pub const DRAFT: u32 = 4613;
    pub const BEST: u32 = 4614;
}

pub mod sampling_quality {
    pub const BILINEAR: u32 = 4812;
    pub const BICUBIC: u32 = 4813;
}

pub mod track_matte {
    pub const NO_TRACK_MATTE: u32 = 5012;
    pub const ALPHA: u32 = 5013;
    pub const ALPHA_INVERTED: u32 = 5014;
    pub const LUMA: u32 = 5015;
    pub const LUMA_INVERTED: u32 = 5016;
}

pub mod mask_mode {
    pub const NONE: u32 = 6812;
    pub const ADD: u32 = 6813;
    pub const SUBTRACT: u32 = 6814;
    pub const INTERSECT: u32 = 6815;
}

pub mod mask_motion_blur {
    pub const SAME_AS_LAYER: u32 = 7012;
    pub const ON: u32 = 7013;
    pub const OFF: u32 = 7014;
}

pub mod light_type {
    pub const PARALLEL: u32 = 4412;
    pub const SPOT: u32 = 4413;
    pub const POINT: u32 = 4414;
    pub const AMBIENT: u32 = 4415;
}

pub mod justification {
    pub const LEFT_JUSTIFY: u32 = 7413;
    pub const RIGHT_JUSTIFY: u32 = 7414;
    pub const CENTER_JUSTIFY: u32 = 7415;
}

pub mod alpha_mode {
    pub const IGNORE: u32 = 5412;
    pub const STRAIGHT: u32 = 5413;
    pub const PREMULTIPLIED: u32 = 5414;
}

pub mod field_separation {
    pub const OFF: u32 = 5612;
    pub const UPPER_FIELD_FIRST: u32 = 5613;
    pub const LOWER_FIELD_FIRST: u32 = 5614;
}

pub mod pulldown_phase {
    pub const OFF: u32 = 5812;
}

pub mod time_display {
    pub const TIMECODE: u32 = 2012;
    pub const FRAMES: u32 = 2013;
}
