use super::SceneError;
use aex_data::constants::justification;
use serde::{Deserialize, Serialize};

/// Host text document.
///
/// Fill, stroke and box attributes can only be read or written while their
/// governing flag (`apply_fill`, `apply_stroke`, `box_text`) is on; the host
/// raises an access error otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDocument {
    pub text: String,
    pub font: String,
    pub font_family: String,
    pub font_style: String,
    pub font_size: f64,
    pub all_caps: bool,
    pub small_caps: bool,
    pub faux_bold: bool,
    pub faux_italic: bool,
    pub subscript: bool,
    pub superscript: bool,
    pub baseline_locs: Vec<f64>,
    pub baseline_shift: f64,
    pub horizontal_scale: f64,
    pub vertical_scale: f64,
    pub leading: f64,
    pub tracking: f64,
    pub tsume: f64,
    pub justification: u32,

    apply_fill: bool,
    fill_color: Vec<f64>,

    apply_stroke: bool,
    stroke_color: Vec<f64>,
    stroke_over_fill: bool,
    stroke_width: f64,

    box_text: bool,
    box_text_pos: Vec<f64>,
    box_text_size: Vec<f64>,
}

impl Default for TextDocument {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: String::new(),
            font_family: String::new(),
            font_style: String::new(),
            font_size: 32.0,
            all_caps: false,
            small_caps: false,
            faux_bold: false,
            faux_italic: false,
            subscript: false,
            superscript: false,
            baseline_locs: vec![0.0, 0.0],
            baseline_shift: 0.0,
            horizontal_scale: 100.0,
            vertical_scale: 100.0,
            leading: 0.0,
            tracking: 0.0,
            tsume: 0.0,
            justification: justification::LEFT_JUSTIFY,
            apply_fill: false,
            fill_color: vec![0.0, 0.0, 0.0],
            apply_stroke: false,
            stroke_color: vec![0.0, 0.0, 0.0],
            stroke_over_fill: false,
            stroke_width: 0.0,
            box_text: false,
            box_text_pos: vec![0.0, 0.0],
            box_text_size: vec![0.0, 0.0],
        }
    }
}

fn guard(flag_on: bool, attribute: &'static str, flag: &'static str) -> Result<(), SceneError> {
    if flag_on {
        Ok(())
    } else {
        Err(SceneError::GuardedAccess { attribute, flag })
    }
}

impl TextDocument {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn apply_fill(&self) -> bool {
        self.apply_fill
    }

    pub fn set_apply_fill(&mut self, on: bool) {
        self.apply_fill = on;
    }

    pub fn apply_stroke(&self) -> bool {
        self.apply_stroke
    }

    pub fn set_apply_stroke(&mut self, on: bool) {
        self.apply_stroke = on;
    }

    pub fn box_text(&self) -> bool {
        self.box_text
    }

    /// Switches between point text and paragraph (box) text.
    pub fn set_box_text(&mut self, on: bool) {
        self.box_text = on;
    }

    pub fn fill_color(&self) -> Result<Vec<f64>, SceneError> {
        guard(self.apply_fill, "fillColor", "applyFill")?;
        Ok(self.fill_color.clone())
    }

    pub fn set_fill_color(&mut self, color: Vec<f64>) -> Result<(), SceneError> {
        guard(self.apply_fill, "fillColor", "applyFill")?;
        self.fill_color = color;
        Ok(())
    }

    pub fn stroke_color(&self) -> Result<Vec<f64>, SceneError> {
        guard(self.apply_stroke, "strokeColor", "applyStroke")?;
        Ok(self.stroke_color.clone())
    }

    pub fn set_stroke_color(&mut self, color: Vec<f64>) -> Result<(), SceneError> {
        guard(self.apply_stroke, "strokeColor", "applyStroke")?;
        self.stroke_color = color;
        Ok(())
    }

    pub fn stroke_over_fill(&self) -> Result<bool, SceneError> {
        guard(self.apply_stroke, "strokeOverFill", "applyStroke")?;
        Ok(self.stroke_over_fill)
    }

    pub fn set_stroke_over_fill(&mut self, on: bool) -> Result<(), SceneError> {
        guard(self.apply_stroke, "strokeOverFill", "applyStroke")?;
        self.stroke_over_fill = on;
        Ok(())
    }

    pub fn stroke_width(&self) -> Result<f64, SceneError> {
        guard(self.apply_stroke, "strokeWidth", "applyStroke")?;
        Ok(self.stroke_width)
    }

    pub fn set_stroke_width(&mut self, width: f64) -> Result<(), SceneError> {
        guard(self.apply_stroke, "strokeWidth", "applyStroke")?;
        self.stroke_width = width;
        Ok(())
    }

    pub fn box_text_pos(&self) -> Result<Vec<f64>, SceneError> {
        guard(self.box_text, "boxTextPos", "boxText")?;
        Ok(self.box_text_pos.clone())
    }

    pub fn set_box_text_pos(&mut self, pos: Vec<f64>) -> Result<(), SceneError> {
        guard(self.box_text, "boxTextPos", "boxText")?;
        self.box_text_pos = pos;
        Ok(())
    }

    pub fn box_text_size(&self) -> Result<Vec<f64>, SceneError> {
        guard(self.box_text, "boxTextSize", "boxText")?;
        Ok(self.box_text_size.clone())
    }

    pub fn set_box_text_size(&mut self, size: Vec<f64>) -> Result<(), SceneError> {
        guard(self.box_text, "boxTextSize", "boxText")?;
        self.box_text_size = size;
        Ok(())
    }
}
