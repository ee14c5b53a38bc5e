//! Text document transform.
//!
//! Fill, stroke and box fields are only touched while their governing flag
//! is on, so a read never trips a host access error.

use crate::error::AexError;
use crate::normalize::{modified, modified_num, read_if, Rounded};
use crate::scene::TextDocument;
use aex_data::model::AexTextDocument;

const BLACK: [f64; 3] = [0.0, 0.0, 0.0];
const ORIGIN: [f64; 2] = [0.0, 0.0];

pub fn encode_text_document(doc: &TextDocument) -> Result<AexTextDocument, AexError> {
    let d = TextDocument::default();

    Ok(AexTextDocument {
        text: modified(doc.text.clone(), d.text),
        font: modified(doc.font.clone(), d.font),
        font_family: modified(doc.font_family.clone(), d.font_family),
        font_style: modified(doc.font_style.clone(), d.font_style),
        font_size: modified_num(doc.font_size, d.font_size),
        all_caps: modified(doc.all_caps, d.all_caps),
        small_caps: modified(doc.small_caps, d.small_caps),
        faux_bold: modified(doc.faux_bold, d.faux_bold),
        faux_italic: modified(doc.faux_italic, d.faux_italic),
        subscript: modified(doc.subscript, d.subscript),
        superscript: modified(doc.superscript, d.superscript),
        baseline_locs: modified_num(doc.baseline_locs.clone(), d.baseline_locs),
        baseline_shift: modified_num(doc.baseline_shift, d.baseline_shift),
        horizontal_scale: modified_num(doc.horizontal_scale, d.horizontal_scale),
        vertical_scale: modified_num(doc.vertical_scale, d.vertical_scale),
        leading: modified_num(doc.leading, d.leading),
        tracking: modified_num(doc.tracking, d.tracking),
        tsume: modified_num(doc.tsume, d.tsume),
        justification: modified(doc.justification, d.justification),

        apply_fill: modified(doc.apply_fill(), false),
        fill_color: read_if(
            doc.apply_fill(),
            || doc.fill_color().map(|c| c.rounded()),
            BLACK.to_vec(),
        )?,

        apply_stroke: modified(doc.apply_stroke(), false),
        stroke_color: read_if(
            doc.apply_stroke(),
            || doc.stroke_color().map(|c| c.rounded()),
            BLACK.to_vec(),
        )?,
        stroke_over_fill: read_if(doc.apply_stroke(), || doc.stroke_over_fill(), false)?,
        stroke_width: read_if(
            doc.apply_stroke(),
            || doc.stroke_width().map(|w| w.rounded()),
            0.0,
        )?,

        box_text: modified(doc.box_text(), false),
        box_text_pos: read_if(
            doc.box_text(),
            || doc.box_text_pos().map(|p| p.rounded()),
            ORIGIN.to_vec(),
        )?,
        box_text_size: read_if(
            doc.box_text(),
            || doc.box_text_size().map(|s| s.rounded()),
            ORIGIN.to_vec(),
        )?,
    })
}

/// Builds a host text document from a fresh default, setting the guarded
/// flags before the fields they govern.
pub fn decode_text_document(doc: &AexTextDocument) -> Result<TextDocument, AexError> {
    let mut out = TextDocument::default();

    macro_rules! assign {
        ($($field:ident),* $(,)?) => {
            $(if let Some(v) = &doc.$field { out.$field = v.clone(); })*
        };
    }
    assign!(
        text, font, font_family, font_style, font_size, all_caps, small_caps, faux_bold,
        faux_italic, subscript, superscript, baseline_locs, baseline_shift, horizontal_scale,
        vertical_scale, leading, tracking, tsume, justification,
    );

    out.set_apply_fill(doc.apply_fill.unwrap_or(false));
    if let Some(color) = &doc.fill_color {
        out.set_fill_color(color.clone())?;
    }

    out.set_apply_stroke(doc.apply_stroke.unwrap_or(false));
    if let Some(color) = &doc.stroke_color {
        out.set_stroke_color(color.clone())?;
    }
    if let Some(on) = doc.stroke_over_fill {
        out.set_stroke_over_fill(on)?;
    }
    if let Some(width) = doc.stroke_width {
        out.set_stroke_width(width)?;
    }

    out.set_box_text(doc.box_text.unwrap_or(false));
    if let Some(pos) = &doc.box_text_pos {
        out.set_box_text_pos(pos.clone())?;
    }
    if let Some(size) = &doc.box_text_size {
        out.set_box_text_size(size.clone())?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneError;
    use serde_json::json;

    #[test]
    fn fresh_document_encodes_to_text_only() {
        let doc = TextDocument::new("Hello");
        let out = encode_text_document(&doc).unwrap();
        assert_eq!(serde_json::to_value(&out).unwrap(), json!({ "text": "Hello" }));
    }

    #[test]
    fn guarded_fields_are_skipped_while_flag_is_off() {
        let mut doc = TextDocument::new("Hi");
        doc.set_apply_fill(true);
        doc.set_fill_color(vec![1.0, 0.0, 0.0]).unwrap();
        doc.set_apply_fill(false);

        let out = encode_text_document(&doc).unwrap();
        assert_eq!(out.fill_color, None);
        assert_eq!(out.apply_fill, None);
    }

    #[test]
    fn box_text_round_trips() {
        let mut doc = TextDocument::new("Paragraph");
        doc.set_box_text(true);
        doc.set_box_text_size(vec![400.0, 200.0]).unwrap();
        doc.set_apply_stroke(true);
        doc.set_stroke_width(2.5).unwrap();

        let encoded = encode_text_document(&doc).unwrap();
        assert_eq!(encoded.box_text, Some(true));
        assert_eq!(encoded.box_text_size, Some(vec![400.0, 200.0]));
        assert_eq!(encoded.box_text_pos, None);

        assert_eq!(decode_text_document(&encoded).unwrap(), doc);
    }

    #[test]
    fn guarded_field_without_its_flag_is_a_host_error() {
        let doc = AexTextDocument {
            fill_color: Some(vec![1.0, 1.0, 1.0]),
            ..AexTextDocument::default()
        };
        let err = decode_text_document(&doc).unwrap_err();
        assert!(matches!(
            err,
            AexError::Host(SceneError::GuardedAccess {
                attribute: "fillColor",
                ..
            })
        ));
    }
}
