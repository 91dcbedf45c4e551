//! Read-only certificate rendering at issuance time.
//!
//! Issuance takes a finished template record plus a recipient data record,
//! substitutes placeholder tokens, and produces the same static render the
//! export path uses. Visual templates go through the element collection;
//! legacy templates go through a fixed non-visual layout built from the
//! template's title/body text. The two paths are mutually exclusive per
//! template, switched on `use_visual_editor`.

use crate::constants;
use crate::placeholders::{substitute, RecipientData};
use crate::render::{design_to_svg, escape_xml, wrap_text};
use crate::types::{DesignDocument, TemplateRecord};
use std::fmt::Write as _;

/// Returns a copy of the design document with every placeholder token in
/// text/placeholder element content replaced by recipient data.
///
/// Non-textual elements (images, shapes, lines) pass through untouched, as
/// do tokens whose recipient field is absent.
pub fn substitute_design(doc: &DesignDocument, recipient: &RecipientData) -> DesignDocument {
    let mut resolved = doc.clone();
    for element in &mut resolved.elements {
        if element.is_textual() {
            element.content = substitute(&element.content, recipient);
        }
    }
    resolved
}

/// Renders a final certificate for one recipient as a static SVG.
///
/// Dispatches on `use_visual_editor`: visual templates substitute into the
/// element collection and render through the shared print renderer; legacy
/// templates render the fixed title/body/signature layout.
pub fn render_certificate(record: &TemplateRecord, recipient: &RecipientData) -> String {
    if record.design.use_visual_editor {
        design_to_svg(&substitute_design(&record.design, recipient))
    } else {
        render_legacy(record, recipient)
    }
}

/// Renders a legacy (non-visual) template: centered title, wrapped body text
/// and a signature block, on the template's background color.
fn render_legacy(record: &TemplateRecord, recipient: &RecipientData) -> String {
    let width = constants::PAGE_WIDTH;
    let height = constants::PAGE_HEIGHT;
    let bg = crate::geometry::parse_hex_color(&record.design.background_color)
        .unwrap_or([255, 255, 255]);

    let title = substitute(&record.meta.title_text, recipient);
    let body = substitute(&record.meta.body_text, recipient);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = width,
        h = height
    );
    let _ = writeln!(
        out,
        "<rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"#{:02x}{:02x}{:02x}\" />",
        bg[0],
        bg[1],
        bg[2],
        w = width,
        h = height
    );

    let cx = width / 2.0;
    let _ = writeln!(
        out,
        "<text x=\"{:.1}\" y=\"{:.1}\" font-family=\"serif\" font-size=\"48\" fill=\"#000000\" text-anchor=\"middle\">{}</text>",
        cx,
        height * 0.25,
        escape_xml(&title)
    );

    // Body block: wrapped to two thirds of the page width.
    let body_font = 24.0;
    let line_height = body_font * 1.5;
    let lines = wrap_text(&body, width * 0.66, body_font, 0.0);
    let mut y = height * 0.4;
    for line in &lines {
        let _ = writeln!(
            out,
            "<text x=\"{:.1}\" y=\"{:.1}\" font-family=\"serif\" font-size=\"{}\" fill=\"#000000\" text-anchor=\"middle\">{}</text>",
            cx,
            y,
            body_font,
            escape_xml(line)
        );
        y += line_height;
    }

    // Signature block, bottom right.
    if !record.meta.signature_name.is_empty() {
        let sig_x = width * 0.75;
        let _ = writeln!(
            out,
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#000000\" stroke-width=\"1\" />",
            sig_x - 120.0,
            height * 0.85,
            sig_x + 120.0,
            height * 0.85
        );
        let _ = writeln!(
            out,
            "<text x=\"{:.1}\" y=\"{:.1}\" font-family=\"serif\" font-size=\"20\" fill=\"#000000\" text-anchor=\"middle\">{}</text>",
            sig_x,
            height * 0.85 + 28.0,
            escape_xml(&record.meta.signature_name)
        );
        if !record.meta.signature_title.is_empty() {
            let _ = writeln!(
                out,
                "<text x=\"{:.1}\" y=\"{:.1}\" font-family=\"serif\" font-size=\"16\" fill=\"#444444\" text-anchor=\"middle\">{}</text>",
                sig_x,
                height * 0.85 + 50.0,
                escape_xml(&record.meta.signature_title)
            );
        }
    }

    let _ = writeln!(out, "</svg>");
    out
}
