//! Static print-mode rendering of a design document to SVG.
//!
//! This is the render contract shared by the export adapter and the
//! issuance renderer: a 1:1, non-interactive picture of the page with no
//! grid, guides or selection handles. Every element goes through the same
//! [`crate::geometry::resolve_style`] the interactive canvas uses, so print
//! output matches the editable canvas at zoom 1.

use crate::constants;
use crate::geometry::{percent_to_page, resolve_style, PaintProps, Rgba, SizeRule};
use crate::types::{CertificateElement, DesignDocument, ElementKind, TextAlign};
use std::fmt::Write as _;

/// Renders a design document to a complete SVG string at 1:1 page scale.
///
/// Elements are painted in ascending z-index order (ties by sequence order)
/// with hidden elements excluded, over the background color and optional
/// background image.
pub fn design_to_svg(doc: &DesignDocument) -> String {
    let width = constants::PAGE_WIDTH;
    let height = constants::PAGE_HEIGHT;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = width,
        h = height
    );

    // Background color, tolerant of junk hex the same way element styles are.
    let bg = crate::geometry::parse_hex_color(&doc.background_color).unwrap_or([255, 255, 255]);
    let _ = writeln!(
        out,
        "<rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"#{:02x}{:02x}{:02x}\" />",
        bg[0],
        bg[1],
        bg[2],
        w = width,
        h = height
    );

    if let Some(url) = &doc.background_image_url {
        let _ = writeln!(
            out,
            "<image href=\"{}\" x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" preserveAspectRatio=\"xMidYMid slice\" />",
            escape_xml(url),
            w = width,
            h = height
        );
    }

    for element in doc.paint_order() {
        render_element(&mut out, element);
    }

    let _ = writeln!(out, "</svg>");
    out
}

/// Renders one element through the shared style resolver.
fn render_element(out: &mut String, element: &CertificateElement) {
    let props = resolve_style(element);
    let (cx, cy) = percent_to_page(
        element.position,
        (constants::PAGE_WIDTH, constants::PAGE_HEIGHT),
    );

    let transform = if props.rotation != 0.0 {
        format!(" transform=\"rotate({:.1} {:.1} {:.1})\"", props.rotation, cx, cy)
    } else {
        String::new()
    };

    match element.kind {
        ElementKind::Text | ElementKind::Placeholder => {
            render_text(out, element, &props, cx, cy, &transform);
        }
        ElementKind::Image => {
            let SizeRule::Explicit(w, h) = props.size else {
                return;
            };
            let _ = writeln!(
                out,
                "<image href=\"{}\" x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" opacity=\"{:.3}\"{} />",
                escape_xml(&element.content),
                cx - w / 2.0,
                cy - h / 2.0,
                w,
                h,
                props.color[3] as f32 / 255.0,
                transform
            );
        }
        ElementKind::Shape => {
            let SizeRule::Explicit(w, h) = props.size else {
                return;
            };
            let fill = props.background.unwrap_or(props.color);
            if element.content == "ellipse" {
                let _ = writeln!(
                    out,
                    "<ellipse cx=\"{:.1}\" cy=\"{:.1}\" rx=\"{:.1}\" ry=\"{:.1}\" fill=\"{}\" fill-opacity=\"{:.3}\"{} />",
                    cx,
                    cy,
                    w / 2.0,
                    h / 2.0,
                    hex(fill),
                    fill[3] as f32 / 255.0,
                    transform
                );
            } else {
                let _ = writeln!(
                    out,
                    "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" fill-opacity=\"{:.3}\"{} />",
                    cx - w / 2.0,
                    cy - h / 2.0,
                    w,
                    h,
                    hex(fill),
                    fill[3] as f32 / 255.0,
                    transform
                );
            }
        }
        ElementKind::Line => {
            let SizeRule::Explicit(w, h) = props.size else {
                return;
            };
            let dash = if element.content == "dashed" {
                " stroke-dasharray=\"8 6\""
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-opacity=\"{:.3}\" stroke-width=\"{:.1}\"{}{} />",
                cx - w / 2.0,
                cy,
                cx + w / 2.0,
                cy,
                hex(props.color),
                props.color[3] as f32 / 255.0,
                h,
                dash,
                transform
            );
        }
    }
}

/// Renders a text or placeholder element as anchored, wrapped tspans.
fn render_text(
    out: &mut String,
    element: &CertificateElement,
    props: &PaintProps,
    cx: f32,
    cy: f32,
    transform: &str,
) {
    let max_width = props.size.width();
    let lines = wrap_text(&element.content, max_width, props.font_size, props.letter_spacing);
    let line_height = props.font_size * props.line_height;
    let total_height = line_height * lines.len() as f32;

    // Anchor x depends on alignment within the element box.
    let (anchor, x) = match props.align {
        TextAlign::Left => ("start", cx - max_width / 2.0),
        TextAlign::Center => ("middle", cx),
        TextAlign::Right => ("end", cx + max_width / 2.0),
    };

    // Optional background behind the text box.
    if let Some(bg) = props.background {
        let _ = writeln!(
            out,
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" fill-opacity=\"{:.3}\"{} />",
            cx - max_width / 2.0,
            cy - total_height / 2.0,
            max_width,
            total_height,
            hex(bg),
            bg[3] as f32 / 255.0,
            transform
        );
    }

    let weight = if props.bold { " font-weight=\"bold\"" } else { "" };
    let style = if props.italic { " font-style=\"italic\"" } else { "" };
    let spacing = if props.letter_spacing != 0.0 {
        format!(" letter-spacing=\"{:.1}\"", props.letter_spacing)
    } else {
        String::new()
    };

    // First baseline centers the block vertically on the element position.
    let start_y = cy - total_height / 2.0 + line_height * 0.75;

    let _ = writeln!(
        out,
        "<text x=\"{:.1}\" y=\"{:.1}\" font-family=\"{}\" font-size=\"{:.1}\" fill=\"{}\" fill-opacity=\"{:.3}\" text-anchor=\"{}\"{}{}{}{}>",
        x,
        start_y,
        escape_xml(&props.font_family),
        props.font_size,
        hex(props.color),
        props.color[3] as f32 / 255.0,
        anchor,
        weight,
        style,
        spacing,
        transform
    );
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            let _ = writeln!(out, "  <tspan x=\"{:.1}\" dy=\"0\">{}</tspan>", x, escape_xml(line));
        } else {
            let _ = writeln!(
                out,
                "  <tspan x=\"{:.1}\" dy=\"{:.1}\">{}</tspan>",
                x,
                line_height,
                escape_xml(line)
            );
        }
    }
    let _ = writeln!(out, "</text>");
}

/// Wraps text at word boundaries using an average-glyph-width estimate.
///
/// SVG has no automatic wrapping, so the print renderer approximates the
/// box width the same way for every export; a single over-long word is
/// placed on its own line rather than split.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32, letter_spacing: f32) -> Vec<String> {
    let char_width = font_size * 0.55 + letter_spacing;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in words {
            let candidate_len = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if candidate_len as f32 * char_width <= max_width || current.is_empty() {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
            } else {
                lines.push(current);
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(text.to_string());
    }
    lines
}

fn hex(color: Rgba) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// Escapes the XML special characters in element content.
pub fn escape_xml(input: &str) -> String {
    let mut s = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            '\'' => s.push_str("&apos;"),
            _ => s.push(ch),
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ElementKind, PercentPos};

    #[test]
    fn test_svg_has_page_dimensions_and_background() {
        let doc = DesignDocument {
            background_color: "#fff8e7".to_string(),
            ..DesignDocument::default()
        };
        let svg = design_to_svg(&doc);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("viewBox=\"0 0 1123 794\""));
        assert!(svg.contains("fill=\"#fff8e7\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_hidden_elements_are_not_rendered() {
        let mut doc = DesignDocument::default();
        let mut element = CertificateElement::new(ElementKind::Text, Some("ghost".into()));
        element.visible = false;
        doc.elements.push(element);

        assert!(!design_to_svg(&doc).contains("ghost"));
    }

    #[test]
    fn test_elements_render_in_z_order() {
        let mut doc = DesignDocument::default();
        let mut top = CertificateElement::new(ElementKind::Text, Some("topmost".into()));
        top.z_index = 5;
        let mut bottom = CertificateElement::new(ElementKind::Text, Some("bottommost".into()));
        bottom.z_index = 1;
        doc.elements.push(top);
        doc.elements.push(bottom);

        let svg = design_to_svg(&doc);
        let bottom_at = svg.find("bottommost").unwrap();
        let top_at = svg.find("topmost").unwrap();
        assert!(bottom_at < top_at, "lower z-index must be painted first");
    }

    #[test]
    fn test_text_position_follows_percent_coordinates() {
        let mut doc = DesignDocument::default();
        let mut element = CertificateElement::new(ElementKind::Line, None);
        element.position = PercentPos::new(50.0, 50.0);
        doc.elements.push(element);

        let svg = design_to_svg(&doc);
        // Line midpoint y at 50% of 794 = 397.
        assert!(svg.contains("y1=\"397.0\""));
    }

    #[test]
    fn test_shape_descriptor_selects_svg_primitive() {
        let mut doc = DesignDocument::default();
        doc.elements
            .push(CertificateElement::new(ElementKind::Shape, Some("ellipse".into())));
        assert!(design_to_svg(&doc).contains("<ellipse"));

        let mut doc = DesignDocument::default();
        doc.elements
            .push(CertificateElement::new(ElementKind::Shape, Some("rectangle".into())));
        assert!(design_to_svg(&doc).contains("<rect"));
    }

    #[test]
    fn test_content_is_xml_escaped() {
        let mut doc = DesignDocument::default();
        doc.elements.push(CertificateElement::new(
            ElementKind::Text,
            Some("Fish & <Chips>".into()),
        ));
        let svg = design_to_svg(&doc);
        assert!(svg.contains("Fish &amp; &lt;Chips&gt;"));
    }

    #[test]
    fn test_rotation_emits_transform() {
        let mut doc = DesignDocument::default();
        let mut element = CertificateElement::new(ElementKind::Shape, None);
        element.style.rotation = 45.0;
        doc.elements.push(element);
        assert!(design_to_svg(&doc).contains("rotate(45.0"));
    }

    #[test]
    fn test_wrap_text_breaks_at_word_boundaries() {
        let lines = wrap_text("alpha beta gamma delta", 60.0, 20.0, 0.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(!line.starts_with(' ') && !line.ends_with(' '));
        }
        assert_eq!(lines.join(" "), "alpha beta gamma delta");
    }

    #[test]
    fn test_wrap_text_keeps_overlong_word_whole() {
        let lines = wrap_text("supercalifragilistic", 10.0, 20.0, 0.0);
        assert_eq!(lines, vec!["supercalifragilistic"]);
    }

    #[test]
    fn test_dashed_line_gets_dasharray() {
        let mut doc = DesignDocument::default();
        doc.elements
            .push(CertificateElement::new(ElementKind::Line, Some("dashed".into())));
        assert!(design_to_svg(&doc).contains("stroke-dasharray"));

        let mut doc = DesignDocument::default();
        doc.elements
            .push(CertificateElement::new(ElementKind::Line, Some("solid".into())));
        assert!(!design_to_svg(&doc).contains("stroke-dasharray"));
    }

    #[test]
    fn test_background_image_rendered_under_elements() {
        let doc = DesignDocument {
            background_image_url: Some("https://example.com/border.png".to_string()),
            ..DesignDocument::default()
        };
        let svg = design_to_svg(&doc);
        assert!(svg.contains("href=\"https://example.com/border.png\""));
    }
}
