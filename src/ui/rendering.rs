//! Interactive canvas rendering for the certificate page and its elements.
//!
//! This module paints the page, the optional grid overlay, and every visible
//! element in z-order. Paint properties come from the shared style resolver,
//! so what this canvas shows matches the print and issuance renders; only
//! the zoom scaling differs.

use super::state::DesignerApp;
use crate::constants;
use crate::geometry::{parse_hex_color, resolve_style, PaintProps, Rgba, SizeRule};
use crate::types::{CertificateElement, ElementKind, TextAlign};
use eframe::egui;
use eframe::epaint::StrokeKind;

fn to_color32(rgba: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3])
}

fn rotate_around(p: egui::Pos2, center: egui::Pos2, radians: f32) -> egui::Pos2 {
    let (sin, cos) = radians.sin_cos();
    let v = p - center;
    egui::pos2(
        center.x + v.x * cos - v.y * sin,
        center.y + v.x * sin + v.y * cos,
    )
}

impl DesignerApp {
    /// Renders the page and all visible elements onto the canvas.
    ///
    /// Elements are painted in ascending z-order (stable for ties), and the
    /// screen-space hit rectangle of each painted element is recorded for
    /// hit testing in the same order.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `page_rect` - The page rectangle in screen space
    pub fn render_design(&mut self, painter: &egui::Painter, page_rect: egui::Rect) {
        self.draw_page_background(painter, page_rect);

        if self.canvas.show_grid {
            self.draw_grid(painter, page_rect);
        }

        let ordered: Vec<CertificateElement> = self
            .record
            .design
            .paint_order()
            .into_iter()
            .cloned()
            .collect();

        let mut rects = Vec::with_capacity(ordered.len());
        for element in &ordered {
            let props = resolve_style(element);
            let rect = self.draw_element(painter, page_rect, element, &props);
            rects.push((element.id, rect));
        }
        self.interaction.element_rects = rects;

        self.draw_selection_outline(painter);
    }

    /// Fills the page with its background color and draws a border so the
    /// page edge is visible against the surrounding canvas.
    fn draw_page_background(&self, painter: &egui::Painter, page_rect: egui::Rect) {
        let bg = parse_hex_color(&self.record.design.background_color).unwrap_or([255, 255, 255]);
        painter.rect_filled(
            page_rect,
            0.0,
            egui::Color32::from_rgb(bg[0], bg[1], bg[2]),
        );
        painter.rect_stroke(
            page_rect,
            0.0,
            egui::Stroke::new(1.0, egui::Color32::from_gray(100)),
            StrokeKind::Outside,
        );
    }

    /// Draws grid lines across the page every 5% plus stronger guides at
    /// the horizontal and vertical center lines.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `page_rect` - The page rectangle in screen space
    pub fn draw_grid(&self, painter: &egui::Painter, page_rect: egui::Rect) {
        let grid_color = egui::Color32::from_rgba_unmultiplied(128, 128, 128, 32);
        let stroke = egui::Stroke::new(1.0, grid_color);
        let guide_color = egui::Color32::from_rgba_unmultiplied(100, 150, 255, 90);
        let guide_stroke = egui::Stroke::new(1.5, guide_color);

        let mut percent = constants::GRID_STEP_PERCENT;
        while percent < 100.0 {
            let x = page_rect.min.x + percent / 100.0 * page_rect.width();
            let y = page_rect.min.y + percent / 100.0 * page_rect.height();
            let center = (percent - 50.0).abs() < f32::EPSILON;
            let s = if center { guide_stroke } else { stroke };

            painter.line_segment(
                [
                    egui::pos2(x, page_rect.min.y),
                    egui::pos2(x, page_rect.max.y),
                ],
                s,
            );
            painter.line_segment(
                [
                    egui::pos2(page_rect.min.x, y),
                    egui::pos2(page_rect.max.x, y),
                ],
                s,
            );
            percent += constants::GRID_STEP_PERCENT;
        }
    }

    /// Draws one element and returns its screen-space hit rectangle.
    fn draw_element(
        &self,
        painter: &egui::Painter,
        page_rect: egui::Rect,
        element: &CertificateElement,
        props: &PaintProps,
    ) -> egui::Rect {
        let zoom = page_rect.width() / constants::PAGE_WIDTH;
        let center = self.percent_to_screen(element.position, page_rect);

        match element.kind {
            ElementKind::Text | ElementKind::Placeholder => {
                self.draw_text_element(painter, element, props, center, zoom)
            }
            ElementKind::Image => self.draw_image_element(painter, element, props, center, zoom),
            ElementKind::Shape => self.draw_shape_element(painter, element, props, center, zoom),
            ElementKind::Line => self.draw_line_element(painter, element, props, center, zoom),
        }
    }

    /// Renders a text or placeholder element with wrapping, alignment and
    /// rotation. Font sizes and spacing scale with the zoom factor so the
    /// page keeps its print proportions at any zoom.
    ///
    /// Bold is an editor-side approximation gap: egui's `TextFormat` carries
    /// no font weight, so bold text paints at regular weight here while the
    /// exported and issued renders emit `font-weight="bold"`.
    fn draw_text_element(
        &self,
        painter: &egui::Painter,
        element: &CertificateElement,
        props: &PaintProps,
        center: egui::Pos2,
        zoom: f32,
    ) -> egui::Rect {
        let width = props.size.width() * zoom;
        let color = to_color32(props.color);
        let family = if props.font_family.eq_ignore_ascii_case("monospace") {
            egui::FontFamily::Monospace
        } else {
            egui::FontFamily::Proportional
        };

        let mut job = egui::text::LayoutJob::default();
        job.wrap.max_width = width;
        job.halign = match props.align {
            TextAlign::Left => egui::Align::LEFT,
            TextAlign::Center => egui::Align::Center,
            TextAlign::Right => egui::Align::RIGHT,
        };
        job.append(
            &element.content,
            0.0,
            egui::TextFormat {
                font_id: egui::FontId::new(props.font_size * zoom, family),
                color,
                italics: props.italic,
                extra_letter_spacing: props.letter_spacing * zoom,
                line_height: Some(props.font_size * props.line_height * zoom),
                ..Default::default()
            },
        );
        let galley = painter.fonts_mut(|f| f.layout_job(job));

        let text_height = galley.size().y;
        let box_rect = egui::Rect::from_center_size(
            center,
            egui::vec2(width, text_height.max(props.box_height() * zoom)),
        );

        if let Some(bg) = props.background {
            painter.rect_filled(box_rect, 0.0, to_color32(bg));
        }

        // The anchor x follows the layout's horizontal alignment.
        let anchor_x = match props.align {
            TextAlign::Left => center.x - width / 2.0,
            TextAlign::Center => center.x,
            TextAlign::Right => center.x + width / 2.0,
        };
        let pos = egui::pos2(anchor_x, center.y - text_height / 2.0);

        if props.rotation != 0.0 {
            // TextShape rotates around its anchor, but the document semantics
            // rotate around the element center (what the print render's
            // rotate(deg cx cy) does). Moving the anchor onto its rotated
            // position makes the two pivots coincide.
            let radians = props.rotation.to_radians();
            let pivot = rotate_around(pos, center, radians);
            painter.add(eframe::epaint::TextShape::new(pivot, galley, color).with_angle(radians));
        } else {
            painter.galley(pos, galley, color);
        }

        box_rect
    }

    /// Renders an image element as a framed box labeled with the image URL.
    ///
    /// The editor does not fetch remote images; the real bitmap appears in
    /// the exported and issued renders.
    fn draw_image_element(
        &self,
        painter: &egui::Painter,
        element: &CertificateElement,
        props: &PaintProps,
        center: egui::Pos2,
        zoom: f32,
    ) -> egui::Rect {
        let SizeRule::Explicit(w, h) = props.size else {
            return egui::Rect::from_center_size(center, egui::Vec2::ZERO);
        };
        let rect = egui::Rect::from_center_size(center, egui::vec2(w * zoom, h * zoom));

        painter.rect_filled(rect, 0.0, egui::Color32::from_gray(230));
        painter.rect_stroke(
            rect,
            0.0,
            egui::Stroke::new(1.0, egui::Color32::from_gray(120)),
            StrokeKind::Inside,
        );
        let diagonal_stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(180));
        painter.line_segment([rect.left_top(), rect.right_bottom()], diagonal_stroke);
        painter.line_segment([rect.left_bottom(), rect.right_top()], diagonal_stroke);

        let label = if element.content.is_empty() {
            "image"
        } else {
            &element.content
        };
        let font_size = (11.0 * zoom).clamp(8.0, 24.0);
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(font_size),
            egui::Color32::from_gray(80),
        );

        rect
    }

    /// Renders a shape element (rectangle or ellipse), honoring rotation
    /// for rectangles.
    fn draw_shape_element(
        &self,
        painter: &egui::Painter,
        element: &CertificateElement,
        props: &PaintProps,
        center: egui::Pos2,
        zoom: f32,
    ) -> egui::Rect {
        let SizeRule::Explicit(w, h) = props.size else {
            return egui::Rect::from_center_size(center, egui::Vec2::ZERO);
        };
        let size = egui::vec2(w * zoom, h * zoom);
        let rect = egui::Rect::from_center_size(center, size);
        let fill = to_color32(props.background.unwrap_or(props.color));

        if element.content == "ellipse" {
            if props.rotation != 0.0 {
                let radians = props.rotation.to_radians();
                let (rx, ry) = (size.x / 2.0, size.y / 2.0);
                let steps = 48;
                let points: Vec<egui::Pos2> = (0..steps)
                    .map(|i| {
                        let t = i as f32 / steps as f32 * std::f32::consts::TAU;
                        let p = egui::pos2(center.x + rx * t.cos(), center.y + ry * t.sin());
                        rotate_around(p, center, radians)
                    })
                    .collect();
                painter.add(egui::Shape::convex_polygon(points, fill, egui::Stroke::NONE));
            } else {
                painter.add(egui::Shape::ellipse_filled(center, size * 0.5, fill));
            }
        } else if props.rotation != 0.0 {
            let radians = props.rotation.to_radians();
            let corners = vec![
                rotate_around(rect.left_top(), center, radians),
                rotate_around(rect.right_top(), center, radians),
                rotate_around(rect.right_bottom(), center, radians),
                rotate_around(rect.left_bottom(), center, radians),
            ];
            painter.add(egui::Shape::convex_polygon(
                corners,
                fill,
                egui::Stroke::NONE,
            ));
        } else {
            painter.rect_filled(rect, 0.0, fill);
        }

        rect
    }

    /// Renders a line element as a stroke through the element center,
    /// rotated by the style's rotation angle.
    fn draw_line_element(
        &self,
        painter: &egui::Painter,
        element: &CertificateElement,
        props: &PaintProps,
        center: egui::Pos2,
        zoom: f32,
    ) -> egui::Rect {
        let SizeRule::Explicit(w, h) = props.size else {
            return egui::Rect::from_center_size(center, egui::Vec2::ZERO);
        };
        let half = w * zoom / 2.0;
        let radians = props.rotation.to_radians();
        let start = rotate_around(egui::pos2(center.x - half, center.y), center, radians);
        let end = rotate_around(egui::pos2(center.x + half, center.y), center, radians);

        let thickness = (h * zoom).max(1.0);
        let stroke = egui::Stroke::new(thickness, to_color32(props.color));
        if element.content == "dashed" {
            painter.add(egui::Shape::dashed_line(
                &[start, end],
                stroke,
                8.0 * zoom,
                6.0 * zoom,
            ));
        } else {
            painter.line_segment([start, end], stroke);
        }

        // Hit rect gets a minimum height so thin lines stay clickable.
        egui::Rect::from_center_size(center, egui::vec2(w * zoom, (h * zoom).max(8.0)))
    }

    /// Draws the selection outline with corner handles around the selected
    /// element, using the hit rectangle recorded during this frame's paint.
    fn draw_selection_outline(&self, painter: &egui::Painter) {
        let Some(selected_id) = self.interaction.selected_element else {
            return;
        };
        let Some((_, rect)) = self
            .interaction
            .element_rects
            .iter()
            .find(|(id, _)| *id == selected_id)
        else {
            return;
        };

        let dragging = self.interaction.dragging_element == Some(selected_id);
        let color = if dragging {
            egui::Color32::from_rgb(255, 165, 0)
        } else {
            egui::Color32::from_rgb(100, 150, 255)
        };
        let outline = rect.expand(2.0);
        painter.rect_stroke(outline, 0.0, egui::Stroke::new(2.0, color), StrokeKind::Outside);

        let handle = egui::vec2(6.0, 6.0);
        for corner in [
            outline.left_top(),
            outline.right_top(),
            outline.left_bottom(),
            outline.right_bottom(),
        ] {
            painter.rect_filled(egui::Rect::from_center_size(corner, handle), 1.0, color);
        }
    }
}
