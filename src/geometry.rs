//! Percent-coordinate math and the shared style resolver.
//!
//! Everything in this module is pure: pointer deltas become percentage
//! position updates, and an element's flat style record becomes concrete
//! paint properties. [`resolve_style`] is the single source of truth for
//! "what an element looks like" and is consumed by the interactive canvas,
//! the print renderer and the issuance renderer alike, which is what
//! guarantees pixel parity across the three contexts.

use crate::constants;
use crate::types::{CertificateElement, ElementKind, ElementStyle, PercentPos, TextAlign};

/// An RGBA color with 8-bit channels.
pub type Rgba = [u8; 4];

/// Converts a pointer movement in screen pixels into a new clamped
/// percentage position.
///
/// The screen delta is divided by the zoom factor (screen pixels per page
/// pixel) and by the page dimensions to obtain a percentage delta, which is
/// added to the drag-start position. Each axis is clamped to `[0, 100]`:
/// elements can never be dragged fully off-canvas.
pub fn drag_to_percent(
    delta_px: (f32, f32),
    zoom: f32,
    page_size: (f32, f32),
    start: PercentPos,
) -> PercentPos {
    let zoom = if zoom > 0.0 { zoom } else { 1.0 };
    let dx_percent = delta_px.0 / zoom / page_size.0 * 100.0;
    let dy_percent = delta_px.1 / zoom / page_size.1 * 100.0;
    PercentPos::new(start.x + dx_percent, start.y + dy_percent)
}

/// Converts a percentage position to page-pixel coordinates at 1:1 zoom.
pub fn percent_to_page(pos: PercentPos, page_size: (f32, f32)) -> (f32, f32) {
    (
        pos.x / 100.0 * page_size.0,
        pos.y / 100.0 * page_size.1,
    )
}

/// Sizing rule for an element's box, differing by kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeRule {
    /// Text wraps to this maximum width; height is intrinsic.
    MaxWidth(f32),
    /// Explicit width and height in page pixels.
    Explicit(f32, f32),
}

impl SizeRule {
    /// The box width in page pixels.
    pub fn width(&self) -> f32 {
        match self {
            SizeRule::MaxWidth(w) => *w,
            SizeRule::Explicit(w, _) => *w,
        }
    }
}

/// Concrete paint properties resolved from an element's style record.
///
/// Framework-neutral on purpose: both the egui painter and the SVG renderer
/// consume this without further interpretation of the style record.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintProps {
    /// Foreground color with opacity premultiplied into the alpha channel.
    pub color: Rgba,
    /// Background fill with opacity applied, if any.
    pub background: Option<Rgba>,
    /// Font size in page pixels.
    pub font_size: f32,
    /// Font family name.
    pub font_family: String,
    /// Bold weight flag.
    pub bold: bool,
    /// Italic style flag.
    pub italic: bool,
    /// Horizontal text alignment.
    pub align: TextAlign,
    /// Rotation in degrees around the element center.
    pub rotation: f32,
    /// Additional letter spacing in page pixels.
    pub letter_spacing: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    /// Kind-dependent sizing rule.
    pub size: SizeRule,
}

impl PaintProps {
    /// The element box height in page pixels, estimating a single line of
    /// text for auto-sized elements. Used for hit testing and shape fills;
    /// text rendering itself uses intrinsic layout height.
    pub fn box_height(&self) -> f32 {
        match self.size {
            SizeRule::Explicit(_, h) => h,
            SizeRule::MaxWidth(_) => {
                (self.font_size * self.line_height).max(constants::DEFAULT_TEXT_HEIGHT)
            }
        }
    }
}

/// Resolves an element's flat style record to concrete paint properties.
///
/// Text and placeholder elements use a maximum width with intrinsic height;
/// images, shapes and lines use an explicit box, with a kind-appropriate
/// default height when none is stored.
pub fn resolve_style(element: &CertificateElement) -> PaintProps {
    let style = &element.style;
    let opacity = style.opacity.clamp(0.0, 1.0);
    let color = with_opacity(parse_hex_color(&style.color).unwrap_or([0, 0, 0]), opacity);
    let background = style
        .background
        .as_deref()
        .and_then(parse_hex_color)
        .map(|rgb| with_opacity(rgb, opacity));

    let size = match element.kind {
        ElementKind::Text | ElementKind::Placeholder => SizeRule::MaxWidth(element.size.width),
        ElementKind::Image => SizeRule::Explicit(
            element.size.width,
            element.size.height.unwrap_or(constants::DEFAULT_IMAGE_SIZE.1),
        ),
        ElementKind::Shape => SizeRule::Explicit(
            element.size.width,
            element.size.height.unwrap_or(constants::DEFAULT_SHAPE_SIZE.1),
        ),
        ElementKind::Line => SizeRule::Explicit(
            element.size.width,
            element.size.height.unwrap_or(constants::DEFAULT_LINE_SIZE.1),
        ),
    };

    PaintProps {
        color,
        background,
        font_size: style.font_size.max(1.0),
        font_family: style.font_family.clone(),
        bold: style.bold,
        italic: style.italic,
        align: style.align,
        rotation: style.rotation,
        letter_spacing: style.letter_spacing,
        line_height: if style.line_height > 0.0 {
            style.line_height
        } else {
            ElementStyle::default().line_height
        },
        size,
    }
}

/// Parses a `#rrggbb` (or `rrggbb`) hex color string.
///
/// Returns `None` for anything that is not exactly six hex digits; callers
/// fall back to black rather than failing a render over a bad color string.
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

/// Formats an RGB triple back into a `#rrggbb` hex string.
pub fn format_hex_color(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

fn with_opacity(rgb: [u8; 3], opacity: f32) -> Rgba {
    [rgb[0], rgb[1], rgb[2], (opacity * 255.0).round() as u8]
}
