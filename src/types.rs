//! Core data types for the certificate design canvas.
//!
//! This module defines the element model, the design document that is
//! persisted as part of a certificate template, and the template metadata
//! record. Elements are pure data; their visual interpretation lives in
//! [`crate::geometry::resolve_style`].

use crate::constants;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for canvas elements.
pub type ElementId = Uuid;

/// The closed set of element kinds that can be placed on the canvas.
///
/// Behavior (what `content` means and which style fields apply) is determined
/// entirely by this tag; there is no per-kind type hierarchy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Static text rendered as-is.
    Text,
    /// A placeholder token (e.g. `{{studentName}}`) resolved at issuance time.
    Placeholder,
    /// An image referenced by URL.
    Image,
    /// A filled shape; `content` holds the shape descriptor ("rectangle" or "ellipse").
    Shape,
    /// A horizontal rule; `size.height` is the stroke thickness.
    Line,
}

/// Horizontal text alignment within an element's box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Align to the left edge of the box.
    Left,
    /// Center within the box.
    Center,
    /// Align to the right edge of the box.
    Right,
}

/// Element position as percentages of page width/height.
///
/// Both axes are kept within `0.0..=100.0`; percentage coordinates are what
/// make a layout resolution-independent, so the same document renders
/// correctly at any zoom or export size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PercentPos {
    /// Horizontal position of the element center, 0–100.
    pub x: f32,
    /// Vertical position of the element center, 0–100.
    pub y: f32,
}

impl PercentPos {
    /// Creates a position clamped to the page bounds.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(0.0, 100.0),
            y: y.clamp(0.0, 100.0),
        }
    }
}

/// Element box size in pixels at 1:1 zoom.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ElementSize {
    /// Box width in pixels.
    pub width: f32,
    /// Box height in pixels; `None` means intrinsic (auto) text height.
    pub height: Option<f32>,
}

/// Flat style record for an element. No nested inheritance: every field is
/// resolved directly by [`crate::geometry::resolve_style`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementStyle {
    /// Font size in pixels at 1:1 zoom.
    pub font_size: f32,
    /// Font family name; falls back to a proportional default at paint time.
    pub font_family: String,
    /// Bold weight flag.
    pub bold: bool,
    /// Italic style flag.
    pub italic: bool,
    /// Foreground color as a `#rrggbb` hex string.
    pub color: String,
    /// Horizontal text alignment.
    pub align: TextAlign,
    /// Opacity in `0.0..=1.0` applied to both fill and text.
    pub opacity: f32,
    /// Rotation in degrees around the element center.
    pub rotation: f32,
    /// Additional letter spacing in pixels.
    pub letter_spacing: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    /// Background fill as a `#rrggbb` hex string, if any.
    pub background: Option<String>,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            font_size: 24.0,
            font_family: "serif".to_string(),
            bold: false,
            italic: false,
            color: "#000000".to_string(),
            align: TextAlign::Center,
            opacity: 1.0,
            rotation: 0.0,
            letter_spacing: 0.0,
            line_height: 1.2,
            background: None,
        }
    }
}

/// A single positioned visual object on the certificate canvas.
///
/// Stored JSON uses camelCase keys with the kind tag under `type`; that is
/// the document schema other consumers of saved templates read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateElement {
    /// Unique identifier, stable for the element's lifetime.
    pub id: ElementId,
    /// The kind tag driving content interpretation and sizing rules.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Kind-dependent content: literal text, placeholder token, image URL,
    /// or shape descriptor.
    pub content: String,
    /// Center position in page percentages.
    pub position: PercentPos,
    /// Box size in pixels at 1:1 zoom.
    pub size: ElementSize,
    /// Flat visual style record.
    pub style: ElementStyle,
    /// If true, position/size are immutable via drag; style and content may
    /// still be edited from the properties panel.
    #[serde(default)]
    pub locked: bool,
    /// If false, the element is excluded from both interactive and print rendering.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Painting order; higher values paint on top. Ties break by sequence order.
    #[serde(default)]
    pub z_index: i32,
}

fn default_visible() -> bool {
    true
}

impl CertificateElement {
    /// Creates a fully-populated element with type-appropriate defaults.
    ///
    /// New elements are centered on the page; callers assign the z-index
    /// (typically the current element count) when appending.
    pub fn new(kind: ElementKind, content: Option<String>) -> Self {
        let (content, size, style) = match kind {
            ElementKind::Text => (
                content.unwrap_or_else(|| "New text".to_string()),
                ElementSize {
                    width: constants::DEFAULT_TEXT_WIDTH,
                    height: None,
                },
                ElementStyle::default(),
            ),
            ElementKind::Placeholder => (
                content.unwrap_or_else(|| "{{studentName}}".to_string()),
                ElementSize {
                    width: constants::DEFAULT_TEXT_WIDTH,
                    height: None,
                },
                ElementStyle {
                    italic: true,
                    ..ElementStyle::default()
                },
            ),
            ElementKind::Image => (
                content.unwrap_or_default(),
                ElementSize {
                    width: constants::DEFAULT_IMAGE_SIZE.0,
                    height: Some(constants::DEFAULT_IMAGE_SIZE.1),
                },
                ElementStyle::default(),
            ),
            ElementKind::Shape => (
                content.unwrap_or_else(|| "rectangle".to_string()),
                ElementSize {
                    width: constants::DEFAULT_SHAPE_SIZE.0,
                    height: Some(constants::DEFAULT_SHAPE_SIZE.1),
                },
                ElementStyle {
                    background: Some("#d4af37".to_string()),
                    ..ElementStyle::default()
                },
            ),
            ElementKind::Line => (
                content.unwrap_or_else(|| "solid".to_string()),
                ElementSize {
                    width: constants::DEFAULT_LINE_SIZE.0,
                    height: Some(constants::DEFAULT_LINE_SIZE.1),
                },
                ElementStyle::default(),
            ),
        };

        Self {
            id: Uuid::new_v4(),
            kind,
            content,
            position: PercentPos::new(50.0, 50.0),
            size,
            style,
            locked: false,
            visible: true,
            z_index: 0,
        }
    }

    /// True when the element carries text that participates in placeholder
    /// substitution at issuance time.
    pub fn is_textual(&self) -> bool {
        matches!(self.kind, ElementKind::Text | ElementKind::Placeholder)
    }
}

/// The persisted description of a certificate's background and element
/// collection; the unit of persistence and of undo/redo snapshotting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignDocument {
    /// Page background color as a `#rrggbb` hex string.
    pub background_color: String,
    /// Optional background image URL painted under all elements.
    pub background_image_url: Option<String>,
    /// When true, `elements` is authoritative; when false the template is a
    /// legacy one rendered from structured title/body fields instead.
    pub use_visual_editor: bool,
    /// The ordered element collection.
    pub elements: Vec<CertificateElement>,
}

impl Default for DesignDocument {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            background_image_url: None,
            use_visual_editor: true,
            elements: Vec::new(),
        }
    }
}

impl DesignDocument {
    /// Serializes the document to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a document from JSON.
    ///
    /// Missing fields (including a missing `elements` array) fall back to
    /// defaults, so a malformed document opens as an empty canvas rather
    /// than failing the load.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The highest z-index currently in use, or -1 for an empty document.
    pub fn max_z_index(&self) -> i32 {
        self.elements.iter().map(|e| e.z_index).max().unwrap_or(-1)
    }

    /// Looks up an element by id.
    pub fn element(&self, id: ElementId) -> Option<&CertificateElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Looks up an element by id for mutation.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut CertificateElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Removes an element by id, returning true if it existed.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        self.elements.len() != before
    }

    /// Elements in painting order: ascending z-index, ties broken by the
    /// element's position in the sequence, filtered to visible elements.
    pub fn paint_order(&self) -> Vec<&CertificateElement> {
        let mut ordered: Vec<(usize, &CertificateElement)> = self
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.visible)
            .collect();
        ordered.sort_by_key(|(idx, e)| (e.z_index, *idx));
        ordered.into_iter().map(|(_, e)| e).collect()
    }
}

/// Template metadata persisted alongside the design document.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateMeta {
    /// Display name; required before a save is dispatched.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Title line used by the legacy (non-visual) rendering path.
    pub title_text: String,
    /// Body text used by the legacy rendering path; may contain placeholder tokens.
    pub body_text: String,
    /// Name printed in the signature block.
    pub signature_name: String,
    /// Role/title printed under the signature name.
    pub signature_title: String,
    /// Whether this template is the tenant default.
    pub is_default: bool,
}

/// The full persisted template record: metadata plus the design document.
///
/// Server-assigned fields (id, timestamps) belong to the persistence
/// collaborator and are ignored here if present in stored JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TemplateRecord {
    /// Template metadata.
    pub meta: TemplateMeta,
    /// The visual design document.
    pub design: DesignDocument,
}

impl TemplateRecord {
    /// Serializes the record to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a record from JSON, tolerating missing fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_element_defaults() {
        let element = CertificateElement::new(ElementKind::Text, None);

        assert_eq!(element.kind, ElementKind::Text);
        assert_eq!(element.content, "New text");
        assert_eq!(element.position, PercentPos { x: 50.0, y: 50.0 });
        assert_eq!(element.size.width, constants::DEFAULT_TEXT_WIDTH);
        assert!(element.size.height.is_none());
        assert_eq!(element.style.align, TextAlign::Center);
        assert!(!element.locked);
        assert!(element.visible);
        assert!(!element.id.is_nil());
    }

    #[test]
    fn test_image_element_has_fixed_box() {
        let element = CertificateElement::new(
            ElementKind::Image,
            Some("https://example.com/seal.png".to_string()),
        );

        assert_eq!(element.content, "https://example.com/seal.png");
        assert_eq!(element.size.width, constants::DEFAULT_IMAGE_SIZE.0);
        assert_eq!(element.size.height, Some(constants::DEFAULT_IMAGE_SIZE.1));
    }

    #[test]
    fn test_placeholder_defaults_to_student_name_token() {
        let element = CertificateElement::new(ElementKind::Placeholder, None);
        assert_eq!(element.content, "{{studentName}}");
        assert!(element.is_textual());
    }

    #[test]
    fn test_percent_pos_clamps_on_construction() {
        let pos = PercentPos::new(-5.0, 140.0);
        assert_eq!(pos.x, 0.0);
        assert_eq!(pos.y, 100.0);
    }

    #[test]
    fn test_paint_order_sorts_by_z_then_sequence() {
        let mut doc = DesignDocument::default();
        let mut a = CertificateElement::new(ElementKind::Text, Some("a".into()));
        a.z_index = 2;
        let mut b = CertificateElement::new(ElementKind::Text, Some("b".into()));
        b.z_index = 0;
        let mut c = CertificateElement::new(ElementKind::Text, Some("c".into()));
        c.z_index = 2;
        doc.elements = vec![a, b, c];

        let order: Vec<&str> = doc.paint_order().iter().map(|e| e.content.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_paint_order_excludes_hidden_elements() {
        let mut doc = DesignDocument::default();
        let mut hidden = CertificateElement::new(ElementKind::Text, Some("hidden".into()));
        hidden.visible = false;
        doc.elements = vec![
            hidden,
            CertificateElement::new(ElementKind::Text, Some("shown".into())),
        ];

        let order: Vec<&str> = doc.paint_order().iter().map(|e| e.content.as_str()).collect();
        assert_eq!(order, vec!["shown"]);
    }

    #[test]
    fn test_remove_element() {
        let mut doc = DesignDocument::default();
        let element = CertificateElement::new(ElementKind::Shape, None);
        let id = element.id;
        doc.elements.push(element);

        assert!(doc.remove_element(id));
        assert!(doc.elements.is_empty());
        assert!(!doc.remove_element(id));
    }

    #[test]
    fn test_max_z_index() {
        let mut doc = DesignDocument::default();
        assert_eq!(doc.max_z_index(), -1);

        let mut element = CertificateElement::new(ElementKind::Text, None);
        element.z_index = 7;
        doc.elements.push(element);
        assert_eq!(doc.max_z_index(), 7);
    }

    #[test]
    fn test_document_roundtrip_serialization() {
        let mut doc = DesignDocument {
            background_color: "#fffbe6".to_string(),
            ..DesignDocument::default()
        };
        let element = CertificateElement::new(ElementKind::Placeholder, None);
        let id = element.id;
        doc.elements.push(element);

        let json = doc.to_json().unwrap();
        let restored = DesignDocument::from_json(&json).unwrap();

        assert_eq!(restored.background_color, "#fffbe6");
        assert_eq!(restored.elements.len(), 1);
        assert_eq!(restored.elements[0].id, id);
        assert_eq!(restored, doc);
    }

    #[test]
    fn test_malformed_document_opens_empty() {
        // No elements array at all: treated as "no elements yet".
        let doc = DesignDocument::from_json(r##"{"backgroundColor": "#fffbe6"}"##).unwrap();
        assert!(doc.elements.is_empty());
        assert_eq!(doc.background_color, "#fffbe6");

        let doc = DesignDocument::from_json("{}").unwrap();
        assert!(doc.elements.is_empty());
        assert_eq!(doc.background_color, "#ffffff");
    }

    #[test]
    fn test_template_record_tolerates_server_fields() {
        let json = r#"{
            "meta": {"name": "Completion"},
            "design": {"useVisualEditor": false},
            "id": "tpl_123",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;
        let record = TemplateRecord::from_json(json).unwrap();
        assert_eq!(record.meta.name, "Completion");
        assert!(!record.design.use_visual_editor);
    }

    #[test]
    fn test_element_defaults_on_partial_json() {
        let json = r##"{
            "backgroundColor": "#ffffff",
            "useVisualEditor": true,
            "elements": [{
                "id": "8f14e45f-ceea-4672-a2cf-4bba29b2f1e5",
                "type": "text",
                "content": "Hello",
                "position": {"x": 10.0, "y": 20.0},
                "size": {"width": 100.0, "height": null},
                "style": {}
            }]
        }"##;
        let doc = DesignDocument::from_json(json).unwrap();
        let element = &doc.elements[0];
        assert!(element.visible);
        assert!(!element.locked);
        assert_eq!(element.z_index, 0);
        assert_eq!(element.style.opacity, 1.0);
    }

    #[test]
    fn test_stored_document_uses_camel_case_keys() {
        let mut doc = DesignDocument::default();
        let mut element = CertificateElement::new(ElementKind::Text, None);
        element.z_index = 3;
        doc.elements.push(element);

        let json = doc.to_json().unwrap();
        assert!(json.contains("\"backgroundColor\""));
        assert!(json.contains("\"useVisualEditor\""));
        assert!(json.contains("\"type\": \"text\""));
        assert!(json.contains("\"zIndex\": 3"));
        assert!(json.contains("\"fontSize\""));
        assert!(!json.contains("background_color"));
        assert!(!json.contains("\"kind\""));
    }
}
