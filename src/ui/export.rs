//! Export actions: render the current design to SVG and PNG files.
//!
//! Both exports reuse the static print renderer, so the files match what
//! the interactive canvas shows at 1:1 zoom. Saving goes through an async
//! file dialog; failures come back over the operation channel and surface
//! as notifications without touching the undo history.

use std::sync::Arc;

use super::state::{DesignerApp, FileOperationResult};
use crate::constants;
use crate::render::design_to_svg;

/// Raster scale for PNG export relative to the page's pixel size.
const PNG_EXPORT_SCALE: f32 = 2.0;

impl DesignerApp {
    /// Exports the current design as an SVG file via a save dialog.
    pub fn export_svg(&mut self) {
        let svg = design_to_svg(&self.record.design);
        let file_name = format!("{}.svg", sanitize_filename(&self.record.meta.name));
        let sender = self.file.operation_sender.clone();

        tokio::spawn(async move {
            if let Some(handle) = rfd::AsyncFileDialog::new()
                .add_filter("SVG", &["svg"])
                .set_file_name(&file_name)
                .save_file()
                .await
            {
                let path = handle.path();
                let outcome = match std::fs::write(path, svg.as_bytes()) {
                    Ok(_) => FileOperationResult::ExportCompleted(path.display().to_string()),
                    Err(e) => {
                        FileOperationResult::OperationFailed(format!("Failed to save SVG: {e}"))
                    }
                };
                if let Some(tx) = sender {
                    let _ = tx.send(outcome);
                }
            }
        });
    }

    /// Exports the current design as a PNG file via a save dialog.
    ///
    /// The SVG render is rasterized with system fonts at a fixed scale of
    /// the page's pixel dimensions.
    pub fn export_png(&mut self) {
        let svg = design_to_svg(&self.record.design);
        let file_name = format!("{}.png", sanitize_filename(&self.record.meta.name));
        let sender = self.file.operation_sender.clone();

        let pixmap = match rasterize_svg(&svg, PNG_EXPORT_SCALE) {
            Ok(p) => p,
            Err(e) => {
                if let Some(tx) = &self.file.operation_sender {
                    let _ = tx.send(FileOperationResult::OperationFailed(e));
                }
                return;
            }
        };

        tokio::spawn(async move {
            if let Some(handle) = rfd::AsyncFileDialog::new()
                .add_filter("PNG", &["png"])
                .set_file_name(&file_name)
                .save_file()
                .await
            {
                let path = handle.path();
                let outcome = match pixmap.save_png(path) {
                    Ok(_) => FileOperationResult::ExportCompleted(path.display().to_string()),
                    Err(e) => {
                        FileOperationResult::OperationFailed(format!("Failed to save PNG: {e}"))
                    }
                };
                if let Some(tx) = sender {
                    let _ = tx.send(outcome);
                }
            }
        });
    }
}

/// Rasterizes an SVG string into a pixmap at the given scale.
fn rasterize_svg(svg: &str, scale: f32) -> Result<tiny_skia::Pixmap, String> {
    let mut opt = usvg::Options::default();
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    opt.fontdb = Arc::new(db);

    let tree = usvg::Tree::from_data(svg.as_bytes(), &opt)
        .map_err(|e| format!("Failed to parse SVG for PNG export: {e}"))?;

    let out_w = (constants::PAGE_WIDTH * scale).round().max(1.0) as u32;
    let out_h = (constants::PAGE_HEIGHT * scale).round().max(1.0) as u32;
    let mut pixmap = tiny_skia::Pixmap::new(out_w, out_h)
        .ok_or_else(|| format!("Failed to create pixmap {out_w}x{out_h}"))?;

    let transform = tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Reduces a template name to a safe file stem: alphanumerics, dashes and
/// underscores survive, whitespace becomes underscores, and anything else
/// is dropped. An empty result falls back to "certificate".
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            out.push(ch);
        } else if ch.is_whitespace() {
            out.push('_');
        }
    }
    if out.is_empty() {
        "certificate".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_safe_characters() {
        assert_eq!(sanitize_filename("Completion-2024_v2"), "Completion-2024_v2");
    }

    #[test]
    fn test_sanitize_replaces_whitespace() {
        assert_eq!(
            sanitize_filename("Course Completion Award"),
            "Course_Completion_Award"
        );
    }

    #[test]
    fn test_sanitize_drops_special_characters() {
        assert_eq!(sanitize_filename("a/b\\c:d*e?\"<>|"), "abcde");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_filename(""), "certificate");
        assert_eq!(sanitize_filename("///"), "certificate");
    }
}
