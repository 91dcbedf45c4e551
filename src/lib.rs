//! # Certificate Canvas
//!
//! A visual design tool for course-completion certificates. Templates are a
//! collection of positioned elements (text, placeholder tokens, images,
//! shapes, lines) on a fixed landscape page, edited on an interactive canvas
//! and rendered identically at print and issuance time.
//!
//! ## Features
//! - Interactive element creation, selection, dragging, and inline editing
//! - Percentage-based element positioning, clamped to the page
//! - Bounded undo/redo over the element collection
//! - Placeholder tokens substituted with recipient data at issuance
//! - SVG and PNG export through the same renderer issuance uses
//! - Canvas panning, zooming, and grid guides

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod constants;
mod geometry;
mod history;
mod issuance;
mod placeholders;
mod render;
mod types;
mod ui;

// Re-export the data model and the renderers consumed by callers that issue
// certificates without the editor UI.
pub use geometry::{drag_to_percent, resolve_style, PaintProps, Rgba, SizeRule};
pub use issuance::{render_certificate, substitute_design};
pub use placeholders::{substitute, RecipientData, TOKENS};
pub use render::design_to_svg;
pub use types::*;

use ui::DesignerApp;

/// Runs the certificate designer application with default settings.
///
/// Initializes a tokio runtime for async file dialogs, restores any
/// persisted editor state, and starts the egui event loop.
///
/// # Returns
///
/// Returns `Ok(())` when the window closes normally, or an error if the
/// runtime or window cannot be created.
///
/// # Example
///
/// ```no_run
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     certcanvas::run_app()
/// }
/// ```
pub fn run_app() -> Result<(), Box<dyn std::error::Error>> {
    // File dialogs and disk writes run on this runtime; entering it here
    // lets UI code call tokio::spawn directly.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let _guard = runtime.enter();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Certificate Canvas",
        options,
        Box::new(|cc| {
            let app = cc
                .storage
                .and_then(|storage| storage.get_string("app_state"))
                .and_then(|json| DesignerApp::from_json(&json).ok())
                .unwrap_or_default();
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}
