//! Shared application-wide constants.
//! Centralizes tweakable values used across the canvas, rendering and history.

// Certificate page
/// Page width in pixels at 1:1 zoom (A4 landscape at 96 dpi).
pub const PAGE_WIDTH: f32 = 1123.0;
/// Page height in pixels at 1:1 zoom (A4 landscape at 96 dpi).
pub const PAGE_HEIGHT: f32 = 794.0;

// Element defaults
/// Default box width for newly created text and placeholder elements.
pub const DEFAULT_TEXT_WIDTH: f32 = 300.0;
/// Default box size for newly created image elements.
pub const DEFAULT_IMAGE_SIZE: (f32, f32) = (200.0, 150.0);
/// Default box size for newly created shape elements.
pub const DEFAULT_SHAPE_SIZE: (f32, f32) = (150.0, 100.0);
/// Default length and thickness for newly created line elements.
pub const DEFAULT_LINE_SIZE: (f32, f32) = (200.0, 2.0);
/// Fallback height for auto-sized text elements when an explicit box is required.
pub const DEFAULT_TEXT_HEIGHT: f32 = 40.0;

// Duplication
/// Positional offset (in percent of page size) applied to duplicated elements.
pub const DUPLICATE_OFFSET_PERCENT: f32 = 2.0;

// Grid/guides
/// Spacing of canvas grid lines in percent of page size.
pub const GRID_STEP_PERCENT: f32 = 5.0;

// Zoom
/// Minimum canvas zoom factor.
pub const MIN_ZOOM: f32 = 0.25;
/// Maximum canvas zoom factor.
pub const MAX_ZOOM: f32 = 4.0;

// Undo/redo
/// Maximum number of history snapshots to retain.
pub const MAX_HISTORY: usize = 100;
