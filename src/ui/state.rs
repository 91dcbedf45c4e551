//! Application state management structures.
//!
//! This module contains the state structures tracking the editor's current
//! UI state: canvas navigation, user interaction, file operations, and the
//! main [`DesignerApp`] that owns the template being edited together with
//! its undo/redo history.

use crate::history::History;
use crate::types::{ElementId, PercentPos, TemplateRecord};
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};

/// State related to canvas navigation and display.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasState {
    /// Current pan offset of the page inside the canvas area, in screen
    /// pixels from the canvas origin.
    #[serde(skip)]
    pub offset: egui::Vec2,
    /// Whether the pan offset has been centered for this session yet.
    #[serde(skip)]
    pub offset_initialized: bool,
    /// Current zoom factor (1.0 paints the page at its natural pixel size).
    pub zoom_factor: f32,
    /// Whether grid and center guide lines are drawn over the page.
    pub show_grid: bool,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            offset: egui::Vec2::ZERO,
            offset_initialized: false,
            zoom_factor: 1.0,
            show_grid: true,
        }
    }
}

/// State related to user interaction with elements on the canvas.
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InteractionState {
    /// Currently selected element, if any. Always revalidated after the
    /// element collection is replaced (undo, redo, load, delete).
    #[serde(skip)]
    pub selected_element: Option<ElementId>,
    /// Element currently being dragged.
    #[serde(skip)]
    pub dragging_element: Option<ElementId>,
    /// Pointer position in screen space when the drag started.
    #[serde(skip)]
    pub drag_start_pointer: Option<egui::Pos2>,
    /// Element percent position when the drag started.
    #[serde(skip)]
    pub drag_start_position: Option<PercentPos>,
    /// Element currently in inline-edit mode (text and placeholder only).
    #[serde(skip)]
    pub editing_element: Option<ElementId>,
    /// Staging buffer for inline content editing.
    #[serde(skip)]
    pub temp_content: String,
    /// Flag to request focus for the inline editor exactly once.
    #[serde(skip)]
    pub focus_requested_for_edit: bool,
    /// Whether the user is currently panning the canvas.
    #[serde(skip)]
    pub is_panning: bool,
    /// Last pointer position during panning.
    #[serde(skip)]
    pub last_pan_pos: Option<egui::Pos2>,
    /// Screen-space hit rectangles of visible elements from the last paint,
    /// in painting order (topmost last).
    #[serde(skip)]
    pub element_rects: Vec<(ElementId, egui::Rect)>,
    /// Placeholder token currently chosen in the palette.
    #[serde(skip)]
    pub palette_token: String,
    /// True while a panel edit has mutated elements but not yet been
    /// committed to history; the commit happens when the pointer is released
    /// and keyboard focus has left the edited field.
    #[serde(skip)]
    pub pending_commit: bool,
}

/// State related to file operations and persistence.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct FileState {
    /// Current file path for save/load operations.
    #[serde(skip)]
    pub current_path: Option<String>,
    /// Flag indicating the template has unsaved changes.
    #[serde(skip)]
    pub has_unsaved_changes: bool,
    /// Pending save operation, dispatched on the next frame.
    #[serde(skip)]
    pub pending_save_operation: Option<PendingSaveOperation>,
    /// Pending load operation, dispatched on the next frame.
    #[serde(skip)]
    pub pending_load_operation: Option<PendingLoadOperation>,
    /// Sender handed to async file and export tasks.
    #[serde(skip)]
    pub operation_sender: Option<Sender<FileOperationResult>>,
    /// Receiver drained once per frame on the UI thread.
    #[serde(skip)]
    pub operation_receiver: Option<Receiver<FileOperationResult>>,
    /// Whether to show an unsaved-changes confirmation dialog.
    #[serde(skip)]
    pub show_unsaved_dialog: bool,
    /// The action that triggered the confirmation dialog.
    #[serde(skip)]
    pub pending_confirm_action: Option<PendingConfirmAction>,
    /// One-shot flag letting the next close request through after the user
    /// confirmed discarding changes.
    #[serde(skip)]
    pub allow_close_on_next_request: bool,
}

impl Default for FileState {
    fn default() -> Self {
        let (sender, receiver) = channel();
        Self {
            current_path: None,
            has_unsaved_changes: false,
            pending_save_operation: None,
            pending_load_operation: None,
            operation_sender: Some(sender),
            operation_receiver: Some(receiver),
            show_unsaved_dialog: false,
            pending_confirm_action: None,
            allow_close_on_next_request: false,
        }
    }
}

/// Represents a pending save operation type.
#[derive(Debug)]
pub enum PendingSaveOperation {
    /// Save with a new file path (shows a file picker).
    SaveAs,
    /// Save to the existing file path.
    Save,
}

/// Represents a pending load operation type.
#[derive(Debug)]
pub enum PendingLoadOperation {
    /// Load a template from a file (shows a file picker).
    Load,
}

/// Messages sent from async file and export tasks back to the UI thread.
///
/// Failures surface as notifications only; they never touch the undo
/// history, which tracks element mutations and nothing else.
#[derive(Debug)]
pub enum FileOperationResult {
    /// Save completed successfully with the given path.
    SaveCompleted(String),
    /// Load completed successfully with path and file content.
    LoadCompleted(String, String),
    /// Export completed successfully with the given path.
    ExportCompleted(String),
    /// Operation failed with an error message.
    OperationFailed(String),
}

/// Actions deferred behind the unsaved-changes confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirmAction {
    /// User is attempting to create a new template.
    New,
    /// User is attempting to open a template file.
    Open,
    /// User is attempting to quit the application.
    Quit,
}

/// A transient status line shown in the toolbar.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Message text.
    pub text: String,
    /// Whether this is an error (painted in the error color).
    pub is_error: bool,
}

impl Notification {
    /// An informational notification.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// An error notification.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// The main application structure owning the certificate template being
/// edited and all UI state.
///
/// This struct implements the `eframe::App` trait and handles all user
/// interface rendering and interaction logic.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerApp {
    /// The template (metadata plus design document) being edited.
    pub record: TemplateRecord,
    /// Canvas navigation and display state.
    pub canvas: CanvasState,
    /// User interaction state.
    pub interaction: InteractionState,
    /// File operations state.
    pub file: FileState,
    /// Undo/redo history of element-collection snapshots.
    #[serde(skip)]
    pub history: History,
    /// Whether dark mode visuals are enabled.
    pub dark_mode: bool,
    /// Transient status line for save/load/export outcomes.
    #[serde(skip)]
    pub notification: Option<Notification>,
    /// True when a save was blocked because the template name is empty; the
    /// properties panel shows an inline message until the name is filled in.
    #[serde(skip)]
    pub name_error: bool,
}

impl Default for DesignerApp {
    fn default() -> Self {
        Self {
            record: TemplateRecord::default(),
            canvas: CanvasState::default(),
            interaction: InteractionState {
                palette_token: crate::placeholders::TOKENS[0].to_string(),
                ..InteractionState::default()
            },
            file: FileState::default(),
            history: History::new(Vec::new()),
            dark_mode: true,
            notification: None,
            name_error: false,
        }
    }
}

impl DesignerApp {
    /// Serializes the application state to JSON for eframe storage.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes application state from JSON.
    ///
    /// Skipped runtime fields deserialize to bare defaults, so the operation
    /// channel, the palette token, and the history seed are rebuilt here.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut app: Self = serde_json::from_str(json)?;
        app.file = FileState::default();
        app.history = History::new(app.record.design.elements.clone());
        app.interaction.palette_token = crate::placeholders::TOKENS[0].to_string();
        Ok(app)
    }
}
