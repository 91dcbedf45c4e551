//! File operations for saving and loading certificate templates.
//!
//! Save and load go through async file dialogs on a background task; the
//! results come back to the UI thread over the operation channel and surface
//! as notifications. File outcomes never touch the undo history.

use super::state::{
    DesignerApp, FileOperationResult, Notification, PendingLoadOperation, PendingSaveOperation,
};
use crate::types::TemplateRecord;
use eframe::egui;
use log::warn;

impl DesignerApp {
    /// Handles pending file operations and drains completed async results.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context for requesting repaints
    pub fn handle_pending_operations(&mut self, ctx: &egui::Context) {
        // First, process any completed operations from the channel
        let mut results = Vec::new();
        if let Some(receiver) = &self.file.operation_receiver {
            while let Ok(result) = receiver.try_recv() {
                results.push(result);
            }
        }
        for result in results {
            self.apply_operation_result(result);
        }

        // Handle pending save operations
        if let Some(save_op) = self.file.pending_save_operation.take() {
            let ctx = ctx.clone();
            let record_json = self.record.to_json().unwrap_or_default();
            let sender = self.file.operation_sender.clone();

            match save_op {
                PendingSaveOperation::SaveAs => {
                    let file_name = format!("{}.json", super::export::sanitize_filename(&self.record.meta.name));
                    tokio::spawn(async move {
                        if let Some(handle) = rfd::AsyncFileDialog::new()
                            .add_filter("JSON", &["json"])
                            .set_file_name(&file_name)
                            .save_file()
                            .await
                        {
                            let path = handle.path();
                            let outcome = match std::fs::write(path, record_json) {
                                Ok(_) => {
                                    FileOperationResult::SaveCompleted(path.display().to_string())
                                }
                                Err(e) => FileOperationResult::OperationFailed(format!(
                                    "Failed to save file: {e}"
                                )),
                            };
                            if let Some(tx) = sender {
                                let _ = tx.send(outcome);
                            }
                        }
                        ctx.request_repaint();
                    });
                }
                PendingSaveOperation::Save => {
                    if let Some(path) = self.file.current_path.clone() {
                        tokio::spawn(async move {
                            let outcome = match std::fs::write(&path, record_json) {
                                Ok(_) => FileOperationResult::SaveCompleted(path),
                                Err(e) => FileOperationResult::OperationFailed(format!(
                                    "Failed to save file: {e}"
                                )),
                            };
                            if let Some(tx) = sender {
                                let _ = tx.send(outcome);
                            }
                            ctx.request_repaint();
                        });
                    } else {
                        self.file.pending_save_operation = Some(PendingSaveOperation::SaveAs);
                    }
                }
            }
        }

        // Handle pending load operations
        if let Some(PendingLoadOperation::Load) = self.file.pending_load_operation.take() {
            let ctx = ctx.clone();
            let sender = self.file.operation_sender.clone();

            tokio::spawn(async move {
                if let Some(handle) = rfd::AsyncFileDialog::new()
                    .add_filter("JSON", &["json"])
                    .pick_file()
                    .await
                {
                    let path = handle.path();
                    let outcome = match std::fs::read_to_string(path) {
                        Ok(json) => {
                            FileOperationResult::LoadCompleted(path.display().to_string(), json)
                        }
                        Err(e) => {
                            FileOperationResult::OperationFailed(format!("Failed to read file: {e}"))
                        }
                    };
                    if let Some(tx) = sender {
                        let _ = tx.send(outcome);
                    }
                }
                ctx.request_repaint();
            });
        }
    }

    /// Applies one completed async result to the application state.
    fn apply_operation_result(&mut self, result: FileOperationResult) {
        match result {
            FileOperationResult::SaveCompleted(path) => {
                self.notification = Some(Notification::info(format!("Saved {path}")));
                self.file.current_path = Some(path);
                self.file.has_unsaved_changes = false;
            }
            FileOperationResult::LoadCompleted(path, content) => {
                self.apply_loaded_template(path, &content);
            }
            FileOperationResult::ExportCompleted(path) => {
                self.notification = Some(Notification::info(format!("Exported {path}")));
            }
            FileOperationResult::OperationFailed(message) => {
                warn!("file operation failed: {message}");
                self.notification = Some(Notification::error(message));
            }
        }
    }

    /// Replaces the current template with loaded file content.
    ///
    /// A malformed file opens as an empty canvas with an error notification
    /// rather than aborting the load, so a corrupted document never strands
    /// the editor.
    fn apply_loaded_template(&mut self, path: String, content: &str) {
        match TemplateRecord::from_json(content) {
            Ok(record) => {
                self.record = record;
                self.notification = Some(Notification::info(format!("Loaded {path}")));
            }
            Err(e) => {
                warn!("failed to parse template from {path}: {e}");
                self.record = TemplateRecord::default();
                self.notification = Some(Notification::error(format!(
                    "Could not read template ({e}); opened an empty canvas"
                )));
            }
        }
        self.file.current_path = Some(path);
        self.file.has_unsaved_changes = false;
        self.interaction.selected_element = None;
        self.interaction.editing_element = None;
        self.interaction.temp_content.clear();
        self.history.reset(self.record.design.elements.clone());
    }

    /// Validates the template before dispatching a save. An empty name
    /// blocks the save entirely: nothing is written and no dialog opens.
    fn validate_before_save(&mut self) -> bool {
        if self.record.meta.name.trim().is_empty() {
            self.name_error = true;
            self.notification = Some(Notification::error(
                "Template name is required before saving",
            ));
            return false;
        }
        self.name_error = false;
        true
    }

    /// Opens a file dialog to save the template with a new name.
    pub fn save_template_as(&mut self) {
        if self.validate_before_save() {
            self.file.pending_save_operation = Some(PendingSaveOperation::SaveAs);
        }
    }

    /// Saves the template to the current file path, or falls back to
    /// "Save As" when no path is set.
    pub fn save_template(&mut self) {
        if !self.validate_before_save() {
            return;
        }
        if self.file.current_path.is_some() {
            self.file.pending_save_operation = Some(PendingSaveOperation::Save);
        } else {
            self.file.pending_save_operation = Some(PendingSaveOperation::SaveAs);
        }
    }

    /// Opens a file dialog to load a template from disk.
    pub fn load_template(&mut self) {
        self.file.pending_load_operation = Some(PendingLoadOperation::Load);
    }

    /// Creates a new empty template, resetting document and history state.
    pub fn new_template(&mut self) {
        self.record = TemplateRecord::default();
        self.file.current_path = None;
        self.file.has_unsaved_changes = false;
        self.interaction.selected_element = None;
        self.interaction.editing_element = None;
        self.interaction.temp_content.clear();
        self.history.reset(Vec::new());
        self.notification = None;
        self.name_error = false;
        self.canvas.offset = egui::Vec2::ZERO;
        self.canvas.offset_initialized = false;
        self.canvas.zoom_factor = 1.0;
    }
}
