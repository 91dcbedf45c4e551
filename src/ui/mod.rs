//! User interface components and rendering logic for the certificate designer.
//!
//! This module contains all the UI-related code including the main application
//! struct, canvas rendering, the element palette, the properties panel, export
//! actions, and user interaction handling.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main DesignerApp
//! - `file_ops` - Template save/load operations via async file dialogs
//! - `canvas` - Canvas navigation, zooming, panning, and element dragging
//! - `rendering` - Drawing the page, grid, and elements
//! - `export` - SVG and PNG export of the current design

mod canvas;
mod export;
mod file_ops;
mod rendering;
mod state;

#[cfg(test)]
mod tests;

pub use state::{DesignerApp, FileOperationResult, Notification};

use self::state::PendingConfirmAction;
use crate::constants;
use crate::geometry::{format_hex_color, parse_hex_color};
use crate::types::{CertificateElement, ElementKind, PercentPos, TextAlign};
use eframe::egui;
use log::error;

impl eframe::App for DesignerApp {
    /// Persist entire app state between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => {
                storage.set_string("app_state", json);
            }
            Err(err) => {
                error!("Failed to serialize app state: {err}");
            }
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// This method handles the overall UI layout: the toolbar, the element
    /// palette on the left, the properties panel on the right, and the main
    /// canvas area in between.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    /// * `frame` - The eframe frame
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        // Handle pending file operations and async results
        self.handle_pending_operations(ctx);

        // Keyboard shortcuts
        self.handle_undo_redo_keys(ctx);
        self.handle_delete_key(ctx);
        self.handle_file_shortcuts(ctx);

        // Intercept native window close requests (titlebar X)
        if ctx.input(|i| i.viewport().close_requested()) {
            if self.file.has_unsaved_changes && !self.file.allow_close_on_next_request {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                if !self.file.show_unsaved_dialog {
                    self.file.show_unsaved_dialog = true;
                    self.file.pending_confirm_action = Some(PendingConfirmAction::Quit);
                }
            } else {
                self.file.allow_close_on_next_request = false;
            }
        }

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::SidePanel::left("palette_panel")
            .resizable(false)
            .default_width(170.0)
            .show(ctx, |ui| {
                self.draw_palette_panel(ui);
            });

        egui::SidePanel::right("properties_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                self.draw_properties_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });

        self.draw_unsaved_dialog(ctx);

        // Batch panel edits into one history snapshot per gesture: the
        // commit lands once the pointer is up and the edited field lost
        // keyboard focus.
        if self.interaction.pending_commit {
            let idle = ctx.input(|i| !i.pointer.any_down()) && !ctx.wants_keyboard_input();
            if idle {
                self.interaction.pending_commit = false;
                self.commit_history();
            }
        }
    }
}

impl DesignerApp {
    /// Pushes the current element collection onto the undo history and
    /// marks the document dirty.
    pub fn commit_history(&mut self) {
        self.history.commit(self.record.design.elements.clone());
        self.file.has_unsaved_changes = true;
    }

    /// Drops selection and edit state pointing at elements that no longer
    /// exist after the collection was replaced.
    pub fn validate_selection(&mut self) {
        if let Some(id) = self.interaction.selected_element {
            if self.record.design.element(id).is_none() {
                self.interaction.selected_element = None;
            }
        }
        if let Some(id) = self.interaction.editing_element {
            if self.record.design.element(id).is_none() {
                self.interaction.editing_element = None;
                self.interaction.temp_content.clear();
            }
        }
    }

    /// Restores the previous history snapshot, if any.
    ///
    /// Any panel edit staged for an end-of-frame commit is discarded; it
    /// would otherwise re-commit the restored snapshot and prune the redo
    /// branch.
    pub fn perform_undo(&mut self) {
        let snapshot = match self.history.undo() {
            Some(s) => s.to_vec(),
            None => return,
        };
        self.interaction.pending_commit = false;
        self.record.design.elements = snapshot;
        self.validate_selection();
        self.file.has_unsaved_changes = true;
    }

    /// Reapplies the next history snapshot, if any.
    pub fn perform_redo(&mut self) {
        let snapshot = match self.history.redo() {
            Some(s) => s.to_vec(),
            None => return,
        };
        self.interaction.pending_commit = false;
        self.record.design.elements = snapshot;
        self.validate_selection();
        self.file.has_unsaved_changes = true;
    }

    /// Adds a new element of the given kind at the page center, placed on
    /// top of the existing stack, selects it, and commits.
    pub fn add_element(&mut self, kind: ElementKind, content: Option<String>) {
        let mut element = CertificateElement::new(kind, content);
        element.z_index = self.record.design.max_z_index() + 1;
        let id = element.id;
        self.record.design.elements.push(element);
        self.interaction.selected_element = Some(id);
        self.commit_history();
    }

    /// Duplicates the selected element: fresh id, a small diagonal offset
    /// (clamped to the page), and placement on top of the stack.
    pub fn duplicate_selected(&mut self) {
        let Some(id) = self.interaction.selected_element else {
            return;
        };
        let Some(mut copy) = self.record.design.element(id).cloned() else {
            return;
        };
        copy.id = uuid::Uuid::new_v4();
        copy.position = PercentPos::new(
            copy.position.x + constants::DUPLICATE_OFFSET_PERCENT,
            copy.position.y + constants::DUPLICATE_OFFSET_PERCENT,
        );
        copy.z_index = self.record.design.max_z_index() + 1;
        let new_id = copy.id;
        self.record.design.elements.push(copy);
        self.interaction.selected_element = Some(new_id);
        self.commit_history();
    }

    /// Removes the selected element and clears all state referring to it.
    pub fn delete_selected(&mut self) {
        let Some(id) = self.interaction.selected_element else {
            return;
        };
        if self.record.design.remove_element(id) {
            self.interaction.selected_element = None;
            self.interaction.editing_element = None;
            self.interaction.temp_content.clear();
            self.commit_history();
        }
    }

    /// Raises the selected element above everything else.
    pub fn bring_selected_forward(&mut self) {
        let Some(id) = self.interaction.selected_element else {
            return;
        };
        let top = self.record.design.max_z_index();
        let changed = match self.record.design.element_mut(id) {
            Some(element) if element.z_index <= top => {
                element.z_index = top + 1;
                true
            }
            _ => false,
        };
        if changed {
            self.commit_history();
        }
    }

    /// Lowers the selected element one step, never below zero.
    pub fn send_selected_backward(&mut self) {
        let Some(id) = self.interaction.selected_element else {
            return;
        };
        let changed = match self.record.design.element_mut(id) {
            Some(element) if element.z_index > 0 => {
                element.z_index -= 1;
                true
            }
            _ => false,
        };
        if changed {
            self.commit_history();
        }
    }

    /// Handles undo/redo keyboard shortcuts.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context for checking input
    fn handle_undo_redo_keys(&mut self, ctx: &egui::Context) {
        // Don't steal the shortcut while a text edit widget has focus
        if ctx.wants_keyboard_input() {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Z) && i.modifiers.command && !i.modifiers.shift)
        {
            self.perform_undo();
        } else if ctx.input(|i| {
            (i.key_pressed(egui::Key::Z) && i.modifiers.command && i.modifiers.shift)
                || (i.key_pressed(egui::Key::Y) && i.modifiers.command)
        }) {
            self.perform_redo();
        }
    }

    /// Handles Delete/Backspace presses to remove the selected element.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context for checking input
    fn handle_delete_key(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() || self.interaction.editing_element.is_some() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)) {
            self.delete_selected();
        }
    }

    /// Handles file-related keyboard shortcuts: New, Open, Save, Save As,
    /// and Quit, using the platform-standard Command/Control modifier.
    fn handle_file_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let mut request_quit = false;
        ctx.input(|i| {
            let cmd = i.modifiers.command;
            let shift = i.modifiers.shift;
            if i.key_pressed(egui::Key::S) && cmd && shift {
                self.save_template_as();
            } else if i.key_pressed(egui::Key::S) && cmd {
                self.save_template();
            }
            if i.key_pressed(egui::Key::O) && cmd {
                if self.file.has_unsaved_changes {
                    self.file.show_unsaved_dialog = true;
                    self.file.pending_confirm_action = Some(PendingConfirmAction::Open);
                } else {
                    self.load_template();
                }
            }
            if i.key_pressed(egui::Key::N) && cmd {
                if self.file.has_unsaved_changes {
                    self.file.show_unsaved_dialog = true;
                    self.file.pending_confirm_action = Some(PendingConfirmAction::New);
                } else {
                    self.new_template();
                }
            }
            if i.key_pressed(egui::Key::Q) && cmd {
                if self.file.has_unsaved_changes {
                    self.file.show_unsaved_dialog = true;
                    self.file.pending_confirm_action = Some(PendingConfirmAction::Quit);
                } else {
                    request_quit = true;
                }
            }
        });
        if request_quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    /// Renders the toolbar with file operations, undo/redo, export actions,
    /// and view options.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("New").clicked() {
                if self.file.has_unsaved_changes {
                    self.file.show_unsaved_dialog = true;
                    self.file.pending_confirm_action = Some(PendingConfirmAction::New);
                } else {
                    self.new_template();
                }
            }
            if ui.button("Open").clicked() {
                if self.file.has_unsaved_changes {
                    self.file.show_unsaved_dialog = true;
                    self.file.pending_confirm_action = Some(PendingConfirmAction::Open);
                } else {
                    self.load_template();
                }
            }
            if ui.button("Save").clicked() {
                self.save_template();
            }
            if ui.button("Save As").clicked() {
                self.save_template_as();
            }

            ui.separator();

            ui.add_enabled_ui(self.history.can_undo(), |ui| {
                if ui.button("⟲ Undo").clicked() {
                    self.perform_undo();
                }
            });
            ui.add_enabled_ui(self.history.can_redo(), |ui| {
                if ui.button("⟳ Redo").clicked() {
                    self.perform_redo();
                }
            });

            ui.separator();

            if ui.button("Export SVG").clicked() {
                self.export_svg();
            }
            if ui.button("Export PNG").clicked() {
                self.export_png();
            }

            ui.separator();
            self.draw_quick_style_controls(ui);

            ui.separator();

            if ui
                .checkbox(&mut self.record.design.use_visual_editor, "Visual editor")
                .changed()
            {
                self.file.has_unsaved_changes = true;
            }
            ui.checkbox(&mut self.canvas.show_grid, "Show Grid");
            ui.checkbox(&mut self.dark_mode, "Dark Mode");

            if let Some(notification) = self.notification.clone() {
                ui.separator();
                let color = if notification.is_error {
                    egui::Color32::from_rgb(255, 100, 100)
                } else {
                    egui::Color32::from_rgb(120, 200, 120)
                };
                ui.colored_label(color, notification.text);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let name = if self.record.meta.name.is_empty() {
                    "Untitled"
                } else {
                    self.record.meta.name.as_str()
                };
                let status = if self.file.has_unsaved_changes { "*" } else { "" };
                ui.label(format!("{name}{status}"));
                ui.label(format!("Zoom: {:.0}%", self.canvas.zoom_factor * 100.0));
            });
        });
    }

    /// Quick style edits on the current selection: font size, bold/italic,
    /// color and opacity. Disabled while nothing is selected; text controls
    /// only show for textual elements.
    fn draw_quick_style_controls(&mut self, ui: &mut egui::Ui) {
        let Some(id) = self.interaction.selected_element else {
            ui.add_enabled_ui(false, |ui| {
                ui.label("Style:");
                let _ = ui.small_button("B");
                let _ = ui.small_button("I");
            });
            return;
        };
        let Some(original) = self.record.design.element(id).cloned() else {
            return;
        };
        let mut edited = original.clone();

        ui.label("Style:");
        if edited.is_textual() {
            ui.add(
                egui::DragValue::new(&mut edited.style.font_size)
                    .range(6.0..=200.0)
                    .suffix("px"),
            );
            if ui
                .selectable_label(edited.style.bold, egui::RichText::new("B").strong())
                .clicked()
            {
                edited.style.bold = !edited.style.bold;
            }
            if ui
                .selectable_label(edited.style.italic, egui::RichText::new("I").italics())
                .clicked()
            {
                edited.style.italic = !edited.style.italic;
            }
        }
        let mut color = parse_hex_color(&edited.style.color).unwrap_or([0, 0, 0]);
        if ui.color_edit_button_srgb(&mut color).changed() {
            edited.style.color = format_hex_color(color);
        }
        ui.add(
            egui::Slider::new(&mut edited.style.opacity, 0.0..=1.0)
                .show_value(false)
                .text("opacity"),
        );

        if edited != original {
            if let Some(element) = self.record.design.element_mut(id) {
                *element = edited;
            }
            self.interaction.pending_commit = true;
            self.file.has_unsaved_changes = true;
        }
    }

    /// Renders the element palette: one button per element kind plus a
    /// token picker for placeholder elements.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    fn draw_palette_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Elements");
        ui.separator();

        if ui.button("Add Text").clicked() {
            self.add_element(ElementKind::Text, None);
        }
        if ui.button("Add Image").clicked() {
            self.add_element(ElementKind::Image, None);
        }
        if ui.button("Add Shape").clicked() {
            self.add_element(ElementKind::Shape, None);
        }
        if ui.button("Add Line").clicked() {
            self.add_element(ElementKind::Line, None);
        }

        ui.separator();
        ui.label("Placeholder:");
        egui::ComboBox::from_id_source("palette_token_combo")
            .selected_text(self.interaction.palette_token.clone())
            .show_ui(ui, |ui| {
                for token in crate::placeholders::TOKENS {
                    ui.selectable_value(
                        &mut self.interaction.palette_token,
                        token.to_string(),
                        token,
                    );
                }
            });
        if ui.button("Add Placeholder").clicked() {
            let token = self.interaction.palette_token.clone();
            self.add_element(ElementKind::Placeholder, Some(token));
        }

        ui.separator();
        ui.weak("Double-click a text element on the canvas to edit it in place.");
    }

    /// Renders the main canvas: page, grid, elements, and interaction.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        let backdrop = if self.dark_mode {
            egui::Color32::from_gray(30)
        } else {
            egui::Color32::from_gray(170)
        };
        painter.rect_filled(canvas_rect, 0.0, backdrop);

        self.ensure_page_centered(canvas_rect);
        self.handle_canvas_panning(ui, &response);
        self.handle_canvas_zoom(ui, &response);

        let page_rect = self.page_rect(canvas_rect);
        self.handle_element_dragging(ui, &response, page_rect);
        self.handle_double_click_edit(&response);

        self.render_design(&painter, page_rect);
        self.draw_inline_editor(ui, page_rect);
    }

    /// Shows the floating inline text editor over the element being edited.
    ///
    /// Escape discards the staged text; Enter (Shift+Enter for a newline) or
    /// losing focus applies it and commits one history snapshot if the
    /// content changed.
    fn draw_inline_editor(&mut self, ui: &mut egui::Ui, page_rect: egui::Rect) {
        let Some(editing_id) = self.interaction.editing_element else {
            return;
        };
        let Some(element) = self.record.design.element(editing_id) else {
            self.interaction.editing_element = None;
            return;
        };

        let zoom = page_rect.width() / constants::PAGE_WIDTH;
        let center = self.percent_to_screen(element.position, page_rect);
        let width = (element.size.width * zoom).max(120.0);
        let top_left = egui::pos2(center.x - width / 2.0, center.y - 20.0);

        let mut cancel = false;
        let mut apply = false;
        egui::Area::new(egui::Id::new("inline_content_editor"))
            .fixed_pos(top_left)
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                let response = ui.add(
                    egui::TextEdit::multiline(&mut self.interaction.temp_content)
                        .desired_width(width)
                        .desired_rows(1),
                );
                if !self.interaction.focus_requested_for_edit {
                    response.request_focus();
                    self.interaction.focus_requested_for_edit = true;
                }
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    cancel = true;
                } else if ui.input(|i| i.key_pressed(egui::Key::Enter) && !i.modifiers.shift) {
                    // Plain Enter confirms; Shift+Enter inserts a newline.
                    // The widget already appended the newline this frame, so
                    // drop it before applying.
                    if self.interaction.temp_content.ends_with('\n') {
                        self.interaction.temp_content.pop();
                    }
                    apply = true;
                } else if response.lost_focus() {
                    apply = true;
                }
            });

        if cancel {
            self.stop_inline_edit(false);
        } else if apply {
            self.stop_inline_edit(true);
        }
    }

    /// Renders the properties panel: template metadata at the top, then the
    /// selected element's geometry and style.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    fn draw_properties_panel(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.heading("Template");
                ui.separator();
                self.draw_template_properties(ui);

                ui.add_space(8.0);
                ui.heading("Element");
                ui.separator();
                if self.interaction.selected_element.is_some() {
                    self.draw_element_properties(ui);
                } else {
                    ui.weak("Click an element on the canvas to edit its properties.");
                }
            });
    }

    /// Template metadata fields. Metadata edits mark the document dirty but
    /// never enter the element undo history.
    fn draw_template_properties(&mut self, ui: &mut egui::Ui) {
        ui.label("Name:");
        if ui
            .text_edit_singleline(&mut self.record.meta.name)
            .changed()
        {
            self.file.has_unsaved_changes = true;
            if !self.record.meta.name.trim().is_empty() {
                self.name_error = false;
            }
        }
        if self.name_error {
            ui.colored_label(
                egui::Color32::from_rgb(255, 100, 100),
                "A template name is required before saving.",
            );
        }

        ui.label("Description:");
        if ui
            .text_edit_multiline(&mut self.record.meta.description)
            .changed()
        {
            self.file.has_unsaved_changes = true;
        }

        if ui
            .checkbox(&mut self.record.meta.is_default, "Default template")
            .changed()
        {
            self.file.has_unsaved_changes = true;
        }

        ui.label("Background color:");
        let mut bg = parse_hex_color(&self.record.design.background_color)
            .unwrap_or([255, 255, 255]);
        if ui.color_edit_button_srgb(&mut bg).changed() {
            self.record.design.background_color = format_hex_color(bg);
            self.file.has_unsaved_changes = true;
        }

        ui.label("Background image URL:");
        let mut bg_url = self
            .record
            .design
            .background_image_url
            .clone()
            .unwrap_or_default();
        if ui.text_edit_singleline(&mut bg_url).changed() {
            self.record.design.background_image_url = if bg_url.trim().is_empty() {
                None
            } else {
                Some(bg_url)
            };
            self.file.has_unsaved_changes = true;
        }

        if !self.record.design.use_visual_editor {
            ui.add_space(4.0);
            ui.label("Title text:");
            if ui
                .text_edit_singleline(&mut self.record.meta.title_text)
                .changed()
            {
                self.file.has_unsaved_changes = true;
            }
            ui.label("Body text:");
            if ui
                .text_edit_multiline(&mut self.record.meta.body_text)
                .changed()
            {
                self.file.has_unsaved_changes = true;
            }
            ui.label("Signature name:");
            if ui
                .text_edit_singleline(&mut self.record.meta.signature_name)
                .changed()
            {
                self.file.has_unsaved_changes = true;
            }
            ui.label("Signature title:");
            if ui
                .text_edit_singleline(&mut self.record.meta.signature_title)
                .changed()
            {
                self.file.has_unsaved_changes = true;
            }
        }
    }

    /// Selected element editor. Widgets mutate a working copy; any change
    /// is written back immediately (live canvas feedback) and staged for a
    /// single history commit at the end of the gesture.
    fn draw_element_properties(&mut self, ui: &mut egui::Ui) {
        let Some(id) = self.interaction.selected_element else {
            return;
        };
        let Some(original) = self.record.design.element(id).cloned() else {
            self.interaction.selected_element = None;
            return;
        };
        let mut edited = original.clone();

        ui.label(format!(
            "Kind: {}",
            match edited.kind {
                ElementKind::Text => "Text",
                ElementKind::Placeholder => "Placeholder",
                ElementKind::Image => "Image",
                ElementKind::Shape => "Shape",
                ElementKind::Line => "Line",
            }
        ));
        ui.separator();

        match edited.kind {
            ElementKind::Text => {
                ui.label("Content:");
                ui.text_edit_multiline(&mut edited.content);
            }
            ElementKind::Placeholder => {
                ui.label("Token:");
                egui::ComboBox::from_id_source("element_token_combo")
                    .selected_text(edited.content.clone())
                    .show_ui(ui, |ui| {
                        for token in crate::placeholders::TOKENS {
                            ui.selectable_value(&mut edited.content, token.to_string(), token);
                        }
                    });
            }
            ElementKind::Image => {
                ui.label("Image URL:");
                ui.text_edit_singleline(&mut edited.content);
            }
            ElementKind::Shape => {
                ui.label("Shape:");
                egui::ComboBox::from_id_source("shape_kind_combo")
                    .selected_text(edited.content.clone())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut edited.content, "rectangle".to_string(), "rectangle");
                        ui.selectable_value(&mut edited.content, "ellipse".to_string(), "ellipse");
                    });
            }
            ElementKind::Line => {
                ui.label("Style:");
                egui::ComboBox::from_id_source("line_style_combo")
                    .selected_text(edited.content.clone())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut edited.content, "solid".to_string(), "solid");
                        ui.selectable_value(&mut edited.content, "dashed".to_string(), "dashed");
                    });
            }
        }

        ui.separator();
        ui.label("Position (%):");
        ui.horizontal(|ui| {
            let mut x = edited.position.x;
            let mut y = edited.position.y;
            ui.label("x");
            ui.add(egui::DragValue::new(&mut x).range(0.0..=100.0).speed(0.5));
            ui.label("y");
            ui.add(egui::DragValue::new(&mut y).range(0.0..=100.0).speed(0.5));
            edited.position = PercentPos::new(x, y);
        });

        ui.label("Size (px):");
        ui.horizontal(|ui| {
            ui.label("w");
            ui.add(
                egui::DragValue::new(&mut edited.size.width)
                    .range(1.0..=constants::PAGE_WIDTH)
                    .speed(1.0),
            );
            if !edited.is_textual() {
                let mut height = edited.size.height.unwrap_or(0.0);
                ui.label("h");
                if ui
                    .add(
                        egui::DragValue::new(&mut height)
                            .range(1.0..=constants::PAGE_HEIGHT)
                            .speed(1.0),
                    )
                    .changed()
                {
                    edited.size.height = Some(height);
                }
            }
        });

        ui.separator();
        if edited.is_textual() {
            ui.label("Font size:");
            ui.add(egui::DragValue::new(&mut edited.style.font_size).range(6.0..=200.0));

            ui.label("Font family:");
            egui::ComboBox::from_id_source("font_family_combo")
                .selected_text(edited.style.font_family.clone())
                .show_ui(ui, |ui| {
                    for family in ["serif", "sans-serif", "monospace"] {
                        ui.selectable_value(
                            &mut edited.style.font_family,
                            family.to_string(),
                            family,
                        );
                    }
                });

            ui.horizontal(|ui| {
                ui.checkbox(&mut edited.style.bold, "Bold");
                ui.checkbox(&mut edited.style.italic, "Italic");
            });

            ui.label("Align:");
            ui.horizontal(|ui| {
                ui.selectable_value(&mut edited.style.align, TextAlign::Left, "Left");
                ui.selectable_value(&mut edited.style.align, TextAlign::Center, "Center");
                ui.selectable_value(&mut edited.style.align, TextAlign::Right, "Right");
            });

            ui.label("Letter spacing:");
            ui.add(egui::DragValue::new(&mut edited.style.letter_spacing).range(-5.0..=50.0).speed(0.1));

            ui.label("Line height:");
            ui.add(egui::DragValue::new(&mut edited.style.line_height).range(0.5..=4.0).speed(0.05));
        }

        ui.label("Color:");
        let mut color = parse_hex_color(&edited.style.color).unwrap_or([0, 0, 0]);
        if ui.color_edit_button_srgb(&mut color).changed() {
            edited.style.color = format_hex_color(color);
        }

        ui.horizontal(|ui| {
            let mut has_background = edited.style.background.is_some();
            if ui.checkbox(&mut has_background, "Background").changed() {
                edited.style.background = if has_background {
                    Some("#ffffff".to_string())
                } else {
                    None
                };
            }
            if let Some(background) = &edited.style.background {
                let mut bg = parse_hex_color(background).unwrap_or([255, 255, 255]);
                if ui.color_edit_button_srgb(&mut bg).changed() {
                    edited.style.background = Some(format_hex_color(bg));
                }
            }
        });

        ui.label("Opacity:");
        ui.add(egui::Slider::new(&mut edited.style.opacity, 0.0..=1.0));

        ui.label("Rotation (deg):");
        ui.add(egui::DragValue::new(&mut edited.style.rotation).range(-180.0..=180.0));

        ui.separator();
        ui.horizontal(|ui| {
            ui.checkbox(&mut edited.locked, "Locked");
            ui.checkbox(&mut edited.visible, "Visible");
        });

        if edited != original {
            if let Some(element) = self.record.design.element_mut(id) {
                *element = edited;
            }
            self.interaction.pending_commit = true;
            self.file.has_unsaved_changes = true;
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Bring Forward").clicked() {
                self.bring_selected_forward();
            }
            if ui.button("Send Backward").clicked() {
                self.send_selected_backward();
            }
        });
        ui.horizontal(|ui| {
            if ui.button("Duplicate").clicked() {
                self.duplicate_selected();
            }
            if ui.button("Delete").clicked() {
                self.delete_selected();
            }
        });
        ui.colored_label(egui::Color32::GRAY, "Press Delete to remove");
    }

    /// Shows the unsaved-changes confirmation dialog when required.
    fn draw_unsaved_dialog(&mut self, ctx: &egui::Context) {
        if !self.file.show_unsaved_dialog {
            return;
        }
        let title = match self.file.pending_confirm_action {
            Some(PendingConfirmAction::Quit) => "Unsaved changes: Quit?",
            Some(PendingConfirmAction::New) => "Unsaved changes: Create New?",
            Some(PendingConfirmAction::Open) => "Unsaved changes: Open File?",
            None => "Unsaved changes",
        };
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("You have unsaved changes. Are you sure you want to continue?");
                ui.horizontal(|ui| {
                    let confirm_label = match self.file.pending_confirm_action {
                        Some(PendingConfirmAction::Quit) => "Discard and Quit",
                        Some(PendingConfirmAction::New) => "Discard and Create New",
                        Some(PendingConfirmAction::Open) => "Discard and Open",
                        None => "Discard",
                    };
                    if ui.button(confirm_label).clicked() {
                        match self.file.pending_confirm_action {
                            Some(PendingConfirmAction::New) => {
                                self.new_template();
                            }
                            Some(PendingConfirmAction::Open) => {
                                self.load_template();
                            }
                            Some(PendingConfirmAction::Quit) => {
                                self.file.allow_close_on_next_request = true;
                                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                            }
                            None => {}
                        }
                        self.file.show_unsaved_dialog = false;
                        self.file.pending_confirm_action = None;
                    }
                    if ui.button("Cancel").clicked() {
                        self.file.show_unsaved_dialog = false;
                        self.file.pending_confirm_action = None;
                    }
                });
            });
    }
}
