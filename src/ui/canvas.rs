//! Canvas interaction and navigation functionality.
//!
//! This module handles canvas panning, zooming, element dragging, selection,
//! and coordinate transformations between screen space and the page's
//! percentage coordinate system.

use super::state::DesignerApp;
use crate::constants;
use crate::geometry::drag_to_percent;
use crate::types::{ElementId, PercentPos};
use eframe::egui;

impl DesignerApp {
    /// The page rectangle in screen space for the current pan and zoom.
    ///
    /// # Arguments
    ///
    /// * `canvas_rect` - The screen rectangle allocated to the canvas widget
    ///
    /// # Returns
    ///
    /// The rectangle the page occupies on screen
    pub fn page_rect(&self, canvas_rect: egui::Rect) -> egui::Rect {
        let size = egui::vec2(
            constants::PAGE_WIDTH * self.canvas.zoom_factor,
            constants::PAGE_HEIGHT * self.canvas.zoom_factor,
        );
        egui::Rect::from_min_size(canvas_rect.min + self.canvas.offset, size)
    }

    /// Centers the page inside the canvas area on the first frame of a
    /// session so the document is visible without manual panning.
    pub fn ensure_page_centered(&mut self, canvas_rect: egui::Rect) {
        if self.canvas.offset_initialized {
            return;
        }
        let page_size = egui::vec2(
            constants::PAGE_WIDTH * self.canvas.zoom_factor,
            constants::PAGE_HEIGHT * self.canvas.zoom_factor,
        );
        self.canvas.offset = (canvas_rect.size() - page_size) * 0.5;
        self.canvas.offset_initialized = true;
    }

    /// Converts a percentage position to screen coordinates.
    ///
    /// # Arguments
    ///
    /// * `pos` - Element position as percentages of the page
    /// * `page_rect` - The page rectangle in screen space
    ///
    /// # Returns
    ///
    /// The corresponding position in screen space (pixels)
    pub fn percent_to_screen(&self, pos: PercentPos, page_rect: egui::Rect) -> egui::Pos2 {
        egui::pos2(
            page_rect.min.x + pos.x / 100.0 * page_rect.width(),
            page_rect.min.y + pos.y / 100.0 * page_rect.height(),
        )
    }

    /// Handles middle-click or Cmd/Ctrl+left-click canvas panning.
    ///
    /// Uses Cmd on macOS and Ctrl on other platforms for modifier-based
    /// panning.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    pub fn handle_canvas_panning(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        // modifiers.command automatically uses Cmd on macOS and Ctrl elsewhere
        let should_pan = ui.input(|i| {
            i.pointer.middle_down() || (i.pointer.primary_down() && i.modifiers.command)
        });

        if should_pan {
            if let Some(current_pos) = response.interact_pointer_pos() {
                if !self.interaction.is_panning {
                    self.interaction.is_panning = true;
                    self.interaction.last_pan_pos = Some(current_pos);
                } else if let Some(last_pos) = self.interaction.last_pan_pos {
                    self.canvas.offset += current_pos - last_pos;
                    self.interaction.last_pan_pos = Some(current_pos);
                }
            }
        } else {
            self.interaction.is_panning = false;
            self.interaction.last_pan_pos = None;
        }
    }

    /// Handles scroll wheel zooming.
    ///
    /// Zooms in and out while keeping the point under the cursor fixed on
    /// screen. The factor is clamped to the supported zoom range and only
    /// applies while the cursor is over the canvas.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    pub fn handle_canvas_zoom(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta == 0.0 {
            return;
        }

        let mouse_pos = ui
            .input(|i| i.pointer.hover_pos())
            .or_else(|| response.interact_pointer_pos());

        if let Some(mouse_pos) = mouse_pos {
            if !response.rect.contains(mouse_pos) {
                return;
            }

            let zoom_delta = if scroll_delta > 0.0 { 0.025 } else { -0.025 };
            let old_zoom = self.canvas.zoom_factor;
            let new_zoom =
                (old_zoom + zoom_delta).clamp(constants::MIN_ZOOM, constants::MAX_ZOOM);

            if (new_zoom - old_zoom).abs() > f32::EPSILON {
                // Keep the page point under the cursor stationary: the offset
                // from the canvas origin to the cursor scales with the zoom.
                let canvas_origin = response.rect.min;
                let cursor_from_page = mouse_pos - canvas_origin - self.canvas.offset;
                let scaled = cursor_from_page * (new_zoom / old_zoom);
                self.canvas.offset += cursor_from_page - scaled;
                self.canvas.zoom_factor = new_zoom;
            }
        }
    }

    /// Handles element selection and dragging with the left mouse button.
    ///
    /// Press on an element selects it and starts a drag; moving the pointer
    /// updates the element's percentage position live (clamped to the page);
    /// release commits one history snapshot if the position changed. Locked
    /// elements can be selected but never move. Pressing empty canvas clears
    /// the selection.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    /// * `page_rect` - The page rectangle in screen space
    pub fn handle_element_dragging(
        &mut self,
        ui: &mut egui::Ui,
        response: &egui::Response,
        page_rect: egui::Rect,
    ) {
        if ui.input(|i| i.pointer.primary_down()) && !self.interaction.is_panning {
            let command_held = ui.input(|i| i.modifiers.command);
            if command_held {
                return;
            }
            if let Some(current_pos) = response.interact_pointer_pos() {
                if self.interaction.dragging_element.is_none()
                    && self.interaction.drag_start_pointer.is_none()
                {
                    // Fresh press: hit test and select.
                    match self.find_element_at_position(current_pos) {
                        Some(element_id) => {
                            self.start_element_drag(element_id, current_pos);
                        }
                        None => {
                            self.interaction.selected_element = None;
                            self.stop_inline_edit(false);
                            // Remember the press so an empty-canvas drag does
                            // not select whatever it later passes over.
                            self.interaction.drag_start_pointer = Some(current_pos);
                        }
                    }
                } else if let Some(dragging_id) = self.interaction.dragging_element {
                    self.update_dragged_element(dragging_id, current_pos, page_rect);
                }
            }
        } else {
            // Mouse released: commit the move if the element actually moved.
            if let Some(dragging_id) = self.interaction.dragging_element {
                let moved = match (
                    self.interaction.drag_start_position,
                    self.record.design.element(dragging_id),
                ) {
                    (Some(start), Some(element)) => element.position != start,
                    _ => false,
                };
                if moved {
                    self.commit_history();
                }
            }

            self.interaction.dragging_element = None;
            self.interaction.drag_start_pointer = None;
            self.interaction.drag_start_position = None;
        }
    }

    /// Starts a drag on the given element, selecting it first.
    ///
    /// Locked elements get selected but no drag state, so subsequent pointer
    /// movement leaves them in place.
    fn start_element_drag(&mut self, element_id: ElementId, current_pos: egui::Pos2) {
        if self.interaction.selected_element != Some(element_id) {
            self.interaction.selected_element = Some(element_id);
            self.stop_inline_edit(false);
        }
        self.interaction.drag_start_pointer = Some(current_pos);

        if let Some(element) = self.record.design.element(element_id) {
            if element.locked {
                return;
            }
            self.interaction.dragging_element = Some(element_id);
            self.interaction.drag_start_position = Some(element.position);
        }
    }

    /// Updates the position of the currently dragged element from the
    /// pointer delta since the drag started.
    fn update_dragged_element(
        &mut self,
        element_id: ElementId,
        current_pos: egui::Pos2,
        page_rect: egui::Rect,
    ) {
        let (Some(start_pointer), Some(start_position)) = (
            self.interaction.drag_start_pointer,
            self.interaction.drag_start_position,
        ) else {
            return;
        };

        let delta = current_pos - start_pointer;
        let new_pos = drag_to_percent(
            (delta.x, delta.y),
            page_rect.width() / constants::PAGE_WIDTH,
            (constants::PAGE_WIDTH, constants::PAGE_HEIGHT),
            start_position,
        );

        if let Some(element) = self.record.design.element_mut(element_id) {
            if element.position != new_pos {
                element.position = new_pos;
                self.file.has_unsaved_changes = true;
            }
        }
    }

    /// Finds the topmost element at the given screen position, if any.
    ///
    /// Hit rectangles are captured during the last paint in painting order,
    /// so scanning them in reverse returns the element painted on top.
    ///
    /// # Arguments
    ///
    /// * `pos` - Position in screen space to check
    ///
    /// # Returns
    ///
    /// The ID of the element at that position, or `None` if none is there
    pub fn find_element_at_position(&self, pos: egui::Pos2) -> Option<ElementId> {
        self.interaction
            .element_rects
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(id, _)| *id)
    }

    /// Enters inline editing for the element double-clicked on the canvas,
    /// if it is a text or placeholder element.
    pub fn handle_double_click_edit(&mut self, response: &egui::Response) {
        if !response.double_clicked() {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        if let Some(element_id) = self.find_element_at_position(pos) {
            if let Some(element) = self.record.design.element(element_id) {
                if element.is_textual() && !element.locked {
                    self.interaction.selected_element = Some(element_id);
                    self.interaction.editing_element = Some(element_id);
                    self.interaction.temp_content = element.content.clone();
                    self.interaction.focus_requested_for_edit = false;
                }
            }
        }
    }

    /// Leaves inline editing mode.
    ///
    /// When `apply` is true the staged content replaces the element's
    /// content and a history snapshot is committed if it changed; otherwise
    /// the staged text is discarded.
    pub fn stop_inline_edit(&mut self, apply: bool) {
        let Some(editing_id) = self.interaction.editing_element.take() else {
            return;
        };
        if apply {
            let new_content = self.interaction.temp_content.clone();
            let changed = match self.record.design.element_mut(editing_id) {
                Some(element) if element.content != new_content => {
                    element.content = new_content;
                    true
                }
                _ => false,
            };
            if changed {
                self.commit_history();
            }
        }
        self.interaction.temp_content.clear();
        self.interaction.focus_requested_for_edit = false;
    }
}
