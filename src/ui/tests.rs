use super::*;
use crate::types::{ElementKind, PercentPos};
use eframe::egui;

/// Runs a single headless egui frame with the provided input events.
fn run_frame(
    ctx: &egui::Context,
    events: Vec<egui::Event>,
    app: &mut DesignerApp,
) -> egui::FullOutput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1600.0, 1000.0),
    ));
    raw.events = events;

    ctx.run(raw, |ctx| {
        ctx.set_visuals(egui::Visuals::dark());
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
    })
}

/// Creates an app with a deterministic canvas: page at the canvas origin,
/// 1:1 zoom, no auto-centering.
fn app_with_fixed_canvas() -> DesignerApp {
    let mut app = DesignerApp::default();
    app.canvas.offset = egui::Vec2::ZERO;
    app.canvas.offset_initialized = true;
    app.canvas.zoom_factor = 1.0;
    app
}

/// The recorded screen rect of an element after at least one painted frame.
fn screen_rect_of(app: &DesignerApp, id: crate::types::ElementId) -> egui::Rect {
    app.interaction
        .element_rects
        .iter()
        .find(|(eid, _)| *eid == id)
        .map(|(_, r)| *r)
        .expect("element should have been painted")
}

#[test]
fn add_element_selects_and_commits() {
    let mut app = DesignerApp::default();
    assert!(!app.history.can_undo());

    app.add_element(ElementKind::Text, None);

    let id = app.interaction.selected_element.expect("new element selected");
    assert!(app.record.design.element(id).is_some());
    assert!(app.history.can_undo());
    assert!(app.file.has_unsaved_changes);
}

#[test]
fn undo_and_redo_roundtrip_a_move() {
    let mut app = DesignerApp::default();
    app.add_element(ElementKind::Text, None);
    let id = app.interaction.selected_element.unwrap();

    // Move the element the way a finished drag would: mutate, then commit.
    app.record.design.element_mut(id).unwrap().position = PercentPos::new(60.0, 50.0);
    app.commit_history();

    app.perform_undo();
    assert_eq!(
        app.record.design.element(id).unwrap().position,
        PercentPos::new(50.0, 50.0)
    );

    app.perform_redo();
    assert_eq!(
        app.record.design.element(id).unwrap().position,
        PercentPos::new(60.0, 50.0)
    );
}

#[test]
fn undo_past_element_creation_clears_selection() {
    let mut app = DesignerApp::default();
    app.add_element(ElementKind::Shape, None);
    let id = app.interaction.selected_element.unwrap();

    app.perform_undo();

    assert!(app.record.design.element(id).is_none());
    assert_eq!(app.interaction.selected_element, None);
}

#[test]
fn delete_selected_removes_element_and_clears_selection() {
    let mut app = DesignerApp::default();
    app.add_element(ElementKind::Line, None);
    let id = app.interaction.selected_element.unwrap();

    app.delete_selected();

    assert!(app.record.design.element(id).is_none());
    assert_eq!(app.interaction.selected_element, None);

    // The deletion itself is undoable.
    app.perform_undo();
    assert!(app.record.design.element(id).is_some());
}

#[test]
fn removing_unselected_element_keeps_selection() {
    let mut app = DesignerApp::default();
    app.add_element(ElementKind::Shape, None);
    let kept = app.interaction.selected_element.unwrap();
    app.add_element(ElementKind::Text, None);
    let removed = app.interaction.selected_element.unwrap();
    app.interaction.selected_element = Some(kept);

    // Remove a different element than the selected one.
    assert!(app.record.design.remove_element(removed));
    app.commit_history();
    app.validate_selection();

    assert_eq!(app.interaction.selected_element, Some(kept));
    assert!(app.record.design.element(kept).is_some());
}

#[test]
fn undo_during_staged_panel_edit_keeps_redo_branch() {
    let mut app = DesignerApp::default();
    app.add_element(ElementKind::Text, None);
    let id = app.interaction.selected_element.unwrap();

    // A live panel edit has mutated the element but not yet committed.
    app.record.design.element_mut(id).unwrap().style.font_size = 48.0;
    app.interaction.pending_commit = true;

    app.perform_undo();

    // The staged commit is dropped, so the end-of-frame flush cannot
    // re-commit the restored snapshot and prune the redo branch.
    assert!(!app.interaction.pending_commit);
    assert!(app.history.can_redo());

    app.perform_redo();
    assert!(app.record.design.element(id).is_some());
}

#[test]
fn duplicate_near_edge_clamps_offset() {
    let mut app = DesignerApp::default();
    app.add_element(ElementKind::Text, None);
    let id = app.interaction.selected_element.unwrap();
    app.record.design.element_mut(id).unwrap().position = PercentPos::new(99.5, 99.5);
    app.commit_history();

    app.duplicate_selected();

    let copy_id = app.interaction.selected_element.unwrap();
    assert_ne!(copy_id, id);
    let copy = app.record.design.element(copy_id).unwrap();
    assert_eq!(copy.position, PercentPos::new(100.0, 100.0));
    let original = app.record.design.element(id).unwrap();
    assert!(copy.z_index > original.z_index);
}

#[test]
fn z_order_buttons_follow_stacking_rules() {
    let mut app = DesignerApp::default();
    app.add_element(ElementKind::Shape, None);
    let bottom = app.interaction.selected_element.unwrap();
    app.add_element(ElementKind::Shape, None);
    let top = app.interaction.selected_element.unwrap();

    // Bring the bottom element above everything.
    app.interaction.selected_element = Some(bottom);
    app.bring_selected_forward();
    let bottom_z = app.record.design.element(bottom).unwrap().z_index;
    let top_z = app.record.design.element(top).unwrap().z_index;
    assert!(bottom_z > top_z);

    // Sending backward steps down one and never goes below zero.
    app.record.design.element_mut(bottom).unwrap().z_index = 0;
    app.send_selected_backward();
    assert_eq!(app.record.design.element(bottom).unwrap().z_index, 0);
}

#[test]
fn clicking_canvas_selects_element() {
    let mut app = app_with_fixed_canvas();
    app.add_element(ElementKind::Shape, None);
    let id = app.interaction.selected_element.unwrap();
    app.interaction.selected_element = None;

    let ctx = egui::Context::default();

    // First frame paints and records hit rectangles.
    run_frame(&ctx, vec![], &mut app);
    let center = screen_rect_of(&app, id).center();

    // Second frame: press the primary button over the element.
    run_frame(
        &ctx,
        vec![
            egui::Event::PointerMoved(center),
            egui::Event::PointerButton {
                pos: center,
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::NONE,
            },
        ],
        &mut app,
    );

    assert_eq!(app.interaction.selected_element, Some(id));
}

#[test]
fn dragging_far_off_page_clamps_position() {
    let mut app = app_with_fixed_canvas();
    app.add_element(ElementKind::Shape, None);
    let id = app.interaction.selected_element.unwrap();

    let ctx = egui::Context::default();
    run_frame(&ctx, vec![], &mut app);
    let center = screen_rect_of(&app, id).center();

    // Press, drag far beyond the bottom-right page corner, release.
    run_frame(
        &ctx,
        vec![
            egui::Event::PointerMoved(center),
            egui::Event::PointerButton {
                pos: center,
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::NONE,
            },
        ],
        &mut app,
    );
    let far = center + egui::vec2(5000.0, 5000.0);
    run_frame(&ctx, vec![egui::Event::PointerMoved(far)], &mut app);
    run_frame(
        &ctx,
        vec![egui::Event::PointerButton {
            pos: far,
            button: egui::PointerButton::Primary,
            pressed: false,
            modifiers: egui::Modifiers::NONE,
        }],
        &mut app,
    );

    let element = app.record.design.element(id).unwrap();
    assert_eq!(element.position, PercentPos::new(100.0, 100.0));
    // The finished drag committed exactly one undoable step.
    app.perform_undo();
    assert_eq!(
        app.record.design.element(id).unwrap().position,
        PercentPos::new(50.0, 50.0)
    );
}

#[test]
fn locked_element_selects_but_does_not_move() {
    let mut app = app_with_fixed_canvas();
    app.add_element(ElementKind::Shape, None);
    let id = app.interaction.selected_element.unwrap();
    app.record.design.element_mut(id).unwrap().locked = true;
    app.interaction.selected_element = None;

    let ctx = egui::Context::default();
    run_frame(&ctx, vec![], &mut app);
    let center = screen_rect_of(&app, id).center();

    run_frame(
        &ctx,
        vec![
            egui::Event::PointerMoved(center),
            egui::Event::PointerButton {
                pos: center,
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::NONE,
            },
        ],
        &mut app,
    );
    let away = center + egui::vec2(150.0, 80.0);
    run_frame(&ctx, vec![egui::Event::PointerMoved(away)], &mut app);
    run_frame(
        &ctx,
        vec![egui::Event::PointerButton {
            pos: away,
            button: egui::PointerButton::Primary,
            pressed: false,
            modifiers: egui::Modifiers::NONE,
        }],
        &mut app,
    );

    assert_eq!(app.interaction.selected_element, Some(id));
    assert_eq!(
        app.record.design.element(id).unwrap().position,
        PercentPos::new(50.0, 50.0)
    );
}

#[test]
fn overlapping_elements_hit_topmost() {
    let mut app = app_with_fixed_canvas();
    app.add_element(ElementKind::Shape, None);
    let below = app.interaction.selected_element.unwrap();
    app.add_element(ElementKind::Shape, None);
    let above = app.interaction.selected_element.unwrap();
    app.interaction.selected_element = None;

    let ctx = egui::Context::default();
    run_frame(&ctx, vec![], &mut app);
    let center = screen_rect_of(&app, below).center();

    let hit = app.find_element_at_position(center);
    assert_eq!(hit, Some(above));
}

#[test]
fn undo_shortcut_restores_previous_snapshot() {
    let mut app = DesignerApp::default();
    app.add_element(ElementKind::Text, None);
    let id = app.interaction.selected_element.unwrap();
    app.record.design.element_mut(id).unwrap().position = PercentPos::new(70.0, 30.0);
    app.commit_history();

    let undo_event = egui::Event::Key {
        key: egui::Key::Z,
        physical_key: Some(egui::Key::Z),
        pressed: true,
        repeat: false,
        modifiers: egui::Modifiers {
            command: true,
            ..Default::default()
        },
    };

    let ctx = egui::Context::default();
    let mut raw = egui::RawInput::default();
    raw.modifiers = egui::Modifiers {
        command: true,
        ..Default::default()
    };
    raw.events = vec![undo_event];
    let _ = ctx.run(raw, |ctx| {
        app.handle_undo_redo_keys(ctx);
    });

    assert_eq!(
        app.record.design.element(id).unwrap().position,
        PercentPos::new(50.0, 50.0)
    );
}

#[test]
fn inline_edit_apply_and_cancel() {
    let mut app = DesignerApp::default();
    app.add_element(ElementKind::Text, None);
    let id = app.interaction.selected_element.unwrap();

    // Apply: staged content replaces the element content and commits.
    app.interaction.editing_element = Some(id);
    app.interaction.temp_content = "Awarded to {{studentName}}".to_string();
    app.stop_inline_edit(true);
    assert_eq!(
        app.record.design.element(id).unwrap().content,
        "Awarded to {{studentName}}"
    );

    // Cancel: staged content is discarded.
    app.interaction.editing_element = Some(id);
    app.interaction.temp_content = "discarded".to_string();
    app.stop_inline_edit(false);
    assert_eq!(
        app.record.design.element(id).unwrap().content,
        "Awarded to {{studentName}}"
    );

    // The applied edit is one undo step.
    app.perform_undo();
    assert_eq!(app.record.design.element(id).unwrap().content, "New text");
}

#[test]
fn save_with_empty_name_is_blocked() {
    let mut app = DesignerApp::default();
    app.record.meta.name = "   ".to_string();

    app.save_template();

    assert!(app.file.pending_save_operation.is_none());
    assert!(app.name_error);
    let note = app.notification.expect("validation raises a notification");
    assert!(note.is_error);
}

#[test]
fn new_template_resets_document_and_history() {
    let mut app = DesignerApp::default();
    app.record.meta.name = "Old".to_string();
    app.add_element(ElementKind::Text, None);
    assert!(app.history.can_undo());

    app.new_template();

    assert!(app.record.design.elements.is_empty());
    assert!(app.record.meta.name.is_empty());
    assert!(!app.history.can_undo());
    assert!(!app.file.has_unsaved_changes);
    assert_eq!(app.interaction.selected_element, None);
}

#[test]
fn interactive_and_print_renderers_share_resolved_styles() {
    // Both canvases consume the same resolver, so the printed SVG must show
    // the exact colors and geometry the editor resolved.
    let mut app = DesignerApp::default();
    app.add_element(ElementKind::Text, Some("Parity check".to_string()));
    let id = app.interaction.selected_element.unwrap();
    {
        let element = app.record.design.element_mut(id).unwrap();
        element.style.color = "#ff8000".to_string();
        element.style.font_size = 36.0;
    }

    let element = app.record.design.element(id).unwrap();
    let props = crate::geometry::resolve_style(element);
    assert_eq!(props.color, [255, 128, 0, 255]);

    let svg = crate::render::design_to_svg(&app.record.design);
    assert!(svg.contains("#ff8000"));
    assert!(svg.contains("font-size=\"36.0\""));
    assert!(svg.contains("Parity check"));
}
