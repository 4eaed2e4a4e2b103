use egui::{Key, Modifiers, Sense};

use crate::app::EditorApp;
use crate::tools::ToolKind;

pub fn central_panel(app: &mut EditorApp, ctx: &egui::Context) {
    handle_shortcuts(app, ctx);

    egui::CentralPanel::default()
        .frame(egui::Frame::canvas(&ctx.style()).fill(egui::Color32::WHITE))
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
            let canvas = response.rect;
            let origin = canvas.min.to_vec2();

            let (pressed, released, pointer, modifiers) = ctx.input(|i| {
                (
                    i.pointer.primary_pressed(),
                    i.pointer.primary_released(),
                    i.pointer.interact_pos(),
                    i.modifiers,
                )
            });

            if let Some(screen_pos) = pointer {
                let pos = screen_pos - origin;
                if pressed && canvas.contains(screen_pos) {
                    let multi_select = modifiers.shift || modifiers.command;
                    let result = app.editor_mut().pointer_down(pos, multi_select);
                    app.report(result);
                } else if released {
                    let result = app.editor_mut().pointer_up(pos);
                    app.report(result);
                } else if app.editor().active_tool().is_busy() {
                    let result = app.editor_mut().pointer_move(pos);
                    app.report(result);
                }

                if app.editor().active_tool().kind() == ToolKind::Select && response.hovered() {
                    let handle = app
                        .editor()
                        .selected_components()
                        .iter()
                        .rev()
                        .find_map(|selected| selected.handle_at(pos));
                    if let Some(handle) = handle {
                        ctx.set_cursor_icon(handle.cursor_icon());
                    }
                }
            }

            app.renderer().render(&painter, origin, app.editor());
        });
}

fn handle_shortcuts(app: &mut EditorApp, ctx: &egui::Context) {
    if ctx.wants_keyboard_input() {
        return;
    }
    // Redo first: Cmd+Shift+Z would otherwise match the plain undo shortcut.
    let redo = ctx.input_mut(|i| {
        i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z) || i.consume_key(Modifiers::COMMAND, Key::Y)
    });
    let undo = ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::Z));
    let delete = ctx.input_mut(|i| {
        i.consume_key(Modifiers::NONE, Key::Delete) || i.consume_key(Modifiers::NONE, Key::Backspace)
    });

    if redo {
        let result = app.editor_mut().redo();
        app.report(result);
    }
    if undo {
        let result = app.editor_mut().undo();
        app.report(result);
    }
    if delete {
        let result = app.editor_mut().delete_selected();
        app.report(result);
    }
}
