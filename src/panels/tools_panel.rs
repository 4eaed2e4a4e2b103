use crate::app::EditorApp;
use crate::tools::{Tool, ToolKind};

pub fn tools_panel(app: &mut EditorApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.editor().active_tool().kind();
            for kind in ToolKind::ALL {
                if ui.selectable_label(active == kind, kind.label()).clicked() {
                    app.set_tool(kind);
                }
            }
            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.editor().can_undo();
                let can_redo = app.editor().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    let result = app.editor_mut().undo();
                    app.report(result);
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    let result = app.editor_mut().redo();
                    app.report(result);
                }
            });

            ui.separator();
            ui.label("Arrange");

            let editor = app.editor();
            let groupable = editor.is_groupable();
            let ungroupable = editor.is_ungroupable();
            let reorderable = editor.is_z_order_changeable();
            let has_selection = !editor.selected_ids().is_empty();

            ui.horizontal(|ui| {
                if ui.add_enabled(groupable, egui::Button::new("Group")).clicked() {
                    let result = app.editor_mut().group_selected();
                    app.report(result);
                }
                if ui.add_enabled(ungroupable, egui::Button::new("Ungroup")).clicked() {
                    let result = app.editor_mut().ungroup_selected();
                    app.report(result);
                }
            });
            ui.horizontal(|ui| {
                if ui.add_enabled(reorderable, egui::Button::new("Front")).clicked() {
                    let result = app.editor_mut().bring_to_front();
                    app.report(result);
                }
                if ui.add_enabled(reorderable, egui::Button::new("Forward")).clicked() {
                    let result = app.editor_mut().bring_forward();
                    app.report(result);
                }
            });
            ui.horizontal(|ui| {
                if ui.add_enabled(reorderable, egui::Button::new("Backward")).clicked() {
                    let result = app.editor_mut().send_backward();
                    app.report(result);
                }
                if ui.add_enabled(reorderable, egui::Button::new("Back")).clicked() {
                    let result = app.editor_mut().send_to_back();
                    app.report(result);
                }
            });
            if ui.add_enabled(has_selection, egui::Button::new("Delete")).clicked() {
                let result = app.editor_mut().delete_selected();
                app.report(result);
            }

            ui.separator();

            let history = app.editor().history();
            ui.label(format!(
                "Undo stack: {}  Redo stack: {}",
                history.undo_len(),
                history.redo_len()
            ));
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                egui::Grid::new("command_history_grid")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for (i, name) in history.undo_names().iter().enumerate().rev() {
                            ui.label(format!("{}", i + 1));
                            ui.label(*name);
                            ui.end_row();
                        }
                    });
            });

            ui.separator();
            let tool = app.editor().active_tool();
            ui.label(format!("Active tool: {}", tool.name()));
            if let Some(message) = app.last_error() {
                ui.colored_label(egui::Color32::RED, message);
            }
        });
}
