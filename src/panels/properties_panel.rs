use crate::app::EditorApp;
use crate::geometry::Bound;
use crate::id_generator::ComponentId;
use crate::shape::{BoundPatch, Shape};

/// Edit buffer for the property panel. It follows the selected shape until the user
/// starts typing, and is only written back on Apply.
#[derive(Debug, Default)]
pub struct PropertyBuffer {
    id: Option<ComponentId>,
    bound: Bound,
    dirty: bool,
}

impl PropertyBuffer {
    fn sync(&mut self, id: ComponentId, bound: Bound) {
        if self.id != Some(id) || !self.dirty {
            self.id = Some(id);
            self.bound = bound;
            self.dirty = false;
        }
    }

    fn reset(&mut self) {
        self.id = None;
        self.dirty = false;
    }
}

pub fn properties_panel(app: &mut EditorApp, ctx: &egui::Context) {
    egui::SidePanel::right("properties_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Properties");

            let selected = match app.editor().selected_ids() {
                [id] => app
                    .editor()
                    .manager()
                    .find_component_by_id(*id)
                    .map(|component| (*id, component.kind(), component.bound())),
                _ => None,
            };

            let Some((id, kind, bound)) = selected else {
                let count = app.editor().selected_ids().len();
                if count > 1 {
                    ui.label(format!("{count} shapes selected"));
                } else {
                    ui.label("Nothing selected");
                }
                app.properties_mut().reset();
                return;
            };

            ui.label(format!("{} {id}", kind.as_str()));

            let buffer = app.properties_mut();
            buffer.sync(id, bound);

            let mut changed = false;
            egui::Grid::new("properties_grid").num_columns(2).show(ui, |ui| {
                for (label, value, min) in [
                    ("X", &mut buffer.bound.x, f32::MIN),
                    ("Y", &mut buffer.bound.y, f32::MIN),
                    ("Width", &mut buffer.bound.width, 0.0),
                    ("Height", &mut buffer.bound.height, 0.0),
                ] {
                    ui.label(label);
                    changed |= ui
                        .add(egui::DragValue::new(value).speed(1.0).range(min..=f32::MAX))
                        .changed();
                    ui.end_row();
                }
            });
            if changed {
                buffer.dirty = true;
            }

            let dirty = buffer.dirty;
            let patch = changed_fields(&bound, &buffer.bound);
            ui.horizontal(|ui| {
                if ui.add_enabled(dirty && !patch.is_empty(), egui::Button::new("Apply")).clicked() {
                    let result = app.editor_mut().set_selected_properties(patch);
                    app.report(result);
                    app.properties_mut().reset();
                }
                if ui.add_enabled(dirty, egui::Button::new("Reset")).clicked() {
                    app.properties_mut().reset();
                }
            });
        });
}

/// Only the fields the user actually edited, so untouched zero extents (flat lines) are
/// not resubmitted.
fn changed_fields(original: &Bound, edited: &Bound) -> BoundPatch {
    let pick = |before: f32, after: f32| (before != after).then_some(after);
    BoundPatch {
        x: pick(original.x, edited.x),
        y: pick(original.y, edited.y),
        width: pick(original.width, edited.width),
        height: pick(original.height, edited.height),
    }
}
