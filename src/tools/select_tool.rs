use egui::{Pos2, Vec2};
use log::debug;

use super::{Tool, ToolContext, ToolPreview};
use crate::command::{
    ClearSelectionCommand, Command, MoveComponentsCommand, ScaleComponentsByHandleCommand,
    SelectComponentsCommand,
};
use crate::id_generator::ComponentId;
use crate::selection::{HandlePosition, SelectedComponent};
use crate::shape::Shape;

#[derive(Debug, Clone, PartialEq)]
pub enum SelectState {
    Idle,
    /// Pointer is down on a shape; release past the drag threshold moves `targets`.
    Dragging {
        targets: Vec<ComponentId>,
        start: Pos2,
        last: Pos2,
        moved: bool,
    },
    /// Pointer is down on a resize handle of the current selection.
    Resizing {
        targets: Vec<ComponentId>,
        handle: HandlePosition,
        start: Pos2,
        last: Pos2,
        moved: bool,
    },
}

/// A drag counts once the pointer has travelled `threshold` along either axis.
fn past_threshold(delta: Vec2, threshold: f32) -> bool {
    delta.x.abs() >= threshold || delta.y.abs() >= threshold
}

/// Click to select, modifier-click to add, drag to move, drag a handle to resize.
#[derive(Debug, Clone)]
pub struct SelectTool {
    state: SelectState,
}

impl Default for SelectTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectTool {
    pub fn new() -> Self {
        Self { state: SelectState::Idle }
    }

    pub fn state(&self) -> &SelectState {
        &self.state
    }

    /// Handle of a currently selected shape under `pos`, topmost first.
    fn handle_under(pos: Pos2, ctx: ToolContext<'_>) -> Option<HandlePosition> {
        ctx.manager
            .components()
            .iter()
            .rev()
            .filter(|component| ctx.manager.is_selected(component.id()))
            .find_map(|component| {
                SelectedComponent::with_handle_size(component, ctx.config.handle_size).handle_at(pos)
            })
    }
}

impl Tool for SelectTool {
    fn name(&self) -> &'static str {
        "Select"
    }

    fn activate(&mut self) {
        self.state = SelectState::Idle;
    }

    fn deactivate(&mut self) {
        self.state = SelectState::Idle;
    }

    fn on_pointer_down(&mut self, pos: Pos2, multi_select: bool, ctx: ToolContext<'_>) -> Option<Command> {
        let selected = ctx.manager.selected_ids().to_vec();

        if let Some(handle) = Self::handle_under(pos, ctx) {
            debug!("Resize from {} at {pos:?}", handle.as_str());
            self.state = SelectState::Resizing {
                targets: selected,
                handle,
                start: pos,
                last: pos,
                moved: false,
            };
            return None;
        }

        let Some(hit) = ctx.manager.find_component_at_point(pos).map(Shape::id) else {
            self.state = SelectState::Idle;
            return Some(ClearSelectionCommand::new().into());
        };

        // Pressing on something already selected keeps the selection so it can be dragged.
        let (targets, command): (Vec<ComponentId>, Option<Command>) = if selected.contains(&hit) {
            (selected, None)
        } else if multi_select {
            let mut targets = selected;
            targets.push(hit);
            (targets, Some(SelectComponentsCommand::additive(vec![hit]).into()))
        } else {
            (vec![hit], Some(SelectComponentsCommand::new(vec![hit]).into()))
        };

        self.state = SelectState::Dragging { targets, start: pos, last: pos, moved: false };
        command
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: ToolContext<'_>) -> Option<Command> {
        let threshold = ctx.config.drag_threshold;
        match &mut self.state {
            SelectState::Idle => {}
            SelectState::Dragging { start, last, moved, .. }
            | SelectState::Resizing { start, last, moved, .. } => {
                *last = pos;
                if !*moved && past_threshold(pos - *start, threshold) {
                    *moved = true;
                }
            }
        }
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: ToolContext<'_>) -> Option<Command> {
        let threshold = ctx.config.drag_threshold;
        let state = std::mem::replace(&mut self.state, SelectState::Idle);

        match state {
            SelectState::Idle => None,
            SelectState::Dragging { targets, start, moved, .. } => {
                let delta = pos - start;
                if !moved || !past_threshold(delta, threshold) || targets.is_empty() {
                    return None;
                }
                Some(MoveComponentsCommand::new(targets, delta).into())
            }
            SelectState::Resizing { targets, handle, start, moved, .. } => {
                let delta = pos - start;
                if !moved || !past_threshold(delta, threshold) || targets.is_empty() {
                    return None;
                }
                Some(ScaleComponentsByHandleCommand::new(targets, handle, delta).into())
            }
        }
    }

    fn preview(&self) -> Option<ToolPreview> {
        match &self.state {
            SelectState::Dragging { targets, start, last, moved: true } => Some(ToolPreview::Move {
                ids: targets.clone(),
                delta: *last - *start,
            }),
            SelectState::Resizing { targets, handle, start, last, moved: true } => Some(ToolPreview::Resize {
                ids: targets.clone(),
                handle: *handle,
                delta: *last - *start,
            }),
            _ => None,
        }
    }
}
