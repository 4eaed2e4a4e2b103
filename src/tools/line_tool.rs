use egui::Pos2;

use super::{Tool, ToolContext, ToolPreview};
use crate::command::{ClearSelectionCommand, Command, CreateLineCommand};
use crate::shape::{DrawableShape, Style};

/// Drag from one endpoint to the other.
#[derive(Debug, Clone, Default)]
pub struct LineTool {
    start: Option<Pos2>,
    current: Pos2,
}

impl LineTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        self.start.is_some()
    }
}

impl Tool for LineTool {
    fn name(&self) -> &'static str {
        "Line"
    }

    fn deactivate(&mut self) {
        self.start = None;
    }

    fn on_pointer_down(&mut self, pos: Pos2, _multi_select: bool, _ctx: ToolContext<'_>) -> Option<Command> {
        self.start = Some(pos);
        self.current = pos;
        Some(ClearSelectionCommand::new().into())
    }

    fn on_pointer_move(&mut self, pos: Pos2, _ctx: ToolContext<'_>) -> Option<Command> {
        if self.start.is_some() {
            self.current = pos;
        }
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: ToolContext<'_>) -> Option<Command> {
        let start = self.start.take()?;
        if start.distance(pos) < ctx.config.min_line_length {
            return None;
        }
        Some(CreateLineCommand::new(start, pos).into())
    }

    fn preview(&self) -> Option<ToolPreview> {
        let start = self.start?;
        Some(ToolPreview::Shape(DrawableShape::Line {
            x1: start.x,
            y1: start.y,
            x2: self.current.x,
            y2: self.current.y,
            style: Style::default(),
        }))
    }
}
