use egui::Pos2;

use super::{Tool, ToolContext, ToolPreview};
use crate::command::{ClearSelectionCommand, Command, CreateEllipseCommand, CreateRectangleCommand};
use crate::geometry::Bound;
use crate::shape::{DrawableShape, Style};

/// Which box-shaped component a [`ShapeTool`] draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxShape {
    Rectangle,
    Ellipse,
}

/// Drag out a box from corner to corner. Boxes smaller than the configured minimum on
/// either side are discarded.
#[derive(Debug, Clone)]
pub struct ShapeTool {
    shape: BoxShape,
    start: Option<Pos2>,
    current: Pos2,
}

impl ShapeTool {
    pub fn new(shape: BoxShape) -> Self {
        Self { shape, start: None, current: Pos2::ZERO }
    }

    pub fn shape(&self) -> BoxShape {
        self.shape
    }

    pub fn is_drawing(&self) -> bool {
        self.start.is_some()
    }
}

impl Tool for ShapeTool {
    fn name(&self) -> &'static str {
        match self.shape {
            BoxShape::Rectangle => "Rectangle",
            BoxShape::Ellipse => "Ellipse",
        }
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
        let bound = Bound::from_points(start, pos);
        let min = ctx.config.min_shape_size;
        if bound.width < min || bound.height < min {
            return None;
        }
        let command: Command = match self.shape {
            BoxShape::Rectangle => CreateRectangleCommand::new(bound.x, bound.y, bound.width, bound.height).into(),
            BoxShape::Ellipse => CreateEllipseCommand::new(bound.x, bound.y, bound.width, bound.height).into(),
        };
        Some(command)
    }

    fn preview(&self) -> Option<ToolPreview> {
        let start = self.start?;
        let bound = Bound::from_points(start, self.current);
        let style = Style::default();
        let drawable = match self.shape {
            BoxShape::Rectangle => DrawableShape::Rectangle {
                x: bound.x,
                y: bound.y,
                width: bound.width,
                height: bound.height,
                style,
            },
            BoxShape::Ellipse => {
                let center = bound.center();
                DrawableShape::Ellipse {
                    x: center.x,
                    y: center.y,
                    radius_x: bound.width / 2.0,
                    radius_y: bound.height / 2.0,
                    style,
                }
            }
        };
        Some(ToolPreview::Shape(drawable))
    }
}
