use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::component_manager::ComponentManager;
use crate::config::EditorConfig;
use crate::id_generator::ComponentId;
use crate::selection::HandlePosition;
use crate::shape::DrawableShape;

mod line_tool;
mod select_tool;
mod shape_tool;

pub use line_tool::LineTool;
pub use select_tool::{SelectState, SelectTool};
pub use shape_tool::{BoxShape, ShapeTool};

/// Read-only view of the editor handed to tools on every pointer event.
#[derive(Clone, Copy)]
pub struct ToolContext<'a> {
    pub manager: &'a ComponentManager,
    pub config: &'a EditorConfig,
}

/// What an in-progress gesture would do if it were released now.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolPreview {
    Move { ids: Vec<ComponentId>, delta: Vec2 },
    Resize { ids: Vec<ComponentId>, handle: HandlePosition, delta: Vec2 },
    Shape(DrawableShape),
}

/// Tool trait defines the interface for all canvas tools.
///
/// Tools interpret pointer gestures and hand back commands; they never touch the document
/// themselves.
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Called when the tool is selected (activated).
    fn activate(&mut self) {}

    /// Called when the tool is deselected. Any gesture in progress is dropped.
    fn deactivate(&mut self);

    /// Handle pointer press on the canvas. `multi_select` is true while the
    /// add-to-selection modifier is held.
    fn on_pointer_down(&mut self, pos: Pos2, multi_select: bool, ctx: ToolContext<'_>) -> Option<Command>;

    /// Handle pointer drag while the pointer is held down.
    fn on_pointer_move(&mut self, pos: Pos2, ctx: ToolContext<'_>) -> Option<Command>;

    /// Handle pointer release. Return a Command to finalize the gesture, if any.
    fn on_pointer_up(&mut self, pos: Pos2, ctx: ToolContext<'_>) -> Option<Command>;

    fn preview(&self) -> Option<ToolPreview> {
        None
    }
}

/// Tool identifiers, persisted with the app state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Ellipse,
    Line,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [ToolKind::Select, ToolKind::Rectangle, ToolKind::Ellipse, ToolKind::Line];

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Ellipse => "Ellipse",
            ToolKind::Line => "Line",
        }
    }
}

/// Enum representing all available tool types
/// This allows us to avoid using Box<dyn Tool>
#[derive(Debug, Clone)]
pub enum ToolType {
    Select(SelectTool),
    Rectangle(ShapeTool),
    Ellipse(ShapeTool),
    Line(LineTool),
}

impl Default for ToolType {
    fn default() -> Self {
        new_tool(ToolKind::Select)
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Select(tool) => tool.name(),
            Self::Rectangle(tool) | Self::Ellipse(tool) => tool.name(),
            Self::Line(tool) => tool.name(),
        }
    }

    fn activate(&mut self) {
        match self {
            Self::Select(tool) => tool.activate(),
            Self::Rectangle(tool) | Self::Ellipse(tool) => tool.activate(),
            Self::Line(tool) => tool.activate(),
        }
    }

    fn deactivate(&mut self) {
        match self {
            Self::Select(tool) => tool.deactivate(),
            Self::Rectangle(tool) | Self::Ellipse(tool) => tool.deactivate(),
            Self::Line(tool) => tool.deactivate(),
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, multi_select: bool, ctx: ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Select(tool) => tool.on_pointer_down(pos, multi_select, ctx),
            Self::Rectangle(tool) | Self::Ellipse(tool) => tool.on_pointer_down(pos, multi_select, ctx),
            Self::Line(tool) => tool.on_pointer_down(pos, multi_select, ctx),
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Select(tool) => tool.on_pointer_move(pos, ctx),
            Self::Rectangle(tool) | Self::Ellipse(tool) => tool.on_pointer_move(pos, ctx),
            Self::Line(tool) => tool.on_pointer_move(pos, ctx),
        }
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Select(tool) => tool.on_pointer_up(pos, ctx),
            Self::Rectangle(tool) | Self::Ellipse(tool) => tool.on_pointer_up(pos, ctx),
            Self::Line(tool) => tool.on_pointer_up(pos, ctx),
        }
    }

    fn preview(&self) -> Option<ToolPreview> {
        match self {
            Self::Select(tool) => tool.preview(),
            Self::Rectangle(tool) | Self::Ellipse(tool) => tool.preview(),
            Self::Line(tool) => tool.preview(),
        }
    }
}

impl ToolType {
    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Select(_) => ToolKind::Select,
            Self::Rectangle(_) => ToolKind::Rectangle,
            Self::Ellipse(_) => ToolKind::Ellipse,
            Self::Line(_) => ToolKind::Line,
        }
    }

    pub fn as_select_tool(&self) -> Option<&SelectTool> {
        match self {
            Self::Select(tool) => Some(tool),
            _ => None,
        }
    }

    /// True while a gesture is in progress.
    pub fn is_busy(&self) -> bool {
        match self {
            Self::Select(tool) => !matches!(tool.state(), SelectState::Idle),
            Self::Rectangle(tool) | Self::Ellipse(tool) => tool.is_drawing(),
            Self::Line(tool) => tool.is_drawing(),
        }
    }
}

// Factory function to create a new tool of the specified kind
pub fn new_tool(kind: ToolKind) -> ToolType {
    match kind {
        ToolKind::Select => ToolType::Select(SelectTool::new()),
        ToolKind::Rectangle => ToolType::Rectangle(ShapeTool::new(BoxShape::Rectangle)),
        ToolKind::Ellipse => ToolType::Ellipse(ShapeTool::new(BoxShape::Ellipse)),
        ToolKind::Line => ToolType::Line(LineTool::new()),
    }
}
