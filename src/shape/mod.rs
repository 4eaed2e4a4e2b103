use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

mod common;
pub(crate) mod ellipse;
pub(crate) mod group;
pub(crate) mod line;
pub(crate) mod rectangle;

pub use common::{BoundPatch, Style, LINE_HIT_TOLERANCE};
pub use ellipse::Ellipse;
pub use group::{Group, MIN_GROUP_SIZE};
pub use line::Line;
pub use rectangle::Rectangle;

use crate::geometry::Bound;
use crate::id_generator::ComponentId;

/// Contract every shape kind implements.
pub trait Shape {
    /// Unique id assigned at construction
    fn id(&self) -> ComponentId;

    fn kind(&self) -> ShapeKind;

    /// Current axis-aligned extent
    fn bound(&self) -> Bound;

    fn style(&self) -> &Style;

    /// Move by `delta`
    fn translate(&mut self, delta: Vec2);

    /// Multiply the size by `(sx, sy)`, keeping the top-left corner of the bound fixed
    fn scale(&mut self, sx: f32, sy: f32);

    /// Set only the bound fields present in `patch`
    fn set_properties(&mut self, patch: &BoundPatch);

    /// Whether `pos` counts as a click on this shape
    fn hit_test(&self, pos: Pos2) -> bool;

    /// Push the render descriptors for this shape, bottom first
    fn append_drawables(&self, out: &mut Vec<DrawableShape>);

    fn to_drawables(&self) -> Vec<DrawableShape> {
        let mut out = Vec::new();
        self.append_drawables(&mut out);
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Line,
    Group,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Line => "line",
            ShapeKind::Group => "group",
        }
    }
}

/// Render descriptor handed to whatever draws the canvas. Groups are flattened away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DrawableShape {
    Rectangle {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        style: Style,
    },
    /// `x`/`y` is the centre
    Ellipse {
        x: f32,
        y: f32,
        radius_x: f32,
        radius_y: f32,
        style: Style,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        style: Style,
    },
}

impl DrawableShape {
    pub fn style(&self) -> &Style {
        match self {
            DrawableShape::Rectangle { style, .. }
            | DrawableShape::Ellipse { style, .. }
            | DrawableShape::Line { style, .. } => style,
        }
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        let mut moved = self.clone();
        match &mut moved {
            DrawableShape::Rectangle { x, y, .. } | DrawableShape::Ellipse { x, y, .. } => {
                *x += delta.x;
                *y += delta.y;
            }
            DrawableShape::Line { x1, y1, x2, y2, .. } => {
                *x1 += delta.x;
                *y1 += delta.y;
                *x2 += delta.x;
                *y2 += delta.y;
            }
        }
        moved
    }
}

/// Every shape that can live in the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Line(Line),
    Group(Group),
}

impl Component {
    pub fn is_group(&self) -> bool {
        matches!(self, Component::Group(_))
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Component::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Component::Line(line) => Some(line),
            _ => None,
        }
    }
}

impl Shape for Component {
    fn id(&self) -> ComponentId {
        match self {
            Component::Rectangle(s) => s.id(),
            Component::Ellipse(s) => s.id(),
            Component::Line(s) => s.id(),
            Component::Group(s) => s.id(),
        }
    }

    fn kind(&self) -> ShapeKind {
        match self {
            Component::Rectangle(s) => s.kind(),
            Component::Ellipse(s) => s.kind(),
            Component::Line(s) => s.kind(),
            Component::Group(s) => s.kind(),
        }
    }

    fn bound(&self) -> Bound {
        match self {
            Component::Rectangle(s) => s.bound(),
            Component::Ellipse(s) => s.bound(),
            Component::Line(s) => s.bound(),
            Component::Group(s) => s.bound(),
        }
    }

    fn style(&self) -> &Style {
        match self {
            Component::Rectangle(s) => s.style(),
            Component::Ellipse(s) => s.style(),
            Component::Line(s) => s.style(),
            Component::Group(s) => s.style(),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        match self {
            Component::Rectangle(s) => s.translate(delta),
            Component::Ellipse(s) => s.translate(delta),
            Component::Line(s) => s.translate(delta),
            Component::Group(s) => s.translate(delta),
        }
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        match self {
            Component::Rectangle(s) => s.scale(sx, sy),
            Component::Ellipse(s) => s.scale(sx, sy),
            Component::Line(s) => s.scale(sx, sy),
            Component::Group(s) => s.scale(sx, sy),
        }
    }

    fn set_properties(&mut self, patch: &BoundPatch) {
        match self {
            Component::Rectangle(s) => s.set_properties(patch),
            Component::Ellipse(s) => s.set_properties(patch),
            Component::Line(s) => s.set_properties(patch),
            Component::Group(s) => s.set_properties(patch),
        }
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        match self {
            Component::Rectangle(s) => s.hit_test(pos),
            Component::Ellipse(s) => s.hit_test(pos),
            Component::Line(s) => s.hit_test(pos),
            Component::Group(s) => s.hit_test(pos),
        }
    }

    fn append_drawables(&self, out: &mut Vec<DrawableShape>) {
        match self {
            Component::Rectangle(s) => s.append_drawables(out),
            Component::Ellipse(s) => s.append_drawables(out),
            Component::Line(s) => s.append_drawables(out),
            Component::Group(s) => s.append_drawables(out),
        }
    }
}

/// Factory functions for building components outside the manager (tests, previews).
pub mod factory {
    use super::*;

    pub fn create_rectangle(id: ComponentId, bound: Bound) -> Component {
        Component::Rectangle(Rectangle::new(id, bound))
    }

    pub fn create_ellipse(id: ComponentId, bound: Bound) -> Component {
        Component::Ellipse(Ellipse::new(id, bound))
    }

    pub fn create_line(id: ComponentId, start: Pos2, end: Pos2) -> Component {
        Component::Line(Line::new(id, start, end))
    }

    pub fn create_group(
        id: ComponentId,
        children: Vec<Component>,
    ) -> Result<Component, crate::error::EditorError> {
        Group::new(id, children).map(Component::Group)
    }
}
