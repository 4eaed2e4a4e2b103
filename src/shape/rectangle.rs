use egui::{Pos2, Vec2};

use super::common::{self, BoundPatch, Style};
use super::{DrawableShape, Shape, ShapeKind};
use crate::geometry::Bound;
use crate::id_generator::ComponentId;

/// Axis-aligned rectangle; its bound is the drawn box.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    id: ComponentId,
    bound: Bound,
    style: Style,
}

impl Rectangle {
    pub fn new(id: ComponentId, bound: Bound) -> Self {
        Self { id, bound, style: Style::for_id(id) }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Shape for Rectangle {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn bound(&self) -> Bound {
        self.bound
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.bound = self.bound.translated(delta);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.bound.width *= sx;
        self.bound.height *= sy;
    }

    fn set_properties(&mut self, patch: &BoundPatch) {
        common::apply_patch(&mut self.bound, patch);
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.bound.contains(pos)
    }

    fn append_drawables(&self, out: &mut Vec<DrawableShape>) {
        out.push(DrawableShape::Rectangle {
            x: self.bound.x,
            y: self.bound.y,
            width: self.bound.width,
            height: self.bound.height,
            style: self.style.clone(),
        });
    }
}
