use egui::{Pos2, Vec2};

use super::common::{self, BoundPatch, Style};
use super::{DrawableShape, Shape, ShapeKind};
use crate::geometry::{hit_testing, Bound};
use crate::id_generator::ComponentId;

/// Ellipse inscribed in its bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    id: ComponentId,
    bound: Bound,
    style: Style,
}

impl Ellipse {
    pub fn new(id: ComponentId, bound: Bound) -> Self {
        Self { id, bound, style: Style::for_id(id) }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn center(&self) -> Pos2 {
        self.bound.center()
    }

    pub fn radii(&self) -> Vec2 {
        Vec2::new(self.bound.width.abs() / 2.0, self.bound.height.abs() / 2.0)
    }
}

impl Shape for Ellipse {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
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
        let radii = self.radii();
        hit_testing::ellipse_contains(pos, self.center(), radii.x, radii.y)
    }

    fn append_drawables(&self, out: &mut Vec<DrawableShape>) {
        let center = self.center();
        let radii = self.radii();
        out.push(DrawableShape::Ellipse {
            x: center.x,
            y: center.y,
            radius_x: radii.x,
            radius_y: radii.y,
            style: self.style.clone(),
        });
    }
}
