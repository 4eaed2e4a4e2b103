use egui::{Pos2, Vec2};
use log::debug;

use super::common::{self, BoundPatch, Style, LINE_HIT_TOLERANCE};
use super::{DrawableShape, Shape, ShapeKind};
use crate::geometry::{hit_testing, Bound};
use crate::id_generator::ComponentId;

/// Straight segment. The endpoints are the stored state; the bound is always their envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    id: ComponentId,
    start: Pos2,
    end: Pos2,
    style: Style,
}

impl Line {
    pub fn new(id: ComponentId, start: Pos2, end: Pos2) -> Self {
        Self { id, start, end, style: Style::for_id(id) }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn end(&self) -> Pos2 {
        self.end
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    fn hit_threshold(&self) -> f32 {
        self.style.line_width.max(LINE_HIT_TOLERANCE)
    }
}

impl Shape for Line {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn bound(&self) -> Bound {
        Bound::from_points(self.start, self.end)
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    // Endpoints scale about the envelope's top-left corner. A negative factor flips the
    // segment across that corner, which is a valid line.
    fn scale(&mut self, sx: f32, sy: f32) {
        let origin = self.bound().origin();
        let factor = Vec2::new(sx, sy);
        self.start = origin + (self.start - origin) * factor;
        self.end = origin + (self.end - origin) * factor;
        debug!("Line {} scaled to {:?} -> {:?}", self.id, self.start, self.end);
    }

    fn set_properties(&mut self, patch: &BoundPatch) {
        common::apply_patch_via_transform(self, patch);
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        let threshold = self.hit_threshold();
        hit_testing::distance_to_infinite_line(pos, self.start, self.end) <= threshold
            && self.bound().expand(threshold).contains(pos)
    }

    fn append_drawables(&self, out: &mut Vec<DrawableShape>) {
        out.push(DrawableShape::Line {
            x1: self.start.x,
            y1: self.start.y,
            x2: self.end.x,
            y2: self.end.y,
            style: self.style.clone(),
        });
    }
}
