pub mod hit_testing;

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned box describing where a shape sits on the canvas.
///
/// `x`/`y` is the top-left corner. Width and height are expected to stay non-negative;
/// callers that can produce other values validate before mutating.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bound {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bound {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest bound enclosing both points.
    pub fn from_points(a: Pos2, b: Pos2) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// Envelope of a set of bounds, `None` when the iterator is empty.
    pub fn union_all(bounds: impl IntoIterator<Item = Bound>) -> Option<Self> {
        let mut iter = bounds.into_iter();
        let first = iter.next()?;
        let mut min = first.min();
        let mut max = first.max();
        for b in iter {
            min = min.min(b.min());
            max = max.max(b.max());
        }
        Some(Self::from_points(min, max))
    }

    pub fn origin(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }

    pub fn min(&self) -> Pos2 {
        Pos2::new(self.x.min(self.x + self.width), self.y.min(self.y + self.height))
    }

    pub fn max(&self) -> Pos2 {
        Pos2::new(self.x.max(self.x + self.width), self.y.max(self.y + self.height))
    }

    pub fn center(&self) -> Pos2 {
        Pos2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self { x: self.x + delta.x, y: self.y + delta.y, ..*self }
    }

    /// Inclusive containment test against the normalized box.
    pub fn contains(&self, pos: Pos2) -> bool {
        let (min, max) = (self.min(), self.max());
        pos.x >= min.x && pos.x <= max.x && pos.y >= min.y && pos.y <= max.y
    }

    pub fn expand(&self, amount: f32) -> Self {
        Self::from_points(self.min() - Vec2::splat(amount), self.max() + Vec2::splat(amount))
    }

    pub fn to_rect(&self) -> Rect {
        Rect::from_min_max(self.min(), self.max())
    }

    pub fn approx_eq(&self, other: &Bound, tolerance: f32) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

impl From<Rect> for Bound {
    fn from(rect: Rect) -> Self {
        Self::new(rect.min.x, rect.min.y, rect.width(), rect.height())
    }
}
