use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};

use super::Shape;
use crate::geometry::Bound;
use crate::id_generator::ComponentId;

/// Lines thinner than this are still clickable within this many pixels.
pub const LINE_HIT_TOLERANCE: f32 = 3.0;

const DEFAULT_FILLS: [Color32; 4] = [
    Color32::from_rgb(0xDD, 0xEE, 0xFF),
    Color32::from_rgb(0xDF, 0xFF, 0xE0),
    Color32::from_rgb(0xFF, 0xE5, 0xD9),
    Color32::from_rgb(0xEB, 0xDF, 0xFC),
];

/// Paint attributes carried by every shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub fill_color: Color32,
    pub stroke_color: Color32,
    pub line_width: f32,
    /// Dash/gap lengths; empty means a solid stroke
    pub line_dash: Vec<f32>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill_color: DEFAULT_FILLS[0],
            stroke_color: Color32::BLACK,
            line_width: 1.0,
            line_dash: Vec::new(),
        }
    }
}

impl Style {
    /// Default style with a fill picked from the palette so neighbouring shapes differ.
    pub fn for_id(id: ComponentId) -> Self {
        Self {
            fill_color: DEFAULT_FILLS[id.get() % DEFAULT_FILLS.len()],
            ..Self::default()
        }
    }

    pub fn is_dashed(&self) -> bool {
        self.line_dash.iter().any(|len| *len > 0.0)
    }
}

/// Partial update of a bound: only the fields that are `Some` are applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl BoundPatch {
    pub fn position(x: f32, y: f32) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }

    pub fn size(width: f32, height: f32) -> Self {
        Self { width: Some(width), height: Some(height), ..Self::default() }
    }

    pub fn from_bound(bound: Bound) -> Self {
        Self {
            x: Some(bound.x),
            y: Some(bound.y),
            width: Some(bound.width),
            height: Some(bound.height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.width.is_none() && self.height.is_none()
    }

    /// The current values of `bound` for exactly the fields this patch sets.
    pub fn capture(&self, bound: &Bound) -> Self {
        Self {
            x: self.x.map(|_| bound.x),
            y: self.y.map(|_| bound.y),
            width: self.width.map(|_| bound.width),
            height: self.height.map(|_| bound.height),
        }
    }
}

/// Writes the patch straight into a stored bound.
pub(crate) fn apply_patch(bound: &mut Bound, patch: &BoundPatch) {
    if let Some(x) = patch.x {
        bound.x = x;
    }
    if let Some(y) = patch.y {
        bound.y = y;
    }
    if let Some(width) = patch.width {
        bound.width = width;
    }
    if let Some(height) = patch.height {
        bound.height = height;
    }
}

/// Applies a patch to a shape whose bound is derived, by turning the absolute targets
/// into a translation followed by a scale about the new top-left corner.
///
/// An axis whose current extent is zero cannot be scaled and is left alone.
pub(crate) fn apply_patch_via_transform<S: Shape + ?Sized>(shape: &mut S, patch: &BoundPatch) {
    let current = shape.bound();
    let delta = Vec2::new(
        patch.x.map_or(0.0, |x| x - current.x),
        patch.y.map_or(0.0, |y| y - current.y),
    );
    if delta != Vec2::ZERO {
        shape.translate(delta);
    }

    let sx = scale_factor(current.width, patch.width);
    let sy = scale_factor(current.height, patch.height);
    if sx != 1.0 || sy != 1.0 {
        shape.scale(sx, sy);
    }
}

fn scale_factor(current: f32, target: Option<f32>) -> f32 {
    match target {
        Some(target) if current != 0.0 => target / current,
        _ => 1.0,
    }
}
