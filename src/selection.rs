use std::ops::{Deref, DerefMut};

use egui::{CursorIcon, Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_HANDLE_SIZE;
use crate::geometry::{hit_testing, Bound};
use crate::id_generator::ComponentId;
use crate::shape::{BoundPatch, Component, DrawableShape, Shape};

/// One of the eight resize grips around a selected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandlePosition {
    TopLeft,
    TopMiddle,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

/// Outcome of dragging a handle: where the origin moves and the new size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleResize {
    pub offset: Vec2,
    pub width: f32,
    pub height: f32,
}

impl HandlePosition {
    pub const ALL: [HandlePosition; 8] = [
        HandlePosition::TopLeft,
        HandlePosition::TopMiddle,
        HandlePosition::TopRight,
        HandlePosition::MiddleLeft,
        HandlePosition::MiddleRight,
        HandlePosition::BottomLeft,
        HandlePosition::BottomMiddle,
        HandlePosition::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HandlePosition::TopLeft => "top_left",
            HandlePosition::TopMiddle => "top_middle",
            HandlePosition::TopRight => "top_right",
            HandlePosition::MiddleLeft => "middle_left",
            HandlePosition::MiddleRight => "middle_right",
            HandlePosition::BottomLeft => "bottom_left",
            HandlePosition::BottomMiddle => "bottom_middle",
            HandlePosition::BottomRight => "bottom_right",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            HandlePosition::TopLeft | HandlePosition::BottomRight => CursorIcon::ResizeNwSe,
            HandlePosition::TopRight | HandlePosition::BottomLeft => CursorIcon::ResizeNeSw,
            HandlePosition::TopMiddle | HandlePosition::BottomMiddle => CursorIcon::ResizeVertical,
            HandlePosition::MiddleLeft | HandlePosition::MiddleRight => {
                CursorIcon::ResizeHorizontal
            }
        }
    }

    /// Where this handle sits on `bound`.
    pub fn anchor(&self, bound: &Bound) -> Pos2 {
        let (x, y, w, h) = (bound.x, bound.y, bound.width, bound.height);
        match self {
            HandlePosition::TopLeft => Pos2::new(x, y),
            HandlePosition::TopMiddle => Pos2::new(x + w / 2.0, y),
            HandlePosition::TopRight => Pos2::new(x + w, y),
            HandlePosition::MiddleLeft => Pos2::new(x, y + h / 2.0),
            HandlePosition::MiddleRight => Pos2::new(x + w, y + h / 2.0),
            HandlePosition::BottomLeft => Pos2::new(x, y + h),
            HandlePosition::BottomMiddle => Pos2::new(x + w / 2.0, y + h),
            HandlePosition::BottomRight => Pos2::new(x + w, y + h),
        }
    }

    /// Geometry after dragging this handle by `delta`. Handles on the top or left edge
    /// move the origin and shrink by the same amount; the opposite edges only grow.
    ///
    /// An axis with zero extent (a horizontal or vertical line) cannot be stretched, so the
    /// drag is ignored along it.
    pub fn resize(&self, bound: &Bound, delta: Vec2) -> HandleResize {
        let (w, h) = (bound.width, bound.height);
        let dx = if w == 0.0 { 0.0 } else { delta.x };
        let dy = if h == 0.0 { 0.0 } else { delta.y };
        let (offset, width, height) = match self {
            HandlePosition::TopLeft => (Vec2::new(dx, dy), w - dx, h - dy),
            HandlePosition::TopMiddle => (Vec2::new(0.0, dy), w, h - dy),
            HandlePosition::TopRight => (Vec2::new(0.0, dy), w + dx, h - dy),
            HandlePosition::MiddleLeft => (Vec2::new(dx, 0.0), w - dx, h),
            HandlePosition::MiddleRight => (Vec2::ZERO, w + dx, h),
            HandlePosition::BottomLeft => (Vec2::new(dx, 0.0), w - dx, h + dy),
            HandlePosition::BottomMiddle => (Vec2::ZERO, w, h + dy),
            HandlePosition::BottomRight => (Vec2::ZERO, w + dx, h + dy),
        };
        HandleResize { offset, width, height }
    }
}

/// Square grip drawn at a handle anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub position: HandlePosition,
    pub center: Pos2,
    pub size: f32,
}

impl Handle {
    pub fn contains(&self, pos: Pos2) -> bool {
        hit_testing::square_contains(pos, self.center, self.size)
    }
}

/// A selected shape together with its resize handles.
///
/// Wraps any reference to a [`Component`]; mutating operations are available when the
/// wrapped reference is mutable and refresh the handles afterwards.
#[derive(Debug)]
pub struct SelectedComponent<C> {
    component: C,
    handle_size: f32,
    handles: [Handle; 8],
}

impl<C: Deref<Target = Component>> SelectedComponent<C> {
    pub fn new(component: C) -> Self {
        Self::with_handle_size(component, DEFAULT_HANDLE_SIZE)
    }

    pub fn with_handle_size(component: C, handle_size: f32) -> Self {
        let handles = compute_handles(&component.bound(), handle_size);
        Self { component, handle_size, handles }
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn id(&self) -> ComponentId {
        self.component.id()
    }

    pub fn bound(&self) -> Bound {
        self.component.bound()
    }

    pub fn handles(&self) -> &[Handle; 8] {
        &self.handles
    }

    pub fn handle_at(&self, pos: Pos2) -> Option<HandlePosition> {
        self.handles
            .iter()
            .find(|handle| handle.contains(pos))
            .map(|handle| handle.position)
    }

    pub fn hit_test(&self, pos: Pos2) -> bool {
        self.component.hit_test(pos)
    }

    pub fn to_drawables(&self) -> Vec<DrawableShape> {
        self.component.to_drawables()
    }
}

impl<C: DerefMut<Target = Component>> SelectedComponent<C> {
    pub fn translate(&mut self, delta: Vec2) {
        self.component.translate(delta);
        self.refresh_handles();
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.component.scale(sx, sy);
        self.refresh_handles();
    }

    pub fn set_properties(&mut self, patch: &BoundPatch) {
        self.component.set_properties(patch);
        self.refresh_handles();
    }

    /// Resize by dragging `handle` by `delta`.
    pub fn scale_by_handle(&mut self, handle: HandlePosition, delta: Vec2) {
        let resize = handle.resize(&self.component.bound(), delta);
        if resize.offset != Vec2::ZERO {
            self.component.translate(resize.offset);
        }
        self.component
            .set_properties(&BoundPatch::size(resize.width, resize.height));
        self.refresh_handles();
    }

    fn refresh_handles(&mut self) {
        self.handles = compute_handles(&self.component.bound(), self.handle_size);
    }
}

fn compute_handles(bound: &Bound, size: f32) -> [Handle; 8] {
    HandlePosition::ALL.map(|position| Handle {
        position,
        center: position.anchor(bound),
        size,
    })
}
