use egui::{Pos2, Vec2};
use log::debug;

use super::common::{self, BoundPatch, Style};
use super::{Component, DrawableShape, Shape, ShapeKind};
use crate::error::EditorError;
use crate::geometry::Bound;
use crate::id_generator::ComponentId;

/// Minimum number of children a group is created with.
pub const MIN_GROUP_SIZE: usize = 2;

/// Composite shape. Owns its children exclusively; the bound is recomputed from them on
/// every read.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    id: ComponentId,
    children: Vec<Component>,
    style: Style,
}

impl Group {
    pub fn new(id: ComponentId, children: Vec<Component>) -> Result<Self, EditorError> {
        if children.len() < MIN_GROUP_SIZE {
            return Err(EditorError::invalid(format!(
                "a group needs at least {MIN_GROUP_SIZE} children, got {}",
                children.len()
            )));
        }
        Ok(Self { id, children, style: Style::default() })
    }

    pub fn children(&self) -> &[Component] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn into_children(self) -> Vec<Component> {
        self.children
    }
}

impl Shape for Group {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Group
    }

    fn bound(&self) -> Bound {
        Bound::union_all(self.children.iter().map(Shape::bound)).unwrap_or_default()
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn translate(&mut self, delta: Vec2) {
        for child in &mut self.children {
            child.translate(delta);
        }
    }

    /// Scales about the group's top-left corner: each child's offset from that corner is
    /// stretched by the factors, the child is moved to its new offset and then scaled
    /// itself. Nested groups recurse through the same path.
    fn scale(&mut self, sx: f32, sy: f32) {
        let anchor = self.bound().origin();
        let factor = Vec2::new(sx, sy);
        for child in &mut self.children {
            let offset = child.bound().origin() - anchor;
            let delta = offset * factor - offset;
            child.translate(delta);
            child.scale(sx, sy);
        }
        debug!("Group {} scaled by ({sx}, {sy}) about {anchor:?}", self.id);
    }

    fn set_properties(&mut self, patch: &BoundPatch) {
        common::apply_patch_via_transform(self, patch);
    }

    // Union of the children, so the gaps inside the envelope are misses.
    fn hit_test(&self, pos: Pos2) -> bool {
        self.children.iter().any(|child| child.hit_test(pos))
    }

    fn append_drawables(&self, out: &mut Vec<DrawableShape>) {
        for child in &self.children {
            child.append_drawables(out);
        }
    }
}
