use std::cell::Cell;

use egui::{Pos2, Vec2};
use log::{debug, warn};

use crate::error::EditorError;
use crate::event::{ChangeNotifier, Subscriber, SubscriptionId};
use crate::id_generator::{ComponentId, IdGenerator};
use crate::selection::{HandlePosition, SelectedComponent};
use crate::shape::{BoundPatch, Component, DrawableShape, Group, Shape, MIN_GROUP_SIZE};

/// A component taken out of the collection together with the index it occupied.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedComponent {
    pub index: usize,
    pub component: Component,
}

/// Owner of the document: the z-ordered shape collection (index 0 is the bottom) and the
/// current selection.
///
/// Every mutating call notifies subscribers exactly once; [`ComponentManager::batch`] folds
/// several calls into one notification. Batch calls de-duplicate their ids and skip missing
/// ones with a warning; a batch where no id resolves is an error.
#[derive(Debug)]
pub struct ComponentManager {
    components: Vec<Component>,
    selected: Vec<ComponentId>,
    ids: IdGenerator,
    notifier: ChangeNotifier,
    batch_depth: usize,
    /// A change happened inside the current batch.
    pending: Cell<bool>,
}

impl Default for ComponentManager {
    fn default() -> Self {
        Self::new(IdGenerator::new())
    }
}

impl ComponentManager {
    pub fn new(ids: IdGenerator) -> Self {
        Self {
            components: Vec::new(),
            selected: Vec::new(),
            ids,
            notifier: ChangeNotifier::new(),
            batch_depth: 0,
            pending: Cell::new(false),
        }
    }

    /// Reserve an id for a shape about to be constructed.
    pub fn next_id(&mut self) -> ComponentId {
        self.ids.generate_id()
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn Subscriber>) -> SubscriptionId {
        self.notifier.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn notify(&self) {
        if self.batch_depth > 0 {
            self.pending.set(true);
        } else {
            self.notifier.notify();
        }
    }

    /// Runs `f` as one logical operation: subscribers hear about it once, after `f`
    /// returns, and only if something changed. Nested batches fold into the outermost.
    pub fn batch<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.batch_depth += 1;
        let result = f(self);
        self.batch_depth -= 1;
        if self.batch_depth == 0 && self.pending.replace(false) {
            self.notifier.notify();
        }
        result
    }

    // ---------------------------------------------------------------------
    // Queries

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// All top-level components, bottom first.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component_ids(&self) -> Vec<ComponentId> {
        self.components.iter().map(Shape::id).collect()
    }

    pub fn find_component_by_id(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id() == id)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: ComponentId) -> Option<usize> {
        self.components.iter().position(|c| c.id() == id)
    }

    /// Topmost component whose hit-test accepts `pos`.
    pub fn find_component_at_point(&self, pos: Pos2) -> Option<&Component> {
        self.components.iter().rev().find(|c| c.hit_test(pos))
    }

    fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id() == id)
    }

    /// De-duplicates `ids` and keeps the ones that exist, warning about the rest.
    fn resolve_targets(&self, ids: &[ComponentId], op: &str) -> Result<Vec<ComponentId>, EditorError> {
        if ids.is_empty() {
            return Err(EditorError::invalid(format!("{op}: no component ids given")));
        }
        let mut unique: Vec<ComponentId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }
        let (found, missing): (Vec<_>, Vec<_>) = unique.into_iter().partition(|id| self.contains(*id));
        if found.is_empty() {
            return Err(EditorError::NotFound(missing[0]));
        }
        if !missing.is_empty() {
            warn!("{op}: skipping unknown components {missing:?}");
        }
        Ok(found)
    }

    // ---------------------------------------------------------------------
    // Collection

    /// Append on top of the z-order.
    pub fn add_component(&mut self, component: Component) {
        debug!("Adding {} {}", component.kind().as_str(), component.id());
        self.components.push(component);
        self.notify();
    }

    pub fn add_components(&mut self, components: Vec<Component>) {
        debug!("Adding {} components", components.len());
        self.components.extend(components);
        self.notify();
    }

    /// Put previously removed components back at their recorded indices.
    ///
    /// Entries are inserted in ascending index order, so indices taken from the same
    /// snapshot land exactly where they were.
    pub fn insert_components(&mut self, mut entries: Vec<RemovedComponent>) -> Result<(), EditorError> {
        entries.sort_by_key(|entry| entry.index);
        let mut len = self.components.len();
        for entry in &entries {
            if entry.index > len {
                return Err(EditorError::OutOfRange { index: entry.index, len });
            }
            if self.contains(entry.component.id()) {
                return Err(EditorError::invariant(format!(
                    "component {} is already in the document",
                    entry.component.id()
                )));
            }
            len += 1;
        }
        for entry in entries {
            debug!("Restoring {} at index {}", entry.component.id(), entry.index);
            self.components.insert(entry.index, entry.component);
        }
        self.notify();
        Ok(())
    }

    pub fn remove_component(&mut self, id: ComponentId) -> Result<Component, EditorError> {
        let mut removed = self.remove_components(&[id])?;
        removed
            .pop()
            .map(|entry| entry.component)
            .ok_or(EditorError::NotFound(id))
    }

    /// Removes every resolvable id. The returned entries carry the index each component had
    /// before this call, in ascending order.
    pub fn remove_components(&mut self, ids: &[ComponentId]) -> Result<Vec<RemovedComponent>, EditorError> {
        let targets = self.resolve_targets(ids, "remove")?;
        let mut indices: Vec<usize> = targets.iter().filter_map(|id| self.index_of(*id)).collect();
        indices.sort_unstable();

        let mut removed = Vec::with_capacity(indices.len());
        for index in indices.into_iter().rev() {
            let component = self.components.remove(index);
            debug!("Removed {} from index {index}", component.id());
            removed.push(RemovedComponent { index, component });
        }
        removed.reverse();

        self.selected.retain(|id| !targets.contains(id));
        self.notify();
        Ok(removed)
    }

    // ---------------------------------------------------------------------
    // Geometry

    pub fn move_component(&mut self, id: ComponentId, delta: Vec2) -> Result<(), EditorError> {
        self.move_components(&[id], delta).map(|_| ())
    }

    /// Translates each target; returns the ids that were actually moved.
    pub fn move_components(&mut self, ids: &[ComponentId], delta: Vec2) -> Result<Vec<ComponentId>, EditorError> {
        if !delta.x.is_finite() || !delta.y.is_finite() {
            return Err(EditorError::invalid(format!("move delta must be finite, got {delta:?}")));
        }
        let targets = self.resolve_targets(ids, "move")?;
        for id in &targets {
            if let Some(component) = self.component_mut(*id) {
                component.translate(delta);
            }
        }
        debug!("Moved {targets:?} by {delta:?}");
        self.notify();
        Ok(targets)
    }

    pub fn scale_component(&mut self, id: ComponentId, sx: f32, sy: f32) -> Result<(), EditorError> {
        self.scale_components(&[id], sx, sy).map(|_| ())
    }

    /// Multiplies each target's size, anchored at its top-left corner.
    pub fn scale_components(&mut self, ids: &[ComponentId], sx: f32, sy: f32) -> Result<Vec<ComponentId>, EditorError> {
        if !sx.is_finite() || !sy.is_finite() {
            return Err(EditorError::invalid(format!("scale factors must be finite, got ({sx}, {sy})")));
        }
        let targets = self.resolve_targets(ids, "scale")?;
        for id in &targets {
            if let Some(component) = self.component_mut(*id) {
                component.scale(sx, sy);
            }
        }
        debug!("Scaled {targets:?} by ({sx}, {sy})");
        self.notify();
        Ok(targets)
    }

    pub fn set_properties(&mut self, id: ComponentId, patch: &BoundPatch) -> Result<(), EditorError> {
        self.set_components_properties(&[id], patch).map(|_| ())
    }

    /// Sets the given bound fields on each target.
    pub fn set_components_properties(
        &mut self,
        ids: &[ComponentId],
        patch: &BoundPatch,
    ) -> Result<Vec<ComponentId>, EditorError> {
        validate_patch(patch)?;
        let targets = self.resolve_targets(ids, "set properties")?;
        for id in &targets {
            if let Some(component) = self.component_mut(*id) {
                component.set_properties(patch);
            }
        }
        debug!("Set {patch:?} on {targets:?}");
        self.notify();
        Ok(targets)
    }

    /// Resizes each target as if `handle` had been dragged by `delta`.
    ///
    /// Every target is checked before any is touched: no extent may become negative and a
    /// non-empty extent may not collapse to zero.
    pub fn scale_by_handle(
        &mut self,
        ids: &[ComponentId],
        handle: HandlePosition,
        delta: Vec2,
    ) -> Result<Vec<ComponentId>, EditorError> {
        let targets = self.resolve_targets(ids, "scale by handle")?;
        for id in &targets {
            if let Some(component) = self.find_component_by_id(*id) {
                let bound = component.bound();
                let resize = handle.resize(&bound, delta);
                if collapses(bound.width, resize.width) || collapses(bound.height, resize.height) {
                    return Err(EditorError::invalid(format!(
                        "resizing {id} by {delta:?} from {} gives {}x{}",
                        handle.as_str(),
                        resize.width,
                        resize.height
                    )));
                }
            }
        }
        for id in &targets {
            if let Some(component) = self.component_mut(*id) {
                SelectedComponent::new(component).scale_by_handle(handle, delta);
            }
        }
        debug!("Resized {targets:?} from {} by {delta:?}", handle.as_str());
        self.notify();
        Ok(targets)
    }

    // ---------------------------------------------------------------------
    // Z-order

    /// Moves `id` so it ends up at `new_index`, shifting everything in between.
    pub fn change_component_order(&mut self, id: ComponentId, new_index: usize) -> Result<(), EditorError> {
        let len = self.components.len();
        if new_index >= len {
            return Err(EditorError::OutOfRange { index: new_index, len });
        }
        let current = self.index_of(id).ok_or(EditorError::NotFound(id))?;
        if current == new_index {
            return Ok(());
        }
        let component = self.components.remove(current);
        self.components.insert(new_index, component);
        debug!("Reordered {id}: {current} -> {new_index}");
        self.notify();
        Ok(())
    }

    pub fn bring_to_front(&mut self, id: ComponentId) -> Result<(), EditorError> {
        if !self.contains(id) {
            return Err(EditorError::NotFound(id));
        }
        self.change_component_order(id, self.components.len() - 1)
    }

    pub fn send_to_back(&mut self, id: ComponentId) -> Result<(), EditorError> {
        self.change_component_order(id, 0)
            .map_err(|err| match err {
                EditorError::OutOfRange { .. } => EditorError::NotFound(id),
                other => other,
            })
    }

    // ---------------------------------------------------------------------
    // Grouping

    /// Wraps the named components in a new group appended on top.
    ///
    /// Children keep their relative z-order inside the group. If any of them was selected,
    /// the group takes their place in the selection.
    pub fn create_group(&mut self, ids: &[ComponentId]) -> Result<ComponentId, EditorError> {
        let mut unique: Vec<ComponentId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }
        let (targets, missing): (Vec<_>, Vec<_>) = unique.into_iter().partition(|id| self.contains(*id));
        if targets.len() < MIN_GROUP_SIZE {
            return Err(EditorError::invalid(format!(
                "grouping needs at least {MIN_GROUP_SIZE} existing components, got {}",
                targets.len()
            )));
        }
        if !missing.is_empty() {
            warn!("group: skipping unknown components {missing:?}");
        }

        let mut indices: Vec<usize> = targets.iter().filter_map(|id| self.index_of(*id)).collect();
        indices.sort_unstable();
        let mut children = Vec::with_capacity(indices.len());
        for index in indices.into_iter().rev() {
            children.push(self.components.remove(index));
        }
        children.reverse();
        if children.len() != targets.len() {
            return Err(EditorError::invariant(format!(
                "collected {} children for {} group targets",
                children.len(),
                targets.len()
            )));
        }

        let any_selected = self.selected.iter().any(|id| targets.contains(id));
        self.selected.retain(|id| !targets.contains(id));

        let group_id = self.ids.generate_id();
        let group = Group::new(group_id, children)?;
        self.components.push(Component::Group(group));
        if any_selected {
            self.selected.push(group_id);
        }
        debug!("Grouped {targets:?} into {group_id}");
        self.notify();
        Ok(group_id)
    }

    /// Replaces a group by its children at the group's z-index and returns their ids,
    /// bottom first. A selected group hands its selection to the children.
    pub fn ungroup(&mut self, group_id: ComponentId) -> Result<Vec<ComponentId>, EditorError> {
        let index = self.index_of(group_id).ok_or(EditorError::NotFound(group_id))?;
        match self.components[index].as_group() {
            None => {
                return Err(EditorError::invalid(format!("{group_id} is not a group")));
            }
            Some(group) if group.len() < MIN_GROUP_SIZE => {
                return Err(EditorError::invalid(format!(
                    "{group_id} has {} children and cannot be ungrouped",
                    group.len()
                )));
            }
            Some(_) => {}
        }

        let children = match self.components.remove(index) {
            Component::Group(group) => group.into_children(),
            other => {
                self.components.insert(index, other);
                return Err(EditorError::invariant(format!("{group_id} changed kind while ungrouping")));
            }
        };
        let child_ids: Vec<ComponentId> = children.iter().map(Shape::id).collect();
        self.components.splice(index..index, children);

        if let Some(pos) = self.selected.iter().position(|id| *id == group_id) {
            self.selected.remove(pos);
            self.selected.extend(child_ids.iter().copied());
        }
        debug!("Ungrouped {group_id} into {child_ids:?}");
        self.notify();
        Ok(child_ids)
    }

    // ---------------------------------------------------------------------
    // Selection

    /// Adds the existing ids to the selection; returns how many are now selected.
    pub fn select_components(&mut self, ids: &[ComponentId]) -> usize {
        for id in ids {
            if !self.contains(*id) {
                warn!("select: unknown component {id}");
            } else if !self.selected.contains(id) {
                self.selected.push(*id);
            }
        }
        self.notify();
        self.selected.len()
    }

    /// Replaces the selection with the existing ids among `ids`.
    pub fn set_selection(&mut self, ids: &[ComponentId]) {
        self.selected.clear();
        self.select_components(ids);
    }

    pub fn deselect_component(&mut self, id: ComponentId) {
        self.selected.retain(|selected| *selected != id);
        self.notify();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.notify();
    }

    pub fn selected_ids(&self) -> &[ComponentId] {
        &self.selected
    }

    pub fn is_selected(&self, id: ComponentId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected components in z-order, wrapped with their resize handles.
    pub fn get_selected_components(&self) -> Vec<SelectedComponent<&Component>> {
        self.components
            .iter()
            .filter(|c| self.is_selected(c.id()))
            .map(SelectedComponent::new)
            .collect()
    }

    // ---------------------------------------------------------------------
    // Drawables

    pub fn get_all_drawables(&self) -> Vec<DrawableShape> {
        self.collect_drawables(|_| true)
    }

    pub fn get_selected_drawables(&self) -> Vec<DrawableShape> {
        self.collect_drawables(|id| self.is_selected(id))
    }

    pub fn get_non_selected_drawables(&self) -> Vec<DrawableShape> {
        self.collect_drawables(|id| !self.is_selected(id))
    }

    fn collect_drawables(&self, include: impl Fn(ComponentId) -> bool) -> Vec<DrawableShape> {
        let mut out = Vec::new();
        for component in self.components.iter().filter(|c| include(c.id())) {
            component.append_drawables(&mut out);
        }
        out
    }
}

fn validate_patch(patch: &BoundPatch) -> Result<(), EditorError> {
    if patch.is_empty() {
        return Err(EditorError::invalid("property patch sets no fields"));
    }
    for (name, value) in [("x", patch.x), ("y", patch.y)] {
        if let Some(value) = value {
            if !value.is_finite() {
                return Err(EditorError::invalid(format!("{name} must be finite, got {value}")));
            }
        }
    }
    for (name, value) in [("width", patch.width), ("height", patch.height)] {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                return Err(EditorError::invalid(format!("{name} must not be negative, got {value}")));
            }
        }
    }
    Ok(())
}

fn collapses(current: f32, resized: f32) -> bool {
    !resized.is_finite() || resized < 0.0 || (current > 0.0 && resized == 0.0)
}
