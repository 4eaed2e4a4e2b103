use egui::Vec2;
use log::warn;

use super::{dedup_ids, CommandResult, EditorCommand};
use crate::component_manager::ComponentManager;
use crate::error::EditorError;
use crate::id_generator::ComponentId;
use crate::selection::HandlePosition;
use crate::shape::{BoundPatch, Shape};

/// Scale factors must be invertible for undo.
fn check_factors(sx: f32, sy: f32) -> CommandResult {
    for (axis, factor) in [("x", sx), ("y", sy)] {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(EditorError::invalid(format!(
                "scale factor {axis} must be positive, got {factor}"
            )));
        }
    }
    Ok(())
}

/// User-supplied patches may only set strictly positive sizes.
fn check_patch(patch: &BoundPatch) -> CommandResult {
    if patch.is_empty() {
        return Err(EditorError::invalid("property patch sets no fields"));
    }
    for (name, value) in [("width", patch.width), ("height", patch.height)] {
        if let Some(value) = value {
            if !value.is_finite() || value <= 0.0 {
                return Err(EditorError::invalid(format!("{name} must be positive, got {value}")));
            }
        }
    }
    Ok(())
}

// ----------------------------------------------------------------------------
// Move

#[derive(Debug)]
pub struct MoveComponentCommand {
    id: ComponentId,
    delta: Vec2,
}

impl MoveComponentCommand {
    pub fn new(id: ComponentId, delta: Vec2) -> Self {
        Self { id, delta }
    }
}

impl EditorCommand for MoveComponentCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        manager.move_component(self.id, self.delta)
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        manager.move_component(self.id, -self.delta)
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        manager.move_component(self.id, self.delta)
    }

    fn name(&self) -> &'static str {
        "Move Component"
    }
}

#[derive(Debug)]
pub struct MoveComponentsCommand {
    ids: Vec<ComponentId>,
    delta: Vec2,
    moved: Vec<ComponentId>,
}

impl MoveComponentsCommand {
    pub fn new(ids: Vec<ComponentId>, delta: Vec2) -> Self {
        Self { ids, delta, moved: Vec::new() }
    }
}

impl EditorCommand for MoveComponentsCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.moved = manager.move_components(&self.ids, self.delta)?;
        Ok(())
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        if self.moved.is_empty() {
            return Ok(());
        }
        manager.move_components(&self.moved, -self.delta)?;
        Ok(())
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        if self.moved.is_empty() {
            return Ok(());
        }
        manager.move_components(&self.moved, self.delta)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Move Components"
    }
}

// ----------------------------------------------------------------------------
// Scale

#[derive(Debug)]
pub struct ScaleComponentCommand {
    id: ComponentId,
    sx: f32,
    sy: f32,
}

impl ScaleComponentCommand {
    pub fn new(id: ComponentId, sx: f32, sy: f32) -> Result<Self, EditorError> {
        check_factors(sx, sy)?;
        Ok(Self { id, sx, sy })
    }
}

impl EditorCommand for ScaleComponentCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        manager.scale_component(self.id, self.sx, self.sy)
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        manager.scale_component(self.id, 1.0 / self.sx, 1.0 / self.sy)
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        manager.scale_component(self.id, self.sx, self.sy)
    }

    fn name(&self) -> &'static str {
        "Scale Component"
    }
}

#[derive(Debug)]
pub struct ScaleComponentsCommand {
    ids: Vec<ComponentId>,
    sx: f32,
    sy: f32,
    scaled: Vec<ComponentId>,
}

impl ScaleComponentsCommand {
    pub fn new(ids: Vec<ComponentId>, sx: f32, sy: f32) -> Result<Self, EditorError> {
        check_factors(sx, sy)?;
        Ok(Self { ids, sx, sy, scaled: Vec::new() })
    }
}

impl EditorCommand for ScaleComponentsCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.scaled = manager.scale_components(&self.ids, self.sx, self.sy)?;
        Ok(())
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        if self.scaled.is_empty() {
            return Ok(());
        }
        manager.scale_components(&self.scaled, 1.0 / self.sx, 1.0 / self.sy)?;
        Ok(())
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        if self.scaled.is_empty() {
            return Ok(());
        }
        manager.scale_components(&self.scaled, self.sx, self.sy)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Scale Components"
    }
}

// ----------------------------------------------------------------------------
// Resize by handle

/// Resize as if a selection handle had been dragged by `delta`.
/// Dragging the same handle by `-delta` restores the original bound.
#[derive(Debug)]
pub struct ScaleComponentByHandleCommand {
    id: ComponentId,
    handle: HandlePosition,
    delta: Vec2,
}

impl ScaleComponentByHandleCommand {
    pub fn new(id: ComponentId, handle: HandlePosition, delta: Vec2) -> Self {
        Self { id, handle, delta }
    }
}

impl EditorCommand for ScaleComponentByHandleCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        manager.scale_by_handle(&[self.id], self.handle, self.delta)?;
        Ok(())
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        manager.scale_by_handle(&[self.id], self.handle, -self.delta)?;
        Ok(())
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.execute(manager)
    }

    fn name(&self) -> &'static str {
        "Resize Component"
    }
}

#[derive(Debug)]
pub struct ScaleComponentsByHandleCommand {
    ids: Vec<ComponentId>,
    handle: HandlePosition,
    delta: Vec2,
    scaled: Vec<ComponentId>,
}

impl ScaleComponentsByHandleCommand {
    pub fn new(ids: Vec<ComponentId>, handle: HandlePosition, delta: Vec2) -> Self {
        Self { ids, handle, delta, scaled: Vec::new() }
    }
}

impl EditorCommand for ScaleComponentsByHandleCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.scaled = manager.scale_by_handle(&self.ids, self.handle, self.delta)?;
        Ok(())
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        if self.scaled.is_empty() {
            return Ok(());
        }
        manager.scale_by_handle(&self.scaled, self.handle, -self.delta)?;
        Ok(())
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        if self.scaled.is_empty() {
            return Ok(());
        }
        manager.scale_by_handle(&self.scaled, self.handle, self.delta)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Resize Components"
    }
}

// ----------------------------------------------------------------------------
// Properties

/// Sets position and/or size fields. Only the fields present in the patch are captured
/// for undo.
#[derive(Debug)]
pub struct SetComponentPropertiesCommand {
    id: ComponentId,
    patch: BoundPatch,
    original: Option<BoundPatch>,
}

impl SetComponentPropertiesCommand {
    pub fn new(id: ComponentId, patch: BoundPatch) -> Result<Self, EditorError> {
        check_patch(&patch)?;
        Ok(Self { id, patch, original: None })
    }
}

impl EditorCommand for SetComponentPropertiesCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        let bound = manager
            .find_component_by_id(self.id)
            .map(Shape::bound)
            .ok_or(EditorError::NotFound(self.id))?;
        let original = self.patch.capture(&bound);
        manager.set_properties(self.id, &self.patch)?;
        self.original = Some(original);
        Ok(())
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        match &self.original {
            Some(original) => manager.set_properties(self.id, original),
            None => Ok(()),
        }
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        manager.set_properties(self.id, &self.patch)
    }

    fn name(&self) -> &'static str {
        "Set Properties"
    }
}

#[derive(Debug)]
pub struct SetComponentsPropertiesCommand {
    ids: Vec<ComponentId>,
    patch: BoundPatch,
    originals: Vec<(ComponentId, BoundPatch)>,
}

impl SetComponentsPropertiesCommand {
    pub fn new(ids: Vec<ComponentId>, patch: BoundPatch) -> Result<Self, EditorError> {
        check_patch(&patch)?;
        Ok(Self { ids, patch, originals: Vec::new() })
    }

    fn targets(&self) -> Vec<ComponentId> {
        self.originals.iter().map(|(id, _)| *id).collect()
    }
}

impl EditorCommand for SetComponentsPropertiesCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        let originals: Vec<(ComponentId, BoundPatch)> = dedup_ids(&self.ids)
            .into_iter()
            .filter_map(|id| {
                manager
                    .find_component_by_id(id)
                    .map(|component| (id, self.patch.capture(&component.bound())))
            })
            .collect();
        manager.set_components_properties(&self.ids, &self.patch)?;
        self.originals = originals;
        Ok(())
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        for (id, original) in &self.originals {
            if let Err(err) = manager.set_properties(*id, original) {
                warn!("Could not restore properties of {id}: {err}");
            }
        }
        Ok(())
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        let targets = self.targets();
        if targets.is_empty() {
            return Ok(());
        }
        manager.set_components_properties(&targets, &self.patch)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Set Properties"
    }
}
