use log::debug;

use super::{CommandResult, EditorCommand};
use crate::component_manager::{ComponentManager, RemovedComponent};
use crate::id_generator::ComponentId;
use crate::shape::Shape;

#[derive(Debug)]
pub struct DeleteComponentCommand {
    id: ComponentId,
    removed: Option<RemovedComponent>,
    was_selected: bool,
}

impl DeleteComponentCommand {
    pub fn new(id: ComponentId) -> Self {
        Self { id, removed: None, was_selected: false }
    }

    fn remove(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.was_selected = manager.is_selected(self.id);
        self.removed = manager.remove_components(&[self.id])?.pop();
        Ok(())
    }
}

impl EditorCommand for DeleteComponentCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.remove(manager)
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        let Some(entry) = self.removed.take() else {
            return Ok(());
        };
        manager.insert_components(vec![entry])?;
        if self.was_selected {
            manager.select_components(&[self.id]);
        }
        Ok(())
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.remove(manager)
    }

    fn name(&self) -> &'static str {
        "Delete Component"
    }
}

/// Deletes several components; undo puts each back at its original z-index.
#[derive(Debug)]
pub struct DeleteComponentsCommand {
    ids: Vec<ComponentId>,
    deleted: Vec<ComponentId>,
    removed: Vec<RemovedComponent>,
    selected: Vec<ComponentId>,
}

impl DeleteComponentsCommand {
    pub fn new(ids: Vec<ComponentId>) -> Self {
        Self {
            ids,
            deleted: Vec::new(),
            removed: Vec::new(),
            selected: Vec::new(),
        }
    }

    fn remove(&mut self, manager: &mut ComponentManager, ids: &[ComponentId]) -> CommandResult {
        self.selected = ids.iter().copied().filter(|id| manager.is_selected(*id)).collect();
        self.removed = manager.remove_components(ids)?;
        self.deleted = self.removed.iter().map(|entry| entry.component.id()).collect();
        Ok(())
    }
}

impl EditorCommand for DeleteComponentsCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        let ids = self.ids.clone();
        self.remove(manager, &ids)
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        if self.removed.is_empty() {
            return Ok(());
        }
        manager.insert_components(std::mem::take(&mut self.removed))?;
        if !self.selected.is_empty() {
            manager.select_components(&self.selected);
        }
        Ok(())
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        debug!("Deleting {:?} again", self.deleted);
        let ids = self.deleted.clone();
        self.remove(manager, &ids)
    }

    fn name(&self) -> &'static str {
        "Delete Components"
    }
}
