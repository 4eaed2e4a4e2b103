use super::{CommandResult, EditorCommand};
use crate::component_manager::ComponentManager;
use crate::id_generator::ComponentId;

/// Selection changes run through the same pipeline as edits but are never recorded.
#[derive(Debug)]
pub struct SelectComponentsCommand {
    ids: Vec<ComponentId>,
    additive: bool,
}

impl SelectComponentsCommand {
    /// Replace the selection with `ids`.
    pub fn new(ids: Vec<ComponentId>) -> Self {
        Self { ids, additive: false }
    }

    /// Add `ids` to the current selection.
    pub fn additive(ids: Vec<ComponentId>) -> Self {
        Self { ids, additive: true }
    }
}

impl EditorCommand for SelectComponentsCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        if self.additive {
            manager.select_components(&self.ids);
        } else {
            manager.set_selection(&self.ids);
        }
        Ok(())
    }

    fn undo(&mut self, _manager: &mut ComponentManager) -> CommandResult {
        Ok(())
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.execute(manager)
    }

    fn name(&self) -> &'static str {
        "Select"
    }

    fn can_undo(&self) -> bool {
        false
    }
}

#[derive(Debug, Default)]
pub struct ClearSelectionCommand;

impl ClearSelectionCommand {
    pub fn new() -> Self {
        Self
    }
}

impl EditorCommand for ClearSelectionCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        manager.clear_selection();
        Ok(())
    }

    fn undo(&mut self, _manager: &mut ComponentManager) -> CommandResult {
        Ok(())
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.execute(manager)
    }

    fn name(&self) -> &'static str {
        "Clear Selection"
    }

    fn can_undo(&self) -> bool {
        false
    }
}
