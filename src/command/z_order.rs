use log::warn;

use super::{CommandResult, EditorCommand};
use crate::component_manager::ComponentManager;
use crate::error::EditorError;
use crate::id_generator::ComponentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrderMove {
    BringForward,
    SendBackward,
    BringToFront,
    SendToBack,
}

impl ZOrderMove {
    pub fn name(&self) -> &'static str {
        match self {
            ZOrderMove::BringForward => "Bring Forward",
            ZOrderMove::SendBackward => "Send Backward",
            ZOrderMove::BringToFront => "Bring to Front",
            ZOrderMove::SendToBack => "Send to Back",
        }
    }

    /// Where a component at `index` in a collection of `len` ends up, or `None` if it is
    /// already at the relevant extreme.
    pub fn target_index(&self, index: usize, len: usize) -> Option<usize> {
        let top = len.checked_sub(1)?;
        match self {
            ZOrderMove::BringForward | ZOrderMove::BringToFront if index >= top => None,
            ZOrderMove::SendBackward | ZOrderMove::SendToBack if index == 0 => None,
            ZOrderMove::BringForward => Some(index + 1),
            ZOrderMove::SendBackward => Some(index - 1),
            ZOrderMove::BringToFront => Some(top),
            ZOrderMove::SendToBack => Some(0),
        }
    }
}

/// Changes one component's stacking position. At the extreme it logs a warning and
/// leaves the document untouched.
#[derive(Debug)]
pub struct ZOrderCommand {
    id: ComponentId,
    kind: ZOrderMove,
    original_index: Option<usize>,
    moved: bool,
}

impl ZOrderCommand {
    pub fn new(id: ComponentId, kind: ZOrderMove) -> Self {
        Self { id, kind, original_index: None, moved: false }
    }

    pub fn bring_forward(id: ComponentId) -> Self {
        Self::new(id, ZOrderMove::BringForward)
    }

    pub fn send_backward(id: ComponentId) -> Self {
        Self::new(id, ZOrderMove::SendBackward)
    }

    pub fn bring_to_front(id: ComponentId) -> Self {
        Self::new(id, ZOrderMove::BringToFront)
    }

    pub fn send_to_back(id: ComponentId) -> Self {
        Self::new(id, ZOrderMove::SendToBack)
    }

    pub fn kind(&self) -> ZOrderMove {
        self.kind
    }

    fn apply(&mut self, manager: &mut ComponentManager) -> CommandResult {
        let index = manager.index_of(self.id).ok_or(EditorError::NotFound(self.id))?;
        self.original_index = Some(index);
        match self.kind.target_index(index, manager.len()) {
            Some(target) => {
                manager.change_component_order(self.id, target)?;
                self.moved = true;
            }
            None => {
                warn!("{}: {} is already at index {index}", self.kind.name(), self.id);
                self.moved = false;
            }
        }
        Ok(())
    }
}

impl EditorCommand for ZOrderCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.apply(manager)
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        match self.original_index {
            Some(index) if self.moved => manager.change_component_order(self.id, index),
            _ => Ok(()),
        }
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.apply(manager)
    }

    fn name(&self) -> &'static str {
        self.kind.name()
    }
}
