use std::collections::VecDeque;

use log::{debug, info};

use super::{Command, CommandResult};
use crate::component_manager::ComponentManager;
use crate::config::DEFAULT_HISTORY_LIMIT;

/// Manages the history of executed commands for undo/redo functionality
#[derive(Debug)]
pub struct CommandHistory {
    /// Oldest command at the front
    undo_stack: VecDeque<Command>,
    /// Most recently undone command at the back
    redo_stack: Vec<Command>,
    limit: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// A history that keeps at most `limit` undoable commands (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Execute a command and add it to the history if successful.
    ///
    /// A failed command is not recorded and leaves both stacks untouched.
    pub fn execute(&mut self, mut command: Command, manager: &mut ComponentManager) -> CommandResult {
        command.execute(manager)?;

        if command.can_undo() {
            debug!("Recorded {}", command.name());
            self.undo_stack.push_back(command);
            if self.undo_stack.len() > self.limit {
                if let Some(dropped) = self.undo_stack.pop_front() {
                    debug!("History full, forgetting {}", dropped.name());
                }
            }
            self.redo_stack.clear();
        }

        Ok(())
    }

    /// Undo the last executed command. With nothing to undo this only logs.
    ///
    /// If the command's undo fails, the command is dropped from the history.
    pub fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        let Some(mut command) = self.undo_stack.pop_back() else {
            info!("Nothing to undo");
            return Ok(());
        };
        command.undo(manager)?;
        self.redo_stack.push(command);
        Ok(())
    }

    /// Redo the last undone command. With nothing to redo this only logs.
    pub fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        let Some(mut command) = self.redo_stack.pop() else {
            info!("Nothing to redo");
            return Ok(());
        };
        command.redo(manager)?;
        self.undo_stack.push_back(command);
        Ok(())
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Names of the undoable commands, oldest first.
    pub fn undo_names(&self) -> Vec<&'static str> {
        self.undo_stack.iter().map(Command::name).collect()
    }

    /// The most recently executed (or redone) command.
    pub fn last(&self) -> Option<&Command> {
        self.undo_stack.back()
    }

    /// Clear the command history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
