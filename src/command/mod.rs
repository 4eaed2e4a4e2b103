mod create;
mod delete;
mod group;
mod history;
mod select;
mod transform;
mod z_order;

use log::{debug, error};

use crate::component_manager::ComponentManager;
use crate::error::EditorError;
use crate::id_generator::ComponentId;

pub use create::{CreateEllipseCommand, CreateLineCommand, CreateRectangleCommand};
pub use delete::{DeleteComponentCommand, DeleteComponentsCommand};
pub use group::{GroupComponentsCommand, UngroupComponentCommand};
pub use history::CommandHistory;
pub use select::{ClearSelectionCommand, SelectComponentsCommand};
pub use transform::{
    MoveComponentCommand, MoveComponentsCommand, ScaleComponentByHandleCommand,
    ScaleComponentCommand, ScaleComponentsByHandleCommand, ScaleComponentsCommand,
    SetComponentPropertiesCommand, SetComponentsPropertiesCommand,
};
pub use z_order::{ZOrderCommand, ZOrderMove};

/// Result type for command operations
pub type CommandResult<T = ()> = Result<T, EditorError>;

/// A reversible document mutation.
///
/// `execute` captures whatever it needs to reverse itself. `undo` with nothing captured is
/// a no-op. `redo` replays the forward mutation from the captured parameters rather than
/// re-running `execute`.
pub trait EditorCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult;

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult;

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult;

    /// Display name, also used in logs
    fn name(&self) -> &'static str;

    /// Commands that return false run but are never recorded in the history
    fn can_undo(&self) -> bool {
        true
    }

    /// Id of the component this command created, if any
    fn created_id(&self) -> Option<ComponentId> {
        None
    }
}

/// Lifecycle of a single command instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandState {
    #[default]
    Unexecuted,
    Executed,
    Undone,
}

macro_rules! command_kinds {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// Every concrete command the editor knows.
        #[derive(Debug)]
        pub enum CommandKind {
            $($variant($ty),)*
        }

        impl EditorCommand for CommandKind {
            fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
                match self {
                    $(CommandKind::$variant(command) => command.execute(manager),)*
                }
            }

            fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
                match self {
                    $(CommandKind::$variant(command) => command.undo(manager),)*
                }
            }

            fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
                match self {
                    $(CommandKind::$variant(command) => command.redo(manager),)*
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    $(CommandKind::$variant(command) => command.name(),)*
                }
            }

            fn can_undo(&self) -> bool {
                match self {
                    $(CommandKind::$variant(command) => command.can_undo(),)*
                }
            }

            fn created_id(&self) -> Option<ComponentId> {
                match self {
                    $(CommandKind::$variant(command) => command.created_id(),)*
                }
            }
        }

        $(
            impl From<$ty> for Command {
                fn from(command: $ty) -> Self {
                    Command::new(CommandKind::$variant(command))
                }
            }
        )*
    };
}

command_kinds! {
    CreateRectangle(CreateRectangleCommand),
    CreateEllipse(CreateEllipseCommand),
    CreateLine(CreateLineCommand),
    DeleteComponent(DeleteComponentCommand),
    DeleteComponents(DeleteComponentsCommand),
    MoveComponent(MoveComponentCommand),
    MoveComponents(MoveComponentsCommand),
    ScaleComponent(ScaleComponentCommand),
    ScaleComponents(ScaleComponentsCommand),
    ScaleComponentByHandle(ScaleComponentByHandleCommand),
    ScaleComponentsByHandle(ScaleComponentsByHandleCommand),
    SetComponentProperties(SetComponentPropertiesCommand),
    SetComponentsProperties(SetComponentsPropertiesCommand),
    GroupComponents(GroupComponentsCommand),
    UngroupComponent(UngroupComponentCommand),
    ZOrder(ZOrderCommand),
    SelectComponents(SelectComponentsCommand),
    ClearSelection(ClearSelectionCommand),
}

/// A command plus its lifecycle state. This is what tools produce and the history stores.
#[derive(Debug)]
pub struct Command {
    kind: CommandKind,
    state: CommandState,
}

impl Command {
    pub fn new(kind: CommandKind) -> Self {
        Self { kind, state: CommandState::Unexecuted }
    }

    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    pub fn state(&self) -> CommandState {
        self.state
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn can_undo(&self) -> bool {
        self.kind.can_undo()
    }

    pub fn created_id(&self) -> Option<ComponentId> {
        self.kind.created_id()
    }

    /// Runs the command once. A second call is rejected.
    pub fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        if self.state != CommandState::Unexecuted {
            return Err(EditorError::invariant(format!(
                "{} was already executed ({:?})",
                self.name(),
                self.state
            )));
        }
        let name = self.name();
        self.kind
            .execute(manager)
            .inspect_err(|err| error!("Failed to execute {name}: {err}"))?;
        self.state = CommandState::Executed;
        Ok(())
    }

    pub fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        if self.state != CommandState::Executed {
            debug!("Skipping undo of {} in state {:?}", self.name(), self.state);
            return Ok(());
        }
        let name = self.name();
        self.kind
            .undo(manager)
            .inspect_err(|err| error!("Failed to undo {name}: {err}"))?;
        self.state = CommandState::Undone;
        Ok(())
    }

    pub fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        if self.state != CommandState::Undone {
            debug!("Skipping redo of {} in state {:?}", self.name(), self.state);
            return Ok(());
        }
        let name = self.name();
        self.kind
            .redo(manager)
            .inspect_err(|err| error!("Failed to redo {name}: {err}"))?;
        self.state = CommandState::Executed;
        Ok(())
    }
}

/// Drops repeated ids, keeping first occurrences in order.
pub(crate) fn dedup_ids(ids: &[ComponentId]) -> Vec<ComponentId> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    unique
}
