use egui::{Pos2, Vec2};
use log::{debug, info};

use crate::command::{
    ClearSelectionCommand, Command, CommandHistory, CommandResult, CreateEllipseCommand,
    CreateLineCommand, CreateRectangleCommand, DeleteComponentCommand, DeleteComponentsCommand,
    GroupComponentsCommand, MoveComponentCommand, MoveComponentsCommand,
    ScaleComponentByHandleCommand, ScaleComponentCommand, ScaleComponentsByHandleCommand,
    ScaleComponentsCommand, SelectComponentsCommand, SetComponentPropertiesCommand,
    UngroupComponentCommand, ZOrderCommand, ZOrderMove,
};
use crate::component_manager::ComponentManager;
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::event::{Subscriber, SubscriptionId};
use crate::id_generator::ComponentId;
use crate::selection::{HandlePosition, SelectedComponent};
use crate::shape::{BoundPatch, Component, DrawableShape, Shape};
use crate::tools::{new_tool, Tool, ToolContext, ToolKind, ToolPreview, ToolType};

/// The editing session: document, history and active tool behind one API.
///
/// Selection-driven actions quietly do nothing when the selection does not fit them
/// (e.g. grouping a single shape); use the `is_*` queries to enable UI accordingly.
#[derive(Debug)]
pub struct Editor {
    manager: ComponentManager,
    history: CommandHistory,
    config: EditorConfig,
    tool: ToolType,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            manager: ComponentManager::default(),
            history: CommandHistory::with_limit(config.history_limit),
            config,
            tool: ToolType::default(),
        }
    }

    pub fn manager(&self) -> &ComponentManager {
        &self.manager
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replaces the settings. A changed history limit starts a fresh history.
    pub fn set_config(&mut self, config: EditorConfig) {
        if config.history_limit != self.history.limit() {
            info!("History limit changed to {}, clearing history", config.history_limit);
            self.history = CommandHistory::with_limit(config.history_limit);
        }
        self.config = config;
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn Subscriber>) -> SubscriptionId {
        self.manager.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.manager.unsubscribe(id)
    }

    /// Runs a command through the history.
    pub fn execute(&mut self, command: impl Into<Command>) -> CommandResult {
        self.history.execute(command.into(), &mut self.manager)
    }

    pub fn undo(&mut self) -> CommandResult {
        self.history.undo(&mut self.manager)
    }

    pub fn redo(&mut self) -> CommandResult {
        self.history.redo(&mut self.manager)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---------------------------------------------------------------------
    // Selection

    pub fn selected_ids(&self) -> &[ComponentId] {
        self.manager.selected_ids()
    }

    /// Selected shapes in z-order, with handles sized from the config.
    pub fn selected_components(&self) -> Vec<SelectedComponent<&Component>> {
        self.manager
            .components()
            .iter()
            .filter(|component| self.manager.is_selected(component.id()))
            .map(|component| SelectedComponent::with_handle_size(component, self.config.handle_size))
            .collect()
    }

    pub fn select_component(&mut self, id: ComponentId, add_to_selection: bool) -> CommandResult {
        if !self.manager.contains(id) {
            return Err(EditorError::NotFound(id));
        }
        if add_to_selection {
            self.execute(SelectComponentsCommand::additive(vec![id]))
        } else {
            self.execute(SelectComponentsCommand::new(vec![id]))
        }
    }

    pub fn clear_selection(&mut self) -> CommandResult {
        if self.manager.selected_ids().is_empty() {
            return Ok(());
        }
        self.execute(ClearSelectionCommand::new())
    }

    pub fn find_component_at(&self, pos: Pos2) -> Option<ComponentId> {
        self.manager.find_component_at_point(pos).map(Shape::id)
    }

    fn single_selected(&self) -> Option<ComponentId> {
        let selected = self.manager.selected_ids().to_vec();
        match selected.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    pub fn is_groupable(&self) -> bool {
        self.manager.selected_ids().len() >= 2
    }

    pub fn is_ungroupable(&self) -> bool {
        self.single_selected()
            .and_then(|id| self.manager.find_component_by_id(id))
            .is_some_and(Component::is_group)
    }

    pub fn is_z_order_changeable(&self) -> bool {
        self.single_selected().is_some()
    }

    // ---------------------------------------------------------------------
    // Selection-driven actions

    pub fn move_selected(&mut self, delta: Vec2) -> CommandResult {
        let selected = self.manager.selected_ids().to_vec();
        match selected.as_slice() {
            [] => Ok(()),
            [id] => self.execute(MoveComponentCommand::new(*id, delta)),
            ids => self.execute(MoveComponentsCommand::new(ids.to_vec(), delta)),
        }
    }

    pub fn scale_selected(&mut self, sx: f32, sy: f32) -> CommandResult {
        let selected = self.manager.selected_ids().to_vec();
        match selected.as_slice() {
            [] => Ok(()),
            [id] => {
                let command = ScaleComponentCommand::new(*id, sx, sy)?;
                self.execute(command)
            }
            ids => {
                let command = ScaleComponentsCommand::new(ids.to_vec(), sx, sy)?;
                self.execute(command)
            }
        }
    }

    pub fn scale_selected_by_handle(&mut self, handle: HandlePosition, delta: Vec2) -> CommandResult {
        let selected = self.manager.selected_ids().to_vec();
        match selected.as_slice() {
            [] => Ok(()),
            [id] => self.execute(ScaleComponentByHandleCommand::new(*id, handle, delta)),
            ids => self.execute(ScaleComponentsByHandleCommand::new(ids.to_vec(), handle, delta)),
        }
    }

    /// Only applies when exactly one shape is selected.
    pub fn set_selected_properties(&mut self, patch: BoundPatch) -> CommandResult {
        let Some(id) = self.single_selected() else {
            debug!("set_selected_properties needs a single selection");
            return Ok(());
        };
        let command = SetComponentPropertiesCommand::new(id, patch)?;
        self.execute(command)
    }

    pub fn delete_selected(&mut self) -> CommandResult {
        let selected = self.manager.selected_ids().to_vec();
        match selected.as_slice() {
            [] => Ok(()),
            [id] => self.execute(DeleteComponentCommand::new(*id)),
            ids => self.execute(DeleteComponentsCommand::new(ids.to_vec())),
        }
    }

    pub fn group_selected(&mut self) -> CommandResult {
        if !self.is_groupable() {
            debug!("group_selected needs at least two selected shapes");
            return Ok(());
        }
        let ids = self.manager.selected_ids().to_vec();
        self.execute(GroupComponentsCommand::new(ids))
    }

    pub fn ungroup_selected(&mut self) -> CommandResult {
        let Some(id) = self.single_selected() else {
            return Ok(());
        };
        if !self.is_ungroupable() {
            debug!("{id} is not a group");
            return Ok(());
        }
        self.execute(UngroupComponentCommand::new(id))
    }

    fn reorder_selected(&mut self, kind: ZOrderMove) -> CommandResult {
        let Some(id) = self.single_selected() else {
            return Ok(());
        };
        self.execute(ZOrderCommand::new(id, kind))
    }

    pub fn bring_forward(&mut self) -> CommandResult {
        self.reorder_selected(ZOrderMove::BringForward)
    }

    pub fn send_backward(&mut self) -> CommandResult {
        self.reorder_selected(ZOrderMove::SendBackward)
    }

    pub fn bring_to_front(&mut self) -> CommandResult {
        self.reorder_selected(ZOrderMove::BringToFront)
    }

    pub fn send_to_back(&mut self) -> CommandResult {
        self.reorder_selected(ZOrderMove::SendToBack)
    }

    // ---------------------------------------------------------------------
    // Creation

    fn create(&mut self, command: Command) -> CommandResult<ComponentId> {
        self.execute(command)?;
        self.history
            .last()
            .and_then(Command::created_id)
            .ok_or_else(|| EditorError::invariant("create command did not report an id"))
    }

    pub fn create_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) -> CommandResult<ComponentId> {
        self.create(CreateRectangleCommand::new(x, y, width, height).into())
    }

    pub fn create_ellipse(&mut self, x: f32, y: f32, width: f32, height: f32) -> CommandResult<ComponentId> {
        self.create(CreateEllipseCommand::new(x, y, width, height).into())
    }

    pub fn create_line(&mut self, start: Pos2, end: Pos2) -> CommandResult<ComponentId> {
        self.create(CreateLineCommand::new(start, end).into())
    }

    // ---------------------------------------------------------------------
    // Tools

    pub fn active_tool(&self) -> &ToolType {
        &self.tool
    }

    pub fn set_tool(&mut self, kind: ToolKind) {
        if self.tool.kind() == kind {
            return;
        }
        self.tool.deactivate();
        self.tool = new_tool(kind);
        self.tool.activate();
        info!("Switched to {} tool", self.tool.name());
    }

    fn run_tool_command(&mut self, command: Option<Command>) -> CommandResult {
        match command {
            Some(command) => self.execute(command),
            None => Ok(()),
        }
    }

    pub fn pointer_down(&mut self, pos: Pos2, multi_select: bool) -> CommandResult {
        let ctx = ToolContext { manager: &self.manager, config: &self.config };
        let command = self.tool.on_pointer_down(pos, multi_select, ctx);
        self.run_tool_command(command)
    }

    pub fn pointer_move(&mut self, pos: Pos2) -> CommandResult {
        let ctx = ToolContext { manager: &self.manager, config: &self.config };
        let command = self.tool.on_pointer_move(pos, ctx);
        self.run_tool_command(command)
    }

    pub fn pointer_up(&mut self, pos: Pos2) -> CommandResult {
        let ctx = ToolContext { manager: &self.manager, config: &self.config };
        let command = self.tool.on_pointer_up(pos, ctx);
        self.run_tool_command(command)
    }

    // ---------------------------------------------------------------------
    // Drawing

    pub fn drawables(&self) -> Vec<DrawableShape> {
        self.manager.get_all_drawables()
    }

    /// The in-progress gesture rendered on copies of the affected shapes.
    pub fn preview_drawables(&self) -> Vec<DrawableShape> {
        let Some(preview) = self.tool.preview() else {
            return Vec::new();
        };
        match preview {
            ToolPreview::Shape(drawable) => vec![drawable],
            ToolPreview::Move { ids, delta } => {
                let mut out = Vec::new();
                for mut component in self.cloned(&ids) {
                    component.translate(delta);
                    component.append_drawables(&mut out);
                }
                out
            }
            ToolPreview::Resize { ids, handle, delta } => {
                let mut out = Vec::new();
                for mut component in self.cloned(&ids) {
                    let mut selected = SelectedComponent::new(&mut component);
                    selected.scale_by_handle(handle, delta);
                    component.append_drawables(&mut out);
                }
                out
            }
        }
    }

    fn cloned(&self, ids: &[ComponentId]) -> Vec<Component> {
        self.manager
            .components()
            .iter()
            .filter(|component| ids.contains(&component.id()))
            .cloned()
            .collect()
    }
}
