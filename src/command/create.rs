use egui::Pos2;
use log::debug;

use super::{CommandResult, EditorCommand};
use crate::component_manager::ComponentManager;
use crate::error::EditorError;
use crate::geometry::Bound;
use crate::id_generator::ComponentId;
use crate::shape::{Component, Ellipse, Line, Rectangle, Shape, Style};

/// Bookkeeping shared by the create commands: the id handed out on execute, the component
/// parked while the command is undone, and the selection the new shape replaced.
#[derive(Debug, Default)]
struct Created {
    id: Option<ComponentId>,
    parked: Option<Component>,
    selection_before: Vec<ComponentId>,
}

impl Created {
    /// Adds the shape on top and makes it the selection.
    fn add(&mut self, manager: &mut ComponentManager, component: Component) {
        let id = component.id();
        self.id = Some(id);
        self.selection_before = manager.selected_ids().to_vec();
        manager.batch(|manager| {
            manager.add_component(component);
            manager.set_selection(&[id]);
        });
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        let Some(id) = self.id else {
            return Ok(());
        };
        let selection = &self.selection_before;
        self.parked = Some(manager.batch(|manager| {
            let component = manager.remove_component(id)?;
            manager.set_selection(selection);
            Ok::<_, EditorError>(component)
        })?);
        Ok(())
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        if let Some(component) = self.parked.take() {
            debug!("Re-adding {}", component.id());
            self.add(manager, component);
        }
        Ok(())
    }
}

fn check_size(kind: &str, bound: &Bound) -> CommandResult {
    let ok = |v: f32| v.is_finite() && v > 0.0;
    if !ok(bound.width) || !ok(bound.height) {
        return Err(EditorError::invalid(format!(
            "{kind} needs a positive size, got {}x{}",
            bound.width, bound.height
        )));
    }
    if !bound.x.is_finite() || !bound.y.is_finite() {
        return Err(EditorError::invalid(format!(
            "{kind} position must be finite, got ({}, {})",
            bound.x, bound.y
        )));
    }
    Ok(())
}

#[derive(Debug)]
pub struct CreateRectangleCommand {
    bound: Bound,
    style: Option<Style>,
    created: Created,
}

impl CreateRectangleCommand {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            bound: Bound::new(x, y, width, height),
            style: None,
            created: Created::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

impl EditorCommand for CreateRectangleCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        check_size("rectangle", &self.bound)?;
        let id = manager.next_id();
        let mut shape = Rectangle::new(id, self.bound);
        if let Some(style) = &self.style {
            shape = shape.with_style(style.clone());
        }
        self.created.add(manager, Component::Rectangle(shape));
        Ok(())
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.created.undo(manager)
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.created.redo(manager)
    }

    fn name(&self) -> &'static str {
        "Create Rectangle"
    }

    fn created_id(&self) -> Option<ComponentId> {
        self.created.id
    }
}

#[derive(Debug)]
pub struct CreateEllipseCommand {
    bound: Bound,
    style: Option<Style>,
    created: Created,
}

impl CreateEllipseCommand {
    /// `x`/`y` is the top-left corner of the bounding box.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            bound: Bound::new(x, y, width, height),
            style: None,
            created: Created::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

impl EditorCommand for CreateEllipseCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        check_size("ellipse", &self.bound)?;
        let id = manager.next_id();
        let mut shape = Ellipse::new(id, self.bound);
        if let Some(style) = &self.style {
            shape = shape.with_style(style.clone());
        }
        self.created.add(manager, Component::Ellipse(shape));
        Ok(())
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.created.undo(manager)
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.created.redo(manager)
    }

    fn name(&self) -> &'static str {
        "Create Ellipse"
    }

    fn created_id(&self) -> Option<ComponentId> {
        self.created.id
    }
}

#[derive(Debug)]
pub struct CreateLineCommand {
    start: Pos2,
    end: Pos2,
    style: Option<Style>,
    created: Created,
}

impl CreateLineCommand {
    pub fn new(start: Pos2, end: Pos2) -> Self {
        Self {
            start,
            end,
            style: None,
            created: Created::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

impl EditorCommand for CreateLineCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        if !(self.start.x.is_finite() && self.start.y.is_finite() && self.end.x.is_finite() && self.end.y.is_finite()) {
            return Err(EditorError::invalid(format!(
                "line endpoints must be finite, got {:?} -> {:?}",
                self.start, self.end
            )));
        }
        if self.start == self.end {
            return Err(EditorError::invalid(format!("line from {:?} to itself has no length", self.start)));
        }
        let id = manager.next_id();
        let mut shape = Line::new(id, self.start, self.end);
        if let Some(style) = &self.style {
            shape = shape.with_style(style.clone());
        }
        self.created.add(manager, Component::Line(shape));
        Ok(())
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.created.undo(manager)
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.created.redo(manager)
    }

    fn name(&self) -> &'static str {
        "Create Line"
    }

    fn created_id(&self) -> Option<ComponentId> {
        self.created.id
    }
}
