use log::debug;

use super::{dedup_ids, CommandResult, EditorCommand};
use crate::component_manager::{ComponentManager, RemovedComponent};
use crate::error::EditorError;
use crate::id_generator::ComponentId;
use crate::shape::Shape;

/// Swaps `children` out for a previously dissolved `group`, keeping the group's id.
///
/// The group takes over the selection of any child that was selected.
fn restore_group(
    manager: &mut ComponentManager,
    group: RemovedComponent,
    children: &[ComponentId],
) -> CommandResult {
    let group_id = group.component.id();
    manager.batch(|manager| {
        let any_selected = children.iter().any(|id| manager.is_selected(*id));
        manager.remove_components(children)?;
        manager.insert_components(vec![group])?;
        if any_selected {
            manager.select_components(&[group_id]);
        }
        debug!("Restored group {group_id} over {children:?}");
        Ok(())
    })
}

/// Takes the group out of the document, leaving its children in its place.
fn dissolve_group(
    manager: &mut ComponentManager,
    group_id: ComponentId,
) -> CommandResult<(RemovedComponent, Vec<ComponentId>)> {
    let index = manager.index_of(group_id).ok_or(EditorError::NotFound(group_id))?;
    let component = manager.components()[index].clone();
    let children = manager.ungroup(group_id)?;
    Ok((RemovedComponent { index, component }, children))
}

#[derive(Debug)]
pub struct GroupComponentsCommand {
    ids: Vec<ComponentId>,
    group_id: Option<ComponentId>,
    /// (child, z-index before grouping), ascending by index
    original_indices: Vec<(ComponentId, usize)>,
    selection_before: Vec<ComponentId>,
    /// The group as it was when undone; redo puts this exact group back.
    dissolved: Option<RemovedComponent>,
}

impl GroupComponentsCommand {
    pub fn new(ids: Vec<ComponentId>) -> Self {
        Self {
            ids,
            group_id: None,
            original_indices: Vec::new(),
            selection_before: Vec::new(),
            dissolved: None,
        }
    }

    pub fn group_id(&self) -> Option<ComponentId> {
        self.group_id
    }

    fn children(&self) -> Vec<ComponentId> {
        self.original_indices.iter().map(|(id, _)| *id).collect()
    }
}

impl EditorCommand for GroupComponentsCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        let mut indices: Vec<(ComponentId, usize)> = dedup_ids(&self.ids)
            .into_iter()
            .filter_map(|id| manager.index_of(id).map(|index| (id, index)))
            .collect();
        indices.sort_by_key(|(_, index)| *index);

        let selection = manager.selected_ids().to_vec();

        let group_id = manager.create_group(&self.ids)?;
        self.group_id = Some(group_id);
        self.original_indices = indices;
        self.selection_before = selection;
        Ok(())
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        let Some(group_id) = self.group_id else {
            return Ok(());
        };
        manager.batch(|manager| {
            let (group, _) = dissolve_group(manager, group_id)?;
            self.dissolved = Some(group);
            // Ascending order so each earlier placement stays valid.
            for (id, index) in &self.original_indices {
                manager.change_component_order(*id, *index)?;
            }
            if manager.selected_ids() != self.selection_before.as_slice() {
                manager.set_selection(&self.selection_before);
            }
            debug!("Restored {} children of {group_id}", self.original_indices.len());
            Ok(())
        })
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        match self.dissolved.take() {
            Some(group) => {
                let children = self.children();
                restore_group(manager, group, &children)
            }
            None => self.execute(manager),
        }
    }

    fn name(&self) -> &'static str {
        "Group"
    }
}

/// Dissolves a group. Undo puts the same group (same id) back at its old z-index.
#[derive(Debug)]
pub struct UngroupComponentCommand {
    group_id: ComponentId,
    dissolved: Option<RemovedComponent>,
    children: Vec<ComponentId>,
}

impl UngroupComponentCommand {
    pub fn new(group_id: ComponentId) -> Self {
        Self { group_id, dissolved: None, children: Vec::new() }
    }

    pub fn group_id(&self) -> ComponentId {
        self.group_id
    }

    fn ungroup(&mut self, manager: &mut ComponentManager) -> CommandResult {
        let (group, children) = dissolve_group(manager, self.group_id)?;
        self.dissolved = Some(group);
        self.children = children;
        Ok(())
    }
}

impl EditorCommand for UngroupComponentCommand {
    fn execute(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.ungroup(manager)
    }

    fn undo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        let Some(group) = self.dissolved.take() else {
            return Ok(());
        };
        restore_group(manager, group, &self.children)
    }

    fn redo(&mut self, manager: &mut ComponentManager) -> CommandResult {
        self.ungroup(manager)
    }

    fn name(&self) -> &'static str {
        "Ungroup"
    }
}
