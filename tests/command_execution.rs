use std::cell::Cell;
use std::rc::Rc;

use egui::{Pos2, Vec2};
use vector_editor::command::{
    ClearSelectionCommand, Command, CommandHistory, CommandState, CreateEllipseCommand,
    CreateLineCommand, CreateRectangleCommand, DeleteComponentCommand, DeleteComponentsCommand,
    GroupComponentsCommand, MoveComponentCommand, MoveComponentsCommand,
    ScaleComponentByHandleCommand, ScaleComponentCommand, ScaleComponentsByHandleCommand,
    ScaleComponentsCommand, SelectComponentsCommand, SetComponentPropertiesCommand,
    SetComponentsPropertiesCommand, UngroupComponentCommand, ZOrderCommand,
};
use vector_editor::geometry::Bound;
use vector_editor::id_generator::ComponentId;
use vector_editor::selection::HandlePosition;
use vector_editor::shape::{factory, BoundPatch, Component, Shape};
use vector_editor::{ComponentManager, EditorError};

const EPS: f32 = 0.001;

/// Everything observable about the document
#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    components: Vec<Component>,
    selected: Vec<ComponentId>,
}

/// Selection is compared as a set.
fn snapshot(manager: &ComponentManager) -> Snapshot {
    let mut selected = manager.selected_ids().to_vec();
    selected.sort();
    Snapshot {
        components: manager.components().to_vec(),
        selected,
    }
}

fn add_rect(manager: &mut ComponentManager, x: f32, y: f32, w: f32, h: f32) -> ComponentId {
    let id = manager.next_id();
    manager.add_component(factory::create_rectangle(id, Bound::new(x, y, w, h)));
    id
}

fn create_test_manager() -> (ComponentManager, [ComponentId; 3]) {
    let mut manager = ComponentManager::default();
    let a = add_rect(&mut manager, 0.0, 0.0, 10.0, 10.0);
    let b = add_rect(&mut manager, 20.0, 0.0, 10.0, 10.0);
    let c = add_rect(&mut manager, 40.0, 0.0, 10.0, 10.0);
    (manager, [a, b, c])
}

fn bound_of(manager: &ComponentManager, id: ComponentId) -> Bound {
    manager.find_component_by_id(id).unwrap().bound()
}

/// execute, undo, redo, undo: the first undo and the final state must equal the start,
/// the redo must equal the state after execute.
fn assert_round_trip(manager: &mut ComponentManager, command: impl Into<Command>) {
    let before = snapshot(manager);
    let mut history = CommandHistory::new();
    history.execute(command.into(), manager).unwrap();
    let after = snapshot(manager);

    history.undo(manager).unwrap();
    assert_eq!(snapshot(manager), before, "undo did not restore the document");

    history.redo(manager).unwrap();
    assert_eq!(snapshot(manager), after, "redo did not replay the command");

    history.undo(manager).unwrap();
    assert_eq!(snapshot(manager), before);
}

#[test]
fn test_create_commands_round_trip() {
    let (mut manager, _) = create_test_manager();
    assert_round_trip(&mut manager, CreateRectangleCommand::new(1.0, 2.0, 30.0, 40.0));
    assert_round_trip(&mut manager, CreateEllipseCommand::new(1.0, 2.0, 30.0, 40.0));
    assert_round_trip(&mut manager, CreateLineCommand::new(Pos2::new(0.0, 0.0), Pos2::new(8.0, 6.0)));
}

#[test]
fn test_create_rejects_degenerate_sizes() {
    let mut manager = ComponentManager::default();
    let mut history = CommandHistory::new();

    let result = history.execute(CreateRectangleCommand::new(0.0, 0.0, 0.0, 10.0).into(), &mut manager);
    assert!(matches!(result, Err(EditorError::InvalidArgument(_))));
    let result = history.execute(CreateEllipseCommand::new(0.0, 0.0, 10.0, -1.0).into(), &mut manager);
    assert!(matches!(result, Err(EditorError::InvalidArgument(_))));
    let point = Pos2::new(3.0, 3.0);
    let result = history.execute(CreateLineCommand::new(point, point).into(), &mut manager);
    assert!(matches!(result, Err(EditorError::InvalidArgument(_))));

    assert!(manager.is_empty());
    assert!(!history.can_undo());
}

#[test]
fn test_create_reports_new_id() {
    let mut manager = ComponentManager::default();
    let mut command: Command = CreateRectangleCommand::new(0.0, 0.0, 5.0, 5.0).into();
    assert_eq!(command.created_id(), None);
    command.execute(&mut manager).unwrap();
    let id = command.created_id().unwrap();
    assert!(manager.contains(id));
}

#[test]
fn test_create_undo_restores_previous_selection() {
    let (mut manager, [a, b, _]) = create_test_manager();
    manager.set_selection(&[a, b]);
    let mut history = CommandHistory::new();

    history.execute(CreateEllipseCommand::new(0.0, 30.0, 10.0, 10.0).into(), &mut manager).unwrap();
    let created = history.last().and_then(Command::created_id).unwrap();
    assert_eq!(manager.selected_ids(), &[created]);

    history.undo(&mut manager).unwrap();
    assert_eq!(manager.selected_ids(), &[a, b]);

    history.redo(&mut manager).unwrap();
    assert_eq!(manager.selected_ids(), &[created]);
}

#[test]
fn test_move_commands_round_trip() {
    let (mut manager, [a, b, c]) = create_test_manager();
    assert_round_trip(&mut manager, MoveComponentCommand::new(a, Vec2::new(5.0, -3.0)));
    assert_round_trip(&mut manager, MoveComponentsCommand::new(vec![a, b, c], Vec2::new(0.5, 2.0)));
}

#[test]
fn test_move_missing_component_fails_and_is_not_recorded() {
    let (mut manager, _) = create_test_manager();
    let mut history = CommandHistory::new();
    let missing = ComponentId::new(99);
    let before = snapshot(&manager);

    let result = history.execute(MoveComponentCommand::new(missing, Vec2::new(1.0, 1.0)).into(), &mut manager);
    assert_eq!(result, Err(EditorError::NotFound(missing)));
    assert_eq!(snapshot(&manager), before);
    assert_eq!(history.undo_len(), 0);
}

#[test]
fn test_scale_commands_round_trip() {
    let (mut manager, [a, b, _]) = create_test_manager();
    assert_round_trip(&mut manager, ScaleComponentCommand::new(a, 2.0, 0.5).unwrap());
    assert_round_trip(&mut manager, ScaleComponentsCommand::new(vec![a, b], 4.0, 0.25).unwrap());
}

#[test]
fn test_scale_undo_with_inexact_factor() {
    let (mut manager, [a, _, _]) = create_test_manager();
    let mut history = CommandHistory::new();
    history.execute(ScaleComponentCommand::new(a, 3.0, 7.0).unwrap().into(), &mut manager).unwrap();
    history.undo(&mut manager).unwrap();
    assert!(bound_of(&manager, a).approx_eq(&Bound::new(0.0, 0.0, 10.0, 10.0), EPS));
}

#[test]
fn test_scale_rejects_non_invertible_factors() {
    let id = ComponentId::new(1);
    assert!(matches!(ScaleComponentCommand::new(id, 0.0, 1.0), Err(EditorError::InvalidArgument(_))));
    assert!(matches!(ScaleComponentCommand::new(id, 1.0, -2.0), Err(EditorError::InvalidArgument(_))));
    assert!(matches!(
        ScaleComponentsCommand::new(vec![id], f32::NAN, 1.0),
        Err(EditorError::InvalidArgument(_))
    ));
}

#[test]
fn test_handle_resize_of_flat_line_is_reversible() {
    let mut manager = ComponentManager::default();
    let id = manager.next_id();
    manager.add_component(factory::create_line(id, Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0)));
    let mut history = CommandHistory::new();

    // The line has no height, so the vertical part of the drag is ignored.
    history
        .execute(ScaleComponentByHandleCommand::new(id, HandlePosition::TopMiddle, Vec2::new(0.0, -20.0)).into(), &mut manager)
        .unwrap();
    assert!(bound_of(&manager, id).approx_eq(&Bound::new(0.0, 0.0, 100.0, 0.0), EPS));
    history.undo(&mut manager).unwrap();
    assert!(bound_of(&manager, id).approx_eq(&Bound::new(0.0, 0.0, 100.0, 0.0), EPS));

    history
        .execute(ScaleComponentByHandleCommand::new(id, HandlePosition::TopRight, Vec2::new(50.0, -20.0)).into(), &mut manager)
        .unwrap();
    assert!(bound_of(&manager, id).approx_eq(&Bound::new(0.0, 0.0, 150.0, 0.0), EPS));
    history.undo(&mut manager).unwrap();
    assert!(bound_of(&manager, id).approx_eq(&Bound::new(0.0, 0.0, 100.0, 0.0), EPS));
    assert!(history.can_redo());
}

#[test]
fn test_scale_by_handle_commands_round_trip() {
    let (mut manager, [a, b, _]) = create_test_manager();
    assert_round_trip(
        &mut manager,
        ScaleComponentByHandleCommand::new(a, HandlePosition::TopLeft, Vec2::new(2.0, 4.0)),
    );
    assert_round_trip(
        &mut manager,
        ScaleComponentsByHandleCommand::new(vec![a, b], HandlePosition::BottomMiddle, Vec2::new(0.0, 6.0)),
    );
}

#[test]
fn test_set_properties_commands_round_trip() {
    let (mut manager, [a, b, _]) = create_test_manager();
    assert_round_trip(
        &mut manager,
        SetComponentPropertiesCommand::new(a, BoundPatch { x: Some(7.0), height: Some(20.0), ..Default::default() })
            .unwrap(),
    );
    assert_round_trip(
        &mut manager,
        SetComponentsPropertiesCommand::new(vec![a, b], BoundPatch::position(1.0, 1.0)).unwrap(),
    );
}

#[test]
fn test_set_properties_only_restores_touched_fields() {
    let (mut manager, [a, _, _]) = create_test_manager();
    let mut history = CommandHistory::new();
    let command = SetComponentPropertiesCommand::new(a, BoundPatch::size(30.0, 30.0)).unwrap();
    history.execute(command.into(), &mut manager).unwrap();

    // A later edit to x is not part of this command and survives its undo.
    manager.move_component(a, Vec2::new(5.0, 0.0)).unwrap();
    history.undo(&mut manager).unwrap();
    assert!(bound_of(&manager, a).approx_eq(&Bound::new(5.0, 0.0, 10.0, 10.0), EPS));
}

#[test]
fn test_set_properties_rejects_bad_patches() {
    let id = ComponentId::new(1);
    assert!(SetComponentPropertiesCommand::new(id, BoundPatch::default()).is_err());
    assert!(SetComponentPropertiesCommand::new(id, BoundPatch::size(0.0, 5.0)).is_err());
    assert!(SetComponentsPropertiesCommand::new(vec![id], BoundPatch::size(5.0, -5.0)).is_err());
}

#[test]
fn test_delete_commands_round_trip() {
    let (mut manager, [a, b, c]) = create_test_manager();
    manager.set_selection(&[a, c]);
    assert_round_trip(&mut manager, DeleteComponentCommand::new(b));
    assert_round_trip(&mut manager, DeleteComponentCommand::new(a));
    assert_round_trip(&mut manager, DeleteComponentsCommand::new(vec![c, a]));
}

#[test]
fn test_delete_components_restores_interleaved_order() {
    let mut manager = ComponentManager::default();
    let ids: Vec<ComponentId> = (0..5).map(|i| add_rect(&mut manager, i as f32, 0.0, 1.0, 1.0)).collect();
    let mut history = CommandHistory::new();

    history
        .execute(DeleteComponentsCommand::new(vec![ids[3], ids[0], ids[1]]).into(), &mut manager)
        .unwrap();
    assert_eq!(manager.component_ids(), vec![ids[2], ids[4]]);

    history.undo(&mut manager).unwrap();
    assert_eq!(manager.component_ids(), ids);
}

#[test]
fn test_group_command_undo_restores_z_order_and_selection() {
    let (mut manager, [a, b, c]) = create_test_manager();
    manager.set_selection(&[a]);
    let before = snapshot(&manager);
    let mut history = CommandHistory::new();

    history.execute(GroupComponentsCommand::new(vec![a, c]).into(), &mut manager).unwrap();
    assert_eq!(manager.len(), 2);
    assert_eq!(manager.component_ids()[0], b);

    history.undo(&mut manager).unwrap();
    assert_eq!(snapshot(&manager), before);
}

#[test]
fn test_group_redo_keeps_group_id() {
    let (mut manager, [a, b, _]) = create_test_manager();
    let mut history = CommandHistory::new();
    history.execute(GroupComponentsCommand::new(vec![a, b]).into(), &mut manager).unwrap();
    let group = manager.component_ids()[1];
    history.execute(MoveComponentCommand::new(group, Vec2::new(5.0, 0.0)).into(), &mut manager).unwrap();
    let grouped = snapshot(&manager);

    history.undo(&mut manager).unwrap();
    history.undo(&mut manager).unwrap();
    history.redo(&mut manager).unwrap();
    assert_eq!(manager.component_ids()[1], group);

    // The move recorded against the group still applies after the group came back.
    history.redo(&mut manager).unwrap();
    assert_eq!(snapshot(&manager), grouped);
}

#[test]
fn test_group_undo_redo_notify_once() {
    let (mut manager, [a, b, _]) = create_test_manager();
    manager.set_selection(&[a]);
    let count = Rc::new(Cell::new(0));
    let counter = count.clone();
    manager.subscribe(Box::new(move || counter.set(counter.get() + 1)));
    let mut history = CommandHistory::new();

    history.execute(GroupComponentsCommand::new(vec![a, b]).into(), &mut manager).unwrap();
    let group = manager.component_ids()[1];
    assert_eq!(count.get(), 1);
    history.undo(&mut manager).unwrap();
    assert_eq!(count.get(), 2);
    history.redo(&mut manager).unwrap();
    assert_eq!(count.get(), 3);

    history.execute(UngroupComponentCommand::new(group).into(), &mut manager).unwrap();
    assert_eq!(count.get(), 4);
    history.undo(&mut manager).unwrap();
    assert_eq!(count.get(), 5);
}

#[test]
fn test_group_with_one_component_fails() {
    let (mut manager, [a, _, _]) = create_test_manager();
    let mut history = CommandHistory::new();
    let result = history.execute(GroupComponentsCommand::new(vec![a]).into(), &mut manager);
    assert!(matches!(result, Err(EditorError::InvalidArgument(_))));
    assert_eq!(history.undo_len(), 0);
}

#[test]
fn test_ungroup_command_undo_restores_group_position() {
    let (mut manager, [a, b, c]) = create_test_manager();
    let group = manager.create_group(&[a, b]).unwrap();
    manager.send_to_back(group).unwrap();
    manager.set_selection(&[group]);
    let before = snapshot(&manager);
    let mut history = CommandHistory::new();

    history.execute(UngroupComponentCommand::new(group).into(), &mut manager).unwrap();
    assert_eq!(manager.component_ids(), vec![a, b, c]);
    assert_eq!(manager.selected_ids(), &[a, b]);

    history.undo(&mut manager).unwrap();
    assert_eq!(snapshot(&manager), before);
    let regrouped = manager.find_component_by_id(group).unwrap();
    assert!(regrouped.bound().approx_eq(&Bound::new(0.0, 0.0, 30.0, 10.0), EPS));

    history.redo(&mut manager).unwrap();
    assert_eq!(manager.component_ids(), vec![a, b, c]);
}

#[test]
fn test_group_then_ungroup_undo_chain() {
    let (mut manager, [a, b, c]) = create_test_manager();
    let before = snapshot(&manager);
    let mut history = CommandHistory::new();
    history.execute(GroupComponentsCommand::new(vec![a, b]).into(), &mut manager).unwrap();
    let group = manager.component_ids()[1];
    history.execute(UngroupComponentCommand::new(group).into(), &mut manager).unwrap();

    history.undo(&mut manager).unwrap();
    assert!(manager.contains(group));
    history.undo(&mut manager).unwrap();
    assert_eq!(snapshot(&manager), before);
    assert_eq!(manager.component_ids(), vec![a, b, c]);
}

#[test]
fn test_z_order_commands_round_trip() {
    let (mut manager, [a, b, c]) = create_test_manager();
    assert_round_trip(&mut manager, ZOrderCommand::bring_forward(a));
    assert_round_trip(&mut manager, ZOrderCommand::send_backward(c));
    assert_round_trip(&mut manager, ZOrderCommand::bring_to_front(a));
    assert_round_trip(&mut manager, ZOrderCommand::send_to_back(b));
}

#[test]
fn test_z_order_at_extreme_is_a_recorded_no_op() {
    let (mut manager, [a, b, c]) = create_test_manager();
    let mut history = CommandHistory::new();
    history.execute(ZOrderCommand::bring_to_front(c).into(), &mut manager).unwrap();
    history.execute(ZOrderCommand::send_backward(a).into(), &mut manager).unwrap();
    assert_eq!(manager.component_ids(), vec![a, b, c]);
    assert_eq!(history.undo_len(), 2);

    history.undo(&mut manager).unwrap();
    history.undo(&mut manager).unwrap();
    assert_eq!(manager.component_ids(), vec![a, b, c]);
}

#[test]
fn test_selection_commands_are_not_recorded() {
    let (mut manager, [a, b, _]) = create_test_manager();
    let mut history = CommandHistory::new();

    history.execute(MoveComponentCommand::new(a, Vec2::new(1.0, 0.0)).into(), &mut manager).unwrap();
    history.undo(&mut manager).unwrap();
    assert!(history.can_redo());

    history.execute(SelectComponentsCommand::new(vec![a]).into(), &mut manager).unwrap();
    history.execute(SelectComponentsCommand::additive(vec![b]).into(), &mut manager).unwrap();
    assert_eq!(manager.selected_ids(), &[a, b]);
    history.execute(ClearSelectionCommand::new().into(), &mut manager).unwrap();
    assert!(manager.selected_ids().is_empty());

    assert_eq!(history.undo_len(), 0);
    assert!(history.can_redo());
}

#[test]
fn test_execute_clears_redo() {
    let (mut manager, [a, _, _]) = create_test_manager();
    let mut history = CommandHistory::new();
    history.execute(MoveComponentCommand::new(a, Vec2::new(1.0, 0.0)).into(), &mut manager).unwrap();
    history.undo(&mut manager).unwrap();
    assert_eq!(history.redo_len(), 1);

    history.execute(MoveComponentCommand::new(a, Vec2::new(0.0, 1.0)).into(), &mut manager).unwrap();
    assert_eq!(history.redo_len(), 0);
    assert!(!history.can_redo());
}

#[test]
fn test_history_drops_oldest_past_limit() {
    let (mut manager, [a, _, _]) = create_test_manager();
    let mut history = CommandHistory::with_limit(3);
    for _ in 0..5 {
        history.execute(MoveComponentCommand::new(a, Vec2::new(1.0, 0.0)).into(), &mut manager).unwrap();
    }
    assert_eq!(history.undo_len(), 3);

    while history.can_undo() {
        history.undo(&mut manager).unwrap();
    }
    // Two moves fell off the bottom of the stack.
    assert!((bound_of(&manager, a).x - 2.0).abs() < EPS);
}

#[test]
fn test_default_history_limit_is_one_hundred() {
    let (mut manager, [a, _, _]) = create_test_manager();
    let mut history = CommandHistory::new();
    for _ in 0..150 {
        history.execute(MoveComponentCommand::new(a, Vec2::new(1.0, 0.0)).into(), &mut manager).unwrap();
    }
    assert_eq!(history.undo_len(), 100);
}

#[test]
fn test_undo_and_redo_on_empty_history_are_ok() {
    let mut manager = ComponentManager::default();
    let mut history = CommandHistory::new();
    assert!(history.undo(&mut manager).is_ok());
    assert!(history.redo(&mut manager).is_ok());
}

#[test]
fn test_undo_names_list_recorded_commands() {
    let (mut manager, [a, b, _]) = create_test_manager();
    let mut history = CommandHistory::new();
    history.execute(MoveComponentCommand::new(a, Vec2::new(1.0, 0.0)).into(), &mut manager).unwrap();
    history.execute(GroupComponentsCommand::new(vec![a, b]).into(), &mut manager).unwrap();
    assert_eq!(history.undo_names(), vec!["Move Component", "Group"]);

    history.clear();
    assert!(!history.can_undo() && !history.can_redo());
}

#[test]
fn test_command_state_machine() {
    let (mut manager, [a, _, _]) = create_test_manager();
    let mut command: Command = MoveComponentCommand::new(a, Vec2::new(4.0, 0.0)).into();
    assert_eq!(command.state(), CommandState::Unexecuted);

    // Undo before execute does nothing.
    command.undo(&mut manager).unwrap();
    assert!((bound_of(&manager, a).x).abs() < EPS);

    command.execute(&mut manager).unwrap();
    assert_eq!(command.state(), CommandState::Executed);
    assert!(matches!(command.execute(&mut manager), Err(EditorError::InvariantViolation(_))));
    assert!((bound_of(&manager, a).x - 4.0).abs() < EPS);

    command.undo(&mut manager).unwrap();
    assert_eq!(command.state(), CommandState::Undone);
    command.redo(&mut manager).unwrap();
    assert_eq!(command.state(), CommandState::Executed);
    assert!((bound_of(&manager, a).x - 4.0).abs() < EPS);
}
