use egui::{Pos2, Vec2};
use vector_editor::geometry::Bound;
use vector_editor::id_generator::ComponentId;
use vector_editor::shape::{factory, BoundPatch, Component, DrawableShape, Shape, ShapeKind};
use vector_editor::EditorError;

const EPS: f32 = 0.001;

fn id(raw: usize) -> ComponentId {
    ComponentId::new(raw)
}

fn assert_bound(actual: Bound, x: f32, y: f32, width: f32, height: f32) {
    assert!(
        actual.approx_eq(&Bound::new(x, y, width, height), EPS),
        "expected ({x}, {y}, {width}, {height}), got {actual:?}"
    );
}

fn two_box_group() -> Component {
    let a = factory::create_rectangle(id(1), Bound::new(0.0, 0.0, 10.0, 10.0));
    let b = factory::create_rectangle(id(2), Bound::new(20.0, 20.0, 10.0, 10.0));
    factory::create_group(id(3), vec![a, b]).unwrap()
}

#[test]
fn test_rectangle_hit_test_includes_edges() {
    let rect = factory::create_rectangle(id(1), Bound::new(10.0, 10.0, 20.0, 10.0));
    assert!(rect.hit_test(Pos2::new(10.0, 10.0)));
    assert!(rect.hit_test(Pos2::new(30.0, 20.0)));
    assert!(rect.hit_test(Pos2::new(15.0, 15.0)));
    assert!(!rect.hit_test(Pos2::new(30.1, 20.0)));
    assert!(!rect.hit_test(Pos2::new(9.9, 15.0)));
}

#[test]
fn test_ellipse_hit_test_uses_the_curve() {
    let ellipse = factory::create_ellipse(id(1), Bound::new(0.0, 0.0, 100.0, 50.0));
    assert!(ellipse.hit_test(Pos2::new(50.0, 25.0)));
    assert!(ellipse.hit_test(Pos2::new(100.0, 25.0)));
    // Inside the bound but outside the curve.
    assert!(!ellipse.hit_test(Pos2::new(2.0, 2.0)));
}

#[test]
fn test_ellipse_drawable_carries_center_and_radii() {
    let ellipse = factory::create_ellipse(id(1), Bound::new(10.0, 20.0, 40.0, 30.0));
    match ellipse.to_drawables().as_slice() {
        [DrawableShape::Ellipse { x, y, radius_x, radius_y, .. }] => {
            assert!((x - 30.0).abs() < EPS);
            assert!((y - 35.0).abs() < EPS);
            assert!((radius_x - 20.0).abs() < EPS);
            assert!((radius_y - 15.0).abs() < EPS);
        }
        other => panic!("unexpected drawables {other:?}"),
    }
}

#[test]
fn test_line_hit_test_tolerance() {
    let line = factory::create_line(id(1), Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0));
    assert!(line.hit_test(Pos2::new(50.0, 2.0)));
    assert!(line.hit_test(Pos2::new(50.0, -3.0)));
    assert!(!line.hit_test(Pos2::new(50.0, 4.0)));
    // On the infinite line but past the end of the segment.
    assert!(!line.hit_test(Pos2::new(110.0, 0.0)));
}

#[test]
fn test_line_bound_is_envelope_of_endpoints() {
    let line = factory::create_line(id(1), Pos2::new(40.0, 10.0), Pos2::new(10.0, 50.0));
    assert_bound(line.bound(), 10.0, 10.0, 30.0, 40.0);
}

#[test]
fn test_line_scales_about_its_origin() {
    let mut line = factory::create_line(id(1), Pos2::new(10.0, 10.0), Pos2::new(20.0, 30.0));
    line.scale(2.0, 0.5);
    let line = line.as_line().unwrap();
    assert!((line.start() - Pos2::new(10.0, 10.0)).length() < EPS);
    assert!((line.end() - Pos2::new(30.0, 20.0)).length() < EPS);
}

#[test]
fn test_line_set_properties_moves_and_stretches() {
    let mut line = factory::create_line(id(1), Pos2::new(0.0, 0.0), Pos2::new(10.0, 10.0));
    line.set_properties(&BoundPatch { x: Some(5.0), width: Some(20.0), ..Default::default() });
    assert_bound(line.bound(), 5.0, 0.0, 20.0, 10.0);
}

#[test]
fn test_rectangle_translate_and_scale() {
    let mut rect = factory::create_rectangle(id(1), Bound::new(10.0, 10.0, 20.0, 10.0));
    rect.translate(Vec2::new(5.0, -5.0));
    rect.scale(2.0, 3.0);
    assert_bound(rect.bound(), 15.0, 5.0, 40.0, 30.0);
}

#[test]
fn test_group_bound_is_union_of_children() {
    let group = two_box_group();
    assert_eq!(group.kind(), ShapeKind::Group);
    assert_bound(group.bound(), 0.0, 0.0, 30.0, 30.0);
}

#[test]
fn test_group_needs_two_children() {
    let only = factory::create_rectangle(id(1), Bound::new(0.0, 0.0, 10.0, 10.0));
    let result = factory::create_group(id(2), vec![only]);
    assert!(matches!(result, Err(EditorError::InvalidArgument(_))));
}

#[test]
fn test_group_scale_keeps_children_proportional() {
    let mut group = two_box_group();
    group.scale(2.0, 2.0);
    assert_bound(group.bound(), 0.0, 0.0, 60.0, 60.0);

    let children = group.as_group().unwrap().children();
    assert_bound(children[0].bound(), 0.0, 0.0, 20.0, 20.0);
    assert_bound(children[1].bound(), 40.0, 40.0, 20.0, 20.0);
}

#[test]
fn test_group_scale_uses_each_axis_factor() {
    let mut rect = factory::create_rectangle(id(1), Bound::new(0.0, 0.0, 100.0, 100.0));
    rect.scale(2.0, 1.0);
    assert_bound(rect.bound(), 0.0, 0.0, 200.0, 100.0);

    let ellipse = factory::create_ellipse(id(2), Bound::new(150.0, 0.0, 50.0, 50.0));
    let mut group = factory::create_group(id(3), vec![rect, ellipse]).unwrap();
    assert_bound(group.bound(), 0.0, 0.0, 200.0, 100.0);

    let origin = group.bound().origin();
    let offsets: Vec<Vec2> = group
        .as_group()
        .unwrap()
        .children()
        .iter()
        .map(|child| child.bound().origin() - origin)
        .collect();

    group.scale(1.0, 2.0);
    assert_bound(group.bound(), 0.0, 0.0, 200.0, 200.0);

    let children = group.as_group().unwrap().children();
    for (child, offset) in children.iter().zip(&offsets) {
        let moved = child.bound().origin() - origin;
        assert!((moved.x - offset.x * 1.0).abs() < EPS, "x offset {moved:?} vs {offset:?}");
        assert!((moved.y - offset.y * 2.0).abs() < EPS, "y offset {moved:?} vs {offset:?}");
    }
    assert_bound(children[0].bound(), 0.0, 0.0, 200.0, 200.0);
    assert_bound(children[1].bound(), 150.0, 0.0, 50.0, 100.0);
}

#[test]
fn test_group_non_uniform_scale_moves_children_per_axis() {
    let mut group = two_box_group();
    group.scale(3.0, 0.5);
    assert_bound(group.bound(), 0.0, 0.0, 90.0, 15.0);

    let children = group.as_group().unwrap().children();
    assert_bound(children[0].bound(), 0.0, 0.0, 30.0, 5.0);
    assert_bound(children[1].bound(), 60.0, 10.0, 30.0, 5.0);
}

#[test]
fn test_nested_group_scale_recurses() {
    let inner = two_box_group();
    let outer_box = factory::create_rectangle(id(4), Bound::new(50.0, 0.0, 10.0, 10.0));
    let mut outer = factory::create_group(id(5), vec![inner, outer_box]).unwrap();

    outer.scale(0.5, 0.5);
    assert_bound(outer.bound(), 0.0, 0.0, 30.0, 15.0);

    let inner = outer.as_group().unwrap().children()[0].as_group().unwrap();
    assert_bound(inner.children()[1].bound(), 10.0, 10.0, 5.0, 5.0);
}

#[test]
fn test_group_translate_moves_every_child() {
    let mut group = two_box_group();
    group.translate(Vec2::new(3.0, 4.0));
    let children = group.as_group().unwrap().children();
    assert_bound(children[0].bound(), 3.0, 4.0, 10.0, 10.0);
    assert_bound(children[1].bound(), 23.0, 24.0, 10.0, 10.0);
}

#[test]
fn test_group_set_properties_resizes_whole_group() {
    let mut group = two_box_group();
    group.set_properties(&BoundPatch { x: Some(100.0), width: Some(60.0), ..Default::default() });
    assert_bound(group.bound(), 100.0, 0.0, 60.0, 30.0);
}

#[test]
fn test_group_hit_test_misses_gaps() {
    let group = two_box_group();
    assert!(group.hit_test(Pos2::new(5.0, 5.0)));
    assert!(group.hit_test(Pos2::new(25.0, 25.0)));
    assert!(!group.hit_test(Pos2::new(15.0, 15.0)));
}

#[test]
fn test_group_drawables_are_flattened() {
    let group = two_box_group();
    let drawables = group.to_drawables();
    assert_eq!(drawables.len(), 2);
    assert!(drawables.iter().all(|d| matches!(d, DrawableShape::Rectangle { .. })));
}

#[test]
fn test_drawable_serializes_with_type_tag() {
    let line = factory::create_line(id(1), Pos2::new(1.0, 2.0), Pos2::new(3.0, 4.0));
    let json = serde_json::to_value(&line.to_drawables()[0]).unwrap();
    assert_eq!(json["type"], "line");
    assert_eq!(json["x2"], 3.0);

    let rect = factory::create_rectangle(id(2), Bound::new(0.0, 0.0, 5.0, 5.0));
    let json = serde_json::to_value(&rect.to_drawables()[0]).unwrap();
    assert_eq!(json["type"], "rectangle");
    assert!(json["style"]["line_dash"].as_array().unwrap().is_empty());
}

#[test]
fn test_bound_patch_capture_only_takes_set_fields() {
    let bound = Bound::new(1.0, 2.0, 3.0, 4.0);
    let patch = BoundPatch { y: Some(10.0), width: Some(20.0), ..Default::default() };
    let captured = patch.capture(&bound);
    assert_eq!(captured, BoundPatch { y: Some(2.0), width: Some(3.0), ..Default::default() });
    assert_eq!(BoundPatch::from_bound(bound).capture(&bound), BoundPatch::from_bound(bound));
}
