//! Tests for scene-level pointer routing.

use vecmark_display::{Point, PointerEvent};

use crate::geometry::{ShapeKind, Stage};
use crate::scene::tests::create_scene;

#[test]
fn test_draw_rectangle_through_scene() {
    let mut fixture = create_scene();

    let id = fixture.draw_rectangle(Point::new(100.0, 100.0), Point::new(200.0, 180.0));

    assert_eq!(
        fixture.shape_points(id),
        vec![Point::new(100.0, 100.0), Point::new(200.0, 180.0)]
    );
    assert_eq!(fixture.shape_stage(id), Some(Stage::Unselected));
    assert_eq!(fixture.scene.current_layer(), Some(id));
    assert_eq!(fixture.scene.current_edited_layer(), Some(id));
    assert_eq!(fixture.scene.store().root_children(), &[id]);
    let layer = fixture.scene.store().get(id).expect("layer exists");
    assert_eq!(layer.name(), "Layer 0");
}

#[test]
fn test_add_shape_with_start_event_places_first_vertex() {
    let mut fixture = create_scene();

    let id = fixture
        .scene
        .add_shape(
            ShapeKind::Rectangle,
            Some(PointerEvent::at(Point::new(150.0, 120.0))),
            &mut fixture.display,
            &fixture.viewport,
            &mut fixture.hooks,
        )
        .expect("append was not prevented");

    assert_eq!(fixture.shape_points(id), vec![Point::new(150.0, 120.0)]);
    assert_eq!(fixture.shape_stage(id), Some(Stage::Drawing));
    assert_eq!(fixture.scene.current_edited_layer(), Some(id));
    assert_eq!(fixture.scene.current_layer(), None);

    // The next press-release pair finishes the rectangle.
    fixture.pointer_down(Point::new(260.0, 200.0));
    fixture.pointer_up(Point::new(260.0, 200.0));

    assert_eq!(
        fixture.shape_points(id),
        vec![Point::new(150.0, 120.0), Point::new(260.0, 200.0)]
    );
    assert_eq!(fixture.shape_stage(id), Some(Stage::Unselected));
}

#[test]
fn test_press_routes_to_topmost_shape() {
    let mut fixture = create_scene();
    let lower = fixture.draw_rectangle(Point::new(100.0, 100.0), Point::new(200.0, 180.0));
    let upper = fixture.draw_rectangle(Point::new(150.0, 140.0), Point::new(250.0, 220.0));
    fixture.scene.set_current_layer(None);
    fixture.scene.set_current_edited_layer(None);

    // Both rectangles cover this point; insertion order decides.
    fixture.pointer_down(Point::new(160.0, 150.0));

    assert_eq!(fixture.scene.current_layer(), Some(upper));
    assert_ne!(fixture.scene.current_layer(), Some(lower));
    fixture.pointer_up(Point::new(160.0, 150.0));
}

#[test]
fn test_hover_enter_and_leave() {
    let mut fixture = create_scene();
    let id = fixture.draw_rectangle(Point::new(100.0, 100.0), Point::new(200.0, 180.0));
    fixture.scene.set_current_layer(None);
    fixture.scene.set_current_edited_layer(None);

    // The pointer finished the draw inside the shape, so leave first to get
    // a fresh enter transition.
    fixture.pointer_move(Point::new(400.0, 400.0));
    fixture.pointer_move(Point::new(150.0, 140.0));
    assert_eq!(fixture.shape_stage(id), Some(Stage::Hover));

    fixture.pointer_move(Point::new(400.0, 400.0));
    assert_eq!(fixture.shape_stage(id), Some(Stage::Unselected));
}

#[test]
fn test_shape_drag_through_scene_clears_focus() {
    let mut fixture = create_scene();
    let id = fixture.draw_rectangle(Point::new(100.0, 100.0), Point::new(200.0, 180.0));

    fixture.pointer_move(Point::new(400.0, 400.0));
    fixture.pointer_move(Point::new(150.0, 140.0));
    fixture.pointer_down(Point::new(150.0, 140.0));
    assert_eq!(fixture.shape_stage(id), Some(Stage::Selected));

    fixture.pointer_move(Point::new(170.0, 160.0));
    assert_eq!(fixture.shape_stage(id), Some(Stage::Dragging));
    assert_eq!(
        fixture.shape_points(id),
        vec![Point::new(120.0, 120.0), Point::new(220.0, 200.0)]
    );

    // Releasing a drag drops focus entirely.
    fixture.pointer_up(Point::new(170.0, 160.0));
    assert_eq!(fixture.shape_stage(id), Some(Stage::Unselected));
    assert_eq!(fixture.scene.current_layer(), None);
    assert_eq!(fixture.scene.current_edited_layer(), None);
}

#[test]
fn test_navigation_mode_swallows_presses() {
    let mut fixture = create_scene();
    let id = fixture.draw_rectangle(Point::new(100.0, 100.0), Point::new(200.0, 180.0));
    fixture.scene.set_current_layer(None);
    fixture.scene.set_current_edited_layer(None);
    fixture
        .scene
        .set_can_navigate(true, &mut fixture.viewport);

    fixture.pointer_down(Point::new(150.0, 140.0));
    assert_eq!(fixture.scene.current_layer(), None);
    assert!(!fixture.range.is_active());

    // Hover synthesis pauses as well while the canvas pans.
    fixture.pointer_move(Point::new(150.0, 140.0));
    assert_eq!(fixture.shape_stage(id), Some(Stage::Unselected));
}

#[test]
fn test_pointer_down_on_empty_canvas_starts_range() {
    let mut fixture = create_scene();

    fixture.pointer_down(Point::new(300.0, 300.0));
    assert!(fixture.range.is_active());

    fixture.pointer_up(Point::new(300.0, 300.0));
    assert!(!fixture.range.is_active());
}

#[test]
fn test_pointer_out_ends_range_selection() {
    let mut fixture = create_scene();
    fixture.pointer_down(Point::new(300.0, 300.0));
    fixture.pointer_move(Point::new(380.0, 360.0));
    assert!(fixture.range.is_active());

    fixture.pointer_out(Point::new(380.0, 360.0));

    assert!(!fixture.range.is_active());
    let band = fixture.range.band_node();
    assert!(fixture.display[band].graphics().is_empty());
}
