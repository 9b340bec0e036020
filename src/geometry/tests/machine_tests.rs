//! Tests for the kind-independent interaction machine.

use std::time::Duration;

use vecmark_display::{DisplayList, DrawCommand, HitArea, Point, Rect};

use crate::error::CoreError;
use crate::geometry::{Geometry, GeometryPalette, NudgeDirection, ShapeKind, Stage};
use crate::viewport::Viewport;

/// Create a display, a default viewport and a fresh geometry of `kind`.
fn create_geometry(kind: ShapeKind) -> (DisplayList, Viewport, Geometry) {
    let mut display = DisplayList::new();
    let viewport = Viewport::new(800.0, 600.0);
    let frame = display.create_node();
    let geometry = Geometry::new(
        kind,
        GeometryPalette::default(),
        Duration::ZERO,
        &mut display,
        &viewport,
        frame,
    );
    (display, viewport, geometry)
}

/// Draw a complete rectangle spanning `p0` to `p1`.
fn create_completed_rectangle(p0: Point, p1: Point) -> (DisplayList, Viewport, Geometry) {
    let (mut display, viewport, mut geometry) = create_geometry(ShapeKind::Rectangle);
    geometry.click(p0, &mut display, &viewport);
    geometry.pointer_up(p1, &mut display, &viewport);
    (display, viewport, geometry)
}

#[test]
fn test_new_geometry_starts_drawing() {
    let (_, _, geometry) = create_geometry(ShapeKind::Rectangle);

    assert_eq!(geometry.stage(), Stage::Drawing);
    assert!(geometry.points().is_empty());
    assert!(!geometry.is_selected());
}

#[test]
fn test_shape_kind_metadata() {
    assert_eq!(ShapeKind::Ellipse.to_string(), "ellipse");
    assert_eq!("polygon".parse::<ShapeKind>().ok(), Some(ShapeKind::Polygon));
    assert!(matches!(
        "blob".parse::<ShapeKind>(),
        Err(CoreError::UnknownShapeKind(kind)) if kind == "blob"
    ));

    assert_eq!(ShapeKind::Rectangle.point_cap(), Some(2));
    assert_eq!(ShapeKind::Polygon.point_cap(), None);
}

#[test]
fn test_first_click_arms_interaction() {
    let (mut display, viewport, mut geometry) = create_geometry(ShapeKind::Rectangle);

    geometry.click(Point::new(10.0, 10.0), &mut display, &viewport);

    // The hit area expands to the visible world so every later pointer
    // event reaches the shape while it is being drawn.
    assert!(display[geometry.node()].interactive());
    match display[geometry.node()].hit_area() {
        Some(HitArea::Rect(area)) => {
            assert_eq!(*area, Rect::new(-40.0, -40.0, 800.0, 600.0));
        }
        other => panic!("expected expanded rect hit area, got {other:?}"),
    }
}

#[test]
fn test_hover_select_drag_release_cycle() {
    let (mut display, viewport, mut geometry) =
        create_completed_rectangle(Point::new(10.0, 10.0), Point::new(110.0, 60.0));
    assert_eq!(geometry.stage(), Stage::Unselected);

    geometry.pointer_over(&mut display, &viewport);
    assert_eq!(geometry.stage(), Stage::Hover);

    geometry.click(Point::new(60.0, 35.0), &mut display, &viewport);
    assert_eq!(geometry.stage(), Stage::Selected);

    geometry.pointer_move(Point::new(85.0, 50.0), &mut display, &viewport);
    assert_eq!(geometry.stage(), Stage::Dragging);

    geometry.pointer_up(Point::new(85.0, 50.0), &mut display, &viewport);
    assert_eq!(geometry.stage(), Stage::Unselected);

    // The drag is disarmed on release: further moves never restart it.
    geometry.pointer_move(Point::new(300.0, 300.0), &mut display, &viewport);
    assert_eq!(geometry.stage(), Stage::Unselected);
}

#[test]
fn test_pointer_over_ignored_while_drawing() {
    let (mut display, viewport, mut geometry) = create_geometry(ShapeKind::Rectangle);
    geometry.click(Point::new(10.0, 10.0), &mut display, &viewport);

    geometry.pointer_over(&mut display, &viewport);
    assert_eq!(geometry.stage(), Stage::Drawing);
}

#[test]
fn test_pointer_out_returns_hover_to_unselected() {
    let (mut display, viewport, mut geometry) =
        create_completed_rectangle(Point::new(10.0, 10.0), Point::new(110.0, 60.0));

    geometry.pointer_over(&mut display, &viewport);
    geometry.pointer_out(&mut display, &viewport);
    assert_eq!(geometry.stage(), Stage::Unselected);
}

#[test]
fn test_click_while_unselected_stops_the_shape() {
    let (mut display, viewport, mut geometry) =
        create_completed_rectangle(Point::new(10.0, 10.0), Point::new(110.0, 60.0));

    // No hover first, so the stage is still Unselected. The click lands
    // clear of both corner handles.
    geometry.click(Point::new(60.0, 35.0), &mut display, &viewport);

    assert_eq!(geometry.stage(), Stage::Unselected);
    assert!(geometry.points().iter().all(|p| !p.visible()));
}

#[test]
fn test_double_click_enters_edit_mode() {
    let (mut display, viewport, mut geometry) =
        create_completed_rectangle(Point::new(10.0, 10.0), Point::new(110.0, 60.0));

    geometry.double_click(&mut display, &viewport);

    assert_eq!(geometry.stage(), Stage::Drawing);
    assert!(geometry.points().iter().all(|p| p.visible()));
}

#[test]
fn test_drag_translates_every_vertex_incrementally() {
    let (mut display, viewport, mut geometry) =
        create_completed_rectangle(Point::new(10.0, 10.0), Point::new(110.0, 60.0));

    geometry.pointer_over(&mut display, &viewport);
    geometry.click(Point::new(60.0, 35.0), &mut display, &viewport);
    geometry.pointer_move(Point::new(85.0, 50.0), &mut display, &viewport);

    let positions: Vec<Point> = geometry.points().iter().map(|p| p.position()).collect();
    assert_eq!(positions, vec![Point::new(35.0, 25.0), Point::new(135.0, 75.0)]);

    // The anchor advances each frame, so the second move applies only its
    // own delta.
    geometry.pointer_move(Point::new(95.0, 60.0), &mut display, &viewport);
    let positions: Vec<Point> = geometry.points().iter().map(|p| p.position()).collect();
    assert_eq!(positions, vec![Point::new(45.0, 35.0), Point::new(145.0, 85.0)]);
}

#[test]
fn test_group_drag_uses_given_anchor() {
    let (mut display, viewport, mut geometry) =
        create_completed_rectangle(Point::new(10.0, 10.0), Point::new(110.0, 60.0));

    geometry.begin_group_drag(Point::new(0.0, 0.0));
    geometry.dynamic_move(Point::new(5.0, 7.0), &mut display, &viewport);

    let positions: Vec<Point> = geometry.points().iter().map(|p| p.position()).collect();
    assert_eq!(positions, vec![Point::new(15.0, 17.0), Point::new(115.0, 67.0)]);
}

#[test]
fn test_nudge_steps_one_screen_pixel() {
    let (mut display, mut viewport, mut geometry) =
        create_completed_rectangle(Point::new(10.0, 10.0), Point::new(110.0, 60.0));
    viewport.set_zoom(2.0);

    geometry.nudge(NudgeDirection::Right, &mut display, &viewport);

    // One screen pixel is half a world unit at 2x zoom.
    let positions: Vec<Point> = geometry.points().iter().map(|p| p.position()).collect();
    assert_eq!(positions, vec![Point::new(10.5, 10.0), Point::new(110.5, 60.0)]);
}

#[test]
fn test_change_notification_settles_once_per_burst() {
    let (mut display, viewport, mut geometry) =
        create_completed_rectangle(Point::new(10.0, 10.0), Point::new(110.0, 60.0));

    // Completing the shape marked a change; the zero delay settles it on
    // the first poll and only there.
    assert!(geometry.poll_change());
    assert!(!geometry.poll_change());

    geometry.begin_group_drag(Point::ZERO);
    geometry.dynamic_move(Point::new(1.0, 0.0), &mut display, &viewport);
    assert!(geometry.poll_change());
}

#[test]
fn test_edit_mode_release_without_new_point_is_silent() {
    let (mut display, viewport, mut geometry) =
        create_completed_rectangle(Point::new(10.0, 10.0), Point::new(110.0, 60.0));
    assert!(geometry.poll_change());

    // Re-entering edit mode and releasing adds no vertex (the cap is
    // reached), so no change may be scheduled.
    geometry.double_click(&mut display, &viewport);
    geometry.pointer_up(Point::new(50.0, 50.0), &mut display, &viewport);

    assert_eq!(geometry.points().len(), 2);
    assert!(!geometry.poll_change());
}

#[test]
fn test_refresh_zoom_redraws_pending_preview() {
    let (mut display, mut viewport, mut geometry) = create_geometry(ShapeKind::Rectangle);
    geometry.click(Point::new(10.0, 10.0), &mut display, &viewport);
    geometry.pointer_move(Point::new(50.0, 50.0), &mut display, &viewport);

    viewport.set_zoom(2.0);
    geometry.refresh_zoom(&mut display, &viewport);

    // The preview is redrawn at the remembered cursor with the stroke
    // width rescaled to the new zoom.
    let commands = display[geometry.node()].graphics().commands();
    match commands {
        [DrawCommand::Rect { rect, style }] => {
            assert_eq!(*rect, Rect::new(10.0, 10.0, 40.0, 40.0));
            assert_eq!(style.line.map(|line| line.width), Some(1.0));
        }
        other => panic!("expected a single rect preview, got {other:?}"),
    }
}

#[test]
fn test_projection_lists_control_points_in_order() {
    let (_, _, geometry) =
        create_completed_rectangle(Point::new(10.0, 10.0), Point::new(110.0, 60.0));

    let projection = geometry.project();
    assert_eq!(projection.id, geometry.id());
    assert_eq!(projection.kind, ShapeKind::Rectangle);
    assert_eq!(projection.color, "#0384fc");
    assert_eq!(projection.points, vec![[10.0, 10.0], [110.0, 60.0]]);
}
