//! Tests for ellipse drawing and its center/extent conventions.

use std::time::Duration;

use vecmark_display::{DisplayList, DrawCommand, HitArea, Point};

use crate::geometry::{Geometry, GeometryPalette, ShapeKind, Stage};
use crate::viewport::Viewport;

fn create_ellipse() -> (DisplayList, Viewport, Geometry) {
    let mut display = DisplayList::new();
    let viewport = Viewport::new(800.0, 600.0);
    let frame = display.create_node();
    let geometry = Geometry::new(
        ShapeKind::Ellipse,
        GeometryPalette::default(),
        Duration::ZERO,
        &mut display,
        &viewport,
        frame,
    );
    (display, viewport, geometry)
}

fn body_ellipse(display: &DisplayList, geometry: &Geometry) -> (Point, f32, f32) {
    match display[geometry.node()].graphics().commands() {
        [DrawCommand::Ellipse {
            center,
            radius_x,
            radius_y,
            ..
        }] => (*center, *radius_x, *radius_y),
        other => panic!("expected a single ellipse command, got {other:?}"),
    }
}

#[test]
fn test_handles_stay_hidden_while_placing() {
    let (mut display, viewport, mut geometry) = create_ellipse();

    geometry.click(Point::new(100.0, 100.0), &mut display, &viewport);

    assert_eq!(geometry.stage(), Stage::Drawing);
    assert_eq!(geometry.points().len(), 1);
    assert!(!geometry.points()[0].visible());
}

#[test]
fn test_completed_ellipse_centers_on_second_point() {
    let (mut display, viewport, mut geometry) = create_ellipse();

    geometry.click(Point::new(100.0, 100.0), &mut display, &viewport);
    geometry.pointer_up(Point::new(160.0, 140.0), &mut display, &viewport);

    assert_eq!(geometry.stage(), Stage::Unselected);
    let (center, radius_x, radius_y) = body_ellipse(&display, &geometry);
    assert_eq!(center, Point::new(160.0, 140.0));
    assert_eq!(radius_x, 60.0);
    assert_eq!(radius_y, 40.0);

    // The hit area uses the same convention as the pixels.
    assert!(geometry.contains(Point::new(160.0, 140.0), &display));
    assert!(geometry.contains(Point::new(210.0, 140.0), &display));
    assert!(!geometry.contains(Point::new(221.0, 140.0), &display));
    // The first click sits on the rim's bounding corner, outside the
    // ellipse itself.
    assert!(!geometry.contains(Point::new(100.0, 100.0), &display));
}

#[test]
fn test_static_draw_keeps_hit_area_in_lockstep() {
    let (mut display, viewport, mut geometry) = create_ellipse();
    geometry.click(Point::new(100.0, 100.0), &mut display, &viewport);
    geometry.pointer_up(Point::new(160.0, 140.0), &mut display, &viewport);

    match display[geometry.node()].hit_area() {
        Some(HitArea::Ellipse {
            center,
            radius_x,
            radius_y,
        }) => {
            assert_eq!(*center, Point::new(160.0, 140.0));
            assert_eq!(*radius_x, 60.0);
            assert_eq!(*radius_y, 40.0);
        }
        other => panic!("expected ellipse hit area, got {other:?}"),
    }
}

#[test]
fn test_dynamic_preview_tracks_cursor_as_center() {
    let (mut display, viewport, mut geometry) = create_ellipse();

    geometry.click(Point::new(100.0, 100.0), &mut display, &viewport);
    geometry.pointer_move(Point::new(150.0, 130.0), &mut display, &viewport);

    let (center, radius_x, radius_y) = body_ellipse(&display, &geometry);
    assert_eq!(center, Point::new(150.0, 130.0));
    assert_eq!(radius_x, 50.0);
    assert_eq!(radius_y, 30.0);
}

#[test]
fn test_equilateral_affects_only_the_preview() {
    let (mut display, viewport, mut geometry) = create_ellipse();
    geometry.set_equilateral(true);

    geometry.click(Point::new(100.0, 100.0), &mut display, &viewport);
    geometry.pointer_move(Point::new(140.0, 110.0), &mut display, &viewport);
    let (_, radius_x, radius_y) = body_ellipse(&display, &geometry);
    assert_eq!((radius_x, radius_y), (40.0, 40.0));

    // On release the stored vertices win; the vertical half-extent is not
    // forced to match.
    geometry.pointer_up(Point::new(140.0, 110.0), &mut display, &viewport);
    let (center, radius_x, radius_y) = body_ellipse(&display, &geometry);
    assert_eq!(center, Point::new(140.0, 110.0));
    assert_eq!((radius_x, radius_y), (40.0, 10.0));
}
