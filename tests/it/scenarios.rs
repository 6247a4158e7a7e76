//! End-to-end controller workflows.

use geoscii::bridge::HostMessage;
use geoscii::controller::Mode;
use geoscii::geo::LatLng;
use geoscii::shapes::{ColorTarget, ShapeKind};
use geoscii::toolkit::{MapToolkit, ToolkitEvent};

use crate::helpers::*;

#[test]
fn load_without_coordinates_then_submit_starts_drawing() {
    let mut c = controller();
    c.start(&[]);
    assert_eq!(c.label(), "Start Drawing");
    assert!(!c.toolkit().manager_attached());

    c.submit().unwrap();
    assert!(c.toolkit().manager_attached());
    assert_eq!(c.toolkit().drawing_mode(), Some(ShapeKind::Polygon));
    assert_eq!(c.label(), "Start Drawing");
}

#[test]
fn completing_a_polygon_selects_it_and_switches_to_save() {
    let mut c = controller();
    c.start(&[]);
    c.submit().unwrap();

    let id = draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(34.0, 39.0)));

    assert_eq!(c.label(), "Save");
    assert_eq!(c.mode(), Mode::Edit);
    assert_eq!(c.selected(), Some(id));
    assert_eq!(c.current(), Some(id));
    assert!(c.toolkit().is_editable(id));
    assert!(!c.toolkit().manager_attached());
    assert_eq!(c.toolkit().drawing_mode(), None);
    assert_eq!(c.coordinates(), square(LatLng::new(34.0, 39.0)).as_slice());
}

#[test]
fn load_with_coordinates_builds_current_polygon() {
    let mut c = controller();
    c.start(&startup_triangle());

    let id = c.current().expect("current shape");
    let shape = c.toolkit().shape(id).unwrap();
    assert_eq!(shape.kind, ShapeKind::Polygon);
    assert_eq!(shape.path, startup_triangle());
    assert!(shape.attached);
    assert_eq!(shape.style.fill_color, Some(palette_color(0)));
    assert_eq!(shape.style.stroke_color, Some(palette_color(0)));

    assert_eq!(c.selected(), None);
    assert_eq!(c.label(), "Save");
    assert_eq!(c.toolkit().drawing_mode(), None);
    assert!(!c.toolkit().manager_attached());
    assert_eq!(c.coordinates(), startup_triangle().as_slice());
}

#[test]
fn clicking_the_startup_shape_selects_it() {
    let mut c = controller();
    c.start(&startup_triangle());
    let id = c.current().unwrap();

    c.handle_event(ToolkitEvent::ShapeClick { shape: id, vertex: None });
    assert_eq!(c.selected(), Some(id));
    assert!(c.toolkit().is_editable(id));

    // the startup shape has no vertex-deletion listener
    c.handle_event(ToolkitEvent::ShapeClick { shape: id, vertex: Some(0) });
    assert_eq!(c.toolkit().path_len(id), 3);
}

#[test]
fn reset_returns_to_create() {
    let mut c = controller();
    c.start(&[]);
    c.submit().unwrap();
    let id = draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(10.0, 10.0)));
    assert_eq!(c.label(), "Save");

    c.reset();
    assert_eq!(c.label(), "Start Drawing");
    assert_eq!(c.selected(), None);
    assert_eq!(c.current(), None);
    assert!(!c.toolkit().is_attached(id));
    assert!(!c.toolkit().manager_attached());
    assert!(c.coordinates().is_empty());

    // submit after reset starts drawing again instead of saving
    c.submit().unwrap();
    assert!(c.toolkit().manager_attached());
}

#[test]
fn palette_click_recolors_selected_polygon_fill() {
    let mut c = controller();
    c.start(&startup_triangle());
    let id = c.current().unwrap();
    c.set_selection(id);

    c.click_palette_button(2);
    assert_eq!(c.toolkit().color(id, ColorTarget::Fill), Some(palette_color(2)));
    assert_eq!(c.toolkit().color(id, ColorTarget::Stroke), Some(palette_color(0)));
    assert_eq!(c.palette().active_index(), Some(2));
}

#[test]
fn palette_click_recolors_selected_line_stroke() {
    let mut c = controller();
    let line = draw(
        &mut c,
        ShapeKind::Polyline,
        &[LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0), LatLng::new(1.0, 1.0)],
    );
    c.set_selection(line);

    c.click_palette_button(4);
    assert_eq!(c.toolkit().color(line, ColorTarget::Stroke), Some(palette_color(4)));
    assert_eq!(c.toolkit().color(line, ColorTarget::Fill), None);
    assert_eq!(c.palette().active_index(), Some(4));
}

#[test]
fn selecting_a_shape_pulls_palette_to_its_color() {
    let mut c = controller();
    c.click_palette_button(3);
    let id = draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(0.0, 0.0)));
    assert_eq!(c.toolkit().color(id, ColorTarget::Fill), Some(palette_color(3)));

    c.click_palette_button(1);
    c.clear_selection();
    c.set_selection(id);
    assert_eq!(c.palette().active_index(), Some(1));
    assert_eq!(c.selected_color(), Some(palette_color(1)));
}

#[test]
fn path_edits_recompute_coordinates() {
    let mut c = controller();
    let id = draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(0.0, 0.0)));

    let moved = LatLng::new(-0.05, -0.05);
    c.toolkit_mut().drag_vertex(id, 0, moved);
    c.pump();
    assert_eq!(c.coordinates()[0], moved);

    assert!(c.toolkit_mut().insert_midpoint(id, 0));
    c.pump();
    assert_eq!(c.coordinates().len(), 5);

    c.toolkit_mut().drag_body(id, 1.0, 0.0);
    c.toolkit_mut().end_drag(id);
    c.pump();
    assert_eq!(c.coordinates()[0], moved.offset(1.0, 0.0));
}

#[test]
fn map_click_and_mode_change_clear_selection() {
    let mut c = controller();
    let id = draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(0.0, 0.0)));
    assert_eq!(c.selected(), Some(id));

    c.handle_event(ToolkitEvent::MapClick { at: LatLng::new(50.0, 50.0) });
    assert_eq!(c.selected(), None);
    assert!(!c.toolkit().is_editable(id));

    c.set_selection(id);
    c.toolkit_mut().choose_drawing_mode(Some(ShapeKind::Marker));
    c.pump();
    assert_eq!(c.selected(), None);
    // the shape stays current, so submit still means save
    assert_eq!(c.current(), Some(id));
}

#[test]
fn non_polygon_completion_keeps_drawing_mode() {
    let mut c = controller();
    let marker = draw(&mut c, ShapeKind::Marker, &[LatLng::new(1.0, 1.0)]);

    assert_eq!(c.label(), "Save");
    assert_eq!(c.current(), Some(marker));
    assert_eq!(c.selected(), None);
    assert_eq!(c.toolkit().drawing_mode(), Some(ShapeKind::Marker));
    assert!(!c.toolkit().manager_attached());
    assert_eq!(c.coordinates(), &[LatLng::new(1.0, 1.0)]);
}

#[test]
fn rectangle_coordinates_are_its_corners() {
    let mut c = controller();
    draw(
        &mut c,
        ShapeKind::Rectangle,
        &[LatLng::new(0.0, 0.0), LatLng::new(1.0, 2.0)],
    );
    assert_eq!(c.coordinates().len(), 4);
    assert!(c.coordinates().contains(&LatLng::new(0.0, 2.0)));
}

#[test]
fn save_posts_current_coordinates() {
    let (mut c, channel) = controller_with_channel();
    c.start(&startup_triangle());
    let id = c.current().unwrap();
    c.toolkit_mut().drag_vertex(id, 1, LatLng::new(34.75, 39.30));
    c.pump();

    c.submit().unwrap();
    let messages = channel.messages();
    let posted = messages.borrow();
    assert_eq!(posted.len(), 1);

    let msg: HostMessage = serde_json::from_str(&posted[0]).unwrap();
    assert_eq!(msg.event, "polygonCreated");
    assert_eq!(
        msg.coordinates,
        vec![
            LatLng::new(34.70, 39.26),
            LatLng::new(34.75, 39.30),
            LatLng::new(34.72, 39.25),
        ]
    );
    assert!(c.take_alerts().is_empty());
}

#[test]
fn selecting_another_shape_switches_the_payload() {
    let (mut c, channel) = controller_with_channel();
    let a = draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(0.0, 0.0)));
    let b = draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(5.0, 5.0)));
    assert_eq!(c.current(), Some(b));

    c.handle_event(ToolkitEvent::ShapeClick { shape: a, vertex: None });
    assert_eq!(c.current(), Some(a));
    assert_eq!(c.coordinates(), square(LatLng::new(0.0, 0.0)).as_slice());

    c.submit().unwrap();
    let messages = channel.messages();
    let posted = messages.borrow();
    let msg: HostMessage = serde_json::from_str(&posted[0]).unwrap();
    assert_eq!(msg.coordinates, square(LatLng::new(0.0, 0.0)));
}

#[test]
fn editing_another_shape_leaves_the_payload_alone() {
    let mut c = controller();
    let a = draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(0.0, 0.0)));
    let b = draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(5.0, 5.0)));
    assert_eq!(c.current(), Some(b));

    c.toolkit_mut().drag_body(a, 1.0, 1.0);
    c.toolkit_mut().end_drag(a);
    c.pump();
    c.handle_event(ToolkitEvent::PathSetAt { shape: a, index: 0 });
    assert_eq!(c.coordinates(), square(LatLng::new(5.0, 5.0)).as_slice());
}

#[test]
fn save_without_channel_raises_alert() {
    let mut c = controller();
    c.start(&startup_triangle());
    assert!(c.submit().is_err());
    assert_eq!(c.take_alerts().len(), 1);
    // still in edit mode, the shape is kept
    assert_eq!(c.label(), "Save");
    assert!(c.current().is_some());
}
