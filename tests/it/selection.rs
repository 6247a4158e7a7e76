//! Selection, palette and vertex-deletion properties.

use geoscii::geo::LatLng;
use geoscii::palette::Border;
use geoscii::shapes::{ShapeId, ShapeKind};
use geoscii::toolkit::{MapToolkit, ToolkitEvent};
use proptest::prelude::*;

use crate::helpers::*;

#[test]
fn selecting_shape_makes_it_the_only_editable_one() {
    let mut c = controller();
    let a = draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(0.0, 0.0)));
    let b = draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(5.0, 5.0)));
    // b was selected on completion, a lost editability
    assert!(c.toolkit().is_editable(b));
    assert!(!c.toolkit().is_editable(a));

    c.set_selection(a);
    assert_eq!(editable_count(&c), 1);
    assert!(c.toolkit().is_editable(a));
    assert_eq!(c.selected(), Some(a));
    assert_eq!(c.current(), Some(a));
}

#[test]
fn selecting_color_highlights_exactly_one_button() {
    let mut c = controller();
    for i in 0..c.palette().len() {
        c.select_color(palette_color(i));
        let highlighted: Vec<usize> = c
            .palette()
            .iter()
            .enumerate()
            .filter(|(_, b)| b.border == Border::Highlighted)
            .map(|(idx, _)| idx)
            .collect();
        assert_eq!(highlighted, vec![i]);
    }
}

#[test]
fn deleting_vertex_of_triangle_removes_polygon() {
    let mut c = controller();
    let id = draw(
        &mut c,
        ShapeKind::Polygon,
        &[LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0), LatLng::new(1.0, 1.0)],
    );

    c.handle_event(ToolkitEvent::ShapeClick { shape: id, vertex: Some(1) });
    assert!(!c.toolkit().is_attached(id));
    assert_eq!(c.selected(), None);
    assert_eq!(c.current(), None);
    assert_eq!(c.label(), "Start Drawing");
}

#[test]
fn deleting_vertex_above_minimum_keeps_shape() {
    let mut c = controller();
    let id = draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(0.0, 0.0)));

    c.handle_event(ToolkitEvent::ShapeClick { shape: id, vertex: Some(0) });
    assert!(c.toolkit().is_attached(id));
    assert_eq!(c.toolkit().path_len(id), 3);
    assert_eq!(c.coordinates().len(), 3);
    assert_eq!(c.selected(), Some(id));
}

#[test]
fn deleting_vertex_of_two_point_polyline_removes_it() {
    let mut c = controller();
    let line = draw(
        &mut c,
        ShapeKind::Polyline,
        &[LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0)],
    );
    assert!(!c.delete_vertex(line, 0));
    assert!(!c.toolkit().is_attached(line));
}

#[test]
fn deleting_vertex_of_longer_polyline_keeps_it() {
    let mut c = controller();
    let line = draw(
        &mut c,
        ShapeKind::Polyline,
        &[LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0), LatLng::new(1.0, 1.0)],
    );
    assert!(c.delete_vertex(line, 2));
    assert!(c.toolkit().is_attached(line));
    assert_eq!(c.toolkit().path_len(line), 2);
}

#[test]
fn deleted_shape_leaves_no_dangling_selection() {
    let mut c = controller();
    let id = draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(0.0, 0.0)));
    c.delete_selected_shape();

    assert_eq!(c.selected(), None);
    assert!(!c.toolkit().is_attached(id));
    assert!(c.toolkit().shape(id).is_none());
    assert_eq!(c.toolkit().shapes().count(), 0);
    // recoloring afterwards has nothing to touch
    c.click_palette_button(3);
    assert_eq!(c.palette().active_index(), Some(3));
    // a second delete is a no-op
    c.delete_selected_shape();
}

#[test]
fn draw_delete_cycles_do_not_accumulate_shapes() {
    let mut c = controller();
    for i in 0..5 {
        draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(i as f64, 0.0)));
        c.delete_selected_shape();
    }
    draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(0.0, 0.0)));
    c.reset();
    assert_eq!(c.toolkit().shape_count(), 0);
}

#[derive(Debug, Clone)]
enum Op {
    Select(usize),
    Clear,
    MapClick,
    Palette(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..4usize).prop_map(Op::Select),
        Just(Op::Clear),
        Just(Op::MapClick),
        (0..5usize).prop_map(Op::Palette),
    ]
}

proptest! {
    #[test]
    fn at_most_one_shape_is_editable(ops in prop::collection::vec(op(), 1..40)) {
        let mut c = controller();
        let shapes: Vec<ShapeId> = (0..4)
            .map(|i| draw(&mut c, ShapeKind::Polygon, &square(LatLng::new(i as f64, 0.0))))
            .collect();

        for op in ops {
            match op {
                Op::Select(i) => {
                    c.set_selection(shapes[i]);
                    prop_assert_eq!(editable_count(&c), 1);
                    prop_assert!(c.toolkit().is_editable(shapes[i]));
                }
                Op::Clear => c.clear_selection(),
                Op::MapClick => c.handle_event(ToolkitEvent::MapClick { at: LatLng::new(80.0, 80.0) }),
                Op::Palette(i) => c.click_palette_button(i),
            }
            prop_assert!(editable_count(&c) <= 1);
            if let Some(selected) = c.selected() {
                prop_assert!(c.toolkit().is_editable(selected));
            }
        }
    }
}
