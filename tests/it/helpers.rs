//! Shared fixtures for controller tests.

use geoscii::bridge::BufferedChannel;
use geoscii::controller::AnnotationController;
use geoscii::geo::LatLng;
use geoscii::palette::{default_colors, Color};
use geoscii::shapes::{ShapeId, ShapeKind};
use geoscii::toolkit::{MapToolkit, Scene, ToolkitEvent};

pub type Controller = AnnotationController<Scene>;

pub fn controller() -> Controller {
    AnnotationController::new(Scene::new(), default_colors())
}

pub fn controller_with_channel() -> (Controller, BufferedChannel) {
    let channel = BufferedChannel::new();
    let controller = controller().with_channel(Box::new(channel.clone()));
    (controller, channel)
}

pub fn palette_color(index: usize) -> Color {
    default_colors()[index]
}

pub fn startup_triangle() -> Vec<LatLng> {
    vec![
        LatLng::new(34.70, 39.26),
        LatLng::new(34.71, 39.27),
        LatLng::new(34.72, 39.25),
    ]
}

pub fn square(origin: LatLng) -> Vec<LatLng> {
    vec![
        origin,
        origin.offset(0.0, 0.1),
        origin.offset(0.1, 0.1),
        origin.offset(0.1, 0.0),
    ]
}

/// Draw a shape through the scene the way pointer input would and
/// dispatch the resulting events. Returns the new shape.
pub fn draw(c: &mut Controller, kind: ShapeKind, points: &[LatLng]) -> ShapeId {
    let scene = c.toolkit_mut();
    scene.set_manager_attached(true);
    scene.set_drawing_mode(Some(kind));
    for point in points {
        scene.add_draft_point(*point);
    }
    if kind.auto_complete_points().is_none() {
        assert!(scene.finish_draft(), "draft should complete");
    }

    let mut created = None;
    while let Some(event) = c.toolkit_mut().poll_event() {
        if let ToolkitEvent::OverlayComplete { shape, .. } = event {
            created = Some(shape);
        }
        c.handle_event(event);
    }
    created.expect("overlay complete event")
}

/// Number of shapes currently marked editable
pub fn editable_count(c: &Controller) -> usize {
    c.toolkit().shapes().filter(|s| s.style.editable).count()
}
