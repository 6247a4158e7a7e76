//! The mapping/drawing toolkit seam.
//!
//! The controller never touches geometry itself: it calls `MapToolkit`
//! methods and reacts to the `ToolkitEvent`s the toolkit queues.

mod events;
mod scene;

pub use events::{EventKind, ListenerTarget, ToolkitEvent};
pub use scene::{Hit, Scene};

use crate::geo::LatLng;
use crate::palette::Color;
use crate::shapes::{ColorTarget, Shape, ShapeId, ShapeKind, ShapeStyle};

/// Surface of a map + drawing manager the controller drives
pub trait MapToolkit {
    /// Attach or detach the drawing manager from the map
    fn set_manager_attached(&mut self, attached: bool);

    fn manager_attached(&self) -> bool;

    /// Switch the drawing manager's mode; `None` stops drawing
    fn set_drawing_mode(&mut self, mode: Option<ShapeKind>);

    fn drawing_mode(&self) -> Option<ShapeKind>;

    /// Style options applied to shapes drawn from now on
    fn default_style(&self, kind: ShapeKind) -> ShapeStyle;

    fn set_default_style(&mut self, kind: ShapeKind, style: ShapeStyle);

    /// Build a detached shape
    fn create_shape(&mut self, kind: ShapeKind, path: Vec<LatLng>, style: ShapeStyle) -> ShapeId;

    fn shape(&self, id: ShapeId) -> Option<&Shape>;

    fn set_editable(&mut self, id: ShapeId, editable: bool);

    fn set_color(&mut self, id: ShapeId, target: ColorTarget, color: Color);

    /// Put the shape on the map or take it off
    fn set_attached(&mut self, id: ShapeId, attached: bool);

    /// Insert a vertex before `index`. Returns false if the shape has no
    /// free path or the index is out of range.
    fn insert_at(&mut self, id: ShapeId, index: usize, point: LatLng) -> bool;

    /// Move the vertex at `index`
    fn set_at(&mut self, id: ShapeId, index: usize, point: LatLng) -> bool;

    /// Remove the vertex at `index`, returning it
    fn remove_at(&mut self, id: ShapeId, index: usize) -> Option<LatLng>;

    /// Drop a shape for good; the id is unknown afterwards
    fn remove_shape(&mut self, id: ShapeId) -> Option<Shape>;

    /// Next queued event, oldest first
    fn poll_event(&mut self) -> Option<ToolkitEvent>;

    fn kind(&self, id: ShapeId) -> Option<ShapeKind> {
        self.shape(id).map(|s| s.kind)
    }

    fn color(&self, id: ShapeId, target: ColorTarget) -> Option<Color> {
        self.shape(id).and_then(|s| s.style.color(target))
    }

    fn is_editable(&self, id: ShapeId) -> bool {
        self.shape(id).is_some_and(|s| s.style.editable)
    }

    fn is_attached(&self, id: ShapeId) -> bool {
        self.shape(id).is_some_and(|s| s.attached)
    }

    fn path(&self, id: ShapeId) -> Option<&[LatLng]> {
        self.shape(id).map(|s| s.path.as_slice())
    }

    fn path_len(&self, id: ShapeId) -> usize {
        self.path(id).map_or(0, <[LatLng]>::len)
    }
}
