use crate::geo::LatLng;
use crate::shapes::{ShapeId, ShapeKind};

/// Events a toolkit reports back to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolkitEvent {
    /// The drawing manager finished a shape
    OverlayComplete { shape: ShapeId, kind: ShapeKind },
    /// A vertex was inserted into a shape's path
    PathInsertAt { shape: ShapeId, index: usize },
    /// A vertex in a shape's path was moved
    PathSetAt { shape: ShapeId, index: usize },
    /// A shape drag finished
    DragEnd { shape: ShapeId },
    /// A shape was clicked, possibly on one of its vertices
    ShapeClick { shape: ShapeId, vertex: Option<usize> },
    /// Empty map was clicked
    MapClick { at: LatLng },
    /// The user switched drawing mode
    DrawingModeChanged { mode: Option<ShapeKind> },
}

/// Listener key: what happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    OverlayComplete,
    InsertAt,
    SetAt,
    DragEnd,
    Click,
    DrawingModeChanged,
}

/// Listener key: which object it happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    Map,
    DrawingManager,
    Shape(ShapeId),
    /// The vertex path of a shape
    Path(ShapeId),
}

impl ToolkitEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ToolkitEvent::OverlayComplete { .. } => EventKind::OverlayComplete,
            ToolkitEvent::PathInsertAt { .. } => EventKind::InsertAt,
            ToolkitEvent::PathSetAt { .. } => EventKind::SetAt,
            ToolkitEvent::DragEnd { .. } => EventKind::DragEnd,
            ToolkitEvent::ShapeClick { .. } | ToolkitEvent::MapClick { .. } => EventKind::Click,
            ToolkitEvent::DrawingModeChanged { .. } => EventKind::DrawingModeChanged,
        }
    }

    pub fn target(&self) -> ListenerTarget {
        match *self {
            ToolkitEvent::OverlayComplete { .. } | ToolkitEvent::DrawingModeChanged { .. } => {
                ListenerTarget::DrawingManager
            }
            ToolkitEvent::PathInsertAt { shape, .. } | ToolkitEvent::PathSetAt { shape, .. } => {
                ListenerTarget::Path(shape)
            }
            ToolkitEvent::DragEnd { shape } | ToolkitEvent::ShapeClick { shape, .. } => {
                ListenerTarget::Shape(shape)
            }
            ToolkitEvent::MapClick { .. } => ListenerTarget::Map,
        }
    }
}
