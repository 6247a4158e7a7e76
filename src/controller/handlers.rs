//! Listener table: which controller reaction runs for which toolkit event.

use std::collections::HashMap;

use crate::shapes::ShapeId;
use crate::toolkit::{EventKind, ListenerTarget};

/// Controller reactions a listener can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Run the drawing completion protocol
    CompleteOverlay,
    /// Recompute the coordinate list from this shape
    RecomputeCoordinates(ShapeId),
    /// Vertex click deletes the vertex; any click then selects the shape
    VertexDeleteOrSelect(ShapeId),
    /// Select whatever the current shape is
    SelectCurrent,
    ClearSelection,
}

/// Registered listeners keyed by event kind and target, in registration order
#[derive(Debug, Default)]
pub struct HandlerTable {
    rows: HashMap<(EventKind, ListenerTarget), Vec<Handler>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, target: ListenerTarget, kind: EventKind, handler: Handler) {
        self.rows.entry((kind, target)).or_default().push(handler);
    }

    /// Handlers to run for an event, in registration order
    pub fn handlers_for(&self, kind: EventKind, target: ListenerTarget) -> Vec<Handler> {
        self.rows.get(&(kind, target)).cloned().unwrap_or_default()
    }

    /// Drop every listener on a shape and its path
    pub fn remove_shape(&mut self, id: ShapeId) {
        self.rows.retain(|(_, target), _| {
            !matches!(target, ListenerTarget::Shape(s) | ListenerTarget::Path(s) if *s == id)
        });
    }

    /// Total number of registered listeners
    pub fn len(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
