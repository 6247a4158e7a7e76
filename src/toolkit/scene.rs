//! In-memory toolkit: keeps the shapes, the drawing manager state and an
//! event queue. The terminal front end feeds it pointer input; the
//! controller reads its events.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, trace};

use super::{MapToolkit, ToolkitEvent};
use crate::geo::LatLng;
use crate::palette::Color;
use crate::shapes::{ColorTarget, Shape, ShapeId, ShapeKind, ShapeStyle};

/// What a pointer press landed on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    /// A vertex handle of an editable shape
    Vertex { shape: ShapeId, index: usize },
    /// The body of a shape
    Body { shape: ShapeId },
}

impl Hit {
    pub fn shape(&self) -> ShapeId {
        match *self {
            Hit::Vertex { shape, .. } | Hit::Body { shape } => shape,
        }
    }
}

/// Shapes, drawing manager and pending events
#[derive(Debug)]
pub struct Scene {
    shapes: HashMap<ShapeId, Shape>,
    /// Creation order, bottom to top
    order: Vec<ShapeId>,
    manager_attached: bool,
    drawing_mode: Option<ShapeKind>,
    defaults: HashMap<ShapeKind, ShapeStyle>,
    /// Control points of the shape being drawn
    draft: Vec<LatLng>,
    events: VecDeque<ToolkitEvent>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            shapes: HashMap::new(),
            order: Vec::new(),
            manager_attached: false,
            drawing_mode: None,
            defaults: ShapeKind::ALL
                .iter()
                .map(|&kind| (kind, ShapeStyle::for_kind(kind)))
                .collect(),
            draft: Vec::new(),
            events: VecDeque::new(),
        }
    }

    /// Attached shapes, bottom to top
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.order
            .iter()
            .filter_map(|id| self.shapes.get(id))
            .filter(|s| s.attached)
    }

    /// Shapes held, attached or not
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Control points placed so far for the shape being drawn
    pub fn draft(&self) -> &[LatLng] {
        &self.draft
    }

    /// True when pointer input draws instead of selecting
    pub fn is_drawing(&self) -> bool {
        self.manager_attached && self.drawing_mode.is_some()
    }

    /// User picked a drawing mode: switch and report it
    pub fn choose_drawing_mode(&mut self, mode: Option<ShapeKind>) {
        self.set_drawing_mode(mode);
        self.events.push_back(ToolkitEvent::DrawingModeChanged { mode });
    }

    /// Pointer click at `at`. Adds a draft point while drawing, otherwise
    /// reports a shape or map click.
    pub fn click(&mut self, at: LatLng, tolerance: f64) {
        if self.is_drawing() {
            self.add_draft_point(at);
            return;
        }

        let event = match self.hit_test(at, tolerance) {
            Some(Hit::Vertex { shape, index }) => ToolkitEvent::ShapeClick {
                shape,
                vertex: Some(index),
            },
            Some(Hit::Body { shape }) => ToolkitEvent::ShapeClick { shape, vertex: None },
            None => ToolkitEvent::MapClick { at },
        };
        trace!(?event, "click");
        self.events.push_back(event);
    }

    /// Place a control point; kinds with a fixed point count complete on their own
    pub fn add_draft_point(&mut self, at: LatLng) {
        let Some(kind) = self.drawing_mode else {
            return;
        };
        self.draft.push(at);
        if kind
            .auto_complete_points()
            .is_some_and(|needed| self.draft.len() >= needed)
        {
            self.finish_draft();
        }
    }

    /// Complete the shape being drawn. Returns false if there aren't enough points.
    pub fn finish_draft(&mut self) -> bool {
        let Some(kind) = self.drawing_mode else {
            return false;
        };
        let needed = kind
            .min_vertices()
            .or(kind.auto_complete_points())
            .unwrap_or(1);
        if self.draft.len() < needed {
            return false;
        }

        let path = std::mem::take(&mut self.draft);
        let style = self.default_style(kind);
        let id = self.create_shape(kind, path, style);
        self.set_attached(id, true);
        debug!(%id, %kind, "overlay complete");
        self.events
            .push_back(ToolkitEvent::OverlayComplete { shape: id, kind });
        true
    }

    /// Drop the shape being drawn
    pub fn cancel_draft(&mut self) {
        self.draft.clear();
    }

    /// Topmost shape part under `at`. Vertex handles of editable shapes win
    /// over bodies.
    pub fn hit_test(&self, at: LatLng, tolerance: f64) -> Option<Hit> {
        let attached: Vec<&Shape> = self.shapes().collect();

        for shape in attached.iter().rev() {
            if !shape.style.editable || !has_vertex_handles(shape.kind) {
                continue;
            }
            if let Some(index) = shape
                .path
                .iter()
                .position(|p| p.degree_distance(at) <= tolerance)
            {
                return Some(Hit::Vertex {
                    shape: shape.id,
                    index,
                });
            }
        }

        attached
            .iter()
            .rev()
            .find(|shape| body_contains(shape, at, tolerance))
            .map(|shape| Hit::Body { shape: shape.id })
    }

    /// Move a vertex as part of a drag and report it
    pub fn drag_vertex(&mut self, id: ShapeId, index: usize, to: LatLng) {
        if self.is_editable(id) && self.set_at(id, index, to) {
            self.events
                .push_back(ToolkitEvent::PathSetAt { shape: id, index });
        }
    }

    /// Translate a draggable shape. The drag-end event comes from `end_drag`.
    pub fn drag_body(&mut self, id: ShapeId, dlat: f64, dlng: f64) {
        if let Some(shape) = self.shapes.get_mut(&id).filter(|s| s.style.draggable) {
            for point in &mut shape.path {
                *point = point.offset(dlat, dlng);
            }
        }
    }

    pub fn end_drag(&mut self, id: ShapeId) {
        if self.shapes.contains_key(&id) {
            self.events.push_back(ToolkitEvent::DragEnd { shape: id });
        }
    }

    /// Split the edge after vertex `index` at its midpoint and report the insert
    pub fn insert_midpoint(&mut self, id: ShapeId, index: usize) -> bool {
        let Some(shape) = self.shapes.get(&id) else {
            return false;
        };
        if !shape.style.editable || !shape.kind.has_path() || index >= shape.path.len() {
            return false;
        }
        let next = match shape.kind {
            ShapeKind::Polygon => (index + 1) % shape.path.len(),
            _ if index + 1 < shape.path.len() => index + 1,
            _ => return false,
        };
        let mid = shape.path[index].midpoint(shape.path[next]);
        if self.insert_at(id, index + 1, mid) {
            self.events.push_back(ToolkitEvent::PathInsertAt {
                shape: id,
                index: index + 1,
            });
            true
        } else {
            false
        }
    }
}

fn has_vertex_handles(kind: ShapeKind) -> bool {
    kind.has_path() || kind == ShapeKind::Rectangle
}

fn body_contains(shape: &Shape, at: LatLng, tolerance: f64) -> bool {
    match (shape.kind, shape.path.as_slice()) {
        (ShapeKind::Polygon, path) if path.len() >= 3 => point_in_polygon(at, path),
        (ShapeKind::Rectangle, [a, b]) => {
            let (lat_lo, lat_hi) = (a.lat.min(b.lat), a.lat.max(b.lat));
            let (lng_lo, lng_hi) = (a.lng.min(b.lng), a.lng.max(b.lng));
            (lat_lo..=lat_hi).contains(&at.lat) && (lng_lo..=lng_hi).contains(&at.lng)
        }
        (ShapeKind::Circle, [center, rim]) => {
            center.degree_distance(at) <= center.degree_distance(*rim).max(tolerance)
        }
        (ShapeKind::Marker, [pos]) => pos.degree_distance(at) <= tolerance,
        (_, path) => path
            .windows(2)
            .any(|seg| segment_distance(at, seg[0], seg[1]) <= tolerance),
    }
}

/// Even-odd ray cast in degree space
fn point_in_polygon(at: LatLng, path: &[LatLng]) -> bool {
    let mut inside = false;
    let mut j = path.len() - 1;
    for i in 0..path.len() {
        let (pi, pj) = (path[i], path[j]);
        if (pi.lat > at.lat) != (pj.lat > at.lat)
            && at.lng < (pj.lng - pi.lng) * (at.lat - pi.lat) / (pj.lat - pi.lat) + pi.lng
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn segment_distance(at: LatLng, a: LatLng, b: LatLng) -> f64 {
    let (dx, dy) = (b.lng - a.lng, b.lat - a.lat);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return at.degree_distance(a);
    }
    let t = (((at.lng - a.lng) * dx + (at.lat - a.lat) * dy) / len_sq).clamp(0.0, 1.0);
    at.degree_distance(LatLng::new(a.lat + t * dy, a.lng + t * dx))
}

impl MapToolkit for Scene {
    fn set_manager_attached(&mut self, attached: bool) {
        self.manager_attached = attached;
        if !attached {
            self.draft.clear();
        }
    }

    fn manager_attached(&self) -> bool {
        self.manager_attached
    }

    fn set_drawing_mode(&mut self, mode: Option<ShapeKind>) {
        if self.drawing_mode != mode {
            self.draft.clear();
        }
        self.drawing_mode = mode;
    }

    fn drawing_mode(&self) -> Option<ShapeKind> {
        self.drawing_mode
    }

    fn default_style(&self, kind: ShapeKind) -> ShapeStyle {
        self.defaults
            .get(&kind)
            .copied()
            .unwrap_or_else(|| ShapeStyle::for_kind(kind))
    }

    fn set_default_style(&mut self, kind: ShapeKind, style: ShapeStyle) {
        self.defaults.insert(kind, style);
    }

    fn create_shape(&mut self, kind: ShapeKind, path: Vec<LatLng>, style: ShapeStyle) -> ShapeId {
        let shape = Shape::new(kind, path, style);
        let id = shape.id;
        self.order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    fn set_editable(&mut self, id: ShapeId, editable: bool) {
        if let Some(shape) = self.shapes.get_mut(&id) {
            shape.style.editable = editable;
        }
    }

    fn set_color(&mut self, id: ShapeId, target: ColorTarget, color: Color) {
        if let Some(shape) = self.shapes.get_mut(&id) {
            shape.style.set_color(target, color);
        }
    }

    fn set_attached(&mut self, id: ShapeId, attached: bool) {
        if let Some(shape) = self.shapes.get_mut(&id) {
            shape.attached = attached;
        }
    }

    fn insert_at(&mut self, id: ShapeId, index: usize, point: LatLng) -> bool {
        match self.shapes.get_mut(&id) {
            Some(shape) if shape.kind.has_path() && index <= shape.path.len() => {
                shape.path.insert(index, point);
                true
            }
            _ => false,
        }
    }

    fn set_at(&mut self, id: ShapeId, index: usize, point: LatLng) -> bool {
        match self.shapes.get_mut(&id) {
            Some(shape) if index < shape.path.len() => {
                shape.path[index] = point;
                true
            }
            _ => false,
        }
    }

    fn remove_at(&mut self, id: ShapeId, index: usize) -> Option<LatLng> {
        match self.shapes.get_mut(&id) {
            Some(shape) if shape.kind.has_path() && index < shape.path.len() => {
                Some(shape.path.remove(index))
            }
            _ => None,
        }
    }

    fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.order.retain(|other| *other != id);
        self.shapes.remove(&id)
    }

    fn poll_event(&mut self) -> Option<ToolkitEvent> {
        self.events.pop_front()
    }
}
