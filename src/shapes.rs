//! Shape types for geoscii.
//!
//! ShapeKind is a tagged variant carrying the per-kind rules (minimum vertex
//! count, which color property a palette pick targets). Shape is the record
//! a toolkit keeps for each drawn overlay.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::LatLng;
use crate::palette::Color;

/// Shape identifier - opaque handle to a toolkit-managed shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which style property a color applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTarget {
    Fill,
    Stroke,
}

/// Overlay types the drawing manager can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Polygon,
    Polyline,
    Marker,
    Rectangle,
    Circle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Polygon,
        ShapeKind::Polyline,
        ShapeKind::Marker,
        ShapeKind::Rectangle,
        ShapeKind::Circle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Polygon => "polygon",
            ShapeKind::Polyline => "polyline",
            ShapeKind::Marker => "marker",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
        }
    }

    /// Fewest vertices the shape may keep after a vertex deletion.
    /// `None` for kinds whose vertices can't be deleted one at a time.
    pub fn min_vertices(self) -> Option<usize> {
        match self {
            ShapeKind::Polygon => Some(3),
            ShapeKind::Polyline => Some(2),
            ShapeKind::Marker | ShapeKind::Rectangle | ShapeKind::Circle => None,
        }
    }

    /// Property a palette color is written to
    pub fn color_target(self) -> ColorTarget {
        match self {
            ShapeKind::Polyline => ColorTarget::Stroke,
            _ => ColorTarget::Fill,
        }
    }

    /// Markers carry no colors and never become editable
    pub fn is_marker(self) -> bool {
        self == ShapeKind::Marker
    }

    /// Kinds with a free vertex path (insert/set/remove apply)
    pub fn has_path(self) -> bool {
        self.min_vertices().is_some()
    }

    /// Control points needed before the drawing manager completes the shape
    /// on its own. Path kinds complete on an explicit finish instead.
    pub fn auto_complete_points(self) -> Option<usize> {
        match self {
            ShapeKind::Marker => Some(1),
            ShapeKind::Rectangle | ShapeKind::Circle => Some(2),
            ShapeKind::Polygon | ShapeKind::Polyline => None,
        }
    }

    /// Outline vertices for a control-point path.
    ///
    /// Rectangles are stored as two opposite corners and expand to four;
    /// circles are stored as center + rim point and report the center.
    pub fn outline(self, path: &[LatLng]) -> Vec<LatLng> {
        match (self, path) {
            (ShapeKind::Rectangle, [a, b]) => vec![
                LatLng::new(a.lat, a.lng),
                LatLng::new(a.lat, b.lng),
                LatLng::new(b.lat, b.lng),
                LatLng::new(b.lat, a.lng),
            ],
            (ShapeKind::Circle, [center, ..]) => vec![*center],
            _ => path.to_vec(),
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Style options for a shape, also used as the drawing manager's per-kind defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    pub fill_color: Option<Color>,
    pub stroke_color: Option<Color>,
    pub stroke_weight: u8,
    pub fill_opacity: f32,
    pub editable: bool,
    pub draggable: bool,
}

impl ShapeStyle {
    /// Polygon, rectangle and circle defaults
    pub fn area() -> Self {
        Self {
            fill_color: None,
            stroke_color: None,
            stroke_weight: 0,
            fill_opacity: 0.45,
            editable: true,
            draggable: true,
        }
    }

    pub fn polyline() -> Self {
        Self {
            fill_color: None,
            stroke_color: None,
            stroke_weight: 1,
            fill_opacity: 0.0,
            editable: true,
            draggable: true,
        }
    }

    pub fn marker() -> Self {
        Self {
            fill_color: None,
            stroke_color: None,
            stroke_weight: 0,
            fill_opacity: 0.0,
            editable: false,
            draggable: true,
        }
    }

    /// Drawing manager defaults for a kind
    pub fn for_kind(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Polygon | ShapeKind::Rectangle | ShapeKind::Circle => Self::area(),
            ShapeKind::Polyline => Self::polyline(),
            ShapeKind::Marker => Self::marker(),
        }
    }

    pub fn color(&self, target: ColorTarget) -> Option<Color> {
        match target {
            ColorTarget::Fill => self.fill_color,
            ColorTarget::Stroke => self.stroke_color,
        }
    }

    pub fn set_color(&mut self, target: ColorTarget, color: Color) {
        match target {
            ColorTarget::Fill => self.fill_color = Some(color),
            ColorTarget::Stroke => self.stroke_color = Some(color),
        }
    }

    /// The color that represents the shape: fill first, stroke otherwise
    pub fn display_color(&self) -> Option<Color> {
        self.fill_color.or(self.stroke_color)
    }

    /// Same style with both fill and stroke set to one color
    pub fn with_color(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self.stroke_color = Some(color);
        self
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::area()
    }
}

/// A drawn overlay as the toolkit stores it
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Control points: the vertex path for polygons and polylines, the
    /// position for markers, two corners for rectangles, center and rim
    /// point for circles
    pub path: Vec<LatLng>,
    pub style: ShapeStyle,
    /// Whether the shape is on the map
    pub attached: bool,
}

impl Shape {
    pub fn new(kind: ShapeKind, path: Vec<LatLng>, style: ShapeStyle) -> Self {
        Self {
            id: ShapeId::new(),
            kind,
            path,
            style,
            attached: false,
        }
    }

    /// Vertex outline reported as the shape's coordinates
    pub fn outline(&self) -> Vec<LatLng> {
        self.kind.outline(&self.path)
    }
}
