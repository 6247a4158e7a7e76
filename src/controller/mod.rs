//! Annotation controller: wires toolkit events to the selection, palette and
//! submit state, and hands the finished coordinate list to the host.

mod handlers;

pub use handlers::{Handler, HandlerTable};

use tracing::{debug, info, warn};

use crate::bridge::{save_failed_alert, HostChannel, HostMessage};
use crate::error::{BridgeError, BridgeResult};
use crate::geo::LatLng;
use crate::palette::{Color, Palette};
use crate::shapes::{ColorTarget, ShapeId, ShapeKind, ShapeStyle};
use crate::toolkit::{EventKind, ListenerTarget, MapToolkit, ToolkitEvent};

/// Submit control state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// No shape yet; submit starts drawing
    #[default]
    Create,
    /// A shape exists; submit saves it
    Edit,
}

impl Mode {
    /// Text on the submit control
    pub fn label(self) -> &'static str {
        match self {
            Mode::Create => "Start Drawing",
            Mode::Edit => "Save",
        }
    }
}

/// Owns the annotation state and the toolkit it coordinates
pub struct AnnotationController<T: MapToolkit> {
    toolkit: T,
    handlers: HandlerTable,
    palette: Palette,
    selected_color: Option<Color>,
    /// Most recently created or loaded shape, the save payload
    current: Option<ShapeId>,
    /// Shape open for editing
    selected: Option<ShapeId>,
    /// The one shape whose editable flag is set, selected or not
    editable: Option<ShapeId>,
    mode: Mode,
    coordinates: Vec<LatLng>,
    /// Style for the shape built from startup coordinates
    default_shape_style: ShapeStyle,
    channel: Option<Box<dyn HostChannel>>,
    alerts: Vec<String>,
}

impl<T: MapToolkit> AnnotationController<T> {
    /// Wire the map-level listeners and build the palette
    pub fn new(toolkit: T, colors: impl IntoIterator<Item = Color>) -> Self {
        let mut controller = Self {
            toolkit,
            handlers: HandlerTable::new(),
            palette: Palette::default(),
            selected_color: None,
            current: None,
            selected: None,
            editable: None,
            mode: Mode::Create,
            coordinates: Vec::new(),
            default_shape_style: ShapeStyle::area(),
            channel: None,
            alerts: Vec::new(),
        };

        controller.handlers.add_listener(
            ListenerTarget::DrawingManager,
            EventKind::OverlayComplete,
            Handler::CompleteOverlay,
        );
        controller.handlers.add_listener(
            ListenerTarget::DrawingManager,
            EventKind::DrawingModeChanged,
            Handler::ClearSelection,
        );
        controller
            .handlers
            .add_listener(ListenerTarget::Map, EventKind::Click, Handler::ClearSelection);

        controller.build_color_palette(colors);
        controller
    }

    /// Channel that receives saved coordinates
    pub fn with_channel(mut self, channel: Box<dyn HostChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Style (minus colors) for the shape built from startup coordinates
    pub fn with_default_shape_style(mut self, style: ShapeStyle) -> Self {
        self.default_shape_style = style;
        self
    }

    /// Startup protocol: with initial coordinates, load them as the current
    /// polygon and go straight to edit mode
    pub fn start(&mut self, initial: &[LatLng]) {
        if initial.is_empty() {
            self.mode = Mode::Create;
            info!("starting without a shape");
            return;
        }

        let mut style = self.default_shape_style;
        if let Some(first) = self.palette.first() {
            style = style.with_color(first);
        }
        let id = self
            .toolkit
            .create_shape(ShapeKind::Polygon, initial.to_vec(), style);
        self.toolkit.set_attached(id, true);

        self.clear_selection();
        if style.editable {
            self.make_editable(id);
        }

        self.handlers
            .add_listener(ListenerTarget::Shape(id), EventKind::Click, Handler::SelectCurrent);
        self.add_path_listeners(id);

        self.current = Some(id);
        self.coordinates = initial.to_vec();
        self.mode = Mode::Edit;
        info!(%id, vertices = initial.len(), "loaded initial shape");
    }

    /// Drain and dispatch every queued toolkit event
    pub fn pump(&mut self) {
        while let Some(event) = self.toolkit.poll_event() {
            self.handle_event(event);
        }
    }

    /// Run the listeners registered for one event, in registration order
    pub fn handle_event(&mut self, event: ToolkitEvent) {
        let handlers = self.handlers.handlers_for(event.kind(), event.target());
        if handlers.is_empty() {
            debug!(?event, "no listeners");
            return;
        }
        for handler in handlers {
            debug!(?event, ?handler, "dispatch");
            self.run_handler(handler, &event);
        }
    }

    fn run_handler(&mut self, handler: Handler, event: &ToolkitEvent) {
        match handler {
            Handler::CompleteOverlay => {
                if let ToolkitEvent::OverlayComplete { shape, kind } = *event {
                    self.complete_overlay(shape, kind);
                }
            }
            Handler::RecomputeCoordinates(id) => self.update_coordinates(id),
            Handler::VertexDeleteOrSelect(id) => {
                if let ToolkitEvent::ShapeClick {
                    vertex: Some(index), ..
                } = *event
                {
                    if !self.delete_vertex(id, index) {
                        return;
                    }
                }
                self.set_selection(id);
            }
            Handler::SelectCurrent => {
                if let Some(id) = self.current {
                    self.set_selection(id);
                }
            }
            Handler::ClearSelection => self.clear_selection(),
        }
    }

    /// Drawing completion protocol
    fn complete_overlay(&mut self, id: ShapeId, kind: ShapeKind) {
        self.add_path_listeners(id);

        if kind == ShapeKind::Polygon {
            self.toolkit.set_drawing_mode(None);
            self.handlers.add_listener(
                ListenerTarget::Shape(id),
                EventKind::Click,
                Handler::VertexDeleteOrSelect(id),
            );
            self.set_selection(id);
        } else {
            self.clear_selection();
            if self.toolkit.is_editable(id) {
                self.make_editable(id);
            }
        }

        self.current = Some(id);
        self.update_coordinates(id);
        self.mode = Mode::Edit;
        self.toolkit.set_manager_attached(false);
        info!(%id, %kind, "shape completed");
    }

    /// Drag-end and path edits recompute the coordinate list
    fn add_path_listeners(&mut self, id: ShapeId) {
        let recompute = Handler::RecomputeCoordinates(id);
        self.handlers
            .add_listener(ListenerTarget::Shape(id), EventKind::DragEnd, recompute);
        self.handlers
            .add_listener(ListenerTarget::Path(id), EventKind::InsertAt, recompute);
        self.handlers
            .add_listener(ListenerTarget::Path(id), EventKind::SetAt, recompute);
    }

    /// Select a shape. Non-markers become the only editable shape and pull
    /// the palette to their color. The shape also becomes current.
    pub fn set_selection(&mut self, id: ShapeId) {
        let Some(kind) = self.toolkit.kind(id) else {
            warn!(%id, "select: unknown shape");
            return;
        };

        self.clear_selection();
        if !kind.is_marker() {
            self.make_editable(id);
            let color = self
                .toolkit
                .color(id, ColorTarget::Fill)
                .or_else(|| self.toolkit.color(id, ColorTarget::Stroke));
            if let Some(color) = color {
                self.select_color(color);
            }
        }

        self.selected = Some(id);
        if self.current != Some(id) {
            self.current = Some(id);
            self.update_coordinates(id);
        }
    }

    /// Make the selected shape read-only and forget it
    pub fn clear_selection(&mut self) {
        if let Some(id) = self.selected.take() {
            self.toolkit.set_editable(id, false);
            if self.editable == Some(id) {
                self.editable = None;
            }
        }
    }

    /// Hand the editable flag to `id`, taking it from whoever had it
    fn make_editable(&mut self, id: ShapeId) {
        if let Some(prev) = self.editable.filter(|prev| *prev != id) {
            self.toolkit.set_editable(prev, false);
        }
        self.toolkit.set_editable(id, true);
        self.editable = Some(id);
    }

    /// Take the selected shape off the map and drop every reference to it
    pub fn delete_selected_shape(&mut self) {
        let Some(id) = self.selected.take() else {
            return;
        };
        self.discard_shape(id);
        info!(%id, "deleted selected shape");
    }

    /// Detach a shape and forget it everywhere
    fn discard_shape(&mut self, id: ShapeId) {
        self.toolkit.set_editable(id, false);
        self.toolkit.set_attached(id, false);
        self.toolkit.remove_shape(id);
        self.handlers.remove_shape(id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.editable == Some(id) {
            self.editable = None;
        }
        if self.current == Some(id) {
            self.current = None;
            self.coordinates.clear();
            self.mode = Mode::Create;
        }
    }

    /// Remove one vertex. If the path drops below the kind's minimum the
    /// whole shape is discarded. Returns whether the shape survived.
    pub fn delete_vertex(&mut self, id: ShapeId, index: usize) -> bool {
        let Some(min) = self.toolkit.kind(id).and_then(ShapeKind::min_vertices) else {
            return self.toolkit.shape(id).is_some();
        };
        if self.toolkit.remove_at(id, index).is_none() {
            return true;
        }

        if self.toolkit.path_len(id) < min {
            info!(%id, "vertex count below minimum, removing shape");
            self.discard_shape(id);
            return false;
        }
        self.update_coordinates(id);
        true
    }

    /// Make `color` active: highlight its button and use it for shapes drawn next
    pub fn select_color(&mut self, color: Color) {
        self.selected_color = Some(color);
        self.palette.highlight(color);

        for kind in ShapeKind::ALL.into_iter().filter(|k| !k.is_marker()) {
            let mut style = self.toolkit.default_style(kind);
            style.set_color(kind.color_target(), color);
            self.toolkit.set_default_style(kind, style);
        }
    }

    /// Recolor the selected shape: stroke for lines, fill otherwise
    pub fn set_selected_shape_color(&mut self, color: Color) {
        let Some(id) = self.selected else {
            return;
        };
        if let Some(kind) = self.toolkit.kind(id) {
            self.toolkit.set_color(id, kind.color_target(), color);
        }
    }

    /// One button per color, first color active
    pub fn build_color_palette(&mut self, colors: impl IntoIterator<Item = Color>) {
        self.palette = Palette::new(colors);
        if let Some(first) = self.palette.first() {
            self.select_color(first);
        }
    }

    /// Palette button click
    pub fn click_palette_button(&mut self, index: usize) {
        let Some(color) = self.palette.get(index).map(|b| b.color) else {
            return;
        };
        self.select_color(color);
        self.set_selected_shape_color(color);
    }

    /// Recompute the coordinate list from a shape's outline. Only the
    /// current shape feeds the list.
    pub fn update_coordinates(&mut self, id: ShapeId) {
        if self.current != Some(id) {
            debug!(%id, "coordinates: not the current shape");
            return;
        }
        match self.toolkit.shape(id) {
            Some(shape) => {
                self.coordinates = shape.outline();
                debug!(%id, count = self.coordinates.len(), "coordinates updated");
            }
            None => warn!(%id, "coordinates: unknown shape"),
        }
    }

    /// Post the coordinate list to the host. Any failure raises an alert.
    pub fn save_coordinates(&mut self) -> BridgeResult<()> {
        let result = match self.channel.as_mut() {
            Some(channel) => HostMessage::polygon_created(&self.coordinates)
                .to_json()
                .and_then(|payload| channel.post_message(&payload)),
            None => Err(BridgeError::NoChannel),
        };

        match &result {
            Ok(()) => info!(count = self.coordinates.len(), "coordinates saved"),
            Err(e) => {
                warn!(error = %e, "save failed");
                self.alerts.push(save_failed_alert(e));
            }
        }
        result
    }

    /// Submit control: save when a shape exists, otherwise start drawing a polygon
    pub fn submit(&mut self) -> BridgeResult<()> {
        if self.selected.is_some() || self.current.is_some() {
            return self.save_coordinates();
        }

        self.toolkit.set_manager_attached(true);
        self.toolkit.set_drawing_mode(Some(ShapeKind::Polygon));
        self.mode = Mode::Create;
        info!("drawing started");
        Ok(())
    }

    /// Reset control: drop every shape and go back to create mode
    pub fn reset(&mut self) {
        if let Some(id) = self.selected.take() {
            self.discard_shape(id);
        }
        if let Some(id) = self.current.take() {
            self.discard_shape(id);
        }
        self.toolkit.set_manager_attached(false);
        self.coordinates.clear();
        self.mode = Mode::Create;
        info!("reset");
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn label(&self) -> &'static str {
        self.mode.label()
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn current(&self) -> Option<ShapeId> {
        self.current
    }

    pub fn selected_color(&self) -> Option<Color> {
        self.selected_color
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn coordinates(&self) -> &[LatLng] {
        &self.coordinates
    }

    pub fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    pub fn has_channel(&self) -> bool {
        self.channel.is_some()
    }

    /// Channel description for the status bar
    pub fn channel_name(&self) -> Option<String> {
        self.channel.as_ref().map(|c| c.describe())
    }

    /// Take pending user-facing alerts
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}
