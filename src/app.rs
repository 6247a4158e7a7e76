use ratatui::layout::Rect;

use crate::config::{Config, MapDetail};
use crate::controller::{AnnotationController, Mode};
use crate::geo::{LatLng, MapView};
use crate::shapes::{ShapeId, ShapeKind};
use crate::toolkit::{Hit, MapToolkit, Scene};
use crate::ui;

/// Host controls on the button bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Submit,
    Reset,
    Delete,
    Palette(usize),
}

/// State for a pointer press on the map
#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    hit: Option<Hit>,
    last: LatLng,
    moved: bool,
}

/// Main application state
pub struct App {
    pub controller: AnnotationController<Scene>,
    pub view: MapView,
    /// Screen area of the map, updated on every frame
    pub map_area: Rect,
    /// Screen row holding the host controls
    pub button_area: Rect,
    pub map_detail: MapDetail,
    pub running: bool,
    pub status_message: Option<String>,
    press: Option<Press>,
    /// Last map point under the pointer
    last_point: Option<LatLng>,
}

impl App {
    pub fn new(controller: AnnotationController<Scene>, config: &Config) -> Self {
        Self {
            controller,
            view: MapView::new(config.center, config.zoom, 0, 0),
            map_area: Rect::default(),
            button_area: Rect::default(),
            map_detail: config.map_detail,
            running: true,
            status_message: None,
            press: None,
            last_point: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        self.controller.toolkit()
    }

    /// Recompute the map area for a new terminal size
    pub fn resize(&mut self, area: Rect) {
        let layout = ui::screen_layout(area);
        self.map_area = layout.map;
        self.button_area = layout.buttons;
        self.view.resize(self.map_area.width, self.map_area.height);
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Map point under a screen cell, if the cell is on the map
    pub fn to_geo(&self, col: u16, row: u16) -> Option<LatLng> {
        let area = self.map_area;
        if col < area.x || row < area.y || col >= area.x + area.width || row >= area.y + area.height {
            return None;
        }
        Some(self.view.screen_to_geo(col - area.x, row - area.y))
    }

    /// Hit radius in degrees: one cell
    pub fn tolerance(&self) -> f64 {
        let (cell_lat, cell_lng) = self.view.cell_size();
        cell_lat.max(cell_lng)
    }

    pub fn press_button(&mut self, button: Button) {
        match button {
            Button::Submit => self.submit(),
            Button::Reset => {
                self.controller.reset();
                self.set_status("Reset");
            }
            Button::Delete => {
                if self.controller.selected().is_some() {
                    self.controller.delete_selected_shape();
                    self.set_status("Shape deleted");
                }
            }
            Button::Palette(index) => self.controller.click_palette_button(index),
        }
        self.after_input();
    }

    fn submit(&mut self) {
        let saving = self.controller.selected().is_some() || self.controller.current().is_some();
        match self.controller.submit() {
            Ok(()) if saving => {
                let count = self.controller.coordinates().len();
                let target = self.controller.channel_name().unwrap_or_default();
                self.set_status(format!("Saved {count} points to {target}"));
            }
            Ok(()) => self.set_status("Click to place vertices, Enter to finish"),
            // the controller raised an alert; after_input shows it
            Err(_) => {}
        }
    }

    /// Switch what the drawing manager draws next, starting drawing if needed
    pub fn choose_drawing_mode(&mut self, kind: ShapeKind) {
        let scene = self.controller.toolkit_mut();
        scene.set_manager_attached(true);
        scene.choose_drawing_mode(Some(kind));
        self.set_status(format!("Drawing {kind}"));
        self.after_input();
    }

    /// Enter: complete the shape being drawn
    pub fn finish_drawing(&mut self) {
        if !self.scene().is_drawing() {
            return;
        }
        if !self.controller.toolkit_mut().finish_draft() {
            self.set_status("Not enough points yet");
        }
        self.after_input();
    }

    /// Esc: drop the shape being drawn
    pub fn cancel_drawing(&mut self) {
        self.controller.toolkit_mut().cancel_draft();
    }

    /// Split the selected shape's edge after the vertex nearest the pointer
    pub fn insert_vertex(&mut self) {
        let Some(id) = self.controller.selected() else {
            self.set_status("Select a shape first");
            return;
        };
        let index = self.nearest_vertex(id).unwrap_or(0);
        if !self.controller.toolkit_mut().insert_midpoint(id, index) {
            self.set_status("Can't insert a vertex here");
        }
        self.after_input();
    }

    fn nearest_vertex(&self, id: ShapeId) -> Option<usize> {
        let at = self.last_point?;
        let path = self.scene().path(id)?;
        path.iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.degree_distance(at).total_cmp(&b.degree_distance(at)))
            .map(|(i, _)| i)
    }

    pub fn pointer_down(&mut self, col: u16, row: u16) {
        if let Some(button) = ui::button_at(self, col, row) {
            self.press_button(button);
            return;
        }
        let Some(at) = self.to_geo(col, row) else {
            return;
        };
        self.last_point = Some(at);

        let hit = if self.scene().is_drawing() {
            None
        } else {
            self.scene().hit_test(at, self.tolerance())
        };
        self.press = Some(Press {
            hit,
            last: at,
            moved: false,
        });
    }

    pub fn pointer_drag(&mut self, col: u16, row: u16) {
        let Some(at) = self.to_geo(col, row) else {
            return;
        };
        self.last_point = Some(at);
        let Some(mut press) = self.press else {
            return;
        };

        let scene = self.controller.toolkit_mut();
        match press.hit {
            Some(Hit::Vertex { shape, index }) => scene.drag_vertex(shape, index, at),
            Some(Hit::Body { shape }) => {
                scene.drag_body(shape, at.lat - press.last.lat, at.lng - press.last.lng)
            }
            None => {}
        }
        press.last = at;
        press.moved = true;
        self.press = Some(press);
        self.after_input();
    }

    pub fn pointer_up(&mut self, col: u16, row: u16) {
        let Some(press) = self.press.take() else {
            return;
        };
        let at = self.to_geo(col, row).unwrap_or(press.last);
        let tolerance = self.tolerance();
        let scene = self.controller.toolkit_mut();

        match (press.moved, press.hit) {
            (false, _) | (true, None) => scene.click(at, tolerance),
            (true, Some(Hit::Body { shape })) => scene.end_drag(shape),
            (true, Some(Hit::Vertex { .. })) => {}
        }
        self.after_input();
    }

    pub fn pan(&mut self, cols: i32, rows: i32) {
        self.view.pan(cols, rows);
    }

    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Deliver queued toolkit events and surface alerts
    fn after_input(&mut self) {
        self.controller.pump();
        if let Some(alert) = self.controller.take_alerts().pop() {
            self.set_status(alert);
        }
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::default_colors;

    fn app() -> App {
        let config = Config::default();
        let controller = AnnotationController::new(Scene::new(), default_colors());
        let mut app = App::new(controller, &config);
        app.resize(Rect::new(0, 0, 100, 30));
        app
    }

    /// Screen cell of a map point
    fn cell(app: &App, at: LatLng) -> (u16, u16) {
        let (col, row) = app.view.geo_to_screen(at).expect("point on screen");
        (col + app.map_area.x, row + app.map_area.y)
    }

    fn click(app: &mut App, (col, row): (u16, u16)) {
        app.pointer_down(col, row);
        app.pointer_up(col, row);
    }

    #[test]
    fn draws_polygon_with_pointer() {
        let mut app = app();
        app.press_button(Button::Submit);
        assert!(app.scene().is_drawing());

        let center = app.view.center;
        let span = app.view.lng_span() / 8.0;
        for point in [
            center,
            center.offset(0.0, span),
            center.offset(span, span),
            center.offset(span, 0.0),
        ] {
            let at = cell(&app, point);
            click(&mut app, at);
        }
        app.finish_drawing();

        assert_eq!(app.mode(), Mode::Edit);
        let id = app.controller.selected().expect("polygon selected");
        assert_eq!(app.scene().path_len(id), 4);
        assert!(!app.scene().manager_attached());
    }

    #[test]
    fn clicks_outside_map_are_ignored() {
        let mut app = app();
        let below = app.map_area.y + app.map_area.height + 5;
        assert_eq!(app.to_geo(0, below), None);
    }

    #[test]
    fn submit_without_channel_shows_alert() {
        let mut app = app();
        app.controller.start(&[
            LatLng::new(34.70, 39.26),
            LatLng::new(34.71, 39.27),
            LatLng::new(34.72, 39.25),
        ]);
        app.press_button(Button::Submit);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Could not save the shape: no host channel is configured")
        );
    }
}
