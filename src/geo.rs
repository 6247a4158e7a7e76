//! Geographic coordinates and the terminal map viewport.
//!
//! `LatLng` serializes as a bare `[lat, lng]` pair so coordinate files and
//! host messages share one wire shape.

use serde::{Deserialize, Serialize};

/// Highest zoom level the viewport accepts
pub const MAX_ZOOM: u8 = 18;

/// Lowest zoom level the viewport accepts
pub const MIN_ZOOM: u8 = 1;

/// Latitude clamp, same cut-off web maps use
const MAX_LAT: f64 = 85.0;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

/// A point on the map in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Shift by a delta in degrees
    pub fn offset(self, dlat: f64, dlng: f64) -> Self {
        Self::new(self.lat + dlat, self.lng + dlng)
    }

    /// Midpoint between two points (plain degree average, fine at map scale)
    pub fn midpoint(self, other: LatLng) -> Self {
        Self::new((self.lat + other.lat) / 2.0, (self.lng + other.lng) / 2.0)
    }

    /// Euclidean distance in degrees, used for hit testing only
    pub fn degree_distance(self, other: LatLng) -> f64 {
        ((self.lat - other.lat).powi(2) + (self.lng - other.lng).powi(2)).sqrt()
    }
}

impl From<[f64; 2]> for LatLng {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(point: LatLng) -> Self {
        [point.lat, point.lng]
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Visible map window: a center and a zoom level projected onto a cell grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    pub width: u16,
    pub height: u16,
}

impl MapView {
    pub fn new(center: LatLng, zoom: u8, width: u16, height: u16) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            width,
            height,
        }
    }

    /// Longitude degrees covered by the full width
    pub fn lng_span(&self) -> f64 {
        720.0 / 2f64.powi(self.zoom as i32)
    }

    /// Latitude degrees covered by the full height
    pub fn lat_span(&self) -> f64 {
        if self.width == 0 {
            return 0.0;
        }
        self.lng_span() * (self.height as f64 * CELL_ASPECT) / self.width as f64
    }

    /// `[min, max]` longitude bounds, as the canvas widget wants them
    pub fn x_bounds(&self) -> [f64; 2] {
        let half = self.lng_span() / 2.0;
        [self.center.lng - half, self.center.lng + half]
    }

    /// `[min, max]` latitude bounds
    pub fn y_bounds(&self) -> [f64; 2] {
        let half = self.lat_span() / 2.0;
        [self.center.lat - half, self.center.lat + half]
    }

    /// Degrees per cell along (lat, lng)
    pub fn cell_size(&self) -> (f64, f64) {
        if self.width == 0 || self.height == 0 {
            return (0.0, 0.0);
        }
        (
            self.lat_span() / self.height as f64,
            self.lng_span() / self.width as f64,
        )
    }

    /// Convert a cell (relative to the map's top-left) to the point at its center
    pub fn screen_to_geo(&self, col: u16, row: u16) -> LatLng {
        let (cell_lat, cell_lng) = self.cell_size();
        let [min_lng, _] = self.x_bounds();
        let [_, max_lat] = self.y_bounds();
        LatLng::new(
            max_lat - (row as f64 + 0.5) * cell_lat,
            min_lng + (col as f64 + 0.5) * cell_lng,
        )
    }

    /// Convert a point to a cell relative to the map's top-left, if visible
    pub fn geo_to_screen(&self, point: LatLng) -> Option<(u16, u16)> {
        let (cell_lat, cell_lng) = self.cell_size();
        if cell_lat == 0.0 || cell_lng == 0.0 {
            return None;
        }
        let [min_lng, _] = self.x_bounds();
        let [_, max_lat] = self.y_bounds();
        let col = ((point.lng - min_lng) / cell_lng).floor();
        let row = ((max_lat - point.lat) / cell_lat).floor();

        if col >= 0.0 && col < self.width as f64 && row >= 0.0 && row < self.height as f64 {
            Some((col as u16, row as u16))
        } else {
            None
        }
    }

    /// Pan by a number of cells
    pub fn pan(&mut self, cols: i32, rows: i32) {
        let (cell_lat, cell_lng) = self.cell_size();
        let lat = (self.center.lat - rows as f64 * cell_lat).clamp(-MAX_LAT, MAX_LAT);
        let mut lng = self.center.lng + cols as f64 * cell_lng;
        if lng > 180.0 {
            lng -= 360.0;
        } else if lng < -180.0 {
            lng += 360.0;
        }
        self.center = LatLng::new(lat, lng);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}
