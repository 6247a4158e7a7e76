//! Configuration for geoscii
//!
//! Read from `$XDG_CONFIG_HOME/geoscii/config.json` when present. Every
//! field has a default, so a partial file is fine.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::bridge::ChannelSpec;
use crate::geo::{LatLng, MAX_ZOOM, MIN_ZOOM};
use crate::palette::{default_colors, Color};
use crate::shapes::ShapeStyle;

/// Initial map center
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 34.703214,
    lng: 39.26412412,
};

/// Initial zoom level
pub const DEFAULT_ZOOM: u8 = 6;

/// Coastline detail for the terminal map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapDetail {
    Low,
    #[default]
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub center: LatLng,
    pub zoom: u8,
    pub map_detail: MapDetail,
    pub palette: Vec<Color>,
    /// Style of the shape built from `initial_coordinates`
    pub polygon_style: ShapeStyle,
    pub initial_coordinates: Vec<LatLng>,
    pub channel: ChannelSpec,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            map_detail: MapDetail::default(),
            palette: default_colors(),
            polygon_style: ShapeStyle::area(),
            initial_coordinates: Vec::new(),
            channel: ChannelSpec::default(),
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the default location if it exists.
    /// Missing default file means defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::read(path)?,
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::read(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Get the config file path
    pub fn default_path() -> PathBuf {
        config_dir().join("config.json")
    }

    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            bail!("palette must contain at least one color");
        }
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom) {
            bail!("zoom {} out of range {MIN_ZOOM}..={MAX_ZOOM}", self.zoom);
        }
        if !(-90.0..=90.0).contains(&self.center.lat) || !(-180.0..=180.0).contains(&self.center.lng) {
            bail!("center {} is not a valid coordinate", self.center);
        }
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/geoscii`, falling back to `~/.config/geoscii`
pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        })
        .join("geoscii")
}

/// Where the log file goes: the platform data dir, or the working directory
pub fn log_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("geoscii"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("geoscii.log")
}
