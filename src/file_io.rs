use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::geo::LatLng;

/// Load a coordinate list written as `[[lat, lng], ...]`
pub fn load_coordinates(path: &Path) -> Result<Vec<LatLng>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let coordinates: Vec<LatLng> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a [[lat, lng], ...] list", path.display()))?;
    Ok(coordinates)
}

/// Write a coordinate list as `[[lat, lng], ...]`
pub fn save_coordinates(path: &Path, coordinates: &[LatLng]) -> Result<()> {
    let content = serde_json::to_string_pretty(coordinates)?;
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
