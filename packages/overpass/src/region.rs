//! Region presets — named bounding boxes loaded from embedded TOML.
//!
//! `regions.toml` is baked into the binary at compile time via
//! [`include_str!`]. Adding a preset is a matter of appending a
//! `[[region]]` table to that file.

use serde::Deserialize;

use crate::{BoundingBox, OverpassError};

/// Region presets embedded at compile time.
const REGIONS_TOML: &str = include_str!("../regions.toml");

/// A named bounding box with a default cache file.
#[derive(Debug, Clone, Deserialize)]
pub struct Region {
    /// Unique identifier used on the command line (e.g. `"belgian_offshore"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// The area to query.
    #[serde(flatten)]
    pub bbox: BoundingBox,
    /// File name of the flattened CSV cache for this region.
    pub cache_file: String,
}

#[derive(Deserialize)]
struct RegionFile {
    region: Vec<Region>,
}

/// Parses a regions document and validates every bounding box.
///
/// # Errors
///
/// Returns [`OverpassError::InvalidRegions`] if the TOML is malformed and
/// [`OverpassError::InvalidBoundingBox`] if a box is out of range.
pub fn parse_regions_toml(toml_str: &str) -> Result<Vec<Region>, OverpassError> {
    let file: RegionFile =
        toml::from_str(toml_str).map_err(|e| OverpassError::InvalidRegions {
            message: e.to_string(),
        })?;

    for region in &file.region {
        region.bbox.validate().map_err(|e| OverpassError::InvalidBoundingBox {
            message: format!("region {}: {e}", region.id),
        })?;
    }

    Ok(file.region)
}

/// Returns all configured region presets, parsed from embedded TOML.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (caught by the tests below).
#[must_use]
pub fn all_regions() -> Vec<Region> {
    parse_regions_toml(REGIONS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse regions.toml: {e}"))
}

/// Looks up a preset by id.
///
/// # Errors
///
/// Returns [`OverpassError::UnknownRegion`] if no preset has that id.
pub fn find_region(id: &str) -> Result<Region, OverpassError> {
    all_regions()
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| OverpassError::UnknownRegion(id.to_string()))
}
