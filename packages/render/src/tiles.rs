//! Basemap tile providers loaded from embedded TOML.

use serde::{Deserialize, Serialize};

use crate::RenderError;

/// Tile providers embedded at compile time.
const TILES_TOML: &str = include_str!("../tiles.toml");

/// Provider used when none is requested.
pub const DEFAULT_TILE_PROVIDER: &str = "OpenMap";

/// A slippy-map tile service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileProvider {
    /// Identifier used on the command line (e.g. `"ESRI"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// URL template with `{z}`, `{x}` and `{y}` placeholders.
    pub url: String,
    /// Attribution HTML shown in the map corner.
    pub attribution: String,
    /// Highest zoom level the service provides.
    pub max_zoom: u8,
}

impl TileProvider {
    /// URL of one tile.
    #[must_use]
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        self.url
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

#[derive(Deserialize)]
struct TileFile {
    tile: Vec<TileProvider>,
}

/// Parses a tile provider document.
///
/// # Errors
///
/// Returns [`RenderError::InvalidTiles`] if the TOML is malformed or a
/// URL lacks one of the `{z}`, `{x}`, `{y}` placeholders.
pub fn parse_tiles_toml(toml_str: &str) -> Result<Vec<TileProvider>, RenderError> {
    let file: TileFile = toml::from_str(toml_str).map_err(|e| RenderError::InvalidTiles {
        message: e.to_string(),
    })?;

    for provider in &file.tile {
        for placeholder in ["{z}", "{x}", "{y}"] {
            if !provider.url.contains(placeholder) {
                return Err(RenderError::InvalidTiles {
                    message: format!("{} URL is missing {placeholder}", provider.id),
                });
            }
        }
    }

    Ok(file.tile)
}

/// Returns all tile providers, parsed from embedded TOML.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (caught by the tests below).
#[must_use]
pub fn all_tile_providers() -> Vec<TileProvider> {
    parse_tiles_toml(TILES_TOML).unwrap_or_else(|e| panic!("Failed to parse tiles.toml: {e}"))
}

/// Looks up a provider by id, ignoring case.
///
/// # Errors
///
/// Returns [`RenderError::UnknownTileProvider`] if no provider matches.
pub fn find_tile_provider(id: &str) -> Result<TileProvider, RenderError> {
    all_tile_providers()
        .into_iter()
        .find(|p| p.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| RenderError::UnknownTileProvider(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_the_three_basemaps() {
        let ids: Vec<String> = all_tile_providers().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["OpenMap", "ESRI", "OpenTopoMap"]);
    }

    #[test]
    fn default_provider_exists() {
        assert!(find_tile_provider(DEFAULT_TILE_PROVIDER).is_ok());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find_tile_provider("esri").unwrap().id, "ESRI");
        assert!(matches!(
            find_tile_provider("stamen"),
            Err(RenderError::UnknownTileProvider(_))
        ));
    }

    #[test]
    fn esri_swaps_x_and_y() {
        let esri = find_tile_provider("ESRI").unwrap();
        assert!(esri.tile_url(3, 4, 5).ends_with("/tile/3/5/4.jpg"));
        let osm = find_tile_provider("OpenMap").unwrap();
        assert_eq!(
            osm.tile_url(3, 4, 5),
            "https://tile.openstreetmap.org/3/4/5.png"
        );
    }

    #[test]
    fn rejects_url_without_placeholders() {
        let toml_str = r#"
            [[tile]]
            id = "broken"
            name = "Broken"
            url = "https://example.com/tile.png"
            attribution = ""
            max_zoom = 10
        "#;
        assert!(matches!(
            parse_tiles_toml(toml_str),
            Err(RenderError::InvalidTiles { .. })
        ));
    }
}
