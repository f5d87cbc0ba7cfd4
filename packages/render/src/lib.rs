#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map rendering for ranked wind turbine records.
//!
//! [`style::style_records`] assigns every positioned record a fill colour,
//! a contrasting outline and a legend label. The resulting
//! [`style::StyledMap`] is then written either as a standalone Leaflet
//! page ([`html`]) or as a GeoJSON feature collection
//! ([`geojson_output`]), over one of the basemaps in [`tiles`].

pub mod geojson_output;
pub mod html;
pub mod style;
pub mod tiles;

pub use style::{FillMode, LegendEntry, MapOptions, StyledMap, StyledPoint, style_records};
pub use tiles::{TileProvider, all_tile_providers, find_tile_provider};

/// Errors that can occur while styling or writing a map.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// I/O error writing an output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTML template failed to compile or render.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// A marker colour could not be normalized.
    #[error("Colour error: {0}")]
    Color(#[from] wind_map_color::ColorError),

    /// No tile provider with this id exists.
    #[error("Unknown tile provider: {0}")]
    UnknownTileProvider(String),

    /// A grouping or legend column does not exist on turbine records.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// The tile provider registry is malformed.
    #[error("Invalid tile providers: {message}")]
    InvalidTiles {
        /// Description of the problem.
        message: String,
    },
}
