//! Standalone HTML map page drawn with Leaflet.
//!
//! The page is a single file: markers, legend and tooltip rows are
//! embedded as JSON in an inline script, and Leaflet itself is loaded
//! from a CDN.

use std::fs;
use std::path::Path;

use minijinja::{Environment, context};
use serde::Serialize;

use crate::RenderError;
use crate::style::{MapOptions, StyledMap, StyledPoint};
use crate::tiles::TileProvider;

const TEMPLATE_NAME: &str = "map.html";
const TEMPLATE: &str = include_str!("../assets/map.html");

/// Shown in a tooltip row when the record has no value for the column.
pub const MISSING_TOOLTIP_VALUE: &str = "???";

/// Tooltip rows as `(label, column)`, in display order.
pub const TOOLTIP_FIELDS: &[(&str, &str)] = &[
    ("nodeId", "id"),
    ("plantName", "name"),
    ("source", "source"),
    ("capacity MW", "generator_output_electricity"),
    ("COD", "start_date"),
    ("hub_height", "height_hub"),
    ("type", "generator_type"),
    ("rotor_diameter", "rotor_diameter"),
    ("manufacturer", "manufacturer"),
    ("model", "model"),
    ("(Lat,Lon)", "coordinates"),
];

#[derive(Serialize)]
struct PointView<'a> {
    lat: f64,
    lon: f64,
    fill: String,
    line: &'a str,
    url: String,
    legend: &'a str,
    tooltip: Vec<(&'static str, String)>,
}

#[derive(Serialize)]
struct MapConfig<'a> {
    tile: &'a TileProvider,
    points: Vec<PointView<'a>>,
    bounds: Option<[[f64; 2]; 2]>,
    marker_size: f64,
    line_width: f64,
    alpha: f64,
}

#[derive(Serialize)]
struct LegendView<'a> {
    label: &'a str,
    fill: String,
    line: &'a str,
    count: usize,
}

/// Tooltip rows for one marker.
#[must_use]
pub fn tooltip_rows(point: &StyledPoint) -> Vec<(&'static str, String)> {
    TOOLTIP_FIELDS
        .iter()
        .map(|(label, column)| {
            let value = point
                .record
                .column(column)
                .unwrap_or_else(|| MISSING_TOOLTIP_VALUE.to_string());
            (*label, value)
        })
        .collect()
}

/// Renders `map` as a complete HTML document.
///
/// # Errors
///
/// Returns [`RenderError::Json`] if the marker data cannot be serialized
/// and [`RenderError::Template`] if the page template fails to render.
pub fn render_html(
    map: &StyledMap,
    options: &MapOptions,
    tile: &TileProvider,
) -> Result<String, RenderError> {
    let points = map
        .points
        .iter()
        .map(|point| PointView {
            lat: point.position.lat,
            lon: point.position.lon,
            fill: point.fill.to_string(),
            line: point.line.as_ref(),
            url: point.record.osm_url(),
            legend: &point.legend,
            tooltip: tooltip_rows(point),
        })
        .collect();

    let config = MapConfig {
        tile,
        points,
        bounds: map.bounds().map(|(s, w, n, e)| [[s, w], [n, e]]),
        marker_size: options.marker_size,
        line_width: options.line_width,
        alpha: options.alpha,
    };
    let config_json = script_safe_json(&config)?;

    let legend: Vec<LegendView<'_>> = map
        .legend
        .iter()
        .map(|entry| LegendView {
            label: &entry.label,
            fill: entry.fill.to_string(),
            line: entry.line.as_ref(),
            count: entry.count,
        })
        .collect();

    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)?;
    let html = env.get_template(TEMPLATE_NAME)?.render(context! {
        title => &options.title,
        width => options.width,
        height => options.height,
        tile_name => &tile.name,
        legend => legend,
        point_count => map.points.len(),
        skipped => map.skipped,
        config_json => config_json,
    })?;

    Ok(html)
}

/// Renders `map` and writes it to `path`.
///
/// # Errors
///
/// Returns the errors of [`render_html`], and [`RenderError::Io`] if the
/// file cannot be written.
pub fn write_html(
    path: &Path,
    map: &StyledMap,
    options: &MapOptions,
    tile: &TileProvider,
) -> Result<(), RenderError> {
    let html = render_html(map, options, tile)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;

    log::info!(
        "Wrote map with {} markers to {}",
        map.points.len(),
        path.display()
    );
    Ok(())
}

/// JSON that can be embedded in a `<script>` element. `<` only occurs
/// inside string literals, where `\u003c` is an equivalent escape.
fn script_safe_json<T: Serialize>(value: &T) -> Result<String, RenderError> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}
