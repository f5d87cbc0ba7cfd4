//! Fetch -> normalize -> rank -> render.
//!
//! Rows come from the CSV cache when it can be read, otherwise from a
//! single Overpass request whose flattened result is written back to the
//! cache. Everything after that is local computation.

use std::path::PathBuf;
use std::time::Instant;

use wind_map_cli_utils::{IndicatifProgress, MultiProgress};
use wind_map_overpass::{BoundingBox, OverpassClient, RetryPolicy};
use wind_map_render::geojson_output::write_geojson;
use wind_map_render::html::write_html;
use wind_map_render::{MapOptions, find_tile_provider, style_records};
use wind_map_turbine::FlatRow;
use wind_map_turbine::cache::{read_cache, write_cache};
use wind_map_turbine::flatten::flatten_elements;
use wind_map_turbine::normalize::normalize_rows;
use wind_map_turbine::summary::RankSummary;

/// Where to query and where to cache the answer.
#[derive(Debug, Clone)]
pub struct Area {
    /// Label for log output (region name or the box itself).
    pub label: String,
    /// The box to query.
    pub bbox: BoundingBox,
    /// CSV cache path.
    pub cache: PathBuf,
}

/// How to reach the Overpass API.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Interpreter endpoint.
    pub overpass_url: String,
    /// Retries after a rate-limit or server error.
    pub max_retries: u32,
}

impl FetchConfig {
    fn client(&self) -> Result<OverpassClient, Box<dyn std::error::Error>> {
        let retry = RetryPolicy::default().with_max_retries(self.max_retries);
        Ok(OverpassClient::new(&self.overpass_url)?.with_retry(retry))
    }
}

/// Everything a render run needs.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Area and cache.
    pub area: Area,
    /// Overpass settings, used on cache miss or refresh.
    pub fetch: FetchConfig,
    /// Skip the cache and always query Overpass.
    pub refresh: bool,
    /// Map presentation.
    pub options: MapOptions,
    /// HTML output path.
    pub output: PathBuf,
    /// Optional GeoJSON output path.
    pub geojson: Option<PathBuf>,
}

/// Queries Overpass for `area` and returns the flattened rows.
///
/// # Errors
///
/// Returns an error if the request fails or the answer is not JSON.
#[allow(clippy::future_not_send)]
pub async fn fetch_rows(
    area: &Area,
    fetch: &FetchConfig,
    multi: &MultiProgress,
) -> Result<Vec<FlatRow>, Box<dyn std::error::Error>> {
    let client = fetch.client()?;
    let spinner = IndicatifProgress::request_spinner(
        multi,
        &format!("Querying Overpass for {}", area.label),
    );

    let result = client.fetch_wind_turbines(&area.bbox).await;
    spinner.finish_and_clear();
    let response = result?;

    if let Some(timestamp) = response.data_timestamp() {
        log::info!("OSM data as of {timestamp}");
    }

    Ok(flatten_elements(&response.elements))
}

/// Fetches `area` and writes the rows to its cache.
///
/// # Errors
///
/// Returns an error if the fetch fails or the cache cannot be written.
#[allow(clippy::future_not_send)]
pub async fn fetch_to_cache(
    area: &Area,
    fetch: &FetchConfig,
    multi: &MultiProgress,
) -> Result<Vec<FlatRow>, Box<dyn std::error::Error>> {
    let rows = fetch_rows(area, fetch, multi).await?;
    write_cache(&area.cache, &rows)?;
    Ok(rows)
}

/// Reads the cache for `area`, falling back to Overpass if it cannot be
/// read or `refresh` is set.
///
/// # Errors
///
/// Returns an error only if the fallback fetch (or writing its result)
/// fails.
#[allow(clippy::future_not_send)]
pub async fn load_or_fetch(
    area: &Area,
    fetch: &FetchConfig,
    refresh: bool,
    multi: &MultiProgress,
) -> Result<Vec<FlatRow>, Box<dyn std::error::Error>> {
    if refresh {
        log::info!("Refresh requested, ignoring {}", area.cache.display());
    } else {
        match read_cache(&area.cache) {
            Ok(rows) => return Ok(rows),
            Err(e) => log::warn!(
                "Cache {} unavailable ({e}), fetching from Overpass",
                area.cache.display()
            ),
        }
    }

    fetch_to_cache(area, fetch, multi).await
}

/// Runs the full pipeline and writes the map.
///
/// # Errors
///
/// Returns an error if loading, normalizing, styling or writing fails.
#[allow(clippy::future_not_send)]
pub async fn render(
    config: &RenderConfig,
    multi: &MultiProgress,
) -> Result<RankSummary, Box<dyn std::error::Error>> {
    let start = Instant::now();

    let tile = find_tile_provider(&config.options.tile)?;
    let rows = load_or_fetch(&config.area, &config.fetch, config.refresh, multi).await?;

    let progress = IndicatifProgress::records_bar(multi, "Normalizing records");
    let records = normalize_rows(&rows, progress.as_ref())?;

    let summary = RankSummary::from_records(&records);
    let map = style_records(&records, &config.options)?;

    write_html(&config.output, &map, &config.options, &tile)?;
    if let Some(path) = &config.geojson {
        write_geojson(path, &map)?;
    }

    log::info!(
        "Rendered {} of {} records in {:.1}s",
        map.points.len(),
        summary.total,
        start.elapsed().as_secs_f64()
    );

    Ok(summary)
}

/// Default cache file for an ad-hoc bounding box.
#[must_use]
pub fn bbox_cache_path(bbox: &BoundingBox) -> PathBuf {
    let name = format!(
        "turbines_{}_{}_{}_{}.csv",
        bbox.south, bbox.west, bbox.north, bbox.east
    );
    PathBuf::from(name.replace('-', "m"))
}
