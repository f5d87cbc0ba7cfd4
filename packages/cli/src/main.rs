#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the wind turbine map tool.
//!
//! Fetches wind turbines from the Overpass API (or a CSV cache), ranks
//! them by OSM metadata completeness and renders an interactive map.
//! Without a subcommand, runs an interactive menu.
//!
//! Uses `indicatif-log-bridge` (via [`wind_map_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and progress bars never fight for the terminal.

mod interactive;
mod pipeline;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wind_map_overpass::retry::DEFAULT_MAX_RETRIES;
use wind_map_overpass::{BoundingBox, DEFAULT_OVERPASS_URL, all_regions, find_region};
use wind_map_render::style::{DEFAULT_LEGEND_GROUP, DEFAULT_TITLE};
use wind_map_render::tiles::{DEFAULT_TILE_PROVIDER, all_tile_providers};
use wind_map_render::{FillMode, MapOptions};

use crate::pipeline::{Area, FetchConfig, RenderConfig};

/// Region used when neither `--region` nor `--bbox` is given.
const DEFAULT_REGION: &str = "belgian_offshore";

#[derive(Parser)]
#[command(
    name = "wind_map",
    about = "Map OpenStreetMap wind turbines, ranked by metadata quality"
)]
struct Cli {
    #[command(flatten)]
    overpass: OverpassArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct OverpassArgs {
    /// Overpass interpreter endpoint
    #[arg(
        long,
        global = true,
        env = "WIND_MAP_OVERPASS_URL",
        default_value = DEFAULT_OVERPASS_URL
    )]
    overpass_url: String,
    /// Retries after a rate-limit or server error
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_RETRIES)]
    max_retries: u32,
}

#[derive(Args)]
struct AreaArgs {
    /// Region preset id (see `wind_map regions`)
    #[arg(long, conflicts_with = "bbox")]
    region: Option<String>,
    /// Bounding box as south,west,north,east (e.g. "51.4,2.6,51.9,3.2")
    #[arg(long, allow_hyphen_values = true)]
    bbox: Option<String>,
    /// CSV cache file (defaults to the region's cache file)
    #[arg(long)]
    cache: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Query Overpass and write the flattened CSV cache
    Fetch {
        #[command(flatten)]
        area: AreaArgs,
    },
    /// Load the cache (or fetch), rank and render the map
    Render {
        #[command(flatten)]
        area: AreaArgs,
        /// Ignore the cache and query Overpass
        #[arg(long)]
        refresh: bool,
        /// Basemap tile provider (see `wind_map tiles`)
        #[arg(long, default_value = DEFAULT_TILE_PROVIDER)]
        tile: String,
        /// Marker fill: `rank`, `auto`, `auto:<column>` or a colour
        /// (name, `#rrggbb`, `r,g,b`)
        #[arg(long, default_value = "rank")]
        fill: String,
        /// Column to group and colour by with `--fill auto`
        #[arg(long)]
        group_by: Option<String>,
        /// Column the legend groups by
        #[arg(long, default_value = DEFAULT_LEGEND_GROUP)]
        legend_group: String,
        /// Map title
        #[arg(long, default_value = DEFAULT_TITLE)]
        title: String,
        /// HTML output file
        #[arg(long, short, default_value = "wind_turbines.html")]
        output: PathBuf,
        /// Also write the styled points as GeoJSON
        #[arg(long)]
        geojson: Option<PathBuf>,
        /// Map width in pixels
        #[arg(long, default_value_t = 800)]
        width: u32,
        /// Map height in pixels
        #[arg(long, default_value_t = 800)]
        height: u32,
        /// Marker diameter in pixels
        #[arg(long, default_value_t = 14.0)]
        marker_size: f64,
    },
    /// List region presets
    Regions,
    /// List basemap tile providers
    Tiles,
}

impl AreaArgs {
    fn resolve(&self) -> Result<Area, Box<dyn std::error::Error>> {
        if let Some(bbox_str) = &self.bbox {
            let bbox: BoundingBox = bbox_str.parse()?;
            return Ok(Area {
                label: bbox.to_string(),
                bbox,
                cache: self
                    .cache
                    .clone()
                    .unwrap_or_else(|| pipeline::bbox_cache_path(&bbox)),
            });
        }

        let region = find_region(self.region.as_deref().unwrap_or(DEFAULT_REGION))?;
        Ok(Area {
            label: region.name,
            bbox: region.bbox,
            cache: self
                .cache
                .clone()
                .unwrap_or_else(|| PathBuf::from(region.cache_file)),
        })
    }
}

fn fill_mode(fill: &str, group_by: Option<String>) -> Result<FillMode, Box<dyn std::error::Error>> {
    let mode = fill.parse::<FillMode>()?;
    Ok(match (mode, group_by) {
        (FillMode::Auto { .. }, Some(group_by)) => FillMode::Auto { group_by },
        (mode, Some(_)) => {
            log::warn!("--group-by only applies to --fill auto, ignoring it");
            mode
        }
        (mode, None) => mode,
    })
}

#[allow(clippy::too_many_lines)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = wind_map_cli_utils::init_logger();
    let cli = Cli::parse();

    let fetch = FetchConfig {
        overpass_url: cli.overpass.overpass_url,
        max_retries: cli.overpass.max_retries,
    };

    let Some(command) = cli.command else {
        println!("Wind Turbine Map");
        println!();
        return interactive::run(&multi, fetch).await;
    };

    match command {
        Commands::Regions => {
            println!("{:<20} {:<28} BBOX", "ID", "NAME");
            println!("{}", "-".repeat(70));
            for region in all_regions() {
                println!("{:<20} {:<28} {}", region.id, region.name, region.bbox);
            }
        }
        Commands::Tiles => {
            println!("{:<14} {:<26} URL", "ID", "NAME");
            println!("{}", "-".repeat(70));
            for tile in all_tile_providers() {
                println!("{:<14} {:<26} {}", tile.id, tile.name, tile.url);
            }
        }
        Commands::Fetch { area } => {
            let area = area.resolve()?;
            let rows = pipeline::fetch_to_cache(&area, &fetch, &multi).await?;
            println!(
                "Cached {} elements for {} in {}",
                rows.len(),
                area.label,
                area.cache.display()
            );
        }
        Commands::Render {
            area,
            refresh,
            tile,
            fill,
            group_by,
            legend_group,
            title,
            output,
            geojson,
            width,
            height,
            marker_size,
        } => {
            let config = RenderConfig {
                area: area.resolve()?,
                fetch,
                refresh,
                options: MapOptions {
                    title,
                    tile,
                    width,
                    height,
                    marker_size,
                    fill: fill_mode(&fill, group_by)?,
                    legend_group,
                    ..MapOptions::default()
                },
                output,
                geojson,
            };

            let summary = pipeline::render(&config, &multi).await?;
            print!("{summary}");
            println!("Map written to {}", config.output.display());
            if let Some(path) = &config.geojson {
                println!("GeoJSON written to {}", path.display());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_the_offshore_region() {
        let area = AreaArgs {
            region: None,
            bbox: None,
            cache: None,
        }
        .resolve()
        .unwrap();
        assert_eq!(area.cache, PathBuf::from("turbines_offshore.csv"));
    }

    #[test]
    fn bbox_overrides_region_cache() {
        let area = AreaArgs {
            region: None,
            bbox: Some("55,-2,56,-1".to_string()),
            cache: Some(PathBuf::from("mine.csv")),
        }
        .resolve()
        .unwrap();
        assert_eq!(area.bbox.to_string(), "(55,-2,56,-1)");
        assert_eq!(area.cache, PathBuf::from("mine.csv"));
    }

    #[test]
    fn parses_render_arguments() {
        let cli = Cli::try_parse_from([
            "wind_map",
            "render",
            "--region",
            "scotland_east",
            "--fill",
            "auto",
            "--group-by",
            "manufacturer",
            "--tile",
            "ESRI",
        ])
        .unwrap();
        let Some(Commands::Render {
            fill, group_by, tile, ..
        }) = cli.command
        else {
            panic!("expected render");
        };
        assert_eq!(tile, "ESRI");
        assert_eq!(
            fill_mode(&fill, group_by).unwrap(),
            FillMode::Auto {
                group_by: "manufacturer".to_string()
            }
        );
    }

    #[test]
    fn fixed_colour_fill() {
        assert!(matches!(
            fill_mode("navy", None).unwrap(),
            FillMode::Fixed(_)
        ));
        assert!(fill_mode("nonsense-colour", None).is_err());
    }
}
