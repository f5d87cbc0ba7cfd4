//! Interactive mode: prompts for a region, basemap and styling, then runs
//! the render pipeline.

use std::path::PathBuf;

use dialoguer::{Confirm, Input, Select};
use wind_map_cli_utils::MultiProgress;
use wind_map_overpass::{BoundingBox, all_regions};
use wind_map_render::tiles::all_tile_providers;
use wind_map_render::{FillMode, MapOptions};

use crate::pipeline::{self, Area, FetchConfig, RenderConfig};

/// Marker colouring choices offered in the menu.
enum FillChoice {
    Rank,
    Manufacturer,
    GeneratorType,
    Offshore,
}

impl FillChoice {
    const ALL: &[Self] = &[
        Self::Rank,
        Self::Manufacturer,
        Self::GeneratorType,
        Self::Offshore,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Rank => "Data quality rank (gold / silver / bronze)",
            Self::Manufacturer => "Manufacturer",
            Self::GeneratorType => "Generator type",
            Self::Offshore => "Offshore flag",
        }
    }

    fn fill_mode(&self) -> FillMode {
        let group_by = match self {
            Self::Rank => return FillMode::RankColor,
            Self::Manufacturer => "manufacturer",
            Self::GeneratorType => "generator_type",
            Self::Offshore => "offshore",
        };
        FillMode::Auto {
            group_by: group_by.to_string(),
        }
    }
}

/// Runs the interactive prompts and renders the chosen map.
///
/// # Errors
///
/// Returns an error if a prompt fails or the pipeline fails.
#[allow(clippy::future_not_send)]
pub async fn run(
    multi: &MultiProgress,
    fetch: FetchConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let regions = all_regions();
    let mut region_labels: Vec<String> = regions
        .iter()
        .map(|r| format!("{} ({})", r.name, r.bbox))
        .collect();
    region_labels.push("Custom bounding box".to_string());

    let region_idx = Select::new()
        .with_prompt("Area")
        .items(&region_labels)
        .default(0)
        .interact()?;

    let area = if let Some(region) = regions.get(region_idx) {
        Area {
            label: region.name.clone(),
            bbox: region.bbox,
            cache: PathBuf::from(&region.cache_file),
        }
    } else {
        let bbox_str: String = Input::new()
            .with_prompt("Bounding box as south,west,north,east")
            .validate_with(|input: &String| -> Result<(), String> {
                input
                    .parse::<BoundingBox>()
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()?;
        let bbox: BoundingBox = bbox_str.parse()?;
        Area {
            label: bbox.to_string(),
            bbox,
            cache: pipeline::bbox_cache_path(&bbox),
        }
    };

    let tiles = all_tile_providers();
    let tile_labels: Vec<&str> = tiles.iter().map(|t| t.name.as_str()).collect();
    let tile_idx = Select::new()
        .with_prompt("Basemap")
        .items(&tile_labels)
        .default(0)
        .interact()?;

    let fill_labels: Vec<&str> = FillChoice::ALL.iter().map(FillChoice::label).collect();
    let fill_idx = Select::new()
        .with_prompt("Colour markers by")
        .items(&fill_labels)
        .default(0)
        .interact()?;

    let refresh = Confirm::new()
        .with_prompt(format!(
            "Re-download from Overpass instead of using {}?",
            area.cache.display()
        ))
        .default(false)
        .interact()?;

    let output: String = Input::new()
        .with_prompt("Output HTML file")
        .default("wind_turbines.html".to_string())
        .interact_text()?;

    let config = RenderConfig {
        area,
        fetch,
        refresh,
        options: MapOptions {
            tile: tiles[tile_idx].id.clone(),
            fill: FillChoice::ALL[fill_idx].fill_mode(),
            ..MapOptions::default()
        },
        output: PathBuf::from(output),
        geojson: None,
    };

    let summary = pipeline::render(&config, multi).await?;
    println!();
    print!("{summary}");
    println!("Map written to {}", config.output.display());

    Ok(())
}
