//! Marker styling: fill colours, contrasting outlines and the legend.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use wind_map_color::palette::palette_for;
use wind_map_color::{ColorError, OutlineColor, Rgb, contrasting_outline, parse_color};
use wind_map_turbine_models::{DataRank, Position, TurbineRecord};

use crate::RenderError;
use crate::tiles::DEFAULT_TILE_PROVIDER;

/// Default map title.
pub const DEFAULT_TITLE: &str = "Wind turbines in OpenStreetMap, ranked by OSM metadata quality";

/// Column the legend groups by unless told otherwise.
pub const DEFAULT_LEGEND_GROUP: &str = "data_rank";

/// Group label for records with no value in the grouping column.
pub const MISSING_GROUP_LABEL: &str = "n/a";

/// How marker fill colours are chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FillMode {
    /// Each record's rank colour (sienna, silver, gold).
    #[default]
    RankColor,
    /// One palette colour per distinct value of `group_by`.
    Auto {
        /// Column whose values are coloured.
        group_by: String,
    },
    /// The same colour for every marker, outlined in black.
    Fixed(Rgb),
}

impl FromStr for FillMode {
    type Err = ColorError;

    /// Parses `rank`, `auto`, `auto:<column>` or any colour accepted by
    /// [`parse_color`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("rank") {
            return Ok(Self::RankColor);
        }
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto {
                group_by: DEFAULT_LEGEND_GROUP.to_string(),
            });
        }
        if let Some(column) = trimmed.strip_prefix("auto:") {
            return Ok(Self::Auto {
                group_by: column.trim().to_string(),
            });
        }
        parse_color(trimmed).map(Self::Fixed)
    }
}

/// Presentation options for a rendered map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Page and map title.
    pub title: String,
    /// Tile provider id.
    pub tile: String,
    /// Map width in pixels.
    pub width: u32,
    /// Map height in pixels.
    pub height: u32,
    /// Marker diameter in pixels.
    pub marker_size: f64,
    /// Marker outline width in pixels.
    pub line_width: f64,
    /// Marker opacity, `0.0..=1.0`.
    pub alpha: f64,
    /// Fill colour strategy.
    pub fill: FillMode,
    /// Column the legend groups by. Ignored in [`FillMode::Auto`], where
    /// the legend follows the colour groups.
    pub legend_group: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            tile: DEFAULT_TILE_PROVIDER.to_string(),
            width: 800,
            height: 800,
            marker_size: 14.0,
            line_width: 1.0,
            alpha: 0.8,
            fill: FillMode::default(),
            legend_group: DEFAULT_LEGEND_GROUP.to_string(),
        }
    }
}

/// A positioned record with its marker style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledPoint {
    /// The source record.
    pub record: TurbineRecord,
    /// The record's position.
    pub position: Position,
    /// Marker fill.
    pub fill: Rgb,
    /// Marker outline.
    pub line: OutlineColor,
    /// Legend label this marker belongs to.
    pub legend: String,
}

/// One legend row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    /// Group label.
    pub label: String,
    /// Fill of the first marker in the group.
    pub fill: Rgb,
    /// Outline of the first marker in the group.
    pub line: OutlineColor,
    /// Markers in the group.
    pub count: usize,
}

/// Styled markers ready for output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyledMap {
    /// One entry per positioned record, in input order.
    pub points: Vec<StyledPoint>,
    /// Legend rows. Ranks come best first, other labels sorted.
    pub legend: Vec<LegendEntry>,
    /// Records left out because they have no position.
    pub skipped: usize,
}

impl StyledMap {
    /// `(south, west, north, east)` of all points, if any.
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.points.iter().map(|p| p.position).fold(None, |acc, p| {
            Some(match acc {
                None => (p.lat, p.lon, p.lat, p.lon),
                Some((s, w, n, e)) => (s.min(p.lat), w.min(p.lon), n.max(p.lat), e.max(p.lon)),
            })
        })
    }
}

/// Styles every positioned record according to `options`.
///
/// # Errors
///
/// Returns [`RenderError::UnknownColumn`] if the grouping column does not
/// exist, and [`RenderError::Color`] if a rank colour cannot be resolved.
pub fn style_records(
    records: &[TurbineRecord],
    options: &MapOptions,
) -> Result<StyledMap, RenderError> {
    let legend_column = match &options.fill {
        FillMode::Auto { group_by } => group_by.as_str(),
        FillMode::RankColor | FillMode::Fixed(_) => options.legend_group.as_str(),
    };
    if !TurbineRecord::is_known_column(legend_column) {
        return Err(RenderError::UnknownColumn(legend_column.to_string()));
    }

    let positioned: Vec<(&TurbineRecord, Position)> = records
        .iter()
        .filter_map(|r| r.position.map(|p| (r, p)))
        .collect();
    let skipped = records.len() - positioned.len();
    if skipped > 0 {
        log::warn!("Skipping {skipped} records without coordinates");
    }

    let auto_colors = match &options.fill {
        FillMode::Auto { group_by } => {
            group_colors(positioned.iter().map(|(r, _)| group_label(r, group_by)))
        }
        FillMode::RankColor | FillMode::Fixed(_) => BTreeMap::new(),
    };

    let mut points = Vec::with_capacity(positioned.len());
    for (record, position) in positioned {
        let legend = group_label(record, legend_column);

        let (fill, line) = match &options.fill {
            FillMode::Fixed(rgb) => (*rgb, OutlineColor::Black),
            FillMode::Auto { .. } => {
                let fill = auto_colors
                    .get(&legend)
                    .copied()
                    .ok_or_else(|| RenderError::UnknownColumn(legend_column.to_string()))?;
                (fill, contrasting_outline(fill))
            }
            FillMode::RankColor => {
                let fill = parse_color(record.rank.color_name())?;
                (fill, contrasting_outline(fill))
            }
        };

        points.push(StyledPoint {
            record: record.clone(),
            position,
            fill,
            line,
            legend,
        });
    }

    let legend = build_legend(&points);
    log::debug!(
        "Styled {} markers in {} legend groups",
        points.len(),
        legend.len()
    );

    Ok(StyledMap {
        points,
        legend,
        skipped,
    })
}

fn group_label(record: &TurbineRecord, column: &str) -> String {
    record
        .column(column)
        .unwrap_or_else(|| MISSING_GROUP_LABEL.to_string())
}

/// Maps each distinct label, in sorted order, to a palette colour.
fn group_colors(labels: impl Iterator<Item = String>) -> BTreeMap<String, Rgb> {
    let groups: BTreeSet<String> = labels.collect();
    let palette = palette_for(groups.len());
    groups.into_iter().zip(palette).collect()
}

fn build_legend(points: &[StyledPoint]) -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = Vec::new();
    let mut index: BTreeMap<&str, usize> = BTreeMap::new();

    for point in points {
        if let Some(&i) = index.get(point.legend.as_str()) {
            entries[i].count += 1;
        } else {
            index.insert(point.legend.as_str(), entries.len());
            entries.push(LegendEntry {
                label: point.legend.clone(),
                fill: point.fill,
                line: point.line,
                count: 1,
            });
        }
    }

    entries.sort_by(|a, b| legend_key(&a.label).cmp(&legend_key(&b.label)));
    entries
}

fn legend_key(label: &str) -> (Option<Reverse<DataRank>>, &str) {
    (label.parse::<DataRank>().ok().map(Reverse), label)
}

#[cfg(test)]
mod tests {
    use wind_map_color::palette::{CATEGORY10, viridis};
    use wind_map_turbine_models::{GOLD_FIELDS, OsmElementType};

    use super::*;

    fn record(id: i64, rank: DataRank, manufacturer: Option<&str>) -> TurbineRecord {
        let mut record = TurbineRecord::new(id, OsmElementType::Node);
        record.position = Some(Position {
            lat: 51.5 + f64::from(u32::try_from(id).unwrap()) * 0.01,
            lon: 2.8,
            x: 0.0,
            y: 0.0,
        });
        record.rank = rank;
        record.manufacturer = manufacturer.map(str::to_string);
        record
    }

    #[test]
    fn parses_fill_modes() {
        assert_eq!("rank".parse::<FillMode>().unwrap(), FillMode::RankColor);
        assert_eq!(
            "auto".parse::<FillMode>().unwrap(),
            FillMode::Auto {
                group_by: "data_rank".to_string()
            }
        );
        assert_eq!(
            "auto:manufacturer".parse::<FillMode>().unwrap(),
            FillMode::Auto {
                group_by: "manufacturer".to_string()
            }
        );
        assert_eq!(
            "#ff0000".parse::<FillMode>().unwrap(),
            FillMode::Fixed(Rgb::new(255, 0, 0))
        );
        assert!("not-a-colour".parse::<FillMode>().is_err());
    }

    #[test]
    fn defaults() {
        let options = MapOptions::default();
        assert_eq!((options.width, options.height), (800, 800));
        assert!((options.marker_size - 14.0).abs() < f64::EPSILON);
        assert!((options.alpha - 0.8).abs() < f64::EPSILON);
        assert_eq!(options.fill, FillMode::RankColor);
        assert_eq!(options.legend_group, "data_rank");
        assert_eq!(options.tile, "OpenMap");
    }

    #[test]
    fn rank_colours_with_contrasting_outlines() {
        let records = vec![
            record(1, DataRank::Gold, None),
            record(2, DataRank::Bronze, None),
            record(3, DataRank::Silver, None),
        ];
        let map = style_records(&records, &MapOptions::default()).unwrap();

        assert_eq!(map.points[0].fill, Rgb::new(255, 215, 0));
        assert_eq!(map.points[0].line, OutlineColor::Black);
        assert_eq!(map.points[1].fill, Rgb::new(160, 82, 45));
        assert_eq!(map.points[1].line, OutlineColor::White);
        assert_eq!(map.points[2].fill, Rgb::new(192, 192, 192));
        assert_eq!(map.points[2].line, OutlineColor::Black);

        let labels: Vec<&str> = map.legend.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Gold", "Silver", "Bronze"]);
    }

    #[test]
    fn skips_unpositioned_records() {
        let mut unpositioned = record(2, DataRank::Bronze, None);
        unpositioned.position = None;
        let map = style_records(
            &[record(1, DataRank::Bronze, None), unpositioned],
            &MapOptions::default(),
        )
        .unwrap();
        assert_eq!(map.points.len(), 1);
        assert_eq!(map.skipped, 1);
        assert_eq!(map.legend[0].count, 1);
    }

    #[test]
    fn auto_fill_uses_sorted_groups_and_category10() {
        let records = vec![
            record(1, DataRank::Bronze, Some("Vestas")),
            record(2, DataRank::Bronze, Some("Siemens")),
            record(3, DataRank::Bronze, None),
            record(4, DataRank::Bronze, Some("Vestas")),
        ];
        let options = MapOptions {
            fill: FillMode::Auto {
                group_by: "manufacturer".to_string(),
            },
            ..MapOptions::default()
        };
        let map = style_records(&records, &options).unwrap();

        // Sorted groups: "Siemens", "Vestas", "n/a".
        assert_eq!(map.points[1].fill, CATEGORY10[0]);
        assert_eq!(map.points[0].fill, CATEGORY10[1]);
        assert_eq!(map.points[3].fill, CATEGORY10[1]);
        assert_eq!(map.points[2].fill, CATEGORY10[2]);
        assert_eq!(map.points[2].legend, MISSING_GROUP_LABEL);

        let vestas = map.legend.iter().find(|e| e.label == "Vestas").unwrap();
        assert_eq!(vestas.count, 2);
    }

    #[test]
    fn auto_fill_switches_to_viridis_beyond_ten_groups() {
        let records: Vec<TurbineRecord> = (0..12)
            .map(|i| record(i, DataRank::Bronze, None))
            .collect();
        let options = MapOptions {
            fill: FillMode::Auto {
                group_by: "id".to_string(),
            },
            ..MapOptions::default()
        };
        let map = style_records(&records, &options).unwrap();
        let palette = viridis(12);

        for point in &map.points {
            assert!(palette.contains(&point.fill));
            assert_eq!(point.line, contrasting_outline(point.fill));
        }
        assert_eq!(map.legend.len(), 12);
    }

    #[test]
    fn fixed_fill_is_outlined_in_black() {
        let options = MapOptions {
            fill: FillMode::Fixed(Rgb::new(0, 0, 128)),
            ..MapOptions::default()
        };
        let map = style_records(&[record(1, DataRank::Gold, None)], &options).unwrap();
        assert_eq!(map.points[0].fill, Rgb::new(0, 0, 128));
        assert_eq!(map.points[0].line, OutlineColor::Black);
    }

    #[test]
    fn unknown_group_column_is_an_error() {
        let options = MapOptions {
            fill: FillMode::Auto {
                group_by: "colour_of_blades".to_string(),
            },
            ..MapOptions::default()
        };
        assert!(matches!(
            style_records(&[], &options),
            Err(RenderError::UnknownColumn(_))
        ));
    }

    #[test]
    fn bounds_cover_all_points() {
        let map = style_records(
            &[
                record(1, DataRank::Bronze, None),
                record(9, DataRank::Bronze, None),
            ],
            &MapOptions::default(),
        )
        .unwrap();
        let (s, w, n, e) = map.bounds().unwrap();
        assert!((s - 51.51).abs() < 1e-9);
        assert!((n - 51.59).abs() < 1e-9);
        assert!((w - 2.8).abs() < f64::EPSILON);
        assert!((e - 2.8).abs() < f64::EPSILON);
        assert!(StyledMap::default().bounds().is_none());
    }

    #[test]
    fn gold_record_keeps_gold_colour_regardless_of_fields() {
        let mut gold = record(1, DataRank::Gold, None);
        for field in GOLD_FIELDS {
            *gold.field_mut(*field) = Some("x".to_string());
        }
        let map = style_records(&[gold], &MapOptions::default()).unwrap();
        assert_eq!(map.legend[0].label, "Gold");
    }
}
