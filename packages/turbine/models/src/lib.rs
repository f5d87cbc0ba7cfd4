#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Wind turbine record types and the data-quality rank.
//!
//! Every OpenStreetMap element returned for a wind turbine query becomes
//! exactly one [`TurbineRecord`]. Its [`DataRank`] is a pure function of
//! which [`MetadataField`]s are present.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Base URL of the OpenStreetMap website, used for click-through links.
pub const OSM_BROWSE_URL: &str = "https://www.openstreetmap.org";

/// The kind of OSM element a record was built from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OsmElementType {
    /// A single point.
    #[default]
    Node,
    /// A closed or open way; positioned at its center.
    Way,
    /// A relation; positioned at its center.
    #[strum(to_string = "relation", serialize = "rel")]
    Relation,
}

impl OsmElementType {
    /// Link to the element's page on openstreetmap.org.
    #[must_use]
    pub fn osm_url(self, id: i64) -> String {
        format!("{OSM_BROWSE_URL}/{self}/{id}/")
    }
}

/// A record location in WGS84 degrees plus its web mercator projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lon: f64,
    /// Easting in EPSG:3857 metres.
    pub x: f64,
    /// Northing in EPSG:3857 metres.
    pub y: f64,
}

/// Optional descriptive fields taken from OSM tags.
///
/// The string form is the normalized column name: the tag key with `:`
/// replaced by `_` (e.g. `height:hub` becomes `height_hub`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MetadataField {
    /// Plant or turbine name.
    Name,
    /// Where the mapper took the data from.
    Source,
    /// Rated capacity, usually with a unit (e.g. `"3 MW"`).
    GeneratorOutputElectricity,
    /// Commissioning date.
    StartDate,
    /// Hub height in metres.
    HeightHub,
    /// Generator type (e.g. `"horizontal_axis"`).
    GeneratorType,
    /// Rotor diameter in metres.
    RotorDiameter,
    /// Turbine manufacturer.
    Manufacturer,
    /// Turbine model.
    Model,
    /// Offshore flag.
    Offshore,
    /// Floating foundation flag.
    Floating,
}

/// Fields a record needs for [`DataRank::Silver`].
pub const SILVER_FIELDS: &[MetadataField] =
    &[MetadataField::HeightHub, MetadataField::RotorDiameter];

/// Fields a record needs for [`DataRank::Gold`]. A superset of
/// [`SILVER_FIELDS`].
pub const GOLD_FIELDS: &[MetadataField] = &[
    MetadataField::Source,
    MetadataField::GeneratorOutputElectricity,
    MetadataField::StartDate,
    MetadataField::HeightHub,
    MetadataField::GeneratorType,
    MetadataField::RotorDiameter,
    MetadataField::Manufacturer,
    MetadataField::Model,
    MetadataField::Offshore,
    MetadataField::Floating,
];

/// Output column order for tabular views of a record.
pub const COLUMNS: &[&str] = &[
    "id",
    "osm_type",
    "name",
    "source",
    "lat",
    "lon",
    "generator_output_electricity",
    "start_date",
    "height_hub",
    "generator_type",
    "rotor_diameter",
    "manufacturer",
    "model",
    "offshore",
    "floating",
    "data_rank",
    "data_rank_colour",
];

/// Data-quality tier of a record, from least to most complete.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum DataRank {
    /// Fails the silver requirements.
    #[default]
    Bronze,
    /// Has hub height and rotor diameter.
    Silver,
    /// Has every field in [`GOLD_FIELDS`].
    Gold,
}

impl DataRank {
    /// All ranks, best first (legend order).
    pub const ALL_DESCENDING: &[Self] = &[Self::Gold, Self::Silver, Self::Bronze];

    /// Named display colour for markers of this rank.
    #[must_use]
    pub const fn color_name(self) -> &'static str {
        match self {
            Self::Bronze => "sienna",
            Self::Silver => "silver",
            Self::Gold => "gold",
        }
    }

    /// Fields that must all be present to attain this rank.
    #[must_use]
    pub const fn required_fields(self) -> &'static [MetadataField] {
        match self {
            Self::Bronze => &[],
            Self::Silver => SILVER_FIELDS,
            Self::Gold => GOLD_FIELDS,
        }
    }
}

/// One wind turbine (or turbine site) from OpenStreetMap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurbineRecord {
    /// OSM element id. Unique per element type.
    pub id: i64,
    /// OSM element type.
    pub osm_type: OsmElementType,
    /// Location. `None` when the source row carried no coordinates.
    pub position: Option<Position>,
    /// `name` tag.
    pub name: Option<String>,
    /// `source` tag.
    pub source: Option<String>,
    /// `generator:output:electricity` tag.
    pub generator_output_electricity: Option<String>,
    /// `start_date` tag.
    pub start_date: Option<String>,
    /// `height:hub` tag.
    pub height_hub: Option<String>,
    /// `generator:type` tag.
    pub generator_type: Option<String>,
    /// `rotor:diameter` tag.
    pub rotor_diameter: Option<String>,
    /// `manufacturer` tag.
    pub manufacturer: Option<String>,
    /// `model` tag.
    pub model: Option<String>,
    /// `offshore` tag.
    pub offshore: Option<String>,
    /// `floating` tag.
    pub floating: Option<String>,
    /// Data-quality tier derived from the fields above.
    pub rank: DataRank,
}

impl TurbineRecord {
    /// Creates a record with no position and no metadata.
    #[must_use]
    pub fn new(id: i64, osm_type: OsmElementType) -> Self {
        Self {
            id,
            osm_type,
            ..Self::default()
        }
    }

    /// Value of a metadata field, if present.
    #[must_use]
    pub fn field(&self, field: MetadataField) -> Option<&str> {
        match field {
            MetadataField::Name => self.name.as_deref(),
            MetadataField::Source => self.source.as_deref(),
            MetadataField::GeneratorOutputElectricity => {
                self.generator_output_electricity.as_deref()
            }
            MetadataField::StartDate => self.start_date.as_deref(),
            MetadataField::HeightHub => self.height_hub.as_deref(),
            MetadataField::GeneratorType => self.generator_type.as_deref(),
            MetadataField::RotorDiameter => self.rotor_diameter.as_deref(),
            MetadataField::Manufacturer => self.manufacturer.as_deref(),
            MetadataField::Model => self.model.as_deref(),
            MetadataField::Offshore => self.offshore.as_deref(),
            MetadataField::Floating => self.floating.as_deref(),
        }
    }

    /// Mutable slot for a metadata field.
    pub fn field_mut(&mut self, field: MetadataField) -> &mut Option<String> {
        match field {
            MetadataField::Name => &mut self.name,
            MetadataField::Source => &mut self.source,
            MetadataField::GeneratorOutputElectricity => &mut self.generator_output_electricity,
            MetadataField::StartDate => &mut self.start_date,
            MetadataField::HeightHub => &mut self.height_hub,
            MetadataField::GeneratorType => &mut self.generator_type,
            MetadataField::RotorDiameter => &mut self.rotor_diameter,
            MetadataField::Manufacturer => &mut self.manufacturer,
            MetadataField::Model => &mut self.model,
            MetadataField::Offshore => &mut self.offshore,
            MetadataField::Floating => &mut self.floating,
        }
    }

    /// Whether every field in `fields` is present.
    #[must_use]
    pub fn has_all(&self, fields: &[MetadataField]) -> bool {
        fields.iter().all(|f| self.field(*f).is_some())
    }

    /// Link to this record's OSM page.
    #[must_use]
    pub fn osm_url(&self) -> String {
        self.osm_type.osm_url(self.id)
    }

    /// `(lat, lon)` formatted for display, e.g. `"(51.6, 2.9)"`.
    #[must_use]
    pub fn coordinates_label(&self) -> Option<String> {
        self.position.map(|p| format!("({}, {})", p.lat, p.lon))
    }

    /// Display value of a column by name.
    ///
    /// Accepts every name in [`COLUMNS`] plus `x`, `y` and `coordinates`.
    /// Returns `None` for unknown columns and for absent values.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<String> {
        if let Ok(field) = name.parse::<MetadataField>() {
            return self.field(field).map(str::to_string);
        }

        match name {
            "id" => Some(self.id.to_string()),
            "osm_type" | "type" => Some(self.osm_type.to_string()),
            "lat" => self.position.map(|p| p.lat.to_string()),
            "lon" => self.position.map(|p| p.lon.to_string()),
            "x" => self.position.map(|p| p.x.to_string()),
            "y" => self.position.map(|p| p.y.to_string()),
            "coordinates" => self.coordinates_label(),
            "data_rank" => Some(self.rank.to_string()),
            "data_rank_colour" => Some(self.rank.color_name().to_string()),
            _ => None,
        }
    }

    /// Whether `name` is a column [`Self::column`] understands.
    #[must_use]
    pub fn is_known_column(name: &str) -> bool {
        name.parse::<MetadataField>().is_ok()
            || COLUMNS.contains(&name)
            || matches!(name, "type" | "x" | "y" | "coordinates")
    }
}
