//! GeoJSON export of a styled map.

use std::fs;
use std::path::Path;

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use wind_map_turbine_models::COLUMNS;

use crate::RenderError;
use crate::style::{StyledMap, StyledPoint};

/// Builds a collection with one point feature per styled marker.
///
/// Feature ids are `<type>/<id>`, since OSM ids are only unique per
/// element type. Every record column is a property (`null` when absent),
/// alongside the marker style and the record's OSM link.
#[must_use]
pub fn to_feature_collection(map: &StyledMap) -> FeatureCollection {
    let features: Vec<Feature> = map.points.iter().map(to_feature).collect();

    let bbox = map.bounds().map(|(s, w, n, e)| vec![w, s, e, n]);

    FeatureCollection {
        bbox,
        features,
        foreign_members: None,
    }
}

/// Serializes the collection for `map` to `path`.
///
/// # Errors
///
/// Returns [`RenderError::Json`] if serialization fails and
/// [`RenderError::Io`] if the file cannot be written.
pub fn write_geojson(path: &Path, map: &StyledMap) -> Result<(), RenderError> {
    let collection = to_feature_collection(map);
    let contents = serde_json::to_string_pretty(&collection)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;

    log::info!(
        "Wrote {} features to {}",
        collection.features.len(),
        path.display()
    );
    Ok(())
}

fn to_feature(point: &StyledPoint) -> Feature {
    let record = &point.record;
    let mut properties = JsonObject::new();

    for column in COLUMNS {
        let value = match *column {
            "id" => JsonValue::from(record.id),
            "lat" => JsonValue::from(point.position.lat),
            "lon" => JsonValue::from(point.position.lon),
            _ => record.column(column).map_or(JsonValue::Null, JsonValue::from),
        };
        properties.insert((*column).to_string(), value);
    }

    properties.insert("x".to_string(), JsonValue::from(point.position.x));
    properties.insert("y".to_string(), JsonValue::from(point.position.y));
    properties.insert(
        "coordinates".to_string(),
        JsonValue::from(vec![point.position.lat, point.position.lon]),
    );
    properties.insert(
        "fill_color".to_string(),
        JsonValue::from(point.fill.to_string()),
    );
    properties.insert(
        "line_color".to_string(),
        JsonValue::from(point.line.to_string()),
    );
    properties.insert("legend".to_string(), JsonValue::from(point.legend.clone()));
    properties.insert("url".to_string(), JsonValue::from(record.osm_url()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            point.position.lon,
            point.position.lat,
        ]))),
        id: Some(Id::String(format!("{}/{}", record.osm_type, record.id))),
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use wind_map_turbine_models::{DataRank, OsmElementType, Position, TurbineRecord};

    use super::*;
    use crate::style::{MapOptions, style_records};

    fn styled() -> StyledMap {
        let mut way = TurbineRecord::new(202, OsmElementType::Way);
        way.position = Some(Position {
            lat: 51.7,
            lon: 3.0,
            x: 333_958.5,
            y: 6_745_000.0,
        });
        way.manufacturer = Some("Vestas".to_string());
        way.rank = DataRank::Silver;

        let mut node = TurbineRecord::new(101, OsmElementType::Node);
        node.position = Some(Position {
            lat: 51.5,
            lon: 2.8,
            x: 311_694.6,
            y: 6_710_219.1,
        });

        let unpositioned = TurbineRecord::new(7, OsmElementType::Node);
        style_records(&[way, node, unpositioned], &MapOptions::default()).unwrap()
    }

    #[test]
    fn one_point_feature_per_positioned_record() {
        let collection = to_feature_collection(&styled());
        assert_eq!(collection.features.len(), 2);

        let feature = &collection.features[0];
        assert_eq!(feature.id, Some(Id::String("way/202".to_string())));
        match &feature.geometry.as_ref().unwrap().value {
            Value::Point(coords) => assert_eq!(coords, &vec![3.0, 51.7]),
            other => panic!("expected a point, got {other:?}"),
        }
    }

    #[test]
    fn properties_carry_columns_and_style() {
        let collection = to_feature_collection(&styled());
        let properties = collection.features[0].properties.as_ref().unwrap();

        assert_eq!(properties["id"], JsonValue::from(202));
        assert_eq!(properties["manufacturer"], JsonValue::from("Vestas"));
        assert_eq!(properties["model"], JsonValue::Null);
        assert_eq!(properties["data_rank"], JsonValue::from("Silver"));
        assert_eq!(properties["data_rank_colour"], JsonValue::from("silver"));
        assert_eq!(properties["fill_color"], JsonValue::from("#c0c0c0"));
        assert_eq!(properties["line_color"], JsonValue::from("black"));
        assert_eq!(
            properties["url"],
            JsonValue::from("https://www.openstreetmap.org/way/202/")
        );
    }

    #[test]
    fn bbox_is_west_south_east_north() {
        let collection = to_feature_collection(&styled());
        assert_eq!(collection.bbox, Some(vec![2.8, 51.5, 3.0, 51.7]));
    }

    #[test]
    fn writes_a_parseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("turbines.geojson");
        write_geojson(&path, &styled()).unwrap();

        let parsed: geojson::GeoJson = fs::read_to_string(&path).unwrap().parse().unwrap();
        match parsed {
            geojson::GeoJson::FeatureCollection(fc) => assert_eq!(fc.features.len(), 2),
            other => panic!("expected a feature collection, got {other:?}"),
        }
    }
}
