//! Turns flattened rows into ranked [`TurbineRecord`]s.
//!
//! Column names are normalized first: the `tags.` prefix is stripped and
//! `:` becomes `_`, so `tags.rotor:diameter` is read as `rotor_diameter`.
//! Element-level keys (`id`, `type`, `lat`, ...) take precedence over tags
//! that normalize to the same name.

use strum::IntoEnumIterator as _;
use wind_map_turbine_models::{MetadataField, OsmElementType, TurbineRecord};

use crate::progress::ProgressCallback;
use crate::projection::position;
use crate::rank::rank_for;
use crate::{FlatRow, TurbineError};

const TAG_PREFIX: &str = "tags.";

/// Normalized column name for a flattened key.
#[must_use]
pub fn canonical_column(key: &str) -> String {
    key.strip_prefix(TAG_PREFIX).unwrap_or(key).replace(':', "_")
}

/// Renames every column of `row` to its canonical name.
///
/// Blank values are dropped so that they count as missing.
#[must_use]
pub fn rename_columns(row: &FlatRow) -> FlatRow {
    let mut renamed = FlatRow::new();

    let (tags, element): (Vec<_>, Vec<_>) =
        row.iter().partition(|(key, _)| key.starts_with(TAG_PREFIX));

    // Element keys are inserted last so they win on collisions.
    for (key, value) in tags.into_iter().chain(element) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        renamed.insert(canonical_column(key), value.to_string());
    }

    renamed
}

/// Normalizes one row into a ranked record.
///
/// # Errors
///
/// Returns [`TurbineError::MissingColumn`] if the row has no `id`, and
/// [`TurbineError::InvalidValue`] if the id, element type or coordinates
/// cannot be parsed or are out of range.
pub fn normalize_row(index: usize, row: &FlatRow) -> Result<TurbineRecord, TurbineError> {
    let columns = rename_columns(row);

    let invalid = |column: &str, value: &str| TurbineError::InvalidValue {
        row: index,
        column: column.to_string(),
        value: value.to_string(),
    };

    let id_text = columns
        .get("id")
        .ok_or_else(|| TurbineError::MissingColumn {
            row: index,
            column: "id".to_string(),
        })?;
    let id = parse_id(id_text).ok_or_else(|| invalid("id", id_text))?;

    let osm_type = match columns.get("type") {
        Some(text) => text
            .parse::<OsmElementType>()
            .map_err(|_| invalid("type", text))?,
        None => OsmElementType::Node,
    };

    let mut record = TurbineRecord::new(id, osm_type);

    let lat = coordinate(&columns, "lat", index)?;
    let lon = coordinate(&columns, "lon", index)?;
    match (lat, lon) {
        (Some(lat), Some(lon)) => {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(invalid("lat", &lat.to_string()));
            }
            if !(-180.0..=180.0).contains(&lon) {
                return Err(invalid("lon", &lon.to_string()));
            }
            record.position = Some(position(lat, lon));
        }
        (None, None) => {
            log::debug!("{osm_type} {id} has no coordinates");
        }
        _ => {
            log::warn!("{osm_type} {id} has only one of lat/lon, leaving it unpositioned");
        }
    }

    for field in MetadataField::iter() {
        *record.field_mut(field) = columns.get(field.as_ref()).cloned();
    }

    record.rank = rank_for(&record);
    Ok(record)
}

/// Normalizes every row, reporting progress per row.
///
/// Produces exactly one record per input row.
///
/// # Errors
///
/// Returns the first [`TurbineError`] encountered.
pub fn normalize_rows(
    rows: &[FlatRow],
    progress: &dyn ProgressCallback,
) -> Result<Vec<TurbineRecord>, TurbineError> {
    progress.set_total(rows.len() as u64);

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        records.push(normalize_row(index, row)?);
        progress.inc(1);
    }

    progress.finish(format!("Normalized {} records", records.len()));
    log::info!("Normalized {} turbine records", records.len());
    Ok(records)
}

/// Reads `key`, falling back to `center.<key>` for ways and relations.
fn coordinate(columns: &FlatRow, key: &str, index: usize) -> Result<Option<f64>, TurbineError> {
    let Some(text) = columns
        .get(key)
        .or_else(|| columns.get(&format!("center.{key}")))
    else {
        return Ok(None);
    };

    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| TurbineError::InvalidValue {
            row: index,
            column: key.to_string(),
            value: text.clone(),
        })
}

/// Parses an OSM id. Accepts integral floats (`"123.0"`) since some
/// spreadsheet tools rewrite integer columns that way.
#[allow(clippy::cast_possible_truncation)]
fn parse_id(text: &str) -> Option<i64> {
    if let Ok(id) = text.parse::<i64>() {
        return Some(id);
    }
    let value = text.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        Some(value as i64)
    } else {
        None
    }
}
