//! Flattening of nested Overpass elements into single-level rows.
//!
//! `{"id": 1, "tags": {"height:hub": "80"}, "center": {"lat": 1.0}}`
//! becomes `{"id": "1", "tags.height:hub": "80", "center.lat": "1.0"}`.

use serde_json::Value;

use crate::FlatRow;

/// Flattens one element. Nested objects contribute `parent.child` keys,
/// nulls are dropped, arrays are kept as their JSON text.
#[must_use]
pub fn flatten_element(element: &Value) -> FlatRow {
    let mut row = FlatRow::new();
    flatten_into(&mut row, None, element);
    row
}

/// Flattens a list of elements, one row per element.
#[must_use]
pub fn flatten_elements(elements: &[Value]) -> Vec<FlatRow> {
    let rows: Vec<FlatRow> = elements.iter().map(flatten_element).collect();
    log::debug!("Flattened {} elements", rows.len());
    rows
}

fn flatten_into(row: &mut FlatRow, prefix: Option<&str>, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
                flatten_into(row, Some(&path), child);
            }
        }
        Value::Null => {}
        scalar => {
            let Some(key) = prefix else {
                log::warn!("Skipping non-object element: {scalar}");
                return;
            };
            let text = match scalar {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            row.insert(key.to_string(), text);
        }
    }
}
