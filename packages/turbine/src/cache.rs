//! CSV cache of flattened Overpass rows.
//!
//! The header is the sorted union of all row keys. An empty cell reads
//! back as an absent key, so a write followed by a read yields the same
//! rows (minus keys whose value was the empty string).

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::{FlatRow, TurbineError};

/// Sorted union of the keys of every row.
#[must_use]
pub fn column_union(rows: &[FlatRow]) -> Vec<String> {
    rows.iter()
        .flat_map(|row| row.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Writes `rows` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`TurbineError::Io`] if the file cannot be created and
/// [`TurbineError::Csv`] if a record fails to encode.
pub fn write_cache(path: &Path, rows: &[FlatRow]) -> Result<(), TurbineError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let columns = column_union(rows);
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&columns)?;

    for row in rows {
        writer.write_record(
            columns
                .iter()
                .map(|column| row.get(column).map_or("", String::as_str)),
        )?;
    }
    writer.flush()?;

    log::info!(
        "Cached {} rows ({} columns) to {}",
        rows.len(),
        columns.len(),
        path.display()
    );
    Ok(())
}

/// Reads rows previously written by [`write_cache`].
///
/// Columns with an empty header (such as a spreadsheet index column) are
/// ignored.
///
/// # Errors
///
/// Returns [`TurbineError::EmptyCache`] if the file has no header row,
/// [`TurbineError::Io`] if it cannot be opened and [`TurbineError::Csv`]
/// if it is malformed.
pub fn read_cache(path: &Path) -> Result<Vec<FlatRow>, TurbineError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(TurbineError::EmptyCache(path.to_path_buf()));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;

        let row: FlatRow = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, value)| !header.is_empty() && !value.is_empty())
            .map(|(header, value)| (header.clone(), value.to_owned()))
            .collect();
        rows.push(row);
    }

    log::info!("Loaded {} cached rows from {}", rows.len(), path.display());
    Ok(rows)
}
