#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Normalization and ranking of OpenStreetMap wind turbine records.
//!
//! Raw Overpass elements are first flattened into [`FlatRow`]s
//! ([`flatten`]), which is also the shape persisted by the CSV [`cache`].
//! [`normalize`] then turns each row into a
//! [`wind_map_turbine_models::TurbineRecord`] with a projected position
//! ([`projection`]) and a data-quality rank ([`rank`]).

pub mod cache;
pub mod flatten;
pub mod normalize;
pub mod progress;
pub mod projection;
pub mod rank;
pub mod summary;

use std::collections::BTreeMap;
use std::path::PathBuf;

/// A flattened element: nested keys joined with `.`, values as text.
/// Absent keys are nulls.
pub type FlatRow = BTreeMap<String, String>;

/// Errors that can occur while normalizing or caching turbine records.
#[derive(Debug, thiserror::Error)]
pub enum TurbineError {
    /// I/O error (cache file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The cache file has no header row.
    #[error("Cache file {} is empty", .0.display())]
    EmptyCache(PathBuf),

    /// A required column is missing from a row.
    #[error("Row {row}: missing required column '{column}'")]
    MissingColumn {
        /// Zero-based row index.
        row: usize,
        /// Column name.
        column: String,
    },

    /// A column holds a value that cannot be interpreted.
    #[error("Row {row}: invalid {column} '{value}'")]
    InvalidValue {
        /// Zero-based row index.
        row: usize,
        /// Column name.
        column: String,
        /// The offending value.
        value: String,
    },
}
