#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Overpass API client for OpenStreetMap wind turbine data.
//!
//! Builds Overpass QL queries for wind turbines inside a [`BoundingBox`],
//! sends them to an Overpass interpreter endpoint through
//! [`OverpassClient`], and returns the raw [`OverpassResponse`] elements
//! as [`serde_json::Value`] objects for downstream normalization.
//!
//! Named [`Region`] presets are embedded at compile time from
//! `regions.toml`.

pub mod bbox;
pub mod client;
pub mod query;
pub mod region;
pub mod retry;

pub use bbox::BoundingBox;
pub use client::{DEFAULT_OVERPASS_URL, OverpassClient};
pub use query::wind_turbine_query;
pub use region::{Region, all_regions, find_region};
pub use retry::RetryPolicy;

use serde::Deserialize;

/// Errors that can occur while querying the Overpass API.
#[derive(Debug, thiserror::Error)]
pub enum OverpassError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Overpass returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Short description, including retry context when relevant.
        message: String,
    },

    /// The response body is not the expected JSON document.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A bounding box is malformed or out of range.
    #[error("Invalid bounding box: {message}")]
    InvalidBoundingBox {
        /// Description of what went wrong.
        message: String,
    },

    /// The region presets document is malformed.
    #[error("Invalid regions configuration: {message}")]
    InvalidRegions {
        /// Description of what went wrong.
        message: String,
    },

    /// No region preset has the requested id.
    #[error("Unknown region: {0}")]
    UnknownRegion(String),
}

/// The JSON document returned by the Overpass interpreter for
/// `[out:json]` queries.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    /// API version reported by the server.
    #[serde(default)]
    pub version: Option<f64>,
    /// Server software identification.
    #[serde(default)]
    pub generator: Option<String>,
    /// Data freshness and copyright metadata.
    #[serde(default)]
    pub osm3s: Option<serde_json::Value>,
    /// Runtime remark. Overpass reports query timeouts and memory
    /// exhaustion here while still answering HTTP 200.
    #[serde(default)]
    pub remark: Option<String>,
    /// The matching OSM elements (nodes, ways and relations).
    #[serde(default)]
    pub elements: Vec<serde_json::Value>,
}

impl OverpassResponse {
    /// Timestamp of the OSM data the answer is based on, if reported.
    #[must_use]
    pub fn data_timestamp(&self) -> Option<&str> {
        self.osm3s
            .as_ref()?
            .get("timestamp_osm_base")?
            .as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overpass_document() {
        let body = serde_json::json!({
            "version": 0.6,
            "generator": "Overpass API 0.7.62",
            "osm3s": {
                "timestamp_osm_base": "2024-05-01T10:00:00Z",
                "copyright": "The data included in this document is from www.openstreetmap.org."
            },
            "elements": [
                {"type": "node", "id": 1, "lat": 51.5, "lon": 2.8, "tags": {"generator:method": "wind_turbine"}}
            ]
        });
        let response: OverpassResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.elements.len(), 1);
        assert_eq!(response.data_timestamp(), Some("2024-05-01T10:00:00Z"));
        assert!(response.remark.is_none());
    }

    #[test]
    fn tolerates_missing_elements() {
        let response: OverpassResponse =
            serde_json::from_value(serde_json::json!({"remark": "runtime error: timeout"}))
                .unwrap();
        assert!(response.elements.is_empty());
        assert_eq!(response.remark.as_deref(), Some("runtime error: timeout"));
        assert!(response.data_timestamp().is_none());
    }
}
