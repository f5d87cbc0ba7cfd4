//! Geographic bounding boxes in Overpass `(south,west,north,east)` order.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::OverpassError;

/// A WGS84 bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundingBox {
    /// Southern latitude.
    pub south: f64,
    /// Western longitude.
    pub west: f64,
    /// Northern latitude.
    pub north: f64,
    /// Eastern longitude.
    pub east: f64,
}

impl BoundingBox {
    /// Creates a validated bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::InvalidBoundingBox`] if a coordinate is out
    /// of range or `south` is not below `north`.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self, OverpassError> {
        let bbox = Self {
            south,
            west,
            north,
            east,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    /// Checks coordinate ranges and ordering.
    ///
    /// `west > east` is allowed: Overpass treats such a box as crossing the
    /// antimeridian.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::InvalidBoundingBox`] describing the first
    /// violated constraint.
    pub fn validate(&self) -> Result<(), OverpassError> {
        let invalid = |message: String| Err(OverpassError::InvalidBoundingBox { message });

        for (label, lat) in [("south", self.south), ("north", self.north)] {
            if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
                return invalid(format!("{label} latitude {lat} is outside -90..=90"));
            }
        }
        for (label, lon) in [("west", self.west), ("east", self.east)] {
            if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
                return invalid(format!("{label} longitude {lon} is outside -180..=180"));
            }
        }
        if self.south >= self.north {
            return invalid(format!(
                "south ({}) must be below north ({})",
                self.south, self.north
            ));
        }
        Ok(())
    }

    /// Whether a point lies inside the box (edges included).
    #[must_use]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        let lat_ok = (self.south..=self.north).contains(&lat);
        let lon_ok = if self.west <= self.east {
            (self.west..=self.east).contains(&lon)
        } else {
            lon >= self.west || lon <= self.east
        };
        lat_ok && lon_ok
    }
}

impl fmt::Display for BoundingBox {
    /// Formats as the Overpass QL bbox filter `(south,west,north,east)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{},{})",
            self.south, self.west, self.north, self.east
        )
    }
}

impl FromStr for BoundingBox {
    type Err = OverpassError;

    /// Parses `south,west,north,east`, optionally wrapped in parentheses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
        let values = inner
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|e| OverpassError::InvalidBoundingBox {
                        message: format!("'{}' is not a number: {e}", part.trim()),
                    })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let [south, west, north, east] = values[..] else {
            return Err(OverpassError::InvalidBoundingBox {
                message: format!("expected 4 values, got {}", values.len()),
            });
        };

        Self::new(south, west, north, east)
    }
}
